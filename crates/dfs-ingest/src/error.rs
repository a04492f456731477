#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("connection failure: {0}")]
    Connection(String),

    #[error("path not found: {0}")]
    PathNotFound(String),

    #[error("listing failure at {path}: {source}")]
    Listing {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, IngestError>;
