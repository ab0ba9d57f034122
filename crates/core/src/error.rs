#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image processing error: {0}")]
    Image(#[from] image::ImageError),

    #[error("could not serialize collection: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("could not decode {0} as an image")]
    UnreadableFile(String),

    #[error("could not encode photo payload: {0}")]
    Encode(String),

    #[error("storage quota exceeded — the collection was not persisted")]
    QuotaExceeded,
}

pub type Result<T> = std::result::Result<T, Error>;
