use thiserror::Error;

pub type Result<T> = std::result::Result<T, BoardError>;

#[derive(Debug, Error)]
pub enum BoardError {
    #[error("Board store is closed")]
    StoreClosed,

    #[error("Card {card} references missing column {column}")]
    DanglingCard { card: String, column: String },

    #[error("Duplicate {kind} id: {id}")]
    DuplicateId { kind: &'static str, id: String },

    #[error("More than one active {0}")]
    MultipleActive(&'static str),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}
