use thiserror::Error;

#[derive(Error, Debug)]
pub enum JournalError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed journal file: {0}")]
    Corrupted(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Trade '{0}' not found")]
    TradeNotFound(String),

    #[error("Trade '{0}' is already closed")]
    AlreadyClosed(String),

    #[error("Partial amount ({requested}) exceeds remaining lot size ({remaining:.2})")]
    ExceedsRemainingLots { requested: f64, remaining: f64 },

    #[error("'{0}' already exists in this category")]
    DuplicateOption(String),

    #[error("'{0}' not found in this category")]
    OptionNotFound(String),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, JournalError>;
