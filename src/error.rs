use thiserror::Error;

/// Everything that can go wrong between reading a roster and writing a result.
#[derive(Error, Debug)]
pub enum SeatError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Roster CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Bad knobs or a seating shape that does not fit them. Raised before any search work.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Inconsistent people or seating data, e.g. someone seated twice.
    #[error("Invalid seating data: {0}")]
    Validation(String),
}

pub type SfResult<T> = Result<T, SeatError>;
