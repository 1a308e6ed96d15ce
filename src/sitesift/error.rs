use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiftError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Unknown filter category: {0}")]
    UnknownCategory(String),

    #[error("No data to export")]
    NothingToExport,

    #[error("Please enter a filename")]
    EmptyFileName,

    #[error("Source error: {0}")]
    Source(String),
}

pub type Result<T> = std::result::Result<T, SiftError>;
