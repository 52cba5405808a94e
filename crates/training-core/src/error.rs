use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrainingError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Unknown skill label: '{0}'")]
    UnknownSkill(String),

    #[error("Data error: {0}")]
    Data(String),
}

pub type Result<T> = std::result::Result<T, TrainingError>;
