use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScoreError {
    #[error("Cannot access the score file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Score file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ScoreError>;
