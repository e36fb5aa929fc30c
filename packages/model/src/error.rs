use thiserror::Error;

/// Errors raised while reading or writing a website forest
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Website has no tabs")]
    NoTabs,
}

/// Model Result type alias
pub type ModelResult<T> = Result<T, ModelError>;
