use thiserror::Error;

#[derive(Error, Debug)]
pub enum MixForgeError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Data Validation Error: {0}")]
    Validation(String),

    #[error("Unknown item '{0}'")]
    UnknownItem(String),

    #[error("Unknown effect '{0}'")]
    UnknownEffect(String),

    #[error("Unknown raw material '{0}'")]
    UnknownMaterial(String),

    #[error("Search worker failed: {0}")]
    Worker(String),
}

pub type MfResult<T> = Result<T, MixForgeError>;
