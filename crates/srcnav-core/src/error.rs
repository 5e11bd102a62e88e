/// Unified error type for srcnav.
#[derive(Debug, thiserror::Error)]
pub enum SrcnavError {
    #[error("Manifest error: {0}")]
    Manifest(String),

    #[error("Failed to resolve {path}: {reason}")]
    Resolve { path: String, reason: String },

    #[error("No readable input: {0}")]
    NoInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
