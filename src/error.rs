use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShelfError {
    #[error("Invalid selector `{selector}`: {reason}")]
    Selector { selector: String, reason: String },

    #[error("Invalid preference file: {0}")]
    Preferences(#[from] serde_json::Error),

    #[error("Could not determine preference file path")]
    NoStorePath,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
