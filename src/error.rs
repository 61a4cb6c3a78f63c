use thiserror::Error;

/// Unified error type for increment-build-number operations
#[derive(Error, Debug)]
pub enum BumpError {
    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("XML error: {0}")]
    Xml(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in increment-build-number
pub type Result<T> = std::result::Result<T, BumpError>;

impl BumpError {
    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        BumpError::Version(msg.into())
    }

    /// Create an XML error with context
    pub fn xml(msg: impl Into<String>) -> Self {
        BumpError::Xml(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        BumpError::Config(msg.into())
    }

    /// Short classification used when reporting a failed file
    pub fn kind(&self) -> &'static str {
        match self {
            BumpError::Version(_) => "parse",
            BumpError::Xml(_) | BumpError::Json(_) => "format",
            BumpError::Config(_) | BumpError::Pattern(_) => "config",
            BumpError::Git(_) => "git",
            BumpError::Io(_) => "io",
        }
    }
}

impl From<quick_xml::Error> for BumpError {
    fn from(err: quick_xml::Error) -> Self {
        BumpError::Xml(err.to_string())
    }
}
