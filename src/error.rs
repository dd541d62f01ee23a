use thiserror::Error;

/// Unified error type for yamusic-tools operations
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Music API error: {0}")]
    Api(String),

    #[error("Malformed tag '{tag}': {reason}")]
    MalformedTag { tag: String, reason: String },

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("Credentials error: {0}")]
    Credentials(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Remote operation failed: {0}")]
    Remote(String),
}

/// Convenience type alias for Results in yamusic-tools
pub type Result<T> = std::result::Result<T, ToolError>;

impl ToolError {
    /// Create a music API error with context
    pub fn api(msg: impl Into<String>) -> Self {
        ToolError::Api(msg.into())
    }

    /// Create a malformed tag error naming the offending tag
    pub fn malformed_tag(tag: impl Into<String>, reason: impl Into<String>) -> Self {
        ToolError::MalformedTag {
            tag: tag.into(),
            reason: reason.into(),
        }
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        ToolError::Version(msg.into())
    }

    /// Create a credentials error with context
    pub fn credentials(msg: impl Into<String>) -> Self {
        ToolError::Credentials(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ToolError::Config(msg.into())
    }

    /// Create a remote error with context
    pub fn remote(msg: impl Into<String>) -> Self {
        ToolError::Remote(msg.into())
    }
}
