//! Custom error types for Changesmith with improved type safety and error handling.

use thiserror::Error;

/// Main error type for Changesmith operations.
#[derive(Error, Debug)]
pub enum ChangesmithError {
    // Cli args errors
    #[error("Invalid arguments: {0}")]
    InvalidArgs(String),

    // Package discovery errors
    #[error("No packages found under '{0}'")]
    NoPackagesFound(String),

    #[error("Git operation failed: {0}")]
    GitError(#[from] git2::Error),

    // TOML parsing errors
    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    // Template rendering errors
    #[error("Template rendering failed: {0}")]
    TemplateError(#[from] tera::Error),

    #[error("URL parse error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] log::SetLoggerError),

    // Generic wrapper for other errors
    #[error(transparent)]
    Other(#[from] color_eyre::Report),
}

/// Result type alias using ChangesmithError
pub type Result<T> = std::result::Result<T, ChangesmithError>;

impl ChangesmithError {
    /// Create an invalid arguments error
    pub fn invalid_args(msg: impl Into<String>) -> Self {
        Self::InvalidArgs(msg.into())
    }
}

// Implement From for std::io::Error - wraps in Other variant for generic I/O errors
impl From<std::io::Error> for ChangesmithError {
    fn from(err: std::io::Error) -> Self {
        Self::Other(color_eyre::Report::from(err))
    }
}
