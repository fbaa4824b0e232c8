//! Crate-wide error types.
//!
//! Library code uses specific `thiserror` enums ([`Error`] here and
//! [`PlatformError`] for per-adapter failures), the CLI binary wraps
//! everything in `anyhow`.
//!
//! # Design
//!
//! - [`Error`]: startup and configuration failures, fatal before serving
//! - [`PlatformError`]: one adapter call went wrong; absorbed by the
//!   aggregator, surfaced by permalink resolution
//!
//! # Example
//!
//! ```ignore
//! use tunelink::error::{Result, ResultExt};
//!
//! fn boot(path: &Path) -> Result<Engine> {
//!     let config = config::load_from(path).with_context("loading config")?;
//!     Engine::from_config(&config)
//! }
//! ```

use std::path::PathBuf;

pub use crate::platform::PlatformError;

/// Crate-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Missing or invalid configuration; the process must not serve traffic
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Config file could not be read
    #[error("Failed to read {path}: {source}")]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for our schema
    #[error("Failed to parse {path}: {source}")]
    ParseConfig {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// HTTP client could not be built
    #[error("HTTP client error: {0}")]
    HttpClient(String),

    /// A platform call failed
    #[error(transparent)]
    Platform(#[from] PlatformError),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Add context to an error.
    pub fn context(self, ctx: impl Into<String>) -> Self {
        Self::WithContext {
            context: ctx.into(),
            source: Box::new(self),
        }
    }

    /// Whether this error (or the one it wraps) is a configuration problem.
    pub fn is_configuration(&self) -> bool {
        match self {
            Self::Configuration(_) | Self::ReadConfig { .. } | Self::ParseConfig { .. } => true,
            Self::WithContext { source, .. } => source.is_configuration(),
            _ => false,
        }
    }
}

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn with_context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, PlatformError> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Platform(e).context(ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::configuration("qobuz requires an app id");
        assert!(err.to_string().contains("qobuz requires an app id"));
    }

    #[test]
    fn test_error_with_context() {
        let err = Error::configuration("bad key").context("while building registry");
        let msg = err.to_string();
        assert!(msg.contains("while building registry"));
        assert!(err.is_configuration());
    }

    #[test]
    fn test_platform_error_is_not_configuration() {
        let err = Error::from(PlatformError::unavailable("deezer", "connection refused"));
        assert!(!err.is_configuration());
        assert!(err.to_string().contains("deezer"));
    }

    #[test]
    fn test_result_ext() {
        let result: Result<()> = Err(Error::configuration("test"));
        let with_ctx = result.with_context("additional context");
        assert!(with_ctx.unwrap_err().to_string().contains("additional context"));
    }
}
