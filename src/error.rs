//! Error handling module for featuretui
//!
//! Provides the error taxonomy shared by the enumerator, the metrics loader,
//! the selection resolver and the terminal front end.

use thiserror::Error;

/// Main error type for featuretui
#[derive(Error, Debug)]
pub enum FeatureTuiError {
    /// Malformed universe size / minimum selection size at startup
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Metrics source missing or malformed at startup
    #[error("Metrics load error: {0}")]
    MetricsLoad(String),

    /// A selection entry could not be parsed as an in-range feature index
    #[error("Invalid selection: {0}")]
    InvalidSelectionFormat(String),

    /// Fewer distinct features selected than the minimum combination size
    #[error("Insufficient selection: {selected} feature(s) selected, at least {required} required")]
    InsufficientSelection { selected: usize, required: usize },

    /// A normalized, validly sized selection is missing from the combination table
    #[error("Internal inconsistency: {0}")]
    InternalInconsistency(String),

    /// IO errors (file operations, terminal, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Terminal/UI errors
    #[error("Terminal error: {0}")]
    Terminal(String),
}

/// Result type alias for featuretui operations
pub type Result<T> = std::result::Result<T, FeatureTuiError>;

impl FeatureTuiError {
    /// Create an invalid configuration error
    pub fn invalid_configuration(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    /// Create a metrics load error
    pub fn metrics_load(msg: impl Into<String>) -> Self {
        Self::MetricsLoad(msg.into())
    }

    /// Create an invalid selection format error
    pub fn invalid_selection(msg: impl Into<String>) -> Self {
        Self::InvalidSelectionFormat(msg.into())
    }

    /// Create an internal inconsistency error
    pub fn internal_inconsistency(msg: impl Into<String>) -> Self {
        Self::InternalInconsistency(msg.into())
    }

    /// Create a terminal error
    pub fn terminal(msg: impl Into<String>) -> Self {
        Self::Terminal(msg.into())
    }

    /// Startup errors abort the process; per-request errors are recovered
    /// at the display boundary.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            Self::InvalidSelectionFormat(_)
                | Self::InsufficientSelection { .. }
                | Self::InternalInconsistency(_)
        )
    }
}
