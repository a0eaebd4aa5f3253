//! Error types for reading and module resolution.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, FsError>;

/// Error type for file system reads and `require` calls.
///
/// `NotFound` is the expected case: the resolver catches it to decide whether
/// to fall through to the next lookup. Every other variant always reaches the
/// caller unchanged.
///
/// # Example
///
/// ```ignore
/// match fs.require("./missing") {
///     Ok(value) => { /* success */ }
///     Err(FsError::NotFound { key }) => eprintln!("no such entry: {key}"),
///     Err(e) => eprintln!("{e}"),
/// }
/// ```
#[derive(Debug, Error)]
pub enum FsError {
    /// No archive entry matched the lookup key.
    #[error("not found: {key}")]
    NotFound {
        /// The normalized key that was looked up.
        key: String,
    },

    /// An argument was rejected (e.g. a blank base directory).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A pattern selector could not be compiled.
    #[error("invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// A package manifest is not valid JSON or has the wrong shape.
    #[error("failed to parse manifest {path}: {source}")]
    ManifestParse {
        /// Manifest path as it was requested.
        path: String,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// The host-native loader failed with something other than not-found.
    #[error(transparent)]
    NativeLoad(#[from] NativeLoadError),

    /// The executor failed while evaluating a module.
    #[error("failed to execute {path}: {message}")]
    Execution {
        /// Path of the module being executed.
        path: String,
        /// Reason reported by the executor.
        message: String,
    },

    /// The archive buffer is malformed.
    #[error("archive error: {0}")]
    Archive(#[from] std::io::Error),

    /// The background parse task did not complete.
    #[error("archive task failed: {0}")]
    Task(String),
}

impl FsError {
    /// Create a not-found error for the given key.
    pub fn not_found(key: impl Into<String>) -> Self {
        Self::NotFound { key: key.into() }
    }

    /// Create an execution error.
    pub fn execution(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Execution {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Check whether this is the not-found signal that drives fallback.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Failure reported by a [`NativeLoader`](crate::NativeLoader).
#[derive(Debug, Error)]
pub enum NativeLoadError {
    /// The host has no module under this name.
    #[error("native module not found: {0}")]
    NotFound(String),

    /// The module exists but loading it failed.
    #[error("failed to load native module {name}: {message}")]
    Failed {
        /// Module name.
        name: String,
        /// Reason reported by the host.
        message: String,
    },
}

impl NativeLoadError {
    /// Create a loader failure.
    pub fn failed(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Failed {
            name: name.into(),
            message: message.into(),
        }
    }
}
