//! Error types and handling for mirrorcp
//!
//! Errors fall into two propagation classes: fatal errors abort the whole
//! run (a broken walk or bad configuration must never be presented as a
//! complete mirror), while per-task errors are counted and reported without
//! stopping sibling tasks.

use std::path::PathBuf;

/// Main error type for mirrorcp operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        /// Error message from the I/O operation
        message: String,
    },

    /// File not found
    #[error("File not found: {path}")]
    FileNotFound {
        /// Path to the file that was not found
        path: PathBuf,
    },

    /// Permission denied
    #[error("Permission denied: {path}")]
    PermissionDenied {
        /// Path to the file with permission issues
        path: PathBuf,
    },

    /// Content hashing failed for a file
    #[error("Hashing '{path}' failed: {message}")]
    Hash {
        /// Path to the file being hashed
        path: PathBuf,
        /// Error message from the failed read
        message: String,
    },

    /// Copying a file failed
    #[error("Copying '{src_path}' to '{destination}' failed: {message}")]
    Copy {
        /// Source file path
        src_path: PathBuf,
        /// Destination file path
        destination: PathBuf,
        /// Error message from the failed copy
        message: String,
    },

    /// Walking the source tree failed
    #[error("Tree walk failed: {message}")]
    Walk {
        /// Error message describing the walk failure
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Error message describing the configuration issue
        message: String,
    },

    /// Generic error with custom message
    #[error("{message}")]
    Other {
        /// Custom error message
        message: String,
    },
}

/// Error kind for categorizing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// I/O related errors
    Io,
    /// Content hashing errors
    Hash,
    /// File copy errors
    Copy,
    /// Tree walk errors
    Walk,
    /// Configuration errors
    Config,
    /// Other errors
    Other,
}

impl Error {
    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Io { .. } | Self::FileNotFound { .. } | Self::PermissionDenied { .. } => {
                ErrorKind::Io
            }
            Self::Hash { .. } => ErrorKind::Hash,
            Self::Copy { .. } => ErrorKind::Copy,
            Self::Walk { .. } => ErrorKind::Walk,
            Self::Config { .. } => ErrorKind::Config,
            Self::Other { .. } => ErrorKind::Other,
        }
    }

    /// Check whether this error aborts the whole run
    ///
    /// Hash and copy failures are per-task: the task is counted as failed
    /// and the run continues. Walk and configuration failures are fatal.
    pub fn is_fatal(&self) -> bool {
        match self {
            Self::Walk { .. } | Self::Config { .. } => true,
            Self::Hash { .. } | Self::Copy { .. } => false,
            Self::Io { .. }
            | Self::FileNotFound { .. }
            | Self::PermissionDenied { .. }
            | Self::Other { .. } => false,
        }
    }

    /// Create a new hash error
    pub fn hash<P: Into<PathBuf>, S: Into<String>>(path: P, message: S) -> Self {
        Self::Hash {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a new copy error
    pub fn copy<P1: Into<PathBuf>, P2: Into<PathBuf>, S: Into<String>>(
        source: P1,
        destination: P2,
        message: S,
    ) -> Self {
        Self::Copy {
            src_path: source.into(),
            destination: destination.into(),
            message: message.into(),
        }
    }

    /// Create a new walk error
    pub fn walk<S: Into<String>>(message: S) -> Self {
        Self::Walk {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new generic error
    pub fn other<S: Into<String>>(message: S) -> Self {
        Self::Other {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: error.to_string(),
        }
    }
}
