// ── Central error type ────────────────────────────────────────────────────────
//
// All fallible operations in Jotter return `error::Result<T>`.  No panics
// in production paths; errors surface as values the presentation layer
// reports to the user, and the session stays usable afterwards.

use std::path::PathBuf;

use crate::buffer::BufferId;

/// Every error that Jotter can produce.
#[derive(Debug, thiserror::Error)]
pub enum JotterError {
    /// Reading or writing a file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// The file the collaborator was asked to read or write.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A toolchain executable could not be started.
    ///
    /// Kept apart from a failed compilation: the compiler never ran.
    #[error("failed to start `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Waiting on, or reading from, a started process failed.
    #[error("lost contact with `{program}`: {source}")]
    Process {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file exists but could not be used.
    #[error("invalid configuration at {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    /// Encoding a value as JSON failed.
    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    /// The identifier does not name an open buffer.
    #[error("no open buffer named `{0}`")]
    UnknownBuffer(BufferId),

    /// The buffer has no absolute destination; the caller must obtain one
    /// (save-as) before saving or running it.
    #[error("`{0}` has not been saved to a file yet")]
    NeedsPath(BufferId),
}

impl JotterError {
    /// Attach `path` to a raw I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, JotterError>;

// ── Tests ─────────────────────────────────────────────────────────────────────
