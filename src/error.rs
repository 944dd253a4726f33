//! Error taxonomy shared by both generators.
//!
//! Every failure aborts the current run immediately; there is no partial
//! recovery. Artifacts already written before the failure stay on disk —
//! each run regenerates its owned artifacts wholesale, so the next
//! successful run repairs any torn state.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result alias for generator operations.
pub type GenResult<T> = Result<T, GenError>;

/// Failure modes of the registration and embedding generators.
#[derive(Debug, Error)]
pub enum GenError {
    /// Required convention not met, e.g. the sentinel line is absent from
    /// the build-configuration file. Raised before any write.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A scanned directory is missing or unreadable.
    #[error("cannot discover files in {}: {source}", .dir.display())]
    Discovery {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Read or write failure on an artifact.
    #[error("i/o error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The build tool could not be spawned, or returned non-zero. The exit
    /// code is propagated to the caller unchanged, never retried.
    #[error("build subprocess failed: {0}")]
    Subprocess(String),
}

impl GenError {
    /// Attach a path to a raw I/O error.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
