//! Walk error types.

use std::path::PathBuf;

/// Error raised while walking a content tree.
///
/// Any I/O failure is fatal for the whole walk: a partial navigation tree is
/// worse than a failed build, so errors propagate instead of producing
/// partial results.
#[derive(Debug, thiserror::Error)]
pub enum WalkError {
    /// Directory listing failed.
    #[error("Failed to read directory {}: {source}", .path.display())]
    ReadDir {
        /// Directory that could not be listed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Content file read failed.
    #[error("Failed to read content file {}: {source}", .path.display())]
    ReadFile {
        /// File that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Section root directory does not exist.
    #[error("Section root not found: {}", .0.display())]
    MissingRoot(PathBuf),
}
