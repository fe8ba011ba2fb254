//! Domain-specific error types for the reconciliation engine.
//!
//! The engine returns typed errors via [`thiserror`]; command handlers at the
//! CLI boundary convert them to [`anyhow::Error`] with the standard `?`
//! operator and report them with file context through the logger.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading and classifying a managed file.
///
/// A missing *destination* is never an error; it is the first-class
/// [`Comparison::Missing`](crate::reconcile::Comparison::Missing)
/// classification. A missing *source* is: the catalog is assumed consistent
/// with the repository, so an absent source file means the repository checkout
/// itself is broken.
#[derive(Error, Debug)]
pub enum ReconcileError {
    /// A catalog source file is absent from the skel directory.
    #[error("missing source file: {path}")]
    MissingSource {
        /// Path of the source file that could not be found.
        path: PathBuf,
    },

    /// Reading the source or destination failed for a reason other than
    /// destination absence (permissions, disk errors, invalid UTF-8).
    #[error("failed to read {path}: {source}")]
    Read {
        /// Path of the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}
