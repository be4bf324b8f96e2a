//! Error types for the synchronization core.
//!
//! The only fatal condition in this crate is an ordering violation on a
//! piece sequence. Upstream guarantees that sequences arrive sorted, so a
//! violation indicates a bug elsewhere and is surfaced as a typed error
//! rather than silently repaired.

use thiserror::Error;

/// Errors raised by piece-sequence validation and the diff walk.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    /// Pieces are not sorted by `(message id, rank)`.
    ///
    /// `index` is the position of the first piece that compares below its
    /// predecessor. Not recoverable: the producer of the sequence is broken.
    #[error("pieces out of order at index {index}: sequences must be non-decreasing by (message id, rank)")]
    Unordered {
        /// Position of the offending piece.
        index: usize,
    },
}
