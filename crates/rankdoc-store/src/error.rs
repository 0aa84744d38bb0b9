//! Store errors.

use rankdoc_core::RankdocError;
use thiserror::Error;

/// Error raised by a [`DocumentStore`](crate::DocumentStore) operation.
///
/// Validation problems are never errors; they are reported by
/// [`DocumentStore::validate`](crate::DocumentStore::validate).
#[derive(Error, Debug)]
pub enum StoreError {
    /// Import text is not JSON. Caught before any coercion or validation.
    #[error("document is not valid JSON: {0}")]
    Parse(#[source] serde_json::Error),

    /// Import value is JSON but does not fit the document model.
    #[error("document cannot be imported: {0}")]
    NotCoercible(#[source] RankdocError),

    /// A structural edit addressed an element that does not exist.
    #[error("{list} index {index} is out of range (length {len})")]
    IndexOutOfRange {
        /// Name of the addressed list.
        list: &'static str,
        /// Requested index.
        index: usize,
        /// Length of the list at the time of the edit.
        len: usize,
    },

    /// The held document could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(#[source] RankdocError),
}
