//! Error types for keystash.
//!
//! The crate has a deliberately small failure surface:
//!
//! - A malformed key argument is recovered locally: the operation logs a
//!   diagnostic and becomes a no-op. Callers never see it as an `Err`.
//! - A value that cannot be encoded to a storable string is a hard error and
//!   propagates. Batch writes are not atomic: pairs resolved before the
//!   failing one are already durably written, pairs after it are never
//!   attempted.
//! - A facade constructed without a backing store emits a single diagnostic
//!   and degrades to an inert instance.
//!
//! There is no transient-failure class and therefore no retry logic anywhere.

use crate::value::ValueKind;
use thiserror::Error;

/// Errors that can occur in store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The key argument is not a string, a list of strings, or a map.
    ///
    /// This is recovered inside the facade: the offending call is logged and
    /// dropped in its entirety, before any write happens.
    #[error("key must be a string, a list of strings, or a map (got {found})")]
    InvalidKeyType {
        /// The classified kind of the rejected key argument
        found: ValueKind,
    },

    /// The value cannot be converted to a storable string.
    ///
    /// Raised for opaque host values and for nesting beyond
    /// [`MAX_VALUE_DEPTH`](crate::value::MAX_VALUE_DEPTH). Never substituted
    /// with a placeholder.
    #[error("cannot encode value for storage: {0}")]
    Serialization(#[from] serde_json::Error),

    /// No backing store was available at construction time.
    ///
    /// Logged once when an inert facade is built; subsequent operations
    /// silently no-op rather than repeating the diagnostic.
    #[error("no backing store is available, storage is disabled")]
    BackendUnavailable,
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
