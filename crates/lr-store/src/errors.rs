//! # Store Errors
//!
//! Error type for keyed-entity storage operations.

use lr_types::{CompositeKey, EntityError};
use thiserror::Error;

/// Errors raised by the entity store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A create found an existing record at the same composite key.
    #[error("a record already exists at key {key}")]
    DuplicateKey {
        /// The occupied key.
        key: CompositeKey,
    },

    /// A read or update found no record at the composite key.
    #[error("no record exists at key {key}")]
    NotFound {
        /// The missing key.
        key: CompositeKey,
    },

    /// Key construction or entity (de)serialization failed.
    #[error(transparent)]
    Entity(#[from] EntityError),

    /// The external ledger reported a platform fault.
    #[error("ledger backend failure: {message}")]
    Backend {
        /// Backend-supplied description.
        message: String,
    },
}
