//! # Shared Errors
//!
//! Error type for entity serialization and key construction.

use thiserror::Error;

/// Errors raised while building keys or (de)serializing entities.
#[derive(Debug, Error)]
pub enum EntityError {
    /// Byte payload is not a valid record for the expected namespace.
    #[error("malformed record for namespace {namespace}: {reason}")]
    MalformedRecord {
        /// Namespace the caller expected.
        namespace: &'static str,
        /// What went wrong during decoding.
        reason: String,
    },

    /// A composite key was requested with no key parts.
    #[error("composite key for namespace {namespace} has no key parts")]
    EmptyKey {
        /// Namespace the key was built for.
        namespace: String,
    },

    /// A key part is empty or contains the reserved separator.
    #[error("invalid key part {part:?}: must be non-empty and free of {separator:?}")]
    InvalidKeyPart {
        /// The offending key part.
        part: String,
        /// The reserved separator character.
        separator: char,
    },
}
