//! # Keyed Entities
//!
//! The [`Entity`] trait and [`CompositeKey`] value type.
//!
//! Every record stored in the world state carries a fixed namespace tag and
//! an ordered list of key parts. The composite key is deterministic:
//! namespace and parts joined by a reserved separator. The serialized form
//! embeds the namespace so heterogeneous records can coexist in one store
//! and be decoded without external type information.

use crate::errors::EntityError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reserved separator joining namespace and key parts.
///
/// Key parts must never contain this character.
pub const KEY_SEPARATOR: char = ':';

/// Deterministic composite key: `namespace:part1:part2:...`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CompositeKey(String);

impl CompositeKey {
    /// Build a key from a namespace and ordered key parts.
    ///
    /// Fails if the part list is empty, or if any part is empty or
    /// contains [`KEY_SEPARATOR`].
    pub fn new(namespace: &str, parts: &[String]) -> Result<Self, EntityError> {
        if parts.is_empty() {
            return Err(EntityError::EmptyKey {
                namespace: namespace.to_string(),
            });
        }
        for part in parts {
            if part.is_empty() || part.contains(KEY_SEPARATOR) {
                return Err(EntityError::InvalidKeyPart {
                    part: part.clone(),
                    separator: KEY_SEPARATOR,
                });
            }
        }
        let mut key = String::from(namespace);
        for part in parts {
            key.push(KEY_SEPARATOR);
            key.push_str(part);
        }
        Ok(Self(key))
    }

    /// The full key string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Namespace prefix of the key.
    pub fn namespace(&self) -> &str {
        self.0.split(KEY_SEPARATOR).next().unwrap_or("")
    }
}

impl fmt::Display for CompositeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A keyed, namespaced, JSON-serializable world-state record.
///
/// Implementors carry their namespace tag as a payload field (set at
/// construction to [`Entity::NAMESPACE`]); [`Entity::from_bytes`] checks it
/// before handing back a typed record.
pub trait Entity: Serialize + DeserializeOwned + Sized {
    /// Fixed namespace constant for this record type.
    const NAMESPACE: &'static str;

    /// Ordered identifying fields, immutable once the record is created.
    fn key_parts(&self) -> Vec<String>;

    /// Deterministic composite key for this record.
    fn key(&self) -> Result<CompositeKey, EntityError> {
        CompositeKey::new(Self::NAMESPACE, &self.key_parts())
    }

    /// Serialize to the stored byte form (JSON with embedded namespace).
    fn to_bytes(&self) -> Result<Vec<u8>, EntityError> {
        serde_json::to_vec(self).map_err(|e| EntityError::MalformedRecord {
            namespace: Self::NAMESPACE,
            reason: e.to_string(),
        })
    }

    /// Deserialize from the stored byte form.
    ///
    /// Fails with [`EntityError::MalformedRecord`] if the payload is not
    /// valid JSON, carries a different namespace tag, or does not match
    /// this type's schema.
    fn from_bytes(bytes: &[u8]) -> Result<Self, EntityError> {
        let value: serde_json::Value =
            serde_json::from_slice(bytes).map_err(|e| EntityError::MalformedRecord {
                namespace: Self::NAMESPACE,
                reason: e.to_string(),
            })?;
        match value.get("namespace").and_then(serde_json::Value::as_str) {
            Some(ns) if ns == Self::NAMESPACE => {}
            Some(other) => {
                return Err(EntityError::MalformedRecord {
                    namespace: Self::NAMESPACE,
                    reason: format!("payload tagged with namespace {other}"),
                })
            }
            None => {
                return Err(EntityError::MalformedRecord {
                    namespace: Self::NAMESPACE,
                    reason: "payload has no namespace tag".to_string(),
                })
            }
        }
        serde_json::from_value(value).map_err(|e| EntityError::MalformedRecord {
            namespace: Self::NAMESPACE,
            reason: e.to_string(),
        })
    }
}
