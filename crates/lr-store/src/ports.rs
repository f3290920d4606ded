//! # Ledger Port
//!
//! Outbound capability surface of the external world-state store.
//!
//! The replicated store, its query engine, and its conflict detection are
//! platform concerns; contracts consume them only through this trait.

use crate::errors::StoreError;
use crate::query::Selector;
use async_trait::async_trait;
use tokio_stream::Stream;

/// One key-value row returned by a rich query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyValue {
    /// Full composite key string.
    pub key: String,
    /// Stored byte payload.
    pub value: Vec<u8>,
}

/// One historical version of the value at a key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryEntry {
    /// Identifier of the transaction that wrote this version.
    pub tx_id: String,
    /// Value bytes at that point; empty for a tombstone.
    pub value: Vec<u8>,
    /// True when this version is a deletion tombstone.
    pub is_delete: bool,
}

/// Lazy, finite, forward-only sequence of historical versions.
pub type HistoryStream = std::pin::Pin<Box<dyn Stream<Item = HistoryEntry> + Send>>;

/// World-state ledger capability.
#[async_trait]
pub trait Ledger: Send + Sync {
    /// Read the current value at a key, or `None` if the key is unset.
    async fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Write the value at a key, creating or overwriting it.
    async fn put_state(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError>;

    /// Run an exact-match selector query over stored payloads.
    ///
    /// Results are fully materialized before the call returns.
    async fn rich_query(&self, selector: &Selector) -> Result<Vec<KeyValue>, StoreError>;

    /// Stream the ordered version history of a key.
    async fn history(&self, key: &str) -> Result<HistoryStream, StoreError>;
}
