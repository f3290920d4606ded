//! # In-Memory Ledger
//!
//! [`Ledger`] adapter over process-local maps, with per-key version
//! history. Used by unit and integration tests; write ordering within one
//! instance matches call order.

use crate::errors::StoreError;
use crate::ports::{HistoryEntry, HistoryStream, KeyValue, Ledger};
use crate::query::Selector;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};
use uuid::Uuid;

/// Process-local world state with version history.
#[derive(Default)]
pub struct MemoryLedger {
    state: RwLock<BTreeMap<String, Vec<u8>>>,
    history: RwLock<HashMap<String, Vec<HistoryEntry>>>,
}

impl MemoryLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently set.
    pub fn len(&self) -> usize {
        self.state.read().len()
    }

    /// True when no key is set.
    pub fn is_empty(&self) -> bool {
        self.state.read().is_empty()
    }
}

#[async_trait]
impl Ledger for MemoryLedger {
    async fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.state.read().get(key).cloned())
    }

    async fn put_state(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        self.state.write().insert(key.to_string(), value.clone());
        self.history
            .write()
            .entry(key.to_string())
            .or_default()
            .push(HistoryEntry {
                tx_id: Uuid::new_v4().to_string(),
                value,
                is_delete: false,
            });
        Ok(())
    }

    async fn rich_query(&self, selector: &Selector) -> Result<Vec<KeyValue>, StoreError> {
        let state = self.state.read();
        let mut rows = Vec::new();
        for (key, value) in state.iter() {
            // Non-JSON payloads cannot match a field selector.
            let Ok(parsed) = serde_json::from_slice::<serde_json::Value>(value) else {
                continue;
            };
            if selector.matches(&parsed) {
                rows.push(KeyValue {
                    key: key.clone(),
                    value: value.clone(),
                });
            }
        }
        Ok(rows)
    }

    async fn history(&self, key: &str) -> Result<HistoryStream, StoreError> {
        let entries = self
            .history
            .read()
            .get(key)
            .cloned()
            .unwrap_or_default();
        Ok(Box::pin(tokio_stream::iter(entries)))
    }
}
