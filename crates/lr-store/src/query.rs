//! # Query Facade
//!
//! Selector-based rich queries and key-history retrieval shared by every
//! resource type.
//!
//! The external query engine supports exact-match selectors only. Every
//! selector issued through the facade is scoped to the entity's namespace
//! tag, so one shared world state can hold heterogeneous records without
//! queries bleeding across resource types.

use crate::errors::StoreError;
use crate::ports::Ledger;
use lr_types::{CompositeKey, Entity};
use serde::Serialize;
use std::collections::BTreeMap;
use std::marker::PhantomData;
use std::pin::Pin;
use std::sync::Arc;
use tokio_stream::{Stream, StreamExt};

/// Exact-match field selector over stored JSON payloads.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Selector(BTreeMap<String, serde_json::Value>);

impl Selector {
    /// Empty selector matching every record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an exact-match condition on a field.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    /// True when every condition matches the record's fields.
    pub fn matches(&self, record: &serde_json::Value) -> bool {
        self.0
            .iter()
            .all(|(name, expected)| record.get(name) == Some(expected))
    }

    /// Number of conditions in the selector.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the selector has no conditions.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One materialized rich-query result.
#[derive(Clone, Debug, Serialize)]
pub struct QueryRecord<T> {
    /// Full composite key string of the record.
    pub key: String,
    /// The decoded record.
    pub record: T,
}

/// One historical version of a record.
#[derive(Clone, Debug, Serialize)]
pub struct HistoryRecord<T> {
    /// Identifier of the transaction that wrote this version.
    pub tx_id: String,
    /// Record value at that point; `None` marks a tombstone.
    pub record: Option<T>,
}

/// Lazy sequence of decoded historical versions.
pub type RecordHistoryStream<T> =
    Pin<Box<dyn Stream<Item = Result<HistoryRecord<T>, StoreError>> + Send>>;

/// Rich-query and history wrapper for one entity type.
pub struct QueryFacade<T: Entity> {
    ledger: Arc<dyn Ledger>,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Entity> Clone for QueryFacade<T> {
    fn clone(&self) -> Self {
        Self {
            ledger: Arc::clone(&self.ledger),
            _entity: PhantomData,
        }
    }
}

impl<T: Entity + Send + 'static> QueryFacade<T> {
    /// Create a facade over the given ledger capability.
    pub fn new(ledger: Arc<dyn Ledger>) -> Self {
        Self {
            ledger,
            _entity: PhantomData,
        }
    }

    /// All records of this entity type.
    pub async fn query_all(&self) -> Result<Vec<QueryRecord<T>>, StoreError> {
        self.query_by_selector(Selector::new()).await
    }

    /// Records matching the selector, scoped to this entity's namespace.
    pub async fn query_by_selector(
        &self,
        selector: Selector,
    ) -> Result<Vec<QueryRecord<T>>, StoreError> {
        let scoped = selector.field("namespace", T::NAMESPACE);
        let rows = self.ledger.rich_query(&scoped).await?;
        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            records.push(QueryRecord {
                key: row.key,
                record: T::from_bytes(&row.value)?,
            });
        }
        Ok(records)
    }

    /// Ordered version history of the record at a key.
    ///
    /// Each entry pairs the writing transaction's identifier with the
    /// decoded record value, or `None` for a tombstone.
    pub async fn history(&self, key: &CompositeKey) -> Result<RecordHistoryStream<T>, StoreError> {
        let entries = self.ledger.history(key.as_str()).await?;
        let records = entries.map(|entry| {
            let record = if entry.is_delete {
                None
            } else {
                Some(T::from_bytes(&entry.value)?)
            };
            Ok(HistoryRecord {
                tx_id: entry.tx_id,
                record,
            })
        });
        Ok(Box::pin(records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryLedger;
    use crate::collection::EntityCollection;
    use serde::Deserialize;

    #[derive(Clone, Serialize, Deserialize)]
    struct Parcel {
        namespace: String,
        parcel_id: String,
        zone: String,
    }

    impl Parcel {
        fn new(parcel_id: &str, zone: &str) -> Self {
            Self {
                namespace: Self::NAMESPACE.to_string(),
                parcel_id: parcel_id.to_string(),
                zone: zone.to_string(),
            }
        }
    }

    impl Entity for Parcel {
        const NAMESPACE: &'static str = "registry.parcel";

        fn key_parts(&self) -> Vec<String> {
            vec![self.parcel_id.clone()]
        }
    }

    #[test]
    fn test_selector_matches_all_conditions() {
        let selector = Selector::new().field("zone", "rural").field("status", 1);
        let record = serde_json::json!({"zone": "rural", "status": 1, "extra": true});
        assert!(selector.matches(&record));
    }

    #[test]
    fn test_selector_rejects_partial_match() {
        let selector = Selector::new().field("zone", "rural").field("status", 1);
        let record = serde_json::json!({"zone": "rural", "status": 2});
        assert!(!selector.matches(&record));
    }

    #[test]
    fn test_empty_selector_matches_everything() {
        assert!(Selector::new().matches(&serde_json::json!({"anything": 1})));
    }

    #[tokio::test]
    async fn test_query_all_is_namespace_scoped() {
        let ledger = Arc::new(MemoryLedger::new());
        ledger
            .put_state("other:X", br#"{"namespace":"other","id":"X"}"#.to_vec())
            .await
            .unwrap();

        let parcels = EntityCollection::<Parcel>::new(ledger.clone());
        parcels.add(&Parcel::new("P1", "rural")).await.unwrap();

        let facade = QueryFacade::<Parcel>::new(ledger);
        let all = facade.query_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].record.parcel_id, "P1");
    }

    #[tokio::test]
    async fn test_query_by_selector_filters_fields() {
        let ledger = Arc::new(MemoryLedger::new());
        let parcels = EntityCollection::<Parcel>::new(ledger.clone());
        parcels.add(&Parcel::new("P1", "rural")).await.unwrap();
        parcels.add(&Parcel::new("P2", "urban")).await.unwrap();

        let facade = QueryFacade::<Parcel>::new(ledger);
        let urban = facade
            .query_by_selector(Selector::new().field("zone", "urban"))
            .await
            .unwrap();
        assert_eq!(urban.len(), 1);
        assert_eq!(urban[0].record.parcel_id, "P2");
    }

    #[tokio::test]
    async fn test_history_yields_versions_in_write_order() {
        let ledger = Arc::new(MemoryLedger::new());
        let parcels = EntityCollection::<Parcel>::new(ledger.clone());
        let mut parcel = Parcel::new("P1", "rural");
        parcels.add(&parcel).await.unwrap();
        parcel.zone = "urban".to_string();
        parcels.update(&parcel).await.unwrap();

        let facade = QueryFacade::<Parcel>::new(ledger);
        let mut history = facade.history(&parcel.key().unwrap()).await.unwrap();

        let mut zones = Vec::new();
        while let Some(entry) = history.next().await {
            let entry = entry.unwrap();
            zones.push(entry.record.unwrap().zone);
            assert!(!entry.tx_id.is_empty());
        }
        assert_eq!(zones, vec!["rural", "urban"]);
    }
}
