//! # Entity Collection
//!
//! Generic CRUD façade over the [`Ledger`] port for one entity type.
//!
//! Enforces the existence invariants: `add` fails on an occupied key,
//! `update` fails on a missing key. No optimistic-concurrency token is
//! checked here; conflicting concurrent writes are detected by the
//! platform, not this façade.

use crate::errors::StoreError;
use crate::ports::Ledger;
use lr_types::{CompositeKey, Entity};
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::debug;

/// Typed collection of one entity type within its storage namespace.
pub struct EntityCollection<T: Entity> {
    ledger: Arc<dyn Ledger>,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Entity> Clone for EntityCollection<T> {
    fn clone(&self) -> Self {
        Self {
            ledger: Arc::clone(&self.ledger),
            _entity: PhantomData,
        }
    }
}

impl<T: Entity> EntityCollection<T> {
    /// Create a collection over the given ledger capability.
    pub fn new(ledger: Arc<dyn Ledger>) -> Self {
        Self {
            ledger,
            _entity: PhantomData,
        }
    }

    /// Store a new record.
    ///
    /// Fails with [`StoreError::DuplicateKey`] if the composite key is
    /// already occupied.
    pub async fn add(&self, entity: &T) -> Result<(), StoreError> {
        let key = entity.key()?;
        if self.ledger.get_state(key.as_str()).await?.is_some() {
            return Err(StoreError::DuplicateKey { key });
        }
        debug!(namespace = T::NAMESPACE, key = %key, "adding record");
        self.ledger.put_state(key.as_str(), entity.to_bytes()?).await
    }

    /// Read the record at a key.
    ///
    /// Fails with [`StoreError::NotFound`] if the key is unset.
    pub async fn get(&self, key: &CompositeKey) -> Result<T, StoreError> {
        match self.ledger.get_state(key.as_str()).await? {
            Some(bytes) => Ok(T::from_bytes(&bytes)?),
            None => Err(StoreError::NotFound { key: key.clone() }),
        }
    }

    /// Overwrite an existing record.
    ///
    /// Fails with [`StoreError::NotFound`] if the composite key has no
    /// stored value.
    pub async fn update(&self, entity: &T) -> Result<(), StoreError> {
        let key = entity.key()?;
        if self.ledger.get_state(key.as_str()).await?.is_none() {
            return Err(StoreError::NotFound { key });
        }
        debug!(namespace = T::NAMESPACE, key = %key, "updating record");
        self.ledger.put_state(key.as_str(), entity.to_bytes()?).await
    }
}
