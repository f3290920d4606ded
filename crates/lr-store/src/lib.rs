//! # Land-Registry Entity Store
//!
//! Generic keyed-entity storage over an external world-state ledger.
//!
//! ## Purpose
//!
//! - [`Ledger`]: outbound port for the replicated key-value store
//!   (get/put/rich-query/history). The store engine itself is external;
//!   only the capability surface lives here.
//! - [`EntityCollection`]: typed CRUD façade for one entity type,
//!   enforcing create-must-not-exist / update-must-exist.
//! - [`QueryFacade`]: selector queries and key-history retrieval shared by
//!   every resource.
//! - [`MemoryLedger`]: in-memory adapter with per-key version history,
//!   used by the test suites.
//!
//! Every operation round-trips to the ledger; nothing is cached.
//!
//! ## Module Structure
//!
//! ```text
//! lr-store/
//! ├── ports       # Ledger trait, KeyValue, HistoryEntry
//! ├── collection  # EntityCollection<T>
//! ├── query       # Selector, QueryFacade<T>, history records
//! └── adapters/   # MemoryLedger
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod collection;
pub mod errors;
pub mod ports;
pub mod query;

// Re-exports
pub use adapters::MemoryLedger;
pub use collection::EntityCollection;
pub use errors::StoreError;
pub use ports::{HistoryEntry, HistoryStream, KeyValue, Ledger};
pub use query::{HistoryRecord, QueryFacade, QueryRecord, RecordHistoryStream, Selector};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
