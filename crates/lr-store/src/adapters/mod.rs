//! # Store Adapters
//!
//! Concrete [`crate::ports::Ledger`] implementations bundled with the
//! workspace. Production deployments bind the platform's world-state
//! store; the in-memory adapter backs the test suites.

mod memory;

pub use memory::MemoryLedger;
