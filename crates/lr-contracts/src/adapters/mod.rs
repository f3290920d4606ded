//! # Contract Adapters
//!
//! Concrete [`crate::ports::ContractTransport`] implementations. The
//! platform's real inter-contract transport is external; the in-process
//! network backs the test suites.

mod network;

pub use network::InProcessNetwork;
