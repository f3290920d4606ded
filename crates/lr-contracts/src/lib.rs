//! # Land-Registry Contracts
//!
//! The three registry resources and the workflow operations that link them.
//!
//! ## Purpose
//!
//! - **Deed**: immutable record of a legal transaction (sale or mortgage
//!   origination) referencing a title.
//! - **Land title**: mutable record of current ownership and encumbrance
//!   status for a parcel; orchestrates the cross-resource workflows.
//! - **Mortgage**: mutable record of an active or voided lien against a
//!   title.
//!
//! Cross-resource reads and writes never touch another resource's storage
//! namespace directly; they go through [`RemoteContract`] over the
//! [`ContractTransport`] port, and the reply payload is decoded
//! structurally (envelope, then frame, then entity).
//!
//! A workflow's own write and its companion cross-resource write are
//! separate units of work against separate sub-ledgers. A failure of the
//! companion call surfaces as an error while the local write stands; no
//! rollback is attempted.
//!
//! ## Module Structure
//!
//! ```text
//! lr-contracts/
//! ├── domain/     # Deed, LandTitle, Mortgage + state machines
//! ├── ports/      # ContractHandler, IdentityService, ContractTransport
//! ├── contracts/  # DeedContract, LandTitleContract, MortgageContract
//! ├── remote      # RemoteContract call-and-decode protocol
//! ├── adapters/   # InProcessNetwork transport
//! └── config      # WorkflowConfig
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod config;
pub mod contracts;
pub mod domain;
pub mod errors;
pub mod ports;
pub mod remote;

// Re-exports
pub use adapters::InProcessNetwork;
pub use config::WorkflowConfig;
pub use contracts::{DeedContract, IssueDeedParams, LandTitleContract, MortgageContract};
pub use domain::{Deed, DeedType, LandTitle, Mortgage, MortgageState, TitleState};
pub use errors::WorkflowError;
pub use ports::{ContractHandler, ContractTransport, IdentityService, StaticIdentity};
pub use remote::RemoteContract;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
