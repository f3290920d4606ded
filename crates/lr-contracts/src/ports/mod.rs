//! # Ports
//!
//! Inbound and outbound capability seams of the contract layer.

pub mod inbound;
pub mod outbound;

pub use inbound::{expect_args, ContractHandler};
pub use outbound::{ContractTransport, IdentityService, StaticIdentity};
