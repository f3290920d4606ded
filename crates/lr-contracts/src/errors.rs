//! # Workflow Errors
//!
//! Error type for contract operations, including state-machine violations
//! and cross-resource invocation failures.

use lr_store::StoreError;
use lr_types::{ContractId, EntityError};
use thiserror::Error;

/// Errors raised by registry contract operations.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// Storage invariant violation or backend fault.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Key construction or entity serialization failure.
    #[error(transparent)]
    Entity(#[from] EntityError),

    /// A state-machine rule forbids the requested transition.
    #[error("invalid transition: {reason}")]
    InvalidTransition {
        /// Which rule was violated.
        reason: String,
    },

    /// A derived lookup resolved to an ambiguous or already-terminal state.
    #[error("inconsistent state: {reason}")]
    InconsistentState {
        /// What the lookup found.
        reason: String,
    },

    /// A cross-resource call returned failure or could not be routed.
    #[error("remote invocation of {contract} failed: {message}")]
    RemoteInvocation {
        /// The target contract.
        contract: ContractId,
        /// The target's (or transport's) message.
        message: String,
    },

    /// A cross-resource reply could not be decoded.
    #[error("malformed response from {contract}: {reason}")]
    MalformedResponse {
        /// The target contract.
        contract: ContractId,
        /// Why envelope stripping or entity decoding failed.
        reason: String,
    },

    /// A dispatched operation received arguments it cannot use.
    #[error("invalid arguments for operation {operation}: {reason}")]
    InvalidArguments {
        /// The dispatched operation name.
        operation: String,
        /// What was wrong with the arguments.
        reason: String,
    },

    /// A dispatched operation name is not exposed by the contract.
    #[error("unknown operation {operation} on contract {contract}")]
    UnknownOperation {
        /// The target contract.
        contract: ContractId,
        /// The unrecognized operation name.
        operation: String,
    },
}
