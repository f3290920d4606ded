//! # Inbound Ports
//!
//! Operation-name dispatch over ordered string arguments. This is the
//! surface the transport drives: every exposed workflow operation is
//! addressable as `(contract, operation, args)` and returns the affected
//! record's serialized bytes.

use crate::errors::WorkflowError;
use async_trait::async_trait;
use lr_types::ContractId;

/// A deployed contract reachable through the transport.
#[async_trait]
pub trait ContractHandler: Send + Sync {
    /// Identifier this contract is registered under.
    fn contract_id(&self) -> &ContractId;

    /// Execute a named operation with ordered string arguments.
    ///
    /// Returns the serialized result record (or record list). Argument
    /// arity and content are validated explicitly; mismatches fail with
    /// [`WorkflowError::InvalidArguments`], unknown names with
    /// [`WorkflowError::UnknownOperation`].
    async fn dispatch(&self, operation: &str, args: &[String]) -> Result<Vec<u8>, WorkflowError>;
}

/// Validate the argument count of a dispatched operation.
pub fn expect_args(operation: &str, args: &[String], expected: usize) -> Result<(), WorkflowError> {
    if args.len() != expected {
        return Err(WorkflowError::InvalidArguments {
            operation: operation.to_string(),
            reason: format!("expected {expected} arguments, got {}", args.len()),
        });
    }
    Ok(())
}
