//! # Outbound Ports
//!
//! Traits for the external capabilities a contract consumes: the caller
//! identity subsystem and the inter-contract transport. Both are injected
//! explicitly; there is no ambient request context.

use crate::errors::WorkflowError;
use async_trait::async_trait;
use lr_types::{ChannelId, ContractId, PrincipalId, ReplyEnvelope};

/// Caller identity capability.
///
/// The platform authenticates the submitting client; contracts only read
/// the resulting credential and derive a stable principal from it.
pub trait IdentityService: Send + Sync {
    /// Raw subject credential of the current execution.
    fn credential(&self) -> String;

    /// Stable principal derived from the credential's CN attribute.
    fn invoker(&self) -> PrincipalId {
        PrincipalId::from_credential(&self.credential())
    }
}

/// Inter-contract transport capability.
///
/// Performs one synchronous call to a contract deployed on a trust-domain
/// channel and returns its reply envelope. Transport-level routing
/// failures surface as [`WorkflowError::RemoteInvocation`]; the envelope
/// status carries the target's own verdict.
#[async_trait]
pub trait ContractTransport: Send + Sync {
    /// Invoke `operation` on `contract` within `channel`.
    async fn invoke(
        &self,
        contract: &ContractId,
        operation: &str,
        args: &[String],
        channel: &ChannelId,
    ) -> Result<ReplyEnvelope, WorkflowError>;
}

/// Fixed-credential identity adapter for tests.
pub struct StaticIdentity {
    credential: String,
}

impl StaticIdentity {
    /// Identity whose CN is the given name.
    pub fn new(common_name: &str) -> Self {
        Self {
            credential: format!("x509::/C=ID/O=registry/CN={common_name}::/C=ID/O=registry-ca"),
        }
    }
}

impl IdentityService for StaticIdentity {
    fn credential(&self) -> String {
        self.credential.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_identity_extracts_cn() {
        let identity = StaticIdentity::new("notary-01");
        assert_eq!(identity.invoker(), PrincipalId::new("notary-01"));
    }
}
