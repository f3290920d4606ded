//! # Remote Contract Invoker
//!
//! Synchronous call-and-decode protocol for reading or mutating another
//! resource's ledger within the same trust domain.
//!
//! A successful reply's payload is the callee's serialized entity wrapped
//! in the transport's framing. Decoding is structural: parse the frame
//! with serde, take its data field, then apply the typed entity
//! deserializer. Each step failing maps to
//! [`WorkflowError::MalformedResponse`].

use crate::errors::WorkflowError;
use crate::ports::ContractTransport;
use lr_types::{ChannelId, ContractId, Entity, PayloadFrame, ReplyEnvelope};
use std::sync::Arc;
use tracing::debug;

/// Handle for invoking peer contracts on one channel.
#[derive(Clone)]
pub struct RemoteContract {
    transport: Arc<dyn ContractTransport>,
    channel: ChannelId,
}

impl RemoteContract {
    /// Create an invoker bound to a trust-domain channel.
    pub fn new(transport: Arc<dyn ContractTransport>, channel: ChannelId) -> Self {
        Self { transport, channel }
    }

    /// Invoke an operation and decode the reply into an entity.
    pub async fn call<T: Entity>(
        &self,
        contract: &ContractId,
        operation: &str,
        args: &[String],
    ) -> Result<T, WorkflowError> {
        let payload = self.invoke_checked(contract, operation, args).await?;
        let frame = PayloadFrame::decode(&payload).map_err(|e| {
            WorkflowError::MalformedResponse {
                contract: contract.clone(),
                reason: format!("cannot strip transport framing: {e}"),
            }
        })?;
        if !frame.is_bytes() {
            return Err(WorkflowError::MalformedResponse {
                contract: contract.clone(),
                reason: format!("unexpected frame kind {:?}", frame.kind),
            });
        }
        T::from_bytes(&frame.data).map_err(|e| WorkflowError::MalformedResponse {
            contract: contract.clone(),
            reason: e.to_string(),
        })
    }

    /// Invoke an operation whose reply payload the caller does not decode.
    ///
    /// Used for companion writes: only the reply status is checked.
    pub async fn notify(
        &self,
        contract: &ContractId,
        operation: &str,
        args: &[String],
    ) -> Result<(), WorkflowError> {
        self.invoke_checked(contract, operation, args).await?;
        Ok(())
    }

    async fn invoke_checked(
        &self,
        contract: &ContractId,
        operation: &str,
        args: &[String],
    ) -> Result<Vec<u8>, WorkflowError> {
        debug!(contract = %contract, operation, channel = %self.channel, "cross-resource call");
        let reply = self
            .transport
            .invoke(contract, operation, args, &self.channel)
            .await?;
        self.unwrap_reply(contract, reply)
    }

    fn unwrap_reply(
        &self,
        contract: &ContractId,
        reply: ReplyEnvelope,
    ) -> Result<Vec<u8>, WorkflowError> {
        if !reply.status.is_success() {
            return Err(WorkflowError::RemoteInvocation {
                contract: contract.clone(),
                message: reply
                    .message
                    .unwrap_or_else(|| "target returned no message".to_string()),
            });
        }
        Ok(reply.payload)
    }
}
