//! # In-Process Network
//!
//! [`ContractTransport`] adapter routing invocations between contracts
//! registered in the same process. Each call is dispatched synchronously
//! to the target handler; the result is framed exactly the way the
//! platform transport frames it, so callers exercise the full structural
//! decode path.

use crate::errors::WorkflowError;
use crate::ports::{ContractHandler, ContractTransport};
use async_trait::async_trait;
use lr_types::{ChannelId, ContractId, PayloadFrame, ReplyEnvelope};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// Routing table of contracts deployed per channel.
#[derive(Default)]
pub struct InProcessNetwork {
    routes: RwLock<HashMap<(ChannelId, ContractId), Arc<dyn ContractHandler>>>,
}

impl InProcessNetwork {
    /// Create an empty network.
    pub fn new() -> Self {
        Self::default()
    }

    /// Deploy a contract handler on a channel.
    ///
    /// A later registration under the same identifiers replaces the
    /// earlier one.
    pub fn register(&self, channel: ChannelId, handler: Arc<dyn ContractHandler>) {
        let contract = handler.contract_id().clone();
        self.routes.write().insert((channel, contract), handler);
    }
}

#[async_trait]
impl ContractTransport for InProcessNetwork {
    async fn invoke(
        &self,
        contract: &ContractId,
        operation: &str,
        args: &[String],
        channel: &ChannelId,
    ) -> Result<ReplyEnvelope, WorkflowError> {
        let handler = {
            let routes = self.routes.read();
            routes
                .get(&(channel.clone(), contract.clone()))
                .cloned()
        };
        let Some(handler) = handler else {
            return Err(WorkflowError::RemoteInvocation {
                contract: contract.clone(),
                message: format!("no contract {contract} deployed on channel {channel}"),
            });
        };

        let correlation_id = Uuid::new_v4();
        debug!(%correlation_id, contract = %contract, operation, "routing invocation");
        match handler.dispatch(operation, args).await {
            Ok(bytes) => {
                let framed = PayloadFrame::wrap(bytes).encode().map_err(|e| {
                    WorkflowError::RemoteInvocation {
                        contract: contract.clone(),
                        message: format!("cannot frame reply payload: {e}"),
                    }
                })?;
                Ok(ReplyEnvelope::ok(framed))
            }
            Err(err) => {
                debug!(%correlation_id, contract = %contract, %err, "invocation failed");
                Ok(ReplyEnvelope::error(err.to_string()))
            }
        }
    }
}
