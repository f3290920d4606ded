//! # Workflow Configuration
//!
//! Identifiers of the peer contracts a workflow reaches out to, and the
//! trust-domain channel they share. Injected explicitly into the
//! orchestrating contract.

use lr_types::{ChannelId, ContractId};

/// Default identifier of the deed contract.
pub const DEED_CONTRACT_ID: &str = "deed-contract";
/// Default identifier of the land-title contract.
pub const TITLE_CONTRACT_ID: &str = "title-contract";
/// Default identifier of the mortgage contract.
pub const MORTGAGE_CONTRACT_ID: &str = "mortgage-contract";
/// Default trust-domain channel shared by the registry contracts.
pub const REGISTRY_CHANNEL: &str = "registry-channel";

/// Peer-contract wiring for the cross-resource workflows.
#[derive(Clone, Debug)]
pub struct WorkflowConfig {
    /// Contract holding deed records.
    pub deed_contract: ContractId,
    /// Contract holding mortgage records.
    pub mortgage_contract: ContractId,
    /// Channel all registry contracts are deployed on.
    pub channel: ChannelId,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            deed_contract: ContractId::new(DEED_CONTRACT_ID),
            mortgage_contract: ContractId::new(MORTGAGE_CONTRACT_ID),
            channel: ChannelId::new(REGISTRY_CHANNEL),
        }
    }
}
