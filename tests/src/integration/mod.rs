//! # Integration Flows
//!
//! Cross-contract choreography over the in-process network.

pub mod dispatch;
pub mod workflows;

use lr_contracts::{
    DeedContract, InProcessNetwork, LandTitleContract, MortgageContract, StaticIdentity,
    WorkflowConfig,
};
use lr_store::MemoryLedger;
use lr_types::ChannelId;
use std::sync::Arc;

/// All three contracts wired over one channel, each on its own sub-ledger.
pub struct Registry {
    /// The deed contract.
    pub deeds: Arc<DeedContract>,
    /// The land-title contract (workflow orchestrator).
    pub titles: Arc<LandTitleContract>,
    /// The mortgage contract.
    pub mortgages: Arc<MortgageContract>,
    /// The transport routing between them.
    pub network: Arc<InProcessNetwork>,
    /// The shared trust-domain channel.
    pub channel: ChannelId,
}

/// Deploy the full registry with the given invoking identity.
pub fn deploy(common_name: &str) -> Registry {
    let identity = Arc::new(StaticIdentity::new(common_name));
    let network = Arc::new(InProcessNetwork::new());
    let config = WorkflowConfig::default();
    let channel = config.channel.clone();

    let deeds = Arc::new(DeedContract::new(
        Arc::new(MemoryLedger::new()),
        identity.clone(),
    ));
    let mortgages = Arc::new(MortgageContract::new(
        Arc::new(MemoryLedger::new()),
        identity.clone(),
    ));
    let titles = Arc::new(LandTitleContract::new(
        Arc::new(MemoryLedger::new()),
        identity,
        network.clone(),
        config,
    ));

    network.register(channel.clone(), deeds.clone());
    network.register(channel.clone(), mortgages.clone());
    network.register(channel.clone(), titles.clone());

    Registry {
        deeds,
        titles,
        mortgages,
        network,
        channel,
    }
}
