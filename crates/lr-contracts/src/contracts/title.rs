//! # Land-Title Contract
//!
//! Owns the title ledger and orchestrates the cross-resource workflows:
//! ownership transfer (reads the deed contract), encumbrance placement
//! (reads the deed contract, then registers a companion mortgage), and
//! encumbrance release (voids the companion mortgage).
//!
//! Each cross-resource call commits against the peer's own sub-ledger.
//! The title write and its companion write are not one atomic unit: if
//! the companion call fails, the error is surfaced and the title write
//! stands.

use crate::config::WorkflowConfig;
use crate::contracts::encode_json;
use crate::contracts::{deed::ops as deed_ops, mortgage::ops as mortgage_ops};
use crate::domain::{Deed, DeedType, LandTitle, TitleState};
use crate::errors::WorkflowError;
use crate::ports::{expect_args, ContractHandler, ContractTransport, IdentityService};
use crate::remote::RemoteContract;
use async_trait::async_trait;
use lr_store::{EntityCollection, Ledger, QueryFacade, QueryRecord, RecordHistoryStream};
use lr_types::{ContractId, Entity};
use std::sync::Arc;
use tokio_stream::StreamExt;
use tracing::{info, instrument};

/// Dispatchable operation names.
pub mod ops {
    /// Issue a title in NORMAL state.
    pub const ISSUE: &str = "issue";
    /// Transfer ownership per a sale deed.
    pub const TRANSFER_OWNERSHIP: &str = "transfer-ownership";
    /// Encumber the title per a mortgage-origination deed.
    pub const PLACE_ENCUMBRANCE: &str = "place-encumbrance";
    /// Release the encumbrance and void the companion mortgage.
    pub const RELEASE_ENCUMBRANCE: &str = "release-encumbrance";
    /// Read one title by number and parcel.
    pub const LOOKUP: &str = "lookup";
    /// Version history of one title.
    pub const AUDIT_HISTORY: &str = "audit-history";
    /// All title records.
    pub const QUERY_ALL: &str = "query-all";
}

/// Service for the land-title resource.
pub struct LandTitleContract {
    id: ContractId,
    titles: EntityCollection<LandTitle>,
    queries: QueryFacade<LandTitle>,
    identity: Arc<dyn IdentityService>,
    remote: RemoteContract,
    config: WorkflowConfig,
}

impl LandTitleContract {
    /// Create the contract over its ledger, identity, and transport
    /// capabilities.
    pub fn new(
        ledger: Arc<dyn Ledger>,
        identity: Arc<dyn IdentityService>,
        transport: Arc<dyn ContractTransport>,
        config: WorkflowConfig,
    ) -> Self {
        Self {
            id: ContractId::new(crate::config::TITLE_CONTRACT_ID),
            titles: EntityCollection::new(Arc::clone(&ledger)),
            queries: QueryFacade::new(ledger),
            identity,
            remote: RemoteContract::new(transport, config.channel.clone()),
            config,
        }
    }

    /// Issue a title in NORMAL state for the given owner.
    pub async fn issue(
        &self,
        title_number: &str,
        parcel_id: &str,
        owner: &str,
    ) -> Result<LandTitle, WorkflowError> {
        let mut title = LandTitle::issue(title_number, parcel_id, owner);
        title.set_creator(self.identity.invoker());
        self.titles.add(&title).await?;
        info!(title = title_number, parcel = parcel_id, owner, "title issued");
        Ok(title)
    }

    /// Transfer ownership per a sale deed.
    ///
    /// The deed is read from the deed contract; the title addressed by the
    /// deed's title/parcel pair gets the deed's buyer as its new owner.
    /// The state field is left untouched: a transfer does not require
    /// NORMAL.
    #[instrument(skip(self))]
    pub async fn transfer_ownership(&self, deed_number: &str) -> Result<LandTitle, WorkflowError> {
        let deed: Deed = self
            .remote
            .call(
                &self.config.deed_contract,
                deed_ops::LOOKUP,
                &[deed_number.to_string()],
            )
            .await?;
        if deed.deed_type != DeedType::Sale {
            return Err(WorkflowError::InconsistentState {
                reason: format!(
                    "deed {deed_number} is {}; ownership transfer requires a sale deed",
                    deed.deed_type
                ),
            });
        }
        let Some(buyer) = deed.buyer.clone() else {
            return Err(WorkflowError::InconsistentState {
                reason: format!("sale deed {deed_number} names no buyer"),
            });
        };

        let key = LandTitle::key_for(&deed.title_number, &deed.parcel_id)?;
        let mut title = self.titles.get(&key).await?;
        title.set_owner(buyer);
        title.set_reference_deed(deed_number);
        title.set_creator(self.identity.invoker());
        self.titles.update(&title).await?;
        info!(
            title = %title.title_number,
            parcel = %title.parcel_id,
            owner = %title.owner,
            deed = deed_number,
            "ownership transferred"
        );
        Ok(title)
    }

    /// Encumber the title per a mortgage-origination deed, then register
    /// the companion mortgage with the mortgage contract.
    ///
    /// The companion registration is a separate unit of work; its payload
    /// is not decoded and a failure after the title write leaves the
    /// ENCUMBERED state in place.
    #[instrument(skip(self))]
    pub async fn place_encumbrance(&self, deed_number: &str) -> Result<LandTitle, WorkflowError> {
        let deed: Deed = self
            .remote
            .call(
                &self.config.deed_contract,
                deed_ops::LOOKUP,
                &[deed_number.to_string()],
            )
            .await?;
        if deed.deed_type != DeedType::MortgageOrigination {
            return Err(WorkflowError::InconsistentState {
                reason: format!(
                    "deed {deed_number} is {}; encumbrance requires a mortgage-origination deed",
                    deed.deed_type
                ),
            });
        }
        let Some(lien_holder) = deed.lien_holder.clone() else {
            return Err(WorkflowError::InconsistentState {
                reason: format!("mortgage-origination deed {deed_number} names no lien holder"),
            });
        };

        let key = LandTitle::key_for(&deed.title_number, &deed.parcel_id)?;
        let mut title = self.titles.get(&key).await?;
        title.transition_to(TitleState::Encumbered)?;
        title.set_reference_deed(deed_number);
        title.set_creator(self.identity.invoker());
        self.titles.update(&title).await?;

        let mortgage_number = format!("MTG-{}", deed.title_number);
        self.remote
            .notify(
                &self.config.mortgage_contract,
                mortgage_ops::REGISTER,
                &[
                    mortgage_number,
                    deed.title_number.clone(),
                    deed.parcel_id.clone(),
                    lien_holder,
                    deed_number.to_string(),
                ],
            )
            .await?;
        info!(
            title = %title.title_number,
            parcel = %title.parcel_id,
            deed = deed_number,
            "encumbrance placed"
        );
        Ok(title)
    }

    /// Release the encumbrance, then void the companion mortgage.
    ///
    /// Only an ENCUMBERED title can be released.
    #[instrument(skip(self))]
    pub async fn release_encumbrance(
        &self,
        title_number: &str,
        parcel_id: &str,
    ) -> Result<LandTitle, WorkflowError> {
        let key = LandTitle::key_for(title_number, parcel_id)?;
        let mut title = self.titles.get(&key).await?;
        if !title.is_encumbered() {
            return Err(WorkflowError::InvalidTransition {
                reason: format!(
                    "title {title_number}/{parcel_id} is {}; cannot release encumbrance",
                    title.current_state
                ),
            });
        }
        title.transition_to(TitleState::Normal)?;
        title.set_creator(self.identity.invoker());
        self.titles.update(&title).await?;

        self.remote
            .notify(
                &self.config.mortgage_contract,
                mortgage_ops::REVOKE_BY_TITLE_REFERENCE,
                &[title_number.to_string(), parcel_id.to_string()],
            )
            .await?;
        info!(title = title_number, parcel = parcel_id, "encumbrance released");
        Ok(title)
    }

    /// Read one title by number and parcel.
    pub async fn lookup(
        &self,
        title_number: &str,
        parcel_id: &str,
    ) -> Result<LandTitle, WorkflowError> {
        let key = LandTitle::key_for(title_number, parcel_id)?;
        Ok(self.titles.get(&key).await?)
    }

    /// Version history of one title.
    pub async fn audit_history(
        &self,
        title_number: &str,
        parcel_id: &str,
    ) -> Result<RecordHistoryStream<LandTitle>, WorkflowError> {
        let key = LandTitle::key_for(title_number, parcel_id)?;
        Ok(self.queries.history(&key).await?)
    }

    /// All title records.
    pub async fn query_all(&self) -> Result<Vec<QueryRecord<LandTitle>>, WorkflowError> {
        Ok(self.queries.query_all().await?)
    }
}

#[async_trait]
impl ContractHandler for LandTitleContract {
    fn contract_id(&self) -> &ContractId {
        &self.id
    }

    async fn dispatch(&self, operation: &str, args: &[String]) -> Result<Vec<u8>, WorkflowError> {
        match operation {
            ops::ISSUE => {
                expect_args(operation, args, 3)?;
                let title = self.issue(&args[0], &args[1], &args[2]).await?;
                Ok(title.to_bytes()?)
            }
            ops::TRANSFER_OWNERSHIP => {
                expect_args(operation, args, 1)?;
                Ok(self.transfer_ownership(&args[0]).await?.to_bytes()?)
            }
            ops::PLACE_ENCUMBRANCE => {
                expect_args(operation, args, 1)?;
                Ok(self.place_encumbrance(&args[0]).await?.to_bytes()?)
            }
            ops::RELEASE_ENCUMBRANCE => {
                expect_args(operation, args, 2)?;
                Ok(self
                    .release_encumbrance(&args[0], &args[1])
                    .await?
                    .to_bytes()?)
            }
            ops::LOOKUP => {
                expect_args(operation, args, 2)?;
                Ok(self.lookup(&args[0], &args[1]).await?.to_bytes()?)
            }
            ops::AUDIT_HISTORY => {
                expect_args(operation, args, 2)?;
                let mut history = self.audit_history(&args[0], &args[1]).await?;
                let mut entries = Vec::new();
                while let Some(entry) = history.next().await {
                    entries.push(entry?);
                }
                encode_json(LandTitle::NAMESPACE, &entries)
            }
            ops::QUERY_ALL => {
                expect_args(operation, args, 0)?;
                encode_json(LandTitle::NAMESPACE, &self.query_all().await?)
            }
            _ => Err(WorkflowError::UnknownOperation {
                contract: self.id.clone(),
                operation: operation.to_string(),
            }),
        }
    }
}
