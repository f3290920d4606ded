//! # Mortgage Contract
//!
//! Registers liens against titles and voids them on release. A revoke is
//! addressed by title reference, not by the mortgage's own key: the
//! selector query must resolve exactly one record, and a record that is
//! already VOID cannot be revoked again.

use crate::contracts::encode_json;
use crate::domain::{Mortgage, MortgageState};
use crate::errors::WorkflowError;
use crate::ports::{expect_args, ContractHandler, IdentityService};
use async_trait::async_trait;
use lr_store::{
    EntityCollection, Ledger, QueryFacade, QueryRecord, RecordHistoryStream, Selector,
};
use lr_types::{ContractId, Entity};
use std::sync::Arc;
use tokio_stream::StreamExt;
use tracing::info;

/// Dispatchable operation names.
pub mod ops {
    /// Register a lien in ACTIVE state.
    pub const REGISTER: &str = "register";
    /// Void the single ACTIVE lien registered against a title.
    pub const REVOKE_BY_TITLE_REFERENCE: &str = "revoke-by-title-reference";
    /// Read one mortgage by number.
    pub const LOOKUP: &str = "lookup";
    /// All mortgages registered against a title/parcel pair.
    pub const LOOKUP_BY_TITLE_REFERENCE: &str = "lookup-by-title-reference";
    /// All mortgages registered against a title number.
    pub const LOOKUP_BY_TITLE_NUMBER: &str = "lookup-by-title-number";
    /// Version history of one mortgage.
    pub const AUDIT_HISTORY: &str = "audit-history";
    /// All mortgage records.
    pub const QUERY_ALL: &str = "query-all";
}

/// Service for the mortgage resource.
pub struct MortgageContract {
    id: ContractId,
    mortgages: EntityCollection<Mortgage>,
    queries: QueryFacade<Mortgage>,
    identity: Arc<dyn IdentityService>,
}

impl MortgageContract {
    /// Create the contract over its ledger and identity capabilities.
    pub fn new(ledger: Arc<dyn Ledger>, identity: Arc<dyn IdentityService>) -> Self {
        Self {
            id: ContractId::new(crate::config::MORTGAGE_CONTRACT_ID),
            mortgages: EntityCollection::new(Arc::clone(&ledger)),
            queries: QueryFacade::new(ledger),
            identity,
        }
    }

    /// Register a lien in ACTIVE state, stamping the invoking principal.
    pub async fn register(
        &self,
        mortgage_number: &str,
        title_number: &str,
        parcel_id: &str,
        lien_holder: &str,
        reference_deed_number: &str,
    ) -> Result<Mortgage, WorkflowError> {
        let mut mortgage = Mortgage::register(
            mortgage_number,
            title_number,
            parcel_id,
            lien_holder,
            reference_deed_number,
        );
        mortgage.set_creator(self.identity.invoker());
        self.mortgages.add(&mortgage).await?;
        info!(
            mortgage = %mortgage.mortgage_number,
            title = %mortgage.title_number,
            lien_holder = %mortgage.lien_holder,
            "mortgage registered"
        );
        Ok(mortgage)
    }

    /// Void the lien registered against a title/parcel pair.
    ///
    /// The reference must resolve to exactly one record, and that record
    /// must still be ACTIVE; anything else is
    /// [`WorkflowError::InconsistentState`].
    pub async fn revoke_by_title_reference(
        &self,
        title_number: &str,
        parcel_id: &str,
    ) -> Result<Mortgage, WorkflowError> {
        let matches = self
            .lookup_by_title_reference(title_number, parcel_id)
            .await?;
        let resolved = match matches.as_slice() {
            [] => {
                return Err(WorkflowError::InconsistentState {
                    reason: format!(
                        "no mortgage registered against title {title_number} parcel {parcel_id}"
                    ),
                })
            }
            [only] => only,
            _ => {
                return Err(WorkflowError::InconsistentState {
                    reason: format!(
                        "multiple mortgages registered against title {title_number} parcel {parcel_id}"
                    ),
                })
            }
        };
        if resolved.is_void() {
            return Err(WorkflowError::InconsistentState {
                reason: format!("mortgage {} is already VOID", resolved.mortgage_number),
            });
        }

        // Re-read by the record's own key before mutating.
        let key = Mortgage::key_for(&resolved.mortgage_number)?;
        let mut mortgage = self.mortgages.get(&key).await?;
        mortgage.transition_to(MortgageState::Void)?;
        mortgage.set_creator(self.identity.invoker());
        self.mortgages.update(&mortgage).await?;
        info!(mortgage = %mortgage.mortgage_number, "mortgage voided");
        Ok(mortgage)
    }

    /// Read one mortgage by number.
    pub async fn lookup(&self, mortgage_number: &str) -> Result<Mortgage, WorkflowError> {
        let key = Mortgage::key_for(mortgage_number)?;
        Ok(self.mortgages.get(&key).await?)
    }

    /// All mortgages registered against a title/parcel pair.
    ///
    /// The external query mechanism supports exact-match selectors only,
    /// so uniqueness is not enforced here; callers get every match.
    pub async fn lookup_by_title_reference(
        &self,
        title_number: &str,
        parcel_id: &str,
    ) -> Result<Vec<Mortgage>, WorkflowError> {
        let selector = Selector::new()
            .field("title_number", title_number)
            .field("parcel_id", parcel_id);
        let records = self.queries.query_by_selector(selector).await?;
        Ok(records.into_iter().map(|r| r.record).collect())
    }

    /// All mortgages registered against a title number.
    pub async fn lookup_by_title_number(
        &self,
        title_number: &str,
    ) -> Result<Vec<Mortgage>, WorkflowError> {
        let selector = Selector::new().field("title_number", title_number);
        let records = self.queries.query_by_selector(selector).await?;
        Ok(records.into_iter().map(|r| r.record).collect())
    }

    /// Version history of one mortgage.
    pub async fn audit_history(
        &self,
        mortgage_number: &str,
    ) -> Result<RecordHistoryStream<Mortgage>, WorkflowError> {
        let key = Mortgage::key_for(mortgage_number)?;
        Ok(self.queries.history(&key).await?)
    }

    /// All mortgage records.
    pub async fn query_all(&self) -> Result<Vec<QueryRecord<Mortgage>>, WorkflowError> {
        Ok(self.queries.query_all().await?)
    }
}

#[async_trait]
impl ContractHandler for MortgageContract {
    fn contract_id(&self) -> &ContractId {
        &self.id
    }

    async fn dispatch(&self, operation: &str, args: &[String]) -> Result<Vec<u8>, WorkflowError> {
        match operation {
            ops::REGISTER => {
                expect_args(operation, args, 5)?;
                let mortgage = self
                    .register(&args[0], &args[1], &args[2], &args[3], &args[4])
                    .await?;
                Ok(mortgage.to_bytes()?)
            }
            ops::REVOKE_BY_TITLE_REFERENCE => {
                expect_args(operation, args, 2)?;
                let mortgage = self.revoke_by_title_reference(&args[0], &args[1]).await?;
                Ok(mortgage.to_bytes()?)
            }
            ops::LOOKUP => {
                expect_args(operation, args, 1)?;
                Ok(self.lookup(&args[0]).await?.to_bytes()?)
            }
            ops::LOOKUP_BY_TITLE_REFERENCE => {
                expect_args(operation, args, 2)?;
                let matches = self.lookup_by_title_reference(&args[0], &args[1]).await?;
                encode_json(Mortgage::NAMESPACE, &matches)
            }
            ops::LOOKUP_BY_TITLE_NUMBER => {
                expect_args(operation, args, 1)?;
                let matches = self.lookup_by_title_number(&args[0]).await?;
                encode_json(Mortgage::NAMESPACE, &matches)
            }
            ops::AUDIT_HISTORY => {
                expect_args(operation, args, 1)?;
                let mut history = self.audit_history(&args[0]).await?;
                let mut entries = Vec::new();
                while let Some(entry) = history.next().await {
                    entries.push(entry?);
                }
                encode_json(Mortgage::NAMESPACE, &entries)
            }
            ops::QUERY_ALL => {
                expect_args(operation, args, 0)?;
                encode_json(Mortgage::NAMESPACE, &self.query_all().await?)
            }
            _ => Err(WorkflowError::UnknownOperation {
                contract: self.id.clone(),
                operation: operation.to_string(),
            }),
        }
    }
}
