//! # Deed Contract
//!
//! Issues deed records and serves read-only lookups, audit history, and
//! bulk queries. Deeds are immutable: there is no update path.

use crate::contracts::{encode_json, optional_arg};
use crate::domain::{Deed, DeedType};
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
    /// Issue a deed of either variant.
    pub const ISSUE: &str = "issue";
    /// Issue a mortgage-origination deed.
    pub const ISSUE_MORTGAGE_DEED: &str = "issue-mortgage-deed";
    /// Read one deed by number.
    pub const LOOKUP: &str = "lookup";
    /// Version history of one deed.
    pub const AUDIT_HISTORY: &str = "audit-history";
    /// All deed records.
    pub const QUERY_ALL: &str = "query-all";
}

/// Arguments for issuing a deed.
#[derive(Clone, Debug)]
pub struct IssueDeedParams {
    /// Unique deed number.
    pub deed_number: String,
    /// Sale or mortgage origination.
    pub deed_type: DeedType,
    /// Title the transaction refers to.
    pub title_number: String,
    /// Parcel the title covers.
    pub parcel_id: String,
    /// Selling party; required for sale deeds.
    pub seller: Option<String>,
    /// Buying party; required for sale deeds.
    pub buyer: Option<String>,
    /// Lien holder; required for mortgage-origination deeds.
    pub lien_holder: Option<String>,
}

impl IssueDeedParams {
    /// Validate the variant's required fields and build the record.
    fn into_deed(self) -> Result<Deed, WorkflowError> {
        match self.deed_type {
            DeedType::Sale => {
                if self.lien_holder.is_some() {
                    return Err(WorkflowError::InvalidArguments {
                        operation: ops::ISSUE.to_string(),
                        reason: "a sale deed does not carry a lien holder".to_string(),
                    });
                }
                let (Some(seller), Some(buyer)) = (self.seller, self.buyer) else {
                    return Err(WorkflowError::InvalidArguments {
                        operation: ops::ISSUE.to_string(),
                        reason: "a sale deed requires seller and buyer".to_string(),
                    });
                };
                Ok(Deed::sale(
                    self.deed_number,
                    self.title_number,
                    self.parcel_id,
                    seller,
                    buyer,
                ))
            }
            DeedType::MortgageOrigination => {
                if self.seller.is_some() || self.buyer.is_some() {
                    return Err(WorkflowError::InvalidArguments {
                        operation: ops::ISSUE.to_string(),
                        reason: "a mortgage-origination deed does not carry seller or buyer"
                            .to_string(),
                    });
                }
                let Some(lien_holder) = self.lien_holder else {
                    return Err(WorkflowError::InvalidArguments {
                        operation: ops::ISSUE.to_string(),
                        reason: "a mortgage-origination deed requires a lien holder".to_string(),
                    });
                };
                Ok(Deed::mortgage_origination(
                    self.deed_number,
                    self.title_number,
                    self.parcel_id,
                    lien_holder,
                ))
            }
        }
    }
}

/// Service for the deed resource.
pub struct DeedContract {
    id: ContractId,
    deeds: EntityCollection<Deed>,
    queries: QueryFacade<Deed>,
    identity: Arc<dyn IdentityService>,
}

impl DeedContract {
    /// Create the contract over its ledger and identity capabilities.
    pub fn new(ledger: Arc<dyn Ledger>, identity: Arc<dyn IdentityService>) -> Self {
        Self {
            id: ContractId::new(crate::config::DEED_CONTRACT_ID),
            deeds: EntityCollection::new(Arc::clone(&ledger)),
            queries: QueryFacade::new(ledger),
            identity,
        }
    }

    /// Issue a deed, stamping the invoking principal.
    pub async fn issue(&self, params: IssueDeedParams) -> Result<Deed, WorkflowError> {
        let mut deed = params.into_deed()?;
        deed.set_creator(self.identity.invoker());
        self.deeds.add(&deed).await?;
        info!(deed = %deed.deed_number, deed_type = %deed.deed_type, "deed issued");
        Ok(deed)
    }

    /// Issue a mortgage-origination deed.
    pub async fn issue_mortgage_deed(
        &self,
        deed_number: &str,
        title_number: &str,
        parcel_id: &str,
        lien_holder: &str,
    ) -> Result<Deed, WorkflowError> {
        self.issue(IssueDeedParams {
            deed_number: deed_number.to_string(),
            deed_type: DeedType::MortgageOrigination,
            title_number: title_number.to_string(),
            parcel_id: parcel_id.to_string(),
            seller: None,
            buyer: None,
            lien_holder: Some(lien_holder.to_string()),
        })
        .await
    }

    /// Read one deed by number.
    pub async fn lookup(&self, deed_number: &str) -> Result<Deed, WorkflowError> {
        let key = Deed::key_for(deed_number)?;
        Ok(self.deeds.get(&key).await?)
    }

    /// Version history of one deed.
    pub async fn audit_history(
        &self,
        deed_number: &str,
    ) -> Result<RecordHistoryStream<Deed>, WorkflowError> {
        let key = Deed::key_for(deed_number)?;
        Ok(self.queries.history(&key).await?)
    }

    /// All deed records.
    pub async fn query_all(&self) -> Result<Vec<QueryRecord<Deed>>, WorkflowError> {
        Ok(self.queries.query_all().await?)
    }

    /// Deed records matching a selector.
    pub async fn query_by_selector(
        &self,
        selector: Selector,
    ) -> Result<Vec<QueryRecord<Deed>>, WorkflowError> {
        Ok(self.queries.query_by_selector(selector).await?)
    }
}

#[async_trait]
impl ContractHandler for DeedContract {
    fn contract_id(&self) -> &ContractId {
        &self.id
    }

    async fn dispatch(&self, operation: &str, args: &[String]) -> Result<Vec<u8>, WorkflowError> {
        match operation {
            ops::ISSUE => {
                if args.len() != 6 && args.len() != 7 {
                    return Err(WorkflowError::InvalidArguments {
                        operation: operation.to_string(),
                        reason: format!("expected 6 or 7 arguments, got {}", args.len()),
                    });
                }
                let deed_type = DeedType::parse(&args[1]).ok_or_else(|| {
                    WorkflowError::InvalidArguments {
                        operation: operation.to_string(),
                        reason: format!("unknown deed type {:?}", args[1]),
                    }
                })?;
                let deed = self
                    .issue(IssueDeedParams {
                        deed_number: args[0].clone(),
                        deed_type,
                        title_number: args[2].clone(),
                        parcel_id: args[3].clone(),
                        seller: optional_arg(&args[4]),
                        buyer: optional_arg(&args[5]),
                        lien_holder: args.get(6).and_then(|a| optional_arg(a)),
                    })
                    .await?;
                Ok(deed.to_bytes()?)
            }
            ops::ISSUE_MORTGAGE_DEED => {
                expect_args(operation, args, 4)?;
                let deed = self
                    .issue_mortgage_deed(&args[0], &args[1], &args[2], &args[3])
                    .await?;
                Ok(deed.to_bytes()?)
            }
            ops::LOOKUP => {
                expect_args(operation, args, 1)?;
                Ok(self.lookup(&args[0]).await?.to_bytes()?)
            }
            ops::AUDIT_HISTORY => {
                expect_args(operation, args, 1)?;
                let mut history = self.audit_history(&args[0]).await?;
                let mut entries = Vec::new();
                while let Some(entry) = history.next().await {
                    entries.push(entry?);
                }
                encode_json(Deed::NAMESPACE, &entries)
            }
            ops::QUERY_ALL => {
                expect_args(operation, args, 0)?;
                encode_json(Deed::NAMESPACE, &self.query_all().await?)
            }
            _ => Err(WorkflowError::UnknownOperation {
                contract: self.id.clone(),
                operation: operation.to_string(),
            }),
        }
    }
}
