//! # Contract Services
//!
//! One service per resource type. Each service owns its entity collection
//! and query facade, stamps the invoking principal on every write, and
//! exposes its operations both as typed methods and through
//! [`crate::ports::ContractHandler`] dispatch.

pub mod deed;
pub mod mortgage;
pub mod title;

pub use deed::{DeedContract, IssueDeedParams};
pub use mortgage::MortgageContract;
pub use title::LandTitleContract;

use crate::errors::WorkflowError;
use lr_types::EntityError;
use serde::Serialize;

/// Serialize a dispatch result list to its wire form.
pub(crate) fn encode_json(
    namespace: &'static str,
    value: &impl Serialize,
) -> Result<Vec<u8>, WorkflowError> {
    serde_json::to_vec(value).map_err(|e| {
        EntityError::MalformedRecord {
            namespace,
            reason: e.to_string(),
        }
        .into()
    })
}

/// Map a dispatch argument to an optional field: empty string means unset.
pub(crate) fn optional_arg(arg: &str) -> Option<String> {
    if arg.is_empty() {
        None
    } else {
        Some(arg.to_string())
    }
}
