//! # Mortgage Record
//!
//! Mutable record of a lien against a title. Created ACTIVE when an
//! encumbrance is placed, voided exactly once when it is released; VOID
//! is terminal and the record is never deleted.

use crate::errors::WorkflowError;
use lr_types::{CompositeKey, Entity, EntityError, PrincipalId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Mortgage state machine: ACTIVE→VOID, nothing else.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MortgageState {
    /// Lien is in force.
    #[default]
    Active,
    /// Lien released; terminal.
    Void,
}

impl MortgageState {
    /// Check if a transition is legal.
    pub fn can_transition_to(&self, next: MortgageState) -> bool {
        matches!((self, next), (Self::Active, Self::Void))
    }

    /// True for the terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Void)
    }
}

impl fmt::Display for MortgageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Active => "ACTIVE",
            Self::Void => "VOID",
        };
        f.write_str(name)
    }
}

/// Mutable mortgage record.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Mortgage {
    /// Namespace tag embedded in the stored payload.
    pub namespace: String,
    /// Unique mortgage number, the record's only key part.
    pub mortgage_number: String,
    /// Title the lien is registered against.
    pub title_number: String,
    /// Parcel the title covers.
    pub parcel_id: String,
    /// Party holding the lien.
    pub lien_holder: String,
    /// Mortgage-origination deed behind the registration.
    pub reference_deed_number: String,
    /// Lifecycle state.
    pub current_state: MortgageState,
    /// Caller who last wrote the record.
    pub creator: Option<PrincipalId>,
}

impl Mortgage {
    /// Create a mortgage in ACTIVE state.
    pub fn register(
        mortgage_number: impl Into<String>,
        title_number: impl Into<String>,
        parcel_id: impl Into<String>,
        lien_holder: impl Into<String>,
        reference_deed_number: impl Into<String>,
    ) -> Self {
        Self {
            namespace: Self::NAMESPACE.to_string(),
            mortgage_number: mortgage_number.into(),
            title_number: title_number.into(),
            parcel_id: parcel_id.into(),
            lien_holder: lien_holder.into(),
            reference_deed_number: reference_deed_number.into(),
            current_state: MortgageState::Active,
            creator: None,
        }
    }

    /// Composite key for a mortgage number.
    pub fn key_for(mortgage_number: &str) -> Result<CompositeKey, EntityError> {
        CompositeKey::new(Self::NAMESPACE, &[mortgage_number.to_string()])
    }

    /// Move to a new lifecycle state.
    pub fn transition_to(&mut self, next: MortgageState) -> Result<(), WorkflowError> {
        if !self.current_state.can_transition_to(next) {
            return Err(WorkflowError::InvalidTransition {
                reason: format!(
                    "mortgage {} cannot move {} -> {}",
                    self.mortgage_number, self.current_state, next
                ),
            });
        }
        self.current_state = next;
        Ok(())
    }

    /// True while the lien is in force.
    pub fn is_active(&self) -> bool {
        self.current_state == MortgageState::Active
    }

    /// True once the lien has been voided.
    pub fn is_void(&self) -> bool {
        self.current_state == MortgageState::Void
    }

    /// Stamp the writing principal.
    pub fn set_creator(&mut self, creator: PrincipalId) {
        self.creator = Some(creator);
    }
}

impl Entity for Mortgage {
    const NAMESPACE: &'static str = "registry.mortgage";

    fn key_parts(&self) -> Vec<String> {
        vec![self.mortgage_number.clone()]
    }
}
