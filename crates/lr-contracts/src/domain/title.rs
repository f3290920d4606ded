//! # Land-Title Record
//!
//! Mutable record of current ownership and encumbrance status for a
//! parcel. Created once by issuance, then mutated in place by the
//! transfer, place-encumbrance, and release-encumbrance workflows; never
//! deleted.

use crate::errors::WorkflowError;
use lr_types::{CompositeKey, Entity, EntityError, PrincipalId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Land-title state machine.
///
/// Legal transitions are NORMAL→ENCUMBERED (place) and ENCUMBERED→NORMAL
/// (release). FROZEN is declared but reserved: no exposed operation
/// enters or leaves it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TitleState {
    /// Unencumbered, freely transferable.
    #[default]
    Normal,
    /// Pledged as collateral; an active mortgage references this title.
    Encumbered,
    /// Reserved; unused by any exposed operation.
    Frozen,
}

impl TitleState {
    /// Check if a transition is legal.
    pub fn can_transition_to(&self, next: TitleState) -> bool {
        matches!(
            (self, next),
            (Self::Normal, Self::Encumbered) | (Self::Encumbered, Self::Normal)
        )
    }
}

impl fmt::Display for TitleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Normal => "NORMAL",
            Self::Encumbered => "ENCUMBERED",
            Self::Frozen => "FROZEN",
        };
        f.write_str(name)
    }
}

/// Mutable land-title record.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LandTitle {
    /// Namespace tag embedded in the stored payload.
    pub namespace: String,
    /// Title number, first key part.
    pub title_number: String,
    /// Parcel identifier, second key part.
    pub parcel_id: String,
    /// Current owner.
    pub owner: String,
    /// Lifecycle state.
    pub current_state: TitleState,
    /// Deed that produced the last ownership or encumbrance change.
    pub reference_deed_number: Option<String>,
    /// Caller who last wrote the record.
    pub creator: Option<PrincipalId>,
}

impl LandTitle {
    /// Create a title in NORMAL state for the given owner.
    pub fn issue(
        title_number: impl Into<String>,
        parcel_id: impl Into<String>,
        owner: impl Into<String>,
    ) -> Self {
        Self {
            namespace: Self::NAMESPACE.to_string(),
            title_number: title_number.into(),
            parcel_id: parcel_id.into(),
            owner: owner.into(),
            current_state: TitleState::Normal,
            reference_deed_number: None,
            creator: None,
        }
    }

    /// Composite key for a title/parcel pair.
    pub fn key_for(title_number: &str, parcel_id: &str) -> Result<CompositeKey, EntityError> {
        CompositeKey::new(
            Self::NAMESPACE,
            &[title_number.to_string(), parcel_id.to_string()],
        )
    }

    /// Move to a new lifecycle state.
    pub fn transition_to(&mut self, next: TitleState) -> Result<(), WorkflowError> {
        if !self.current_state.can_transition_to(next) {
            return Err(WorkflowError::InvalidTransition {
                reason: format!(
                    "title {}/{} cannot move {} -> {}",
                    self.title_number, self.parcel_id, self.current_state, next
                ),
            });
        }
        self.current_state = next;
        Ok(())
    }

    /// True while an encumbrance is in place.
    pub fn is_encumbered(&self) -> bool {
        self.current_state == TitleState::Encumbered
    }

    /// Record a new owner.
    pub fn set_owner(&mut self, owner: impl Into<String>) {
        self.owner = owner.into();
    }

    /// Record the deed behind the latest change.
    pub fn set_reference_deed(&mut self, deed_number: impl Into<String>) {
        self.reference_deed_number = Some(deed_number.into());
    }

    /// Stamp the writing principal.
    pub fn set_creator(&mut self, creator: PrincipalId) {
        self.creator = Some(creator);
    }
}

impl Entity for LandTitle {
    const NAMESPACE: &'static str = "registry.title";

    fn key_parts(&self) -> Vec<String> {
        vec![self.title_number.clone(), self.parcel_id.clone()]
    }
}
