//! # Deed Record
//!
//! Immutable record of a legal transaction referencing a title: an
//! ordinary sale, or a mortgage origination naming a lien holder. Deeds
//! are created once by an issuance operation and never mutated or
//! deleted.

use lr_types::{CompositeKey, Entity, EntityError, PrincipalId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Deed variant, carried in the record under its legal wire name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeedType {
    /// Ordinary sale deed: seller and buyer set, no lien holder.
    #[serde(rename = "jual-beli")]
    Sale,
    /// Mortgage-origination deed: lien holder set, no seller or buyer.
    #[serde(rename = "apht")]
    MortgageOrigination,
}

impl DeedType {
    /// Parse the wire name of a deed type.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "jual-beli" => Some(Self::Sale),
            "apht" => Some(Self::MortgageOrigination),
            _ => None,
        }
    }

    /// Wire name of this deed type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sale => "jual-beli",
            Self::MortgageOrigination => "apht",
        }
    }
}

impl fmt::Display for DeedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable deed record.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Deed {
    /// Namespace tag embedded in the stored payload.
    pub namespace: String,
    /// Unique deed number, the record's only key part.
    pub deed_number: String,
    /// Sale or mortgage origination.
    pub deed_type: DeedType,
    /// Title the transaction refers to.
    pub title_number: String,
    /// Parcel the title covers.
    pub parcel_id: String,
    /// Selling party; sale deeds only.
    pub seller: Option<String>,
    /// Buying party; sale deeds only.
    pub buyer: Option<String>,
    /// Lien holder; mortgage-origination deeds only.
    pub lien_holder: Option<String>,
    /// Caller who issued the record.
    pub creator: Option<PrincipalId>,
}

impl Deed {
    /// Create a sale deed.
    pub fn sale(
        deed_number: impl Into<String>,
        title_number: impl Into<String>,
        parcel_id: impl Into<String>,
        seller: impl Into<String>,
        buyer: impl Into<String>,
    ) -> Self {
        Self {
            namespace: Self::NAMESPACE.to_string(),
            deed_number: deed_number.into(),
            deed_type: DeedType::Sale,
            title_number: title_number.into(),
            parcel_id: parcel_id.into(),
            seller: Some(seller.into()),
            buyer: Some(buyer.into()),
            lien_holder: None,
            creator: None,
        }
    }

    /// Create a mortgage-origination deed.
    pub fn mortgage_origination(
        deed_number: impl Into<String>,
        title_number: impl Into<String>,
        parcel_id: impl Into<String>,
        lien_holder: impl Into<String>,
    ) -> Self {
        Self {
            namespace: Self::NAMESPACE.to_string(),
            deed_number: deed_number.into(),
            deed_type: DeedType::MortgageOrigination,
            title_number: title_number.into(),
            parcel_id: parcel_id.into(),
            seller: None,
            buyer: None,
            lien_holder: Some(lien_holder.into()),
            creator: None,
        }
    }

    /// Composite key for a deed number.
    pub fn key_for(deed_number: &str) -> Result<CompositeKey, EntityError> {
        CompositeKey::new(Self::NAMESPACE, &[deed_number.to_string()])
    }

    /// Stamp the issuing principal.
    pub fn set_creator(&mut self, creator: PrincipalId) {
        self.creator = Some(creator);
    }

    /// True for a well-formed sale deed.
    pub fn is_sale(&self) -> bool {
        self.deed_type == DeedType::Sale && self.buyer.is_some() && self.seller.is_some()
    }

    /// True for a well-formed mortgage-origination deed.
    pub fn is_mortgage_origination(&self) -> bool {
        self.deed_type == DeedType::MortgageOrigination && self.lien_holder.is_some()
    }
}

impl Entity for Deed {
    const NAMESPACE: &'static str = "registry.deed";

    fn key_parts(&self) -> Vec<String> {
        vec![self.deed_number.clone()]
    }
}
