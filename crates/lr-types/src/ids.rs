//! # Identifier Newtypes
//!
//! Value types for the identifiers that flow between contracts: the caller
//! principal, the target contract, and the trust-domain channel.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of the caller who last wrote a record.
///
/// Derived from the invoking credential's CN attribute when present.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PrincipalId(String);

impl PrincipalId {
    /// Wrap an already-extracted principal string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Extract the principal from an X.509-style subject credential.
    ///
    /// The credential carries the CN between a `CN=` marker and a trailing
    /// `::` delimiter. A credential without both markers is used verbatim.
    pub fn from_credential(credential: &str) -> Self {
        if let Some(start) = credential.find("CN=") {
            let cn_start = start + 3;
            if let Some(end) = credential.rfind("::") {
                if end > cn_start {
                    return Self(credential[cn_start..end].to_string());
                }
            }
        }
        Self(credential.to_string())
    }

    /// The principal as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PrincipalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a deployed contract within a channel.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContractId(String);

impl ContractId {
    /// Create a contract identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContractId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of the trust-domain channel a set of contracts share.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelId(String);

impl ChannelId {
    /// Create a channel identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
