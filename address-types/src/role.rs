use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Functional role an address can play on a transport.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AddressRole {
    Origin,
    Destination,
    Shipper,
    Carrier,
    /// Any role value the client knows about and this crate does not.
    #[serde(untagged)]
    Other(String),
}

impl AddressRole {
    pub fn as_str(&self) -> &str {
        match self {
            AddressRole::Origin => "origin",
            AddressRole::Destination => "destination",
            AddressRole::Shipper => "shipper",
            AddressRole::Carrier => "carrier",
            AddressRole::Other(value) => value,
        }
    }
}

impl From<&str> for AddressRole {
    fn from(value: &str) -> Self {
        match value {
            "origin" => AddressRole::Origin,
            "destination" => AddressRole::Destination,
            "shipper" => AddressRole::Shipper,
            "carrier" => AddressRole::Carrier,
            other => AddressRole::Other(other.to_string()),
        }
    }
}

impl fmt::Display for AddressRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category requested by a picker or edit form. Composite categories expand
/// to several roles.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AddressCategory {
    BulkingBreak,
    Invoice,
    #[serde(untagged)]
    Role(AddressRole),
}

impl From<&str> for AddressCategory {
    fn from(value: &str) -> Self {
        match value {
            "bulkingBreak" => AddressCategory::BulkingBreak,
            "invoice" => AddressCategory::Invoice,
            other => AddressCategory::Role(AddressRole::from(other)),
        }
    }
}

impl fmt::Display for AddressCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressCategory::BulkingBreak => f.write_str("bulkingBreak"),
            AddressCategory::Invoice => f.write_str("invoice"),
            AddressCategory::Role(role) => role.fmt(f),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleSet(BTreeSet<AddressRole>);

impl RoleSet {
    pub fn contains(&self, role: &AddressRole) -> bool {
        self.0.contains(role)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<AddressRole> for RoleSet {
    fn from_iter<I: IntoIterator<Item = AddressRole>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<const N: usize> From<[AddressRole; N]> for RoleSet {
    fn from(roles: [AddressRole; N]) -> Self {
        roles.into_iter().collect()
    }
}

/// What the caller asked `fill_types` for: a single category, or a list of
/// roles to match against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestedCategory {
    One(AddressCategory),
    Many(Vec<AddressRole>),
}

impl RequestedCategory {
    /// Equality for a single category, membership for a list.
    pub fn includes(&self, role: &AddressRole) -> bool {
        match self {
            RequestedCategory::One(AddressCategory::Role(requested)) => requested == role,
            RequestedCategory::One(_) => false,
            RequestedCategory::Many(roles) => roles.contains(role),
        }
    }
}

impl From<&str> for RequestedCategory {
    fn from(value: &str) -> Self {
        RequestedCategory::One(AddressCategory::from(value))
    }
}
