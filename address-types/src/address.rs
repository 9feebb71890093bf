use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::company::{CompanyChoice, CompanySnapshot, EmbeddedCompany};
use crate::role::{AddressRole, RoleSet};

/// Creator id stored on canonical addresses whose source record had no
/// `created_by` at all (extractions, or server rows predating the field).
pub const UNKNOWN_CREATOR: i64 = -1;

/// A reference that the directory API sends either as a bare id or as the
/// expanded object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(untagged)]
pub enum EntityRef {
    Id(i64),
    Object { pk: i64 },
}

impl EntityRef {
    pub fn pk(&self) -> i64 {
        match self {
            EntityRef::Id(pk) => *pk,
            EntityRef::Object { pk } => *pk,
        }
    }
}

/// Functional role flags carried by an address row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
pub struct AddressRoleFlags {
    #[serde(default)]
    pub is_origin: bool,
    #[serde(default)]
    pub is_destination: bool,
    #[serde(default)]
    pub is_shipper: bool,
    #[serde(default)]
    pub is_carrier: bool,
}

impl AddressRoleFlags {
    pub fn has(&self, role: &AddressRole) -> bool {
        match role {
            AddressRole::Origin => self.is_origin,
            AddressRole::Destination => self.is_destination,
            AddressRole::Shipper => self.is_shipper,
            AddressRole::Carrier => self.is_carrier,
            AddressRole::Other(_) => false,
        }
    }

    /// Flags matching a role set. Roles without a flag are ignored.
    pub fn from_roles(roles: &RoleSet) -> Self {
        Self {
            is_origin: roles.contains(&AddressRole::Origin),
            is_destination: roles.contains(&AddressRole::Destination),
            is_shipper: roles.contains(&AddressRole::Shipper),
            is_carrier: roles.contains(&AddressRole::Carrier),
        }
    }
}

/// An address as returned by the directory API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ServerAddress {
    #[serde(default)]
    pub pk: Option<i64>,
    /// Set on per-relationship copies; points at the master record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original: Option<i64>,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub postcode: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub coords_validated: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<EntityRef>,
    #[serde(default)]
    pub company: Option<EmbeddedCompany>,
    /// `None` when the payload has no `flow_site` key, `Some(None)` when the
    /// key is present but null.
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    #[ts(type = "EntityRef | null")]
    pub flow_site: Option<Option<EntityRef>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_flow_site: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_id: Option<String>,
    #[serde(flatten)]
    pub roles: AddressRoleFlags,
}

/// A candidate produced by document extraction. Not persisted yet, so it has
/// no pk of its own and no creator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ExtractedAddress {
    /// Master record the extraction pipeline matched this candidate to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original: Option<i64>,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub postcode: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub coords_validated: Option<bool>,
    #[serde(default)]
    pub company: Option<EmbeddedCompany>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_flow_site: Option<bool>,
    #[serde(flatten)]
    pub roles: AddressRoleFlags,
}

/// A server address recommended by the suggestion engine, with UI metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SuggestedAddress {
    pub address: ServerAddress,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tooltip_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auxiliary_content: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Server,
    Extracted,
    Suggested,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Server => write!(f, "server"),
            RecordKind::Extracted => write!(f, "extracted"),
            RecordKind::Suggested => write!(f, "suggested"),
        }
    }
}

/// Any address record the resolver accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AddressRecord {
    Server(ServerAddress),
    Extracted(ExtractedAddress),
    Suggested(SuggestedAddress),
}

impl AddressRecord {
    pub fn kind(&self) -> RecordKind {
        match self {
            AddressRecord::Server(_) => RecordKind::Server,
            AddressRecord::Extracted(_) => RecordKind::Extracted,
            AddressRecord::Suggested(_) => RecordKind::Suggested,
        }
    }

    /// Master pk of the record: `original` when set, else `pk`.
    pub fn canonical_pk(&self) -> Option<i64> {
        match self {
            AddressRecord::Server(server) => server.original.or(server.pk),
            AddressRecord::Extracted(extracted) => extracted.original,
            AddressRecord::Suggested(suggested) => {
                suggested.address.original.or(suggested.address.pk)
            }
        }
    }

    /// Whether the record exposes a creator, i.e. it has been persisted and
    /// confirmed by someone.
    pub fn is_confirmed(&self) -> bool {
        match self {
            AddressRecord::Server(server) => server.created_by.is_some(),
            AddressRecord::Extracted(_) => false,
            AddressRecord::Suggested(suggested) => suggested.address.created_by.is_some(),
        }
    }

    pub fn roles(&self) -> AddressRoleFlags {
        match self {
            AddressRecord::Server(server) => server.roles,
            AddressRecord::Extracted(extracted) => extracted.roles,
            AddressRecord::Suggested(suggested) => suggested.address.roles,
        }
    }
}

impl From<ServerAddress> for AddressRecord {
    fn from(address: ServerAddress) -> Self {
        AddressRecord::Server(address)
    }
}

impl From<ExtractedAddress> for AddressRecord {
    fn from(address: ExtractedAddress) -> Self {
        AddressRecord::Extracted(address)
    }
}

impl From<SuggestedAddress> for AddressRecord {
    fn from(address: SuggestedAddress) -> Self {
        AddressRecord::Suggested(address)
    }
}

/// The normalized, relationship-independent view of an address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CanonicalAddress {
    pub pk: i64,
    pub address: String,
    pub postcode: String,
    pub city: String,
    pub country: String,
    pub name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub coords_validated: bool,
    pub created_by: i64,
    pub company: Option<CompanySnapshot>,
    pub has_flow_site: bool,
}

impl CanonicalAddress {
    pub fn has_known_creator(&self) -> bool {
        self.created_by != UNKNOWN_CREATOR
    }

    pub fn company_choice(&self) -> CompanyChoice {
        CompanyChoice::from(self.company.as_ref())
    }
}

impl From<CanonicalAddress> for ServerAddress {
    fn from(canonical: CanonicalAddress) -> Self {
        Self {
            pk: Some(canonical.pk),
            original: None,
            address: canonical.address,
            postcode: canonical.postcode,
            city: canonical.city,
            country: canonical.country,
            name: Some(canonical.name),
            latitude: canonical.latitude,
            longitude: canonical.longitude,
            coords_validated: Some(canonical.coords_validated),
            created_by: Some(EntityRef::Id(canonical.created_by)),
            company: canonical.company.map(EmbeddedCompany::from),
            flow_site: None,
            has_flow_site: Some(canonical.has_flow_site),
            remote_id: None,
            roles: AddressRoleFlags::default(),
        }
    }
}

impl From<CanonicalAddress> for AddressRecord {
    fn from(canonical: CanonicalAddress) -> Self {
        AddressRecord::Server(canonical.into())
    }
}

/// Keeps an explicit `null` distinguishable from a missing key: only called
/// when the key is present, so the result is always `Some`.
fn deserialize_present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
