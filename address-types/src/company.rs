use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Company object embedded on an address row. The directory API populates it
/// unevenly, so everything past `pk` may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct EmbeddedCompany {
    pub pk: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub is_verified: Option<bool>,
    #[serde(default)]
    pub trade_number: Option<String>,
    #[serde(default)]
    pub vat_number: Option<String>,
    #[serde(default)]
    pub has_loggable_managers: Option<bool>,
    #[serde(default)]
    pub can_invite_to: Option<bool>,
}

/// Display-safe projection of a company, as carried on canonical addresses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CompanySnapshot {
    pub pk: i64,
    pub name: String,
    pub country: String,
    pub is_verified: bool,
    pub trade_number: String,
    pub vat_number: String,
    pub has_loggable_managers: bool,
    pub can_invite_to: bool,
}

impl From<&EmbeddedCompany> for CompanySnapshot {
    fn from(company: &EmbeddedCompany) -> Self {
        Self {
            pk: company.pk,
            name: company.name.clone(),
            country: company.country.clone(),
            is_verified: company.is_verified.unwrap_or(false),
            trade_number: company.trade_number.clone().unwrap_or_default(),
            vat_number: company.vat_number.clone().unwrap_or_default(),
            has_loggable_managers: company.has_loggable_managers.unwrap_or(false),
            can_invite_to: company.can_invite_to.unwrap_or(false),
        }
    }
}

impl From<CompanySnapshot> for EmbeddedCompany {
    fn from(snapshot: CompanySnapshot) -> Self {
        Self {
            pk: snapshot.pk,
            name: snapshot.name,
            country: snapshot.country,
            is_verified: Some(snapshot.is_verified),
            trade_number: Some(snapshot.trade_number),
            vat_number: Some(snapshot.vat_number),
            has_loggable_managers: Some(snapshot.has_loggable_managers),
            can_invite_to: Some(snapshot.can_invite_to),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
pub struct AddressPkRef {
    pub pk: i64,
}

/// Owning company as seen by the delete flow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CompanyContext {
    pub pk: i64,
    #[serde(default)]
    pub primary_address_pk: Option<i64>,
    /// `None` until the company's address list has been loaded.
    #[serde(default)]
    pub addresses: Option<Vec<AddressPkRef>>,
}

impl CompanyContext {
    pub fn owns_address(&self, pk: i64) -> Option<bool> {
        self.addresses
            .as_ref()
            .map(|addresses| addresses.iter().any(|address| address.pk == pk))
    }
}

/// Company selection state in address and company editing flows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum CompanyChoice {
    /// Explicitly no company: a free-floating address.
    None,
    /// Nothing chosen yet.
    #[default]
    Unset,
    Company(i64),
}

impl CompanyChoice {
    pub fn company_pk(&self) -> Option<i64> {
        match self {
            CompanyChoice::Company(pk) => Some(*pk),
            CompanyChoice::None | CompanyChoice::Unset => None,
        }
    }
}

impl From<Option<&CompanySnapshot>> for CompanyChoice {
    fn from(company: Option<&CompanySnapshot>) -> Self {
        match company {
            Some(company) => CompanyChoice::Company(company.pk),
            None => CompanyChoice::None,
        }
    }
}
