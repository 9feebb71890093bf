//! Canonical address resolution.
//!
//! Every record variant is reduced to a [`CanonicalAddress`] keyed by the
//! master pk, so that relationship copies of the same site compare equal.

use address_types::{
    AddressError, AddressRecord, CanonicalAddress, CompanySnapshot, EmbeddedCompany,
    ExtractedAddress, RecordKind, ServerAddress, SuggestedAddress, UNKNOWN_CREATOR,
};
use serde::{Serialize, Serializer};

/// Result of resolving a batch: valid records plus the ones that were skipped.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResolvedBatch {
    pub addresses: Vec<CanonicalAddress>,
    pub rejected: Vec<RejectedRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedRecord {
    /// Position of the record in the input batch.
    pub index: usize,
    #[serde(serialize_with = "serialize_error")]
    pub error: AddressError,
}

pub fn resolve(record: &AddressRecord) -> Result<CanonicalAddress, AddressError> {
    match record {
        AddressRecord::Server(server) => resolve_server(server, RecordKind::Server),
        AddressRecord::Suggested(suggested) => resolve_suggestion(suggested),
        AddressRecord::Extracted(extracted) => resolve_extracted(extracted),
    }
}

pub fn resolve_suggestion(suggested: &SuggestedAddress) -> Result<CanonicalAddress, AddressError> {
    resolve_server(&suggested.address, RecordKind::Suggested)
}

/// Resolves every record, skipping the invalid ones instead of failing the
/// whole batch.
pub fn resolve_all(records: &[AddressRecord]) -> ResolvedBatch {
    let mut batch = ResolvedBatch::default();

    for (index, record) in records.iter().enumerate() {
        match resolve(record) {
            Ok(address) => batch.addresses.push(address),
            Err(error) => {
                tracing::warn!(index, %error, "Skipping unresolvable address record");
                batch.rejected.push(RejectedRecord { index, error });
            }
        }
    }

    batch
}

/// Master pk of a directory row: `original` for relationship copies, `pk`
/// otherwise.
pub fn canonical_pk(address: &ServerAddress) -> Result<i64, AddressError> {
    address.original.or(address.pk).ok_or(AddressError::InvalidRecord {
        kind: RecordKind::Server,
    })
}

fn resolve_server(
    address: &ServerAddress,
    kind: RecordKind,
) -> Result<CanonicalAddress, AddressError> {
    let pk = address
        .original
        .or(address.pk)
        .ok_or(AddressError::InvalidRecord { kind })?;

    // A present flow_site key wins over a possibly stale has_flow_site flag.
    let has_flow_site = match &address.flow_site {
        Some(link) => link.is_some(),
        None => address.has_flow_site.unwrap_or(false),
    };

    Ok(CanonicalAddress {
        pk,
        address: address.address.clone(),
        postcode: address.postcode.clone(),
        city: address.city.clone(),
        country: address.country.clone(),
        name: address.name.clone().unwrap_or_default(),
        latitude: address.latitude,
        longitude: address.longitude,
        coords_validated: address.coords_validated.unwrap_or(false),
        created_by: address
            .created_by
            .as_ref()
            .map(|creator| creator.pk())
            .unwrap_or(UNKNOWN_CREATOR),
        company: project_company(address.company.as_ref()),
        has_flow_site,
    })
}

fn resolve_extracted(address: &ExtractedAddress) -> Result<CanonicalAddress, AddressError> {
    let pk = address.original.ok_or(AddressError::InvalidRecord {
        kind: RecordKind::Extracted,
    })?;

    Ok(CanonicalAddress {
        pk,
        address: address.address.clone(),
        postcode: address.postcode.clone(),
        city: address.city.clone(),
        country: address.country.clone(),
        name: address.name.clone().unwrap_or_default(),
        latitude: address.latitude,
        longitude: address.longitude,
        coords_validated: address.coords_validated.unwrap_or(false),
        created_by: UNKNOWN_CREATOR,
        company: project_company(address.company.as_ref()),
        has_flow_site: address.has_flow_site.unwrap_or(false),
    })
}

fn project_company(company: Option<&EmbeddedCompany>) -> Option<CompanySnapshot> {
    company.map(CompanySnapshot::from)
}

fn serialize_error<S: Serializer>(error: &AddressError, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(error)
}
