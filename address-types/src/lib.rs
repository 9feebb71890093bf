//! Address types
//!
//! Data model shared by the address-book core and its callers: the raw
//! record variants coming from the directory API, the extraction pipeline
//! and the suggestion engine, plus the canonical form they resolve to.
//! TypeScript bindings for the picker UI are generated with `ts-rs`.

pub mod address;
pub mod candidate;
pub mod company;
pub mod eligibility;
pub mod error;
pub mod role;

pub use address::{
    AddressRecord, AddressRoleFlags, CanonicalAddress, EntityRef, ExtractedAddress, RecordKind,
    ServerAddress, SuggestedAddress, UNKNOWN_CREATOR,
};
pub use candidate::{Candidate, ExtractedCandidate, SuggestedCandidate};
pub use company::{AddressPkRef, CompanyChoice, CompanyContext, CompanySnapshot, EmbeddedCompany};
pub use eligibility::{DeletionEligibility, EligibilityReason};
pub use error::AddressError;
pub use role::{AddressCategory, AddressRole, RequestedCategory, RoleSet};
