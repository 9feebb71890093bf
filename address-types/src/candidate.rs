use serde::Serialize;

use crate::address::{AddressRecord, CanonicalAddress, ServerAddress};

/// One row of the merged picker list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum Candidate {
    Extracted(ExtractedCandidate),
    Suggested(SuggestedCandidate),
    Directory(ServerAddress),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedCandidate {
    pub record: AddressRecord,
    pub is_last_extracted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestedCandidate {
    pub address: CanonicalAddress,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip_content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auxiliary_content: Option<serde_json::Value>,
    pub is_last_suggested: bool,
}

impl Candidate {
    /// Master pk of the underlying address, when it has one.
    pub fn pk(&self) -> Option<i64> {
        match self {
            Candidate::Extracted(extracted) => extracted.record.canonical_pk(),
            Candidate::Suggested(suggested) => Some(suggested.address.pk),
            Candidate::Directory(server) => server.original.or(server.pk),
        }
    }

    pub fn is_last_extracted(&self) -> bool {
        matches!(self, Candidate::Extracted(extracted) if extracted.is_last_extracted)
    }

    pub fn is_last_suggested(&self) -> bool {
        matches!(self, Candidate::Suggested(suggested) if suggested.is_last_suggested)
    }
}
