//! Candidate list for the address picker.
//!
//! With an empty search box the picker shows, in order: addresses found in
//! the current document, addresses suggested for it, then the directory page.
//! A site is listed in one group only: the highest-ranked group that has it.

use address_types::{
    AddressRecord, Candidate, ExtractedCandidate, ServerAddress, SuggestedAddress,
    SuggestedCandidate,
};
use std::collections::HashSet;

use crate::resolver::{canonical_pk, resolve, resolve_suggestion};

/// Builds the picker list for the current search text.
///
/// Any non-empty search returns the directory page untouched: ranking only
/// applies to the default browse view.
pub fn merge_candidates(
    search_text: &str,
    server_page: &[ServerAddress],
    extracted: &[AddressRecord],
    suggested: &[SuggestedAddress],
) -> Vec<Candidate> {
    if !search_text.is_empty() {
        tracing::debug!(
            results = server_page.len(),
            "Search text present, skipping candidate merge"
        );
        return server_page.iter().cloned().map(Candidate::Directory).collect();
    }

    merge(server_page, extracted, suggested)
}

/// Merges the three candidate groups for the browse view.
pub fn merge(
    server_page: &[ServerAddress],
    extracted: &[AddressRecord],
    suggested: &[SuggestedAddress],
) -> Vec<Candidate> {
    let mut excluded = HashSet::new();

    let extracted: Vec<&AddressRecord> = extracted
        .iter()
        .filter(|record| {
            if record.is_confirmed() {
                match resolve(record) {
                    Ok(canonical) => {
                        excluded.insert(canonical.pk);
                    }
                    Err(error) => {
                        tracing::warn!(%error, "Dropping malformed extracted candidate");
                        return false;
                    }
                }
            } else if let Some(pk) = record.canonical_pk() {
                excluded.insert(pk);
            }
            true
        })
        .collect();

    let suggested: Vec<SuggestedCandidate> = suggested
        .iter()
        .filter_map(|suggestion| match resolve_suggestion(suggestion) {
            Ok(address) => (!excluded.contains(&address.pk)).then(|| SuggestedCandidate {
                address,
                tooltip_content: suggestion.tooltip_content.clone(),
                auxiliary_content: suggestion.auxiliary_content.clone(),
                is_last_suggested: false,
            }),
            Err(error) => {
                tracing::warn!(%error, "Dropping malformed suggested candidate");
                None
            }
        })
        .collect();

    excluded.extend(suggested.iter().map(|suggestion| suggestion.address.pk));

    // Only earlier groups exclude a row; repeats within the page are kept.
    let directory: Vec<&ServerAddress> = server_page
        .iter()
        .filter(|address| match canonical_pk(address) {
            Ok(pk) => !excluded.contains(&pk),
            Err(error) => {
                tracing::warn!(%error, "Dropping malformed directory candidate");
                false
            }
        })
        .collect();

    tracing::debug!(
        extracted = extracted.len(),
        suggested = suggested.len(),
        directory = directory.len(),
        "Merged address candidates"
    );

    let extracted_count = extracted.len();
    let suggested_count = suggested.len();
    let mut candidates = Vec::with_capacity(extracted_count + suggested_count + directory.len());

    candidates.extend(extracted.into_iter().enumerate().map(|(index, record)| {
        Candidate::Extracted(ExtractedCandidate {
            record: record.clone(),
            is_last_extracted: index + 1 == extracted_count,
        })
    }));
    candidates.extend(suggested.into_iter().enumerate().map(|(index, mut suggestion)| {
        suggestion.is_last_suggested = index + 1 == suggested_count;
        Candidate::Suggested(suggestion)
    }));
    candidates.extend(directory.into_iter().cloned().map(Candidate::Directory));

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn servers(value: serde_json::Value) -> Vec<ServerAddress> {
        serde_json::from_value(value).unwrap()
    }

    fn records(value: serde_json::Value) -> Vec<AddressRecord> {
        serde_json::from_value(value).unwrap()
    }

    fn suggestions(value: serde_json::Value) -> Vec<SuggestedAddress> {
        serde_json::from_value(value).unwrap()
    }

    fn pks(candidates: &[Candidate]) -> Vec<Option<i64>> {
        candidates.iter().map(Candidate::pk).collect()
    }

    #[test]
    fn test_merge_ranks_groups() {
        let server_page = servers(json!([{"pk": 1}, {"pk": 2}]));
        let extracted = records(json!([{"kind": "server", "pk": 2, "created_by": 7}]));
        let suggested = suggestions(json!([{"address": {"pk": 3}, "tooltipContent": "x"}]));

        let merged = merge_candidates("", &server_page, &extracted, &suggested);

        assert_eq!(merged.len(), 3);
        assert_eq!(pks(&merged), vec![Some(2), Some(3), Some(1)]);

        assert!(merged[0].is_last_extracted());
        match &merged[1] {
            Candidate::Suggested(suggestion) => {
                assert!(suggestion.is_last_suggested);
                assert_eq!(suggestion.tooltip_content.as_deref(), Some("x"));
            }
            _ => panic!("Expected suggested candidate"),
        }
        assert!(matches!(&merged[2], Candidate::Directory(address) if address.pk == Some(1)));
    }

    #[test]
    fn test_search_text_bypasses_merge() {
        let server_page = servers(json!([{"pk": 1}, {"pk": 2}, {"city": "Lille"}]));
        let extracted = records(json!([{"kind": "server", "pk": 2, "created_by": 7}]));
        let suggested = suggestions(json!([{"address": {"pk": 3}}]));

        let merged = merge_candidates("rue", &server_page, &extracted, &suggested);

        let expected: Vec<Candidate> = server_page.into_iter().map(Candidate::Directory).collect();
        assert_eq!(merged, expected);
    }

    #[test]
    fn test_whitespace_search_text_bypasses_merge() {
        let server_page = servers(json!([{"pk": 1}, {"pk": 2}]));
        let extracted = records(json!([{"kind": "server", "pk": 2, "created_by": 7}]));
        let suggested = suggestions(json!([{"address": {"pk": 1}}]));

        let merged = merge_candidates(" ", &server_page, &extracted, &suggested);

        assert_eq!(pks(&merged), vec![Some(1), Some(2)]);
        assert!(merged
            .iter()
            .all(|candidate| matches!(candidate, Candidate::Directory(_))));
    }

    #[test]
    fn test_suggestions_already_extracted_are_dropped() {
        let extracted = records(json!([
            {"kind": "server", "pk": 40, "original": 4, "created_by": {"pk": 1}},
            {"kind": "extracted", "address": "Zone Industrielle"}
        ]));
        let suggested = suggestions(json!([
            {"address": {"pk": 4}},
            {"address": {"pk": 5}},
            {"address": {"pk": 6}}
        ]));

        let merged = merge(&[], &extracted, &suggested);

        assert_eq!(pks(&merged), vec![Some(4), None, Some(5), Some(6)]);
        assert!(!merged[0].is_last_extracted());
        assert!(merged[1].is_last_extracted());
        assert!(!merged[2].is_last_suggested());
        assert!(merged[3].is_last_suggested());
    }

    #[test]
    fn test_copies_of_the_same_site_appear_once() {
        let server_page = servers(json!([
            {"pk": 9, "original": 3},
            {"pk": 3},
            {"pk": 8}
        ]));
        let suggested = suggestions(json!([{"address": {"pk": 30, "original": 3}}]));

        let merged = merge(&server_page, &[], &suggested);

        assert_eq!(pks(&merged), vec![Some(3), Some(8)]);
        match &merged[0] {
            Candidate::Suggested(suggestion) => assert_eq!(suggestion.address.pk, 3),
            _ => panic!("Expected suggested candidate"),
        }
    }

    #[test]
    fn test_extraction_matched_to_original_excludes_directory_row() {
        let server_page = servers(json!([{"pk": 11}, {"pk": 12}]));
        let extracted = records(json!([{"kind": "extracted", "original": 11}]));

        let merged = merge(&server_page, &extracted, &[]);

        assert_eq!(pks(&merged), vec![Some(11), Some(12)]);
        assert!(merged[0].is_last_extracted());
        assert!(matches!(&merged[1], Candidate::Directory(_)));
    }

    #[test]
    fn test_directory_rows_keep_their_shape() {
        let server_page = servers(json!([{
            "pk": 21,
            "original": 2,
            "remote_id": "R-21",
            "created_by": {"pk": 5}
        }]));

        let merged = merge(&server_page, &[], &[]);

        match &merged[0] {
            Candidate::Directory(address) => assert_eq!(address, &server_page[0]),
            _ => panic!("Expected directory candidate"),
        }
    }

    #[test]
    fn test_malformed_items_are_dropped() {
        let server_page = servers(json!([{"city": "Brest"}, {"pk": 1}]));
        let extracted = records(json!([
            {"kind": "server", "created_by": 3},
            {"kind": "server", "pk": 2, "created_by": 3}
        ]));
        let suggested = suggestions(json!([{"address": {}}, {"address": {"pk": 3}}]));

        let merged = merge(&server_page, &extracted, &suggested);

        assert_eq!(pks(&merged), vec![Some(2), Some(3), Some(1)]);
        assert!(merged[0].is_last_extracted());
        assert!(merged[1].is_last_suggested());
    }

    #[test]
    fn test_no_pk_repeats_across_groups() {
        let server_page = servers(json!([{"pk": 1}, {"pk": 2}, {"pk": 3}, {"pk": 4}]));
        let extracted = records(json!([{"kind": "server", "pk": 1, "created_by": 1}]));
        let suggested = suggestions(json!([{"address": {"pk": 2}}, {"address": {"pk": 1}}]));

        let merged = merge(&server_page, &extracted, &suggested);
        let unique: HashSet<_> = pks(&merged).into_iter().collect();

        assert_eq!(unique.len(), merged.len());
        assert_eq!(pks(&merged), vec![Some(1), Some(2), Some(3), Some(4)]);
    }

    #[test]
    fn test_repeats_within_a_group_pass_through() {
        let server_page = servers(json!([{"pk": 5}, {"pk": 5}, {"pk": 2}]));
        let suggested = suggestions(json!([{"address": {"pk": 2}}, {"address": {"pk": 2}}]));

        let merged = merge(&server_page, &[], &suggested);

        assert_eq!(pks(&merged), vec![Some(2), Some(2), Some(5), Some(5)]);
        assert!(!merged[0].is_last_suggested());
        assert!(merged[1].is_last_suggested());
    }

    #[test]
    fn test_empty_inputs() {
        assert!(merge(&[], &[], &[]).is_empty());
        assert!(merge_candidates("", &[], &[], &[]).is_empty());
    }

    #[test]
    fn test_merge_is_repeatable() {
        let server_page = servers(json!([{"pk": 1}, {"pk": 2}]));
        let extracted = records(json!([{"kind": "server", "pk": 2, "created_by": 7}]));
        let suggested = suggestions(json!([{"address": {"pk": 3}}]));

        assert_eq!(
            merge(&server_page, &extracted, &suggested),
            merge(&server_page, &extracted, &suggested)
        );
    }

    #[test]
    fn test_candidate_wire_shape() {
        let suggested = suggestions(json!([{
            "address": {"pk": 3, "remote_id": "R-3"},
            "tooltipContent": "x",
            "auxiliaryContent": {"transports": 4}
        }]));

        let merged = merge(&[], &[], &suggested);
        let value = serde_json::to_value(&merged).unwrap();

        assert_eq!(value[0]["source"], json!("suggested"));
        assert_eq!(value[0]["isLastSuggested"], json!(true));
        assert_eq!(value[0]["auxiliaryContent"], json!({"transports": 4}));
        assert!(value[0]["address"].get("remote_id").is_none());
    }
}
