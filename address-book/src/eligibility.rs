//! Deletion guard for addresses.
//!
//! A company's primary site and its last remaining site are protected;
//! free-floating addresses with no company can always be removed.

use address_types::{
    CanonicalAddress, CompanyChoice, CompanyContext, DeletionEligibility, EligibilityReason,
};

/// Decides whether `address` may be deleted. The first matching rule wins.
pub fn evaluate_deletion(
    address: Option<&CanonicalAddress>,
    company: Option<&CompanyContext>,
) -> DeletionEligibility {
    let Some(address) = address else {
        return DeletionEligibility::Blocked(EligibilityReason::Unknown);
    };

    match company {
        Some(company) => evaluate_with_company(address, company),
        None => match address.company_choice() {
            // Membership cannot be checked without the company's detail.
            CompanyChoice::Company(_) | CompanyChoice::Unset => {
                DeletionEligibility::Blocked(EligibilityReason::Unknown)
            }
            CompanyChoice::None => DeletionEligibility::Deletable,
        },
    }
}

fn evaluate_with_company(
    address: &CanonicalAddress,
    company: &CompanyContext,
) -> DeletionEligibility {
    if company.primary_address_pk == Some(address.pk) {
        return DeletionEligibility::Blocked(EligibilityReason::IsPrimaryAddress);
    }

    if address.company_choice().company_pk() != Some(company.pk) {
        return DeletionEligibility::Blocked(EligibilityReason::NoCompanyMatch);
    }

    let Some(addresses) = &company.addresses else {
        return DeletionEligibility::Blocked(EligibilityReason::Unknown);
    };

    if addresses.len() < 2 {
        return DeletionEligibility::Blocked(EligibilityReason::AtLeastOneAddressRequired);
    }

    if company.owns_address(address.pk) != Some(true) {
        return DeletionEligibility::Blocked(EligibilityReason::NoCompanyMatch);
    }

    DeletionEligibility::Deletable
}

#[cfg(test)]
mod tests {
    use super::*;
    use address_types::{AddressPkRef, CompanySnapshot};

    fn address(pk: i64, company_pk: Option<i64>) -> CanonicalAddress {
        CanonicalAddress {
            pk,
            address: "3 avenue Foch".to_string(),
            postcode: "75016".to_string(),
            city: "Paris".to_string(),
            country: "FR".to_string(),
            name: String::new(),
            latitude: None,
            longitude: None,
            coords_validated: false,
            created_by: 1,
            company: company_pk.map(|pk| CompanySnapshot {
                pk,
                ..Default::default()
            }),
            has_flow_site: false,
        }
    }

    fn company(pk: i64, primary: i64, addresses: Option<&[i64]>) -> CompanyContext {
        CompanyContext {
            pk,
            primary_address_pk: Some(primary),
            addresses: addresses
                .map(|pks| pks.iter().map(|pk| AddressPkRef { pk: *pk }).collect()),
        }
    }

    fn blocked(reason: EligibilityReason) -> DeletionEligibility {
        DeletionEligibility::Blocked(reason)
    }

    #[test]
    fn test_missing_address() {
        assert_eq!(
            evaluate_deletion(None, None),
            blocked(EligibilityReason::Unknown)
        );
        assert_eq!(
            evaluate_deletion(None, Some(&company(1, 10, Some(&[10, 11])))),
            blocked(EligibilityReason::Unknown)
        );
    }

    #[test]
    fn test_address_without_company_is_deletable() {
        assert_eq!(
            evaluate_deletion(Some(&address(5, None)), None),
            DeletionEligibility::Deletable
        );
    }

    #[test]
    fn test_company_address_without_context_is_unknown() {
        assert_eq!(
            evaluate_deletion(Some(&address(5, Some(1))), None),
            blocked(EligibilityReason::Unknown)
        );
    }

    #[test]
    fn test_primary_address_is_protected() {
        let owner = company(1, 10, Some(&[10, 11, 12]));
        assert_eq!(
            evaluate_deletion(Some(&address(10, Some(1))), Some(&owner)),
            blocked(EligibilityReason::IsPrimaryAddress)
        );
    }

    #[test]
    fn test_primary_check_runs_before_company_match() {
        let other = company(2, 10, Some(&[10, 11]));
        assert_eq!(
            evaluate_deletion(Some(&address(10, Some(1))), Some(&other)),
            blocked(EligibilityReason::IsPrimaryAddress)
        );
    }

    #[test]
    fn test_foreign_company() {
        let other = company(2, 20, Some(&[20, 21]));
        assert_eq!(
            evaluate_deletion(Some(&address(11, Some(1))), Some(&other)),
            blocked(EligibilityReason::NoCompanyMatch)
        );
        assert_eq!(
            evaluate_deletion(Some(&address(11, None)), Some(&other)),
            blocked(EligibilityReason::NoCompanyMatch)
        );
    }

    #[test]
    fn test_addresses_not_loaded() {
        let owner = company(1, 10, None);
        assert_eq!(
            evaluate_deletion(Some(&address(11, Some(1))), Some(&owner)),
            blocked(EligibilityReason::Unknown)
        );
    }

    #[test]
    fn test_last_address_is_protected() {
        let owner = company(1, 10, Some(&[11]));
        assert_eq!(
            evaluate_deletion(Some(&address(11, Some(1))), Some(&owner)),
            blocked(EligibilityReason::AtLeastOneAddressRequired)
        );
    }

    #[test]
    fn test_address_not_listed() {
        let owner = company(1, 10, Some(&[10, 12]));
        assert_eq!(
            evaluate_deletion(Some(&address(11, Some(1))), Some(&owner)),
            blocked(EligibilityReason::NoCompanyMatch)
        );
    }

    #[test]
    fn test_secondary_address_is_deletable() {
        let owner = company(1, 10, Some(&[10, 11]));
        assert_eq!(
            evaluate_deletion(Some(&address(11, Some(1))), Some(&owner)),
            DeletionEligibility::Deletable
        );
    }
}
