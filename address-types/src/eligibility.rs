use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use ts_rs::TS;

/// Why an address cannot be deleted. Intended for user-facing messaging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum EligibilityReason {
    IsPrimaryAddress,
    NoCompanyMatch,
    AtLeastOneAddressRequired,
    Unknown,
}

/// Outcome of a deletion check.
///
/// Serializes as `{"deletable": true}` or
/// `{"deletable": false, "reason": "..."}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletionEligibility {
    Deletable,
    Blocked(EligibilityReason),
}

impl DeletionEligibility {
    pub fn is_deletable(&self) -> bool {
        matches!(self, DeletionEligibility::Deletable)
    }

    pub fn reason(&self) -> Option<EligibilityReason> {
        match self {
            DeletionEligibility::Deletable => None,
            DeletionEligibility::Blocked(reason) => Some(*reason),
        }
    }
}

impl Serialize for DeletionEligibility {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DeletionEligibility::Deletable => {
                let mut state = serializer.serialize_struct("DeletionEligibility", 1)?;
                state.serialize_field("deletable", &true)?;
                state.end()
            }
            DeletionEligibility::Blocked(reason) => {
                let mut state = serializer.serialize_struct("DeletionEligibility", 2)?;
                state.serialize_field("deletable", &false)?;
                state.serialize_field("reason", reason)?;
                state.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_eligibility_wire_shape() {
        assert_eq!(
            serde_json::to_value(DeletionEligibility::Deletable).unwrap(),
            json!({"deletable": true})
        );
        assert_eq!(
            serde_json::to_value(DeletionEligibility::Blocked(EligibilityReason::Unknown))
                .unwrap(),
            json!({"deletable": false, "reason": "Unknown"})
        );
    }

    #[test]
    fn test_reason_accessor() {
        let blocked = DeletionEligibility::Blocked(EligibilityReason::IsPrimaryAddress);
        assert!(!blocked.is_deletable());
        assert_eq!(blocked.reason(), Some(EligibilityReason::IsPrimaryAddress));
        assert_eq!(DeletionEligibility::Deletable.reason(), None);
    }
}
