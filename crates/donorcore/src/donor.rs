//! Blood groups and donor records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

/// ABO/Rh blood group.
///
/// Variants are declared in the order they appear on the selector keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr, IntoStaticStr, EnumIter)]
pub enum BloodGroup {
    #[strum(serialize = "A+")]
    #[serde(rename = "A+")]
    APositive,
    #[strum(serialize = "A-")]
    #[serde(rename = "A-")]
    ANegative,
    #[strum(serialize = "B+")]
    #[serde(rename = "B+")]
    BPositive,
    #[strum(serialize = "B-")]
    #[serde(rename = "B-")]
    BNegative,
    #[strum(serialize = "AB+")]
    #[serde(rename = "AB+")]
    AbPositive,
    #[strum(serialize = "AB-")]
    #[serde(rename = "AB-")]
    AbNegative,
    #[strum(serialize = "O+")]
    #[serde(rename = "O+")]
    OPositive,
    #[strum(serialize = "O-")]
    #[serde(rename = "O-")]
    ONegative,
}

impl BloodGroup {
    /// All groups in selector order.
    pub fn all() -> Vec<BloodGroup> {
        BloodGroup::iter().collect()
    }

    /// Wire label, e.g. `"AB-"`.
    pub fn label(&self) -> &'static str {
        (*self).into()
    }
}

/// A registered donor. Never updated once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonorRecord {
    pub name: String,
    pub phone: String,
    pub email: String,
    /// Free text, matched by substring only
    pub location: String,
    pub blood_group: BloodGroup,
    /// Telegram user id of whoever registered
    pub user_id: i64,
    pub registered_at: DateTime<Utc>,
}

impl DonorRecord {
    /// Case-insensitive substring match on the location.
    ///
    /// An empty needle matches every location.
    pub fn location_matches(&self, needle: &str) -> bool {
        self.location.to_lowercase().contains(&needle.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    fn donor(location: &str) -> DonorRecord {
        DonorRecord {
            name: "Test".to_string(),
            phone: "555".to_string(),
            email: "t@example.org".to_string(),
            location: location.to_string(),
            blood_group: BloodGroup::OPositive,
            user_id: 1,
            registered_at: Utc::now(),
        }
    }

    #[test]
    fn test_all_groups_in_selector_order() {
        let labels: Vec<&str> = BloodGroup::all().iter().map(|g| g.label()).collect();
        assert_eq!(labels, vec!["A+", "A-", "B+", "B-", "AB+", "AB-", "O+", "O-"]);
    }

    #[test]
    fn test_label_round_trips_through_from_str() {
        for group in BloodGroup::all() {
            assert_eq!(BloodGroup::from_str(group.label()).unwrap(), group);
            assert_eq!(group.to_string(), group.label());
            assert_eq!(group.as_ref(), group.label());
        }
    }

    #[test]
    fn test_unknown_group_rejected() {
        assert!(BloodGroup::from_str("C+").is_err());
        assert!(BloodGroup::from_str("ab-").is_err());
        assert!(BloodGroup::from_str("").is_err());
    }

    #[test]
    fn test_serde_uses_labels() {
        let json = serde_json::to_string(&BloodGroup::AbNegative).unwrap();
        assert_eq!(json, "\"AB-\"");
    }

    #[test]
    fn test_location_match_ignores_case() {
        let d = donor("Springfield, IL");
        assert!(d.location_matches("spring"));
        assert!(d.location_matches("SPRINGFIELD"));
        assert!(d.location_matches(", il"));
        assert!(!d.location_matches("Shelbyville"));
    }

    #[test]
    fn test_location_match_unicode() {
        let d = donor("Москва");
        assert!(d.location_matches("москва"));
        assert!(d.location_matches("МОСК"));
    }
}
