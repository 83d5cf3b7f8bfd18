//! The fixed-shape resume record produced by normalization.
//!
//! Every field defaults to an empty string, empty list, or `false` instead
//! of being absent, so serialising a [`Resume`] always yields the same
//! top-level keys regardless of how badly the provider mangled its output.
//! The `#[serde(default)]` attributes make deserialisation just as total,
//! which is what keeps `normalize` idempotent across a serde round-trip.

use serde::{Deserialize, Serialize};

/// Structured resume data in its final, fully-defaulted shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resume {
    #[serde(default)]
    pub user_info: UserInfo,
    #[serde(default)]
    pub addresses: Vec<Address>,
    #[serde(default)]
    pub academic_education: Vec<Education>,
    #[serde(default)]
    pub employment: Vec<Employment>,
    #[serde(default)]
    pub skills: Vec<String>,
}

/// Identity and contact details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    #[serde(default)]
    pub name: String,
    /// ISO date (`YYYY-MM-DD`) when the model could determine one, else "".
    #[serde(default)]
    pub date_of_birth: String,
    /// Lowercased: "male", "female", "other", or "".
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone_number: String,
}

/// A postal address entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// Lowercased: "present", "permanent", or "".
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub post_name: String,
    #[serde(default)]
    pub post_code: String,
}

/// An academic education entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Education {
    /// Lowercased level tag, e.g. "bachelors", "masters", "hsc".
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub board: String,
    #[serde(default)]
    pub institute: String,
    #[serde(default)]
    pub passing_year: String,
    #[serde(default)]
    pub result: String,
}

/// An employment history entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employment {
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub company_type: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub joining_date: String,
    #[serde(default)]
    pub leaving_date: String,
    #[serde(default)]
    pub currently_working: bool,
    #[serde(default)]
    pub responsibility: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_record_has_all_top_level_keys() {
        let value = serde_json::to_value(Resume::default()).unwrap();
        let obj = value.as_object().unwrap();
        for key in [
            "user_info",
            "addresses",
            "academic_education",
            "employment",
            "skills",
        ] {
            assert!(obj.contains_key(key), "missing key: {key}");
        }
        assert_eq!(value["skills"], serde_json::json!([]));
        assert_eq!(value["user_info"]["name"], "");
    }

    #[test]
    fn address_type_field_renamed() {
        let addr = Address {
            kind: "present".into(),
            ..Default::default()
        };
        let value = serde_json::to_value(addr).unwrap();
        assert_eq!(value["type"], "present");
    }

    #[test]
    fn round_trip_preserves_record() {
        let resume = Resume {
            skills: vec!["Rust".into()],
            ..Default::default()
        };
        let json = serde_json::to_string(&resume).unwrap();
        let back: Resume = serde_json::from_str(&json).unwrap();
        assert_eq!(back, resume);
    }
}
