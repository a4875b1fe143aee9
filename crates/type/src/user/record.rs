// SPDX-License-Identifier: Apache-2.0

use super::Name;

use serde::{Deserialize, Serialize};

/// Identity claims captured when a record is first created.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Profile {
    pub name: Option<String>,
    pub email: Option<String>,
    pub picture: Option<String>,
}

/// A user record: quota accounting plus the optional user-supplied OCR
/// credential.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Record {
    #[serde(default, rename = "api_usage_count")]
    pub usage_count: u64,

    #[serde(default, rename = "custom_api_key")]
    pub custom_credential: Option<String>,

    #[serde(flatten)]
    pub profile: Profile,
}

impl Record {
    /// A fresh record for a first-seen identity.
    pub fn new(profile: Profile) -> Self {
        Self {
            usage_count: 0,
            custom_credential: None,
            profile,
        }
    }

    /// Whether a non-empty custom credential is set.
    pub fn has_custom_credential(&self) -> bool {
        matches!(self.custom_credential.as_deref(), Some(c) if !c.is_empty())
    }

    /// Free-tier calls left before the limit.
    pub fn remaining_uses(&self) -> u64 {
        crate::FREE_USAGE_LIMIT.saturating_sub(self.usage_count)
    }
}

/// A record qualified with its identifier, as returned by identity
/// verification.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Account {
    pub uid: Name,

    #[serde(flatten)]
    pub record: Record,
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    #[test]
    fn serialization() {
        let record = Record {
            usage_count: 3,
            custom_credential: None,
            profile: Profile {
                name: Some("Jane Roe".into()),
                email: Some("jane@example.com".into()),
                picture: None,
            },
        };

        let json = json!({
            "api_usage_count": 3,
            "custom_api_key": null,
            "name": "Jane Roe",
            "email": "jane@example.com",
            "picture": null,
        });

        assert_eq!(serde_json::to_value(&record).unwrap(), json);
        assert_eq!(serde_json::from_value::<Record>(json).unwrap(), record);
    }

    #[test]
    fn missing_fields_default() {
        let record: Record = serde_json::from_value(json!({})).unwrap();
        assert_eq!(record.usage_count, 0);
        assert_eq!(record.custom_credential, None);
        assert_eq!(record.profile, Profile::default());
    }

    #[test]
    fn remaining_uses_saturates() {
        let mut record = Record::new(Profile::default());
        record.usage_count = crate::FREE_USAGE_LIMIT + 2;
        assert_eq!(record.remaining_uses(), 0);
    }

    #[test]
    fn empty_credential_is_not_custom() {
        let mut record = Record::new(Profile::default());
        assert!(!record.has_custom_credential());
        record.custom_credential = Some(String::new());
        assert!(!record.has_custom_credential());
        record.custom_credential = Some(r#"{"type":"service_account"}"#.into());
        assert!(record.has_custom_credential());
    }
}
