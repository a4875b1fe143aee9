// SPDX-License-Identifier: Apache-2.0

use crate::user::Record;

use serde::{Deserialize, Serialize};

/// Quota usage as reported to the frontend.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Stats {
    pub api_usage_count: u64,
    pub remaining_uses: u64,
    pub has_custom_key: bool,
}

impl From<&Record> for Stats {
    fn from(record: &Record) -> Self {
        Self {
            api_usage_count: record.usage_count,
            remaining_uses: record.remaining_uses(),
            has_custom_key: record.has_custom_credential(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::user::Profile;

    use serde_json::json;

    #[test]
    fn derived_from_record() {
        let mut record = Record::new(Profile::default());
        record.usage_count = 2;
        let stats = Stats::from(&record);
        assert_eq!(stats.api_usage_count, 2);
        assert_eq!(stats.remaining_uses, 3);
        assert!(!stats.has_custom_key);
    }

    #[test]
    fn serialization() {
        let stats = Stats {
            api_usage_count: 4,
            remaining_uses: 1,
            has_custom_key: true,
        };

        assert_eq!(
            serde_json::to_value(stats).unwrap(),
            json!({
                "api_usage_count": 4,
                "remaining_uses": 1,
                "has_custom_key": true,
            })
        );
    }
}
