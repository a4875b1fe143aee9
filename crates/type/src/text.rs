// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

/// Result of a text extraction call.
///
/// `remaining_uses` is reported on the free-tier path only.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Extraction {
    pub text: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remaining_uses: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    #[test]
    fn serialization() {
        let extraction = Extraction {
            text: "TOTAL 12.50".into(),
            remaining_uses: Some(3),
        };
        assert_eq!(
            serde_json::to_value(&extraction).unwrap(),
            json!({ "text": "TOTAL 12.50", "remaining_uses": 3 })
        );

        let extraction = Extraction {
            text: "TOTAL 12.50".into(),
            remaining_uses: None,
        };
        assert_eq!(
            serde_json::to_value(&extraction).unwrap(),
            json!({ "text": "TOTAL 12.50" })
        );
    }
}
