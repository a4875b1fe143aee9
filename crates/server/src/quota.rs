// SPDX-License-Identifier: Apache-2.0

//! Decides whether an OCR request may proceed and on which credential.

use textbridge_type::{UserRecord, FREE_USAGE_LIMIT};

/// Outcome of resolving a user record against the free-usage policy.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Decision {
    /// Call the provider with the user's own credential; no accounting.
    UseCustom(String),

    /// Call the provider with the service default credential. The handler
    /// must record the use once the provider returns a non-error result,
    /// whether or not any text was recognized.
    UseFreeTier,

    /// The free usage limit is exhausted; no call is made.
    Deny,
}

/// Pure policy over the two record fields; performs no I/O and raises no
/// errors.
pub fn resolve(record: &UserRecord) -> Decision {
    match record.custom_credential.as_deref() {
        Some(credential) if !credential.is_empty() => Decision::UseCustom(credential.to_owned()),
        _ if record.usage_count < FREE_USAGE_LIMIT => Decision::UseFreeTier,
        _ => Decision::Deny,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use textbridge_type::UserProfile;

    fn record(usage_count: u64, custom_credential: Option<&str>) -> UserRecord {
        UserRecord {
            usage_count,
            custom_credential: custom_credential.map(Into::into),
            profile: UserProfile::default(),
        }
    }

    #[test]
    fn free_tier_below_limit() {
        for n in 0..FREE_USAGE_LIMIT {
            assert_eq!(resolve(&record(n, None)), Decision::UseFreeTier);
        }
    }

    #[test]
    fn denied_at_limit() {
        assert_eq!(resolve(&record(FREE_USAGE_LIMIT, None)), Decision::Deny);
        assert_eq!(resolve(&record(FREE_USAGE_LIMIT + 3, None)), Decision::Deny);
    }

    #[test]
    fn custom_credential_bypasses_quota() {
        let blob = r#"{"type":"service_account"}"#;
        assert_eq!(
            resolve(&record(0, Some(blob))),
            Decision::UseCustom(blob.into())
        );
        assert_eq!(
            resolve(&record(FREE_USAGE_LIMIT + 3, Some(blob))),
            Decision::UseCustom(blob.into())
        );
    }

    #[test]
    fn empty_credential_falls_back_to_free_tier() {
        assert_eq!(resolve(&record(0, Some(""))), Decision::UseFreeTier);
        assert_eq!(resolve(&record(FREE_USAGE_LIMIT, Some(""))), Decision::Deny);
    }
}
