// SPDX-License-Identifier: Apache-2.0

use std::fmt::Display;
use std::str::FromStr;

use anyhow::anyhow;
use serde::{Deserialize, Serialize};

/// A stable user identifier issued by the identity provider.
///
/// The store derives document names from it, so it must always be a
/// single safe path segment.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[repr(transparent)]
pub struct Name(String);

impl Name {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Name {
    type Err = anyhow::Error;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            Err(anyhow!("empty user identifier"))
        } else if s
            .find(|c| !matches!(c, '0'..='9' | 'a'..='z' | 'A'..='Z' | '-' | '_'))
            .is_some()
        {
            Err(anyhow!("invalid characters in user identifier"))
        } else {
            Ok(Self(s.into()))
        }
    }
}

impl Display for Name {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_str() {
        assert!("".parse::<Name>().is_err());
        assert!(" ".parse::<Name>().is_err());
        assert!("/".parse::<Name>().is_err());
        assert!("uid/".parse::<Name>().is_err());
        assert!("../uid".parse::<Name>().is_err());
        assert!("u%id".parse::<Name>().is_err());
        assert!("u.id".parse::<Name>().is_err());

        assert_eq!("uid".parse::<Name>().unwrap(), Name("uid".into()));
        assert_eq!("u1D4".parse::<Name>().unwrap(), Name("u1D4".into()));
        assert_eq!("u-1_d".parse::<Name>().unwrap(), Name("u-1_d".into()));
    }
}
