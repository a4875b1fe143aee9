// SPDX-License-Identifier: Apache-2.0

mod name;
mod record;

pub use name::*;
pub use record::*;

use std::fmt::Display;
use std::str::FromStr;

use anyhow::Context as _;

/// Addressing context for one user's document in the store.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Context {
    pub name: Name,
}

impl From<Name> for Context {
    fn from(name: Name) -> Self {
        Self { name }
    }
}

impl FromStr for Context {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.parse().context("failed to parse user identifier")?;
        Ok(Self { name })
    }
}

impl Display for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
