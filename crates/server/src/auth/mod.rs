// SPDX-License-Identifier: Apache-2.0

mod oidc;

pub use oidc::Claims;

use serde::Deserialize;

/// Request body carrying the bearer token; the wire contract takes the
/// token in the body rather than a header.
#[derive(Debug, Deserialize)]
pub struct TokenPayload {
    pub token: Option<String>,
}
