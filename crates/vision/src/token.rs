// SPDX-License-Identifier: Apache-2.0

use super::{parse_ureq_error, Credentials};

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context as _, Result};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};

const GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";
const ASSERTION_LIFETIME: u64 = 3600;

#[derive(Debug, Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: u64,
    exp: u64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Exchanges a signed JWT assertion for a bearer access token at the
/// credential's token URI.
pub(crate) fn exchange(agent: &ureq::Agent, credentials: &Credentials) -> Result<String> {
    let key = EncodingKey::from_rsa_pem(credentials.private_key.as_bytes())
        .context("failed to parse credential private key")?;
    let iat = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("system clock before Unix epoch")?
        .as_secs();
    let claims = AssertionClaims {
        iss: &credentials.client_email,
        scope: SCOPE,
        aud: credentials.token_uri.as_str(),
        iat,
        exp: iat + ASSERTION_LIFETIME,
    };
    let assertion = jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &key)
        .context("failed to sign token assertion")?;

    let res = agent
        .post(credentials.token_uri.as_str())
        .send_form(&[("grant_type", GRANT_TYPE), ("assertion", &assertion)])
        .map_err(parse_ureq_error)?;
    let res: TokenResponse = res.into_json().context("failed to decode token response")?;
    Ok(res.access_token)
}
