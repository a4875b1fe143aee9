// SPDX-License-Identifier: Apache-2.0

#![warn(rust_2018_idioms, unused_lifetimes, unused_qualifications, clippy::all)]
#![forbid(unsafe_code)]

mod multipart;

pub use textbridge_type as types;

pub use anyhow::{Context, Result};
pub use url::Url;

use types::{Extraction, UsageStats, UserAccount};

use anyhow::{anyhow, bail};
use http::header::CONTENT_TYPE;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::json;

fn parse_ureq_error(e: ureq::Error) -> anyhow::Error {
    match e {
        ureq::Error::Status(code, msg) => match msg.into_string() {
            Ok(msg) if !msg.is_empty() => {
                anyhow!(msg).context(format!("request failed with status code `{code}`"))
            }
            _ => anyhow!("request failed with status code `{code}`"),
        },

        ureq::Error::Transport(e) => anyhow::Error::new(e).context("transport layer failure"),
    }
}

#[derive(Debug, Deserialize)]
struct VerifyResponse {
    user: UserAccount,
}

#[derive(Debug, Deserialize)]
struct AckResponse {
    success: bool,
    message: String,
}

#[derive(Debug)]
pub struct Client {
    inner: ureq::Agent,
    root: Url,
}

impl Client {
    pub fn builder(url: Url) -> ClientBuilder {
        ClientBuilder::new(url)
    }

    fn url(&self, path: &str) -> Result<Url> {
        self.root.join(path).context("failed to construct URL")
    }

    fn post_json<T>(&self, path: &str, body: impl Serialize) -> Result<T>
    where
        for<'de> T: Deserialize<'de>,
    {
        let url = self.url(path)?;
        let res = self
            .inner
            .post(url.as_str())
            .send_json(body)
            .map_err(parse_ureq_error)?;
        match StatusCode::from_u16(res.status()) {
            Ok(StatusCode::OK) => res.into_json().context("failed to decode JSON response"),
            _ => bail!("unexpected status code: {}", res.status()),
        }
    }

    /// Fetches quota usage for the bearer of `token`.
    pub fn usage_stats(&self, token: &str) -> Result<UsageStats> {
        self.post_json("get-usage-stats", json!({ "token": token }))
    }

    /// Validates `token` and returns the caller's account.
    pub fn verify(&self, token: &str) -> Result<UserAccount> {
        self.post_json("verify-firebase-token", json!({ "token": token }))
            .map(|res: VerifyResponse| res.user)
    }

    /// Stores `credential` as the caller's custom OCR credential.
    ///
    /// The blob is opaque to the service; it is only validated on first
    /// use.
    pub fn save_credential(&self, token: &str, credential: &str) -> Result<String> {
        let res: AckResponse = self.post_json(
            "save-api-key",
            json!({ "token": token, "apiKey": credential }),
        )?;
        if !res.success {
            bail!("credential save rejected: {}", res.message);
        }
        Ok(res.message)
    }

    /// Clears the caller's custom OCR credential.
    pub fn clear_credential(&self, token: &str) -> Result<String> {
        let res: AckResponse = self.post_json("clear-api-key", json!({ "token": token }))?;
        if !res.success {
            bail!("credential clear rejected: {}", res.message);
        }
        Ok(res.message)
    }

    /// Uploads `image` for text extraction on behalf of the bearer of
    /// `token`.
    pub fn extract_text(&self, token: &str, image: &[u8]) -> Result<Extraction> {
        let url = self.url("extract-text")?;
        let body = multipart::Body::new()
            .text("token", token)
            .file("image", "upload.png", "application/octet-stream", image)
            .finish();
        let res = self
            .inner
            .post(url.as_str())
            .set(CONTENT_TYPE.as_str(), &multipart::Body::content_type())
            .send_bytes(&body)
            .map_err(parse_ureq_error)?;
        match StatusCode::from_u16(res.status()) {
            Ok(StatusCode::OK) => res.into_json().context("failed to decode JSON response"),
            _ => bail!("unexpected status code: {}", res.status()),
        }
    }
}

pub struct ClientBuilder {
    inner: ureq::AgentBuilder,
    url: Url,
}

impl ClientBuilder {
    pub fn new(url: Url) -> Self {
        Self {
            inner: ureq::AgentBuilder::new(),
            url,
        }
    }

    pub fn build(self) -> Client {
        Client {
            inner: self.inner.build(),
            root: self.url,
        }
    }
}
