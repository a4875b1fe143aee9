// SPDX-License-Identifier: Apache-2.0

#![warn(rust_2018_idioms, unused_lifetimes, unused_qualifications, clippy::all)]
#![forbid(unsafe_code)]

mod annotate;
mod credentials;
mod token;

pub use credentials::Credentials;

pub use anyhow::{Context, Result};
pub use url::Url;

use annotate::{AnnotateRequest, AnnotateResponse};

use anyhow::{anyhow, bail};

/// Stock OCR provider endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://vision.googleapis.com/";

pub(crate) fn parse_ureq_error(e: ureq::Error) -> anyhow::Error {
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

/// Blocking OCR provider client bound to one credential context.
///
/// A client is constructed from an explicit [Credentials] value and
/// consults no ambient process state, so callers can build one per
/// request and drop it afterwards.
#[derive(Debug)]
pub struct Client {
    inner: ureq::Agent,
    endpoint: Url,
    credentials: Credentials,
}

impl Client {
    pub fn builder(credentials: Credentials) -> ClientBuilder {
        ClientBuilder::new(credentials)
    }

    pub fn new(credentials: Credentials) -> Self {
        Self::builder(credentials).build()
    }

    fn url(&self, path: &str) -> Result<Url> {
        self.endpoint.join(path).context("failed to construct URL")
    }

    /// Requests text detection for `image` and returns the first
    /// recognized text block, if any.
    pub fn detect_text(&self, image: &[u8]) -> Result<Option<String>> {
        let token = token::exchange(&self.inner, &self.credentials)
            .context("failed to obtain access token")?;
        let url = self.url("v1/images:annotate")?;
        let res = self
            .inner
            .post(url.as_str())
            .set("Authorization", &format!("Bearer {token}"))
            .send_json(AnnotateRequest::text_detection(image))
            .map_err(parse_ureq_error)?;
        let res: AnnotateResponse = res
            .into_json()
            .context("failed to decode annotation response")?;

        let result = res.responses.into_iter().next().unwrap_or_default();
        if let Some(error) = result.error {
            bail!(
                "provider rejected the request: {} (code {})",
                error.message,
                error.code
            );
        }
        Ok(result
            .text_annotations
            .into_iter()
            .next()
            .map(|a| a.description))
    }
}

pub struct ClientBuilder {
    inner: ureq::AgentBuilder,
    endpoint: Option<Url>,
    credentials: Credentials,
}

impl ClientBuilder {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            inner: ureq::AgentBuilder::new(),
            endpoint: None,
            credentials,
        }
    }

    /// Overrides the provider endpoint.
    pub fn endpoint(mut self, endpoint: Url) -> Self {
        self.endpoint = Some(endpoint);
        self
    }

    pub fn build(self) -> Client {
        Client {
            inner: self.inner.build(),
            endpoint: self.endpoint.unwrap_or_else(|| {
                Url::parse(DEFAULT_ENDPOINT).expect("default endpoint is a valid URL")
            }),
            credentials: self.credentials,
        }
    }
}
