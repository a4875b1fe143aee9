// SPDX-License-Identifier: Apache-2.0

use super::{keys, ocr, text, usage, users, App, Store};

use std::path::PathBuf;

use textbridge_vision::Credentials;

use anyhow::{anyhow, Context};
use async_std::fs::File;
use async_std::sync::Arc;
use axum::routing::post;
use axum::{Extension, Router};
use cap_async_std::fs_utf8::Dir;
use std::path::Path;
use futures::lock::Mutex;
use futures::TryFutureExt;
use openidconnect::core::{CoreClient, CoreProviderMetadata};
use openidconnect::ureq::http_client;
use openidconnect::url::Url;
use openidconnect::{AuthType, ClientId, ClientSecret, IssuerUrl};

/// OpenID Connect client configuration.
#[derive(Debug)]
pub struct OidcConfig {
    pub issuer: Url,
    pub client_id: String,
    pub client_secret: Option<String>,
}

/// OCR provider configuration.
#[derive(Debug)]
pub struct OcrConfig {
    /// Path to the service-account credentials used on the free-tier
    /// path.
    pub credentials: PathBuf,

    /// Endpoint override; `None` selects the provider default.
    pub endpoint: Option<Url>,
}

/// [App] builder.
#[derive(Debug)]
pub struct Builder<S> {
    store: S,
    oidc: OidcConfig,
    ocr: OcrConfig,
}

impl<S: AsRef<Path>> Builder<S> {
    /// Constructs a new [Builder].
    pub fn new(store: S, oidc: OidcConfig, ocr: OcrConfig) -> Self {
        Self { store, oidc, ocr }
    }

    /// Builds the application.
    pub async fn build(self) -> anyhow::Result<App> {
        let store_path = self.store.as_ref();
        let store = File::open(store_path)
            .and_then(|f| Store::new(Dir::from_std_file(f)))
            .await
            .context(anyhow!(
                "failed to open store at `{}`",
                store_path.to_string_lossy()
            ))?;

        let credentials = Credentials::from_path(&self.ocr.credentials)
            .context("failed to load default OCR credentials")?;
        let provider = match self.ocr.endpoint {
            Some(endpoint) => ocr::Provider::with_endpoint(credentials, endpoint),
            None => ocr::Provider::new(credentials),
        };

        let oidc_md =
            CoreProviderMetadata::discover(&IssuerUrl::from_url(self.oidc.issuer), http_client)
                .context("failed to discover provider metadata")?;
        let oidc = CoreClient::from_provider_metadata(
            oidc_md,
            ClientId::new(self.oidc.client_id),
            self.oidc.client_secret.map(ClientSecret::new),
        )
        .set_auth_type(AuthType::RequestBody);

        Ok(App {
            make_service: Mutex::new(
                Router::new()
                    .route("/get-usage-stats", post(usage::get))
                    .route("/verify-firebase-token", post(users::verify))
                    .route("/save-api-key", post(keys::save))
                    .route("/clear-api-key", post(keys::clear))
                    .route("/extract-text", post(text::extract))
                    .layer(Extension(Arc::new(store)))
                    .layer(Extension(Arc::new(provider)))
                    .layer(Extension(oidc))
                    .into_make_service(),
            ),
        })
    }
}
