// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
#![deny(
    clippy::all,
    absolute_paths_not_starting_with_crate,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    noop_method_call,
    rust_2018_compatibility,
    rust_2018_idioms,
    rust_2021_compatibility,
    single_use_lifetimes,
    trivial_bounds,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_code,
    unreachable_patterns,
    unreachable_pub,
    unstable_features,
    unused,
    unused_import_braces,
    unused_lifetimes,
    unused_results
)]

mod builder;
mod ocr;
mod reply;

pub mod auth;
pub mod keys;
pub mod quota;
pub mod store;
pub mod text;
pub mod usage;
pub mod users;

pub use auth::{Claims as OidcClaims, TokenPayload};
pub use builder::*;
pub use ocr::Provider as OcrProvider;
pub(crate) use store::*;

pub use openidconnect::url;

use anyhow::Context as _;
use axum::routing::IntoMakeService;
use axum::Router;
use std::path::Path;
use futures::lock::Mutex;
use futures::{AsyncRead, AsyncWrite};
use hyper::server::conn::Http;
use tokio_util::compat::FuturesAsyncReadCompatExt;
use tower::MakeService;
use tracing::trace;

#[allow(missing_debug_implementations)] // IntoMakeService does not implement Debug
pub struct App {
    make_service: Mutex<IntoMakeService<Router>>,
}

impl App {
    pub fn builder<S: AsRef<Path>>(store: S, oidc: OidcConfig, ocr: OcrConfig) -> Builder<S> {
        Builder::new(store, oidc, ocr)
    }

    pub async fn new(
        store: impl AsRef<Path>,
        oidc: OidcConfig,
        ocr: OcrConfig,
    ) -> anyhow::Result<Self> {
        Self::builder(store, oidc, ocr).build().await
    }

    pub async fn handle(
        &self,
        stream: impl 'static + Unpin + AsyncRead + AsyncWrite,
    ) -> anyhow::Result<()> {
        let svc = self
            .make_service
            .lock()
            .await
            .make_service(())
            .await
            .context("failed to create app service")?;
        trace!(target: "app::App::handle", "begin HTTP request serving");
        Http::new()
            .serve_connection(stream.compat(), svc)
            .await
            .context("failed to handle request")
    }
}
