// SPDX-License-Identifier: Apache-2.0

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use textbridge_server::url::Url;
use textbridge_server::{App, OcrConfig, OidcConfig};

use anyhow::Context as _;
use async_std::net::TcpListener;
use clap::Parser;
use confargs::{prefix_char_filter, Toml};
use futures::StreamExt;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

/// Server proxying authenticated text extraction requests to an OCR
/// provider.
///
/// Any command-line options listed here may be specified by one or
/// more configuration files, which can be used by passing the
/// name of the file on the command-line with the syntax `@config.toml`.
/// The configuration file must contain valid TOML table mapping argument
/// names to their values.
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// Address to bind to.
    #[clap(long, default_value_t = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 8080))]
    addr: SocketAddr,

    /// Path to the user-record store.
    #[clap(long)]
    store: PathBuf,

    /// OpenID Connect issuer URL.
    #[clap(long)]
    oidc_issuer: Url,

    /// OpenID Connect client ID.
    #[clap(long)]
    oidc_client: String,

    /// OpenID Connect secret.
    #[clap(long)]
    oidc_secret: Option<String>,

    /// Path to the default OCR provider service-account credentials.
    #[clap(long)]
    ocr_credentials: PathBuf,

    /// OCR provider endpoint override.
    #[clap(long)]
    ocr_endpoint: Option<Url>,
}

#[async_std::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = confargs::args::<Toml>(prefix_char_filter::<'@'>)
        .context("failed to parse config files")?;
    let Args {
        addr,
        store,
        oidc_issuer,
        oidc_client,
        oidc_secret,
        ocr_credentials,
        ocr_endpoint,
    } = Args::parse_from(args);

    let app = App::new(
        store,
        OidcConfig {
            issuer: oidc_issuer,
            client_id: oidc_client,
            client_secret: oidc_secret,
        },
        OcrConfig {
            credentials: ocr_credentials,
            endpoint: ocr_endpoint,
        },
    )
    .await
    .context("failed to build app")?;

    TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?
        .incoming()
        .for_each_concurrent(None, |stream| async {
            if let Err(e) = async {
                let stream = stream.context("failed to initialize connection")?;
                debug!(
                    target: "main",
                    "received TCP connection from {}",
                    stream
                        .peer_addr()
                        .map(|peer| peer.to_string())
                        .unwrap_or_else(|_| "unknown address".into())
                );
                app.handle(stream).await
            }
            .await
            {
                error!(target: "main", "failed to handle request: {e}");
            }
        })
        .await;
    Ok(())
}
