// SPDX-License-Identifier: Apache-2.0

use super::super::{quota, OcrProvider, OidcClaims, Store};

use crate::quota::Decision;
use crate::reply;

use textbridge_type::Extraction;
use textbridge_vision::Credentials;

use async_std::sync::Arc;
use axum::extract::Multipart;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use openidconnect::core::CoreClient;
use serde_json::json;
use tracing::{debug, trace};

pub async fn extract(
    Extension(ref store): Extension<Arc<Store>>,
    Extension(ref oidc): Extension<CoreClient>,
    Extension(ref provider): Extension<Arc<OcrProvider>>,
    mut multipart: Multipart,
) -> Result<Response, Response> {
    trace!(target: "app::text::extract", "called");

    let mut image = None;
    let mut token = None;
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!(target: "app::text::extract", "malformed multipart body: {e}");
        reply::error(StatusCode::BAD_REQUEST, format!("malformed form data: {e}"))
    })? {
        let name = field.name().map(ToOwned::to_owned);
        match name.as_deref() {
            Some("image") => {
                image = Some(field.bytes().await.map_err(|e| {
                    reply::error(StatusCode::BAD_REQUEST, format!("failed to read image: {e}"))
                })?);
            }
            Some("token") => {
                token = Some(field.text().await.map_err(|e| {
                    reply::error(StatusCode::BAD_REQUEST, format!("failed to read token: {e}"))
                })?);
            }
            _ => {}
        }
    }

    // Image presence is checked before authentication; this ordering is
    // part of the wire contract.
    let image = image.ok_or_else(|| {
        debug!(target: "app::text::extract", "no image uploaded");
        reply::error(StatusCode::BAD_REQUEST, "No image uploaded")
    })?;

    let claims = OidcClaims::verify(oidc, token)?;
    let cx = claims.context()?;

    let user = store.user(&cx);
    let record = user.get().await.map_err(|e| {
        debug!(target: "app::text::extract", "failed for `{cx}`: {e:?}");
        e.into_response()
    })?;

    trace!(target: "app::text::extract", "image size: {} bytes", image.len());

    match quota::resolve(&record) {
        Decision::UseCustom(blob) => {
            let outcome = Credentials::from_json(&blob)
                .map(|credentials| provider.with_credentials(credentials))
                .and_then(|client| client.detect_text(&image));
            match outcome {
                Ok(Some(text)) => Ok(Json(Extraction {
                    text,
                    remaining_uses: None,
                })
                .into_response()),
                Ok(None) => {
                    debug!(target: "app::text::extract", "no text found for `{cx}`");
                    Err(reply::error(StatusCode::BAD_REQUEST, "No text found"))
                }
                Err(e) => {
                    debug!(target: "app::text::extract", "custom credential call failed for `{cx}`: {e:?}");
                    Err(reply::error(
                        StatusCode::BAD_REQUEST,
                        format!("Error with custom API key: {e:#}"),
                    ))
                }
            }
        }
        Decision::UseFreeTier => {
            let text = provider.free_tier().detect_text(&image).map_err(|e| {
                debug!(target: "app::text::extract", "provider call failed for `{cx}`: {e:?}");
                reply::error(StatusCode::INTERNAL_SERVER_ERROR, format!("{e:#}"))
            })?;

            // A non-error provider response is billed even when it
            // carried no text.
            let record = user.record_free_use(&record).await.map_err(|e| {
                debug!(target: "app::text::extract", "failed to record use for `{cx}`: {e:?}");
                e.into_response()
            })?;

            match text {
                Some(text) => Ok(Json(Extraction {
                    text,
                    remaining_uses: Some(record.remaining_uses()),
                })
                .into_response()),
                None => {
                    debug!(target: "app::text::extract", "no text found for `{cx}`");
                    Err(reply::error(StatusCode::BAD_REQUEST, "No text found"))
                }
            }
        }
        Decision::Deny => {
            debug!(target: "app::text::extract", "free usage limit reached for `{cx}`");
            Err((
                StatusCode::FORBIDDEN,
                Json(json!({
                    "error": "Free usage limit reached",
                    "limit_reached": true
                })),
            )
                .into_response())
        }
    }
}
