// SPDX-License-Identifier: Apache-2.0

use super::super::{OidcClaims, Store};

use async_std::sync::Arc;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use openidconnect::core::CoreClient;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, trace};

#[derive(Debug, Deserialize)]
pub struct SaveKey {
    pub token: Option<String>,

    #[serde(rename = "apiKey")]
    pub api_key: Option<String>,
}

pub async fn save(
    Extension(ref store): Extension<Arc<Store>>,
    Extension(ref oidc): Extension<CoreClient>,
    Json(SaveKey { token, api_key }): Json<SaveKey>,
) -> impl IntoResponse {
    trace!(target: "app::keys::save", "called");

    let claims = OidcClaims::verify(oidc, token)?;
    let cx = claims.context()?;

    // The blob is stored opaque; it is only validated on first use.
    store
        .user(&cx)
        .update(|record| record.custom_credential = api_key)
        .await
        .map_err(|e| {
            debug!(target: "app::keys::save", "failed for `{cx}`: {e:?}");
            e.into_response()
        })
        .map(|_| {
            Json(json!({
                "success": true,
                "message": "API key saved successfully"
            }))
        })
}
