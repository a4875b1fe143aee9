// SPDX-License-Identifier: Apache-2.0

use super::super::{OidcClaims, Store, TokenPayload};

use async_std::sync::Arc;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use openidconnect::core::CoreClient;
use serde_json::json;
use tracing::{debug, trace};

pub async fn clear(
    Extension(ref store): Extension<Arc<Store>>,
    Extension(ref oidc): Extension<CoreClient>,
    Json(TokenPayload { token }): Json<TokenPayload>,
) -> impl IntoResponse {
    trace!(target: "app::keys::clear", "called");

    let claims = OidcClaims::verify(oidc, token)?;
    let cx = claims.context()?;

    store
        .user(&cx)
        .update(|record| record.custom_credential = None)
        .await
        .map_err(|e| {
            debug!(target: "app::keys::clear", "failed for `{cx}`: {e:?}");
            e.into_response()
        })
        .map(|_| {
            Json(json!({
                "success": true,
                "message": "API key cleared successfully"
            }))
        })
}
