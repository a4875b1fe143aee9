// SPDX-License-Identifier: Apache-2.0

use super::super::{OidcClaims, Store, TokenPayload};

use textbridge_type::UserAccount;

use async_std::sync::Arc;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use openidconnect::core::CoreClient;
use serde_json::json;
use tracing::{debug, trace};

pub async fn verify(
    Extension(ref store): Extension<Arc<Store>>,
    Extension(ref oidc): Extension<CoreClient>,
    Json(TokenPayload { token }): Json<TokenPayload>,
) -> impl IntoResponse {
    trace!(target: "app::users::verify", "called");

    let claims = OidcClaims::verify(oidc, token)?;
    let cx = claims.context()?;
    let uid = cx.name.clone();

    store
        .user(&cx)
        .get_or_create(&claims.profile())
        .await
        .map_err(|e| {
            debug!(target: "app::users::verify", "failed for `{cx}`: {e:?}");
            e.into_response()
        })
        .map(|record| Json(json!({ "user": UserAccount { uid, record } })))
}
