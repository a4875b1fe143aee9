// SPDX-License-Identifier: Apache-2.0

use super::super::{OidcClaims, Store, TokenPayload};

use textbridge_type::UsageStats;

use async_std::sync::Arc;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use openidconnect::core::CoreClient;
use tracing::{debug, trace};

pub async fn get(
    Extension(ref store): Extension<Arc<Store>>,
    Extension(ref oidc): Extension<CoreClient>,
    Json(TokenPayload { token }): Json<TokenPayload>,
) -> impl IntoResponse {
    trace!(target: "app::usage::get", "called");

    let claims = OidcClaims::verify(oidc, token)?;
    let cx = claims.context()?;

    store
        .user(&cx)
        .get_or_create(&claims.profile())
        .await
        .map_err(|e| {
            debug!(target: "app::usage::get", "failed for `{cx}`: {e:?}");
            e.into_response()
        })
        .map(|record| Json(UsageStats::from(&record)))
}
