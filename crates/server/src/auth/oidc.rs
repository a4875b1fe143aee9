// SPDX-License-Identifier: Apache-2.0

use crate::reply;

use std::ops::Deref;

use textbridge_type::{UserContext, UserProfile};

use axum::http::StatusCode;
use axum::response::Response;
use openidconnect::core::{CoreClient, CoreUserInfoClaims};
use openidconnect::ureq::http_client;
use openidconnect::AccessToken;
use tracing::{debug, error, trace};

/// Verified identity claims for one request.
#[repr(transparent)]
#[derive(Clone, Debug)]
pub struct Claims(CoreUserInfoClaims);

impl Deref for Claims {
    type Target = CoreUserInfoClaims;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Claims {
    /// Validates a bearer token against the identity provider's userinfo
    /// endpoint. A missing or empty token short-circuits to 401.
    pub fn verify(oidc: &CoreClient, token: Option<String>) -> Result<Self, Response> {
        let token = token.filter(|t| !t.is_empty()).ok_or_else(|| {
            debug!(target: "app::auth::oidc", "request carried no token");
            reply::error(StatusCode::UNAUTHORIZED, "Authentication required")
        })?;
        let token = AccessToken::new(token);

        let info_req = oidc.user_info(token, None).map_err(|e| {
            error!(target: "app::auth::oidc", "failed to construct user info request: {e}");
            reply::error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "OpenID Connect client initialization failed",
            )
        })?;

        trace!(target: "app::auth::oidc", "request user info");
        let claims = info_req.request(http_client).map_err(|e| {
            debug!(target: "app::auth::oidc", "failed to request user info: {e}");
            reply::error(
                StatusCode::UNAUTHORIZED,
                format!("OpenID Connect credential validation failed: {e}"),
            )
        })?;
        trace!(target: "app::auth::oidc", "received user claims: {:?}", claims);
        Ok(Self(claims))
    }

    /// The subject claim parsed into a store addressing context.
    pub fn context(&self) -> Result<UserContext, Response> {
        self.0.subject().as_str().parse().map_err(|e| {
            debug!(target: "app::auth::oidc", "unusable subject claim: {e}");
            reply::error(
                StatusCode::UNAUTHORIZED,
                format!("unusable identity subject: {e}"),
            )
        })
    }

    /// Profile claims captured into new records.
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            name: self
                .0
                .name()
                .and_then(|n| n.get(None))
                .map(|n| n.as_str().to_owned()),
            email: self.0.email().map(|e| e.as_str().to_owned()),
            picture: self
                .0
                .picture()
                .and_then(|p| p.get(None))
                .map(|p| p.as_str().to_owned()),
        }
    }
}
