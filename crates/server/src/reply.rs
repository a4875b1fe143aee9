// SPDX-License-Identifier: Apache-2.0

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// JSON error envelope; every error response carries an `error` string.
pub(crate) fn error(code: StatusCode, message: impl AsRef<str>) -> Response {
    (code, Json(json!({ "error": message.as_ref() }))).into_response()
}
