use axum::{
    body::to_bytes,
    http::header::{ALLOW, CONTENT_TYPE},
    response::Response,
};

use crate::errors::{default_description, http_error_response};

/// Plain-text error bodies larger than this are replaced by the default description.
const MAX_ERROR_BODY_BYTES: usize = 4096;

/// Renders every non-JSON error response in the `{"error", "message"}` shape.
///
/// Catches what never reaches a handler: unknown routes, wrong methods,
/// oversized bodies. Responses that are already JSON pass through untouched.
pub async fn render_http_errors(response: Response) -> Response {
    let status = response.status();
    if !(status.is_client_error() || status.is_server_error()) {
        return response;
    }

    let is_json = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/json"));
    if is_json {
        return response;
    }

    let (parts, body) = response.into_parts();
    let text = to_bytes(body, MAX_ERROR_BODY_BYTES)
        .await
        .map(|bytes| String::from_utf8_lossy(&bytes).trim().to_string())
        .unwrap_or_default();
    let message = if text.is_empty() {
        default_description(status)
    } else {
        text.as_str()
    };

    let mut rendered = http_error_response(status, message);
    if let Some(allow) = parts.headers.get(ALLOW) {
        rendered.headers_mut().insert(ALLOW, allow.clone());
    }
    rendered
}
