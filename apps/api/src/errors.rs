use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    /// HTTP-layer failure (malformed input, unknown route, wrong method).
    #[error("{status}: {message}")]
    Http { status: StatusCode, message: String },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn job_not_found() -> Self {
        AppError::NotFound("Job not found".to_string())
    }

    pub fn required_field(name: &str) -> Self {
        AppError::Validation(format!("Field '{name}' is required"))
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        AppError::Http {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

/// Renders the generic `{"error": <status name>, "message": ...}` body.
pub fn http_error_response(status: StatusCode, message: &str) -> Response {
    let name = status.canonical_reason().unwrap_or("Unknown Error");
    let body = Json(json!({
        "error": name,
        "message": message,
    }));
    (status, body).into_response()
}

/// Default description for a status when nothing more specific is known.
pub fn default_description(status: StatusCode) -> &'static str {
    match status {
        StatusCode::NOT_FOUND => {
            "The requested URL was not found on the server. If you entered the URL manually please check your spelling and try again."
        }
        StatusCode::METHOD_NOT_ALLOWED => "The method is not allowed for the requested URL.",
        StatusCode::PAYLOAD_TOO_LARGE => "The data value transmitted exceeds the capacity limit.",
        StatusCode::UNSUPPORTED_MEDIA_TYPE => {
            "Did not attempt to load JSON data because the request Content-Type was not 'application/json'."
        }
        StatusCode::BAD_REQUEST => {
            "The browser (or proxy) sent a request that this server could not understand."
        }
        _ if status.is_server_error() => {
            "The server encountered an internal error and was unable to complete your request."
        }
        _ => "The request could not be completed.",
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, Json(json!({ "error": msg }))).into_response()
            }
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": msg }))).into_response()
            }
            AppError::Http { status, message } => http_error_response(status, &message),
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                let status = StatusCode::INTERNAL_SERVER_ERROR;
                http_error_response(status, default_description(status))
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                let status = StatusCode::INTERNAL_SERVER_ERROR;
                http_error_response(status, default_description(status))
            }
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        let status = match rejection.status() {
            // Syntax and shape errors alike are plain bad requests.
            StatusCode::UNPROCESSABLE_ENTITY => StatusCode::BAD_REQUEST,
            other => other,
        };
        AppError::Http {
            status,
            message: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::bad_request(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(_: PathRejection) -> Self {
        // A path segment that is not a job id names no route at all.
        let status = StatusCode::NOT_FOUND;
        AppError::Http {
            status,
            message: default_description(status).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_validation_error_shape() {
        let response = AppError::required_field("title").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "Field 'title' is required" })
        );
    }

    #[tokio::test]
    async fn test_not_found_shape() {
        let response = AppError::job_not_found().into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await, json!({ "error": "Job not found" }));
    }

    #[tokio::test]
    async fn test_http_error_uses_status_name() {
        let response = AppError::bad_request("page must be a positive integer").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "Bad Request", "message": "page must be a positive integer" })
        );
    }

    #[tokio::test]
    async fn test_internal_error_hides_details() {
        let response = AppError::Internal(anyhow::anyhow!("disk on fire")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Internal Server Error");
        assert!(!body["message"].as_str().unwrap().contains("disk"));
    }
}
