//! API error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use category_cache::CategoryCacheError;
use orchestrator::WorkflowError;
use upstream::UpstreamError;

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Resource not found.
    NotFound(String),
    /// Bad request from the client.
    BadRequest(String),
    /// The transaction workflow was aborted.
    Workflow(WorkflowError),
    /// A proxied upstream read failed.
    Upstream(UpstreamError),
    /// Internal server error.
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Workflow(err) => return workflow_error_to_response(err),
            ApiError::Upstream(err) => (upstream_status(&err), err.to_string()),
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

/// Failed workflows answer `{ success: false, error, status }`, passing the
/// upstream status through when there is one.
fn workflow_error_to_response(err: WorkflowError) -> Response {
    let status = match &err {
        WorkflowError::Validation(_) => StatusCode::BAD_REQUEST,
        WorkflowError::FatalUpstream(upstream) => upstream_status(upstream),
    };

    let body = serde_json::json!({
        "success": false,
        "error": err.to_string(),
        "status": status.as_u16(),
    });
    (status, axum::Json(body)).into_response()
}

/// Upstream error statuses are passed through; anything that is not a valid
/// error status becomes 502.
fn upstream_status(err: &UpstreamError) -> StatusCode {
    err.status()
        .and_then(|code| StatusCode::from_u16(code).ok())
        .filter(|status| status.is_client_error() || status.is_server_error())
        .unwrap_or(StatusCode::BAD_GATEWAY)
}

impl From<WorkflowError> for ApiError {
    fn from(err: WorkflowError) -> Self {
        ApiError::Workflow(err)
    }
}

impl From<UpstreamError> for ApiError {
    fn from(err: UpstreamError) -> Self {
        ApiError::Upstream(err)
    }
}

impl From<CategoryCacheError> for ApiError {
    fn from(err: CategoryCacheError) -> Self {
        match err {
            CategoryCacheError::MissingTransactionId => ApiError::BadRequest(err.to_string()),
            CategoryCacheError::Backend(msg) => ApiError::Internal(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use upstream::Service;

    #[test]
    fn test_upstream_status_passthrough() {
        let err = UpstreamError::status_error(Service::TransactionProcessing, 422, "bad account");
        assert_eq!(upstream_status(&err), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_transport_errors_become_bad_gateway() {
        let err = UpstreamError::Transport {
            service: Service::TransactionProcessing,
            message: "timed out".to_string(),
        };
        assert_eq!(upstream_status(&err), StatusCode::BAD_GATEWAY);

        let odd = UpstreamError::status_error(Service::TransactionProcessing, 302, "");
        assert_eq!(upstream_status(&odd), StatusCode::BAD_GATEWAY);
    }
}
