//! HTTP mapping of `ExError`

use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use recipebox_core::{ExError, ExErrorKind};
use recipebox_core_types::RequestId;

/// Handler error: any failure aborts the request with a status and a short
/// plain-text body; nothing is partially rendered.
#[derive(Debug)]
pub struct ApiError(pub ExError);

impl ApiError {
    /// Wrap an error raised while serving `request_id`
    pub fn for_request(err: impl Into<ExError>, request_id: &RequestId) -> Self {
        Self(err.into().with_request_id(request_id.clone()))
    }

    pub fn status(&self) -> StatusCode {
        status_for(self.0.kind())
    }
}

fn status_for(kind: ExErrorKind) -> StatusCode {
    match kind {
        ExErrorKind::NotFound => StatusCode::NOT_FOUND,
        ExErrorKind::InvalidInput | ExErrorKind::Serialization => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Response header carrying the id of the request that failed
pub const REQUEST_ID_HEADER: &str = "x-request-id";

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status = status_for(err.kind());
        let request_id = err
            .request_id()
            .map(|id| id.to_string())
            .unwrap_or_default();

        if status.is_server_error() {
            tracing::error!(
                err.code = err.code(),
                err.op = err.op().unwrap_or(""),
                request_id = request_id.as_str(),
                "{}",
                err
            );
        } else {
            tracing::warn!(
                err.code = err.code(),
                request_id = request_id.as_str(),
                "{}",
                err
            );
        }

        let body = format!("[{}] {}", err.code(), err.message());
        let mut response = (status, body).into_response();
        if !request_id.is_empty() {
            if let Ok(value) = HeaderValue::from_str(&request_id) {
                response.headers_mut().insert(REQUEST_ID_HEADER, value);
            }
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let status = |kind| ApiError(ExError::new(kind)).status();
        assert_eq!(status(ExErrorKind::NotFound), StatusCode::NOT_FOUND);
        assert_eq!(status(ExErrorKind::InvalidInput), StatusCode::BAD_REQUEST);
        assert_eq!(status(ExErrorKind::Serialization), StatusCode::BAD_REQUEST);
        assert_eq!(
            status(ExErrorKind::Transaction),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status(ExErrorKind::Statement),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_request_id_is_returned_as_header() {
        let id = RequestId::from_string("req-7".to_string());
        let err = ExError::new(ExErrorKind::NotFound).with_request_id(id);

        let response = ApiError(err).into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers()[REQUEST_ID_HEADER], "req-7");
    }

    #[test]
    fn test_no_header_without_request_id() {
        let err = ExError::new(ExErrorKind::Internal);
        let response = ApiError(err).into_response();
        assert!(response.headers().get(REQUEST_ID_HEADER).is_none());
    }
}
