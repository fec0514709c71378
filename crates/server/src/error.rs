use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use store::StoreError;

pub type ServerResult<T> = Result<T, ServerError>;

/// Body sent when a create request does not carry an anchor.
pub const NOT_ANCHOR_MESSAGE: &str = "not IAnchor!";

/// Server error types
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("{}", NOT_ANCHOR_MESSAGE)]
    NotAnchor,

    /// Request body that could not be decoded; answered like a store failure.
    #[error("{0}")]
    MalformedBody(String),

    /// Failure raised by the anchor store; the message goes out verbatim.
    #[error("{0}")]
    Store(#[from] StoreError),

    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Not found")]
    NotFound,
}

/// API error response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl ServerError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::NotAnchor => StatusCode::BAD_REQUEST,
            ServerError::NotFound => StatusCode::NOT_FOUND,
            ServerError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ServerError::MalformedBody(_) | ServerError::Store(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get error code string
    fn error_code(&self) -> &'static str {
        match self {
            ServerError::NotAnchor => "NOT_ANCHOR",
            ServerError::MalformedBody(_) => "MALFORMED_BODY",
            ServerError::Store(_) => "STORE_ERROR",
            ServerError::Unavailable(_) => "SERVICE_UNAVAILABLE",
            ServerError::NotFound => "NOT_FOUND",
        }
    }

    /// Anchor routes answer with the bare message as plain text.
    fn is_plain_text(&self) -> bool {
        matches!(
            self,
            ServerError::NotAnchor | ServerError::MalformedBody(_) | ServerError::Store(_)
        )
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();

        if self.is_plain_text() {
            return (status, message).into_response();
        }

        let body = Json(json!({
            "error": {
                "code": self.error_code(),
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

impl From<JsonRejection> for ServerError {
    fn from(rejection: JsonRejection) -> Self {
        ServerError::MalformedBody(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn parts(err: ServerError) -> (StatusCode, String) {
        let response = err.into_response();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn not_anchor_is_400_plain_text() {
        let (status, body) = parts(ServerError::NotAnchor).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, NOT_ANCHOR_MESSAGE);
    }

    #[tokio::test]
    async fn store_error_is_500_with_bare_message() {
        let (status, body) = parts(ServerError::Store(StoreError::Backend("boom".into()))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, "boom");
    }

    #[tokio::test]
    async fn malformed_body_is_500_with_bare_message() {
        let (status, body) = parts(ServerError::MalformedBody("missing field".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, "missing field");
    }

    #[tokio::test]
    async fn not_found_is_json_envelope() {
        let (status, body) = parts(ServerError::NotFound).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let parsed: ErrorResponse = serde_json::from_str(&body).unwrap();
        assert_eq!(parsed.error.code, "NOT_FOUND");
        assert_eq!(parsed.error.message, "Not found");
    }

    #[test]
    fn status_codes() {
        assert_eq!(
            ServerError::Unavailable("down".into()).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(ServerError::NotAnchor.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ServerError::MalformedBody("bad".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ServerError::Store(StoreError::Codec("bad".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
