use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::QueryRejection;

/// Rejections raised by the shared extractors before a handler runs.
///
/// Handler-level failures live in the service's own error type; both render
/// the same `{"kind", "message"}` body.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("authentication credentials were not provided or are invalid")]
    Unauthorized,
    #[error("{0}")]
    BadRequest(String),
}

impl AppError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::BadRequest(_) => "BAD_REQUEST",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::debug!(kind = self.kind(), reason = %self, "request rejected");
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (self.status(), axum::Json(body)).into_response()
    }
}
