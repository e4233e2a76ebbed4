use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::models::{BusinessIntent, ErrorBody, ErrorEnvelope, ErrorKind};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("parsing error: {0}")]
    Parsing(String),

    #[error("CRM error: {0}")]
    Crm(String),
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Validation(_) => ErrorKind::ValidationError,
            AppError::Parsing(_) => ErrorKind::ParsingError,
            AppError::Crm(_) => ErrorKind::CrmError,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Parsing(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Crm(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn details(&self) -> &str {
        match self {
            AppError::Validation(d) | AppError::Parsing(d) | AppError::Crm(d) => d,
        }
    }

    pub fn envelope(&self) -> ErrorEnvelope {
        ErrorEnvelope {
            intent: BusinessIntent::Unknown,
            error: ErrorBody {
                kind: self.kind(),
                details: serde_json::Value::String(self.details().to_string()),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::warn!(kind = ?self.kind(), status = status.as_u16(), error = %self, "request failed");
        (status, axum::Json(self.envelope())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(AppError::Validation("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::Parsing("x".into()).status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(AppError::Crm("x".into()).status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_envelope_is_unknown_intent() {
        let json = serde_json::to_value(AppError::Crm("bad route".into()).envelope()).unwrap();
        assert_eq!(json["intent"], "UNKNOWN");
        assert_eq!(json["error"]["type"], "CRM_ERROR");
        assert_eq!(json["error"]["details"], "bad route");
    }

    #[tokio::test]
    async fn test_into_response_body() {
        let response = AppError::Validation("missing transcript".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"]["type"], "VALIDATION_ERROR");
    }
}
