use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::translate::TranslateError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("A translation is already in progress for this session")]
    Busy,

    #[error(transparent)]
    Translate(#[from] TranslateError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::SessionNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Busy => StatusCode::CONFLICT,
            ApiError::Translate(TranslateError::MissingCredential) => StatusCode::UNAUTHORIZED,
            ApiError::Translate(TranslateError::EmptyInput) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Translate(TranslateError::ModelInit(_))
            | ApiError::Translate(TranslateError::CallFailed(_)) => StatusCode::BAD_GATEWAY,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::SessionNotFound(_) => "session_not_found",
            ApiError::Validation(_) => "validation",
            ApiError::Busy => "busy",
            ApiError::Translate(TranslateError::MissingCredential) => "missing_credential",
            ApiError::Translate(TranslateError::EmptyInput) => "empty_input",
            ApiError::Translate(TranslateError::ModelInit(_)) => "model_init",
            ApiError::Translate(TranslateError::CallFailed(_)) => "call_failed",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = json!({
            "error": self.to_string(),
            "kind": self.kind(),
        });
        (self.status(), Json(body)).into_response()
    }
}
