use axum::response::{IntoResponse, Response};
use http::StatusCode;
use tracing::error;
use validator::ValidationErrors;

use crate::service::error::StoreError;

#[derive(Debug)]
pub enum AppError {
    ResourceNotFound(String),
    ResourceAlreadyExists(String),
    UnknownReference(String),
    InvalidField(String),
    InternalServerError(anyhow::Error),
}

impl AppError {
    pub fn unknown_reference<T>(t: T) -> Self
    where
        T: ToString,
    {
        AppError::UnknownReference(t.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::ResourceNotFound(err) => (StatusCode::NOT_FOUND, err).into_response(),
            AppError::ResourceAlreadyExists(err) => (StatusCode::BAD_REQUEST, err).into_response(),
            AppError::UnknownReference(err) => (StatusCode::BAD_REQUEST, err).into_response(),
            AppError::InvalidField(err) => (StatusCode::BAD_REQUEST, err).into_response(),
            AppError::InternalServerError(err) => {
                error!("Internal server error: {:?}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
            }
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => AppError::ResourceNotFound(err.to_string()),
            StoreError::AlreadyExists { .. } => AppError::ResourceAlreadyExists(err.to_string()),
            StoreError::Database(_) => AppError::InternalServerError(err.into()),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errs: ValidationErrors) -> Self {
        let mut messages = vec![];
        for (field, errors) in errs.field_errors() {
            for err in errors.iter() {
                messages.push(match (err.params.get("max"), err.params.get("length")) {
                    (Some(max), Some(length)) => format!(
                        "The given {} is too long. Max length: {}, Length of given {}: {}",
                        field, max, field, length
                    ),
                    _ => format!("Invalid {}: {}", field, err),
                });
            }
        }
        messages.sort();
        AppError::InvalidField(messages.join("; "))
    }
}
