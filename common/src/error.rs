//! HTTP-facing error type.

use axum::http::StatusCode;
use axum::response::{ IntoResponse, Response };
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::store::StoreError;
use crate::validation::ValidationErrors;

#[derive(Debug, Error)]
pub enum ApiError {
	#[error("Invalid ID format")]
	InvalidId,

	/// Body could not be parsed into a calculator payload.
	#[error("Invalid input data: {0}")]
	InvalidPayload(String),

	#[error("Invalid input data: {0}")]
	Validation(ValidationErrors),

	#[error("{0}")]
	NotFound(&'static str),

	#[error("Internal error: {0}")]
	Internal(String),
}

impl From<StoreError> for ApiError {
	fn from(err: StoreError) -> Self {
		match err {
			StoreError::Validation(errors) => ApiError::Validation(errors),
			other => ApiError::Internal(other.to_string()),
		}
	}
}

impl ApiError {
	pub fn status(&self) -> StatusCode {
		match self {
			ApiError::InvalidId | ApiError::InvalidPayload(_) | ApiError::Validation(_) =>
				StatusCode::BAD_REQUEST,
			ApiError::NotFound(_) => StatusCode::NOT_FOUND,
			ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let status = self.status();
		let body = match &self {
			ApiError::InvalidId => json!({ "error": "Invalid ID format" }),
			ApiError::InvalidPayload(details) => {
				json!({ "error": "Invalid input data", "details": details })
			}
			ApiError::Validation(errors) => {
				json!({ "error": "Invalid input data", "details": errors })
			}
			ApiError::NotFound(message) => json!({ "error": message }),
			ApiError::Internal(message) => {
				error!("Internal error: {}", message);
				json!({ "error": "Internal server error" })
			}
		};

		(status, Json(body)).into_response()
	}
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
