use rocket::http::Status;
use rocket::response::{self, Responder};
use rocket::serde::json::{json, Json};
use rocket::Request;
use thiserror::Error;

use std::sync::PoisonError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Todo not found")]
    NotFound,

    #[error("{0}")]
    Validation(String),

    #[error("database failure: {0}")]
    Store(#[from] rusqlite::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl<T> From<PoisonError<T>> for ApiError {
    fn from(e: PoisonError<T>) -> ApiError {
        ApiError::Internal(e.to_string())
    }
}

impl ApiError {
    /// Turns a rejected request body into a 422 carrying serde's message.
    pub fn from_json_error(error: rocket::serde::json::Error<'_>) -> ApiError {
        match error {
            rocket::serde::json::Error::Io(e) => {
                ApiError::Validation(format!("failed to read request body: {e}"))
            }
            rocket::serde::json::Error::Parse(_, e) => ApiError::Validation(e.to_string()),
        }
    }
}

impl<'r> Responder<'r, 'static> for ApiError {
    fn respond_to(self, request: &'r Request<'_>) -> response::Result<'static> {
        let (status, detail) = match &self {
            ApiError::NotFound => (Status::NotFound, self.to_string()),
            ApiError::Validation(message) => (Status::UnprocessableEntity, message.clone()),
            ApiError::Store(_) | ApiError::Internal(_) => {
                log::error!("request failed: {}", self);
                (Status::InternalServerError, "Internal server error".to_string())
            }
        };

        response::status::Custom(status, Json(json!({ "detail": detail }))).respond_to(request)
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
