use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use conversation_manager::HistoryError;
use serde::Serialize;
use thiserror::Error;

pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum AppError {
    /// No authenticated owner id on the request.
    #[error("Unauthenticated")]
    Unauthenticated,

    #[error(transparent)]
    History(#[from] HistoryError),
}

#[derive(Serialize)]
struct JsonError {
    message: String,
    r#type: String,
}

#[derive(Serialize)]
struct JsonErrorWrapper {
    error: JsonError,
}

impl AppError {
    fn kind(&self) -> &'static str {
        match self {
            AppError::Unauthenticated => "unauthenticated",
            AppError::History(HistoryError::Validation(_)) => "validation_error",
            AppError::History(HistoryError::NotFound) => "not_found",
            AppError::History(HistoryError::OutOfRange { .. }) => "out_of_range",
            AppError::History(HistoryError::Persistence(_)) => "persistence_error",
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AppError::History(HistoryError::Validation(_)) => StatusCode::BAD_REQUEST,
            AppError::History(HistoryError::NotFound) => StatusCode::NOT_FOUND,
            AppError::History(HistoryError::OutOfRange { .. }) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::History(HistoryError::Persistence(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error_response = JsonErrorWrapper {
            error: JsonError {
                message: self.to_string(),
                r#type: self.kind().to_string(),
            },
        };
        HttpResponse::build(self.status_code()).json(error_response)
    }
}
