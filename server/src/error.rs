use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use collab_system::UnsupportedLanguage;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompileError {
    #[error("Code and language are required")]
    MissingFields,
    #[error("Empty code submission")]
    EmptySubmission,
    #[error(transparent)]
    UnsupportedLanguage(#[from] UnsupportedLanguage),
    /// The cause is logged, never sent to the client.
    #[error("Failed to process code")]
    Unreadable(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl ResponseError for CompileError {
    fn status_code(&self) -> StatusCode {
        match self {
            CompileError::Unreadable(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let CompileError::Unreadable(cause) = self {
            log::error!("Compilation error: {}", cause);
        }
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.to_string(),
        })
    }
}
