use crate::storage::StorageError;
use crate::validation::ValidationErrors;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("{message}")]
    Conflict { count: i64, message: String },

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("database connection lock poisoned")]
    LockPoisoned,
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(errors)
    }
}

impl AppError {
    /// Guard refusal for a package that still has `count` clients linked to it.
    pub fn package_in_use(count: i64) -> Self {
        AppError::Conflict {
            count,
            message: format!(
                "Package cannot be deleted because it is still used by {} client(s). \
                 Change the clients' package first.",
                count
            ),
        }
    }
}

/// Plain-text rendering for errors that end a request. Form handlers turn
/// `Validation`, `Conflict` and `Storage` into flash messages first (see
/// `services::flash::redirect_back`); their arms here only apply when such an
/// error is returned directly, as with any other `actix_web::Error`.
impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Storage(_)
            | AppError::Database(_)
            | AppError::LockPoisoned => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::Database(_) | AppError::LockPoisoned => {
                log::error!("{}", self);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };
        HttpResponse::build(self.status_code())
            .content_type("text/plain; charset=utf-8")
            .body(body)
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
