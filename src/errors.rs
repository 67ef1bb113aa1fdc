//! # Error Handling
//!
//! Every failure a person query can produce is a [`QueryError`]. Validation
//! failures (sort, page, payload) are detected before the store is touched and
//! map to `400 Bad Request`; store failures map to `500` and are logged with
//! their full details while the caller only sees a sanitized message.
//!
//! ```rust,ignore
//! async fn handler(State(service): State<PersonService>) -> Result<Json<Vec<PersonDto>>, QueryError> {
//!     Ok(Json(service.find_all_persons().await?))
//! }
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde::Serialize;
use thiserror::Error;

use crate::person::PersonField;

#[derive(Debug, Error)]
pub enum QueryError {
    /// Sort direction text other than `asc`/`desc` (any case).
    #[error("Invalid sort direction '{0}': expected 'asc' or 'desc'")]
    InvalidSortDirection(String),

    /// Sort field that is not one of the sortable person fields.
    #[error("Invalid sort field '{0}': expected one of {fields}", fields = PersonField::wire_names().join(", "))]
    InvalidSortField(String),

    /// Negative page index or non-positive page size.
    #[error("Invalid page parameters: page={page}, size={size} (page must be >= 0, size must be >= 1)")]
    InvalidPageParameters { page: i64, size: i64 },

    /// Request body, path or query string that could not be decoded.
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// The store could not evaluate the query. Details are logged, not returned.
    #[error("Query execution failed: {0}")]
    QueryExecution(#[from] DbErr),
}

pub type QueryResult<T> = Result<T, QueryError>;

impl QueryError {
    pub(crate) fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidSortDirection(_)
            | Self::InvalidSortField(_)
            | Self::InvalidPageParameters { .. }
            | Self::InvalidPayload(_) => StatusCode::BAD_REQUEST,
            Self::QueryExecution(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The message sent to the caller.
    pub(crate) fn user_message(&self) -> String {
        match self {
            Self::QueryExecution(_) => "A database error occurred".to_string(),
            other => other.to_string(),
        }
    }

    fn log_internal(&self) {
        match self {
            Self::QueryExecution(internal) => {
                tracing::error!(error = ?internal, "Query execution failed");
            }
            _ => {
                tracing::debug!(
                    error = %self,
                    status = %self.status_code(),
                    "Rejected person query"
                );
            }
        }
    }
}

/// Error body returned to callers
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for QueryError {
    fn into_response(self) -> Response {
        self.log_internal();

        let status = self.status_code();
        let body = ErrorResponse {
            error: self.user_message(),
        };

        (status, Json(body)).into_response()
    }
}
