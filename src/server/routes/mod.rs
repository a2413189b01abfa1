mod categories;
mod questions;
mod quizzes;

pub use categories::category_router;
pub use questions::questions_router;
pub use quizzes::quizzes_router;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        FromRequest, FromRequestParts,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("bad request")]
    BadRequest,
    #[error("resource not found")]
    NotFound,
    #[error("method not allowed")]
    MethodNotAllowed,
    #[error("unprocessable")]
    Unprocessable,
    #[error("internal server error")]
    Database(#[from] sqlx::Error),
}

pub type ApiResponse<T> = Result<T, ApiError>;

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Unprocessable => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Database(error) = &self {
            tracing::error!(%error, "Database error");
        }
        let status = self.status();
        let body = json!({
            "success": false,
            "error": status.as_u16(),
            "message": self.to_string(),
        });
        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(%rejection, "Rejected request body");
        ApiError::BadRequest
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        tracing::debug!(%rejection, "Rejected query string");
        ApiError::BadRequest
    }
}

// path ids are typed in the route, so a non-integer id is an unknown resource
impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!(%rejection, "Rejected path");
        ApiError::NotFound
    }
}

#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

#[derive(Deserialize)]
pub struct PageQuery {
    page: Option<usize>,
}

impl PageQuery {
    pub fn page(&self) -> usize {
        self.page.unwrap_or(1)
    }
}

pub async fn not_found() -> ApiError {
    tracing::info!("Fallback");
    ApiError::NotFound
}

pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
