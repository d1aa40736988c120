use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use courier_optimizer::solver::optimizer::OptimizerError;
use serde_json::json;
use tokio::task::JoinError;
use tracing::{error, warn};

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    InternalServerError(String),
}

impl From<serde_json::Error> for ApiError {
    fn from(error: serde_json::Error) -> Self {
        ApiError::InternalServerError(error.to_string())
    }
}

impl From<JoinError> for ApiError {
    fn from(error: JoinError) -> Self {
        ApiError::InternalServerError(format!("computation did not complete: {error}"))
    }
}

impl From<OptimizerError> for ApiError {
    fn from(error: OptimizerError) -> Self {
        match error {
            OptimizerError::Validation(_) | OptimizerError::TooManyCenters { .. } => {
                ApiError::BadRequest(error.to_string())
            }
            OptimizerError::DataIntegrity(_) | OptimizerError::ThreadPool(_) => {
                ApiError::InternalServerError(error.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::BadRequest(detail) => {
                warn!(%detail, "Rejected request");
                (StatusCode::BAD_REQUEST, detail)
            }
            ApiError::InternalServerError(detail) => {
                error!(%detail, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, detail)
            }
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
