use axum::Json;
use courier_optimizer::json::schema::generate_json_schemas;

use crate::error::ApiError;

pub async fn schema_handler() -> Result<Json<serde_json::Value>, ApiError> {
    Ok(Json(generate_json_schemas()?))
}
