use std::sync::Arc;

use axum::{Json, extract::State};
use courier_optimizer::{
    json::types::{FromNetwork, JsonQuote},
    problem::order::Order,
};
use tracing::{debug, instrument};

use crate::{error::ApiError, state::AppState};

#[instrument(skip_all)]
pub async fn calculate_handler(
    State(state): State<Arc<AppState>>,
    Json(order): Json<Order>,
) -> Result<Json<JsonQuote>, ApiError> {
    debug!(items = order.len(), "Calculating minimum cost");

    let worker_state = state.clone();
    let quote =
        tokio::task::spawn_blocking(move || worker_state.optimizer.optimize(&order)).await??;

    Ok(Json(JsonQuote::from_network(
        &quote,
        state.optimizer.network(),
    )))
}
