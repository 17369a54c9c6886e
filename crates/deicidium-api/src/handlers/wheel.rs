//! Wheel relay handler

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde_json::Value;

use deicidium_service::WheelRelay;

use crate::extractors::json_rejection;
use crate::response::{ApiResult, Relayed};
use crate::state::AppState;

/// Forward a wheel to the raffle API, moving `apiKey` into the `x-api-key` header
///
/// POST /api/wheel
pub async fn create_wheel(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Relayed> {
    let Json(body) = body.map_err(json_rejection)?;

    let response = WheelRelay::new(state.service_context()).forward(body).await?;
    Ok(Relayed(response))
}
