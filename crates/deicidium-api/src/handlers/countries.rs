//! Country reference list handler

use std::sync::Arc;

use axum::{extract::State, Json};
use deicidium_common::AppError;
use deicidium_core::Country;
use deicidium_service::CountryService;

use crate::response::ApiResult;
use crate::state::AppState;

/// Sorted country list, serialized straight from the shared cached copy
///
/// GET /api/countries
pub async fn list_countries(State(state): State<AppState>) -> ApiResult<Json<Arc<Vec<Country>>>> {
    let countries = CountryService::new(state.service_context())
        .fetch_countries()
        .await
        .ok_or_else(|| AppError::external("country list unavailable"))?;

    Ok(Json(countries))
}
