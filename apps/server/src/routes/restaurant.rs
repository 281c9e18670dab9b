//! # Restaurant Route
//!
//! The public restaurant profile shown on the storefront header.

use axum::extract::State;
use axum::Json;
use tracing::debug;

use crate::config::RestaurantInfo;
use crate::state::AppState;

/// `GET /api/restaurant` - the storefront header data.
pub async fn info(State(state): State<AppState>) -> Json<RestaurantInfo> {
    debug!("restaurant info");
    Json(state.config().restaurant.clone())
}
