//! # Order Board Routes
//!
//! The operator's order board: listing, per-status counts, and the status
//! actions (accept, refuse, start preparing, ready, delivered).

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use tracing::debug;

use deliverypro_core::analytics::{status_breakdown, StatusCount};
use deliverypro_core::{Order, OrderStatus};

use crate::error::ApiError;
use crate::state::AppState;

/// Query parameters for the board listing.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrdersQuery {
    /// Restrict to one status tab.
    pub status: Option<OrderStatus>,
}

/// Request body for the status action.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    pub status: OrderStatus,
}

/// `GET /api/orders` - board listing, newest first.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<OrdersQuery>,
) -> Json<Vec<Order>> {
    debug!(?query, "orders list");
    Json(state.orders().list(query.status))
}

/// `GET /api/orders/summary` - per-status counts for the board header.
pub async fn summary(State(state): State<AppState>) -> Json<Vec<StatusCount>> {
    debug!("orders summary");
    Json(status_breakdown(&state.orders().all()))
}

/// `POST /api/orders/{id}/status` - one lifecycle move.
///
/// Illegal moves (e.g. delivered → preparing) answer 422 and change
/// nothing.
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<Order>, ApiError> {
    debug!(order = %id, status = request.status.as_str(), "order status update");

    let order = state.orders().transition(&id, request.status)?;
    Ok(Json(order))
}
