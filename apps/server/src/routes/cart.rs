//! # Cart Routes
//!
//! Session creation and cart manipulation for the storefront.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                   │
//! │                                                                     │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌───────────┐   │
//! │  │  Session │────►│ In Cart  │────►│ Checkout │────►│ Submitted │   │
//! │  │  opened  │     │          │     │  wizard  │     │   order   │   │
//! │  └──────────┘     └──────────┘     └──────────┘     └───────────┘   │
//! │                        │                                            │
//! │                   add_item                                          │
//! │                   update_item                                       │
//! │                   remove_item                                       │
//! │                        │                                            │
//! │                        ▼                                            │
//! │                   clear_cart ────────────────► (back to empty)      │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use deliverypro_core::error::CoreError;
use deliverypro_core::{CartItem, CartTotals};

use crate::error::ApiError;
use crate::state::{AppState, StorefrontSession};

/// Response for `POST /api/sessions`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionResponse {
    pub session_id: String,
}

/// Cart response including items and totals.
///
/// Totals respect the session's current delivery option, so a pickup
/// session never shows a delivery fee.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartItem>,
    pub totals: CartTotals,
}

impl CartResponse {
    fn from_session(session: &StorefrontSession) -> Self {
        CartResponse {
            items: session.cart.items.clone(),
            totals: session
                .cart
                .totals_for(session.checkout.data().delivery_option),
        }
    }
}

/// Request body for `POST .../cart/items`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemRequest {
    pub product_id: String,
}

/// Request body for `PATCH .../cart/items/{product_id}`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCartItemRequest {
    /// Absolute quantity; 0 removes the line.
    pub quantity: Option<i64>,
    /// Kitchen note; a blank string clears it.
    pub notes: Option<String>,
}

/// `POST /api/sessions` - opens a storefront session.
pub async fn create_session(State(state): State<AppState>) -> Json<CreateSessionResponse> {
    let session_id = state
        .sessions()
        .create(state.config().restaurant.delivery_fee_cents);

    info!(session = %session_id, "storefront session opened");
    Json(CreateSessionResponse { session_id })
}

/// `GET .../cart` - current cart contents and totals.
pub async fn get_cart(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<CartResponse>, ApiError> {
    debug!(session = %session_id, "get_cart");

    state
        .sessions()
        .with_session(&session_id, CartResponse::from_session)
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Session", &session_id))
}

/// `POST .../cart/items` - adds one unit of a product.
///
/// Adding an id already in the cart increments its quantity; the price is
/// frozen at first add.
pub async fn add_item(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(request): Json<AddItemRequest>,
) -> Result<Json<CartResponse>, ApiError> {
    debug!(session = %session_id, product = %request.product_id, "add_item");

    let product = state
        .catalog()
        .with_catalog(|c| c.get(&request.product_id).cloned())
        .ok_or_else(|| ApiError::not_found("Product", &request.product_id))?;

    let result = state
        .sessions()
        .with_session_mut(&session_id, |session| {
            session.cart.add_item(&product)?;
            Ok::<CartResponse, CoreError>(CartResponse::from_session(session))
        })
        .ok_or_else(|| ApiError::not_found("Session", &session_id))?;

    Ok(Json(result?))
}

/// `PATCH .../cart/items/{product_id}` - sets quantity and/or note.
///
/// Quantity 0 removes the line; an id no longer in the cart is a no-op.
pub async fn update_item(
    State(state): State<AppState>,
    Path((session_id, product_id)): Path<(String, String)>,
    Json(request): Json<UpdateCartItemRequest>,
) -> Result<Json<CartResponse>, ApiError> {
    debug!(session = %session_id, product = %product_id, ?request, "update_item");

    let result = state
        .sessions()
        .with_session_mut(&session_id, |session| {
            if let Some(quantity) = request.quantity {
                session.cart.update_quantity(&product_id, quantity)?;
            }
            if let Some(notes) = request.notes.clone() {
                let cleaned = Some(notes).filter(|n| !n.trim().is_empty());
                session.cart.set_item_notes(&product_id, cleaned);
            }
            Ok::<CartResponse, CoreError>(CartResponse::from_session(session))
        })
        .ok_or_else(|| ApiError::not_found("Session", &session_id))?;

    Ok(Json(result?))
}

/// `DELETE .../cart/items/{product_id}` - removes a line (no-op if absent).
pub async fn remove_item(
    State(state): State<AppState>,
    Path((session_id, product_id)): Path<(String, String)>,
) -> Result<Json<CartResponse>, ApiError> {
    debug!(session = %session_id, product = %product_id, "remove_item");

    state
        .sessions()
        .with_session_mut(&session_id, |session| {
            session.cart.remove_item(&product_id);
            CartResponse::from_session(session)
        })
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Session", &session_id))
}

/// `DELETE .../cart` - empties the cart.
pub async fn clear_cart(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<CartResponse>, ApiError> {
    debug!(session = %session_id, "clear_cart");

    state
        .sessions()
        .with_session_mut(&session_id, |session| {
            session.cart.clear();
            CartResponse::from_session(session)
        })
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Session", &session_id))
}
