//! # Routes Module
//!
//! All routes exposed to the React frontend.
//!
//! ## Route Organization
//! ```text
//! routes/
//! ├── mod.rs        ◄─── You are here (router assembly)
//! ├── restaurant.rs ◄─── Restaurant profile
//! ├── menu.rs       ◄─── Menu queries + menu management
//! ├── cart.rs       ◄─── Session creation + cart manipulation
//! ├── checkout.rs   ◄─── Wizard navigation + order submission
//! ├── orders.rs     ◄─── Operator order board
//! ├── analytics.rs  ◄─── Dashboard aggregations
//! ├── chat.rs       ◄─── WhatsApp simulation
//! └── images.rs     ◄─── Image-generation proxy
//! ```
//!
//! Handlers declare exactly the state they need through `State<AppState>`
//! accessors and return `Result<Json<T>, ApiError>`; the error type maps
//! itself to a status code and JSON body.

pub mod analytics;
pub mod cart;
pub mod chat;
pub mod checkout;
pub mod images;
pub mod menu;
pub mod orders;
pub mod restaurant;

use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Builds the full application router.
///
/// CORS is wide open, matching the original edge function: the demo
/// storefront may be served from anywhere.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health))
        // Restaurant profile
        .route("/api/restaurant", get(restaurant::info))
        // Menu
        .route("/api/menu", get(menu::list))
        .route("/api/menu/categories", get(menu::categories))
        .route("/api/menu/{id}", put(menu::update))
        // Storefront sessions: cart
        .route("/api/sessions", post(cart::create_session))
        .route(
            "/api/sessions/{session_id}/cart",
            get(cart::get_cart).delete(cart::clear_cart),
        )
        .route("/api/sessions/{session_id}/cart/items", post(cart::add_item))
        .route(
            "/api/sessions/{session_id}/cart/items/{product_id}",
            axum::routing::patch(cart::update_item).delete(cart::remove_item),
        )
        // Storefront sessions: checkout wizard
        .route("/api/sessions/{session_id}/checkout", get(checkout::get_state))
        .route(
            "/api/sessions/{session_id}/checkout/customer",
            put(checkout::update_customer),
        )
        .route(
            "/api/sessions/{session_id}/checkout/address",
            put(checkout::update_address),
        )
        .route(
            "/api/sessions/{session_id}/checkout/payment",
            put(checkout::update_payment),
        )
        .route(
            "/api/sessions/{session_id}/checkout/options",
            put(checkout::update_options),
        )
        .route(
            "/api/sessions/{session_id}/checkout/next",
            post(checkout::next_step),
        )
        .route(
            "/api/sessions/{session_id}/checkout/back",
            post(checkout::prev_step),
        )
        .route(
            "/api/sessions/{session_id}/checkout/goto",
            post(checkout::jump_to_step),
        )
        .route(
            "/api/sessions/{session_id}/checkout/submit",
            post(checkout::submit),
        )
        // Operator order board
        .route("/api/orders", get(orders::list))
        .route("/api/orders/summary", get(orders::summary))
        .route("/api/orders/{id}/status", post(orders::update_status))
        // Dashboard analytics
        .route("/api/analytics", get(analytics::report))
        // WhatsApp simulation
        .route("/api/chat/messages", get(chat::list).post(chat::send))
        // Image-generation proxy
        .route("/api/images/generate", post(images::generate))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Liveness probe.
async fn health() -> &'static str {
    "ok"
}
