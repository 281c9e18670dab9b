//! # Menu Routes
//!
//! Storefront menu queries plus the operator's menu-management edit.
//!
//! ## Menu Flow
//! ```text
//! Storefront                          Dashboard (Menu tab)
//! ──────────                          ────────────────────
//! GET /api/menu?category=Pizzas       PUT /api/menu/{id}
//! GET /api/menu?q=margherita            { priceCents, available, ... }
//! GET /api/menu/categories
//! ```

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use tracing::{debug, info};

use deliverypro_core::{MenuItemUpdate, Product};

use crate::error::ApiError;
use crate::state::AppState;

/// Query parameters for the menu listing.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuQuery {
    /// Restrict to one category.
    pub category: Option<String>,
    /// Restrict to products flagged popular.
    pub popular: Option<bool>,
    /// Case-insensitive search over name and description.
    pub q: Option<String>,
}

/// `GET /api/menu` - the filtered menu listing.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<MenuQuery>,
) -> Json<Vec<Product>> {
    debug!(?query, "menu list");

    let products = state.catalog().with_catalog(|catalog| {
        catalog
            .search(query.q.as_deref().unwrap_or(""))
            .into_iter()
            .filter(|p| query.category.as_ref().map_or(true, |c| &p.category == c))
            .filter(|p| query.popular.map_or(true, |popular| p.popular == popular))
            .cloned()
            .collect()
    });

    Json(products)
}

/// `GET /api/menu/categories` - category names in menu order.
pub async fn categories(State(state): State<AppState>) -> Json<Vec<String>> {
    debug!("menu categories");
    Json(state.catalog().with_catalog(|c| c.categories()))
}

/// `PUT /api/menu/{id}` - apply a menu-management edit.
///
/// Absent fields are untouched; see [`MenuItemUpdate`].
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(update): Json<MenuItemUpdate>,
) -> Result<Json<Product>, ApiError> {
    debug!(product = %id, "menu update");

    let product = state
        .catalog()
        .with_catalog_mut(|catalog| catalog.update(&id, update).map(Product::clone))?;

    info!(product = %product.id, name = %product.name, "menu item updated");
    Ok(Json(product))
}
