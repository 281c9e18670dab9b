//! # Analytics Route
//!
//! One composite report for the dashboard's Analytics and Overview tabs,
//! computed on demand from the order board.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::debug;

use deliverypro_core::analytics::{
    orders_by_hour, revenue_by_day, status_breakdown, summary, top_products, DailySales,
    HourlySales, ProductSales, SalesSummary, StatusCount,
};

use crate::state::AppState;

/// How many rows the product ranking carries.
const TOP_PRODUCTS_LIMIT: usize = 5;

/// The composite dashboard report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    pub summary: SalesSummary,
    pub status_breakdown: Vec<StatusCount>,
    pub top_products: Vec<ProductSales>,
    pub daily_revenue: Vec<DailySales>,
    pub orders_by_hour: Vec<HourlySales>,
}

/// `GET /api/analytics` - the full report.
pub async fn report(State(state): State<AppState>) -> Json<AnalyticsReport> {
    debug!("analytics report");

    let orders = state.orders().all();
    Json(AnalyticsReport {
        summary: summary(&orders),
        status_breakdown: status_breakdown(&orders),
        top_products: top_products(&orders, TOP_PRODUCTS_LIMIT),
        daily_revenue: revenue_by_day(&orders),
        orders_by_hour: orders_by_hour(&orders),
    })
}
