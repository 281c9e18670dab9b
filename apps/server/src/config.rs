//! # Server Configuration
//!
//! Configuration loaded at startup from environment variables with fallback
//! to development defaults.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`DELIVERYPRO_*`, `IMAGE_API_*`)
//! 2. Defaults (this file)
//!
//! Configuration is read-only after initialization, so no mutex is needed.

use serde::{Deserialize, Serialize};

use deliverypro_core::DEFAULT_DELIVERY_FEE_CENTS;

/// Application configuration.
///
/// Most fields have sensible defaults for development; deployments override
/// them through the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// HTTP port the JSON API listens on.
    pub port: u16,

    /// The restaurant profile served to the storefront.
    pub restaurant: RestaurantInfo,

    /// Simulated latency of the mock order-submission backend, in ms.
    pub submit_delay_ms: u64,

    /// Simulated bot typing delay before a scripted chat reply, in ms.
    pub chat_reply_delay_ms: u64,

    /// Outbound image-generation gateway settings.
    pub image_gateway: ImageGatewayConfig,
}

/// Public restaurant profile (`GET /api/restaurant`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantInfo {
    pub name: String,
    pub description: String,
    pub address: String,
    pub phone: String,
    /// Delivery fee in centavos; seeds every storefront session's cart.
    pub delivery_fee_cents: i64,
    /// Minimum order value in centavos, shown on the storefront header.
    pub min_order_cents: i64,
    /// Display window, e.g. "30-45 min".
    pub delivery_time: String,
    pub rating: f64,
    pub review_count: u32,
    pub is_open: bool,
}

/// Settings for the outbound image-generation call.
#[derive(Debug, Clone)]
pub struct ImageGatewayConfig {
    /// Chat-completions endpoint of the multimodal gateway.
    pub api_url: String,

    /// Bearer token. When absent the image route answers 503 instead of
    /// forwarding anything.
    pub api_key: Option<String>,

    /// Model identifier sent upstream.
    pub model: String,
}

impl Default for AppConfig {
    /// Returns default configuration suitable for development.
    fn default() -> Self {
        AppConfig {
            port: 8080,
            restaurant: RestaurantInfo {
                name: "Pizzaria Demo".to_string(),
                description: "A melhor pizzaria da região! Massa artesanal, \
                              ingredientes frescos e sabores únicos."
                    .to_string(),
                address: "Rua das Flores, 123 - Vila Madalena, São Paulo - SP".to_string(),
                phone: "(11) 99999-9999".to_string(),
                delivery_fee_cents: DEFAULT_DELIVERY_FEE_CENTS,
                min_order_cents: 2500,
                delivery_time: "30-45 min".to_string(),
                rating: 4.8,
                review_count: 1247,
                is_open: true,
            },
            submit_delay_ms: 2000,
            chat_reply_delay_ms: 2000,
            image_gateway: ImageGatewayConfig {
                api_url: "https://ai.gateway.lovable.dev/v1/chat/completions".to_string(),
                api_key: None,
                model: "google/gemini-2.5-flash-image-preview".to_string(),
            },
        }
    }
}

impl AppConfig {
    /// Creates an AppConfig from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `DELIVERYPRO_PORT`: HTTP port (default 8080)
    /// - `DELIVERYPRO_RESTAURANT_NAME`: restaurant display name
    /// - `DELIVERYPRO_DELIVERY_FEE_CENTS`: delivery fee in centavos
    /// - `DELIVERYPRO_MIN_ORDER_CENTS`: minimum order in centavos
    /// - `DELIVERYPRO_SUBMIT_DELAY_MS`: mock backend latency
    /// - `DELIVERYPRO_CHAT_DELAY_MS`: bot typing delay
    /// - `IMAGE_API_URL`: image gateway endpoint override
    /// - `IMAGE_API_KEY`: image gateway token (route is 503 without it)
    /// - `IMAGE_MODEL`: image gateway model override
    pub fn from_env() -> Self {
        let mut config = AppConfig::default();

        if let Some(port) = parse_env("DELIVERYPRO_PORT") {
            config.port = port;
        }

        if let Ok(name) = std::env::var("DELIVERYPRO_RESTAURANT_NAME") {
            config.restaurant.name = name;
        }

        if let Some(fee) = parse_env("DELIVERYPRO_DELIVERY_FEE_CENTS") {
            config.restaurant.delivery_fee_cents = fee;
        }

        if let Some(min_order) = parse_env("DELIVERYPRO_MIN_ORDER_CENTS") {
            config.restaurant.min_order_cents = min_order;
        }

        if let Some(delay) = parse_env("DELIVERYPRO_SUBMIT_DELAY_MS") {
            config.submit_delay_ms = delay;
        }

        if let Some(delay) = parse_env("DELIVERYPRO_CHAT_DELAY_MS") {
            config.chat_reply_delay_ms = delay;
        }

        if let Ok(url) = std::env::var("IMAGE_API_URL") {
            config.image_gateway.api_url = url;
        }

        config.image_gateway.api_key = std::env::var("IMAGE_API_KEY").ok();

        if let Ok(model) = std::env::var("IMAGE_MODEL") {
            config.image_gateway.model = model;
        }

        config
    }
}

/// Reads and parses one environment variable, `None` when unset or invalid.
fn parse_env<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.restaurant.delivery_fee_cents, 590);
        assert_eq!(config.restaurant.min_order_cents, 2500);
        assert!(config.image_gateway.api_key.is_none());
    }
}
