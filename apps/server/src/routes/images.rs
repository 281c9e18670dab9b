//! # Image Generation Route
//!
//! The one proxy endpoint in the product: forwards a menu-photo request to
//! the external multimodal gateway and returns the generated image URL.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for `POST /api/images/generate`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateImageRequest {
    pub description: String,
    pub name: Option<String>,
}

/// Response: the URL of the generated image.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateImageResponse {
    pub image_url: String,
}

/// `POST /api/images/generate` - proxies one generation call.
///
/// ## Status codes
/// - 400 when the description is missing
/// - 503 when no gateway API key is configured
/// - 429 / 402 forwarded from the gateway's rate-limit / credit errors
pub async fn generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateImageRequest>,
) -> Result<Json<GenerateImageResponse>, ApiError> {
    if request.description.trim().is_empty() {
        return Err(ApiError::validation("Product description is required"));
    }

    let client = state
        .image_client()
        .ok_or_else(|| ApiError::unavailable("Image generation is not configured"))?;

    debug!(product = request.name.as_deref().unwrap_or("produto"), "image generation requested");

    let image_url = client
        .generate(request.name.as_deref(), request.description.trim())
        .await?;

    Ok(Json(GenerateImageResponse { image_url }))
}
