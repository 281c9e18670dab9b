//! # Image Generation Client
//!
//! Outbound client for the multimodal gateway that renders menu photos.
//!
//! This is pure infrastructure glue: build the food-photography prompt,
//! forward it, pull the image URL out of the response. The only business
//! decisions here are the upstream error mappings (429 → rate limited,
//! 402 → out of credits), which the frontend shows verbatim.

use reqwest::StatusCode;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::ImageGatewayConfig;

/// Failures of the image-generation call.
#[derive(Debug, Error)]
pub enum ImageError {
    /// Upstream returned 429.
    #[error("image gateway rate limit exceeded")]
    RateLimited,

    /// Upstream returned 402.
    #[error("image gateway credits exhausted")]
    OutOfCredits,

    /// Upstream returned another non-success status.
    #[error("image gateway error: {0}")]
    Upstream(String),

    /// Upstream answered 200 but without an image in the payload.
    #[error("no image returned by the gateway")]
    NoImage,

    /// The request itself failed (DNS, TLS, timeout, body decode).
    #[error("image gateway request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// Client for the image-generation gateway.
#[derive(Debug, Clone)]
pub struct ImageClient {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl ImageClient {
    /// Builds a client from the gateway config.
    ///
    /// Returns `None` when no API key is configured; the route then answers
    /// 503 without attempting a call.
    pub fn from_config(config: &ImageGatewayConfig) -> Option<Self> {
        let api_key = config.api_key.clone()?;
        Some(ImageClient {
            client: reqwest::Client::new(),
            api_url: config.api_url.clone(),
            api_key,
            model: config.model.clone(),
        })
    }

    /// Generates a menu photo for a product and returns its URL.
    ///
    /// ## Errors
    /// See [`ImageError`]; 429 and 402 are mapped specifically so the menu
    /// form can explain what happened.
    pub async fn generate(
        &self,
        name: Option<&str>,
        description: &str,
    ) -> Result<String, ImageError> {
        let prompt = menu_photo_prompt(name, description);
        debug!(product = name.unwrap_or("produto"), "requesting menu image");

        let payload = json!({
            "model": self.model,
            "messages": [
                { "role": "user", "content": prompt }
            ],
            "modalities": ["image", "text"]
        });

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(ImageError::RateLimited);
        }
        if status == StatusCode::PAYMENT_REQUIRED {
            return Err(ImageError::OutOfCredits);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ImageError::Upstream(format!("{}: {}", status, body)));
        }

        let body: Value = response.json().await?;
        let image_url = body
            .pointer("/choices/0/message/images/0/image_url/url")
            .and_then(Value::as_str)
            .ok_or(ImageError::NoImage)?;

        info!(product = name.unwrap_or("produto"), "menu image generated");
        Ok(image_url.to_string())
    }
}

/// Builds the gastronomy-photo prompt sent upstream.
///
/// Portuguese on purpose: the gateway renders noticeably better plates when
/// the prompt matches the menu language.
pub fn menu_photo_prompt(name: Option<&str>, description: &str) -> String {
    let subject = match name {
        Some(name) => format!("{} - {}", name, description),
        None => description.to_string(),
    };
    format!(
        "Uma foto profissional de comida de alta qualidade, vista de cima, \
         bem iluminada para cardápio de restaurante: {}. Estilo fotografia \
         gastronômica, fundo limpo, cores vibrantes, apresentação apetitosa.",
        subject
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_includes_name_and_description() {
        let prompt = menu_photo_prompt(Some("Pizza Margherita"), "mussarela e manjericão");
        assert!(prompt.contains("Pizza Margherita - mussarela e manjericão"));
        assert!(prompt.contains("cardápio de restaurante"));
    }

    #[test]
    fn test_prompt_without_name() {
        let prompt = menu_photo_prompt(None, "mussarela e manjericão");
        assert!(prompt.contains(": mussarela e manjericão."));
        assert!(!prompt.contains(" - "));
    }

    #[test]
    fn test_client_requires_api_key() {
        let config = ImageGatewayConfig {
            api_url: "https://gateway.example/v1/chat/completions".to_string(),
            api_key: None,
            model: "test-model".to_string(),
        };
        assert!(ImageClient::from_config(&config).is_none());

        let with_key = ImageGatewayConfig {
            api_key: Some("secret".to_string()),
            ..config
        };
        assert!(ImageClient::from_config(&with_key).is_some());
    }
}
