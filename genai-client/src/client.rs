// Gemini image generation client

use crate::errors::ClientError;
use crate::wire::{error_message, GenerateContentRequest, GenerateContentResponse};
use async_trait::async_trait;
use outfit_stylist_core::{EncodedImage, ImageService, PromptPart, ServiceError};
use std::fmt;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-image";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Client for the Gemini `generateContent` endpoint, requesting image output
#[derive(Clone)]
pub struct GeminiImageClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GeminiImageClient {
    /// Create a client against the public endpoint with the default model
    pub fn new(api_key: impl Into<String>) -> Result<Self, ClientError> {
        Self::with_options(
            api_key,
            DEFAULT_BASE_URL,
            DEFAULT_MODEL,
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        )
    }

    /// Create a client with explicit endpoint, model and request timeout
    ///
    /// # Arguments
    /// * `base_url` - API root up to the version segment (e.g. ".../v1beta")
    /// * `model` - Image-capable model name
    /// * `timeout` - Per-request timeout
    pub fn with_options(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    /// Send one prompt and return the first image of the response
    pub async fn generate(&self, parts: &[PromptPart]) -> Result<Option<EncodedImage>, ClientError> {
        let body = GenerateContentRequest::image_only(parts);

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ClientError::Timeout
                } else {
                    ClientError::Network(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to read error body".to_string());
            return Err(ClientError::Api {
                status: status.as_u16(),
                message: error_message(&body_text),
            });
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))?;

        let image = parsed.into_first_image()?;
        tracing::debug!(
            model = %self.model,
            parts = parts.len(),
            returned_image = image.is_some(),
            "generateContent completed"
        );
        Ok(image)
    }
}

impl fmt::Debug for GeminiImageClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiImageClient")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

#[async_trait]
impl ImageService for GeminiImageClient {
    async fn generate_image(&self, parts: &[PromptPart]) -> Result<Option<EncodedImage>, ServiceError> {
        self.generate(parts).await.map_err(ServiceError::from)
    }
}
