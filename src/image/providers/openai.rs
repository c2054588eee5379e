//! OpenAI image provider (DALL-E generations and edits).

use crate::error::{sanitize_error_message, DalleError, Result};
use crate::image::provider::ImageProvider;
use crate::image::types::{ApiErrorResponse, EditRequest, GenerationRequest, ImageResponse};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use std::path::Path;
use std::time::Instant;

/// Default API root; endpoint paths are appended to it.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

const GENERATIONS_PATH: &str = "/images/generations";
const EDITS_PATH: &str = "/images/edits";

/// Builder for OpenAiImageProvider.
#[derive(Debug, Clone, Default)]
pub struct OpenAiImageProviderBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
}

impl OpenAiImageProviderBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key. Falls back to `OPENAI_API_KEY` env var.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the API root (default: `https://api.openai.com/v1`).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Builds the provider, resolving the API key.
    pub fn build(self) -> Result<OpenAiImageProvider> {
        let api_key = self
            .api_key
            .filter(|k| !k.is_empty())
            .or_else(|| std::env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty()))
            .ok_or_else(|| {
                DalleError::Auth("OPENAI_API_KEY not set and no API key provided".into())
            })?;

        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(OpenAiImageProvider {
            client: reqwest::Client::new(),
            api_key,
            base_url,
        })
    }
}

/// OpenAI image provider.
pub struct OpenAiImageProvider {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl OpenAiImageProvider {
    /// Creates a new `OpenAiImageProviderBuilder`.
    pub fn builder() -> OpenAiImageProviderBuilder {
        OpenAiImageProviderBuilder::new()
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn bearer(&self) -> String {
        format!("Bearer {}", self.api_key)
    }

    /// Reads the response, mapping non-2xx statuses to [`DalleError::Api`].
    async fn handle_response(&self, response: reqwest::Response) -> Result<ImageResponse> {
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(Self::parse_error(status, &text));
        }

        let body = response.bytes().await?;
        let image_response: ImageResponse = serde_json::from_slice(&body)?;
        Ok(image_response)
    }

    fn parse_error(status: reqwest::StatusCode, text: &str) -> DalleError {
        let reason = status.canonical_reason().unwrap_or("Unknown").to_string();
        match serde_json::from_str::<ApiErrorResponse>(text) {
            Ok(parsed) => DalleError::Api {
                status: status.as_u16(),
                reason,
                message: sanitize_error_message(&parsed.error.message),
                kind: parsed.error.kind,
            },
            Err(_) => DalleError::Api {
                status: status.as_u16(),
                reason,
                message: sanitize_error_message(text),
                kind: None,
            },
        }
    }

    /// Builds a file part whose contents are streamed from disk.
    async fn file_part(path: &Path) -> Result<Part> {
        let file = tokio::fs::File::open(path).await?;
        let len = file.metadata().await?.len();
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("image.png")
            .to_string();

        Part::stream_with_length(reqwest::Body::from(file), len)
            .file_name(file_name)
            .mime_str("image/png")
            .map_err(|e| DalleError::Validation(e.to_string()))
    }

    async fn edit_form(request: &EditRequest) -> Result<Form> {
        let mut form = Form::new().part("image", Self::file_part(&request.image).await?);
        if let Some(mask) = &request.mask {
            form = form.part("mask", Self::file_part(mask).await?);
        }
        Ok(form
            .text("prompt", request.prompt.clone())
            .text("n", request.n.to_string())
            .text("size", request.size.as_str())
            .text("response_format", request.response_format.as_str()))
    }
}

#[async_trait]
impl ImageProvider for OpenAiImageProvider {
    async fn generate(&self, request: &GenerationRequest) -> Result<ImageResponse> {
        let start = Instant::now();

        let response = self
            .client
            .post(self.endpoint(GENERATIONS_PATH))
            .header("Accept", "application/json")
            .header("Authorization", self.bearer())
            .json(request)
            .send()
            .await?;

        let result = self.handle_response(response).await;
        tracing::debug!(
            duration_ms = start.elapsed().as_millis() as u64,
            ok = result.is_ok(),
            "image generation request finished"
        );
        result
    }

    async fn edit(&self, request: &EditRequest) -> Result<ImageResponse> {
        let start = Instant::now();
        let form = Self::edit_form(request).await?;

        let response = self
            .client
            .post(self.endpoint(EDITS_PATH))
            .header("Authorization", self.bearer())
            .multipart(form)
            .send()
            .await?;

        let result = self.handle_response(response).await;
        tracing::debug!(
            duration_ms = start.elapsed().as_millis() as u64,
            ok = result.is_ok(),
            "image edit request finished"
        );
        result
    }

    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(DalleError::Api {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
                message: "failed to download image from URL".into(),
                kind: None,
            });
        }
        Ok(response.bytes().await?.to_vec())
    }

    fn name(&self) -> &str {
        "OpenAI (DALL-E)"
    }
}
