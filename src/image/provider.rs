//! Image provider trait.

use crate::error::Result;
use crate::image::types::{EditRequest, GenerationRequest, ImageResponse};
use async_trait::async_trait;

/// Trait for image generation backends.
#[async_trait]
pub trait ImageProvider: Send + Sync {
    /// Generates images from a text prompt.
    async fn generate(&self, request: &GenerationRequest) -> Result<ImageResponse>;

    /// Edits a source image, optionally restricted by a mask.
    async fn edit(&self, request: &EditRequest) -> Result<ImageResponse>;

    /// Downloads the image behind a result URL.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;

    /// Returns the name of this provider for display.
    fn name(&self) -> &str;
}
