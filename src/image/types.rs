//! Core types for image generation and editing.

use crate::error::DalleError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

/// PNG file signature: 89 50 4E 47 0D 0A 1A 0A
pub const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// Returns true if the data starts with the PNG signature.
pub fn is_png(data: &[u8]) -> bool {
    data.starts_with(&PNG_SIGNATURE)
}

/// Output dimensions accepted by the image API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageSize {
    /// 256x256 pixels.
    #[serde(rename = "256x256")]
    Small,
    /// 512x512 pixels.
    #[default]
    #[serde(rename = "512x512")]
    Medium,
    /// 1024x1024 pixels.
    #[serde(rename = "1024x1024")]
    Large,
}

impl ImageSize {
    /// Returns the size as sent on the wire (e.g., "512x512").
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Small => "256x256",
            Self::Medium => "512x512",
            Self::Large => "1024x1024",
        }
    }
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ImageSize {
    type Err = DalleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "256x256" => Ok(Self::Small),
            "512x512" => Ok(Self::Medium),
            "1024x1024" => Ok(Self::Large),
            other => Err(DalleError::Validation(format!(
                "size must be one of 256x256, 512x512, 1024x1024 (got '{other}')"
            ))),
        }
    }
}

/// How the API should return each result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseFormat {
    /// A temporary URL pointing at the image.
    Url,
    /// The image inlined as base64.
    #[default]
    B64Json,
}

impl ResponseFormat {
    /// Returns the format as sent on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Url => "url",
            Self::B64Json => "b64_json",
        }
    }
}

impl std::fmt::Display for ResponseFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ResponseFormat {
    type Err = DalleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "url" => Ok(Self::Url),
            "b64_json" => Ok(Self::B64Json),
            other => Err(DalleError::Validation(format!(
                "response format must be one of url, b64_json (got '{other}')"
            ))),
        }
    }
}

/// A request to generate images from a text prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationRequest {
    /// The text prompt describing the desired image.
    pub prompt: String,
    /// Number of images to generate.
    pub n: u32,
    /// Output dimensions.
    pub size: ImageSize,
    /// How results are returned.
    pub response_format: ResponseFormat,
}

impl GenerationRequest {
    /// Creates a request for a single image with default size and format.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            n: 1,
            size: ImageSize::default(),
            response_format: ResponseFormat::default(),
        }
    }

    /// Sets the number of results.
    pub fn with_count(mut self, n: u32) -> Self {
        self.n = n;
        self
    }

    /// Sets the output dimensions.
    pub fn with_size(mut self, size: ImageSize) -> Self {
        self.size = size;
        self
    }

    /// Sets the response format.
    pub fn with_response_format(mut self, format: ResponseFormat) -> Self {
        self.response_format = format;
        self
    }
}

/// A request to edit an existing image, optionally restricted by a mask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditRequest {
    /// Source image (PNG on disk).
    pub image: PathBuf,
    /// Mask whose transparent areas mark the editable region.
    pub mask: Option<PathBuf>,
    /// The text prompt describing the edit.
    pub prompt: String,
    /// Number of images to generate.
    pub n: u32,
    /// Output dimensions.
    pub size: ImageSize,
    /// How results are returned.
    pub response_format: ResponseFormat,
}

impl EditRequest {
    /// Creates an edit request for a single result with default size and format.
    pub fn new(image: impl Into<PathBuf>, prompt: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            mask: None,
            prompt: prompt.into(),
            n: 1,
            size: ImageSize::default(),
            response_format: ResponseFormat::default(),
        }
    }

    /// Sets the mask image.
    pub fn with_mask(mut self, mask: impl Into<PathBuf>) -> Self {
        self.mask = Some(mask.into());
        self
    }

    /// Sets the number of results.
    pub fn with_count(mut self, n: u32) -> Self {
        self.n = n;
        self
    }

    /// Sets the output dimensions.
    pub fn with_size(mut self, size: ImageSize) -> Self {
        self.size = size;
        self
    }

    /// Sets the response format.
    pub fn with_response_format(mut self, format: ResponseFormat) -> Self {
        self.response_format = format;
        self
    }
}

/// Successful response from the generation and edit endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageResponse {
    /// Unix timestamp of the generation.
    pub created: i64,
    /// Results in the order the API returned them.
    #[serde(default)]
    pub data: Vec<ImageData>,
}

/// A single result; which field is set depends on the requested format.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageData {
    /// Temporary URL, set for `url` responses.
    #[serde(default)]
    pub url: Option<String>,
    /// Base64 payload, set for `b64_json` responses.
    #[serde(default)]
    pub b64_json: Option<String>,
    /// Prompt as rewritten by the API, when it reports one.
    #[serde(default)]
    pub revised_prompt: Option<String>,
}

/// Error envelope returned on non-success status codes.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    /// The error details.
    pub error: ApiErrorBody,
}

/// Message and category of an API error.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    /// Human-readable description.
    pub message: String,
    /// Error category (e.g., `invalid_request_error`).
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    /// Machine-readable code.
    #[serde(default)]
    pub code: Option<String>,
    /// Offending request parameter.
    #[serde(default)]
    pub param: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_from_str() {
        assert_eq!("256x256".parse::<ImageSize>().unwrap(), ImageSize::Small);
        assert_eq!("512x512".parse::<ImageSize>().unwrap(), ImageSize::Medium);
        assert_eq!("1024x1024".parse::<ImageSize>().unwrap(), ImageSize::Large);
        assert!("1792x1024".parse::<ImageSize>().is_err());
        assert!("".parse::<ImageSize>().is_err());
    }

    #[test]
    fn test_response_format_from_str() {
        assert_eq!("url".parse::<ResponseFormat>().unwrap(), ResponseFormat::Url);
        assert_eq!(
            "b64_json".parse::<ResponseFormat>().unwrap(),
            ResponseFormat::B64Json
        );
        let err = "base64".parse::<ResponseFormat>().unwrap_err();
        assert!(matches!(err, DalleError::Validation(_)));
    }

    #[test]
    fn test_generation_request_serialization() {
        let req = GenerationRequest::new("A sunset")
            .with_count(3)
            .with_size(ImageSize::Large);
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "prompt": "A sunset",
                "n": 3,
                "size": "1024x1024",
                "response_format": "b64_json",
            })
        );
    }

    #[test]
    fn test_response_deserialization() {
        let json = r#"{"created": 1589478378, "data": [{"b64_json": "AQID"}, {"url": "https://example.com/a.png"}]}"#;
        let resp: ImageResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.created, 1589478378);
        assert_eq!(resp.data.len(), 2);
        assert_eq!(resp.data[0].b64_json.as_deref(), Some("AQID"));
        assert!(resp.data[0].url.is_none());
        assert_eq!(resp.data[1].url.as_deref(), Some("https://example.com/a.png"));
    }

    #[test]
    fn test_error_response_deserialization() {
        let json = r#"{"error": {"message": "Invalid image", "type": "invalid_request_error", "param": null, "code": null}}"#;
        let resp: ApiErrorResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.error.message, "Invalid image");
        assert_eq!(resp.error.kind.as_deref(), Some("invalid_request_error"));
        assert!(resp.error.code.is_none());
    }

    #[test]
    fn test_is_png() {
        let mut data = PNG_SIGNATURE.to_vec();
        data.extend_from_slice(&[0, 0, 0, 13]);
        assert!(is_png(&data));
        assert!(!is_png(&[0xFF, 0xD8, 0xFF, 0xE0]));
        assert!(!is_png(&[]));
    }
}
