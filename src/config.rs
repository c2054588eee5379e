//! Built-in defaults for the command-line programs.
//!
//! Running either program without arguments sends exactly these values.

use crate::image::{EditRequest, GenerationRequest, ImageSize, ResponseFormat};
use std::path::PathBuf;

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
/// Environment variable overriding the API root.
pub const BASE_URL_ENV: &str = "OPENAI_BASE_URL";

/// Results requested per run.
pub const DEFAULT_COUNT: u32 = 3;
/// Requested output dimensions.
pub const DEFAULT_SIZE: ImageSize = ImageSize::Medium;
/// Requested response format.
pub const DEFAULT_RESPONSE_FORMAT: ResponseFormat = ResponseFormat::B64Json;
/// Directory the results are written to.
pub const DEFAULT_OUTPUT_DIR: &str = "./output/";

/// Defaults for `generate-image`.
#[derive(Debug, Clone)]
pub struct GenerateDefaults {
    /// Text prompt.
    pub prompt: &'static str,
    /// Number of results.
    pub n: u32,
    /// Output dimensions.
    pub size: ImageSize,
    /// Response format.
    pub response_format: ResponseFormat,
    /// Where results are written.
    pub output_dir: PathBuf,
}

impl Default for GenerateDefaults {
    fn default() -> Self {
        Self {
            prompt: "Lionel Messi wearing a Boca Juniors jersey",
            n: DEFAULT_COUNT,
            size: DEFAULT_SIZE,
            response_format: DEFAULT_RESPONSE_FORMAT,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

impl GenerateDefaults {
    /// Builds the request these defaults describe.
    pub fn request(&self) -> GenerationRequest {
        GenerationRequest::new(self.prompt)
            .with_count(self.n)
            .with_size(self.size)
            .with_response_format(self.response_format)
    }
}

/// Defaults for `edit-image`.
#[derive(Debug, Clone)]
pub struct EditDefaults {
    /// Text prompt describing the edit.
    pub prompt: &'static str,
    /// Source image.
    pub image: PathBuf,
    /// Mask image.
    pub mask: Option<PathBuf>,
    /// Number of results.
    pub n: u32,
    /// Output dimensions.
    pub size: ImageSize,
    /// Response format.
    pub response_format: ResponseFormat,
    /// Where results are written.
    pub output_dir: PathBuf,
}

impl Default for EditDefaults {
    fn default() -> Self {
        Self {
            prompt: "write the name 'John' and the number 9 on the jersey as a soccer jersey using Times New Roman Font.",
            image: PathBuf::from("./images/boca_blanca.png"),
            mask: Some(PathBuf::from("./images/mask_boca_blanca.png")),
            n: DEFAULT_COUNT,
            size: DEFAULT_SIZE,
            response_format: DEFAULT_RESPONSE_FORMAT,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

impl EditDefaults {
    /// Builds the request these defaults describe.
    pub fn request(&self) -> EditRequest {
        let request = EditRequest::new(&self.image, self.prompt)
            .with_count(self.n)
            .with_size(self.size)
            .with_response_format(self.response_format);
        match &self.mask {
            Some(mask) => request.with_mask(mask),
            None => request,
        }
    }
}
