//! Image generation and editing.

pub mod output;
mod provider;
pub mod providers;
mod types;
pub mod validate;

pub use output::{decode_base64_and_save, generate_filename, save_results, SaveReport};
pub use provider::ImageProvider;
pub use types::{
    is_png, ApiErrorBody, ApiErrorResponse, EditRequest, GenerationRequest, ImageData,
    ImageResponse, ImageSize, ResponseFormat, PNG_SIGNATURE,
};
