#![warn(missing_docs)]
//! Generate and edit images with the OpenAI image API.
//!
//! The crate backs two command-line programs, `generate-image` and
//! `edit-image`. Each validates its input, sends one request, and writes every
//! returned image to disk as `<prompt_with_underscores>_<n>.png`.
//!
//! # Quick Start
//!
//! ```no_run
//! use dalle_tools::{run_generation, GenerationRequest, OpenAiImageProvider};
//! use std::path::Path;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> dalle_tools::Result<()> {
//!     let provider = OpenAiImageProvider::builder().build()?;
//!     let request = GenerationRequest::new("A golden retriever puppy").with_count(2);
//!     run_generation(&provider, &request, Path::new("./output")).await?;
//!     Ok(())
//! }
//! ```
//!
//! # Features
//!
//! - `cli` (default): the two binaries and their log subscriber.

pub mod config;
mod error;
pub mod image;
#[cfg(feature = "cli")]
#[doc(hidden)]
pub mod logging;
mod run;

pub use error::{DalleError, Result};
pub use image::providers::{OpenAiImageProvider, OpenAiImageProviderBuilder};
pub use image::{
    EditRequest, GenerationRequest, ImageProvider, ImageResponse, ImageSize, ResponseFormat,
    SaveReport,
};
pub use run::{json_summary, run_edit, run_generation, RunOutcome};
