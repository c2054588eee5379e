//! Writing API results to disk.

use crate::error::{DalleError, Result};
use crate::image::provider::ImageProvider;
use crate::image::types::{is_png, ImageData, ImageResponse, ResponseFormat};
use base64::Engine;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Longest file name stem, in bytes, kept from the prompt.
const MAX_STEM_BYTES: usize = 200;

/// Builds the output file name for the `index`-th result (1-based) of `prompt`.
///
/// Surrounding spaces are trimmed and the remaining spaces become underscores.
/// Path separators are replaced too, so the name never leaves the output directory.
/// The stem is cut at 200 bytes so the name fits common 255-byte limits.
pub fn generate_filename(prompt: &str, index: usize) -> String {
    let mut stem: String = prompt
        .trim_matches(' ')
        .chars()
        .map(|c| match c {
            ' ' | '/' | '\\' => '_',
            c => c,
        })
        .collect();
    let mut end = stem.len().min(MAX_STEM_BYTES);
    while !stem.is_char_boundary(end) {
        end -= 1;
    }
    stem.truncate(end);
    format!("{stem}_{index}.png")
}

/// Decodes a standard base64 payload and writes the bytes to `path`.
pub fn decode_base64_and_save(b64: &str, path: &Path) -> Result<()> {
    let data = base64::engine::general_purpose::STANDARD
        .decode(b64)
        .map_err(|e| DalleError::Decode(e.to_string()))?;
    write_image(&data, path)
}

fn write_image(data: &[u8], path: &Path) -> Result<()> {
    if !is_png(data) {
        tracing::warn!(path = %path.display(), "result does not look like a PNG, writing anyway");
    }
    let mut file = std::fs::File::create(path)?;
    file.write_all(data)?;
    file.sync_all()?;
    Ok(())
}

/// Outcome of writing a response to disk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveReport {
    /// Files written, in result order.
    pub saved: Vec<PathBuf>,
    /// Results that could not be written.
    pub failed: usize,
}

/// Writes every result in `response` to `output_dir`, one PNG per result.
///
/// A failing result is logged and skipped; the remaining results are still written.
pub async fn save_results(
    provider: &dyn ImageProvider,
    response: &ImageResponse,
    prompt: &str,
    format: ResponseFormat,
    output_dir: &Path,
) -> Result<SaveReport> {
    std::fs::create_dir_all(output_dir)?;

    let mut report = SaveReport::default();
    for (i, item) in response.data.iter().enumerate() {
        let filename = generate_filename(prompt, i + 1);
        let path = output_dir.join(&filename);

        match save_one(provider, item, format, &path).await {
            Ok(()) => {
                tracing::info!(path = %path.display(), "saved image");
                report.saved.push(path);
            }
            Err(e) => {
                tracing::error!(file = %filename, "failed to save image: {e}");
                report.failed += 1;
            }
        }
    }
    Ok(report)
}

async fn save_one(
    provider: &dyn ImageProvider,
    item: &ImageData,
    format: ResponseFormat,
    path: &Path,
) -> Result<()> {
    match format {
        ResponseFormat::B64Json => {
            let b64 = item.b64_json.as_deref().ok_or_else(|| {
                DalleError::UnexpectedResponse("result has no b64_json payload".into())
            })?;
            decode_base64_and_save(b64, path)
        }
        ResponseFormat::Url => {
            let url = item
                .url
                .as_deref()
                .ok_or_else(|| DalleError::UnexpectedResponse("result has no url".into()))?;
            let data = provider.fetch(url).await?;
            write_image(&data, path)
        }
    }
}
