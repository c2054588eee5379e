//! Request validation, run before anything is sent to the API.

use crate::error::{DalleError, Result};
use crate::image::types::{EditRequest, GenerationRequest};
use std::path::Path;

/// Longest prompt accepted by the API, in characters.
pub const MAX_PROMPT_CHARS: usize = 1000;
/// Fewest results per request.
pub const MIN_RESULTS: u32 = 1;
/// Most results per request.
pub const MAX_RESULTS: u32 = 10;
/// Largest image or mask accepted by the edit endpoint (4MB).
pub const MAX_IMAGE_BYTES: u64 = 4_000_000;

/// Rejects empty prompts and prompts over [`MAX_PROMPT_CHARS`].
pub fn validate_prompt(prompt: &str) -> Result<()> {
    if prompt.trim().is_empty() {
        return Err(DalleError::Validation("prompt must not be empty".into()));
    }
    let chars = prompt.chars().count();
    if chars > MAX_PROMPT_CHARS {
        return Err(DalleError::Validation(format!(
            "prompt must be at most {MAX_PROMPT_CHARS} characters (got {chars})"
        )));
    }
    Ok(())
}

/// Rejects result counts outside `1..=10`.
pub fn validate_count(n: u32) -> Result<()> {
    if !(MIN_RESULTS..=MAX_RESULTS).contains(&n) {
        return Err(DalleError::Validation(format!(
            "number of results must be between {MIN_RESULTS} and {MAX_RESULTS} (got {n})"
        )));
    }
    Ok(())
}

/// Checks that `path` is a `.png` file no larger than [`MAX_IMAGE_BYTES`].
///
/// Only the extension and size are checked; dimensions are not inspected.
pub fn validate_image_file(path: &Path) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| {
        DalleError::Validation(format!("cannot read image {}: {e}", path.display()))
    })?;
    if !metadata.is_file() {
        return Err(DalleError::Validation(format!(
            "{} is not a file",
            path.display()
        )));
    }
    if path.extension().and_then(|e| e.to_str()) != Some("png") {
        return Err(DalleError::Validation(format!(
            "the image extension must be PNG ({})",
            path.display()
        )));
    }
    if metadata.len() > MAX_IMAGE_BYTES {
        return Err(DalleError::Validation(format!(
            "the size of the image must not exceed 4MB ({} is {} bytes)",
            path.display(),
            metadata.len()
        )));
    }
    Ok(())
}

impl GenerationRequest {
    /// Validates the prompt and result count.
    pub fn validate(&self) -> Result<()> {
        validate_prompt(&self.prompt)?;
        validate_count(self.n)
    }
}

impl EditRequest {
    /// Validates the text fields, then the image and mask files.
    pub fn validate(&self) -> Result<()> {
        validate_prompt(&self.prompt)?;
        validate_count(self.n)?;
        validate_image_file(&self.image)?;
        if let Some(mask) = &self.mask {
            validate_image_file(mask)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, len: usize) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(&vec![0u8; len]).unwrap();
        path
    }

    #[test]
    fn test_prompt_within_limit_is_accepted() {
        assert!(validate_prompt("Lionel Messi wearing a Boca Juniors jersey").is_ok());
        assert!(validate_prompt(&"a".repeat(MAX_PROMPT_CHARS)).is_ok());
    }

    #[test]
    fn test_prompt_over_limit_is_rejected() {
        let err = validate_prompt(&"a".repeat(MAX_PROMPT_CHARS + 1)).unwrap_err();
        assert!(matches!(err, DalleError::Validation(_)));
    }

    #[test]
    fn test_prompt_limit_counts_characters_not_bytes() {
        // 1000 two-byte characters
        assert!(validate_prompt(&"ñ".repeat(MAX_PROMPT_CHARS)).is_ok());
    }

    #[test]
    fn test_empty_prompt_is_rejected() {
        assert!(validate_prompt("").is_err());
        assert!(validate_prompt("   ").is_err());
    }

    #[test]
    fn test_count_bounds() {
        assert!(validate_count(0).is_err());
        assert!(validate_count(1).is_ok());
        assert!(validate_count(10).is_ok());
        assert!(validate_count(11).is_err());
    }

    #[test]
    fn test_png_under_limit_is_accepted() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "source.png", 1024);
        assert!(validate_image_file(&path).is_ok());

        let path = write_file(&dir, "exact.png", MAX_IMAGE_BYTES as usize);
        assert!(validate_image_file(&path).is_ok());
    }

    #[test]
    fn test_non_png_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "source.jpg", 1024);
        let err = validate_image_file(&path).unwrap_err();
        assert!(err.to_string().contains("PNG"));

        let path = write_file(&dir, "source", 1024);
        assert!(validate_image_file(&path).is_err());
    }

    #[test]
    fn test_oversized_png_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "big.png", MAX_IMAGE_BYTES as usize + 1);
        let err = validate_image_file(&path).unwrap_err();
        assert!(err.to_string().contains("4MB"));
    }

    #[test]
    fn test_missing_file_is_rejected() {
        let dir = TempDir::new().unwrap();
        assert!(validate_image_file(&dir.path().join("missing.png")).is_err());
    }

    #[test]
    fn test_edit_request_validates_mask() {
        let dir = TempDir::new().unwrap();
        let image = write_file(&dir, "image.png", 16);
        let mask = write_file(&dir, "mask.gif", 16);

        let req = EditRequest::new(&image, "add a hat");
        assert!(req.validate().is_ok());

        let req = req.with_mask(&mask);
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_generation_request_validation() {
        assert!(GenerationRequest::new("A sunset").with_count(3).validate().is_ok());
        assert!(GenerationRequest::new("A sunset").with_count(11).validate().is_err());
        assert!(GenerationRequest::new("").validate().is_err());
    }
}
