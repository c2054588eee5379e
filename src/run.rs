//! End-to-end flow shared by the command-line programs: validate, call, save.

use crate::error::{DalleError, Result};
use crate::image::{save_results, EditRequest, GenerationRequest, ImageProvider, SaveReport};
use std::path::Path;

/// How a run ended when no hard error occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The API accepted the request; results were written.
    Completed(SaveReport),
    /// The API answered with an error status; nothing was written.
    Rejected {
        /// HTTP status code.
        status: u16,
        /// API error message.
        message: String,
    },
}

/// Validates `request`, generates images and writes them to `output_dir`.
///
/// Validation and transport failures are returned as errors. An error response
/// from the API is logged and reported as [`RunOutcome::Rejected`].
pub async fn run_generation(
    provider: &dyn ImageProvider,
    request: &GenerationRequest,
    output_dir: &Path,
) -> Result<RunOutcome> {
    request.validate()?;
    tracing::info!(
        provider = provider.name(),
        n = request.n,
        size = %request.size,
        response_format = %request.response_format,
        "requesting image generation"
    );

    let response = match provider.generate(request).await {
        Ok(response) => response,
        Err(e) => return rejected_or_err(e),
    };
    tracing::debug!(
        created = response.created,
        results = response.data.len(),
        "received response"
    );

    let report = save_results(
        provider,
        &response,
        &request.prompt,
        request.response_format,
        output_dir,
    )
    .await?;
    Ok(RunOutcome::Completed(report))
}

/// Validates `request` (including the image and mask files), edits the image
/// and writes the results to `output_dir`.
pub async fn run_edit(
    provider: &dyn ImageProvider,
    request: &EditRequest,
    output_dir: &Path,
) -> Result<RunOutcome> {
    request.validate()?;
    tracing::info!(
        provider = provider.name(),
        image = %request.image.display(),
        mask = ?request.mask,
        n = request.n,
        size = %request.size,
        response_format = %request.response_format,
        "requesting image edit"
    );

    let response = match provider.edit(request).await {
        Ok(response) => response,
        Err(e) => return rejected_or_err(e),
    };
    tracing::debug!(
        created = response.created,
        results = response.data.len(),
        "received response"
    );

    let report = save_results(
        provider,
        &response,
        &request.prompt,
        request.response_format,
        output_dir,
    )
    .await?;
    Ok(RunOutcome::Completed(report))
}

/// Machine-readable summary of a run, printed by the programs' `--json` flag.
///
/// Every outcome, including hard errors, yields an object with a `success` field.
pub fn json_summary(operation: &str, outcome: &Result<RunOutcome>) -> serde_json::Value {
    match outcome {
        Ok(RunOutcome::Completed(report)) => serde_json::json!({
            "type": operation,
            "success": report.failed == 0,
            "saved": report
                .saved
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>(),
            "failed": report.failed,
        }),
        Ok(RunOutcome::Rejected { status, message }) => serde_json::json!({
            "type": operation,
            "success": false,
            "status": status,
            "error": message,
        }),
        Err(e) => serde_json::json!({
            "type": operation,
            "success": false,
            "error": e.to_string(),
        }),
    }
}

fn rejected_or_err(err: DalleError) -> Result<RunOutcome> {
    match err {
        DalleError::Api {
            status,
            reason,
            message,
            kind,
        } => {
            tracing::error!(
                status,
                reason = %reason,
                error_type = kind.as_deref().unwrap_or("unknown"),
                "request failed: {message}"
            );
            Ok(RunOutcome::Rejected { status, message })
        }
        other => Err(other),
    }
}
