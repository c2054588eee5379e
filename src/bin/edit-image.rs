//! Edit an image (optionally restricted by a mask) from a text prompt.

use clap::Parser;
use dalle_tools::config::{EditDefaults, API_KEY_ENV, BASE_URL_ENV};
use dalle_tools::{
    json_summary, run_edit, ImageSize, OpenAiImageProvider, ResponseFormat, RunOutcome,
};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "edit-image")]
#[command(about = "Edit an image with the OpenAI image API")]
#[command(version)]
struct Cli {
    /// The text prompt describing the edit
    #[arg(short, long)]
    prompt: Option<String>,

    /// Source image (PNG, at most 4MB)
    #[arg(short, long)]
    image: Option<PathBuf>,

    /// Mask image (PNG, at most 4MB); transparent areas are edited
    #[arg(short, long, conflicts_with = "no_mask")]
    mask: Option<PathBuf>,

    /// Send no mask, even the default one
    #[arg(long)]
    no_mask: bool,

    /// Number of images to generate (1-10)
    #[arg(short)]
    n: Option<u32>,

    /// Image size: 256x256, 512x512 or 1024x1024
    #[arg(short, long)]
    size: Option<ImageSize>,

    /// Response format: url or b64_json
    #[arg(long)]
    response_format: Option<ResponseFormat>,

    /// Directory the images are written to
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// API key
    #[arg(long, env = API_KEY_ENV, hide_env_values = true)]
    api_key: Option<String>,

    /// API root URL
    #[arg(long, env = BASE_URL_ENV)]
    base_url: Option<String>,

    /// Output a JSON summary
    #[arg(long)]
    json: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    dalle_tools::logging::init();
    let cli = Cli::parse();

    let mut defaults = EditDefaults::default();
    if let Some(image) = cli.image {
        defaults.image = image;
    }
    if cli.no_mask {
        defaults.mask = None;
    } else if let Some(mask) = cli.mask {
        defaults.mask = Some(mask);
    }
    if let Some(n) = cli.n {
        defaults.n = n;
    }
    if let Some(size) = cli.size {
        defaults.size = size;
    }
    if let Some(format) = cli.response_format {
        defaults.response_format = format;
    }
    let mut request = defaults.request();
    if let Some(prompt) = cli.prompt {
        request.prompt = prompt;
    }
    let output_dir = cli.output_dir.unwrap_or(defaults.output_dir);

    let mut builder = OpenAiImageProvider::builder();
    if let Some(key) = cli.api_key {
        builder = builder.api_key(key);
    }
    if let Some(url) = cli.base_url {
        builder = builder.base_url(url);
    }

    let outcome = match builder.build() {
        Ok(provider) => run_edit(&provider, &request, &output_dir).await,
        Err(e) => Err(e),
    };

    if cli.json {
        let summary = json_summary("edit", &outcome);
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    match outcome {
        Ok(RunOutcome::Completed(report)) => {
            if !cli.json {
                println!(
                    "Saved {} edited image(s) to {} ({} failed)",
                    report.saved.len(),
                    output_dir.display(),
                    report.failed
                );
            }
            Ok(ExitCode::SUCCESS)
        }
        Ok(RunOutcome::Rejected { .. }) => Ok(ExitCode::FAILURE),
        Err(e) => {
            tracing::error!("{e}");
            Ok(ExitCode::FAILURE)
        }
    }
}
