//! Generate images from a text prompt.

use clap::Parser;
use dalle_tools::config::{GenerateDefaults, API_KEY_ENV, BASE_URL_ENV};
use dalle_tools::{
    json_summary, run_generation, ImageSize, OpenAiImageProvider, ResponseFormat, RunOutcome,
};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "generate-image")]
#[command(about = "Generate images from a text prompt with the OpenAI image API")]
#[command(version)]
struct Cli {
    /// The text prompt describing the image
    #[arg(short, long)]
    prompt: Option<String>,

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

    let defaults = GenerateDefaults::default();
    let mut request = defaults.request();
    if let Some(prompt) = cli.prompt {
        request.prompt = prompt;
    }
    if let Some(n) = cli.n {
        request.n = n;
    }
    if let Some(size) = cli.size {
        request.size = size;
    }
    if let Some(format) = cli.response_format {
        request.response_format = format;
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
        Ok(provider) => run_generation(&provider, &request, &output_dir).await,
        Err(e) => Err(e),
    };

    if cli.json {
        let summary = json_summary("generation", &outcome);
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    match outcome {
        Ok(RunOutcome::Completed(report)) => {
            if !cli.json {
                println!(
                    "Saved {} image(s) to {} ({} failed)",
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
