mod api;
mod config;
mod error;
mod mime;
mod transport;
mod upload;

use anyhow::Result;
use clap::Parser;
use console::style;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::path::PathBuf;

use config::Config;
use upload::{UploadPhase, Uploader};

#[derive(Parser, Debug)]
#[command(
    name = "airlift",
    version = env!("CARGO_PKG_VERSION"),
    about = "Upload a file to object storage through short-lived pre-signed URLs",
    long_about = "Uploads one local file per invocation: requests a short-lived upload \
                  credential from the backend, streams the file to the pre-signed URL it \
                  returns, then confirms completion. Configure the backend via .env.",
    after_help = "Examples:\n  \
                  airlift ./video.mp4                     # Upload a single file\n  \
                  airlift ./report.pdf --verbose          # Show grant and confirmation detail\n\n\
                  Configuration (.env):\n  \
                  UPLOAD_API_URL=https://abc123.execute-api.us-east-1.amazonaws.com/prod\n  \
                  UPLOAD_API_TOKEN=<shared secret>"
)]
struct Cli {
    /// File to upload
    path: PathBuf,

    /// Show diagnostic detail (grant parameters, raw status codes)
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    // --verbose wins over LOG_LEVEL / RUST_LOG; it only changes what is
    // printed, never control flow.
    let log_level = if cli.verbose {
        "airlift=debug".to_string()
    } else {
        std::env::var("LOG_LEVEL")
            .ok()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .unwrap_or_else(|| "warn".to_string())
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_new(&log_level)
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_level(true)
        .init();

    let config = Config::from_env()?;
    let uploader = Uploader::new(config)?;

    let file_label = cli
        .path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| cli.path.display().to_string());

    let pb = ProgressBar::hidden();
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {bytes}/{total_bytes} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    let verbose = cli.verbose;
    let mut local_size = 0u64;
    let outcome = uploader
        .upload(&cli.path, Some(&pb), |phase| match phase {
            UploadPhase::CredentialRequested => {
                println!("{} Requesting upload credential...", style("→").cyan());
            }
            UploadPhase::CredentialGranted {
                file_key,
                bucket,
                expires_in,
                max_file_size,
            } => {
                println!("{} Credential granted", style("✓").green());
                if verbose {
                    println!("  {} {}", style("key:").dim(), file_key);
                    println!("  {} {}", style("bucket:").dim(), bucket);
                    println!("  {} {}s", style("valid for:").dim(), expires_in);
                    println!(
                        "  {} {}",
                        style("size limit:").dim(),
                        format_size(max_file_size)
                    );
                }
            }
            UploadPhase::Uploading { total_bytes } => {
                local_size = total_bytes;
                println!(
                    "{} Uploading {} ({})...",
                    style("→").cyan(),
                    file_label,
                    format_size(total_bytes)
                );
                pb.set_draw_target(ProgressDrawTarget::stderr());
            }
            UploadPhase::Uploaded => {
                pb.finish_and_clear();
                println!("{} Uploaded", style("✓").green());
            }
            UploadPhase::Confirmed { .. } => {
                println!("{} Confirmed", style("✓").green());
            }
        })
        .await;

    match outcome {
        Ok(result) => {
            println!("\n{}", style(&result.message).green().bold());
            println!(
                "  {} s3://{}/{}",
                style("object:").dim(),
                result.bucket,
                result.file_key
            );
            println!("  {} {}", style("url:").dim(), result.s3_url);
            println!(
                "  {} {} ({} bytes)",
                style("size:").dim(),
                format_size(result.file_size),
                result.file_size
            );
            if verbose {
                println!(
                    "  {} {}",
                    style("content type:").dim(),
                    result.content_type
                );
                println!(
                    "  {} {}",
                    style("last modified:").dim(),
                    result.last_modified
                );
                println!("  {} {}", style("confirmed at:").dim(), result.confirmed_at);
            }

            if result.file_size != local_size {
                println!(
                    "{} confirmed size ({} bytes) differs from local size ({} bytes)",
                    style("⚠").yellow(),
                    result.file_size,
                    local_size
                );
            }

            Ok(())
        }
        Err(e) => {
            pb.finish_and_clear();
            eprintln!("{} {}", style("✗").red(), style(e.to_string()).red());
            std::process::exit(1);
        }
    }
}

/// Format file size for display
fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
