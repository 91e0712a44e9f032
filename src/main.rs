use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use review_lens::backend::ProcessBackend;
use review_lens::config::ReviewConfig;
use review_lens::engine::ReviewEngine;
use review_lens::patterns::language_from_path;

#[derive(Parser)]
#[command(name = "review-lens", version, about = "Gamified inline code-review annotations")]
struct Cli {
    /// Configuration file (defaults to the platform config location)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Detect function definitions in a file
    Scan {
        file: PathBuf,
        /// Override the language inferred from the file extension
        #[arg(long)]
        language: Option<String>,
    },
    /// Annotate a file's functions with stored or placeholder reviews
    Annotate {
        file: PathBuf,
        #[arg(long)]
        language: Option<String>,
    },
    /// Regenerate reviews for a file via the external backend
    Review {
        file: PathBuf,
        #[arg(long)]
        language: Option<String>,
        /// API key for the backend (mock mode when absent)
        #[arg(long, env = "GEMINI_API_KEY")]
        api_key: Option<String>,
    },
    /// Show the recorded review history for a function
    History { function: String },
    /// Clear stored reviews for a file
    Clear { file: PathBuf },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => ReviewConfig::from_file(path)?,
        None => ReviewConfig::load_or_default()?,
    };

    match cli.command {
        Command::Scan { file, language } => {
            let engine = ReviewEngine::with_config(config);
            let Some((text, language)) = read_source(&file, language)? else {
                return Ok(());
            };
            let occurrences = engine.scan(&text, &language);
            if occurrences.is_empty() {
                tracing::info!("No functions found in {}", file.display());
            }
            let listed: Vec<_> = occurrences
                .iter()
                .map(|occurrence| {
                    serde_json::json!({
                        "name": occurrence.name,
                        "line": occurrence.line,
                        "language": occurrence.language_id,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&listed)?);
        }
        Command::Annotate { file, language } => {
            let mut engine = ReviewEngine::with_config(config);
            let Some((text, language)) = read_source(&file, language)? else {
                return Ok(());
            };
            let annotations =
                engine.scan_and_annotate(&file.display().to_string(), &text, &language);
            if annotations.is_empty() {
                tracing::info!("No functions found in {}", file.display());
            }
            println!("{}", serde_json::to_string_pretty(&annotations)?);
        }
        Command::Review {
            file,
            language,
            api_key,
        } => {
            if let Some(key) = api_key {
                config.api_key = key;
            }
            let mut engine = ReviewEngine::with_config(config);
            let Some((text, language)) = read_source(&file, language)? else {
                return Ok(());
            };
            if !engine.is_language_supported(&language) {
                tracing::info!("Language '{language}' is not enabled for reviews");
                return Ok(());
            }

            let backend = ProcessBackend::new(&engine.config().backend_path);
            let reviews = engine
                .regenerate(&file.display().to_string(), &text, &backend)
                .await
                .map_err(|err| anyhow::anyhow!("{err} ({})", err.hint()))?;

            tracing::info!(
                "Generated {} reviews with {} style",
                reviews.len(),
                engine.config().style
            );
            println!("{}", serde_json::to_string_pretty(&reviews)?);
        }
        Command::History { function } => {
            let engine = ReviewEngine::with_config(config);
            let history = engine.history(&function);
            if history.is_empty() {
                tracing::info!("No review history for {function}");
            }
            // Newest first for display; the store keeps insertion order.
            let newest_first: Vec<_> = history.iter().rev().collect();
            println!("{}", serde_json::to_string_pretty(&newest_first)?);
        }
        Command::Clear { file } => {
            let mut engine = ReviewEngine::with_config(config);
            engine.clear_reviews(&file.display().to_string());
            tracing::info!("Reviews cleared for {}", file.display());
        }
    }

    Ok(())
}

/// Read a source file and resolve its language id
///
/// Returns `None` (after an informational log) when the file type has no
/// registered language; unsupported files are a normal case, not an error.
fn read_source(file: &Path, language: Option<String>) -> Result<Option<(String, String)>> {
    let language = match language.or_else(|| {
        language_from_path(&file.display().to_string()).map(|l| l.to_string())
    }) {
        Some(language) => language,
        None => {
            tracing::info!("File type of {} is not supported for reviews", file.display());
            return Ok(None);
        }
    };

    let text = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    Ok(Some((text, language)))
}
