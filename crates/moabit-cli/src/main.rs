//! Command-line interface for moabit.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use moabit::{MimeTable, ParserConfig};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "moabit",
    version,
    about = "Media attachment parser: text samples, thumbnails, and MIME overrides"
)]
struct Cli {
    /// Path to a moabit.toml config file (discovered upward when omitted)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sample display text from a file
    Extract {
        file: PathBuf,

        /// MIME type override (detected from the path when omitted)
        #[arg(long)]
        mime: Option<String>,

        /// Emit the full result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate a thumbnail image and print its path
    Thumbnail {
        file: PathBuf,

        /// MIME type override (detected from the path when omitted)
        #[arg(long)]
        mime: Option<String>,

        /// Directory the thumbnail is written into
        #[arg(long, short, default_value = ".")]
        out_dir: PathBuf,
    },

    /// Show the detected MIME type for a file, and its override when one applies
    Mime { file: PathBuf },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => {
            ParserConfig::from_toml_file(path).with_context(|| format!("loading config from {}", path.display()))?
        }
        None => ParserConfig::discover()?.unwrap_or_default(),
    };

    match cli.command {
        Command::Extract { file, mime, json } => {
            let doc = moabit::parse_file(&file, mime.as_deref(), &config)
                .await
                .with_context(|| format!("parsing {}", file.display()))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&doc)?);
            } else {
                println!("{}", doc.text);
            }
        }

        Command::Thumbnail { file, mime, out_dir } => {
            let thumbnail = moabit::thumbnail_file(&file, mime.as_deref(), &config, &out_dir)
                .await
                .with_context(|| format!("thumbnailing {}", file.display()))?;

            println!("{}", thumbnail.display());
        }

        Command::Mime { file } => {
            let detected = moabit::detect_mime_type(&file)?;
            let table = MimeTable::load(config.mime_file.as_deref());
            let file_name = file.file_name().and_then(|n| n.to_str()).unwrap_or_default();

            match table.correct(file_name, &detected) {
                Some(corrected) => println!("{detected} -> {corrected}"),
                None => println!("{detected}"),
            }
        }
    }

    Ok(())
}
