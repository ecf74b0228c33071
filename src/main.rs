//! Rephrase - AI paraphrasing text editor
//!
//! Run with: cargo run -- --endpoint http://127.0.0.1:8080/paraphrase

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use rephrase::config::Config;
use rephrase::{gui, paraphrase};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Config file to use instead of the default location
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Paraphrase endpoint URL
    #[arg(long)]
    endpoint: Option<String>,

    /// Paraphrase backend ("remote" or "llm")
    #[arg(long)]
    backend: Option<String>,

    /// Initial editor text
    #[arg(long)]
    text: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Setup logging; RUST_LOG wins over --verbose
    let level = if args.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("📝 Rephrase v{} starting...", env!("CARGO_PKG_VERSION"));

    let mut config = match args.config {
        Some(ref path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(endpoint) = args.endpoint {
        config.endpoint = endpoint;
    }
    if let Some(backend) = args.backend {
        config.backend = backend;
    }
    if let Some(text) = args.text {
        config.initial_text = text;
    }

    let paraphraser = paraphrase::create_paraphraser(&config)?;
    gui::run(config, paraphraser)?;

    Ok(())
}
