use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use placescout::SearchRequest;
use placescout_common::{HoursMode, LatLng, ScoutConfig, StopWordMode};

#[derive(Parser)]
#[command(name = "placescout", about = "Find, enrich and summarize nearby places")]
struct Cli {
    /// Origin latitude
    #[arg(long, allow_hyphen_values = true)]
    lat: f64,

    /// Origin longitude
    #[arg(long, allow_hyphen_values = true)]
    lng: f64,

    /// What to look for, e.g. "restaurant, asian, cheap"
    #[arg(long)]
    topics: String,

    /// Keep at most this many places
    #[arg(long)]
    limit: Option<usize>,

    /// Output JSON file (overrides OUTPUT_PATH)
    #[arg(long)]
    output: Option<PathBuf>,

    /// weekly-hours | dine-in (overrides HOURS_MODE)
    #[arg(long)]
    hours_mode: Option<HoursMode>,

    /// off | remove | preserve-negations (overrides STOP_WORDS)
    #[arg(long)]
    stop_words: Option<StopWordMode>,

    /// Translate reviews before summarizing
    #[arg(long)]
    translate: bool,

    /// Skip review summaries
    #[arg(long)]
    no_summary: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("placescout=info".parse()?))
        .init();

    let cli = Cli::parse();

    let mut config = ScoutConfig::from_env()?;
    if let Some(output) = cli.output {
        config.output_path = output;
    }
    if let Some(mode) = cli.hours_mode {
        config.hours_mode = mode;
    }
    if let Some(mode) = cli.stop_words {
        config.stop_words = mode;
    }
    if cli.translate {
        config.translate_reviews = true;
    }
    if cli.no_summary {
        config.summarize_reviews = false;
    }

    let mut request = SearchRequest::builder()
        .origin(LatLng::new(cli.lat, cli.lng))
        .topics(cli.topics)
        .build();
    request.limit = cli.limit;

    info!("placescout starting...");
    let records = placescout::run(&request, config).await?;
    info!(count = records.len(), "Scout run complete");

    Ok(())
}
