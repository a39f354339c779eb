//! # Butterfly-stitch CLI
//!
//! Command-line interface for the butterfly-stitch library.
//! Reads a waypoint list, resolves it through an OSRM engine and writes the path.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use butterfly_stitch::{EngineConfig, Outcome, ResolveOptions, RouteResolver, TravelMode, Waypoint};
use clap::Parser;
use log::error;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

mod cli;

use cli::{OutputFormat, ProgressManager};

/// Command-line interface for butterfly-stitch
#[derive(Parser)]
#[command(name = "butterfly-stitch")]
#[command(about = "Resolve waypoints into a road-following path with OSRM")]
#[command(long_about = "Resolves a JSON list of [lat, lon] waypoints into a path:
  butterfly-stitch track.json                        # Read file, write path to stdout
  cat track.json | butterfly-stitch -m foot          # Read stdin, foot profile
  butterfly-stitch track.json -o path.geojson --geojson

Engine Selection:
  --engine-url http://localhost:5000                 # Or set OSRM_BASE_URL
  Without an engine, or with --mode train, the input is written back unchanged")]
#[command(version = env!("BUTTERFLY_VERSION"))]
struct Cli {
    /// Waypoint file ([[lat, lon], ...]), or "-" for stdin
    #[arg(default_value = "-")]
    input: String,

    /// Output file path, or "-" for stdout
    #[arg(short, long, default_value = "-")]
    output: String,

    /// Travel mode: car, truck, foot, bike or train
    #[arg(short, long, default_value = "car")]
    mode: TravelMode,

    /// OSRM base URL; routing is disabled when absent
    #[arg(long, env = "OSRM_BASE_URL")]
    engine_url: Option<String>,

    /// Maximum waypoints per engine request
    #[arg(long, default_value_t = butterfly_stitch::DEFAULT_CHUNK_SIZE)]
    chunk_size: usize,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..))]
    timeout: u64,

    /// Write a GeoJSON LineString feature instead of [lat, lon] pairs
    #[arg(long)]
    geojson: bool,

    /// Show what would be requested without contacting the engine
    #[arg(long)]
    dry_run: bool,

    /// Enable verbose logging and progress display
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn engine_config(&self) -> Option<EngineConfig> {
        self.engine_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .map(|url| EngineConfig::new(url).with_timeout(Duration::from_secs(self.timeout)))
    }

    fn output_format(&self) -> OutputFormat {
        if self.geojson {
            OutputFormat::GeoJson
        } else {
            OutputFormat::Pairs
        }
    }
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("❌ Error: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging to stderr
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_filter(cli.verbose)))
        .target(env_logger::Target::Stderr)
        .init();

    if cli.verbose {
        eprintln!("🦋 Butterfly-stitch v{} starting...", env!("BUTTERFLY_VERSION"));
    }

    let waypoints = read_waypoints(&cli.input).await?;
    let config = cli.engine_config();

    if cli.dry_run {
        show_plan(&waypoints, cli.mode, config, cli.chunk_size);
        return Ok(());
    }

    let routed = RouteResolver::new(config.clone())
        .direct_reason(&waypoints, cli.mode)
        .is_none();
    let progress_manager = if cli.verbose && routed {
        let total = butterfly_stitch::request_count(waypoints.len(), cli.chunk_size);
        Some(Arc::new(ProgressManager::new(
            total as u64,
            &format!("🌐 Resolving {} waypoints ({})", waypoints.len(), cli.mode),
        )))
    } else {
        None
    };

    let options = ResolveOptions {
        chunk_size: cli.chunk_size,
        progress: progress_manager.clone().map(|manager| {
            Arc::new(move |done: usize, total: usize| manager.update(done, total))
                as butterfly_stitch::ProgressCallback
        }),
    };

    let resolver = RouteResolver::with_options(config, options);
    let resolution = resolver.resolve_detailed(&waypoints, cli.mode).await;

    if let Some(manager) = progress_manager {
        manager.pb.finish_and_clear();
    }

    if cli.verbose {
        match &resolution.outcome {
            Outcome::Routed { requests, skipped_chunks } => {
                eprintln!(
                    "✅ Routed path: {} points from {requests} request(s), {} chunk(s) without route",
                    resolution.waypoints.len(),
                    skipped_chunks.len()
                );
            }
            Outcome::Direct(reason) => {
                eprintln!("📏 Straight-line path: {reason}");
            }
        }
    }

    let rendered = cli::render_path(&resolution.waypoints, cli.output_format())?;
    write_output(&cli.output, &rendered).await?;

    Ok(())
}

/// Default log filter; verbose output stays scoped to this crate
fn log_filter(verbose: bool) -> &'static str {
    if verbose {
        "warn,butterfly_stitch=debug"
    } else {
        "warn"
    }
}

/// Read waypoints from a file or stdin
async fn read_waypoints(input: &str) -> anyhow::Result<Vec<Waypoint>> {
    let raw = if input == "-" {
        let mut buffer = String::new();
        tokio::io::stdin()
            .read_to_string(&mut buffer)
            .await
            .context("Failed to read waypoints from stdin")?;
        buffer
    } else {
        tokio::fs::read_to_string(input)
            .await
            .with_context(|| format!("Failed to read waypoints from {input}"))?
    };

    cli::parse_waypoints(&raw).with_context(|| format!("Failed to parse waypoints from {input}"))
}

/// Write the rendered path to a file or stdout
async fn write_output(output: &str, rendered: &str) -> anyhow::Result<()> {
    if output == "-" {
        let mut stdout = tokio::io::stdout();
        stdout.write_all(rendered.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
    } else {
        tokio::fs::write(output, format!("{rendered}\n"))
            .await
            .with_context(|| format!("Failed to write path to {output}"))?;
        eprintln!("📁 Saved to: {output}");
    }
    Ok(())
}

/// Show the gate decision and request plan
fn show_plan(waypoints: &[Waypoint], mode: TravelMode, config: Option<EngineConfig>, chunk_size: usize) {
    let engine_url = config.as_ref().map(|c| c.base_url.clone());
    let resolver = RouteResolver::with_options(
        config,
        ResolveOptions {
            chunk_size,
            progress: None,
        },
    );

    eprintln!("🔍 [DRY RUN] {} waypoints, mode {mode}", waypoints.len());
    match resolver.direct_reason(waypoints, mode) {
        Some(reason) => eprintln!("🔍 [DRY RUN] Would return straight lines: {reason}"),
        None => eprintln!(
            "🔍 [DRY RUN] Would send {} request(s) to {}",
            butterfly_stitch::request_count(waypoints.len(), chunk_size),
            engine_url.unwrap_or_default()
        ),
    }
}
