use anyhow::{Context, Result, bail};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Instant;

use shelter_geocoder::api::{GsiClient, NominatimClient};
use shelter_geocoder::batch::{BatchProcessor, geocode_file, summary_lines};
use shelter_geocoder::config::{
    DEFAULT_INPUT, DEFAULT_OUTPUT, DEFAULT_TITLE, FileConfig, columns,
};
use shelter_geocoder::resolver::{FallbackResolver, ThreadPause};

/// Geocode a CSV of facilities into a GeoJSON FeatureCollection
///
/// Each address is looked up with the GSI address search first and falls
/// back to OpenStreetMap Nominatim. Rows neither service can place are
/// listed under `failed_sites` in the output.
///
/// Examples:
///   # Read evacuation_sites.csv, write evacuation_sites_geocoded.json
///   shelter-geocoder
///
///   # Custom files and title
///   shelter-geocoder -i shelters.csv -o shelters.json --title "Shelters"
#[derive(Parser, Debug)]
#[command(name = "shelter-geocoder")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to config file (optional, auto-searches shelter-geocoder.toml if not provided)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Input CSV with name and address columns
    #[arg(short = 'i', long)]
    input: Option<PathBuf>,

    /// Output GeoJSON file path
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Title stored in the output metadata
    #[arg(long)]
    title: Option<String>,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let total_start = Instant::now();

    let file_config = if let Some(ref config_path) = args.config {
        if config_path.exists() {
            let contents = std::fs::read_to_string(config_path)
                .context(format!("Failed to read config file: {:?}", config_path))?;
            Some(toml::from_str(&contents).context("Failed to parse config file")?)
        } else {
            bail!("Config file not found: {:?}", config_path);
        }
    } else {
        FileConfig::load()
    };

    let verbose = args.verbose || file_config.as_ref().map(|c| c.verbose).unwrap_or(false);
    init_logging(verbose);

    let input = args
        .input
        .clone()
        .or_else(|| file_config.as_ref().and_then(|c| c.input.clone()))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT));
    let output = args
        .output
        .clone()
        .or_else(|| file_config.as_ref().and_then(|c| c.output.clone()))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));
    let title = args
        .title
        .clone()
        .or_else(|| file_config.as_ref().and_then(|c| c.title.clone()))
        .unwrap_or_else(|| DEFAULT_TITLE.to_string());
    let providers = file_config
        .as_ref()
        .and_then(|c| c.providers.clone())
        .unwrap_or_default();
    let pacing = file_config
        .as_ref()
        .and_then(|c| c.pacing)
        .unwrap_or_default();

    println!("shelter-geocoder - Facility Address Geocoder");
    println!("============================================");
    println!();

    if verbose {
        println!("Configuration:");
        println!("  Input: {}", input.display());
        println!("  Output: {}", output.display());
        println!("  Columns: {} / {}", columns::NAME, columns::ADDRESS);
        println!("  GSI: {}", providers.gsi_url);
        println!(
            "  Nominatim: {} (countrycodes={})",
            providers.nominatim_url, providers.country_codes
        );
        println!("  Timeout: {}s", providers.timeout_secs);
        println!(
            "  Delays: {}ms between providers, {}ms between rows",
            pacing.inter_provider_delay_ms, pacing.inter_row_delay_ms
        );
        println!();
    }

    let gsi = GsiClient::new(&providers).context("Failed to create GSI client")?;
    let nominatim =
        NominatimClient::new(&providers).context("Failed to create Nominatim client")?;
    let resolver = FallbackResolver::new(
        gsi,
        nominatim,
        ThreadPause,
        pacing.inter_provider_delay(),
    );
    let processor = BatchProcessor::new(resolver, pacing.inter_row_delay());

    let progress = create_progress_bar();
    let document = geocode_file(&processor, &input, &output, &title, |row| {
        if progress.length() != Some(row.total as u64) {
            progress.set_length(row.total as u64);
        }
        progress.set_position(row.index as u64);
        progress.set_message(match row.resolution {
            Some(r) => format!("{} -> {}", row.record.name, r.provider),
            None => format!("{} -> failed", row.record.name),
        });
    })
    .with_context(|| format!("Failed to geocode {}", input.display()))?;
    progress.finish_with_message(format!(
        "Processed {} rows [{:.1}s]",
        document.metadata.total_sites + document.metadata.failed_geocoding,
        total_start.elapsed().as_secs_f32()
    ));

    println!();
    println!("{}", "=".repeat(60));
    println!("Done:");
    for line in summary_lines(&document, &output) {
        println!("{}", line);
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "shelter_geocoder=debug"
    } else {
        "shelter_geocoder=warn"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn create_progress_bar() -> ProgressBar {
    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} [{pos}/{len}] {msg}")
            .unwrap()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.set_message("Geocoding...");
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}
