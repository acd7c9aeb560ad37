//! `ridecast` command line interface
//!
//! ```bash
//! # Advice for the last used (or default) location
//! ridecast advise
//!
//! # Gravel ride near Girona, imperial units, JSON output
//! ridecast advise Girona --activity gravel --units imperial --json
//!
//! # Road ride heading east from coordinates
//! ridecast advise "41.98,2.82" --heading 90
//! ```

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use ridecast::api::LocationInput;
use ridecast::render::{render_json, render_locations, render_text};
use ridecast::storage::{FjallStore, KeyValueStore, LastLocationStore, MemoryStore, RecentsStore};
use ridecast::telemetry::init_tracing;
use ridecast::{
    Activity, Advice, AppState, LocationParser, LocationResolver, RideConfig, RideError,
    StateUpdate, UnitSystem, WeatherApiClient, WindRelation,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Parser)]
#[command(
    name = "ridecast",
    version,
    about = "Ride quality scores and safety alerts for road, gravel and mountain biking"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Configuration file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Score current, hourly and daily conditions for a location
    Advise(AdviseArgs),
    /// Search places by name
    Search {
        query: String,
    },
    /// List recently used locations
    Recents {
        /// Forget all recent locations
        #[arg(long)]
        clear: bool,
    },
    /// Print the effective configuration
    Config,
}

#[derive(Args)]
struct AdviseArgs {
    /// Place name or "lat,lon"; the last used location when omitted
    #[arg(allow_hyphen_values = true)]
    location: Option<String>,

    /// road, gravel or mtb
    #[arg(long, short = 'a')]
    activity: Option<Activity>,

    /// Wind relation for road rides: headwind, tailwind or crosswind
    #[arg(long, short = 'w')]
    wind: Option<WindRelation>,

    /// Travel heading in degrees, derives the wind relation per hour
    #[arg(long, allow_hyphen_values = true)]
    heading: Option<f64>,

    /// metric or imperial
    #[arg(long, short = 'u')]
    units: Option<UnitSystem>,

    /// Number of hours in the hourly view
    #[arg(long)]
    hours: Option<u32>,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

fn open_store(config: &RideConfig) -> Arc<dyn KeyValueStore> {
    let Some(path) = config.storage_path() else {
        debug!("No storage path configured, keeping state in memory");
        return Arc::new(MemoryStore::new());
    };

    match FjallStore::open(&path) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            warn!(
                "Failed to open store at {}: {}. Recent locations will not be saved.",
                path.display(),
                e
            );
            Arc::new(MemoryStore::new())
        }
    }
}

async fn advise(config: &RideConfig, args: AdviseArgs) -> Result<()> {
    let client = WeatherApiClient::new(&config.weather)?;
    let store = open_store(config);
    let recents = RecentsStore::new(store.clone());
    let last_location = LastLocationStore::new(store);

    let input: Option<LocationInput> = args
        .location
        .as_deref()
        .map(LocationParser::parse)
        .transpose()?;
    let resolver = LocationResolver::new(&client, &last_location, config.defaults.location());
    let location = resolver.resolve(input).await?;
    info!("Advising for {}", location.display_name());

    let hourly_hours = args.hours.unwrap_or(config.defaults.hourly_hours);
    let mut state = AppState::new(
        args.activity.unwrap_or(config.defaults.activity),
        args.units.unwrap_or(config.defaults.units),
        usize::try_from(hourly_hours).context("Hourly view length out of range")?,
    )
    .apply(StateUpdate::LocationChanged(location.clone()))
    .apply(StateUpdate::HeadingChanged(args.heading));
    if let Some(relation) = args.wind {
        state = state.apply(StateUpdate::WindRelationChanged(relation));
    }

    let snapshot = client
        .fetch_snapshot(location.latitude, location.longitude)
        .await?;
    let state = state.apply(StateUpdate::ForecastLoaded(snapshot));

    recents.save(&location).await;
    last_location.save(&location).await;

    let advice = Advice::from_state(&state, Utc::now())?;
    if args.json {
        println!("{}", render_json(&advice)?);
    } else {
        print!("{}", render_text(&advice));
    }
    Ok(())
}

async fn search(config: &RideConfig, query: &str) -> Result<()> {
    let client = WeatherApiClient::new(&config.weather)?;
    let places = client.search_places(query).await;

    if places.is_empty() {
        println!("No places found for '{}'", query.trim());
    } else {
        print!("{}", render_locations(&places));
    }
    Ok(())
}

async fn recents(config: &RideConfig, clear: bool) -> Result<()> {
    let recents = RecentsStore::new(open_store(config));

    if clear {
        recents.clear().await;
        println!("Recent locations cleared");
        return Ok(());
    }

    let list = recents.list().await;
    if list.is_empty() {
        println!("No recent locations");
    } else {
        print!("{}", render_locations(&list));
    }
    Ok(())
}

async fn run(cli: Cli, config: RideConfig) -> Result<()> {
    match cli.command {
        Command::Advise(args) => advise(&config, args).await,
        Command::Search { query } => search(&config, &query).await,
        Command::Recents { clear } => recents(&config, clear).await,
        Command::Config => {
            let rendered =
                serde_json::to_string_pretty(&config).context("Failed to serialize configuration")?;
            println!("{rendered}");
            Ok(())
        }
    }
}

fn report(error: &anyhow::Error) {
    match error.downcast_ref::<RideError>() {
        Some(ride_error) => eprintln!("{}", ride_error.user_message()),
        None => eprintln!("Error: {error:#}"),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match RideConfig::load_from_path(cli.config.clone()) {
        Ok(config) => config,
        Err(e) => {
            report(&e);
            return ExitCode::FAILURE;
        }
    };

    let _guard = match init_tracing(&config.logging, cli.verbose) {
        Ok(guard) => guard,
        Err(e) => {
            report(&e);
            return ExitCode::FAILURE;
        }
    };

    match run(cli, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            debug!("Command failed: {:?}", e);
            report(&e);
            ExitCode::FAILURE
        }
    }
}
