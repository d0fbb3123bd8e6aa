use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use wayfarer_core::{RouteType, TransportMode};
use wayfarer_infrastructure::{ConfigService, WayfarerPaths};

mod commands;
mod logging;

#[derive(Parser)]
#[command(name = "wayfarer")]
#[command(about = "Wayfarer - map documents, place search and account tools", long_about = None)]
struct Cli {
    /// Config file to use instead of <config_dir>/wayfarer/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding config, storage and logs (overrides platform dirs)
    #[arg(long, global = true)]
    home: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a map document
    Render {
        /// Current latitude (defaults to the configured location)
        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,
        /// Current longitude
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,
        /// Destination as LAT,LON
        #[arg(long, value_parser = commands::render::parse_coordinates, allow_hyphen_values = true)]
        dest: Option<wayfarer_core::Coordinates>,
        /// JSON file with an array of incidents
        #[arg(long)]
        incidents: Option<PathBuf>,
        #[arg(long, default_value = "fastest")]
        route_type: RouteType,
        #[arg(long, default_value = "car")]
        transport_mode: TransportMode,
        /// Include the live position watch
        #[arg(long)]
        navigate: bool,
        /// Write the document here instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Search places
    Search {
        query: String,
    },
    /// Sign in with a username
    Login {
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account and sign in
    Register {
        username: String,
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Sign out
    Logout,
    /// Show the signed-in user
    Whoami,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1. Resolve paths and load configuration (fails fast without an API key)
    let paths = WayfarerPaths::new(cli.home.as_deref());
    let config_service = match &cli.config {
        Some(path) => ConfigService::with_path(path),
        None => ConfigService::new(&paths)?,
    };
    let config = config_service
        .load()
        .with_context(|| format!("Failed to load {}", config_service.config_path().display()))?;

    // 2. Install logging; the guard flushes the log file on exit
    let _log_guard = logging::init(&config.logging, &paths)?;
    tracing::debug!("[Bootstrap] Configuration from {}", config_service.config_path().display());

    // 3. Dispatch
    match cli.command {
        Commands::Render {
            lat,
            lon,
            dest,
            incidents,
            route_type,
            transport_mode,
            navigate,
            out,
        } => {
            let options = commands::render::RenderOptions {
                location: lat.zip(lon),
                destination: dest,
                incidents,
                route_type,
                transport_mode,
                navigate,
                out,
            };
            commands::render::run(&config, options).await?
        }
        Commands::Search { query } => commands::search::run(&config, &query).await?,
        Commands::Login { username, password } => {
            commands::account::login(&paths, &username, &password).await?
        }
        Commands::Register {
            username,
            email,
            password,
        } => commands::account::register(&paths, &username, &email, &password).await?,
        Commands::Logout => commands::account::logout(&paths).await?,
        Commands::Whoami => commands::account::whoami(&paths).await?,
    }

    Ok(())
}
