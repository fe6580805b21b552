use clap::{Parser, Subcommand};
use maisonvital_core::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "maisonvital", version, about = "Maison Vital home maintenance CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the asset catalog
    Catalog {
        #[command(subcommand)]
        action: commands::catalog::CatalogAction,
    },
    /// Manage the tracked inventory
    Track {
        #[command(subcommand)]
        action: commands::track::TrackAction,
    },
    /// Review tracked assets one card at a time
    Review(commands::review::ReviewArgs),
    /// Mark an asset as maintained right now
    Quickfix {
        /// Catalog asset id
        asset_id: String,
    },
    /// Dashboard of tracked assets and health score
    Status,
    /// Level, XP and badges
    Stats,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(Config::load_or_default().log.filter));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    let result = match cli.command {
        Commands::Catalog { action } => commands::catalog::run(action),
        Commands::Track { action } => commands::track::run(action),
        Commands::Review(args) => commands::review::run(args),
        Commands::Quickfix { asset_id } => commands::quickfix::run(&asset_id),
        Commands::Status => commands::status::run(),
        Commands::Stats => commands::stats::run(),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
