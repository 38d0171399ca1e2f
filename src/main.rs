use anyhow::Context;
use clap::{Parser, Subcommand};
use configuration::Config;
use core_types::{NewMission, NewPlanet, NewScientist};
use database::{connect, run_migrations, DbRepository};

/// The main entry point for the Cosmic missions application.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file, if there is one
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let mut config = configuration::load_config().context("Failed to load configuration")?;
    let _guard = configuration::init_tracing(&config.logging)?;

    // Execute the appropriate command
    match cli.command {
        Commands::Serve(args) => {
            if let Some(host) = args.host {
                config.server.host = host;
            }
            if let Some(port) = args.port {
                config.server.port = port;
            }
            web_server::run_server(&config).await
        }
        Commands::Migrate => {
            let pool = connect(&config.database).await?;
            run_migrations(&pool).await?;
            tracing::info!(url = %config.database.url, "Migrations applied.");
            Ok(())
        }
        Commands::Seed => handle_seed(&config).await,
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// A small REST API for scientists, the planets they visit and their missions.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply migrations and serve the HTTP API.
    Serve(ServeArgs),
    /// Apply the embedded schema migrations and exit.
    Migrate,
    /// Replace all data with a small demo data set.
    Seed,
}

#[derive(Parser)]
struct ServeArgs {
    /// Address to bind, overriding `server.host`.
    #[arg(long)]
    host: Option<String>,

    /// Port to bind, overriding `server.port`.
    #[arg(long)]
    port: Option<u16>,
}

// ==============================================================================
// Seed Command Logic
// ==============================================================================

const PLANETS: [(&str, i64, &str); 4] = [
    ("TauCeti E", 1_234_567, "TauCeti"),
    ("Maxxowitz", 9_876_543, "Canopus"),
    ("Plasmasphere", 123_456, "Mintaka"),
    ("Xanadu", 54_321, "Sirius"),
];

const SCIENTISTS: [(&str, &str); 3] = [
    ("Mel T. Valent", "xenobiology"),
    ("P. Legrange", "orbital mechanics"),
    ("Hilda Bernard", "astrophysics"),
];

/// (mission name, scientist index, planet index)
const MISSIONS: [(&str, usize, usize); 5] = [
    ("Explore Planet X", 0, 0),
    ("Survey the Rings", 0, 1),
    ("Map the Surface", 1, 2),
    ("Sample the Plasma", 2, 2),
    ("Return to Xanadu", 2, 3),
];

/// Clears the three tables and inserts the demo data set.
async fn handle_seed(config: &Config) -> anyhow::Result<()> {
    let pool = connect(&config.database).await?;
    run_migrations(&pool).await?;
    let db_repo = DbRepository::new(pool);

    tracing::info!("Clearing existing data...");
    db_repo.clear_all().await?;

    let mut planet_ids = Vec::with_capacity(PLANETS.len());
    for (name, distance, star) in PLANETS {
        let planet = db_repo
            .create_planet(&NewPlanet {
                name: Some(name.to_string()),
                distance_from_earth: Some(distance),
                nearest_star: Some(star.to_string()),
            })
            .await?;
        planet_ids.push(planet.id);
    }

    let mut scientist_ids = Vec::with_capacity(SCIENTISTS.len());
    for (name, field) in SCIENTISTS {
        let scientist = db_repo
            .create_scientist(&NewScientist::new(name.to_string(), field.to_string())?)
            .await?;
        scientist_ids.push(scientist.scientist.id);
    }

    for (name, scientist, planet) in MISSIONS {
        let mission = NewMission::new(name.to_string(), planet_ids[planet], scientist_ids[scientist])?;
        db_repo.create_mission(&mission).await?;
    }

    tracing::info!(
        planets = PLANETS.len(),
        scientists = SCIENTISTS.len(),
        missions = MISSIONS.len(),
        "Seeding complete."
    );
    Ok(())
}
