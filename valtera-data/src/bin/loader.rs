use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use valtera_data::BracketLoader;
use valtera_db_sqlite::SqliteRepository;

/// Load progressive tax bracket tables from a CSV file into the database.
///
/// The CSV file should have the following columns:
/// - financial_year: The period label (e.g., 2024-25)
/// - threshold: Income at which the bracket starts (the first row of each
///   year must be 0)
/// - rate: The marginal rate as a fraction (e.g., 0.16)
///
/// Each financial year found in the file replaces whatever table is stored
/// for that year.
#[derive(Parser, Debug)]
#[command(name = "valtera-data-loader")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the CSV file containing bracket data
    #[arg(short, long)]
    file: PathBuf,

    /// SQLite database URL or file path (created if missing)
    #[arg(short, long, default_value = "sqlite:valtera.db")]
    database: String,

    /// Run database migrations before loading data
    #[arg(short, long, default_value_t = false)]
    migrate: bool,

    /// Run seed files from the specified directory after migrations
    #[arg(short, long)]
    seeds: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .without_time()
        .with_target(false)
        .init();

    let args = Args::parse();

    let repo = SqliteRepository::new(&args.database)
        .await
        .with_context(|| format!("Failed to connect to database: {}", args.database))?;

    if args.migrate {
        println!("Running migrations...");
        repo.run_migrations()
            .await
            .context("Failed to run migrations")?;
        println!("Migrations complete.");
    }

    if let Some(seeds_dir) = &args.seeds {
        println!("Running seeds from: {}", seeds_dir.display());
        repo.run_seeds(seeds_dir)
            .await
            .with_context(|| format!("Failed to run seeds from: {}", seeds_dir.display()))?;
        println!("Seeds complete.");
    }

    println!("Loading bracket tables from: {}", args.file.display());

    let file = File::open(&args.file)
        .with_context(|| format!("Failed to open: {}", args.file.display()))?;

    let records = BracketLoader::parse(file)
        .with_context(|| format!("Failed to parse CSV: {}", args.file.display()))?;

    println!("Parsed {} records from CSV", records.len());

    let inserted = BracketLoader::load(&repo, &records)
        .await
        .context("Failed to load bracket tables into database")?;

    println!("Successfully loaded {inserted} brackets into the database.");

    Ok(())
}
