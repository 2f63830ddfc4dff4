use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::debug;

use valtera_core::calculations::FrankingError;
use valtera_ui::app::{self, CalculatorKind, CompoundArgs, FrankingArgs, TaxArgs};
use valtera_ui::config::Settings;
use valtera_ui::controllers::Outcome;
use valtera_ui::logging;
use valtera_ui::presenter::INVALID_INPUT_MESSAGE;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Compound growth, franking credit and income tax calculators.
///
/// Each calculator remembers its last inputs; flags given on the command
/// line replace the remembered value for that field only.
#[derive(Debug, Parser)]
#[command(name = "valtera", version)]
struct Cli {
    /// Database backend to use (`sqlite` or `memory`).
    #[arg(long, global = true)]
    backend: Option<String>,

    /// Database connection string.
    /// For SQLite this is a file path (e.g. `valtera.db`) or `sqlite::memory:`.
    #[arg(long, global = true)]
    db: Option<String>,

    /// TOML settings file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print summaries only.
    #[arg(long, global = true)]
    no_chart: bool,

    /// Log level or filter directive, e.g. `debug` or `valtera_core=trace`.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Project a balance with monthly contributions, nominal and real.
    Compound(CompoundArgs),
    /// Work out the franking credit and grossed-up dividend.
    Franking(FrankingArgs),
    /// Estimate income tax, Medicare levy and employer super.
    Tax(TaxArgs),
    /// Restore a calculator's default inputs and recompute.
    Reset {
        #[arg(value_enum)]
        calculator: CalculatorKind,
    },
    /// List financial years that have tax brackets.
    Periods,
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_logging();

    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };

    if let Some(level) = cli.log_level.as_deref().or(settings.logging.level.as_deref()) {
        logging::set_log_level(level)?;
    }
    if let Some(file) = &settings.logging.file {
        logging::enable_file_logging(file)?;
    }

    let mut db_config = settings.db_config();
    if let Some(backend) = cli.backend {
        db_config.backend = backend;
    }
    if let Some(db) = cli.db {
        db_config.connection_string = db;
    }

    debug!("connecting to {} backend", db_config.backend);
    let registry = app::build_registry();
    let repo = app::open_repository(&registry, &db_config).await;

    let chart = if cli.no_chart {
        None
    } else {
        settings.chart.build()
    };

    let outcome: anyhow::Result<Outcome> = match cli.command {
        Command::Compound(args) => Ok(app::run_compound(&*repo, &args, chart).await),
        Command::Franking(args) => app::run_franking(&*repo, &args, chart)
            .await
            .map_err(Into::into),
        Command::Tax(args) => app::run_tax(&*repo, &args, chart).await,
        Command::Reset { calculator } => app::run_reset(&*repo, calculator, chart).await,
        Command::Periods => {
            let years = app::list_periods(&*repo).await?;
            println!("Financial years with tax brackets: {}", app::join_labels(&years));
            return Ok(());
        }
    };

    match outcome {
        Ok(outcome) => print!("{outcome}"),
        // one message for every rejected franking input; the cause is logged
        Err(e) if e.downcast_ref::<FrankingError>().is_some() => {
            println!("{INVALID_INPUT_MESSAGE}");
        }
        Err(e) => return Err(e),
    }

    Ok(())
}
