use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

use readready_engine::parser::check_csv_size;
use readready_engine::temporal::{parse_iso_date, utc_today};
use readready_engine::{
    AnalyticsEngine, DecisionItem, EngineConfig, ImportPipeline, ImportPreview, LibraryEntry,
    ProgressEstimator, ReadingSession,
};

#[derive(Parser)]
#[command(name = "readready", version, about = "Reading analytics and catalog import tools")]
struct Cli {
    /// Engine configuration (TOML)
    #[arg(long, global = true, env = "READREADY_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse a catalog export and flag conflicts with the library
    Preview {
        csv: PathBuf,

        /// Existing library entries (JSON array)
        #[arg(long)]
        library: Option<PathBuf>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },

    /// Apply conflict decisions and print the resulting import plan
    Confirm {
        csv: PathBuf,

        #[arg(long)]
        library: Option<PathBuf>,

        /// Decisions as a JSON array of {"rowIndex", "decision"}
        #[arg(long)]
        decisions: Option<PathBuf>,

        /// Skip undecided conflicts instead of failing
        #[arg(long)]
        lenient: bool,
    },

    /// Streak, debt and weekly activity from recorded sessions
    Stats {
        /// Reading sessions (JSON array)
        #[arg(long)]
        sessions: PathBuf,

        #[arg(long)]
        library: Option<PathBuf>,

        /// Evaluate as of this UTC date instead of the clock (YYYY-MM-DD)
        #[arg(long)]
        today: Option<String>,
    },

    /// Estimate words and pages for one reading session
    Session {
        #[arg(long)]
        start: f64,

        #[arg(long)]
        end: f64,

        /// Book length override, in words
        #[arg(long)]
        total_words: Option<u64>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Csv,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = EngineConfig::load_or_default(cli.config.as_deref())?;
    init_tracing(&config);

    match cli.command {
        Command::Preview { csv, library, format } => run_preview(&config, &csv, library.as_deref(), format),
        Command::Confirm {
            csv,
            library,
            decisions,
            lenient,
        } => run_confirm(&config, &csv, library.as_deref(), decisions.as_deref(), lenient),
        Command::Stats {
            sessions,
            library,
            today,
        } => run_stats(&config, &sessions, library.as_deref(), today.as_deref()),
        Command::Session {
            start,
            end,
            total_words,
        } => run_session(&config, start, end, total_words),
    }
}

fn init_tracing(config: &EngineConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run_preview(config: &EngineConfig, csv: &Path, library: Option<&Path>, format: OutputFormat) -> Result<()> {
    let text = read_csv(config, csv)?;
    let library = load_library(library)?;

    let preview = ImportPipeline::from_config(config).preview(&text, &library)?;
    info!(
        rows = preview.previews.len(),
        conflicts = preview.conflict_count(),
        warnings = preview.warnings.len(),
        "Preview ready"
    );

    match format {
        OutputFormat::Json => print_json(&preview),
        OutputFormat::Csv => write_preview_csv(&preview),
    }
}

fn run_confirm(
    config: &EngineConfig,
    csv: &Path,
    library: Option<&Path>,
    decisions: Option<&Path>,
    lenient: bool,
) -> Result<()> {
    let text = read_csv(config, csv)?;
    let library = load_library(library)?;
    let decisions: Vec<DecisionItem> = match decisions {
        Some(path) => read_json(path)?,
        None => Vec::new(),
    };

    let mut pipeline = ImportPipeline::from_config(config);
    if lenient {
        pipeline = pipeline.lenient();
    }

    let plan = pipeline.confirm(&text, &library, &decisions)?;
    print_json(&plan)
}

fn run_stats(config: &EngineConfig, sessions: &Path, library: Option<&Path>, today: Option<&str>) -> Result<()> {
    let sessions: Vec<ReadingSession> = read_json(sessions)?;
    let library = load_library(library)?;
    let today = match today {
        Some(value) => parse_iso_date(value)?,
        None => utc_today(),
    };

    let stats = AnalyticsEngine::from_config(config).dashboard_at(&sessions, &library, today);
    print_json(&stats)
}

fn run_session(config: &EngineConfig, start: f64, end: f64, total_words: Option<u64>) -> Result<()> {
    let estimator = ProgressEstimator::from_config(config);
    match estimator.estimate_session(start, end, total_words) {
        Some(estimate) => print_json(&estimate),
        None => {
            info!("No forward progress, session skipped");
            print_json(&serde_json::json!({ "skipped": true, "reason": "no_progress" }))
        }
    }
}

// ============================================================================
// I/O HELPERS
// ============================================================================

fn read_csv(config: &EngineConfig, path: &Path) -> Result<String> {
    let size = fs::metadata(path)
        .with_context(|| format!("Failed to open file: {}", path.display()))?
        .len();
    check_csv_size(usize::try_from(size).unwrap_or(usize::MAX), config.max_csv_bytes)?;

    fs::read_to_string(path).with_context(|| format!("Failed to read CSV: {}", path.display()))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse JSON in {}", path.display()))
}

fn load_library(path: Option<&Path>) -> Result<Vec<LibraryEntry>> {
    match path {
        Some(p) => read_json(p),
        None => Ok(Vec::new()),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn write_preview_csv(preview: &ImportPreview) -> Result<()> {
    let mut writer = csv::Writer::from_writer(io::stdout());
    writer.write_record(["row_index", "title", "author", "state", "has_conflict", "existing_entry_id", "warning"])?;

    for p in &preview.previews {
        writer.write_record([
            p.row_index.to_string(),
            p.row.title.clone(),
            p.row.author.clone(),
            p.row.state.to_string(),
            p.has_conflict.to_string(),
            p.existing_entry_id.clone().unwrap_or_default(),
            p.row.warning.clone().unwrap_or_default(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}
