// ReadReady Engine - Core Library
// Reading analytics and catalog import reconciliation. Pure functions over
// plain data: callers own fetching sessions/library entries and persisting results.

pub mod config;
pub mod error;
pub mod entities;
pub mod tokenizer;      // CSV logical lines + fields
pub mod parser;         // Catalog rows + shelf mapping
pub mod deduplication;  // Conflict detection against the library
pub mod reconciliation; // Decision routing + import plan
pub mod links;
pub mod temporal;
pub mod progress;       // Words / pages estimation
pub mod aggregate;      // Sessions → daily aggregates
pub mod streak;
pub mod debt;
pub mod dashboard;

// Re-export commonly used types
pub use config::EngineConfig;
pub use error::ImportError;
pub use entities::{
    BookDraft, CatalogImportRow, DailyReadingAggregate, ImportDecision, ImportPreviewRow,
    LibraryEntry, ReadingSession, ReadingState,
};
pub use tokenizer::{split_fields, split_logical_lines, tokenize, LogicalLine};
pub use parser::{map_shelf_to_state, parse_catalog_csv, CatalogColumns, ParsedCatalog, ShelfMapping};
pub use deduplication::{
    detect_conflicts, normalize_for_match, ConflictDetector, ConflictMatch, MatchStrategy,
};
pub use reconciliation::{
    apply_decisions, build_import_plan, decision_map, require_decisions, DecisionItem,
    ImportPipeline, ImportPlan, ImportPreview, MergeResult, Replacement,
};
pub use links::build_goodreads_search_url;
pub use temporal::{format_pages, format_relative_date, to_iso_date, utc_today};
pub use progress::{
    estimate_words_default, estimate_words_from_progress, words_to_pages, ProgressEstimator,
    SessionEstimate,
};
pub use aggregate::{build_daily_aggregates, weekly_activity};
pub use streak::{calc_book_streak, calculate_streak, calculate_streak_at, StreakResult};
pub use debt::{calculate_reading_debt, calculate_reading_debt_at, DebtCalculator, DebtResult};
pub use dashboard::{AnalyticsEngine, DashboardStats};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
