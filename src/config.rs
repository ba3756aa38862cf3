// ⚙️ Engine Configuration - Policy constants as data
//
// Every threshold used by the analytics and import code lives here with
// its production default. A TOML file may override any subset of keys.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const WORDS_PER_PAGE: u64 = 250;
pub const MIN_PAGES_PER_DAY: u64 = 5;
pub const MAX_DEBT_DAYS: u64 = 15;
/// Average novel length
pub const DEFAULT_BOOK_WORDS: u64 = 80_000;
pub const MAX_CSV_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Words that make up one page
    pub words_per_page: u64,

    /// Pages needed for a day to qualify for streaks
    pub min_pages_per_day: u64,

    /// Cap on reading debt, in days
    pub max_debt_days: u64,

    /// Book length assumed when the caller gives none
    pub default_book_words: u64,

    /// Upload limit for catalog CSV files
    pub max_csv_bytes: usize,

    /// Default tracing filter when RUST_LOG is unset
    pub log_level: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            words_per_page: WORDS_PER_PAGE,
            min_pages_per_day: MIN_PAGES_PER_DAY,
            max_debt_days: MAX_DEBT_DAYS,
            default_book_words: DEFAULT_BOOK_WORDS,
            max_csv_bytes: MAX_CSV_BYTES,
            log_level: "info".to_string(),
        }
    }
}

impl EngineConfig {
    /// Parse a TOML document; absent keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: EngineConfig =
            toml::from_str(content).context("Failed to parse engine configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml_str(&content)
    }

    /// Load from `path` if given, otherwise use defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    fn validate(&self) -> Result<()> {
        // Page conversion divides by this
        if self.words_per_page == 0 {
            anyhow::bail!("words_per_page must be greater than zero");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_policy_constants() {
        let config = EngineConfig::default();
        assert_eq!(config.words_per_page, 250);
        assert_eq!(config.min_pages_per_day, 5);
        assert_eq!(config.max_debt_days, 15);
        assert_eq!(config.default_book_words, 80_000);
        assert_eq!(config.max_csv_bytes, 5 * 1024 * 1024);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = EngineConfig::from_toml_str("max_debt_days = 30\n").unwrap();
        assert_eq!(config.max_debt_days, 30);
        assert_eq!(config.words_per_page, 250);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_zero_words_per_page_rejected() {
        let result = EngineConfig::from_toml_str("words_per_page = 0\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "min_pages_per_day = 10").unwrap();
        writeln!(file, "log_level = \"debug\"").unwrap();

        let config = EngineConfig::load(file.path()).unwrap();
        assert_eq!(config.min_pages_per_day, 10);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_load_or_default_without_path() {
        let config = EngineConfig::load_or_default(None).unwrap();
        assert_eq!(config, EngineConfig::default());
    }
}
