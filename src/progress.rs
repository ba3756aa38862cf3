// 📏 Progress Estimator - Reading position deltas → words → pages
//
//   250 words = 1 page (floor)
//   words = round(clamp(delta, 0, 100) / 100 * total_words)

use serde::{Deserialize, Serialize};

use crate::config::{EngineConfig, DEFAULT_BOOK_WORDS, WORDS_PER_PAGE};

/// Full pages represented by a word count
pub fn words_to_pages(words: u64) -> u64 {
    words / WORDS_PER_PAGE
}

/// Estimate words read from a percentage-point delta in reading position.
/// Out-of-range deltas are clamped, never rejected.
pub fn estimate_words_from_progress(progress_delta: f64, total_words: u64) -> u64 {
    let clamped = if progress_delta.is_nan() {
        0.0
    } else {
        progress_delta.clamp(0.0, 100.0)
    };
    (clamped / 100.0 * total_words as f64).round() as u64
}

/// Same as `estimate_words_from_progress` with an average-novel length
pub fn estimate_words_default(progress_delta: f64) -> u64 {
    estimate_words_from_progress(progress_delta, DEFAULT_BOOK_WORDS)
}

/// What one reading session contributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionEstimate {
    pub words: u64,
    pub pages: u64,

    /// Position to store on the book, 0-100
    pub progress_percent: u8,
}

pub struct ProgressEstimator {
    pub words_per_page: u64,
    pub default_book_words: u64,
}

impl ProgressEstimator {
    pub fn new() -> Self {
        ProgressEstimator {
            words_per_page: WORDS_PER_PAGE,
            default_book_words: DEFAULT_BOOK_WORDS,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        ProgressEstimator {
            words_per_page: config.words_per_page.max(1),
            default_book_words: config.default_book_words,
        }
    }

    pub fn words_to_pages(&self, words: u64) -> u64 {
        words / self.words_per_page
    }

    /// Estimate a session from its start and end positions.
    ///
    /// Returns `None` when the reader made no forward progress; such
    /// sessions are not recorded.
    pub fn estimate_session(
        &self,
        progress_start: f64,
        progress_end: f64,
        total_words: Option<u64>,
    ) -> Option<SessionEstimate> {
        let delta = progress_end - progress_start;
        if delta.is_nan() || delta <= 0.0 {
            return None;
        }

        let words =
            estimate_words_from_progress(delta, total_words.unwrap_or(self.default_book_words));

        Some(SessionEstimate {
            words,
            pages: self.words_to_pages(words),
            progress_percent: progress_end.round().clamp(0.0, 100.0) as u8,
        })
    }
}

impl Default for ProgressEstimator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_words_to_pages_boundary() {
        assert_eq!(words_to_pages(0), 0);
        assert_eq!(words_to_pages(249), 0);
        assert_eq!(words_to_pages(250), 1);
        assert_eq!(words_to_pages(499), 1);
        assert_eq!(words_to_pages(500), 2);
    }

    #[test]
    fn test_estimate_words_clamps() {
        assert_eq!(estimate_words_default(-10.0), 0);
        assert_eq!(estimate_words_default(150.0), estimate_words_default(100.0));
        assert_eq!(estimate_words_default(100.0), 80_000);
        assert_eq!(estimate_words_default(f64::NAN), 0);
    }

    #[test]
    fn test_estimate_words_rounds() {
        assert_eq!(estimate_words_from_progress(1.0, 80_000), 800);
        assert_eq!(estimate_words_from_progress(0.5, 1_001), 5);
        assert_eq!(estimate_words_from_progress(50.0, 3), 2);
    }

    #[test]
    fn test_estimate_session_forward_progress() {
        let estimator = ProgressEstimator::new();
        let estimate = estimator.estimate_session(10.0, 12.5, None).unwrap();
        assert_eq!(estimate.words, 2_000);
        assert_eq!(estimate.pages, 8);
        assert_eq!(estimate.progress_percent, 13);
    }

    #[test]
    fn test_estimate_session_custom_length() {
        let estimator = ProgressEstimator::new();
        let estimate = estimator.estimate_session(0.0, 10.0, Some(25_000)).unwrap();
        assert_eq!(estimate.words, 2_500);
        assert_eq!(estimate.pages, 10);
    }

    #[test]
    fn test_estimate_session_no_progress() {
        let estimator = ProgressEstimator::new();
        assert_eq!(estimator.estimate_session(40.0, 40.0, None), None);
        assert_eq!(estimator.estimate_session(40.0, 30.0, None), None);
    }

    #[test]
    fn test_configured_words_per_page() {
        let config = EngineConfig {
            words_per_page: 300,
            ..EngineConfig::default()
        };
        let estimator = ProgressEstimator::from_config(&config);
        assert_eq!(estimator.words_to_pages(299), 0);
        assert_eq!(estimator.words_to_pages(300), 1);
    }
}
