// 🔍 Conflict Detection - Match import rows against the existing library
// Two strategies: Title+Author, then Title Only (only for author-less rows)

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

use crate::entities::{CatalogImportRow, ImportPreviewRow, LibraryEntry};

/// Normalize text for matching: trim, lowercase, collapse whitespace runs
pub fn normalize_for_match(value: &str) -> String {
    value
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

// ============================================================================
// MATCH STRATEGY
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchStrategy {
    /// Normalized title and normalized author both equal
    TitleAuthor,

    /// Import row has no author; normalized title equal
    TitleOnly,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictMatch {
    pub entry_id: String,
    pub strategy: MatchStrategy,
}

// ============================================================================
// CONFLICT DETECTOR
// ============================================================================

/// Lookup tables over the existing library
pub struct ConflictDetector<'a> {
    /// (title, author) → entry; a later duplicate key overwrites an earlier one
    by_title_author: HashMap<(String, String), &'a LibraryEntry>,

    /// title → first entry seen with that title
    by_title: HashMap<String, &'a LibraryEntry>,
}

impl<'a> ConflictDetector<'a> {
    pub fn new(existing: &'a [LibraryEntry]) -> Self {
        let mut by_title_author = HashMap::new();
        let mut by_title = HashMap::new();

        for entry in existing {
            let title = normalize_for_match(&entry.title);
            let author = normalize_for_match(entry.author.as_deref().unwrap_or(""));

            // First wins: later same-titled entries stay invisible to title-only lookup
            by_title.entry(title.clone()).or_insert(entry);
            by_title_author.insert((title, author), entry);
        }

        ConflictDetector {
            by_title_author,
            by_title,
        }
    }

    /// Find the existing entry an import row collides with, if any.
    ///
    /// A row that names an author must match that author; the title-only
    /// fallback applies only to rows with an empty author.
    pub fn find_match(&self, row: &CatalogImportRow) -> Option<ConflictMatch> {
        let title = normalize_for_match(&row.title);
        let author = normalize_for_match(&row.author);

        if let Some(entry) = self.by_title_author.get(&(title.clone(), author.clone())) {
            return Some(ConflictMatch {
                entry_id: entry.id.clone(),
                strategy: MatchStrategy::TitleAuthor,
            });
        }

        if author.is_empty() {
            if let Some(entry) = self.by_title.get(&title) {
                return Some(ConflictMatch {
                    entry_id: entry.id.clone(),
                    strategy: MatchStrategy::TitleOnly,
                });
            }
        }

        None
    }

    /// Tag every row with its index and conflict metadata
    pub fn detect(&self, rows: &[CatalogImportRow]) -> Vec<ImportPreviewRow> {
        let previews: Vec<ImportPreviewRow> = rows
            .iter()
            .enumerate()
            .map(|(i, row)| match self.find_match(row) {
                Some(m) => ImportPreviewRow::conflict(i, row.clone(), &m.entry_id),
                None => ImportPreviewRow::new_entry(i, row.clone()),
            })
            .collect();

        debug!(
            rows = previews.len(),
            conflicts = previews.iter().filter(|p| p.has_conflict).count(),
            "Detected import conflicts"
        );

        previews
    }
}

/// Match import rows against existing entries
pub fn detect_conflicts(rows: &[CatalogImportRow], existing: &[LibraryEntry]) -> Vec<ImportPreviewRow> {
    ConflictDetector::new(existing).detect(rows)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::ReadingState;

    fn create_test_row(title: &str, author: &str) -> CatalogImportRow {
        CatalogImportRow::new(title, author, "read", ReadingState::Completed)
    }

    fn library() -> Vec<LibraryEntry> {
        vec![LibraryEntry::new("dune-1", "Dune", Some("Frank Herbert"))]
    }

    #[test]
    fn test_normalize_for_match() {
        assert_eq!(normalize_for_match("  The   Left Hand\tof  Darkness "), "the left hand of darkness");
        assert_eq!(normalize_for_match(""), "");
        assert_eq!(normalize_for_match("   "), "");
    }

    #[test]
    fn test_title_author_match_case_insensitive() {
        let previews = detect_conflicts(&[create_test_row("dune", "frank  herbert")], &library());
        assert!(previews[0].has_conflict);
        assert_eq!(previews[0].existing_entry_id.as_deref(), Some("dune-1"));
    }

    #[test]
    fn test_title_only_fallback_for_empty_author() {
        let library = library();
        let detector = ConflictDetector::new(&library);
        let m = detector.find_match(&create_test_row("Dune", "")).unwrap();
        assert_eq!(m.entry_id, "dune-1");
        assert_eq!(m.strategy, MatchStrategy::TitleOnly);
    }

    #[test]
    fn test_different_author_is_not_conflict() {
        let previews = detect_conflicts(&[create_test_row("Dune", "Someone Else")], &library());
        assert!(!previews[0].has_conflict);
        assert_eq!(previews[0].existing_entry_id, None);
    }

    #[test]
    fn test_entry_without_author_matches_empty_author_row() {
        let library = vec![LibraryEntry::new("e1", "Beowulf", None)];
        let detector = ConflictDetector::new(&library);
        let m = detector.find_match(&create_test_row("beowulf", "")).unwrap();
        assert_eq!(m.strategy, MatchStrategy::TitleAuthor);
    }

    #[test]
    fn test_title_only_first_entry_wins() {
        let library = vec![
            LibraryEntry::new("first", "Dune", Some("Frank Herbert")),
            LibraryEntry::new("second", "DUNE", Some("Brian Herbert")),
        ];
        let previews = detect_conflicts(&[create_test_row("Dune", "")], &library);
        assert_eq!(previews[0].existing_entry_id.as_deref(), Some("first"));
    }

    #[test]
    fn test_later_duplicate_still_matches_by_author() {
        let library = vec![
            LibraryEntry::new("first", "Dune", Some("Frank Herbert")),
            LibraryEntry::new("second", "Dune", Some("Brian Herbert")),
        ];
        let previews = detect_conflicts(&[create_test_row("Dune", "Brian Herbert")], &library);
        assert_eq!(previews[0].existing_entry_id.as_deref(), Some("second"));
    }

    #[test]
    fn test_row_indices_follow_input_order() {
        let rows = vec![
            create_test_row("Emma", "Jane Austen"),
            create_test_row("Dune", "Frank Herbert"),
        ];
        let previews = detect_conflicts(&rows, &library());
        assert_eq!(previews[0].row_index, 0);
        assert!(!previews[0].has_conflict);
        assert_eq!(previews[1].row_index, 1);
        assert!(previews[1].has_conflict);
    }

    #[test]
    fn test_empty_library_has_no_conflicts() {
        let previews = detect_conflicts(&[create_test_row("Dune", "")], &[]);
        assert_eq!(previews.len(), 1);
        assert!(!previews[0].has_conflict);
    }
}
