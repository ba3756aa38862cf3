// 📥 Import Entities - Rows parsed from a catalog export
// CatalogImportRow → ImportPreviewRow → (decision) → create / replace / skip

use super::book::ReadingState;
use serde::{Deserialize, Serialize};

/// One row parsed from an external catalog export
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogImportRow {
    /// Trimmed, never empty
    pub title: String,

    /// Trimmed, may be empty
    pub author: String,

    /// Shelf label as it appeared in the source
    pub shelf: String,

    /// Source catalog's own id ("Book Id" column)
    pub external_id: Option<String>,

    pub state: ReadingState,

    /// Why a fallback was applied, if one was
    pub warning: Option<String>,
}

impl CatalogImportRow {
    /// Create a row with the required fields
    pub fn new(title: &str, author: &str, shelf: &str, state: ReadingState) -> Self {
        CatalogImportRow {
            title: title.to_string(),
            author: author.to_string(),
            shelf: shelf.to_string(),
            external_id: None,
            state,
            warning: None,
        }
    }

    /// Builder pattern: add source catalog id
    pub fn with_external_id(mut self, external_id: String) -> Self {
        self.external_id = Some(external_id);
        self
    }

    /// Builder pattern: record a fallback warning
    pub fn with_warning(mut self, warning: String) -> Self {
        self.warning = Some(warning);
        self
    }
}

/// Import row paired with conflict metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportPreviewRow {
    /// Zero-based position in the parsed-rows sequence
    pub row_index: usize,
    pub row: CatalogImportRow,
    pub has_conflict: bool,
    pub existing_entry_id: Option<String>,
}

impl ImportPreviewRow {
    /// Row that matched an existing entry
    pub fn conflict(row_index: usize, row: CatalogImportRow, existing_entry_id: &str) -> Self {
        ImportPreviewRow {
            row_index,
            row,
            has_conflict: true,
            existing_entry_id: Some(existing_entry_id.to_string()),
        }
    }

    /// Row with no counterpart in the library
    pub fn new_entry(row_index: usize, row: CatalogImportRow) -> Self {
        ImportPreviewRow {
            row_index,
            row,
            has_conflict: false,
            existing_entry_id: None,
        }
    }
}

/// User's choice for a conflicting row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportDecision {
    KeepExisting,
    ReplaceExisting,
    SkipImport,
}

impl ImportDecision {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImportDecision::KeepExisting => "keep_existing",
            ImportDecision::ReplaceExisting => "replace_existing",
            ImportDecision::SkipImport => "skip_import",
        }
    }
}
