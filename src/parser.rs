// 🏗️ Catalog Parser - Goodreads-style export → typed import rows
//
// Structural problems (no data, missing columns) fail the whole parse.
// Row problems (no title, unknown shelf) skip or default the row and
// leave a warning, so one bad line never blocks an import.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

use crate::entities::{CatalogImportRow, ReadingState};
use crate::error::ImportError;
use crate::tokenizer::{split_fields, tokenize};

// ============================================================================
// COLUMNS
// ============================================================================

pub const TITLE_COLUMN: &str = "Title";
pub const AUTHOR_COLUMN: &str = "Author";
pub const SHELF_COLUMN: &str = "Exclusive Shelf";
pub const BOOK_ID_COLUMN: &str = "Book Id";

pub const REQUIRED_COLUMNS: [&str; 3] = [TITLE_COLUMN, AUTHOR_COLUMN, SHELF_COLUMN];

/// Field positions of the columns we read, located by exact header name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogColumns {
    pub title: usize,
    pub author: usize,
    pub shelf: usize,
    pub book_id: Option<usize>,
}

impl CatalogColumns {
    /// Locate columns in a header row.
    ///
    /// Header names are compared case-sensitively after trimming. With a
    /// duplicated header the last occurrence wins.
    pub fn locate(headers: &[String]) -> Result<Self, ImportError> {
        let positions: HashMap<&str, usize> = headers
            .iter()
            .enumerate()
            .filter(|(_, h)| !h.is_empty())
            .map(|(i, h)| (h.trim(), i))
            .collect();

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|col| !positions.contains_key(*col))
            .map(|col| col.to_string())
            .collect();

        if !missing.is_empty() {
            return Err(ImportError::MissingColumns(missing));
        }

        Ok(CatalogColumns {
            title: positions[TITLE_COLUMN],
            author: positions[AUTHOR_COLUMN],
            shelf: positions[SHELF_COLUMN],
            book_id: positions.get(BOOK_ID_COLUMN).copied(),
        })
    }
}

// ============================================================================
// SHELF MAPPING
// ============================================================================

/// Result of mapping a source shelf label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShelfMapping {
    pub state: ReadingState,
    pub warning: Option<String>,
}

/// Map a source shelf label to a reading state.
/// Unknown labels (including empty) fall back to To Read with a warning.
pub fn map_shelf_to_state(shelf: &str) -> ShelfMapping {
    let state = match shelf.trim().to_lowercase().as_str() {
        "to-read" => Some(ReadingState::ToRead),
        "currently-reading" => Some(ReadingState::Reading),
        "read" => Some(ReadingState::Completed),
        _ => None,
    };

    match state {
        Some(state) => ShelfMapping {
            state,
            warning: None,
        },
        None => ShelfMapping {
            state: ReadingState::ToRead,
            warning: Some(format!(
                "Unknown shelf \"{}\" mapped to \"{}\"",
                shelf,
                ReadingState::ToRead.label()
            )),
        },
    }
}

// ============================================================================
// PARSE RESULT
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedCatalog {
    /// Importable rows, in source order
    pub rows: Vec<CatalogImportRow>,

    /// Every row-level warning, in source order
    pub warnings: Vec<String>,
}

/// Parse a catalog export into typed rows.
///
/// Warning row numbers count physical logical lines, header being row 1.
pub fn parse_catalog_csv(text: &str) -> Result<ParsedCatalog, ImportError> {
    let lines = tokenize(text);

    let (header, data) = match lines.split_first() {
        Some((header, data)) if !data.is_empty() => (header, data),
        _ => return Err(ImportError::Empty),
    };

    let columns = CatalogColumns::locate(&split_fields(&header.text))?;

    let mut parsed = ParsedCatalog::default();

    for line in data {
        let fields = split_fields(&line.text);
        let field = |idx: usize| fields.get(idx).map(|f| f.trim()).unwrap_or("");

        let title = field(columns.title);
        if title.is_empty() {
            parsed
                .warnings
                .push(format!("Row {}: Skipped — missing title", line.number));
            continue;
        }

        let author = field(columns.author);
        let shelf = field(columns.shelf);
        let mapping = map_shelf_to_state(shelf);

        let mut row = CatalogImportRow::new(title, author, shelf, mapping.state);

        if let Some(id) = columns.book_id.map(field).filter(|id| !id.is_empty()) {
            row = row.with_external_id(id.to_string());
        }

        if let Some(warning) = mapping.warning {
            parsed.warnings.push(format!("Row {}: {}", line.number, warning));
            row = row.with_warning(warning);
        }

        parsed.rows.push(row);
    }

    debug!(
        rows = parsed.rows.len(),
        warnings = parsed.warnings.len(),
        "Parsed catalog CSV"
    );

    Ok(parsed)
}

/// Reject inputs above the upload limit before parsing
pub fn check_csv_size(size: usize, limit: usize) -> Result<(), ImportError> {
    if size > limit {
        return Err(ImportError::TooLarge { size, limit });
    }
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
