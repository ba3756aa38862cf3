// 📚 Book Entity - Library catalog values
//
// The library store owns identity (`id`); this engine only reads entries
// and proposes drafts for the store to create or overwrite.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// READING STATE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadingState {
    ToRead,
    Reading,
    Completed,
}

impl ReadingState {
    pub const ALL: [ReadingState; 3] = [
        ReadingState::ToRead,
        ReadingState::Reading,
        ReadingState::Completed,
    ];

    /// Wire value, as stored by the library
    pub fn as_str(&self) -> &'static str {
        match self {
            ReadingState::ToRead => "to_read",
            ReadingState::Reading => "reading",
            ReadingState::Completed => "completed",
        }
    }

    /// Human-readable label for display
    pub fn label(&self) -> &'static str {
        match self {
            ReadingState::ToRead => "To Read",
            ReadingState::Reading => "Reading",
            ReadingState::Completed => "Completed",
        }
    }
}

impl Default for ReadingState {
    fn default() -> Self {
        ReadingState::ToRead
    }
}

impl fmt::Display for ReadingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReadingState {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReadingState::ALL
            .iter()
            .copied()
            .find(|state| state.as_str() == s)
            .ok_or_else(|| anyhow::anyhow!("Invalid reading state: {:?}", s))
    }
}

// ============================================================================
// LIBRARY ENTRY
// ============================================================================

/// Existing catalog item, as supplied by the library store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryEntry {
    /// Opaque identifier owned by the store
    pub id: String,

    pub title: String,

    #[serde(default)]
    pub author: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<ReadingState>,
}

impl LibraryEntry {
    pub fn new(id: &str, title: &str, author: Option<&str>) -> Self {
        LibraryEntry {
            id: id.to_string(),
            title: title.to_string(),
            author: author.map(|a| a.to_string()),
            state: None,
        }
    }
}

// ============================================================================
// BOOK DRAFT
// ============================================================================

/// Values to write for a created or replaced entry.
/// Replacing keeps the entry's progress and upload; only these fields change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookDraft {
    pub title: String,
    pub author: Option<String>,
    pub state: ReadingState,
    pub goodreads_search_url: String,
}
