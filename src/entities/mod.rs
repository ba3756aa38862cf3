// Entity Models
// Plain value types exchanged with the library store and the session log.
// Nothing here holds a reference to anything else.

pub mod book;
pub mod import;
pub mod session;

pub use book::{BookDraft, LibraryEntry, ReadingState};
pub use import::{CatalogImportRow, ImportDecision, ImportPreviewRow};
pub use session::{DailyReadingAggregate, ReadingSession};
