// ⚖️ Import Reconciliation - Route previewed rows by user decision
//
// preview:  CSV → rows + warnings → conflict metadata
// confirm:  CSV → rows → conflicts → decisions → create / replace / skip
//
// The confirm step re-parses and re-matches instead of trusting a preview
// the client may have edited.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info};

use crate::config::{EngineConfig, MAX_CSV_BYTES};
use crate::deduplication::detect_conflicts;
use crate::entities::{BookDraft, CatalogImportRow, ImportDecision, ImportPreviewRow, LibraryEntry};
use crate::error::ImportError;
use crate::links::build_goodreads_search_url;
use crate::parser::{check_csv_size, parse_catalog_csv};

// ============================================================================
// DECISION ROUTING
// ============================================================================

/// Preview rows split into actionable batches
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeResult {
    /// Rows without a conflict
    pub creates: Vec<ImportPreviewRow>,

    /// Conflicting rows the user chose to overwrite
    pub replaces: Vec<ImportPreviewRow>,

    /// Conflicting rows kept, skipped, or left undecided
    pub skipped: usize,
}

/// Partition preview rows by decision.
///
/// Decisions for non-conflicting rows are ignored. A conflicting row with
/// no decision counts as skipped.
pub fn apply_decisions(
    previews: &[ImportPreviewRow],
    decisions: &HashMap<usize, ImportDecision>,
) -> MergeResult {
    let mut result = MergeResult::default();

    for preview in previews {
        if !preview.has_conflict {
            result.creates.push(preview.clone());
            continue;
        }

        match decisions.get(&preview.row_index) {
            Some(ImportDecision::ReplaceExisting) => result.replaces.push(preview.clone()),
            Some(ImportDecision::KeepExisting) | Some(ImportDecision::SkipImport) | None => {
                result.skipped += 1
            }
        }
    }

    result
}

/// One decision as submitted by a client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionItem {
    pub row_index: usize,
    pub decision: ImportDecision,
}

/// Collect submitted decisions; a repeated row index keeps the last one
pub fn decision_map(items: &[DecisionItem]) -> HashMap<usize, ImportDecision> {
    items.iter().map(|item| (item.row_index, item.decision)).collect()
}

/// Strict confirm check: every conflicting row must carry a decision
pub fn require_decisions(
    previews: &[ImportPreviewRow],
    decisions: &HashMap<usize, ImportDecision>,
) -> Result<(), ImportError> {
    let undecided = previews
        .iter()
        .filter(|p| p.has_conflict && !decisions.contains_key(&p.row_index))
        .count();

    if undecided > 0 {
        return Err(ImportError::MissingDecisions(undecided));
    }
    Ok(())
}

// ============================================================================
// IMPORT PLAN
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Replacement {
    pub entry_id: String,
    pub draft: BookDraft,
}

/// Writes the library store should perform, in row order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportPlan {
    pub creates: Vec<BookDraft>,
    pub replaces: Vec<Replacement>,
    pub skipped: usize,
}

impl ImportPlan {
    pub fn summary(&self) -> String {
        format!(
            "{} to create, {} to replace, {} skipped",
            self.creates.len(),
            self.replaces.len(),
            self.skipped
        )
    }
}

/// Draft written for an imported row. Empty author becomes none.
pub fn draft_from_row(row: &CatalogImportRow) -> BookDraft {
    let author = if row.author.is_empty() {
        None
    } else {
        Some(row.author.clone())
    };

    BookDraft {
        title: row.title.clone(),
        goodreads_search_url: build_goodreads_search_url(&row.title, author.as_deref()),
        author,
        state: row.state,
    }
}

/// Turn routed rows into store writes
pub fn build_import_plan(merge: &MergeResult) -> ImportPlan {
    let creates = merge.creates.iter().map(|p| draft_from_row(&p.row)).collect();

    let replaces = merge
        .replaces
        .iter()
        .filter_map(|p| {
            p.existing_entry_id.as_ref().map(|id| Replacement {
                entry_id: id.clone(),
                draft: draft_from_row(&p.row),
            })
        })
        .collect();

    ImportPlan {
        creates,
        replaces,
        skipped: merge.skipped,
    }
}

// ============================================================================
// IMPORT PIPELINE
// ============================================================================

/// What the user reviews before confirming
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportPreview {
    pub previews: Vec<ImportPreviewRow>,
    pub warnings: Vec<String>,
}

impl ImportPreview {
    pub fn conflict_count(&self) -> usize {
        self.previews.iter().filter(|p| p.has_conflict).count()
    }
}

pub struct ImportPipeline {
    /// Inputs longer than this (in bytes) are rejected before parsing
    pub max_csv_bytes: usize,

    /// Require a decision for every conflicting row on confirm
    pub strict_decisions: bool,
}

impl ImportPipeline {
    pub fn new() -> Self {
        ImportPipeline {
            max_csv_bytes: MAX_CSV_BYTES,
            strict_decisions: true,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        ImportPipeline {
            max_csv_bytes: config.max_csv_bytes,
            ..Self::new()
        }
    }

    /// Lenient mode: undecided conflicts are skipped instead of rejected
    pub fn lenient(mut self) -> Self {
        self.strict_decisions = false;
        self
    }

    /// Parse and match, without deciding anything
    pub fn preview(&self, csv_text: &str, existing: &[LibraryEntry]) -> Result<ImportPreview, ImportError> {
        check_csv_size(csv_text.len(), self.max_csv_bytes)?;
        let parsed = parse_catalog_csv(csv_text)?;
        let previews = detect_conflicts(&parsed.rows, existing);

        Ok(ImportPreview {
            previews,
            warnings: parsed.warnings,
        })
    }

    /// Re-run the preview and apply decisions to it
    pub fn confirm(
        &self,
        csv_text: &str,
        existing: &[LibraryEntry],
        decisions: &[DecisionItem],
    ) -> Result<ImportPlan, ImportError> {
        let preview = self.preview(csv_text, existing)?;
        let decisions = decision_map(decisions);

        if self.strict_decisions {
            require_decisions(&preview.previews, &decisions)?;
        }

        let merge = apply_decisions(&preview.previews, &decisions);
        debug!(
            creates = merge.creates.len(),
            replaces = merge.replaces.len(),
            skipped = merge.skipped,
            "Applied import decisions"
        );

        let plan = build_import_plan(&merge);
        info!("Import plan ready: {}", plan.summary());
        Ok(plan)
    }
}

impl Default for ImportPipeline {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================
