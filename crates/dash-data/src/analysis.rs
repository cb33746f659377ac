//! Top-level analysis pipeline.
//!
//! Chains load → filter → summarize → correlate and attaches timing
//! metadata, returning an [`AnalysisResult`] ready for a presentation layer.

use std::path::Path;

use chrono::Utc;
use dash_core::error::Result;
use dash_core::models::{FilterSelection, RecordSet};
use tracing::debug;

use crate::correlation::{correlation_matrix, CorrelationMatrix};
use crate::filter::filter_records;
use crate::reader::load_records;
use crate::summary::{summarize, SalesSummary};

// ── Public types ──────────────────────────────────────────────────────────────

/// Metadata produced alongside the analysis result.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AnalysisMetadata {
    /// ISO-8601 timestamp when this result was generated.
    pub generated_at: String,
    /// Rows in the full record set before filtering.
    pub rows_loaded: usize,
    /// Rows remaining after the filter.
    pub rows_selected: usize,
    /// Wall-clock seconds spent loading the CSV, when this run loaded it.
    pub load_time_seconds: Option<f64>,
    /// Wall-clock seconds spent filtering and aggregating.
    pub summarize_time_seconds: f64,
}

/// The complete output of one analysis run.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AnalysisResult {
    /// The filter the aggregates were computed under.
    pub filter: FilterSelection,
    /// KPI scalars and groupings over the filtered view.
    pub summary: SalesSummary,
    /// Correlation matrix over the filtered view.
    pub correlation: CorrelationMatrix,
    /// Metadata about this analysis run.
    pub metadata: AnalysisMetadata,
}

// ── Public functions ──────────────────────────────────────────────────────────

/// Run the aggregate suite over an already-loaded record set.
///
/// Pure: no I/O, no failure paths. An empty selection produces the documented
/// degenerate aggregates rather than an error.
pub fn analyze_records(records: &RecordSet, selection: &FilterSelection) -> AnalysisResult {
    let summarize_start = std::time::Instant::now();

    let view = filter_records(records, selection);
    let summary = summarize(&view);
    let correlation = correlation_matrix(&view);

    let metadata = AnalysisMetadata {
        generated_at: Utc::now().to_rfc3339(),
        rows_loaded: records.len(),
        rows_selected: view.len(),
        load_time_seconds: None,
        summarize_time_seconds: summarize_start.elapsed().as_secs_f64(),
    };

    debug!(
        rows_loaded = metadata.rows_loaded,
        rows_selected = metadata.rows_selected,
        "analysis complete"
    );

    AnalysisResult {
        filter: selection.clone(),
        summary,
        correlation,
        metadata,
    }
}

/// Load the CSV at `source` and run the aggregate suite under `selection`.
///
/// Load failures (missing file, missing column, malformed cell) abort the
/// run; nothing downstream of a successful load can fail.
pub fn analyze_file(source: &Path, selection: &FilterSelection) -> Result<AnalysisResult> {
    let load_start = std::time::Instant::now();
    let records = load_records(source)?;
    let load_time = load_start.elapsed().as_secs_f64();

    let mut result = analyze_records(&records, selection);
    result.metadata.load_time_seconds = Some(load_time);
    Ok(result)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
