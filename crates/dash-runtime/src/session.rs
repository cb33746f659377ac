//! Dashboard session: current filter selection plus snapshot recomputation.
//!
//! Each filter change triggers one full synchronous recomputation of the
//! filtered view and its aggregates; nothing is shared or cached beyond the
//! immutable record set held by the [`DataManager`].

use std::path::PathBuf;

use dash_core::error::Result;
use dash_core::models::{FilterSelection, HolidayMode};
use dash_data::analysis::{analyze_records, AnalysisResult};
use serde::{Deserialize, Serialize};

use crate::data_manager::DataManager;

// ── DashboardSnapshot ─────────────────────────────────────────────────────────

/// One fully-computed dashboard state.
///
/// This is the data contract between the pipeline and a presentation layer:
/// plain structured values, no rendering types. `store_options` and
/// `dept_options` list the distinct values of the *unfiltered* data, which is
/// what a selection widget offers regardless of the current filter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    /// Distinct store ids present in the data, ascending.
    pub store_options: Vec<u32>,
    /// Distinct department ids present in the data, ascending.
    pub dept_options: Vec<u32>,
    /// The filter, aggregates, correlation matrix, and run metadata.
    pub analysis: AnalysisResult,
}

// ── DashboardSession ──────────────────────────────────────────────────────────

/// Holds the loaded data and the user's current selection.
pub struct DashboardSession {
    manager: DataManager,
    filter: Option<FilterSelection>,
}

impl DashboardSession {
    /// Create a session over the CSV at `source` with no filter applied yet.
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            manager: DataManager::new(source),
            filter: None,
        }
    }

    /// Replace the current selection wholesale.
    pub fn set_filter(&mut self, filter: FilterSelection) {
        self.filter = Some(filter);
    }

    /// Build a selection from optional store/department subsets, defaulting
    /// each omitted side to every value present in the data, and make it the
    /// current filter.
    ///
    /// This mirrors how the dashboard's selection widgets start out with
    /// everything selected.
    pub fn select(
        &mut self,
        stores: Option<std::collections::BTreeSet<u32>>,
        depts: Option<std::collections::BTreeSet<u32>>,
        holiday_mode: HolidayMode,
    ) -> Result<()> {
        let records = self.manager.records()?;
        let filter = FilterSelection {
            stores: stores.unwrap_or_else(|| records.distinct_stores()),
            depts: depts.unwrap_or_else(|| records.distinct_depts()),
            holiday_mode,
        };
        self.filter = Some(filter);
        Ok(())
    }

    /// The current selection, if one has been applied.
    pub fn filter(&self) -> Option<&FilterSelection> {
        self.filter.as_ref()
    }

    /// Recompute the full dashboard state under the current selection.
    ///
    /// With no selection applied, everything is selected. The record set is
    /// re-read only when the source file changed since the last snapshot.
    pub fn snapshot(&mut self) -> Result<DashboardSnapshot> {
        let records = self.manager.records()?;

        let filter = match &self.filter {
            Some(f) => f.clone(),
            None => FilterSelection::all_of(records),
        };

        let analysis = analyze_records(records, &filter);

        Ok(DashboardSnapshot {
            store_options: records.distinct_stores().into_iter().collect(),
            dept_options: records.distinct_depts().into_iter().collect(),
            analysis,
        })
    }

    /// Drop the cached record set, forcing the next snapshot to re-read the
    /// source file.
    pub fn invalidate(&mut self) {
        self.manager.invalidate();
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
