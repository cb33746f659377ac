//! Memoized loader for the sales record set.
//!
//! Wraps [`load_records`] with a single-slot cache keyed on the source file's
//! identity. Repeated [`DataManager::records`] calls against an unchanged
//! file return the cached [`RecordSet`] without re-reading it; the cache is
//! invalidated only when the file changes on disk or the caller asks for it.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use dash_core::error::{DashError, Result};
use dash_core::models::RecordSet;
use dash_data::reader::load_records;

// ── SourceFingerprint ─────────────────────────────────────────────────────────

/// Identity of the source file's on-disk state.
///
/// Two fingerprints compare equal when the file's modification time and byte
/// length both match; that is the staleness signal for the cache slot.
#[derive(Debug, Clone, PartialEq, Eq)]
struct SourceFingerprint {
    modified: Option<SystemTime>,
    len: u64,
}

impl SourceFingerprint {
    fn of(path: &Path) -> Result<Self> {
        let meta = fs::metadata(path).map_err(|e| DashError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(Self {
            modified: meta.modified().ok(),
            len: meta.len(),
        })
    }
}

// ── DataManager ───────────────────────────────────────────────────────────────

/// Single-slot cache around the CSV loader.
///
/// # Example
/// ```no_run
/// use dash_runtime::data_manager::DataManager;
///
/// let mut mgr = DataManager::new("df_sql.csv");
/// let records = mgr.records()?;
/// println!("{} rows", records.len());
/// # Ok::<(), dash_core::error::DashError>(())
/// ```
pub struct DataManager {
    /// Path of the sales CSV.
    source: PathBuf,
    /// Most recently loaded record set.
    cache: Option<RecordSet>,
    /// Fingerprint of the file state the cache was loaded from.
    fingerprint: Option<SourceFingerprint>,
    /// Human-readable description of the last load error encountered.
    last_error: Option<String>,
}

impl DataManager {
    /// Create a manager for the CSV at `source`. Nothing is read until the
    /// first [`records`](Self::records) call.
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            cache: None,
            fingerprint: None,
            last_error: None,
        }
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Path of the source file.
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Return the record set, re-reading the file only when it changed.
    ///
    /// On load failure the error propagates and the previous cache state is
    /// left untouched, so a later call can still retry.
    pub fn records(&mut self) -> Result<&RecordSet> {
        if !self.is_cache_valid() {
            self.reload()?;
        }
        self.cache
            .as_ref()
            .ok_or_else(|| DashError::Config("record cache empty after load".to_string()))
    }

    /// Discard the cache, forcing the next [`records`](Self::records) call to
    /// re-read the file.
    pub fn invalidate(&mut self) {
        self.cache = None;
        self.fingerprint = None;
        tracing::debug!("record cache invalidated");
    }

    /// `true` when the cache holds data loaded from the file's current state.
    pub fn is_cache_valid(&self) -> bool {
        match (self.cache.as_ref(), self.fingerprint.as_ref()) {
            (Some(_), Some(cached)) => {
                // A file we can no longer stat forces a reload, which will
                // surface the underlying error.
                SourceFingerprint::of(&self.source)
                    .map(|current| current == *cached)
                    .unwrap_or(false)
            }
            _ => false,
        }
    }

    /// Human-readable description of the last load error, or `None`.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    // ── Private helpers ───────────────────────────────────────────────────

    fn reload(&mut self) -> Result<()> {
        let fingerprint = SourceFingerprint::of(&self.source)?;
        match load_records(&self.source) {
            Ok(records) => {
                tracing::debug!(
                    rows = records.len(),
                    "record cache updated from {}",
                    self.source.display()
                );
                self.cache = Some(records);
                self.fingerprint = Some(fingerprint);
                self.last_error = None;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load sales records");
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
