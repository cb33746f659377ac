//! Data pipeline for the retail sales dashboard.
//!
//! Responsible for loading the weekly sales CSV, filtering rows by the
//! user's store/department/holiday selection, and computing the aggregate
//! suite (KPI scalars, per-date series, per-store ranking, per-type
//! distributions, correlation matrix) consumed by the presentation layer.

pub mod analysis;
pub mod correlation;
pub mod filter;
pub mod reader;
pub mod summary;

pub use dash_core as core;
