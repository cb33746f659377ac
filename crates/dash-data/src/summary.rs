//! The aggregate suite computed over a filtered view.
//!
//! All functions here are pure and total: an empty view produces zero totals,
//! empty groupings, and `None` for the mean rather than an error.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use dash_core::models::{RecordSet, StoreType};
use dash_core::stats::{mean, FiveNumberSummary};
use serde::{Deserialize, Serialize};

// ── Result types ──────────────────────────────────────────────────────────────

/// Total sales for one calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateSales {
    pub date: NaiveDate,
    pub total_sales: f64,
}

/// Total sales for one store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreSales {
    pub store: u32,
    pub total_sales: f64,
}

/// The weekly-sales distribution within one store type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDistribution {
    pub store_type: StoreType,
    /// Every weekly-sales observation for this type, in view order.
    pub weekly_sales: Vec<f64>,
    /// Min / quartiles / max of `weekly_sales` — what a boxplot draws.
    pub summary: FiveNumberSummary,
}

/// The fixed suite of aggregates over a filtered view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesSummary {
    /// Sum of weekly sales; 0.0 for an empty view.
    pub total_sales: f64,
    /// Mean weekly sales; `None` for an empty view.
    pub average_weekly_sales: Option<f64>,
    /// Number of rows in the view.
    pub record_count: usize,
    /// How many of those rows are holiday weeks.
    pub holiday_count: usize,
    /// Per-date totals, ascending by date.
    pub sales_by_date: Vec<DateSales>,
    /// Per-store totals, descending by total, ties broken by ascending id.
    pub sales_by_store: Vec<StoreSales>,
    /// Per-store-type distributions, ascending by type code.
    pub sales_by_type: Vec<TypeDistribution>,
}

// ── summarize ─────────────────────────────────────────────────────────────────

/// Compute the aggregate suite over `records`.
pub fn summarize(records: &RecordSet) -> SalesSummary {
    let rows = records.records();

    let sales: Vec<f64> = rows.iter().map(|r| r.weekly_sales).collect();
    let total_sales: f64 = sales.iter().sum();
    let holiday_count = rows.iter().filter(|r| r.is_holiday).count();

    // BTreeMaps keep the date series and the store grouping key-sorted.
    let mut by_date: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    let mut by_store: BTreeMap<u32, f64> = BTreeMap::new();
    let mut by_type: BTreeMap<StoreType, Vec<f64>> = BTreeMap::new();

    for record in rows {
        *by_date.entry(record.date).or_default() += record.weekly_sales;
        *by_store.entry(record.store).or_default() += record.weekly_sales;
        by_type
            .entry(record.store_type)
            .or_default()
            .push(record.weekly_sales);
    }

    let sales_by_date = by_date
        .into_iter()
        .map(|(date, total_sales)| DateSales { date, total_sales })
        .collect();

    let mut sales_by_store: Vec<StoreSales> = by_store
        .into_iter()
        .map(|(store, total_sales)| StoreSales { store, total_sales })
        .collect();
    sales_by_store.sort_by(|a, b| {
        b.total_sales
            .total_cmp(&a.total_sales)
            .then(a.store.cmp(&b.store))
    });

    let sales_by_type = by_type
        .into_iter()
        .filter_map(|(store_type, weekly_sales)| {
            // Groups only exist for types present in the view, so the
            // summary is always computable.
            FiveNumberSummary::from_values(&weekly_sales).map(|summary| TypeDistribution {
                store_type,
                weekly_sales,
                summary,
            })
        })
        .collect();

    SalesSummary {
        total_sales,
        average_weekly_sales: mean(&sales),
        record_count: rows.len(),
        holiday_count,
        sales_by_date,
        sales_by_store,
        sales_by_type,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
