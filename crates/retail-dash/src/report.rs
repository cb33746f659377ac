//! Plain-text rendering of a dashboard snapshot.
//!
//! Prints the same figures the charts would visualise — KPI tiles, the weekly
//! trend, the store ranking, per-type distributions, and the sales
//! correlations — as aligned text tables.

use dash_core::formatting::{format_currency, format_number, percentage};
use dash_core::models::NumericColumn;
use dash_runtime::session::DashboardSnapshot;

/// Render the snapshot as a multi-section text report.
pub fn render_text(snapshot: &DashboardSnapshot, top_stores: usize) -> String {
    let mut out = String::new();
    let summary = &snapshot.analysis.summary;

    // ── KPIs ──────────────────────────────────────────────────────────────
    out.push_str("Key Performance Indicators\n");
    out.push_str(&format!(
        "  Total Sales            {}\n",
        format_currency(summary.total_sales)
    ));
    let average = match summary.average_weekly_sales {
        Some(avg) => format_currency(avg),
        None => "n/a (no rows selected)".to_string(),
    };
    out.push_str(&format!("  Average Weekly Sales   {}\n", average));
    out.push_str(&format!(
        "  Records                {}\n",
        format_number(summary.record_count as f64, 0)
    ));
    out.push_str(&format!(
        "  Holiday share          {}%\n",
        percentage(summary.holiday_count as f64, summary.record_count as f64, 1)
    ));

    // ── Weekly trend ──────────────────────────────────────────────────────
    out.push_str("\nWeekly Sales Trend\n");
    match (summary.sales_by_date.first(), summary.sales_by_date.last()) {
        (Some(first), Some(last)) => {
            out.push_str(&format!(
                "  {} weeks from {} to {}\n",
                summary.sales_by_date.len(),
                first.date,
                last.date
            ));
            if let Some(peak) = summary
                .sales_by_date
                .iter()
                .max_by(|a, b| a.total_sales.total_cmp(&b.total_sales))
            {
                out.push_str(&format!(
                    "  Peak week {} with {}\n",
                    peak.date,
                    format_currency(peak.total_sales)
                ));
            }
        }
        _ => out.push_str("  (no data)\n"),
    }

    // ── Store ranking ─────────────────────────────────────────────────────
    out.push_str(&format!("\nSales by Store (top {})\n", top_stores));
    for entry in summary.sales_by_store.iter().take(top_stores) {
        out.push_str(&format!(
            "  Store {:>3}  {:>18}  {:>5}%\n",
            entry.store,
            format_currency(entry.total_sales),
            percentage(entry.total_sales, summary.total_sales, 1)
        ));
    }
    if summary.sales_by_store.is_empty() {
        out.push_str("  (no data)\n");
    }

    // ── Per-type distributions ────────────────────────────────────────────
    out.push_str("\nSales Distribution by Store Type\n");
    for dist in &summary.sales_by_type {
        out.push_str(&format!(
            "  Type {}  n={:<7} min {} / q1 {} / median {} / q3 {} / max {}\n",
            dist.store_type,
            dist.weekly_sales.len(),
            format_currency(dist.summary.min),
            format_currency(dist.summary.q1),
            format_currency(dist.summary.median),
            format_currency(dist.summary.q3),
            format_currency(dist.summary.max),
        ));
    }
    if summary.sales_by_type.is_empty() {
        out.push_str("  (no data)\n");
    }

    // ── Correlations ──────────────────────────────────────────────────────
    out.push_str("\nCorrelation with Weekly_Sales\n");
    for column in NumericColumn::ALL {
        if column == NumericColumn::WeeklySales {
            continue;
        }
        let cell = match snapshot
            .analysis
            .correlation
            .get(NumericColumn::WeeklySales, column)
        {
            Some(r) => format!("{:+.2}", r),
            None => "  n/a".to_string(),
        };
        out.push_str(&format!("  {:<14} {}\n", column.label(), cell));
    }

    out
}

// ── Tests ─────────────────────────────────────────────────────────────────────
