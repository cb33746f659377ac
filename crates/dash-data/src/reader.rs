//! CSV ingestion for the sales pipeline.
//!
//! Turns the weekly sales export into a validated, date-sorted [`RecordSet`].
//! Loading is all-or-nothing: a missing column or an unparseable cell aborts
//! the load, so downstream consumers never see a partial dataset.

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use chrono::NaiveDate;
use csv::StringRecord;
use dash_core::error::{DashError, Result};
use dash_core::models::{RecordSet, SalesRecord, StoreType};
use tracing::debug;

/// Columns that must be present in the CSV header.
///
/// The markdown headers are required even though their cells may be empty:
/// an empty (or `NA`) markdown cell means no markdown ran that week.
pub const REQUIRED_COLUMNS: [&str; 18] = [
    "Store",
    "Dept",
    "Type",
    "Year",
    "Month",
    "Day",
    "IsHoliday",
    "Weekly_Sales",
    "Temperature",
    "Fuel_Price",
    "CPI",
    "Unemployment",
    "Size",
    "MarkDown1",
    "MarkDown2",
    "MarkDown3",
    "MarkDown4",
    "MarkDown5",
];

// ── Public API ────────────────────────────────────────────────────────────────

/// Load the sales CSV at `path` into a [`RecordSet`].
///
/// The `Date` of every record is derived from the `Year`/`Month`/`Day`
/// columns and the result is sorted ascending by date with a stable sort,
/// so loading is deterministic for a given file.
pub fn load_records(path: &Path) -> Result<RecordSet> {
    let file = File::open(path).map_err(|e| DashError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = reader.headers()?.clone();
    let header_map = build_header_map(&headers);
    ensure_required_columns(&header_map)?;

    let mut records: Vec<SalesRecord> = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        // records() starts after the header row; CSV line numbers are 1-based.
        let line = idx + 2;
        let row = result?;
        records.push(parse_row(&row, &header_map, line)?);
    }

    debug!(
        rows = records.len(),
        "loaded sales records from {}",
        path.display()
    );

    Ok(RecordSet::new(records))
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Map normalised header names to their column index.
fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

/// Normalise a header cell: strip a UTF-8 BOM (Excel exports often carry one
/// on the first column), trim, and lowercase.
fn normalize_header_name(name: &str) -> String {
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn ensure_required_columns(header_map: &HashMap<String, usize>) -> Result<()> {
    for column in REQUIRED_COLUMNS {
        if !header_map.contains_key(&column.to_ascii_lowercase()) {
            return Err(DashError::Schema {
                column: column.to_string(),
            });
        }
    }
    Ok(())
}

fn parse_row(
    row: &StringRecord,
    header_map: &HashMap<String, usize>,
    line: usize,
) -> Result<SalesRecord> {
    let store = parse_u32(row, header_map, "Store", line)?;
    let dept = parse_u32(row, header_map, "Dept", line)?;

    let type_cell = get_cell(row, header_map, "Type", line)?;
    let store_type = StoreType::parse(type_cell).ok_or_else(|| DashError::StoreTypeParse {
        line,
        value: type_cell.to_string(),
    })?;

    let year = parse_i32(row, header_map, "Year", line)?;
    let month = parse_u32(row, header_map, "Month", line)?;
    let day = parse_u32(row, header_map, "Day", line)?;
    let date = NaiveDate::from_ymd_opt(year, month, day).ok_or(DashError::DateParse {
        line,
        year,
        month,
        day,
    })?;

    let is_holiday = parse_bool(row, header_map, "IsHoliday", line)?;

    Ok(SalesRecord {
        store,
        dept,
        store_type,
        date,
        is_holiday,
        weekly_sales: parse_f64(row, header_map, "Weekly_Sales", line)?,
        temperature: parse_f64(row, header_map, "Temperature", line)?,
        fuel_price: parse_f64(row, header_map, "Fuel_Price", line)?,
        cpi: parse_f64(row, header_map, "CPI", line)?,
        unemployment: parse_f64(row, header_map, "Unemployment", line)?,
        size: parse_f64(row, header_map, "Size", line)?,
        markdown1: parse_opt_f64(row, header_map, "MarkDown1", line)?,
        markdown2: parse_opt_f64(row, header_map, "MarkDown2", line)?,
        markdown3: parse_opt_f64(row, header_map, "MarkDown3", line)?,
        markdown4: parse_opt_f64(row, header_map, "MarkDown4", line)?,
        markdown5: parse_opt_f64(row, header_map, "MarkDown5", line)?,
    })
}

/// Fetch a cell that must hold a non-empty value.
fn get_cell<'a>(
    row: &'a StringRecord,
    header_map: &HashMap<String, usize>,
    column: &str,
    line: usize,
) -> Result<&'a str> {
    let idx = header_map
        .get(&column.to_ascii_lowercase())
        .ok_or_else(|| DashError::Schema {
            column: column.to_string(),
        })?;
    row.get(*idx)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| DashError::ValueParse {
            line,
            column: column.to_string(),
            value: String::new(),
        })
}

/// Fetch a cell that may be empty or hold an NA marker.
fn get_optional_cell<'a>(
    row: &'a StringRecord,
    header_map: &HashMap<String, usize>,
    column: &str,
) -> Option<&'a str> {
    let idx = header_map.get(&column.to_ascii_lowercase())?;
    row.get(*idx)
        .map(str::trim)
        .filter(|s| !s.is_empty() && !s.eq_ignore_ascii_case("na") && !s.eq_ignore_ascii_case("nan"))
}

fn parse_u32(
    row: &StringRecord,
    header_map: &HashMap<String, usize>,
    column: &str,
    line: usize,
) -> Result<u32> {
    let cell = get_cell(row, header_map, column, line)?;
    cell.parse::<u32>().map_err(|_| DashError::ValueParse {
        line,
        column: column.to_string(),
        value: cell.to_string(),
    })
}

fn parse_i32(
    row: &StringRecord,
    header_map: &HashMap<String, usize>,
    column: &str,
    line: usize,
) -> Result<i32> {
    let cell = get_cell(row, header_map, column, line)?;
    cell.parse::<i32>().map_err(|_| DashError::ValueParse {
        line,
        column: column.to_string(),
        value: cell.to_string(),
    })
}

/// Parse a required finite float. Non-finite values are rejected so the
/// aggregate layer never has to reason about NaN sales.
fn parse_f64(
    row: &StringRecord,
    header_map: &HashMap<String, usize>,
    column: &str,
    line: usize,
) -> Result<f64> {
    let cell = get_cell(row, header_map, column, line)?;
    cell.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| DashError::ValueParse {
            line,
            column: column.to_string(),
            value: cell.to_string(),
        })
}

/// Parse an optional finite float; empty and `NA`/`NaN` cells become `None`.
fn parse_opt_f64(
    row: &StringRecord,
    header_map: &HashMap<String, usize>,
    column: &str,
    line: usize,
) -> Result<Option<f64>> {
    let Some(cell) = get_optional_cell(row, header_map, column) else {
        return Ok(None);
    };
    cell.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(Some)
        .ok_or_else(|| DashError::ValueParse {
            line,
            column: column.to_string(),
            value: cell.to_string(),
        })
}

/// Parse the holiday flag: accepts `0`/`1` and `true`/`false` (any casing).
fn parse_bool(
    row: &StringRecord,
    header_map: &HashMap<String, usize>,
    column: &str,
    line: usize,
) -> Result<bool> {
    let cell = get_cell(row, header_map, column, line)?;
    match cell.to_ascii_lowercase().as_str() {
        "0" | "false" => Ok(false),
        "1" | "true" => Ok(true),
        _ => Err(DashError::ValueParse {
            line,
            column: column.to_string(),
            value: cell.to_string(),
        }),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const HEADER: &str = "Store,Dept,Type,Year,Month,Day,IsHoliday,Weekly_Sales,Temperature,\
                          Fuel_Price,CPI,Unemployment,Size,MarkDown1,MarkDown2,MarkDown3,\
                          MarkDown4,MarkDown5";

    fn write_csv(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
        let path = dir.join(name);
        let mut file = File::create(&path).unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        path
    }

    fn sample_row(store: u32, dept: u32, ymd: (i32, u32, u32), sales: f64, holiday: u8) -> String {
        format!(
            "{store},{dept},A,{},{},{},{holiday},{sales},42.3,2.57,211.09,8.1,151315,,,,,",
            ymd.0, ymd.1, ymd.2
        )
    }

    // ── load_records ──────────────────────────────────────────────────────────

    #[test]
    fn test_load_records_basic() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "sales.csv",
            &[
                HEADER,
                &sample_row(1, 1, (2010, 2, 5), 24_924.50, 0),
                &sample_row(1, 1, (2010, 2, 12), 46_039.49, 1),
            ],
        );

        let records = load_records(&path).unwrap();
        assert_eq!(records.len(), 2);

        let first = &records.records()[0];
        assert_eq!(first.store, 1);
        assert_eq!(first.dept, 1);
        assert_eq!(first.store_type, StoreType::A);
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2010, 2, 5).unwrap());
        assert!(!first.is_holiday);
        assert!((first.weekly_sales - 24_924.50).abs() < 1e-9);
        assert!(first.markdown1.is_none());
    }

    #[test]
    fn test_load_records_sorted_by_date() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "sales.csv",
            &[
                HEADER,
                &sample_row(1, 1, (2010, 3, 5), 10.0, 0),
                &sample_row(1, 1, (2010, 2, 5), 20.0, 0),
            ],
        );

        let records = load_records(&path).unwrap();
        let dates: Vec<NaiveDate> = records.records().iter().map(|r| r.date).collect();
        assert!(dates.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_load_records_missing_column_is_schema_error() {
        let dir = TempDir::new().unwrap();
        // Header lacks Weekly_Sales.
        let path = write_csv(
            dir.path(),
            "sales.csv",
            &["Store,Dept,Type,Year,Month,Day,IsHoliday", "1,1,A,2010,2,5,0"],
        );

        let err = load_records(&path).unwrap_err();
        match err {
            DashError::Schema { column } => assert_eq!(column, "Weekly_Sales"),
            other => panic!("expected Schema error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_records_invalid_date_is_fatal() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "sales.csv",
            &[HEADER, &sample_row(1, 1, (2010, 2, 30), 10.0, 0)],
        );

        let err = load_records(&path).unwrap_err();
        assert!(matches!(err, DashError::DateParse { day: 30, .. }));
    }

    #[test]
    fn test_load_records_invalid_sales_value_is_fatal() {
        let dir = TempDir::new().unwrap();
        let bad = "1,1,A,2010,2,5,0,not-a-number,42.3,2.57,211.09,8.1,151315,,,,,";
        let path = write_csv(dir.path(), "sales.csv", &[HEADER, bad]);

        let err = load_records(&path).unwrap_err();
        match err {
            DashError::ValueParse { column, value, .. } => {
                assert_eq!(column, "Weekly_Sales");
                assert_eq!(value, "not-a-number");
            }
            other => panic!("expected ValueParse error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_records_unknown_store_type_is_fatal() {
        let dir = TempDir::new().unwrap();
        let bad = "1,1,Q,2010,2,5,0,10.0,42.3,2.57,211.09,8.1,151315,,,,,";
        let path = write_csv(dir.path(), "sales.csv", &[HEADER, bad]);

        let err = load_records(&path).unwrap_err();
        assert!(matches!(err, DashError::StoreTypeParse { .. }));
    }

    #[test]
    fn test_load_records_missing_file() {
        let err = load_records(Path::new("/tmp/does-not-exist-sales-xyz.csv")).unwrap_err();
        assert!(matches!(err, DashError::FileRead { .. }));
    }

    #[test]
    fn test_load_records_empty_body() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(dir.path(), "sales.csv", &[HEADER]);

        let records = load_records(&path).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_load_records_markdown_na_markers() {
        let dir = TempDir::new().unwrap();
        let row = "1,1,A,2010,2,5,0,10.0,42.3,2.57,211.09,8.1,151315,NA,1500.25,na,NaN,";
        let path = write_csv(dir.path(), "sales.csv", &[HEADER, row]);

        let records = load_records(&path).unwrap();
        let record = &records.records()[0];
        assert_eq!(record.markdown1, None);
        assert_eq!(record.markdown2, Some(1500.25));
        assert_eq!(record.markdown3, None);
        assert_eq!(record.markdown4, None);
        assert_eq!(record.markdown5, None);
    }

    #[test]
    fn test_load_records_boolean_spellings() {
        let dir = TempDir::new().unwrap();
        let row_true = "1,1,A,2010,2,5,TRUE,10.0,42.3,2.57,211.09,8.1,151315,,,,,";
        let row_one = "1,1,A,2010,2,12,1,10.0,42.3,2.57,211.09,8.1,151315,,,,,";
        let path = write_csv(dir.path(), "sales.csv", &[HEADER, row_true, row_one]);

        let records = load_records(&path).unwrap();
        assert!(records.records().iter().all(|r| r.is_holiday));
    }

    // ── header normalisation ──────────────────────────────────────────────────

    #[test]
    fn test_header_tolerates_bom_and_case() {
        let dir = TempDir::new().unwrap();
        let header = format!("\u{feff}{}", HEADER.to_ascii_lowercase());
        let path = write_csv(
            dir.path(),
            "sales.csv",
            &[&header, &sample_row(1, 1, (2010, 2, 5), 10.0, 0)],
        );

        let records = load_records(&path).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_normalize_header_name() {
        assert_eq!(normalize_header_name("\u{feff}Store"), "store");
        assert_eq!(normalize_header_name("  Weekly_Sales "), "weekly_sales");
    }
}
