use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ── StoreType ─────────────────────────────────────────────────────────────────

/// Store format code carried on every row of the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StoreType {
    A,
    B,
    C,
}

impl StoreType {
    /// Every recognised store format, in display order.
    pub const ALL: [StoreType; 3] = [StoreType::A, StoreType::B, StoreType::C];

    /// Parse a store type code, ignoring case and surrounding whitespace.
    pub fn parse(value: &str) -> Option<StoreType> {
        match value.trim().to_ascii_uppercase().as_str() {
            "A" => Some(StoreType::A),
            "B" => Some(StoreType::B),
            "C" => Some(StoreType::C),
            _ => None,
        }
    }

    /// Single-letter code as it appears in the dataset.
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreType::A => "A",
            StoreType::B => "B",
            StoreType::C => "C",
        }
    }
}

impl fmt::Display for StoreType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── HolidayMode ───────────────────────────────────────────────────────────────

/// How the holiday flag restricts a filtered view.
///
/// The flag partitions rows into exactly two disjoint classes; `All` is the
/// unrestricted union of both.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HolidayMode {
    /// No restriction on the holiday flag.
    #[default]
    All,
    /// Keep only holiday weeks.
    HolidayOnly,
    /// Keep only non-holiday weeks.
    NonHolidayOnly,
}

impl HolidayMode {
    /// Parse the CLI spelling of a holiday mode.
    pub fn parse(value: &str) -> Option<HolidayMode> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Some(HolidayMode::All),
            "holiday" | "holiday-only" => Some(HolidayMode::HolidayOnly),
            "non-holiday" | "non-holiday-only" => Some(HolidayMode::NonHolidayOnly),
            _ => None,
        }
    }

    /// Whether a row with the given holiday flag passes this mode.
    pub fn admits(&self, is_holiday: bool) -> bool {
        match self {
            HolidayMode::All => true,
            HolidayMode::HolidayOnly => is_holiday,
            HolidayMode::NonHolidayOnly => !is_holiday,
        }
    }
}

// ── SalesRecord ───────────────────────────────────────────────────────────────

/// One weekly observation for a store/department pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    /// Store identifier.
    pub store: u32,
    /// Department identifier within the store.
    pub dept: u32,
    /// Store format code.
    pub store_type: StoreType,
    /// Calendar date of the observation week.
    pub date: NaiveDate,
    /// Whether the week contains a holiday.
    pub is_holiday: bool,
    /// Weekly sales in USD; refunds can drive this negative.
    pub weekly_sales: f64,
    /// Regional temperature for the week.
    pub temperature: f64,
    /// Regional fuel price for the week.
    pub fuel_price: f64,
    /// Consumer price index.
    pub cpi: f64,
    /// Regional unemployment rate.
    pub unemployment: f64,
    /// Store size.
    pub size: f64,
    /// Promotional markdown 1; `None` when no markdown ran that week.
    #[serde(default)]
    pub markdown1: Option<f64>,
    /// Promotional markdown 2.
    #[serde(default)]
    pub markdown2: Option<f64>,
    /// Promotional markdown 3.
    #[serde(default)]
    pub markdown3: Option<f64>,
    /// Promotional markdown 4.
    #[serde(default)]
    pub markdown4: Option<f64>,
    /// Promotional markdown 5.
    #[serde(default)]
    pub markdown5: Option<f64>,
}

// ── NumericColumn ─────────────────────────────────────────────────────────────

/// The fixed set of numeric columns fed into the correlation matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NumericColumn {
    WeeklySales,
    Temperature,
    FuelPrice,
    Cpi,
    Unemployment,
    Size,
    MarkDown1,
    MarkDown2,
    MarkDown3,
    MarkDown4,
    MarkDown5,
}

impl NumericColumn {
    /// Every numeric column, in dataset order.
    pub const ALL: [NumericColumn; 11] = [
        NumericColumn::WeeklySales,
        NumericColumn::Temperature,
        NumericColumn::FuelPrice,
        NumericColumn::Cpi,
        NumericColumn::Unemployment,
        NumericColumn::Size,
        NumericColumn::MarkDown1,
        NumericColumn::MarkDown2,
        NumericColumn::MarkDown3,
        NumericColumn::MarkDown4,
        NumericColumn::MarkDown5,
    ];

    /// Column header as it appears in the CSV.
    pub fn label(&self) -> &'static str {
        match self {
            NumericColumn::WeeklySales => "Weekly_Sales",
            NumericColumn::Temperature => "Temperature",
            NumericColumn::FuelPrice => "Fuel_Price",
            NumericColumn::Cpi => "CPI",
            NumericColumn::Unemployment => "Unemployment",
            NumericColumn::Size => "Size",
            NumericColumn::MarkDown1 => "MarkDown1",
            NumericColumn::MarkDown2 => "MarkDown2",
            NumericColumn::MarkDown3 => "MarkDown3",
            NumericColumn::MarkDown4 => "MarkDown4",
            NumericColumn::MarkDown5 => "MarkDown5",
        }
    }

    /// This column's value on a record.
    ///
    /// Only the markdown columns can be absent; every other column always
    /// returns `Some`.
    pub fn value(&self, record: &SalesRecord) -> Option<f64> {
        match self {
            NumericColumn::WeeklySales => Some(record.weekly_sales),
            NumericColumn::Temperature => Some(record.temperature),
            NumericColumn::FuelPrice => Some(record.fuel_price),
            NumericColumn::Cpi => Some(record.cpi),
            NumericColumn::Unemployment => Some(record.unemployment),
            NumericColumn::Size => Some(record.size),
            NumericColumn::MarkDown1 => record.markdown1,
            NumericColumn::MarkDown2 => record.markdown2,
            NumericColumn::MarkDown3 => record.markdown3,
            NumericColumn::MarkDown4 => record.markdown4,
            NumericColumn::MarkDown5 => record.markdown5,
        }
    }
}

// ── RecordSet ─────────────────────────────────────────────────────────────────

/// Immutable collection of sales records, kept sorted ascending by date.
///
/// Loaded once per source and never mutated afterwards; filtered views are
/// separate `RecordSet`s derived from it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordSet {
    records: Vec<SalesRecord>,
}

impl RecordSet {
    /// Build a record set, sorting the rows ascending by date.
    ///
    /// The sort is stable, so rows sharing a date keep their input order.
    pub fn new(mut records: Vec<SalesRecord>) -> Self {
        records.sort_by_key(|r| r.date);
        Self { records }
    }

    /// The rows, ascending by date.
    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// `true` when the set holds no rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct store identifiers, ascending.
    pub fn distinct_stores(&self) -> BTreeSet<u32> {
        self.records.iter().map(|r| r.store).collect()
    }

    /// Distinct department identifiers, ascending.
    pub fn distinct_depts(&self) -> BTreeSet<u32> {
        self.records.iter().map(|r| r.dept).collect()
    }

    /// Distinct store types, ascending.
    pub fn distinct_types(&self) -> BTreeSet<StoreType> {
        self.records.iter().map(|r| r.store_type).collect()
    }
}

// ── FilterSelection ───────────────────────────────────────────────────────────

/// The user's current filter predicates.
///
/// A row is kept iff its store and department are both selected and its
/// holiday flag passes `holiday_mode`. Empty selections are valid and simply
/// select nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    /// Selected store identifiers.
    pub stores: BTreeSet<u32>,
    /// Selected department identifiers.
    pub depts: BTreeSet<u32>,
    /// Holiday restriction.
    pub holiday_mode: HolidayMode,
}

impl FilterSelection {
    /// The everything-selected filter for a record set: all stores, all
    /// departments, no holiday restriction.
    pub fn all_of(records: &RecordSet) -> Self {
        Self {
            stores: records.distinct_stores(),
            depts: records.distinct_depts(),
            holiday_mode: HolidayMode::All,
        }
    }

    /// Whether a record passes every predicate.
    pub fn matches(&self, record: &SalesRecord) -> bool {
        self.stores.contains(&record.store)
            && self.depts.contains(&record.dept)
            && self.holiday_mode.admits(record.is_holiday)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
