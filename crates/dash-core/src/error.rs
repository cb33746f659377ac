use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the dashboard pipeline.
#[derive(Error, Debug)]
pub enum DashError {
    /// The sales CSV could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A CSV record could not be decoded.
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent from the CSV header.
    #[error("Missing required column: {column}")]
    Schema { column: String },

    /// The Year/Month/Day components of a row do not form a calendar date.
    #[error("Row {line}: invalid date {year:04}-{month:02}-{day:02}")]
    DateParse {
        line: usize,
        year: i32,
        month: u32,
        day: u32,
    },

    /// A cell holds a value that cannot be parsed for its column.
    #[error("Row {line}: invalid {column} value '{value}'")]
    ValueParse {
        line: usize,
        column: String,
        value: String,
    },

    /// A store type code is not one of the recognised formats.
    #[error("Row {line}: unknown store type '{value}'")]
    StoreTypeParse { line: usize, value: String },

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the dashboard crates.
pub type Result<T> = std::result::Result<T, DashError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_file_read() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = DashError::FileRead {
            path: PathBuf::from("/data/sales.csv"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("Failed to read file"));
        assert!(msg.contains("/data/sales.csv"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn test_error_display_schema() {
        let err = DashError::Schema {
            column: "Weekly_Sales".to_string(),
        };
        assert_eq!(err.to_string(), "Missing required column: Weekly_Sales");
    }

    #[test]
    fn test_error_display_date_parse() {
        let err = DashError::DateParse {
            line: 17,
            year: 2024,
            month: 2,
            day: 30,
        };
        assert_eq!(err.to_string(), "Row 17: invalid date 2024-02-30");
    }

    #[test]
    fn test_error_display_value_parse() {
        let err = DashError::ValueParse {
            line: 3,
            column: "CPI".to_string(),
            value: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "Row 3: invalid CPI value 'abc'");
    }

    #[test]
    fn test_error_display_store_type() {
        let err = DashError::StoreTypeParse {
            line: 9,
            value: "Z".to_string(),
        };
        assert_eq!(err.to_string(), "Row 9: unknown store type 'Z'");
    }

    #[test]
    fn test_error_display_config() {
        let err = DashError::Config("missing data path".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing data path");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: DashError = io_err.into();
        assert!(err.to_string().contains("denied"));
    }
}
