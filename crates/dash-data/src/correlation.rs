//! Pairwise-complete Pearson correlation over the numeric columns.

use dash_core::models::{NumericColumn, RecordSet};
use dash_core::stats::pearson;
use serde::{Deserialize, Serialize};

// ── CorrelationMatrix ─────────────────────────────────────────────────────────

/// Pearson coefficients between every pair of numeric columns.
///
/// `values[i][j]` is the coefficient between `columns[i]` and `columns[j]`;
/// `None` marks pairs with fewer than two complete observations or a
/// zero-variance side. The matrix is symmetric and the diagonal of any
/// column with nonzero variance is exactly 1.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<NumericColumn>,
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    /// Coefficient between two columns, or `None` when it is undefined.
    pub fn get(&self, a: NumericColumn, b: NumericColumn) -> Option<f64> {
        let i = self.columns.iter().position(|c| *c == a)?;
        let j = self.columns.iter().position(|c| *c == b)?;
        self.values[i][j]
    }
}

// ── correlation_matrix ────────────────────────────────────────────────────────

/// Build the correlation matrix for `records`.
///
/// Each pair uses only the rows where both columns are present
/// (pairwise-complete observations), so a sparse markdown column does not
/// shrink the sample for unrelated pairs.
pub fn correlation_matrix(records: &RecordSet) -> CorrelationMatrix {
    let columns: Vec<NumericColumn> = NumericColumn::ALL.to_vec();
    let n = columns.len();
    let mut values = vec![vec![None; n]; n];

    for i in 0..n {
        for j in i..n {
            let r = column_pair_correlation(records, columns[i], columns[j]);
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    CorrelationMatrix { columns, values }
}

/// Pearson coefficient for one column pair over its complete observations.
fn column_pair_correlation(
    records: &RecordSet,
    a: NumericColumn,
    b: NumericColumn,
) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = records
        .records()
        .iter()
        .filter_map(|record| Some((a.value(record)?, b.value(record)?)))
        .collect();
    pearson(&pairs)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
