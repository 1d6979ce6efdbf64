use std::collections::BTreeSet;
#[cfg(test)]
use std::collections::BTreeMap;
use std::fmt;

use crate::error::DashboardError;

// ---------------------------------------------------------------------------
// Required columns
// ---------------------------------------------------------------------------

pub const YEAR: &str = "Year";
pub const PLATFORM: &str = "Platform";
pub const GENRE: &str = "Genre";
pub const NAME: &str = "Name";
pub const GLOBAL_SALES: &str = "Global_Sales";

/// Columns every sales table is expected to carry.
pub const REQUIRED_COLUMNS: [&str; 5] = [YEAR, PLATFORM, GENRE, NAME, GLOBAL_SALES];

// ---------------------------------------------------------------------------
// CellValue – a single cell of the table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell mirroring common Pandas dtypes.
/// `Null` doubles as the missing marker produced by numeric coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

// -- Manual Eq/Ord so we can put CellValue in BTreeSet --

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use CellValue::*;
        fn discriminant(v: &CellValue) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) => 2,
                Float(_) => 3,
                String(_) => 4,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Null, Null) => std::cmp::Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (String(a), String(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, "<missing>"),
        }
    }
}

impl CellValue {
    /// Numeric view of the cell; `None` for text, bools and missing values.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Categorical key of the cell: its display text, or `None` when missing.
    pub fn as_category(&self) -> Option<String> {
        match self {
            CellValue::Null => None,
            CellValue::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// One row, positionally aligned with [`Dataset::columns`].
pub type Row = Vec<CellValue>;

/// An ordered table of rows sharing one header.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Dataset {
    /// Build a dataset, padding short rows with `Null` and truncating long ones
    /// so every row has exactly one cell per column.
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, CellValue::Null);
                row
            })
            .collect();
        Dataset { columns, rows }
    }

    /// Empty table with the same header as `self`.
    #[cfg(test)]
    pub fn empty_like(&self) -> Self {
        Dataset {
            columns: self.columns.clone(),
            rows: Vec::new(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Schema-checked column lookup.
    pub fn column_index(&self, name: &str) -> Result<usize, DashboardError> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| DashboardError::Schema {
                column: name.to_string(),
            })
    }

    /// Required columns absent from this table, in declaration order.
    pub fn missing_columns(&self) -> Vec<&'static str> {
        REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|c| !self.has_column(c))
            .collect()
    }

    /// Iterate one column's cells.
    pub fn column_values(
        &self,
        name: &str,
    ) -> Result<impl Iterator<Item = &CellValue> + '_, DashboardError> {
        let idx = self.column_index(name)?;
        Ok(self.rows.iter().map(move |row| &row[idx]))
    }

    /// Sorted set of distinct non-missing values in a column.
    pub fn unique_values(&self, name: &str) -> Result<BTreeSet<CellValue>, DashboardError> {
        Ok(self
            .column_values(name)?
            .filter(|v| !v.is_missing())
            .cloned()
            .collect())
    }

    /// New dataset holding copies of the rows at `indices`, in that order.
    pub fn select_rows(&self, indices: &[usize]) -> Self {
        Dataset {
            columns: self.columns.clone(),
            rows: indices.iter().map(|&i| self.rows[i].clone()).collect(),
        }
    }

    /// New dataset with `f` applied to every cell of one column.
    pub fn map_column<F>(&self, name: &str, mut f: F) -> Result<Self, DashboardError>
    where
        F: FnMut(&CellValue) -> CellValue,
    {
        let idx = self.column_index(name)?;
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let mut row = row.clone();
                let value = f(&row[idx]);
                row[idx] = value;
                row
            })
            .collect();
        Ok(Dataset {
            columns: self.columns.clone(),
            rows,
        })
    }

    /// View a row as column name → cell.
    #[cfg(test)]
    pub fn record(&self, index: usize) -> Option<BTreeMap<&str, &CellValue>> {
        let row = self.rows.get(index)?;
        Some(
            self.columns
                .iter()
                .map(String::as_str)
                .zip(row.iter())
                .collect(),
        )
    }
}
