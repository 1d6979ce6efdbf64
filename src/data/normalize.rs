use crate::error::DashboardError;

use super::model::{CellValue, Dataset};

/// Coerce one column to floats, replacing anything unparsable with the
/// missing marker.
///
/// * integers and floats are kept as `Float`
/// * strings are trimmed and parsed as `f64`
/// * bools become `1.0` / `0.0`
/// * NaN and infinities become `Null`, as does any text that fails to parse
///
/// Returns a new dataset; the input is left untouched. A missing column is a
/// [`DashboardError::Schema`].
pub fn to_numeric(dataset: &Dataset, column: &str) -> Result<Dataset, DashboardError> {
    let mut coerced = 0usize;
    let normalized = dataset.map_column(column, |cell| {
        let value = coerce(cell);
        if value.is_missing() && !cell.is_missing() {
            coerced += 1;
        }
        value
    })?;

    if coerced > 0 {
        log::warn!("{coerced} value(s) in '{column}' could not be parsed as numbers");
    }
    Ok(normalized)
}

fn coerce(cell: &CellValue) -> CellValue {
    let value = match cell {
        CellValue::Float(v) => Some(*v),
        CellValue::Integer(i) => Some(*i as f64),
        CellValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        CellValue::String(s) => s.trim().parse::<f64>().ok(),
        CellValue::Null => None,
    };
    match value {
        Some(v) if v.is_finite() => CellValue::Float(v),
        _ => CellValue::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{fixtures, YEAR};

    fn years(ds: &Dataset) -> Vec<CellValue> {
        ds.column_values(YEAR).unwrap().cloned().collect()
    }

    #[test]
    fn malformed_values_become_missing() {
        let ds = fixtures::sales(&[
            (CellValue::String("2005".into()), "PS2", "Action", "a", CellValue::Null),
            (CellValue::String("N/A".into()), "PS2", "Action", "b", CellValue::Null),
            (CellValue::String(" 1999.0 ".into()), "PS2", "Action", "c", CellValue::Null),
            (CellValue::String(String::new()), "PS2", "Action", "d", CellValue::Null),
            (CellValue::Integer(2012), "PS2", "Action", "e", CellValue::Null),
            (CellValue::String("nan".into()), "PS2", "Action", "f", CellValue::Null),
        ]);

        let normalized = to_numeric(&ds, YEAR).unwrap();
        assert_eq!(
            years(&normalized),
            vec![
                CellValue::Float(2005.0),
                CellValue::Null,
                CellValue::Float(1999.0),
                CellValue::Null,
                CellValue::Float(2012.0),
                CellValue::Null,
            ]
        );
        // Input untouched.
        assert_eq!(years(&ds)[1], CellValue::String("N/A".into()));
    }

    #[test]
    fn other_columns_are_preserved() {
        let ds = fixtures::scenario();
        let normalized = to_numeric(&ds, YEAR).unwrap();
        assert_eq!(normalized, ds);
    }

    #[test]
    fn missing_column_is_schema_error() {
        let ds = fixtures::scenario();
        assert_eq!(
            to_numeric(&ds, "Rating").unwrap_err(),
            DashboardError::Schema {
                column: "Rating".into()
            }
        );
    }
}
