use std::fmt;

use serde::Serialize;

use crate::error::DashboardError;

use super::model::{Dataset, GENRE, YEAR};

// ---------------------------------------------------------------------------
// Year bounds
// ---------------------------------------------------------------------------

/// Observed release-year extremes; always `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearBounds {
    pub min: i32,
    pub max: i32,
}

/// Min / max of the non-missing years, truncated to integers.
///
/// Expects the year column to have been normalized already; non-numeric
/// cells are ignored.
pub fn year_bounds(dataset: &Dataset) -> Result<YearBounds, DashboardError> {
    let (min, max) = dataset
        .column_values(YEAR)?
        .filter_map(|v| v.as_f64())
        .fold(None, |acc: Option<(f64, f64)>, y| match acc {
            None => Some((y, y)),
            Some((lo, hi)) => Some((lo.min(y), hi.max(y))),
        })
        .ok_or_else(|| DashboardError::data("no valid year data in the 'Year' column"))?;

    let representable = i32::MIN as f64..=i32::MAX as f64;
    if !representable.contains(&min) || !representable.contains(&max) {
        return Err(DashboardError::data(format!(
            "year values out of range in the 'Year' column ({min} to {max})"
        )));
    }

    Ok(YearBounds {
        min: min.trunc() as i32,
        max: max.trunc() as i32,
    })
}

// ---------------------------------------------------------------------------
// Genre selector
// ---------------------------------------------------------------------------

/// Genre selector value; `All` applies no genre filter.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub enum GenreFilter {
    #[default]
    All,
    Only(String),
}

impl GenreFilter {
    pub fn label(&self) -> &str {
        match self {
            GenreFilter::All => "All",
            GenreFilter::Only(g) => g,
        }
    }

    pub fn matches(&self, genre: Option<&str>) -> bool {
        match self {
            GenreFilter::All => true,
            GenreFilter::Only(g) => genre == Some(g.as_str()),
        }
    }
}

impl fmt::Display for GenreFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// `All` followed by the sorted distinct non-missing genres.
pub fn genre_options(dataset: &Dataset) -> Result<Vec<GenreFilter>, DashboardError> {
    let mut genres: Vec<String> = dataset
        .unique_values(GENRE)?
        .iter()
        .filter_map(|v| v.as_category())
        .collect();
    genres.sort();
    genres.dedup();

    Ok(std::iter::once(GenreFilter::All)
        .chain(genres.into_iter().map(GenreFilter::Only))
        .collect())
}

// ---------------------------------------------------------------------------
// Control state
// ---------------------------------------------------------------------------

/// Current slider and selector values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControlState {
    pub min_year: i32,
    pub max_year: i32,
    pub genre: GenreFilter,
}

impl ControlState {
    /// Full year range, no genre filter.
    pub fn new(bounds: YearBounds) -> Self {
        Self {
            min_year: bounds.min,
            max_year: bounds.max,
            genre: GenreFilter::All,
        }
    }

    /// Move the lower year, dragging the upper one along if they cross.
    pub fn set_min_year(&mut self, year: i32, bounds: YearBounds) {
        self.min_year = year.clamp(bounds.min, bounds.max);
        if self.max_year < self.min_year {
            self.max_year = self.min_year;
        }
    }

    /// Move the upper year, dragging the lower one along if they cross.
    pub fn set_max_year(&mut self, year: i32, bounds: YearBounds) {
        self.max_year = year.clamp(bounds.min, bounds.max);
        if self.min_year > self.max_year {
            self.min_year = self.max_year;
        }
    }

    pub fn contains_year(&self, year: f64) -> bool {
        self.min_year as f64 <= year && year <= self.max_year as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{fixtures, CellValue};

    #[test]
    fn bounds_ignore_missing_years() {
        let ds = fixtures::sales(&[
            (CellValue::Float(2005.7), "PS2", "Action", "a", CellValue::Null),
            (CellValue::Null, "PS2", "Action", "b", CellValue::Null),
            (CellValue::Float(1998.2), "PS2", "Action", "c", CellValue::Null),
        ]);
        assert_eq!(year_bounds(&ds).unwrap(), YearBounds { min: 1998, max: 2005 });
    }

    #[test]
    fn bounds_without_valid_years_is_data_error() {
        let ds = fixtures::sales(&[(CellValue::Null, "PS2", "Action", "a", CellValue::Null)]);
        assert!(matches!(year_bounds(&ds), Err(DashboardError::Data(_))));
        assert!(matches!(
            year_bounds(&ds.empty_like()),
            Err(DashboardError::Data(_))
        ));
    }

    #[test]
    fn years_beyond_i32_are_data_error() {
        let ds = fixtures::sales(&[
            (CellValue::Float(2001.0), "PS2", "Action", "a", CellValue::Null),
            (CellValue::Float(3.0e12), "PS2", "Action", "b", CellValue::Null),
        ]);
        let err = year_bounds(&ds).unwrap_err();
        assert!(matches!(err, DashboardError::Data(ref msg) if msg.contains("out of range")));
    }

    #[test]
    fn bounds_cover_the_observed_extremes() {
        let ds = fixtures::sales(&[
            (CellValue::Float(i32::MIN as f64), "PS2", "Action", "a", CellValue::Null),
            (CellValue::Float(i32::MAX as f64), "PS2", "Action", "b", CellValue::Null),
        ]);
        let bounds = year_bounds(&ds).unwrap();
        let controls = ControlState::new(bounds);
        assert!(controls.contains_year(i32::MIN as f64));
        assert!(controls.contains_year(i32::MAX as f64));
    }

    #[test]
    fn genre_options_start_with_all() {
        let ds = fixtures::sales(&[
            (CellValue::Null, "PS2", "Sports", "a", CellValue::Null),
            (CellValue::Null, "PS2", "Action", "b", CellValue::Null),
            (CellValue::Null, "PS2", "Sports", "c", CellValue::Null),
        ]);
        assert_eq!(
            genre_options(&ds).unwrap(),
            vec![
                GenreFilter::All,
                GenreFilter::Only("Action".into()),
                GenreFilter::Only("Sports".into()),
            ]
        );
    }

    #[test]
    fn setters_keep_range_ordered_and_bounded() {
        let bounds = YearBounds { min: 1990, max: 2010 };
        let mut controls = ControlState::new(bounds);
        controls.set_max_year(1995, bounds);
        controls.set_min_year(2000, bounds);
        assert_eq!((controls.min_year, controls.max_year), (2000, 2000));

        controls.set_max_year(1980, bounds);
        assert_eq!((controls.min_year, controls.max_year), (1990, 1990));

        controls.set_max_year(3000, bounds);
        assert_eq!(controls.max_year, 2010);
    }
}
