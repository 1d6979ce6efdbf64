use crate::error::DashboardError;

use super::controls::{ControlState, GenreFilter};
use super::model::{Dataset, GENRE, YEAR};

/// Return indices of rows that pass the current controls, in input order.
///
/// A row passes when:
/// * its year is present and within `min_year..=max_year`
/// * the genre filter is `All`, or the row's genre equals the selection
///
/// The genre column is only required while a genre is selected.
pub fn filtered_indices(
    dataset: &Dataset,
    controls: &ControlState,
) -> Result<Vec<usize>, DashboardError> {
    let year_idx = dataset.column_index(YEAR)?;
    let genre_idx = match &controls.genre {
        GenreFilter::All => None,
        GenreFilter::Only(_) => Some(dataset.column_index(GENRE)?),
    };

    Ok(dataset
        .rows()
        .iter()
        .enumerate()
        .filter(|(_, row)| {
            let in_range = row[year_idx]
                .as_f64()
                .is_some_and(|y| controls.contains_year(y));
            if !in_range {
                return false;
            }
            match genre_idx {
                None => true,
                Some(g) => controls.genre.matches(row[g].as_category().as_deref()),
            }
        })
        .map(|(i, _)| i)
        .collect())
}

/// The filtered subset as a freshly allocated dataset.
pub fn filter(dataset: &Dataset, controls: &ControlState) -> Result<Dataset, DashboardError> {
    let indices = filtered_indices(dataset, controls)?;
    Ok(dataset.select_rows(&indices))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{fixtures, CellValue, NAME};

    fn controls(min_year: i32, max_year: i32, genre: GenreFilter) -> ControlState {
        ControlState {
            min_year,
            max_year,
            genre,
        }
    }

    fn names(ds: &Dataset) -> Vec<String> {
        ds.column_values(NAME)
            .unwrap()
            .filter_map(|v| v.as_category())
            .collect()
    }

    #[test]
    fn scenario_keeps_records_in_range() {
        let ds = fixtures::scenario();
        let out = filter(&ds, &controls(2000, 2010, GenreFilter::All)).unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(names(&out), vec!["Game A", "Game B"]);
    }

    #[test]
    fn filtering_is_idempotent() {
        let ds = fixtures::scenario();
        for c in [
            controls(2000, 2010, GenreFilter::All),
            controls(1990, 2020, GenreFilter::Only("Action".into())),
            controls(2006, 2009, GenreFilter::All),
        ] {
            let once = filter(&ds, &c).unwrap();
            let twice = filter(&once, &c).unwrap();
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn widening_range_never_shrinks_result() {
        let ds = fixtures::scenario();
        let mut previous = 0;
        for (lo, hi) in [(2005, 2005), (2000, 2005), (2000, 2010), (1990, 2020)] {
            let n = filter(&ds, &controls(lo, hi, GenreFilter::All)).unwrap().len();
            assert!(n >= previous, "{lo}..={hi} gave {n} < {previous}");
            previous = n;
        }
        assert_eq!(previous, 3);
    }

    #[test]
    fn genre_selection_partitions_rows() {
        let ds = fixtures::scenario();
        let action_only = controls(1990, 2020, GenreFilter::Only("Action".into()));
        let action = filter(&ds, &action_only).unwrap();
        assert_eq!(action.len(), 2);
        assert!(action
            .column_values(GENRE)
            .unwrap()
            .all(|g| g == &CellValue::String("Action".into())));

        let all = filter(&ds, &controls(1990, 2020, GenreFilter::All)).unwrap();
        assert_eq!(all, ds);
    }

    #[test]
    fn missing_years_never_match() {
        let ds = fixtures::sales(&[
            (CellValue::Null, "PS2", "Action", "a", CellValue::Null),
            (CellValue::Float(2001.0), "PS2", "Action", "b", CellValue::Null),
        ]);
        let out = filter(&ds, &controls(i32::MIN, i32::MAX, GenreFilter::All)).unwrap();
        assert_eq!(names(&out), vec!["b"]);
    }

    #[test]
    fn empty_result_is_valid() {
        let ds = fixtures::scenario();
        let out = filter(&ds, &controls(2011, 2020, GenreFilter::All)).unwrap();
        assert!(out.is_empty());
        assert_eq!(out.columns(), ds.columns());
    }

    #[test]
    fn genre_column_only_required_when_selected() {
        let ds = Dataset::new(
            vec![YEAR.to_string()],
            vec![vec![CellValue::Float(2000.0)]],
        );
        assert_eq!(filter(&ds, &controls(1990, 2020, GenreFilter::All)).unwrap().len(), 1);
        assert!(matches!(
            filter(&ds, &controls(1990, 2020, GenreFilter::Only("Action".into()))),
            Err(DashboardError::Schema { .. })
        ));
    }
}
