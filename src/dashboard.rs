use serde::Serialize;

use crate::chart::{BarChartSpec, ScatterChartSpec};
use crate::data::aggregate::aggregate_by_platform;
use crate::data::controls::{genre_options, year_bounds, ControlState, GenreFilter, YearBounds};
use crate::data::filter::filter;
use crate::data::model::{Dataset, GLOBAL_SALES, YEAR};
use crate::data::normalize::to_numeric;
use crate::error::DashboardError;

// ---------------------------------------------------------------------------
// Status lines
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// One line of user-facing feedback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusLine {
    pub severity: Severity,
    pub text: String,
}

impl StatusLine {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            text: text.into(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            text: text.into(),
        }
    }
}

impl From<&DashboardError> for StatusLine {
    fn from(err: &DashboardError) -> Self {
        StatusLine::error(format!("Error: {err}. Please fix your dataset."))
    }
}

// ---------------------------------------------------------------------------
// Session – a loaded, normalized dataset and its control domains
// ---------------------------------------------------------------------------

/// Everything derived once per load.
#[derive(Debug, Clone)]
pub struct Session {
    /// Table with `Year` and `Global_Sales` coerced to numbers where present.
    pub dataset: Dataset,
    /// Row count as loaded.
    pub total_records: usize,
    /// Slider domain, or why no range controls can be offered.
    pub bounds: Result<YearBounds, DashboardError>,
    /// `All` plus the distinct genres.
    pub genres: Vec<GenreFilter>,
    /// Load-time status lines, repeated at the top of every render.
    pub load_status: Vec<StatusLine>,
}

impl Session {
    pub fn new(raw: Dataset) -> Self {
        let total_records = raw.len();
        let mut load_status = Vec::new();

        if raw.is_empty() {
            load_status.push(StatusLine::warning(
                "Uh oh, no data was loaded. Please check your data file and configuration.",
            ));
        } else {
            load_status.push(StatusLine::info(format!(
                "Dataset loaded successfully with {total_records} records."
            )));
        }

        let missing = raw.missing_columns();
        if !missing.is_empty() {
            log::warn!("dataset is missing columns {missing:?}");
        }

        let mut dataset = raw;
        let mut year_ok = true;
        for column in [YEAR, GLOBAL_SALES] {
            match to_numeric(&dataset, column) {
                Ok(normalized) => dataset = normalized,
                Err(err) => {
                    log::warn!("{err}");
                    load_status.push(StatusLine::from(&err));
                    year_ok &= column != YEAR;
                }
            }
        }

        let bounds = if year_ok {
            year_bounds(&dataset)
        } else {
            Err(DashboardError::Schema {
                column: YEAR.to_string(),
            })
        };
        if let Err(err @ DashboardError::Data(_)) = &bounds {
            log::warn!("{err}");
            load_status.push(StatusLine::error(format!("Error: {err}.")));
        }

        let genres = genre_options(&dataset).unwrap_or_else(|err| {
            log::warn!("{err}");
            load_status.push(StatusLine::from(&err));
            vec![GenreFilter::All]
        });

        Session {
            dataset,
            total_records,
            bounds,
            genres,
            load_status,
        }
    }

    /// Initial controls: full range, no genre filter. `None` when the year
    /// column is unusable.
    pub fn default_controls(&self) -> Option<ControlState> {
        self.bounds.as_ref().ok().map(|b| ControlState::new(*b))
    }
}

// ---------------------------------------------------------------------------
// Render
// ---------------------------------------------------------------------------

/// Everything one pass over the pipeline produces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub status: Vec<StatusLine>,
    pub controls: Option<ControlState>,
    pub total_records: usize,
    pub filtered_records: Option<usize>,
    pub bar: Option<BarChartSpec>,
    pub scatter: Option<ScatterChartSpec>,
}

impl DashboardView {
    /// Add an error line unless the same problem was already reported.
    fn report(&mut self, err: &DashboardError) {
        let line = StatusLine::from(err);
        if !self.status.contains(&line) {
            self.status.push(line);
        }
    }
}

/// Re-run the whole pipeline for the given controls.
///
/// Without controls (degraded session) only the load status is produced.
/// Schema problems in the chart stages become status lines and leave that
/// chart out.
pub fn render(session: &Session, controls: Option<&ControlState>) -> DashboardView {
    let mut view = DashboardView {
        status: session.load_status.clone(),
        controls: controls.cloned(),
        total_records: session.total_records,
        filtered_records: None,
        bar: None,
        scatter: None,
    };

    let Some(controls) = controls else {
        return view;
    };

    let filtered = match filter(&session.dataset, controls) {
        Ok(filtered) => filtered,
        Err(err) => {
            view.report(&err);
            return view;
        }
    };

    view.filtered_records = Some(filtered.len());
    view.status.push(StatusLine::info(format!(
        "Filtered dataset contains {} records.",
        filtered.len()
    )));

    match aggregate_by_platform(&filtered) {
        Ok(totals) => view.bar = Some(BarChartSpec::from_aggregate(&totals)),
        Err(err) => view.report(&err),
    }
    match ScatterChartSpec::from_filtered(&filtered) {
        Ok(chart) => view.scatter = Some(chart),
        Err(err) => view.report(&err),
    }

    log::debug!(
        "rendered {}..={} / {}: {} of {} records, {} scatter points",
        controls.min_year,
        controls.max_year,
        controls.genre,
        filtered.len(),
        session.total_records,
        view.scatter.as_ref().map_or(0, ScatterChartSpec::point_count)
    );
    view
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{fixtures, CellValue, GENRE, NAME, PLATFORM};

    #[test]
    fn scenario_end_to_end() {
        let session = Session::new(fixtures::scenario());
        assert_eq!(session.bounds, Ok(YearBounds { min: 1999, max: 2010 }));

        let mut controls = session.default_controls().unwrap();
        let bounds = session.bounds.clone().unwrap();
        controls.set_min_year(2000, bounds);
        let view = render(&session, Some(&controls));

        assert_eq!(view.total_records, 3);
        assert_eq!(view.filtered_records, Some(2));
        assert_eq!(
            view.status.last().unwrap().text,
            "Filtered dataset contains 2 records."
        );
        let bar = view.bar.unwrap();
        assert_eq!(bar.bars.len(), 2);
        assert!((bar.bars[0].value - 1.2).abs() < 1e-9);
        assert!((bar.bars[1].value - 2.0).abs() < 1e-9);
        assert_eq!(view.scatter.unwrap().point_count(), 2);
    }

    #[test]
    fn text_years_are_normalized_on_load() {
        let session = Session::new(fixtures::sales(&[
            (CellValue::String("2003".into()), "GC", "Party", "a", CellValue::String("0.9".into())),
            (CellValue::String("N/A".into()), "GC", "Party", "b", CellValue::Float(0.1)),
        ]));
        assert_eq!(session.bounds, Ok(YearBounds { min: 2003, max: 2003 }));
        let view = render(&session, session.default_controls().as_ref());
        assert_eq!(view.filtered_records, Some(1));
        assert!((view.bar.unwrap().bars[0].value - 0.9).abs() < 1e-9);
    }

    #[test]
    fn missing_year_column_degrades() {
        let raw = Dataset::new(
            vec![NAME.into(), PLATFORM.into(), GENRE.into(), GLOBAL_SALES.into()],
            vec![vec![
                CellValue::String("a".into()),
                CellValue::String("PS2".into()),
                CellValue::String("Action".into()),
                CellValue::Float(1.0),
            ]],
        );
        let session = Session::new(raw);
        assert!(session.default_controls().is_none());

        let view = render(&session, None);
        assert!(view.bar.is_none() && view.scatter.is_none());
        assert!(view
            .status
            .iter()
            .any(|s| s.severity == Severity::Error && s.text.contains("'Year' column missing")));
        assert_eq!(session.genres.len(), 2);
    }

    #[test]
    fn all_malformed_years_is_data_error() {
        let session = Session::new(fixtures::sales(&[
            (CellValue::String("N/A".into()), "PS2", "Action", "a", CellValue::Float(1.0)),
        ]));
        assert!(matches!(session.bounds, Err(DashboardError::Data(_))));
        assert!(session
            .load_status
            .iter()
            .any(|s| s.text.contains("no valid year data")));
    }

    #[test]
    fn missing_sales_column_is_reported_once() {
        let raw = Dataset::new(
            vec![YEAR.into(), NAME.into(), PLATFORM.into(), GENRE.into()],
            vec![vec![
                CellValue::Integer(2001),
                CellValue::String("a".into()),
                CellValue::String("PS2".into()),
                CellValue::String("Action".into()),
            ]],
        );
        let session = Session::new(raw);
        let view = render(&session, session.default_controls().as_ref());
        assert_eq!(view.filtered_records, Some(1));
        assert!(view.bar.is_none() && view.scatter.is_none());
        let sales_errors = view
            .status
            .iter()
            .filter(|s| s.text.contains(GLOBAL_SALES))
            .count();
        assert_eq!(sales_errors, 1);
    }

    #[test]
    fn empty_dataset_reports_no_data() {
        let session = Session::new(fixtures::scenario().empty_like());
        assert_eq!(session.load_status[0].severity, Severity::Warning);
        assert!(session.default_controls().is_none());
        assert_eq!(render(&session, None).filtered_records, None);
    }

    #[test]
    fn empty_selection_still_renders_empty_charts() {
        let session = Session::new(fixtures::scenario());
        let controls = ControlState {
            min_year: 2006,
            max_year: 2009,
            genre: GenreFilter::All,
        };
        let view = render(&session, Some(&controls));
        assert_eq!(view.filtered_records, Some(0));
        assert!(view.bar.unwrap().bars.is_empty());
        assert_eq!(view.scatter.unwrap().point_count(), 0);
    }
}
