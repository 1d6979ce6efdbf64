//! Backend-independent chart descriptions.
//!
//! The UI turns these into `egui_plot` items; `--export` serializes them.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::data::aggregate::PlatformSales;
use crate::data::model::{Dataset, GENRE, GLOBAL_SALES, NAME, PLATFORM, YEAR};
use crate::error::DashboardError;

/// Legend label for the series of rows without a genre.
pub const MISSING_GENRE_LABEL: &str = "(no genre)";

// ---------------------------------------------------------------------------
// Bar chart: total sales per platform
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub platform: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// One bar per platform, in platform order.
    pub bars: Vec<Bar>,
}

impl BarChartSpec {
    pub fn from_aggregate(totals: &PlatformSales) -> Self {
        Self {
            title: "Total Global Sales by Platform (Filtered)".to_string(),
            x_label: PLATFORM.to_string(),
            y_label: "Global Sales (millions)".to_string(),
            bars: totals
                .iter()
                .map(|(platform, value)| Bar {
                    platform: platform.clone(),
                    value: *value,
                })
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Scatter chart: sales over time, coloured by genre
// ---------------------------------------------------------------------------

/// One plotted record plus its hover metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub year: f64,
    pub sales: f64,
    pub name: String,
    pub platform: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterSeries {
    /// `None` collects the rows whose genre is missing.
    pub genre: Option<String>,
    pub points: Vec<ScatterPoint>,
}

impl ScatterSeries {
    pub fn label(&self) -> &str {
        self.genre.as_deref().unwrap_or(MISSING_GENRE_LABEL)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// One series per genre, sorted by genre; the missing-genre series first.
    pub series: Vec<ScatterSeries>,
}

impl ScatterChartSpec {
    /// Build from filtered rows. Rows missing a year or sales value are not
    /// plotted.
    pub fn from_filtered(dataset: &Dataset) -> Result<Self, DashboardError> {
        let year_idx = dataset.column_index(YEAR)?;
        let sales_idx = dataset.column_index(GLOBAL_SALES)?;
        let genre_idx = dataset.column_index(GENRE)?;
        let name_idx = dataset.column_index(NAME)?;
        let platform_idx = dataset.column_index(PLATFORM)?;

        let mut by_genre: BTreeMap<Option<String>, Vec<ScatterPoint>> = BTreeMap::new();
        for row in dataset.rows() {
            let (Some(year), Some(sales)) = (row[year_idx].as_f64(), row[sales_idx].as_f64())
            else {
                continue;
            };
            by_genre.entry(row[genre_idx].as_category()).or_default().push(ScatterPoint {
                year,
                sales,
                name: row[name_idx].as_category().unwrap_or_default(),
                platform: row[platform_idx].as_category().unwrap_or_default(),
            });
        }

        Ok(Self {
            title: "Global Sales Trend Over Time".to_string(),
            x_label: YEAR.to_string(),
            y_label: GLOBAL_SALES.to_string(),
            series: by_genre
                .into_iter()
                .map(|(genre, points)| ScatterSeries { genre, points })
                .collect(),
        })
    }

    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }

    /// Points of the series labelled `label` that sit exactly on the point
    /// closest to `(year, sales)`, for hover text.
    ///
    /// Records sharing the same year and sales are all returned, in row
    /// order; an unknown label gives an empty list.
    pub fn hover_points(&self, label: &str, year: f64, sales: f64) -> Vec<&ScatterPoint> {
        let candidates: Vec<&ScatterPoint> = self
            .series
            .iter()
            .filter(|s| s.label() == label)
            .flat_map(|s| s.points.iter())
            .collect();
        let distance = |p: &ScatterPoint| (p.year - year).powi(2) + (p.sales - sales).powi(2);

        let Some(nearest) = candidates
            .iter()
            .copied()
            .min_by(|a, b| distance(*a).total_cmp(&distance(*b)))
        else {
            return Vec::new();
        };
        candidates
            .into_iter()
            .filter(|p| p.year == nearest.year && p.sales == nearest.sales)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::aggregate::aggregate_by_platform;
    use crate::data::model::{fixtures, CellValue};

    #[test]
    fn bars_follow_platform_totals() {
        let totals = aggregate_by_platform(&fixtures::scenario()).unwrap();
        let chart = BarChartSpec::from_aggregate(&totals);
        assert_eq!(chart.y_label, "Global Sales (millions)");
        let platforms: Vec<&str> = chart.bars.iter().map(|b| b.platform.as_str()).collect();
        assert_eq!(platforms, vec!["PS2", "Wii"]);
    }

    #[test]
    fn scatter_groups_by_genre_and_skips_missing_sales() {
        let ds = fixtures::sales(&[
            (CellValue::Float(2005.0), "PS2", "Action", "A", CellValue::Float(1.2)),
            (CellValue::Float(2010.0), "Wii", "Sports", "B", CellValue::Float(2.0)),
            (CellValue::Float(2007.0), "PS2", "Action", "C", CellValue::Null),
            (CellValue::Float(2008.0), "DS", "Action", "D", CellValue::Float(0.4)),
        ]);
        let chart = ScatterChartSpec::from_filtered(&ds).unwrap();
        assert_eq!(chart.point_count(), 3);
        assert_eq!(chart.series[0].genre.as_deref(), Some("Action"));
        assert_eq!(chart.series[0].points.len(), 2);
        assert_eq!(chart.series[1].points[0].platform, "Wii");
    }

    #[test]
    fn hover_points_carry_name_and_platform() {
        let chart = ScatterChartSpec::from_filtered(&fixtures::scenario()).unwrap();
        let hits = chart.hover_points("Action", 2004.9, 1.1);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Game A");
        assert_eq!(hits[0].platform, "PS2");
        assert!(chart.hover_points("Racing", 2000.0, 1.0).is_empty());
    }

    #[test]
    fn coincident_records_are_all_hovered_in_row_order() {
        let ds = fixtures::sales(&[
            (CellValue::Float(2001.0), "PS2", "Action", "First", CellValue::Float(1.0)),
            (CellValue::Float(2001.0), "GC", "Action", "Second", CellValue::Float(1.0)),
            (CellValue::Float(2003.0), "PS2", "Action", "Other", CellValue::Float(1.0)),
        ]);
        let chart = ScatterChartSpec::from_filtered(&ds).unwrap();
        let names: Vec<&str> = chart
            .hover_points("Action", 2001.1, 0.9)
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["First", "Second"]);
    }

    #[test]
    fn missing_genre_does_not_merge_with_a_real_genre() {
        let ds = fixtures::sales(&[
            (CellValue::Float(2001.0), "PS2", "Unknown", "Named", CellValue::Float(1.0)),
            (CellValue::Float(2002.0), "PS2", "Action", "Blank", CellValue::Float(2.0)),
        ]);
        let genre_idx = ds.column_index(GENRE).unwrap();
        let name_idx = ds.column_index(NAME).unwrap();
        let ds = Dataset::new(
            ds.columns().to_vec(),
            ds.rows()
                .iter()
                .map(|row| {
                    let mut row = row.clone();
                    if row[name_idx] == CellValue::String("Blank".into()) {
                        row[genre_idx] = CellValue::Null;
                    }
                    row
                })
                .collect(),
        );

        let chart = ScatterChartSpec::from_filtered(&ds).unwrap();
        assert_eq!(chart.series.len(), 2);
        assert_eq!(chart.series[0].genre, None);
        assert_eq!(chart.series[0].label(), MISSING_GENRE_LABEL);
        assert_eq!(chart.series[1].genre.as_deref(), Some("Unknown"));
        assert_eq!(chart.hover_points("Unknown", 2001.0, 1.0)[0].name, "Named");
        assert_eq!(chart.hover_points(MISSING_GENRE_LABEL, 2002.0, 2.0)[0].name, "Blank");
    }

    #[test]
    fn scatter_requires_record_columns() {
        let ds = Dataset::new(vec![YEAR.into(), GLOBAL_SALES.into()], Vec::new());
        assert!(matches!(
            ScatterChartSpec::from_filtered(&ds),
            Err(DashboardError::Schema { .. })
        ));
    }
}
