use std::collections::BTreeMap;

use crate::error::DashboardError;

use super::model::{Dataset, GLOBAL_SALES, PLATFORM};

/// Platform → summed global sales.
pub type PlatformSales = BTreeMap<String, f64>;

/// Sum `Global_Sales` per platform over the (already filtered) rows.
///
/// Missing sales are skipped, which is the same as counting them as zero.
/// Rows with a missing platform are left out of the grouping entirely, so
/// only platforms with at least one row appear.
pub fn aggregate_by_platform(dataset: &Dataset) -> Result<PlatformSales, DashboardError> {
    let platform_idx = dataset.column_index(PLATFORM)?;
    let sales_idx = dataset.column_index(GLOBAL_SALES)?;

    let mut totals = PlatformSales::new();
    for row in dataset.rows() {
        let Some(platform) = row[platform_idx].as_category() else {
            continue;
        };
        let sales = row[sales_idx].as_f64().unwrap_or(0.0);
        *totals.entry(platform).or_insert(0.0) += sales;
    }
    Ok(totals)
}
