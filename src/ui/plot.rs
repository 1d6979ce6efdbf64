use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot, PlotPoint, Points};

use crate::chart::{BarChartSpec, ScatterChartSpec};
use crate::color::ColorMap;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Central panel: bar chart above scatter plot
// ---------------------------------------------------------------------------

/// Render both charts in the central panel.
pub fn charts(ui: &mut Ui, state: &AppState) {
    let Some(view) = &state.view else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a file to explore sales  (File → Open…)");
        });
        return;
    };

    super::panels::status_lines(ui, &view.status);
    ui.separator();

    let height = (ui.available_height() / 2.0 - 24.0).max(120.0);
    if let Some(bar) = &view.bar {
        sales_by_platform(ui, bar, height);
    }
    if let Some(scatter) = &view.scatter {
        sales_over_time(ui, scatter, &state.color_map, height);
    }
}

/// Categorical bar chart: one bar per platform at x = 0, 1, 2, …
fn sales_by_platform(ui: &mut Ui, spec: &BarChartSpec, height: f32) {
    ui.strong(&spec.title);

    let bars: Vec<Bar> = spec
        .bars
        .iter()
        .enumerate()
        .map(|(i, b)| Bar::new(i as f64, b.value).name(&b.platform).width(0.7))
        .collect();
    let chart = BarChart::new(bars).color(Color32::LIGHT_BLUE);

    let platforms: Vec<String> = spec.bars.iter().map(|b| b.platform.clone()).collect();
    Plot::new("platform_sales")
        .height(height)
        .x_axis_label(&spec.x_label)
        .y_axis_label(&spec.y_label)
        .x_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
                return String::new();
            }
            platforms.get(idx as usize).cloned().unwrap_or_default()
        })
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| plot_ui.bar_chart(chart));
}

/// Year vs. sales, one coloured series per genre, name/platform on hover.
fn sales_over_time(ui: &mut Ui, spec: &ScatterChartSpec, colors: &ColorMap, height: f32) {
    ui.strong(&spec.title);

    let hover = spec.clone();
    Plot::new("sales_over_time")
        .height(height)
        .legend(Legend::default())
        .x_axis_label(&spec.x_label)
        .y_axis_label(&spec.y_label)
        .label_formatter(move |name: &str, value: &PlotPoint| {
            let hits = hover.hover_points(name, value.x, value.y);
            let Some(first) = hits.first() else {
                return format!("Year: {:.0}\nSales: {:.2}", value.x, value.y);
            };
            let titles: Vec<String> = hits
                .iter()
                .map(|p| format!("{} ({})", p.name, p.platform))
                .collect();
            format!(
                "{}\n{name}\nYear: {:.0}\nSales: {:.2}",
                titles.join("\n"),
                first.year,
                first.sales
            )
        })
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for series in &spec.series {
                let points: Vec<[f64; 2]> =
                    series.points.iter().map(|p| [p.year, p.sales]).collect();
                let color = series
                    .genre
                    .as_deref()
                    .map_or(Color32::GRAY, |g| colors.color_for(g));
                plot_ui.points(
                    Points::new(points)
                        .name(series.label())
                        .color(color)
                        .radius(3.0),
                );
            }
        });
}
