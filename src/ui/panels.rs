use eframe::egui::{self, Color32, RichText, Ui};

use crate::dashboard::{Severity, StatusLine};
use crate::data::controls::GenreFilter;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(session) = &state.session else {
        ui.label("No dataset loaded.");
        return;
    };

    let (Some(controls), Ok(bounds)) = (state.controls.clone(), session.bounds.clone()) else {
        ui.label(RichText::new("Year filters unavailable for this dataset.").italics());
        return;
    };
    let genres = session.genres.clone();

    // ---- Year range ----
    let mut min_year = controls.min_year;
    let mut max_year = controls.max_year;

    ui.strong("Minimum Release Year");
    if ui
        .add(egui::Slider::new(&mut min_year, bounds.min..=bounds.max))
        .changed()
    {
        state.set_min_year(min_year);
    }

    ui.strong("Maximum Release Year");
    if ui
        .add(egui::Slider::new(&mut max_year, bounds.min..=bounds.max))
        .changed()
    {
        state.set_max_year(max_year);
    }
    ui.separator();

    // ---- Genre selector ----
    ui.strong("Select Genre");
    let mut selected = controls.genre.clone();
    egui::ComboBox::from_id_salt("genre_select")
        .selected_text(selected.label())
        .show_ui(ui, |ui: &mut Ui| {
            for option in &genres {
                let mut text = RichText::new(option.label());
                if let GenreFilter::Only(g) = option {
                    text = text.color(state.color_map.color_for(g));
                }
                ui.selectable_value(&mut selected, option.clone(), text);
            }
        });
    if selected != controls.genre {
        state.set_genre(selected);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(view) = &state.view {
            match view.filtered_records {
                Some(n) => ui.label(format!("{} records loaded, {n} visible", view.total_records)),
                None => ui.label(format!("{} records loaded", view.total_records)),
            };
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Status text
// ---------------------------------------------------------------------------

/// Dashboard header and the status lines of the last render.
pub fn status_lines(ui: &mut Ui, lines: &[StatusLine]) {
    ui.heading("Video Game Sales Dashboard");
    ui.label("Welcome! Use the filters on the left to explore video game sales data.");
    for line in lines {
        let text = RichText::new(&line.text);
        let text = match line.severity {
            Severity::Info => text,
            Severity::Warning => text.color(Color32::YELLOW),
            Severity::Error => text.color(Color32::RED).strong(),
        };
        ui.label(text);
    }
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open sales data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        if let Err(e) = state.load_path(&path) {
            log::error!("Failed to load file: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
