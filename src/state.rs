use std::path::Path;

use anyhow::Result;

use crate::color::ColorMap;
use crate::data::controls::{ControlState, GenreFilter, YearBounds};
use crate::data::loader::load_file;
use crate::dashboard::{render, DashboardView, Session};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Loaded session (None until a file is loaded).
    pub session: Option<Session>,

    /// Current slider / selector values; `None` when the session has no
    /// usable year range.
    pub controls: Option<ControlState>,

    /// Result of the last pipeline run.
    pub view: Option<DashboardView>,

    /// Genre colours for the scatter plot.
    pub color_map: ColorMap,

    /// Load / configuration error shown in the top bar.
    pub status_message: Option<String>,
}

impl AppState {
    /// Ingest a newly loaded session, reset controls and re-render.
    pub fn set_session(&mut self, session: Session) {
        self.controls = session.default_controls();
        self.color_map = ColorMap::for_genres(&session.genres);
        self.session = Some(session);
        self.status_message = None;
        self.refresh();
    }

    /// Load a file into a fresh session, keeping the old one on failure.
    pub fn load_path(&mut self, path: &Path) -> Result<()> {
        let dataset = load_file(path)?;
        log::info!(
            "Loaded {} records with columns {:?} from {}",
            dataset.len(),
            dataset.columns(),
            path.display()
        );
        self.set_session(Session::new(dataset));
        Ok(())
    }

    /// Re-run the pipeline for the current controls.
    pub fn refresh(&mut self) {
        self.view = self
            .session
            .as_ref()
            .map(|session| render(session, self.controls.as_ref()));
    }

    pub fn set_min_year(&mut self, year: i32) {
        self.update_year(|controls, bounds| controls.set_min_year(year, bounds));
    }

    pub fn set_max_year(&mut self, year: i32) {
        self.update_year(|controls, bounds| controls.set_max_year(year, bounds));
    }

    pub fn set_genre(&mut self, genre: GenreFilter) {
        if let Some(controls) = &mut self.controls {
            if controls.genre != genre {
                controls.genre = genre;
                self.refresh();
            }
        }
    }

    fn update_year<F>(&mut self, f: F)
    where
        F: FnOnce(&mut ControlState, YearBounds),
    {
        let Some(bounds) = self.session.as_ref().and_then(|s| s.bounds.clone().ok()) else {
            return;
        };
        if let Some(controls) = &mut self.controls {
            let before = controls.clone();
            f(controls, bounds);
            if *controls != before {
                self.refresh();
            }
        }
    }
}
