mod app;
mod chart;
mod color;
mod config;
mod dashboard;
mod data;
mod error;
mod state;
mod ui;

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use app::DashboardApp;
use clap::Parser;
use config::{DashboardConfig, DEFAULT_SOURCE};
use eframe::egui;
use state::AppState;

#[derive(Parser, Debug)]
#[command(name = "game-sales-dashboard")]
#[command(about = "Interactive video game sales dashboard", long_about = None)]
struct Args {
    /// Config file mapping source keys to data files
    #[arg(long, default_value = "dashboard.json")]
    config: PathBuf,

    /// Data source key to load on startup
    #[arg(long, default_value = DEFAULT_SOURCE)]
    source: String,

    /// Load this file directly instead of a configured source
    #[arg(long)]
    file: Option<PathBuf>,

    /// Write the default dashboard view as JSON and exit without a window
    #[arg(long)]
    export: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut state = AppState::default();
    if let Err(e) = load_initial(&args, &mut state) {
        log::error!("Failed to load data: {e:#}");
        state.status_message = Some(format!("Error: {e:#}"));
    }

    if let Some(path) = &args.export {
        return export_view(&state, path);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 900.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Video Game Sales Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(DashboardApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}

/// Resolve the startup data file (`--file` wins over `--source`) and load it.
fn load_initial(args: &Args, state: &mut AppState) -> Result<()> {
    let path = match &args.file {
        Some(path) => path.clone(),
        None => {
            let cfg = DashboardConfig::load(&args.config)?;
            if cfg.sources.is_empty() {
                return Ok(());
            }
            let path = cfg.resolve(&args.source)?;
            log::info!("Source '{}' resolved to {}", args.source, path.display());
            path
        }
    };
    state
        .load_path(&path)
        .with_context(|| format!("loading {}", path.display()))
}

fn export_view(state: &AppState, path: &Path) -> Result<()> {
    if let Some(msg) = &state.status_message {
        anyhow::bail!("{msg}");
    }
    let view = state.view.as_ref().context("no dataset loaded to export")?;
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), view).context("writing view JSON")?;
    log::info!("Wrote dashboard view to {}", path.display());
    Ok(())
}
