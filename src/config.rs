use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Source key the dashboard loads when none is given.
pub const DEFAULT_SOURCE: &str = "games_csv";

/// One named data source.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SourceConfig {
    pub path: PathBuf,
}

/// Contents of `dashboard.json`:
///
/// ```json
/// { "sources": { "games_csv": { "path": "data/vgsales.csv" } } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub sources: BTreeMap<String, SourceConfig>,

    /// Directory relative source paths are resolved against.
    #[serde(skip)]
    pub base_dir: PathBuf,
}

impl DashboardConfig {
    /// Read a config file. A missing file yields an empty source map.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::info!("No config at {}, starting without named sources", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let mut cfg = Self::from_json(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        cfg.base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Ok(cfg)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Resolve a source key to a file path.
    pub fn resolve(&self, key: &str) -> Result<PathBuf> {
        let source = self.sources.get(key).with_context(|| {
            let known: Vec<&str> = self.sources.keys().map(String::as_str).collect();
            format!("unknown data source '{key}' (configured: {known:?})")
        })?;
        if source.path.is_absolute() {
            Ok(source.path.clone())
        } else {
            Ok(self.base_dir.join(&source.path))
        }
    }
}
