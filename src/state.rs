use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::band::{BandMode, Deviation};
use crate::config::ResolvedConfig;
use crate::data::model::Dataset;
use crate::render::html;
use crate::table::{HeatmapTable, build_table};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Loaded dataset (None until user loads a file).
    pub dataset: Option<DatasetEntry>,

    /// Active settings (mode, estimator, label columns).
    pub config: ResolvedConfig,

    /// Coloured table for the current dataset and settings (cached).
    pub table: Option<HeatmapTable>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

/// A loaded dataset and where it came from.
pub struct DatasetEntry {
    pub data: Dataset,
    pub source: Option<PathBuf>,
}

impl AppState {
    pub fn new(config: ResolvedConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Ingest a newly loaded dataset and colour it.
    pub fn set_dataset(&mut self, data: Dataset, source: Option<PathBuf>) {
        self.dataset = Some(DatasetEntry { data, source });
        self.rebuild_table();
    }

    /// Load a file from disk, reporting failures in the status line.
    pub fn open_path(&mut self, path: &Path) {
        match crate::data::loader::load_file(path) {
            Ok(dataset) => self.set_dataset(dataset, Some(path.to_path_buf())),
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Recompute the coloured table after data or settings change.
    pub fn rebuild_table(&mut self) {
        let Some(entry) = &self.dataset else {
            self.table = None;
            return;
        };
        match build_table(&entry.data, &self.config) {
            Ok(table) => {
                self.table = Some(table);
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to build table: {e}");
                self.status_message = Some(format!("Error: {e}"));
                self.table = None;
            }
        }
    }

    /// Switch between per-group and fixed bands.
    pub fn set_fixed_mode(&mut self, fixed: bool) {
        let mode = if fixed {
            BandMode::Fixed(self.config.fixed_band())
        } else {
            BandMode::PerGroup
        };
        if mode != self.config.mode {
            self.config.mode = mode;
            self.rebuild_table();
        }
    }

    pub fn set_deviation(&mut self, deviation: Deviation) {
        if deviation != self.config.deviation {
            self.config.deviation = deviation;
            self.rebuild_table();
        }
    }

    /// Page title derived from the source file name.
    pub fn title(&self) -> String {
        self.dataset
            .as_ref()
            .and_then(|e| e.source.as_ref())
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Heat map".to_string())
    }

    /// Write the current table as an HTML page.
    pub fn export_html(&mut self, path: &Path) -> Result<()> {
        let table = self
            .table
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("nothing to export"))?;
        html::write_page(path, table, &self.title())?;
        self.status_message = Some(format!("Exported {}", path.display()));
        Ok(())
    }
}
