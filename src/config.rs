//! Configuration file support
//!
//! Loads heat-map settings from a JSON file.
//!
//! Search order:
//! 1. Explicit path (`--config` CLI flag)
//! 2. `.rustyheatrc.json` in the search directory
//! 3. `rusty-heat.config.json` in the search directory
//!
//! All fields are optional. CLI flags take precedence over config file values.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::band::{Band, BandMode, Deviation};

/// Number of leading columns that identify a row's group by default.
pub const DEFAULT_LABEL_COLUMNS: usize = 3;

const CONFIG_FILE_NAMES: &[&str] = &[".rustyheatrc.json", "rusty-heat.config.json"];

/// Which band mode the config selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeName {
    PerGroup,
    Fixed,
}

/// Heat-map configuration loaded from a JSON config file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HeatmapConfig {
    /// Band mode (default: per_group)
    #[serde(default)]
    pub mode: Option<ModeName>,

    /// Band used in fixed mode (default: 20..181)
    #[serde(default)]
    pub fixed_band: Option<FixedBandConfig>,

    /// Deviation estimator for per-group bands (default: population)
    #[serde(default)]
    pub deviation: Option<Deviation>,

    /// Number of leading label columns forming the group key (default: 3)
    #[serde(default)]
    pub label_columns: Option<usize>,
}

/// Custom fixed band
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FixedBandConfig {
    pub min: f64,
    pub max: f64,
}

/// Configuration with defaults applied
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub mode: BandMode,
    /// Band applied when fixed mode is on, kept while per-group mode is active
    pub fixed_band: Band,
    pub deviation: Deviation,
    pub label_columns: usize,
    /// Path the config was loaded from (None if defaults)
    pub config_path: Option<PathBuf>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            mode: BandMode::PerGroup,
            fixed_band: Band::FIXED,
            deviation: Deviation::Population,
            label_columns: DEFAULT_LABEL_COLUMNS,
            config_path: None,
        }
    }
}

impl ResolvedConfig {
    /// Band used whenever fixed mode is switched on.
    pub fn fixed_band(&self) -> Band {
        self.fixed_band
    }

    /// Apply command-line overrides on top of file values.
    pub fn with_overrides(mut self, fixed: bool, deviation: Option<Deviation>) -> Self {
        if fixed {
            self.mode = BandMode::Fixed(self.fixed_band);
        }
        if let Some(d) = deviation {
            self.deviation = d;
        }
        self
    }
}

impl HeatmapConfig {
    /// Validate the configuration for logical errors
    pub fn validate(&self) -> Result<()> {
        if let Some(ref band) = self.fixed_band {
            if !band.min.is_finite() || !band.max.is_finite() {
                anyhow::bail!(
                    "fixed_band bounds must be finite (got {} .. {})",
                    band.min,
                    band.max
                );
            }
            if band.min >= band.max {
                anyhow::bail!(
                    "fixed_band.min ({}) must be less than fixed_band.max ({})",
                    band.min,
                    band.max
                );
            }
        }

        if self.label_columns == Some(0) {
            anyhow::bail!("label_columns must be at least 1");
        }

        Ok(())
    }

    /// Apply defaults and produce the settings used for rendering
    pub fn resolve(&self, config_path: Option<PathBuf>) -> Result<ResolvedConfig> {
        self.validate()?;

        let fixed = match self.fixed_band {
            Some(ref b) => Band::try_new(b.min, b.max)?,
            None => Band::FIXED,
        };
        let mode = match self.mode.unwrap_or(ModeName::PerGroup) {
            ModeName::PerGroup => BandMode::PerGroup,
            ModeName::Fixed => BandMode::Fixed(fixed),
        };

        Ok(ResolvedConfig {
            mode,
            fixed_band: fixed,
            deviation: self.deviation.unwrap_or_default(),
            label_columns: self.label_columns.unwrap_or(DEFAULT_LABEL_COLUMNS),
            config_path,
        })
    }

    /// Parse a config from JSON text
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("parsing config JSON")
    }
}

/// Load a config from an explicit path
pub fn load_config_file(path: &Path) -> Result<HeatmapConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config file {}", path.display()))?;
    let config = HeatmapConfig::from_json(&text)
        .with_context(|| format!("in config file {}", path.display()))?;
    config.validate()?;
    Ok(config)
}

/// Find a config file in `dir` using the search order
pub fn discover_config(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|p| p.is_file())
}

/// Load and resolve configuration, falling back to defaults
pub fn load_and_resolve(explicit: Option<&Path>, search_dir: &Path) -> Result<ResolvedConfig> {
    let path = match explicit {
        Some(p) => Some(p.to_path_buf()),
        None => discover_config(search_dir),
    };

    match path {
        Some(p) => {
            let config = load_config_file(&p)?;
            log::info!("Using config {}", p.display());
            config.resolve(Some(p))
        }
        None => Ok(ResolvedConfig::default()),
    }
}
