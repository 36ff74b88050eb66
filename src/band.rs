//! Normalization bands for the heat-map gradient.
//!
//! A [`Band`] is the `[min, max]` interval a value is normalized into before
//! colouring. Bands either come from per-group statistics of the dataset
//! ([`estimate_bands`]) or from one fixed interval shared by every cell.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::data::model::{Dataset, GroupKey};
use crate::error::HeatmapError;

/// Closed interval used to normalize a value into the gradient.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub min: f64,
    pub max: f64,
}

impl Band {
    /// Marker band for "no data": cells in such a group render neutral.
    pub const ZERO: Band = Band { min: 0.0, max: 0.0 };

    /// Default band of fixed mode.
    pub const FIXED: Band = Band {
        min: 20.0,
        max: 181.0,
    };

    pub fn new(min: f64, max: f64) -> Self {
        debug_assert!(
            min.partial_cmp(&max) != Some(Ordering::Greater),
            "inverted band [{min}, {max}]"
        );
        Band { min, max }
    }

    /// Checked constructor for bands coming from user input.
    pub fn try_new(min: f64, max: f64) -> Result<Self, HeatmapError> {
        if min > max {
            return Err(HeatmapError::InvalidBand { min, max });
        }
        Ok(Band { min, max })
    }

    /// Band spanning one deviation either side of the mean.
    pub fn around(mean: f64, deviation: f64) -> Self {
        Band::new(mean - deviation, mean + deviation)
    }

    pub fn mid(&self) -> f64 {
        self.min + (self.max - self.min) / 2.0
    }

    pub fn is_zero(&self) -> bool {
        self.min == 0.0 && self.max == 0.0
    }

    pub fn is_degenerate(&self) -> bool {
        self.min == self.max
    }
}

// ---------------------------------------------------------------------------
// Statistics
// ---------------------------------------------------------------------------

/// Which standard deviation estimator to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Deviation {
    /// Divide by `n`.
    #[default]
    Population,
    /// Divide by `n - 1` (Bessel's correction).
    Sample,
}

impl Deviation {
    pub const ALL: [Deviation; 2] = [Deviation::Population, Deviation::Sample];

    pub fn label(&self) -> &'static str {
        match self {
            Deviation::Population => "Population",
            Deviation::Sample => "Sample",
        }
    }
}

/// Arithmetic mean, `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Standard deviation around `mean`. Too few values yield `0.0`.
pub fn deviation(values: &[f64], mean: f64, kind: Deviation) -> f64 {
    let n = values.len();
    let denom = match kind {
        Deviation::Population => n,
        Deviation::Sample => n.saturating_sub(1),
    };
    if denom == 0 {
        return 0.0;
    }
    let sum_sq: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    (sum_sq / denom as f64).sqrt()
}

// ---------------------------------------------------------------------------
// Band table
// ---------------------------------------------------------------------------

/// Per-group bands, built once from the full dataset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BandTable {
    bands: HashMap<GroupKey, Band>,
}

impl BandTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the band for a group, replacing any earlier one.
    pub fn insert(&mut self, key: GroupKey, band: Band) -> Option<Band> {
        self.bands.insert(key, band)
    }

    pub fn get(&self, key: &GroupKey) -> Result<Band, HeatmapError> {
        self.bands
            .get(key)
            .copied()
            .ok_or_else(|| HeatmapError::KeyNotFound(key.clone()))
    }

    pub fn len(&self) -> usize {
        self.bands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }
}

/// Compute a band for every group of `dataset`.
///
/// Each row contributes the mean ± deviation of its own numeric cells after
/// the label columns. Rows sharing a key overwrite each other; the last row
/// wins. Rows without any numeric cell get [`Band::ZERO`].
pub fn estimate_bands(dataset: &Dataset, label_columns: usize, kind: Deviation) -> BandTable {
    let mut table = BandTable::new();
    for row in &dataset.rows {
        let key = row.group_key(label_columns);
        let values = row.measurements(label_columns);
        let band = match mean(&values) {
            Some(m) => Band::around(m, deviation(&values, m, kind)),
            None => Band::ZERO,
        };
        if let Some(previous) = table.insert(key.clone(), band) {
            log::debug!(
                "group {} band [{}, {}] replaced by [{}, {}]",
                key.joined(),
                previous.min,
                previous.max,
                band.min,
                band.max
            );
        }
    }
    table
}

// ---------------------------------------------------------------------------
// Band source
// ---------------------------------------------------------------------------

/// How cells find their band. Exactly one mode is active per table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BandMode {
    #[default]
    PerGroup,
    Fixed(Band),
}

impl BandMode {
    pub fn is_per_group(&self) -> bool {
        matches!(self, BandMode::PerGroup)
    }
}

/// Resolved bands for one rendering run.
#[derive(Debug, Clone, PartialEq)]
pub enum BandSource {
    PerGroup(BandTable),
    Fixed(Band),
}

impl BandSource {
    /// Build the source for `mode`, estimating group bands when needed.
    pub fn for_mode(
        mode: BandMode,
        dataset: &Dataset,
        label_columns: usize,
        kind: Deviation,
    ) -> Self {
        match mode {
            BandMode::PerGroup => {
                BandSource::PerGroup(estimate_bands(dataset, label_columns, kind))
            }
            BandMode::Fixed(band) => BandSource::Fixed(band),
        }
    }

    pub fn band_for(&self, key: &GroupKey) -> Result<Band, HeatmapError> {
        match self {
            BandSource::PerGroup(table) => table.get(key),
            BandSource::Fixed(band) => Ok(*band),
        }
    }

    pub fn is_per_group(&self) -> bool {
        matches!(self, BandSource::PerGroup(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{CellValue, Row};

    fn dataset(rows: Vec<Vec<CellValue>>) -> Dataset {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        let columns = (0..width).map(|i| format!("c{i}")).collect();
        Dataset::new(columns, rows.into_iter().map(Row::new).collect())
    }

    fn labelled(labels: [&str; 3], values: &[f64]) -> Vec<CellValue> {
        let mut row: Vec<CellValue> = labels.iter().map(|&l| l.into()).collect();
        row.extend(values.iter().map(|&v| CellValue::Float(v)));
        row
    }

    #[test]
    fn test_mean_and_population_deviation() {
        let values = [10.0, 20.0];
        let m = mean(&values).unwrap();
        assert_eq!(m, 15.0);
        assert_eq!(deviation(&values, m, Deviation::Population), 5.0);
    }

    #[test]
    fn test_sample_deviation_uses_bessel_correction() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let m = mean(&values).unwrap();
        assert_eq!(deviation(&values, m, Deviation::Population), 2.0);
        let sample = deviation(&values, m, Deviation::Sample);
        assert!((sample - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_single_value_has_zero_deviation() {
        assert_eq!(deviation(&[5.0], 5.0, Deviation::Population), 0.0);
        assert_eq!(deviation(&[5.0], 5.0, Deviation::Sample), 0.0);
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn test_estimate_bands_one_row_group() {
        let ds = dataset(vec![labelled(["x", "y", "z"], &[10.0, 20.0])]);
        let table = estimate_bands(&ds, 3, Deviation::Population);
        let band = table.get(&GroupKey::new(["x", "y", "z"])).unwrap();
        assert_eq!(band, Band::new(10.0, 20.0));
    }

    #[test]
    fn test_estimate_bands_single_value_is_degenerate() {
        let ds = dataset(vec![labelled(["a", "b", "c"], &[5.0])]);
        let table = estimate_bands(&ds, 3, Deviation::Population);
        let band = table.get(&GroupKey::new(["a", "b", "c"])).unwrap();
        assert_eq!(band, Band::new(5.0, 5.0));
        assert!(band.is_degenerate());
    }

    #[test]
    fn test_estimate_bands_last_write_wins() {
        let ds = dataset(vec![
            labelled(["a", "b", "c"], &[1.0, 3.0]),
            labelled(["a", "b", "c"], &[10.0, 30.0]),
        ]);
        let table = estimate_bands(&ds, 3, Deviation::Population);
        assert_eq!(table.len(), 1);
        let band = table.get(&GroupKey::new(["a", "b", "c"])).unwrap();
        assert_eq!(band, Band::new(10.0, 30.0));
    }

    #[test]
    fn test_estimate_bands_without_measurements_is_zero() {
        let ds = dataset(vec![vec!["a".into(), "b".into(), "c".into(), "text".into()]]);
        let table = estimate_bands(&ds, 3, Deviation::Population);
        let band = table.get(&GroupKey::new(["a", "b", "c"])).unwrap();
        assert!(band.is_zero());
    }

    #[test]
    fn test_missing_key_is_an_error() {
        let table = BandTable::new();
        let key = GroupKey::new(["nope", "", ""]);
        assert_eq!(table.get(&key), Err(HeatmapError::KeyNotFound(key.clone())));
    }

    #[test]
    fn test_fixed_source_ignores_key() {
        let source = BandSource::Fixed(Band::FIXED);
        let band = source.band_for(&GroupKey::new(["any"])).unwrap();
        assert_eq!(band, Band::new(20.0, 181.0));
        assert_eq!(band.mid(), 100.5);
    }

    #[test]
    fn test_try_new_rejects_inverted_band() {
        assert_eq!(
            Band::try_new(3.0, 1.0),
            Err(HeatmapError::InvalidBand { min: 3.0, max: 1.0 })
        );
        assert!(Band::try_new(1.0, 1.0).is_ok());
    }
}
