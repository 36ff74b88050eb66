//! Turns a [`Dataset`] into a grid of coloured cell descriptors.
//!
//! This is the pure half of rendering: renderers only ever see a
//! [`HeatmapTable`] and never touch bands or statistics.

use palette::Srgb;

use crate::band::BandSource;
use crate::color::{self, LABEL, NEUTRAL};
use crate::config::ResolvedConfig;
use crate::data::model::Dataset;
use crate::error::HeatmapError;

/// What a cell represents, which decides how its colour was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    /// One of the grouping columns.
    Label,
    /// A numeric value coloured on the gradient.
    Measurement,
    /// A non-numeric or empty value outside the label columns.
    Neutral,
}

/// A single rendered cell.
#[derive(Debug, Clone, PartialEq)]
pub struct CellView {
    pub text: String,
    pub color: Srgb<u8>,
    pub kind: CellKind,
}

impl CellView {
    pub fn hex(&self) -> String {
        color::to_hex(self.color)
    }
}

/// Header plus rows of cells, ready for a renderer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeatmapTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<CellView>>,
}

impl HeatmapTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Build the table using the mode and estimator from `config`.
pub fn build_table(
    dataset: &Dataset,
    config: &ResolvedConfig,
) -> Result<HeatmapTable, HeatmapError> {
    let source = BandSource::for_mode(
        config.mode,
        dataset,
        config.label_columns,
        config.deviation,
    );
    build_table_with(dataset, config.label_columns, &source)
}

/// Build the table with caller-supplied bands.
///
/// Every row's group must be present in a per-group source.
pub fn build_table_with(
    dataset: &Dataset,
    label_columns: usize,
    source: &BandSource,
) -> Result<HeatmapTable, HeatmapError> {
    let per_group = source.is_per_group();
    let mut rows = Vec::with_capacity(dataset.len());

    for row in &dataset.rows {
        let band = source.band_for(&row.group_key(label_columns))?;
        let cells = row
            .values
            .iter()
            .enumerate()
            .map(|(i, value)| {
                let text = value.to_string();
                if i < label_columns {
                    return CellView {
                        text,
                        color: LABEL,
                        kind: CellKind::Label,
                    };
                }
                match value.as_f64() {
                    Some(v) => CellView {
                        text,
                        color: color::cell_color(v, band, per_group),
                        kind: CellKind::Measurement,
                    },
                    None => CellView {
                        text,
                        color: NEUTRAL,
                        kind: CellKind::Neutral,
                    },
                }
            })
            .collect();
        rows.push(cells);
    }

    Ok(HeatmapTable {
        headers: dataset.columns.clone(),
        rows,
    })
}
