//! Heat-map tables: colour each measurement by where it sits in its
//! group's spread.
//!
//! ```text
//!  loader ──► Dataset ──► BandSource ──► build_table ──► HeatmapTable
//!                          (per group                      │
//!                           or fixed)            html page ┴ egui grid
//! ```

pub mod app;
pub mod band;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod render;
pub mod state;
pub mod table;
pub mod ui;

pub use band::{Band, BandMode, BandSource, BandTable, Deviation, estimate_bands};
pub use color::{cell_color, heat_color, to_hex};
pub use config::{HeatmapConfig, ResolvedConfig};
pub use data::model::{CellValue, Dataset, GroupKey, KeyPart, Row};
pub use error::HeatmapError;
pub use table::{CellKind, CellView, HeatmapTable, build_table, build_table_with};
