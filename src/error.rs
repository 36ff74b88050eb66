use thiserror::Error;

use crate::data::model::GroupKey;

/// Errors raised while turning a dataset into heat-map colors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HeatmapError {
    #[error("no band recorded for group {0}")]
    KeyNotFound(GroupKey),
    #[error("degenerate band [{min}, {max}]: zero-width ramp")]
    DegenerateBand { min: f64, max: f64 },
    #[error("invalid band [{min}, {max}]: min must not exceed max")]
    InvalidBand { min: f64, max: f64 },
}
