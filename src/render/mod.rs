/// Renderers consuming a finished `HeatmapTable`.
pub mod html;
