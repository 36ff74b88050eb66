use eframe::egui::Color32;
use palette::Srgb;

use crate::band::Band;
use crate::error::HeatmapError;

/// Background of cells whose group carries no usable spread.
pub const NEUTRAL: Srgb<u8> = palette::named::LIGHTGREY;

/// Background of the label (grouping) columns.
pub const LABEL: Srgb<u8> = palette::named::LIGHTBLUE;

// ---------------------------------------------------------------------------
// Red → yellow → green gradient
// ---------------------------------------------------------------------------

/// Map `value` onto the two-ramp gradient spanned by `band`.
///
/// Below `min` is pure red, at or above `max` pure green. The lower half of
/// the band ramps green up with red held at 255; from the midpoint on, red
/// ramps down with green held at 255. Blue is always 0.
///
/// A zero-width band has no ramp and yields [`HeatmapError::DegenerateBand`].
pub fn heat_color(value: f64, band: Band) -> Result<Srgb<u8>, HeatmapError> {
    let Band { min, max } = band;
    if band.is_degenerate() {
        return Err(HeatmapError::DegenerateBand { min, max });
    }

    let half = (max - min) / 2.0;
    let mid = min + half;

    let (red, green) = if value < min {
        (255, 0)
    } else if value < mid {
        (255, channel((value - min) / half))
    } else if value < max {
        (channel((max - value) / half), 255)
    } else {
        (0, 255)
    };

    Ok(Srgb::new(red, green, 0))
}

fn channel(fraction: f64) -> u8 {
    (fraction * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Colour of one measurement cell, falling back to [`NEUTRAL`].
///
/// With per-group bands an all-zero band means "no variance data". Any
/// zero-width band is rendered neutral rather than producing a broken ramp.
pub fn cell_color(value: f64, band: Band, per_group: bool) -> Srgb<u8> {
    if per_group && band.is_zero() {
        return NEUTRAL;
    }
    match heat_color(value, band) {
        Ok(color) => color,
        Err(e) => {
            log::debug!("value {value}: {e}, using neutral colour");
            NEUTRAL
        }
    }
}

/// Six-digit lower-case hex string, e.g. `#ff8000`.
pub fn to_hex(color: Srgb<u8>) -> String {
    format!("#{:02x}{:02x}{:02x}", color.red, color.green, color.blue)
}

pub fn to_color32(color: Srgb<u8>) -> Color32 {
    Color32::from_rgb(color.red, color.green, color.blue)
}

/// `n` evenly spaced samples of the gradient from red to green, for legends.
pub fn gradient_stops(n: usize) -> Vec<Srgb<u8>> {
    if n == 0 {
        return Vec::new();
    }
    let band = Band::new(0.0, 1.0);
    (0..n)
        .map(|i| {
            let t = if n == 1 { 0.0 } else { i as f64 / (n - 1) as f64 };
            heat_color(t, band).unwrap_or(NEUTRAL)
        })
        .collect()
}
