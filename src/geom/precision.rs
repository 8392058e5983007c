use serde::{Deserialize, Serialize};

/// Quantization applied to every ordinate a reader produces.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum PrecisionModel {
    /// Full double precision; values pass through unchanged.
    #[default]
    Floating,
    /// Single precision; values are rounded to the nearest `f32`.
    FloatingSingle,
    /// Fixed grid of `1 / scale` units.
    Fixed { scale: f64 },
}

impl PrecisionModel {
    /// Snap a value onto the model's grid. NaN and infinities pass through.
    pub fn make_precise(&self, value: f64) -> f64 {
        if !value.is_finite() {
            return value;
        }
        match *self {
            PrecisionModel::Floating => value,
            PrecisionModel::FloatingSingle => value as f32 as f64,
            PrecisionModel::Fixed { scale } => {
                if scale == 0.0 || !scale.is_finite() {
                    return value;
                }
                // Round-half-up, matching grid snapping conventions.
                (value * scale + 0.5).floor() / scale
            }
        }
    }

    /// Significant digits the model can represent.
    pub fn maximum_significant_digits(&self) -> usize {
        match *self {
            PrecisionModel::Floating => 16,
            PrecisionModel::FloatingSingle => 6,
            PrecisionModel::Fixed { scale } => 1 + scale.abs().log10().ceil().max(0.0) as usize,
        }
    }

    /// Fraction digits needed to print values on this grid, or `None` when
    /// output should keep full round-trip precision. Single-precision values
    /// have no fixed fraction cap: `1e-7` is as representable as `1e7`.
    pub fn maximum_fraction_digits(&self) -> Option<usize> {
        match *self {
            PrecisionModel::Floating => None,
            PrecisionModel::FloatingSingle => None,
            PrecisionModel::Fixed { scale } => {
                if scale > 0.0 && scale.is_finite() {
                    Some(scale.log10().ceil().max(0.0) as usize)
                } else {
                    None
                }
            }
        }
    }
}
