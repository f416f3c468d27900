use num_traits::Float;

use crate::Coordinate;

/// The grid all coordinates of an operation are snapped to.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PrecisionModel<T = f64> {
    /// Full floating point precision, no rounding at all.
    #[default]
    Floating,
    /// Ordinates are rounded to the nearest multiple of `1 / scale`.
    Fixed { scale: T },
}

impl<T> PrecisionModel<T>
where
    T: Float,
{
    /// Returns true if, and only if, this model performs no rounding.
    pub fn is_floating(&self) -> bool {
        matches!(self, Self::Floating)
    }

    /// Rounds the given value to this model, rounding half away from zero.
    ///
    /// NaN is returned unchanged.
    pub fn make_precise_value(&self, value: T) -> T {
        match self {
            Self::Floating => value,
            Self::Fixed { .. } if value.is_nan() => value,
            Self::Fixed { scale } => (value * *scale).round() / *scale,
        }
    }

    /// Returns the given coordinate rounded to this model.
    pub fn make_precise(&self, coordinate: Coordinate<T>) -> Coordinate<T> {
        Coordinate {
            x: self.make_precise_value(coordinate.x),
            y: self.make_precise_value(coordinate.y),
        }
    }
}
