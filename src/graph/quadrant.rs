use num_traits::Float;

use crate::{Coordinate, Error, Result};

/// One of the four quadrants of the plane, numbered counter-clockwise from the north-east one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Quadrant {
    NorthEast,
    NorthWest,
    SouthWest,
    SouthEast,
}

impl Quadrant {
    /// Returns the quadrant of the direction vector `(dx, dy)`.
    ///
    /// Fails if the vector is null, since it has no direction.
    pub fn of<T>(dx: T, dy: T) -> Result<Self>
    where
        T: Float,
    {
        if dx.is_zero() && dy.is_zero() {
            return Err(Error::Assertion("cannot compute the quadrant of a null vector"));
        }

        Ok(match (dx >= T::zero(), dy >= T::zero()) {
            (true, true) => Self::NorthEast,
            (true, false) => Self::SouthEast,
            (false, true) => Self::NorthWest,
            (false, false) => Self::SouthWest,
        })
    }

    /// Returns the quadrant of the direction from `p0` to `p1`.
    pub fn between<T>(p0: &Coordinate<T>, p1: &Coordinate<T>) -> Result<Self>
    where
        T: Float,
    {
        Self::of(p1.x - p0.x, p1.y - p0.y)
    }

    /// Returns true if, and only if, the quadrant is in the upper half of the plane.
    pub fn is_northern(&self) -> bool {
        matches!(self, Self::NorthEast | Self::NorthWest)
    }
}
