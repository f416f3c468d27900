use num_traits::Float;

use crate::{Coordinate, Error, Result};

/// A point, or a line, in homogeneous coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Homogeneous<T> {
    x: T,
    y: T,
    w: T,
}

impl<T> From<&Coordinate<T>> for Homogeneous<T>
where
    T: Float,
{
    fn from(point: &Coordinate<T>) -> Self {
        Self {
            x: point.x,
            y: point.y,
            w: T::one(),
        }
    }
}

impl<T> TryFrom<Homogeneous<T>> for Coordinate<T>
where
    T: Float,
{
    type Error = Error;

    fn try_from(value: Homogeneous<T>) -> Result<Self> {
        let x = value.x / value.w;
        let y = value.y / value.w;

        if !x.is_finite() || !y.is_finite() {
            return Err(Error::NotRepresentable);
        }

        Ok(Coordinate { x, y })
    }
}

impl<T> Homogeneous<T>
where
    T: Float,
{
    /// Returns the cross product of self and rhs.
    ///
    /// Being both points, the result is the line through them; being both lines, it is the
    /// point they meet at.
    fn cross(&self, rhs: &Self) -> Self {
        Self {
            x: self.y * rhs.w - rhs.y * self.w,
            y: rhs.x * self.w - self.x * rhs.w,
            w: self.x * rhs.y - rhs.x * self.y,
        }
    }
}

/// Returns the point where the (infinite) line through `p1` and `p2` meets the one through `q1`
/// and `q2`.
///
/// Fails with [`Error::NotRepresentable`] if the lines are parallel or so ill-conditioned that
/// the point has no finite representation.
pub(crate) fn intersection<T>(
    p1: &Coordinate<T>,
    p2: &Coordinate<T>,
    q1: &Coordinate<T>,
    q2: &Coordinate<T>,
) -> Result<Coordinate<T>>
where
    T: Float,
{
    let p = Homogeneous::from(p1).cross(&Homogeneous::from(p2));
    let q = Homogeneous::from(q1).cross(&Homogeneous::from(q2));

    p.cross(&q).try_into()
}
