use std::cmp::Ordering;

use num_traits::Float;

/// A point in the plane.
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(
        from = "[T; 2]",
        into = "[T; 2]",
        bound(
            serialize = "T: serde::Serialize + Copy",
            deserialize = "T: serde::Deserialize<'de>"
        )
    )
)]
pub struct Coordinate<T = f64> {
    /// The horizontal ordinate.
    pub x: T,
    /// The vertical ordinate.
    pub y: T,
}

impl<T> From<[T; 2]> for Coordinate<T> {
    fn from([x, y]: [T; 2]) -> Self {
        Self { x, y }
    }
}

impl<T> From<(T, T)> for Coordinate<T> {
    fn from((x, y): (T, T)) -> Self {
        Self { x, y }
    }
}

impl<T> From<Coordinate<T>> for [T; 2] {
    fn from(value: Coordinate<T>) -> Self {
        [value.x, value.y]
    }
}

impl<T> Coordinate<T>
where
    T: Float,
{
    /// Returns the euclidean distance between self and rhs.
    pub fn distance(&self, rhs: &Self) -> T {
        (self.x - rhs.x).hypot(self.y - rhs.y)
    }

    /// Returns true if, and only if, both ordinates are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// A [`Coordinate`] totally ordered by x, then by y.
///
/// Inputs are rejected when they carry non-finite ordinates, so the fallback to
/// [`Ordering::Equal`] is never taken for coordinates inside a graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Ordered<T>(pub(crate) Coordinate<T>);

impl<T> Eq for Ordered<T> where T: PartialEq + PartialOrd {}

impl<T> PartialOrd for Ordered<T>
where
    T: PartialOrd,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Ordered<T>
where
    T: PartialOrd,
{
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.partial_cmp(&other.0).unwrap_or(Ordering::Equal)
    }
}

/// A constructor macro for the [`Coordinate`] type.
#[macro_export]
macro_rules! coord {
    ($x:expr, $y:expr) => {
        $crate::Coordinate { x: $x, y: $y }
    };
}
