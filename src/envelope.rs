use num_traits::Float;

use crate::Coordinate;

/// An axis-aligned bounding box.
///
/// A null envelope, the one of an empty set of points, has its minimum ordinates greater than
/// its maximum ones.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Envelope<T = f64> {
    pub min_x: T,
    pub max_x: T,
    pub min_y: T,
    pub max_y: T,
}

impl<T> Default for Envelope<T>
where
    T: Float,
{
    fn default() -> Self {
        Self {
            min_x: T::infinity(),
            max_x: T::neg_infinity(),
            min_y: T::infinity(),
            max_y: T::neg_infinity(),
        }
    }
}

impl<T> From<&Coordinate<T>> for Envelope<T>
where
    T: Float,
{
    fn from(point: &Coordinate<T>) -> Self {
        Self {
            min_x: point.x,
            max_x: point.x,
            min_y: point.y,
            max_y: point.y,
        }
    }
}

impl<'a, T> FromIterator<&'a Coordinate<T>> for Envelope<T>
where
    T: Float + 'a,
{
    fn from_iter<I: IntoIterator<Item = &'a Coordinate<T>>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::default(), |mut envelope, point| {
                envelope.expand_to_include(point);
                envelope
            })
    }
}

impl<T> Envelope<T>
where
    T: Float,
{
    /// Returns the envelope of the segment between the given points.
    pub fn of_segment(p: &Coordinate<T>, q: &Coordinate<T>) -> Self {
        Self {
            min_x: p.x.min(q.x),
            max_x: p.x.max(q.x),
            min_y: p.y.min(q.y),
            max_y: p.y.max(q.y),
        }
    }

    /// Returns true if, and only if, this envelope contains no point at all.
    pub fn is_null(&self) -> bool {
        self.min_x > self.max_x
    }

    /// Enlarges self so it includes the given point.
    pub fn expand_to_include(&mut self, point: &Coordinate<T>) {
        self.min_x = self.min_x.min(point.x);
        self.max_x = self.max_x.max(point.x);
        self.min_y = self.min_y.min(point.y);
        self.max_y = self.max_y.max(point.y);
    }

    /// Enlarges self so it includes the given envelope.
    pub fn expand_to_include_envelope(&mut self, other: &Self) {
        if other.is_null() {
            return;
        }

        self.min_x = self.min_x.min(other.min_x);
        self.max_x = self.max_x.max(other.max_x);
        self.min_y = self.min_y.min(other.min_y);
        self.max_y = self.max_y.max(other.max_y);
    }

    /// Returns true if, and only if, self and rhs share at least one point.
    pub fn intersects(&self, rhs: &Self) -> bool {
        if self.is_null() || rhs.is_null() {
            return false;
        }

        !(rhs.min_x > self.max_x
            || rhs.max_x < self.min_x
            || rhs.min_y > self.max_y
            || rhs.max_y < self.min_y)
    }

    /// Returns true if, and only if, the given point lies inside or on the border of self.
    pub fn contains_point(&self, point: &Coordinate<T>) -> bool {
        !self.is_null()
            && point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
    }

    /// Returns true if, and only if, rhs lies entirely inside self.
    pub fn contains(&self, rhs: &Self) -> bool {
        !self.is_null()
            && !rhs.is_null()
            && rhs.min_x >= self.min_x
            && rhs.max_x <= self.max_x
            && rhs.min_y >= self.min_y
            && rhs.max_y <= self.max_y
    }
}

/// Returns true if, and only if, the envelope of the segment `p1 p2` contains `q`.
pub(crate) fn segment_contains<T>(p1: &Coordinate<T>, p2: &Coordinate<T>, q: &Coordinate<T>) -> bool
where
    T: Float,
{
    q.x >= p1.x.min(p2.x) && q.x <= p1.x.max(p2.x) && q.y >= p1.y.min(p2.y) && q.y <= p1.y.max(p2.y)
}

/// Returns true if, and only if, the envelopes of the segments `p1 p2` and `q1 q2` intersect.
pub(crate) fn segments_intersect<T>(
    p1: &Coordinate<T>,
    p2: &Coordinate<T>,
    q1: &Coordinate<T>,
    q2: &Coordinate<T>,
) -> bool
where
    T: Float,
{
    Envelope::of_segment(p1, p2).intersects(&Envelope::of_segment(q1, q2))
}
