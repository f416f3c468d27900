use num_traits::Float;
use tracing::trace;

use crate::{
    Coordinate, PrecisionModel,
    algorithm::{
        determinant::{Orientation, orientation_index},
        hcoordinate,
    },
    envelope::{segment_contains, segments_intersect},
};

/// The kind of intersection found between two segments.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum IntersectionKind {
    /// The segments do not intersect.
    #[default]
    None,
    /// The segments intersect at a single point.
    Point,
    /// The segments overlap along a collinear stretch.
    Collinear,
}

/// A robust segment intersector.
///
/// The intersector keeps the state of the last computation so it can be queried afterwards.
#[derive(Debug, Clone)]
pub struct LineIntersector<T = f64> {
    precision: PrecisionModel<T>,
    input: [[Coordinate<T>; 2]; 2],
    points: [Coordinate<T>; 2],
    kind: IntersectionKind,
    proper: bool,
}

impl<T> Default for LineIntersector<T>
where
    T: Float,
{
    fn default() -> Self {
        Self::new(PrecisionModel::Floating)
    }
}

impl<T> LineIntersector<T>
where
    T: Float,
{
    /// Returns an intersector rounding every computed point to the given model.
    pub fn new(precision: PrecisionModel<T>) -> Self {
        let origin = Coordinate {
            x: T::zero(),
            y: T::zero(),
        };

        Self {
            precision,
            input: [[origin; 2]; 2],
            points: [origin; 2],
            kind: IntersectionKind::None,
            proper: false,
        }
    }

    /// Computes whether the point `p` lies on the segment `p1 p2`.
    pub fn compute_point_intersection(
        &mut self,
        p: &Coordinate<T>,
        p1: &Coordinate<T>,
        p2: &Coordinate<T>,
    ) {
        self.proper = false;
        self.kind = IntersectionKind::None;

        if segment_contains(p1, p2, p)
            && orientation_index(p1, p2, p).is_collinear()
            && orientation_index(p2, p1, p).is_collinear()
        {
            self.proper = p != p1 && p != p2;
            self.points[0] = *p;
            self.kind = IntersectionKind::Point;
        }
    }

    /// Computes the intersection between the segments `p1 p2` and `q1 q2`.
    pub fn compute_intersection(
        &mut self,
        p1: &Coordinate<T>,
        p2: &Coordinate<T>,
        q1: &Coordinate<T>,
        q2: &Coordinate<T>,
    ) {
        self.input = [[*p1, *p2], [*q1, *q2]];
        self.kind = self.compute_intersect(p1, p2, q1, q2);
    }

    fn compute_intersect(
        &mut self,
        p1: &Coordinate<T>,
        p2: &Coordinate<T>,
        q1: &Coordinate<T>,
        q2: &Coordinate<T>,
    ) -> IntersectionKind {
        self.proper = false;

        if !segments_intersect(p1, p2, q1, q2) {
            return IntersectionKind::None;
        }

        // both endpoints of q on the same side of p means no intersection
        let pq1 = orientation_index(p1, p2, q1);
        let pq2 = orientation_index(p1, p2, q2);
        if pq1.is_same_side(&pq2) {
            return IntersectionKind::None;
        }

        let qp1 = orientation_index(q1, q2, p1);
        let qp2 = orientation_index(q1, q2, p2);
        if qp1.is_same_side(&qp2) {
            return IntersectionKind::None;
        }

        if pq1.is_collinear() && pq2.is_collinear() && qp1.is_collinear() && qp2.is_collinear() {
            return self.compute_collinear_intersection(p1, p2, q1, q2);
        }

        if pq1.is_collinear() || pq2.is_collinear() || qp1.is_collinear() || qp2.is_collinear() {
            // an endpoint of one segment lies on the other one
            self.points[0] = if p1 == q1 || p1 == q2 {
                *p1
            } else if p2 == q1 || p2 == q2 {
                *p2
            } else if pq1.is_collinear() {
                *q1
            } else if pq2.is_collinear() {
                *q2
            } else if qp1.is_collinear() {
                *p1
            } else {
                *p2
            };
        } else {
            self.proper = true;
            self.points[0] = self.intersection(p1, p2, q1, q2);
        }

        IntersectionKind::Point
    }

    fn compute_collinear_intersection(
        &mut self,
        p1: &Coordinate<T>,
        p2: &Coordinate<T>,
        q1: &Coordinate<T>,
        q2: &Coordinate<T>,
    ) -> IntersectionKind {
        let p1q1p2 = segment_contains(p1, p2, q1);
        let p1q2p2 = segment_contains(p1, p2, q2);
        let q1p1q2 = segment_contains(q1, q2, p1);
        let q1p2q2 = segment_contains(q1, q2, p2);

        let (first, second, single) = if p1q1p2 && p1q2p2 {
            (q1, q2, false)
        } else if q1p1q2 && q1p2q2 {
            (p1, p2, false)
        } else if p1q1p2 && q1p1q2 {
            (q1, p1, q1 == p1 && !p1q2p2 && !q1p2q2)
        } else if p1q1p2 && q1p2q2 {
            (q1, p2, q1 == p2 && !p1q2p2 && !q1p1q2)
        } else if p1q2p2 && q1p1q2 {
            (q2, p1, q2 == p1 && !p1q1p2 && !q1p2q2)
        } else if p1q2p2 && q1p2q2 {
            (q2, p2, q2 == p2 && !p1q1p2 && !q1p1q2)
        } else {
            return IntersectionKind::None;
        };

        self.points = [*first, *second];
        if single {
            IntersectionKind::Point
        } else {
            IntersectionKind::Collinear
        }
    }

    /// Returns the intersection point of two properly crossing segments.
    fn intersection(
        &self,
        p1: &Coordinate<T>,
        p2: &Coordinate<T>,
        q1: &Coordinate<T>,
        q2: &Coordinate<T>,
    ) -> Coordinate<T> {
        let mut point = intersection_with_normalization(p1, p2, q1, q2)
            .inspect_err(|error| trace!(%error, "falling back to the central endpoint"))
            .unwrap_or_else(|_| central_endpoint(p1, p2, q1, q2));

        if !self.is_in_segment_envelopes(&point) {
            point = central_endpoint(p1, p2, q1, q2);
        }

        self.precision.make_precise(point)
    }

    fn is_in_segment_envelopes(&self, point: &Coordinate<T>) -> bool {
        let [[p1, p2], [q1, q2]] = &self.input;
        segment_contains(p1, p2, point) && segment_contains(q1, q2, point)
    }
}

impl<T> LineIntersector<T>
where
    T: Float,
{
    /// Returns the kind of the last computed intersection.
    pub fn kind(&self) -> IntersectionKind {
        self.kind
    }

    /// Returns true if, and only if, the last computation found any intersection.
    pub fn has_intersection(&self) -> bool {
        !matches!(self.kind, IntersectionKind::None)
    }

    /// Returns the amount of intersection points found by the last computation.
    pub fn intersection_num(&self) -> usize {
        match self.kind {
            IntersectionKind::None => 0,
            IntersectionKind::Point => 1,
            IntersectionKind::Collinear => 2,
        }
    }

    /// Returns the intersection point at the given index.
    pub fn intersection_point(&self, index: usize) -> Coordinate<T> {
        self.points[index]
    }

    /// Returns true if, and only if, the segments overlap along a collinear stretch.
    pub fn is_collinear(&self) -> bool {
        matches!(self.kind, IntersectionKind::Collinear)
    }

    /// Returns true if, and only if, the intersection is a single point interior to both
    /// segments.
    pub fn is_proper(&self) -> bool {
        self.has_intersection() && self.proper
    }

    /// Returns true if, and only if, the given point is one of the intersection points.
    pub fn is_intersection(&self, point: &Coordinate<T>) -> bool {
        self.points[..self.intersection_num()].contains(point)
    }

    /// Returns true if, and only if, some intersection point is not an endpoint of one of the
    /// segments.
    pub fn is_interior_intersection(&self) -> bool {
        self.is_interior_intersection_of(0) || self.is_interior_intersection_of(1)
    }

    /// Returns true if, and only if, some intersection point is not an endpoint of the segment
    /// at the given input index.
    pub fn is_interior_intersection_of(&self, input: usize) -> bool {
        let [from, to] = &self.input[input];
        self.points[..self.intersection_num()]
            .iter()
            .any(|point| point != from && point != to)
    }

    /// Returns the distance of the intersection point at the given index from the start of the
    /// segment at the given input index.
    pub fn edge_distance(&self, input: usize, index: usize) -> T {
        let [from, to] = &self.input[input];
        edge_distance(&self.points[index], from, to)
    }
}

/// Returns a distance-like measure of `point` along the segment `p0 p1`.
///
/// The measure is exact and increasing along the segment, which is all the ordering of
/// intersections needs. It is the offset along the ordinate in which the segment is longer.
pub(crate) fn edge_distance<T>(point: &Coordinate<T>, p0: &Coordinate<T>, p1: &Coordinate<T>) -> T
where
    T: Float,
{
    let dx = (p1.x - p0.x).abs();
    let dy = (p1.y - p0.y).abs();

    if point == p0 {
        return T::zero();
    }

    if point == p1 {
        return dx.max(dy);
    }

    let pdx = (point.x - p0.x).abs();
    let pdy = (point.y - p0.y).abs();
    let distance = if dx > dy { pdx } else { pdy };

    // a point distinct from p0 must not have distance zero
    if distance.is_zero() {
        return pdx.max(pdy);
    }

    distance
}

/// Intersects the given lines after translating them to the centre of the overlap of their
/// envelopes, which keeps the homogeneous products well conditioned.
fn intersection_with_normalization<T>(
    p1: &Coordinate<T>,
    p2: &Coordinate<T>,
    q1: &Coordinate<T>,
    q2: &Coordinate<T>,
) -> crate::Result<Coordinate<T>>
where
    T: Float,
{
    let two = T::one() + T::one();

    let min_x = p1.x.min(p2.x).max(q1.x.min(q2.x));
    let max_x = p1.x.max(p2.x).min(q1.x.max(q2.x));
    let min_y = p1.y.min(p2.y).max(q1.y.min(q2.y));
    let max_y = p1.y.max(p2.y).min(q1.y.max(q2.y));

    let centre = Coordinate {
        x: (min_x + max_x) / two,
        y: (min_y + max_y) / two,
    };

    let translate = |point: &Coordinate<T>| Coordinate {
        x: point.x - centre.x,
        y: point.y - centre.y,
    };

    let point = hcoordinate::intersection(
        &translate(p1),
        &translate(p2),
        &translate(q1),
        &translate(q2),
    )?;

    Ok(Coordinate {
        x: point.x + centre.x,
        y: point.y + centre.y,
    })
}

/// Returns the endpoint closest to the centroid of the four given points.
fn central_endpoint<T>(
    p1: &Coordinate<T>,
    p2: &Coordinate<T>,
    q1: &Coordinate<T>,
    q2: &Coordinate<T>,
) -> Coordinate<T>
where
    T: Float,
{
    let two = T::one() + T::one();
    let four = two + two;
    let centroid = Coordinate {
        x: (p1.x + p2.x + q1.x + q2.x) / four,
        y: (p1.y + p2.y + q1.y + q2.y) / four,
    };

    [p1, p2, q1, q2]
        .into_iter()
        .fold((*p1, T::infinity()), |(closest, min), point| {
            let distance = point.distance(&centroid);
            if distance < min {
                (*point, distance)
            } else {
                (closest, min)
            }
        })
        .0
}

/// Returns true if, and only if, the point lies on the given polyline.
pub fn is_on_line<T>(point: &Coordinate<T>, line: &[Coordinate<T>]) -> bool
where
    T: Float,
{
    let mut intersector = LineIntersector::default();
    line.windows(2).any(|segment| {
        intersector.compute_point_intersection(point, &segment[0], &segment[1]);
        intersector.has_intersection()
    })
}

/// Returns true if, and only if, the orientation of the three points is collinear.
pub(crate) fn is_collinear<T>(p: &Coordinate<T>, q: &Coordinate<T>, r: &Coordinate<T>) -> bool
where
    T: Float,
{
    matches!(orientation_index(p, q, r), Orientation::Collinear)
}
