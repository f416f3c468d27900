use num_traits::Float;

use crate::{
    Coordinate, PrecisionModel,
    algorithm::intersector::LineIntersector,
    noding::{EdgeSets, SegmentIntersector, SegmentRef},
};

/// Finds the first intersection lying in the interior of some of the intersecting segments.
#[derive(Debug, Clone)]
pub struct InteriorIntersectionFinder<T = f64> {
    intersector: LineIntersector<T>,
    interior_intersection: Option<Coordinate<T>>,
    intersection_segments: Option<[Coordinate<T>; 4]>,
}

impl<T> Default for InteriorIntersectionFinder<T>
where
    T: Float,
{
    fn default() -> Self {
        Self::new(PrecisionModel::Floating)
    }
}

impl<T> InteriorIntersectionFinder<T>
where
    T: Float,
{
    pub fn new(precision: PrecisionModel<T>) -> Self {
        Self {
            intersector: LineIntersector::new(precision),
            interior_intersection: None,
            intersection_segments: None,
        }
    }

    /// Returns the interior intersection found, if any.
    pub fn interior_intersection(&self) -> Option<Coordinate<T>> {
        self.interior_intersection
    }

    /// Returns the endpoints of the two segments meeting at the interior intersection.
    pub fn intersection_segments(&self) -> Option<[Coordinate<T>; 4]> {
        self.intersection_segments
    }
}

impl<T> SegmentIntersector<T> for InteriorIntersectionFinder<T>
where
    T: Float,
{
    fn process_intersections(&mut self, edges: &mut EdgeSets<'_, T>, lhs: SegmentRef, rhs: SegmentRef) {
        if self.is_done() {
            return;
        }

        if edges.is_same_edge(lhs, rhs) && lhs.segment == rhs.segment {
            return;
        }

        let [p00, p01] = edges.segment(lhs);
        let [p10, p11] = edges.segment(rhs);
        self.intersector.compute_intersection(&p00, &p01, &p10, &p11);

        if !self.intersector.has_intersection() || !self.intersector.is_interior_intersection() {
            return;
        }

        self.interior_intersection = Some(self.intersector.intersection_point(0));
        self.intersection_segments = Some([p00, p01, p10, p11]);
    }

    fn is_done(&self) -> bool {
        self.interior_intersection.is_some()
    }
}
