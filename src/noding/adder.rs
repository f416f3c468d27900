use num_traits::Float;

use crate::{
    PrecisionModel,
    algorithm::intersector::LineIntersector,
    noding::{EdgeSets, SegmentIntersector, SegmentRef, is_trivial_intersection},
};

/// Records every non-trivial intersection in both of the intersecting edges.
#[derive(Debug, Clone)]
pub struct IntersectionAdder<T = f64> {
    intersector: LineIntersector<T>,
    tests: usize,
    intersections: usize,
    interior_intersections: usize,
    proper_intersections: usize,
}

impl<T> IntersectionAdder<T>
where
    T: Float,
{
    pub fn new(precision: PrecisionModel<T>) -> Self {
        Self {
            intersector: LineIntersector::new(precision),
            tests: 0,
            intersections: 0,
            interior_intersections: 0,
            proper_intersections: 0,
        }
    }

    /// Returns the amount of pairs of segments tested.
    pub fn tests(&self) -> usize {
        self.tests
    }

    /// Returns the amount of intersecting pairs of segments, trivial ones included.
    pub fn intersections(&self) -> usize {
        self.intersections
    }

    pub fn interior_intersections(&self) -> usize {
        self.interior_intersections
    }

    pub fn proper_intersections(&self) -> usize {
        self.proper_intersections
    }
}

impl<T> SegmentIntersector<T> for IntersectionAdder<T>
where
    T: Float,
{
    fn process_intersections(&mut self, edges: &mut EdgeSets<'_, T>, lhs: SegmentRef, rhs: SegmentRef) {
        if edges.is_same_edge(lhs, rhs) && lhs.segment == rhs.segment {
            return;
        }

        self.tests += 1;

        let [p00, p01] = edges.segment(lhs);
        let [p10, p11] = edges.segment(rhs);
        self.intersector.compute_intersection(&p00, &p01, &p10, &p11);

        if !self.intersector.has_intersection() {
            return;
        }

        self.intersections += 1;
        if self.intersector.is_interior_intersection() {
            self.interior_intersections += 1;
        }

        if is_trivial_intersection(edges, &self.intersector, lhs, rhs) {
            return;
        }

        edges
            .edge_mut(lhs)
            .add_intersections(&self.intersector, lhs.segment, 0);
        edges
            .edge_mut(rhs)
            .add_intersections(&self.intersector, rhs.segment, 1);

        if self.intersector.is_proper() {
            self.proper_intersections += 1;
        }
    }
}
