use num_traits::Float;

use crate::{
    Coordinate, Envelope,
    algorithm::intersector::LineIntersector,
    geometry::is_closed,
    graph::{Depth, IntersectionList, Label, Location, Position},
    relate::IntersectionMatrix,
};

/// Returns the depth delta implied by the side locations of the given label.
///
/// Every operand having its interior at the left side and its exterior at the right one
/// counts +1, and the other way around counts -1.
pub(crate) fn depth_delta(label: &Label) -> i32 {
    (0..2)
        .map(|index| {
            match (
                label.location_at(index, Position::Left),
                label.location_at(index, Position::Right),
            ) {
                (Location::Interior, Location::Exterior) => 1,
                (Location::Exterior, Location::Interior) => -1,
                _ => 0,
            }
        })
        .sum()
}

/// A chain of coordinates between two nodes of a graph.
#[derive(Debug, Clone)]
pub struct Edge<T = f64> {
    points: Vec<Coordinate<T>>,
    envelope: Envelope<T>,
    pub(crate) label: Label,
    pub(crate) intersections: IntersectionList<T>,
    pub(crate) depth: Depth,
    pub(crate) depth_delta: i32,
    /// True if the edge does not intersect the other operand at all.
    pub(crate) isolated: bool,
    /// Whether the edge lies inside the result area, once known.
    pub(crate) covered: Option<bool>,
    pub(crate) in_result: bool,
}

impl<T> Edge<T>
where
    T: Float,
{
    /// Returns an edge through the given points.
    pub fn new(points: Vec<Coordinate<T>>, label: Label) -> Self {
        Self {
            envelope: points.iter().collect(),
            intersections: IntersectionList::new(&points),
            points,
            label,
            depth: Depth::default(),
            depth_delta: depth_delta(&label),
            isolated: true,
            covered: None,
            in_result: false,
        }
    }

    pub fn points(&self) -> &[Coordinate<T>] {
        &self.points
    }

    pub fn label(&self) -> &Label {
        &self.label
    }

    pub fn envelope(&self) -> &Envelope<T> {
        &self.envelope
    }

    pub fn depth(&self) -> &Depth {
        &self.depth
    }

    pub fn depth_delta(&self) -> i32 {
        self.depth_delta
    }

    pub fn intersections(&self) -> &IntersectionList<T> {
        &self.intersections
    }

    pub fn is_isolated(&self) -> bool {
        self.isolated
    }

    pub fn is_in_result(&self) -> bool {
        self.in_result
    }

    pub fn is_closed(&self) -> bool {
        is_closed(&self.points)
    }

    /// Returns true if, and only if, the edge is an area edge folding back onto itself, which
    /// has no width at all.
    pub fn is_collapsed(&self) -> bool {
        self.label.is_area() && self.points.len() == 3 && self.points[0] == self.points[2]
    }

    /// Returns the line edge a collapsed edge stands for.
    pub fn collapsed_edge(&self) -> Self {
        let mut edge = Self::new(self.points[..2].to_vec(), self.label.to_line_label());
        edge.isolated = self.isolated;
        edge
    }

    /// Returns true if, and only if, self and rhs have exactly the same points in the same
    /// order.
    pub fn is_pointwise_equal(&self, rhs: &Self) -> bool {
        self.points == rhs.points
    }

    /// Records every intersection found by the given intersector as lying on the segment at
    /// `segment_index`, which was the input at `input` of the intersector.
    pub fn add_intersections(
        &mut self,
        intersector: &LineIntersector<T>,
        segment_index: usize,
        input: usize,
    ) {
        for index in 0..intersector.intersection_num() {
            self.add_intersection(intersector, segment_index, input, index);
        }
    }

    /// Records the intersection at the given index of the intersector.
    ///
    /// An intersection lying on the end of its segment is recorded as the start of the next
    /// one, so every vertex has a single representation.
    pub fn add_intersection(
        &mut self,
        intersector: &LineIntersector<T>,
        segment_index: usize,
        input: usize,
        index: usize,
    ) {
        let point = intersector.intersection_point(index);
        let next = segment_index + 1;

        let (segment_index, distance) = match self.points.get(next) {
            Some(vertex) if vertex == &point => (next, T::zero()),
            _ => (segment_index, intersector.edge_distance(input, index)),
        };

        self.intersections.add(point, segment_index, distance);
    }

    /// Returns the pieces this edge splits into at its intersections.
    pub fn split_edges(&self) -> Vec<Self> {
        self.intersections.split_edges(self)
    }

    /// Folds the label of the edge into the given matrix.
    pub fn update_im(&self, matrix: &mut IntersectionMatrix) {
        matrix.update_with_label(&self.label);
    }
}
