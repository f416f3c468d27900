use std::cmp::Ordering;

use num_traits::Float;

use crate::{Coordinate, graph::Edge};

/// A point where an edge is intersected, located by the segment it lies on and its distance
/// from the start of that segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeIntersection<T> {
    pub coordinate: Coordinate<T>,
    pub segment_index: usize,
    pub distance: T,
}

impl<T> EdgeIntersection<T>
where
    T: Float,
{
    /// Compares the position of self and rhs along the edge.
    fn compare(&self, segment_index: usize, distance: T) -> Ordering {
        self.segment_index.cmp(&segment_index).then_with(|| {
            self.distance
                .partial_cmp(&distance)
                .unwrap_or(Ordering::Equal)
        })
    }
}

/// The intersections of an edge, sorted by their position along it.
///
/// Both endpoints of the edge are always in the list.
#[derive(Debug, Clone)]
pub struct IntersectionList<T> {
    intersections: Vec<EdgeIntersection<T>>,
}

impl<T> IntersectionList<T>
where
    T: Float,
{
    /// Returns the list of intersections of the edge with the given points, that is, its two
    /// endpoints.
    pub(crate) fn new(points: &[Coordinate<T>]) -> Self {
        let mut list = Self {
            intersections: Vec::new(),
        };

        if let (Some(first), Some(last)) = (points.first(), points.last()) {
            list.add(*first, 0, T::zero());
            list.add(*last, points.len() - 1, T::zero());
        }

        list
    }

    /// Inserts the given intersection, unless one at the same position already exists.
    ///
    /// Returns the index of the intersection in the list.
    pub fn add(&mut self, coordinate: Coordinate<T>, segment_index: usize, distance: T) -> usize {
        match self
            .intersections
            .binary_search_by(|other| other.compare(segment_index, distance))
        {
            Ok(index) => index,
            Err(index) => {
                self.intersections.insert(
                    index,
                    EdgeIntersection {
                        coordinate,
                        segment_index,
                        distance,
                    },
                );

                index
            }
        }
    }

    pub fn len(&self) -> usize {
        self.intersections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intersections.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EdgeIntersection<T>> {
        self.intersections.iter()
    }

    /// Returns true if, and only if, the given point is any of the intersections.
    pub fn contains(&self, point: &Coordinate<T>) -> bool {
        self.intersections
            .iter()
            .any(|intersection| &intersection.coordinate == point)
    }

    /// Splits the given edge, which must be the owner of this list, at every intersection.
    ///
    /// Every resulting edge inherits the label and the isolation of the original one.
    pub(crate) fn split_edges(&self, edge: &Edge<T>) -> Vec<Edge<T>> {
        self.intersections
            .windows(2)
            .map(|pair| self.split_edge(edge, &pair[0], &pair[1]))
            .collect()
    }

    fn split_edge(
        &self,
        edge: &Edge<T>,
        from: &EdgeIntersection<T>,
        to: &EdgeIntersection<T>,
    ) -> Edge<T> {
        let points = edge.points();

        // the last point is only needed if it is not a vertex already
        let last_vertex = &points[to.segment_index];
        let use_to = to.distance > T::zero() || to.coordinate != *last_vertex;

        let mut split = Vec::with_capacity(to.segment_index - from.segment_index + 2);
        split.push(from.coordinate);
        split.extend_from_slice(&points[from.segment_index + 1..=to.segment_index]);
        if use_to {
            split.push(to.coordinate);
        }

        let mut split = Edge::new(split, edge.label);
        split.isolated = edge.isolated;
        split
    }
}
