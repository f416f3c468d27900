use num_traits::Float;

use crate::{
    Coordinate, Error, Result,
    algorithm::determinant::{Orientation, orientation_index},
    graph::{DirectedEdgeId, PlanarGraph, Position},
};

/// Finds the directed edge of a connected set whose right side is known to be the outermost
/// face of the set.
#[derive(Debug, Clone, Copy)]
pub struct RightmostEdgeFinder<T = f64> {
    edge: DirectedEdgeId,
    coordinate: Coordinate<T>,
}

impl<T> RightmostEdgeFinder<T>
where
    T: Float,
{
    /// Finds the edge of the given set of directed edges passing through the rightmost
    /// coordinate, oriented so its right side faces outwards.
    ///
    /// Only forward edges are scanned, and the first coordinate found wins ties. When every
    /// segment touching the rightmost coordinate is horizontal, which happens at the tip of a
    /// horizontal spike, the side is taken from the closest non-horizontal segment of the same
    /// edge, looking backwards first.
    pub fn find_edge(graph: &PlanarGraph<T>, directed_edges: &[DirectedEdgeId]) -> Result<Self> {
        let mut rightmost: Option<(DirectedEdgeId, usize, Coordinate<T>)> = None;
        for id in directed_edges {
            if !graph.directed_edge(*id).is_forward() {
                continue;
            }

            let points = graph.edge(graph.directed_edge(*id).edge()).points();
            for (index, point) in points.iter().enumerate().take(points.len().saturating_sub(1)) {
                if rightmost.is_none_or(|(_, _, max)| point.x > max.x) {
                    rightmost = Some((*id, index, *point));
                }
            }
        }

        let Some((mut edge, mut index, coordinate)) = rightmost else {
            return Err(Error::Assertion("no forward directed edge to find the rightmost of"));
        };

        if index == 0 {
            // the rightmost coordinate is a node, so the star knows better
            edge = graph.rightmost_edge(graph.origin(edge))?;
            if !graph.directed_edge(edge).is_forward() {
                edge = graph.sym(edge);
                index = graph.edge(graph.directed_edge(edge).edge()).points().len() - 1;
            }
        } else {
            let points = graph.edge(graph.directed_edge(edge).edge()).points();
            let (prev, next) = (&points[index - 1], &points[index + 1]);

            let orientation = orientation_index(&coordinate, next, prev);
            let use_prev = (prev.y < coordinate.y
                && next.y < coordinate.y
                && orientation == Orientation::CounterClockwise)
                || (prev.y > coordinate.y
                    && next.y > coordinate.y
                    && orientation == Orientation::Clockwise);

            if use_prev {
                index -= 1;
            }
        }

        let points = graph.edge(graph.directed_edge(edge).edge()).points();
        if rightmost_side(points, index)? == Position::Left {
            edge = graph.sym(edge);
        }

        Ok(Self { edge, coordinate })
    }

    /// Returns the rightmost directed edge, whose right side faces outwards.
    pub fn edge(&self) -> DirectedEdgeId {
        self.edge
    }

    pub fn coordinate(&self) -> &Coordinate<T> {
        &self.coordinate
    }
}

/// Returns the side of the segment at `index` facing towards the positive x axis.
fn side_of_segment<T>(points: &[Coordinate<T>], index: usize) -> Option<Position>
where
    T: Float,
{
    let (from, to) = (points.get(index)?, points.get(index + 1)?);
    if from.y == to.y {
        return None;
    }

    if from.y < to.y {
        Some(Position::Right)
    } else {
        Some(Position::Left)
    }
}

fn rightmost_side<T>(points: &[Coordinate<T>], index: usize) -> Result<Position>
where
    T: Float,
{
    std::iter::once(index)
        .chain((0..index).rev())
        .chain(index + 1..points.len().saturating_sub(1))
        .find_map(|segment| side_of_segment(points, segment))
        .ok_or(Error::Assertion("no side of a fully horizontal edge faces outwards"))
}
