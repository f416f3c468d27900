use num_traits::Float;

use crate::{
    Result,
    graph::{Edge, EdgeEnd, EdgeId, EdgeIntersection},
};

/// Returns the ends of the given edge at every one of its intersections, pointing both
/// backwards and forwards along the edge.
pub fn edge_ends<T>(id: EdgeId, edge: &Edge<T>) -> Result<Vec<EdgeEnd<T>>>
where
    T: Float,
{
    let intersections: Vec<_> = edge.intersections().iter().collect();

    let mut ends = Vec::new();
    for (index, current) in intersections.iter().enumerate() {
        let prev = index.checked_sub(1).map(|prev| intersections[prev]);
        let next = intersections.get(index + 1).copied();

        if let Some(end) = end_towards_prev(id, edge, current, prev)? {
            ends.push(end);
        }

        if let Some(end) = end_towards_next(id, edge, current, next)? {
            ends.push(end);
        }
    }

    Ok(ends)
}

/// Returns the end at `current` pointing to the previous vertex or intersection, unless
/// `current` is the start of the edge.
fn end_towards_prev<T>(
    id: EdgeId,
    edge: &Edge<T>,
    current: &EdgeIntersection<T>,
    prev: Option<&EdgeIntersection<T>>,
) -> Result<Option<EdgeEnd<T>>>
where
    T: Float,
{
    let mut segment = current.segment_index;
    if current.distance.is_zero() {
        let Some(previous_segment) = segment.checked_sub(1) else {
            return Ok(None);
        };

        segment = previous_segment;
    }

    let to = match prev {
        Some(prev) if prev.segment_index >= segment => prev.coordinate,
        _ => edge.points()[segment],
    };

    EdgeEnd::new(id, current.coordinate, to, edge.label().flipped()).map(Some)
}

/// Returns the end at `current` pointing to the next vertex or intersection, unless `current`
/// is the end of the edge.
fn end_towards_next<T>(
    id: EdgeId,
    edge: &Edge<T>,
    current: &EdgeIntersection<T>,
    next: Option<&EdgeIntersection<T>>,
) -> Result<Option<EdgeEnd<T>>>
where
    T: Float,
{
    let to = match next {
        Some(next) if next.segment_index == current.segment_index => next.coordinate,
        _ => match edge.points().get(current.segment_index + 1) {
            Some(point) => *point,
            None => return Ok(None),
        },
    };

    EdgeEnd::new(id, current.coordinate, to, *edge.label()).map(Some)
}
