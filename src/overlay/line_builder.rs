use num_traits::Float;

use crate::{
    Coordinate, Geometry,
    algorithm::PointLocator,
    graph::{DirectedEdgeId, EdgeId, PlanarGraph},
    overlay::OpCode,
};

/// Returns true if, and only if, the given point is not in the exterior of the given part of
/// the result.
pub(crate) fn is_covered<T>(point: &Coordinate<T>, result: &Geometry<T>) -> bool
where
    T: Float,
{
    PointLocator::default().intersects(point, result)
}

/// Collects the line edges of the result, leaving out the ones lying inside the result area.
pub(crate) fn build_lines<T>(
    graph: &mut PlanarGraph<T>,
    areas: &Geometry<T>,
    op: OpCode,
) -> Vec<Vec<Coordinate<T>>>
where
    T: Float,
{
    find_covered_line_edges(graph, areas);

    let ids: Vec<_> = graph.directed_edge_ids().collect();
    let mut edges = Vec::new();
    for id in ids {
        if let Some(edge) = line_edge(graph, id, op).or_else(|| boundary_touch_edge(graph, id, op))
        {
            set_visited_edge(graph, id);
            edges.push(edge);
        }
    }

    edges
        .into_iter()
        .map(|id| {
            let edge = graph.edge_mut(id);
            edge.in_result = true;
            edge.points().to_vec()
        })
        .collect()
}

/// Decides whether every line edge lies inside the result area, first from the area edges
/// around its nodes and otherwise by locating it.
fn find_covered_line_edges<T>(graph: &mut PlanarGraph<T>, areas: &Geometry<T>)
where
    T: Float,
{
    let nodes: Vec<_> = graph.node_ids().collect();
    nodes
        .into_iter()
        .for_each(|node| graph.find_covered_line_edges(node));

    let ids: Vec<_> = graph.directed_edge_ids().collect();
    for id in ids {
        let directed = graph.directed_edge(id);
        let edge = directed.edge();
        if !directed.is_line_edge() || graph.edge(edge).covered.is_some() {
            continue;
        }

        let covered = is_covered(directed.coordinate(), areas);
        graph.edge_mut(edge).covered = Some(covered);
    }
}

/// Returns the edge of the given line directed edge if it belongs to the result.
fn line_edge<T>(graph: &PlanarGraph<T>, id: DirectedEdgeId, op: OpCode) -> Option<EdgeId>
where
    T: Float,
{
    let directed = graph.directed_edge(id);
    let edge = graph.edge(directed.edge());

    let selected = directed.is_line_edge()
        && !directed.visited
        && op.is_result_label(directed.label())
        && edge.covered != Some(true);

    selected.then_some(directed.edge())
}

/// Returns the edge of the given area directed edge if it lies on the boundary of both
/// operands without being part of a result ring.
///
/// These come from areas collapsing into lines, or from areas touching along an edge, and
/// only make it into the intersection.
fn boundary_touch_edge<T>(
    graph: &PlanarGraph<T>,
    id: DirectedEdgeId,
    op: OpCode,
) -> Option<EdgeId>
where
    T: Float,
{
    let directed = graph.directed_edge(id);
    let edge = graph.edge(directed.edge());

    let selected = op == OpCode::Intersection
        && !directed.is_line_edge()
        && !directed.visited
        && !directed.is_interior_area_edge()
        && !edge.in_result
        && op.is_result_label(directed.label());

    selected.then_some(directed.edge())
}

/// Marks both directions of the edge as visited.
fn set_visited_edge<T>(graph: &mut PlanarGraph<T>, id: DirectedEdgeId)
where
    T: Float,
{
    let sym = graph.sym(id);
    graph.directed_edge_mut(id).visited = true;
    graph.directed_edge_mut(sym).visited = true;
}
