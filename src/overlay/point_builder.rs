use num_traits::Float;

use crate::{
    Coordinate, Geometry,
    graph::{NodeId, PlanarGraph},
    overlay::{OpCode, line_builder::is_covered},
};

/// Collects the nodes of the result that are not part of any of its lines or areas.
pub(crate) fn build_points<T>(
    graph: &PlanarGraph<T>,
    lines: &Geometry<T>,
    areas: &Geometry<T>,
    op: OpCode,
) -> Vec<Coordinate<T>>
where
    T: Float,
{
    graph
        .node_ids()
        .filter(|node| is_result_node(graph, *node, op))
        .map(|node| *graph.node(node).coordinate())
        .filter(|point| !is_covered(point, lines) && !is_covered(point, areas))
        .collect()
}

/// Returns true if, and only if, the node is in the result by itself.
///
/// Only isolated nodes qualify, except for the intersection, where any node shared by both
/// operands does.
fn is_result_node<T>(graph: &PlanarGraph<T>, node: NodeId, op: OpCode) -> bool
where
    T: Float,
{
    let current = graph.node(node);
    if current.in_result {
        return false;
    }

    let incident_in_result = current
        .star()
        .iter()
        .any(|id| graph.edge(graph.directed_edge(*id).edge()).in_result);

    if incident_in_result {
        return false;
    }

    (current.star().is_empty() || op == OpCode::Intersection)
        && op.is_result_label(current.label())
}

#[cfg(test)]
mod tests {
    use crate::{
        Geometry,
        graph::{Location, PlanarGraph},
        overlay::{OpCode, point_builder::build_points},
    };

    #[test]
    fn isolated_nodes() {
        struct Test {
            name: &'static str,
            locations: [Location; 2],
            op: OpCode,
            want: usize,
        }

        vec![
            Test {
                name: "shared point in the intersection",
                locations: [Location::Interior, Location::Interior],
                op: OpCode::Intersection,
                want: 1,
            },
            Test {
                name: "lonely point out of the intersection",
                locations: [Location::Interior, Location::Exterior],
                op: OpCode::Intersection,
                want: 0,
            },
            Test {
                name: "lonely point in the union",
                locations: [Location::Exterior, Location::Interior],
                op: OpCode::Union,
                want: 1,
            },
            Test {
                name: "shared point out of the difference",
                locations: [Location::Interior, Location::Interior],
                op: OpCode::Difference,
                want: 0,
            },
            Test {
                name: "lonely point in the symmetric difference",
                locations: [Location::Interior, Location::Exterior],
                op: OpCode::SymDifference,
                want: 1,
            },
        ]
        .into_iter()
        .for_each(|test| {
            let mut graph = PlanarGraph::<f64>::default();
            let node = graph.add_node(coord!(1., 1.));
            graph.node_mut(node).set_label(0, test.locations[0]);
            graph.node_mut(node).set_label(1, test.locations[1]);

            let empty = Geometry::MultiPolygon(Vec::new());
            let points = build_points(&graph, &empty, &empty, test.op);
            assert_eq!(points.len(), test.want, "{}", test.name);
        });
    }

    #[test]
    fn covered_nodes_are_dropped() {
        let mut graph = PlanarGraph::<f64>::default();
        let node = graph.add_node(coord!(1., 0.));
        graph.node_mut(node).set_label(0, Location::Interior);
        graph.node_mut(node).set_label(1, Location::Exterior);

        let lines = Geometry::LineString(vec![coord!(0., 0.), coord!(2., 0.)]);
        let areas = Geometry::MultiPolygon(Vec::new());

        assert!(build_points(&graph, &lines, &areas, OpCode::Union).is_empty());
    }
}
