use std::{
    cmp::Ordering,
    collections::{HashSet, VecDeque},
};

use num_traits::Float;

use crate::{
    Coordinate, Error, Result,
    graph::{DirectedEdgeId, NodeId, PlanarGraph, Position, rightmost::RightmostEdgeFinder},
};

/// A connected set of nodes and directed edges of a [`PlanarGraph`].
#[derive(Debug, Clone)]
pub struct Subgraph<T = f64> {
    nodes: Vec<NodeId>,
    directed_edges: Vec<DirectedEdgeId>,
    rightmost: RightmostEdgeFinder<T>,
}

impl<T> Subgraph<T>
where
    T: Float,
{
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn directed_edges(&self) -> &[DirectedEdgeId] {
        &self.directed_edges
    }

    /// Returns the directed edge whose right side is the outer face of the subgraph.
    pub fn rightmost_edge(&self) -> DirectedEdgeId {
        self.rightmost.edge()
    }

    pub fn rightmost_coordinate(&self) -> &Coordinate<T> {
        self.rightmost.coordinate()
    }

    /// Assigns depths to both sides of every directed edge of the subgraph, being `outside`
    /// the depth of its outer face.
    ///
    /// Depths are propagated breadth-first from the rightmost edge, node by node.
    #[tracing::instrument(level = "trace", skip_all, fields(outside = outside))]
    pub fn compute_depth(&self, graph: &mut PlanarGraph<T>, outside: i32) -> Result<()> {
        self.directed_edges
            .iter()
            .for_each(|id| graph.directed_edge_mut(*id).visited = false);

        let start = self.rightmost.edge();
        let delta = graph.edge(graph.directed_edge(start).edge()).depth_delta;
        graph
            .directed_edge_mut(start)
            .set_edge_depths(Position::Right, outside, delta)?;

        copy_sym_depths(graph, start)?;
        graph.directed_edge_mut(start).visited = true;

        let origin = graph.origin(start);
        let mut visited = HashSet::from([origin]);
        let mut queue = VecDeque::from([origin]);

        while let Some(node) = queue.pop_front() {
            compute_node_depth(graph, node)?;

            for id in graph.node(node).star.clone() {
                let sym = graph.sym(id);
                if graph.directed_edge(sym).visited {
                    continue;
                }

                let adjacent = graph.origin(sym);
                if visited.insert(adjacent) {
                    queue.push_back(adjacent);
                }
            }
        }

        Ok(())
    }
}

/// Propagates the depths around the node from any edge already having them.
fn compute_node_depth<T>(graph: &mut PlanarGraph<T>, node: NodeId) -> Result<()>
where
    T: Float,
{
    let star = graph.node(node).star.clone();
    let start = star.iter().copied().find(|id| {
        graph.directed_edge(*id).visited || graph.directed_edge(graph.sym(*id)).visited
    });

    let Some(start) = start else {
        return Err(Error::topology(
            "unable to find edge to compute depths",
            graph.node(node).coordinate(),
        ));
    };

    graph.compute_depths(start)?;

    star.into_iter().try_for_each(|id| {
        graph.directed_edge_mut(id).visited = true;
        copy_sym_depths(graph, id)
    })
}

fn copy_sym_depths<T>(graph: &mut PlanarGraph<T>, id: DirectedEdgeId) -> Result<()>
where
    T: Float,
{
    let directed = graph.directed_edge(id);
    let (left, right) = (directed.depth(Position::Left), directed.depth(Position::Right));

    let sym = graph.directed_edge_mut(graph.sym(id));
    sym.set_depth(Position::Left, right)?;
    sym.set_depth(Position::Right, left)
}

impl<T> PlanarGraph<T>
where
    T: Float,
{
    /// Splits the graph into its connected subgraphs, sorted by their rightmost coordinate
    /// from right to left.
    pub fn subgraphs(&self) -> Result<Vec<Subgraph<T>>> {
        let mut visited = HashSet::new();
        let mut subgraphs = Vec::new();

        for start in self.node_ids() {
            if self.node(start).star.is_empty() || !visited.insert(start) {
                continue;
            }

            let mut nodes = Vec::new();
            let mut directed_edges = Vec::new();
            let mut stack = vec![start];

            while let Some(node) = stack.pop() {
                nodes.push(node);
                for id in &self.node(node).star {
                    directed_edges.push(*id);

                    let adjacent = self.origin(self.sym(*id));
                    if visited.insert(adjacent) {
                        stack.push(adjacent);
                    }
                }
            }

            let rightmost = RightmostEdgeFinder::find_edge(self, &directed_edges)?;
            subgraphs.push(Subgraph {
                nodes,
                directed_edges,
                rightmost,
            });
        }

        subgraphs.sort_by(|lhs, rhs| {
            rhs.rightmost_coordinate()
                .x
                .partial_cmp(&lhs.rightmost_coordinate().x)
                .unwrap_or(Ordering::Equal)
        });

        Ok(subgraphs)
    }
}
