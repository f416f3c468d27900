//! The planar graph the topology of the operands is computed on.

mod depth;
mod directed_edge;
mod edge;
mod edge_end;
mod edge_list;
mod geometry_graph;
mod intersection_list;
mod label;
mod node;
mod quadrant;
mod rightmost;
mod star;
mod subgraph;

pub use self::depth::Depth;
pub use self::directed_edge::DirectedEdge;
pub use self::edge::Edge;
pub use self::edge_end::{AsEdgeEnd, EdgeEnd};
pub use self::edge_list::EdgeList;
pub use self::geometry_graph::GeometryGraph;
pub use self::intersection_list::{EdgeIntersection, IntersectionList};
pub use self::label::{Label, Location, Position, TopologyLocation};
pub use self::node::{Node, NodeMap};
pub use self::quadrant::Quadrant;
pub use self::rightmost::RightmostEdgeFinder;
pub use self::subgraph::Subgraph;

pub(crate) use self::edge_end::{insertion_index, rightmost_index};
pub(crate) use self::star::label_edge_ends;

use std::collections::HashSet;

use num_traits::Float;

use crate::{
    Coordinate, Error, Result,
    algorithm::determinant::orientation_index,
};

/// The handle of an [`Edge`] in a [`PlanarGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeId(pub(crate) usize);

/// The handle of a [`DirectedEdge`] in a [`PlanarGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DirectedEdgeId(pub(crate) usize);

/// The handle of a [`Node`] in a [`PlanarGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) usize);

/// Any component of a [`PlanarGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
    Edge(EdgeId),
    DirectedEdge(DirectedEdgeId),
    Node(NodeId),
}

/// The star of a node in a [`PlanarGraph`]: its outgoing directed edges sorted by direction.
pub type Star = Vec<DirectedEdgeId>;

/// A graph of noded edges, both directions of every edge, and the nodes they meet at.
///
/// Components are owned by the graph and referred to by handles, which stay valid for the
/// whole life of the graph.
#[derive(Debug)]
pub struct PlanarGraph<T = f64> {
    edges: Vec<Edge<T>>,
    directed_edges: Vec<DirectedEdge<T>>,
    nodes: NodeMap<T, Star>,
    removed: HashSet<Component>,
}

impl<T> Default for PlanarGraph<T> {
    fn default() -> Self {
        Self {
            edges: Vec::new(),
            directed_edges: Vec::new(),
            nodes: NodeMap::default(),
            removed: HashSet::new(),
        }
    }
}

impl<T> PlanarGraph<T>
where
    T: Float,
{
    /// Returns the node at the given coordinate, creating it if needed.
    pub fn add_node(&mut self, coordinate: Coordinate<T>) -> NodeId {
        self.nodes.add_node(coordinate)
    }

    /// Inserts the given edges, together with both of their directions, into the graph.
    pub fn add_edges(&mut self, edges: impl IntoIterator<Item = Edge<T>>) -> Result<()> {
        for edge in edges {
            let (Some(first), Some(last)) = (edge.points().first(), edge.points().last()) else {
                return Err(Error::Assertion("edge with no points found"));
            };

            let (from, to) = (self.nodes.add_node(*first), self.nodes.add_node(*last));

            let id = EdgeId(self.edges.len());
            let forward = DirectedEdgeId(self.directed_edges.len());
            let backward = DirectedEdgeId(forward.0 + 1);

            let forward_edge = DirectedEdge::new(id, &edge, true, backward, from)?;
            let backward_edge = DirectedEdge::new(id, &edge, false, forward, to)?;

            self.edges.push(edge);
            self.directed_edges.push(forward_edge);
            self.directed_edges.push(backward_edge);

            self.insert_edge_end(forward);
            self.insert_edge_end(backward);
        }

        Ok(())
    }

    /// Inserts the given directed edge into the star of the node it starts at.
    fn insert_edge_end(&mut self, id: DirectedEdgeId) {
        let directed = &self.directed_edges[id.0];
        let node = directed.origin();

        let star: Vec<_> = self
            .nodes
            .get(node)
            .star
            .iter()
            .map(|other| &self.directed_edges[other.0])
            .collect();

        let index = insertion_index(&star, directed.edge_end());
        self.nodes.get_mut(node).star.insert(index, id);
    }

    pub fn edge(&self, id: EdgeId) -> &Edge<T> {
        &self.edges[id.0]
    }

    pub fn edge_mut(&mut self, id: EdgeId) -> &mut Edge<T> {
        &mut self.edges[id.0]
    }

    pub fn directed_edge(&self, id: DirectedEdgeId) -> &DirectedEdge<T> {
        &self.directed_edges[id.0]
    }

    pub fn directed_edge_mut(&mut self, id: DirectedEdgeId) -> &mut DirectedEdge<T> {
        &mut self.directed_edges[id.0]
    }

    pub fn node(&self, id: NodeId) -> &Node<T, Star> {
        self.nodes.get(id)
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node<T, Star> {
        self.nodes.get_mut(id)
    }

    /// Returns the node the given directed edge starts at.
    pub fn origin(&self, id: DirectedEdgeId) -> NodeId {
        self.directed_edges[id.0].origin()
    }

    /// Returns the opposite direction of the given directed edge.
    pub fn sym(&self, id: DirectedEdgeId) -> DirectedEdgeId {
        self.directed_edges[id.0].sym
    }

    /// Returns the handles of all the edges in the graph.
    pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId> + '_ {
        (0..self.edges.len())
            .map(EdgeId)
            .filter(|id| !self.removed.contains(&Component::Edge(*id)))
    }

    /// Returns the handles of all the directed edges in the graph, in insertion order.
    pub fn directed_edge_ids(&self) -> impl Iterator<Item = DirectedEdgeId> + '_ {
        (0..self.directed_edges.len())
            .map(DirectedEdgeId)
            .filter(|id| !self.removed.contains(&Component::DirectedEdge(*id)))
    }

    /// Returns the handles of all the nodes in the graph, in coordinate order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .ids()
            .filter(|id| !self.removed.contains(&Component::Node(*id)))
    }

    pub fn nodes(&self) -> &NodeMap<T, Star> {
        &self.nodes
    }

    /// Returns the first edge starting with the segment `p0 p1`.
    pub fn find_edge(&self, p0: &Coordinate<T>, p1: &Coordinate<T>) -> Option<EdgeId> {
        self.edge_ids().find(|id| {
            matches!(self.edges[id.0].points(), [first, second, ..] if first == p0 && second == p1)
        })
    }

    /// Returns the first directed edge of the given edge.
    pub fn find_edge_end(&self, edge: EdgeId) -> Option<DirectedEdgeId> {
        self.directed_edge_ids()
            .find(|id| self.directed_edges[id.0].edge() == edge)
    }

    /// Returns the edge starting or ending with a segment leaving `p0` in the same direction
    /// as `p0 p1`.
    pub fn find_edge_in_same_direction(
        &self,
        p0: &Coordinate<T>,
        p1: &Coordinate<T>,
    ) -> Option<EdgeId> {
        let same_direction = |ep0: &Coordinate<T>, ep1: &Coordinate<T>| {
            p0 == ep0
                && orientation_index(p0, p1, ep1).is_collinear()
                && Quadrant::between(p0, p1).ok() == Quadrant::between(ep0, ep1).ok()
        };

        self.edge_ids().find(|id| match self.edges[id.0].points() {
            [first, second, ..] if same_direction(first, second) => true,
            [.., second_last, last] => same_direction(last, second_last),
            _ => false,
        })
    }

    /// Returns true if, and only if, there is a node at the given coordinate on the boundary
    /// of the given operand.
    pub fn is_boundary_node(&self, index: usize, coordinate: &Coordinate<T>) -> bool {
        self.nodes
            .find(coordinate)
            .is_some_and(|id| self.nodes.get(id).label.location(index) == Location::Boundary)
    }

    /// Returns true if, and only if, the given component belongs to the graph.
    pub fn contains(&self, component: Component) -> bool {
        let exists = match component {
            Component::Edge(id) => id.0 < self.edges.len(),
            Component::DirectedEdge(id) => id.0 < self.directed_edges.len(),
            Component::Node(id) => id.0 < self.nodes.len(),
        };

        exists && !self.removed.contains(&component)
    }

    /// Removes the given component from the graph.
    ///
    /// Directed edges are removed in pairs, so the opposite of a directed edge in the graph is
    /// always in the graph too. Removing an edge removes both of its directions, and removing a
    /// node removes every directed edge incident to it.
    pub fn remove(&mut self, component: Component) {
        if !self.contains(component) {
            return;
        }

        match component {
            Component::Edge(id) => {
                self.removed.insert(component);
                if let Some(directed) = self.find_edge_end(id) {
                    self.remove(Component::DirectedEdge(directed));
                }
            }
            Component::DirectedEdge(id) => {
                let sym = self.sym(id);
                for directed in [id, sym] {
                    self.removed.insert(Component::DirectedEdge(directed));
                    let node = self.origin(directed);
                    self.nodes.get_mut(node).star.retain(|other| *other != directed);
                }
            }
            Component::Node(id) => {
                let star = self.nodes.get(id).star.clone();
                star.into_iter()
                    .for_each(|directed| self.remove(Component::DirectedEdge(directed)));
                self.removed.insert(component);
            }
        }
    }

    /// Links every incoming result edge of every node with an outgoing one.
    pub fn link_result_directed_edges(&mut self) -> Result<()> {
        let nodes: Vec<_> = self.node_ids().collect();
        nodes
            .into_iter()
            .try_for_each(|node| self.link_result_directed_edges_at(node))
    }

    /// Links every incoming edge of every node with the next outgoing one.
    pub fn link_all_directed_edges(&mut self) {
        let nodes: Vec<_> = self.node_ids().collect();
        nodes
            .into_iter()
            .for_each(|node| self.link_all_directed_edges_at(node));
    }
}
