use std::collections::BTreeMap;

use num_traits::Float;

use crate::{
    Coordinate,
    coordinate::Ordered,
    graph::{Label, Location, NodeId},
};

/// A point of a graph where edges meet, or an isolated point of an operand.
///
/// The star `S` holds whatever the owning graph keeps about the incident edges.
#[derive(Debug, Clone)]
pub struct Node<T = f64, S = ()> {
    coordinate: Coordinate<T>,
    pub(crate) label: Label,
    pub(crate) star: S,
    pub(crate) in_result: bool,
}

impl<T, S> Node<T, S>
where
    T: Float,
    S: Default,
{
    fn new(coordinate: Coordinate<T>) -> Self {
        Self {
            coordinate,
            label: Label::line(Location::None),
            star: S::default(),
            in_result: false,
        }
    }
}

impl<T, S> Node<T, S>
where
    T: Float,
{
    pub fn coordinate(&self) -> &Coordinate<T> {
        &self.coordinate
    }

    pub fn label(&self) -> &Label {
        &self.label
    }

    pub fn star(&self) -> &S {
        &self.star
    }

    /// Returns true if, and only if, the node is only known by one of the operands.
    pub fn is_isolated(&self) -> bool {
        self.label.geometry_count() == 1
    }

    pub fn set_label(&mut self, index: usize, location: Location) {
        self.label.set_location(index, location);
    }

    /// Toggles the boundary location of the node relative to the given operand.
    ///
    /// A node found twice on the boundary of an operand is an interior node of it.
    pub fn set_label_boundary(&mut self, index: usize) {
        let location = match self.label.location(index) {
            Location::Boundary => Location::Interior,
            Location::Interior => Location::Boundary,
            _ => Location::Boundary,
        };

        self.label.set_location(index, location);
    }

    /// Fills the unknown locations of the node with the ones of the given label.
    ///
    /// The boundary location takes precedence over any other.
    pub fn merge_label(&mut self, label: &Label) {
        for index in 0..2 {
            let location = merged_location(&self.label, label, index);
            if !self.label.location(index).is_known() {
                self.label.set_location(index, location);
            }
        }
    }
}

fn merged_location(label: &Label, other: &Label, index: usize) -> Location {
    let location = label.location(index);
    if other.is_null(index) || location == Location::Boundary {
        location
    } else {
        other.location(index)
    }
}

/// The nodes of a graph, indexed by coordinate.
#[derive(Debug, Clone)]
pub struct NodeMap<T = f64, S = ()> {
    nodes: Vec<Node<T, S>>,
    index: BTreeMap<Ordered<T>, NodeId>,
}

impl<T, S> Default for NodeMap<T, S> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            index: BTreeMap::new(),
        }
    }
}

impl<T, S> NodeMap<T, S>
where
    T: Float,
    S: Default,
{
    /// Returns the node at the given coordinate, creating it if needed.
    pub fn add_node(&mut self, coordinate: Coordinate<T>) -> NodeId {
        let nodes = &mut self.nodes;
        *self.index.entry(Ordered(coordinate)).or_insert_with(|| {
            nodes.push(Node::new(coordinate));
            NodeId(nodes.len() - 1)
        })
    }
}

impl<T, S> NodeMap<T, S>
where
    T: Float,
{
    pub fn find(&self, coordinate: &Coordinate<T>) -> Option<NodeId> {
        self.index.get(&Ordered(*coordinate)).copied()
    }

    pub fn get(&self, id: NodeId) -> &Node<T, S> {
        &self.nodes[id.0]
    }

    pub fn get_mut(&mut self, id: NodeId) -> &mut Node<T, S> {
        &mut self.nodes[id.0]
    }

    /// Returns the ids of all nodes in coordinate order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.index.values().copied()
    }

    /// Returns all nodes in coordinate order.
    pub fn iter(&self) -> impl Iterator<Item = &Node<T, S>> {
        self.ids().map(|id| &self.nodes[id.0])
    }

    /// Returns the nodes located at the boundary of the given operand.
    pub fn boundary_nodes(&self, index: usize) -> impl Iterator<Item = &Node<T, S>> {
        self.iter()
            .filter(move |node| node.label.location(index) == Location::Boundary)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
