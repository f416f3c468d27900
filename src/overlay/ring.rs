use num_traits::Float;

use crate::{
    Coordinate, Envelope, Error, Result,
    algorithm::{is_ccw, ray_crossing::is_point_in_ring},
    graph::{DirectedEdge, DirectedEdgeId, PlanarGraph},
};

/// The way the directed edges of a ring are linked together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RingKind {
    /// Follows the `next` link: the ring may touch itself at nodes.
    Maximal,
    /// Follows the `next_min` link: the ring turns as much as possible at every node.
    Minimal,
}

impl RingKind {
    fn next<T>(self, directed: &DirectedEdge<T>) -> Option<DirectedEdgeId> {
        match self {
            Self::Maximal => directed.next,
            Self::Minimal => directed.next_min,
        }
    }

    fn ring_of<T>(self, directed: &DirectedEdge<T>) -> Option<usize> {
        match self {
            Self::Maximal => directed.edge_ring,
            Self::Minimal => directed.min_edge_ring,
        }
    }

    fn set_ring<T>(self, directed: &mut DirectedEdge<T>, ring: usize) {
        match self {
            Self::Maximal => directed.edge_ring = Some(ring),
            Self::Minimal => directed.min_edge_ring = Some(ring),
        }
    }
}

/// A closed chain of result directed edges.
#[derive(Debug, Clone)]
pub(crate) struct EdgeRing<T> {
    id: usize,
    edges: Vec<DirectedEdgeId>,
    points: Vec<Coordinate<T>>,
    envelope: Envelope<T>,
    is_hole: bool,
    /// The position of the shell this ring is a hole of, once known.
    pub(crate) shell: Option<usize>,
}

impl<T> EdgeRing<T>
where
    T: Float,
{
    /// Walks the ring of the given kind starting at `start`, tagging every directed edge in it
    /// with `id`.
    pub(crate) fn build(
        graph: &mut PlanarGraph<T>,
        start: DirectedEdgeId,
        kind: RingKind,
        id: usize,
    ) -> Result<Self> {
        let mut edges = Vec::new();
        let mut points = Vec::new();

        let mut current = start;
        loop {
            let directed = graph.directed_edge(current);
            if kind.ring_of(directed) == Some(id) {
                return Err(Error::topology(
                    "directed edge visited twice during ring building",
                    directed.coordinate(),
                ));
            }

            if !directed.label().is_area() {
                return Err(Error::Assertion("ring edge with no area label"));
            }

            let at = *directed.coordinate();
            let forward = directed.is_forward();
            let edge = graph.edge(directed.edge());
            add_points(&mut points, edge.points(), forward, edges.is_empty());

            edges.push(current);
            kind.set_ring(graph.directed_edge_mut(current), id);

            current = kind
                .next(graph.directed_edge(current))
                .ok_or_else(|| Error::topology("found unlinked directed edge", &at))?;

            if current == start {
                break;
            }
        }

        Ok(Self {
            id,
            edges,
            envelope: points.iter().collect(),
            is_hole: is_ccw(&points)?,
            points,
            shell: None,
        })
    }

    pub(crate) fn points(&self) -> &[Coordinate<T>] {
        &self.points
    }

    pub(crate) fn into_points(self) -> Vec<Coordinate<T>> {
        self.points
    }

    /// Counter-clockwise rings enclose no result area, since the result lies at the right of
    /// its edges.
    pub(crate) fn is_hole(&self) -> bool {
        self.is_hole
    }

    /// Marks the edges of the ring as part of the result.
    pub(crate) fn set_in_result(&self, graph: &mut PlanarGraph<T>) {
        for id in &self.edges {
            let edge = graph.directed_edge(*id).edge();
            graph.edge_mut(edge).in_result = true;
        }
    }

    /// Returns the highest amount of edges of this maximal ring leaving any of its nodes.
    pub(crate) fn max_node_degree(&self, graph: &PlanarGraph<T>) -> usize {
        self.edges
            .iter()
            .map(|id| graph.outgoing_degree(graph.origin(*id), self.id))
            .max()
            .unwrap_or_default()
    }

    /// Splits this maximal ring into minimal ones, numbering them from `next_id` on.
    pub(crate) fn minimal_rings(
        &self,
        graph: &mut PlanarGraph<T>,
        next_id: &mut usize,
    ) -> Result<Vec<Self>> {
        for id in &self.edges {
            graph.link_minimal_directed_edges(graph.origin(*id), self.id)?;
        }

        let mut rings = Vec::new();
        for id in &self.edges {
            if graph.directed_edge(*id).min_edge_ring.is_some() {
                continue;
            }

            rings.push(Self::build(graph, *id, RingKind::Minimal, *next_id)?);
            *next_id += 1;
        }

        Ok(rings)
    }

    /// Returns true if, and only if, the given ring lies inside this one.
    pub(crate) fn contains_ring(&self, other: &Self) -> bool {
        if !self.envelope.contains(&other.envelope) {
            return false;
        }

        // a vertex shared with self tells nothing about containment
        let candidate = other
            .points
            .iter()
            .find(|point| !self.points.contains(point))
            .or(other.points.first());

        candidate.is_some_and(|point| is_point_in_ring(point, &self.points))
    }

    pub(crate) fn envelope(&self) -> &Envelope<T> {
        &self.envelope
    }
}

/// Appends the points of an edge to the ring, skipping the one already there unless the edge
/// is the first of the ring.
fn add_points<T>(
    points: &mut Vec<Coordinate<T>>,
    edge: &[Coordinate<T>],
    forward: bool,
    first: bool,
) where
    T: Copy,
{
    let skip = usize::from(!first);
    if forward {
        points.extend(edge.iter().skip(skip));
    } else {
        points.extend(edge.iter().rev().skip(skip));
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        graph::{Edge, Label, Location, PlanarGraph},
        overlay::ring::{EdgeRing, RingKind, add_points},
    };

    #[test]
    fn points_of_consecutive_edges() {
        let mut points = Vec::new();
        add_points(&mut points, &[coord!(0., 0.), coord!(1., 0.)], true, true);
        add_points(&mut points, &[coord!(1., 1.), coord!(1., 0.)], false, false);
        add_points(&mut points, &[coord!(1., 1.), coord!(0., 0.)], true, false);

        assert_eq!(
            points,
            vec![coord!(0., 0.), coord!(1., 0.), coord!(1., 1.), coord!(0., 0.)]
        );
    }

    #[test]
    fn maximal_ring_of_a_square() {
        let mut graph = PlanarGraph::default();
        graph
            .add_edges([Edge::new(
                vec![
                    coord!(0., 0.),
                    coord!(0., 1.),
                    coord!(1., 1.),
                    coord!(1., 0.),
                    coord!(0., 0.),
                ],
                Label::area_of(0, Location::Boundary, Location::Exterior, Location::Interior),
            )])
            .expect("edges should be valid");

        let forward = graph
            .directed_edge_ids()
            .find(|id| graph.directed_edge(*id).is_forward())
            .expect("forward edge should exist");

        graph.directed_edge_mut(forward).in_result = true;
        graph
            .link_result_directed_edges()
            .expect("result edges should link");

        let ring = EdgeRing::build(&mut graph, forward, RingKind::Maximal, 0)
            .expect("ring should be closed");

        assert!(!ring.is_hole());
        assert_eq!(ring.points().len(), 5);
        assert_eq!(ring.max_node_degree(&graph), 1);
        assert_eq!(graph.directed_edge(forward).edge_ring, Some(0));

        // walking the same ring again finds its edges already tagged
        assert!(EdgeRing::build(&mut graph, forward, RingKind::Maximal, 0).is_err());
    }
}
