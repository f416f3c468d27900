//! Operations on the edges incident to a node, sorted counter-clockwise by direction.

use num_traits::Float;

use crate::{
    Coordinate, Error, Geometry, Result,
    algorithm::locate_in_area,
    graph::{DirectedEdgeId, Label, Location, NodeId, PlanarGraph, Position, rightmost_index},
};

/// Completes the labels of the edge ends around a node at `at`.
///
/// The side locations known for some ends are propagated around the star, and whatever
/// remains unknown is taken from the location of the node relative to the corresponding
/// operand.
pub(crate) fn label_edge_ends<T>(
    labels: &mut [Label],
    at: &Coordinate<T>,
    operands: [&Geometry<T>; 2],
) -> Result<()>
where
    T: Float,
{
    propagate_side_labels(labels, 0, at)?;
    propagate_side_labels(labels, 1, at)?;

    // a line edge at the boundary of an area is a collapsed area edge, so the area has no
    // interior around here
    let collapsed = [0, 1].map(|index| {
        labels
            .iter()
            .any(|label| label.is_line(index) && label.location(index) == Location::Boundary)
    });

    for (index, operand) in operands.into_iter().enumerate() {
        if !labels.iter().any(|label| label.is_any_null(index)) {
            continue;
        }

        let location = if collapsed[index] {
            Location::Exterior
        } else {
            locate_in_area(at, operand)
        };

        labels
            .iter_mut()
            .filter(|label| label.is_any_null(index))
            .for_each(|label| label.set_all_locations_if_null(index, location));
    }

    Ok(())
}

/// Walks the star counter-clockwise carrying the location of the current face, filling the
/// unknown locations with it and checking it against the known ones.
fn propagate_side_labels<T>(labels: &mut [Label], index: usize, at: &Coordinate<T>) -> Result<()>
where
    T: Float,
{
    let Some(start) = labels
        .iter()
        .rev()
        .filter(|label| label.is_area_of(index))
        .map(|label| label.location_at(index, Position::Left))
        .find(Location::is_known)
    else {
        return Ok(());
    };

    let mut current = start;
    for label in labels.iter_mut() {
        if !label.location(index).is_known() {
            label.set_location(index, current);
        }

        if !label.is_area_of(index) {
            continue;
        }

        let left = label.location_at(index, Position::Left);
        let right = label.location_at(index, Position::Right);

        match (left, right) {
            (_, right) if right.is_known() && right != current => {
                return Err(Error::topology("side location conflict", at));
            }
            (Location::None, right) if right.is_known() => {
                return Err(Error::Assertion("found single null side"));
            }
            (left, right) if right.is_known() => current = left,
            (Location::None, _) => {
                label.set_location_at(index, Position::Right, current);
                label.set_location_at(index, Position::Left, current);
            }
            _ => return Err(Error::Assertion("found single null side")),
        }
    }

    Ok(())
}

/// The state of the linking of incoming and outgoing edges around a star.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Linking {
    ScanningForIncoming,
    LinkingToOutgoing(DirectedEdgeId),
}

impl<T> PlanarGraph<T>
where
    T: Float,
{
    fn star_of(&self, node: NodeId) -> Vec<DirectedEdgeId> {
        self.node(node).star.clone()
    }

    /// Labels the directed edges around the given node, merging what they say about the
    /// operands into the label of the node.
    pub fn compute_labelling(&mut self, node: NodeId, operands: [&Geometry<T>; 2]) -> Result<()> {
        let star = self.star_of(node);
        let mut labels: Vec<_> = star
            .iter()
            .map(|id| *self.directed_edge(*id).label())
            .collect();

        let at = *self.node(node).coordinate();
        label_edge_ends(&mut labels, &at, operands)?;

        star.iter()
            .zip(labels)
            .for_each(|(id, label)| *self.directed_edge_mut(*id).label_mut() = label);

        // any operand crossing the node by means of an edge has the node in its interior
        let mut merged = Label::line(Location::None);
        for id in &star {
            let label = self.edge(self.directed_edge(*id).edge()).label;
            for index in 0..2 {
                if matches!(label.location(index), Location::Interior | Location::Boundary) {
                    merged.set_location(index, Location::Interior);
                }
            }
        }

        self.node_mut(node).label.merge(&merged);
        Ok(())
    }

    /// Merges the label of every directed edge with the one of its opposite.
    pub fn merge_sym_labels(&mut self) {
        let directed: Vec<_> = self.directed_edge_ids().collect();
        for id in directed {
            let sym_label = *self.directed_edge(self.sym(id)).label();
            self.directed_edge_mut(id).label_mut().merge(&sym_label);
        }
    }

    /// Fills the unknown locations of the edges around the given node with the location of
    /// the node itself.
    pub fn update_labelling(&mut self, node: NodeId) {
        let node_label = self.node(node).label;
        for id in self.star_of(node) {
            let label = self.directed_edge_mut(id).label_mut();
            for index in 0..2 {
                label.set_all_locations_if_null(index, node_label.location(index));
            }
        }
    }

    /// Returns the directed edges around the given node that are in the result, or whose
    /// opposite is.
    fn result_area_edges(&self, node: NodeId) -> Vec<DirectedEdgeId> {
        self.node(node)
            .star
            .iter()
            .copied()
            .filter(|id| {
                self.directed_edge(*id).in_result
                    || self.directed_edge(self.sym(*id)).in_result
            })
            .collect()
    }

    /// Links every incoming result edge at the given node with the next outgoing result edge
    /// counter-clockwise.
    pub(crate) fn link_result_directed_edges_at(&mut self, node: NodeId) -> Result<()> {
        let mut first_out = None;
        let mut state = Linking::ScanningForIncoming;

        for next_out in self.result_area_edges(node) {
            let next_in = self.sym(next_out);
            if !self.directed_edge(next_out).label().is_area() {
                continue;
            }

            let out_in_result = self.directed_edge(next_out).in_result;
            if first_out.is_none() && out_in_result {
                first_out = Some(next_out);
            }

            match state {
                Linking::ScanningForIncoming if self.directed_edge(next_in).in_result => {
                    state = Linking::LinkingToOutgoing(next_in);
                }
                Linking::LinkingToOutgoing(incoming) if out_in_result => {
                    self.directed_edge_mut(incoming).next = Some(next_out);
                    state = Linking::ScanningForIncoming;
                }
                _ => {}
            }
        }

        if let Linking::LinkingToOutgoing(incoming) = state {
            let Some(first_out) = first_out else {
                return Err(Error::topology(
                    "no outgoing result edge around the node",
                    self.node(node).coordinate(),
                ));
            };

            self.directed_edge_mut(incoming).next = Some(first_out);
        }

        Ok(())
    }

    /// Links every incoming edge at the given node with the next outgoing edge
    /// counter-clockwise.
    pub(crate) fn link_all_directed_edges_at(&mut self, node: NodeId) {
        let star = self.star_of(node);
        let (Some(first), Some(last)) = (star.first(), star.last()) else {
            return;
        };

        for pair in star.windows(2) {
            let incoming = self.sym(pair[0]);
            self.directed_edge_mut(incoming).next = Some(pair[1]);
        }

        let incoming = self.sym(*last);
        self.directed_edge_mut(incoming).next = Some(*first);
    }

    /// Links the edges of the given maximal ring around the node so they form minimal rings,
    /// turning clockwise as much as possible.
    pub(crate) fn link_minimal_directed_edges(&mut self, node: NodeId, ring: usize) -> Result<()> {
        let mut first_out = None;
        let mut state = Linking::ScanningForIncoming;

        for next_out in self.result_area_edges(node).into_iter().rev() {
            let next_in = self.sym(next_out);
            let out_in_ring = self.directed_edge(next_out).edge_ring == Some(ring);

            if first_out.is_none() && out_in_ring {
                first_out = Some(next_out);
            }

            match state {
                Linking::ScanningForIncoming
                    if self.directed_edge(next_in).edge_ring == Some(ring) =>
                {
                    state = Linking::LinkingToOutgoing(next_in);
                }
                Linking::LinkingToOutgoing(incoming) if out_in_ring => {
                    self.directed_edge_mut(incoming).next_min = Some(next_out);
                    state = Linking::ScanningForIncoming;
                }
                _ => {}
            }
        }

        if let Linking::LinkingToOutgoing(incoming) = state {
            let first_out =
                first_out.ok_or(Error::Assertion("no outgoing edge of the ring around the node"))?;
            self.directed_edge_mut(incoming).next_min = Some(first_out);
        }

        Ok(())
    }

    /// Returns how many edges of the given ring leave the node.
    pub(crate) fn outgoing_degree(&self, node: NodeId, ring: usize) -> usize {
        self.node(node)
            .star
            .iter()
            .filter(|id| self.directed_edge(**id).edge_ring == Some(ring))
            .count()
    }

    /// Returns how many edges in the result leave the node.
    pub fn result_degree(&self, node: NodeId) -> usize {
        self.node(node)
            .star
            .iter()
            .filter(|id| self.directed_edge(**id).in_result)
            .count()
    }

    /// Marks the line edges around the node lying inside the result area as covered.
    pub(crate) fn find_covered_line_edges(&mut self, node: NodeId) {
        let star = self.star_of(node);

        let start = star.iter().find_map(|id| {
            let out = self.directed_edge(*id);
            if out.is_line_edge() {
                None
            } else if out.in_result {
                Some(Location::Interior)
            } else if self.directed_edge(out.sym).in_result {
                Some(Location::Exterior)
            } else {
                None
            }
        });

        let Some(mut current) = start else {
            return;
        };

        for id in star {
            let out = self.directed_edge(id);
            if out.is_line_edge() {
                let edge = out.edge();
                self.edge_mut(edge).covered = Some(current == Location::Interior);
                continue;
            }

            if out.in_result {
                current = Location::Exterior;
            }

            if self.directed_edge(out.sym).in_result {
                current = Location::Interior;
            }
        }
    }

    /// Propagates the depths of the given directed edge around the node it starts at.
    pub(crate) fn compute_depths(&mut self, start: DirectedEdgeId) -> Result<()> {
        let node = self.origin(start);
        let star = self.star_of(node);
        let Some(position) = star.iter().position(|id| *id == start) else {
            return Err(Error::Assertion("directed edge not found in the star of its node"));
        };

        let start_depth = self.directed_edge(start).depth(Position::Left);
        let target = self.directed_edge(start).depth(Position::Right);

        let next = self.propagate_depths(&star[position + 1..], start_depth)?;
        let last = self.propagate_depths(&star[..position], next)?;

        if last != target {
            return Err(Error::topology("depth mismatch", self.node(node).coordinate()));
        }

        Ok(())
    }

    fn propagate_depths(&mut self, star: &[DirectedEdgeId], depth: i32) -> Result<i32> {
        star.iter().try_fold(depth, |current, id| {
            let delta = self.edge(self.directed_edge(*id).edge()).depth_delta;
            let directed = self.directed_edge_mut(*id);
            directed.set_edge_depths(Position::Right, current, delta)?;
            Ok(directed.depth(Position::Left))
        })
    }

    /// Returns the directed edge around the node with the rightmost direction.
    pub fn rightmost_edge(&self, node: NodeId) -> Result<DirectedEdgeId> {
        let star = &self.node(node).star;
        let ends: Vec<_> = star.iter().map(|id| self.directed_edge(*id)).collect();
        rightmost_index(&ends).map(|index| star[index])
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        Geometry, Polygon,
        graph::{AsEdgeEnd, Edge, Label, Location, PlanarGraph, Position, label_edge_ends},
    };

    #[test]
    fn star_labelling() {
        let square = Geometry::Polygon(Polygon::from(vec![
            [0., 0.],
            [0., 1.],
            [1., 1.],
            [1., 0.],
            [0., 0.],
        ]));

        let line = Geometry::LineString(vec![coord!(0., 0.), coord!(-1., -1.)]);

        let mut graph = PlanarGraph::default();
        graph
            .add_edges([
                Edge::new(
                    vec![
                        coord!(0., 0.),
                        coord!(0., 1.),
                        coord!(1., 1.),
                        coord!(1., 0.),
                        coord!(0., 0.),
                    ],
                    Label::area_of(0, Location::Boundary, Location::Exterior, Location::Interior),
                ),
                Edge::new(
                    vec![coord!(0., 0.), coord!(-1., -1.)],
                    Label::line_of(1, Location::Interior),
                ),
            ])
            .expect("edges should be valid");

        let origin = graph
            .nodes()
            .find(&coord!(0., 0.))
            .expect("origin should be a node");

        graph
            .compute_labelling(origin, [&square, &line])
            .expect("labels should be consistent");

        let star = graph.node(origin).star().clone();
        let got: Vec<_> = star
            .iter()
            .map(|id| {
                let directed = graph.directed_edge(*id);
                (
                    *directed.edge_end().directed_coordinate(),
                    directed.label().to_string(),
                )
            })
            .collect();

        let want = vec![
            (coord!(1., 0.), "A0:ibe A1:eee".to_string()),
            (coord!(0., 1.), "A0:ebi A1:eee".to_string()),
            (coord!(-1., -1.), "A0:e A1:i".to_string()),
        ];

        assert_eq!(got, want);
        assert_eq!(graph.node(origin).label().location(0), Location::Interior);
        assert_eq!(graph.node(origin).label().location(1), Location::Interior);
    }

    #[test]
    fn side_location_conflict() {
        let operand = Geometry::<f64>::MultiPolygon(Vec::new());
        let mut labels = vec![
            Label::area_of(0, Location::Boundary, Location::Interior, Location::Exterior),
            Label::area_of(0, Location::Boundary, Location::Interior, Location::Exterior),
        ];

        let got = label_edge_ends(&mut labels, &coord!(0., 0.), [&operand, &operand]);
        assert!(got.is_err());
    }

    #[test]
    fn collapsed_area_is_exterior() {
        let operand = Geometry::<f64>::MultiPolygon(Vec::new());
        let mut labels = vec![
            Label::line_of(0, Location::Boundary),
            Label::area_of(1, Location::Boundary, Location::Interior, Location::Exterior),
            Label::area_of(1, Location::Boundary, Location::Exterior, Location::Interior),
        ];

        label_edge_ends(&mut labels, &coord!(0., 0.), [&operand, &operand])
            .expect("labels should be consistent");

        labels[1..].iter().for_each(|label| {
            assert_eq!(label.location_at(0, Position::Left), Location::Exterior);
            assert_eq!(label.location_at(0, Position::Right), Location::Exterior);
        });

        assert_eq!(labels[0].location(1), Location::Exterior);
    }
}
