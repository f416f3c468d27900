use num_traits::Float;

use crate::{
    Coordinate, Error, Result,
    graph::{
        AsEdgeEnd, DirectedEdgeId, Edge, EdgeEnd, EdgeId, Label, Location, NodeId, Position,
    },
};

const NULL_DEPTH: i32 = -999;

/// One of the two orientations of an [`Edge`] in a planar graph.
#[derive(Debug, Clone)]
pub struct DirectedEdge<T = f64> {
    end: EdgeEnd<T>,
    forward: bool,
    origin: NodeId,
    pub(crate) sym: DirectedEdgeId,
    /// The next edge of the maximal ring this one belongs to.
    pub(crate) next: Option<DirectedEdgeId>,
    /// The next edge of the minimal ring this one belongs to.
    pub(crate) next_min: Option<DirectedEdgeId>,
    pub(crate) edge_ring: Option<usize>,
    pub(crate) min_edge_ring: Option<usize>,
    pub(crate) in_result: bool,
    pub(crate) visited: bool,
    depth: [i32; 3],
}

impl<T> AsEdgeEnd<T> for DirectedEdge<T> {
    fn edge_end(&self) -> &EdgeEnd<T> {
        &self.end
    }
}

impl<T> DirectedEdge<T>
where
    T: Float,
{
    /// Returns the given orientation of the edge, starting at `origin` and whose opposite
    /// orientation is `sym`.
    pub(crate) fn new(
        id: EdgeId,
        edge: &Edge<T>,
        forward: bool,
        sym: DirectedEdgeId,
        origin: NodeId,
    ) -> Result<Self> {
        let points = edge.points();
        let (p0, p1) = match (forward, points) {
            (true, [first, second, ..]) => (*first, *second),
            (false, [.., second_last, last]) => (*last, *second_last),
            _ => return Err(Error::Assertion("directed edge of an edge with a single point")),
        };

        let label = if forward {
            edge.label
        } else {
            edge.label.flipped()
        };

        Ok(Self {
            end: EdgeEnd::new(id, p0, p1, label)?,
            forward,
            origin,
            sym,
            next: None,
            next_min: None,
            edge_ring: None,
            min_edge_ring: None,
            in_result: false,
            visited: false,
            depth: [0, NULL_DEPTH, NULL_DEPTH],
        })
    }

    pub fn edge(&self) -> EdgeId {
        self.end.edge
    }

    /// Returns the node the directed edge starts at.
    pub fn origin(&self) -> NodeId {
        self.origin
    }

    pub fn sym(&self) -> DirectedEdgeId {
        self.sym
    }

    pub fn next(&self) -> Option<DirectedEdgeId> {
        self.next
    }

    pub fn coordinate(&self) -> &Coordinate<T> {
        self.end.coordinate()
    }

    pub fn label(&self) -> &Label {
        &self.end.label
    }

    pub(crate) fn label_mut(&mut self) -> &mut Label {
        &mut self.end.label
    }

    pub fn is_forward(&self) -> bool {
        self.forward
    }

    pub fn is_in_result(&self) -> bool {
        self.in_result
    }

    pub fn is_visited(&self) -> bool {
        self.visited
    }

    pub fn depth(&self, position: Position) -> i32 {
        self.depth[position as usize]
    }

    /// Sets the depth at the given side, failing if a different one was assigned already.
    pub fn set_depth(&mut self, position: Position, depth: i32) -> Result<()> {
        let current = &mut self.depth[position as usize];
        if *current != NULL_DEPTH && *current != depth {
            return Err(Error::topology(
                "assigned depths do not match",
                self.end.coordinate(),
            ));
        }

        *current = depth;
        Ok(())
    }

    /// Sets the depth at the given side, and the one at the opposite side as implied by the
    /// depth delta of the edge.
    pub fn set_edge_depths(&mut self, position: Position, depth: i32, edge_delta: i32) -> Result<()> {
        let delta = if self.forward { edge_delta } else { -edge_delta };
        let direction = if position == Position::Left { -1 } else { 1 };

        self.set_depth(position, depth)?;
        self.set_depth(position.opposite(), depth + delta * direction)
    }

    /// Returns true if, and only if, this is a line edge, or an area edge lying completely in
    /// the exterior of the operands it is an area of.
    pub fn is_line_edge(&self) -> bool {
        let label = self.label();
        let is_line = label.is_line(0) || label.is_line(1);
        is_line
            && (0..2).all(|index| {
                !label.is_area_of(index) || label.all_positions_equal(index, Location::Exterior)
            })
    }

    /// Returns true if, and only if, both sides of the edge are in the interior of both
    /// operands.
    pub fn is_interior_area_edge(&self) -> bool {
        let label = self.label();
        (0..2).all(|index| {
            label.is_area_of(index)
                && label.location_at(index, Position::Left) == Location::Interior
                && label.location_at(index, Position::Right) == Location::Interior
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::graph::{
        AsEdgeEnd, DirectedEdge, DirectedEdgeId, Edge, EdgeId, Label, Location, NodeId, Position,
    };

    fn shell() -> Edge<f64> {
        Edge::new(
            vec![
                coord!(0., 0.),
                coord!(0., 1.),
                coord!(1., 1.),
                coord!(1., 0.),
                coord!(0., 0.),
            ],
            Label::area_of(0, Location::Boundary, Location::Exterior, Location::Interior),
        )
    }

    #[test]
    fn backward_edge_is_flipped() {
        let edge = shell();
        let backward = DirectedEdge::new(EdgeId(0), &edge, false, DirectedEdgeId(0), NodeId(0))
            .expect("edge should have two points");

        assert_eq!(backward.coordinate(), &coord!(0., 0.));
        assert_eq!(backward.edge_end().directed_coordinate(), &coord!(1., 0.));
        assert_eq!(
            backward.label().location_at(0, Position::Left),
            Location::Interior
        );
    }

    #[test]
    fn edge_depths() {
        struct Test {
            name: &'static str,
            forward: bool,
            delta: i32,
            position: Position,
            depth: i32,
            want: [i32; 2],
        }

        vec![
            Test {
                name: "forward edge from the right",
                forward: true,
                delta: -1,
                position: Position::Right,
                depth: 0,
                want: [-1, 0],
            },
            Test {
                name: "backward edge from the right",
                forward: false,
                delta: -1,
                position: Position::Right,
                depth: 0,
                want: [1, 0],
            },
            Test {
                name: "forward edge from the left",
                forward: true,
                delta: 1,
                position: Position::Left,
                depth: 2,
                want: [2, 1],
            },
        ]
        .into_iter()
        .for_each(|test| {
            let edge = shell();
            let mut directed = DirectedEdge::new(EdgeId(0), &edge, test.forward, DirectedEdgeId(0), NodeId(0))
                .expect("edge should have two points");

            directed
                .set_edge_depths(test.position, test.depth, test.delta)
                .expect("depths should be consistent");

            let got = [
                directed.depth(Position::Left),
                directed.depth(Position::Right),
            ];

            assert_eq!(got, test.want, "{}", test.name);
        });
    }

    #[test]
    fn conflicting_depths() {
        let edge = shell();
        let mut directed = DirectedEdge::new(EdgeId(0), &edge, true, DirectedEdgeId(0), NodeId(0))
            .expect("edge should have two points");

        assert!(directed.set_depth(Position::Left, 1).is_ok());
        assert!(directed.set_depth(Position::Left, 1).is_ok());
        assert!(directed.set_depth(Position::Left, 2).is_err());
    }
}
