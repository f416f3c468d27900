use num_traits::Float;

use crate::{
    Coordinate, PrecisionModel,
    algorithm::intersector::LineIntersector,
    noding::{EdgeSets, SegmentIntersector, SegmentRef, is_trivial_intersection},
};

/// Records the intersections between the edges of the graphs of the operands, keeping track of
/// the topological facts the graphs depend on.
#[derive(Debug, Clone)]
pub struct TopologyIntersector<T = f64> {
    intersector: LineIntersector<T>,
    /// Whether proper intersections are recorded in the edges.
    include_proper: bool,
    /// Whether intersecting edges are marked as not isolated.
    record_isolated: bool,
    done_when_proper: bool,
    boundary_nodes: [Vec<Coordinate<T>>; 2],
    has_intersection: bool,
    has_proper: bool,
    has_proper_interior: bool,
    proper_point: Option<Coordinate<T>>,
    tests: usize,
    intersections: usize,
    done: bool,
}

impl<T> TopologyIntersector<T>
where
    T: Float,
{
    pub fn new(precision: PrecisionModel<T>, include_proper: bool, record_isolated: bool) -> Self {
        Self {
            intersector: LineIntersector::new(precision),
            include_proper,
            record_isolated,
            done_when_proper: false,
            boundary_nodes: [Vec::new(), Vec::new()],
            has_intersection: false,
            has_proper: false,
            has_proper_interior: false,
            proper_point: None,
            tests: 0,
            intersections: 0,
            done: false,
        }
    }

    /// Sets the boundary nodes of both operands, which proper intersections are told apart
    /// from.
    pub fn with_boundary_nodes(mut self, lhs: Vec<Coordinate<T>>, rhs: Vec<Coordinate<T>>) -> Self {
        self.boundary_nodes = [lhs, rhs];
        self
    }

    /// Stops the intersection as soon as a proper intersection is found.
    pub fn with_done_when_proper(mut self, done_when_proper: bool) -> Self {
        self.done_when_proper = done_when_proper;
        self
    }

    /// Returns true if, and only if, any non-trivial intersection was found.
    pub fn has_intersection(&self) -> bool {
        self.has_intersection
    }

    /// Returns true if, and only if, any intersection interior to both segments was found.
    pub fn has_proper_intersection(&self) -> bool {
        self.has_proper
    }

    /// Returns true if, and only if, any proper intersection not on a boundary node was found.
    pub fn has_proper_interior_intersection(&self) -> bool {
        self.has_proper_interior
    }

    /// Returns the last proper intersection found.
    pub fn proper_intersection_point(&self) -> Option<Coordinate<T>> {
        self.proper_point
    }

    pub fn tests(&self) -> usize {
        self.tests
    }

    pub fn intersections(&self) -> usize {
        self.intersections
    }

    fn is_boundary_point(&self) -> bool {
        self.boundary_nodes
            .iter()
            .flatten()
            .any(|node| self.intersector.is_intersection(node))
    }
}

impl<T> SegmentIntersector<T> for TopologyIntersector<T>
where
    T: Float,
{
    fn process_intersections(&mut self, edges: &mut EdgeSets<'_, T>, lhs: SegmentRef, rhs: SegmentRef) {
        if edges.is_same_edge(lhs, rhs) && lhs.segment == rhs.segment {
            return;
        }

        self.tests += 1;

        let [p00, p01] = edges.segment(lhs);
        let [p10, p11] = edges.segment(rhs);
        self.intersector.compute_intersection(&p00, &p01, &p10, &p11);

        if !self.intersector.has_intersection() {
            return;
        }

        if self.record_isolated {
            edges.edge_mut(lhs).isolated = false;
            edges.edge_mut(rhs).isolated = false;
        }

        self.intersections += 1;
        if is_trivial_intersection(edges, &self.intersector, lhs, rhs) {
            return;
        }

        self.has_intersection = true;
        let proper = self.intersector.is_proper();

        if self.include_proper || !proper {
            edges
                .edge_mut(lhs)
                .add_intersections(&self.intersector, lhs.segment, 0);
            edges
                .edge_mut(rhs)
                .add_intersections(&self.intersector, rhs.segment, 1);
        }

        if proper {
            self.proper_point = Some(self.intersector.intersection_point(0));
            self.has_proper = true;
            self.done |= self.done_when_proper;
            if !self.is_boundary_point() {
                self.has_proper_interior = true;
            }
        }
    }

    fn is_done(&self) -> bool {
        self.done
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        PrecisionModel,
        graph::{Edge, Label, Location},
        noding::{EdgeSetIntersector, EdgeSets, SweepLineIntersector, TopologyIntersector},
    };

    fn line(points: Vec<crate::Coordinate<f64>>) -> Edge<f64> {
        Edge::new(points, Label::line_of(0, Location::Interior))
    }

    #[test]
    fn proper_intersections() {
        struct Test {
            name: &'static str,
            include_proper: bool,
            boundary: Vec<crate::Coordinate<f64>>,
            want_recorded: usize,
            want_proper_interior: bool,
        }

        vec![
            Test {
                name: "proper intersection recorded",
                include_proper: true,
                boundary: vec![],
                want_recorded: 3,
                want_proper_interior: true,
            },
            Test {
                name: "proper intersection skipped",
                include_proper: false,
                boundary: vec![],
                want_recorded: 2,
                want_proper_interior: true,
            },
            Test {
                name: "proper intersection at a boundary node",
                include_proper: true,
                boundary: vec![coord!(1., 1.)],
                want_recorded: 3,
                want_proper_interior: false,
            },
        ]
        .into_iter()
        .for_each(|test| {
            let mut lhs = vec![line(vec![coord!(0., 0.), coord!(2., 2.)])];
            let mut rhs = vec![line(vec![coord!(0., 2.), coord!(2., 0.)])];

            let mut intersector =
                TopologyIntersector::new(PrecisionModel::Floating, test.include_proper, true)
                    .with_boundary_nodes(test.boundary, vec![]);

            SweepLineIntersector.compute_intersections(
                &mut EdgeSets::pair(&mut lhs, &mut rhs),
                &mut intersector,
            );

            assert!(intersector.has_proper_intersection(), "{}", test.name);
            assert_eq!(
                intersector.has_proper_interior_intersection(),
                test.want_proper_interior,
                "{}",
                test.name
            );
            assert_eq!(
                lhs[0].intersections().len(),
                test.want_recorded,
                "{}",
                test.name
            );
            assert!(!lhs[0].is_isolated(), "{}", test.name);
        });
    }

    #[test]
    fn closed_edge_wraparound_is_trivial() {
        let mut edges = vec![line(vec![
            coord!(0., 0.),
            coord!(0., 1.),
            coord!(1., 1.),
            coord!(1., 0.),
            coord!(0., 0.),
        ])];

        let mut intersector = TopologyIntersector::new(PrecisionModel::Floating, true, false);
        SweepLineIntersector.compute_intersections(
            &mut EdgeSets::single(&mut edges, true),
            &mut intersector,
        );

        assert!(!intersector.has_intersection());
        assert_eq!(edges[0].intersections().len(), 2);
        assert!(edges[0].is_isolated());
    }
}
