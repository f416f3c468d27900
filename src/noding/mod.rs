//! Computation of the intersections between the segments of sets of edges.

mod adder;
mod finder;
mod sweep;
mod topology;

pub use self::adder::IntersectionAdder;
pub use self::finder::InteriorIntersectionFinder;
pub use self::sweep::SweepLineIntersector;
pub use self::topology::TopologyIntersector;

use num_traits::Float;
use tracing::debug;

use crate::{
    Coordinate, Envelope, Error, PrecisionModel, Result,
    algorithm::intersector::LineIntersector,
    error::display,
    graph::{Edge, Label, Location},
};

/// The location of a segment in a set of edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentRef {
    /// The index of the edge set.
    pub set: usize,
    /// The index of the edge in its set.
    pub edge: usize,
    /// The index of the segment in its edge.
    pub segment: usize,
}

/// The edges whose segments are being intersected with each other.
///
/// A single set is intersected with itself, while a pair of sets is intersected one against
/// the other only.
#[derive(Debug)]
pub struct EdgeSets<'a, T> {
    sets: Vec<&'a mut [Edge<T>]>,
    test_all: bool,
}

impl<'a, T> EdgeSets<'a, T>
where
    T: Float,
{
    /// Returns a single set of edges to intersect with itself.
    ///
    /// Unless `test_all` is set, the segments of an edge are not tested against the segments
    /// of the same edge.
    pub fn single(edges: &'a mut [Edge<T>], test_all: bool) -> Self {
        Self {
            sets: vec![edges],
            test_all,
        }
    }

    /// Returns a pair of edge sets to intersect one against the other.
    pub fn pair(lhs: &'a mut [Edge<T>], rhs: &'a mut [Edge<T>]) -> Self {
        Self {
            sets: vec![lhs, rhs],
            test_all: false,
        }
    }

    pub fn edge(&self, at: SegmentRef) -> &Edge<T> {
        &self.sets[at.set][at.edge]
    }

    pub fn edge_mut(&mut self, at: SegmentRef) -> &mut Edge<T> {
        &mut self.sets[at.set][at.edge]
    }

    /// Returns the endpoints of the given segment.
    pub fn segment(&self, at: SegmentRef) -> [Coordinate<T>; 2] {
        let points = self.edge(at).points();
        [points[at.segment], points[at.segment + 1]]
    }

    /// Returns true if, and only if, both segments belong to the same edge.
    pub fn is_same_edge(&self, lhs: SegmentRef, rhs: SegmentRef) -> bool {
        lhs.set == rhs.set && lhs.edge == rhs.edge
    }

    /// Returns true if, and only if, the given segments have to be tested against each other.
    fn is_candidate_pair(&self, lhs: SegmentRef, rhs: SegmentRef) -> bool {
        if self.sets.len() > 1 {
            lhs.set != rhs.set
        } else {
            self.test_all || lhs.edge != rhs.edge
        }
    }

    /// Returns every segment of every set, together with its envelope.
    fn segments(&self) -> impl Iterator<Item = (SegmentRef, Envelope<T>)> + '_ {
        self.sets.iter().enumerate().flat_map(|(set, edges)| {
            edges.iter().enumerate().flat_map(move |(edge, candidate)| {
                candidate
                    .points()
                    .windows(2)
                    .enumerate()
                    .map(move |(segment, points)| {
                        (
                            SegmentRef { set, edge, segment },
                            Envelope::of_segment(&points[0], &points[1]),
                        )
                    })
            })
        })
    }
}

/// Processes the intersection of pairs of segments.
pub trait SegmentIntersector<T> {
    /// Processes the intersection between the given segments.
    fn process_intersections(&mut self, edges: &mut EdgeSets<'_, T>, lhs: SegmentRef, rhs: SegmentRef);

    /// Returns true if, and only if, no more segments need to be processed.
    fn is_done(&self) -> bool {
        false
    }
}

/// Provides a [`SegmentIntersector`] with the pairs of segments that may intersect.
pub trait EdgeSetIntersector<T> {
    fn compute_intersections(
        &self,
        edges: &mut EdgeSets<'_, T>,
        intersector: &mut dyn SegmentIntersector<T>,
    );
}

/// Returns true if, and only if, the last intersection computed by the given intersector is
/// the vertex shared by two consecutive segments of the same edge.
pub(crate) fn is_trivial_intersection<T>(
    edges: &EdgeSets<'_, T>,
    intersector: &LineIntersector<T>,
    lhs: SegmentRef,
    rhs: SegmentRef,
) -> bool
where
    T: Float,
{
    if !edges.is_same_edge(lhs, rhs) || intersector.intersection_num() != 1 {
        return false;
    }

    if lhs.segment.abs_diff(rhs.segment) == 1 {
        return true;
    }

    let edge = edges.edge(lhs);
    if !edge.is_closed() {
        return false;
    }

    // the first and last segments of a closed edge meet at its closing point
    let last = edge.points().len() - 2;
    matches!(
        (lhs.segment, rhs.segment),
        (0, other) | (other, 0) if other == last
    )
}

/// Splits line strings at every intersection between them.
#[derive(Debug, Default, Clone, Copy)]
pub struct Noder<T = f64> {
    precision: PrecisionModel<T>,
}

impl<T> Noder<T>
where
    T: Float,
{
    /// Returns a noder rounding the computed intersections to the given model.
    pub fn new(precision: PrecisionModel<T>) -> Self {
        Self { precision }
    }

    /// Returns the pieces the given lines split into, so no two of them intersect but at their
    /// endpoints.
    pub fn node(&self, lines: &[Vec<Coordinate<T>>]) -> Vec<Vec<Coordinate<T>>> {
        let mut edges: Vec<_> = lines
            .iter()
            .filter(|line| line.len() >= 2)
            .map(|line| Edge::new(line.clone(), Label::line(Location::None)))
            .collect();

        let mut adder = IntersectionAdder::new(self.precision);
        SweepLineIntersector.compute_intersections(&mut EdgeSets::single(&mut edges, true), &mut adder);

        debug!(
            lines = edges.len(),
            tests = adder.tests(),
            intersections = adder.intersections(),
            interior = adder.interior_intersections(),
            proper = adder.proper_intersections(),
            "lines noded"
        );

        edges
            .iter()
            .flat_map(Edge::split_edges)
            .map(|edge| edge.points().to_vec())
            .collect()
    }
}

/// Fails if any two of the given edges intersect at a point which is not an endpoint of both.
pub fn validate_noding<T>(edges: &mut [Edge<T>]) -> Result<()>
where
    T: Float,
{
    let mut finder = InteriorIntersectionFinder::default();
    SweepLineIntersector.compute_intersections(&mut EdgeSets::single(edges, true), &mut finder);

    let Some(point) = finder.interior_intersection() else {
        return Ok(());
    };

    let segments = finder
        .intersection_segments()
        .map(|[p00, p01, p10, p11]| {
            format!(
                " between {}-{} and {}-{}",
                display(&p00),
                display(&p01),
                display(&p10),
                display(&p11)
            )
        })
        .unwrap_or_default();

    Err(Error::NotNoded(format!("{}{segments}", display(&point))))
}

#[cfg(test)]
mod tests {
    use crate::{
        Coordinate, PrecisionModel,
        graph::{Edge, Label, Location},
        noding::{Noder, validate_noding},
    };

    fn line(points: Vec<Coordinate<f64>>) -> Edge<f64> {
        Edge::new(points, Label::line_of(0, Location::Interior))
    }

    #[test]
    fn node_crossing_lines() {
        let noder = Noder::new(PrecisionModel::Floating);
        let mut got = noder.node(&[
            vec![coord!(0., 0.), coord!(2., 2.)],
            vec![coord!(0., 2.), coord!(2., 0.)],
        ]);

        got.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let want = vec![
            vec![coord!(0., 0.), coord!(1., 1.)],
            vec![coord!(0., 2.), coord!(1., 1.)],
            vec![coord!(1., 1.), coord!(2., 0.)],
            vec![coord!(1., 1.), coord!(2., 2.)],
        ];

        assert_eq!(got, want);
    }

    #[test]
    fn node_self_crossing_line() {
        let noder = Noder::new(PrecisionModel::Floating);
        let got = noder.node(&[vec![
            coord!(0., 0.),
            coord!(2., 2.),
            coord!(2., 0.),
            coord!(0., 2.),
        ]]);

        assert_eq!(got.len(), 3);
        assert!(got.iter().all(|piece| piece.len() >= 2));
        assert_eq!(got[1].first(), Some(&coord!(1., 1.)));
        assert_eq!(got[1].last(), Some(&coord!(1., 1.)));
    }

    #[test]
    fn noding_validation() {
        struct Test {
            name: &'static str,
            edges: Vec<Edge<f64>>,
            want: bool,
        }

        vec![
            Test {
                name: "edges meeting at their endpoints",
                edges: vec![
                    line(vec![coord!(0., 0.), coord!(1., 1.)]),
                    line(vec![coord!(1., 1.), coord!(2., 0.)]),
                ],
                want: true,
            },
            Test {
                name: "crossing edges",
                edges: vec![
                    line(vec![coord!(0., 0.), coord!(2., 2.)]),
                    line(vec![coord!(0., 2.), coord!(2., 0.)]),
                ],
                want: false,
            },
            Test {
                name: "edge touching the interior of another",
                edges: vec![
                    line(vec![coord!(0., 0.), coord!(2., 0.)]),
                    line(vec![coord!(1., 0.), coord!(1., 1.)]),
                ],
                want: false,
            },
        ]
        .into_iter()
        .for_each(|mut test| {
            let got = validate_noding(&mut test.edges).is_ok();
            assert_eq!(got, test.want, "{}", test.name);
        });
    }

    #[test]
    fn noding_error_names_the_crossing_segments() {
        let mut edges = vec![
            line(vec![coord!(0., 0.), coord!(2., 2.)]),
            line(vec![coord!(0., 2.), coord!(2., 0.)]),
        ];

        let error = validate_noding(&mut edges)
            .expect_err("crossing edges are not noded")
            .to_string();

        assert!(error.contains("at (1, 1) between"), "{error}");
        ["(0, 0)", "(2, 2)", "(0, 2)", "(2, 0)"]
            .iter()
            .for_each(|point| assert!(error.contains(point), "{error}"));
    }
}
