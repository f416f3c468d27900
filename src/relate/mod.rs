//! Computation of the topological relationship between two geometries.

mod builder;
mod bundle;
mod matrix;

pub use self::builder::edge_ends;
pub use self::bundle::EdgeEndBundle;
pub use self::matrix::IntersectionMatrix;

use num_traits::Float;
use tracing::debug;

use crate::{
    Dimension, Error, Geometry, OverlayConfig, PrecisionModel, Result,
    algorithm::{BoundaryNodeRule, PointLocator},
    graph::{EdgeId, GeometryGraph, Location, NodeMap},
    noding::TopologyIntersector,
};

use self::bundle::{insert_edge_end, label_bundles};

/// Returns the intersection matrix of the given geometries, under the default settings.
pub fn relate<T>(lhs: &Geometry<T>, rhs: &Geometry<T>) -> Result<IntersectionMatrix>
where
    T: Float,
{
    relate_with(lhs, rhs, &OverlayConfig::default())
}

/// Returns the intersection matrix of the given geometries.
///
/// Heterogeneous collections are not supported.
#[tracing::instrument(level = "debug", skip_all)]
pub fn relate_with<T>(
    lhs: &Geometry<T>,
    rhs: &Geometry<T>,
    config: &OverlayConfig<T>,
) -> Result<IntersectionMatrix>
where
    T: Float,
{
    if lhs.is_collection() || rhs.is_collection() {
        return Err(Error::CollectionArgument);
    }

    lhs.validate()?;
    rhs.validate()?;

    let (mut lhs, mut rhs) = (lhs.clone(), rhs.clone());
    lhs.make_precise(&config.precision);
    rhs.make_precise(&config.precision);

    let matrix = RelateComputer::new([&lhs, &rhs], config)?.compute_im()?;
    debug!(%matrix, "relate computed");

    Ok(matrix)
}

/// The state of a single relate operation.
struct RelateComputer<'a, T> {
    graphs: [GeometryGraph<'a, T>; 2],
    precision: PrecisionModel<T>,
    rule: BoundaryNodeRule,
    /// The nodes of both operands and their intersections, with the bundles of edge ends
    /// leaving them.
    nodes: NodeMap<T, Vec<EdgeEndBundle<T>>>,
    /// The operand and position of every edge not intersecting the other operand.
    isolated_edges: Vec<(usize, usize)>,
}

impl<'a, T> RelateComputer<'a, T>
where
    T: Float,
{
    fn new(operands: [&'a Geometry<T>; 2], config: &OverlayConfig<T>) -> Result<Self> {
        Ok(Self {
            graphs: [
                GeometryGraph::new(0, operands[0], config.boundary_rule)?,
                GeometryGraph::new(1, operands[1], config.boundary_rule)?,
            ],
            precision: config.precision,
            rule: config.boundary_rule,
            nodes: NodeMap::default(),
            isolated_edges: Vec::new(),
        })
    }

    fn operands(&self) -> [&'a Geometry<T>; 2] {
        [self.graphs[0].geometry(), self.graphs[1].geometry()]
    }

    fn compute_im(mut self) -> Result<IntersectionMatrix> {
        let mut matrix = IntersectionMatrix::default();
        matrix.set(Location::Exterior, Location::Exterior, Dimension::Surface);

        let [lhs, rhs] = self.operands();
        if !lhs.envelope().intersects(&rhs.envelope()) {
            self.compute_disjoint_im(&mut matrix);
            return Ok(matrix);
        }

        self.graphs[0].compute_self_nodes(self.precision);
        self.graphs[1].compute_self_nodes(self.precision);

        // proper intersections are not needed to split edges, only to know they exist
        let intersector = {
            let [lhs, rhs] = &mut self.graphs;
            lhs.compute_edge_intersections(rhs, self.precision, false)
        };

        self.compute_intersection_nodes(0);
        self.compute_intersection_nodes(1);
        self.copy_nodes_and_labels(0);
        self.copy_nodes_and_labels(1);
        self.label_isolated_nodes()?;

        self.compute_proper_intersection_im(&intersector, &mut matrix)?;

        self.insert_edge_ends(0)?;
        self.insert_edge_ends(1)?;
        self.label_node_edges()?;

        self.label_isolated_edges(0, 1);
        self.label_isolated_edges(1, 0);

        self.update_im(&mut matrix);
        Ok(matrix)
    }

    fn compute_disjoint_im(&self, matrix: &mut IntersectionMatrix) {
        let [lhs, rhs] = self.operands();

        if !lhs.is_empty() {
            matrix.set(Location::Interior, Location::Exterior, lhs.dimension());
            matrix.set(Location::Boundary, Location::Exterior, lhs.boundary_dimension());
        }

        if !rhs.is_empty() {
            matrix.set(Location::Exterior, Location::Interior, rhs.dimension());
            matrix.set(Location::Exterior, Location::Boundary, rhs.boundary_dimension());
        }
    }

    /// Adds a node at every intersection of the edges of the given operand.
    ///
    /// Intersections on the boundary of the operand toggle the boundary location of the node.
    fn compute_intersection_nodes(&mut self, index: usize) {
        for edge in self.graphs[index].edges() {
            let location = edge.label().location(index);
            for intersection in edge.intersections().iter() {
                let id = self.nodes.add_node(intersection.coordinate);
                let node = self.nodes.get_mut(id);

                if location == Location::Boundary {
                    node.set_label_boundary(index);
                } else if node.label().is_null(index) {
                    node.set_label(index, Location::Interior);
                }
            }
        }
    }

    /// Copies the nodes of the given operand, whose labels take precedence over the ones
    /// computed from intersections.
    fn copy_nodes_and_labels(&mut self, index: usize) {
        for node in self.graphs[index].nodes().iter() {
            let id = self.nodes.add_node(*node.coordinate());
            self.nodes
                .get_mut(id)
                .set_label(index, node.label().location(index));
        }
    }

    /// Locates the nodes known by a single operand relative to the other one.
    fn label_isolated_nodes(&mut self) -> Result<()> {
        let locator = PointLocator::new(self.rule);
        let operands = self.operands();

        let ids: Vec<_> = self.nodes.ids().collect();
        for id in ids {
            let node = self.nodes.get_mut(id);
            if node.label().geometry_count() == 0 {
                return Err(Error::Assertion("node with empty label found"));
            }

            if node.is_isolated() {
                let target = if node.label().is_null(0) { 0 } else { 1 };
                let location = locator.locate(node.coordinate(), operands[target]);
                node.label.set_all_locations(target, location);
            }
        }

        Ok(())
    }

    /// Sets the lower bounds implied by proper intersections, which are not nodes of the
    /// graph.
    fn compute_proper_intersection_im(
        &self,
        intersector: &TopologyIntersector<T>,
        matrix: &mut IntersectionMatrix,
    ) -> Result<()> {
        let [lhs, rhs] = self.operands();
        let has_proper = intersector.has_proper_intersection();
        let has_proper_interior = intersector.has_proper_interior_intersection();

        let patterns: &[(bool, &str)] = match (lhs.dimension(), rhs.dimension()) {
            (Dimension::Surface, Dimension::Surface) => &[(has_proper, "212101212")],
            (Dimension::Surface, Dimension::Curve) => &[
                (has_proper, "FFF0FFFF2"),
                (has_proper_interior, "1FFFFF1FF"),
            ],
            (Dimension::Curve, Dimension::Surface) => &[
                (has_proper, "F0FFFFFF2"),
                (has_proper_interior, "1F1FFFFFF"),
            ],
            (Dimension::Curve, Dimension::Curve) => &[(has_proper_interior, "0FFFFFFFF")],
            _ => &[],
        };

        for (_, pattern) in patterns.iter().filter(|(found, _)| *found) {
            matrix.set_at_least_all(&pattern.parse()?);
        }

        Ok(())
    }

    fn insert_edge_ends(&mut self, index: usize) -> Result<()> {
        let offset = if index == 0 {
            0
        } else {
            self.graphs[0].edges().len()
        };

        for (position, edge) in self.graphs[index].edges().iter().enumerate() {
            for end in edge_ends(EdgeId(offset + position), edge)? {
                let id = self.nodes.add_node(*end.coordinate());
                insert_edge_end(&mut self.nodes.get_mut(id).star, end);
            }
        }

        Ok(())
    }

    fn label_node_edges(&mut self) -> Result<()> {
        let operands = self.operands();

        let ids: Vec<_> = self.nodes.ids().collect();
        for id in ids {
            let node = self.nodes.get_mut(id);
            let at = *node.coordinate();
            label_bundles(&mut node.star, &at, operands, &self.rule)?;
        }

        Ok(())
    }

    /// Locates the edges of the given operand not intersecting the target one.
    fn label_isolated_edges(&mut self, index: usize, target: usize) {
        let locator = PointLocator::new(self.rule);
        let target_geometry = self.graphs[target].geometry();

        for (position, edge) in self.graphs[index].edges_mut().iter_mut().enumerate() {
            if !edge.is_isolated() {
                continue;
            }

            let location = match (target_geometry.dimension(), edge.points().first()) {
                (Dimension::Curve | Dimension::Surface, Some(first)) => {
                    locator.locate(first, target_geometry)
                }
                _ => Location::Exterior,
            };

            edge.label.set_all_locations(target, location);
            self.isolated_edges.push((index, position));
        }
    }

    fn update_im(&self, matrix: &mut IntersectionMatrix) {
        for (index, position) in &self.isolated_edges {
            self.graphs[*index].edges()[*position].update_im(matrix);
        }

        for node in self.nodes.iter() {
            let label = node.label();
            matrix.set_at_least_if_valid(label.location(0), label.location(1), Dimension::Point);
            node.star().iter().for_each(|bundle| bundle.update_im(matrix));
        }
    }
}

impl<T> Geometry<T>
where
    T: Float,
{
    /// Returns the intersection matrix of self and other.
    pub fn relate(&self, other: &Self) -> Result<IntersectionMatrix> {
        relate(self, other)
    }

    /// Returns true if, and only if, the intersection matrix of self and other matches the
    /// given pattern.
    pub fn relate_pattern(&self, other: &Self, pattern: &str) -> Result<bool> {
        self.relate(other)?.matches(pattern)
    }

    pub fn intersects(&self, other: &Self) -> Result<bool> {
        self.relate(other).map(|matrix| matrix.is_intersects())
    }

    pub fn disjoint(&self, other: &Self) -> Result<bool> {
        self.relate(other).map(|matrix| matrix.is_disjoint())
    }

    pub fn touches(&self, other: &Self) -> Result<bool> {
        self.relate(other)
            .map(|matrix| matrix.is_touches(self.dimension(), other.dimension()))
    }

    pub fn crosses(&self, other: &Self) -> Result<bool> {
        self.relate(other)
            .map(|matrix| matrix.is_crosses(self.dimension(), other.dimension()))
    }

    pub fn within(&self, other: &Self) -> Result<bool> {
        self.relate(other).map(|matrix| matrix.is_within())
    }

    pub fn contains(&self, other: &Self) -> Result<bool> {
        self.relate(other).map(|matrix| matrix.is_contains())
    }

    pub fn overlaps(&self, other: &Self) -> Result<bool> {
        self.relate(other)
            .map(|matrix| matrix.is_overlaps(self.dimension(), other.dimension()))
    }

    pub fn covers(&self, other: &Self) -> Result<bool> {
        self.relate(other).map(|matrix| matrix.is_covers())
    }

    pub fn covered_by(&self, other: &Self) -> Result<bool> {
        self.relate(other).map(|matrix| matrix.is_covered_by())
    }

    /// Returns true if, and only if, self and other have exactly the same points, no matter
    /// how they are represented.
    pub fn equals_topo(&self, other: &Self) -> Result<bool> {
        self.relate(other)
            .map(|matrix| matrix.is_equals(self.dimension(), other.dimension()))
    }
}

#[cfg(test)]
mod tests {
    use crate::{Error, Geometry, Polygon, relate::relate};

    fn square(x: f64, y: f64, side: f64) -> Geometry<f64> {
        Polygon::new(
            vec![
                coord!(x, y),
                coord!(x, y + side),
                coord!(x + side, y + side),
                coord!(x + side, y),
                coord!(x, y),
            ],
            vec![],
        )
        .into()
    }

    #[test]
    fn intersection_matrices() {
        struct Test {
            name: &'static str,
            lhs: Geometry<f64>,
            rhs: Geometry<f64>,
            want: &'static str,
        }

        vec![
            Test {
                name: "disjoint squares",
                lhs: square(0., 0., 1.),
                rhs: square(5., 5., 1.),
                want: "FF2FF1212",
            },
            Test {
                name: "overlapping squares",
                lhs: square(0., 0., 10.),
                rhs: square(5., 5., 10.),
                want: "212101212",
            },
            Test {
                name: "squares sharing an edge",
                lhs: square(0., 0., 1.),
                rhs: square(1., 0., 1.),
                want: "FF2F11212",
            },
            Test {
                name: "square inside another",
                lhs: square(2., 2., 1.),
                rhs: square(0., 0., 10.),
                want: "2FF1FF212",
            },
            Test {
                name: "equal squares",
                lhs: square(0., 0., 1.),
                rhs: square(0., 0., 1.),
                want: "2FFF1FFF2",
            },
            Test {
                name: "line crossing a square",
                lhs: Geometry::LineString(vec![coord!(-1., 0.5), coord!(2., 0.5)]),
                rhs: square(0., 0., 1.),
                want: "101FF0212",
            },
            Test {
                name: "crossing lines",
                lhs: Geometry::LineString(vec![coord!(0., 0.), coord!(2., 2.)]),
                rhs: Geometry::LineString(vec![coord!(0., 2.), coord!(2., 0.)]),
                want: "0F1FF0102",
            },
            Test {
                name: "point on the boundary of a square",
                lhs: Geometry::Point(coord!(0., 0.5)),
                rhs: square(0., 0., 1.),
                want: "F0FFFF212",
            },
            Test {
                name: "point inside a square",
                lhs: Geometry::Point(coord!(0.5, 0.5)),
                rhs: square(0., 0., 1.),
                want: "0FFFFF212",
            },
        ]
        .into_iter()
        .for_each(|test| {
            let got = relate(&test.lhs, &test.rhs).expect("relate should succeed");
            assert_eq!(got.to_string(), test.want, "{}", test.name);

            let transposed = relate(&test.rhs, &test.lhs).expect("relate should succeed");
            assert_eq!(transposed, got.transpose(), "{}", test.name);
        });
    }

    #[test]
    fn collections_are_not_related() {
        let collection = Geometry::Collection(vec![square(0., 0., 1.)]);
        assert_eq!(
            relate(&collection, &square(0., 0., 1.)),
            Err(Error::CollectionArgument)
        );
    }
}
