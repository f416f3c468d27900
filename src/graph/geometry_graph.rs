use std::collections::BTreeMap;

use num_traits::Float;
use tracing::trace;

use crate::{
    Coordinate, Geometry, Polygon, PrecisionModel, Result,
    algorithm::{BoundaryNodeRule, determine_boundary, is_ccw},
    coordinate::Ordered,
    graph::{Edge, Label, Location, NodeMap},
    noding::{EdgeSetIntersector, EdgeSets, SweepLineIntersector, TopologyIntersector},
};

/// The edges and nodes of a single operand, labeled relative to it.
#[derive(Debug)]
pub struct GeometryGraph<'a, T = f64> {
    /// The index of the operand this graph represents.
    index: usize,
    geometry: &'a Geometry<T>,
    rule: BoundaryNodeRule,
    /// Whether self-intersections of area edges are resolved through the rule.
    use_boundary_rule: bool,
    edges: Vec<Edge<T>>,
    nodes: NodeMap<T>,
    /// How many line endpoints meet at each candidate boundary point.
    boundary_counts: BTreeMap<Ordered<T>, usize>,
}

impl<'a, T> GeometryGraph<'a, T>
where
    T: Float,
{
    /// Returns the graph of the given operand.
    pub fn new(index: usize, geometry: &'a Geometry<T>, rule: BoundaryNodeRule) -> Result<Self> {
        let mut graph = Self {
            index,
            geometry,
            rule,
            use_boundary_rule: true,
            edges: Vec::new(),
            nodes: NodeMap::default(),
            boundary_counts: BTreeMap::new(),
        };

        graph.add(geometry)?;
        Ok(graph)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn geometry(&self) -> &'a Geometry<T> {
        self.geometry
    }

    pub fn rule(&self) -> BoundaryNodeRule {
        self.rule
    }

    pub fn edges(&self) -> &[Edge<T>] {
        &self.edges
    }

    pub(crate) fn edges_mut(&mut self) -> &mut [Edge<T>] {
        &mut self.edges
    }

    pub fn nodes(&self) -> &NodeMap<T> {
        &self.nodes
    }

    /// Returns the coordinates of every node at the boundary of the operand.
    pub fn boundary_nodes(&self) -> Vec<Coordinate<T>> {
        self.nodes
            .boundary_nodes(self.index)
            .map(|node| *node.coordinate())
            .collect()
    }

    /// Returns true if, and only if, there is a node at the boundary of the operand at the
    /// given coordinate.
    pub fn is_boundary_node(&self, coordinate: &Coordinate<T>) -> bool {
        self.nodes.find(coordinate).is_some_and(|id| {
            self.nodes.get(id).label().location(self.index) == Location::Boundary
        })
    }

    fn add(&mut self, geometry: &Geometry<T>) -> Result<()> {
        if geometry.is_empty() {
            return Ok(());
        }

        match geometry {
            Geometry::Point(point) => self.insert_point(*point, Location::Interior),
            Geometry::LineString(line) => self.add_line(line)?,
            Geometry::Polygon(polygon) => self.add_polygon(polygon)?,
            Geometry::MultiPoint(points) => points
                .iter()
                .for_each(|point| self.insert_point(*point, Location::Interior)),
            Geometry::MultiLineString(lines) => {
                lines.iter().try_for_each(|line| self.add_line(line))?
            }
            Geometry::MultiPolygon(polygons) => {
                // the boundaries of the polygons in a multi polygon never cancel each other
                self.use_boundary_rule = false;
                polygons
                    .iter()
                    .try_for_each(|polygon| self.add_polygon(polygon))?
            }
            Geometry::Collection(geometries) => {
                geometries.iter().try_for_each(|geometry| self.add(geometry))?
            }
        }

        Ok(())
    }

    fn add_line(&mut self, line: &[Coordinate<T>]) -> Result<()> {
        if line.is_empty() {
            return Ok(());
        }

        let points = remove_repeated_points(line);
        let (Some(first), Some(last)) = (points.first().copied(), points.last().copied()) else {
            return Ok(());
        };

        // a line collapsed into a single point adds nothing to the graph
        if points.len() < 2 {
            trace!(points = points.len(), "collapsed line skipped");
            return Ok(());
        }

        self.edges
            .push(Edge::new(points, Label::line_of(self.index, Location::Interior)));

        // closed lines get both endpoints too, so the node may cancel out as a boundary one
        self.insert_boundary_point(first);
        self.insert_boundary_point(last);
        Ok(())
    }

    fn add_polygon(&mut self, polygon: &Polygon<T>) -> Result<()> {
        self.add_ring(&polygon.shell, Location::Exterior, Location::Interior)?;

        // the interior of the polygon is at the opposite side of the holes
        polygon
            .holes
            .iter()
            .try_for_each(|hole| self.add_ring(hole, Location::Interior, Location::Exterior))
    }

    /// Adds a ring whose sides, were the ring clockwise, would be at the given locations.
    fn add_ring(&mut self, ring: &[Coordinate<T>], left: Location, right: Location) -> Result<()> {
        if ring.is_empty() {
            return Ok(());
        }

        // rounding may collapse a valid ring into a line or a point, which bounds no area
        let points = remove_repeated_points(ring);
        if points.len() < 4 {
            trace!(points = points.len(), "collapsed ring skipped");
            return Ok(());
        }

        let (left, right) = if is_ccw(&points)? {
            (right, left)
        } else {
            (left, right)
        };

        let start = points[0];
        self.edges.push(Edge::new(
            points,
            Label::area_of(self.index, Location::Boundary, left, right),
        ));

        self.insert_point(start, Location::Boundary);
        Ok(())
    }

    fn insert_point(&mut self, coordinate: Coordinate<T>, location: Location) {
        let id = self.nodes.add_node(coordinate);
        self.nodes.get_mut(id).set_label(self.index, location);
    }

    /// Inserts a line endpoint, whose location depends on how many other endpoints are there.
    fn insert_boundary_point(&mut self, coordinate: Coordinate<T>) {
        let count = self.boundary_counts.entry(Ordered(coordinate)).or_default();
        *count += 1;

        let location = determine_boundary(&self.rule, *count);
        self.insert_point(coordinate, location);
    }

    /// Computes the intersections of the operand with itself, adding a node at each of them.
    ///
    /// The rings of areas are not tested against themselves, since they are assumed to be
    /// valid.
    #[tracing::instrument(level = "trace", skip_all, fields(index = self.index))]
    pub fn compute_self_nodes(&mut self, precision: PrecisionModel<T>) -> TopologyIntersector<T> {
        let is_area = matches!(self.geometry, Geometry::Polygon(_) | Geometry::MultiPolygon(_));

        let mut intersector = TopologyIntersector::new(precision, true, false);
        SweepLineIntersector.compute_intersections(
            &mut EdgeSets::single(&mut self.edges, !is_area),
            &mut intersector,
        );

        self.add_self_intersection_nodes();
        intersector
    }

    fn add_self_intersection_nodes(&mut self) {
        let intersections: Vec<_> = self
            .edges
            .iter()
            .flat_map(|edge| {
                let location = edge.label().location(self.index);
                edge.intersections()
                    .iter()
                    .map(move |intersection| (intersection.coordinate, location))
            })
            .collect();

        for (coordinate, location) in intersections {
            if self.is_boundary_node(&coordinate) {
                continue;
            }

            if location == Location::Boundary && self.use_boundary_rule {
                self.insert_boundary_point(coordinate);
            } else {
                self.insert_point(coordinate, location);
            }
        }
    }

    /// Computes the intersections between the edges of self and the ones of other.
    pub fn compute_edge_intersections(
        &mut self,
        other: &mut GeometryGraph<'_, T>,
        precision: PrecisionModel<T>,
        include_proper: bool,
    ) -> TopologyIntersector<T> {
        let mut intersector = TopologyIntersector::new(precision, include_proper, true)
            .with_boundary_nodes(self.boundary_nodes(), other.boundary_nodes());

        SweepLineIntersector.compute_intersections(
            &mut EdgeSets::pair(&mut self.edges, &mut other.edges),
            &mut intersector,
        );

        intersector
    }

    /// Appends the pieces every edge splits into at its intersections.
    pub fn compute_split_edges(&self, edges: &mut Vec<Edge<T>>) {
        edges.extend(self.edges.iter().flat_map(Edge::split_edges));
    }
}

fn remove_repeated_points<T>(points: &[Coordinate<T>]) -> Vec<Coordinate<T>>
where
    T: Float,
{
    let mut unique = points.to_vec();
    unique.dedup();
    unique
}
