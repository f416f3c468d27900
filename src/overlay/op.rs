use std::mem;

use num_traits::Float;
use tracing::{debug, trace};

use crate::{
    Coordinate, Dimension, Error, Geometry, OverlayConfig, Polygon, Result,
    algorithm::PointLocator,
    graph::{Edge, EdgeList, GeometryGraph, Location, PlanarGraph, Position},
    noding::validate_noding,
    overlay::{
        OpCode, line_builder::build_lines, point_builder::build_points,
        polygon_builder::PolygonBuilder,
    },
};

/// The state of a single overlay operation.
pub(crate) struct OverlayOp<'a, T> {
    graphs: [GeometryGraph<'a, T>; 2],
    config: OverlayConfig<T>,
    /// The noded edges of both operands, with coincident edges merged.
    edges: EdgeList<T>,
    graph: PlanarGraph<T>,
}

impl<'a, T> OverlayOp<'a, T>
where
    T: Float,
{
    pub(crate) fn new(operands: [&'a Geometry<T>; 2], config: OverlayConfig<T>) -> Result<Self> {
        Ok(Self {
            graphs: [
                GeometryGraph::new(0, operands[0], config.boundary_rule)?,
                GeometryGraph::new(1, operands[1], config.boundary_rule)?,
            ],
            config,
            edges: EdgeList::default(),
            graph: PlanarGraph::default(),
        })
    }

    fn operands(&self) -> [&'a Geometry<T>; 2] {
        [self.graphs[0].geometry(), self.graphs[1].geometry()]
    }

    /// Computes the result of the given operation.
    pub(crate) fn compute(mut self, op: OpCode) -> Result<Geometry<T>> {
        self.copy_points(0);
        self.copy_points(1);

        let precision = self.config.precision;
        self.graphs[0].compute_self_nodes(precision);
        self.graphs[1].compute_self_nodes(precision);

        let intersector = {
            let [lhs, rhs] = &mut self.graphs;
            lhs.compute_edge_intersections(rhs, precision, true)
        };

        debug!(
            tests = intersector.tests(),
            intersections = intersector.intersections(),
            "operands noded"
        );

        let mut split = Vec::new();
        self.graphs[0].compute_split_edges(&mut split);
        self.graphs[1].compute_split_edges(&mut split);
        debug!(edges = split.len(), "edges split");

        split
            .into_iter()
            .for_each(|edge| self.insert_unique_edge(edge));

        self.compute_labels_from_depths();

        let mut edges = self.replace_collapsed_edges();
        debug!(edges = edges.len(), "unique edges merged");

        if self.config.validate_noding {
            validate_noding(&mut edges)?;
        }

        self.label_isolated_edges(&mut edges);
        self.graph.add_edges(edges)?;

        self.compute_labelling()?;
        self.label_incomplete_nodes();

        self.find_result_area_edges(op);
        self.cancel_duplicate_result_edges();

        let mut builder = PolygonBuilder::default();
        builder.add(&mut self.graph)?;

        let areas = Geometry::MultiPolygon(builder.polygons());
        let lines = Geometry::MultiLineString(build_lines(&mut self.graph, &areas, op));
        let points = build_points(&self.graph, &lines, &areas, op);

        let (Geometry::MultiLineString(lines), Geometry::MultiPolygon(polygons)) = (lines, areas)
        else {
            return Err(Error::Assertion("result parts are not multi geometries"));
        };

        debug!(
            points = points.len(),
            lines = lines.len(),
            polygons = polygons.len(),
            "result built"
        );

        let [lhs, rhs] = self.operands();
        Ok(assemble(points, lines, polygons, || {
            empty_result(op, lhs.dimension(), rhs.dimension())
        }))
    }

    /// Adds the nodes of the given operand to the graph, keeping their location.
    fn copy_points(&mut self, index: usize) {
        for node in self.graphs[index].nodes().iter() {
            let id = self.graph.add_node(*node.coordinate());
            self.graph
                .node_mut(id)
                .set_label(index, node.label().location(index));
        }
    }

    /// Adds the given edge, unless an edge with the same points exists already, in which case
    /// the labels of both are merged and the depths they imply accumulated.
    fn insert_unique_edge(&mut self, edge: Edge<T>) {
        let Some(existing) = self
            .edges
            .find_equal_edge(&edge)
            .and_then(|index| self.edges.get_mut(index))
        else {
            self.edges.add(edge);
            return;
        };

        let (label, delta) = if existing.is_pointwise_equal(&edge) {
            (edge.label, edge.depth_delta)
        } else {
            (edge.label.flipped(), -edge.depth_delta)
        };

        if existing.depth.is_null() {
            existing.depth.add(&existing.label);
        }

        existing.depth.add(&label);
        existing.label.merge(&label);
        existing.depth_delta += delta;
    }

    /// Derives the side locations of merged edges from their accumulated depths.
    ///
    /// An edge whose sides have the same depth relative to an area lies inside or outside of
    /// it, so it becomes a line edge of that operand.
    fn compute_labels_from_depths(&mut self) {
        for edge in self.edges.iter_mut() {
            if edge.depth.is_null() {
                continue;
            }

            edge.depth.normalize();
            for index in 0..2 {
                if edge.label.is_null(index)
                    || !edge.label.is_area()
                    || edge.depth.is_null_of(index)
                {
                    continue;
                }

                if edge.depth.delta(index) == 0 {
                    edge.label.to_line(index);
                    continue;
                }

                for position in [Position::Left, Position::Right] {
                    let location = edge.depth.location(index, position);
                    edge.label.set_location_at(index, position, location);
                }
            }
        }
    }

    /// Takes the merged edges, turning the collapsed ones into lines.
    fn replace_collapsed_edges(&mut self) -> Vec<Edge<T>> {
        mem::take(&mut self.edges)
            .into_vec()
            .into_iter()
            .map(|edge| {
                if edge.is_collapsed() {
                    trace!(points = edge.points().len(), "collapsed edge replaced");
                    edge.collapsed_edge()
                } else {
                    edge
                }
            })
            .collect()
    }

    /// Locates the edges not intersecting the other operand relative to it.
    ///
    /// Such an edge can only lie inside an area of the other operand, since any other
    /// component it touched would have intersected it.
    fn label_isolated_edges(&self, edges: &mut [Edge<T>]) {
        let locator = PointLocator::new(self.config.boundary_rule);
        let operands = self.operands();

        for edge in edges.iter_mut().filter(|edge| edge.is_isolated()) {
            for (index, operand) in operands.into_iter().enumerate() {
                if !edge.label.is_null(index) {
                    continue;
                }

                let location = match (operand.dimension(), edge.points().first()) {
                    (Dimension::Surface, Some(point)) => locator.locate(point, operand),
                    _ => Location::Exterior,
                };

                edge.label.set_all_locations(index, location);
            }
        }
    }

    /// Labels every directed edge and node of the graph from the stars of the nodes.
    fn compute_labelling(&mut self) -> Result<()> {
        let operands = self.operands();
        let nodes: Vec<_> = self.graph.node_ids().collect();
        for node in nodes {
            self.graph.compute_labelling(node, operands)?;
        }

        self.graph.merge_sym_labels();
        Ok(())
    }

    /// Locates the nodes known by a single operand relative to the other one, and completes the
    /// labels of the edges around every node.
    fn label_incomplete_nodes(&mut self) {
        let locator = PointLocator::new(self.config.boundary_rule);
        let operands = self.operands();

        let nodes: Vec<_> = self.graph.node_ids().collect();
        for id in nodes {
            let node = self.graph.node(id);
            if node.is_isolated() {
                let target = if node.label().is_null(0) { 0 } else { 1 };
                let location = locator.locate(node.coordinate(), operands[target]);
                self.graph.node_mut(id).set_label(target, location);
            }

            self.graph.update_labelling(id);
        }
    }

    /// Marks the area directed edges having the result at their right side.
    fn find_result_area_edges(&mut self, op: OpCode) {
        let ids: Vec<_> = self.graph.directed_edge_ids().collect();
        for id in ids {
            let directed = self.graph.directed_edge(id);
            let label = directed.label();

            let in_result = label.is_area()
                && !directed.is_interior_area_edge()
                && op.is_result(
                    label.location_at(0, Position::Right),
                    label.location_at(1, Position::Right),
                );

            if in_result {
                self.graph.directed_edge_mut(id).in_result = true;
            }
        }
    }

    /// Drops both directions of any edge having the result at both sides.
    fn cancel_duplicate_result_edges(&mut self) {
        let ids: Vec<_> = self.graph.directed_edge_ids().collect();
        for id in ids {
            let sym = self.graph.sym(id);
            if self.graph.directed_edge(id).in_result && self.graph.directed_edge(sym).in_result {
                self.graph.directed_edge_mut(id).in_result = false;
                self.graph.directed_edge_mut(sym).in_result = false;
            }
        }
    }
}

/// Returns the geometry made of the given components, or the empty one if there are none.
///
/// A single component is returned as is, components of the same kind as the corresponding
/// multi geometry, and mixed ones as a collection.
pub(crate) fn assemble<T>(
    mut points: Vec<Coordinate<T>>,
    mut lines: Vec<Vec<Coordinate<T>>>,
    mut polygons: Vec<Polygon<T>>,
    empty: impl FnOnce() -> Geometry<T>,
) -> Geometry<T> {
    match (points.len(), lines.len(), polygons.len()) {
        (0, 0, 0) => empty(),
        (1, 0, 0) => Geometry::Point(points.remove(0)),
        (_, 0, 0) => Geometry::MultiPoint(points),
        (0, 1, 0) => Geometry::LineString(lines.remove(0)),
        (0, _, 0) => Geometry::MultiLineString(lines),
        (0, 0, 1) => Geometry::Polygon(polygons.remove(0)),
        (0, 0, _) => Geometry::MultiPolygon(polygons),
        _ => Geometry::Collection(
            points
                .into_iter()
                .map(Geometry::Point)
                .chain(lines.into_iter().map(Geometry::LineString))
                .chain(polygons.into_iter().map(Geometry::Polygon))
                .collect(),
        ),
    }
}

/// Returns the empty geometry standing for an empty result of the given operation.
pub(crate) fn empty_result<T>(op: OpCode, lhs: Dimension, rhs: Dimension) -> Geometry<T> {
    let dimension = match op {
        OpCode::Intersection => lhs.min(rhs),
        OpCode::Union | OpCode::SymDifference => lhs.max(rhs),
        OpCode::Difference => lhs,
    };

    match dimension {
        Dimension::False => Geometry::Collection(Vec::new()),
        Dimension::Point => Geometry::MultiPoint(Vec::new()),
        Dimension::Curve => Geometry::MultiLineString(Vec::new()),
        Dimension::Surface => Geometry::MultiPolygon(Vec::new()),
    }
}
