use num_traits::Float;
use tracing::debug;

use crate::{
    Error, Polygon, Result,
    graph::PlanarGraph,
    overlay::ring::{EdgeRing, RingKind},
};

/// Assembles the polygons of the result out of the result area edges of a graph.
#[derive(Debug)]
pub(crate) struct PolygonBuilder<T> {
    shells: Vec<EdgeRing<T>>,
    holes: Vec<EdgeRing<T>>,
    /// The id of the next minimal ring to build.
    next_minimal: usize,
}

impl<T> Default for PolygonBuilder<T> {
    fn default() -> Self {
        Self {
            shells: Vec::new(),
            holes: Vec::new(),
            next_minimal: 0,
        }
    }
}

impl<T> PolygonBuilder<T>
where
    T: Float,
{
    /// Builds the rings made of the result area edges of the graph.
    pub(crate) fn add(&mut self, graph: &mut PlanarGraph<T>) -> Result<()> {
        graph.link_result_directed_edges()?;

        let maximal = build_maximal_rings(graph)?;
        debug!(maximal = maximal.len(), "maximal rings built");

        let mut free_holes = Vec::new();
        for ring in maximal {
            if ring.max_node_degree(graph) <= 2 {
                self.sort_ring(ring, &mut free_holes);
                continue;
            }

            let minimal = ring.minimal_rings(graph, &mut self.next_minimal)?;
            self.place_minimal_rings(minimal, &mut free_holes)?;
        }

        free_holes
            .into_iter()
            .try_for_each(|hole| self.place_free_hole(hole))
    }

    fn sort_ring(&mut self, ring: EdgeRing<T>, free_holes: &mut Vec<EdgeRing<T>>) {
        if ring.is_hole() {
            free_holes.push(ring);
        } else {
            self.shells.push(ring);
        }
    }

    /// Takes the rings a maximal ring splits into, which have at most one shell. Without a
    /// shell, all of them are holes whose shell is somewhere else.
    fn place_minimal_rings(
        &mut self,
        rings: Vec<EdgeRing<T>>,
        free_holes: &mut Vec<EdgeRing<T>>,
    ) -> Result<()> {
        let (shells, holes): (Vec<_>, Vec<_>) =
            rings.into_iter().partition(|ring| !ring.is_hole());

        let mut shells = shells.into_iter();
        let Some(shell) = shells.next() else {
            free_holes.extend(holes);
            return Ok(());
        };

        if shells.next().is_some() {
            return Err(Error::topology(
                "found two shells in the same minimal ring list",
                &shell.points()[0],
            ));
        }

        let index = self.shells.len();
        self.shells.push(shell);
        self.holes.extend(holes.into_iter().map(|mut hole| {
            hole.shell = Some(index);
            hole
        }));

        Ok(())
    }

    /// Assigns the given hole to the smallest shell containing it.
    fn place_free_hole(&mut self, mut hole: EdgeRing<T>) -> Result<()> {
        let mut smallest: Option<usize> = None;
        for (index, shell) in self.shells.iter().enumerate() {
            if !shell.contains_ring(&hole) {
                continue;
            }

            let is_smaller = smallest
                .is_none_or(|current| self.shells[current].envelope().contains(shell.envelope()));

            if is_smaller {
                smallest = Some(index);
            }
        }

        let Some(index) = smallest else {
            return Err(Error::topology(
                "unable to assign hole to a shell",
                &hole.points()[0],
            ));
        };

        hole.shell = Some(index);
        self.holes.push(hole);
        Ok(())
    }

    /// Returns the polygons made of every shell together with its holes.
    pub(crate) fn polygons(self) -> Vec<Polygon<T>> {
        let mut polygons: Vec<_> = self
            .shells
            .into_iter()
            .map(|shell| Polygon::new(shell.into_points(), Vec::new()))
            .collect();

        for hole in self.holes {
            if let Some(polygon) = hole.shell.and_then(|index| polygons.get_mut(index)) {
                polygon.holes.push(hole.into_points());
            }
        }

        polygons
    }
}

/// Builds a ring out of every result area edge not in a ring yet.
fn build_maximal_rings<T>(graph: &mut PlanarGraph<T>) -> Result<Vec<EdgeRing<T>>>
where
    T: Float,
{
    let ids: Vec<_> = graph.directed_edge_ids().collect();

    let mut rings = Vec::new();
    for id in ids {
        let directed = graph.directed_edge(id);
        if !directed.in_result || !directed.label().is_area() || directed.edge_ring.is_some() {
            continue;
        }

        let ring = EdgeRing::build(graph, id, RingKind::Maximal, rings.len())?;
        ring.set_in_result(graph);
        rings.push(ring);
    }

    Ok(rings)
}

#[cfg(test)]
mod tests {
    use crate::{
        Coordinate,
        graph::{Edge, Label, Location, PlanarGraph, Position},
        overlay::polygon_builder::PolygonBuilder,
    };

    fn area(points: Vec<Coordinate<f64>>, left: Location, right: Location) -> Edge<f64> {
        Edge::new(points, Label::area_of(0, Location::Boundary, left, right))
    }

    /// Returns the graph of the given edges having in the result every directed edge with the
    /// interior at its right.
    fn graph(edges: Vec<Edge<f64>>) -> PlanarGraph<f64> {
        let mut graph = PlanarGraph::default();
        graph.add_edges(edges).expect("edges should be valid");

        let ids: Vec<_> = graph.directed_edge_ids().collect();
        for id in ids {
            let directed = graph.directed_edge_mut(id);
            let right = directed.label().location_at(0, Position::Right);
            directed.in_result = right == Location::Interior;
        }

        graph
    }

    #[test]
    fn polygons_from_rings() {
        struct Test {
            name: &'static str,
            edges: Vec<Edge<f64>>,
            want: Vec<(usize, usize)>,
        }

        vec![
            Test {
                name: "single shell",
                edges: vec![area(
                    vec![
                        coord!(0., 0.),
                        coord!(0., 1.),
                        coord!(1., 1.),
                        coord!(1., 0.),
                        coord!(0., 0.),
                    ],
                    Location::Exterior,
                    Location::Interior,
                )],
                want: vec![(5, 0)],
            },
            Test {
                name: "shell with a free hole",
                edges: vec![
                    area(
                        vec![
                            coord!(0., 0.),
                            coord!(0., 4.),
                            coord!(4., 4.),
                            coord!(4., 0.),
                            coord!(0., 0.),
                        ],
                        Location::Exterior,
                        Location::Interior,
                    ),
                    area(
                        vec![
                            coord!(1., 1.),
                            coord!(2., 1.),
                            coord!(2., 2.),
                            coord!(1., 2.),
                            coord!(1., 1.),
                        ],
                        Location::Exterior,
                        Location::Interior,
                    ),
                ],
                want: vec![(5, 1)],
            },
            Test {
                name: "two shells touching at a node",
                edges: vec![
                    area(
                        vec![
                            coord!(1., 1.),
                            coord!(0., 1.),
                            coord!(0., 0.),
                            coord!(1., 0.),
                            coord!(1., 1.),
                        ],
                        Location::Interior,
                        Location::Exterior,
                    ),
                    area(
                        vec![
                            coord!(1., 1.),
                            coord!(2., 1.),
                            coord!(2., 2.),
                            coord!(1., 2.),
                            coord!(1., 1.),
                        ],
                        Location::Interior,
                        Location::Exterior,
                    ),
                ],
                want: vec![(5, 0), (5, 0)],
            },
        ]
        .into_iter()
        .for_each(|test| {
            let mut graph = graph(test.edges);

            let mut builder = PolygonBuilder::default();
            builder.add(&mut graph).expect("rings should be built");

            let mut got: Vec<_> = builder
                .polygons()
                .iter()
                .map(|polygon| (polygon.shell.len(), polygon.holes.len()))
                .collect();

            got.sort();
            assert_eq!(got, test.want, "{}", test.name);
        });
    }
}
