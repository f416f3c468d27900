use num_traits::Float;

use crate::{
    Coordinate, Geometry, Result,
    algorithm::{BoundaryNodeRule, determine_boundary},
    graph::{AsEdgeEnd, EdgeEnd, Label, Location, Position, label_edge_ends},
    relate::IntersectionMatrix,
};

/// All the edge ends leaving a node in the same direction.
#[derive(Debug, Clone)]
pub struct EdgeEndBundle<T = f64> {
    /// The first end of the bundle, holding the label of the whole bundle.
    end: EdgeEnd<T>,
    ends: Vec<EdgeEnd<T>>,
}

impl<T> AsEdgeEnd<T> for EdgeEndBundle<T> {
    fn edge_end(&self) -> &EdgeEnd<T> {
        &self.end
    }
}

impl<T> EdgeEndBundle<T>
where
    T: Float,
{
    pub fn new(end: EdgeEnd<T>) -> Self {
        Self {
            end: end.clone(),
            ends: vec![end],
        }
    }

    pub fn insert(&mut self, end: EdgeEnd<T>) {
        self.ends.push(end);
    }

    pub fn ends(&self) -> &[EdgeEnd<T>] {
        &self.ends
    }

    pub fn label(&self) -> &Label {
        &self.end.label
    }

    /// Merges the labels of every end in the bundle into the label of the bundle.
    ///
    /// The bundle is an area edge if any of its ends is. Being on the boundary of an operand
    /// takes precedence over being in its interior, and the boundary location is resolved by
    /// counting how many ends say so.
    pub fn compute_label(&mut self, rule: &BoundaryNodeRule) {
        let is_area = self.ends.iter().any(|end| end.label().is_area());

        let mut label = if is_area {
            Label::area(Location::None, Location::None, Location::None)
        } else {
            Label::line(Location::None)
        };

        for index in 0..2 {
            label.set_location(index, self.location_on(index, rule));
            if is_area {
                for position in [Position::Left, Position::Right] {
                    label.set_location_at(index, position, self.location_at(index, position));
                }
            }
        }

        self.end.label = label;
    }

    fn location_on(&self, index: usize, rule: &BoundaryNodeRule) -> Location {
        let boundaries = self
            .ends
            .iter()
            .filter(|end| end.label().location(index) == Location::Boundary)
            .count();

        if boundaries > 0 {
            determine_boundary(rule, boundaries)
        } else if self
            .ends
            .iter()
            .any(|end| end.label().location(index) == Location::Interior)
        {
            Location::Interior
        } else {
            Location::None
        }
    }

    /// Returns the location at the given side, being interior if any area end says so.
    fn location_at(&self, index: usize, position: Position) -> Location {
        self.ends
            .iter()
            .filter(|end| end.label().is_area())
            .map(|end| end.label().location_at(index, position))
            .fold(Location::None, |location, other| match (location, other) {
                (Location::Interior, _) | (_, Location::Interior) => Location::Interior,
                (_, Location::Exterior) => Location::Exterior,
                (location, _) => location,
            })
    }

    pub fn update_im(&self, matrix: &mut IntersectionMatrix) {
        matrix.update_with_label(self.label());
    }
}

/// Inserts the given end into the star of bundles sorted by direction, bundling it with the
/// ends already there in the same direction.
pub(crate) fn insert_edge_end<T>(star: &mut Vec<EdgeEndBundle<T>>, end: EdgeEnd<T>)
where
    T: Float,
{
    match star.binary_search_by(|bundle| bundle.end.compare_direction(&end)) {
        Ok(index) => star[index].insert(end),
        Err(index) => star.insert(index, EdgeEndBundle::new(end)),
    }
}

/// Labels every bundle in the star of the node at `at`.
pub(crate) fn label_bundles<T>(
    star: &mut [EdgeEndBundle<T>],
    at: &Coordinate<T>,
    operands: [&Geometry<T>; 2],
    rule: &BoundaryNodeRule,
) -> Result<()>
where
    T: Float,
{
    star.iter_mut().for_each(|bundle| bundle.compute_label(rule));

    let mut labels: Vec<_> = star.iter().map(|bundle| *bundle.label()).collect();
    label_edge_ends(&mut labels, at, operands)?;

    star.iter_mut()
        .zip(labels)
        .for_each(|(bundle, label)| bundle.end.label = label);

    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::{
        algorithm::BoundaryNodeRule,
        graph::{AsEdgeEnd, EdgeEnd, EdgeId, Label, Location, Position},
        relate::bundle::{EdgeEndBundle, insert_edge_end},
    };

    fn end(to: crate::Coordinate<f64>, label: Label) -> EdgeEnd<f64> {
        EdgeEnd::new(EdgeId(0), coord!(0., 0.), to, label).expect("end should have a direction")
    }

    #[test]
    fn bundle_labels() {
        struct Test {
            name: &'static str,
            labels: Vec<Label>,
            rule: BoundaryNodeRule,
            want: Label,
        }

        vec![
            Test {
                name: "single line end",
                labels: vec![Label::line_of(0, Location::Interior)],
                rule: BoundaryNodeRule::Mod2,
                want: Label::line_of(0, Location::Interior),
            },
            Test {
                name: "two boundary ends cancel out",
                labels: vec![
                    Label::line_of(0, Location::Boundary),
                    Label::line_of(0, Location::Boundary),
                ],
                rule: BoundaryNodeRule::Mod2,
                want: Label::line_of(0, Location::Interior),
            },
            Test {
                name: "two boundary ends under the endpoint rule",
                labels: vec![
                    Label::line_of(0, Location::Boundary),
                    Label::line_of(0, Location::Boundary),
                ],
                rule: BoundaryNodeRule::Endpoint,
                want: Label::line_of(0, Location::Boundary),
            },
            Test {
                name: "boundary wins over interior",
                labels: vec![
                    Label::line_of(0, Location::Interior),
                    Label::line_of(0, Location::Boundary),
                ],
                rule: BoundaryNodeRule::Mod2,
                want: Label::line_of(0, Location::Boundary),
            },
            Test {
                name: "area and line ends",
                labels: vec![
                    Label::area_of(0, Location::Boundary, Location::Exterior, Location::Interior),
                    Label::line_of(1, Location::Interior),
                ],
                rule: BoundaryNodeRule::Mod2,
                want: {
                    let mut label = Label::area(Location::None, Location::None, Location::None);
                    label.set_location(0, Location::Boundary);
                    label.set_location_at(0, Position::Left, Location::Exterior);
                    label.set_location_at(0, Position::Right, Location::Interior);
                    label.set_location(1, Location::Interior);
                    label
                },
            },
        ]
        .into_iter()
        .for_each(|test| {
            let mut ends = test.labels.into_iter().map(|label| end(coord!(1., 1.), label));
            let mut bundle = EdgeEndBundle::new(ends.next().expect("at least one end"));
            ends.for_each(|end| bundle.insert(end));

            bundle.compute_label(&test.rule);
            assert_eq!(bundle.label(), &test.want, "{}", test.name);
        });
    }

    #[test]
    fn ends_bundle_by_direction() {
        let label = Label::line_of(0, Location::Interior);

        let mut star = Vec::new();
        insert_edge_end(&mut star, end(coord!(0., 1.), label));
        insert_edge_end(&mut star, end(coord!(1., 0.), label));
        insert_edge_end(&mut star, end(coord!(0., 2.), label));
        insert_edge_end(&mut star, end(coord!(-1., -1.), label));

        let got: Vec<_> = star
            .iter()
            .map(|bundle| (*bundle.edge_end().directed_coordinate(), bundle.ends().len()))
            .collect();

        assert_eq!(
            got,
            vec![
                (coord!(1., 0.), 1),
                (coord!(0., 1.), 2),
                (coord!(-1., -1.), 1)
            ]
        );
    }
}
