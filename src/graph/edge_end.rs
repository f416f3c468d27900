use std::cmp::Ordering;

use num_traits::Float;

use crate::{
    Coordinate, Error, Result,
    algorithm::determinant::{Orientation, orientation_index},
    graph::{EdgeId, Label, Quadrant},
};

/// The end of an edge at one of its nodes, pointing towards the rest of the edge.
#[derive(Debug, Clone)]
pub struct EdgeEnd<T> {
    pub(crate) edge: EdgeId,
    pub(crate) label: Label,
    p0: Coordinate<T>,
    p1: Coordinate<T>,
    dx: T,
    dy: T,
    quadrant: Quadrant,
}

impl<T> EdgeEnd<T>
where
    T: Float,
{
    /// Returns the end of the given edge at `p0`, pointing towards `p1`.
    pub fn new(edge: EdgeId, p0: Coordinate<T>, p1: Coordinate<T>, label: Label) -> Result<Self> {
        if p0 == p1 {
            return Err(Error::Assertion("edge end with identical endpoints found"));
        }

        let (dx, dy) = (p1.x - p0.x, p1.y - p0.y);
        Ok(Self {
            edge,
            label,
            p0,
            p1,
            dx,
            dy,
            quadrant: Quadrant::of(dx, dy)?,
        })
    }

    /// Returns the point where the edge end starts.
    pub fn coordinate(&self) -> &Coordinate<T> {
        &self.p0
    }

    /// Returns the point the edge end points to.
    pub fn directed_coordinate(&self) -> &Coordinate<T> {
        &self.p1
    }

    pub fn label(&self) -> &Label {
        &self.label
    }

    pub fn edge(&self) -> EdgeId {
        self.edge
    }

    pub fn dy(&self) -> T {
        self.dy
    }

    pub(crate) fn quadrant(&self) -> Quadrant {
        self.quadrant
    }

    /// Compares the direction of self and rhs.
    ///
    /// Directions are ordered counter-clockwise starting at the positive x axis, so the
    /// ordering is by quadrant first and then by relative orientation.
    pub fn compare_direction(&self, rhs: &Self) -> Ordering {
        if self.dx == rhs.dx && self.dy == rhs.dy {
            return Ordering::Equal;
        }

        match self.quadrant.cmp(&rhs.quadrant) {
            Ordering::Equal => match orientation_index(&rhs.p0, &rhs.p1, &self.p1) {
                Orientation::CounterClockwise => Ordering::Greater,
                Orientation::Clockwise => Ordering::Less,
                Orientation::Collinear => Ordering::Equal,
            },
            ordering => ordering,
        }
    }
}

/// A type embedding an [`EdgeEnd`].
pub trait AsEdgeEnd<T> {
    fn edge_end(&self) -> &EdgeEnd<T>;
}

impl<T> AsEdgeEnd<T> for EdgeEnd<T> {
    fn edge_end(&self) -> &EdgeEnd<T> {
        self
    }
}

impl<T, E> AsEdgeEnd<T> for &E
where
    E: AsEdgeEnd<T>,
{
    fn edge_end(&self) -> &EdgeEnd<T> {
        (**self).edge_end()
    }
}

/// Returns the position at which the given end has to be inserted in a star of ends sorted by
/// direction, after any other end with the same direction.
pub(crate) fn insertion_index<T, E>(star: &[E], end: &EdgeEnd<T>) -> usize
where
    T: Float,
    E: AsEdgeEnd<T>,
{
    star.partition_point(|other| {
        other.edge_end().compare_direction(end) != Ordering::Greater
    })
}

/// Returns the index of the rightmost end of a star sorted by direction.
///
/// Being the star sorted counter-clockwise, the rightmost end is either the first or the last
/// one, whichever is not horizontal.
pub(crate) fn rightmost_index<T, E>(star: &[E]) -> Result<usize>
where
    T: Float,
    E: AsEdgeEnd<T>,
{
    let (Some(first), Some(last)) = (star.first(), star.last()) else {
        return Err(Error::Assertion("rightmost edge of an empty star"));
    };

    if star.len() == 1 {
        return Ok(0);
    }

    let (first, last) = (first.edge_end(), last.edge_end());
    match (first.quadrant().is_northern(), last.quadrant().is_northern()) {
        (true, true) => return Ok(0),
        (false, false) => return Ok(star.len() - 1),
        _ => {}
    }

    if !first.dy().is_zero() {
        Ok(0)
    } else if !last.dy().is_zero() {
        Ok(star.len() - 1)
    } else {
        Err(Error::Assertion("found two horizontal edges incident on node"))
    }
}

#[cfg(test)]
mod tests {
    use std::cmp::Ordering;

    use crate::{
        Coordinate,
        graph::{EdgeId, Label, Location, edge_end::{EdgeEnd, insertion_index, rightmost_index}},
    };

    fn end(to: Coordinate<f64>) -> EdgeEnd<f64> {
        EdgeEnd::new(EdgeId(0), coord!(0., 0.), to, Label::line(Location::None))
            .expect("edge end should have a direction")
    }

    #[test]
    fn direction_ordering() {
        struct Test {
            name: &'static str,
            lhs: Coordinate<f64>,
            rhs: Coordinate<f64>,
            want: Ordering,
        }

        vec![
            Test {
                name: "same direction",
                lhs: coord!(1., 1.),
                rhs: coord!(2., 2.),
                want: Ordering::Equal,
            },
            Test {
                name: "earlier quadrant",
                lhs: coord!(1., 1.),
                rhs: coord!(-1., 1.),
                want: Ordering::Less,
            },
            Test {
                name: "counter-clockwise within the same quadrant",
                lhs: coord!(1., 2.),
                rhs: coord!(2., 1.),
                want: Ordering::Greater,
            },
            Test {
                name: "south east comes last",
                lhs: coord!(1., -1.),
                rhs: coord!(-1., -1.),
                want: Ordering::Greater,
            },
        ]
        .into_iter()
        .for_each(|test| {
            let got = end(test.lhs).compare_direction(&end(test.rhs));
            assert_eq!(got, test.want, "{}", test.name);
        });
    }

    #[test]
    fn null_edge_end() {
        let got = EdgeEnd::new(
            EdgeId(0),
            coord!(1., 1.),
            coord!(1., 1.),
            Label::line(Location::None),
        );

        assert!(got.is_err());
    }

    #[test]
    fn sorted_star() {
        let mut star = Vec::new();
        [coord!(1., -1.), coord!(-1., 0.), coord!(1., 0.), coord!(0., 1.)]
            .into_iter()
            .for_each(|to| {
                let end = end(to);
                let index = insertion_index(&star, &end);
                star.insert(index, end);
            });

        let got: Vec<_> = star.iter().map(|end| *end.directed_coordinate()).collect();
        let want = vec![coord!(1., 0.), coord!(0., 1.), coord!(-1., 0.), coord!(1., -1.)];
        assert_eq!(got, want);

        // first is horizontal, last is southern
        assert_eq!(rightmost_index(&star), Ok(3));
    }
}
