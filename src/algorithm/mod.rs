//! Robust geometric predicates and point location.

mod boundary_rule;
pub mod determinant;
mod hcoordinate;
pub mod intersector;
mod locator;
pub mod ray_crossing;

pub use self::boundary_rule::BoundaryNodeRule;
pub(crate) use self::boundary_rule::determine_boundary;
pub use self::locator::PointLocator;
pub(crate) use self::locator::locate_in_area;

use num_traits::Float;

use crate::{
    Coordinate, Error, Result,
    algorithm::determinant::{Orientation, orientation_index},
};

/// Returns true if, and only if, the given closed ring is oriented counter-clockwise.
///
/// The orientation is decided at the highest point of the ring, which makes the test robust
/// for rings with self-touching or collinear vertices. Fails if the ring has fewer than three
/// distinct points.
pub fn is_ccw<T>(ring: &[Coordinate<T>]) -> Result<bool>
where
    T: Float,
{
    // the closing point is not part of the ring
    let points = ring.len().saturating_sub(1);
    if points < 3 {
        return Err(Error::TooFewPoints {
            got: ring.len(),
            want: 4,
        });
    }

    let (highest, _) = ring[1..=points]
        .iter()
        .enumerate()
        .fold((0, &ring[0]), |(index, max), (offset, point)| {
            if point.y > max.y {
                (offset + 1, point)
            } else {
                (index, max)
            }
        });

    let high = &ring[highest];

    let mut prev = highest;
    loop {
        prev = if prev == 0 { points - 1 } else { prev - 1 };
        if ring[prev] != *high || prev == highest {
            break;
        }
    }

    let mut next = highest;
    loop {
        next = (next + 1) % points;
        if ring[next] != *high || next == highest {
            break;
        }
    }

    let (prev, next) = (&ring[prev], &ring[next]);

    // a flat ring folding back onto itself has no orientation
    if prev == high || next == high || prev == next {
        return Err(Error::Assertion(
            "degenerate ring with less than three distinct points",
        ));
    }

    Ok(match orientation_index(prev, high, next) {
        Orientation::Collinear => prev.x > next.x,
        orientation => orientation == Orientation::CounterClockwise,
    })
}
