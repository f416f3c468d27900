use num_traits::Float;

use crate::{Coordinate, algorithm::determinant::sign_of_det2x2, graph::Location};

/// Counts the crossings of a horizontal ray, cast from a point towards positive x, with the
/// segments of a ring.
///
/// Upward segments include their start and exclude their end, downward segments the other way
/// around, so a vertex the ray goes through is never counted twice.
#[derive(Debug, Clone)]
pub struct RayCrossingCounter<T> {
    point: Coordinate<T>,
    crossings: usize,
    on_segment: bool,
}

impl<T> RayCrossingCounter<T>
where
    T: Float,
{
    /// Returns a counter for rays cast from the given point.
    pub fn new(point: Coordinate<T>) -> Self {
        Self {
            point,
            crossings: 0,
            on_segment: false,
        }
    }

    /// Counts the segment `p1 p2` if the ray crosses it.
    pub fn count_segment(&mut self, p1: &Coordinate<T>, p2: &Coordinate<T>) {
        let point = &self.point;

        // the segment is entirely to the left of the point
        if p1.x < point.x && p2.x < point.x {
            return;
        }

        if point == p2 {
            self.on_segment = true;
            return;
        }

        if p1.y == point.y && p2.y == point.y {
            let min_x = p1.x.min(p2.x);
            let max_x = p1.x.max(p2.x);
            if point.x >= min_x && point.x <= max_x {
                self.on_segment = true;
            }

            return;
        }

        if (p1.y > point.y && p2.y <= point.y) || (p2.y > point.y && p1.y <= point.y) {
            let mut sign = sign_of_det2x2(
                p1.x - point.x,
                p1.y - point.y,
                p2.x - point.x,
                p2.y - point.y,
            );

            if sign == 0 {
                self.on_segment = true;
                return;
            }

            if p2.y < p1.y {
                sign = -sign;
            }

            if sign > 0 {
                self.crossings += 1;
            }
        }
    }

    /// Returns true if, and only if, the point has been found on some counted segment.
    ///
    /// Once true, no further segment can change the location of the point.
    pub fn is_on_segment(&self) -> bool {
        self.on_segment
    }

    /// Returns the location of the point relative to the ring made of the counted segments.
    pub fn location(&self) -> Location {
        if self.on_segment {
            Location::Boundary
        } else if self.crossings % 2 == 1 {
            Location::Interior
        } else {
            Location::Exterior
        }
    }
}

/// Returns the location of the given point relative to the closed ring.
pub fn locate_point_in_ring<T>(point: &Coordinate<T>, ring: &[Coordinate<T>]) -> Location
where
    T: Float,
{
    let mut counter = RayCrossingCounter::new(*point);
    for segment in ring.windows(2) {
        counter.count_segment(&segment[1], &segment[0]);
        if counter.is_on_segment() {
            break;
        }
    }

    counter.location()
}

/// Returns true if, and only if, the point lies inside or on the border of the closed ring.
pub fn is_point_in_ring<T>(point: &Coordinate<T>, ring: &[Coordinate<T>]) -> bool
where
    T: Float,
{
    !matches!(locate_point_in_ring(point, ring), Location::Exterior)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::{
        Coordinate,
        algorithm::ray_crossing::locate_point_in_ring,
        graph::Location,
    };

    fn square() -> Vec<Coordinate<f64>> {
        vec![
            coord!(0., 0.),
            coord!(0., 10.),
            coord!(10., 10.),
            coord!(10., 0.),
            coord!(0., 0.),
        ]
    }

    fn notched() -> Vec<Coordinate<f64>> {
        vec![
            coord!(0., 0.),
            coord!(0., 10.),
            coord!(5., 5.),
            coord!(10., 10.),
            coord!(10., 0.),
            coord!(0., 0.),
        ]
    }

    #[test]
    fn point_in_ring() {
        struct Test {
            name: &'static str,
            point: Coordinate<f64>,
            ring: Vec<Coordinate<f64>>,
            want: Location,
        }

        vec![
            Test {
                name: "interior point",
                point: coord!(5., 5.),
                ring: square(),
                want: Location::Interior,
            },
            Test {
                name: "exterior point",
                point: coord!(15., 5.),
                ring: square(),
                want: Location::Exterior,
            },
            Test {
                name: "vertex of the ring",
                point: coord!(10., 10.),
                ring: square(),
                want: Location::Boundary,
            },
            Test {
                name: "point on a horizontal segment",
                point: coord!(5., 10.),
                ring: square(),
                want: Location::Boundary,
            },
            Test {
                name: "point on a vertical segment",
                point: coord!(0., 5.),
                ring: square(),
                want: Location::Boundary,
            },
            Test {
                name: "ray through a reflex vertex",
                point: coord!(2., 5.),
                ring: notched(),
                want: Location::Interior,
            },
            Test {
                name: "point inside the notch",
                point: coord!(5., 8.),
                ring: notched(),
                want: Location::Exterior,
            },
            Test {
                name: "ray through a convex vertex",
                point: coord!(-5., 10.),
                ring: square(),
                want: Location::Exterior,
            },
        ]
        .into_iter()
        .for_each(|test| {
            let got = locate_point_in_ring(&test.point, &test.ring);
            assert_eq!(got, test.want, "{}", test.name);
        });
    }

    proptest! {
        #[test]
        fn location_is_invariant_under_ring_rotation(
            shift in 0usize..5,
            x in -2.0f64..12.,
            y in -2.0f64..12.,
        ) {
            let ring = notched();
            let open = &ring[..ring.len() - 1];

            let mut rotated: Vec<_> = open[shift..].iter().chain(&open[..shift]).copied().collect();
            rotated.push(rotated[0]);

            let point = coord!(x, y);
            prop_assert_eq!(
                locate_point_in_ring(&point, &rotated),
                locate_point_in_ring(&point, &ring)
            );
        }
    }
}
