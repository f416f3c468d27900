use std::mem;

use num_traits::Float;

use crate::Coordinate;

/// The orientation of a point relative to a directed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// The point lies to the right of the line.
    Clockwise,
    /// The point lies on the line.
    Collinear,
    /// The point lies to the left of the line.
    CounterClockwise,
}

impl From<i8> for Orientation {
    fn from(sign: i8) -> Self {
        match sign {
            s if s > 0 => Self::CounterClockwise,
            s if s < 0 => Self::Clockwise,
            _ => Self::Collinear,
        }
    }
}

impl<T> From<[&Coordinate<T>; 3]> for Orientation
where
    T: Float,
{
    /// Being `A`, `B` and `C` the given coordinates, returns the orientation of `C` relative to
    /// the directed line `AB`.
    fn from([a, b, c]: [&Coordinate<T>; 3]) -> Self {
        sign_of_det2x2(b.x - a.x, b.y - a.y, c.x - b.x, c.y - b.y).into()
    }
}

impl Orientation {
    /// Returns true if, and only if, self is [`Orientation::Collinear`].
    pub fn is_collinear(&self) -> bool {
        matches!(self, Self::Collinear)
    }

    /// Returns true if, and only if, self and rhs are the same non-collinear orientation.
    pub(crate) fn is_same_side(&self, rhs: &Self) -> bool {
        !self.is_collinear() && self == rhs
    }
}

/// Returns the orientation of `q` relative to the directed line from `p1` to `p2`.
pub fn orientation_index<T>(p1: &Coordinate<T>, p2: &Coordinate<T>, q: &Coordinate<T>) -> Orientation
where
    T: Float,
{
    Orientation::from([p1, p2, q])
}

/// Returns the sign of the determinant of the matrix `[[x1, y1], [x2, y2]]`.
///
/// The sign is computed without evaluating the determinant itself, by the method of Avnaim,
/// Boissonnat, Devillers, Preparata and Yvinec, so it is not affected by cancellation.
/// Non-finite entries fall back to the sign of the direct product.
pub fn sign_of_det2x2<T>(x1: T, y1: T, x2: T, y2: T) -> i8
where
    T: Float,
{
    if !(x1.is_finite() && y1.is_finite() && x2.is_finite() && y2.is_finite()) {
        let det = x1 * y2 - y1 * x2;
        return if det > T::zero() {
            1
        } else if det < T::zero() {
            -1
        } else {
            0
        };
    }

    let zero = T::zero();
    let (mut x1, mut y1, mut x2, mut y2) = (x1, y1, x2, y2);
    let mut sign: i8 = 1;

    // null entries
    if x1 == zero || y2 == zero {
        if y1 == zero || x2 == zero {
            return 0;
        }

        return if (y1 > zero) == (x2 > zero) { -sign } else { sign };
    }

    if y1 == zero || x2 == zero {
        return if (y2 > zero) == (x1 > zero) { sign } else { -sign };
    }

    // make the ordinates positive, permuting the rows if necessary
    if zero < y1 {
        if zero < y2 {
            if y1 > y2 {
                sign = -sign;
                mem::swap(&mut x1, &mut x2);
                mem::swap(&mut y1, &mut y2);
            }
        } else if y1 <= -y2 {
            sign = -sign;
            x2 = -x2;
            y2 = -y2;
        } else {
            (x1, x2) = (-x2, x1);
            (y1, y2) = (-y2, y1);
        }
    } else if zero < y2 {
        if -y1 <= y2 {
            sign = -sign;
            x1 = -x1;
            y1 = -y1;
        } else {
            (x1, x2) = (x2, -x1);
            (y1, y2) = (y2, -y1);
        }
    } else if y1 >= y2 {
        x1 = -x1;
        y1 = -y1;
        x2 = -x2;
        y2 = -y2;
    } else {
        sign = -sign;
        (x1, x2) = (-x2, -x1);
        (y1, y2) = (-y2, -y1);
    }

    // make the abscissas positive, or decide the sign right away
    if zero < x1 {
        if zero < x2 {
            if x1 > x2 {
                return sign;
            }
        } else {
            return sign;
        }
    } else if zero < x2 {
        return -sign;
    } else if x1 >= x2 {
        sign = -sign;
        x1 = -x1;
        x2 = -x2;
    } else {
        return -sign;
    }

    // all entries are strictly positive, x1 <= x2 and y1 <= y2
    loop {
        let k = (x2 / x1).floor();
        x2 = x2 - k * x1;
        y2 = y2 - k * y1;

        if y2 < zero {
            return -sign;
        }

        if y2 > y1 {
            return sign;
        }

        if x1 > x2 + x2 {
            if y1 < y2 + y2 {
                return sign;
            }
        } else if y1 > y2 + y2 {
            return -sign;
        } else {
            x2 = x1 - x2;
            y2 = y1 - y2;
            sign = -sign;
        }

        if y2 == zero {
            return if x2 == zero { 0 } else { -sign };
        }

        if x2 == zero {
            return sign;
        }

        let k = (x1 / x2).floor();
        x1 = x1 - k * x2;
        y1 = y1 - k * y2;

        if y1 < zero {
            return sign;
        }

        if y1 > y2 {
            return -sign;
        }

        if x2 > x1 + x1 {
            if y2 < y1 + y1 {
                return -sign;
            }
        } else if y2 > y1 + y1 {
            return sign;
        } else {
            x1 = x2 - x1;
            y1 = y2 - y1;
            sign = -sign;
        }

        if y1 == zero {
            return if x1 == zero { 0 } else { sign };
        }

        if x1 == zero {
            return -sign;
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::{
        Coordinate,
        algorithm::determinant::{Orientation, sign_of_det2x2},
    };

    #[test]
    fn orientation_of_points() {
        struct Test {
            name: &'static str,
            points: [Coordinate<f64>; 3],
            want: Orientation,
        }

        vec![
            Test {
                name: "clockwise points",
                points: [[0., 1.].into(), [0., 0.].into(), [-1., 0.].into()],
                want: Orientation::Clockwise,
            },
            Test {
                name: "counter-clockwise points",
                points: [[0., 1.].into(), [0., 0.].into(), [1., 0.].into()],
                want: Orientation::CounterClockwise,
            },
            Test {
                name: "collinear points",
                points: [[4., 4.].into(), [2., 2.].into(), [0., 0.].into()],
                want: Orientation::Collinear,
            },
            Test {
                name: "nearly collinear points far from the origin",
                points: [
                    [1e15, 1e15].into(),
                    [1e15 + 2., 1e15 + 2.].into(),
                    [1e15 + 4., 1e15 + 4.].into(),
                ],
                want: Orientation::Collinear,
            },
        ]
        .into_iter()
        .for_each(|test| {
            let [a, b, c] = test.points;
            let got = Orientation::from([&a, &b, &c]);

            assert_eq!(got, test.want, "{}", test.name);
        });
    }

    proptest! {
        #[test]
        fn sign_matches_small_integer_determinants(
            x1 in -50i32..50,
            y1 in -50i32..50,
            x2 in -50i32..50,
            y2 in -50i32..50,
        ) {
            let det = x1 * y2 - y1 * x2;
            let got = sign_of_det2x2(x1 as f64, y1 as f64, x2 as f64, y2 as f64);
            prop_assert_eq!(got, det.signum() as i8);
        }
    }
}
