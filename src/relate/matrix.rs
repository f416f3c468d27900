use std::{fmt, str::FromStr};

use crate::{
    Dimension, Error, Result,
    graph::{Label, Location, Position},
};

/// Returns the row or column of the matrix for the given location.
fn cell(location: Location) -> Option<usize> {
    match location {
        Location::Interior => Some(0),
        Location::Boundary => Some(1),
        Location::Exterior => Some(2),
        Location::None => None,
    }
}

/// Returns the dimension represented by the given symbol, if any.
fn dimension_of(symbol: char) -> Option<Dimension> {
    match symbol {
        'F' | 'f' => Some(Dimension::False),
        '0' => Some(Dimension::Point),
        '1' => Some(Dimension::Curve),
        '2' => Some(Dimension::Surface),
        _ => None,
    }
}

/// Returns true if, and only if, the given dimension satisfies the given pattern symbol.
fn matches_symbol(actual: Dimension, symbol: char) -> Result<bool> {
    match symbol {
        '*' => Ok(true),
        'T' | 't' => Ok(actual != Dimension::False),
        _ => dimension_of(symbol)
            .map(|required| actual == required)
            .ok_or_else(|| Error::InvalidPattern(symbol.to_string())),
    }
}

/// The dimensionally extended nine-intersection matrix (DE-9IM) of two geometries.
///
/// Rows stand for the interior, boundary and exterior of the first geometry, and columns for
/// the ones of the second. Each cell holds the dimension of the intersection between the
/// corresponding parts.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IntersectionMatrix {
    matrix: [[Dimension; 3]; 3],
}

impl fmt::Display for IntersectionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.matrix
            .iter()
            .flatten()
            .try_for_each(|dimension| write!(f, "{dimension}"))
    }
}

impl FromStr for IntersectionMatrix {
    type Err = Error;

    /// Parses a matrix from its nine symbols, row by row.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidPattern(s.to_string());

        let symbols: Vec<_> = s.chars().collect();
        if symbols.len() != 9 {
            return Err(invalid());
        }

        let mut matrix = Self::default();
        for (index, symbol) in symbols.into_iter().enumerate() {
            matrix.matrix[index / 3][index % 3] = dimension_of(symbol).ok_or_else(invalid)?;
        }

        Ok(matrix)
    }
}

impl IntersectionMatrix {
    /// Returns the dimension of the intersection between the given parts of both geometries.
    ///
    /// Unknown locations intersect nothing.
    pub fn get(&self, row: Location, column: Location) -> Dimension {
        match (cell(row), cell(column)) {
            (Some(row), Some(column)) => self.matrix[row][column],
            _ => Dimension::False,
        }
    }

    pub fn set(&mut self, row: Location, column: Location, dimension: Dimension) {
        if let (Some(row), Some(column)) = (cell(row), cell(column)) {
            self.matrix[row][column] = dimension;
        }
    }

    /// Raises the dimension of the given cell to, at least, the given one.
    pub fn set_at_least(&mut self, row: Location, column: Location, dimension: Dimension) {
        if let (Some(row), Some(column)) = (cell(row), cell(column)) {
            let current = &mut self.matrix[row][column];
            *current = (*current).max(dimension);
        }
    }

    /// Raises the dimension of the given cell, unless any of the locations is unknown.
    pub fn set_at_least_if_valid(&mut self, row: Location, column: Location, dimension: Dimension) {
        if row.is_known() && column.is_known() {
            self.set_at_least(row, column, dimension);
        }
    }

    /// Raises every cell to, at least, the corresponding one of the given matrix.
    pub fn set_at_least_all(&mut self, other: &Self) {
        self.matrix
            .iter_mut()
            .flatten()
            .zip(other.matrix.iter().flatten())
            .for_each(|(current, other)| *current = (*current).max(*other));
    }

    /// Sets every cell to the given dimension.
    pub fn set_all(&mut self, dimension: Dimension) {
        self.matrix = [[dimension; 3]; 3];
    }

    /// Folds what the given label says about both geometries into the matrix.
    ///
    /// The locations at the label itself are a line shared by both parts, while the ones at
    /// its sides are an area shared by both parts, if any of the geometries is an area.
    pub fn update_with_label(&mut self, label: &Label) {
        self.set_at_least_if_valid(label.location(0), label.location(1), Dimension::Curve);

        if label.is_area() {
            for position in [Position::Left, Position::Right] {
                self.set_at_least_if_valid(
                    label.location_at(0, position),
                    label.location_at(1, position),
                    Dimension::Surface,
                );
            }
        }
    }

    /// Returns the matrix of the geometries the other way around.
    pub fn transpose(&self) -> Self {
        let mut transposed = *self;
        for (row, dimensions) in self.matrix.iter().enumerate() {
            for (column, dimension) in dimensions.iter().enumerate() {
                transposed.matrix[column][row] = *dimension;
            }
        }

        transposed
    }

    /// Returns true if, and only if, the matrix satisfies the given pattern of nine symbols out
    /// of `T F * 0 1 2`.
    pub fn matches(&self, pattern: &str) -> Result<bool> {
        let symbols: Vec<_> = pattern.chars().collect();
        if symbols.len() != 9 {
            return Err(Error::InvalidPattern(pattern.to_string()));
        }

        self.matrix
            .iter()
            .flatten()
            .zip(symbols)
            .try_fold(true, |all, (actual, symbol)| {
                Ok(matches_symbol(*actual, symbol)? && all)
            })
    }

    fn is_true(&self, row: Location, column: Location) -> bool {
        self.get(row, column) != Dimension::False
    }

    fn is_false(&self, row: Location, column: Location) -> bool {
        self.get(row, column) == Dimension::False
    }

    /// Returns true if, and only if, the geometries have no point in common.
    pub fn is_disjoint(&self) -> bool {
        use Location::{Boundary, Interior};

        self.is_false(Interior, Interior)
            && self.is_false(Interior, Boundary)
            && self.is_false(Boundary, Interior)
            && self.is_false(Boundary, Boundary)
    }

    pub fn is_intersects(&self) -> bool {
        !self.is_disjoint()
    }

    /// Returns true if, and only if, the geometries of the given dimensions have some point in
    /// common but their interiors do not intersect.
    pub fn is_touches(&self, lhs: Dimension, rhs: Dimension) -> bool {
        use Location::{Boundary, Interior};

        let points_only = lhs == Dimension::Point && rhs == Dimension::Point;
        if points_only || lhs == Dimension::False || rhs == Dimension::False {
            return false;
        }

        self.is_false(Interior, Interior)
            && (self.is_true(Interior, Boundary)
                || self.is_true(Boundary, Interior)
                || self.is_true(Boundary, Boundary))
    }

    /// Returns true if, and only if, the geometries of the given dimensions cross each other.
    pub fn is_crosses(&self, lhs: Dimension, rhs: Dimension) -> bool {
        use Dimension::{Curve, Point, Surface};
        use Location::{Exterior, Interior};

        match (lhs, rhs) {
            (Point, Curve) | (Point, Surface) | (Curve, Surface) => {
                self.is_true(Interior, Interior) && self.is_true(Interior, Exterior)
            }
            (Curve, Point) | (Surface, Point) | (Surface, Curve) => {
                self.is_true(Interior, Interior) && self.is_true(Exterior, Interior)
            }
            (Curve, Curve) => self.get(Interior, Interior) == Point,
            _ => false,
        }
    }

    /// Returns true if, and only if, the first geometry lies in the interior of the second.
    pub fn is_within(&self) -> bool {
        use Location::{Boundary, Exterior, Interior};

        self.is_true(Interior, Interior)
            && self.is_false(Interior, Exterior)
            && self.is_false(Boundary, Exterior)
    }

    pub fn is_contains(&self) -> bool {
        use Location::{Boundary, Exterior, Interior};

        self.is_true(Interior, Interior)
            && self.is_false(Exterior, Interior)
            && self.is_false(Exterior, Boundary)
    }

    fn has_point_in_common(&self) -> bool {
        use Location::{Boundary, Interior};

        self.is_true(Interior, Interior)
            || self.is_true(Interior, Boundary)
            || self.is_true(Boundary, Interior)
            || self.is_true(Boundary, Boundary)
    }

    /// Returns true if, and only if, no point of the second geometry lies in the exterior of
    /// the first one.
    pub fn is_covers(&self) -> bool {
        use Location::{Boundary, Exterior, Interior};

        self.has_point_in_common()
            && self.is_false(Exterior, Interior)
            && self.is_false(Exterior, Boundary)
    }

    pub fn is_covered_by(&self) -> bool {
        use Location::{Boundary, Exterior, Interior};

        self.has_point_in_common()
            && self.is_false(Interior, Exterior)
            && self.is_false(Boundary, Exterior)
    }

    /// Returns true if, and only if, the geometries of the given dimensions are topologically
    /// equal.
    pub fn is_equals(&self, lhs: Dimension, rhs: Dimension) -> bool {
        use Location::{Boundary, Exterior, Interior};

        lhs == rhs
            && self.is_true(Interior, Interior)
            && self.is_false(Interior, Exterior)
            && self.is_false(Boundary, Exterior)
            && self.is_false(Exterior, Interior)
            && self.is_false(Exterior, Boundary)
    }

    /// Returns true if, and only if, the geometries of the given dimensions share some but not
    /// all of their points, and the intersection has their same dimension.
    pub fn is_overlaps(&self, lhs: Dimension, rhs: Dimension) -> bool {
        use Location::{Exterior, Interior};

        let shared = self.is_true(Interior, Exterior) && self.is_true(Exterior, Interior);
        match (lhs, rhs) {
            (Dimension::Point, Dimension::Point) | (Dimension::Surface, Dimension::Surface) => {
                self.is_true(Interior, Interior) && shared
            }
            (Dimension::Curve, Dimension::Curve) => {
                self.get(Interior, Interior) == Dimension::Curve && shared
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        Dimension, Error,
        graph::{Label, Location},
        relate::IntersectionMatrix,
    };

    fn matrix(symbols: &str) -> IntersectionMatrix {
        symbols.parse().expect("matrix should be valid")
    }

    #[test]
    fn parse_and_display() {
        let got = matrix("212101212");
        assert_eq!(got.to_string(), "212101212");
        assert_eq!(got.get(Location::Boundary, Location::Boundary), Dimension::Point);
        assert_eq!(got.transpose(), got);

        let asymmetric = matrix("1010F0212");
        assert_eq!(asymmetric.transpose().to_string(), "1020F1102");
    }

    #[test]
    fn invalid_patterns() {
        assert!(matches!(
            "21210121".parse::<IntersectionMatrix>(),
            Err(Error::InvalidPattern(_))
        ));
        assert!(matches!(
            "T12101212".parse::<IntersectionMatrix>(),
            Err(Error::InvalidPattern(_))
        ));
        assert!(matches!(
            IntersectionMatrix::default().matches("T*F**F**X"),
            Err(Error::InvalidPattern(_))
        ));
    }

    #[test]
    fn pattern_matching() {
        struct Test {
            name: &'static str,
            matrix: &'static str,
            pattern: &'static str,
            want: bool,
        }

        vec![
            Test {
                name: "wildcards match anything",
                matrix: "212101212",
                pattern: "*********",
                want: true,
            },
            Test {
                name: "true matches any dimension",
                matrix: "0FFFFFFF2",
                pattern: "T********",
                want: true,
            },
            Test {
                name: "true does not match false",
                matrix: "FF2FF1212",
                pattern: "T********",
                want: false,
            },
            Test {
                name: "exact dimensions",
                matrix: "1FFF0FFF2",
                pattern: "1FFF0FFF2",
                want: true,
            },
            Test {
                name: "different dimension",
                matrix: "1FFF0FFF2",
                pattern: "2FFF0FFF2",
                want: false,
            },
        ]
        .into_iter()
        .for_each(|test| {
            let got = matrix(test.matrix)
                .matches(test.pattern)
                .expect("pattern should be valid");

            assert_eq!(got, test.want, "{}", test.name);
        });
    }

    #[test]
    fn predicates() {
        use Dimension::{Curve, Point, Surface};

        struct Test {
            name: &'static str,
            matrix: &'static str,
            dimensions: (Dimension, Dimension),
            want: [bool; 9],
        }

        // disjoint, touches, crosses, within, contains, covers, covered by, equals, overlaps
        vec![
            Test {
                name: "disjoint polygons",
                matrix: "FF2FF1212",
                dimensions: (Surface, Surface),
                want: [true, false, false, false, false, false, false, false, false],
            },
            Test {
                name: "polygons sharing an edge",
                matrix: "FF2F11212",
                dimensions: (Surface, Surface),
                want: [false, true, false, false, false, false, false, false, false],
            },
            Test {
                name: "overlapping polygons",
                matrix: "212101212",
                dimensions: (Surface, Surface),
                want: [false, false, false, false, false, false, false, false, true],
            },
            Test {
                name: "polygon inside another",
                matrix: "2FF1FF212",
                dimensions: (Surface, Surface),
                want: [false, false, false, true, false, false, true, false, false],
            },
            Test {
                name: "equal polygons",
                matrix: "2FFF1FFF2",
                dimensions: (Surface, Surface),
                want: [false, false, false, true, true, true, true, true, false],
            },
            Test {
                name: "line crossing a polygon",
                matrix: "1010F0212",
                dimensions: (Curve, Surface),
                want: [false, false, true, false, false, false, false, false, false],
            },
            Test {
                name: "crossing lines",
                matrix: "0F1FF0102",
                dimensions: (Curve, Curve),
                want: [false, false, true, false, false, false, false, false, false],
            },
            Test {
                name: "point on the boundary of a polygon",
                matrix: "F0FFFF212",
                dimensions: (Point, Surface),
                want: [false, true, false, false, false, false, true, false, false],
            },
        ]
        .into_iter()
        .for_each(|test| {
            let matrix = matrix(test.matrix);
            let (lhs, rhs) = test.dimensions;

            let got = [
                matrix.is_disjoint(),
                matrix.is_touches(lhs, rhs),
                matrix.is_crosses(lhs, rhs),
                matrix.is_within(),
                matrix.is_contains(),
                matrix.is_covers(),
                matrix.is_covered_by(),
                matrix.is_equals(lhs, rhs),
                matrix.is_overlaps(lhs, rhs),
            ];

            assert_eq!(got, test.want, "{}", test.name);
            assert_eq!(matrix.is_intersects(), !test.want[0], "{}", test.name);
        });
    }

    #[test]
    fn labels_update_the_matrix() {
        let mut matrix = IntersectionMatrix::default();
        matrix.update_with_label(&Label::area(
            Location::Boundary,
            Location::Interior,
            Location::Exterior,
        ));

        assert_eq!(matrix.to_string(), "2FFF1FFF2");
    }
}
