use std::{cmp::Ordering, fmt};

use num_traits::Float;

use crate::{
    Coordinate, Envelope, Error, PrecisionModel, Result,
    algorithm::{PointLocator, is_ccw},
    coordinate::Ordered,
    graph::Location,
};

/// The topological dimension of a geometry, or of a cell of an intersection matrix.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Dimension {
    /// The empty set.
    #[default]
    False,
    /// Points.
    Point,
    /// Lines.
    Curve,
    /// Areas.
    Surface,
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Self::False => 'F',
            Self::Point => '0',
            Self::Curve => '1',
            Self::Surface => '2',
        };

        write!(f, "{symbol}")
    }
}

/// An area delimited by an exterior ring and, optionally, some interior ones.
///
/// Every ring is closed: its first and last coordinates are the same.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(
        from = "Vec<Vec<Coordinate<T>>>",
        into = "Vec<Vec<Coordinate<T>>>",
        bound(
            serialize = "T: serde::Serialize + Copy",
            deserialize = "T: serde::Deserialize<'de>"
        )
    )
)]
pub struct Polygon<T = f64> {
    /// The exterior ring.
    pub shell: Vec<Coordinate<T>>,
    /// The interior rings.
    pub holes: Vec<Vec<Coordinate<T>>>,
}

impl<T> From<Vec<[T; 2]>> for Polygon<T> {
    fn from(shell: Vec<[T; 2]>) -> Self {
        Self {
            shell: shell.into_iter().map(Coordinate::from).collect(),
            holes: Vec::new(),
        }
    }
}

impl<T> From<Vec<Vec<Coordinate<T>>>> for Polygon<T> {
    fn from(rings: Vec<Vec<Coordinate<T>>>) -> Self {
        let mut rings = rings.into_iter();
        Self {
            shell: rings.next().unwrap_or_default(),
            holes: rings.collect(),
        }
    }
}

impl<T> From<Polygon<T>> for Vec<Vec<Coordinate<T>>> {
    fn from(polygon: Polygon<T>) -> Self {
        std::iter::once(polygon.shell).chain(polygon.holes).collect()
    }
}

impl<T> Polygon<T> {
    /// Returns a polygon with the given exterior and interior rings.
    pub fn new(shell: Vec<Coordinate<T>>, holes: Vec<Vec<Coordinate<T>>>) -> Self {
        Self { shell, holes }
    }

    /// Returns true if, and only if, the polygon has no exterior ring.
    pub fn is_empty(&self) -> bool {
        self.shell.is_empty()
    }

    /// Returns an iterator over all the rings of the polygon, the exterior one first.
    pub fn rings(&self) -> impl Iterator<Item = &[Coordinate<T>]> {
        std::iter::once(self.shell.as_slice()).chain(self.holes.iter().map(Vec::as_slice))
    }

    fn rings_mut(&mut self) -> impl Iterator<Item = &mut Vec<Coordinate<T>>> {
        std::iter::once(&mut self.shell).chain(self.holes.iter_mut())
    }
}

/// A planar geometry.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(
        tag = "type",
        content = "coordinates",
        bound(
            serialize = "T: serde::Serialize + Copy",
            deserialize = "T: serde::Deserialize<'de>"
        )
    )
)]
pub enum Geometry<T = f64> {
    Point(Coordinate<T>),
    LineString(Vec<Coordinate<T>>),
    Polygon(Polygon<T>),
    MultiPoint(Vec<Coordinate<T>>),
    MultiLineString(Vec<Vec<Coordinate<T>>>),
    MultiPolygon(Vec<Polygon<T>>),
    #[cfg_attr(feature = "serde", serde(rename = "GeometryCollection"))]
    Collection(Vec<Geometry<T>>),
}

impl<T> From<Coordinate<T>> for Geometry<T> {
    fn from(point: Coordinate<T>) -> Self {
        Self::Point(point)
    }
}

impl<T> From<Polygon<T>> for Geometry<T> {
    fn from(polygon: Polygon<T>) -> Self {
        Self::Polygon(polygon)
    }
}

impl<T> Geometry<T> {
    /// Returns true if, and only if, the geometry has no points at all.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Point(_) => false,
            Self::LineString(line) => line.is_empty(),
            Self::Polygon(polygon) => polygon.is_empty(),
            Self::MultiPoint(points) => points.is_empty(),
            Self::MultiLineString(lines) => lines.iter().all(Vec::is_empty),
            Self::MultiPolygon(polygons) => polygons.iter().all(Polygon::is_empty),
            Self::Collection(geometries) => geometries.iter().all(Geometry::is_empty),
        }
    }

    /// Returns the dimension of the geometry.
    ///
    /// Homogeneous geometries keep the dimension of their kind even when empty, while an empty
    /// collection has no dimension at all.
    pub fn dimension(&self) -> Dimension {
        match self {
            Self::Point(_) | Self::MultiPoint(_) => Dimension::Point,
            Self::LineString(_) | Self::MultiLineString(_) => Dimension::Curve,
            Self::Polygon(_) | Self::MultiPolygon(_) => Dimension::Surface,
            Self::Collection(geometries) => geometries
                .iter()
                .map(Geometry::dimension)
                .max()
                .unwrap_or_default(),
        }
    }

    /// Returns true if, and only if, the geometry is a heterogeneous collection.
    pub fn is_collection(&self) -> bool {
        matches!(self, Self::Collection(_))
    }

    /// Returns an iterator over all the coordinates of the geometry.
    pub fn coordinates(&self) -> Box<dyn Iterator<Item = &Coordinate<T>> + '_> {
        match self {
            Self::Point(point) => Box::new(std::iter::once(point)),
            Self::LineString(points) | Self::MultiPoint(points) => Box::new(points.iter()),
            Self::Polygon(polygon) => Box::new(polygon.rings().flatten()),
            Self::MultiLineString(lines) => Box::new(lines.iter().flatten()),
            Self::MultiPolygon(polygons) => {
                Box::new(polygons.iter().flat_map(Polygon::rings).flatten())
            }
            Self::Collection(geometries) => {
                Box::new(geometries.iter().flat_map(Geometry::coordinates))
            }
        }
    }

    fn for_each_coordinate_mut(&mut self, f: &mut impl FnMut(&mut Coordinate<T>)) {
        match self {
            Self::Point(point) => f(point),
            Self::LineString(points) | Self::MultiPoint(points) => points.iter_mut().for_each(f),
            Self::Polygon(polygon) => polygon.rings_mut().flatten().for_each(f),
            Self::MultiLineString(lines) => lines.iter_mut().flatten().for_each(f),
            Self::MultiPolygon(polygons) => polygons
                .iter_mut()
                .flat_map(Polygon::rings_mut)
                .flatten()
                .for_each(f),
            Self::Collection(geometries) => geometries
                .iter_mut()
                .for_each(|geometry| geometry.for_each_coordinate_mut(f)),
        }
    }

    /// Returns the rank of the kind of geometry, used for ordering components.
    fn rank(&self) -> u8 {
        match self {
            Self::Point(_) => 0,
            Self::MultiPoint(_) => 1,
            Self::LineString(_) => 2,
            Self::MultiLineString(_) => 3,
            Self::Polygon(_) => 4,
            Self::MultiPolygon(_) => 5,
            Self::Collection(_) => 6,
        }
    }
}

impl<T> Geometry<T>
where
    T: Float,
{
    /// Returns the dimension of the boundary of the geometry.
    pub fn boundary_dimension(&self) -> Dimension {
        match self {
            Self::Point(_) | Self::MultiPoint(_) => Dimension::False,
            Self::LineString(line) if is_closed(line) => Dimension::False,
            Self::LineString(_) => Dimension::Point,
            Self::MultiLineString(lines)
                if !lines.is_empty() && lines.iter().all(|line| is_closed(line)) =>
            {
                Dimension::False
            }
            Self::MultiLineString(_) => Dimension::Point,
            Self::Polygon(_) | Self::MultiPolygon(_) => Dimension::Curve,
            Self::Collection(geometries) => geometries
                .iter()
                .map(Geometry::boundary_dimension)
                .max()
                .unwrap_or_default(),
        }
    }

    /// Returns the smallest envelope containing the geometry.
    pub fn envelope(&self) -> Envelope<T> {
        self.coordinates().collect()
    }

    /// Makes sure the geometry is a valid operand, that is: every coordinate is finite, lines
    /// have at least two points and every ring is closed and has at least four points.
    pub fn validate(&self) -> Result<()> {
        if !self.coordinates().all(Coordinate::is_finite) {
            return Err(Error::NonFiniteCoordinate);
        }

        match self {
            Self::Point(_) | Self::MultiPoint(_) => Ok(()),
            Self::LineString(line) => validate_line(line),
            Self::MultiLineString(lines) => lines.iter().try_for_each(|line| validate_line(line)),
            Self::Polygon(polygon) => validate_polygon(polygon),
            Self::MultiPolygon(polygons) => polygons.iter().try_for_each(validate_polygon),
            Self::Collection(geometries) => geometries.iter().try_for_each(Geometry::validate),
        }
    }

    /// Rounds every coordinate of the geometry to the given precision model.
    pub fn make_precise(&mut self, precision: &PrecisionModel<T>) {
        if precision.is_floating() {
            return;
        }

        self.for_each_coordinate_mut(&mut |coordinate: &mut Coordinate<T>| {
            *coordinate = precision.make_precise(*coordinate)
        });
    }

    /// Converts the geometry into its canonical form.
    ///
    /// Exterior rings become clockwise and interior ones counter-clockwise, every ring starts at
    /// its smallest coordinate, lines run from their smallest end and the components of multi
    /// geometries are sorted. Two normalized geometries are equal if, and only if, they have the
    /// same vertices.
    pub fn normalize(&mut self) {
        match self {
            Self::Point(_) => {}
            Self::LineString(line) => normalize_line(line),
            Self::Polygon(polygon) => normalize_polygon(polygon),
            Self::MultiPoint(points) => points.sort_by(|a, b| Ordered(*a).cmp(&Ordered(*b))),
            Self::MultiLineString(lines) => {
                lines.iter_mut().for_each(|line| normalize_line(line));
                lines.sort_by(|a, b| compare_sequences(a, b));
            }
            Self::MultiPolygon(polygons) => {
                polygons.iter_mut().for_each(normalize_polygon);
                polygons.sort_by(compare_polygons);
            }
            Self::Collection(geometries) => {
                geometries.iter_mut().for_each(Geometry::normalize);
                geometries.sort_by(|a, b| {
                    a.rank()
                        .cmp(&b.rank())
                        .then_with(|| compare_sequences(a.coordinates(), b.coordinates()))
                });
            }
        }
    }

    /// Returns the location of the given point relative to the geometry.
    pub fn locate(&self, point: &Coordinate<T>) -> Location {
        PointLocator::default().locate(point, self)
    }
}

/// Returns true if, and only if, the given line is not empty and ends where it starts.
pub(crate) fn is_closed<T>(line: &[Coordinate<T>]) -> bool
where
    T: PartialEq,
{
    line.first().is_some_and(|first| line.last() == Some(first))
}

fn validate_line<T>(line: &[Coordinate<T>]) -> Result<()> {
    if line.len() == 1 {
        return Err(Error::TooFewPoints { got: 1, want: 2 });
    }

    Ok(())
}

fn validate_ring<T>(ring: &[Coordinate<T>]) -> Result<()>
where
    T: PartialEq,
{
    if ring.is_empty() {
        return Err(Error::EmptyRing);
    }

    if ring.len() < 4 {
        return Err(Error::TooFewPoints {
            got: ring.len(),
            want: 4,
        });
    }

    if !is_closed(ring) {
        return Err(Error::UnclosedRing);
    }

    Ok(())
}

fn validate_polygon<T>(polygon: &Polygon<T>) -> Result<()>
where
    T: PartialEq,
{
    // an empty polygon is a valid operand
    if polygon.is_empty() && polygon.holes.is_empty() {
        return Ok(());
    }

    polygon.rings().try_for_each(validate_ring)
}

fn normalize_line<T>(line: &mut [Coordinate<T>])
where
    T: Float,
{
    let len = line.len();
    for i in 0..len / 2 {
        let j = len - 1 - i;
        match Ordered(line[i]).cmp(&Ordered(line[j])) {
            Ordering::Equal => continue,
            Ordering::Greater => line.reverse(),
            Ordering::Less => {}
        }

        return;
    }
}

/// Makes the ring start at its smallest coordinate with the given orientation.
fn normalize_ring<T>(ring: &mut Vec<Coordinate<T>>, clockwise: bool)
where
    T: Float,
{
    if ring.len() < 2 {
        return;
    }

    ring.pop();
    let start = ring
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| Ordered(**a).cmp(&Ordered(**b)))
        .map(|(index, _)| index)
        .unwrap_or_default();

    ring.rotate_left(start);
    ring.push(ring[0]);

    if is_ccw(ring).is_ok_and(|ccw| ccw == clockwise) {
        ring.reverse();
    }
}

fn normalize_polygon<T>(polygon: &mut Polygon<T>)
where
    T: Float,
{
    normalize_ring(&mut polygon.shell, true);
    polygon
        .holes
        .iter_mut()
        .for_each(|hole| normalize_ring(hole, false));

    polygon.holes.sort_by(|a, b| compare_sequences(a, b));
}

fn compare_polygons<T>(a: &Polygon<T>, b: &Polygon<T>) -> Ordering
where
    T: Float,
{
    compare_sequences(a.rings().flatten(), b.rings().flatten())
}

fn compare_sequences<'a, T>(
    a: impl IntoIterator<Item = &'a Coordinate<T>>,
    b: impl IntoIterator<Item = &'a Coordinate<T>>,
) -> Ordering
where
    T: Float + 'a,
{
    a.into_iter()
        .map(|point| Ordered(*point))
        .cmp(b.into_iter().map(|point| Ordered(*point)))
}
