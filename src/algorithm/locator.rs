use num_traits::Float;

use crate::{
    Coordinate, Envelope, Geometry, Polygon,
    algorithm::{BoundaryNodeRule, intersector::is_on_line, ray_crossing::locate_point_in_ring},
    geometry::is_closed,
    graph::Location,
};

/// Locates points relative to arbitrary geometries.
///
/// The boundary of multi-part geometries is decided by the [`BoundaryNodeRule`] of the
/// locator.
#[derive(Debug, Default, Clone, Copy)]
pub struct PointLocator {
    rule: BoundaryNodeRule,
}

/// The state of a location query over the components of a geometry.
#[derive(Default)]
struct Accumulator {
    is_in: bool,
    boundaries: usize,
}

impl Accumulator {
    fn update(&mut self, location: Location) {
        match location {
            Location::Interior => self.is_in = true,
            Location::Boundary => self.boundaries += 1,
            _ => {}
        }
    }
}

impl PointLocator {
    /// Returns a locator resolving boundaries with the given rule.
    pub fn new(rule: BoundaryNodeRule) -> Self {
        Self { rule }
    }

    /// Returns the location of the given point relative to the geometry.
    pub fn locate<T>(&self, point: &Coordinate<T>, geometry: &Geometry<T>) -> Location
    where
        T: Float,
    {
        if geometry.is_empty() {
            return Location::Exterior;
        }

        match geometry {
            Geometry::LineString(line) => return locate_on_line(point, line),
            Geometry::Polygon(polygon) => return locate_in_polygon(point, polygon),
            _ => {}
        }

        let mut state = Accumulator::default();
        compute_location(point, geometry, &mut state);

        if self.rule.is_in_boundary(state.boundaries) {
            Location::Boundary
        } else if state.boundaries > 0 || state.is_in {
            Location::Interior
        } else {
            Location::Exterior
        }
    }

    /// Returns true if, and only if, the given point is not in the exterior of the geometry.
    pub fn intersects<T>(&self, point: &Coordinate<T>, geometry: &Geometry<T>) -> bool
    where
        T: Float,
    {
        !matches!(self.locate(point, geometry), Location::Exterior)
    }
}

fn compute_location<T>(point: &Coordinate<T>, geometry: &Geometry<T>, state: &mut Accumulator)
where
    T: Float,
{
    match geometry {
        Geometry::Point(other) => state.update(locate_on_point(point, other)),
        Geometry::LineString(line) => state.update(locate_on_line(point, line)),
        Geometry::Polygon(polygon) => state.update(locate_in_polygon(point, polygon)),
        Geometry::MultiPoint(points) => points
            .iter()
            .for_each(|other| state.update(locate_on_point(point, other))),
        Geometry::MultiLineString(lines) => lines
            .iter()
            .for_each(|line| state.update(locate_on_line(point, line))),
        Geometry::MultiPolygon(polygons) => polygons
            .iter()
            .for_each(|polygon| state.update(locate_in_polygon(point, polygon))),
        Geometry::Collection(geometries) => geometries
            .iter()
            .for_each(|geometry| compute_location(point, geometry, state)),
    }
}

fn locate_on_point<T>(point: &Coordinate<T>, other: &Coordinate<T>) -> Location
where
    T: Float,
{
    if point == other {
        Location::Interior
    } else {
        Location::Exterior
    }
}

fn locate_on_line<T>(point: &Coordinate<T>, line: &[Coordinate<T>]) -> Location
where
    T: Float,
{
    if line.is_empty() || !line.iter().collect::<Envelope<T>>().contains_point(point) {
        return Location::Exterior;
    }

    if !is_closed(line) && (line.first() == Some(point) || line.last() == Some(point)) {
        return Location::Boundary;
    }

    if is_on_line(point, line) {
        Location::Interior
    } else {
        Location::Exterior
    }
}

fn locate_in_ring<T>(point: &Coordinate<T>, ring: &[Coordinate<T>]) -> Location
where
    T: Float,
{
    if !ring.iter().collect::<Envelope<T>>().contains_point(point) {
        return Location::Exterior;
    }

    locate_point_in_ring(point, ring)
}

fn locate_in_polygon<T>(point: &Coordinate<T>, polygon: &Polygon<T>) -> Location
where
    T: Float,
{
    if polygon.is_empty() {
        return Location::Exterior;
    }

    match locate_in_ring(point, &polygon.shell) {
        Location::Interior => {}
        location => return location,
    }

    for hole in &polygon.holes {
        match locate_in_ring(point, hole) {
            Location::Interior => return Location::Exterior,
            Location::Boundary => return Location::Boundary,
            _ => {}
        }
    }

    Location::Interior
}

/// Returns the location of the given point relative to the areas of the geometry, regardless
/// of any other component.
///
/// Only [`Location::Interior`] and [`Location::Exterior`] are reported, points on the boundary
/// of an area count as interior ones.
pub(crate) fn locate_in_area<T>(point: &Coordinate<T>, geometry: &Geometry<T>) -> Location
where
    T: Float,
{
    let in_polygon = |polygon: &Polygon<T>| {
        !matches!(locate_in_polygon(point, polygon), Location::Exterior)
    };

    let contained = match geometry {
        Geometry::Polygon(polygon) => in_polygon(polygon),
        Geometry::MultiPolygon(polygons) => polygons.iter().any(in_polygon),
        Geometry::Collection(geometries) => geometries
            .iter()
            .any(|geometry| matches!(locate_in_area(point, geometry), Location::Interior)),
        _ => false,
    };

    if contained {
        Location::Interior
    } else {
        Location::Exterior
    }
}
