use geoverlay::{Dimension, Error, Geometry, Location, Polygon, coord, relate};
use proptest::prelude::*;

fn square(x: f64, y: f64, side: f64) -> Geometry<f64> {
    Polygon::from(vec![
        [x, y],
        [x, y + side],
        [x + side, y + side],
        [x + side, y],
        [x, y],
    ])
    .into()
}

#[test]
fn predicates() {
    struct Test {
        name: &'static str,
        lhs: Geometry<f64>,
        rhs: Geometry<f64>,
        intersects: bool,
        touches: bool,
        crosses: bool,
        within: bool,
        overlaps: bool,
    }

    vec![
        Test {
            name: "disjoint squares",
            lhs: square(0., 0., 1.),
            rhs: square(3., 3., 1.),
            intersects: false,
            touches: false,
            crosses: false,
            within: false,
            overlaps: false,
        },
        Test {
            name: "overlapping squares",
            lhs: square(0., 0., 2.),
            rhs: square(1., 1., 2.),
            intersects: true,
            touches: false,
            crosses: false,
            within: false,
            overlaps: true,
        },
        Test {
            name: "squares sharing an edge",
            lhs: square(0., 0., 1.),
            rhs: square(1., 0., 1.),
            intersects: true,
            touches: true,
            crosses: false,
            within: false,
            overlaps: false,
        },
        Test {
            name: "squares sharing a corner",
            lhs: square(0., 0., 1.),
            rhs: square(1., 1., 1.),
            intersects: true,
            touches: true,
            crosses: false,
            within: false,
            overlaps: false,
        },
        Test {
            name: "nested squares",
            lhs: square(1., 1., 1.),
            rhs: square(0., 0., 4.),
            intersects: true,
            touches: false,
            crosses: false,
            within: true,
            overlaps: false,
        },
        Test {
            name: "line crossing a square",
            lhs: Geometry::LineString(vec![coord!(-1., 1.), coord!(3., 1.)]),
            rhs: square(0., 0., 2.),
            intersects: true,
            touches: false,
            crosses: true,
            within: false,
            overlaps: false,
        },
        Test {
            name: "line ending on a square",
            lhs: Geometry::LineString(vec![coord!(-1., 1.), coord!(0., 1.)]),
            rhs: square(0., 0., 2.),
            intersects: true,
            touches: true,
            crosses: false,
            within: false,
            overlaps: false,
        },
        Test {
            name: "point inside a square",
            lhs: Geometry::Point(coord!(1., 1.)),
            rhs: square(0., 0., 2.),
            intersects: true,
            touches: false,
            crosses: false,
            within: true,
            overlaps: false,
        },
    ]
    .into_iter()
    .for_each(|test| {
        assert_eq!(
            test.lhs.intersects(&test.rhs),
            Ok(test.intersects),
            "intersects of {}",
            test.name
        );
        assert_eq!(
            test.lhs.disjoint(&test.rhs),
            Ok(!test.intersects),
            "disjoint of {}",
            test.name
        );
        assert_eq!(
            test.lhs.touches(&test.rhs),
            Ok(test.touches),
            "touches of {}",
            test.name
        );
        assert_eq!(
            test.lhs.crosses(&test.rhs),
            Ok(test.crosses),
            "crosses of {}",
            test.name
        );
        assert_eq!(
            test.lhs.within(&test.rhs),
            Ok(test.within),
            "within of {}",
            test.name
        );
        assert_eq!(
            test.rhs.contains(&test.lhs),
            Ok(test.within),
            "contains of {}",
            test.name
        );
        assert_eq!(
            test.lhs.overlaps(&test.rhs),
            Ok(test.overlaps),
            "overlaps of {}",
            test.name
        );
    });
}

#[test]
fn covers_accepts_boundary_contact() {
    let outer = square(0., 0., 2.);
    let inner = square(0., 0., 1.);

    assert_eq!(outer.covers(&inner), Ok(true));
    assert_eq!(inner.covered_by(&outer), Ok(true));
    assert_eq!(outer.contains(&inner), Ok(true));

    let edge = Geometry::LineString(vec![coord!(0., 0.), coord!(0., 2.)]);
    assert_eq!(outer.covers(&edge), Ok(true));
    assert_eq!(outer.contains(&edge), Ok(false));
}

#[test]
fn topological_equality() {
    let square = square(0., 0., 2.);
    let densified = Geometry::from(Polygon::from(vec![
        [0., 2.],
        [1., 2.],
        [2., 2.],
        [2., 0.],
        [0., 0.],
        [0., 1.],
        [0., 2.],
    ]));

    assert_eq!(square.equals_topo(&densified), Ok(true));
    assert_eq!(square.relate_pattern(&densified, "T*F**FFF*"), Ok(true));
}

#[test]
fn matrix_entries() {
    let matrix = relate(
        &Geometry::LineString(vec![coord!(-1., 1.), coord!(3., 1.)]),
        &square(0., 0., 2.),
    )
    .expect("relate should succeed");

    assert_eq!(
        matrix.get(Location::Interior, Location::Interior),
        Dimension::Curve
    );
    assert_eq!(
        matrix.get(Location::Interior, Location::Boundary),
        Dimension::Point
    );
    assert_eq!(
        matrix.get(Location::Boundary, Location::Interior),
        Dimension::False
    );
    assert_eq!(
        matrix.get(Location::Exterior, Location::Interior),
        Dimension::Surface
    );
}

#[test]
fn invalid_arguments() {
    let collection = Geometry::Collection(vec![square(0., 0., 1.)]);
    assert_eq!(
        collection.intersects(&square(0., 0., 1.)),
        Err(Error::CollectionArgument)
    );

    assert!(matches!(
        square(0., 0., 1.).relate_pattern(&square(0., 0., 1.), "T*F"),
        Err(Error::InvalidPattern(_))
    ));
}

proptest! {
    #[test]
    fn relate_is_transposed_when_swapping_operands(
        lx in 0i32..8, ly in 0i32..8, lside in 1i32..5,
        rx in 0i32..8, ry in 0i32..8, rside in 1i32..5,
    ) {
        let lhs = square(lx as f64, ly as f64, lside as f64);
        let rhs = square(rx as f64, ry as f64, rside as f64);

        let forward = relate(&lhs, &rhs).expect("relate should succeed");
        let backward = relate(&rhs, &lhs).expect("relate should succeed");

        prop_assert_eq!(forward.transpose(), backward);
    }

    #[test]
    fn exteriors_always_meet(
        lx in 0i32..8, ly in 0i32..8, lside in 1i32..5,
        rx in 0i32..8, ry in 0i32..8, rside in 1i32..5,
    ) {
        let lhs = square(lx as f64, ly as f64, lside as f64);
        let rhs = square(rx as f64, ry as f64, rside as f64);

        let matrix = relate(&lhs, &rhs).expect("relate should succeed");
        prop_assert_eq!(matrix.get(Location::Exterior, Location::Exterior), Dimension::Surface);
    }
}
