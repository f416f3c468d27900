use criterion::{BatchSize, Criterion, criterion_group};
use geoverlay::{Geometry, Polygon};
use rand::Rng;

type Sample = [[f64; 2]; 250];

/// Returns a random, most likely self-intersecting, polygon.
fn random_polygon() -> Geometry<f64> {
    let mut rng = rand::rng();

    let mut ring = rng.random::<Sample>().to_vec();
    ring.push(ring[0]);
    Polygon::from(ring).into()
}

fn random_square() -> Geometry<f64> {
    let mut rng = rand::rng();

    let [x, y] = rng.random::<[f64; 2]>();
    let side = rng.random_range(0.1..1.);
    Polygon::from(vec![
        [x, y],
        [x, y + side],
        [x + side, y + side],
        [x + side, y],
        [x, y],
    ])
    .into()
}

fn random_operands(generate: fn() -> Geometry<f64>) -> [Geometry<f64>; 2] {
    [generate(), generate()]
}

pub fn squares(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("squares");

    group.bench_function("union", |b| {
        b.iter_batched(
            || random_operands(random_square),
            |[subject, clip]| subject.or(clip),
            BatchSize::SmallInput,
        )
    });

    group.bench_function("relate", |b| {
        b.iter_batched(
            || random_operands(random_square),
            |[subject, clip]| subject.relate(&clip),
            BatchSize::SmallInput,
        )
    });
}

pub fn large_polygons(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("large polygons");
    group.sample_size(10);

    group.bench_function("union", |b| {
        b.iter_batched(
            || random_operands(random_polygon),
            |[subject, clip]| subject.or(clip),
            BatchSize::LargeInput,
        )
    });

    group.bench_function("difference", |b| {
        b.iter_batched(
            || random_operands(random_polygon),
            |[subject, clip]| subject.not(clip),
            BatchSize::LargeInput,
        )
    });

    group.bench_function("intersection", |b| {
        b.iter_batched(
            || random_operands(random_polygon),
            |[subject, clip]| subject.and(clip),
            BatchSize::LargeInput,
        )
    });
}

criterion_group!(benches, squares, large_polygons);
