// Performance benchmarks for search, classification and autocomplete
use aisle::prelude::*;
use aisle::find_nearest;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::prelude::*;
use rand::rngs::StdRng;

const DIM: usize = 384;

fn generate_unit_vector(rng: &mut StdRng, dim: usize) -> Vector {
    let data: Vec<f32> = (0..dim).map(|_| rng.random_range(-1.0f32..1.0f32)).collect();
    Vector::new(data).normalized()
}

fn generate_catalog(rng: &mut StdRng, size: usize) -> Catalog {
    Catalog::load((0..size).map(|i| {
        let category = Category::ALL[i % Category::COUNT];
        CatalogEntry::new(
            format!("item {} {}", category, i),
            generate_unit_vector(rng, DIM),
            category,
        )
    }))
    .unwrap()
}

fn benchmark_find_nearest(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_nearest");
    let mut rng = StdRng::seed_from_u64(42);

    for size in [500, 5000, 50000].iter() {
        let catalog = generate_catalog(&mut rng, *size);
        let query = generate_unit_vector(&mut rng, DIM);

        group.bench_with_input(BenchmarkId::new("k5", size), size, |b, _| {
            b.iter(|| find_nearest(black_box(&query), &catalog, 5).unwrap());
        });
    }

    group.finish();
}

fn benchmark_classify(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(7);
    let catalog = generate_catalog(&mut rng, 5000);
    let classifier = Classifier::default();
    let query = generate_unit_vector(&mut rng, DIM);

    c.bench_function("classify_5000", |b| {
        b.iter(|| classifier.classify(Some(black_box(&query)), &catalog).unwrap());
    });
}

fn benchmark_suggest(c: &mut Criterion) {
    let mut group = c.benchmark_group("suggest");
    let mut rng = StdRng::seed_from_u64(9);
    let catalog = generate_catalog(&mut rng, 5000);
    let ranker = AutocompleteRanker::default();
    let query = generate_unit_vector(&mut rng, DIM);

    group.bench_function("lexical", |b| {
        b.iter(|| ranker.suggest(black_box("item dairy"), &catalog, 10, None).unwrap());
    });
    group.bench_function("hybrid", |b| {
        b.iter(|| {
            ranker
                .suggest(black_box("item dairy"), &catalog, 10, Some(&query))
                .unwrap()
        });
    });

    group.finish();
}

criterion_group!(benches, benchmark_find_nearest, benchmark_classify, benchmark_suggest);
criterion_main!(benches);
