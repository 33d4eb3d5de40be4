use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use knnlab::KnnClassifier;
use ndarray::Array2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

fn random_matrix(rows: usize, cols: usize, seed: u64) -> Array2<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let normal = Normal::new(0.0, 1.0).unwrap();
    Array2::from_shape_fn((rows, cols), |_| normal.sample(&mut rng))
}

fn fitted(n_train: usize, dims: usize, k: usize, p: u32) -> KnnClassifier<u8> {
    let features = random_matrix(n_train, dims, 7);
    let labels = (0..n_train).map(|i| (i % 3) as u8).collect();
    let mut knn = KnnClassifier::new();
    knn.fit(features, labels, k, p).unwrap();
    knn
}

fn bench_predict(c: &mut Criterion) {
    let mut group = c.benchmark_group("knn_predict");
    let queries = random_matrix(100, 8, 11);

    for &n_train in &[100, 1000, 5000] {
        let knn = fitted(n_train, 8, 5, 2);
        group.bench_with_input(BenchmarkId::new("sequential", n_train), &n_train, |b, _| {
            b.iter(|| knn.predict(black_box(queries.view())).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("rayon", n_train), &n_train, |b, _| {
            b.iter(|| knn.predict_par(black_box(queries.view())).unwrap())
        });
    }

    group.finish();
}

fn bench_minkowski_order(c: &mut Criterion) {
    let mut group = c.benchmark_group("knn_predict_proba_by_p");
    let queries = random_matrix(50, 8, 13);

    for &p in &[1u32, 2, 3] {
        let knn = fitted(1000, 8, 7, p);
        group.bench_with_input(BenchmarkId::from_parameter(p), &p, |b, _| {
            b.iter(|| knn.predict_proba(black_box(queries.view())).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_predict, bench_minkowski_order);
criterion_main!(benches);
