use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::prelude::*;
use swatch::{Kmeans, Rgb};

fn bench_kmeans(c: &mut Criterion) {
    let mut group = c.benchmark_group("kmeans");

    // 10,000 samples: a full 100x100 sampling target with no transparency.
    let mut rng = StdRng::seed_from_u64(42);
    let pixels: Vec<Rgb> = (0..10_000)
        .map(|_| Rgb::new(rng.random(), rng.random(), rng.random()))
        .collect();

    group.bench_function("fit_n10000_k3", |b| {
        b.iter(|| {
            let model = Kmeans::new(3).with_seed(42);
            model.fit(black_box(&pixels)).unwrap();
        })
    });

    group.bench_function("fit_n10000_k8", |b| {
        b.iter(|| {
            let model = Kmeans::new(8).with_seed(42);
            model.fit(black_box(&pixels)).unwrap();
        })
    });

    group.finish();
}

criterion_group!(benches, bench_kmeans);
criterion_main!(benches);
