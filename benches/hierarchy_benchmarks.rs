use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use hexscale::{Config, DensityHierarchy};

fn residents(count: usize) -> Vec<(f64, f64, String)> {
    (0..count)
        .map(|i| {
            let lat = 37.70 + (i % 97) as f64 * 0.0013;
            let lng = -122.50 + (i / 97) as f64 * 0.0017;
            (lat, lng, format!("resident-{}", i))
        })
        .collect()
}

fn benchmark_ingest(c: &mut Criterion) {
    let mut group = c.benchmark_group("ingest");
    let records = residents(10_000);

    group.bench_function("add_resident_10k", |b| {
        b.iter(|| {
            let mut hierarchy = DensityHierarchy::default();
            hierarchy.add_residents(black_box(records.clone())).unwrap();
            hierarchy
        })
    });

    group.finish();
}

fn benchmark_materialize(c: &mut Criterion) {
    let mut group = c.benchmark_group("materialize");
    group.sample_size(20);

    for count in [1_000, 10_000] {
        let mut hierarchy = DensityHierarchy::new(Config::default()).unwrap();
        hierarchy.add_residents(residents(count)).unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| hierarchy.materialize().unwrap())
        });
    }

    group.finish();
}

fn benchmark_reward_scale(c: &mut Criterion) {
    let mut group = c.benchmark_group("reward_scale");

    let records = residents(10_000);
    let mut hierarchy = DensityHierarchy::default();
    hierarchy.add_residents(records.clone()).unwrap();
    hierarchy.materialize().unwrap();

    group.bench_function("single_query", |b| {
        let (lat, lng, _) = &records[0];
        b.iter(|| hierarchy.reward_scale(black_box(*lat), black_box(*lng)).unwrap())
    });

    group.bench_function("all_residents", |b| {
        b.iter(|| {
            records
                .iter()
                .map(|(lat, lng, _)| hierarchy.reward_scale(*lat, *lng).unwrap())
                .sum::<f64>()
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_ingest,
    benchmark_materialize,
    benchmark_reward_scale
);
criterion_main!(benches);
