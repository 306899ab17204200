use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use frame_mapper::preprocessing::{OneHotEncoder, SimpleImputer, StandardScaler, Step};
use frame_mapper::{DataFrame, DataFrameMapper, FeatureEntry, MapperConfig};

fn make_table(n: usize) -> DataFrame {
    let category: Vec<f64> = (0..n).map(|i| (i % 7) as f64).collect();
    let age: Vec<f64> = (0..n)
        .map(|i| if i % 13 == 0 { f64::NAN } else { i as f64 * 0.1 })
        .collect();
    let weight: Vec<f64> = (0..n).map(|i| (i as f64).sin()).collect();
    DataFrame::from_columns([("category", category), ("age", age), ("weight", weight)])
        .expect("benchmark table")
}

fn make_mapper(sparse: bool) -> DataFrameMapper {
    DataFrameMapper::new(
        vec![
            FeatureEntry::single("category", Step::from(OneHotEncoder::new())),
            FeatureEntry::chain(
                ["age", "weight"],
                vec![
                    Step::from(SimpleImputer::default()),
                    Step::from(StandardScaler::new()),
                ],
            ),
        ],
        MapperConfig::new().with_sparse(sparse),
    )
}

fn bench_fit_transform(c: &mut Criterion) {
    // Test different table sizes
    for size in [100, 1000, 10000, 100000].iter() {
        let table = make_table(*size);
        c.bench_with_input(BenchmarkId::new("fit_transform", size), size, |b, _| {
            b.iter(|| {
                let mut mapper = make_mapper(false);
                let out = mapper.fit_transform(black_box(&table), None);
                black_box(out).ok();
            });
        });
    }
}

fn bench_transform(c: &mut Criterion) {
    for (label, sparse) in [("dense", false), ("sparse", true)] {
        for size in [1000, 100000].iter() {
            let table = make_table(*size);
            let mut mapper = make_mapper(sparse);
            mapper.fit(&table, None).expect("fit");
            c.bench_with_input(
                BenchmarkId::new(format!("transform_{}", label), size),
                size,
                |b, _| {
                    b.iter(|| {
                        let out = mapper.transform(black_box(&table));
                        black_box(out).ok();
                    });
                },
            );
        }
    }
}

criterion_group!(benches, bench_fit_transform, bench_transform);
criterion_main!(benches);
