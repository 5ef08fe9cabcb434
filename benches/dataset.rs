use std::hint::black_box;

use algoviz::services::DatasetProvider;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

fn custom_input(len: usize) -> String {
    (0..len)
        .map(|i| format!("{}.{}", (i * 7919) % 1000, i % 10))
        .collect::<Vec<_>>()
        .join(", ")
}

fn bench_parse_custom(c: &mut Criterion) {
    let provider = DatasetProvider::default();
    let mut group = c.benchmark_group("parse_custom");
    for len in [10, 100, 1000] {
        let input = custom_input(len);
        group.bench_with_input(BenchmarkId::from_parameter(len), &input, |b, input| {
            b.iter(|| {
                let values = provider.parse_custom(black_box(input)).expect("valid input");
                assert_eq!(values.map(|v| v.len()), Some(len));
            });
        });
    }
    group.finish();
}

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for size in [30, 300] {
        let provider = DatasetProvider::new(size, 100);
        group.bench_function(BenchmarkId::from_parameter(size), |b| {
            b.iter(|| black_box(provider.generate()));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_parse_custom, bench_generate);
criterion_main!(benches);
