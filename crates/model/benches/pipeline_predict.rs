use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use obesity_core::{FeatureRecord, InputPolicy, PredictionId, assemble};
use obesity_model::{Classifier, fixtures};

const QUERY: &[(&str, &str)] = &[
    ("gender", "Male"),
    ("age", "21"),
    ("height", "1.80"),
    ("weight", "75"),
    ("family_history", "yes"),
    ("favc", "yes"),
    ("fcvc", "2"),
    ("ncp", "3"),
    ("caec", "Sometimes"),
    ("smoke", "no"),
    ("ch2o", "2"),
    ("scc", "no"),
    ("faf", "1"),
    ("tue", "1"),
    ("calc", "no"),
    ("mtrans", "Public_Transportation"),
];

fn record() -> FeatureRecord {
    assemble(QUERY.iter().copied(), InputPolicy::Strict)
        .unwrap()
        .record
}

/// Query parsing alone.
fn bench_assemble(c: &mut Criterion) {
    c.bench_function("assemble_full_query", |b| {
        b.iter(|| assemble(black_box(QUERY).iter().copied(), InputPolicy::Lenient).unwrap());
    });
}

/// Preprocessing + forest evaluation, and the full store path including decoding.
fn bench_predict(c: &mut Criterion) {
    let pipeline = fixtures::pipeline();
    let store = fixtures::store();
    let record = record();

    let mut group = c.benchmark_group("predict");
    group.bench_with_input(BenchmarkId::new("pipeline", "forest_2x7"), &record, |b, r| {
        b.iter(|| pipeline.predict(black_box(r)).unwrap());
    });
    group.bench_with_input(BenchmarkId::new("store", "forest_2x7"), &record, |b, r| {
        b.iter(|| store.predict(PredictionId::new(), black_box(r)).unwrap());
    });
    group.finish();
}

criterion_group!(benches, bench_assemble, bench_predict);
criterion_main!(benches);
