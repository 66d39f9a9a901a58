//! Benchmarks for schema inference operations
//!
//! Run with: cargo bench

use std::collections::HashMap;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use geo_schema_core::{
    Geometry, MemoryFeatureStore, PropertyType, RawProperty, RecordMaterializer, ScalarValue,
    StructuredRecord, classify, widen,
};

/// Generate structured records with a drifting numeric field
fn generate_records(count: usize) -> Vec<StructuredRecord> {
    (0..count)
        .map(|i| {
            let mut record = StructuredRecord::new();
            record.push("name", ScalarValue::Text(format!("feature-{i}")));
            record.push("code", ScalarValue::Integer(i as i64));
            if i % 3 == 0 {
                record.push("measure", ScalarValue::Real(i as f64 * 0.5));
            } else {
                record.push("measure", ScalarValue::Integer(i as i64));
            }
            record
        })
        .collect()
}

fn bench_token_classification(c: &mut Criterion) {
    let mut group = c.benchmark_group("token_classification");

    let test_cases = vec![
        ("integer", "1234567"),
        ("real", "-31.4159e-1"),
        ("boolean", "true"),
        ("text", "not a number at all"),
    ];

    for (name, token) in test_cases {
        group.bench_with_input(BenchmarkId::new("classify", name), &token, |b, token| {
            b.iter(|| black_box(classify(token)));
        });
    }

    group.finish();
}

fn bench_widening(c: &mut Criterion) {
    let mut group = c.benchmark_group("widening");

    let tokens: Vec<String> = (0..1000)
        .map(|i| match i % 4 {
            0 => i.to_string(),
            1 => format!("{}.5", i),
            2 => "true".to_string(),
            _ => format!("value-{}", i),
        })
        .collect();

    group.throughput(Throughput::Elements(tokens.len() as u64));
    group.bench_function("widen_token_stream", |b| {
        b.iter(|| {
            let mut ty = PropertyType::Untyped;
            let mut width = 0;
            for token in &tokens {
                widen(&mut ty, &mut width, 0, token, true);
            }
            black_box((ty, width))
        });
    });

    group.finish();
}

fn bench_markup_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("markup_analysis");

    for count in [100, 1000].iter() {
        let properties: Vec<RawProperty> = (0..*count)
            .map(|i| {
                RawProperty::new(
                    format!("field_{}", i % 10),
                    vec![i.to_string(), (i * 2).to_string()],
                )
            })
            .collect();
        group.throughput(Throughput::Elements(*count as u64));

        group.bench_with_input(
            BenchmarkId::new("analyze_properties", count),
            &properties,
            |b, properties| {
                b.iter(|| {
                    let mut materializer = RecordMaterializer::new();
                    for property in properties {
                        let _ = materializer.analyze_markup_property(property);
                    }
                    black_box(materializer.stats())
                });
            },
        );
    }

    group.finish();
}

fn bench_structured_ingestion(c: &mut Criterion) {
    let mut group = c.benchmark_group("structured_ingestion");

    for count in [100, 500].iter() {
        let records = generate_records(*count);
        let geometries: HashMap<i64, Geometry> = HashMap::new();
        group.throughput(Throughput::Elements(*count as u64));

        group.bench_with_input(
            BenchmarkId::new("ingest_batch", count),
            &records,
            |b, records| {
                b.iter(|| {
                    let mut materializer = RecordMaterializer::new();
                    let mut store = MemoryFeatureStore::new();
                    let _ = materializer.ingest_structured_batch(
                        records.iter().cloned(),
                        &geometries,
                        &mut store,
                    );
                    black_box(store.len())
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_token_classification,
    bench_widening,
    bench_markup_analysis,
    bench_structured_ingestion
);
criterion_main!(benches);
