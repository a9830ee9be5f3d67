use convbench::{parse_f64, parse_i64, Strategy, DOUBLE_STRINGS, INT_STRINGS};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

fn total_len(fields: &[&str]) -> u64 {
    fields.iter().map(|field| field.len() as u64).sum()
}

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("IntFieldParse");
    group.throughput(Throughput::Bytes(total_len(&INT_STRINGS)));
    for strategy in Strategy::ALL {
        group.bench_function(strategy.name(), |b| {
            b.iter(|| {
                for field in INT_STRINGS {
                    black_box(parse_i64(strategy, black_box(field.as_bytes())));
                }
            })
        });
    }
    group.finish();

    let mut group = c.benchmark_group("DoubleFieldParse");
    group.throughput(Throughput::Bytes(total_len(&DOUBLE_STRINGS)));
    for strategy in Strategy::ALL {
        group.bench_function(strategy.name(), |b| {
            b.iter(|| {
                for field in DOUBLE_STRINGS {
                    black_box(parse_f64(strategy, black_box(field.as_bytes())));
                }
            })
        });
    }
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
