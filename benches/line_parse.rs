use convbench::{parse_line, tokenize, Separators, Strategy, Tokenizer, TEMPLATE_LINES};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

fn criterion_benchmark(c: &mut Criterion) {
    let line_bytes = TEMPLATE_LINES.iter().map(|line| line.len() as u64).sum();

    let mut group = c.benchmark_group("LineTokenize");
    group.throughput(Throughput::Bytes(line_bytes));
    for tokenizer in Tokenizer::ALL {
        for separators in Separators::ALL {
            group.bench_with_input(
                BenchmarkId::new(tokenizer.name(), separators.name()),
                &separators,
                |b, &separators| {
                    b.iter(|| {
                        for line in TEMPLATE_LINES {
                            black_box(tokenize(black_box(line.as_bytes()), separators, tokenizer));
                        }
                    })
                },
            );
        }
    }
    group.finish();

    let mut group = c.benchmark_group("LineParse");
    group.throughput(Throughput::Bytes(line_bytes));
    for strategy in Strategy::ALL {
        group.bench_function(strategy.name(), |b| {
            b.iter(|| {
                for line in TEMPLATE_LINES {
                    black_box(parse_line(black_box(line.as_bytes()), strategy));
                }
            })
        });
    }
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
