use convbench::{parse_chunk, Strategy, LINE_BLOCK};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

fn criterion_benchmark(c: &mut Criterion) {
    let block: &[u8] = &LINE_BLOCK;

    let mut group = c.benchmark_group("BlockParse");
    group.throughput(Throughput::Bytes(block.len() as u64));
    group.sample_size(10);

    for strategy in Strategy::ALL {
        group.bench_function(strategy.name(), |b| {
            b.iter(|| black_box(parse_chunk(black_box(block), strategy)))
        });
    }
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
