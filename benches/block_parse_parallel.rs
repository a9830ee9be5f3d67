use convbench::{
    config::{parallel_block_size, FAST_CHUNK_SIZES, MIB},
    construct_many_lines,
    parallel::available_threads,
    report::format_size,
    ParallelParser, Strategy,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

fn criterion_benchmark(c: &mut Criterion) {
    let max_threads = available_threads();

    for strategy in Strategy::ALL {
        let chunk_sizes = match strategy {
            Strategy::FastFloat => FAST_CHUNK_SIZES.to_vec(),
            _ => vec![MIB],
        };

        let mut group = c.benchmark_group(format!("BlockParseParallel/{}", strategy.name()));
        group.sample_size(10);

        for chunk_size in chunk_sizes {
            let block_size = parallel_block_size(strategy, max_threads, chunk_size);
            let block = construct_many_lines(block_size);
            group.throughput(Throughput::Bytes(block.len() as u64));

            for threads in 1..=max_threads {
                let parser = ParallelParser::new(threads, chunk_size, strategy).unwrap();
                group.bench_with_input(
                    BenchmarkId::new(format!("chunk:{}", format_size(chunk_size as u64)), threads),
                    &block,
                    |b, block| b.iter(|| black_box(parser.parse(black_box(block)))),
                );
            }
        }
        group.finish();
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
