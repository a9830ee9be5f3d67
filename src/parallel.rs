use anyhow::{Context, Result};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::{chunk::split_chunks, line::parse_chunk, parse::Strategy};

/// Parses blocks by splitting them into line-aligned chunks and handing one
/// task per chunk to a fixed-size pool.
///
/// Chunks are parsed in no particular order and share nothing but the block.
/// Splitting happens on every call, so it is part of the measured cost.
pub struct ParallelParser {
    pool: ThreadPool,
    chunk_size: usize,
    strategy: Strategy,
}

impl ParallelParser {
    pub fn new(threads: usize, chunk_size: usize, strategy: Strategy) -> Result<Self> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|idx| format!("convbench-worker-{idx}"))
            .build()
            .with_context(|| format!("failed to build a pool of {threads} threads"))?;

        Ok(Self {
            pool,
            chunk_size,
            strategy,
        })
    }

    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Returns the number of records parsed across all chunks.
    pub fn parse(&self, block: &[u8]) -> usize {
        let chunks = split_chunks(block, self.chunk_size);
        let strategy = self.strategy;

        self.pool.install(|| {
            chunks
                .par_iter()
                .map(|chunk| parse_chunk(chunk.as_bytes(), strategy))
                .sum()
        })
    }
}

/// Worker count used when none is configured.
pub fn available_threads() -> usize {
    std::thread::available_parallelism()
        .map(usize::from)
        .unwrap_or(1)
}
