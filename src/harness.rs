//! Timed iteration loop and the runner that drives the suite.

use std::hint::black_box;
use std::ops::AddAssign;
use std::time::{Duration, Instant};

use anyhow::{bail, Result};
use serde::Serialize;

use crate::{
    block::construct_many_lines,
    config::HarnessConfig,
    report::format_size,
    suite::{cases, Bench, Group, Routine},
};

/// What one iteration processed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Counters {
    pub bytes: u64,
    pub items: u64,
}

impl Counters {
    #[inline]
    pub fn add_item(&mut self, bytes: usize) {
        self.bytes += bytes as u64;
        self.items += 1;
    }
}

impl AddAssign for Counters {
    fn add_assign(&mut self, rhs: Self) {
        self.bytes += rhs.bytes;
        self.items += rhs.items;
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timing {
    pub iterations: u64,
    pub elapsed: Duration,
    pub counters: Counters,
}

/// Runs `routine` once to warm up, then in timed batches until `min_time`
/// has passed. Always times at least one iteration.
///
/// The clock is read once per batch, not once per iteration. Batches start
/// at a single iteration and grow until one takes `min_time / BATCH_FRACTION`.
pub fn measure<F>(min_time: Duration, mut routine: F) -> Timing
where
    F: FnMut() -> Counters,
{
    black_box(routine());

    let mut batch = 1;
    let mut iterations = 0;
    let mut elapsed = Duration::ZERO;
    let mut counters = Counters::default();
    loop {
        let start = Instant::now();
        for _ in 0..batch {
            counters += black_box(routine());
        }
        let batch_elapsed = start.elapsed();

        iterations += batch;
        elapsed += batch_elapsed;
        if elapsed >= min_time {
            return Timing {
                iterations,
                elapsed,
                counters,
            };
        }

        batch = next_batch(batch, batch_elapsed, min_time);
    }
}

/// Batches stop growing once they take this fraction of `min_time`.
pub const BATCH_FRACTION: u32 = 10;

/// Size of the batch following one of `batch` iterations that took
/// `batch_elapsed`.
fn next_batch(batch: u64, batch_elapsed: Duration, min_time: Duration) -> u64 {
    let target = min_time / BATCH_FRACTION;
    if batch_elapsed >= target {
        return batch;
    }
    // Grow at most tenfold per step, so one noisy fast batch cannot
    // overshoot `min_time` by much.
    let factor = if batch_elapsed.is_zero() {
        10.0
    } else {
        (target.as_secs_f64() / batch_elapsed.as_secs_f64()).min(10.0)
    };
    ((batch as f64 * factor).ceil() as u64).max(batch + 1)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Measurement {
    pub group: Group,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threads: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chunk_size: Option<usize>,
    pub iterations: u64,
    pub seconds: f64,
    pub bytes: u64,
    pub items: u64,
}

impl Measurement {
    pub fn new(routine: &Routine, timing: Timing) -> Self {
        Self {
            group: routine.group(),
            name: routine.name(),
            threads: routine.threads(),
            chunk_size: routine.chunk_size(),
            iterations: timing.iterations,
            seconds: timing.elapsed.as_secs_f64(),
            bytes: timing.counters.bytes,
            items: timing.counters.items,
        }
    }

    pub fn time_per_iteration(&self) -> Duration {
        Duration::from_secs_f64(self.seconds / self.iterations.max(1) as f64)
    }

    pub fn bytes_per_second(&self) -> f64 {
        rate(self.bytes, self.seconds)
    }

    pub fn items_per_second(&self) -> f64 {
        rate(self.items, self.seconds)
    }
}

fn rate(count: u64, seconds: f64) -> f64 {
    if seconds > 0.0 {
        count as f64 / seconds
    } else {
        0.0
    }
}

/// Holds the most recently built line block, so consecutive cases of the
/// same input size share it.
#[derive(Default)]
struct BlockCache {
    size: usize,
    block: Vec<u8>,
}

impl BlockCache {
    fn get(&mut self, size: usize) -> &[u8] {
        if self.size != size || self.block.is_empty() {
            // Release the old block before building the next one.
            self.block = Vec::new();
            self.block = construct_many_lines(size);
            self.size = size;
            eprintln!(
                "Generated line block: {} bytes ({})",
                self.block.len(),
                format_size(self.block.len() as u64)
            );
        }
        &self.block
    }
}

/// Runs every case selected by `config`, calling `on_result` as each one
/// finishes.
pub fn run<F>(config: &HarnessConfig, mut on_result: F) -> Result<Vec<Measurement>>
where
    F: FnMut(&Measurement) -> Result<()>,
{
    let routines = cases(config);
    if routines.is_empty() {
        bail!("no benchmark case matches the selected groups and filter");
    }

    eprintln!(
        "Running {} cases, at least {:?} each",
        routines.len(),
        config.min_time
    );

    let mut blocks = BlockCache::default();
    let mut results = Vec::with_capacity(routines.len());
    for routine in routines {
        let block: &[u8] = match routine.block_size(config) {
            Some(size) => blocks.get(size),
            None => &[],
        };

        let mut bench = Bench::new(routine)?;
        let timing = measure(config.min_time, || bench.iterate(block));
        let measurement = Measurement::new(&routine, timing);

        on_result(&measurement)?;
        results.push(measurement);
    }

    Ok(results)
}
