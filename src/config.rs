use std::path::PathBuf;
use std::time::Duration;

use crate::{parse::Strategy, suite::Group};

pub const KIB: usize = 1 << 10;
pub const MIB: usize = 1 << 20;

/// Size of the shared single-threaded line block.
pub const DEFAULT_BLOCK_SIZE: usize = 50 * MIB;

pub const PARALLEL_BLOCK_SIZE: usize = 200 * MIB;
/// Parallel input for strategies too slow for the full block.
pub const SLOW_PARALLEL_BLOCK_SIZE: usize = 20 * MIB;
/// Parallel input for large chunks on many threads, so the chunk count does
/// not leave workers idle.
pub const LARGE_PARALLEL_BLOCK_SIZE: usize = 400 * MIB;

pub const DEFAULT_MIN_TIME: Duration = Duration::from_millis(500);

pub const FAST_CHUNK_SIZES: [usize; 3] = [KIB, MIB, 10 * MIB];
pub const DEFAULT_CHUNK_SIZES: [usize; 1] = [MIB];

/// Settings for one harness run.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Groups to run; empty means all of them.
    pub groups: Vec<Group>,
    /// Only run cases whose name contains this string.
    pub filter: Option<String>,
    pub min_time: Duration,
    pub block_size: usize,
    pub threads: Vec<usize>,
    /// Overrides the per-strategy chunk sizes of the parallel group.
    pub chunk_sizes: Option<Vec<usize>>,
    pub json: Option<PathBuf>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            groups: Vec::new(),
            filter: None,
            min_time: DEFAULT_MIN_TIME,
            block_size: DEFAULT_BLOCK_SIZE,
            threads: (1..=crate::parallel::available_threads()).collect(),
            chunk_sizes: None,
            json: None,
        }
    }
}

impl HarnessConfig {
    pub fn runs_group(&self, group: Group) -> bool {
        self.groups.is_empty() || self.groups.contains(&group)
    }

    pub fn chunk_sizes_for(&self, strategy: Strategy) -> Vec<usize> {
        match (&self.chunk_sizes, strategy) {
            (Some(sizes), _) => sizes.clone(),
            (None, Strategy::FastFloat) => FAST_CHUNK_SIZES.to_vec(),
            (None, _) => DEFAULT_CHUNK_SIZES.to_vec(),
        }
    }
}

/// Input size for a parallel case.
pub fn parallel_block_size(strategy: Strategy, threads: usize, chunk_size: usize) -> usize {
    if chunk_size > 8 * MIB && threads > 6 {
        LARGE_PARALLEL_BLOCK_SIZE
    } else if strategy == Strategy::Std {
        SLOW_PARALLEL_BLOCK_SIZE
    } else {
        PARALLEL_BLOCK_SIZE
    }
}
