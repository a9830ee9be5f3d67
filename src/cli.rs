//! `convbench` command line.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, ValueHint};

use crate::{
    config::HarnessConfig,
    harness,
    parallel::available_threads,
    report::{write_json_pretty, write_plain, write_plain_header},
    suite::{cases, Group},
};

/// Throughput of text <-> number conversion techniques.
#[derive(Debug, Parser)]
#[command(name = "convbench")]
pub struct Cli {
    /// Benchmark groups to run (default: all)
    #[arg(short = 'g', long = "group", value_enum, value_delimiter = ',')]
    groups: Vec<Group>,

    /// Only run cases whose name contains this string
    #[arg(short = 'f', long = "filter")]
    filter: Option<String>,

    /// List the selected cases without running them
    #[arg(long = "list", action = ArgAction::SetTrue)]
    list: bool,

    /// Minimum measured time per case, in milliseconds
    #[arg(long = "min-time-ms", default_value_t = 500)]
    min_time_ms: u64,

    /// Size of the single-threaded line block, in bytes
    #[arg(long = "block-size")]
    block_size: Option<usize>,

    /// Worker counts for the parallel group (default: 1 up to available cores)
    #[arg(short = 't', long = "threads", value_delimiter = ',')]
    threads: Vec<usize>,

    /// Chunk sizes in bytes for the parallel group
    #[arg(long = "chunk-sizes", value_delimiter = ',')]
    chunk_sizes: Vec<usize>,

    /// Also write the results as JSON to this file
    #[arg(long = "json", value_hint = ValueHint::FilePath)]
    json: Option<PathBuf>,
}

impl Cli {
    pub fn into_config(self) -> Result<HarnessConfig> {
        if self.threads.contains(&0) {
            bail!("--threads values must be at least 1");
        }
        if self.chunk_sizes.contains(&0) {
            bail!("--chunk-sizes values must be at least 1");
        }

        let mut config = HarnessConfig {
            groups: self.groups,
            filter: self.filter,
            min_time: Duration::from_millis(self.min_time_ms),
            json: self.json,
            ..HarnessConfig::default()
        };
        if let Some(block_size) = self.block_size {
            config.block_size = block_size;
        }
        if !self.threads.is_empty() {
            config.threads = self.threads;
        }
        if !self.chunk_sizes.is_empty() {
            config.chunk_sizes = Some(self.chunk_sizes);
        }

        Ok(config)
    }
}

/// Parse CLI args and run the selected cases.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let list = cli.list;
    let config = cli.into_config()?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    if list {
        for routine in cases(&config) {
            writeln!(handle, "{}", routine.name())?;
        }
        return Ok(());
    }

    eprintln!("Cores: {}", available_threads());
    write_plain_header(&mut handle)?;
    let results = harness::run(&config, |measurement| {
        write_plain(measurement, &mut handle)?;
        handle.flush()?;
        Ok(())
    })?;

    if let Some(path) = &config.json {
        let file = File::create(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        write_json_pretty(&results, BufWriter::new(file))
            .with_context(|| format!("failed to write results to {}", path.display()))?;
        eprintln!("Wrote {} results to {}", results.len(), path.display());
    }

    Ok(())
}
