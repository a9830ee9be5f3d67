//! The benchmark cases and how one iteration of each is run.

use std::hint::black_box;

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

use crate::{
    config::{parallel_block_size, HarnessConfig},
    format::{format_f64, format_i64, FloatFormatter, IntFormatter},
    harness::Counters,
    line::{parse_chunk, parse_line, tokenize, Separators, Tokenizer},
    lines::{count_lines, scan, LineSplitter},
    parallel::ParallelParser,
    parse::{parse_f64, parse_i64, Strategy},
    report::format_size,
    DOUBLE_STRINGS, DOUBLE_VALUES, INT_STRINGS, INT_VALUES, TEMPLATE_LINES,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Group {
    IntParse,
    DoubleParse,
    DoubleFormat,
    IntFormat,
    LineTokenize,
    LineParse,
    SplitLines,
    BlockParse,
    BlockParallel,
}

impl Group {
    pub const ALL: [Group; 9] = [
        Group::IntParse,
        Group::DoubleParse,
        Group::DoubleFormat,
        Group::IntFormat,
        Group::LineTokenize,
        Group::LineParse,
        Group::SplitLines,
        Group::BlockParse,
        Group::BlockParallel,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Group::IntParse => "IntFieldParse",
            Group::DoubleParse => "DoubleFieldParse",
            Group::DoubleFormat => "DoubleFieldFormat",
            Group::IntFormat => "IntFieldFormat",
            Group::LineTokenize => "LineTokenize",
            Group::LineParse => "LineParse",
            Group::SplitLines => "SplitLines",
            Group::BlockParse => "BlockParse",
            Group::BlockParallel => "BlockParseParallel",
        }
    }

    /// What the item counter of this group counts.
    pub fn items_label(&self) -> &'static str {
        match self {
            Group::IntParse | Group::DoubleParse | Group::DoubleFormat | Group::IntFormat => {
                "fields"
            }
            Group::LineTokenize | Group::LineParse | Group::SplitLines => "lines",
            Group::BlockParse | Group::BlockParallel => "records",
        }
    }
}

/// One benchmark case.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Routine {
    IntParse(Strategy),
    DoubleParse(Strategy),
    DoubleFormat(FloatFormatter),
    IntFormat(IntFormatter),
    LineTokenize(Tokenizer, Separators),
    LineParse(Strategy),
    SplitLines(LineSplitter),
    /// Baseline that touches every byte of the block once.
    Scan,
    BlockParse(Strategy),
    BlockParallel {
        strategy: Strategy,
        threads: usize,
        chunk_size: usize,
    },
}

impl Routine {
    pub fn group(&self) -> Group {
        match self {
            Routine::IntParse(_) => Group::IntParse,
            Routine::DoubleParse(_) => Group::DoubleParse,
            Routine::DoubleFormat(_) => Group::DoubleFormat,
            Routine::IntFormat(_) => Group::IntFormat,
            Routine::LineTokenize(..) => Group::LineTokenize,
            Routine::LineParse(_) => Group::LineParse,
            Routine::SplitLines(_) | Routine::Scan => Group::SplitLines,
            Routine::BlockParse(_) => Group::BlockParse,
            Routine::BlockParallel { .. } => Group::BlockParallel,
        }
    }

    pub fn name(&self) -> String {
        let title = self.group().title();
        match self {
            Routine::IntParse(strategy)
            | Routine::DoubleParse(strategy)
            | Routine::LineParse(strategy)
            | Routine::BlockParse(strategy) => format!("{title}/{}", strategy.name()),
            Routine::DoubleFormat(formatter) => format!("{title}/{}", formatter.name()),
            Routine::IntFormat(formatter) => format!("{title}/{}", formatter.name()),
            Routine::LineTokenize(tokenizer, separators) => {
                format!("{title}/{}/{}", tokenizer.name(), separators.name())
            }
            Routine::SplitLines(splitter) => format!("{title}/{}", splitter.name()),
            Routine::Scan => "ScanSpeed".to_string(),
            Routine::BlockParallel {
                strategy,
                threads,
                chunk_size,
            } => format!(
                "{title}/{}/threads:{threads}/chunk:{}",
                strategy.name(),
                format_size(*chunk_size as u64)
            ),
        }
    }

    pub fn threads(&self) -> Option<usize> {
        match self {
            Routine::BlockParallel { threads, .. } => Some(*threads),
            _ => None,
        }
    }

    pub fn chunk_size(&self) -> Option<usize> {
        match self {
            Routine::BlockParallel { chunk_size, .. } => Some(*chunk_size),
            _ => None,
        }
    }

    /// Size of the line block this case reads, if it reads one.
    pub fn block_size(&self, config: &HarnessConfig) -> Option<usize> {
        match self {
            Routine::SplitLines(_) | Routine::Scan | Routine::BlockParse(_) => {
                Some(config.block_size)
            }
            Routine::BlockParallel {
                strategy,
                threads,
                chunk_size,
            } => Some(parallel_block_size(*strategy, *threads, *chunk_size)),
            _ => None,
        }
    }
}

/// Every case enabled by `config`, in run order.
pub fn cases(config: &HarnessConfig) -> Vec<Routine> {
    let mut routines = Vec::new();

    for group in Group::ALL {
        if !config.runs_group(group) {
            continue;
        }
        match group {
            Group::IntParse => routines.extend(Strategy::ALL.map(Routine::IntParse)),
            Group::DoubleParse => routines.extend(Strategy::ALL.map(Routine::DoubleParse)),
            Group::DoubleFormat => routines.extend(FloatFormatter::ALL.map(Routine::DoubleFormat)),
            Group::IntFormat => routines.extend(IntFormatter::ALL.map(Routine::IntFormat)),
            Group::LineTokenize => {
                for tokenizer in Tokenizer::ALL {
                    for separators in Separators::ALL {
                        routines.push(Routine::LineTokenize(tokenizer, separators));
                    }
                }
            }
            Group::LineParse => routines.extend(Strategy::ALL.map(Routine::LineParse)),
            Group::SplitLines => {
                routines.push(Routine::Scan);
                routines.extend(LineSplitter::ALL.map(Routine::SplitLines));
            }
            Group::BlockParse => routines.extend(Strategy::ALL.map(Routine::BlockParse)),
            Group::BlockParallel => {
                for strategy in Strategy::ALL {
                    for chunk_size in config.chunk_sizes_for(strategy) {
                        for &threads in &config.threads {
                            routines.push(Routine::BlockParallel {
                                strategy,
                                threads,
                                chunk_size,
                            });
                        }
                    }
                }
            }
        }
    }

    if let Some(filter) = &config.filter {
        routines.retain(|routine| routine.name().contains(filter.as_str()));
    }

    routines
}

/// A case ready to be timed: the worker pool is built and scratch space
/// allocated up front so neither is part of an iteration.
pub struct Bench {
    routine: Routine,
    prepared: Prepared,
}

enum Prepared {
    Serial { scratch: Vec<u8> },
    Parallel(ParallelParser),
}

impl Bench {
    pub fn new(routine: Routine) -> Result<Self> {
        let prepared = match routine {
            Routine::BlockParallel {
                strategy,
                threads,
                chunk_size,
            } => Prepared::Parallel(ParallelParser::new(threads, chunk_size, strategy)?),
            _ => Prepared::Serial {
                scratch: Vec::with_capacity(1024),
            },
        };

        Ok(Self { routine, prepared })
    }

    pub fn routine(&self) -> Routine {
        self.routine
    }

    /// Runs one iteration. `block` is ignored by cases that work on the
    /// fixture tables.
    pub fn iterate(&mut self, block: &[u8]) -> Counters {
        let scratch = match &mut self.prepared {
            Prepared::Parallel(parser) => {
                return Counters {
                    bytes: block.len() as u64,
                    items: parser.parse(black_box(block)) as u64,
                };
            }
            Prepared::Serial { scratch } => scratch,
        };

        match self.routine {
            Routine::IntParse(strategy) => int_parse(strategy),
            Routine::DoubleParse(strategy) => double_parse(strategy),
            Routine::DoubleFormat(formatter) => double_format(formatter, scratch),
            Routine::IntFormat(formatter) => int_format(formatter, scratch),
            Routine::LineTokenize(tokenizer, separators) => line_tokenize(tokenizer, separators),
            Routine::LineParse(strategy) => line_parse(strategy),
            Routine::SplitLines(splitter) => Counters {
                bytes: block.len() as u64,
                items: count_lines(black_box(block), splitter) as u64,
            },
            Routine::Scan => {
                black_box(scan(black_box(block)));
                Counters {
                    bytes: block.len() as u64,
                    items: 0,
                }
            }
            Routine::BlockParse(strategy) => Counters {
                bytes: block.len() as u64,
                items: parse_chunk(black_box(block), strategy) as u64,
            },
            // `new` gives every parallel case a pool.
            Routine::BlockParallel { .. } => unreachable!("parallel case without a worker pool"),
        }
    }
}

fn int_parse(strategy: Strategy) -> Counters {
    let mut counters = Counters::default();
    for text in INT_STRINGS {
        let Some((value, _)) = parse_i64(strategy, black_box(text.as_bytes())) else {
            break;
        };
        black_box(value);
        counters.add_item(text.len());
    }
    counters
}

fn double_parse(strategy: Strategy) -> Counters {
    let mut counters = Counters::default();
    for text in DOUBLE_STRINGS {
        let Some((value, _)) = parse_f64(strategy, black_box(text.as_bytes())) else {
            break;
        };
        black_box(value);
        counters.add_item(text.len());
    }
    counters
}

fn double_format(formatter: FloatFormatter, scratch: &mut Vec<u8>) -> Counters {
    let mut counters = Counters::default();
    for value in DOUBLE_VALUES {
        let written = format_f64(formatter, black_box(value), scratch);
        black_box(&scratch);
        counters.add_item(written);
    }
    counters
}

fn int_format(formatter: IntFormatter, scratch: &mut Vec<u8>) -> Counters {
    let mut counters = Counters::default();
    for value in INT_VALUES {
        let written = format_i64(formatter, black_box(value), scratch);
        black_box(&scratch);
        counters.add_item(written);
    }
    counters
}

fn line_tokenize(tokenizer: Tokenizer, separators: Separators) -> Counters {
    let mut counters = Counters::default();
    for line in TEMPLATE_LINES {
        let Some(fields) = tokenize(black_box(line.as_bytes()), separators, tokenizer) else {
            break;
        };
        black_box(fields);
        counters.add_item(line.len());
    }
    counters
}

fn line_parse(strategy: Strategy) -> Counters {
    let mut counters = Counters::default();
    for line in TEMPLATE_LINES {
        let Some(record) = parse_line(black_box(line.as_bytes()), strategy) else {
            break;
        };
        black_box(record);
        counters.add_item(line.len());
    }
    counters
}
