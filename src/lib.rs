pub mod block;
pub mod chunk;
pub mod cli;
pub mod config;
pub mod format;
pub mod harness;
pub mod line;
pub mod lines;
pub mod parallel;
pub mod parse;
pub mod report;
pub mod suite;

pub use block::{construct_many_lines, LINE_BLOCK};
pub use chunk::{split_chunks, Chunk, Chunks};
pub use line::{parse_chunk, parse_line, tokenize, Record, Separators, Tokenizer};
pub use parallel::ParallelParser;
pub use parse::{parse_f64, parse_i64, Strategy};

/// Lines the synthetic blocks are built from: `row col value`.
pub const TEMPLATE_LINES: [&str; 3] = ["123456 234567 333.323", "1 234567 333.323", "1 2 3"];

pub const INT_STRINGS: [&str; 2] = ["123456", "1"];
pub const INT_VALUES: [i64; 2] = [123456, 1];

pub const DOUBLE_STRINGS: [&str; 3] = ["123456", "1", "333.323"];
pub const DOUBLE_VALUES: [f64; 3] = [123456.0, 1.0, 333.323];

pub const LINE_TERMINATOR: u8 = b'\n';
