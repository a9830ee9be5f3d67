//! Tokenizing and parsing `row col value` lines.

use std::hint::black_box;

use memchr::{memchr, memchr2};

use crate::{
    parse::{parse_f64, parse_i64, Strategy},
    LINE_TERMINATOR,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Record {
    pub row: i64,
    pub col: i64,
    pub value: f64,
}

/// Bytes that separate fields within a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Separators {
    SpaceOnly,
    SpaceTab,
}

impl Separators {
    pub const ALL: [Separators; 2] = [Separators::SpaceOnly, Separators::SpaceTab];

    #[inline]
    pub fn contains(&self, byte: u8) -> bool {
        match self {
            Separators::SpaceOnly => byte == b' ',
            Separators::SpaceTab => byte == b' ' || byte == b'\t',
        }
    }

    #[inline]
    fn find(&self, bytes: &[u8]) -> Option<usize> {
        match self {
            Separators::SpaceOnly => memchr(b' ', bytes),
            Separators::SpaceTab => memchr2(b' ', b'\t', bytes),
        }
    }

    #[inline]
    fn skip(&self, bytes: &[u8], mut pos: usize) -> usize {
        while pos < bytes.len() && self.contains(bytes[pos]) {
            pos += 1;
        }
        pos
    }

    pub fn name(&self) -> &'static str {
        match self {
            Separators::SpaceOnly => "space_only",
            Separators::SpaceTab => "space_tab",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tokenizer {
    /// `<[u8]>::split` with a separator predicate.
    Split,
    /// `memchr`/`memchr2` searches for the next separator.
    Memchr,
}

impl Tokenizer {
    pub const ALL: [Tokenizer; 2] = [Tokenizer::Split, Tokenizer::Memchr];

    pub fn name(&self) -> &'static str {
        match self {
            Tokenizer::Split => "split",
            Tokenizer::Memchr => "memchr",
        }
    }
}

/// Splits a line into exactly three non-empty fields. Runs of separators
/// count as one; anything other than three fields is rejected.
pub fn tokenize(line: &[u8], separators: Separators, tokenizer: Tokenizer) -> Option<[&[u8]; 3]> {
    match tokenizer {
        Tokenizer::Split => {
            let mut fields = line
                .split(|&byte| separators.contains(byte))
                .filter(|field| !field.is_empty());
            let tokens = [fields.next()?, fields.next()?, fields.next()?];
            match fields.next() {
                Some(_) => None,
                None => Some(tokens),
            }
        }
        Tokenizer::Memchr => {
            let mut tokens: [&[u8]; 3] = [&[]; 3];
            let mut pos = separators.skip(line, 0);
            for token in tokens.iter_mut() {
                if pos >= line.len() {
                    return None;
                }
                let end = separators
                    .find(&line[pos..])
                    .map_or(line.len(), |idx| pos + idx);
                *token = &line[pos..end];
                pos = separators.skip(line, end);
            }
            if pos < line.len() {
                return None;
            }
            Some(tokens)
        }
    }
}

#[inline]
/// Offset of the first byte that is not ASCII whitespace.
#[inline]
fn token_start(bytes: &[u8]) -> usize {
    bytes
        .iter()
        .position(|byte| !byte.is_ascii_whitespace())
        .unwrap_or(bytes.len())
}

fn skip_blanks(bytes: &[u8], mut pos: usize) -> usize {
    while pos < bytes.len() && (bytes[pos] == b' ' || bytes[pos] == b'\t') {
        pos += 1;
    }
    pos
}

/// Parses one record starting at `pos`, returning it and the position just
/// past the value field.
#[inline]
fn parse_record_at(bytes: &[u8], pos: usize, strategy: Strategy) -> Option<(Record, usize)> {
    let (row, len) = parse_i64(strategy, &bytes[pos..])?;
    let pos = skip_blanks(bytes, pos + len);

    let (col, len) = parse_i64(strategy, &bytes[pos..])?;
    let pos = skip_blanks(bytes, pos + len);

    let (value, len) = parse_f64(strategy, &bytes[pos..])?;

    Some((Record { row, col, value }, pos + len))
}

/// Parses a single line. Trailing bytes after the value are ignored.
pub fn parse_line(line: &[u8], strategy: Strategy) -> Option<Record> {
    let pos = skip_blanks(line, 0);
    parse_record_at(line, pos, strategy).map(|(record, _)| record)
}

/// Parses every record of a chunk and returns how many were parsed.
///
/// Blank lines are skipped, including the one a chunk starts with when its
/// boundary falls between two terminators. Parsing stops at the first
/// malformed field and the rest of the chunk is dropped.
pub fn parse_chunk(chunk: &[u8], strategy: Strategy) -> usize {
    match strategy {
        Strategy::Std => parse_chunk_tokens(chunk),
        _ => parse_chunk_lines(chunk, strategy),
    }
}

fn parse_chunk_lines(chunk: &[u8], strategy: Strategy) -> usize {
    let mut records = 0;
    let mut pos = 0;

    loop {
        pos += token_start(&chunk[pos..]);
        if pos == chunk.len() {
            break;
        }
        let Some((record, end)) = parse_record_at(chunk, pos, strategy) else {
            break;
        };
        black_box(record);
        records += 1;

        pos = match memchr(LINE_TERMINATOR, &chunk[end..]) {
            Some(idx) => end + idx + 1,
            None => chunk.len(),
        };
    }

    records
}

#[inline]
fn parse_fields(row: &[u8], col: &[u8], value: &[u8]) -> Option<Record> {
    let (row, _) = parse_i64(Strategy::Std, row)?;
    let (col, _) = parse_i64(Strategy::Std, col)?;
    let (value, _) = parse_f64(Strategy::Std, value)?;
    Some(Record { row, col, value })
}

/// Reads whitespace-separated tokens three at a time, ignoring line structure.
fn parse_chunk_tokens(chunk: &[u8]) -> usize {
    let mut tokens = chunk
        .split(|byte| byte.is_ascii_whitespace())
        .filter(|token| !token.is_empty());
    let mut records = 0;

    while let Some(row) = tokens.next() {
        let (Some(col), Some(value)) = (tokens.next(), tokens.next()) else {
            break;
        };
        let Some(record) = parse_fields(row, col, value) else {
            break;
        };
        black_box(record);
        records += 1;
    }

    records
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{block::construct_many_lines, TEMPLATE_LINES};

    fn expected_records() -> [Record; 3] {
        [
            Record {
                row: 123456,
                col: 234567,
                value: 333.323,
            },
            Record {
                row: 1,
                col: 234567,
                value: 333.323,
            },
            Record {
                row: 1,
                col: 2,
                value: 3.0,
            },
        ]
    }

    #[test]
    fn tokenizers_split_template_lines() {
        for tokenizer in Tokenizer::ALL {
            for separators in Separators::ALL {
                let fields = tokenize(TEMPLATE_LINES[0].as_bytes(), separators, tokenizer);
                assert_eq!(
                    fields,
                    Some([&b"123456"[..], &b"234567"[..], &b"333.323"[..]]),
                    "{tokenizer:?} {separators:?}"
                );
            }
        }
    }

    #[test]
    fn tab_is_only_a_separator_when_requested() {
        let line = b"1\t2 3";
        for tokenizer in Tokenizer::ALL {
            assert_eq!(
                tokenize(line, Separators::SpaceTab, tokenizer),
                Some([&b"1"[..], &b"2"[..], &b"3"[..]])
            );
            assert_eq!(tokenize(line, Separators::SpaceOnly, tokenizer), None);
        }
    }

    #[test]
    fn wrong_field_count_is_rejected() {
        for tokenizer in Tokenizer::ALL {
            assert_eq!(tokenize(b"1 2", Separators::SpaceOnly, tokenizer), None);
            assert_eq!(tokenize(b"1 2 3 4", Separators::SpaceOnly, tokenizer), None);
            assert_eq!(tokenize(b"", Separators::SpaceOnly, tokenizer), None);
            assert_eq!(
                tokenize(b"  1  2 3 ", Separators::SpaceOnly, tokenizer),
                Some([&b"1"[..], &b"2"[..], &b"3"[..]])
            );
        }
    }

    #[test]
    fn every_strategy_parses_template_lines() {
        for strategy in Strategy::ALL {
            let records: Vec<Option<Record>> = TEMPLATE_LINES
                .iter()
                .map(|line| parse_line(line.as_bytes(), strategy))
                .collect();
            let expected: Vec<Option<Record>> = expected_records().into_iter().map(Some).collect();
            assert_eq!(records, expected, "{strategy:?}");
        }
    }

    #[test]
    fn every_strategy_counts_block_records() {
        let block = construct_many_lines(4096);
        let lines = block.iter().filter(|&&byte| byte == LINE_TERMINATOR).count();
        for strategy in Strategy::ALL {
            assert_eq!(parse_chunk(&block, strategy), lines, "{strategy:?}");
        }
    }

    #[test]
    fn chunk_without_trailing_terminator_is_fully_parsed() {
        for strategy in Strategy::ALL {
            assert_eq!(parse_chunk(b"1 2 3\n4 5 6.5", strategy), 2, "{strategy:?}");
        }
    }

    #[test]
    fn malformed_field_abandons_rest_of_chunk() {
        let chunk = b"1 2 3\n4 x 6\n7 8 9\n";
        for strategy in Strategy::ALL {
            assert_eq!(parse_chunk(chunk, strategy), 1, "{strategy:?}");
        }
    }

    #[test]
    fn blank_lines_are_skipped() {
        for strategy in Strategy::ALL {
            assert_eq!(parse_chunk(b"\n1 2 3\n\n\n4 5 6.5\n", strategy), 2, "{strategy:?}");
            assert_eq!(parse_chunk(b"\n", strategy), 0, "{strategy:?}");
            assert_eq!(parse_chunk(b"", strategy), 0, "{strategy:?}");
        }
    }
}
