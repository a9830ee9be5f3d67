//! Finding line breaks in a block.

use std::io::BufRead;

use memchr::memchr_iter;

use crate::LINE_TERMINATOR;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineSplitter {
    /// `memchr_iter` over the whole block.
    Memchr,
    /// `<[u8]>::split` on the terminator.
    SliceSplit,
    /// `BufRead::read_until` into a reused buffer.
    ReadUntil,
    /// `BufRead::lines`, allocating a `String` per line.
    BufLines,
    /// Compare every byte against the terminator.
    Bytewise,
}

impl LineSplitter {
    pub const ALL: [LineSplitter; 5] = [
        LineSplitter::Memchr,
        LineSplitter::SliceSplit,
        LineSplitter::ReadUntil,
        LineSplitter::BufLines,
        LineSplitter::Bytewise,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            LineSplitter::Memchr => "memchr",
            LineSplitter::SliceSplit => "slice_split",
            LineSplitter::ReadUntil => "read_until",
            LineSplitter::BufLines => "buf_lines",
            LineSplitter::Bytewise => "bytewise",
        }
    }
}

/// 1 if the block ends with a line that has no terminator.
#[inline]
fn unterminated_tail(block: &[u8]) -> usize {
    match block.last() {
        Some(&byte) if byte != LINE_TERMINATOR => 1,
        _ => 0,
    }
}

/// Counts the lines of a block. A final line without a terminator counts.
pub fn count_lines(block: &[u8], splitter: LineSplitter) -> usize {
    match splitter {
        LineSplitter::Memchr => {
            memchr_iter(LINE_TERMINATOR, block).count() + unterminated_tail(block)
        }
        LineSplitter::SliceSplit => {
            if block.is_empty() {
                return 0;
            }
            let pieces = block.split(|&byte| byte == LINE_TERMINATOR).count();
            pieces - 1 + unterminated_tail(block)
        }
        LineSplitter::ReadUntil => count_lines_read_until(block),
        LineSplitter::BufLines => block.lines().map_while(Result::ok).count(),
        LineSplitter::Bytewise => {
            block.iter().filter(|&&byte| byte == LINE_TERMINATOR).count() + unterminated_tail(block)
        }
    }
}

fn count_lines_read_until(mut reader: &[u8]) -> usize {
    let mut buf = Vec::with_capacity(64);
    let mut lines = 0;

    loop {
        // Reading from a slice cannot fail.
        let bytes_read = reader.read_until(LINE_TERMINATOR, &mut buf).unwrap_or(0);
        if bytes_read == 0 {
            break;
        }
        lines += 1;
        buf.clear();
    }

    lines
}

/// Touches every byte once. Returns a checksum so the loop is not elided.
pub fn scan(block: &[u8]) -> u64 {
    block
        .iter()
        .fold(0u64, |acc, &byte| acc.wrapping_add(byte as u64))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::block::construct_many_lines;

    #[test]
    fn splitters_agree_on_block() {
        let block = construct_many_lines(10_000);
        let expected = block.iter().filter(|&&byte| byte == b'\n').count();

        for splitter in LineSplitter::ALL {
            assert_eq!(count_lines(&block, splitter), expected, "{splitter:?}");
        }
    }

    #[test]
    fn unterminated_last_line_counts() {
        for splitter in LineSplitter::ALL {
            assert_eq!(count_lines(b"a\nb\nc", splitter), 3, "{splitter:?}");
            assert_eq!(count_lines(b"a\n\nc\n", splitter), 3, "{splitter:?}");
            assert_eq!(count_lines(b"", splitter), 0, "{splitter:?}");
        }
    }

    #[test]
    fn scan_sums_bytes() {
        assert_eq!(scan(b"\x01\x02\x03"), 6);
        assert_eq!(scan(b""), 0);
    }
}
