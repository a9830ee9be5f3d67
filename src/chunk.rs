//! Line-aligned partitioning of a block for parallel parsing.
//!
//! Chunks can be processed in any order and their boundaries are found
//! locally, by looking for the next line terminator after the target size.
//! Exact line numbers are not tracked; doing so would require a full scan.

use memchr::memchr;

use crate::LINE_TERMINATOR;

/// A view of a line-aligned region of a block.
///
/// The terminator that closes a chunk is not part of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk<'a> {
    offset: usize,
    bytes: &'a [u8],
}

impl<'a> Chunk<'a> {
    /// Position of the first byte within the block.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Position just past the last byte within the block.
    pub fn end(&self) -> usize {
        self.offset + self.bytes.len()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }
}

/// Finds where the chunk starting at `pos` ends.
///
/// The scan starts `chunk_size` bytes past `pos`, but never past the last byte
/// of the block, so a trailing terminator always closes the final chunk.
/// Returns `block.len()` if no terminator follows. When the boundary lands on
/// the first of two consecutive terminators, the next chunk starts with the
/// second one.
pub fn next_chunk_end(block: &[u8], pos: usize, chunk_size: usize) -> usize {
    let last = block.len().saturating_sub(1);
    let from = pos.saturating_add(chunk_size).min(last).max(pos);

    match memchr(LINE_TERMINATOR, &block[from..]) {
        Some(idx) => from + idx,
        None => block.len(),
    }
}

/// Iterator over the chunks of a block, in block order.
#[derive(Debug, Clone)]
pub struct Chunks<'a> {
    block: &'a [u8],
    pos: usize,
    chunk_size: usize,
}

impl<'a> Chunks<'a> {
    pub fn new(block: &'a [u8], chunk_size: usize) -> Self {
        Self {
            block,
            pos: 0,
            chunk_size,
        }
    }
}

impl<'a> Iterator for Chunks<'a> {
    type Item = Chunk<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.block.len() {
            return None;
        }

        let start = self.pos;
        let end = next_chunk_end(self.block, start, self.chunk_size);
        self.pos = end + 1;

        Some(Chunk {
            offset: start,
            bytes: &self.block[start..end],
        })
    }
}

/// Splits a block into line-aligned chunks of roughly `chunk_size` bytes.
///
/// `chunk_size` is advisory: every chunk extends to the next terminator.
pub fn split_chunks(block: &[u8], chunk_size: usize) -> Vec<Chunk<'_>> {
    Chunks::new(block, chunk_size).collect()
}
