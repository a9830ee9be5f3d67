use lazy_static::lazy_static;

use crate::{config::DEFAULT_BLOCK_SIZE, LINE_TERMINATOR, TEMPLATE_LINES};

lazy_static! {
    /// Large block of template lines shared by the single-threaded block benches.
    pub static ref LINE_BLOCK: Vec<u8> = construct_many_lines(DEFAULT_BLOCK_SIZE);
}

/// One newline-terminated copy of every template line.
pub fn template_chunk() -> Vec<u8> {
    let mut chunk = Vec::new();
    for line in TEMPLATE_LINES {
        chunk.extend_from_slice(line.as_bytes());
        chunk.push(LINE_TERMINATOR);
    }
    chunk
}

/// Builds a block of at least `byte_target` bytes by repeating the template
/// lines. The block always ends with a line terminator, so it may overshoot the
/// target by up to one template chunk.
pub fn construct_many_lines(byte_target: usize) -> Vec<u8> {
    let chunk = template_chunk();

    let mut result = Vec::with_capacity(byte_target + chunk.len());
    while result.len() < byte_target {
        result.extend_from_slice(&chunk);
    }

    result
}
