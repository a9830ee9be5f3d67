//! Field formatters. Each writes into a caller-owned buffer, clearing it
//! first, and returns the number of bytes written.

use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FloatFormatter {
    /// `Display`, shortest representation that round-trips.
    Std,
    /// `{:.6}`, six fixed decimals.
    Fixed,
    Ryu,
    Lexical,
}

impl FloatFormatter {
    pub const ALL: [FloatFormatter; 4] = [
        FloatFormatter::Std,
        FloatFormatter::Fixed,
        FloatFormatter::Ryu,
        FloatFormatter::Lexical,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FloatFormatter::Std => "std(shortest)",
            FloatFormatter::Fixed => "std(fixed)",
            FloatFormatter::Ryu => "ryu(shortest)",
            FloatFormatter::Lexical => "lexical(shortest)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntFormatter {
    Std,
    Itoa,
    Lexical,
}

impl IntFormatter {
    pub const ALL: [IntFormatter; 3] = [
        IntFormatter::Std,
        IntFormatter::Itoa,
        IntFormatter::Lexical,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            IntFormatter::Std => "std",
            IntFormatter::Itoa => "itoa",
            IntFormatter::Lexical => "lexical",
        }
    }
}

#[inline]
pub fn format_f64(formatter: FloatFormatter, value: f64, out: &mut Vec<u8>) -> usize {
    out.clear();
    match formatter {
        // Writing into a Vec cannot fail.
        FloatFormatter::Std => {
            let _ = write!(out, "{value}");
        }
        FloatFormatter::Fixed => {
            let _ = write!(out, "{value:.6}");
        }
        FloatFormatter::Ryu => {
            let mut buffer = ryu::Buffer::new();
            out.extend_from_slice(buffer.format(value).as_bytes());
        }
        FloatFormatter::Lexical => {
            let mut buffer = [0u8; lexical_core::BUFFER_SIZE];
            out.extend_from_slice(lexical_core::write(value, &mut buffer));
        }
    }
    out.len()
}

#[inline]
pub fn format_i64(formatter: IntFormatter, value: i64, out: &mut Vec<u8>) -> usize {
    out.clear();
    match formatter {
        IntFormatter::Std => {
            let _ = write!(out, "{value}");
        }
        IntFormatter::Itoa => {
            let mut buffer = itoa::Buffer::new();
            out.extend_from_slice(buffer.format(value).as_bytes());
        }
        IntFormatter::Lexical => {
            let mut buffer = [0u8; lexical_core::BUFFER_SIZE];
            out.extend_from_slice(lexical_core::write(value, &mut buffer));
        }
    }
    out.len()
}
