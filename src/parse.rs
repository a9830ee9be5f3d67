//! Field parsers.
//!
//! Every routine parses a number from the start of a byte slice and returns the
//! value together with the number of bytes consumed, or `None` if the slice
//! does not start with a number.

use std::str::FromStr;

/// Technique used to turn text into numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// `FromStr` on a whitespace-delimited token.
    Std,
    /// `fast-float` for doubles, the custom accumulator for integers.
    FastFloat,
    /// `lexical-core` partial parsing for both.
    Lexical,
    /// Hand-written digit accumulation.
    Custom,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::Std,
        Strategy::FastFloat,
        Strategy::Lexical,
        Strategy::Custom,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Std => "std",
            Strategy::FastFloat => "fast_float",
            Strategy::Lexical => "lexical",
            Strategy::Custom => "custom",
        }
    }
}

#[inline]
pub fn parse_i64(strategy: Strategy, bytes: &[u8]) -> Option<(i64, usize)> {
    match strategy {
        Strategy::Std => parse_token(bytes),
        Strategy::FastFloat | Strategy::Custom => custom_parse_int(bytes),
        Strategy::Lexical => lexical_core::parse_partial::<i64>(bytes).ok(),
    }
}

#[inline]
pub fn parse_f64(strategy: Strategy, bytes: &[u8]) -> Option<(f64, usize)> {
    match strategy {
        Strategy::Std => parse_token(bytes),
        Strategy::FastFloat => fast_float::parse_partial::<f64, _>(bytes).ok(),
        Strategy::Lexical => lexical_core::parse_partial::<f64>(bytes).ok(),
        Strategy::Custom => custom_parse_float(bytes),
    }
}

/// Length of the token at the start of `bytes`, up to the first ASCII whitespace.
#[inline]
pub fn token_len(bytes: &[u8]) -> usize {
    bytes
        .iter()
        .position(|byte| byte.is_ascii_whitespace())
        .unwrap_or(bytes.len())
}

#[inline]
fn parse_token<T: FromStr>(bytes: &[u8]) -> Option<(T, usize)> {
    let len = token_len(bytes);
    let token = std::str::from_utf8(&bytes[..len]).ok()?;
    token.parse().ok().map(|value| (value, len))
}

#[inline]
fn split_sign(bytes: &[u8]) -> (bool, usize) {
    match bytes.first() {
        Some(b'-') => (true, 1),
        Some(b'+') => (false, 1),
        _ => (false, 0),
    }
}

/// Accumulates decimal digits into an `i64`. Fails on overflow or when no
/// digit follows the optional sign.
#[inline]
pub fn custom_parse_int(bytes: &[u8]) -> Option<(i64, usize)> {
    let (is_negative, start) = split_sign(bytes);

    let mut i = start;
    let mut magnitude = 0u64;
    while let Some(&byte) = bytes.get(i) {
        if !byte.is_ascii_digit() {
            break;
        }
        magnitude = magnitude.checked_mul(10)?.checked_add((byte - b'0') as u64)?;
        i += 1;
    }

    if i == start {
        return None;
    }

    let value = if is_negative {
        // `i64::MIN` has no positive counterpart.
        if magnitude > i64::MIN.unsigned_abs() {
            return None;
        }
        0i64.wrapping_sub_unsigned(magnitude)
    } else {
        i64::try_from(magnitude).ok()?
    };
    Some((value, i))
}

/// Exact powers of ten representable as `f64`.
const POW10: [f64; 23] = [
    1e0, 1e1, 1e2, 1e3, 1e4, 1e5, 1e6, 1e7, 1e8, 1e9, 1e10, 1e11, 1e12, 1e13, 1e14, 1e15, 1e16,
    1e17, 1e18, 1e19, 1e20, 1e21, 1e22,
];

/// Largest mantissa that converts to `f64` without rounding.
const MAX_EXACT_MANTISSA: u64 = 1 << 53;

/// Parses `[sign] digits [. digits]` by accumulating every digit into one
/// integer mantissa and dividing by a power of ten.
///
/// Both operands are exact, so the division is correctly rounded. Inputs
/// outside that fast path (exponents, long mantissas, `inf`/`nan`) go
/// through `FromStr`.
#[inline]
pub fn custom_parse_float(bytes: &[u8]) -> Option<(f64, usize)> {
    let (is_negative, start) = split_sign(bytes);

    let mut i = start;
    let mut mantissa = 0u64;
    let mut digits = 0usize;
    let mut fraction_digits = 0usize;
    let mut seen_period = false;

    while let Some(&byte) = bytes.get(i) {
        match byte {
            b'0'..=b'9' => {
                mantissa = mantissa.wrapping_mul(10).wrapping_add((byte - b'0') as u64);
                digits += 1;
                if seen_period {
                    fraction_digits += 1;
                }
            }
            b'.' if !seen_period => seen_period = true,
            _ => break,
        }
        i += 1;
    }

    if digits == 0 {
        return parse_token(bytes);
    }

    let has_exponent = matches!(bytes.get(i), Some(b'e' | b'E'));
    if has_exponent
        || digits > 19
        || mantissa > MAX_EXACT_MANTISSA
        || fraction_digits >= POW10.len()
    {
        return parse_token(bytes);
    }

    let value = mantissa as f64 / POW10[fraction_digits];
    Some((if is_negative { -value } else { value }, i))
}
