// src/core/bits.rs

//! Big-endian bit-string helpers.
//!
//! The crate represents digests, index patterns and measurement outcomes as
//! `String`s of `'0'`/`'1'` characters, most significant bit first. Two
//! independent decode paths exist on purpose (see the search orchestrator):
//! search-register outcomes are parsed *reversed*, counting-register
//! outcomes are parsed directly. Keep them separate.

use crate::core::QsError;

/// Formats `value` as a big-endian bit string of exactly `width` characters.
///
/// Bits above `width` are truncated; callers guarantee `value < 2^width`.
pub fn format_bits(value: u64, width: usize) -> String {
    (0..width)
        .rev()
        .map(|k| if (value >> k) & 1 == 1 { '1' } else { '0' })
        .collect()
}

/// Parses a big-endian bit string into an integer.
pub fn parse_bits(bits: &str) -> Result<u64, QsError> {
    u64::from_str_radix(bits, 2).map_err(|_| QsError::Simulation {
        message: format!("malformed bit string {bits:?}"),
    })
}

/// Parses a bit string after reversing its character order.
///
/// This is the decode used for measured *search* outcomes, whose
/// qubit-to-classical-bit ordering is reversed relative to the index
/// register's natural significance.
pub fn parse_bits_reversed(bits: &str) -> Result<u64, QsError> {
    let reversed: String = bits.chars().rev().collect();
    parse_bits(&reversed)
}
