// src/hashing/mod.rs

//! The classical digest function: modular multiplication with a prime drawn
//! from a fixed table.
//!
//! A digest is `(bytes_as_big_endian_integer(substring) * prime) mod
//! 2^hash_bits`. Distinct substrings with equal digests are indistinguishable
//! to the rest of the algorithm; this collision tolerance is the source of
//! the search's false positives and is accepted by design.

use crate::core::QsError;

/// The fixed, ordered prime table. `prime_index` is 1-based into this table.
pub const PRIMES: [u64; 9] = [17, 19, 23, 29, 31, 37, 41, 43, 47];

/// Widest supported digest: the value register of the associative search
/// circuit carries one qubit per digest bit, so wide digests are not
/// simulable anyway.
pub const MAX_HASH_BITS: u32 = 24;

/// Looks up a prime by its 1-based index. Out of range is fatal; there is no
/// fallback prime.
pub fn get_prime(prime_index: usize) -> Result<u64, QsError> {
    if prime_index == 0 || prime_index > PRIMES.len() {
        return Err(QsError::InvalidPrimeIndex {
            index: prime_index,
            table_len: PRIMES.len(),
        });
    }
    Ok(PRIMES[prime_index - 1])
}

fn check_hash_bits(hash_bits: u32) -> Result<(), QsError> {
    if hash_bits == 0 || hash_bits > MAX_HASH_BITS {
        return Err(QsError::Config {
            message: format!("hash_bits must be in 1..={MAX_HASH_BITS}, got {hash_bits}"),
        });
    }
    Ok(())
}

/// Hashes `substring` into a digest in `[0, 2^hash_bits)`.
///
/// Pure and deterministic: the same bytes with the same `(hash_bits,
/// prime_index)` always produce the same digest. The byte fold keeps only
/// the low `hash_bits` bits at every step, which is exact because the
/// modulus is a power of two.
pub fn make_hash(substring: &[u8], hash_bits: u32, prime_index: usize) -> Result<u64, QsError> {
    check_hash_bits(hash_bits)?;
    let p = get_prime(prime_index)?;
    let mask = (1u64 << hash_bits) - 1;
    let mut r = 0u64;
    for &byte in substring {
        r = ((r << 8) | u64::from(byte)) & mask;
    }
    Ok((r * p) & mask)
}

/// Returns true iff the two byte strings hash to the same digest.
///
/// This is a collision-based comparator: equality of digests, not of
/// strings.
pub fn compare_hash(
    a: &[u8],
    b: &[u8],
    hash_bits: u32,
    prime_index: usize,
) -> Result<bool, QsError> {
    Ok(make_hash(a, hash_bits, prime_index)? == make_hash(b, hash_bits, prime_index)?)
}
