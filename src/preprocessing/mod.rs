// src/preprocessing/mod.rs

//! Classical preprocessing: scan the text, digest every overlapping window,
//! and collect the index positions whose digest matches a target.
//!
//! The output is positional: `digests[i]` is the digest bit string of the
//! window starting at byte `i`. The set of matching index bit strings
//! (`valid_states`) is the ground truth the quantum oracle marks.

use crate::core::bits::format_bits;
use crate::core::QsError;
use crate::hashing::{compare_hash, make_hash};

/// Everything the quantum stages need, produced once per run and immutable
/// thereafter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preprocessed {
    /// Index bit strings (width `n_qubits`) whose window digest matches a
    /// target digest.
    pub valid_states: Vec<String>,
    /// Number of overlapping windows, `text.len() - target_len + 1`.
    pub n_substr: usize,
    /// Index register width, `ceil(log2(n_substr))` with a floor of 1.
    pub n_qubits: usize,
    /// Digest bit string (width `hash_bits`) of every window, index-aligned
    /// with the window position.
    pub digests: Vec<String>,
    /// Digests of the matching windows, deduplicated in first-seen order.
    /// A duplicated entry would make the value oracle phase-flip the same
    /// pattern twice, cancelling the mark.
    pub marked_digests: Vec<String>,
}

/// Index register width for `n_substr` windows.
///
/// Not a power of two leaves `2^n_qubits - n_substr` dead index states;
/// they are never loaded and never marked. A single window still needs one
/// qubit to form a register.
pub fn compute_n_qubits(n_substr: usize) -> usize {
    if n_substr <= 2 {
        1
    } else {
        ((n_substr - 1).ilog2() + 1) as usize
    }
}

/// Digests every window of `input_text` and marks the positions matching
/// any of `search_values`.
///
/// All targets must share one length; a mismatch is a configuration error,
/// as is an empty target set or a text shorter than the targets.
pub fn classical_preprocessing(
    input_text: &str,
    search_values: &[&str],
    hash_bits: u32,
    prime_index: usize,
) -> Result<Preprocessed, QsError> {
    let Some(first) = search_values.first() else {
        return Err(QsError::Config {
            message: "at least one search value is required".to_string(),
        });
    };
    let substring_length = first.len();
    if substring_length == 0 {
        return Err(QsError::Config {
            message: "search values must be non-empty".to_string(),
        });
    }
    if let Some(bad) = search_values.iter().find(|v| v.len() != substring_length) {
        return Err(QsError::Config {
            message: format!(
                "all search values must share one length: {bad:?} has length {}, expected {substring_length}",
                bad.len()
            ),
        });
    }
    let text = input_text.as_bytes();
    if text.len() < substring_length {
        return Err(QsError::Config {
            message: format!(
                "input text ({} bytes) is shorter than the search values ({substring_length} bytes)",
                text.len()
            ),
        });
    }

    let n_substr = text.len() - substring_length + 1;
    let n_qubits = compute_n_qubits(n_substr);

    let mut valid_states = Vec::new();
    let mut digests = Vec::with_capacity(n_substr);
    let mut marked_digests: Vec<String> = Vec::new();

    for (i, window) in text.windows(substring_length).enumerate() {
        let digest = make_hash(window, hash_bits, prime_index)?;
        let digest_bits = format_bits(digest, hash_bits as usize);
        let mut matched = false;
        for value in search_values {
            if compare_hash(window, value.as_bytes(), hash_bits, prime_index)? {
                matched = true;
                break;
            }
        }
        if matched {
            valid_states.push(format_bits(i as u64, n_qubits));
            if !marked_digests.contains(&digest_bits) {
                marked_digests.push(digest_bits.clone());
            }
        }
        digests.push(digest_bits);
    }

    Ok(Preprocessed {
        valid_states,
        n_substr,
        n_qubits,
        digests,
        marked_digests,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qubit_count_covers_the_index_space() {
        assert_eq!(compute_n_qubits(1), 1);
        assert_eq!(compute_n_qubits(2), 1);
        assert_eq!(compute_n_qubits(8), 3);
        assert_eq!(compute_n_qubits(9), 4);
        assert_eq!(compute_n_qubits(22), 5);
    }

    #[test]
    fn mismatched_target_lengths_are_a_config_error() {
        let err = classical_preprocessing("abcdef", &["ab", "abc"], 8, 1).unwrap_err();
        assert!(matches!(err, QsError::Config { .. }));
    }

    #[test]
    fn empty_target_set_is_a_config_error() {
        assert!(classical_preprocessing("abcdef", &[], 8, 1).is_err());
    }

    #[test]
    fn text_shorter_than_target_is_a_config_error() {
        assert!(classical_preprocessing("ab", &["abc"], 8, 1).is_err());
    }

    #[test]
    fn digests_are_index_aligned_with_windows() -> Result<(), QsError> {
        let pre = classical_preprocessing("abcd", &["bc"], 8, 1)?;
        assert_eq!(pre.n_substr, 3);
        assert_eq!(pre.digests.len(), 3);
        for (i, digest) in pre.digests.iter().enumerate() {
            let window = &b"abcd"[i..i + 2];
            let expected = format_bits(make_hash(window, 8, 1)?, 8);
            assert_eq!(digest, &expected);
        }
        Ok(())
    }

    #[test]
    fn duplicate_matches_keep_one_marked_digest() -> Result<(), QsError> {
        // Windows "aa" (0), "xa" (2) and "aa" (3) all share a digest: with
        // an 8-bit fold only the final byte survives, so "xa" collides with
        // "aa". Three valid index states, one marked digest.
        let pre = classical_preprocessing("aaxaa", &["aa"], 8, 1)?;
        assert_eq!(
            pre.valid_states,
            vec!["00".to_string(), "10".to_string(), "11".to_string()]
        );
        assert_eq!(pre.marked_digests.len(), 1);
        Ok(())
    }
}
