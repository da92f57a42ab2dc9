// src/text/mod.rs

//! Deterministic input-text generation for demos and benchmarks.

use crate::core::QsError;

/// Filler pattern cycled through the slots not occupied by a target.
const FILLER: &str = "xxx";

/// Builds a text of exactly `input_length` bytes containing every entry of
/// `search_values`, evenly spread over the available non-overlapping slots.
///
/// The text is partitioned into slots of the target length; targets are
/// placed at evenly strided slot positions and the remaining bytes are
/// filled by cycling [`FILLER`]. Deterministic: the same arguments always
/// produce the same text.
pub fn generate_input_text(input_length: usize, search_values: &[&str]) -> Result<String, QsError> {
    let Some(first) = search_values.first() else {
        return Err(QsError::Config {
            message: "at least one search value is required".to_string(),
        });
    };
    let target_length = first.len();
    if target_length == 0 {
        return Err(QsError::Config {
            message: "search values must be non-empty".to_string(),
        });
    }
    if let Some(bad) = search_values.iter().find(|v| v.len() != target_length) {
        return Err(QsError::Config {
            message: format!(
                "all search values must share one length: {bad:?} has length {}, expected {target_length}",
                bad.len()
            ),
        });
    }
    if input_length < target_length {
        return Err(QsError::Config {
            message: format!(
                "input length {input_length} cannot hold a {target_length}-byte value"
            ),
        });
    }

    let slots: Vec<usize> = (0..=input_length - target_length)
        .step_by(target_length)
        .collect();
    if search_values.len() > slots.len() {
        return Err(QsError::Config {
            message: format!(
                "{} search values do not fit in {} slots of length {target_length}",
                search_values.len(),
                slots.len()
            ),
        });
    }

    let mut bytes: Vec<u8> = FILLER
        .bytes()
        .cycle()
        .take(input_length)
        .collect();
    let stride = slots.len() / search_values.len();
    for (i, value) in search_values.iter().enumerate() {
        let start = slots[i * stride];
        bytes[start..start + target_length].copy_from_slice(value.as_bytes());
    }

    String::from_utf8(bytes).map_err(|_| QsError::Config {
        message: "search values must be ASCII".to_string(),
    })
}
