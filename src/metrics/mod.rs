// src/metrics/mod.rs

//! Turns counting histograms into marked-state estimates and quantifies how
//! far an estimate landed from the classically known answer.

use std::collections::HashMap;
use std::f64::consts::PI;

use crate::core::{parse_bits, QsError};
use tracing::debug;

/// Estimate of the number of marked states recovered from a counting
/// histogram.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkedCountEstimate {
    /// Most frequent counting outcome, decoded directly as an integer.
    pub r_measured: u64,
    /// Phase-estimation angle `theta = 2 pi r / 2^p`, in radians.
    pub theta_est: f64,
    /// Estimated marked-state count `M = n (1 - sin^2(theta / 2))`.
    pub m_est: f64,
}

/// Decodes the counting histogram into a marked-state count estimate.
///
/// The mode of the histogram is taken as the phase readout `r`; ties break
/// toward the smaller bit-string value so the estimate is reproducible.
/// The Grover operator used here carries a global sign on its diffuser, so
/// its eigenphases sit at `pi +/- theta_g` and the inversion reads
/// `M = n (1 - sin^2(theta / 2))`.
pub fn estimate_marked_state_count(
    counts: &HashMap<String, u64>,
    p_count: usize,
    n_substr: usize,
) -> Result<MarkedCountEstimate, QsError> {
    let mode = histogram_mode(counts).ok_or_else(|| QsError::InvalidOperation {
        message: "cannot estimate from an empty counting histogram".to_string(),
    })?;
    // Counting outcomes decode directly: the inverse transform already
    // restored bit order.
    let r_measured = parse_bits(&mode)?;
    let theta_est = 2.0 * PI * r_measured as f64 / (1u64 << p_count) as f64;
    let half = (theta_est / 2.0).sin();
    let m_est = n_substr as f64 * (1.0 - half * half);
    debug!(r_measured, theta_est, m_est, "decoded counting histogram");
    Ok(MarkedCountEstimate {
        r_measured,
        theta_est,
        m_est,
    })
}

/// Most frequent outcome; ties break toward the smaller bit-string value.
fn histogram_mode(counts: &HashMap<String, u64>) -> Option<String> {
    counts
        .iter()
        .max_by(|(key_a, count_a), (key_b, count_b)| {
            count_a
                .cmp(count_b)
                .then_with(|| key_b.cmp(key_a))
        })
        .map(|(key, _)| key.clone())
}

/// Absolute and relative error of an estimate against the known true value.
///
/// The relative error is defined as 0 when the true value is 0, so an exact
/// estimate of "nothing marked" reports no error instead of dividing by
/// zero.
pub fn compute_errors(estimated: f64, true_value: f64) -> (f64, f64) {
    let abs_error = (estimated - true_value).abs();
    let rel_error = if true_value == 0.0 {
        0.0
    } else {
        abs_error / true_value.abs()
    };
    (abs_error, rel_error)
}

/// Shot-weighted mean and population variance of the decoded counting
/// outcomes. Returns `(0.0, 0.0)` for an empty histogram.
pub fn compute_statistics(counts: &HashMap<String, u64>) -> Result<(f64, f64), QsError> {
    let total: u64 = counts.values().sum();
    if total == 0 {
        return Ok((0.0, 0.0));
    }
    let mut mean = 0.0;
    for (outcome, &count) in counts {
        mean += parse_bits(outcome)? as f64 * count as f64;
    }
    mean /= total as f64;

    let mut variance = 0.0;
    for (outcome, &count) in counts {
        let delta = parse_bits(outcome)? as f64 - mean;
        variance += delta * delta * count as f64;
    }
    variance /= total as f64;
    Ok((mean, variance))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn histogram(entries: &[(&str, u64)]) -> HashMap<String, u64> {
        entries
            .iter()
            .map(|(outcome, count)| (outcome.to_string(), *count))
            .collect()
    }

    #[test]
    fn mode_decodes_to_the_phase_readout() -> Result<(), QsError> {
        let counts = histogram(&[("010", 700), ("110", 200), ("001", 124)]);
        let estimate = estimate_marked_state_count(&counts, 3, 8)?;
        assert_eq!(estimate.r_measured, 2);
        Ok(())
    }

    #[test]
    fn ties_break_toward_the_smaller_value() -> Result<(), QsError> {
        let counts = histogram(&[("110", 500), ("010", 500)]);
        let estimate = estimate_marked_state_count(&counts, 3, 8)?;
        assert_eq!(estimate.r_measured, 2);
        Ok(())
    }

    #[test]
    fn exact_eigenphase_recovers_the_marked_count() -> Result<(), QsError> {
        // M = 4 of n = 8: sin^2(theta_g / 2) = 1/2, so with p = 3 the
        // eigenphases pi +/- theta_g land exactly on r = 2 and r = 6.
        for readout in ["010", "110"] {
            let counts = histogram(&[(readout, 1000)]);
            let estimate = estimate_marked_state_count(&counts, 3, 8)?;
            assert!((estimate.m_est - 4.0).abs() < 1e-9, "m_est {}", estimate.m_est);
        }
        Ok(())
    }

    #[test]
    fn zero_readout_means_everything_marked() -> Result<(), QsError> {
        let counts = histogram(&[("000", 1000)]);
        let estimate = estimate_marked_state_count(&counts, 3, 8)?;
        assert_eq!(estimate.theta_est, 0.0);
        assert!((estimate.m_est - 8.0).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn empty_histogram_is_rejected() {
        let counts = HashMap::new();
        let err = estimate_marked_state_count(&counts, 3, 8).unwrap_err();
        assert!(matches!(err, QsError::InvalidOperation { .. }));
    }

    #[test]
    fn relative_error_is_zero_for_a_zero_truth() {
        let (abs_error, rel_error) = compute_errors(0.3, 0.0);
        assert!((abs_error - 0.3).abs() < 1e-12);
        assert_eq!(rel_error, 0.0);
    }

    #[test]
    fn errors_against_a_nonzero_truth() {
        let (abs_error, rel_error) = compute_errors(3.0, 4.0);
        assert!((abs_error - 1.0).abs() < 1e-12);
        assert!((rel_error - 0.25).abs() < 1e-12);
    }

    #[test]
    fn statistics_weight_by_shot_count() -> Result<(), QsError> {
        // Values 2 (x3) and 6 (x1): mean 3, variance 3.
        let counts = histogram(&[("010", 3), ("110", 1)]);
        let (mean, variance) = compute_statistics(&counts)?;
        assert!((mean - 3.0).abs() < 1e-12);
        assert!((variance - 3.0).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn statistics_of_an_empty_histogram_are_zero() -> Result<(), QsError> {
        assert_eq!(compute_statistics(&HashMap::new())?, (0.0, 0.0));
        Ok(())
    }
}
