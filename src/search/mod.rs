// src/search/mod.rs

//! End-to-end orchestration: preprocess, count, derive the iteration
//! budget, search, validate, summarize.
//!
//! The counting stage estimates how many index states the oracle marks;
//! that estimate fixes the Grover iteration count for the search stage.
//! Validation replays the classically known answer against the measured
//! search histogram, reporting the fraction of shots that landed on a
//! valid position.

use std::collections::HashMap;
use std::f64::consts::PI;
use std::fmt;
use std::time::Duration;

use crate::circuits::counting::quantum_counting_circuit;
use crate::circuits::search::SearchCircuit;
use crate::core::QsError;
use crate::metrics::{compute_errors, compute_statistics, estimate_marked_state_count};
use crate::preprocessing::classical_preprocessing;
use crate::simulation::{ExecutionConfig, Executor};
use tracing::info;

/// Tunable parameters of a full search run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Digest width in bits, 1 through 24.
    pub hash_bits: u32,
    /// 1-based index into the digest prime table.
    pub prime_index: usize,
    /// Counting register width; phase resolution is `2 pi / 2^p_count`.
    pub p_count: usize,
    /// Shots per executed circuit.
    pub shots: u64,
    /// Apply the readout-noise model.
    pub use_noise: bool,
    /// Simulate the search circuit locally.
    pub simulation: bool,
    /// Simulate the counting circuit locally. Separate from `simulation`
    /// because counting circuits are far deeper than search circuits.
    pub counting_simulation: bool,
    /// Sampler seed; `None` seeds from the operating system.
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            hash_bits: 8,
            prime_index: 1,
            p_count: 4,
            shots: 1024,
            use_noise: false,
            simulation: true,
            counting_simulation: true,
            seed: None,
        }
    }
}

/// Everything a full run produces, for programmatic use and display.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// The searched text.
    pub input_text: String,
    /// The target substrings.
    pub search_values: Vec<String>,
    /// Number of overlapping windows.
    pub n_substr: usize,
    /// Index register width.
    pub n_qubits: usize,
    /// Counting register width.
    pub p_count: usize,
    /// Classically known valid index bit strings.
    pub valid_states: Vec<String>,

    /// Counting-stage measurement histogram.
    pub counts_count: HashMap<String, u64>,
    /// Decoded phase readout (histogram mode).
    pub r_measured: u64,
    /// Estimated phase angle in radians.
    pub theta_est: f64,
    /// Estimated number of marked index states.
    pub m_est: f64,
    /// Grover iterations derived from the estimate.
    pub optimal_iterations: usize,

    /// Search-stage measurement histogram.
    pub counts_search: HashMap<String, u64>,
    /// Fraction of search shots that decoded to a valid position.
    pub valid_fraction: f64,

    /// Phase angle implied by the classically known marked count.
    pub expected_theta: f64,
    /// Absolute error of `m_est` against the known marked count.
    pub abs_error: f64,
    /// Relative error of `m_est`; 0 when nothing is truly marked.
    pub rel_error: f64,
    /// Shot-weighted mean of the counting readouts.
    pub mean_r: f64,
    /// Shot-weighted population variance of the counting readouts.
    pub var_r: f64,

    /// Lowered depth of the counting circuit.
    pub counting_depth: usize,
    /// Lowered gate count of the counting circuit.
    pub counting_gate_count: usize,
    /// Counting-stage evolution and sampling time.
    pub counting_runtime: Duration,
    /// Lowered depth of the search circuit.
    pub search_depth: usize,
    /// Lowered gate count of the search circuit.
    pub search_gate_count: usize,
    /// Search-stage evolution and sampling time.
    pub search_runtime: Duration,
}

/// Grover iteration count for an estimated `m_est` marked states out of
/// `n_substr`, `round((pi / 4) sqrt(n / M))`. An estimate of effectively
/// zero yields zero iterations; running the search anyway then measures a
/// uniform distribution instead of dividing by zero.
pub fn optimal_iterations(m_est: f64, n_substr: usize) -> usize {
    if m_est < 1e-6 {
        return 0;
    }
    ((PI / 4.0) * (n_substr as f64 / m_est).sqrt()).round() as usize
}

/// Fraction of search shots whose decoded position is classically valid.
///
/// An empty histogram counts as fully valid: with nothing measured there is
/// nothing to contradict the classical answer.
fn fraction_of_valid_shots(counts: &HashMap<String, u64>, valid_states: &[String]) -> f64 {
    let total: u64 = counts.values().sum();
    if total == 0 {
        return 1.0;
    }
    let valid: u64 = counts
        .iter()
        .filter(|(outcome, _)| {
            // Search outcomes decode reversed relative to the index
            // register's bit order.
            let decoded: String = outcome.chars().rev().collect();
            valid_states.contains(&decoded)
        })
        .map(|(_, count)| *count)
        .sum();
    valid as f64 / total as f64
}

/// Runs the full pipeline for one text and target set.
pub fn run_full_search(
    input_text: &str,
    search_values: &[&str],
    config: &SearchConfig,
    strategy: &dyn SearchCircuit,
) -> Result<SearchOutcome, QsError> {
    let pre = classical_preprocessing(input_text, search_values, config.hash_bits, config.prime_index)?;
    info!(
        n_substr = pre.n_substr,
        n_qubits = pre.n_qubits,
        marked = pre.valid_states.len(),
        "preprocessing complete"
    );

    let executor = match config.seed {
        Some(seed) => Executor::with_seed(seed),
        None => Executor::new(),
    };

    let counting_circuit = quantum_counting_circuit(pre.n_qubits, config.p_count, &pre.valid_states);
    let counting_exec = ExecutionConfig {
        shots: config.shots,
        use_noise: config.use_noise,
        simulation: config.counting_simulation,
        ..ExecutionConfig::default()
    };
    let counting = executor.execute(&counting_circuit, &counting_exec)?;
    let estimate = estimate_marked_state_count(&counting.counts, config.p_count, pre.n_substr)?;
    info!(
        r = estimate.r_measured,
        m_est = estimate.m_est,
        "counting stage complete"
    );

    let iterations = optimal_iterations(estimate.m_est, pre.n_substr);

    let search_circuit = strategy.build(&pre, iterations)?;
    let search_exec = ExecutionConfig {
        shots: config.shots,
        use_noise: config.use_noise,
        simulation: config.simulation,
        ..ExecutionConfig::default()
    };
    let search = executor.execute(&search_circuit, &search_exec)?;
    info!(
        strategy = strategy.name(),
        iterations,
        outcomes = search.counts.len(),
        "search stage complete"
    );

    let valid_fraction = fraction_of_valid_shots(&search.counts, &pre.valid_states);

    let true_marked = pre.valid_states.len() as f64;
    let (abs_error, rel_error) = compute_errors(estimate.m_est, true_marked);
    // Inverse of the counting relation M = n (1 - sin^2(theta / 2)).
    let expected_theta =
        2.0 * (1.0 - true_marked / pre.n_substr as f64).max(0.0).sqrt().asin();
    let (mean_r, var_r) = compute_statistics(&counting.counts)?;

    Ok(SearchOutcome {
        input_text: input_text.to_string(),
        search_values: search_values.iter().map(|v| v.to_string()).collect(),
        n_substr: pre.n_substr,
        n_qubits: pre.n_qubits,
        p_count: config.p_count,
        valid_states: pre.valid_states,
        counts_count: counting.counts,
        r_measured: estimate.r_measured,
        theta_est: estimate.theta_est,
        m_est: estimate.m_est,
        optimal_iterations: iterations,
        counts_search: search.counts,
        valid_fraction,
        expected_theta,
        abs_error,
        rel_error,
        mean_r,
        var_r,
        counting_depth: counting.depth,
        counting_gate_count: counting.gate_count,
        counting_runtime: counting.runtime,
        search_depth: search.depth,
        search_gate_count: search.gate_count,
        search_runtime: search.runtime,
    })
}

impl fmt::Display for SearchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== search summary ===")?;
        writeln!(f, "text ({} bytes): {:?}", self.input_text.len(), self.input_text)?;
        writeln!(f, "targets: {:?}", self.search_values)?;
        writeln!(
            f,
            "windows: {} over {} index qubits, {} counting qubits",
            self.n_substr, self.n_qubits, self.p_count
        )?;
        writeln!(f, "valid positions: {:?}", self.valid_states)?;
        writeln!(
            f,
            "counting: r = {} (mean {:.3}, var {:.3}), theta = {:.4} rad, M_est = {:.3}",
            self.r_measured, self.mean_r, self.var_r, self.theta_est, self.m_est
        )?;
        writeln!(
            f,
            "estimate error: abs {:.3}, rel {:.3} (expected theta {:.4} rad)",
            self.abs_error, self.rel_error, self.expected_theta
        )?;
        writeln!(f, "grover iterations: {}", self.optimal_iterations)?;
        writeln!(
            f,
            "valid fraction: {:.1}% of shots",
            self.valid_fraction * 100.0
        )?;
        writeln!(
            f,
            "counting circuit: depth {}, {} gates, {:.4}s",
            self.counting_depth,
            self.counting_gate_count,
            self.counting_runtime.as_secs_f64()
        )?;
        write!(
            f,
            "search circuit: depth {}, {} gates, {:.4}s",
            self.search_depth,
            self.search_gate_count,
            self.search_runtime.as_secs_f64()
        )
    }
}
