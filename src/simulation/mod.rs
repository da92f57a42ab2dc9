// src/simulation/mod.rs

//! Executes built circuits: lowering, state evolution, and measurement
//! sampling.
//!
//! The executor is the crate's only source of randomness. It is
//! deterministic when constructed with [`Executor::with_seed`]; otherwise
//! each run seeds from the operating system.

pub(crate) mod engine;
mod results;

pub use results::ExecutionOutcome;

use crate::circuits::{lowered_qubits, Circuit};
use crate::core::{QsError, StateVector};
use engine::SimulationEngine;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;
use std::collections::HashMap;
use std::time::Instant;
use tracing::debug;

/// Per-bit readout flip probability applied when `use_noise` is requested.
const READOUT_FLIP_PROBABILITY: f64 = 0.01;

/// Execution parameters, mirrored from the caller-facing search
/// configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionConfig {
    /// Number of independent repetitions; must be positive.
    pub shots: u64,
    /// Apply the readout-noise model to sampled bits.
    pub use_noise: bool,
    /// Run the local simulator. `false` requests real hardware, which this
    /// crate does not ship an adapter for: the call fails with
    /// [`QsError::BackendUnavailable`] rather than silently simulating.
    pub simulation: bool,
    /// Accepted for interface parity with transpiling backends; the local
    /// lowering pass is not level-dependent.
    pub optimisation_level: u8,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            shots: 1024,
            use_noise: false,
            simulation: true,
            optimisation_level: 3,
        }
    }
}

/// Runs built circuits on the local state-vector simulator.
#[derive(Debug, Clone, Default)]
pub struct Executor {
    seed: Option<u64>,
}

impl Executor {
    /// Creates an executor seeding its sampler from the operating system.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a deterministic executor: identical circuits and
    /// configurations produce identical histograms.
    pub fn with_seed(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }

    /// Executes `circuit` for `config.shots` independent repetitions.
    ///
    /// The circuit is lowered first; depth and gate count are measured on
    /// the lowered form, and `runtime` covers state evolution and sampling
    /// only.
    pub fn execute(
        &self,
        circuit: &Circuit,
        config: &ExecutionConfig,
    ) -> Result<ExecutionOutcome, QsError> {
        if !config.simulation {
            return Err(QsError::BackendUnavailable {
                message: "no hardware backend is configured; refusing to fall back to simulation"
                    .to_string(),
            });
        }
        if config.shots == 0 {
            return Err(QsError::Config {
                message: "shots must be positive".to_string(),
            });
        }
        if circuit.measurements().is_empty() {
            return Err(QsError::InvalidOperation {
                message: "circuit has no measurements to sample".to_string(),
            });
        }

        let lowered = circuit.lowered();
        let gate_count = lowered.len();
        let depth = lowered_depth(circuit.num_qubits(), &lowered);
        debug!(gate_count, depth, "lowered circuit");

        let mut rng = self.rng();
        let start = Instant::now();

        let mut engine = SimulationEngine::init(circuit.num_qubits())?;
        for (gate, controls) in &lowered {
            engine.apply_gate(gate, controls)?;
        }

        let distribution = outcome_distribution(engine.state(), circuit.measurements());
        let mut counts: HashMap<String, u64> = HashMap::new();
        for _ in 0..config.shots {
            let mut outcome = sample_outcome(&distribution, &mut rng);
            if config.use_noise {
                outcome = flip_readout_bits(&outcome, &mut rng);
            }
            *counts.entry(outcome).or_insert(0) += 1;
        }
        let runtime = start.elapsed();
        debug!(shots = config.shots, outcomes = counts.len(), "sampling complete");

        Ok(ExecutionOutcome {
            counts,
            depth,
            gate_count,
            runtime,
        })
    }

    /// Evolves `circuit` without sampling and returns the final state
    /// vector, for state-inspection tests such as the load/unload
    /// round-trip invariant. Measurement specs are ignored.
    pub fn final_state(&self, circuit: &Circuit) -> Result<StateVector, QsError> {
        let mut engine = SimulationEngine::init(circuit.num_qubits())?;
        for (gate, controls) in &circuit.lowered() {
            engine.apply_gate(gate, controls)?;
        }
        Ok(engine.into_state())
    }
}

/// Greedy per-qubit levelling over the lowered gate list.
fn lowered_depth(num_qubits: usize, lowered: &[crate::circuits::LoweredGate]) -> usize {
    let mut levels = vec![0usize; num_qubits];
    let mut depth = 0;
    for gate in lowered {
        let qubits = lowered_qubits(gate);
        let level = qubits
            .iter()
            .filter_map(|&q| levels.get(q))
            .max()
            .copied()
            .unwrap_or(0)
            + 1;
        for q in qubits {
            if let Some(slot) = levels.get_mut(q) {
                *slot = level;
            }
        }
        depth = depth.max(level);
    }
    depth
}

/// Marginal probability of every measured outcome string, keyed in sorted
/// order so sampling is deterministic under a fixed seed.
///
/// Classical bit `j` records measured qubit `j` and sits at string position
/// `len - 1 - j` (classical bit 0 rightmost).
fn outcome_distribution(state: &StateVector, measurements: &[usize]) -> Vec<(String, f64)> {
    let num_qubits = state.num_qubits();
    let mut marginal: BTreeMap<String, f64> = BTreeMap::new();
    for (index, amplitude) in state.amplitudes().iter().enumerate() {
        let probability = amplitude.norm_sqr();
        if probability <= 0.0 {
            continue;
        }
        let outcome: String = measurements
            .iter()
            .rev()
            .map(|&q| {
                if (index >> (num_qubits - 1 - q)) & 1 == 1 {
                    '1'
                } else {
                    '0'
                }
            })
            .collect();
        *marginal.entry(outcome).or_insert(0.0) += probability;
    }
    marginal.into_iter().collect()
}

fn sample_outcome(distribution: &[(String, f64)], rng: &mut StdRng) -> String {
    let total: f64 = distribution.iter().map(|(_, p)| p).sum();
    let sample: f64 = rng.random::<f64>() * total;
    let mut cumulative = 0.0;
    for (outcome, probability) in distribution {
        cumulative += probability;
        if sample < cumulative {
            return outcome.clone();
        }
    }
    // Floating-point edge: fall back to the last outcome.
    distribution
        .last()
        .map(|(outcome, _)| outcome.clone())
        .unwrap_or_default()
}

fn flip_readout_bits(outcome: &str, rng: &mut StdRng) -> String {
    outcome
        .chars()
        .map(|bit| {
            if rng.random::<f64>() < READOUT_FLIP_PROBABILITY {
                if bit == '0' { '1' } else { '0' }
            } else {
                bit
            }
        })
        .collect()
}
