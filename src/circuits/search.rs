// src/circuits/search.rs

//! The two switchable Grover search circuits.
//!
//! Both strategies prepare the index register in uniform superposition, run
//! the requested number of amplification iterations and measure the index
//! register. They differ only in how marked states are recognized:
//!
//! - [`IndexOracleSearch`] phase-flips the precomputed valid index bit
//!   strings directly.
//! - [`ValueOracleSearch`] loads the digest array into a value register,
//!   phase-flips when the loaded value equals a marked digest, and unloads
//!   (a search by value rather than by precomputed index).
//!
//! The orchestrator depends only on the [`SearchCircuit`] trait, keeping it
//! decoupled from oracle internals.

use crate::circuits::loader::{load_array, mark_if_target, unload_array};
use crate::circuits::oracle::{diffuser, phase_oracle};
use crate::circuits::Circuit;
use crate::core::QsError;
use crate::preprocessing::Preprocessed;

/// Strategy interface for building a Grover search circuit from the
/// preprocessing output and a fixed iteration count.
pub trait SearchCircuit {
    /// Short human-readable strategy name, used in logs and summaries.
    fn name(&self) -> &'static str;

    /// Builds the full search circuit including terminal measurement of the
    /// index register. With `iterations == 0` the circuit degenerates to a
    /// plain uniform-superposition measurement.
    fn build(&self, pre: &Preprocessed, iterations: usize) -> Result<Circuit, QsError>;
}

/// Direct index-string oracle: marks the precomputed valid index patterns.
#[derive(Debug, Clone, Copy, Default)]
pub struct IndexOracleSearch;

impl SearchCircuit for IndexOracleSearch {
    fn name(&self) -> &'static str {
        "index-oracle"
    }

    fn build(&self, pre: &Preprocessed, iterations: usize) -> Result<Circuit, QsError> {
        let mut circuit = Circuit::new();
        let index = circuit.add_register("idx", pre.n_qubits);

        for q in index.qubits() {
            circuit.h(q);
        }
        for _ in 0..iterations {
            circuit.append(phase_oracle(&index, &pre.valid_states));
            circuit.append(diffuser(&index));
        }
        circuit.measure(&index);
        Ok(circuit)
    }
}

/// Value-loaded associative oracle: marks positions by their loaded digest.
///
/// Index states beyond `n_substr` are never loaded, so their value register
/// stays |0...0> and they are marked only if a target digest happens to be
/// zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValueOracleSearch;

impl SearchCircuit for ValueOracleSearch {
    fn name(&self) -> &'static str {
        "value-oracle"
    }

    fn build(&self, pre: &Preprocessed, iterations: usize) -> Result<Circuit, QsError> {
        let value_width = pre
            .digests
            .first()
            .map(String::len)
            .ok_or_else(|| QsError::Config {
                message: "value-oracle search needs at least one digest".to_string(),
            })?;

        let mut circuit = Circuit::new();
        let index = circuit.add_register("idx", pre.n_qubits);
        let value = circuit.add_register("val", value_width);
        let phase = circuit.add_register("phase", 1);

        for q in index.qubits() {
            circuit.h(q);
        }
        // Phase ancilla in |1>: the H/MCX/H core of the mark step then acts
        // as a pure sign flip on matching value patterns.
        circuit.x(phase.qubit(0));

        for _ in 0..iterations {
            circuit.append(load_array(&pre.digests, &index, &value));
            circuit.append(mark_if_target(&pre.marked_digests, &value, &phase));
            circuit.append(unload_array(&pre.digests, &index, &value));
            circuit.append(diffuser(&index));
        }
        circuit.measure(&index);
        Ok(circuit)
    }
}
