// src/circuits/counting.rs

//! Quantum counting: phase estimation over the Grover operator.
//!
//! A counting register of `p_count` qubits in uniform superposition controls
//! successive powers `G^(2^j)` of the Grover operator (counting qubit `j`
//! controls the `2^j`-th power), followed by an inverse Fourier transform on
//! the counting register and measurement. The measured integer `r` relates
//! to the marked-state fraction via the inversion implemented in
//! [`crate::metrics::estimate_marked_state_count`].

use std::f64::consts::PI;

use crate::circuits::oracle::grover_operator;
use crate::circuits::{Circuit, Gate, Register};

/// Inverse quantum Fourier transform on `register`, little-endian (qubit `j`
/// carries weight `2^j`), with the terminal swaps folded in. Exact inverse
/// of the textbook transform; no approximation cutoff.
pub fn inverse_qft(register: &Register) -> Vec<Gate> {
    let n = register.len();
    let mut gates = Vec::new();
    for i in 0..n / 2 {
        gates.push(Gate::Swap {
            a: register.qubit(i),
            b: register.qubit(n - 1 - i),
        });
    }
    for i in 0..n {
        for j in 0..i {
            gates.push(Gate::CPhase {
                control: register.qubit(j),
                target: register.qubit(i),
                theta: -PI / (1u64 << (i - j)) as f64,
            });
        }
        gates.push(Gate::H(register.qubit(i)));
    }
    gates
}

/// Builds the full counting circuit: uniform superposition on both
/// registers, the controlled-power ladder, inverse QFT and measurement of
/// the counting register. Counting outcomes decode directly (no bit
/// reversal), unlike search outcomes.
pub fn quantum_counting_circuit(
    n_qubits: usize,
    p_count: usize,
    valid_states: &[String],
) -> Circuit {
    let mut circuit = Circuit::new();
    let count = circuit.add_register("count", p_count);
    let search = circuit.add_register("search", n_qubits);

    for q in count.qubits() {
        circuit.h(q);
    }
    for q in search.qubits() {
        circuit.h(q);
    }

    let grover = grover_operator(&search, valid_states);
    for j in 0..p_count {
        circuit.controlled_power(count.qubit(j), grover.clone(), 1u32 << j);
    }

    circuit.append(inverse_qft(&count));
    circuit.measure(&count);
    circuit
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_qubit_inverse_qft_is_a_hadamard() {
        let mut circuit = Circuit::new();
        let reg = circuit.add_register("count", 1);
        assert_eq!(inverse_qft(&reg), vec![Gate::H(reg.qubit(0))]);
    }

    #[test]
    fn inverse_qft_gate_budget() {
        let mut circuit = Circuit::new();
        let reg = circuit.add_register("count", 4);
        let gates = inverse_qft(&reg);
        // 2 swaps + 6 controlled phases + 4 Hadamards
        assert_eq!(gates.len(), 12);
    }

    #[test]
    fn counting_circuit_builds_the_binary_exponent_ladder() {
        let circuit = quantum_counting_circuit(3, 4, &["101".to_string()]);
        let powers: Vec<u32> = circuit
            .gates()
            .iter()
            .filter_map(|g| match g {
                Gate::ControlledPower { power, .. } => Some(*power),
                _ => None,
            })
            .collect();
        assert_eq!(powers, vec![1, 2, 4, 8]);
        // Only the counting register is measured.
        assert_eq!(circuit.measurements().len(), 4);
    }
}
