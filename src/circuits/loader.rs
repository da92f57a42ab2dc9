// src/circuits/loader.rs

//! Reversible associative-array loading.
//!
//! `load_array` writes a classical bit-string array into the value register,
//! conditioned on the index register: for array position `i` and each set
//! bit of `array[i]`, a multi-controlled X (controlled on the index register
//! encoding `i`) flips the corresponding value qubit. `unload_array` is the
//! exact reverse sequence and restores the value register to |0...0>.
//!
//! The pair behaves like a scoped resource: no measurement or irreversible
//! operation may occur between load and unload, and every path must unload.
//! Any asymmetry corrupts the amplitude amplification silently.

use crate::circuits::{Gate, Register};
use crate::core::bits::format_bits;

/// X gates flipping the index qubits at the zero positions of `index_bits`,
/// so a subsequent multi-controlled X fires for exactly that index value.
fn select_index(index: &Register, index_bits: &str) -> Vec<Gate> {
    index_bits
        .chars()
        .enumerate()
        .filter(|(_, bit)| *bit == '0')
        .map(|(k, _)| Gate::X(index.qubit(k)))
        .collect()
}

/// Loads `array` into the value register, conditioned on the index register.
///
/// Value qubit `k` corresponds to bit `k` of the big-endian entry, matching
/// the convention of [`mark_if_target`].
pub fn load_array(array: &[String], index: &Register, value: &Register) -> Vec<Gate> {
    let mut gates = Vec::new();
    let index_controls: Vec<usize> = index.qubits().collect();
    for (i, entry) in array.iter().enumerate() {
        let index_bits = format_bits(i as u64, index.len());
        for (k, bit) in entry.chars().enumerate() {
            if bit == '1' {
                gates.extend(select_index(index, &index_bits));
                gates.push(Gate::Mcx {
                    controls: index_controls.clone(),
                    target: value.qubit(k),
                });
                gates.extend(select_index(index, &index_bits));
            }
        }
    }
    gates
}

/// Uncomputes [`load_array`]: the same gates in reverse order. Every emitted
/// gate is self-inverse, so reversing the sequence is the exact inverse.
pub fn unload_array(array: &[String], index: &Register, value: &Register) -> Vec<Gate> {
    let mut gates = load_array(array, index, value);
    gates.reverse();
    gates
}

/// Phase-flips every basis state whose value register equals one of the
/// target bit strings, using the same invert-match-uninvert sandwich as the
/// index oracle. The phase ancilla must be prepared in |1> so the
/// Hadamard / multi-controlled-X / Hadamard core reduces to a pure sign
/// flip, leaving the ancilla itself unchanged.
pub fn mark_if_target(targets: &[String], value: &Register, phase: &Register) -> Vec<Gate> {
    let mut gates = Vec::new();
    let value_controls: Vec<usize> = value.qubits().collect();
    let ancilla = phase.qubit(0);
    for target in targets {
        let invert: Vec<Gate> = target
            .chars()
            .enumerate()
            .filter(|(_, bit)| *bit == '0')
            .map(|(k, _)| Gate::X(value.qubit(k)))
            .collect();
        gates.extend(invert.clone());
        gates.push(Gate::H(ancilla));
        gates.push(Gate::Mcx {
            controls: value_controls.clone(),
            target: ancilla,
        });
        gates.push(Gate::H(ancilla));
        gates.extend(invert);
    }
    gates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuits::Circuit;

    #[test]
    fn unload_is_the_reversed_load_sequence() {
        let mut circuit = Circuit::new();
        let idx = circuit.add_register("idx", 2);
        let val = circuit.add_register("val", 3);
        let array = vec!["101".to_string(), "010".to_string()];

        let mut load = load_array(&array, &idx, &val);
        let unload = unload_array(&array, &idx, &val);
        load.reverse();
        assert_eq!(load, unload);
    }

    #[test]
    fn zero_entries_emit_no_gates() {
        let mut circuit = Circuit::new();
        let idx = circuit.add_register("idx", 1);
        let val = circuit.add_register("val", 2);
        let array = vec!["00".to_string(), "00".to_string()];
        assert!(load_array(&array, &idx, &val).is_empty());
    }
}
