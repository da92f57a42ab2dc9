// src/circuits/oracle.rs

//! Phase oracle and diffusion operator builders.
//!
//! The oracle applies a sign flip to exactly the listed computational basis
//! states of the index register. Construction: for each marked bit string,
//! X-invert the qubits at its zero positions, apply a multi-controlled phase
//! flip (Hadamard / multi-controlled-X / Hadamard on the last qubit), then
//! invert back. The blocks commute since each acts on a disjoint basis
//! subspace.

use crate::circuits::{Gate, Register};

/// Multi-controlled phase flip on all qubits of `register`: flips the sign
/// of the all-ones basis state only.
fn controlled_phase_flip(register: &Register) -> Vec<Gate> {
    let last = register.qubit(register.len() - 1);
    let controls: Vec<usize> = register.qubits().take(register.len() - 1).collect();
    vec![
        Gate::H(last),
        Gate::Mcx { controls, target: last },
        Gate::H(last),
    ]
}

/// X gates on the qubits of `register` where `pattern` has a `'0'`.
/// Register qubit `k` corresponds to bit `k` of the big-endian pattern.
fn invert_zero_positions(register: &Register, pattern: &str) -> Vec<Gate> {
    pattern
        .chars()
        .enumerate()
        .filter(|(_, bit)| *bit == '0')
        .map(|(k, _)| Gate::X(register.qubit(k)))
        .collect()
}

/// One oracle block: sign flip confined to the single basis state `pattern`.
pub fn phase_flip(register: &Register, pattern: &str) -> Vec<Gate> {
    let mut gates = invert_zero_positions(register, pattern);
    gates.extend(controlled_phase_flip(register));
    gates.extend(invert_zero_positions(register, pattern));
    gates
}

/// Phase oracle marking the whole valid-state set: one sign-flip block per
/// marked bit string, auxiliary qubits untouched.
pub fn phase_oracle(register: &Register, valid_states: &[String]) -> Vec<Gate> {
    let mut gates = Vec::new();
    for pattern in valid_states {
        gates.extend(phase_flip(register, pattern));
    }
    gates
}

/// The standard Grover diffusion operator over the index register:
/// Hadamards, X-inversion about zero, multi-controlled phase flip on the
/// all-ones state, inversion back, Hadamards.
pub fn diffuser(register: &Register) -> Vec<Gate> {
    let mut gates: Vec<Gate> = register.qubits().map(Gate::H).collect();
    gates.extend(register.qubits().map(Gate::X));
    gates.extend(controlled_phase_flip(register));
    gates.extend(register.qubits().map(Gate::X));
    gates.extend(register.qubits().map(Gate::H));
    gates
}

/// One reusable amplification iteration: the diffuser-then-oracle
/// composition. Wrapped in [`Gate::ControlledPower`] by the counting
/// circuit; applied directly by the search circuits.
pub fn grover_operator(register: &Register, valid_states: &[String]) -> Vec<Gate> {
    let mut gates = diffuser(register);
    gates.extend(phase_oracle(register, valid_states));
    gates
}
