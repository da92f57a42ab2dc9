// src/validation/mod.rs

//! State-vector invariant checks used by tests and demos.
//!
//! Each check returns `Ok(())` or a descriptive [`QsError::Simulation`],
//! following the pattern of asserting physical invariants on a final state
//! rather than on intermediate amplitudes.

use crate::circuits::Register;
use crate::core::{QsError, StateVector};

const DEFAULT_TOLERANCE: f64 = 1e-9;

/// Checks that the total probability mass of `state` is 1 within
/// `tolerance` (default `1e-9`).
pub fn check_normalization(state: &StateVector, tolerance: Option<f64>) -> Result<(), QsError> {
    let tolerance = tolerance.unwrap_or(DEFAULT_TOLERANCE);
    let total: f64 = state.amplitudes().iter().map(|a| a.norm_sqr()).sum();
    if (total - 1.0).abs() > tolerance {
        return Err(QsError::Simulation {
            message: format!("state norm deviates from 1: total probability {total}"),
        });
    }
    Ok(())
}

/// Checks that `register` carries no probability mass outside |0...0>,
/// within `tolerance` (default `1e-9`).
///
/// Uncomputation must restore ancilla and value registers exactly; residual
/// mass there means a load was not undone.
pub fn check_register_cleared(
    state: &StateVector,
    register: &Register,
    tolerance: Option<f64>,
) -> Result<(), QsError> {
    let tolerance = tolerance.unwrap_or(DEFAULT_TOLERANCE);
    let num_qubits = state.num_qubits();
    let mut register_mask = 0usize;
    for q in register.qubits() {
        if q >= num_qubits {
            return Err(QsError::InvalidOperation {
                message: format!(
                    "register '{}' qubit {q} out of range for a {num_qubits}-qubit state",
                    register.name()
                ),
            });
        }
        register_mask |= 1 << (num_qubits - 1 - q);
    }

    let mut residual = 0.0;
    for (index, amplitude) in state.amplitudes().iter().enumerate() {
        if index & register_mask != 0 {
            residual += amplitude.norm_sqr();
        }
    }
    if residual > tolerance {
        return Err(QsError::Simulation {
            message: format!(
                "register '{}' not cleared: residual probability {residual}",
                register.name()
            ),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuits::Circuit;
    use crate::simulation::Executor;

    #[test]
    fn zero_state_is_normalized_and_cleared() -> Result<(), QsError> {
        let mut circuit = Circuit::new();
        let reg = circuit.add_register("q", 2);
        let state = Executor::new().final_state(&circuit)?;
        check_normalization(&state, None)?;
        check_register_cleared(&state, &reg, None)?;
        Ok(())
    }

    #[test]
    fn excited_register_fails_the_cleared_check() -> Result<(), QsError> {
        let mut circuit = Circuit::new();
        let reg = circuit.add_register("q", 2);
        circuit.x(reg.qubit(1));
        let state = Executor::new().final_state(&circuit)?;
        check_normalization(&state, None)?;
        assert!(check_register_cleared(&state, &reg, None).is_err());
        Ok(())
    }

    #[test]
    fn superposed_register_fails_the_cleared_check() -> Result<(), QsError> {
        let mut circuit = Circuit::new();
        let reg = circuit.add_register("q", 1);
        circuit.h(reg.qubit(0));
        let state = Executor::new().final_state(&circuit)?;
        assert!(check_register_cleared(&state, &reg, None).is_err());
        Ok(())
    }
}
