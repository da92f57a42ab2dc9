// src/simulation/engine.rs

use crate::circuits::Gate;
use crate::core::{QsError, StateVector};
use num_complex::Complex;
use num_traits::Zero;
use std::f64::consts::FRAC_1_SQRT_2;

/// The core state-vector engine. Applies lowered (elementary) gates to the
/// global state of `num_qubits` qubits.
///
/// Qubit `q` occupies bit position `num_qubits - 1 - q` of the basis index,
/// so qubit 0 is the most significant bit.
pub(crate) struct SimulationEngine {
    state: StateVector,
    num_qubits: usize,
}

type Matrix2 = [[Complex<f64>; 2]; 2];

fn hadamard_matrix() -> Matrix2 {
    let h = Complex::new(FRAC_1_SQRT_2, 0.0);
    [[h, h], [h, -h]]
}

fn x_matrix() -> Matrix2 {
    [
        [Complex::zero(), Complex::new(1.0, 0.0)],
        [Complex::new(1.0, 0.0), Complex::zero()],
    ]
}

/// `diag(1, e^{i theta})` on a single qubit.
fn phase_matrix(theta: f64) -> Matrix2 {
    [
        [Complex::new(1.0, 0.0), Complex::zero()],
        [Complex::zero(), Complex::new(theta.cos(), theta.sin())],
    ]
}

impl SimulationEngine {
    /// Initializes the engine in |0...0> over `num_qubits`.
    pub(crate) fn init(num_qubits: usize) -> Result<Self, QsError> {
        Ok(Self {
            state: StateVector::zero_state(num_qubits)?,
            num_qubits,
        })
    }

    /// Read access to the evolved state.
    pub(crate) fn state(&self) -> &StateVector {
        &self.state
    }

    /// Consumes the engine, yielding the final state.
    pub(crate) fn into_state(self) -> StateVector {
        self.state
    }

    /// Applies one elementary gate, optionally gated on `extra_controls`
    /// accumulated during lowering. Composite gates must have been lowered
    /// before reaching the engine.
    pub(crate) fn apply_gate(&mut self, gate: &Gate, extra_controls: &[usize]) -> Result<(), QsError> {
        match gate {
            Gate::H(target) => self.apply_single_qubit(*target, &hadamard_matrix(), extra_controls),
            Gate::X(target) => self.apply_single_qubit(*target, &x_matrix(), extra_controls),
            Gate::Mcx { controls, target } => {
                let mut all_controls = extra_controls.to_vec();
                all_controls.extend_from_slice(controls);
                self.apply_single_qubit(*target, &x_matrix(), &all_controls)
            }
            Gate::CPhase { control, target, theta } => {
                let mut all_controls = extra_controls.to_vec();
                all_controls.push(*control);
                self.apply_single_qubit(*target, &phase_matrix(*theta), &all_controls)
            }
            Gate::Swap { a, b } => self.apply_swap(*a, *b, extra_controls),
            Gate::ControlledPower { .. } => Err(QsError::InvalidOperation {
                message: "composite gate reached the engine; lower the circuit first".to_string(),
            }),
        }
    }

    /// Bit mask selecting qubit `qubit` within a basis index.
    fn qubit_mask(&self, qubit: usize) -> Result<usize, QsError> {
        if qubit >= self.num_qubits {
            return Err(QsError::InvalidOperation {
                message: format!(
                    "qubit {qubit} out of range for a {}-qubit circuit",
                    self.num_qubits
                ),
            });
        }
        Ok(1 << (self.num_qubits - 1 - qubit))
    }

    /// Combined mask of all control qubits; all bits must be set for a
    /// controlled gate to fire on a basis pair.
    fn control_mask(&self, controls: &[usize], target: usize) -> Result<usize, QsError> {
        let mut mask = 0usize;
        for &control in controls {
            if control == target {
                return Err(QsError::InvalidOperation {
                    message: format!("qubit {control} is both control and target"),
                });
            }
            mask |= self.qubit_mask(control)?;
        }
        Ok(mask)
    }

    /// Applies a 2x2 matrix to `target`, restricted to the subspace where
    /// every control qubit is |1>.
    ///
    /// Iterates over the basis pairs differing only at the target's bit
    /// position: for pair counter `i`, the bits above the target position
    /// are shifted up one place and the bits below kept, giving the
    /// target-0 index; the target-1 index sets the target bit.
    fn apply_single_qubit(
        &mut self,
        target: usize,
        matrix: &Matrix2,
        controls: &[usize],
    ) -> Result<(), QsError> {
        let target_mask = self.qubit_mask(target)?;
        let control_mask = self.control_mask(controls, target)?;
        let k = target_mask.trailing_zeros() as usize;
        let low_mask = target_mask - 1;

        let dim = self.state.dim();
        let amplitudes = self.state.amplitudes_mut();
        for i in 0..dim / 2 {
            let i0 = ((i >> k) << (k + 1)) | (i & low_mask);
            if control_mask != 0 && (i0 & control_mask) != control_mask {
                continue;
            }
            let i1 = i0 | target_mask;
            let psi0 = amplitudes[i0];
            let psi1 = amplitudes[i1];
            amplitudes[i0] = matrix[0][0] * psi0 + matrix[0][1] * psi1;
            amplitudes[i1] = matrix[1][0] * psi0 + matrix[1][1] * psi1;
        }
        Ok(())
    }

    /// Exchanges qubits `a` and `b`, restricted to the control subspace.
    fn apply_swap(&mut self, a: usize, b: usize, controls: &[usize]) -> Result<(), QsError> {
        if a == b {
            return Ok(());
        }
        let a_mask = self.qubit_mask(a)?;
        let b_mask = self.qubit_mask(b)?;
        let control_mask = self.control_mask(controls, a)?;
        if controls.contains(&b) {
            return Err(QsError::InvalidOperation {
                message: format!("qubit {b} is both control and target"),
            });
        }

        let dim = self.state.dim();
        let amplitudes = self.state.amplitudes_mut();
        for s in 0..dim {
            // Visit each pair once: a set, b clear.
            if s & a_mask != 0 && s & b_mask == 0 && (s & control_mask) == control_mask {
                amplitudes.swap(s, s ^ a_mask ^ b_mask);
            }
        }
        Ok(())
    }
}
