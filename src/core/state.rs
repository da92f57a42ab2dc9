// src/core/state.rs

use crate::core::QsError;
use num_complex::Complex;
use num_traits::Zero;
use std::fmt;

/// The full state vector of a register file of `n` qubits.
///
/// The vector has dimension `2^n`. Basis index `s` encodes qubit `q` at bit
/// position `n - 1 - q`, i.e. qubit 0 is the most significant bit of the
/// basis index. Amplitudes are `Complex<f64>`; normalization is maintained
/// by the engine (every applied gate is unitary) and can be asserted via
/// [`crate::validation::check_normalization`].
#[derive(Debug, Clone, PartialEq)] // Avoid Eq for floating-point complex numbers
pub struct StateVector {
    amplitudes: Vec<Complex<f64>>,
}

impl StateVector {
    /// Creates the all-zeros computational basis state |0...0> on `num_qubits`.
    pub(crate) fn zero_state(num_qubits: usize) -> Result<Self, QsError> {
        if num_qubits == 0 {
            return Err(QsError::InvalidOperation {
                message: "cannot build a state vector over zero qubits".to_string(),
            });
        }
        let dim = 1usize
            .checked_shl(num_qubits as u32)
            .ok_or_else(|| QsError::Simulation {
                message: format!(
                    "{num_qubits} qubits: state vector dimension overflows usize"
                ),
            })?;
        let mut amplitudes = vec![Complex::zero(); dim];
        amplitudes[0] = Complex::new(1.0, 0.0);
        Ok(Self { amplitudes })
    }

    /// Read-only access to the amplitudes.
    pub fn amplitudes(&self) -> &[Complex<f64>] {
        &self.amplitudes
    }

    /// Mutable access for the simulation engine.
    pub(crate) fn amplitudes_mut(&mut self) -> &mut [Complex<f64>] {
        &mut self.amplitudes
    }

    /// Dimension of the state vector (`2^n`).
    pub fn dim(&self) -> usize {
        self.amplitudes.len()
    }

    /// Number of qubits this state spans.
    pub fn num_qubits(&self) -> usize {
        self.amplitudes.len().trailing_zeros() as usize
    }

    /// Probability of measuring computational basis state `index`.
    pub fn probability(&self, index: usize) -> f64 {
        self.amplitudes
            .get(index)
            .map(|a| a.norm_sqr())
            .unwrap_or(0.0)
    }
}

impl fmt::Display for StateVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StateVector[")?;
        for (i, c) in self.amplitudes.iter().enumerate() {
            write!(f, "{}{:.4}", if i > 0 { ", " } else { "" }, c)?;
        }
        write!(f, "]")
    }
}
