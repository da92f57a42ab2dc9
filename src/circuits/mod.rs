// src/circuits/mod.rs

//! Reversible-gate circuit representation.
//!
//! A [`Circuit`] is an ordered sequence of reversible gates over named qubit
//! registers, followed by a terminal measurement list. Circuits are built
//! once, executed once (or repeated for independent shots) and discarded;
//! no state persists between runs.
//!
//! Qubit conventions (load-bearing, do not unify):
//! - When a builder consumes a big-endian bit string for a register, register
//!   qubit `k` carries bit `k` of the string (qubit 0 = most significant).
//! - The counting register is little-endian instead: counting qubit `j`
//!   controls the `2^j`-th power of the Grover operator.
//! - Measured outcome strings place classical bit 0 rightmost, so search
//!   outcomes decode via reversed parse while counting outcomes decode
//!   directly.

pub mod counting;
pub mod loader;
pub mod oracle;
pub mod search;

use std::fmt;
use std::ops::Range;

/// A named, contiguous slice of a circuit's qubit space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Register {
    name: String,
    offset: usize,
    len: usize,
}

impl Register {
    /// Global index of the register's `k`-th qubit.
    pub fn qubit(&self, k: usize) -> usize {
        debug_assert!(k < self.len, "qubit {k} out of register '{}'", self.name);
        self.offset + k
    }

    /// Global indices of all qubits in the register, in order.
    pub fn qubits(&self) -> Range<usize> {
        self.offset..self.offset + self.len
    }

    /// Number of qubits in the register.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the register holds no qubits.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The register's name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A reversible gate over global qubit indices.
#[derive(Debug, Clone, PartialEq)]
pub enum Gate {
    /// Hadamard.
    H(usize),
    /// Pauli X (bit flip).
    X(usize),
    /// Multi-controlled X. An empty control list degenerates to a plain X.
    Mcx {
        /// Control qubits; the target flips only when all are |1>.
        controls: Vec<usize>,
        /// Target qubit.
        target: usize,
    },
    /// Controlled phase rotation `diag(1, 1, 1, e^{i theta})`.
    CPhase {
        /// Control qubit.
        control: usize,
        /// Target qubit.
        target: usize,
        /// Rotation angle in radians.
        theta: f64,
    },
    /// Exchanges two qubits.
    Swap {
        /// First qubit.
        a: usize,
        /// Second qubit.
        b: usize,
    },
    /// A sub-circuit applied `power` times, each application gated on
    /// `control`. This is the building block of the phase-estimation ladder:
    /// counting qubit `j` controls the Grover operator raised to `2^j`.
    ControlledPower {
        /// Ancilla control qubit.
        control: usize,
        /// The gates of one application of the wrapped operator.
        body: Vec<Gate>,
        /// Number of repeated applications.
        power: u32,
    },
}

impl Gate {
    /// Collects every qubit the gate touches (targets and controls) into `out`.
    fn collect_qubits(&self, out: &mut Vec<usize>) {
        match self {
            Gate::H(q) | Gate::X(q) => out.push(*q),
            Gate::Mcx { controls, target } => {
                out.extend_from_slice(controls);
                out.push(*target);
            }
            Gate::CPhase { control, target, .. } => {
                out.push(*control);
                out.push(*target);
            }
            Gate::Swap { a, b } => {
                out.push(*a);
                out.push(*b);
            }
            Gate::ControlledPower { control, body, .. } => {
                out.push(*control);
                for gate in body {
                    gate.collect_qubits(out);
                }
            }
        }
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gate::H(q) => write!(f, "h q{q}"),
            Gate::X(q) => write!(f, "x q{q}"),
            Gate::Mcx { controls, target } => write!(f, "mcx {controls:?} -> q{target}"),
            Gate::CPhase { control, target, theta } => {
                write!(f, "cphase({theta:.4}) q{control} -> q{target}")
            }
            Gate::Swap { a, b } => write!(f, "swap q{a} q{b}"),
            Gate::ControlledPower { control, body, power } => {
                write!(f, "ctrl(q{control}) pow({power}) [{} gates]", body.len())
            }
        }
    }
}

/// One elementary gate of the lowered form, paired with the controls
/// accumulated while expanding composites.
pub(crate) type LoweredGate = (Gate, Vec<usize>);

/// An ordered sequence of reversible gates and a terminal measurement list
/// over named registers.
#[derive(Debug, Clone, PartialEq)]
pub struct Circuit {
    num_qubits: usize,
    registers: Vec<Register>,
    gates: Vec<Gate>,
    /// Measured qubits in classical-bit order: entry `j` is classical bit `j`.
    measurements: Vec<usize>,
}

impl Circuit {
    /// Creates a new, empty circuit with no registers.
    pub fn new() -> Self {
        Self {
            num_qubits: 0,
            registers: Vec::new(),
            gates: Vec::new(),
            measurements: Vec::new(),
        }
    }

    /// Appends a named register of `len` qubits and returns a handle to it.
    pub fn add_register(&mut self, name: &str, len: usize) -> Register {
        let register = Register {
            name: name.to_string(),
            offset: self.num_qubits,
            len,
        };
        self.num_qubits += len;
        self.registers.push(register.clone());
        register
    }

    /// Total number of qubits across all registers.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// The ordered gate sequence.
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// Measured qubits in classical-bit order.
    pub fn measurements(&self) -> &[usize] {
        &self.measurements
    }

    /// Appends a Hadamard on `qubit`.
    pub fn h(&mut self, qubit: usize) {
        self.gates.push(Gate::H(qubit));
    }

    /// Appends an X on `qubit`.
    pub fn x(&mut self, qubit: usize) {
        self.gates.push(Gate::X(qubit));
    }

    /// Appends a multi-controlled X.
    pub fn mcx(&mut self, controls: Vec<usize>, target: usize) {
        self.gates.push(Gate::Mcx { controls, target });
    }

    /// Appends a controlled phase rotation.
    pub fn cphase(&mut self, control: usize, target: usize, theta: f64) {
        self.gates.push(Gate::CPhase { control, target, theta });
    }

    /// Appends a swap.
    pub fn swap(&mut self, a: usize, b: usize) {
        self.gates.push(Gate::Swap { a, b });
    }

    /// Appends a controlled `power`-th application of `body`.
    pub fn controlled_power(&mut self, control: usize, body: Vec<Gate>, power: u32) {
        self.gates.push(Gate::ControlledPower { control, body, power });
    }

    /// Appends a pre-built gate fragment.
    pub fn append<I>(&mut self, gates: I)
    where
        I: IntoIterator<Item = Gate>,
    {
        self.gates.extend(gates);
    }

    /// Marks every qubit of `register` for terminal measurement, in register
    /// order (register qubit `k` becomes the next classical bit).
    pub fn measure(&mut self, register: &Register) {
        self.measurements.extend(register.qubits());
    }

    /// Lowers the circuit to elementary gates: `ControlledPower` composites
    /// are expanded into `power` repetitions of their body, each body gate
    /// carrying the ancilla as an extra control. Depth and gate count are
    /// defined on this form.
    pub(crate) fn lowered(&self) -> Vec<LoweredGate> {
        let mut out = Vec::new();
        lower_into(&self.gates, &[], &mut out);
        out
    }
}

fn lower_into(gates: &[Gate], extra_controls: &[usize], out: &mut Vec<LoweredGate>) {
    for gate in gates {
        match gate {
            Gate::ControlledPower { control, body, power } => {
                let mut controls = extra_controls.to_vec();
                controls.push(*control);
                for _ in 0..*power {
                    lower_into(body, &controls, out);
                }
            }
            _ => out.push((gate.clone(), extra_controls.to_vec())),
        }
    }
}

/// Qubits touched by a lowered gate: the gate's own plus accumulated controls.
pub(crate) fn lowered_qubits(lowered: &LoweredGate) -> Vec<usize> {
    let (gate, controls) = lowered;
    let mut qubits = controls.clone();
    gate.collect_qubits(&mut qubits);
    qubits
}

impl Default for Circuit {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "qsearch::Circuit[{} qubits, {} gates, {} measured]",
            self.num_qubits,
            self.gates.len(),
            self.measurements.len()
        )?;
        for register in &self.registers {
            writeln!(
                f,
                "  register {}[{}] @ q{}",
                register.name, register.len, register.offset
            )?;
        }
        for gate in &self.gates {
            writeln!(f, "  {gate}")?;
        }
        if !self.measurements.is_empty() {
            writeln!(f, "  measure {:?}", self.measurements)?;
        }
        Ok(())
    }
}
