// src/simulation/results.rs

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

/// The sole output contract of the circuit executor.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionOutcome {
    /// Measurement histogram: classical bit-string outcome to occurrence
    /// count across the requested shots. Classical bit 0 is the rightmost
    /// character of each key.
    pub counts: HashMap<String, u64>,
    /// Depth of the lowered circuit (longest per-qubit dependency chain).
    pub depth: usize,
    /// Total elementary gates after lowering.
    pub gate_count: usize,
    /// Wall-clock time spent strictly in state evolution and sampling,
    /// excluding lowering.
    pub runtime: Duration,
}

impl ExecutionOutcome {
    /// Sum of all histogram counts; equals the requested shots.
    pub fn total_shots(&self) -> u64 {
        self.counts.values().sum()
    }
}

impl fmt::Display for ExecutionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "ExecutionOutcome[depth {}, {} gates, {:.4}s]",
            self.depth,
            self.gate_count,
            self.runtime.as_secs_f64()
        )?;
        // Sort for stable, readable output.
        let mut sorted: Vec<_> = self.counts.iter().collect();
        sorted.sort_by(|(a, _), (b, _)| a.cmp(b));
        for (outcome, count) in sorted {
            writeln!(f, "  {outcome}: {count}")?;
        }
        Ok(())
    }
}
