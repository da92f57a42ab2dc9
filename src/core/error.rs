// src/core/error.rs

//! Error handling logic.

use thiserror::Error;

/// Error type covering every failure mode of the hybrid search pipeline.
///
/// All fallible public operations return `Result<_, QsError>`. There are no
/// fallback paths: an invalid prime index, a malformed configuration or a
/// missing backend is fatal and surfaced to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QsError {
    /// A 1-based prime index fell outside the fixed prime table.
    #[error("prime index {index} is out of range (prime table has {table_len} entries)")]
    InvalidPrimeIndex {
        /// The offending 1-based index.
        index: usize,
        /// Number of entries in the prime table.
        table_len: usize,
    },

    /// Invalid input parameters (mismatched target lengths, zero shots,
    /// unrepresentable hash width, text too short, ...). Validated before
    /// any quantum work starts.
    #[error("configuration error: {message}")]
    Config {
        /// Configuration failure message.
        message: String,
    },

    /// A circuit references a qubit outside its register space, or a
    /// composite gate reached the engine without being lowered first.
    #[error("invalid operation: {message}")]
    InvalidOperation {
        /// InvalidOperation failure message.
        message: String,
    },

    /// General error encountered during state evolution or sampling.
    #[error("simulation error: {message}")]
    Simulation {
        /// Simulation failure message.
        message: String,
    },

    /// `simulation = false` was requested but no hardware backend is
    /// reachable. Never silently downgraded to simulation.
    #[error("backend unavailable: {message}")]
    BackendUnavailable {
        /// Connectivity/availability failure message.
        message: String,
    },
}
