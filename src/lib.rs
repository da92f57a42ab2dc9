// src/lib.rs

//! `qsearch` - hybrid classical/quantum substring search on a local
//! state-vector simulator.
//!
//! The pipeline digests every overlapping window of a text with a compact
//! hash, estimates how many windows match the targets via quantum counting
//! (phase estimation over the Grover operator), derives the optimal number
//! of Grover iterations from that estimate, runs the amplitude-amplification
//! search, and validates the measured positions against the classically
//! known answer.
//!
//! # Example
//!
//! End-to-end search over a small text with one marked position:
//!
//! ```
//! use qsearch::{run_full_search, IndexOracleSearch, SearchConfig, QsError};
//!
//! let config = SearchConfig {
//!     p_count: 4,
//!     shots: 256,
//!     seed: Some(7),
//!     ..SearchConfig::default()
//! };
//! let outcome = run_full_search("axxxxxxx", &["a"], &config, &IndexOracleSearch)?;
//!
//! // One marked window out of eight: two Grover iterations concentrate
//! // most of the probability mass on the valid position.
//! assert_eq!(outcome.n_substr, 8);
//! assert_eq!(outcome.valid_states, vec!["000".to_string()]);
//! assert!(outcome.valid_fraction > 0.5);
//! println!("{outcome}");
//! # Ok::<(), QsError>(())
//! ```

pub mod circuits;
pub mod core;
pub mod hashing;
pub mod metrics;
pub mod preprocessing;
pub mod search;
pub mod simulation;
pub mod text;
pub mod validation;

// Re-export the most common types for easier top-level use
pub use circuits::search::{IndexOracleSearch, SearchCircuit, ValueOracleSearch};
pub use circuits::{Circuit, Gate, Register};
pub use core::{QsError, StateVector};
pub use search::{run_full_search, SearchConfig, SearchOutcome};
pub use simulation::{ExecutionConfig, ExecutionOutcome, Executor};
