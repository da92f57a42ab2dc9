// src/core/mod.rs

//! Core data structures and types shared by the whole crate.

// Declare modules within core
pub mod bits;
pub mod error;
pub mod state;

// Re-export public types for convenient access via `qsearch::core::TypeName`
pub use bits::{format_bits, parse_bits, parse_bits_reversed};
pub use error::QsError;
pub use state::StateVector;
