// src/core/mod.rs

//! Core data structures and types

pub mod error;
pub mod qubit;
pub mod state;

// Re-export public types for convenient access via `qrca::core::TypeName`
pub use error::QrcaError;
pub use qubit::{QubitId, RegisterName};
pub use state::StateVector;

pub mod constants;
pub use constants::adder_constants::{
    CARRY_BITS, CARRY_KEY, DEFAULT_A, DEFAULT_B, MAX_OPERAND, OPERAND_BITS,
};
