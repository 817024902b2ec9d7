// src/lib.rs

//! `qrca` - a 4-bit quantum ripple-carry adder
//!
//! Builds the addition of two 4-bit numbers as a circuit of Toffoli and
//! CNOT gates, runs it on a small state-vector simulator and decodes the
//! measured sum and carry.

pub mod core;
pub mod operations;
pub mod circuits;
pub mod simulation;
pub mod validation;
pub mod adder;
pub mod report;

// Re-export the most common types for easier top-level use
pub use crate::core::{QrcaError, QubitId, RegisterName, StateVector};
pub use operations::Gate;
pub use circuits::{Circuit, CircuitBuilder};
pub use simulation::{FinalState, SimulationResult, Simulator, SimulatorConfig};
pub use adder::{
    AdderOutcome, AdderRegisters, Nibble, build_adder_circuit, build_and_simulate,
    build_and_simulate_with, full_adder_block,
};
pub use validation::{basis_state_index, check_normalization, validate_circuit};

// Example 1: Adding two numbers
/// ```
/// use qrca::{Nibble, QrcaError, build_and_simulate};
///
/// # fn main() -> Result<(), QrcaError> {
/// let a = Nibble::new(3)?;
/// let b = Nibble::new(5)?;
/// let outcome = build_and_simulate(a, b)?;
///
/// assert_eq!(outcome.sum_decimal, 8);
/// // S0..S3, least significant first
/// assert_eq!(outcome.sum_bits, [false, false, false, true]);
/// assert!(!outcome.carry_out);
/// # Ok(())
/// # }
/// ```
#[doc(hidden)]
const _: () = ();

// Example 2: Driving the simulator directly
// A CNOT copies a flipped control into its target; both measure as 1.
/// ```
/// use qrca::{CircuitBuilder, Gate, QubitId, RegisterName, Simulator, QrcaError};
///
/// # fn main() -> Result<(), QrcaError> {
/// let control = QubitId::new(RegisterName::A, 0);
/// let target = QubitId::new(RegisterName::B, 0);
///
/// let circuit = CircuitBuilder::new()
///     .add_op(Gate::not(control))
///     .add_op(Gate::cnot(control, target))
///     .add_op(Gate::measure(control, "c"))
///     .add_op(Gate::measure(target, "t"))
///     .build();
///
/// println!("{}", circuit);
/// let result = Simulator::new().run(&circuit, 1)?;
/// assert_eq!(result.measurement("c"), Some(1));
/// assert_eq!(result.measurement("t"), Some(1));
/// # Ok(())
/// # }
/// ```
#[doc(hidden)]
const _: () = ();
