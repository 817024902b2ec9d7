// src/validation/mod.rs

//! Checks on state vectors and circuits.

use crate::circuits::Circuit;
use crate::core::{QrcaError, StateVector};
use crate::operations::Gate;
use std::collections::HashSet;

// Default tolerance values (can be overridden by caller)
const DEFAULT_NORM_TOLERANCE: f64 = 1e-9;
const DEFAULT_AMPLITUDE_TOLERANCE: f64 = 1e-12;

/// Checks that the sum of squared amplitudes is 1 within `tolerance`.
///
/// # Returns
/// * `Ok(())` if normalized within tolerance.
/// * `Err(QrcaError::Incoherence)` otherwise.
pub fn check_normalization(state: &StateVector, tolerance: Option<f64>) -> Result<(), QrcaError> {
    let effective_tolerance = tolerance.unwrap_or(DEFAULT_NORM_TOLERANCE);
    let norm_sq: f64 = state.vector().iter().map(|c| c.norm_sqr()).sum();
    if (norm_sq - 1.0).abs() > effective_tolerance {
        Err(QrcaError::Incoherence {
            message: format!(
                "State vector normalization failed. Sum(|c_i|^2) = {} (Deviation > {})",
                norm_sq, effective_tolerance
            ),
        })
    } else {
        Ok(())
    }
}

/// Returns the index `k` if the state is (up to a phase) the basis state
/// `|k⟩`, i.e. exactly one amplitude is above `amplitude_tolerance`.
///
/// A state for which this returns `Some` measures deterministically, so a
/// single repetition is enough to read it out.
pub fn basis_state_index(state: &StateVector, amplitude_tolerance: Option<f64>) -> Option<usize> {
    let tolerance = amplitude_tolerance.unwrap_or(DEFAULT_AMPLITUDE_TOLERANCE);
    let mut significant = state
        .vector()
        .iter()
        .enumerate()
        .filter(|(_, c)| c.norm_sqr() > tolerance)
        .map(|(k, _)| k);
    match (significant.next(), significant.next()) {
        (Some(k), None) => Some(k),
        _ => None,
    }
}

/// Structural checks run before simulating a circuit:
/// no gate uses a qubit as both control and target, the two controls of a
/// Toffoli differ, and measurement keys are unique.
pub fn validate_circuit(circuit: &Circuit) -> Result<(), QrcaError> {
    let mut keys: HashSet<&str> = HashSet::new();
    for gate in circuit.operations() {
        let controls = gate.controls();
        if controls.contains(&gate.target()) {
            return Err(QrcaError::invalid_operation(format!(
                "Control and target qubits cannot be the same ({})",
                gate.target()
            )));
        }
        if let [c1, c2] = controls {
            if c1 == c2 {
                return Err(QrcaError::invalid_operation(format!(
                    "Toffoli controls must be distinct ({})",
                    c1
                )));
            }
        }
        if let Gate::Measure { key, .. } = gate {
            if !keys.insert(key.as_str()) {
                return Err(QrcaError::DuplicateMeasurementKey(key.clone()));
            }
        }
    }
    Ok(())
}
