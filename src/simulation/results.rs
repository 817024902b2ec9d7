// src/simulation/results.rs
use crate::core::{QrcaError, QubitId, StateVector};
use crate::validation;
use std::collections::HashMap;
use std::fmt;

/// Measurement record of a circuit run.
///
/// Every measurement key maps to one bit per repetition, in repetition order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationResult {
    measurements: HashMap<String, Vec<u8>>,
    repetitions: usize,
}

impl SimulationResult {
    pub(crate) fn new(repetitions: usize) -> Self {
        Self {
            measurements: HashMap::new(),
            repetitions,
        }
    }

    pub(crate) fn record(&mut self, key: &str, bit: u8) {
        self.measurements.entry(key.to_string()).or_default().push(bit);
    }

    /// Number of repetitions the circuit was run for.
    pub fn repetitions(&self) -> usize {
        self.repetitions
    }

    /// The bit observed under `key` in the first repetition.
    /// Returns `None` if nothing was recorded under that key.
    pub fn measurement(&self, key: &str) -> Option<u8> {
        self.measurements.get(key).and_then(|bits| bits.first().copied())
    }

    /// Like [`Self::measurement`] but reports a missing key as an error.
    pub fn bit(&self, key: &str) -> Result<u8, QrcaError> {
        self.measurement(key)
            .ok_or_else(|| QrcaError::MissingMeasurement(key.to_string()))
    }

    /// All bits observed under `key`, one per repetition.
    pub fn measurements(&self, key: &str) -> Option<&[u8]> {
        self.measurements.get(key).map(Vec::as_slice)
    }

    /// Returns a reference to the whole key → bits map.
    pub fn all_measurements(&self) -> &HashMap<String, Vec<u8>> {
        &self.measurements
    }
}

impl fmt::Display for SimulationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Simulation Results ({} repetitions):", self.repetitions)?;
        if self.measurements.is_empty() {
            writeln!(f, "  No qubits were measured.")?;
        } else {
            // Sorted by key for consistent output
            let mut sorted: Vec<_> = self.measurements.iter().collect();
            sorted.sort_by(|a, b| a.0.cmp(b.0));
            for (key, bits) in sorted {
                let bits: String = bits.iter().map(|b| b.to_string()).collect();
                writeln!(f, "  {}={}", key, bits)?;
            }
        }
        Ok(())
    }
}

/// State of a circuit after all unitary gates, before any measurement.
#[derive(Debug, Clone, PartialEq)]
pub struct FinalState {
    qubits: Vec<QubitId>,
    state: StateVector,
}

impl FinalState {
    pub(crate) fn new(qubits: Vec<QubitId>, state: StateVector) -> Self {
        Self { qubits, state }
    }

    /// Qubits in state-vector order, most significant first.
    pub fn qubits(&self) -> &[QubitId] {
        &self.qubits
    }

    /// The raw amplitudes.
    pub fn state(&self) -> &StateVector {
        &self.state
    }

    /// Index of the single basis state holding all the amplitude, or `None`
    /// if the state is a superposition.
    pub fn basis_state(&self) -> Option<usize> {
        validation::basis_state_index(&self.state, None)
    }

    /// Classical value of `qubit`, if the state is a basis state and the
    /// qubit belongs to it.
    pub fn basis_bit(&self, qubit: &QubitId) -> Option<u8> {
        let k = self.basis_state()?;
        let position = self.qubits.iter().position(|q| q == qubit)?;
        let shift = self.qubits.len() - 1 - position;
        Some(((k >> shift) & 1) as u8)
    }

    /// The basis state as a ket over the qubits in order, e.g. `|0110⟩`.
    pub fn ket(&self) -> Option<String> {
        let k = self.basis_state()?;
        let n = self.qubits.len();
        Some(format!("|{:0width$b}⟩", k, width = n))
    }
}
