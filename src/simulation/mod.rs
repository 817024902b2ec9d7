// src/simulation/mod.rs

//! Runs a [`Circuit`] on a state-vector simulator.
//!
//! [`Simulator`] is the public entry point; the internal `SimulationEngine`
//! owns the amplitudes of a single repetition.

mod results;
pub(crate) mod engine;

pub use results::{FinalState, SimulationResult};

use crate::circuits::Circuit;
use crate::core::QrcaError;
use crate::operations::Gate;
use crate::validation;
use engine::SimulationEngine;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use tracing::{debug, info};

/// Simulator options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimulatorConfig {
    /// Seed for measurement sampling. When `None` the seed is derived from
    /// the circuit itself, so a given circuit always samples the same way.
    pub seed: Option<u64>,
}

/// Executes circuits and samples their measurements.
#[derive(Debug, Default)]
pub struct Simulator {
    config: SimulatorConfig,
}

impl Simulator {
    /// Creates a new Simulator with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a simulator with explicit options.
    pub fn with_config(config: SimulatorConfig) -> Self {
        Self { config }
    }

    /// Options this simulator was created with.
    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Runs `circuit` `repetitions` times and records every measurement.
    ///
    /// Each repetition starts from `|0...0⟩` over the circuit's qubits and
    /// applies the gates in order. A `Measure` samples its qubit, collapses
    /// the state and records the bit under its key.
    ///
    /// # Errors
    /// * `InvalidOperation` if `repetitions` is zero or a gate is malformed.
    /// * `DuplicateMeasurementKey` if two measurements share a key.
    /// * `Incoherence` if the state loses normalization.
    pub fn run(&self, circuit: &Circuit, repetitions: usize) -> Result<SimulationResult, QrcaError> {
        if repetitions == 0 {
            return Err(QrcaError::invalid_operation("Repetitions must be at least 1"));
        }
        validation::validate_circuit(circuit)?;

        if circuit.is_empty() {
            return Ok(SimulationResult::new(repetitions));
        }

        let seed = self.seed_for(circuit);
        info!(
            operations = circuit.len(),
            qubits = circuit.qubits().len(),
            repetitions,
            seed,
            "running circuit"
        );
        let mut rng = StdRng::seed_from_u64(seed);
        let mut result = SimulationResult::new(repetitions);

        for repetition in 0..repetitions {
            let mut engine = SimulationEngine::init(circuit.qubits())?;
            for gate in circuit.operations() {
                match gate {
                    Gate::Measure { target, key } => {
                        let bit = engine.measure(target, &mut rng)?;
                        result.record(key, bit);
                    }
                    _ => engine.apply_gate(gate)?,
                }
            }
            engine.validate_state()?;
            debug!(repetition, "repetition complete");
        }

        Ok(result)
    }

    /// Applies every unitary gate of `circuit`, skipping measurements, and
    /// returns the resulting state.
    pub fn simulate(&self, circuit: &Circuit) -> Result<FinalState, QrcaError> {
        validation::validate_circuit(circuit)?;
        let mut engine = SimulationEngine::init(circuit.qubits())?;
        for gate in circuit.operations().iter().filter(|g| !g.is_measurement()) {
            engine.apply_gate(gate)?;
        }
        engine.validate_state()?;
        Ok(FinalState::new(engine.qubit_order().to_vec(), engine.state().clone()))
    }

    fn seed_for(&self, circuit: &Circuit) -> u64 {
        self.config.seed.unwrap_or_else(|| {
            let mut hasher = DefaultHasher::new();
            circuit.operations().hash(&mut hasher);
            hasher.finish()
        })
    }
}
