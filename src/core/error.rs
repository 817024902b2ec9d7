//! Error handling logic

use super::qubit::QubitId;
use thiserror::Error;

/// Errors raised while building or simulating a circuit.
///
/// None of these can occur for a correctly built adder circuit. They exist so
/// that misuse of the lower-level circuit and simulator APIs is reported
/// instead of panicking.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QrcaError {
    /// An operand did not fit in four bits.
    #[error("Operand {0} is out of range: expected a 4-bit value (0-15)")]
    OperandOutOfRange(u8),

    /// An operation referenced a qubit the simulator has not allocated.
    #[error("Qubit {0} not found in simulation context")]
    UnknownQubit(QubitId),

    /// An operation is inconsistent with the circuit or simulator rules.
    #[error("Invalid Operation: {message}")]
    InvalidOperation {
        /// Explanation of the violated rule
        message: String,
    },

    /// Two measurements in one circuit share a result label.
    #[error("Measurement key '{0}' is used more than once")]
    DuplicateMeasurementKey(String),

    /// A result label was requested that the simulation never recorded.
    #[error("No measurement recorded under key '{0}'")]
    MissingMeasurement(String),

    /// The state vector for this many qubits does not fit in memory addressing.
    #[error("Cannot simulate {0} qubits: state vector dimension overflows usize")]
    TooManyQubits(usize),

    /// The state vector lost normalization during simulation.
    #[error("Incoherence: {message}")]
    Incoherence {
        /// Normalization failure details
        message: String,
    },
}

impl QrcaError {
    /// Shorthand for [`QrcaError::InvalidOperation`].
    pub fn invalid_operation(message: impl Into<String>) -> Self {
        Self::InvalidOperation { message: message.into() }
    }
}
