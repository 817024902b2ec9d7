// src/operations/mod.rs

//! Defines the gates a circuit can contain.
//!
//! The set is deliberately limited to reversible classical gates (NOT, CNOT,
//! Toffoli) plus computational-basis measurement. None of them creates a
//! superposition from a basis state, which is what makes a single simulator
//! repetition an exact answer for the adder.

use crate::core::QubitId;

/// A single step of a circuit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Gate {
    /// Pauli-X on one qubit: `|0⟩ ↔ |1⟩`.
    Not {
        /// The qubit to flip.
        target: QubitId,
    },

    /// Flips `target` when `control` is `|1⟩`.
    ControlledNot {
        /// Qubit read by the gate.
        control: QubitId,
        /// Qubit flipped by the gate.
        target: QubitId,
    },

    /// Toffoli (CCNOT): flips `target` when both controls are `|1⟩`.
    Toffoli {
        /// The two qubits read by the gate.
        controls: [QubitId; 2],
        /// Qubit flipped by the gate.
        target: QubitId,
    },

    /// Measures `target` in the computational basis and records the bit
    /// under `key`.
    Measure {
        /// The measured qubit.
        target: QubitId,
        /// Result label, unique within a circuit.
        key: String,
    },
}

impl Gate {
    /// Convenience constructor for [`Gate::Not`].
    pub fn not(target: QubitId) -> Self {
        Gate::Not { target }
    }

    /// Convenience constructor for [`Gate::ControlledNot`].
    pub fn cnot(control: QubitId, target: QubitId) -> Self {
        Gate::ControlledNot { control, target }
    }

    /// Convenience constructor for [`Gate::Toffoli`].
    pub fn toffoli(control1: QubitId, control2: QubitId, target: QubitId) -> Self {
        Gate::Toffoli { controls: [control1, control2], target }
    }

    /// Convenience constructor for [`Gate::Measure`].
    pub fn measure(target: QubitId, key: impl Into<String>) -> Self {
        Gate::Measure { target, key: key.into() }
    }

    /// Returns every qubit the gate touches, controls first.
    pub fn involved_qubits(&self) -> Vec<QubitId> {
        match self {
            Gate::Not { target } => vec![*target],
            Gate::ControlledNot { control, target } => vec![*control, *target],
            Gate::Toffoli { controls, target } => vec![controls[0], controls[1], *target],
            Gate::Measure { target, .. } => vec![*target],
        }
    }

    /// The control qubits of the gate (empty for `Not` and `Measure`).
    pub fn controls(&self) -> &[QubitId] {
        match self {
            Gate::ControlledNot { control, .. } => std::slice::from_ref(control),
            Gate::Toffoli { controls, .. } => controls,
            Gate::Not { .. } | Gate::Measure { .. } => &[],
        }
    }

    /// The qubit the gate writes to or reads out.
    pub fn target(&self) -> QubitId {
        match self {
            Gate::Not { target }
            | Gate::ControlledNot { target, .. }
            | Gate::Toffoli { target, .. }
            | Gate::Measure { target, .. } => *target,
        }
    }

    /// `true` for [`Gate::Measure`].
    pub fn is_measurement(&self) -> bool {
        matches!(self, Gate::Measure { .. })
    }
}
