// src/core/qubit.rs

use std::fmt;

/// The three registers the adder allocates qubits from.
///
/// The declaration order is significant: it is the row order of circuit
/// diagrams and the (most significant first) qubit order of the simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RegisterName {
    /// First operand, read-only during the addition.
    A,
    /// Second operand; overwritten with the sum bits.
    B,
    /// Carry chain, one slot longer than the operands.
    C,
}

impl fmt::Display for RegisterName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RegisterName::A => "A",
            RegisterName::B => "B",
            RegisterName::C => "C",
        };
        write!(f, "{}", name)
    }
}

/// Identifier for a single named qubit, e.g. `B2` or `C4`.
///
/// Uniqueness is by `(register, index)`. Two ids that compare equal refer to
/// the same wire in any circuit they appear in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QubitId {
    register: RegisterName,
    index: usize,
}

impl QubitId {
    /// Creates the id of qubit `index` within `register`.
    pub fn new(register: RegisterName, index: usize) -> Self {
        Self { register, index }
    }

    /// Register this qubit belongs to.
    pub fn register(&self) -> RegisterName {
        self.register
    }

    /// Position within the register, least significant first.
    pub fn index(&self) -> usize {
        self.index
    }
}

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.register, self.index)
    }
}
