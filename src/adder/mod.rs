// src/adder/mod.rs

//! The 4-bit ripple-carry adder.
//!
//! Operand A lives in register `A`, operand B in register `B`, and the carry
//! chain in register `C` (five qubits, `C0` is the constant-zero carry-in).
//! For each bit, least significant first, a four-gate full-adder block turns
//! `B[i]` into the sum bit and writes the carry into `C[i+1]`:
//!
//! ```text
//! A[i]   ──@──@────────────
//!          │  │
//! B[i]   ──@──X──@──X──  (= A[i] ⊕ B[i] ⊕ C[i])
//!          │     │  │
//! C[i]   ──┼─────@──@──
//!          │     │
//! C[i+1] ──X─────X─────  (carry out)
//! ```
//!
//! Every gate is a permutation of basis states and the circuit starts in a
//! basis state, so the measurement outcome is deterministic and one
//! repetition gives the exact sum.

use crate::circuits::{Circuit, CircuitBuilder};
use crate::core::{
    CARRY_BITS, CARRY_KEY, MAX_OPERAND, OPERAND_BITS, QrcaError, QubitId, RegisterName,
};
use crate::operations::Gate;
use crate::simulation::{SimulationResult, Simulator};
use serde::Serialize;
use std::fmt;
use tracing::{debug, info};

/// A 4-bit unsigned operand, `0..=15`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Nibble(u8);

impl Nibble {
    /// Validates `value` as a 4-bit operand.
    ///
    /// # Errors
    /// `QrcaError::OperandOutOfRange` if `value > 15`.
    pub fn new(value: u8) -> Result<Self, QrcaError> {
        if value > MAX_OPERAND {
            Err(QrcaError::OperandOutOfRange(value))
        } else {
            Ok(Self(value))
        }
    }

    /// Clamps any integer into `0..=15`, the way the input widgets do.
    pub fn clamped(value: i64) -> Self {
        Self(value.clamp(0, i64::from(MAX_OPERAND)) as u8)
    }

    /// Rebuilds an operand from its bits, least significant first.
    pub fn from_bits(bits: [bool; OPERAND_BITS]) -> Self {
        Self(bits_to_value(&bits) as u8)
    }

    /// The numeric value.
    pub fn value(self) -> u8 {
        self.0
    }

    /// Bits of the operand, least significant first.
    pub fn bits(self) -> [bool; OPERAND_BITS] {
        std::array::from_fn(|i| (self.0 >> i) & 1 == 1)
    }

    /// Bits of the operand, most significant first (reading order).
    pub fn bits_msb_first(self) -> [bool; OPERAND_BITS] {
        let mut bits = self.bits();
        bits.reverse();
        bits
    }
}

impl TryFrom<u8> for Nibble {
    type Error = QrcaError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Nibble> for u8 {
    fn from(n: Nibble) -> u8 {
        n.0
    }
}

impl fmt::Display for Nibble {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn bits_to_value(bits: &[bool]) -> u32 {
    bits.iter()
        .enumerate()
        .map(|(i, bit)| u32::from(*bit) << i)
        .sum()
}

/// Measurement label of sum bit `i`.
pub fn sum_key(i: usize) -> String {
    format!("S{}", i)
}

/// Qubit ids of the three adder registers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdderRegisters {
    a: [QubitId; OPERAND_BITS],
    b: [QubitId; OPERAND_BITS],
    c: [QubitId; CARRY_BITS],
}

impl AdderRegisters {
    /// Allocates `A0..A3`, `B0..B3` and `C0..C4`.
    pub fn new() -> Self {
        Self {
            a: std::array::from_fn(|i| QubitId::new(RegisterName::A, i)),
            b: std::array::from_fn(|i| QubitId::new(RegisterName::B, i)),
            c: std::array::from_fn(|i| QubitId::new(RegisterName::C, i)),
        }
    }

    /// Qubit `i` of operand A.
    pub fn a(&self, i: usize) -> QubitId {
        self.a[i]
    }

    /// Qubit `i` of operand B, which ends up holding sum bit `i`.
    pub fn b(&self, i: usize) -> QubitId {
        self.b[i]
    }

    /// Carry slot `i`; `c(4)` is the overflow.
    pub fn c(&self, i: usize) -> QubitId {
        self.c[i]
    }

    /// Number of qubits across all three registers.
    pub fn total_qubits(&self) -> usize {
        self.a.len() + self.b.len() + self.c.len()
    }
}

impl Default for AdderRegisters {
    fn default() -> Self {
        Self::new()
    }
}

/// One full-adder bit slice.
///
/// Afterwards `b_bit` holds `a ⊕ b ⊕ carry_in` and `carry_out` holds the
/// majority of the three inputs (given it started at 0).
pub fn full_adder_block(a_bit: QubitId, b_bit: QubitId, carry_in: QubitId, carry_out: QubitId) -> [Gate; 4] {
    [
        Gate::toffoli(a_bit, b_bit, carry_out),
        Gate::cnot(a_bit, b_bit),
        Gate::toffoli(carry_in, b_bit, carry_out),
        Gate::cnot(carry_in, b_bit),
    ]
}

/// NOT gates loading `a` and `b` into their registers from `|0⟩`.
/// For each bit position, A's gate (if any) precedes B's.
pub fn initialization_gates(regs: &AdderRegisters, a: Nibble, b: Nibble) -> Vec<Gate> {
    let (a_bits, b_bits) = (a.bits(), b.bits());
    let mut gates = Vec::new();
    for i in 0..OPERAND_BITS {
        if a_bits[i] {
            gates.push(Gate::not(regs.a(i)));
        }
        if b_bits[i] {
            gates.push(Gate::not(regs.b(i)));
        }
    }
    gates
}

/// Builds the complete adder circuit for `a + b`, measurements included.
pub fn build_adder_circuit(a: Nibble, b: Nibble) -> Circuit {
    let regs = AdderRegisters::new();
    let mut builder = CircuitBuilder::new().add_ops(initialization_gates(&regs, a, b));

    for i in 0..OPERAND_BITS {
        builder = builder.add_ops(full_adder_block(regs.a(i), regs.b(i), regs.c(i), regs.c(i + 1)));
    }

    for i in 0..OPERAND_BITS {
        builder = builder.add_op(Gate::measure(regs.b(i), sum_key(i)));
    }
    builder = builder.add_op(Gate::measure(regs.c(OPERAND_BITS), CARRY_KEY));

    let circuit = builder.build();
    debug!(a = a.value(), b = b.value(), operations = circuit.len(), "built adder circuit");
    circuit
}

/// Decoded result of one adder run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AdderOutcome {
    /// First operand.
    pub a: u8,
    /// Second operand.
    pub b: u8,
    /// Measured sum bits S0..S3, least significant first.
    pub sum_bits: [bool; OPERAND_BITS],
    /// Measured overflow bit.
    pub carry_out: bool,
    /// `Σ S_i·2^i + carry_out·16`.
    pub sum_decimal: u8,
}

impl AdderOutcome {
    /// Sum bits most significant first (reading order).
    pub fn sum_bits_msb_first(&self) -> [bool; OPERAND_BITS] {
        let mut bits = self.sum_bits;
        bits.reverse();
        bits
    }
}

/// Reads the sum bits and carry of the first repetition out of `result`.
///
/// # Errors
/// `QrcaError::MissingMeasurement` if a label is absent.
pub fn decode_outcome(a: Nibble, b: Nibble, result: &SimulationResult) -> Result<AdderOutcome, QrcaError> {
    let mut sum_bits = [false; OPERAND_BITS];
    for (i, bit) in sum_bits.iter_mut().enumerate() {
        *bit = result.bit(&sum_key(i))? == 1;
    }
    let carry_out = result.bit(CARRY_KEY)? == 1;
    let sum_decimal = (bits_to_value(&sum_bits) + (u32::from(carry_out) << OPERAND_BITS)) as u8;

    Ok(AdderOutcome {
        a: a.value(),
        b: b.value(),
        sum_bits,
        carry_out,
        sum_decimal,
    })
}

/// Builds the adder circuit for `a + b`, runs it once on a default
/// [`Simulator`] and decodes the result.
pub fn build_and_simulate(a: Nibble, b: Nibble) -> Result<AdderOutcome, QrcaError> {
    build_and_simulate_with(&Simulator::new(), a, b)
}

/// Like [`build_and_simulate`] with a caller-provided simulator.
pub fn build_and_simulate_with(simulator: &Simulator, a: Nibble, b: Nibble) -> Result<AdderOutcome, QrcaError> {
    let circuit = build_adder_circuit(a, b);
    let result = simulator.run(&circuit, 1)?;
    let outcome = decode_outcome(a, b, &result)?;
    info!(
        a = outcome.a,
        b = outcome.b,
        sum = outcome.sum_decimal,
        carry = outcome.carry_out,
        "adder run complete"
    );
    Ok(outcome)
}
