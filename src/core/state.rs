// src/core/state.rs

use num_complex::Complex;
use num_traits::Zero;
use std::fmt;

/// Amplitudes of a register of qubits over the computational basis.
///
/// Index `k` is the basis state whose binary expansion lists the qubits in
/// simulator order, most significant bit first. The adder only ever drives
/// this through permutation gates, so in practice exactly one entry is
/// non-zero, but the representation is the general one.
#[derive(Debug, Clone, PartialEq)] // Avoid Eq for floating-point complex numbers
pub struct StateVector {
    amplitudes: Vec<Complex<f64>>,
}

impl StateVector {
    /// Wraps an amplitude vector as-is. Validation happens in the engine.
    pub(crate) fn new(amplitudes: Vec<Complex<f64>>) -> Self {
        Self { amplitudes }
    }

    /// The basis state `|k⟩` in a space of dimension `dim`.
    pub(crate) fn basis(dim: usize, k: usize) -> Self {
        let mut amplitudes = vec![Complex::zero(); dim];
        amplitudes[k] = Complex::new(1.0, 0.0);
        Self { amplitudes }
    }

    /// Read-only view of the amplitudes.
    pub fn vector(&self) -> &[Complex<f64>] {
        &self.amplitudes
    }

    pub(crate) fn vector_mut(&mut self) -> &mut [Complex<f64>] {
        &mut self.amplitudes
    }

    /// Number of basis states (2^N).
    pub fn dim(&self) -> usize {
        self.amplitudes.len()
    }
}

impl fmt::Display for StateVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "State[")?;
        let mut first = true;
        for (k, c) in self.amplitudes.iter().enumerate() {
            // Only non-negligible terms; the full vector is 8192 entries for the adder.
            if c.norm_sqr() > 1e-12 {
                write!(f, "{}{}: {:.4}", if first { "" } else { ", " }, k, c)?;
                first = false;
            }
        }
        write!(f, "]")
    }
}
