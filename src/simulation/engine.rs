// src/simulation/engine.rs
use crate::core::{QrcaError, QubitId, StateVector};
use crate::operations::Gate;
use crate::validation;
use num_complex::Complex;
use num_traits::Zero;
use rand::Rng;
use std::collections::{HashMap, HashSet};
use tracing::trace;

/// 2x2 matrix applied to a target qubit.
type Matrix2 = [[Complex<f64>; 2]; 2];

/// Pauli-X. Every gate in the supported set is this matrix with zero, one or
/// two controls.
fn pauli_x() -> Matrix2 {
    [
        [Complex::zero(), Complex::new(1.0, 0.0)],
        [Complex::new(1.0, 0.0), Complex::zero()],
    ]
}

/// Holds the state vector of one simulation repetition and applies gates to it.
/// (Internal visibility)
#[derive(Debug)]
pub(crate) struct SimulationEngine {
    /// Maps each qubit to its position (0..N-1) in the sorted qubit order.
    qubit_indices: HashMap<QubitId, usize>,
    /// Qubits in the order used for state-vector indexing, most significant first.
    qubit_order: Vec<QubitId>,
    /// Amplitudes over all 2^N basis states.
    state: StateVector,
    num_qubits: usize,
}

impl SimulationEngine {
    /// Initializes the engine in `|0...0⟩` over the given qubits.
    ///
    /// Qubits are ordered by `QubitId`'s `Ord`, so index assignment does not
    /// depend on `HashSet` iteration order.
    pub(crate) fn init(qubits: &HashSet<QubitId>) -> Result<Self, QrcaError> {
        if qubits.is_empty() {
            return Err(QrcaError::invalid_operation(
                "Cannot initialize simulation engine with zero qubits",
            ));
        }

        let num_qubits = qubits.len();
        let dim = u32::try_from(num_qubits)
            .ok()
            .and_then(|n| 1usize.checked_shl(n))
            .ok_or(QrcaError::TooManyQubits(num_qubits))?;

        let mut qubit_order: Vec<QubitId> = qubits.iter().copied().collect();
        qubit_order.sort();
        let qubit_indices = qubit_order.iter().enumerate().map(|(i, q)| (*q, i)).collect();

        Ok(Self {
            qubit_indices,
            qubit_order,
            state: StateVector::basis(dim, 0),
            num_qubits,
        })
    }

    #[cfg(test)]
    pub(crate) fn set_state(&mut self, state: StateVector) -> Result<(), QrcaError> {
        if state.dim() != self.state.dim() {
            Err(QrcaError::invalid_operation(format!(
                "Cannot set state: provided dimension {} does not match engine dimension {}",
                state.dim(),
                self.state.dim()
            )))
        } else {
            self.state = state;
            Ok(())
        }
    }

    pub(crate) fn state(&self) -> &StateVector {
        &self.state
    }

    pub(crate) fn qubit_order(&self) -> &[QubitId] {
        &self.qubit_order
    }

    /// Applies a unitary gate. Measurements go through [`Self::measure`].
    pub(crate) fn apply_gate(&mut self, gate: &Gate) -> Result<(), QrcaError> {
        if gate.is_measurement() {
            return Err(QrcaError::invalid_operation(
                "Measure should not be passed directly to apply_gate",
            ));
        }

        let target = self.bit_position(&gate.target())?;
        let controls = gate
            .controls()
            .iter()
            .map(|c| self.bit_position(c))
            .collect::<Result<Vec<_>, _>>()?;
        if controls.contains(&target) {
            return Err(QrcaError::invalid_operation(format!(
                "Control and target qubits cannot be the same ({})",
                gate.target()
            )));
        }

        trace!(?gate, "applying gate");
        self.apply_controlled_gate(&controls, target, &pauli_x());
        Ok(())
    }

    /// Measures `target` in the computational basis.
    ///
    /// The outcome is drawn from the Born distribution using `rng`; the state
    /// is then projected onto the observed outcome and renormalized.
    pub(crate) fn measure<R: Rng>(&mut self, target: &QubitId, rng: &mut R) -> Result<u8, QrcaError> {
        let k = self.bit_position(target)?;
        let mask = 1usize << k;

        let p_one: f64 = self
            .state
            .vector()
            .iter()
            .enumerate()
            .filter(|(i, _)| i & mask != 0)
            .map(|(_, c)| c.norm_sqr())
            .sum();

        let sample: f64 = rng.random::<f64>();
        let outcome: u8 = if sample < p_one { 1 } else { 0 };
        let p_outcome = if outcome == 1 { p_one } else { 1.0 - p_one };
        if p_outcome <= 1e-12 {
            return Err(QrcaError::Incoherence {
                message: format!("Measured outcome {} of {} has negligible probability {}", outcome, target, p_outcome),
            });
        }

        let scale = 1.0 / p_outcome.sqrt();
        for (i, amp) in self.state.vector_mut().iter_mut().enumerate() {
            let bit = u8::from(i & mask != 0);
            if bit == outcome {
                *amp *= scale;
            } else {
                *amp = Complex::zero();
            }
        }

        trace!(qubit = %target, outcome, p_one, "measured");
        Ok(outcome)
    }

    /// Checks the state is still normalized.
    pub(crate) fn validate_state(&self) -> Result<(), QrcaError> {
        validation::check_normalization(&self.state, None)
    }

    /// Bit position (from the right) of `qubit` within a basis-state index.
    fn bit_position(&self, qubit: &QubitId) -> Result<usize, QrcaError> {
        let index = self
            .qubit_indices
            .get(qubit)
            .ok_or(QrcaError::UnknownQubit(*qubit))?;
        Ok(self.num_qubits - 1 - index)
    }

    /// Applies `matrix` to the qubit at bit position `target` within the
    /// subspace where every bit in `controls` is set.
    fn apply_controlled_gate(&mut self, controls: &[usize], target: usize, matrix: &Matrix2) {
        let control_mask = controls.iter().fold(0usize, |m, c| m | (1 << c));
        let k_mask = 1usize << target;
        let lower_mask = k_mask - 1;
        let dim = self.state.dim();
        let amplitudes = self.state.vector_mut();

        // Each i enumerates one pair of basis states differing only at the target bit.
        for i in 0..dim / 2 {
            let i0 = ((i >> target) << (target + 1)) | (i & lower_mask);
            if i0 & control_mask != control_mask {
                continue;
            }
            let i1 = i0 | k_mask;

            let psi_0 = amplitudes[i0];
            let psi_1 = amplitudes[i1];
            amplitudes[i0] = matrix[0][0] * psi_0 + matrix[0][1] * psi_1;
            amplitudes[i1] = matrix[1][0] * psi_0 + matrix[1][1] * psi_1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RegisterName;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::f64::consts::FRAC_1_SQRT_2;

    fn q(register: RegisterName, index: usize) -> QubitId {
        QubitId::new(register, index)
    }

    fn engine_for(qubits: &[QubitId]) -> SimulationEngine {
        let set: HashSet<QubitId> = qubits.iter().copied().collect();
        SimulationEngine::init(&set).expect("engine init")
    }

    fn basis_index(engine: &SimulationEngine) -> usize {
        validation::basis_state_index(engine.state(), None).expect("basis state")
    }

    #[test]
    fn test_init_rejects_empty() {
        let err = SimulationEngine::init(&HashSet::new()).unwrap_err();
        assert!(matches!(err, QrcaError::InvalidOperation { .. }));
    }

    #[test]
    fn test_not_flips_most_significant_for_first_qubit() {
        let a0 = q(RegisterName::A, 0);
        let b0 = q(RegisterName::B, 0);
        let mut engine = engine_for(&[b0, a0]);
        engine.apply_gate(&Gate::not(a0)).unwrap();
        // A0 sorts first, so it is the high bit of a 2-qubit index.
        assert_eq!(basis_index(&engine), 0b10);
        engine.apply_gate(&Gate::not(b0)).unwrap();
        assert_eq!(basis_index(&engine), 0b11);
    }

    #[test]
    fn test_cnot_respects_control() {
        let c = q(RegisterName::A, 0);
        let t = q(RegisterName::A, 1);
        let mut engine = engine_for(&[c, t]);
        engine.apply_gate(&Gate::cnot(c, t)).unwrap();
        assert_eq!(basis_index(&engine), 0b00);
        engine.apply_gate(&Gate::not(c)).unwrap();
        engine.apply_gate(&Gate::cnot(c, t)).unwrap();
        assert_eq!(basis_index(&engine), 0b11);
    }

    #[test]
    fn test_toffoli_truth_table() {
        let c1 = q(RegisterName::A, 0);
        let c2 = q(RegisterName::B, 0);
        let t = q(RegisterName::C, 1);
        for (x, y) in [(0, 0), (0, 1), (1, 0), (1, 1)] {
            let mut engine = engine_for(&[c1, c2, t]);
            if x == 1 {
                engine.apply_gate(&Gate::not(c1)).unwrap();
            }
            if y == 1 {
                engine.apply_gate(&Gate::not(c2)).unwrap();
            }
            engine.apply_gate(&Gate::toffoli(c1, c2, t)).unwrap();
            let k = basis_index(&engine);
            assert_eq!(k & 1, x & y, "target after CCNOT for controls ({}, {})", x, y);
        }
    }

    #[test]
    fn test_gate_on_unknown_qubit_fails() {
        let mut engine = engine_for(&[q(RegisterName::A, 0)]);
        let stranger = q(RegisterName::C, 4);
        assert_eq!(
            engine.apply_gate(&Gate::not(stranger)),
            Err(QrcaError::UnknownQubit(stranger))
        );
    }

    #[test]
    fn test_control_equal_to_target_fails() {
        let a0 = q(RegisterName::A, 0);
        let mut engine = engine_for(&[a0]);
        let err = engine.apply_gate(&Gate::cnot(a0, a0)).unwrap_err();
        assert!(matches!(err, QrcaError::InvalidOperation { .. }));
    }

    #[test]
    fn test_measure_basis_state_is_certain() -> Result<(), QrcaError> {
        let a0 = q(RegisterName::A, 0);
        let a1 = q(RegisterName::A, 1);
        let mut engine = engine_for(&[a0, a1]);
        engine.apply_gate(&Gate::not(a1))?;
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(engine.measure(&a0, &mut rng)?, 0);
        assert_eq!(engine.measure(&a1, &mut rng)?, 1);
        engine.validate_state()?;
        Ok(())
    }

    #[test]
    fn test_measure_collapses_superposition() -> Result<(), QrcaError> {
        let a0 = q(RegisterName::A, 0);
        let mut engine = engine_for(&[a0]);
        engine.set_state(StateVector::new(vec![
            Complex::new(FRAC_1_SQRT_2, 0.0),
            Complex::new(FRAC_1_SQRT_2, 0.0),
        ]))?;
        let mut rng = StdRng::seed_from_u64(42);
        let outcome = engine.measure(&a0, &mut rng)?;
        assert_eq!(basis_index(&engine), outcome as usize);
        engine.validate_state()?;
        Ok(())
    }

    #[test]
    fn test_apply_gate_rejects_measure() {
        let a0 = q(RegisterName::A, 0);
        let mut engine = engine_for(&[a0]);
        assert!(engine.apply_gate(&Gate::measure(a0, "m")).is_err());
    }
}
