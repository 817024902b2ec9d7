// src/circuits/mod.rs

//! Ordered, append-only sequences of [`Gate`]s and a builder for them.
//!
//! A [`Circuit`] also knows which qubits it touches; the simulator sizes its
//! state vector from that set. The `Display` impl draws a text diagram with
//! one row per qubit, which the CLI shows in place of a rendered image.

use crate::core::QubitId;
use crate::operations::Gate;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// An ordered sequence of gates applied to a set of qubits.
///
/// Analogy: `cirq.Circuit` restricted to the moments-free, strictly
/// sequential case.
#[derive(Clone, PartialEq)]
pub struct Circuit {
    /// Every qubit mentioned by at least one gate.
    qubits: HashSet<QubitId>,

    /// Gates in application order.
    operations: Vec<Gate>,
}

impl Circuit {
    /// Creates a new, empty circuit.
    pub fn new() -> Self {
        Self {
            qubits: HashSet::new(),
            operations: Vec::new(),
        }
    }

    /// Appends `gate` and registers the qubits it involves.
    pub fn add_operation(&mut self, gate: Gate) {
        for qubit in gate.involved_qubits() {
            self.qubits.insert(qubit);
        }
        self.operations.push(gate);
    }

    /// Appends every gate yielded by `gates`, in order.
    pub fn add_operations<I>(&mut self, gates: I)
    where
        I: IntoIterator<Item = Gate>,
    {
        for gate in gates {
            self.add_operation(gate);
        }
    }

    /// The unique set of qubits involved in this circuit.
    pub fn qubits(&self) -> &HashSet<QubitId> {
        &self.qubits
    }

    /// The involved qubits in canonical (register, index) order.
    pub fn sorted_qubits(&self) -> Vec<QubitId> {
        let mut sorted: Vec<QubitId> = self.qubits.iter().copied().collect();
        sorted.sort();
        sorted
    }

    /// The gates in application order.
    pub fn operations(&self) -> &[Gate] {
        &self.operations
    }

    /// Result labels of all measurements, in circuit order.
    pub fn measurement_keys(&self) -> Vec<&str> {
        self.operations
            .iter()
            .filter_map(|gate| match gate {
                Gate::Measure { key, .. } => Some(key.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Returns the total number of gates, measurements included.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Returns `true` if the circuit contains no gates.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

impl Default for Circuit {
    fn default() -> Self {
        Self::new()
    }
}

//-------------------------------------------------------------------------
// Circuit Builder
//-------------------------------------------------------------------------

/// Builds a [`Circuit`] by method chaining.
pub struct CircuitBuilder {
    circuit: Circuit,
}

impl CircuitBuilder {
    /// Creates a new, empty CircuitBuilder.
    pub fn new() -> Self {
        Self { circuit: Circuit::new() }
    }

    /// Appends a single gate.
    pub fn add_op(mut self, gate: Gate) -> Self {
        self.circuit.add_operation(gate);
        self
    }

    /// Appends several gates.
    pub fn add_ops<I>(mut self, gates: I) -> Self
    where
        I: IntoIterator<Item = Gate>,
    {
        self.circuit.add_operations(gates);
        self
    }

    /// Finalizes the construction process and returns the built `Circuit`.
    pub fn build(self) -> Circuit {
        self.circuit
    }
}

impl Default for CircuitBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.operations.is_empty() {
            return writeln!(f, "qrca::Circuit[0 operations on 0 qubits]");
        }

        let ops = &self.operations;
        let num_ops = ops.len();

        let sorted_qubits = self.sorted_qubits();
        let num_qubits = sorted_qubits.len();
        let qubit_to_row: HashMap<QubitId, usize> =
            sorted_qubits.iter().enumerate().map(|(i, q)| (*q, i)).collect();

        let max_label_width = sorted_qubits.iter().map(|q| q.to_string().len()).max().unwrap_or(0);
        let label_padding = " ".repeat(max_label_width + 2); // Label + ": "

        const GATE_WIDTH: usize = 7; // fits "M:Carry"
        const WIRE: &str = "───────";
        const V_WIRE: char = '│';
        const H_WIRE: char = '─';

        // op_grid[row][time]: the wire segment drawn for that qubit at that step.
        let mut op_grid: Vec<Vec<String>> = vec![vec![WIRE.to_string(); num_ops]; num_qubits];
        // v_connect[row][time]: connector drawn between row and row + 1.
        let mut v_connect: Vec<Vec<char>> = vec![vec![' '; num_ops]; num_qubits];

        fn format_gate(symbol: &str) -> String {
            let slen = symbol.chars().count();
            if slen >= GATE_WIDTH {
                symbol.chars().take(GATE_WIDTH).collect()
            } else {
                let total_dashes = GATE_WIDTH - slen;
                let pre_dashes = total_dashes / 2;
                let post_dashes = total_dashes - pre_dashes;
                format!(
                    "{}{}{}",
                    H_WIRE.to_string().repeat(pre_dashes),
                    symbol,
                    H_WIRE.to_string().repeat(post_dashes)
                )
            }
        }

        for (t, gate) in ops.iter().enumerate() {
            let Some(&r_tgt) = qubit_to_row.get(&gate.target()) else {
                continue;
            };
            match gate {
                Gate::Measure { key, .. } => {
                    op_grid[r_tgt][t] = format_gate(&format!("M:{}", key));
                }
                _ => {
                    op_grid[r_tgt][t] = format_gate("X");
                    let mut r_min = r_tgt;
                    let mut r_max = r_tgt;
                    for control in gate.controls() {
                        if let Some(&r_ctrl) = qubit_to_row.get(control) {
                            op_grid[r_ctrl][t] = format_gate("@");
                            r_min = r_min.min(r_ctrl);
                            r_max = r_max.max(r_ctrl);
                        }
                    }
                    for row_vec in v_connect.iter_mut().take(r_max).skip(r_min) {
                        row_vec[t] = V_WIRE;
                    }
                }
            }
        }

        writeln!(f, "qrca::Circuit[{} operations on {} qubits]", num_ops, num_qubits)?;
        for r in 0..num_qubits {
            let label = format!("{}: ", sorted_qubits[r]);
            write!(f, "{:<width$}", label, width = max_label_width + 2)?;
            writeln!(f, "{}", op_grid[r].join(""))?;

            if r < num_qubits - 1 {
                write!(f, "{}", label_padding)?;
                for t in 0..num_ops {
                    let connector = v_connect[r][t];
                    let padding_needed = GATE_WIDTH.saturating_sub(1);
                    let pre_pad = padding_needed / 2;
                    let post_pad = padding_needed - pre_pad;
                    write!(f, "{}{}{}", " ".repeat(pre_pad), connector, " ".repeat(post_pad))?;
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RegisterName;

    fn a(i: usize) -> QubitId {
        QubitId::new(RegisterName::A, i)
    }

    fn b(i: usize) -> QubitId {
        QubitId::new(RegisterName::B, i)
    }

    #[test]
    fn test_add_operation_tracks_qubits() {
        let mut circuit = Circuit::new();
        circuit.add_operation(Gate::cnot(a(0), b(0)));
        circuit.add_operation(Gate::not(a(0)));
        assert_eq!(circuit.len(), 2);
        assert_eq!(circuit.qubits().len(), 2);
        assert_eq!(circuit.sorted_qubits(), vec![a(0), b(0)]);
    }

    #[test]
    fn test_measurement_keys_in_order() {
        let circuit = CircuitBuilder::new()
            .add_op(Gate::measure(b(1), "S1"))
            .add_op(Gate::not(a(0)))
            .add_op(Gate::measure(b(0), "S0"))
            .build();
        assert_eq!(circuit.measurement_keys(), vec!["S1", "S0"]);
    }

    #[test]
    fn test_empty_display() {
        let circuit = Circuit::default();
        assert!(circuit.is_empty());
        assert_eq!(circuit.to_string(), "qrca::Circuit[0 operations on 0 qubits]\n");
    }

    #[test]
    fn test_display_draws_controls_and_targets() {
        let circuit = CircuitBuilder::new()
            .add_op(Gate::cnot(a(0), b(0)))
            .add_op(Gate::measure(b(0), "S0"))
            .build();
        let text = circuit.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "qrca::Circuit[2 operations on 2 qubits]");
        assert_eq!(lines[1], "A0: ───@──────────");
        assert_eq!(lines[2], "       │          ");
        assert_eq!(lines[3], "B0: ───X────M:S0──");
    }
}
