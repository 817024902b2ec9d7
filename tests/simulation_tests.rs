// tests/simulation_tests.rs

use qrca::{
    Circuit, CircuitBuilder, Gate, QrcaError, QubitId, RegisterName, SimulationResult, Simulator,
    SimulatorConfig,
};

// Helper to create QubitIds in register A for tests
fn qid(index: usize) -> QubitId {
    QubitId::new(RegisterName::A, index)
}

// Helper to check the first-repetition bit recorded under a key
fn check_measurement(result: &SimulationResult, key: &str, expected: u8) {
    match result.measurement(key) {
        Some(bit) => assert_eq!(bit, expected, "Mismatch for key {}", key),
        None => panic!("Key {} was not measured", key),
    }
}

#[test]
fn test_empty_circuit() -> Result<(), QrcaError> {
    let circuit = Circuit::new();
    let simulator = Simulator::new();
    let result = simulator.run(&circuit, 1)?;

    assert!(result.all_measurements().is_empty(), "Empty circuit should yield empty results");
    Ok(())
}

#[test]
fn test_initial_state_measurement() -> Result<(), QrcaError> {
    let q0 = qid(0);
    let circuit = CircuitBuilder::new().add_op(Gate::measure(q0, "m0")).build();

    let result = Simulator::new().run(&circuit, 1)?;

    assert_eq!(result.all_measurements().len(), 1, "Should have one result");
    check_measurement(&result, "m0", 0);
    Ok(())
}

#[test]
fn test_not_gate() -> Result<(), QrcaError> {
    let q0 = qid(0);
    let circuit = CircuitBuilder::new()
        .add_op(Gate::not(q0))
        .add_op(Gate::measure(q0, "m0"))
        .build();

    let result = Simulator::new().run(&circuit, 1)?;

    // Started in |0>, flipped to |1>
    check_measurement(&result, "m0", 1);
    Ok(())
}

#[test]
fn test_double_not_is_identity() -> Result<(), QrcaError> {
    let q0 = qid(0);
    let circuit = CircuitBuilder::new()
        .add_op(Gate::not(q0))
        .add_op(Gate::not(q0))
        .add_op(Gate::measure(q0, "m0"))
        .build();

    let result = Simulator::new().run(&circuit, 1)?;
    check_measurement(&result, "m0", 0);
    Ok(())
}

#[test]
fn test_two_qubits_flip_one() -> Result<(), QrcaError> {
    let q0 = qid(0);
    let q1 = qid(1);
    let circuit = CircuitBuilder::new()
        .add_op(Gate::not(q1))
        .add_op(Gate::measure(q0, "m0"))
        .add_op(Gate::measure(q1, "m1"))
        .build();

    let result = Simulator::new().run(&circuit, 1)?;

    assert_eq!(result.all_measurements().len(), 2);
    check_measurement(&result, "m0", 0);
    check_measurement(&result, "m1", 1);
    Ok(())
}

#[test]
fn test_cnot_control0() -> Result<(), QrcaError> {
    let q0 = qid(0); // Control
    let q1 = qid(1); // Target
    let circuit = CircuitBuilder::new()
        .add_op(Gate::cnot(q0, q1))
        .add_op(Gate::measure(q0, "c"))
        .add_op(Gate::measure(q1, "t"))
        .build();

    let result = Simulator::new().run(&circuit, 1)?;

    check_measurement(&result, "c", 0);
    // Control is |0>, target must not flip
    check_measurement(&result, "t", 0);
    Ok(())
}

#[test]
fn test_cnot_control1() -> Result<(), QrcaError> {
    let q0 = qid(0);
    let q1 = qid(1);
    let circuit = CircuitBuilder::new()
        .add_op(Gate::not(q0))
        .add_op(Gate::cnot(q0, q1))
        .add_op(Gate::measure(q0, "c"))
        .add_op(Gate::measure(q1, "t"))
        .build();

    let result = Simulator::new().run(&circuit, 1)?;

    check_measurement(&result, "c", 1);
    check_measurement(&result, "t", 1);
    Ok(())
}

#[test]
fn test_cnot_with_target_ordered_before_control() -> Result<(), QrcaError> {
    // Control sorts after the target, exercising the other bit-order branch.
    let control = QubitId::new(RegisterName::C, 0);
    let target = qid(0);
    let circuit = CircuitBuilder::new()
        .add_op(Gate::not(control))
        .add_op(Gate::cnot(control, target))
        .add_op(Gate::measure(target, "t"))
        .build();

    let result = Simulator::new().run(&circuit, 1)?;
    check_measurement(&result, "t", 1);
    Ok(())
}

#[test]
fn test_toffoli_all_inputs() -> Result<(), QrcaError> {
    let c1 = qid(0);
    let c2 = qid(1);
    let t = qid(2);
    for (x, y) in [(false, false), (false, true), (true, false), (true, true)] {
        let mut builder = CircuitBuilder::new();
        if x {
            builder = builder.add_op(Gate::not(c1));
        }
        if y {
            builder = builder.add_op(Gate::not(c2));
        }
        let circuit = builder
            .add_op(Gate::toffoli(c1, c2, t))
            .add_op(Gate::measure(c1, "x"))
            .add_op(Gate::measure(c2, "y"))
            .add_op(Gate::measure(t, "t"))
            .build();

        let result = Simulator::new().run(&circuit, 1)?;
        check_measurement(&result, "x", u8::from(x));
        check_measurement(&result, "y", u8::from(y));
        check_measurement(&result, "t", u8::from(x && y));
    }
    Ok(())
}

#[test]
fn test_measurement_does_not_disturb_basis_state() -> Result<(), QrcaError> {
    let q0 = qid(0);
    let q1 = qid(1);
    let circuit = CircuitBuilder::new()
        .add_op(Gate::not(q0))
        .add_op(Gate::measure(q0, "before"))
        .add_op(Gate::cnot(q0, q1))
        .add_op(Gate::measure(q1, "after"))
        .build();

    let result = Simulator::new().run(&circuit, 1)?;
    check_measurement(&result, "before", 1);
    check_measurement(&result, "after", 1);
    Ok(())
}

#[test]
fn test_duplicate_key_rejected() {
    let circuit = CircuitBuilder::new()
        .add_op(Gate::measure(qid(0), "m"))
        .add_op(Gate::measure(qid(1), "m"))
        .build();

    let err = Simulator::new().run(&circuit, 1).unwrap_err();
    assert_eq!(err, QrcaError::DuplicateMeasurementKey("m".to_string()));
}

#[test]
fn test_seeded_runs_agree() -> Result<(), QrcaError> {
    let q0 = qid(0);
    let circuit = CircuitBuilder::new()
        .add_op(Gate::not(q0))
        .add_op(Gate::measure(q0, "m"))
        .build();

    let config = SimulatorConfig { seed: Some(1234) };
    let first = Simulator::with_config(config.clone()).run(&circuit, 8)?;
    let second = Simulator::with_config(config).run(&circuit, 8)?;
    assert_eq!(first, second);
    assert_eq!(first.measurements("m"), Some(&[1u8; 8][..]));
    Ok(())
}
