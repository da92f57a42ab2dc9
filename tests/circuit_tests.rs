// tests/circuit_tests.rs

//! State-level checks of the oracle, loader and amplification building
//! blocks, driven through the public executor.

use qsearch::circuits::loader::{load_array, unload_array};
use qsearch::circuits::oracle::phase_flip;
use qsearch::preprocessing::classical_preprocessing;
use qsearch::validation::{check_normalization, check_register_cleared};
use qsearch::{
    Circuit, ExecutionConfig, Executor, IndexOracleSearch, QsError, SearchCircuit,
};

const TOLERANCE: f64 = 1e-9;

#[test]
fn phase_flip_negates_exactly_the_marked_state() -> Result<(), QsError> {
    let mut circuit = Circuit::new();
    let idx = circuit.add_register("idx", 2);
    for q in idx.qubits() {
        circuit.h(q);
    }
    circuit.append(phase_flip(&idx, "10"));

    let state = Executor::new().final_state(&circuit)?;
    check_normalization(&state, None)?;

    // Register qubit 0 is the most significant basis bit, so the pattern
    // "10" sits at basis index 2.
    let amplitudes = state.amplitudes();
    for (i, amplitude) in amplitudes.iter().enumerate() {
        let expected = if i == 2 { -0.5 } else { 0.5 };
        assert!(
            (amplitude.re - expected).abs() < TOLERANCE && amplitude.im.abs() < TOLERANCE,
            "amplitude {i} = {amplitude}"
        );
    }
    Ok(())
}

#[test]
fn load_then_unload_restores_the_value_register() -> Result<(), QsError> {
    let array: Vec<String> = ["101", "010", "110", "011"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    let mut circuit = Circuit::new();
    let idx = circuit.add_register("idx", 2);
    let val = circuit.add_register("val", 3);
    for q in idx.qubits() {
        circuit.h(q);
    }
    circuit.append(load_array(&array, &idx, &val));
    circuit.append(unload_array(&array, &idx, &val));

    let state = Executor::new().final_state(&circuit)?;
    check_normalization(&state, None)?;
    check_register_cleared(&state, &val, None)?;
    Ok(())
}

#[test]
fn loaded_values_are_entangled_with_their_index() -> Result<(), QsError> {
    let array: Vec<String> = ["10", "01"].iter().map(|s| s.to_string()).collect();

    let mut circuit = Circuit::new();
    let idx = circuit.add_register("idx", 1);
    let val = circuit.add_register("val", 2);
    circuit.h(idx.qubit(0));
    circuit.append(load_array(&array, &idx, &val));

    // (|0>|10> + |1>|01>) / sqrt(2): basis indices 0b010 and 0b101.
    let state = Executor::new().final_state(&circuit)?;
    let probabilities: Vec<f64> = state.amplitudes().iter().map(|a| a.norm_sqr()).collect();
    assert!((probabilities[0b010] - 0.5).abs() < TOLERANCE);
    assert!((probabilities[0b101] - 0.5).abs() < TOLERANCE);
    Ok(())
}

#[test]
fn one_grover_iteration_amplifies_a_single_marked_state() -> Result<(), QsError> {
    // One marked window of eight. Uniform sampling hits it 12.5% of the
    // time; one amplification iteration raises that to about 78%.
    let pre = classical_preprocessing("axxxxxxx", &["a"], 8, 1)?;
    assert_eq!(pre.valid_states, vec!["000".to_string()]);

    let executor = Executor::with_seed(5);
    let config = ExecutionConfig::default();

    let flat = executor.execute(&IndexOracleSearch.build(&pre, 0)?, &config)?;
    let amplified = executor.execute(&IndexOracleSearch.build(&pre, 1)?, &config)?;

    let marked_fraction = |counts: &std::collections::HashMap<String, u64>| {
        *counts.get("000").unwrap_or(&0) as f64 / 1024.0
    };
    assert!(marked_fraction(&flat.counts) < 0.3);
    assert!(marked_fraction(&amplified.counts) > 0.6);
    Ok(())
}

#[test]
fn counting_is_exact_when_the_phase_is_representable() -> Result<(), QsError> {
    // Four marked windows of eight: the Grover eigenphases land exactly on
    // counting readouts 2 and 6 with a 3-qubit register, so the estimate
    // recovers M = 4 with no spread.
    let pre = classical_preprocessing("axaxaxax", &["a"], 8, 1)?;
    assert_eq!(pre.valid_states.len(), 4);

    let circuit =
        qsearch::circuits::counting::quantum_counting_circuit(pre.n_qubits, 3, &pre.valid_states);
    let outcome = Executor::with_seed(5).execute(&circuit, &ExecutionConfig::default())?;
    for key in outcome.counts.keys() {
        assert!(key == "010" || key == "110", "unexpected readout {key}");
    }

    let estimate =
        qsearch::metrics::estimate_marked_state_count(&outcome.counts, 3, pre.n_substr)?;
    assert!((estimate.m_est - 4.0).abs() < 1e-6, "m_est {}", estimate.m_est);
    Ok(())
}
