// tests/search_tests.rs

//! End-to-end pipeline tests: preprocessing ground truth and full
//! count-then-search runs under both oracle strategies.

use qsearch::core::format_bits;
use qsearch::hashing::compare_hash;
use qsearch::preprocessing::classical_preprocessing;
use qsearch::{
    run_full_search, ExecutionConfig, Executor, IndexOracleSearch, QsError, SearchCircuit,
    SearchConfig, ValueOracleSearch,
};

#[test]
fn preprocessing_matches_a_brute_force_scan() -> Result<(), QsError> {
    let text = "running patterns running";
    let target = "ing";
    let pre = classical_preprocessing(text, &[target], 8, 1)?;
    assert_eq!(pre.n_substr, 22);
    assert_eq!(pre.n_qubits, 5);

    let mut expected = Vec::new();
    for (i, window) in text.as_bytes().windows(target.len()).enumerate() {
        if compare_hash(window, target.as_bytes(), 8, 1)? {
            expected.push(format_bits(i as u64, pre.n_qubits));
        }
    }
    assert_eq!(pre.valid_states, expected);

    // With an 8-bit digest only the final window byte survives the fold,
    // so exactly the two windows ending in 'g' match.
    assert_eq!(pre.valid_states, vec!["00100".to_string(), "10101".to_string()]);
    Ok(())
}

#[test]
fn index_width_leaves_dead_states_untouchable() -> Result<(), QsError> {
    // 9 windows need 4 qubits; the 7 dead index states can never be valid.
    let pre = classical_preprocessing("aaaaaaaaaaa", &["aaa"], 8, 1)?;
    assert_eq!(pre.n_substr, 9);
    assert_eq!(pre.n_qubits, 4);
    for state in &pre.valid_states {
        let position = u64::from_str_radix(state, 2).unwrap();
        assert!(position < 9);
    }
    Ok(())
}

#[test]
fn zero_target_digest_marks_dead_index_states() -> Result<(), QsError> {
    // A NUL byte hashes to the all-zeros digest. Dead index states beyond
    // n_substr are never loaded, so their value register stays |0...0> and
    // the value oracle marks them alongside the one truly valid position:
    // 8 of 16 index states carry the flip and the amplification washes out,
    // while the index oracle keeps amplifying only the valid position.
    let pre = classical_preprocessing("\0xxxxxxxx", &["\0"], 8, 1)?;
    assert_eq!(pre.n_substr, 9);
    assert_eq!(pre.n_qubits, 4);
    assert_eq!(pre.valid_states, vec!["0000".to_string()]);
    assert_eq!(pre.marked_digests, vec!["00000000".to_string()]);

    let executor = Executor::with_seed(17);
    let config = ExecutionConfig::default();

    let by_value = executor.execute(&ValueOracleSearch.build(&pre, 3)?, &config)?;
    let dead_shots: u64 = by_value
        .counts
        .iter()
        .filter(|(outcome, _)| {
            let decoded: String = outcome.chars().rev().collect();
            u64::from_str_radix(&decoded, 2).unwrap() >= 9
        })
        .map(|(_, count)| *count)
        .sum();
    // With half the index space marked, every state keeps probability 1/16
    // regardless of the iteration count; the 7 dead states together hold
    // about 44% of the shots.
    let dead_fraction = dead_shots as f64 / 1024.0;
    assert!(
        dead_fraction > 0.3 && dead_fraction < 0.6,
        "dead fraction {dead_fraction}"
    );

    let by_index = executor.execute(&IndexOracleSearch.build(&pre, 3)?, &config)?;
    let valid_fraction = *by_index.counts.get("0000").unwrap_or(&0) as f64 / 1024.0;
    assert!(valid_fraction > 0.8, "valid fraction {valid_fraction}");
    Ok(())
}

fn full_run(strategy: &dyn SearchCircuit) -> Result<(), QsError> {
    let config = SearchConfig {
        p_count: 4,
        seed: Some(13),
        ..SearchConfig::default()
    };
    let outcome = run_full_search("axxxxxxx", &["a"], &config, strategy)?;

    assert_eq!(outcome.n_substr, 8);
    assert_eq!(outcome.n_qubits, 3);
    assert_eq!(outcome.valid_states, vec!["000".to_string()]);

    // One marked state of eight: the counting mode sits next to the true
    // phase and the derived iteration count is the textbook two.
    assert!(outcome.m_est > 0.5 && outcome.m_est < 2.0, "m_est {}", outcome.m_est);
    assert_eq!(outcome.optimal_iterations, 2);
    assert!(
        outcome.valid_fraction > 0.5,
        "valid fraction {}",
        outcome.valid_fraction
    );
    assert!(outcome.search_gate_count > 0);
    assert!(outcome.counting_depth > 0);
    Ok(())
}

#[test]
fn full_pipeline_with_the_index_oracle() -> Result<(), QsError> {
    full_run(&IndexOracleSearch)
}

#[test]
fn full_pipeline_with_the_value_oracle() -> Result<(), QsError> {
    full_run(&ValueOracleSearch)
}

#[test]
fn both_strategies_agree_on_the_winning_position() -> Result<(), QsError> {
    let config = SearchConfig {
        p_count: 4,
        seed: Some(29),
        ..SearchConfig::default()
    };
    let by_index = run_full_search("xxxaxxxx", &["a"], &config, &IndexOracleSearch)?;
    let by_value = run_full_search("xxxaxxxx", &["a"], &config, &ValueOracleSearch)?;

    let mode = |outcome: &qsearch::SearchOutcome| {
        outcome
            .counts_search
            .iter()
            .max_by(|(key_a, count_a), (key_b, count_b)| {
                count_a.cmp(count_b).then_with(|| key_b.cmp(key_a))
            })
            .map(|(key, _)| key.clone())
    };
    assert_eq!(mode(&by_index), mode(&by_value));
    // Index pattern "011" (position 3) measures reversed as "110".
    assert_eq!(mode(&by_index).as_deref(), Some("110"));
    Ok(())
}

#[test]
fn no_match_derives_zero_iterations() -> Result<(), QsError> {
    // No window hashes to the target digest: counting concentrates near
    // r = 2^(p-1) (theta = pi), the estimate collapses to zero and the
    // search degenerates to uniform sampling.
    let config = SearchConfig {
        p_count: 4,
        seed: Some(3),
        ..SearchConfig::default()
    };
    let outcome = run_full_search("xxxxxxxx", &["a"], &config, &IndexOracleSearch)?;
    assert!(outcome.valid_states.is_empty());
    assert_eq!(outcome.optimal_iterations, 0);
    assert!(outcome.m_est < 0.5, "m_est {}", outcome.m_est);
    // Nothing is valid, so no shot can land on a valid position.
    assert_eq!(outcome.valid_fraction, 0.0);
    Ok(())
}
