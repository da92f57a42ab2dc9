// demos/full_search.rs

//! Runs the full count-then-search pipeline over a generated text with both
//! oracle strategies and prints the summaries.
//!
//! Run with `cargo run --example full_search`.

use qsearch::text::generate_input_text;
use qsearch::{run_full_search, IndexOracleSearch, QsError, SearchConfig, ValueOracleSearch};

fn main() -> Result<(), QsError> {
    let targets = ["ing"];
    let text = generate_input_text(24, &targets)?;

    let config = SearchConfig {
        p_count: 4,
        seed: Some(42),
        ..SearchConfig::default()
    };

    println!("searching {text:?} for {targets:?}\n");

    let by_index = run_full_search(&text, &targets, &config, &IndexOracleSearch)?;
    println!("--- index oracle ---");
    println!("{by_index}\n");

    let by_value = run_full_search(&text, &targets, &config, &ValueOracleSearch)?;
    println!("--- value oracle ---");
    println!("{by_value}");

    Ok(())
}
