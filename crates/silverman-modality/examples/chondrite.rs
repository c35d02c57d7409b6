//! Critical bandwidths and bootstrap stability for the chondrite silica data
//!
//! Run with `RUST_LOG=silverman_modality=debug` to see every probed bandwidth.

use silverman_modality::{
    test_data, ProbeLog, ResamplingScheme, SearchStrategy, SilvermanTestBuilder,
    DEFAULT_SIMULATIONS,
};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let data = test_data::chondrite();
    let test = SilvermanTestBuilder::new()
        .strategy(SearchStrategy::BinaryVerified)
        .resampling(ResamplingScheme::VarianceCorrected)
        .seed(1981)
        .build()?;

    println!("=== Critical bandwidths (grid 0..10, step 0.01) ===\n");
    for k in 1..=5 {
        let log = ProbeLog::new();
        let h = test.find_critical_bandwidth_recorded(&data, 10.0, 0.01, k, &log)?;
        println!(
            "k = {k}: h_crit = {h} ({} density evaluations)",
            log.probes().len()
        );
    }

    let report = test.count_modes(&data, 1.84)?;
    println!("\n{report}");
    for mode in report.modes() {
        println!("  {mode}");
    }
    for antimode in report.antimodes() {
        println!("  antimode at {antimode:.3}");
    }

    println!("\n=== Bootstrap, k = 2, {DEFAULT_SIMULATIONS} simulations ===\n");
    let result = test.bootstrap_critical_bandwidths(&data, 10.0, 0.01, 2, DEFAULT_SIMULATIONS)?;
    println!("{result}");
    println!("{}", result.summary());

    let more_modes = result.mode_counts().iter().filter(|&&m| m > 2).count();
    println!(
        "Synthetic samples with more than 2 modes at h_crit: {more_modes} / {}",
        result.mode_counts().len()
    );
    println!("Elapsed: {:?}", result.elapsed);

    Ok(())
}
