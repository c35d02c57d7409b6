//! Critical-bandwidth search on reference and synthetic data

use approx::assert_relative_eq;
use silverman_modality::{
    default_test, test_data, BandwidthGrid, CriticalBandwidth, CriticalBandwidthSearch, Error,
    ModeCounter, ModeCounting, ProbeLog, Sample, SearchStrategy, SilvermanTestBuilder,
};

fn chondrite_sample() -> Sample {
    Sample::new(test_data::chondrite()).unwrap()
}

#[test]
fn test_chondrite_critical_bandwidths() {
    let test = default_test();
    let data = test_data::chondrite();

    let expected = [(1, 2.40), (2, 1.84), (3, 0.69), (4, 0.49)];
    for (k, h) in expected {
        let found = test.find_critical_bandwidth(&data, 10.0, 0.01, k).unwrap();
        assert_relative_eq!(found.value().unwrap(), h, epsilon = 1e-9);
    }

    assert_eq!(
        test.find_critical_bandwidth(&data, 10.0, 0.01, 30).unwrap(),
        CriticalBandwidth::NotFound
    );
}

#[test]
fn test_target_above_smallest_bandwidth_count_exhausts_grid() -> anyhow::Result<()> {
    // 22 distinct values but only 21 modes at h = 0.01
    let grid = BandwidthGrid::new(10.0, 0.01)?;
    let log = ProbeLog::new();
    let h = CriticalBandwidthSearch::default()
        .find_recorded(&chondrite_sample(), &grid, 22, &log)?;

    assert_eq!(h, CriticalBandwidth::NotFound);
    assert_eq!(log.outcome(), Some(CriticalBandwidth::NotFound));
    assert_eq!(log.indices(), vec![499, 249, 124, 61, 30, 14, 6, 2, 1]);
    let probes = log.probes();
    let smallest = probes.last().unwrap();
    assert_eq!(smallest.index, 1);
    assert!(smallest.mode_count < 22);
    Ok(())
}

#[test]
fn test_skipped_mode_count_exhausts_grid() -> anyhow::Result<()> {
    // the count drops from 7 to 5 between adjacent grid points
    let grid = BandwidthGrid::new(10.0, 0.01)?;
    let log = ProbeLog::new();
    let h = CriticalBandwidthSearch::default()
        .find_recorded(&chondrite_sample(), &grid, 6, &log)?;

    assert_eq!(h, CriticalBandwidth::NotFound);
    assert_eq!(log.indices(), vec![499, 249, 124, 61, 30, 45, 37, 41, 43, 42]);
    let probes = log.probes();
    assert!(probes.iter().all(|p| p.mode_count != 6));
    let count_at = |i: usize| probes.iter().find(|p| p.index == i).unwrap().mode_count;
    assert!(count_at(42) > 6 && count_at(43) < 6);

    let linear = CriticalBandwidthSearch::default()
        .with_strategy(SearchStrategy::Linear)
        .find(&chondrite_sample(), &grid, 6)?;
    assert_eq!(linear, CriticalBandwidth::NotFound);
    Ok(())
}

#[test]
fn test_chondrite_modes_at_critical_bandwidth() {
    let test = default_test();
    let data = test_data::chondrite();

    let report = test.count_modes(&data, 1.84).unwrap();
    assert_eq!(report.mode_count(), 2);
    let locations = report.locations();
    assert!((locations[0] - 27.9).abs() < 0.1, "got {locations:?}");
    assert!((locations[1] - 33.2).abs() < 0.1, "got {locations:?}");
    assert_eq!(report.antimodes().len(), 1);
    assert!(report.antimodes()[0] > locations[0] && report.antimodes()[0] < locations[1]);

    assert_eq!(test.count_modes(&data, 1.83).unwrap().mode_count(), 3);
}

#[test]
fn test_chondrite_counts_by_bandwidth() {
    let counter = ModeCounter::gaussian();
    let data = test_data::chondrite();
    for (h, expected) in [(0.5, 4), (1.0, 3), (2.5, 1), (5.0, 1)] {
        assert_eq!(
            counter.count_modes_in(&data, h).unwrap().mode_count(),
            expected,
            "h = {h}"
        );
    }
}

#[test]
fn test_found_bandwidth_is_minimal() {
    let counter = ModeCounter::gaussian();
    let sample = Sample::new(test_data::mixture_normal(
        &[-6.0, 0.0, 6.0],
        &[1.0, 1.0, 1.0],
        &[1.0, 1.0, 1.0],
        150,
        Some(17),
    ))
    .unwrap();
    let grid = BandwidthGrid::new(10.0, 0.01).unwrap();
    let search = CriticalBandwidthSearch::new(counter.clone());

    for k in 1..=3 {
        let Some(h) = search.find(&sample, &grid, k).unwrap().value() else {
            continue;
        };
        assert_eq!(counter.count_modes(&sample, h).unwrap().mode_count(), k);
        let i = grid.index_of(h).unwrap();
        if grid.is_usable(i - 1) {
            let below = grid.value(i - 1);
            assert_ne!(counter.count_modes(&sample, below).unwrap().mode_count(), k);
        }
    }
}

#[test]
fn test_unimodal_sample_has_one_mode_at_its_critical_bandwidth() {
    let data = test_data::unimodal_normal(100, 42);
    let test = default_test();

    let h = test.find_critical_bandwidth(&data, 10.0, 0.01, 1).unwrap();
    let h = h.value().expect("unimodal sample must reach one mode");
    assert_eq!(test.count_modes(&data, h).unwrap().mode_count(), 1);
}

#[test]
fn test_unit_spaced_points() {
    let data = test_data::evenly_spaced(10);
    let test = default_test();

    assert_eq!(test.count_modes(&data, 0.01).unwrap().mode_count(), 10);
    assert_eq!(test.count_modes(&data, 0.4).unwrap().mode_count(), 10);

    let h = test.find_critical_bandwidth(&data, 2.0, 0.01, 10).unwrap();
    assert_relative_eq!(h.value().unwrap(), 0.01, epsilon = 1e-12);
    assert_eq!(
        test.find_critical_bandwidth(&data, 2.0, 0.01, 11).unwrap(),
        CriticalBandwidth::NotFound
    );

    let h = test
        .find_critical_bandwidth(&data, 2.0, 0.01, 1)
        .unwrap()
        .value()
        .unwrap();
    assert_eq!(test.count_modes(&data, h).unwrap().mode_count(), 1);
    assert!(test.count_modes(&data, h - 0.01).unwrap().mode_count() > 1);
}

#[test]
fn test_strategies_agree_on_monotone_data() {
    let data = test_data::chondrite();
    for k in 1..=4 {
        let results: Vec<CriticalBandwidth> = [
            SearchStrategy::Binary,
            SearchStrategy::BinaryVerified,
            SearchStrategy::Linear,
        ]
        .into_iter()
        .map(|strategy| {
            SilvermanTestBuilder::new()
                .strategy(strategy)
                .build()
                .unwrap()
                .find_critical_bandwidth(&data, 10.0, 0.01, k)
                .unwrap()
        })
        .collect();
        assert_eq!(results[0], results[1], "k = {k}");
        assert_eq!(results[0], results[2], "k = {k}");
    }
}

#[test]
fn test_binary_search_is_logarithmic() {
    let log = ProbeLog::new();
    let grid = BandwidthGrid::new(10.0, 0.01).unwrap();
    CriticalBandwidthSearch::default()
        .find_recorded(&chondrite_sample(), &grid, 2, &log)
        .unwrap();

    // at most two counts per halving of a 1000-point grid
    assert!(log.probes().len() <= 2 * 11, "{} probes", log.probes().len());
    assert!(log.probes().iter().all(|p| p.bandwidth > 0.0));
}

#[test]
fn test_input_validation() {
    let test = default_test();
    let data = test_data::chondrite();

    assert!(matches!(
        test.find_critical_bandwidth(&data, -1.0, 0.01, 2),
        Err(Error::InvalidSearchParameters(_))
    ));
    assert!(matches!(
        test.find_critical_bandwidth(&data, 10.0, f64::NAN, 2),
        Err(Error::InvalidSearchParameters(_))
    ));
    assert!(matches!(
        test.find_critical_bandwidth(&data, 10.0, 0.01, 0),
        Err(Error::InvalidSearchParameters(_))
    ));
    assert!(matches!(
        test.find_critical_bandwidth(&[3.0, 3.0, 3.0], 10.0, 0.01, 1),
        Err(Error::DegenerateSample(_))
    ));
    assert!(matches!(
        test.count_modes(&data, -0.5),
        Err(Error::InvalidBandwidth(_))
    ));
}

#[test]
fn test_free_functions_match_default_test() {
    let data = test_data::chondrite();
    assert_eq!(
        silverman_modality::find_critical_bandwidth(&data, 10.0, 0.01, 2).unwrap(),
        default_test()
            .find_critical_bandwidth(&data, 10.0, 0.01, 2)
            .unwrap()
    );
    assert_eq!(
        silverman_modality::count_modes(&data, 1.0).unwrap(),
        default_test().count_modes(&data, 1.0).unwrap()
    );
}
