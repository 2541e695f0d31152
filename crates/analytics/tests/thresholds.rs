use analytics::{compute_summary, compute_thresholds};
use core_types::InstrumentStat;

fn stat(id: &str, mean: f64, std: Option<f64>) -> InstrumentStat {
    InstrumentStat {
        instrument_id: id.to_string(),
        mean_return: mean,
        std_return: std,
    }
}

#[test]
fn quantiles_interpolate_linearly() {
    // Returns 1..=5: p40 sits at position 0.4 * 4 = 1.6 -> 2.6,
    // p75 at position 3.0 -> 4.0.
    let stats: Vec<InstrumentStat> = (1..=5)
        .map(|i| stat(&format!("S{i}"), i as f64, Some(i as f64)))
        .collect();

    let thresholds = compute_thresholds(&stats).unwrap();
    assert!((thresholds.p40_return - 2.6).abs() < 1e-9);
    assert!((thresholds.p75_return - 4.0).abs() < 1e-9);
    assert!((thresholds.p40_std - 2.6).abs() < 1e-9);
    assert!((thresholds.p75_std - 4.0).abs() < 1e-9);
}

#[test]
fn p40_never_exceeds_p75() {
    let samples: Vec<Vec<f64>> = vec![
        vec![1.0, 2.0],
        vec![-3.0, -1.0, 4.0, 4.0, 10.0],
        vec![0.0, 0.0, 0.0],
        vec![5.0, -5.0, 2.5, 7.75, -0.25, 12.0],
    ];
    for sample in samples {
        let stats: Vec<InstrumentStat> = sample
            .iter()
            .enumerate()
            .map(|(i, &v)| stat(&format!("S{i}"), v, Some(v.abs() + 1.0)))
            .collect();
        let t = compute_thresholds(&stats).unwrap();
        assert!(t.p40_return <= t.p75_return);
        assert!(t.p40_std <= t.p75_std);
    }
}

#[test]
fn instruments_without_a_deviation_are_excluded_from_quantiles() {
    let stats = vec![
        stat("AAA", 1.0, Some(1.0)),
        stat("BBB", 2.0, Some(2.0)),
        stat("CCC", 1000.0, None), // must not move the cut points
    ];

    let with_undefined = compute_thresholds(&stats).unwrap();
    let without = compute_thresholds(&stats[..2]).unwrap();
    assert_eq!(with_undefined, without);
}

#[test]
fn summary_mean_covers_all_instruments_but_quantiles_do_not() {
    let stats = vec![
        stat("AAA", 2.0, Some(1.0)),
        stat("BBB", 4.0, Some(3.0)),
        stat("CCC", 6.0, None),
    ];

    let summary = compute_summary(&stats).unwrap();
    // Market mean includes CCC.
    assert!((summary.mean_return - 4.0).abs() < 1e-9);
    // Deviation mean only covers defined deviations.
    assert!((summary.mean_std - 2.0).abs() < 1e-9);
    // Quantiles run over the classifiable pair only.
    assert!(summary.p75_return <= 4.0);
}

#[test]
fn no_classifiable_instruments_is_an_error_not_a_nan() {
    let stats = vec![stat("AAA", 1.0, None)];
    assert!(compute_thresholds(&stats).is_err());
    assert!(compute_summary(&stats).is_err());
    assert!(compute_thresholds(&[]).is_err());
}
