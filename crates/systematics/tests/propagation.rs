//! Integration tests for a complete propagation run

use spinetools_systematics::{Config, PropagationResult, Propagator};

fn propagate() -> PropagationResult {
    let config = Config::from_file("./data/systematics.cfg").unwrap();
    Propagator::new(config).run().unwrap()
}

#[test]
fn the_nominal_spectrum_counts_the_rows() {
    let result = propagate();
    assert_eq!(result.variable, "x");
    assert_eq!(result.nominal.contents(), &[2.0, 1.0]);
}

#[test]
fn multisim_covariance_matches_the_hand_calculation() {
    let result = propagate();
    let flux = &result.systematics["flux_all"];

    assert_eq!(flux.kind, "multisim");
    assert_eq!(flux.universes.len(), 4);
    // universe shifts are (0,0), (2,-0.5), (-1,1), (0,0)
    assert!((flux.covariance.get(0, 0) - 1.25).abs() < 1e-12);
    assert!((flux.covariance.get(0, 1) + 0.5).abs() < 1e-12);
    assert!((flux.covariance.get(1, 1) - 0.3125).abs() < 1e-12);
}

#[test]
fn multisigma_uses_the_symmetric_difference() {
    let result = propagate();
    let maccres = &result.systematics["maccres"];

    assert_eq!(maccres.sigmas.as_deref(), Some(&[-1.0, 1.0][..]));
    // h(-1) = [1.7, 1.0], h(+1) = [2.3, 1.0], so v = (0.3, 0)
    assert!((maccres.covariance.get(0, 0) - 0.09).abs() < 1e-12);
    assert_eq!(maccres.covariance.get(1, 1), 0.0);
}

#[test]
fn variations_average_their_sample_shifts() {
    let result = propagate();
    let detector = &result.systematics["detector"];

    assert_eq!(detector.kind, "variation");
    assert_eq!(detector.universes.len(), 2);
    // shifts are (-1, 0) and (+1, 0), averaging to unit variance in bin 0
    assert!((detector.covariance.get(0, 0) - 1.0).abs() < 1e-12);
    assert_eq!(detector.covariance.get(1, 1), 0.0);
}

#[test]
fn the_total_is_the_sum_of_the_sources() {
    let result = propagate();

    let expected_00 = 1.25 + 0.09 + 1.0;
    assert!((result.total.get(0, 0) - expected_00).abs() < 1e-12);

    let band = result.uncertainty_band();
    assert!((band[0] - expected_00.sqrt()).abs() < 1e-12);
    assert!((band[1] - 0.3125_f64.sqrt()).abs() < 1e-12);
}

#[test]
fn outputs_round_trip_and_export() {
    let result = propagate();
    let dir = tempfile::tempdir().unwrap();

    let json = dir.path().join("systematics.json");
    result.write_json(&json).unwrap();
    let text = std::fs::read_to_string(&json).unwrap();
    let back: PropagationResult = serde_json::from_str(&text).unwrap();
    assert_eq!(back, result);

    result.write_covariance_csv(dir.path().join("cov")).unwrap();
    for name in ["flux_all", "maccres", "detector", "total"] {
        let path = dir.path().join("cov").join(format!("{name}.cov.csv"));
        assert!(path.exists(), "missing covariance export {name}");
    }
}
