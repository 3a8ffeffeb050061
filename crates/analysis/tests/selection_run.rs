//! Integration tests for a complete selection run

use spinetools_analysis::{read_rows, Analysis, AnalysisConfig};

fn run_into(dir: &std::path::Path) -> spinetools_analysis::RunSummary {
    let config = AnalysisConfig::from_file("./data/analysis.json").unwrap();
    let mut analysis = Analysis::from_config("test_1muNp", config, dir).unwrap();
    analysis.disable_progress();
    analysis.run().unwrap()
}

#[test]
fn only_the_signal_candidate_survives_the_selection() {
    let dir = tempfile::tempdir().unwrap();
    let summary = run_into(dir.path());

    let mc = &summary.samples[0];
    assert_eq!(mc.events, 3);
    assert_eq!(mc.rows["selectedNu"], 1);
    assert_eq!(mc.rows["signalNu"], 1);
}

#[test]
fn selected_rows_carry_values_and_weights() {
    let dir = tempfile::tempdir().unwrap();
    run_into(dir.path());

    let rows = read_rows(dir.path().join("mc/selectedNu.jsonl")).unwrap();
    assert_eq!(rows.len(), 1);

    let row = &rows[0];
    // muon csda (312) + proton csda (61), both contained tracks
    assert!((row.value("reco_edep") - 373.0).abs() < 1e-9);
    assert_eq!(row.value("true_edep"), 851.9);
    assert_eq!(row.value("category"), 0.0);
    assert_eq!(row.value("flash_time"), 0.82);
    assert_eq!(row.weight_set("flux").unwrap().len(), 4);
    assert_eq!(row.weight_set("genie").unwrap().len(), 4);
}

#[test]
fn truth_trees_loop_the_truth_record() {
    let dir = tempfile::tempdir().unwrap();
    run_into(dir.path());

    let rows = read_rows(dir.path().join("mc/signalNu.jsonl")).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].value("baseline"), 598.4);
}

#[test]
fn the_manifest_records_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let summary = run_into(dir.path());

    let text = std::fs::read_to_string(dir.path().join("manifest.json")).unwrap();
    let from_disk: spinetools_analysis::RunSummary = serde_json::from_str(&text).unwrap();
    assert_eq!(from_disk, summary);
}
