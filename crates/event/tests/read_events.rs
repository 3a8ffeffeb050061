//! Integration tests for event file reading

use spinetools_event::{read_events, Current, Error, EventReader, Pid};

#[test]
fn collects_all_events_skipping_blank_lines() {
    let events = read_events("./data/events.jsonl").unwrap();
    assert_eq!(events.len(), 3);
}

#[test]
fn record_fields_survive_the_round_trip() {
    let events = read_events("./data/events.jsonl").unwrap();

    let signal = &events[0];
    assert_eq!(signal.run, 9435);
    assert_eq!(signal.reco[0].particles[0].pid, Pid::Muon);
    assert_eq!(signal.truth[0].pdg_code, 14);
    assert_eq!(signal.truth[0].current_type, Current::Charged);
    assert_eq!(signal.truth[0].weights["flux"].len(), 4);

    let cosmic = &events[1];
    assert!(!cosmic.truth[0].is_neutrino());
    assert_eq!(cosmic.truth[0].current_type, Current::Unknown);

    let data = &events[2];
    assert!(data.truth.is_empty());
    assert!(data.reco[0].flash.is_some());
}

#[test]
fn truth_matching_resolves_through_the_event() {
    let events = read_events("./data/events.jsonl").unwrap();
    let event = &events[0];

    let truth = event.matched_truth(&event.reco[0]).unwrap();
    assert_eq!(truth.nu_id, 7);
}

#[test]
fn streaming_and_collecting_agree() {
    let mut reader = EventReader::open("./data/events.jsonl").unwrap();
    reader.disable_progress();

    let streamed: Vec<_> = reader.map(|e| e.unwrap()).collect();
    assert_eq!(streamed, read_events("./data/events.jsonl").unwrap());
}

#[test]
fn malformed_line_reports_its_number() {
    let result = read_events("./data/malformed.jsonl");
    match result {
        Err(Error::MalformedRecord { line, .. }) => assert_eq!(line, 2),
        other => panic!("expected a malformed record error, got {other:?}"),
    }
}
