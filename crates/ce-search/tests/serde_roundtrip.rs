mod common;

use ce_search::{run_exhaustive, run_greedy, serde_io, ExhaustiveOpts, GreedyOpts};
use common::cycles;

#[test]
fn reports_roundtrip_through_json() {
    let tpm = cycles(&[2, 2], 0.2);
    let exact = run_exhaustive(&tpm, &ExhaustiveOpts::default()).unwrap().report;
    let json = serde_io::report_to_json(&exact).unwrap();
    assert_eq!(serde_io::report_from_json(&json).unwrap(), exact);

    let sampled = run_greedy(&tpm, &GreedyOpts::default()).unwrap();
    let json = serde_io::report_to_json(&sampled.report).unwrap();
    assert_eq!(serde_io::report_from_json(&json).unwrap(), sampled.report);
    let stats_json = serde_io::greedy_stats_to_json(&sampled.stats).unwrap();
    assert_eq!(serde_io::greedy_stats_from_json(&stats_json).unwrap(), sampled.stats);
}

#[test]
fn partitions_serialise_as_nested_arrays() {
    let tpm = cycles(&[2], 0.2);
    let report = run_exhaustive(&tpm, &ExhaustiveOpts::default()).unwrap().report;
    let value: serde_json::Value = serde_json::from_str(&serde_io::report_to_json(&report).unwrap()).unwrap();
    assert_eq!(value["scales"][0]["partition"], serde_json::json!([[0], [1]]));
    assert_eq!(value["algorithm"]["type"], "exhaustive");
}

#[test]
fn tampered_reports_are_rejected() {
    let tpm = cycles(&[3], 0.2);
    let mut report = run_exhaustive(&tpm, &ExhaustiveOpts::default()).unwrap().report;
    report.scales[0].cp += 0.5;
    let json = serde_io::report_to_json(&report).unwrap();
    let err = serde_io::report_from_json(&json).unwrap_err();
    assert_eq!(err.code(), "report-hash-mismatch");
}

#[test]
fn report_hash_is_deterministic() {
    let tpm = cycles(&[2, 3], 0.4);
    let a = run_greedy(&tpm, &GreedyOpts::default()).unwrap().report;
    let b = run_greedy(&tpm, &GreedyOpts::default()).unwrap().report;
    assert_eq!(a.report_hash, b.report_hash);
    assert_eq!(a.report_hash.len(), 64);
}
