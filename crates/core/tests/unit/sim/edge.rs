//! Edge detector tests.

use rstest::rstest;
use serial_bench_core::sim::EdgeDetector;

#[test]
fn fresh_detector_reports_no_edge() {
    let edge = EdgeDetector::new();
    assert!(!edge.pos_edge());
    assert!(!edge.neg_edge());
    assert!(!edge.current());
    assert!(!edge.previous());
}

#[rstest]
#[case::low_to_high(false, true, true, false)]
#[case::high_to_high(true, true, false, false)]
#[case::high_to_low(true, false, false, true)]
#[case::low_to_low(false, false, false, false)]
fn classifies_transition(
    #[case] previous: bool,
    #[case] current: bool,
    #[case] pos: bool,
    #[case] neg: bool,
) {
    let mut edge = EdgeDetector::new();
    edge.update(previous);
    edge.update(current);
    assert_eq!(edge.pos_edge(), pos);
    assert_eq!(edge.neg_edge(), neg);
    assert_eq!(edge.previous(), previous);
    assert_eq!(edge.current(), current);
}

#[test]
fn first_high_sample_is_an_edge_from_reset_history() {
    let mut edge = EdgeDetector::new();
    edge.update(true);
    assert!(edge.pos_edge());
}

#[test]
fn query_has_no_side_effect() {
    let mut edge = EdgeDetector::new();
    edge.update(false);
    edge.update(true);
    for _ in 0..5 {
        assert!(edge.pos_edge());
    }
}

#[test]
fn repeated_high_samples_do_not_double_count() {
    let mut edge = EdgeDetector::new();
    let samples = [false, true, true, true, false, true];
    let edges = samples
        .iter()
        .filter(|&&s| {
            edge.update(s);
            edge.pos_edge()
        })
        .count();
    assert_eq!(edges, 2);
}
