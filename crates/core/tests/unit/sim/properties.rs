//! Property tests for the engine: FIFO order through arbitrary arrival
//! patterns (NUL bytes are dropped at the console boundary), write ordering,
//! and the clock/reset schedule.

use proptest::prelude::*;
use serial_bench_core::dut::LoopbackDut;
use serial_bench_core::sim::{ClockResetSequencer, EdgeDetector};

use crate::common::harness::{bench_with, quick_config, run_ticks};
use crate::common::mocks::dut::ScriptedDut;

proptest! {
    #[test]
    fn echo_preserves_arrival_order(
        chunks in prop::collection::vec(
            (prop::collection::vec(any::<u8>(), 0..8), 0u64..12),
            1..8,
        )
    ) {
        let mut bench = bench_with(LoopbackDut::new(), b"", &quick_config());
        let mut expected = Vec::new();

        for (chunk, gap) in &chunks {
            bench.source_mut().push_bytes(chunk);
            expected.extend(chunk.iter().copied().filter(|&b| b != 0));
            run_ticks(&mut bench, *gap);
        }
        run_ticks(&mut bench, 4 * expected.len() as u64 + 16);

        prop_assert_eq!(bench.output().as_slice(), expected.as_slice());
        prop_assert!(bench.channel().is_empty());
        prop_assert!(bench.stats().bytes_read <= bench.stats().rising_edges);
    }

    #[test]
    fn writes_appear_in_edge_order(
        writes in prop::collection::vec(prop::option::of(any::<u8>()), 0..24)
    ) {
        let expected: Vec<u8> = writes.iter().flatten().copied().collect();
        let mut bench = bench_with(ScriptedDut::writing(&writes), b"", &quick_config());

        run_ticks(&mut bench, 5 + 2 * writes.len() as u64);

        prop_assert_eq!(bench.output(), &expected);
    }

    #[test]
    fn clock_is_periodic(
        half_period in 1u64..16,
        start_high in any::<bool>(),
        t in 0u64..1_000_000,
    ) {
        let seq = ClockResetSequencer::new(0, half_period, start_high);
        prop_assert_eq!(seq.clk(t), seq.clk(t + seq.period()));
        prop_assert_ne!(seq.clk(t), seq.clk(t + half_period));
    }

    #[test]
    fn reset_never_reasserts(reset_ticks in 0u64..1000, t in 0u64..2000, dt in 0u64..2000) {
        let seq = ClockResetSequencer::new(reset_ticks, 1, true);
        if seq.reset_n(t) {
            prop_assert!(seq.reset_n(t + dt));
        }
    }

    #[test]
    fn edges_match_low_to_high_transitions(samples in prop::collection::vec(any::<bool>(), 1..64)) {
        let mut edge = EdgeDetector::new();
        let mut previous = false;
        for &sample in &samples {
            edge.update(sample);
            prop_assert_eq!(edge.pos_edge(), sample && !previous);
            prop_assert_eq!(edge.neg_edge(), !sample && previous);
            previous = sample;
        }
    }
}
