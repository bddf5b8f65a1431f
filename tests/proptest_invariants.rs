//! Property-based invariants for the tracker and pursuit simulation.
//!
//! Verifies:
//! 1. Typed input never exceeds the target length, whatever is submitted
//! 2. Accuracy stays within [0, 100]
//! 3. Error count equals mismatches within the typed span
//! 4. Statistics are stable across repeated reads
//! 5. The shark never steps past the fish-minus-gap limit in one tick
//! 6. A tick where capture and completion both hold is always a capture

use std::time::{Duration, Instant};

use proptest::prelude::*;
use sharktype::pursuit::{
    Progress, PursuitSimulator, PursuitState, TickOutcome, CAPTURE_MARGIN, OVERSHOOT_GAP,
    PURSUER_STEP,
};
use sharktype::tracker::Tracker;

fn arb_text() -> impl Strategy<Value = String> {
    "[a-c ]{0,24}"
}

proptest! {
    #[test]
    fn typed_input_never_exceeds_target(
        target in arb_text(),
        inputs in proptest::collection::vec(arb_text(), 0..16),
    ) {
        let mut tracker = Tracker::begin(&target, Instant::now());
        for input in &inputs {
            let before = tracker.typed_input();
            let applied = tracker.apply_input(input);
            prop_assert!(tracker.typed_len() <= tracker.target_len());
            if !applied {
                prop_assert_eq!(tracker.typed_input(), before);
            }
        }
    }

    #[test]
    fn accuracy_in_range_and_errors_match(
        target in arb_text(),
        input in arb_text(),
        elapsed_ms in 0u64..120_000,
    ) {
        let mut tracker = Tracker::begin(&target, Instant::now());
        tracker.apply_input(&input);

        let stats = tracker.statistics_after(Duration::from_millis(elapsed_ms));
        prop_assert!(stats.accuracy <= 100);

        let typed: Vec<char> = tracker.typed_input().chars().collect();
        let expected_errors = typed
            .iter()
            .zip(target.chars())
            .filter(|(a, b)| **a != *b)
            .count();
        prop_assert_eq!(stats.errors, expected_errors);

        if typed.is_empty() {
            prop_assert_eq!(stats.accuracy, 100);
        }
        prop_assert_eq!(stats, tracker.statistics_after(Duration::from_millis(elapsed_ms)));
    }

    #[test]
    fn shark_step_respects_gap(
        pursued in 100.0f64..700.0,
        behind in 0.0f64..200.0,
        elapsed in 0.0f64..60.0,
        typed in 0usize..80,
    ) {
        let prior = PursuitState { pursued, pursuer: pursued - behind };
        let mut sim = PursuitSimulator::with_state(prior);

        sim.tick(Progress { elapsed_secs: elapsed, typed, target_len: 80, complete: false });

        let after = sim.state();
        prop_assert!(after.pursuer <= prior.pursuer + PURSUER_STEP);
        prop_assert!(after.pursuer <= prior.pursuer.max(prior.pursued - OVERSHOOT_GAP));
    }

    #[test]
    fn capture_beats_completion(pursuer_gap in 0.0f64..CAPTURE_MARGIN) {
        let state = PursuitState { pursued: 700.0, pursuer: 700.0 - pursuer_gap };
        let mut sim = PursuitSimulator::with_state(state);

        let outcome = sim.tick(Progress {
            elapsed_secs: 30.0,
            typed: 80,
            target_len: 80,
            complete: true,
        });

        prop_assert_eq!(outcome, TickOutcome::Captured);
    }
}
