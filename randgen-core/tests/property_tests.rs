//! Property tests for distribution invariants.
//!
//! Uses proptest to verify:
//! 1. Cumulative monotonicity — valid inputs give a non-decreasing cumulative ending at 1.0
//! 2. Value closure — every draw in [0, 1) yields a value from the input numbers
//! 3. Merge uniqueness — merged values are distinct and in first-occurrence order
//! 4. Mass rejection — inputs whose mass rounds away from 1.0 never build
//! 5. Leftmost insertion — the search agrees with a linear scan

use proptest::prelude::*;
use randgen_core::{insert_position, BuildError, Distribution, MAX_ABS_VALUE};

// ── Strategies (proptest) ────────────────────────────────────────────

/// Small integer weights divided by their total, so the mass rounds to 1.00.
fn arb_entries() -> impl Strategy<Value = (Vec<i64>, Vec<f64>)> {
    prop::collection::vec((-20i64..20, 0u32..10), 1..40).prop_filter_map(
        "all-zero weights",
        |pairs| {
            let total: u32 = pairs.iter().map(|(_, w)| w).sum();
            if total == 0 {
                return None;
            }
            let numbers: Vec<i64> = pairs.iter().map(|(n, _)| *n).collect();
            let probabilities: Vec<f64> = pairs
                .iter()
                .map(|(_, w)| *w as f64 / total as f64)
                .collect();
            Some((numbers, probabilities))
        },
    )
}

fn arb_draw() -> impl Strategy<Value = f64> {
    0.0..1.0_f64
}

// ── 1. Cumulative monotonicity ───────────────────────────────────────

proptest! {
    #[test]
    fn cumulative_is_monotone_and_ends_at_one((numbers, probabilities) in arb_entries()) {
        let dist = Distribution::build(&numbers, &probabilities).unwrap();
        let cumulative = dist.cumulative();

        prop_assert_eq!(cumulative.len(), dist.values().len());
        for pair in cumulative.windows(2) {
            prop_assert!(pair[0] <= pair[1], "cumulative decreased: {:?}", cumulative);
        }
        prop_assert_eq!(cumulative.last().copied(), Some(1.0));
    }

    // ── 2. Value closure ─────────────────────────────────────────────

    #[test]
    fn draws_return_input_values(
        (numbers, probabilities) in arb_entries(),
        draws in prop::collection::vec(arb_draw(), 1..50),
    ) {
        let dist = Distribution::build(&numbers, &probabilities).unwrap();
        for draw in draws {
            let value = dist.sample(draw);
            prop_assert!(numbers.contains(&value));
        }
    }

    // ── 3. Merge uniqueness ──────────────────────────────────────────

    #[test]
    fn merged_values_are_distinct_first_occurrences((numbers, probabilities) in arb_entries()) {
        let dist = Distribution::build(&numbers, &probabilities).unwrap();

        let mut expected = Vec::new();
        for n in &numbers {
            if !expected.contains(n) {
                expected.push(*n);
            }
        }
        prop_assert_eq!(dist.values(), expected.as_slice());
    }

    // ── 4. Mass rejection ────────────────────────────────────────────

    #[test]
    fn mass_off_by_a_cent_or_more_is_rejected(
        (numbers, probabilities) in arb_entries(),
        scale in prop_oneof![0.0..0.985_f64, 1.015..3.0_f64],
    ) {
        let scaled: Vec<f64> = probabilities.iter().map(|p| p * scale).collect();
        let err = Distribution::build(&numbers, &scaled).unwrap_err();
        prop_assert!(matches!(err, BuildError::ProbabilitySum { .. }), "got {:?}", err);
    }

    #[test]
    fn out_of_range_value_anywhere_is_rejected(
        (mut numbers, probabilities) in arb_entries(),
        slot in any::<prop::sample::Index>(),
        excess in 1i64..1_000,
        negative in any::<bool>(),
    ) {
        let i = slot.index(numbers.len());
        let bad = if negative { -MAX_ABS_VALUE - excess } else { MAX_ABS_VALUE + excess };
        numbers[i] = bad;
        let err = Distribution::build(&numbers, &probabilities).unwrap_err();
        prop_assert_eq!(err, BuildError::ValueOutOfRange { value: bad, max: MAX_ABS_VALUE });
    }

    // ── 5. Leftmost insertion ────────────────────────────────────────

    #[test]
    fn insertion_matches_linear_scan(
        (numbers, probabilities) in arb_entries(),
        draw in arb_draw(),
    ) {
        let dist = Distribution::build(&numbers, &probabilities).unwrap();
        let cumulative = dist.cumulative();
        let linear = cumulative.iter().position(|&c| c >= draw).unwrap_or(cumulative.len());
        let found = insert_position(cumulative, draw);

        // Without exact hits both agree; with one, the hit index holds the draw.
        if cumulative.contains(&draw) {
            prop_assert_eq!(cumulative[found], draw);
        } else {
            prop_assert_eq!(found, linear);
        }
    }
}
