//! Property tests for the calculators, classifier, grouper and selector.

use labstats::aggregate::{group_records, GroupingOptions};
use labstats::classify::{Signal, TierClassifier, TierTable};
use labstats::metrics::{percentage, ratio, Precision, PrecisionPolicy};
use labstats::record::EntityKind;
use labstats::select::TopN;
use labstats::testkit::records_with_counts;
use proptest::prelude::*;

fn demand() -> TierTable {
    TierTable::new(
        [(30.0, "Alta"), (10.0, "Media"), (1.0, "Baja")],
        "Sin Actividad",
    )
    .unwrap()
}

/// `n / d * 100` rounded half-up to `decimals`, in integer arithmetic.
fn reference_percentage(n: u64, d: u64, decimals: u8) -> f64 {
    let scale = 10u64.pow(u32::from(decimals) + 2);
    let units = (2 * n * scale + d) / (2 * d);
    units as f64 / 10f64.powi(i32::from(decimals))
}

#[test]
fn test_percentage_one_third() {
    assert_eq!(percentage(1.0, 3.0, Precision::TWO), 33.33);
    assert_eq!(percentage(2.0, 3.0, Precision::ONE), 66.7);
}

#[test]
fn test_percentage_half_way_rounds_up() {
    // 1/8 = 12.5%, 1/16 = 6.25%, 1/32 = 3.125%
    assert_eq!(percentage(1.0, 8.0, Precision::ZERO), 13.0);
    assert_eq!(percentage(1.0, 16.0, Precision::ONE), 6.3);
    assert_eq!(percentage(1.0, 32.0, Precision::TWO), 3.13);
    assert_eq!(reference_percentage(1, 32, 2), 3.13);
}

proptest! {
    #[test]
    fn prop_non_positive_denominator_is_zero(n in -1e6f64..1e6, d in -1e6f64..=0.0) {
        prop_assert_eq!(percentage(n, d, Precision::TWO), 0.0);
        prop_assert_eq!(ratio(n, d, Precision::TWO), 0.0);
    }

    #[test]
    fn prop_percentage_matches_integer_rounding(
        (n, d) in (1u64..10_000).prop_flat_map(|d| (0..=d, Just(d))),
        decimals in 0u8..=4,
    ) {
        let precision = Precision::new(decimals).unwrap();
        prop_assert_eq!(
            percentage(n as f64, d as f64, precision),
            reference_percentage(n, d, decimals)
        );
    }

    #[test]
    fn prop_tier_rank_is_monotonic(a in 0.0f64..100.0, b in 0.0f64..100.0) {
        let table = demand();
        let (high, low) = if a >= b { (a, b) } else { (b, a) };
        prop_assert!(table.rank(high) <= table.rank(low));
    }

    #[test]
    fn prop_grouping_conserves_totals(counts in proptest::collection::vec(0u64..500, 0..80)) {
        let records = records_with_counts(EntityKind::Exam, "E", &counts);
        let key = TierClassifier::new(Signal::RawCount, demand());
        let buckets = group_records(&records, &key, &GroupingOptions::default(), &PrecisionPolicy::default());
        prop_assert_eq!(
            buckets.iter().map(|b| b.total_raw_count).sum::<u64>(),
            counts.iter().sum::<u64>()
        );
    }

    #[test]
    fn prop_top_n_is_stable(counts in proptest::collection::vec(0u64..5, 0..30), limit in 0usize..40) {
        let records = records_with_counts(EntityKind::Service, "S", &counts);
        let slots = TopN::new(limit, false).select(&records, |r| r.raw_count as f64);
        let picked: Vec<_> = slots.iter().filter_map(|s| s.entry()).collect();
        for pair in picked.windows(2) {
            prop_assert!(pair[0].raw_count >= pair[1].raw_count);
            if pair[0].raw_count == pair[1].raw_count {
                let index = |name: &str| name.trim_start_matches("S ").parse::<usize>().unwrap();
                prop_assert!(index(&pair[0].identity) < index(&pair[1].identity));
            }
        }
    }
}
