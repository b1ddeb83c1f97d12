//! Property tests for the engine's universal invariants. Kept to a
//! modest set of expressions/instants rather than an unconstrained
//! generator, since most random five-field combinations are either
//! trivially infeasible (e.g. `31 2`) or take a long search to converge.

use cronwork::CronExpression;
use cronwork::TimePoint;
use proptest::prelude::*;

const EXPRESSIONS: &[&str] = &[
    "* * * * *",
    "0 * * * *",
    "0 0 * * *",
    "*/15 * * * *",
    "0 9 * * MON-FRI",
    "0 0 1 * *",
    "0 0 L * *",
    "0 0 * * 5#3",
];

fn arb_instant() -> impl Strategy<Value = TimePoint> {
    (2000i32..2035, 1u32..=12, 1u32..=28, 0u32..24, 0u32..60).prop_map(|(y, mo, d, h, mi)| {
        TimePoint::from_naive(
            chrono::NaiveDate::from_ymd_opt(y, mo, d).unwrap().and_hms_opt(h, mi, 0).unwrap(),
            chrono_tz::UTC,
        )
    })
}

proptest! {
    #[test]
    fn fixed_point_is_due_at_next_run_date(idx in 0..EXPRESSIONS.len(), t in arb_instant()) {
        let expr = CronExpression::parse(EXPRESSIONS[idx]).unwrap();
        if let Ok(found) = expr.next_run_date(Some(t), 0, true, None) {
            prop_assert!(expr.is_due(Some(found), None));
        }
    }

    #[test]
    fn second_stripping_always_zero(idx in 0..EXPRESSIONS.len(), t in arb_instant()) {
        let expr = CronExpression::parse(EXPRESSIONS[idx]).unwrap();
        if let Ok(found) = expr.next_run_date(Some(t), 0, false, None) {
            prop_assert_eq!(found.datetime().timestamp() % 60, 0);
        }
    }

    #[test]
    fn input_instant_is_not_mutated(idx in 0..EXPRESSIONS.len(), t in arb_instant()) {
        let expr = CronExpression::parse(EXPRESSIONS[idx]).unwrap();
        let before = t;
        let _ = expr.next_run_date(Some(t), 0, false, None);
        prop_assert_eq!(before, t);
    }

    #[test]
    fn previous_of_second_future_match_is_first_future_match(idx in 0..EXPRESSIONS.len(), t in arb_instant()) {
        let expr = CronExpression::parse(EXPRESSIONS[idx]).unwrap();
        if let Ok(second) = expr.next_run_date(Some(t), 1, false, None) {
            if let Ok(first) = expr.next_run_date(Some(t), 0, false, None) {
                if let Ok(back) = expr.previous_run_date(Some(second), 0, false, None) {
                    prop_assert_eq!(back.datetime().timestamp(), first.datetime().timestamp());
                }
            }
        }
    }
}

#[test]
fn timezone_correctness_for_fixed_reference() {
    let expr = CronExpression::parse("0 15 * * 3").unwrap();
    for zone in [chrono_tz::UTC, chrono_tz::Europe::Amsterdam, chrono_tz::Asia::Tokyo] {
        let instant = TimePoint::parse("2014-01-01 15:00:00", Some(zone)).unwrap();
        assert!(expr.is_due(Some(instant), Some(zone)));
        for other in [chrono_tz::UTC, chrono_tz::Europe::Amsterdam, chrono_tz::Asia::Tokyo] {
            if other == zone {
                continue;
            }
            let due = expr.is_due(Some(instant), Some(other));
            // Same absolute instant, different evaluation zone: due-ness
            // tracks the evaluation zone's wall clock, not the input zone.
            let reinterpreted = TimePoint::from_zoned(instant.datetime(), Some(other));
            assert_eq!(due, reinterpreted.hour() == 15 && reinterpreted.weekday_iso() == 3);
        }
    }
}
