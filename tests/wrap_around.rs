//! Wrap-around step property table: for a field of size n and step
//! s >= n, `rangeForExpression("*/s")` yields exactly one value,
//! `fullRange[s mod n]`.

use cronwork::CronExpression;

fn month_token_single_match(expr: &str) -> i64 {
    let parsed = CronExpression::parse(&format!("0 0 1 {expr} *")).unwrap();
    // The month field's wrap-around collapse is exercised indirectly
    // through `is_due`: only the collapsed month should ever be due.
    let mut matches = Vec::new();
    for month in 1..=12 {
        let instant = cronwork::TimePoint::parse(&format!("2021-{month:02}-01 00:00:00"), Some(chrono_tz::UTC)).unwrap();
        if parsed.is_due(Some(instant), None) {
            matches.push(month);
        }
    }
    assert_eq!(matches.len(), 1, "expected exactly one matching month for {expr}, got {matches:?}");
    matches[0]
}

#[test]
fn wrap_around_table_for_month_field() {
    // full_range = [1..12], size n = 12. index = s mod 12, value = full_range[index].
    let cases: [(i64, i64); 6] = [(12, 1), (13, 2), (23, 12), (24, 1), (123, 4), (135, 4)];
    for (step, expected_month) in cases {
        let got = month_token_single_match(&format!("*/{step}"));
        assert_eq!(got, expected_month, "*/{step} should collapse to month {expected_month}");
    }
}
