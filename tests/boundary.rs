//! One integration test per numbered boundary scenario.

use chrono::TimeZone;
use cronwork::CronExpression;
use cronwork::TimePoint;

fn utc(s: &str) -> TimePoint {
    TimePoint::parse(s, Some(chrono_tz::UTC)).unwrap()
}

#[test]
fn scenario_1_every_minute_advances_past_seconds() {
    let expr = CronExpression::parse("* * * * *").unwrap();
    let start = utc("2011-09-27 10:10:54");
    let next = expr.next_run_date(Some(start), 0, false, None).unwrap();
    assert_eq!((next.year(), next.month(), next.day(), next.hour(), next.minute()), (2011, 9, 27, 10, 11));
}

#[test]
fn scenario_2_previous_january_27th_rolls_back_a_year() {
    let expr = CronExpression::parse("0 0 27 JAN *").unwrap();
    let start = utc("2011-08-22 00:00:00");
    let prev = expr.previous_run_date(Some(start), 0, false, None).unwrap();
    assert_eq!((prev.year(), prev.month(), prev.day(), prev.hour(), prev.minute()), (2011, 1, 27, 0, 0));
}

#[test]
fn scenario_3_weekly_skips_two_matches() {
    let expr = CronExpression::parse("@weekly").unwrap();
    let start = utc("2008-11-09 00:00:00");
    let result = expr.next_run_date(Some(start), 2, true, None).unwrap();
    assert_eq!((result.year(), result.month(), result.day()), (2008, 11, 23));
}

#[test]
fn scenario_4_sparse_yearly_needs_a_larger_iteration_cap() {
    let mut expr = CronExpression::parse("0 0 12 1 *").unwrap();
    let start = utc("2015-04-28 00:00:00");

    expr.set_max_iteration_count(2000);
    let results = expr.multiple_run_dates(Some(start), 9, false, false, None);
    assert_eq!(results.len(), 9);
    for (offset, result) in results.iter().enumerate() {
        assert_eq!((result.year(), result.month(), result.day()), (2016 + offset as i32, 1, 12));
    }
}

#[test]
fn scenario_4_default_cap_is_insufficient() {
    let mut expr = CronExpression::parse("0 0 12 1 *").unwrap();
    expr.set_max_iteration_count(1000);
    let start = utc("2015-04-28 00:00:00");
    assert!(expr.next_run_date(Some(start), 8, false, None).is_err());
}

#[test]
fn scenario_5_month_step_wraps_around_to_april() {
    let expr = CronExpression::parse("* * * */123 *").unwrap();
    let due_instant = utc("2014-04-07 00:00:00");
    assert!(expr.is_due(Some(due_instant), None));

    let start = utc("2014-05-07 00:00:00");
    let next = expr.next_run_date(Some(start), 0, false, None).unwrap();
    assert_eq!((next.year(), next.month(), next.day()), (2015, 4, 1));
}

#[test]
fn scenario_6_timezone_resolution_across_four_input_forms() {
    let mut expr = CronExpression::parse("0 7 * * *").unwrap();
    expr.set_max_iteration_count(2000);
    let expected_epoch = 1508151600_i64;

    let zoned = TimePoint::from_zoned(
        chrono_tz::Europe::London.from_local_datetime(&chrono::NaiveDate::from_ymd_opt(2017, 10, 17).unwrap().and_hms_opt(10, 0, 0).unwrap()).unwrap(),
        None,
    );
    let iso_string = TimePoint::parse("2017-10-17T10:00:00+01:00", None).unwrap();
    let unix_string = TimePoint::parse("@1508230800", Some(chrono_tz::Europe::London)).unwrap();
    let naive_string = TimePoint::parse("2017-10-17 10:00:00", Some(chrono_tz::Europe::London)).unwrap();

    for reference in [zoned, iso_string, unix_string, naive_string] {
        let prev = expr
            .previous_run_date(Some(reference), 0, false, Some(chrono_tz::America::New_York))
            .unwrap();
        assert_eq!(prev.datetime().timestamp(), expected_epoch);
    }
}
