//! `CronExpression`: parsing, alias resolution, and the public query API.

use std::fmt;

use chrono_tz::Tz;

use crate::error::{CronError, CronResult};
use crate::field::{self, CronField};
use crate::search::{self, SearchConfig};
use crate::timezone::TimePoint;

const FIELD_COUNT: usize = 5;

fn resolve_alias(input: &str) -> CronResult<String> {
    let trimmed = input.trim();
    if !trimmed.starts_with('@') {
        return Ok(trimmed.to_string());
    }
    match trimmed {
        "@yearly" | "@annually" => Ok("0 0 1 1 *".to_string()),
        "@monthly" => Ok("0 0 1 * *".to_string()),
        "@weekly" => Ok("0 0 * * 0".to_string()),
        "@daily" => Ok("0 0 * * *".to_string()),
        "@hourly" => Ok("0 * * * *".to_string()),
        "@reboot" => Err(CronError::parse(0, trimmed.to_string(), "@reboot is not supported".to_string())),
        other => Err(CronError::parse(0, other.to_string(), "unrecognized alias".to_string())),
    }
}

/// A parsed, validated five-field cron expression.
///
/// Immutable once constructed except for whole-part replacement
/// ([`CronExpression::with_part`]) and the iteration cap.
#[derive(Debug, Clone)]
pub struct CronExpression {
    raw_parts: [String; FIELD_COUNT],
    fields: [CronField; FIELD_COUNT],
    config: SearchConfig,
}

impl CronExpression {
    /// Parse a cron expression string, resolving `@`-aliases first.
    /// Fails if the expression does not normalize to exactly five
    /// whitespace-delimited fields, or any field fails its grammar.
    pub fn parse(expr: &str) -> CronResult<Self> {
        let resolved = resolve_alias(expr)?;
        let tokens: Vec<&str> = resolved.split_whitespace().collect();
        if tokens.len() != FIELD_COUNT {
            return Err(CronError::parse(
                0,
                expr.to_string(),
                format!("expected exactly 5 fields, found {}", tokens.len()),
            ));
        }

        let mut raw_parts: [String; FIELD_COUNT] = Default::default();
        let mut fields_vec = Vec::with_capacity(FIELD_COUNT);
        for (position, token) in tokens.into_iter().enumerate() {
            fields_vec.push(field::parse_for_position(position, token)?);
            raw_parts[position] = token.to_string();
        }

        Ok(Self {
            raw_parts,
            fields: fields_vec.try_into().expect("exactly 5 fields were validated above"),
            config: SearchConfig::default(),
        })
    }

    /// `isValid(expr)`: true iff `parse` would succeed.
    pub fn is_valid(expr: &str) -> bool {
        Self::parse(expr).is_ok()
    }

    /// Replace a single field, reparsing only that token (`setPart`).
    /// Position must be 0..=4.
    pub fn with_part(&self, position: usize, token: &str) -> CronResult<Self> {
        if position >= FIELD_COUNT {
            return Err(CronError::InvalidField(position));
        }
        let parsed = field::parse_for_position(position, token)?;
        let mut next = self.clone();
        next.fields[position] = parsed;
        next.raw_parts[position] = token.to_string();
        Ok(next)
    }

    /// `setMaxIterationCount(n)`.
    pub fn set_max_iteration_count(&mut self, n: u32) {
        self.config.max_iteration_count = n;
    }

    pub fn max_iteration_count(&self) -> u32 {
        self.config.max_iteration_count
    }

    /// `nextRunDate`. `zone` resolves via the usual precedence; `instant`
    /// defaults to now in that zone when `None`.
    pub fn next_run_date(&self, instant: Option<TimePoint>, nth: u32, allow_current: bool, zone: Option<Tz>) -> CronResult<TimePoint> {
        let start = self.resolve_start(instant, zone);
        search::search(&self.fields, &start, false, nth, allow_current, self.config.max_iteration_count)
    }

    /// `previousRunDate`.
    pub fn previous_run_date(&self, instant: Option<TimePoint>, nth: u32, allow_current: bool, zone: Option<Tz>) -> CronResult<TimePoint> {
        let start = self.resolve_start(instant, zone);
        search::search(&self.fields, &start, true, nth, allow_current, self.config.max_iteration_count)
    }

    /// `multipleRunDates`.
    pub fn multiple_run_dates(
        &self,
        instant: Option<TimePoint>,
        count: u32,
        invert: bool,
        allow_current: bool,
        zone: Option<Tz>,
    ) -> Vec<TimePoint> {
        let start = self.resolve_start(instant, zone);
        search::multiple_run_dates(&self.fields, &start, count, invert, allow_current, self.config.max_iteration_count)
    }

    /// `isDue(expr, instant?, zone?)`: true iff
    /// `nextRunDate(instant, nth=0, allowCurrent=true)` equals `instant`
    /// by epoch-second comparison.
    pub fn is_due(&self, instant: Option<TimePoint>, zone: Option<Tz>) -> bool {
        let start = self.resolve_start(instant, zone);
        match search::search(&self.fields, &start, false, 0, true, self.config.max_iteration_count) {
            Ok(found) => found.datetime().timestamp() == start.datetime().timestamp(),
            Err(_) => false,
        }
    }

    fn resolve_start(&self, instant: Option<TimePoint>, zone: Option<Tz>) -> TimePoint {
        match instant {
            Some(tp) => TimePoint::from_zoned(tp.datetime(), zone),
            None => TimePoint::now(zone.unwrap_or(crate::timezone::DEFAULT_ZONE)),
        }
    }
}

impl fmt::Display for CronExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw_parts.join(" "))
    }
}

impl std::str::FromStr for CronExpression {
    type Err = CronError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_six_fields() {
        let err = CronExpression::parse("0 0 1 1 * 2030").unwrap_err();
        assert!(matches!(err, CronError::Parse { .. }));
    }

    #[test]
    fn test_alias_expands_and_round_trips() {
        let expr = CronExpression::parse("@weekly").unwrap();
        assert_eq!(expr.to_string(), "0 0 * * 0");
    }

    #[test]
    fn test_reboot_is_rejected() {
        assert!(CronExpression::parse("@reboot").is_err());
    }

    #[test]
    fn test_whitespace_normalization_round_trip() {
        let expr = CronExpression::parse("*   *\t* * *").unwrap();
        assert_eq!(expr.to_string(), "* * * * *");
    }

    #[test]
    fn test_with_part_replaces_single_field() {
        let expr = CronExpression::parse("0 0 * * *").unwrap();
        let updated = expr.with_part(1, "5").unwrap();
        assert_eq!(updated.to_string(), "0 5 * * *");
    }

    #[test]
    fn test_with_part_rejects_bad_position() {
        let expr = CronExpression::parse("0 0 * * *").unwrap();
        assert!(matches!(expr.with_part(5, "1"), Err(CronError::InvalidField(5))));
    }

    #[test]
    fn test_boundary_every_minute() {
        let expr = CronExpression::parse("* * * * *").unwrap();
        let start = TimePoint::parse("2011-09-27 10:10:54", Some(chrono_tz::UTC)).unwrap();
        let next = expr.next_run_date(Some(start), 0, false, None).unwrap();
        assert_eq!((next.hour(), next.minute()), (10, 11));
    }

    #[test]
    fn test_boundary_previous_january_27th_across_years() {
        let expr = CronExpression::parse("0 0 27 JAN *").unwrap();
        let start = TimePoint::parse("2011-08-22 00:00:00", Some(chrono_tz::UTC)).unwrap();
        let prev = expr.previous_run_date(Some(start), 0, false, None).unwrap();
        assert_eq!((prev.year(), prev.month(), prev.day()), (2011, 1, 27));
    }

    #[test]
    fn test_boundary_weekly_skip_two() {
        let expr = CronExpression::parse("@weekly").unwrap();
        let start = TimePoint::parse("2008-11-09 00:00:00", Some(chrono_tz::UTC)).unwrap();
        let result = expr.next_run_date(Some(start), 2, true, None).unwrap();
        assert_eq!((result.year(), result.month(), result.day()), (2008, 11, 23));
    }

    #[test]
    fn test_boundary_wrap_around_month_step() {
        let expr = CronExpression::parse("* * * */123 *").unwrap();
        let due_instant = TimePoint::parse("2014-04-07 00:00:00", Some(chrono_tz::UTC)).unwrap();
        assert!(expr.is_due(Some(due_instant), None));

        let start = TimePoint::parse("2014-05-07 00:00:00", Some(chrono_tz::UTC)).unwrap();
        let next = expr.next_run_date(Some(start), 0, false, None).unwrap();
        assert_eq!((next.year(), next.month(), next.day()), (2015, 4, 1));
    }

    #[test]
    fn test_boundary_timezone_resolution() {
        let mut expr = CronExpression::parse("0 7 * * *").unwrap();
        expr.set_max_iteration_count(2000);
        let reference = TimePoint::parse("2017-10-17T10:00:00+01:00", Some(chrono_tz::Europe::London)).unwrap();
        let prev = expr
            .previous_run_date(Some(reference), 0, false, Some(chrono_tz::America::New_York))
            .unwrap();
        assert_eq!(prev.datetime().timestamp(), 1508151600);
    }
}
