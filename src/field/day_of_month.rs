//! Day-of-month field: 1–31, extended tokens `L` (last day of month)
//! and `<n>W` (nearest weekday to day `n`).
//!
//! The nearest-weekday rule is intentionally the "shift only, no
//! clamping" variant: shifting off a Saturday/Sunday may land in the
//! previous or next month, so satisfaction compares full dates, not
//! bare day numbers.

use chrono::NaiveDate;

use super::{CronField, FieldBounds, FieldSpec};
use crate::error::{CronError, CronResult};
use crate::timezone::TimePoint;

/// Marker type for the day-of-month position.
pub struct DayOfMonth;

impl FieldSpec for DayOfMonth {
    const POSITION: usize = 2;
    const RANGE_START: i64 = 1;
    const RANGE_END: i64 = 31;

    fn parse(token: &str) -> CronResult<CronField> {
        let bounds = Self::bounds();
        let segments = super::split_list(token, bounds.position)?;
        let mut items = Vec::with_capacity(segments.len());
        let mut has_special = false;
        for segment in &segments {
            let item = parse_segment(segment, bounds)?;
            if matches!(item, CronField::Last | CronField::Weekday(_)) {
                has_special = true;
            }
            items.push(item);
        }
        if has_special && items.len() > 1 {
            return Err(CronError::parse(
                bounds.position,
                token.to_string(),
                "L/W cannot be combined with other items in a list".to_string(),
            ));
        }
        if items.len() == 1 {
            Ok(items.into_iter().next().unwrap())
        } else {
            Ok(CronField::List(items))
        }
    }

    fn is_satisfied_by(tp: &TimePoint, field: &CronField) -> bool {
        match field {
            CronField::Any => true,
            CronField::Last => tp.day() == tp.days_in_month(),
            CronField::Weekday(n) => match nearest_weekday_date(tp.year(), tp.month(), *n) {
                Some(date) => tp.naive_date() == date,
                None => false,
            },
            CronField::List(items) => items.iter().any(|item| Self::is_satisfied_by(tp, item)),
            other => super::is_satisfied(tp.day() as i64, other, Self::bounds()),
        }
    }

    fn increment(tp: &TimePoint, backward: bool, _field: &CronField) -> TimePoint {
        tp.step_day(backward)
    }
}

fn parse_segment(segment: &str, bounds: FieldBounds) -> CronResult<CronField> {
    if segment == "L" {
        return Ok(CronField::Last);
    }
    if let Some(prefix) = segment.strip_suffix('W') {
        if prefix.is_empty() {
            return Err(CronError::parse(bounds.position, segment.to_string(), "W requires a day-of-month prefix".to_string()));
        }
        let n: i64 = prefix
            .parse()
            .map_err(|_| CronError::parse(bounds.position, segment.to_string(), "W prefix must be an integer".to_string()))?;
        if n < bounds.range_start || n > bounds.range_end {
            return Err(CronError::out_of_range(bounds.position, n, n, bounds.range_start, bounds.range_end));
        }
        return Ok(CronField::Weekday(n));
    }
    super::parse_item(segment, bounds)
}

/// Start on (year, month, n); Saturday shifts back a day, Sunday shifts
/// forward a day, otherwise unchanged. May cross the month boundary.
fn nearest_weekday_date(year: i32, month: u32, n: i64) -> Option<NaiveDate> {
    if n < 1 {
        return None;
    }
    let base = NaiveDate::from_ymd_opt(year, month, n as u32)?;
    match base.weekday() {
        chrono::Weekday::Sat => base.pred_opt(),
        chrono::Weekday::Sun => base.succ_opt(),
        _ => Some(base),
    }
}
