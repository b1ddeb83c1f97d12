//! Day-of-week field: 0–7 (0 and 7 both Sunday), literals MON..SUN,
//! extended tokens `?`, `<n>L` (last weekday of month), and `<n>#<k>`
//! (k-th weekday of month).
//!
//! The numeric comparison mode, ISO (1..7, Sunday=7) or zero-based
//! (0..6, Sunday=0), is derived from whether the parsed token ends up
//! containing a literal `7`. A wrap-around range like `6-0` is rewritten
//! to `6-7` to stay monotone.

use super::{CronField, FieldBounds, FieldSpec};
use crate::error::{CronError, CronResult};
use crate::timezone::TimePoint;

const LITERALS: &[(&str, i64)] = &[
    ("MON", 1),
    ("TUE", 2),
    ("WED", 3),
    ("THU", 4),
    ("FRI", 5),
    ("SAT", 6),
    ("SUN", 0),
];

/// Marker type for the day-of-week position.
pub struct DayOfWeek;

impl FieldSpec for DayOfWeek {
    const POSITION: usize = 4;
    const RANGE_START: i64 = 0;
    const RANGE_END: i64 = 7;

    fn literals() -> &'static [(&'static str, i64)] {
        LITERALS
    }

    fn parse(token: &str) -> CronResult<CronField> {
        let bounds = Self::bounds();
        let substituted = super::convert_literals(token, Self::literals());
        let segments = super::split_list(&substituted, bounds.position)?;
        let mut items = Vec::with_capacity(segments.len());
        for segment in &segments {
            items.push(parse_segment(segment, bounds)?);
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
            CronField::LastWeekday(target) => is_last_weekday(tp, *target),
            CronField::NthWeekday(target_iso, k) => is_nth_weekday(tp, *target_iso, *k),
            CronField::List(items) => items.iter().any(|item| Self::is_satisfied_by(tp, item)),
            other => {
                let scalar = if uses_iso_domain(other) {
                    tp.weekday_iso() as i64
                } else {
                    tp.weekday_0_6() as i64
                };
                super::is_satisfied(scalar, other, Self::bounds())
            }
        }
    }

    fn increment(tp: &TimePoint, backward: bool, _field: &CronField) -> TimePoint {
        tp.step_day(backward)
    }
}

fn parse_segment(segment: &str, bounds: FieldBounds) -> CronResult<CronField> {
    if segment == "?" {
        return Ok(CronField::Any);
    }
    if segment == "*" {
        return Ok(CronField::All);
    }
    if segment == "L" {
        return Err(CronError::parse(bounds.position, segment.to_string(), "bare L is not valid on day-of-week".to_string()));
    }
    if let Some(idx) = segment.find('#') {
        let (lhs, rhs) = (&segment[..idx], &segment[idx + 1..]);
        let weekday: i64 = lhs
            .parse()
            .map_err(|_| CronError::invalid_hash(segment.to_string(), format!("{lhs:?} is not a valid weekday")))?;
        if !(0..=7).contains(&weekday) {
            return Err(CronError::invalid_hash(segment.to_string(), format!("weekday {weekday} is out of range [0, 7]")));
        }
        let k: i64 = rhs
            .parse()
            .map_err(|_| CronError::invalid_hash(segment.to_string(), format!("{rhs:?} is not a valid nth")))?;
        if !(1..=5).contains(&k) {
            return Err(CronError::invalid_hash(segment.to_string(), format!("nth {k} is out of range [1, 5]")));
        }
        let iso = if weekday == 0 { 7 } else { weekday };
        return Ok(CronField::NthWeekday(iso, k));
    }
    if let Some(prefix) = segment.strip_suffix('L') {
        if prefix.is_empty() {
            return Err(CronError::parse(bounds.position, segment.to_string(), "bare L is not valid on day-of-week".to_string()));
        }
        let weekday: i64 = prefix
            .parse()
            .map_err(|_| CronError::parse(bounds.position, segment.to_string(), "L prefix must be a weekday number".to_string()))?;
        if !(0..=7).contains(&weekday) {
            return Err(CronError::out_of_range(bounds.position, weekday, weekday, 0, 7));
        }
        return Ok(CronField::LastWeekday(weekday % 7));
    }
    parse_plain(segment, bounds)
}

fn parse_plain(segment: &str, bounds: FieldBounds) -> CronResult<CronField> {
    if let Some((lhs, step_str)) = segment.split_once('/') {
        let step: i64 = step_str
            .parse()
            .map_err(|_| CronError::parse(bounds.position, segment.to_string(), "step must be a positive integer".to_string()))?;
        if step <= 0 {
            return Err(CronError::parse(bounds.position, segment.to_string(), "step must be positive".to_string()));
        }
        let inner = parse_range_or_value(lhs, bounds)?;
        return Ok(CronField::Step(Box::new(inner), step));
    }
    parse_range_or_value(segment, bounds)
}

fn parse_range_or_value(segment: &str, bounds: FieldBounds) -> CronResult<CronField> {
    if segment == "*" {
        return Ok(CronField::All);
    }
    if let Some((a, b)) = segment.split_once('-') {
        if a.is_empty() || b.is_empty() {
            return Err(CronError::parse(bounds.position, segment.to_string(), "malformed range".to_string()));
        }
        let mut start: i64 = a
            .parse()
            .map_err(|_| CronError::parse(bounds.position, segment.to_string(), "range bounds must be integers".to_string()))?;
        let mut end: i64 = b
            .parse()
            .map_err(|_| CronError::parse(bounds.position, segment.to_string(), "range bounds must be integers".to_string()))?;
        // keep the range monotone when it wraps through Sunday
        if start == 7 {
            start = 0;
        }
        if end == 0 {
            end = 7;
        }
        if start > end || start < bounds.range_start || end > bounds.range_end {
            return Err(CronError::out_of_range(bounds.position, start, end, bounds.range_start, bounds.range_end));
        }
        return Ok(CronField::Range(start, end));
    }
    let value: i64 = segment
        .parse()
        .map_err(|_| CronError::invalid_value(bounds.position, segment.to_string(), "expected an integer".to_string()))?;
    if value < bounds.range_start || value > bounds.range_end {
        return Err(CronError::out_of_range(bounds.position, value, value, bounds.range_start, bounds.range_end));
    }
    Ok(CronField::Value(value))
}

fn uses_iso_domain(field: &CronField) -> bool {
    match field {
        CronField::Value(v) => *v == 7,
        CronField::Range(a, b) => *a == 7 || *b == 7,
        CronField::Step(inner, _) => uses_iso_domain(inner),
        CronField::List(items) => items.iter().any(uses_iso_domain),
        _ => false,
    }
}

fn is_last_weekday(tp: &TimePoint, target_0_6: i64) -> bool {
    let last_day = tp.days_in_month();
    let Some(last_date) = tp.naive_date().with_day(last_day) else {
        return false;
    };
    let last_wd = last_date.weekday().num_days_from_sunday() as i64;
    let diff = (last_wd - target_0_6).rem_euclid(7);
    let matching_day = last_day as i64 - diff;
    tp.day() as i64 == matching_day
}

fn is_nth_weekday(tp: &TimePoint, target_iso: i64, k: i64) -> bool {
    if tp.weekday_iso() as i64 != target_iso {
        return false;
    }
    let occurrence = ((tp.day() - 1) / 7) + 1;
    occurrence as i64 == k
}
