//! Field kernel: the grammar, satisfaction, and wrap-around step logic
//! every field delegates to, plus the `FieldSpec` capability set each
//! concrete field implements.

pub mod day_of_month;
pub mod day_of_week;
pub mod hour;
pub mod minute;
pub mod month;

use crate::error::{CronError, CronResult};
use crate::timezone::TimePoint;

/// A single parsed field token, generalized so the calendar-aware
/// day-of-month/day-of-week arms (`L`, `W`, `#`) carry their operands
/// without needing a scalar to compare against yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CronField {
    /// `*`
    All,
    /// `?`
    Any,
    /// a bare integer
    Value(i64),
    /// comma-separated union
    List(Vec<CronField>),
    /// `a-b`
    Range(i64, i64),
    /// `expr/step`
    Step(Box<CronField>, i64),
    /// `L` (day-of-month)
    Last,
    /// `<n>W` (day-of-month)
    Weekday(i64),
    /// `<n>L` (day-of-week)
    LastWeekday(i64),
    /// `<n>#<k>` (day-of-week)
    NthWeekday(i64, i64),
}

/// A field's position and valid range, threaded through kernel helpers so
/// error messages and range-dependent logic (the wrap-around step policy)
/// stay field-agnostic.
#[derive(Debug, Clone, Copy)]
pub struct FieldBounds {
    pub position: usize,
    pub range_start: i64,
    pub range_end: i64,
}

/// The capability set each field exposes: `validate`, `isSatisfiedBy`,
/// `increment`, `rangeForExpression`. Implemented by zero-sized marker
/// types, one per field, so day-of-month/day-of-week can extend the set
/// with their own calendar-aware helpers without forcing minute/hour/month
/// to carry unused methods.
pub trait FieldSpec {
    const POSITION: usize;
    const RANGE_START: i64;
    const RANGE_END: i64;

    /// Literal name -> integer substitutions (month, day-of-week only).
    fn literals() -> &'static [(&'static str, i64)] {
        &[]
    }

    fn bounds() -> FieldBounds {
        FieldBounds {
            position: Self::POSITION,
            range_start: Self::RANGE_START,
            range_end: Self::RANGE_END,
        }
    }

    /// Parse (and structurally validate) a single field token into a
    /// [`CronField`]. Literal substitution happens first.
    fn parse(token: &str) -> CronResult<CronField>;

    /// `isSatisfiedBy`: does `tp` satisfy this parsed token?
    fn is_satisfied_by(tp: &TimePoint, field: &CronField) -> bool;

    /// `increment`: advance `tp` by one field-unit, forward unless
    /// `backward`.
    fn increment(tp: &TimePoint, backward: bool, field: &CronField) -> TimePoint;

    /// `rangeForExpression`, used by the minute field's skip-match
    /// increment.
    fn range_for_expression(field: &CronField) -> CronResult<Vec<i64>> {
        range_for_expression(field, Self::bounds())
    }

    fn validate(token: &str) -> bool {
        Self::parse(token).is_ok()
    }
}

/// Dispatch over the five concrete fields by position (0=minute,
/// 1=hour, 2=day-of-month, 3=month, 4=day-of-week). `expression` and
/// `search` drive the engine through these instead of matching on marker
/// types directly. `CronExpression` stores one parsed [`CronField`] per
/// position rather than five distinct generic slots.
pub fn parse_for_position(position: usize, token: &str) -> CronResult<CronField> {
    match position {
        0 => minute::Minute::parse(token),
        1 => hour::Hour::parse(token),
        2 => day_of_month::DayOfMonth::parse(token),
        3 => month::Month::parse(token),
        4 => day_of_week::DayOfWeek::parse(token),
        _ => Err(CronError::InvalidField(position)),
    }
}

pub fn is_satisfied_by_position(position: usize, tp: &TimePoint, field: &CronField) -> bool {
    match position {
        0 => minute::Minute::is_satisfied_by(tp, field),
        1 => hour::Hour::is_satisfied_by(tp, field),
        2 => day_of_month::DayOfMonth::is_satisfied_by(tp, field),
        3 => month::Month::is_satisfied_by(tp, field),
        4 => day_of_week::DayOfWeek::is_satisfied_by(tp, field),
        _ => unreachable!("CronExpression only ever stores positions 0..=4"),
    }
}

pub fn increment_position(position: usize, tp: &TimePoint, backward: bool, field: &CronField) -> TimePoint {
    match position {
        0 => minute::Minute::increment(tp, backward, field),
        1 => hour::Hour::increment(tp, backward, field),
        2 => day_of_month::DayOfMonth::increment(tp, backward, field),
        3 => month::Month::increment(tp, backward, field),
        4 => day_of_week::DayOfWeek::increment(tp, backward, field),
        _ => unreachable!("CronExpression only ever stores positions 0..=4"),
    }
}

/// Substitute literal names for their integer values. Case-sensitive,
/// applied before numeric validation.
pub fn convert_literals(token: &str, literals: &[(&str, i64)]) -> String {
    let mut out = token.to_string();
    for (name, value) in literals {
        if out.contains(name) {
            out = out.replace(name, &value.to_string());
        }
    }
    out
}

/// Split a comma list, rejecting empty segments (folded into
/// `isSatisfied`'s list handling one level up from the kernel proper).
pub fn split_list<'a>(token: &'a str, position: usize) -> CronResult<Vec<&'a str>> {
    if token.is_empty() {
        return Err(CronError::parse(position, token, "field must not be empty"));
    }
    let parts: Vec<&str> = token.split(',').collect();
    if parts.iter().any(|p| p.is_empty()) {
        return Err(CronError::parse(position, token, "comma list contains an empty item"));
    }
    Ok(parts)
}

/// The kernel's generic grammar parser: `*`, `?`, integer, `a-b`,
/// `expr/step`, and comma lists of the above. Fields with extended
/// grammar (`L`, `W`, `#`) intercept those forms before falling back here.
pub fn parse(token: &str, bounds: FieldBounds) -> CronResult<CronField> {
    let segments = split_list(token, bounds.position)?;
    let mut items = Vec::with_capacity(segments.len());
    for segment in segments {
        items.push(parse_item(segment, bounds)?);
    }
    if items.len() == 1 {
        Ok(items.into_iter().next().unwrap())
    } else {
        Ok(CronField::List(items))
    }
}

/// Parse one non-list segment: `*`, `?`, `expr/step`, `a-b`, or a bare
/// integer. Exposed so fields with extended grammar can reuse it per
/// comma-separated item.
pub fn parse_item(segment: &str, bounds: FieldBounds) -> CronResult<CronField> {
    if segment == "*" {
        return Ok(CronField::All);
    }
    if segment == "?" {
        return Ok(CronField::Any);
    }
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
        let start: i64 = a
            .parse()
            .map_err(|_| CronError::parse(bounds.position, segment.to_string(), "range bounds must be integers".to_string()))?;
        let end: i64 = b
            .parse()
            .map_err(|_| CronError::parse(bounds.position, segment.to_string(), "range bounds must be integers".to_string()))?;
        if start > end {
            return Err(CronError::out_of_range(bounds.position, start, end, bounds.range_start, bounds.range_end));
        }
        if start < bounds.range_start || end > bounds.range_end {
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

/// `isSatisfied`/`isInIncrementsOfRanges`. `Last`/`Weekday`/
/// `LastWeekday`/`NthWeekday` are calendar-aware and never reach the
/// kernel: the owning field intercepts them in its own `is_satisfied_by`.
pub fn is_satisfied(scalar: i64, field: &CronField, bounds: FieldBounds) -> bool {
    match field {
        CronField::All | CronField::Any => true,
        CronField::Value(v) => scalar == *v,
        CronField::Range(a, b) => scalar >= *a && scalar <= *b,
        CronField::List(items) => items.iter().any(|item| is_satisfied(scalar, item, bounds)),
        CronField::Step(inner, step) => is_satisfied_step(scalar, inner, *step, bounds),
        CronField::Last | CronField::Weekday(_) | CronField::LastWeekday(_) | CronField::NthWeekday(_, _) => {
            unreachable!("calendar-aware tokens are resolved by the owning field, not the kernel")
        }
    }
}

fn is_satisfied_step(scalar: i64, inner: &CronField, step: i64, bounds: FieldBounds) -> bool {
    let full_span = bounds.range_end - bounds.range_start;
    if step >= full_span.max(1) {
        let full_range: Vec<i64> = (bounds.range_start..=bounds.range_end).collect();
        let idx = (step as usize) % full_range.len();
        return scalar == full_range[idx];
    }
    match step_lhs_bounds(inner, bounds) {
        Some((lo, hi)) => scalar >= lo && scalar <= hi && (scalar - lo) % step == 0,
        None => false,
    }
}

fn step_lhs_bounds(inner: &CronField, bounds: FieldBounds) -> Option<(i64, i64)> {
    match inner {
        CronField::All => Some((bounds.range_start, bounds.range_end)),
        CronField::Value(v) => Some((*v, bounds.range_end)),
        CronField::Range(a, b) => Some((*a, *b)),
        _ => None,
    }
}

/// `rangeForExpression`: the concrete enumeration of matching values,
/// implementing the wrap-around step policy.
pub fn range_for_expression(field: &CronField, bounds: FieldBounds) -> CronResult<Vec<i64>> {
    match field {
        CronField::All | CronField::Any => Ok((bounds.range_start..=bounds.range_end).collect()),
        CronField::Value(v) => Ok(vec![*v]),
        CronField::Range(a, b) => Ok((*a..=*b).collect()),
        CronField::List(items) => {
            let mut set = std::collections::BTreeSet::new();
            for item in items {
                set.extend(range_for_expression(item, bounds)?);
            }
            Ok(set.into_iter().collect())
        }
        CronField::Step(inner, step) => {
            let full_span = bounds.range_end - bounds.range_start;
            let full_range: Vec<i64> = (bounds.range_start..=bounds.range_end).collect();
            if *step >= full_span.max(1) {
                let idx = (*step as usize) % full_range.len();
                return Ok(vec![full_range[idx]]);
            }
            let (lo, hi) = step_lhs_bounds(inner, bounds)
                .ok_or_else(|| CronError::parse(bounds.position, "?".to_string(), "step left-hand side must be *, a value, or a range".to_string()))?;
            Ok((lo..=hi).step_by(*step as usize).collect())
        }
        CronField::Last | CronField::Weekday(_) | CronField::LastWeekday(_) | CronField::NthWeekday(_, _) => Err(
            CronError::invalid_value(bounds.position, "?".to_string(), "calendar-aware token has no static range enumeration".to_string()),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(range_start: i64, range_end: i64) -> FieldBounds {
        FieldBounds { position: 0, range_start, range_end }
    }

    #[test]
    fn test_wrap_around_step_picks_single_value() {
        let field = parse("*/123", bounds(1, 12)).unwrap();
        let values = range_for_expression(&field, bounds(1, 12)).unwrap();
        assert_eq!(values, vec![4]);
    }

    #[test]
    fn test_list_of_ranges() {
        let field = parse("1-3,7", bounds(0, 59)).unwrap();
        assert!(is_satisfied(2, &field, bounds(0, 59)));
        assert!(is_satisfied(7, &field, bounds(0, 59)));
        assert!(!is_satisfied(5, &field, bounds(0, 59)));
    }

    #[test]
    fn test_step_through_range() {
        let field = parse("10-20/5", bounds(0, 59)).unwrap();
        let values = range_for_expression(&field, bounds(0, 59)).unwrap();
        assert_eq!(values, vec![10, 15, 20]);
    }

    #[test]
    fn test_rejects_out_of_range_value() {
        let err = parse("99", bounds(0, 59)).unwrap_err();
        assert!(matches!(err, CronError::OutOfRange { .. }));
    }

    #[test]
    fn test_rejects_empty_list_item() {
        let err = parse("1,,2", bounds(0, 59)).unwrap_err();
        assert!(matches!(err, CronError::Parse { .. }));
    }

    #[test]
    fn test_convert_literals_substitutes_case_sensitively() {
        let out = convert_literals("MON-FRI", &[("MON", 1), ("FRI", 5)]);
        assert_eq!(out, "1-5");
    }
}
