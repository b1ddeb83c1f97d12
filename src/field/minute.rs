//! Minute field: 0–59, no literals, token-aware skip-match
//! increment so a sparse minute token doesn't cost up to 59 wasted steps.

use super::{CronField, FieldBounds, FieldSpec};
use crate::timezone::TimePoint;

/// Marker type for the minute position.
pub struct Minute;

impl FieldSpec for Minute {
    const POSITION: usize = 0;
    const RANGE_START: i64 = 0;
    const RANGE_END: i64 = 59;

    fn parse(token: &str) -> crate::error::CronResult<CronField> {
        super::parse(token, Self::bounds())
    }

    fn is_satisfied_by(tp: &TimePoint, field: &CronField) -> bool {
        super::is_satisfied(tp.minute() as i64, field, Self::bounds())
    }

    fn increment(tp: &TimePoint, backward: bool, field: &CronField) -> TimePoint {
        match field {
            CronField::All | CronField::Any => tp.step_minute(backward),
            _ => skip_match_increment(tp, backward, field),
        }
    }
}

fn skip_match_increment(tp: &TimePoint, backward: bool, field: &CronField) -> TimePoint {
    let values = match Minute::range_for_expression(field) {
        Ok(v) if !v.is_empty() => v,
        _ => return tp.step_minute(backward),
    };
    let current = tp.minute() as i64;

    if backward {
        if let Some(&prev) = values.iter().rev().find(|&&v| v < current) {
            return tp.with_fields(tp.year(), tp.month(), tp.day(), tp.hour(), prev as u32, false);
        }
        let stepped = tp.step_hour(true);
        let last = *values.last().unwrap();
        stepped.with_fields(stepped.year(), stepped.month(), stepped.day(), stepped.hour(), last as u32, false)
    } else {
        if let Some(&next) = values.iter().find(|&&v| v > current) {
            return tp.with_fields(tp.year(), tp.month(), tp.day(), tp.hour(), next as u32, true);
        }
        let stepped = tp.step_hour(false);
        let first = *values.first().unwrap();
        stepped.with_fields(stepped.year(), stepped.month(), stepped.day(), stepped.hour(), first as u32, true)
    }
}
