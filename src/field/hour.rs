//! Hour field: 0–23. Increment adjusts clock components rather than
//! subtracting a fixed duration, keeping non-whole-hour zone offsets and
//! DST transitions correct. See [`TimePoint::step_hour`].

use super::{CronField, FieldSpec};
use crate::timezone::TimePoint;

/// Marker type for the hour position.
pub struct Hour;

impl FieldSpec for Hour {
    const POSITION: usize = 1;
    const RANGE_START: i64 = 0;
    const RANGE_END: i64 = 23;

    fn parse(token: &str) -> crate::error::CronResult<CronField> {
        super::parse(token, Self::bounds())
    }

    fn is_satisfied_by(tp: &TimePoint, field: &CronField) -> bool {
        super::is_satisfied(tp.hour() as i64, field, Self::bounds())
    }

    fn increment(tp: &TimePoint, backward: bool, _field: &CronField) -> TimePoint {
        tp.step_hour(backward)
    }
}
