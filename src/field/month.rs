//! Month field: 1–12, literals JAN..DEC. Increment jumps to the first
//! day of the next month (or last day of the previous month), rolling
//! across years. See [`TimePoint::step_month`].

use super::{CronField, FieldSpec};
use crate::timezone::TimePoint;

const LITERALS: &[(&str, i64)] = &[
    ("JAN", 1),
    ("FEB", 2),
    ("MAR", 3),
    ("APR", 4),
    ("MAY", 5),
    ("JUN", 6),
    ("JUL", 7),
    ("AUG", 8),
    ("SEP", 9),
    ("OCT", 10),
    ("NOV", 11),
    ("DEC", 12),
];

/// Marker type for the month position.
pub struct Month;

impl FieldSpec for Month {
    const POSITION: usize = 3;
    const RANGE_START: i64 = 1;
    const RANGE_END: i64 = 12;

    fn literals() -> &'static [(&'static str, i64)] {
        LITERALS
    }

    fn parse(token: &str) -> crate::error::CronResult<CronField> {
        let substituted = super::convert_literals(token, Self::literals());
        super::parse(&substituted, Self::bounds())
    }

    fn is_satisfied_by(tp: &TimePoint, field: &CronField) -> bool {
        super::is_satisfied(tp.month() as i64, field, Self::bounds())
    }

    fn increment(tp: &TimePoint, backward: bool, _field: &CronField) -> TimePoint {
        tp.step_month(backward)
    }
}
