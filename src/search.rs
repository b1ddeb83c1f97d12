//! The position-major convergence loop: drives a cursor through the five
//! fields, coarsest calendar component first, until all are satisfied or
//! the iteration cap is exhausted.

use crate::error::{CronError, CronResult};
use crate::field::{self, CronField};
use crate::timezone::TimePoint;

/// Field positions in search order. Year is reserved but never
/// evaluated; the coarsest-first order starts at month.
pub const SEARCH_ORDER: [usize; 5] = [3, 2, 4, 1, 0];

/// Tunable knobs for the search loop.
#[derive(Debug, Clone, Copy)]
pub struct SearchConfig {
    pub max_iteration_count: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { max_iteration_count: 1000 }
    }
}

/// Run the convergence algorithm once. `nth` skips that many matches past
/// `start` before returning (a post-decrement check on the remaining
/// count); `allow_current` controls whether `start` itself, if already a
/// match, counts.
pub fn search(
    fields: &[CronField; 5],
    start: &TimePoint,
    backward: bool,
    nth: u32,
    allow_current: bool,
    max_iteration_count: u32,
) -> CronResult<TimePoint> {
    let mut cursor = *start;
    let mut remaining = nth;

    for _ in 0..max_iteration_count {
        let mut restarted = false;
        for &position in SEARCH_ORDER.iter() {
            let token = &fields[position];
            if !field::is_satisfied_by_position(position, &cursor, token) {
                cursor = field::increment_position(position, &cursor, backward, token);
                restarted = true;
                break;
            }
        }
        if restarted {
            continue;
        }

        let should_skip = (!allow_current && cursor == *start) || remaining > 0;
        if should_skip {
            if remaining > 0 {
                remaining -= 1;
            }
            cursor = field::increment_position(0, &cursor, backward, &fields[0]);
            continue;
        }

        return Ok(cursor);
    }

    Err(CronError::Infeasible { max_iterations: max_iteration_count })
}

/// `multipleRunDates`: up to `count` results, each found by searching
/// afresh from `start` with `nth` = 0..count. Returns whatever was found
/// so far if a later search is infeasible.
pub fn multiple_run_dates(
    fields: &[CronField; 5],
    start: &TimePoint,
    count: u32,
    backward: bool,
    allow_current: bool,
    max_iteration_count: u32,
) -> Vec<TimePoint> {
    let mut results = Vec::with_capacity(count as usize);
    for nth in 0..count {
        match search(fields, start, backward, nth, allow_current, max_iteration_count) {
            Ok(tp) => results.push(tp),
            Err(_) => break,
        }
    }
    results
}
