#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions, clippy::must_use_candidate)]

//! # cronwork - a timezone-aware cron expression engine
//!
//! Parses five-field cron expressions (plus `L`/`W`/`#` extensions and
//! `@`-aliases), decides whether one is due at a given instant, and
//! searches forward or backward for firing instants. Correct across
//! timezones, month boundaries, leap years, and non-whole-hour zone
//! offsets.
//!
//! ## Example
//!
//! ```rust
//! use cronwork::CronExpression;
//!
//! let expr = CronExpression::parse("0 9 * * MON-FRI").unwrap();
//! let next = expr.next_run_date(None, 0, false, None).unwrap();
//! assert_eq!(next.minute(), 0);
//! ```
//!
//! ## Feature flags
//!
//! - `store`: an in-memory job store + log-level taxonomy satisfying the
//!   external job-manager collaborator contract. Off by default; the
//!   engine itself never uses it.

/// Error types used throughout the engine.
pub mod error;

/// Timezone-aware instant normalization.
pub mod timezone;

/// The field kernel and the five concrete field implementations.
pub mod field;

/// `CronExpression`: parsing, alias resolution, and the query API.
pub mod expression;

/// The position-major convergence loop.
pub mod search;

/// Collaborator façade: job store contract + log-level taxonomy.
#[cfg(feature = "store")]
#[cfg_attr(docsrs, doc(cfg(feature = "store")))]
pub mod store;

pub use error::{CronError, CronResult};
pub use expression::CronExpression;
pub use search::SearchConfig;
pub use timezone::TimePoint;

/// Crate version, for diagnostics.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// `isValid(expr)`: one-shot convenience wrapper.
pub fn is_valid(expr: &str) -> bool {
    CronExpression::is_valid(expr)
}

/// `isDue(expr, instant?, zone?)`: one-shot convenience wrapper. Returns
/// `false` for a malformed expression rather than panicking.
pub fn is_due(expr: &str, instant: Option<TimePoint>, zone: Option<chrono_tz::Tz>) -> bool {
    match CronExpression::parse(expr) {
        Ok(parsed) => parsed.is_due(instant, zone),
        Err(_) => false,
    }
}

/// `nextRunDate(expr, instant?, zone?)`: one-shot convenience wrapper.
pub fn next_run_date(expr: &str, instant: Option<TimePoint>, zone: Option<chrono_tz::Tz>) -> CronResult<TimePoint> {
    CronExpression::parse(expr)?.next_run_date(instant, 0, false, zone)
}

/// `previousRunDate(expr, instant?, zone?)`: one-shot convenience
/// wrapper.
pub fn previous_run_date(expr: &str, instant: Option<TimePoint>, zone: Option<chrono_tz::Tz>) -> CronResult<TimePoint> {
    CronExpression::parse(expr)?.previous_run_date(instant, 0, false, zone)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_is_valid_rejects_garbage() {
        assert!(!is_valid("not a cron expression"));
    }

    #[test]
    fn test_is_due_false_on_parse_error() {
        assert!(!is_due("garbage", None, None));
    }
}
