//! Timezone-aware instant normalization.
//!
//! Accepts an absolute/offset string, a `@<unix>` string, a naive "wall
//! clock" string, a [`chrono::NaiveDateTime`], or an already-zoned
//! [`chrono::DateTime<Tz>`]. `TimePoint` turns any of these into a single
//! zoned instant at minute precision. Zone resolution order: explicit
//! `zone` argument, then the input's own zone, then the host default
//! (UTC, documented in DESIGN.md).

use chrono::{DateTime, Datelike, LocalResult, NaiveDate, NaiveDateTime, TimeZone, Timelike};
use chrono_tz::Tz;

use crate::error::{CronError, CronResult};

/// The host's default zone when neither a `zone` argument nor the input
/// itself carries one. UTC, not the process's local zone. See DESIGN.md.
pub const DEFAULT_ZONE: Tz = chrono_tz::UTC;

/// A mutable, minute-precision instant in a single IANA timezone.
///
/// This is the search loop's "cursor": exclusively owned, threaded by
/// value, mutated in place by field `increment` operations. Seconds and
/// sub-second components are always zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimePoint {
    inner: DateTime<Tz>,
}

impl TimePoint {
    /// Build a `TimePoint` from an already-zoned instant, converting to
    /// `zone` if one is supplied (resolution rule 1), otherwise keeping the
    /// instant's own zone (rule 2). Seconds are zeroed in the target zone.
    pub fn from_zoned(instant: DateTime<Tz>, zone: Option<Tz>) -> Self {
        let target = zone.unwrap_or_else(|| instant.timezone());
        Self::from_naive_in(instant.with_timezone(&target).naive_local(), target)
    }

    /// Build a `TimePoint` by reinterpreting a naive instant in `zone`
    /// (rule 3 when the caller has no zone of its own: naive input carries
    /// no zone, so the supplied/default zone always applies).
    pub fn from_naive(naive: NaiveDateTime, zone: Tz) -> Self {
        Self::from_naive_in(naive, zone)
    }

    /// Parse a string instant: `@<unix>`, an RFC 3339/ISO offset string, or
    /// a naive `"YYYY-MM-DD HH:MM:SS"` string. `zone`, if given, wins over
    /// whatever zone the string itself carries.
    pub fn parse(input: &str, zone: Option<Tz>) -> CronResult<Self> {
        let input = input.trim();

        if let Some(rest) = input.strip_prefix('@') {
            let secs: i64 = rest
                .parse()
                .map_err(|_| CronError::parse(0, input, "invalid unix timestamp"))?;
            let utc = DateTime::from_timestamp(secs, 0)
                .ok_or_else(|| CronError::parse(0, input, "unix timestamp out of range"))?;
            return Ok(Self::from_zoned(utc.with_timezone(&chrono_tz::UTC), zone));
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
            let zoned = dt.with_timezone(&chrono_tz::UTC);
            return Ok(Self::from_zoned(zoned, zone));
        }

        const NAIVE_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];
        for fmt in NAIVE_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(input, fmt) {
                return Ok(Self::from_naive(naive, zone.unwrap_or(DEFAULT_ZONE)));
            }
        }

        Err(CronError::parse(0, input, "unrecognized instant format"))
    }

    fn from_naive_in(naive: NaiveDateTime, zone: Tz) -> Self {
        let naive = naive.with_second(0).unwrap().with_nanosecond(0).unwrap();
        let resolved = resolve_local(naive, zone, true);
        Self { inner: resolved }
    }

    /// Current instant in `zone`.
    pub fn now(zone: Tz) -> Self {
        let now = chrono::Utc::now().with_timezone(&zone);
        Self::from_naive_in(now.naive_local(), zone)
    }

    /// The underlying zoned instant.
    pub fn datetime(&self) -> DateTime<Tz> {
        self.inner
    }

    /// The timezone this instant is expressed in.
    pub fn zone(&self) -> Tz {
        self.inner.timezone()
    }

    /// The calendar date, ignoring time-of-day and zone. Used by
    /// day-of-month's nearest-weekday rule to compare full dates instead
    /// of bare day numbers.
    pub fn naive_date(&self) -> NaiveDate {
        self.inner.date_naive()
    }

    pub fn year(&self) -> i32 {
        self.inner.year()
    }

    pub fn month(&self) -> u32 {
        self.inner.month()
    }

    pub fn day(&self) -> u32 {
        self.inner.day()
    }

    pub fn hour(&self) -> u32 {
        self.inner.hour()
    }

    pub fn minute(&self) -> u32 {
        self.inner.minute()
    }

    /// 0 = Sunday .. 6 = Saturday (crontab convention).
    pub fn weekday_0_6(&self) -> u32 {
        self.inner.weekday().num_days_from_sunday()
    }

    /// 1 = Monday .. 7 = Sunday (ISO convention).
    pub fn weekday_iso(&self) -> u32 {
        self.inner.weekday().number_from_monday()
    }

    /// Number of days in this instant's (year, month).
    pub fn days_in_month(&self) -> u32 {
        days_in_month(self.year(), self.month())
    }

    /// Rebuild this instant at a different (month, day, hour, minute),
    /// carrying the same year and zone, resolving DST gaps/overlaps with
    /// `prefer_earlier`.
    pub fn with_fields(&self, year: i32, month: u32, day: u32, hour: u32, minute: u32, prefer_earlier: bool) -> Self {
        let naive = NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|d| d.and_hms_opt(hour, minute, 0))
            .expect("caller-provided calendar fields must be in range");
        Self {
            inner: resolve_local(naive, self.zone(), prefer_earlier),
        }
    }

    /// Step forward or backward by exactly one minute, zone-aware.
    pub fn step_minute(&self, backward: bool) -> Self {
        let delta = chrono::Duration::minutes(1);
        let shifted = if backward {
            self.inner - delta
        } else {
            self.inner + delta
        };
        Self { inner: shifted }
    }

    /// Step forward or backward by one calendar day, zeroing (or maxing)
    /// the time-of-day per the day-of-month/day-of-week increment rules.
    pub fn step_day(&self, backward: bool) -> Self {
        let naive_date = self.inner.date_naive();
        let next_date = if backward {
            naive_date.pred_opt()
        } else {
            naive_date.succ_opt()
        }
        .expect("date arithmetic near chrono's NaiveDate bounds");
        let (h, m) = if backward { (23, 59) } else { (0, 0) };
        let naive = next_date.and_hms_opt(h, m, 0).unwrap();
        Self {
            inner: resolve_local(naive, self.zone(), !backward),
        }
    }

    /// Step forward or backward by one calendar hour, adjusting clock
    /// components rather than subtracting a fixed duration, so non-whole-
    /// hour zone offsets (e.g. `Asia/Kathmandu`, `America/St_Johns`) and DST
    /// transitions are handled correctly.
    pub fn step_hour(&self, backward: bool) -> Self {
        let mut date = self.inner.date_naive();
        let mut hour = self.hour() as i64 + if backward { -1 } else { 1 };
        if hour < 0 {
            hour = 23;
            date = date.pred_opt().expect("date underflow");
        } else if hour > 23 {
            hour = 0;
            date = date.succ_opt().expect("date overflow");
        }
        let minute = if backward { 59 } else { 0 };
        let naive = date.and_hms_opt(hour as u32, minute, 0).unwrap();
        Self {
            inner: resolve_local(naive, self.zone(), !backward),
        }
    }

    /// Jump to the first day of the next month at 00:00, or the last day
    /// of the previous month at 23:59. Rolls across year boundaries.
    pub fn step_month(&self, backward: bool) -> Self {
        let (y, m) = (self.year(), self.month());
        if backward {
            let (py, pm) = if m == 1 { (y - 1, 12) } else { (y, m - 1) };
            let day = days_in_month(py, pm);
            self.with_fields(py, pm, day, 23, 59, false)
        } else {
            let (ny, nm) = if m == 12 { (y + 1, 1) } else { (y, m + 1) };
            self.with_fields(ny, nm, 1, 0, 0, true)
        }
    }
}

impl From<DateTime<Tz>> for TimePoint {
    fn from(dt: DateTime<Tz>) -> Self {
        Self::from_zoned(dt, None)
    }
}

fn resolve_local(naive: NaiveDateTime, zone: Tz, prefer_earlier: bool) -> DateTime<Tz> {
    match zone.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earlier, later) => {
            if prefer_earlier {
                earlier
            } else {
                later
            }
        }
        LocalResult::None => {
            // Inside a DST-gap; nudge forward or backward in small steps
            // until we land on a representable wall-clock time.
            let step = chrono::Duration::minutes(1);
            let mut candidate = naive;
            for _ in 0..120 {
                candidate = if prefer_earlier {
                    candidate + step
                } else {
                    candidate - step
                };
                if let LocalResult::Single(dt) = zone.from_local_datetime(&candidate) {
                    return dt;
                }
            }
            // Fall back to UTC interpretation rather than panicking; this
            // only triggers for pathological zone data.
            zone.from_utc_datetime(&naive)
        }
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 31,
    }
}
