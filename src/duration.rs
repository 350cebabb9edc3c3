//! Lengths of time on the timeline.

use crate::cal::Chronology;
use crate::cal::basic::{MILLIS_PER_DAY, MILLIS_PER_HOUR, MILLIS_PER_MINUTE, MILLIS_PER_SECOND};
use crate::error::{Error, Result};
use crate::period::{Period, PeriodType};
use crate::util::{safe_add, safe_multiply, safe_negate, safe_subtract};


/// A **duration** is a length of time on the timeline, irrespective of
/// time zone or calendar format, with millisecond precision.
///
/// Unlike a period, a duration has the same length wherever it is
/// applied: a duration of one day is always 86,400,000 milliseconds, even
/// across a daylight-saving change.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Duration {
    millis: i64,
}

impl Duration {

    /// Create a new zero-length duration.
    pub fn zero() -> Duration {
        Duration { millis: 0 }
    }

    /// Create a new duration that’s the given number of milliseconds long.
    pub fn of_millis(millis: i64) -> Duration {
        Duration { millis }
    }

    pub fn of_seconds(seconds: i64) -> Result<Duration> {
        Ok(Duration { millis: safe_multiply(seconds, MILLIS_PER_SECOND)? })
    }

    pub fn of_minutes(minutes: i64) -> Result<Duration> {
        Ok(Duration { millis: safe_multiply(minutes, MILLIS_PER_MINUTE)? })
    }

    pub fn of_hours(hours: i64) -> Result<Duration> {
        Ok(Duration { millis: safe_multiply(hours, MILLIS_PER_HOUR)? })
    }

    /// Create a new duration of the given number of standard 24-hour days.
    pub fn of_standard_days(days: i64) -> Result<Duration> {
        Ok(Duration { millis: safe_multiply(days, MILLIS_PER_DAY)? })
    }

    /// The duration from one instant to another, negative if `end` comes
    /// first.
    pub fn between(start: i64, end: i64) -> Result<Duration> {
        Ok(Duration { millis: safe_subtract(end, start)? })
    }

    /// The total length in milliseconds.
    pub fn millis(self) -> i64 {
        self.millis
    }

    /// The number of whole seconds, rounded towards zero.
    pub fn standard_seconds(self) -> i64 {
        self.millis / MILLIS_PER_SECOND
    }

    pub fn standard_minutes(self) -> i64 {
        self.millis / MILLIS_PER_MINUTE
    }

    pub fn standard_hours(self) -> i64 {
        self.millis / MILLIS_PER_HOUR
    }

    /// The number of whole 24-hour days, rounded towards zero.
    pub fn standard_days(self) -> i64 {
        self.millis / MILLIS_PER_DAY
    }

    pub fn is_zero(self) -> bool {
        self.millis == 0
    }

    pub fn plus(self, other: Duration) -> Result<Duration> {
        Ok(Duration { millis: safe_add(self.millis, other.millis)? })
    }

    pub fn minus(self, other: Duration) -> Result<Duration> {
        Ok(Duration { millis: safe_subtract(self.millis, other.millis)? })
    }

    pub fn multiplied_by(self, scalar: i64) -> Result<Duration> {
        Ok(Duration { millis: safe_multiply(self.millis, scalar)? })
    }

    /// Divides the length, rounding towards zero.
    pub fn divided_by(self, divisor: i64) -> Result<Duration> {
        if divisor == 0 {
            return Err(Error::invalid("Cannot divide a duration by zero"));
        }
        match self.millis.checked_div(divisor) {
            Some(millis) => Ok(Duration { millis }),
            None         => Err(Error::Overflow("division")),
        }
    }

    pub fn negated(self) -> Result<Duration> {
        Ok(Duration { millis: safe_negate(self.millis)? })
    }

    pub fn abs(self) -> Result<Duration> {
        if self.millis < 0 { self.negated() } else { Ok(self) }
    }

    /// Adds this duration, multiplied by `scalar`, to an instant.
    pub fn add_to(self, instant: i64, scalar: i32) -> Result<i64> {
        safe_add(instant, safe_multiply(self.millis, i64::from(scalar))?)
    }

    /// Splits this duration into the precise fields of a period type, as
    /// the chronology measures them. Imprecise fields, like months, stay
    /// zero.
    pub fn to_period(self, period_type: PeriodType, chronology: &dyn Chronology) -> Result<Period> {
        Period::from_duration(self.millis, period_type, chronology)
    }
}
