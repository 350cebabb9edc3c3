//! The twelve-month model shared by calendars with Gregorian-style months:
//! February is the only month whose length varies, and it gains a day in
//! leap years.

use crate::cal::basic::{BasicCalendar, MILLIS_PER_DAY};
use crate::error::{Error, Result};
use crate::types::DateTimeFieldType;
use crate::util::{safe_add, verify_value_bounds};


const MIN_DAYS_PER_MONTH: [i32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
const MAX_DAYS_PER_MONTH: [i32; 12] = [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Days before the first of each month, in a common year and a leap year.
const MIN_DAYS_BEFORE_MONTH: [i32; 12] = days_before(MIN_DAYS_PER_MONTH);
const MAX_DAYS_BEFORE_MONTH: [i32; 12] = days_before(MAX_DAYS_PER_MONTH);

/// There are 86400000 / 1024 = 84375 of these units in a day. Measuring
/// the time since New Year in them keeps the month search in `i32`.
const UNITS_PER_DAY: i32 = 84_375;

const FEB_29: i64 = (31 + 29 - 1) * MILLIS_PER_DAY;

pub(crate) const MONTHS_PER_YEAR: i32 = 12;
const LEAP_MONTH: i32 = 2;

const fn days_before(lengths: [i32; 12]) -> [i32; 12] {
    let mut totals = [0; 12];
    let mut month = 1;
    while month < 12 {
        totals[month] = totals[month - 1] + lengths[month - 1];
        month += 1;
    }
    totals
}


impl BasicCalendar {

    pub(crate) fn max_month(&self) -> i32 {
        MONTHS_PER_YEAR
    }

    fn month_index(month: i32) -> Result<usize> {
        verify_value_bounds(DateTimeFieldType::MonthOfYear, i64::from(month), 1, i64::from(MONTHS_PER_YEAR))?;
        Ok((month - 1) as usize)
    }

    pub(crate) fn days_in_year_month(&self, year: i32, month: i32) -> Result<i32> {
        let index = Self::month_index(month)?;
        Ok(if self.is_leap_year(year) { MAX_DAYS_PER_MONTH[index] } else { MIN_DAYS_PER_MONTH[index] })
    }

    /// The longest the month can ever be.
    pub(crate) fn days_in_month_max(&self, month: i32) -> Result<i32> {
        Ok(MAX_DAYS_PER_MONTH[Self::month_index(month)?])
    }

    pub(crate) fn days_in_month_max_at(&self, instant: i64) -> Result<i32> {
        let year = self.year(instant)?;
        let month = self.month_of_year_in(instant, year);
        self.days_in_year_month(year, month)
    }

    /// The upper bound for setting the day of the month to `value`. Values
    /// every month has skip the month lookup.
    pub(crate) fn days_in_month_max_for_set(&self, instant: i64, value: i32) -> Result<i32> {
        if value > 28 || value < 1 { self.days_in_month_max_at(instant) } else { Ok(28) }
    }

    pub(crate) fn is_leap_day(&self, instant: i64) -> Result<bool> {
        let year = self.year(instant)?;
        if !self.is_leap_year(year) {
            return Ok(false);
        }
        let month = self.month_of_year_in(instant, year);
        Ok(month == LEAP_MONTH && self.day_of_month_in(instant, year, month) == 29)
    }

    /// Milliseconds from New Year to the first of the month.
    fn total_millis_by_year_month(&self, year: i32, month: i32) -> i64 {
        i64::from(self.total_days_before(year, month)) * MILLIS_PER_DAY
    }

    pub(crate) fn year_month_millis(&self, year: i32, month: i32) -> i64 {
        self.year_millis(year).saturating_add(self.total_millis_by_year_month(year, month))
    }

    pub(crate) fn year_month_day_millis(&self, year: i32, month: i32, day: i32) -> i64 {
        self.year_month_millis(year, month).saturating_add(i64::from(day - 1) * MILLIS_PER_DAY)
    }

    pub(crate) fn month_of_year(&self, instant: i64) -> Result<i32> {
        Ok(self.month_of_year_in(instant, self.year(instant)?))
    }

    /// Binary search over the month boundaries of the year.
    pub(crate) fn month_of_year_in(&self, instant: i64, year: i32) -> i32 {
        let units = ((instant - self.year_millis(year)) >> 10) as i32;
        let starts = if self.is_leap_year(year) { &MAX_DAYS_BEFORE_MONTH } else { &MIN_DAYS_BEFORE_MONTH };
        let before = |month: usize| units < starts[month - 1] * UNITS_PER_DAY;

        if before(7) {
            if before(4) {
                if before(2) { 1 } else if before(3) { 2 } else { 3 }
            }
            else if before(5) { 4 } else if before(6) { 5 } else { 6 }
        }
        else if before(10) {
            if before(8) { 7 } else if before(9) { 8 } else { 9 }
        }
        else if before(11) { 10 } else if before(12) { 11 } else { 12 }
    }

    pub(crate) fn day_of_month(&self, instant: i64) -> Result<i32> {
        let year = self.year(instant)?;
        Ok(self.day_of_month_in(instant, year, self.month_of_year_in(instant, year)))
    }

    pub(crate) fn day_of_month_in(&self, instant: i64, year: i32, month: i32) -> i32 {
        ((instant - self.year_month_millis(year, month)) / MILLIS_PER_DAY) as i32 + 1
    }

    /// The first millisecond of a date, after checking the date exists.
    pub(crate) fn date_midnight_millis(&self, year: i32, month: i32, day: i32) -> Result<i64> {
        self.verify_year(i64::from(year))?;
        let days_in_month = self.days_in_year_month(year, month)?;
        verify_value_bounds(DateTimeFieldType::DayOfMonth, i64::from(day), 1, i64::from(days_in_month))?;

        let date = safe_add(self.year_first_day(year), i64::from(self.total_days_before(year, month) + day - 1))?;
        date.checked_mul(MILLIS_PER_DAY).ok_or(Error::Overflow("date is outside the supported range"))
    }

    fn total_days_before(&self, year: i32, month: i32) -> i32 {
        let index = (month - 1) as usize;
        if self.is_leap_year(year) { MAX_DAYS_BEFORE_MONTH[index] } else { MIN_DAYS_BEFORE_MONTH[index] }
    }

    /// Moves an instant to another month of the same year, pulling the day
    /// back to the end of a shorter month.
    pub(crate) fn set_month(&self, instant: i64, month: i32) -> Result<i64> {
        verify_value_bounds(DateTimeFieldType::MonthOfYear, i64::from(month), 1, i64::from(MONTHS_PER_YEAR))?;
        let year = self.year(instant)?;
        let day = self.day_of_month_in(instant, year, self.month_of_year_in(instant, year))
                      .min(self.days_in_year_month(year, month)?);
        safe_add(self.year_month_day_millis(year, month, day), i64::from(self.millis_of_day(instant)))
    }

    /// Adds whole months, keeping the day of the month unless the target
    /// month is too short, in which case it becomes that month’s last day.
    pub(crate) fn add_months(&self, instant: i64, months: i64) -> Result<i64> {
        if months == 0 {
            return Ok(instant);
        }

        let millis_of_day = self.millis_of_day(instant);
        let this_year = self.year(instant)?;
        let this_month = self.month_of_year_in(instant, this_year);

        let month_zero = i64::from(this_month - 1).checked_add(months).ok_or(Error::Overflow("addition"))?;
        let year = i64::from(this_year).checked_add(month_zero.div_euclid(i64::from(MONTHS_PER_YEAR)))
                                       .ok_or(Error::Overflow("addition"))?;
        let year = self.verify_year(year)?;
        let month = month_zero.rem_euclid(i64::from(MONTHS_PER_YEAR)) as i32 + 1;

        let day = self.day_of_month_in(instant, this_year, this_month).min(self.days_in_year_month(year, month)?);
        safe_add(self.year_month_day_millis(year, month, day), i64::from(millis_of_day))
    }

    /// Whole months between two instants, rounded towards zero.
    ///
    /// A minuend on the last day of its month counts as a whole month from
    /// any later day in the subtrahend’s month, so that adding the result
    /// back (which clamps to month end) lands on the minuend.
    pub(crate) fn month_difference(&self, minuend: i64, subtrahend: i64) -> Result<i64> {
        if minuend < subtrahend {
            return Ok(-self.month_difference(subtrahend, minuend)?);
        }

        let minuend_year = self.year(minuend)?;
        let minuend_month = self.month_of_year_in(minuend, minuend_year);
        let subtrahend_year = self.year(subtrahend)?;
        let subtrahend_month = self.month_of_year_in(subtrahend, subtrahend_year);

        let mut difference = (i64::from(minuend_year) - i64::from(subtrahend_year)) * i64::from(MONTHS_PER_YEAR)
                           + i64::from(minuend_month) - i64::from(subtrahend_month);

        let mut subtrahend = subtrahend;
        let minuend_day = self.day_of_month_in(minuend, minuend_year, minuend_month);
        if minuend_day == self.days_in_year_month(minuend_year, minuend_month)? {
            let subtrahend_day = self.day_of_month_in(subtrahend, subtrahend_year, subtrahend_month);
            if subtrahend_day > minuend_day {
                subtrahend -= i64::from(subtrahend_day - minuend_day) * MILLIS_PER_DAY;
            }
        }

        let minuend_rem = minuend - self.year_month_millis(minuend_year, minuend_month);
        let subtrahend_rem = subtrahend - self.year_month_millis(subtrahend_year, subtrahend_month);
        if minuend_rem < subtrahend_rem {
            difference -= 1;
        }

        Ok(difference)
    }

    /// Whole years between two instants, rounded towards zero, treating
    /// February 29th as the 28th when the other year has no leap day.
    pub(crate) fn year_difference(&self, minuend: i64, subtrahend: i64) -> Result<i64> {
        if minuend < subtrahend {
            return Ok(-self.year_difference(subtrahend, minuend)?);
        }

        let minuend_year = self.year(minuend)?;
        let subtrahend_year = self.year(subtrahend)?;

        let mut minuend_rem = minuend - self.year_millis(minuend_year);
        let mut subtrahend_rem = subtrahend - self.year_millis(subtrahend_year);

        if subtrahend_rem >= FEB_29 {
            if self.is_leap_year(subtrahend_year) {
                if !self.is_leap_year(minuend_year) {
                    subtrahend_rem -= MILLIS_PER_DAY;
                }
            }
            else if minuend_rem >= FEB_29 && self.is_leap_year(minuend_year) {
                minuend_rem -= MILLIS_PER_DAY;
            }
        }

        let mut difference = i64::from(minuend_year) - i64::from(subtrahend_year);
        if minuend_rem < subtrahend_rem {
            difference -= 1;
        }
        Ok(difference)
    }
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn month_tables() {
        assert_eq!(MIN_DAYS_BEFORE_MONTH[2], 59);
        assert_eq!(MAX_DAYS_BEFORE_MONTH[2], 60);
        assert_eq!(MAX_DAYS_BEFORE_MONTH[11], 335);
        assert_eq!(MIN_DAYS_BEFORE_MONTH[11], 334);
    }
}
