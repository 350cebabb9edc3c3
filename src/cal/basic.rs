//! The year/month/day engine shared by every calendar system with years,
//! months, days, and leap years.
//!
//! A calendar supplies its leap-year rule, where each year starts, and a
//! few average unit lengths through [`CalendarRules`]; everything else
//! (finding the year an instant falls in, day-of-week, weeks and
//! weekyears) is computed here. The month model lives in `basic_gj`.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{Error, Result};
use crate::types::DateTimeFieldType;
use crate::util::{safe_add, safe_multiply, safe_subtract, safe_to_int, verify_value_bounds};


pub(crate) const MILLIS_PER_SECOND: i64 = 1000;
pub(crate) const MILLIS_PER_MINUTE: i64 = 60 * MILLIS_PER_SECOND;
pub(crate) const MILLIS_PER_HOUR: i64 = 60 * MILLIS_PER_MINUTE;
pub(crate) const MILLIS_PER_DAY: i64 = 24 * MILLIS_PER_HOUR;
pub(crate) const MILLIS_PER_WEEK: i64 = 7 * MILLIS_PER_DAY;


/// The parts of a calendar system the engine cannot work out for itself.
pub(crate) trait CalendarRules: fmt::Debug + Send + Sync {

    fn is_leap_year(&self, year: i32) -> bool;

    /// The day, counted from 1970-01-01, on which the year begins.
    fn first_day_of_year(&self, year: i32) -> i64;

    fn min_year(&self) -> i32;
    fn max_year(&self) -> i32;

    fn average_millis_per_year(&self) -> i64;
    fn average_millis_per_month(&self) -> i64;

    /// Roughly how far the epoch is from the start of year zero, halved.
    fn approx_millis_at_epoch_divided_by_two(&self) -> i64;
}


/// The engine itself: calendar rules, the week configuration, and a cache
/// of where each year begins.
pub(crate) struct BasicCalendar {
    rules: Box<dyn CalendarRules>,
    min_days_in_first_week: i32,
    min_instant: i64,
    cache: YearCache,
}

impl BasicCalendar {
    pub(crate) fn new(rules: Box<dyn CalendarRules>, min_days_in_first_week: i32) -> Result<BasicCalendar> {
        verify_value_bounds(DateTimeFieldType::DayOfWeek, i64::from(min_days_in_first_week), 1, 7)
            .map_err(|_| Error::invalid(format!("Invalid min days in first week: {}", min_days_in_first_week)))?;

        let min_instant = rules.first_day_of_year(rules.min_year()) * MILLIS_PER_DAY;
        Ok(BasicCalendar { rules, min_days_in_first_week, min_instant, cache: YearCache::new() })
    }

    pub(crate) fn min_days_in_first_week(&self) -> i32 {
        self.min_days_in_first_week
    }

    pub(crate) fn min_year(&self) -> i32 {
        self.rules.min_year()
    }

    pub(crate) fn max_year(&self) -> i32 {
        self.rules.max_year()
    }

    pub(crate) fn is_leap_year(&self, year: i32) -> bool {
        self.rules.is_leap_year(year)
    }

    pub(crate) fn average_millis_per_year(&self) -> i64 {
        self.rules.average_millis_per_year()
    }

    pub(crate) fn average_millis_per_month(&self) -> i64 {
        self.rules.average_millis_per_month()
    }

    pub(crate) fn days_in_year(&self, year: i32) -> i32 {
        if self.is_leap_year(year) { 366 } else { 365 }
    }

    pub(crate) fn days_in_year_max(&self) -> i32 {
        366
    }

    /// Fails unless the year is one this calendar can represent.
    pub(crate) fn verify_year(&self, year: i64) -> Result<i32> {
        verify_value_bounds(DateTimeFieldType::Year, year, i64::from(self.min_year()), i64::from(self.max_year()))?;
        Ok(year as i32)
    }


    // ---- years ----

    /// The first millisecond of the year. Years far outside the supported
    /// range saturate rather than wrap.
    pub(crate) fn year_millis(&self, year: i32) -> i64 {
        self.year_first_day(year).saturating_mul(MILLIS_PER_DAY)
    }

    /// The day, counted from 1970-01-01, on which the year begins.
    pub(crate) fn year_first_day(&self, year: i32) -> i64 {
        if let Some(day) = self.cache.get(year) {
            return day;
        }

        let day = self.rules.first_day_of_year(year);
        self.cache.put(year, day);
        day
    }

    /// The year an instant falls in.
    pub(crate) fn year(&self, instant: i64) -> Result<i32> {
        if instant < self.min_instant {
            return Err(Error::Overflow("instant is before the first supported year"));
        }

        // Get an initial estimate of the year, and the millisecond value
        // that represents the start of that year. Then verify estimate and
        // fix if necessary. Halving everything keeps the sum in range.
        let unit = self.rules.average_millis_per_year() / 2;
        let mut i2 = (instant >> 1) + self.rules.approx_millis_at_epoch_divided_by_two();
        if i2 < 0 {
            i2 = i2 - unit + 1;
        }

        let estimate = (i2 / unit).clamp(i64::from(self.min_year()), i64::from(self.max_year()) + 1);
        let mut year = estimate as i32;
        let year_start = self.year_millis(year);
        let diff = instant - year_start;

        if diff < 0 {
            year -= 1;
        }
        else if diff >= MILLIS_PER_DAY * 365 {
            // one year may need to be added to fix the estimate
            let one_year = i64::from(self.days_in_year(year)) * MILLIS_PER_DAY;
            if year_start.checked_add(one_year).map_or(false, |next| next <= instant) {
                year += 1;
            }
        }

        Ok(year)
    }

    /// Moves an instant to another year, keeping the day of the year (with
    /// February 29th folded onto the 28th) and the time of day.
    pub(crate) fn set_year(&self, instant: i64, year: i32) -> Result<i64> {
        let this_year = self.year(instant)?;
        let mut day_of_year = self.day_of_year_in(instant, this_year);
        let millis_of_day = self.millis_of_day(instant);

        if day_of_year > 31 + 28 {
            if self.is_leap_year(this_year) {
                // Feb 29 or later; Feb 29 does not exist in the target year
                if !self.is_leap_year(year) {
                    day_of_year -= 1;
                }
            }
            else if self.is_leap_year(year) {
                // Mar 1 or later; account for the target year’s Feb 29
                day_of_year += 1;
            }
        }

        let date = safe_add(self.year_millis(year), i64::from(day_of_year - 1) * MILLIS_PER_DAY)?;
        safe_add(date, i64::from(millis_of_day))
    }

    /// Adds whole years, keeping the month, day, and time where possible.
    pub(crate) fn add_years(&self, instant: i64, years: i64) -> Result<i64> {
        if years == 0 {
            return Ok(instant);
        }

        let target = i64::from(self.year(instant)?).checked_add(years).ok_or(Error::Overflow("addition"))?;
        let target = self.verify_year(target)?;
        self.set_year(instant, target)
    }


    // ---- days ----

    pub(crate) fn day_of_year(&self, instant: i64) -> Result<i32> {
        Ok(self.day_of_year_in(instant, self.year(instant)?))
    }

    pub(crate) fn day_of_year_in(&self, instant: i64, year: i32) -> i32 {
        ((instant - self.year_millis(year)) / MILLIS_PER_DAY) as i32 + 1
    }

    /// ISO day of the week, where Monday is 1 and Sunday is 7.
    pub(crate) fn day_of_week(&self, instant: i64) -> i32 {
        // 1970-01-01 was a Thursday
        1 + (instant.div_euclid(MILLIS_PER_DAY) + 3).rem_euclid(7) as i32
    }

    pub(crate) fn millis_of_day(&self, instant: i64) -> i32 {
        instant.rem_euclid(MILLIS_PER_DAY) as i32
    }

    /// Moves an instant by whole days to the given day of the week.
    pub(crate) fn set_day_of_week(&self, instant: i64, day_of_week: i32) -> Result<i64> {
        let delta = i64::from(day_of_week - self.day_of_week(instant));
        safe_add(instant, delta * MILLIS_PER_DAY)
    }


    // ---- weeks ----

    /// The first millisecond of week 1 of the weekyear.
    pub(crate) fn first_week_of_year_millis(&self, year: i32) -> i64 {
        let jan1 = self.year_millis(year);
        let jan1_day_of_week = self.day_of_week(jan1);

        if jan1_day_of_week > 8 - self.min_days_in_first_week {
            // too few days: week 1 starts in the following week
            jan1.saturating_add(i64::from(8 - jan1_day_of_week) * MILLIS_PER_DAY)
        }
        else {
            // enough days: week 1 starts in the previous year
            jan1.saturating_sub(i64::from(jan1_day_of_week - 1) * MILLIS_PER_DAY)
        }
    }

    /// 52 or 53.
    pub(crate) fn weeks_in_year(&self, year: i32) -> i32 {
        let first = self.first_week_of_year_millis(year);
        let next = self.first_week_of_year_millis(year.saturating_add(1));
        (next.saturating_sub(first) / MILLIS_PER_WEEK) as i32
    }

    pub(crate) fn week_of_weekyear(&self, instant: i64) -> Result<i32> {
        self.week_of_weekyear_in(instant, self.year(instant)?)
    }

    /// Fails once the start of the following weekyear is past the end of
    /// the millisecond range, as the week can no longer be bounded.
    pub(crate) fn week_of_weekyear_in(&self, instant: i64, year: i32) -> Result<i32> {
        let first = self.checked_first_week_of_year_millis(year)?;
        if instant < first {
            return Ok(self.weeks_in_year(year - 1));
        }

        let next_year = year.checked_add(1).ok_or(Error::Overflow("addition"))?;
        let next = self.checked_first_week_of_year_millis(next_year)?;
        if instant >= next {
            return Ok(1);
        }

        Ok(((instant - first) / MILLIS_PER_WEEK) as i32 + 1)
    }

    fn checked_first_week_of_year_millis(&self, year: i32) -> Result<i64> {
        let jan1 = safe_multiply(self.year_first_day(year), MILLIS_PER_DAY)?;
        let jan1_day_of_week = self.day_of_week(jan1);

        if jan1_day_of_week > 8 - self.min_days_in_first_week {
            safe_add(jan1, i64::from(8 - jan1_day_of_week) * MILLIS_PER_DAY)
        }
        else {
            safe_subtract(jan1, i64::from(jan1_day_of_week - 1) * MILLIS_PER_DAY)
        }
    }

    /// The year the instant’s week belongs to, which near New Year can be
    /// the adjacent calendar year.
    pub(crate) fn weekyear(&self, instant: i64) -> Result<i32> {
        let year = self.year(instant)?;
        match self.week_of_weekyear_in(instant, year)? {
            1            => self.year(instant.saturating_add(MILLIS_PER_WEEK)),
            w if w > 51  => self.year(instant.saturating_sub(2 * MILLIS_PER_WEEK)),
            _            => Ok(year),
        }
    }

    /// The first millisecond of the week containing the instant.
    pub(crate) fn week_floor(&self, instant: i64) -> Result<i64> {
        // weeks start on Monday, and 1970-01-01 was a Thursday
        let shifted = safe_add(instant, 3 * MILLIS_PER_DAY)?;
        let monday = safe_subtract(shifted, shifted.rem_euclid(MILLIS_PER_WEEK))?;
        safe_subtract(monday, 3 * MILLIS_PER_DAY)
    }

    /// Moves an instant to another weekyear, keeping the week number (up to
    /// the number of weeks in the target) and the day of the week.
    pub(crate) fn set_weekyear(&self, instant: i64, weekyear: i32) -> Result<i64> {
        verify_value_bounds(DateTimeFieldType::Weekyear, i64::from(weekyear), i64::from(self.min_year()), i64::from(self.max_year()))?;

        let this_weekyear = self.weekyear(instant)?;
        if this_weekyear == weekyear {
            return Ok(instant);
        }

        let this_day_of_week = self.day_of_week(instant);
        let max_weeks = self.weeks_in_year(this_weekyear).min(self.weeks_in_year(weekyear));
        let week = self.week_of_weekyear(instant)?.min(max_weeks);

        // setting the calendar year gets within one week of the right weekyear
        let mut work = self.set_year(instant, weekyear)?;
        let work_weekyear = self.weekyear(work)?;
        if work_weekyear < weekyear {
            work = safe_add(work, MILLIS_PER_WEEK)?;
        }
        else if work_weekyear > weekyear {
            work = safe_add(work, -MILLIS_PER_WEEK)?;
        }

        let current_week = self.week_of_weekyear(work)?;
        work = safe_add(work, i64::from(week - current_week) * MILLIS_PER_WEEK)?;
        self.set_day_of_week(work, this_day_of_week)
    }

    pub(crate) fn add_weekyears(&self, instant: i64, weekyears: i64) -> Result<i64> {
        if weekyears == 0 {
            return Ok(instant);
        }

        let target = i64::from(self.weekyear(instant)?).checked_add(weekyears).ok_or(Error::Overflow("addition"))?;
        self.set_weekyear(instant, safe_to_int(target)?)
    }

    /// The first millisecond of week 1 of the instant’s weekyear.
    pub(crate) fn weekyear_floor(&self, instant: i64) -> Result<i64> {
        let floor = self.week_floor(instant)?;
        let week = self.week_of_weekyear(floor)?;
        safe_add(floor, -i64::from(week - 1) * MILLIS_PER_WEEK)
    }

    /// Whole weekyears between two instants, rounded towards zero.
    pub(crate) fn weekyear_difference(&self, minuend: i64, subtrahend: i64) -> Result<i64> {
        if minuend < subtrahend {
            return Ok(-self.weekyear_difference(subtrahend, minuend)?);
        }

        const WEEK_53: i64 = 52 * MILLIS_PER_WEEK;

        let minuend_weekyear = self.weekyear(minuend)?;
        let subtrahend_weekyear = self.weekyear(subtrahend)?;
        let minuend_rem = minuend - self.weekyear_floor(minuend)?;
        let mut subtrahend_rem = subtrahend - self.weekyear_floor(subtrahend)?;

        // balance week 53 against weekyears that only have 52
        if subtrahend_rem >= WEEK_53 && self.weeks_in_year(minuend_weekyear) <= 52 {
            subtrahend_rem -= MILLIS_PER_WEEK;
        }

        let mut difference = i64::from(minuend_weekyear) - i64::from(subtrahend_weekyear);
        if minuend_rem < subtrahend_rem {
            difference -= 1;
        }
        Ok(difference)
    }
}

impl fmt::Debug for BasicCalendar {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("BasicCalendar")
         .field("rules", &self.rules)
         .field("min_days_in_first_week", &self.min_days_in_first_week)
         .finish()
    }
}


const CACHE_SIZE: usize = 1 << 10;
const CACHE_MASK: usize = CACHE_SIZE - 1;

const DAY_BITS: u32 = 40;
const DAY_MASK: u64 = (1 << DAY_BITS) - 1;
const DAY_BIAS: i64 = 1 << (DAY_BITS - 1);
const TAG_BIAS: i64 = 1 << 23;

/// A fixed-size, lock-free cache of the day each year starts on.
///
/// Each slot packs the upper bits of the year (the lower ten bits pick the
/// slot) together with the biased day number into one atomic word, so a
/// reader sees either a whole entry or an empty one. Two threads racing to
/// fill a slot write the same value.
struct YearCache {
    slots: Box<[AtomicU64]>,
}

impl YearCache {
    fn new() -> YearCache {
        YearCache { slots: (0 .. CACHE_SIZE).map(|_| AtomicU64::new(0)).collect() }
    }

    fn slot(year: i32) -> usize {
        (year as usize) & CACHE_MASK
    }

    fn tag(year: i32) -> u64 {
        // always non-zero, so an empty slot never matches
        (i64::from(year >> 10) + TAG_BIAS) as u64
    }

    fn get(&self, year: i32) -> Option<i64> {
        let packed = self.slots[Self::slot(year)].load(Ordering::Relaxed);
        if packed >> DAY_BITS == Self::tag(year) {
            Some((packed & DAY_MASK) as i64 - DAY_BIAS)
        }
        else {
            None
        }
    }

    fn put(&self, year: i32, day: i64) {
        let biased = day + DAY_BIAS;
        if biased >= 0 && (biased as u64) <= DAY_MASK {
            let packed = (Self::tag(year) << DAY_BITS) | biased as u64;
            self.slots[Self::slot(year)].store(packed, Ordering::Relaxed);
        }
    }
}


#[cfg(test)]
mod test {
    use super::*;

    mod cache {
        use super::*;

        #[test]
        fn stores_negative_days() {
            let cache = YearCache::new();
            cache.put(-44, -736_000);
            assert_eq!(cache.get(-44), Some(-736_000));
        }

        #[test]
        fn colliding_years_miss() {
            let cache = YearCache::new();
            cache.put(1970, 0);
            assert_eq!(cache.get(1970 + CACHE_SIZE as i32), None);
            assert_eq!(cache.get(1970), Some(0));
        }

        #[test]
        fn empty_slot_misses() {
            assert_eq!(YearCache::new().get(0), None);
        }
    }

    mod weeks {
        use super::*;
        use crate::cal::{Chronology, GregorianChronology};
        use crate::field::DateTimeField;

        #[test]
        fn floor_before_the_first_week() {
            let chronology = GregorianChronology::instance_utc().unwrap();
            assert!(chronology.weekyear().round_floor(i64::MIN).unwrap_err().is_overflow());
            assert!(chronology.week_of_weekyear().round_floor(i64::MIN + 1).unwrap_err().is_overflow());
        }

        #[test]
        fn unbounded_last_week() {
            let chronology = GregorianChronology::instance_utc().unwrap();
            let field = chronology.week_of_weekyear();
            assert!(field.get(i64::MAX).unwrap_err().is_overflow());
            assert!(field.get(i64::MAX - 1).unwrap_err().is_overflow());
        }

        #[test]
        fn ordinary_weeks_still_count() {
            let chronology = GregorianChronology::instance_utc().unwrap();
            // 2005-01-01 is in the 53rd week of 2004
            assert_eq!(chronology.week_of_weekyear().get(1_104_537_600_000), Ok(53));
            assert_eq!(chronology.weekyear().get(1_104_537_600_000), Ok(2004));
        }
    }
}
