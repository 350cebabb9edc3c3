//! The proleptic Gregorian calendar: the Gregorian leap-year rule applied
//! to every year, with a year zero and negative years before it.

use std::sync::Arc;

use dashmap::DashMap;
use lazy_static::lazy_static;
use log::debug;

use crate::cal::basic::{BasicCalendar, CalendarRules, MILLIS_PER_DAY};
use crate::cal::zone::{self, is_utc, ZoneRef};
use crate::cal::{basic_fields, cache, Assembly, CalendarKind, Chronology, ChronologyKey, ChronologyRef, Mode, ZonedChronology};
use crate::error::Result;
use crate::util::verify_value_bounds;


const MIN_YEAR: i32 = -292_275_054;
const MAX_YEAR: i32 = 292_278_993;

const MILLIS_PER_YEAR: i64 = 31_556_952_000;
const MILLIS_PER_MONTH: i64 = MILLIS_PER_YEAR / 12;

/// Days from 0000-01-01 to 1970-01-01.
const DAYS_0000_TO_1970: i64 = 719_527;


/// Every fourth year is a leap year, except centuries, except every fourth
/// century.
#[derive(Debug, Clone, Copy)]
pub(crate) struct GregorianRules;

impl CalendarRules for GregorianRules {
    fn is_leap_year(&self, year: i32) -> bool {
        (year & 3) == 0 && (year % 100 != 0 || year % 400 == 0)
    }

    fn first_day_of_year(&self, year: i32) -> i64 {
        let year = i64::from(year);
        let centuries = year / 100;

        let leap_years = if year < 0 {
            // +3 before shifting, because >> 2 rounds down where / 4
            // rounds towards zero
            ((year + 3) >> 2) - centuries + ((centuries + 3) >> 2) - 1
        }
        else {
            let leaps = (year >> 2) - centuries + (centuries >> 2);
            if self.is_leap_year(year as i32) { leaps - 1 } else { leaps }
        };

        year * 365 + leap_years - DAYS_0000_TO_1970
    }

    fn min_year(&self) -> i32 {
        MIN_YEAR
    }

    fn max_year(&self) -> i32 {
        MAX_YEAR
    }

    fn average_millis_per_year(&self) -> i64 {
        MILLIS_PER_YEAR
    }

    fn average_millis_per_month(&self) -> i64 {
        MILLIS_PER_MONTH
    }

    fn approx_millis_at_epoch_divided_by_two(&self) -> i64 {
        (1970 * MILLIS_PER_YEAR) / 2
    }
}


lazy_static! {
    /// The UTC instances, one per week configuration. Zoned instances are
    /// built on top of these.
    static ref UTC_INSTANCES: DashMap<u8, Arc<GregorianChronology>> = DashMap::new();
}


/// The **Gregorian calendar**, extended backwards before its introduction.
///
/// Only the UTC instance owns fields computed by the engine. An instance in
/// any other zone is assembled on a zoned view of the UTC one, and hands
/// the composite operations straight to it.
#[derive(Debug)]
pub struct GregorianChronology {
    key: ChronologyKey,
    zone: ZoneRef,
    assembly: Assembly,
    calendar: Arc<BasicCalendar>,
}

impl GregorianChronology {

    /// The Gregorian chronology in a zone, with ISO week rules.
    pub fn instance(zone: ZoneRef) -> Result<ChronologyRef> {
        GregorianChronology::instance_with(zone, 4)
    }

    /// The Gregorian chronology in a zone, where week 1 of a weekyear is
    /// the first week with at least `min_days_in_first_week` days in it.
    pub fn instance_with(zone: ZoneRef, min_days_in_first_week: u8) -> Result<ChronologyRef> {
        let key = ChronologyKey::new(CalendarKind::Gregorian, zone.id(), min_days_in_first_week, Mode::Standard);
        cache::instance(&key, zone)
    }

    pub fn instance_utc() -> Result<ChronologyRef> {
        GregorianChronology::instance(zone::utc())
    }

    /// The shared UTC instance for a week configuration.
    pub(crate) fn utc(min_days_in_first_week: u8) -> Result<Arc<GregorianChronology>> {
        if let Some(chronology) = UTC_INSTANCES.get(&min_days_in_first_week) {
            return Ok(chronology.clone());
        }

        let calendar = Arc::new(BasicCalendar::new(Box::new(GregorianRules), i32::from(min_days_in_first_week))?);
        let assembly = Assembly::new(None, |set| basic_fields::assemble(set, &calendar))?;
        let key = ChronologyKey::new(CalendarKind::Gregorian, "UTC", min_days_in_first_week, Mode::Standard);
        let chronology = Arc::new(GregorianChronology { key, zone: zone::utc(), assembly, calendar });

        debug!("Assembled Gregorian UTC chronology with {} min days in first week", min_days_in_first_week);
        Ok(UTC_INSTANCES.entry(min_days_in_first_week).or_insert(chronology).clone())
    }

    /// Builds the instance for a zone, sharing the UTC engine.
    pub(crate) fn build(zone: ZoneRef, min_days_in_first_week: u8) -> Result<ChronologyRef> {
        let utc = GregorianChronology::utc(min_days_in_first_week)?;
        if is_utc(&*zone) {
            return Ok(utc as ChronologyRef);
        }

        let zoned: ChronologyRef = Arc::new(ZonedChronology::new(utc.clone(), zone.clone())?);
        let assembly = Assembly::new(Some(zoned), |_| Ok(()))?;
        let key = utc.key.with_zone(zone.id());
        Ok(Arc::new(GregorianChronology { key, zone, assembly, calendar: utc.calendar.clone() }))
    }

    pub fn min_days_in_first_week(&self) -> i32 {
        self.calendar.min_days_in_first_week()
    }

    pub fn is_leap_year(&self, year: i32) -> bool {
        self.calendar.is_leap_year(year)
    }

    /// 365 or 366.
    pub fn days_in_year(&self, year: i32) -> i32 {
        self.calendar.days_in_year(year)
    }

    pub fn days_in_year_month(&self, year: i32, month_of_year: i32) -> Result<i32> {
        self.calendar.days_in_year_month(year, month_of_year)
    }

    /// 52 or 53, depending on the week configuration.
    pub fn weeks_in_year(&self, weekyear: i32) -> i32 {
        self.calendar.weeks_in_year(weekyear)
    }

    pub fn min_year(&self) -> i32 {
        self.calendar.min_year()
    }

    pub fn max_year(&self) -> i32 {
        self.calendar.max_year()
    }
}

impl Chronology for GregorianChronology {
    fn key(&self) -> ChronologyKey {
        self.key.clone()
    }

    fn zone(&self) -> &ZoneRef {
        &self.zone
    }

    fn assembly(&self) -> &Assembly {
        &self.assembly
    }

    fn date_time_millis(&self, year: i32, month_of_year: i32, day_of_month: i32, millis_of_day: i32) -> Result<i64> {
        if let Some(base) = self.assembly.base() {
            return base.date_time_millis(year, month_of_year, day_of_month, millis_of_day);
        }

        use crate::types::DateTimeFieldType::MillisOfDay;
        verify_value_bounds(MillisOfDay, i64::from(millis_of_day), 0, MILLIS_PER_DAY - 1)?;
        let midnight = self.calendar.date_midnight_millis(year, month_of_year, day_of_month)?;
        crate::util::safe_add(midnight, i64::from(millis_of_day))
    }

    fn date_time_millis_hms(&self, year: i32, month_of_year: i32, day_of_month: i32,
                            hour_of_day: i32, minute_of_hour: i32, second_of_minute: i32, millis_of_second: i32) -> Result<i64> {
        if let Some(base) = self.assembly.base() {
            return base.date_time_millis_hms(year, month_of_year, day_of_month, hour_of_day, minute_of_hour, second_of_minute, millis_of_second);
        }

        use crate::types::DateTimeFieldType::*;
        verify_value_bounds(HourOfDay, i64::from(hour_of_day), 0, 23)?;
        verify_value_bounds(MinuteOfHour, i64::from(minute_of_hour), 0, 59)?;
        verify_value_bounds(SecondOfMinute, i64::from(second_of_minute), 0, 59)?;
        verify_value_bounds(MillisOfSecond, i64::from(millis_of_second), 0, 999)?;

        let millis_of_day = hour_of_day * 3_600_000 + minute_of_hour * 60_000 + second_of_minute * 1000 + millis_of_second;
        self.date_time_millis(year, month_of_year, day_of_month, millis_of_day)
    }
}
