//! The calendar fields backed by a `BasicCalendar`, and the assembly of a
//! complete field table around one.

use std::sync::Arc;

use crate::cal::basic::{BasicCalendar, MILLIS_PER_DAY, MILLIS_PER_HOUR, MILLIS_PER_MINUTE, MILLIS_PER_SECOND, MILLIS_PER_WEEK};
use crate::cal::basic_gj::MONTHS_PER_YEAR;
use crate::cal::FieldSet;
use crate::error::Result;
use crate::field::{add_partial_carrying, DateTimeField, DateTimeFieldRef, DividedDateTimeField, DurationField,
                   DurationFieldRef, MillisDurationField, OffsetDateTimeField, PreciseDateTimeField, PreciseDurationField,
                   PreciseUnit, RemainderDateTimeField, UnsupportedDurationField, ZeroIsMaxDateTimeField};
use crate::partial::Partial;
use crate::types::{DateTimeFieldType, DurationFieldType};
use crate::util::{safe_add, safe_subtract, verify_value_bounds, wrapped_value};


/// Which of the engine’s variable-length units a duration field counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CalendarUnit {
    Years,
    Months,
    Weekyears,
}

/// Years, months, or weekyears: units whose length depends on where they
/// start, so conversions go through the engine’s add and difference.
#[derive(Debug)]
pub(crate) struct CalendarDurationField {
    unit: CalendarUnit,
    calendar: Arc<BasicCalendar>,
}

impl CalendarDurationField {
    fn new(unit: CalendarUnit, calendar: Arc<BasicCalendar>) -> CalendarDurationField {
        CalendarDurationField { unit, calendar }
    }
}

impl DurationField for CalendarDurationField {
    fn field_type(&self) -> DurationFieldType {
        match self.unit {
            CalendarUnit::Years      => DurationFieldType::Years,
            CalendarUnit::Months     => DurationFieldType::Months,
            CalendarUnit::Weekyears  => DurationFieldType::Weekyears,
        }
    }

    fn is_precise(&self) -> bool {
        false
    }

    fn unit_millis(&self) -> i64 {
        match self.unit {
            CalendarUnit::Months  => self.calendar.average_millis_per_month(),
            _                     => self.calendar.average_millis_per_year(),
        }
    }

    fn value_as_long_at(&self, duration: i64, instant: i64) -> Result<i64> {
        self.difference_as_long(safe_add(instant, duration)?, instant)
    }

    fn millis_at(&self, value: i64, instant: i64) -> Result<i64> {
        safe_subtract(self.add(instant, value)?, instant)
    }

    fn add(&self, instant: i64, value: i64) -> Result<i64> {
        match self.unit {
            CalendarUnit::Years      => self.calendar.add_years(instant, value),
            CalendarUnit::Months     => self.calendar.add_months(instant, value),
            CalendarUnit::Weekyears  => self.calendar.add_weekyears(instant, value),
        }
    }

    fn difference_as_long(&self, minuend: i64, subtrahend: i64) -> Result<i64> {
        match self.unit {
            CalendarUnit::Years      => self.calendar.year_difference(minuend, subtrahend),
            CalendarUnit::Months     => self.calendar.month_difference(minuend, subtrahend),
            CalendarUnit::Weekyears  => self.calendar.weekyear_difference(minuend, subtrahend),
        }
    }
}


/// The proleptic year, which can be zero or negative.
#[derive(Debug)]
struct YearField {
    calendar: Arc<BasicCalendar>,
    years: DurationFieldRef,
    days: DurationFieldRef,
}

impl DateTimeField for YearField {
    fn field_type(&self) -> DateTimeFieldType {
        DateTimeFieldType::Year
    }

    fn get(&self, instant: i64) -> Result<i32> {
        self.calendar.year(instant)
    }

    fn set(&self, instant: i64, value: i32) -> Result<i64> {
        let year = self.calendar.verify_year(i64::from(value))?;
        self.calendar.set_year(instant, year)
    }

    fn add_wrap_field(&self, instant: i64, value: i32) -> Result<i64> {
        if value == 0 {
            return Ok(instant);
        }
        let year = wrapped_value(self.get(instant)?, value, self.calendar.min_year(), self.calendar.max_year())?;
        self.set(instant, year)
    }

    fn duration_field(&self) -> &dyn DurationField {
        &*self.years
    }

    fn range_duration_field(&self) -> Option<&dyn DurationField> {
        None
    }

    fn leap_duration_field(&self) -> Option<&dyn DurationField> {
        Some(&*self.days)
    }

    fn is_leap(&self, instant: i64) -> Result<bool> {
        Ok(self.calendar.is_leap_year(self.get(instant)?))
    }

    fn leap_amount(&self, instant: i64) -> Result<i32> {
        Ok(if self.is_leap(instant)? { 1 } else { 0 })
    }

    fn minimum_value(&self) -> Result<i32> {
        Ok(self.calendar.min_year())
    }

    fn maximum_value(&self) -> Result<i32> {
        Ok(self.calendar.max_year())
    }

    fn round_floor(&self, instant: i64) -> Result<i64> {
        Ok(self.calendar.year_millis(self.get(instant)?))
    }

    fn round_ceiling(&self, instant: i64) -> Result<i64> {
        let year = self.get(instant)?;
        let start = self.calendar.year_millis(year);
        if start == instant { Ok(instant) } else { Ok(self.calendar.year_millis(year + 1)) }
    }
}


/// The year counted within its era: 1 BCE is the year before 1 CE, and
/// there is no year zero.
#[derive(Debug)]
struct YearOfEraField {
    year: DateTimeFieldRef,
    calendar: Arc<BasicCalendar>,
    eras: DurationFieldRef,
}

impl DateTimeField for YearOfEraField {
    fn field_type(&self) -> DateTimeFieldType {
        DateTimeFieldType::YearOfEra
    }

    fn get(&self, instant: i64) -> Result<i32> {
        let year = self.year.get(instant)?;
        Ok(if year <= 0 { 1 - year } else { year })
    }

    fn set(&self, instant: i64, value: i32) -> Result<i64> {
        verify_value_bounds(DateTimeFieldType::YearOfEra, i64::from(value), 1, i64::from(self.maximum_value()?))?;
        let year = if self.calendar.year(instant)? <= 0 { 1 - value } else { value };
        self.year.set(instant, year)
    }

    fn add(&self, instant: i64, value: i64) -> Result<i64> {
        self.year.add(instant, value)
    }

    fn add_wrap_field(&self, instant: i64, value: i32) -> Result<i64> {
        self.year.add_wrap_field(instant, value)
    }

    fn duration_field(&self) -> &dyn DurationField {
        self.year.duration_field()
    }

    fn range_duration_field(&self) -> Option<&dyn DurationField> {
        Some(&*self.eras)
    }

    fn minimum_value(&self) -> Result<i32> {
        Ok(1)
    }

    fn maximum_value(&self) -> Result<i32> {
        self.year.maximum_value()
    }

    fn round_floor(&self, instant: i64) -> Result<i64> {
        self.year.round_floor(instant)
    }

    fn round_ceiling(&self, instant: i64) -> Result<i64> {
        self.year.round_ceiling(instant)
    }
}


const BCE: i32 = 0;
const CE: i32 = 1;

/// BCE (0) or CE (1). Eras have no length, so they cannot be added.
#[derive(Debug)]
struct EraField {
    calendar: Arc<BasicCalendar>,
    eras: DurationFieldRef,
}

impl DateTimeField for EraField {
    fn field_type(&self) -> DateTimeFieldType {
        DateTimeFieldType::Era
    }

    fn get(&self, instant: i64) -> Result<i32> {
        Ok(if self.calendar.year(instant)? <= 0 { BCE } else { CE })
    }

    fn set(&self, instant: i64, value: i32) -> Result<i64> {
        verify_value_bounds(DateTimeFieldType::Era, i64::from(value), i64::from(BCE), i64::from(CE))?;
        if self.get(instant)? == value {
            return Ok(instant);
        }

        // mirror the year across the era boundary: 1 BCE is year 0
        let year = self.calendar.year(instant)?;
        self.calendar.set_year(instant, 1 - year)
    }

    fn duration_field(&self) -> &dyn DurationField {
        &*self.eras
    }

    fn range_duration_field(&self) -> Option<&dyn DurationField> {
        None
    }

    fn minimum_value(&self) -> Result<i32> {
        Ok(BCE)
    }

    fn maximum_value(&self) -> Result<i32> {
        Ok(CE)
    }

    fn round_floor(&self, instant: i64) -> Result<i64> {
        if self.get(instant)? == CE { Ok(self.calendar.year_millis(1)) } else { Ok(i64::MIN) }
    }

    fn round_ceiling(&self, instant: i64) -> Result<i64> {
        if self.get(instant)? == BCE { Ok(self.calendar.year_millis(1)) } else { Ok(i64::MAX) }
    }

    // an era has no midpoint
    fn round_half_floor(&self, instant: i64) -> Result<i64> {
        self.round_floor(instant)
    }

    fn round_half_ceiling(&self, instant: i64) -> Result<i64> {
        self.round_floor(instant)
    }

    fn round_half_even(&self, instant: i64) -> Result<i64> {
        self.round_floor(instant)
    }
}


#[derive(Debug)]
struct MonthOfYearField {
    calendar: Arc<BasicCalendar>,
    months: DurationFieldRef,
    years: DurationFieldRef,
    days: DurationFieldRef,
}

impl DateTimeField for MonthOfYearField {
    fn field_type(&self) -> DateTimeFieldType {
        DateTimeFieldType::MonthOfYear
    }

    fn get(&self, instant: i64) -> Result<i32> {
        self.calendar.month_of_year(instant)
    }

    fn set(&self, instant: i64, value: i32) -> Result<i64> {
        self.calendar.set_month(instant, value)
    }

    fn add_wrap_field(&self, instant: i64, value: i32) -> Result<i64> {
        let month = wrapped_value(self.get(instant)?, value, 1, MONTHS_PER_YEAR)?;
        self.set(instant, month)
    }

    fn duration_field(&self) -> &dyn DurationField {
        &*self.months
    }

    fn range_duration_field(&self) -> Option<&dyn DurationField> {
        Some(&*self.years)
    }

    fn leap_duration_field(&self) -> Option<&dyn DurationField> {
        Some(&*self.days)
    }

    /// February in a leap year.
    fn is_leap(&self, instant: i64) -> Result<bool> {
        let year = self.calendar.year(instant)?;
        Ok(self.calendar.is_leap_year(year) && self.calendar.month_of_year_in(instant, year) == 2)
    }

    fn leap_amount(&self, instant: i64) -> Result<i32> {
        Ok(if self.is_leap(instant)? { 1 } else { 0 })
    }

    fn minimum_value(&self) -> Result<i32> {
        Ok(1)
    }

    fn maximum_value(&self) -> Result<i32> {
        Ok(self.calendar.max_month())
    }

    fn round_floor(&self, instant: i64) -> Result<i64> {
        let year = self.calendar.year(instant)?;
        Ok(self.calendar.year_month_millis(year, self.calendar.month_of_year_in(instant, year)))
    }

    /// Adding months to a partial that holds a whole date goes through a
    /// real instant, so that 2004-02-29 plus 48 months is 2008-02-29 and
    /// not the 28th. A partial led by the month simply wraps it.
    fn add_partial(&self, partial: &Partial, index: usize, values: &mut [i32], amount: i32) -> Result<()> {
        if amount == 0 {
            return Ok(());
        }

        if index == 0 && partial.field_types().first() == Some(&DateTimeFieldType::MonthOfYear) {
            let month = (values[0] - 1 + amount.rem_euclid(MONTHS_PER_YEAR)).rem_euclid(MONTHS_PER_YEAR) + 1;
            return self.set_partial(partial, 0, values, month);
        }

        if partial.is_contiguous() {
            let mut instant = 0;
            for (i, value) in values.iter().enumerate() {
                instant = partial.field(i).set(instant, *value)?;
            }

            let instant = self.add(instant, i64::from(amount))?;
            for (i, value) in values.iter_mut().enumerate() {
                *value = partial.field(i).get(instant)?;
            }
            return Ok(());
        }

        add_partial_carrying(self, partial, index, values, amount, false)
    }
}


/// Shared by the day and week fields: a precise unit inside an imprecise
/// range, counted from one.
#[derive(Debug)]
struct OneBased {
    unit: PreciseUnit,
    unit_field: DurationFieldRef,
    range_field: DurationFieldRef,
}

impl OneBased {
    fn new(unit_field: DurationFieldRef, range_field: DurationFieldRef) -> Result<OneBased> {
        Ok(OneBased { unit: PreciseUnit::new(unit_field.unit_millis())?, unit_field, range_field })
    }
}


#[derive(Debug)]
struct DayOfMonthField {
    calendar: Arc<BasicCalendar>,
    base: OneBased,
}

impl DateTimeField for DayOfMonthField {
    fn field_type(&self) -> DateTimeFieldType {
        DateTimeFieldType::DayOfMonth
    }

    fn get(&self, instant: i64) -> Result<i32> {
        self.calendar.day_of_month(instant)
    }

    fn set(&self, instant: i64, value: i32) -> Result<i64> {
        let max = self.calendar.days_in_month_max_for_set(instant, value)?;
        verify_value_bounds(DateTimeFieldType::DayOfMonth, i64::from(value), 1, i64::from(max))?;
        self.base.unit.shift(instant, self.get(instant)?, value)
    }

    fn duration_field(&self) -> &dyn DurationField {
        &*self.base.unit_field
    }

    fn range_duration_field(&self) -> Option<&dyn DurationField> {
        Some(&*self.base.range_field)
    }

    fn is_leap(&self, instant: i64) -> Result<bool> {
        self.calendar.is_leap_day(instant)
    }

    fn minimum_value(&self) -> Result<i32> {
        Ok(1)
    }

    fn maximum_value(&self) -> Result<i32> {
        Ok(31)
    }

    fn maximum_value_at(&self, instant: i64) -> Result<i32> {
        self.calendar.days_in_month_max_at(instant)
    }

    /// The length of the partial’s month, if it has one, in the partial’s
    /// year, if it has one.
    fn maximum_value_for(&self, partial: &Partial, values: &[i32]) -> Result<i32> {
        match partial.index_of(DateTimeFieldType::MonthOfYear) {
            Some(month) => match partial.index_of(DateTimeFieldType::Year) {
                Some(year)  => self.calendar.days_in_year_month(values[year], values[month]),
                None        => self.calendar.days_in_month_max(values[month]),
            },
            None => self.maximum_value(),
        }
    }

    fn round_floor(&self, instant: i64) -> Result<i64> {
        self.base.unit.floor(instant)
    }

    fn round_ceiling(&self, instant: i64) -> Result<i64> {
        self.base.unit.ceiling(instant)
    }

    fn remainder(&self, instant: i64) -> Result<i64> {
        Ok(self.base.unit.remainder(instant))
    }
}


#[derive(Debug)]
struct DayOfYearField {
    calendar: Arc<BasicCalendar>,
    base: OneBased,
}

impl DateTimeField for DayOfYearField {
    fn field_type(&self) -> DateTimeFieldType {
        DateTimeFieldType::DayOfYear
    }

    fn get(&self, instant: i64) -> Result<i32> {
        self.calendar.day_of_year(instant)
    }

    fn set(&self, instant: i64, value: i32) -> Result<i64> {
        let common = self.calendar.days_in_year_max() - 1;
        let max = if value > common || value < 1 { self.maximum_value_at(instant)? } else { common };
        verify_value_bounds(DateTimeFieldType::DayOfYear, i64::from(value), 1, i64::from(max))?;
        self.base.unit.shift(instant, self.get(instant)?, value)
    }

    fn duration_field(&self) -> &dyn DurationField {
        &*self.base.unit_field
    }

    fn range_duration_field(&self) -> Option<&dyn DurationField> {
        Some(&*self.base.range_field)
    }

    fn is_leap(&self, instant: i64) -> Result<bool> {
        self.calendar.is_leap_day(instant)
    }

    fn minimum_value(&self) -> Result<i32> {
        Ok(1)
    }

    fn maximum_value(&self) -> Result<i32> {
        Ok(self.calendar.days_in_year_max())
    }

    fn maximum_value_at(&self, instant: i64) -> Result<i32> {
        Ok(self.calendar.days_in_year(self.calendar.year(instant)?))
    }

    fn maximum_value_for(&self, partial: &Partial, values: &[i32]) -> Result<i32> {
        match partial.index_of(DateTimeFieldType::Year) {
            Some(year)  => Ok(self.calendar.days_in_year(values[year])),
            None        => self.maximum_value(),
        }
    }

    fn round_floor(&self, instant: i64) -> Result<i64> {
        self.base.unit.floor(instant)
    }

    fn round_ceiling(&self, instant: i64) -> Result<i64> {
        self.base.unit.ceiling(instant)
    }

    fn remainder(&self, instant: i64) -> Result<i64> {
        Ok(self.base.unit.remainder(instant))
    }
}


/// Monday is 1 and Sunday is 7.
#[derive(Debug)]
struct DayOfWeekField {
    calendar: Arc<BasicCalendar>,
    base: OneBased,
}

impl DateTimeField for DayOfWeekField {
    fn field_type(&self) -> DateTimeFieldType {
        DateTimeFieldType::DayOfWeek
    }

    fn get(&self, instant: i64) -> Result<i32> {
        Ok(self.calendar.day_of_week(instant))
    }

    fn set(&self, instant: i64, value: i32) -> Result<i64> {
        verify_value_bounds(DateTimeFieldType::DayOfWeek, i64::from(value), 1, 7)?;
        self.base.unit.shift(instant, self.get(instant)?, value)
    }

    fn duration_field(&self) -> &dyn DurationField {
        &*self.base.unit_field
    }

    fn range_duration_field(&self) -> Option<&dyn DurationField> {
        Some(&*self.base.range_field)
    }

    fn minimum_value(&self) -> Result<i32> {
        Ok(1)
    }

    fn maximum_value(&self) -> Result<i32> {
        Ok(7)
    }

    fn round_floor(&self, instant: i64) -> Result<i64> {
        self.base.unit.floor(instant)
    }

    fn round_ceiling(&self, instant: i64) -> Result<i64> {
        self.base.unit.ceiling(instant)
    }

    fn remainder(&self, instant: i64) -> Result<i64> {
        Ok(self.base.unit.remainder(instant))
    }
}


#[derive(Debug)]
struct WeekOfWeekyearField {
    calendar: Arc<BasicCalendar>,
    base: OneBased,
}

impl DateTimeField for WeekOfWeekyearField {
    fn field_type(&self) -> DateTimeFieldType {
        DateTimeFieldType::WeekOfWeekyear
    }

    fn get(&self, instant: i64) -> Result<i32> {
        self.calendar.week_of_weekyear(instant)
    }

    fn set(&self, instant: i64, value: i32) -> Result<i64> {
        let max = if value > 52 { self.maximum_value_at(instant)? } else { 52 };
        verify_value_bounds(DateTimeFieldType::WeekOfWeekyear, i64::from(value), 1, i64::from(max))?;
        self.base.unit.shift(instant, self.get(instant)?, value)
    }

    fn duration_field(&self) -> &dyn DurationField {
        &*self.base.unit_field
    }

    fn range_duration_field(&self) -> Option<&dyn DurationField> {
        Some(&*self.base.range_field)
    }

    fn minimum_value(&self) -> Result<i32> {
        Ok(1)
    }

    fn maximum_value(&self) -> Result<i32> {
        Ok(53)
    }

    fn maximum_value_at(&self, instant: i64) -> Result<i32> {
        Ok(self.calendar.weeks_in_year(self.calendar.weekyear(instant)?))
    }

    fn maximum_value_for(&self, partial: &Partial, values: &[i32]) -> Result<i32> {
        match partial.index_of(DateTimeFieldType::Weekyear) {
            Some(weekyear)  => Ok(self.calendar.weeks_in_year(values[weekyear])),
            None            => self.maximum_value(),
        }
    }

    fn round_floor(&self, instant: i64) -> Result<i64> {
        self.calendar.week_floor(instant)
    }

    fn round_ceiling(&self, instant: i64) -> Result<i64> {
        let floor = self.round_floor(instant)?;
        if floor == instant { Ok(instant) } else { safe_add(floor, MILLIS_PER_WEEK) }
    }
}


/// The year a week belongs to. The weekyear of the last days of December
/// can be the following year, and of the first days of January the
/// previous one.
#[derive(Debug)]
struct WeekyearField {
    calendar: Arc<BasicCalendar>,
    weekyears: DurationFieldRef,
    weeks: DurationFieldRef,
}

impl DateTimeField for WeekyearField {
    fn field_type(&self) -> DateTimeFieldType {
        DateTimeFieldType::Weekyear
    }

    fn get(&self, instant: i64) -> Result<i32> {
        self.calendar.weekyear(instant)
    }

    fn set(&self, instant: i64, value: i32) -> Result<i64> {
        self.calendar.set_weekyear(instant, value)
    }

    fn add_wrap_field(&self, instant: i64, value: i32) -> Result<i64> {
        if value == 0 {
            return Ok(instant);
        }
        let weekyear = wrapped_value(self.get(instant)?, value, self.calendar.min_year(), self.calendar.max_year())?;
        self.set(instant, weekyear)
    }

    fn duration_field(&self) -> &dyn DurationField {
        &*self.weekyears
    }

    fn range_duration_field(&self) -> Option<&dyn DurationField> {
        None
    }

    fn leap_duration_field(&self) -> Option<&dyn DurationField> {
        Some(&*self.weeks)
    }

    /// A weekyear with 53 weeks.
    fn is_leap(&self, instant: i64) -> Result<bool> {
        Ok(self.leap_amount(instant)? > 0)
    }

    fn leap_amount(&self, instant: i64) -> Result<i32> {
        Ok(self.calendar.weeks_in_year(self.get(instant)?) - 52)
    }

    fn minimum_value(&self) -> Result<i32> {
        Ok(self.calendar.min_year())
    }

    fn maximum_value(&self) -> Result<i32> {
        Ok(self.calendar.max_year())
    }

    fn round_floor(&self, instant: i64) -> Result<i64> {
        self.calendar.weekyear_floor(instant)
    }
}


/// The derived century fields, and the unit the century field counts in.
pub(crate) struct Centuries {
    pub(crate) century_of_era: DateTimeFieldRef,
    pub(crate) year_of_century: DateTimeFieldRef,
    pub(crate) centuries: DurationFieldRef,
}

impl Centuries {

    /// One-based: the 21st century runs from 2001 to 2100, and 2000 is
    /// year 100 of the 20th.
    pub(crate) fn one_based(year_of_era: DateTimeFieldRef, eras: DurationFieldRef) -> Result<Centuries> {
        let shifted: DateTimeFieldRef = Arc::new(OffsetDateTimeField::new(year_of_era, DateTimeFieldType::YearOfEra, 99)?);
        let century = DividedDateTimeField::new(shifted, Some(eras), DateTimeFieldType::CenturyOfEra, 100)?;
        let remainder: DateTimeFieldRef = Arc::new(RemainderDateTimeField::from_divided(&century, DateTimeFieldType::YearOfCentury));

        Ok(Centuries {
            year_of_century: Arc::new(OffsetDateTimeField::new(remainder, DateTimeFieldType::YearOfCentury, 1)?),
            centuries: century.duration_handle(),
            century_of_era: Arc::new(century),
        })
    }

    /// Zero-based: 2000 is year 0 of century 20.
    pub(crate) fn zero_based(year_of_era: DateTimeFieldRef, eras: DurationFieldRef) -> Result<Centuries> {
        let century = DividedDateTimeField::new(year_of_era, Some(eras), DateTimeFieldType::CenturyOfEra, 100)?;

        Ok(Centuries {
            year_of_century: Arc::new(RemainderDateTimeField::from_divided(&century, DateTimeFieldType::YearOfCentury)),
            centuries: century.duration_handle(),
            century_of_era: Arc::new(century),
        })
    }
}


/// Fills a field table with every field a calendar engine provides: the
/// precise time fields, the date fields backed by the engine, and
/// one-based centuries.
pub(crate) fn assemble(set: &mut FieldSet, calendar: &Arc<BasicCalendar>) -> Result<()> {
    use crate::types::DateTimeFieldType::*;
    use crate::types::DurationFieldType as D;

    let millis: DurationFieldRef = Arc::new(MillisDurationField);
    let seconds: DurationFieldRef = Arc::new(PreciseDurationField::new(D::Seconds, MILLIS_PER_SECOND));
    let minutes: DurationFieldRef = Arc::new(PreciseDurationField::new(D::Minutes, MILLIS_PER_MINUTE));
    let hours: DurationFieldRef = Arc::new(PreciseDurationField::new(D::Hours, MILLIS_PER_HOUR));
    let halfdays: DurationFieldRef = Arc::new(PreciseDurationField::new(D::Halfdays, 12 * MILLIS_PER_HOUR));
    let days: DurationFieldRef = Arc::new(PreciseDurationField::new(D::Days, MILLIS_PER_DAY));
    let weeks: DurationFieldRef = Arc::new(PreciseDurationField::new(D::Weeks, MILLIS_PER_WEEK));
    let eras: DurationFieldRef = Arc::new(UnsupportedDurationField::new(D::Eras));

    let years: DurationFieldRef = Arc::new(CalendarDurationField::new(CalendarUnit::Years, calendar.clone()));
    let months: DurationFieldRef = Arc::new(CalendarDurationField::new(CalendarUnit::Months, calendar.clone()));
    let weekyears: DurationFieldRef = Arc::new(CalendarDurationField::new(CalendarUnit::Weekyears, calendar.clone()));

    for duration in [&millis, &seconds, &minutes, &hours, &halfdays, &days, &weeks, &eras, &years, &months, &weekyears] {
        set.set_duration(duration.field_type(), duration.clone());
    }

    let precise = |kind, unit: &DurationFieldRef, range: &DurationFieldRef| -> Result<DateTimeFieldRef> {
        Ok(Arc::new(PreciseDateTimeField::new(kind, unit.clone(), range.clone())?))
    };

    set.set_field(MillisOfSecond, precise(MillisOfSecond, &millis, &seconds)?);
    set.set_field(MillisOfDay, precise(MillisOfDay, &millis, &days)?);
    set.set_field(SecondOfMinute, precise(SecondOfMinute, &seconds, &minutes)?);
    set.set_field(SecondOfDay, precise(SecondOfDay, &seconds, &days)?);
    set.set_field(MinuteOfHour, precise(MinuteOfHour, &minutes, &hours)?);
    set.set_field(MinuteOfDay, precise(MinuteOfDay, &minutes, &days)?);
    set.set_field(HalfdayOfDay, precise(HalfdayOfDay, &halfdays, &days)?);

    let hour_of_day = precise(HourOfDay, &hours, &days)?;
    let hour_of_halfday = precise(HourOfHalfday, &hours, &halfdays)?;
    set.set_field(ClockhourOfDay, Arc::new(ZeroIsMaxDateTimeField::new(hour_of_day.clone(), ClockhourOfDay)?));
    set.set_field(ClockhourOfHalfday, Arc::new(ZeroIsMaxDateTimeField::new(hour_of_halfday.clone(), ClockhourOfHalfday)?));
    set.set_field(HourOfDay, hour_of_day);
    set.set_field(HourOfHalfday, hour_of_halfday);

    let year: DateTimeFieldRef = Arc::new(YearField { calendar: calendar.clone(), years: years.clone(), days: days.clone() });
    let year_of_era: DateTimeFieldRef = Arc::new(YearOfEraField { year: year.clone(), calendar: calendar.clone(), eras: eras.clone() });
    let centuries = Centuries::one_based(year_of_era.clone(), eras.clone())?;

    set.set_field(Era, Arc::new(EraField { calendar: calendar.clone(), eras }));
    set.set_field(Year, year);
    set.set_field(YearOfEra, year_of_era);
    set.set_field(CenturyOfEra, centuries.century_of_era);
    set.set_field(YearOfCentury, centuries.year_of_century);
    set.set_duration(D::Centuries, centuries.centuries.clone());

    set.set_field(MonthOfYear, Arc::new(MonthOfYearField {
        calendar: calendar.clone(), months: months.clone(), years: years.clone(), days: days.clone(),
    }));
    set.set_field(DayOfMonth, Arc::new(DayOfMonthField { calendar: calendar.clone(), base: OneBased::new(days.clone(), months)? }));
    set.set_field(DayOfYear, Arc::new(DayOfYearField { calendar: calendar.clone(), base: OneBased::new(days.clone(), years)? }));
    set.set_field(DayOfWeek, Arc::new(DayOfWeekField { calendar: calendar.clone(), base: OneBased::new(days, weeks.clone())? }));

    let weekyear: DateTimeFieldRef = Arc::new(WeekyearField { calendar: calendar.clone(), weekyears: weekyears.clone(), weeks: weeks.clone() });
    set.set_field(WeekOfWeekyear, Arc::new(WeekOfWeekyearField { calendar: calendar.clone(), base: OneBased::new(weeks, weekyears)? }));

    let weekyear_of_century: DateTimeFieldRef = Arc::new(RemainderDateTimeField::new(weekyear.clone(), centuries.centuries, WeekyearOfCentury, 100)?);
    set.set_field(WeekyearOfCentury, Arc::new(OffsetDateTimeField::new(weekyear_of_century, WeekyearOfCentury, 1)?));
    set.set_field(Weekyear, weekyear);

    Ok(())
}
