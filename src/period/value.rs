//! Immutable periods.

use crate::cal::basic::{MILLIS_PER_DAY, MILLIS_PER_HOUR, MILLIS_PER_MINUTE, MILLIS_PER_SECOND, MILLIS_PER_WEEK};
use crate::cal::{iso_utc, Chronology};
use crate::duration::Duration;
use crate::error::{Error, Result};
use crate::partial::Partial;
use crate::period::{add_field_into, set_field_into, values_from, PeriodType, PeriodValues, ReadablePeriod};
use crate::types::DurationFieldType;
use crate::util::{safe_add, safe_multiply, safe_negate, safe_to_int};


/// A **period**: an amount of time in calendar units, such as “1 year,
/// 2 months and 3 days”.
///
/// A period holds one value per unit of its [`PeriodType`]. Its length in
/// milliseconds is only known once it is applied to an instant, because
/// months, and even days in a zone with daylight saving, vary in length.
///
/// Every operation returns a new period, and either applies completely or
/// fails without producing anything.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(into = "SerializedPeriod", try_from = "SerializedPeriod"))]
pub struct Period {
    period_type: PeriodType,
    values: PeriodValues,
}

macro_rules! single_unit {
    ($( $name:ident ),* $(,)?) => {
        $(
            pub fn $name(value: i32) -> Period {
                let period_type = PeriodType::$name();
                let mut values = PeriodValues::default();
                values[0] = value;
                Period { period_type, values }
            }
        )*
    };
}

macro_rules! unit_accessors {
    ($( $unit:ident: $get:ident, $with:ident, $plus:ident, $minus:ident ),* $(,)?) => {
        $(
            pub fn $get(&self) -> i32 {
                self.get(DurationFieldType::$unit)
            }

            pub fn $with(&self, value: i32) -> Result<Period> {
                self.with_field(DurationFieldType::$unit, value)
            }

            pub fn $plus(&self, value: i32) -> Result<Period> {
                self.with_field_added(DurationFieldType::$unit, value)
            }

            pub fn $minus(&self, value: i32) -> Result<Period> {
                self.with_field_added(DurationFieldType::$unit, safe_negate(value)?)
            }
        )*
    };
}

impl Period {

    /// A standard period with a value for every unit.
    #[allow(clippy::too_many_arguments)]
    pub fn new(years: i32, months: i32, weeks: i32, days: i32,
               hours: i32, minutes: i32, seconds: i32, millis: i32) -> Period {
        Period {
            period_type: PeriodType::standard(),
            values: [ years, months, weeks, days, hours, minutes, seconds, millis ],
        }
    }

    /// An all-zero period of the given type.
    pub fn zero(period_type: PeriodType) -> Period {
        Period { period_type, values: PeriodValues::default() }
    }

    /// A period of the given type with values in the type’s order. Values
    /// past the type’s size must be zero.
    pub fn of(period_type: PeriodType, values: &[i32]) -> Result<Period> {
        if values.len() != period_type.size() {
            return Err(Error::invalid(format!("{} needs {} values, not {}", period_type, period_type.size(), values.len())));
        }

        let mut array = PeriodValues::default();
        array[.. values.len()].copy_from_slice(values);
        Ok(Period { period_type, values: array })
    }

    pub(crate) fn from_parts(period_type: PeriodType, values: PeriodValues) -> Period {
        Period { period_type, values }
    }

    single_unit! { years, months, weeks, days, hours, minutes, seconds, millis }

    /// The period from one instant to another, measured in a chronology,
    /// with each unit of the type taking as much as it can, largest first.
    pub fn between(start: i64, end: i64, period_type: PeriodType, chronology: &dyn Chronology) -> Result<Period> {
        let values = chronology.period_values(period_type, start, end)?;
        Ok(Period { period_type, values })
    }

    /// The period between two partials. Both must hold the same fields,
    /// and those fields must be contiguous, like year-month-day.
    pub fn between_partials(start: &Partial, end: &Partial, period_type: PeriodType) -> Result<Period> {
        if start.field_types() != end.field_types() {
            return Err(Error::invalid("Partial objects must have the same set of fields"));
        }
        if start.chronology().key() != end.chronology().key() {
            return Err(Error::invalid("Partial objects must have the same chronology"));
        }
        if !start.is_contiguous() {
            return Err(Error::invalid("Partial objects must be contiguous"));
        }

        let chronology = start.chronology();
        let start = chronology.set_partial(start, 0)?;
        let end = chronology.set_partial(end, 0)?;
        Period::between(start, end, period_type, &**chronology)
    }

    /// Splits a millisecond duration into the precise units of a type, as
    /// the chronology measures them.
    pub fn from_duration(duration: i64, period_type: PeriodType, chronology: &dyn Chronology) -> Result<Period> {
        let values = chronology.period_values_for_duration(period_type, duration)?;
        Ok(Period { period_type, values })
    }

    /// Splits a millisecond duration into hours, minutes, seconds and
    /// millis of a standard period. The date units stay zero, so 25 hours
    /// remain 25 hours.
    pub fn from_duration_millis(duration: i64) -> Result<Period> {
        let time = iso_utc()?.period_values_for_duration(PeriodType::time(), duration)?;
        let mut values = PeriodValues::default();
        values[4 ..].copy_from_slice(&time[.. 4]);
        Ok(Period { period_type: PeriodType::standard(), values })
    }

    pub fn period_type(&self) -> PeriodType {
        self.period_type
    }

    unit_accessors! {
        Years:   years_value,   with_years,   plus_years,   minus_years,
        Months:  months_value,  with_months,  plus_months,  minus_months,
        Weeks:   weeks_value,   with_weeks,   plus_weeks,   minus_weeks,
        Days:    days_value,    with_days,    plus_days,    minus_days,
        Hours:   hours_value,   with_hours,   plus_hours,   minus_hours,
        Minutes: minutes_value, with_minutes, plus_minutes, minus_minutes,
        Seconds: seconds_value, with_seconds, plus_seconds, minus_seconds,
        Millis:  millis_value,  with_millis,  plus_millis,  minus_millis,
    }

    pub fn is_zero(&self) -> bool {
        self.values.iter().all(|v| *v == 0)
    }

    /// The same values under another type. Fails if a non-zero value has
    /// no place in the new type.
    pub fn with_period_type(&self, period_type: PeriodType) -> Result<Period> {
        if period_type == self.period_type {
            return Ok(*self);
        }
        Ok(Period { period_type, values: values_from(period_type, self)? })
    }

    /// Replaces the value of one unit.
    pub fn with_field(&self, unit: DurationFieldType, value: i32) -> Result<Period> {
        let mut values = self.values;
        set_field_into(self.period_type, &mut values, unit, value)?;
        Ok(Period { values, ..*self })
    }

    /// Adds to the value of one unit.
    pub fn with_field_added(&self, unit: DurationFieldType, value: i32) -> Result<Period> {
        let mut values = self.values;
        add_field_into(self.period_type, &mut values, unit, value)?;
        Ok(Period { values, ..*self })
    }

    /// Replaces the values of every unit the other period has, including
    /// its zeroes.
    pub fn with_fields(&self, period: &dyn ReadablePeriod) -> Result<Period> {
        let mut values = self.values;
        for index in 0 .. period.size() {
            set_field_into(self.period_type, &mut values, period.field_type(index), period.value(index))?;
        }
        Ok(Period { values, ..*self })
    }

    /// Adds another period unit by unit.
    pub fn plus(&self, period: &dyn ReadablePeriod) -> Result<Period> {
        let mut values = self.values;
        for index in 0 .. period.size() {
            add_field_into(self.period_type, &mut values, period.field_type(index), period.value(index))?;
        }
        Ok(Period { values, ..*self })
    }

    /// Subtracts another period unit by unit.
    pub fn minus(&self, period: &dyn ReadablePeriod) -> Result<Period> {
        let mut values = self.values;
        for index in 0 .. period.size() {
            add_field_into(self.period_type, &mut values, period.field_type(index), safe_negate(period.value(index))?)?;
        }
        Ok(Period { values, ..*self })
    }

    /// Multiplies every value.
    pub fn multiplied_by(&self, scalar: i32) -> Result<Period> {
        if scalar == 1 || self.is_zero() {
            return Ok(*self);
        }

        let mut values = self.values;
        for value in values.iter_mut() {
            *value = safe_multiply(*value, scalar)?;
        }
        Ok(Period { values, ..*self })
    }

    pub fn negated(&self) -> Result<Period> {
        self.multiplied_by(-1)
    }

    /// Adds this period, multiplied by `scalar`, to an instant.
    pub fn add_to(&self, instant: i64, scalar: i32, chronology: &dyn Chronology) -> Result<i64> {
        chronology.add_period(self, instant, scalar)
    }

    /// Normalizes this period using standard lengths: 7-day weeks, 24-hour
    /// days, 60-minute hours and 60-second minutes, and 12-month years.
    ///
    /// The weeks and smaller units are added up and split again into the
    /// given type, and the years and months are folded into whole years
    /// plus up to eleven months. If the type has only one of years and
    /// months, it takes the whole lot; if it has neither, and there are
    /// years or months to place, the period cannot be normalized.
    ///
    /// ### Examples
    ///
    /// ```
    /// use chronology::period::{Period, PeriodType};
    ///
    /// let period = Period::months(14).with_period_type(PeriodType::standard()).unwrap();
    /// let normal = period.normalized_standard(PeriodType::standard()).unwrap();
    /// assert_eq!((normal.years_value(), normal.months_value()), (1, 2));
    /// ```
    pub fn normalized_standard(&self, period_type: PeriodType) -> Result<Period> {
        let millis = self.standard_millis(true)?;
        let mut result = Period::from_duration(millis, period_type, &*iso_utc()?)?;

        let (years, months) = (self.years_value(), self.months_value());
        if years != 0 || months != 0 {
            let mut total_months = i64::from(years) * 12 + i64::from(months);

            if period_type.is_supported(DurationFieldType::Years) {
                let normal_years = safe_to_int(total_months / 12)?;
                result = result.with_years(normal_years)?;
                total_months -= i64::from(normal_years) * 12;
            }

            if period_type.is_supported(DurationFieldType::Months) {
                let normal_months = safe_to_int(total_months)?;
                result = result.with_months(normal_months)?;
                total_months -= i64::from(normal_months);
            }

            if total_months != 0 {
                return Err(Error::unsupported(format!(
                    "Unable to normalize as {} is missing either years or months but period has a month/year amount: {:?}",
                    period_type, self)));
            }
        }

        Ok(result)
    }

    /// The standard length of the weeks and smaller units, in
    /// milliseconds.
    fn standard_millis(&self, include_weeks: bool) -> Result<i64> {
        let mut millis = i64::from(self.millis_value());
        millis = safe_add(millis, i64::from(self.seconds_value()) * MILLIS_PER_SECOND)?;
        millis = safe_add(millis, i64::from(self.minutes_value()) * MILLIS_PER_MINUTE)?;
        millis = safe_add(millis, i64::from(self.hours_value()) * MILLIS_PER_HOUR)?;
        millis = safe_add(millis, i64::from(self.days_value()) * MILLIS_PER_DAY)?;
        if include_weeks {
            millis = safe_add(millis, i64::from(self.weeks_value()) * MILLIS_PER_WEEK)?;
        }
        Ok(millis)
    }

    fn check_years_and_months(&self, destination: &str) -> Result<()> {
        if self.months_value() != 0 {
            return Err(Error::unsupported(format!("Cannot convert to {} as this period contains months and months vary in length", destination)));
        }
        if self.years_value() != 0 {
            return Err(Error::unsupported(format!("Cannot convert to {} as this period contains years and years vary in length", destination)));
        }
        Ok(())
    }

    /// The number of whole weeks this period lasts, assuming standard
    /// 24-hour days. Fails if the period has years or months.
    pub fn to_standard_weeks(&self) -> Result<i32> {
        self.check_years_and_months("Weeks")?;
        let millis = self.standard_millis(false)?;
        safe_to_int(i64::from(self.weeks_value()) + millis / MILLIS_PER_WEEK)
    }

    pub fn to_standard_days(&self) -> Result<i32> {
        self.check_years_and_months("Days")?;
        let millis = i64::from(self.millis_value())
                   + i64::from(self.seconds_value()) * MILLIS_PER_SECOND
                   + i64::from(self.minutes_value()) * MILLIS_PER_MINUTE
                   + i64::from(self.hours_value()) * MILLIS_PER_HOUR;
        let days = i64::from(self.days_value()) + millis / MILLIS_PER_DAY;
        safe_to_int(safe_add(days, i64::from(self.weeks_value()) * 7)?)
    }

    pub fn to_standard_hours(&self) -> Result<i32> {
        self.check_years_and_months("Hours")?;
        let millis = i64::from(self.millis_value())
                   + i64::from(self.seconds_value()) * MILLIS_PER_SECOND
                   + i64::from(self.minutes_value()) * MILLIS_PER_MINUTE;
        let hours = i64::from(self.hours_value()) + millis / MILLIS_PER_HOUR;
        let hours = safe_add(hours, i64::from(self.days_value()) * 24)?;
        safe_to_int(safe_add(hours, i64::from(self.weeks_value()) * 24 * 7)?)
    }

    pub fn to_standard_minutes(&self) -> Result<i32> {
        self.check_years_and_months("Minutes")?;
        let millis = i64::from(self.millis_value()) + i64::from(self.seconds_value()) * MILLIS_PER_SECOND;
        let minutes = i64::from(self.minutes_value()) + millis / MILLIS_PER_MINUTE;
        let minutes = safe_add(minutes, i64::from(self.hours_value()) * 60)?;
        let minutes = safe_add(minutes, i64::from(self.days_value()) * 24 * 60)?;
        safe_to_int(safe_add(minutes, i64::from(self.weeks_value()) * 7 * 24 * 60)?)
    }

    pub fn to_standard_seconds(&self) -> Result<i32> {
        self.check_years_and_months("Seconds")?;
        let seconds = i64::from(self.seconds_value()) + i64::from(self.millis_value()) / MILLIS_PER_SECOND;
        let seconds = safe_add(seconds, i64::from(self.minutes_value()) * 60)?;
        let seconds = safe_add(seconds, i64::from(self.hours_value()) * 60 * 60)?;
        let seconds = safe_add(seconds, i64::from(self.days_value()) * 24 * 60 * 60)?;
        safe_to_int(safe_add(seconds, i64::from(self.weeks_value()) * 7 * 24 * 60 * 60)?)
    }

    /// The exact length of this period, assuming standard 24-hour days.
    /// Fails if the period has years or months.
    pub fn to_standard_duration(&self) -> Result<Duration> {
        self.check_years_and_months("Duration")?;
        Ok(Duration::of_millis(self.standard_millis(true)?))
    }
}

impl ReadablePeriod for Period {
    fn period_type(&self) -> PeriodType {
        self.period_type
    }

    fn value(&self, index: usize) -> i32 {
        self.values[index]
    }

    fn values(&self) -> PeriodValues {
        self.values
    }

    fn to_period(&self) -> Period {
        *self
    }
}


/// The serialized form of a period: its type and one value per unit.
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct SerializedPeriod {
    period_type: PeriodType,
    values: Vec<i32>,
}

#[cfg(feature = "serde")]
impl From<Period> for SerializedPeriod {
    fn from(period: Period) -> SerializedPeriod {
        let size = period.period_type.size();
        SerializedPeriod { period_type: period.period_type, values: period.values[.. size].to_vec() }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<SerializedPeriod> for Period {
    type Error = Error;

    fn try_from(serialized: SerializedPeriod) -> Result<Period> {
        Period::of(serialized.period_type, &serialized.values)
    }
}


#[cfg(test)]
mod test {
    use super::*;
    use crate::cal::{GregorianChronology, IsoChronology};
    use crate::types::DateTimeFieldType;
    use pretty_assertions::assert_eq;

    mod construction {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn standard() {
            let period = Period::new(1, 2, 3, 4, 5, 6, 7, 8);
            assert_eq!(period.months_value(), 2);
            assert_eq!(period.millis_value(), 8);
            assert_eq!(period.size(), 8);
        }

        #[test]
        fn single_unit() {
            let period = Period::days(3);
            assert_eq!(period.period_type(), PeriodType::days());
            assert_eq!(period.days_value(), 3);
            assert_eq!(period.hours_value(), 0);
        }

        #[test]
        fn of_checks_length() {
            assert!(Period::of(PeriodType::year_month_day(), &[1, 2]).unwrap_err().is_invalid_argument());
            assert_eq!(Period::of(PeriodType::year_month_day(), &[1, 2, 3]).unwrap().days_value(), 3);
        }

        #[test]
        fn from_duration_keeps_hours() {
            let period = Period::from_duration_millis(25 * 3_600_000 + 61_001).unwrap();
            assert_eq!(period, Period::new(0, 0, 0, 0, 25, 1, 1, 1));
        }

        #[test]
        fn from_duration_with_days() {
            let chronology = IsoChronology::instance_utc().unwrap();
            let period = Period::from_duration(25 * 3_600_000, PeriodType::day_time(), &*chronology).unwrap();
            assert_eq!((period.days_value(), period.hours_value()), (1, 1));
        }
    }

    mod between {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn years_both_ways() {
            let chronology = GregorianChronology::instance_utc().unwrap();
            let start = chronology.date_time_millis(2021, 3, 1, 0).unwrap();
            let end = chronology.date_time_millis(2022, 3, 1, 0).unwrap();
            assert_eq!(Period::between(start, end, PeriodType::years(), &*chronology).unwrap().years_value(), 1);
            assert_eq!(Period::between(end, start, PeriodType::years(), &*chronology).unwrap().years_value(), -1);
        }

        #[test]
        fn greedy_largest_first() {
            let chronology = IsoChronology::instance_utc().unwrap();
            let start = chronology.date_time_millis_hms(2004, 1, 31, 10, 0, 0, 0).unwrap();
            let end = chronology.date_time_millis_hms(2005, 3, 2, 12, 30, 0, 0).unwrap();
            let period = Period::between(start, end, PeriodType::standard(), &*chronology).unwrap();
            assert_eq!(period, Period::new(1, 1, 0, 2, 2, 30, 0, 0));
            assert_eq!(period.add_to(start, 1, &*chronology), Ok(end));
        }

        #[test]
        fn same_instant() {
            let chronology = IsoChronology::instance_utc().unwrap();
            assert!(Period::between(5, 5, PeriodType::standard(), &*chronology).unwrap().is_zero());
        }

        #[test]
        fn partials() {
            let chronology = IsoChronology::instance_utc().unwrap();
            let types = [DateTimeFieldType::Year, DateTimeFieldType::MonthOfYear, DateTimeFieldType::DayOfMonth];
            let start = Partial::of(&*chronology, &types, &[2010, 1, 15]).unwrap();
            let end = Partial::of(&*chronology, &types, &[2011, 3, 20]).unwrap();
            let period = Period::between_partials(&start, &end, PeriodType::year_month_day()).unwrap();
            assert_eq!((period.years_value(), period.months_value(), period.days_value()), (1, 2, 5));
        }

        #[test]
        fn partials_must_match() {
            let chronology = IsoChronology::instance_utc().unwrap();
            let start = Partial::of(&*chronology, &[DateTimeFieldType::Year, DateTimeFieldType::MonthOfYear], &[2010, 1]).unwrap();
            let end = Partial::of(&*chronology, &[DateTimeFieldType::Year], &[2011]).unwrap();
            assert!(Period::between_partials(&start, &end, PeriodType::years()).unwrap_err().is_invalid_argument());
        }

        #[test]
        fn partials_must_be_contiguous() {
            let chronology = IsoChronology::instance_utc().unwrap();
            let types = [DateTimeFieldType::Year, DateTimeFieldType::DayOfMonth];
            let start = Partial::of(&*chronology, &types, &[2010, 1]).unwrap();
            let end = Partial::of(&*chronology, &types, &[2011, 3]).unwrap();
            assert!(Period::between_partials(&start, &end, PeriodType::years()).unwrap_err().is_invalid_argument());
        }
    }

    mod arithmetic {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn plus() {
            let period = Period::new(1, 2, 0, 3, 0, 0, 0, 0).plus(&Period::months(11)).unwrap();
            assert_eq!(period.months_value(), 13);
        }

        #[test]
        fn plus_unsupported_field() {
            let error = Period::days(1).plus(&Period::hours(2)).unwrap_err();
            assert!(error.is_unsupported());
            assert_eq!(Period::days(1).plus(&Period::hours(0)), Ok(Period::days(1)));
        }

        #[test]
        fn overflow_is_atomic() {
            let period = Period::new(1, i32::MAX, 0, 0, 0, 0, 0, 0);
            let error = period.plus(&Period::new(1, 1, 0, 0, 0, 0, 0, 0)).unwrap_err();
            assert!(error.is_overflow());
            assert_eq!(period.years_value(), 1);
        }

        #[test]
        fn minus() {
            let period = Period::days(5).minus(&Period::days(7)).unwrap();
            assert_eq!(period.days_value(), -2);
            assert!(Period::days(0).minus(&Period::days(i32::MIN)).unwrap_err().is_overflow());
        }

        #[test]
        fn multiplied() {
            let period = Period::new(0, 1, 0, 2, 0, 0, 0, 0).multiplied_by(3).unwrap();
            assert_eq!((period.months_value(), period.days_value()), (3, 6));
            assert!(Period::years(i32::MAX).multiplied_by(2).unwrap_err().is_overflow());
            assert_eq!(Period::hours(2).negated().unwrap().hours_value(), -2);
        }

        #[test]
        fn with_field() {
            let period = Period::days(1).with_days(4).unwrap();
            assert_eq!(period.days_value(), 4);
            assert!(Period::days(1).with_hours(4).unwrap_err().is_unsupported());
            assert_eq!(Period::days(1).with_hours(0), Ok(Period::days(1)));
        }

        #[test]
        fn with_fields() {
            let period = Period::new(1, 2, 3, 4, 0, 0, 0, 0).with_fields(&Period::months(0)).unwrap();
            assert_eq!(period, Period::new(1, 0, 3, 4, 0, 0, 0, 0));
        }

        #[test]
        fn change_type() {
            let period = Period::days(3).with_period_type(PeriodType::standard()).unwrap();
            assert_eq!(period, Period::new(0, 0, 0, 3, 0, 0, 0, 0));
            assert!(Period::new(0, 0, 1, 0, 0, 0, 0, 0).with_period_type(PeriodType::days()).unwrap_err().is_unsupported());
        }
    }

    mod normalization {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn months_into_years() {
            let period = Period::new(0, 14, 0, 0, 0, 0, 0, 0).normalized_standard(PeriodType::standard()).unwrap();
            assert_eq!(period, Period::new(1, 2, 0, 0, 0, 0, 0, 0));
        }

        #[test]
        fn time_into_days_and_weeks() {
            let period = Period::new(0, 0, 1, 1, 25, 61, 0, 0).normalized_standard(PeriodType::standard()).unwrap();
            assert_eq!(period, Period::new(0, 0, 1, 2, 2, 1, 0, 0));
        }

        #[test]
        fn negative_months() {
            let period = Period::new(1, -15, 0, 0, 0, 0, 0, 0).normalized_standard(PeriodType::standard()).unwrap();
            assert_eq!((period.years_value(), period.months_value()), (0, -3));
        }

        #[test]
        fn months_only_type() {
            let period = Period::new(2, 3, 0, 0, 0, 0, 0, 0).normalized_standard(PeriodType::months()).unwrap();
            assert_eq!(period, Period::months(27));
        }

        #[test]
        fn leftover_months() {
            let period = Period::new(0, 14, 0, 0, 0, 0, 0, 0);
            assert!(period.normalized_standard(PeriodType::years()).unwrap_err().is_unsupported());
            assert!(period.normalized_standard(PeriodType::day_time()).unwrap_err().is_unsupported());
            let exact = Period::new(0, 24, 0, 0, 0, 0, 0, 0).normalized_standard(PeriodType::years()).unwrap();
            assert_eq!(exact, Period::years(2));
        }

        #[test]
        fn idempotent() {
            let samples = [
                Period::new(0, 14, 0, 0, 0, 0, 0, 0),
                Period::new(3, 25, 5, 9, 49, 121, 3_661, 2_500),
                Period::new(-1, 5, -2, 3, -30, 7, 0, -1),
                Period::new(0, 0, 0, 0, 0, 0, 0, 86_400_001),
            ];
            for period in samples {
                let once = period.normalized_standard(PeriodType::standard()).unwrap();
                assert_eq!(once.normalized_standard(PeriodType::standard()).unwrap(), once, "{:?}", period);
            }
        }
    }

    mod conversion {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn standard_units() {
            let period = Period::new(0, 0, 2, 1, 48, 0, 0, 0);
            assert_eq!(period.to_standard_weeks(), Ok(2));
            assert_eq!(period.to_standard_days(), Ok(17));
            assert_eq!(period.to_standard_hours(), Ok(17 * 24));
            assert_eq!(period.to_standard_minutes(), Ok(17 * 24 * 60));
            assert_eq!(period.to_standard_seconds(), Ok(17 * 24 * 60 * 60));
        }

        #[test]
        fn standard_duration() {
            let period = Period::new(0, 0, 1, 1, 1, 1, 1, 1);
            let expected = 604_800_000 + 86_400_000 + 3_600_000 + 60_000 + 1_000 + 1;
            assert_eq!(period.to_standard_duration().unwrap().millis(), expected);
        }

        #[test]
        fn months_refused() {
            let period = Period::months(1);
            assert!(period.to_standard_days().unwrap_err().is_unsupported());
            assert!(period.to_standard_duration().unwrap_err().is_unsupported());
            assert!(Period::years(1).to_standard_weeks().unwrap_err().is_unsupported());
        }

        #[test]
        fn seconds_overflow() {
            assert!(Period::weeks(5_000).to_standard_seconds().unwrap_err().is_overflow());
        }
    }
}
