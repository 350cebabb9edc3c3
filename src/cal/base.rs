//! The generic, field-by-field versions of the composite chronology
//! operations. Anything with a field table can run these; calendar systems
//! with a faster route override them.

use crate::cal::Fields;
use crate::error::{Error, Result};
use crate::partial::Partial;
use crate::period::{PeriodType, PeriodValues, ReadablePeriod};
use crate::types::DateTimeFieldType::*;
use crate::util::{safe_add, safe_multiply};


pub(crate) fn date_time_millis(fields: &Fields, year: i32, month_of_year: i32, day_of_month: i32, millis_of_day: i32) -> Result<i64> {
    let instant = fields.field(Year).set(0, year)?;
    let instant = fields.field(MonthOfYear).set(instant, month_of_year)?;
    let instant = fields.field(DayOfMonth).set(instant, day_of_month)?;
    fields.field(MillisOfDay).set(instant, millis_of_day)
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn date_time_millis_hms(fields: &Fields, year: i32, month_of_year: i32, day_of_month: i32,
                                   hour_of_day: i32, minute_of_hour: i32, second_of_minute: i32, millis_of_second: i32) -> Result<i64> {
    let instant = fields.field(Year).set(0, year)?;
    let instant = fields.field(MonthOfYear).set(instant, month_of_year)?;
    let instant = fields.field(DayOfMonth).set(instant, day_of_month)?;
    time_millis_on(fields, instant, hour_of_day, minute_of_hour, second_of_minute, millis_of_second)
}

pub(crate) fn time_millis_on(fields: &Fields, instant: i64, hour_of_day: i32, minute_of_hour: i32, second_of_minute: i32, millis_of_second: i32) -> Result<i64> {
    let instant = fields.field(HourOfDay).set(instant, hour_of_day)?;
    let instant = fields.field(MinuteOfHour).set(instant, minute_of_hour)?;
    let instant = fields.field(SecondOfMinute).set(instant, second_of_minute)?;
    fields.field(MillisOfSecond).set(instant, millis_of_second)
}

pub(crate) fn validate(fields: &Fields, partial: &Partial, values: &[i32]) -> Result<()> {
    if values.len() != partial.size() {
        return Err(Error::invalid("The number of values must match the number of fields"));
    }

    // each value against the field’s overall range
    for (field_type, value) in partial.field_types().iter().zip(values) {
        let field = fields.field(*field_type);
        let (min, max) = (field.minimum_value()?, field.maximum_value()?);
        if *value < min || *value > max {
            return Err(Error::field_value(*field_type, i64::from(*value), i64::from(min), i64::from(max)));
        }
    }

    // each value given the others, catching really odd cases like 30th Feb
    for (field_type, value) in partial.field_types().iter().zip(values) {
        let field = fields.field(*field_type);
        let (min, max) = (field.minimum_value_for(partial, values)?, field.maximum_value_for(partial, values)?);
        if *value < min || *value > max {
            return Err(Error::field_value(*field_type, i64::from(*value), i64::from(min), i64::from(max)));
        }
    }

    Ok(())
}

pub(crate) fn period_values(fields: &Fields, period_type: PeriodType, mut start: i64, end: i64) -> Result<PeriodValues> {
    let mut values = PeriodValues::default();
    if start == end {
        return Ok(values);
    }

    for (index, unit) in period_type.field_types().enumerate() {
        let field = fields.duration(unit);
        let value = field.difference(end, start)?;
        if value != 0 {
            start = field.add(start, i64::from(value))?;
        }
        values[index] = value;
    }

    Ok(values)
}

pub(crate) fn period_values_for_duration(fields: &Fields, period_type: PeriodType, duration: i64) -> Result<PeriodValues> {
    let mut values = PeriodValues::default();
    if duration == 0 {
        return Ok(values);
    }

    let mut current = 0;
    for (index, unit) in period_type.field_types().enumerate() {
        let field = fields.duration(unit);
        if field.is_precise() {
            let value = field.difference(duration, current)?;
            current = field.add(current, i64::from(value))?;
            values[index] = value;
        }
    }

    Ok(values)
}

pub(crate) fn add_period(fields: &Fields, period: &dyn ReadablePeriod, mut instant: i64, scalar: i32) -> Result<i64> {
    if scalar == 0 {
        return Ok(instant);
    }

    for index in 0 .. period.size() {
        let value = i64::from(period.value(index));
        if value != 0 {
            instant = fields.duration(period.field_type(index)).add(instant, value * i64::from(scalar))?;
        }
    }

    Ok(instant)
}

pub(crate) fn add_duration(instant: i64, duration: i64, scalar: i32) -> Result<i64> {
    if duration == 0 || scalar == 0 {
        return Ok(instant);
    }

    safe_add(instant, safe_multiply(duration, i64::from(scalar))?)
}
