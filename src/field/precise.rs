//! Fields whose unit has a fixed length in milliseconds.

use crate::error::{Error, Result};
use crate::field::{DateTimeField, DurationField, DurationFieldRef};
use crate::types::DateTimeFieldType;
use crate::util::{safe_add, safe_multiply, safe_subtract, safe_to_int, verify_value_bounds, wrapped_value};


/// Rounding and shifting for a unit of exactly `millis` milliseconds.
///
/// Calendar fields whose unit is precise (days, weeks) but whose range is
/// not (months, years) share this for everything except `get`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreciseUnit {
    millis: i64,
}

impl PreciseUnit {
    pub fn new(millis: i64) -> Result<Self> {
        if millis < 1 {
            return Err(Error::invalid("The unit milliseconds must be at least 1"));
        }
        Ok(PreciseUnit { millis })
    }

    pub fn millis(self) -> i64 {
        self.millis
    }

    pub fn floor(self, instant: i64) -> Result<i64> {
        safe_subtract(instant, instant.rem_euclid(self.millis))
    }

    pub fn ceiling(self, instant: i64) -> Result<i64> {
        let floor = self.floor(instant)?;
        if floor == instant { Ok(instant) } else { safe_add(floor, self.millis) }
    }

    pub fn remainder(self, instant: i64) -> i64 {
        instant.rem_euclid(self.millis)
    }

    /// Moves the instant by however many units turn `current` into `value`.
    pub fn shift(self, instant: i64, current: i32, value: i32) -> Result<i64> {
        let delta = i64::from(value) - i64::from(current);
        safe_add(instant, safe_multiply(delta, self.millis)?)
    }
}


/// A field where both the unit and the range are precise, such as the
/// minute of the hour. Values run from zero to one less than the number of
/// units in the range.
#[derive(Debug, Clone)]
pub struct PreciseDateTimeField {
    field_type: DateTimeFieldType,
    unit_field: DurationFieldRef,
    range_field: DurationFieldRef,
    unit: PreciseUnit,
    range: i32,
}

impl PreciseDateTimeField {
    pub fn new(field_type: DateTimeFieldType, unit_field: DurationFieldRef, range_field: DurationFieldRef) -> Result<Self> {
        if !unit_field.is_precise() || !range_field.is_precise() {
            return Err(Error::invalid("Unit and range duration fields must be precise"));
        }

        let unit = PreciseUnit::new(unit_field.unit_millis())?;
        let range = safe_to_int(range_field.unit_millis() / unit.millis())?;
        if range < 2 {
            return Err(Error::invalid("The effective range must be at least 2"));
        }

        Ok(PreciseDateTimeField { field_type, unit_field, range_field, unit, range })
    }

    /// The number of distinct values this field takes.
    pub fn range(&self) -> i32 {
        self.range
    }
}

impl DateTimeField for PreciseDateTimeField {
    fn field_type(&self) -> DateTimeFieldType {
        self.field_type
    }

    fn get(&self, instant: i64) -> Result<i32> {
        Ok(instant.div_euclid(self.unit.millis()).rem_euclid(i64::from(self.range)) as i32)
    }

    fn set(&self, instant: i64, value: i32) -> Result<i64> {
        verify_value_bounds(self.field_type, i64::from(value), 0, i64::from(self.range) - 1)?;
        self.unit.shift(instant, self.get(instant)?, value)
    }

    fn add_wrap_field(&self, instant: i64, amount: i32) -> Result<i64> {
        let current = self.get(instant)?;
        let wrapped = wrapped_value(current, amount, 0, self.range - 1)?;
        self.unit.shift(instant, current, wrapped)
    }

    fn duration_field(&self) -> &dyn DurationField {
        &*self.unit_field
    }

    fn range_duration_field(&self) -> Option<&dyn DurationField> {
        Some(&*self.range_field)
    }

    fn minimum_value(&self) -> Result<i32> {
        Ok(0)
    }

    fn maximum_value(&self) -> Result<i32> {
        Ok(self.range - 1)
    }

    fn round_floor(&self, instant: i64) -> Result<i64> {
        self.unit.floor(instant)
    }

    fn round_ceiling(&self, instant: i64) -> Result<i64> {
        self.unit.ceiling(instant)
    }

    fn remainder(&self, instant: i64) -> Result<i64> {
        Ok(self.unit.remainder(instant))
    }
}


#[cfg(test)]
mod test {
    use super::*;
    use crate::field::PreciseDurationField;
    use crate::types::DurationFieldType;
    use std::sync::Arc;

    fn minute_of_hour() -> PreciseDateTimeField {
        let minutes = Arc::new(PreciseDurationField::new(DurationFieldType::Minutes, 60_000));
        let hours = Arc::new(PreciseDurationField::new(DurationFieldType::Hours, 3_600_000));
        PreciseDateTimeField::new(DateTimeFieldType::MinuteOfHour, minutes, hours).unwrap()
    }

    mod reading {
        use super::*;

        #[test]
        fn positive() {
            assert_eq!(minute_of_hour().get(61 * 60_000 + 5), Ok(1));
        }

        #[test]
        fn negative() {
            // 1969-12-31T23:59:59.999
            assert_eq!(minute_of_hour().get(-1), Ok(59));
        }
    }

    mod rounding {
        use super::*;

        #[test]
        fn floor_and_ceiling_before_epoch() {
            let field = minute_of_hour();
            assert_eq!(field.round_floor(-1), Ok(-60_000));
            assert_eq!(field.round_ceiling(-1), Ok(0));
            assert_eq!(field.remainder(-1), Ok(59_999));
        }

        #[test]
        fn half_even_tie() {
            let field = minute_of_hour();
            // halfway between minute 0 and minute 1: goes to the even one
            assert_eq!(field.round_half_even(30_000), Ok(0));
            // halfway between minute 1 and minute 2
            assert_eq!(field.round_half_even(90_000), Ok(120_000));
        }

        #[test]
        fn half_floor_and_ceiling() {
            let field = minute_of_hour();
            assert_eq!(field.round_half_floor(30_000), Ok(0));
            assert_eq!(field.round_half_ceiling(30_000), Ok(60_000));
        }
    }

    mod writing {
        use super::*;

        #[test]
        fn set_round_trips() {
            let field = minute_of_hour();
            let instant = 1_234_567_890;
            assert_eq!(field.set(instant, field.get(instant).unwrap()), Ok(instant));
        }

        #[test]
        fn set_out_of_range() {
            assert!(minute_of_hour().set(0, 60).unwrap_err().is_out_of_range());
        }

        #[test]
        fn wrap_leaves_hour_alone() {
            let field = minute_of_hour();
            assert_eq!(field.add_wrap_field(59 * 60_000, 2), Ok(60_000));
        }
    }
}
