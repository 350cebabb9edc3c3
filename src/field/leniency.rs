//! Wrappers that change how a field treats out-of-range values on `set`.

use crate::error::Result;
use crate::field::{DateTimeField, DateTimeFieldRef, DurationField};
use crate::partial::Partial;
use crate::types::DateTimeFieldType;
use crate::util::verify_value_bounds;


/// Forwards everything except `set` and `is_lenient` to the wrapped field.
macro_rules! delegate_to_wrapped {
    () => {
        fn field_type(&self) -> DateTimeFieldType { self.wrapped.field_type() }
        fn is_supported(&self) -> bool { self.wrapped.is_supported() }
        fn get(&self, instant: i64) -> Result<i32> { self.wrapped.get(instant) }
        fn add(&self, instant: i64, value: i64) -> Result<i64> { self.wrapped.add(instant, value) }
        fn difference_as_long(&self, minuend: i64, subtrahend: i64) -> Result<i64> { self.wrapped.difference_as_long(minuend, subtrahend) }
        fn difference(&self, minuend: i64, subtrahend: i64) -> Result<i32> { self.wrapped.difference(minuend, subtrahend) }
        fn duration_field(&self) -> &dyn DurationField { self.wrapped.duration_field() }
        fn range_duration_field(&self) -> Option<&dyn DurationField> { self.wrapped.range_duration_field() }
        fn leap_duration_field(&self) -> Option<&dyn DurationField> { self.wrapped.leap_duration_field() }
        fn is_leap(&self, instant: i64) -> Result<bool> { self.wrapped.is_leap(instant) }
        fn leap_amount(&self, instant: i64) -> Result<i32> { self.wrapped.leap_amount(instant) }
        fn minimum_value(&self) -> Result<i32> { self.wrapped.minimum_value() }
        fn minimum_value_at(&self, instant: i64) -> Result<i32> { self.wrapped.minimum_value_at(instant) }
        fn minimum_value_for(&self, partial: &Partial, values: &[i32]) -> Result<i32> { self.wrapped.minimum_value_for(partial, values) }
        fn maximum_value(&self) -> Result<i32> { self.wrapped.maximum_value() }
        fn maximum_value_at(&self, instant: i64) -> Result<i32> { self.wrapped.maximum_value_at(instant) }
        fn maximum_value_for(&self, partial: &Partial, values: &[i32]) -> Result<i32> { self.wrapped.maximum_value_for(partial, values) }
        fn round_floor(&self, instant: i64) -> Result<i64> { self.wrapped.round_floor(instant) }
        fn round_ceiling(&self, instant: i64) -> Result<i64> { self.wrapped.round_ceiling(instant) }
        fn remainder(&self, instant: i64) -> Result<i64> { self.wrapped.remainder(instant) }
    };
}


/// Refuses any `set` the wrapped field could only satisfy by bending the
/// value or the smaller fields: out-of-range values fail, and so does a set
/// that clamps a smaller field (January 31st to February).
#[derive(Debug, Clone)]
pub struct StrictDateTimeField {
    wrapped: DateTimeFieldRef,
}

impl StrictDateTimeField {
    pub fn new(wrapped: DateTimeFieldRef) -> Self {
        StrictDateTimeField { wrapped }
    }
}

impl DateTimeField for StrictDateTimeField {
    delegate_to_wrapped!();

    fn set(&self, instant: i64, value: i32) -> Result<i64> {
        let field_type = self.wrapped.field_type();
        let (min, max) = (self.wrapped.minimum_value_at(instant)?, self.wrapped.maximum_value_at(instant)?);
        verify_value_bounds(field_type, i64::from(value), i64::from(min), i64::from(max))?;

        let previous = self.wrapped.get(instant)?;
        let result = self.wrapped.set(instant, value)?;

        // setting the old value back must undo the set exactly
        if self.wrapped.set(result, previous)? != instant {
            let (min, max) = (self.wrapped.minimum_value_at(result)?, self.wrapped.maximum_value_at(result)?);
            return Err(crate::Error::field_value(field_type, i64::from(value), i64::from(min), i64::from(max)));
        }

        Ok(result)
    }

    fn add_wrap_field(&self, instant: i64, value: i32) -> Result<i64> {
        self.wrapped.add_wrap_field(instant, value)
    }
}


/// Clamps out-of-range values into the field’s bounds at the instant
/// instead of failing.
#[derive(Debug, Clone)]
pub struct LenientDateTimeField {
    wrapped: DateTimeFieldRef,
}

impl LenientDateTimeField {
    pub fn new(wrapped: DateTimeFieldRef) -> Self {
        LenientDateTimeField { wrapped }
    }
}

impl DateTimeField for LenientDateTimeField {
    delegate_to_wrapped!();

    fn is_lenient(&self) -> bool {
        true
    }

    fn set(&self, instant: i64, value: i32) -> Result<i64> {
        let min = self.wrapped.minimum_value_at(instant)?;
        let max = self.wrapped.maximum_value_at(instant)?;
        self.wrapped.set(instant, value.clamp(min, max))
    }

    fn add_wrap_field(&self, instant: i64, value: i32) -> Result<i64> {
        self.wrapped.add_wrap_field(instant, value)
    }
}


#[cfg(test)]
mod test {
    use super::*;
    use crate::field::{PreciseDateTimeField, PreciseDurationField};
    use crate::types::DurationFieldType;
    use std::sync::Arc;

    fn second_of_minute() -> DateTimeFieldRef {
        let seconds = Arc::new(PreciseDurationField::new(DurationFieldType::Seconds, 1000));
        let minutes = Arc::new(PreciseDurationField::new(DurationFieldType::Minutes, 60_000));
        Arc::new(PreciseDateTimeField::new(DateTimeFieldType::SecondOfMinute, seconds, minutes).unwrap())
    }

    #[test]
    fn lenient_clamps() {
        let field = LenientDateTimeField::new(second_of_minute());
        assert!(field.is_lenient());
        assert_eq!(field.set(0, 75), Ok(59_000));
        assert_eq!(field.set(5_000, -3), Ok(0));
    }

    #[test]
    fn strict_rejects() {
        let field = StrictDateTimeField::new(second_of_minute());
        assert!(!field.is_lenient());
        assert!(field.set(0, 60).unwrap_err().is_out_of_range());
        assert_eq!(field.set(0, 59), Ok(59_000));
    }
}
