//! Fields derived from another field: quotient, remainder, shifted, and
//! one-based adapters. Centuries, years of the century, and clock hours are
//! all built from these rather than written out by hand.

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::field::{DateTimeField, DateTimeFieldRef, DurationField, DurationFieldRef, ScaledDurationField};
use crate::partial::Partial;
use crate::types::DateTimeFieldType;
use crate::util::{safe_multiply, verify_value_bounds, wrapped_value};


/// The wrapped field’s value divided by a fixed divisor, rounding towards
/// negative infinity. Century-of-era is year-of-era divided by 100.
#[derive(Debug, Clone)]
pub struct DividedDateTimeField {
    wrapped: DateTimeFieldRef,
    field_type: DateTimeFieldType,
    duration: DurationFieldRef,
    range: Option<DurationFieldRef>,
    divisor: i32,
    min: i32,
    max: i32,
}

impl DividedDateTimeField {
    pub fn new(wrapped: DateTimeFieldRef, range: Option<DurationFieldRef>, field_type: DateTimeFieldType, divisor: i32) -> Result<Self> {
        if !wrapped.is_supported() {
            return Err(Error::invalid("The field must be supported"));
        }
        if divisor < 2 {
            return Err(Error::invalid("The divisor must be at least 2"));
        }

        let unit = Arc::new(WrappedUnit(wrapped.clone()));
        let duration = Arc::new(ScaledDurationField::new(unit, field_type.duration_type(), divisor)?);
        let min = wrapped.minimum_value()?.div_euclid(divisor);
        let max = wrapped.maximum_value()?.div_euclid(divisor);

        Ok(DividedDateTimeField { wrapped, field_type, duration, range, divisor, min, max })
    }

    pub fn divisor(&self) -> i32 {
        self.divisor
    }

    /// The scaled unit this field counts in, shared with any remainder
    /// field built from it.
    pub fn duration_handle(&self) -> DurationFieldRef {
        self.duration.clone()
    }
}

impl DateTimeField for DividedDateTimeField {
    fn field_type(&self) -> DateTimeFieldType {
        self.field_type
    }

    fn get(&self, instant: i64) -> Result<i32> {
        Ok(self.wrapped.get(instant)?.div_euclid(self.divisor))
    }

    fn set(&self, instant: i64, value: i32) -> Result<i64> {
        verify_value_bounds(self.field_type, i64::from(value), i64::from(self.min), i64::from(self.max))?;
        let remainder = self.wrapped.get(instant)?.rem_euclid(self.divisor);
        self.wrapped.set(instant, value * self.divisor + remainder)
    }

    fn add(&self, instant: i64, amount: i64) -> Result<i64> {
        self.wrapped.add(instant, safe_multiply(amount, i64::from(self.divisor))?)
    }

    fn add_wrap_field(&self, instant: i64, amount: i32) -> Result<i64> {
        let value = wrapped_value(self.get(instant)?, amount, self.min, self.max)?;
        self.set(instant, value)
    }

    fn difference_as_long(&self, minuend: i64, subtrahend: i64) -> Result<i64> {
        Ok(self.wrapped.difference_as_long(minuend, subtrahend)? / i64::from(self.divisor))
    }

    fn difference(&self, minuend: i64, subtrahend: i64) -> Result<i32> {
        Ok(self.wrapped.difference(minuend, subtrahend)? / self.divisor)
    }

    fn duration_field(&self) -> &dyn DurationField {
        &*self.duration
    }

    fn range_duration_field(&self) -> Option<&dyn DurationField> {
        self.range.as_deref()
    }

    fn minimum_value(&self) -> Result<i32> {
        Ok(self.min)
    }

    fn maximum_value(&self) -> Result<i32> {
        Ok(self.max)
    }

    fn round_floor(&self, instant: i64) -> Result<i64> {
        let start = self.wrapped.set(instant, self.get(instant)? * self.divisor)?;
        self.wrapped.round_floor(start)
    }
}


/// The wrapped field’s value modulo a fixed divisor, always in
/// `0 .. divisor`. Year-of-century is year-of-era modulo 100.
#[derive(Debug, Clone)]
pub struct RemainderDateTimeField {
    wrapped: DateTimeFieldRef,
    field_type: DateTimeFieldType,
    range: DurationFieldRef,
    divisor: i32,
}

impl RemainderDateTimeField {
    pub fn new(wrapped: DateTimeFieldRef, range: DurationFieldRef, field_type: DateTimeFieldType, divisor: i32) -> Result<Self> {
        if divisor < 2 {
            return Err(Error::invalid("The divisor must be at least 2"));
        }
        Ok(RemainderDateTimeField { wrapped, field_type, range, divisor })
    }

    /// The remainder counterpart of a divided field, ranging over the
    /// divided field’s unit.
    pub fn from_divided(divided: &DividedDateTimeField, field_type: DateTimeFieldType) -> Self {
        RemainderDateTimeField {
            wrapped: divided.wrapped.clone(),
            field_type,
            range: divided.duration_handle(),
            divisor: divided.divisor,
        }
    }
}

impl DateTimeField for RemainderDateTimeField {
    fn field_type(&self) -> DateTimeFieldType {
        self.field_type
    }

    fn get(&self, instant: i64) -> Result<i32> {
        Ok(self.wrapped.get(instant)?.rem_euclid(self.divisor))
    }

    fn set(&self, instant: i64, value: i32) -> Result<i64> {
        verify_value_bounds(self.field_type, i64::from(value), 0, i64::from(self.divisor) - 1)?;
        let divided = self.wrapped.get(instant)?.div_euclid(self.divisor);
        self.wrapped.set(instant, divided * self.divisor + value)
    }

    fn add_wrap_field(&self, instant: i64, amount: i32) -> Result<i64> {
        let value = wrapped_value(self.get(instant)?, amount, 0, self.divisor - 1)?;
        self.set(instant, value)
    }

    fn duration_field(&self) -> &dyn DurationField {
        self.wrapped.duration_field()
    }

    fn range_duration_field(&self) -> Option<&dyn DurationField> {
        Some(&*self.range)
    }

    fn minimum_value(&self) -> Result<i32> {
        Ok(0)
    }

    fn maximum_value(&self) -> Result<i32> {
        Ok(self.divisor - 1)
    }

    fn round_floor(&self, instant: i64) -> Result<i64> {
        self.wrapped.round_floor(instant)
    }

    fn round_ceiling(&self, instant: i64) -> Result<i64> {
        self.wrapped.round_ceiling(instant)
    }

    fn remainder(&self, instant: i64) -> Result<i64> {
        self.wrapped.remainder(instant)
    }
}


/// The wrapped field’s value shifted by a constant.
#[derive(Debug, Clone)]
pub struct OffsetDateTimeField {
    wrapped: DateTimeFieldRef,
    field_type: DateTimeFieldType,
    offset: i32,
    min: i32,
    max: i32,
}

impl OffsetDateTimeField {
    pub fn new(wrapped: DateTimeFieldRef, field_type: DateTimeFieldType, offset: i32) -> Result<Self> {
        if offset == 0 {
            return Err(Error::invalid("The offset cannot be zero"));
        }

        let min = wrapped.minimum_value()? + offset;
        let max = wrapped.maximum_value()? + offset;
        Ok(OffsetDateTimeField { wrapped, field_type, offset, min, max })
    }
}

impl DateTimeField for OffsetDateTimeField {
    fn field_type(&self) -> DateTimeFieldType {
        self.field_type
    }

    fn get(&self, instant: i64) -> Result<i32> {
        Ok(self.wrapped.get(instant)? + self.offset)
    }

    fn set(&self, instant: i64, value: i32) -> Result<i64> {
        verify_value_bounds(self.field_type, i64::from(value), i64::from(self.min), i64::from(self.max))?;
        self.wrapped.set(instant, value - self.offset)
    }

    fn add(&self, instant: i64, amount: i64) -> Result<i64> {
        let result = self.wrapped.add(instant, amount)?;
        verify_value_bounds(self.field_type, i64::from(self.get(result)?), i64::from(self.min), i64::from(self.max))?;
        Ok(result)
    }

    fn add_wrap_field(&self, instant: i64, amount: i32) -> Result<i64> {
        let value = wrapped_value(self.get(instant)?, amount, self.min, self.max)?;
        self.set(instant, value)
    }

    fn difference_as_long(&self, minuend: i64, subtrahend: i64) -> Result<i64> {
        self.wrapped.difference_as_long(minuend, subtrahend)
    }

    fn duration_field(&self) -> &dyn DurationField {
        self.wrapped.duration_field()
    }

    fn range_duration_field(&self) -> Option<&dyn DurationField> {
        self.wrapped.range_duration_field()
    }

    fn leap_duration_field(&self) -> Option<&dyn DurationField> {
        self.wrapped.leap_duration_field()
    }

    fn is_leap(&self, instant: i64) -> Result<bool> {
        self.wrapped.is_leap(instant)
    }

    fn leap_amount(&self, instant: i64) -> Result<i32> {
        self.wrapped.leap_amount(instant)
    }

    fn minimum_value(&self) -> Result<i32> {
        Ok(self.min)
    }

    fn maximum_value(&self) -> Result<i32> {
        Ok(self.max)
    }

    fn round_floor(&self, instant: i64) -> Result<i64> {
        self.wrapped.round_floor(instant)
    }

    fn round_ceiling(&self, instant: i64) -> Result<i64> {
        self.wrapped.round_ceiling(instant)
    }

    fn remainder(&self, instant: i64) -> Result<i64> {
        self.wrapped.remainder(instant)
    }
}


/// Presents a zero-based field as one-based, with zero reported as the
/// maximum: hour 0 becomes clock hour 24 (or 12 on a half-day clock).
#[derive(Debug, Clone)]
pub struct ZeroIsMaxDateTimeField {
    wrapped: DateTimeFieldRef,
    field_type: DateTimeFieldType,
}

impl ZeroIsMaxDateTimeField {
    pub fn new(wrapped: DateTimeFieldRef, field_type: DateTimeFieldType) -> Result<Self> {
        if wrapped.minimum_value()? != 0 {
            return Err(Error::invalid("Wrapped field's minimum value must be zero"));
        }
        Ok(ZeroIsMaxDateTimeField { wrapped, field_type })
    }
}

impl DateTimeField for ZeroIsMaxDateTimeField {
    fn field_type(&self) -> DateTimeFieldType {
        self.field_type
    }

    fn get(&self, instant: i64) -> Result<i32> {
        match self.wrapped.get(instant)? {
            0     => self.maximum_value(),
            value => Ok(value),
        }
    }

    fn set(&self, instant: i64, value: i32) -> Result<i64> {
        let max = self.maximum_value()?;
        verify_value_bounds(self.field_type, i64::from(value), 1, i64::from(max))?;
        self.wrapped.set(instant, if value == max { 0 } else { value })
    }

    fn add(&self, instant: i64, amount: i64) -> Result<i64> {
        self.wrapped.add(instant, amount)
    }

    fn add_wrap_field(&self, instant: i64, amount: i32) -> Result<i64> {
        self.wrapped.add_wrap_field(instant, amount)
    }

    fn difference_as_long(&self, minuend: i64, subtrahend: i64) -> Result<i64> {
        self.wrapped.difference_as_long(minuend, subtrahend)
    }

    fn duration_field(&self) -> &dyn DurationField {
        self.wrapped.duration_field()
    }

    fn range_duration_field(&self) -> Option<&dyn DurationField> {
        self.wrapped.range_duration_field()
    }

    fn minimum_value(&self) -> Result<i32> {
        Ok(1)
    }

    fn minimum_value_for(&self, _partial: &Partial, _values: &[i32]) -> Result<i32> {
        Ok(1)
    }

    fn maximum_value(&self) -> Result<i32> {
        Ok(self.wrapped.maximum_value()? + 1)
    }

    fn maximum_value_at(&self, instant: i64) -> Result<i32> {
        Ok(self.wrapped.maximum_value_at(instant)? + 1)
    }

    fn maximum_value_for(&self, partial: &Partial, values: &[i32]) -> Result<i32> {
        Ok(self.wrapped.maximum_value_for(partial, values)? + 1)
    }

    fn round_floor(&self, instant: i64) -> Result<i64> {
        self.wrapped.round_floor(instant)
    }

    fn round_ceiling(&self, instant: i64) -> Result<i64> {
        self.wrapped.round_ceiling(instant)
    }

    fn remainder(&self, instant: i64) -> Result<i64> {
        self.wrapped.remainder(instant)
    }
}


/// Lends a calendar field’s unit to a scaled duration field without
/// needing a second shared handle to the unit itself.
#[derive(Debug)]
struct WrappedUnit(DateTimeFieldRef);

impl DurationField for WrappedUnit {
    fn field_type(&self) -> crate::types::DurationFieldType { self.0.duration_field().field_type() }
    fn is_supported(&self) -> bool { self.0.duration_field().is_supported() }
    fn is_precise(&self) -> bool { self.0.duration_field().is_precise() }
    fn unit_millis(&self) -> i64 { self.0.duration_field().unit_millis() }

    fn value_as_long(&self, duration: i64) -> Result<i64> { self.0.duration_field().value_as_long(duration) }
    fn value_as_long_at(&self, duration: i64, instant: i64) -> Result<i64> { self.0.duration_field().value_as_long_at(duration, instant) }
    fn millis(&self, value: i64) -> Result<i64> { self.0.duration_field().millis(value) }
    fn millis_at(&self, value: i64, instant: i64) -> Result<i64> { self.0.duration_field().millis_at(value, instant) }
    fn add(&self, instant: i64, value: i64) -> Result<i64> { self.0.duration_field().add(instant, value) }
    fn difference_as_long(&self, minuend: i64, subtrahend: i64) -> Result<i64> { self.0.duration_field().difference_as_long(minuend, subtrahend) }
}
