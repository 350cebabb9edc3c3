//! Duration fields whose unit length never depends on the instant.

use crate::error::{Error, Result};
use crate::field::{add_precise, DurationField, DurationFieldRef};
use crate::types::DurationFieldType;
use crate::util::{safe_multiply, safe_subtract, safe_to_int};


/// The millisecond unit itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct MillisDurationField;

impl DurationField for MillisDurationField {
    fn field_type(&self) -> DurationFieldType { DurationFieldType::Millis }
    fn is_precise(&self) -> bool { true }
    fn unit_millis(&self) -> i64 { 1 }

    fn value_as_long(&self, duration: i64) -> Result<i64> { Ok(duration) }
    fn value_as_long_at(&self, duration: i64, _instant: i64) -> Result<i64> { Ok(duration) }
    fn millis(&self, value: i64) -> Result<i64> { Ok(value) }
    fn millis_at(&self, value: i64, _instant: i64) -> Result<i64> { Ok(value) }

    fn add(&self, instant: i64, value: i64) -> Result<i64> {
        crate::util::safe_add(instant, value)
    }

    fn difference_as_long(&self, minuend: i64, subtrahend: i64) -> Result<i64> {
        safe_subtract(minuend, subtrahend)
    }
}


/// A unit with a fixed length in milliseconds: seconds, hours, days.
#[derive(Debug, Clone, Copy)]
pub struct PreciseDurationField {
    field_type: DurationFieldType,
    unit_millis: i64,
}

impl PreciseDurationField {
    pub fn new(field_type: DurationFieldType, unit_millis: i64) -> Self {
        PreciseDurationField { field_type, unit_millis }
    }
}

impl DurationField for PreciseDurationField {
    fn field_type(&self) -> DurationFieldType { self.field_type }
    fn is_precise(&self) -> bool { true }
    fn unit_millis(&self) -> i64 { self.unit_millis }

    fn value_as_long_at(&self, duration: i64, _instant: i64) -> Result<i64> {
        Ok(duration / self.unit_millis)
    }

    fn millis_at(&self, value: i64, _instant: i64) -> Result<i64> {
        safe_multiply(value, self.unit_millis)
    }

    fn add(&self, instant: i64, value: i64) -> Result<i64> {
        add_precise(instant, value, self.unit_millis)
    }

    fn difference_as_long(&self, minuend: i64, subtrahend: i64) -> Result<i64> {
        Ok(safe_subtract(minuend, subtrahend)? / self.unit_millis)
    }
}


/// A whole multiple of another unit, such as centuries over years.
///
/// Precision follows the wrapped field: a century is exactly as precise as
/// the years it is counted in.
#[derive(Debug, Clone)]
pub struct ScaledDurationField {
    wrapped: DurationFieldRef,
    field_type: DurationFieldType,
    scalar: i32,
}

impl ScaledDurationField {
    pub fn new(wrapped: DurationFieldRef, field_type: DurationFieldType, scalar: i32) -> Result<Self> {
        if scalar == 0 || scalar == 1 {
            return Err(Error::invalid("The scalar must not be 0 or 1"));
        }

        Ok(ScaledDurationField { wrapped, field_type, scalar })
    }

    pub fn scalar(&self) -> i32 {
        self.scalar
    }

    fn scaled(&self, value: i64) -> Result<i64> {
        safe_multiply(value, i64::from(self.scalar))
    }
}

impl DurationField for ScaledDurationField {
    fn field_type(&self) -> DurationFieldType { self.field_type }
    fn is_supported(&self) -> bool { self.wrapped.is_supported() }
    fn is_precise(&self) -> bool { self.wrapped.is_precise() }

    fn unit_millis(&self) -> i64 {
        self.wrapped.unit_millis().saturating_mul(i64::from(self.scalar))
    }

    fn value(&self, duration: i64) -> Result<i32> {
        safe_to_int(self.value_as_long(duration)?)
    }

    fn value_as_long(&self, duration: i64) -> Result<i64> {
        Ok(self.wrapped.value_as_long(duration)? / i64::from(self.scalar))
    }

    fn value_as_long_at(&self, duration: i64, instant: i64) -> Result<i64> {
        Ok(self.wrapped.value_as_long_at(duration, instant)? / i64::from(self.scalar))
    }

    fn millis(&self, value: i64) -> Result<i64> {
        self.wrapped.millis(self.scaled(value)?)
    }

    fn millis_at(&self, value: i64, instant: i64) -> Result<i64> {
        self.wrapped.millis_at(self.scaled(value)?, instant)
    }

    fn add(&self, instant: i64, value: i64) -> Result<i64> {
        self.wrapped.add(instant, self.scaled(value)?)
    }

    fn difference_as_long(&self, minuend: i64, subtrahend: i64) -> Result<i64> {
        Ok(self.wrapped.difference_as_long(minuend, subtrahend)? / i64::from(self.scalar))
    }
}


/// Stands in for a unit the chronology has no notion of, such as eras in
/// a calendar without them. Every conversion fails.
#[derive(Debug, Clone, Copy)]
pub struct UnsupportedDurationField {
    field_type: DurationFieldType,
}

impl UnsupportedDurationField {
    pub fn new(field_type: DurationFieldType) -> Self {
        UnsupportedDurationField { field_type }
    }

    fn fail<T>(&self) -> Result<T> {
        Err(Error::unsupported(format!("{} field is unsupported", self.field_type)))
    }
}

impl DurationField for UnsupportedDurationField {
    fn field_type(&self) -> DurationFieldType { self.field_type }
    fn is_supported(&self) -> bool { false }
    fn is_precise(&self) -> bool { true }
    fn unit_millis(&self) -> i64 { 0 }

    fn value(&self, _duration: i64) -> Result<i32> { self.fail() }
    fn value_as_long(&self, _duration: i64) -> Result<i64> { self.fail() }
    fn value_as_long_at(&self, _duration: i64, _instant: i64) -> Result<i64> { self.fail() }
    fn millis(&self, _value: i64) -> Result<i64> { self.fail() }
    fn millis_at(&self, _value: i64, _instant: i64) -> Result<i64> { self.fail() }
    fn add(&self, _instant: i64, _value: i64) -> Result<i64> { self.fail() }
    fn difference_as_long(&self, _minuend: i64, _subtrahend: i64) -> Result<i64> { self.fail() }
}


#[cfg(test)]
mod test {
    use super::*;
    use std::cmp::Ordering;
    use std::sync::Arc;

    mod precise {
        use super::*;

        #[test]
        fn difference_truncates_towards_zero() {
            let hours = PreciseDurationField::new(DurationFieldType::Hours, 3_600_000);
            assert_eq!(hours.difference(7_199_999, 0), Ok(1));
            assert_eq!(hours.difference(-7_199_999, 0), Ok(-1));
        }

        #[test]
        fn add_then_difference() {
            let days = PreciseDurationField::new(DurationFieldType::Days, 86_400_000);
            for value in &[-400, -1, 0, 1, 29, 366] {
                let added = days.add(123_456, *value).unwrap();
                assert_eq!(days.difference_as_long(added, 123_456), Ok(*value));
            }
        }

        #[test]
        fn overflow_fails() {
            let days = PreciseDurationField::new(DurationFieldType::Days, 86_400_000);
            assert!(days.add(i64::MAX - 10, 1).unwrap_err().is_overflow());
            assert!(days.millis(i64::MAX / 1000).unwrap_err().is_overflow());
        }
    }

    mod scaled {
        use super::*;

        #[test]
        fn centuries_of_days() {
            let days: DurationFieldRef = Arc::new(PreciseDurationField::new(DurationFieldType::Days, 86_400_000));
            let weeks = ScaledDurationField::new(days, DurationFieldType::Weeks, 7).unwrap();
            assert_eq!(weeks.unit_millis(), 604_800_000);
            assert_eq!(weeks.add(0, 2), Ok(1_209_600_000));
            assert_eq!(weeks.difference(1_209_599_999, 0), Ok(1));
        }

        #[test]
        fn scalar_of_one_rejected() {
            let millis: DurationFieldRef = Arc::new(MillisDurationField);
            assert!(ScaledDurationField::new(millis, DurationFieldType::Seconds, 1).is_err());
        }
    }

    mod ordering {
        use super::*;

        #[test]
        fn unsupported_sorts_last() {
            let eras = UnsupportedDurationField::new(DurationFieldType::Eras);
            let millis = MillisDurationField;
            assert_eq!(millis.compare_units(&eras), Ordering::Less);
            assert_eq!(eras.compare_units(&millis), Ordering::Greater);
            assert_eq!(eras.compare_units(&eras), Ordering::Equal);
        }

        #[test]
        fn unsupported_operations_fail() {
            let eras = UnsupportedDurationField::new(DurationFieldType::Eras);
            assert!(eras.add(0, 1).unwrap_err().is_unsupported());
        }
    }
}
