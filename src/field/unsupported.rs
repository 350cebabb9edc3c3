use crate::error::{Error, Result};
use crate::field::{DateTimeField, DurationField, DurationFieldRef};
use crate::partial::Partial;
use crate::types::DateTimeFieldType;


/// Placeholder for a field kind a chronology does not support. Only the
/// unit is meaningful; everything that reads or writes a value fails.
#[derive(Debug, Clone)]
pub struct UnsupportedDateTimeField {
    field_type: DateTimeFieldType,
    duration: DurationFieldRef,
}

impl UnsupportedDateTimeField {
    pub fn new(field_type: DateTimeFieldType, duration: DurationFieldRef) -> Self {
        UnsupportedDateTimeField { field_type, duration }
    }

    fn fail<T>(&self) -> Result<T> {
        Err(Error::unsupported(format!("{} field is unsupported", self.field_type)))
    }
}

impl DateTimeField for UnsupportedDateTimeField {
    fn field_type(&self) -> DateTimeFieldType { self.field_type }
    fn is_supported(&self) -> bool { false }

    fn get(&self, _instant: i64) -> Result<i32> { self.fail() }
    fn set(&self, _instant: i64, _value: i32) -> Result<i64> { self.fail() }
    fn add_wrap_field(&self, _instant: i64, _value: i32) -> Result<i64> { self.fail() }

    fn duration_field(&self) -> &dyn DurationField { &*self.duration }
    fn range_duration_field(&self) -> Option<&dyn DurationField> { None }

    fn is_leap(&self, _instant: i64) -> Result<bool> { self.fail() }
    fn leap_amount(&self, _instant: i64) -> Result<i32> { self.fail() }

    fn minimum_value(&self) -> Result<i32> { self.fail() }
    fn maximum_value(&self) -> Result<i32> { self.fail() }
    fn round_floor(&self, _instant: i64) -> Result<i64> { self.fail() }
    fn remainder(&self, _instant: i64) -> Result<i64> { self.fail() }

    fn add_partial(&self, _: &Partial, _: usize, _: &mut [i32], _: i32) -> Result<()> { self.fail() }
    fn add_wrap_partial(&self, _: &Partial, _: usize, _: &mut [i32], _: i32) -> Result<()> { self.fail() }
    fn set_partial(&self, _: &Partial, _: usize, _: &mut [i32], _: i32) -> Result<()> { self.fail() }
}
