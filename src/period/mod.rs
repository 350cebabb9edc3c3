//! Periods: amounts of time stated in calendar units, such as “1 year, 2
//! months and 3 days”, whose length in milliseconds depends on where on
//! the timeline they are applied.

use crate::error::{Error, Result};
use crate::types::DurationFieldType;
use crate::util::safe_add;

mod kind;
pub use self::kind::PeriodType;

mod value;
pub use self::value::Period;

mod mutable;
pub use self::mutable::MutablePeriod;


/// The values of a period, one per field of its type, in the type’s order.
/// Slots past the type’s size are always zero.
pub type PeriodValues = [i32; 8];


/// Anything that can be read as a period.
pub trait ReadablePeriod {

    /// The units this period has values for.
    fn period_type(&self) -> PeriodType;

    /// The value at a position of the period type.
    fn value(&self, index: usize) -> i32;

    fn size(&self) -> usize {
        self.period_type().size()
    }

    fn field_type(&self, index: usize) -> DurationFieldType {
        self.period_type().field_type(index)
    }

    /// The value for a unit, or zero if the period has no such field.
    fn get(&self, unit: DurationFieldType) -> i32 {
        self.period_type().index_of(unit).map_or(0, |index| self.value(index))
    }

    fn is_supported(&self, unit: DurationFieldType) -> bool {
        self.period_type().is_supported(unit)
    }

    fn values(&self) -> PeriodValues {
        let mut values = PeriodValues::default();
        for (index, value) in values.iter_mut().enumerate().take(self.size()) {
            *value = self.value(index);
        }
        values
    }

    /// An immutable copy of this period.
    fn to_period(&self) -> Period {
        Period::from_parts(self.period_type(), self.values())
    }
}


/// Stores `value` in the slot for `unit`. Setting an unsupported unit is
/// only allowed when the value is zero.
pub(crate) fn set_field_into(period_type: PeriodType, values: &mut PeriodValues, unit: DurationFieldType, value: i32) -> Result<()> {
    match period_type.index_of(unit) {
        Some(index) => {
            values[index] = value;
            Ok(())
        }
        None if value == 0 => Ok(()),
        None => Err(unsupported_field(unit)),
    }
}

/// Adds `value` to the slot for `unit`, under the same rules.
pub(crate) fn add_field_into(period_type: PeriodType, values: &mut PeriodValues, unit: DurationFieldType, value: i32) -> Result<()> {
    if value == 0 {
        return Ok(());
    }

    match period_type.index_of(unit) {
        Some(index) => {
            values[index] = safe_add(values[index], value)?;
            Ok(())
        }
        None => Err(unsupported_field(unit)),
    }
}

/// Copies every field of another period into a fresh value array for
/// `period_type`.
pub(crate) fn values_from(period_type: PeriodType, period: &dyn ReadablePeriod) -> Result<PeriodValues> {
    let mut values = PeriodValues::default();
    for index in 0 .. period.size() {
        set_field_into(period_type, &mut values, period.field_type(index), period.value(index))?;
    }
    Ok(values)
}

fn unsupported_field(unit: DurationFieldType) -> Error {
    Error::unsupported(format!("Period does not support field '{}'", unit))
}
