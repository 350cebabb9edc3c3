//! Mutable periods.

use crate::cal::Chronology;
use crate::error::{Error, Result};
use crate::period::{add_field_into, set_field_into, values_from, Period, PeriodType, PeriodValues, ReadablePeriod};
use crate::types::DurationFieldType;
use crate::util::safe_negate;


/// The mutable twin of [`Period`], for building a period up in steps.
///
/// It has a single writer: every change goes through `&mut self`, and the
/// type makes no attempt to be shared. Like `Period`, each change either
/// applies completely or leaves the values as they were.
#[derive(PartialEq, Eq, Hash, Clone, Debug, Default)]
pub struct MutablePeriod {
    period_type: PeriodType,
    values: PeriodValues,
}

macro_rules! unit_mutators {
    ($( $unit:ident: $set:ident, $add:ident ),* $(,)?) => {
        $(
            pub fn $set(&mut self, value: i32) -> Result<()> {
                self.set(DurationFieldType::$unit, value)
            }

            pub fn $add(&mut self, value: i32) -> Result<()> {
                self.add(DurationFieldType::$unit, value)
            }
        )*
    };
}

impl MutablePeriod {

    /// An all-zero period of the given type.
    pub fn new(period_type: PeriodType) -> MutablePeriod {
        MutablePeriod { period_type, values: PeriodValues::default() }
    }

    /// A copy of another period, under that period’s type.
    pub fn from_period(period: &dyn ReadablePeriod) -> MutablePeriod {
        MutablePeriod { period_type: period.period_type(), values: period.values() }
    }

    pub fn period_type(&self) -> PeriodType {
        self.period_type
    }

    /// Sets every unit back to zero.
    pub fn clear(&mut self) {
        self.values = PeriodValues::default();
    }

    /// Sets the value at a position of the period type. Positions past the
    /// last unit are rejected.
    pub fn set_value(&mut self, index: usize, value: i32) -> Result<()> {
        let size = self.period_type.size();
        if index >= size {
            return Err(Error::invalid(format!("Index {} out of range for {} with {} fields", index, self.period_type, size)));
        }

        self.values[index] = value;
        Ok(())
    }

    /// Sets the value of one unit.
    pub fn set(&mut self, unit: DurationFieldType, value: i32) -> Result<()> {
        set_field_into(self.period_type, &mut self.values, unit, value)
    }

    /// Adds to the value of one unit.
    pub fn add(&mut self, unit: DurationFieldType, value: i32) -> Result<()> {
        add_field_into(self.period_type, &mut self.values, unit, value)
    }

    unit_mutators! {
        Years:   set_years,   add_years,
        Months:  set_months,  add_months,
        Weeks:   set_weeks,   add_weeks,
        Days:    set_days,    add_days,
        Hours:   set_hours,   add_hours,
        Minutes: set_minutes, add_minutes,
        Seconds: set_seconds, add_seconds,
        Millis:  set_millis,  add_millis,
    }

    /// Replaces every value with those of another period. Units this
    /// period’s type lacks must be zero in the other.
    pub fn set_period(&mut self, period: &dyn ReadablePeriod) -> Result<()> {
        self.values = values_from(self.period_type, period)?;
        Ok(())
    }

    /// Adds another period unit by unit.
    pub fn add_period(&mut self, period: &dyn ReadablePeriod) -> Result<()> {
        let mut values = self.values;
        for index in 0 .. period.size() {
            add_field_into(self.period_type, &mut values, period.field_type(index), period.value(index))?;
        }
        self.values = values;
        Ok(())
    }

    /// Replaces the values of every unit the other period has, keeping the
    /// rest.
    pub fn merge_period(&mut self, period: &dyn ReadablePeriod) -> Result<()> {
        let mut values = self.values;
        for index in 0 .. period.size() {
            set_field_into(self.period_type, &mut values, period.field_type(index), period.value(index))?;
        }
        self.values = values;
        Ok(())
    }

    /// Sets this period to the span between two instants, as measured in
    /// a chronology.
    pub fn set_between(&mut self, start: i64, end: i64, chronology: &dyn Chronology) -> Result<()> {
        self.values = chronology.period_values(self.period_type, start, end)?;
        Ok(())
    }

    /// Adds the span between two instants, as measured in a chronology.
    pub fn add_between(&mut self, start: i64, end: i64, chronology: &dyn Chronology) -> Result<()> {
        if start == end {
            return Ok(());
        }
        let between = Period::between(start, end, self.period_type, chronology)?;
        self.add_period(&between)
    }

    /// Adds a millisecond duration, split into this period’s precise units.
    pub fn add_duration(&mut self, duration: i64, chronology: &dyn Chronology) -> Result<()> {
        if duration == 0 {
            return Ok(());
        }
        let split = Period::from_duration(duration, self.period_type, chronology)?;
        self.add_period(&split)
    }

    /// Negates every value.
    pub fn negate(&mut self) -> Result<()> {
        let mut values = self.values;
        for value in values.iter_mut() {
            *value = safe_negate(*value)?;
        }
        self.values = values;
        Ok(())
    }

    /// An immutable copy.
    pub fn to_period(&self) -> Period {
        Period::from_parts(self.period_type, self.values)
    }
}

impl ReadablePeriod for MutablePeriod {
    fn period_type(&self) -> PeriodType {
        self.period_type
    }

    fn value(&self, index: usize) -> i32 {
        self.values[index]
    }

    fn values(&self) -> PeriodValues {
        self.values
    }
}
