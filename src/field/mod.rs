//! Units of time and calendar fields, and the generic building blocks that
//! chronologies assemble their field tables from.
//!
//! Two traits do the work here. A [`DurationField`] converts between a
//! count of some unit and a span of milliseconds; a [`DateTimeField`] reads
//! and writes one calendar component of an instant. Most methods have a
//! default body written purely in terms of a handful of required ones, so a
//! concrete field only supplies what is genuinely specific to it.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::partial::Partial;
use crate::types::{DateTimeFieldType, DurationFieldType};
use crate::util::{safe_add, safe_multiply, safe_negate, safe_subtract, safe_to_int, verify_value_bounds, wrapped_value};

mod duration;
pub use self::duration::{MillisDurationField, PreciseDurationField, ScaledDurationField, UnsupportedDurationField};

mod precise;
pub use self::precise::{PreciseDateTimeField, PreciseUnit};

mod derived;
pub use self::derived::{DividedDateTimeField, OffsetDateTimeField, RemainderDateTimeField, ZeroIsMaxDateTimeField};

mod unsupported;
pub use self::unsupported::UnsupportedDateTimeField;

mod leniency;
pub use self::leniency::{LenientDateTimeField, StrictDateTimeField};


/// Shared handle to a duration field.
pub type DurationFieldRef = Arc<dyn DurationField>;

/// Shared handle to a calendar field.
pub type DateTimeFieldRef = Arc<dyn DateTimeField>;


/// A unit of elapsed time, converting between unit counts and milliseconds.
///
/// Precise fields have a fixed unit length. Imprecise ones (months, years)
/// can only be converted relative to an instant, so the `_at` variants and
/// `add` are the authoritative operations for them.
pub trait DurationField: fmt::Debug + Send + Sync {

    fn field_type(&self) -> DurationFieldType;

    fn is_supported(&self) -> bool {
        true
    }

    /// Whether `unit_millis` is the exact, instant-independent unit length.
    fn is_precise(&self) -> bool;

    /// The exact unit length if precise, otherwise an average.
    fn unit_millis(&self) -> i64;

    fn value(&self, duration: i64) -> Result<i32> {
        safe_to_int(self.value_as_long(duration)?)
    }

    fn value_as_long(&self, duration: i64) -> Result<i64> {
        Ok(duration / self.unit_millis())
    }

    fn value_at(&self, duration: i64, instant: i64) -> Result<i32> {
        safe_to_int(self.value_as_long_at(duration, instant)?)
    }

    /// Converts a span that starts at `instant` into whole units.
    fn value_as_long_at(&self, duration: i64, instant: i64) -> Result<i64>;

    fn millis(&self, value: i64) -> Result<i64> {
        safe_multiply(value, self.unit_millis())
    }

    /// The length of `value` units starting at `instant`.
    fn millis_at(&self, value: i64, instant: i64) -> Result<i64>;

    /// Moves an instant forward (or back) by whole units.
    fn add(&self, instant: i64, value: i64) -> Result<i64>;

    fn subtract(&self, instant: i64, value: i64) -> Result<i64> {
        self.add(instant, safe_negate(value)?)
    }

    fn difference(&self, minuend: i64, subtrahend: i64) -> Result<i32> {
        safe_to_int(self.difference_as_long(minuend, subtrahend)?)
    }

    /// The whole number of units between two instants, so that adding the
    /// result to the subtrahend never passes the minuend.
    fn difference_as_long(&self, minuend: i64, subtrahend: i64) -> Result<i64>;

    /// Orders units by length, with unsupported units after everything.
    fn compare_units(&self, other: &dyn DurationField) -> Ordering {
        match (self.is_supported(), other.is_supported()) {
            (false, false) => Ordering::Equal,
            (false, true)  => Ordering::Greater,
            (true,  false) => Ordering::Less,
            (true,  true)  => self.unit_millis().cmp(&other.unit_millis()),
        }
    }
}


/// One calendar component of an instant, such as the month or the hour.
pub trait DateTimeField: fmt::Debug + Send + Sync {

    fn field_type(&self) -> DateTimeFieldType;

    fn is_supported(&self) -> bool {
        true
    }

    /// Lenient fields clamp out-of-range values on `set` rather than fail.
    fn is_lenient(&self) -> bool {
        false
    }

    fn get(&self, instant: i64) -> Result<i32>;

    /// Replaces this field’s value, adjusting smaller fields only when the
    /// result would otherwise be invalid.
    fn set(&self, instant: i64, value: i32) -> Result<i64>;

    /// Adds whole units, carrying into larger fields.
    fn add(&self, instant: i64, value: i64) -> Result<i64> {
        self.duration_field().add(instant, value)
    }

    /// Adds whole units, wrapping within this field’s range and leaving
    /// larger fields alone.
    fn add_wrap_field(&self, instant: i64, value: i32) -> Result<i64> {
        let current = self.get(instant)?;
        let wrapped = wrapped_value(current, value, self.minimum_value_at(instant)?, self.maximum_value_at(instant)?)?;
        self.set(instant, wrapped)
    }

    fn difference(&self, minuend: i64, subtrahend: i64) -> Result<i32> {
        self.duration_field().difference(minuend, subtrahend)
    }

    fn difference_as_long(&self, minuend: i64, subtrahend: i64) -> Result<i64> {
        self.duration_field().difference_as_long(minuend, subtrahend)
    }

    fn duration_field(&self) -> &dyn DurationField;

    /// The unit this field is bounded by, if any.
    fn range_duration_field(&self) -> Option<&dyn DurationField>;

    /// The unit a leap is measured in, for fields with leaps.
    fn leap_duration_field(&self) -> Option<&dyn DurationField> {
        None
    }

    fn is_leap(&self, _instant: i64) -> Result<bool> {
        Ok(false)
    }

    fn leap_amount(&self, _instant: i64) -> Result<i32> {
        Ok(0)
    }

    fn minimum_value(&self) -> Result<i32>;

    fn minimum_value_at(&self, _instant: i64) -> Result<i32> {
        self.minimum_value()
    }

    fn minimum_value_for(&self, _partial: &Partial, _values: &[i32]) -> Result<i32> {
        self.minimum_value()
    }

    fn maximum_value(&self) -> Result<i32>;

    fn maximum_value_at(&self, _instant: i64) -> Result<i32> {
        self.maximum_value()
    }

    fn maximum_value_for(&self, _partial: &Partial, _values: &[i32]) -> Result<i32> {
        self.maximum_value()
    }

    /// The start of the unit containing the instant.
    fn round_floor(&self, instant: i64) -> Result<i64>;

    fn round_ceiling(&self, instant: i64) -> Result<i64> {
        let floor = self.round_floor(instant)?;
        if floor == instant {
            Ok(instant)
        }
        else {
            self.add(floor, 1)
        }
    }

    /// Rounds to the nearest boundary, preferring the floor on a tie.
    fn round_half_floor(&self, instant: i64) -> Result<i64> {
        let (floor, ceiling) = (self.round_floor(instant)?, self.round_ceiling(instant)?);
        if instant.abs_diff(floor) <= ceiling.abs_diff(instant) { Ok(floor) } else { Ok(ceiling) }
    }

    /// Rounds to the nearest boundary, preferring the ceiling on a tie.
    fn round_half_ceiling(&self, instant: i64) -> Result<i64> {
        let (floor, ceiling) = (self.round_floor(instant)?, self.round_ceiling(instant)?);
        if ceiling.abs_diff(instant) <= instant.abs_diff(floor) { Ok(ceiling) } else { Ok(floor) }
    }

    /// Rounds to the nearest boundary; a tie goes to whichever boundary
    /// makes this field’s value even.
    fn round_half_even(&self, instant: i64) -> Result<i64> {
        let (floor, ceiling) = (self.round_floor(instant)?, self.round_ceiling(instant)?);
        let (from_floor, to_ceiling) = (instant.abs_diff(floor), ceiling.abs_diff(instant));

        match from_floor.cmp(&to_ceiling) {
            Ordering::Less     => Ok(floor),
            Ordering::Greater  => Ok(ceiling),
            Ordering::Equal    => {
                if self.get(ceiling)? & 1 == 0 { Ok(ceiling) } else { Ok(floor) }
            }
        }
    }

    /// The milliseconds elapsed since the floor.
    fn remainder(&self, instant: i64) -> Result<i64> {
        safe_subtract(instant, self.round_floor(instant)?)
    }

    /// Adds to the value at `index` of a partial, carrying into the next
    /// larger field the partial holds. Carrying out of the largest field is
    /// an error.
    fn add_partial(&self, partial: &Partial, index: usize, values: &mut [i32], amount: i32) -> Result<()> {
        add_partial_carrying(self, partial, index, values, amount, false)
    }

    /// Like `add_partial`, but wraps around once the largest field held by
    /// the partial runs out of room.
    fn add_wrap_partial(&self, partial: &Partial, index: usize, values: &mut [i32], amount: i32) -> Result<()> {
        add_partial_carrying(self, partial, index, values, amount, true)
    }

    /// Wraps the value at `index` within this field’s range only.
    fn add_wrap_field_partial(&self, partial: &Partial, index: usize, values: &mut [i32], amount: i32) -> Result<()> {
        let min = self.minimum_value_for(partial, values)?;
        let max = self.maximum_value_for(partial, values)?;
        let wrapped = wrapped_value(values[index], amount, min, max)?;
        self.set_partial(partial, index, values, wrapped)
    }

    /// Replaces the value at `index`, then pulls every smaller field back
    /// into its range.
    fn set_partial(&self, partial: &Partial, index: usize, values: &mut [i32], value: i32) -> Result<()> {
        let min = self.minimum_value_for(partial, values)?;
        let max = self.maximum_value_for(partial, values)?;
        verify_value_bounds(self.field_type(), i64::from(value), i64::from(min), i64::from(max))?;
        values[index] = value;

        for i in index + 1 .. partial.size() {
            let field = partial.field(i);
            let max = field.maximum_value_for(partial, values)?;
            if values[i] > max {
                values[i] = max;
            }
            let min = field.minimum_value_for(partial, values)?;
            if values[i] < min {
                values[i] = min;
            }
        }

        Ok(())
    }
}


/// The carry loop behind both partial add variants: bump the next larger
/// field one step at a time until this field’s value fits.
pub(crate) fn add_partial_carrying<F>(field: &F, partial: &Partial, index: usize, values: &mut [i32], amount: i32, wrap: bool) -> Result<()>
where F: DateTimeField + ?Sized
{
    if amount == 0 {
        return Ok(());
    }

    let mut remaining = i64::from(amount);
    let mut next_field = None;

    while remaining != 0 {
        let (min, max) = (field.minimum_value_for(partial, values)?, field.maximum_value_for(partial, values)?);
        let proposed = i64::from(values[index]) + remaining;
        if proposed >= i64::from(min) && proposed <= i64::from(max) {
            values[index] = proposed as i32;
            break;
        }

        let step = if remaining > 0 { 1 } else { -1 };
        let boundary = if step > 0 { i64::from(max) + 1 } else { i64::from(min) - 1 };
        remaining -= boundary - i64::from(values[index]);

        if next_field.is_none() {
            if index == 0 {
                if !wrap {
                    return Err(Error::invalid(if step > 0 { "Maximum value exceeded for add" } else { "Minimum value exceeded for add" }));
                }
            }
            else {
                let larger = partial.field(index - 1);
                let carries = field.range_duration_field()
                                   .map_or(false, |range| range.field_type() == larger.duration_field().field_type());
                if !carries {
                    return Err(Error::invalid("Fields invalid for add"));
                }
                next_field = Some(larger);
            }
        }

        if let Some(larger) = next_field {
            if wrap {
                larger.add_wrap_partial(partial, index - 1, values, step)?;
            }
            else {
                larger.add_partial(partial, index - 1, values, step)?;
            }
        }

        values[index] = if step > 0 { field.minimum_value_for(partial, values)? }
                                else { field.maximum_value_for(partial, values)? };
    }

    let value = values[index];
    field.set_partial(partial, index, values, value)
}


/// Whether two field handles point at the very same field object.
pub(crate) fn same_field<T: ?Sized>(a: &T, b: &T) -> bool {
    std::ptr::addr_eq(a as *const T, b as *const T)
}

/// Shifts an instant by `value` units of an exact length.
pub(crate) fn add_precise(instant: i64, value: i64, unit_millis: i64) -> Result<i64> {
    safe_add(instant, safe_multiply(value, unit_millis)?)
}
