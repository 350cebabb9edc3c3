//! Misc stuff: range checks and overflow-checked arithmetic.

use std::ops::RangeInclusive;

use num_traits::{CheckedAdd, CheckedMul, CheckedNeg, CheckedSub};

use crate::error::{Error, Result};
use crate::types::DateTimeFieldType;


pub(crate) trait RangeExt {

    /// Returns whether this value exists within the given range of values.
    fn is_within(&self, range: RangeInclusive<Self>) -> bool where Self: Sized;
}

// Define RangeExt on *anything* that can be compared, though it’s only
// really ever used for numeric ranges...

impl<T> RangeExt for T where T: PartialOrd<T> {
    fn is_within(&self, range: RangeInclusive<Self>) -> bool {
        range.contains(self)
    }
}


/// Adds two values, failing instead of wrapping.
pub fn safe_add<T: CheckedAdd>(a: T, b: T) -> Result<T> {
    a.checked_add(&b).ok_or(Error::Overflow("addition"))
}

/// Subtracts two values, failing instead of wrapping.
pub fn safe_subtract<T: CheckedSub>(a: T, b: T) -> Result<T> {
    a.checked_sub(&b).ok_or(Error::Overflow("subtraction"))
}

/// Multiplies two values, failing instead of wrapping.
pub fn safe_multiply<T: CheckedMul>(a: T, b: T) -> Result<T> {
    a.checked_mul(&b).ok_or(Error::Overflow("multiplication"))
}

/// Negates a value; the most negative value has no positive twin.
pub fn safe_negate<T: CheckedNeg>(a: T) -> Result<T> {
    a.checked_neg().ok_or(Error::Overflow("negation"))
}

/// Narrows a 64-bit value to a 32-bit field value.
pub fn safe_to_int(value: i64) -> Result<i32> {
    i32::try_from(value).map_err(|_| Error::Overflow("value cannot fit in an int"))
}

/// Checks that a field value lies within its bounds (both inclusive).
pub fn verify_value_bounds(field: DateTimeFieldType, value: i64, lower: i64, upper: i64) -> Result<()> {
    if value.is_within(lower ..= upper) {
        Ok(())
    }
    else {
        Err(Error::field_value(field, value, lower, upper))
    }
}

/// Adds `amount` to `current` and wraps the sum back into `[min, max]`.
///
/// ### Examples
///
/// ```
/// use chronology::util::wrapped_value;
///
/// assert_eq!(wrapped_value(11, 3, 1, 12).unwrap(), 2);
/// assert_eq!(wrapped_value(1, -1, 1, 12).unwrap(), 12);
/// ```
pub fn wrapped_value(current: i32, amount: i32, min: i32, max: i32) -> Result<i32> {
    if min >= max {
        return Err(Error::invalid("MIN > MAX"));
    }

    let range = i64::from(max) - i64::from(min) + 1;
    let offset = i64::from(current) + i64::from(amount) - i64::from(min);
    Ok((offset.rem_euclid(range) + i64::from(min)) as i32)
}
