//! The errors every fallible kernel operation can return.

use thiserror::Error;

use crate::types::DateTimeFieldType;


/// Everything that can go wrong while reading, writing, or combining
/// calendar fields.
///
/// None of these are transient: the same inputs against the same
/// chronology always produce the same error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {

    /// A field value fell outside the range the field accepts at the
    /// instant it was being applied to.
    #[error("value {value} for {field} must be in the range [{lower},{upper}]")]
    FieldValue {
        field: DateTimeFieldType,
        value: i64,
        lower: i64,
        upper: i64,
    },

    /// A local time that does not exist in a zone, because it falls in the
    /// gap left by an offset transition.
    #[error("illegal instant due to time zone offset transition: local millis {local} in zone {zone}")]
    IllegalInstant {
        local: i64,
        zone: String,
    },

    /// A structural precondition on the arguments was not met.
    #[error("{0}")]
    InvalidArgument(String),

    /// The true result does not fit in the 64-bit millisecond domain, or
    /// in a 32-bit field value.
    #[error("the calculation caused an overflow: {0}")]
    Overflow(&'static str),

    /// The field, unit, or conversion does not apply to this chronology
    /// or period type.
    #[error("{0}")]
    Unsupported(String),
}

impl Error {

    /// Builds an out-of-range error for the given field.
    pub fn field_value(field: DateTimeFieldType, value: i64, lower: i64, upper: i64) -> Error {
        Error::FieldValue { field, value, lower, upper }
    }

    pub(crate) fn invalid(message: impl Into<String>) -> Error {
        Error::InvalidArgument(message.into())
    }

    pub(crate) fn unsupported(message: impl Into<String>) -> Error {
        Error::Unsupported(message.into())
    }

    /// Whether this is an out-of-range field value, including local times
    /// that fall in a zone gap.
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, Error::FieldValue { .. } | Error::IllegalInstant { .. })
    }

    pub fn is_overflow(&self) -> bool {
        matches!(self, Error::Overflow(_))
    }

    pub fn is_unsupported(&self) -> bool {
        matches!(self, Error::Unsupported(_))
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Error::InvalidArgument(_))
    }
}

/// Shorthand for results that can fail with the kernel’s [`Error`].
pub type Result<T> = std::result::Result<T, Error>;


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn field_value_message() {
        let error = Error::field_value(DateTimeFieldType::DayOfMonth, 30, 1, 29);
        assert_eq!(error.to_string(), "value 30 for dayOfMonth must be in the range [1,29]");
        assert!(error.is_out_of_range());
    }

    #[test]
    fn categories_are_distinct() {
        assert!(Error::Overflow("addition").is_overflow());
        assert!(!Error::Overflow("addition").is_out_of_range());
        assert!(Error::unsupported("months").is_unsupported());
        assert!(Error::invalid("bad").is_invalid_argument());
    }
}
