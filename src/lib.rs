#![crate_name = "chronology"]
#![crate_type = "rlib"]

#![warn(missing_debug_implementations)]
//#![warn(missing_docs)]

#![warn(trivial_casts, trivial_numeric_casts)]
#![warn(unused_qualifications)]

//! A calendar-system kernel: the fields, arithmetic and period logic that
//! date and time types are built on, over a timeline of milliseconds since
//! 1970-01-01T00:00:00Z.
//!
//! A [`Chronology`] is a complete set of calendar fields in a time zone.
//! Everything is an `i64` instant underneath; the chronology turns
//! instants into years, months, days and hours and back, adds months
//! without landing on February 30th, and measures the period between two
//! instants.
//!
//! # Examples
//!
//! ```
//! use chronology::{iso_utc, Period, PeriodType};
//!
//! let iso = iso_utc().unwrap();
//! let start = iso.date_time_millis(2000, 1, 31, 0).unwrap();
//!
//! // a month after January 31st is the end of February
//! let end = iso.months().add(start, 1).unwrap();
//! assert_eq!(iso.day_of_month().get(end).unwrap(), 29);
//!
//! let period = Period::between(start, end, PeriodType::standard(), &*iso).unwrap();
//! assert_eq!(period.months_value(), 1);
//! ```

pub mod error;
pub use crate::error::{Error, Result};

pub mod util;

pub mod types;
pub use crate::types::{DateTimeFieldType, DurationFieldType};

pub mod field;
pub use crate::field::{DateTimeField, DurationField};

pub mod cal;
pub use crate::cal::{iso_utc, Chronology, ChronologyKey, ChronologyRef, GregorianChronology, IsoChronology};
pub use crate::cal::zone::{DateTimeZone, ZoneRef};

pub mod partial;
pub use crate::partial::Partial;

pub mod bucket;
pub use crate::bucket::FieldBucket;

pub mod period;
pub use crate::period::{MutablePeriod, Period, PeriodType, ReadablePeriod};

pub mod duration;
pub use crate::duration::Duration;

pub mod clock;

#[cfg(feature = "parse")]
pub mod parse;
