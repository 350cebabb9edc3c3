//! Reading ISO-8601 date and date-time strings into instants.
//!
//! The `iso8601` crate does the syntax. Its output goes into a
//! [`FieldBucket`], so the values are checked against the chronology’s
//! fields and resolved in its zone like any other set of fields.

use iso8601::Date;
use thiserror::Error;

use crate::bucket::FieldBucket;
use crate::cal::Chronology;
use crate::error;
use crate::types::DateTimeFieldType::*;


/// The year a bucket falls back on. ISO strings always name their year,
/// so this never takes effect.
const DEFAULT_YEAR: i32 = 2000;


/// Why a string could not be turned into an instant.
#[derive(PartialEq, Eq, Debug, Clone, Error)]
pub enum ParseError {

    /// The string was well-formed, but named a date or time that does not
    /// exist, such as the 30th of February.
    #[error(transparent)]
    Field(#[from] error::Error),

    /// The string was not ISO-8601.
    #[error("invalid ISO-8601 string: {0}")]
    Syntax(String),
}

pub type Result<T> = std::result::Result<T, ParseError>;


/// Parses a calendar (`1985-04-12`), week (`1985-W15-5`) or ordinal
/// (`1985-102`) date, optionally followed by a time and an offset, into
/// an instant.
///
/// A string with an offset is placed by that offset; one without is taken
/// as local time in the chronology’s zone.
///
/// ### Examples
///
/// ```
/// use chronology::cal::iso_utc;
/// use chronology::parse::parse_instant;
///
/// let chronology = iso_utc().unwrap();
/// let instant = parse_instant("2000-02-29T12:00:00Z", &*chronology).unwrap();
/// assert_eq!(instant, 951_825_600_000);
/// ```
pub fn parse_instant(text: &str, chronology: &dyn Chronology) -> Result<i64> {
    let mut bucket = FieldBucket::new(0, chronology, DEFAULT_YEAR)?;

    if text.contains('T') {
        let parsed = iso8601::datetime(text).map_err(|e| ParseError::Syntax(e.to_string()))?;
        save_date(&mut bucket, &parsed.date)?;

        let time = parsed.time;
        bucket.save_field(HourOfDay, value(time.hour)?);
        bucket.save_field(MinuteOfHour, value(time.minute)?);
        bucket.save_field(SecondOfMinute, value(time.second)?);
        bucket.save_field(MillisOfSecond, value(time.millisecond)?);

        if has_offset(text) {
            bucket.set_offset(Some(offset_millis(time.tz_offset_hours, time.tz_offset_minutes)));
        }
    }
    else {
        let date = iso8601::date(text).map_err(|e| ParseError::Syntax(e.to_string()))?;
        save_date(&mut bucket, &date)?;
    }

    Ok(bucket.compute_millis(true)?)
}

fn save_date(bucket: &mut FieldBucket, date: &Date) -> Result<()> {
    match *date {
        Date::YMD { year, month, day } => {
            bucket.save_field(Year, year);
            bucket.save_field(MonthOfYear, value(month)?);
            bucket.save_field(DayOfMonth, value(day)?);
        }
        Date::Week { year, ww, d } => {
            bucket.save_field(Weekyear, year);
            bucket.save_field(WeekOfWeekyear, value(ww)?);
            bucket.save_field(DayOfWeek, value(d)?);
        }
        Date::Ordinal { year, ddd } => {
            bucket.save_field(Year, year);
            bucket.save_field(DayOfYear, value(ddd)?);
        }
    }
    Ok(())
}

fn value(number: u32) -> Result<i32> {
    i32::try_from(number).map_err(|_| ParseError::Syntax(format!("{} is too large", number)))
}

/// Whether the time part ends in `Z` or a signed offset. The parser
/// reports a missing offset as zero, which would otherwise read as UTC.
fn has_offset(text: &str) -> bool {
    match text.find('T') {
        Some(index) => text[index ..].contains(['Z', '+', '-']),
        None        => false,
    }
}

fn offset_millis(hours: i32, minutes: i32) -> i32 {
    let minutes = if hours < 0 { -minutes.abs() } else { minutes };
    (hours * 60 + minutes) * 60_000
}


#[cfg(test)]
mod test {
    use super::*;
    use crate::cal::zone::{FixedZone, ZoneRef};
    use crate::cal::{iso_utc, IsoChronology};
    use std::sync::Arc;

    const HOUR: i64 = 3_600_000;

    fn utc_date(year: i32, month: i32, day: i32) -> i64 {
        iso_utc().unwrap().date_time_millis(year, month, day, 0).unwrap()
    }

    mod dates {
        use super::*;

        #[test]
        fn calendar() {
            let instant = parse_instant("1985-04-12", &*iso_utc().unwrap()).unwrap();
            assert_eq!(instant, utc_date(1985, 4, 12));
        }

        #[test]
        fn week() {
            let instant = parse_instant("2004-W53-6", &*iso_utc().unwrap()).unwrap();
            assert_eq!(instant, utc_date(2005, 1, 1));
        }

        #[test]
        fn ordinal() {
            let instant = parse_instant("2004-060", &*iso_utc().unwrap()).unwrap();
            assert_eq!(instant, utc_date(2004, 2, 29));
        }

        #[test]
        fn no_such_day() {
            let error = parse_instant("2001-02-29", &*iso_utc().unwrap()).unwrap_err();
            assert!(matches!(error, ParseError::Field(ref e) if e.is_out_of_range()));
        }

        #[test]
        fn garbage() {
            let error = parse_instant("", &*iso_utc().unwrap()).unwrap_err();
            assert!(matches!(error, ParseError::Syntax(_)));
        }
    }

    mod date_times {
        use super::*;

        #[test]
        fn utc() {
            let instant = parse_instant("1985-04-12T10:15:30.500Z", &*iso_utc().unwrap()).unwrap();
            assert_eq!(instant, utc_date(1985, 4, 12) + 10 * HOUR + 15 * 60_000 + 30_500);
        }

        #[test]
        fn positive_offset() {
            let instant = parse_instant("1985-04-12T10:00:00+02:00", &*iso_utc().unwrap()).unwrap();
            assert_eq!(instant, utc_date(1985, 4, 12) + 8 * HOUR);
        }

        #[test]
        fn local_time_in_chronology_zone() {
            let zone: ZoneRef = Arc::new(FixedZone::new(5 * HOUR as i32).unwrap());
            let chronology = IsoChronology::instance(zone).unwrap();
            let instant = parse_instant("1985-04-12T10:00:00", &*chronology).unwrap();
            assert_eq!(instant, utc_date(1985, 4, 12) + 5 * HOUR);
        }
    }

    #[test]
    fn offsets() {
        assert_eq!(offset_millis(-5, 30), -(5 * 60 + 30) * 60_000);
        assert_eq!(offset_millis(5, 30), (5 * 60 + 30) * 60_000);
        assert!(has_offset("1985-04-12T10:00:00-05:00"));
        assert!(!has_offset("1985-04-12T10:00:00"));
    }
}
