//! Calendar systems, or **chronologies**: complete, immutable sets of
//! calendar fields bound to a time zone.
//!
//! A chronology is mostly a table of fields. The composite operations on
//! [`Chronology`] (building an instant from a date, extracting a period
//! between two instants, adding a period) have default implementations
//! written purely in terms of that table, so a new calendar system only
//! has to assemble its fields. Systems that can do better, like the
//! Gregorian engine computing a date in one go, override the composites,
//! and chronologies assembled on top of them inherit the fast path for as
//! long as they leave the relevant fields alone.

use std::fmt;
use std::sync::Arc;

use crate::error::Result;
use crate::field::{DateTimeField, DurationField};
use crate::partial::Partial;
use crate::period::{PeriodType, PeriodValues, ReadablePeriod};
use crate::types::{DateTimeFieldType, DurationFieldType};

mod assembled;
pub use self::assembled::{Assembly, FieldSet, Fields};
use self::assembled::{SAME_DATE_FIELDS, SAME_MILLIS_OF_DAY, SAME_TIME_FIELDS};

mod base;

pub(crate) mod basic;
mod basic_gj;

mod basic_fields;

mod gregorian;
pub use self::gregorian::GregorianChronology;

mod iso;
pub use self::iso::IsoChronology;

mod zoned;
pub use self::zoned::ZonedChronology;

mod leniency;
pub use self::leniency::{LenientChronology, StrictChronology};

mod cache;
pub use self::cache::{CalendarKind, ChronologyKey, Mode};
#[cfg(feature = "serde")]
pub use self::cache::SerializedChronology;

pub mod zone;
use self::zone::ZoneRef;


/// Shared handle to a chronology. Chronologies are immutable, so handles
/// are freely passed between threads.
pub type ChronologyRef = Arc<dyn Chronology>;


macro_rules! field_accessors {
    ($( $name:ident => $kind:ident ),* $(,)?) => {
        $(
            fn $name(&self) -> &dyn DateTimeField {
                self.field(DateTimeFieldType::$kind)
            }
        )*
    };
}

macro_rules! duration_accessors {
    ($( $name:ident => $kind:ident ),* $(,)?) => {
        $(
            fn $name(&self) -> &dyn DurationField {
                self.duration(DurationFieldType::$kind)
            }
        )*
    };
}


/// A **calendar system**: fields, a zone, and the operations that combine
/// them.
pub trait Chronology: fmt::Debug + Send + Sync {

    /// The discriminator this chronology is cached and serialized under.
    fn key(&self) -> ChronologyKey;

    /// The zone this chronology’s fields present local time in.
    fn zone(&self) -> &ZoneRef;

    /// The assembled field table.
    fn assembly(&self) -> &Assembly;

    fn fields(&self) -> &Fields {
        self.assembly().fields()
    }

    fn field(&self, field_type: DateTimeFieldType) -> &dyn DateTimeField {
        self.fields().field(field_type)
    }

    fn duration(&self, field_type: DurationFieldType) -> &dyn DurationField {
        self.fields().duration(field_type)
    }

    /// This calendar system in UTC.
    fn with_utc(&self) -> Result<ChronologyRef> {
        self.with_zone(zone::utc())
    }

    /// This calendar system in another zone.
    fn with_zone(&self, zone: ZoneRef) -> Result<ChronologyRef> {
        cache::instance(&self.key().with_zone(zone.id()), zone)
    }

    /// Builds an instant from a date and a millisecond of the day.
    fn date_time_millis(&self, year: i32, month_of_year: i32, day_of_month: i32, millis_of_day: i32) -> Result<i64> {
        match self.assembly().delegate(SAME_DATE_FIELDS | SAME_MILLIS_OF_DAY) {
            Some(base)  => base.date_time_millis(year, month_of_year, day_of_month, millis_of_day),
            None        => base::date_time_millis(self.fields(), year, month_of_year, day_of_month, millis_of_day),
        }
    }

    /// Builds an instant from a date and a time of day.
    #[allow(clippy::too_many_arguments)]
    fn date_time_millis_hms(&self, year: i32, month_of_year: i32, day_of_month: i32,
                            hour_of_day: i32, minute_of_hour: i32, second_of_minute: i32, millis_of_second: i32) -> Result<i64> {
        match self.assembly().delegate(SAME_DATE_FIELDS | SAME_TIME_FIELDS) {
            Some(base)  => base.date_time_millis_hms(year, month_of_year, day_of_month, hour_of_day, minute_of_hour, second_of_minute, millis_of_second),
            None        => base::date_time_millis_hms(self.fields(), year, month_of_year, day_of_month, hour_of_day, minute_of_hour, second_of_minute, millis_of_second),
        }
    }

    /// Replaces the time of day of an instant, keeping its date.
    fn time_millis_on(&self, instant: i64, hour_of_day: i32, minute_of_hour: i32, second_of_minute: i32, millis_of_second: i32) -> Result<i64> {
        match self.assembly().delegate(SAME_TIME_FIELDS) {
            Some(base)  => base.time_millis_on(instant, hour_of_day, minute_of_hour, second_of_minute, millis_of_second),
            None        => base::time_millis_on(self.fields(), instant, hour_of_day, minute_of_hour, second_of_minute, millis_of_second),
        }
    }

    /// Checks a partial’s values against this chronology: each value on
    /// its own, then each value given all the others (no February 30th).
    fn validate(&self, partial: &Partial, values: &[i32]) -> Result<()> {
        base::validate(self.fields(), partial, values)
    }

    /// Reads every field a partial holds out of an instant.
    fn get_partial(&self, partial: &Partial, instant: i64) -> Result<Vec<i32>> {
        partial.field_types().iter()
               .map(|t| self.field(*t).get(instant))
               .collect()
    }

    /// Writes every field a partial holds into an instant, largest first.
    fn set_partial(&self, partial: &Partial, instant: i64) -> Result<i64> {
        partial.field_types().iter().zip(partial.values())
               .try_fold(instant, |instant, (t, v)| self.field(*t).set(instant, *v))
    }

    /// Splits the span between two instants into the fields of a period
    /// type, largest field first, each taking as much as it can.
    fn period_values(&self, period_type: PeriodType, start: i64, end: i64) -> Result<PeriodValues> {
        base::period_values(self.fields(), period_type, start, end)
    }

    /// Splits a duration into the precise fields of a period type; the
    /// imprecise ones stay zero.
    fn period_values_for_duration(&self, period_type: PeriodType, duration: i64) -> Result<PeriodValues> {
        base::period_values_for_duration(self.fields(), period_type, duration)
    }

    /// Adds a period, multiplied by `scalar`, to an instant.
    fn add_period(&self, period: &dyn ReadablePeriod, instant: i64, scalar: i32) -> Result<i64> {
        base::add_period(self.fields(), period, instant, scalar)
    }

    /// Adds a millisecond duration, multiplied by `scalar`, to an instant.
    fn add_duration(&self, instant: i64, duration: i64, scalar: i32) -> Result<i64> {
        base::add_duration(instant, duration, scalar)
    }

    duration_accessors! {
        eras => Eras, centuries => Centuries, weekyears => Weekyears,
        years => Years, months => Months, weeks => Weeks, days => Days,
        halfdays => Halfdays, hours => Hours, minutes => Minutes,
        seconds => Seconds, millis => Millis,
    }

    field_accessors! {
        era => Era, year_of_era => YearOfEra, century_of_era => CenturyOfEra,
        year_of_century => YearOfCentury, year => Year, day_of_year => DayOfYear,
        month_of_year => MonthOfYear, day_of_month => DayOfMonth,
        weekyear_of_century => WeekyearOfCentury, weekyear => Weekyear,
        week_of_weekyear => WeekOfWeekyear, day_of_week => DayOfWeek,
        halfday_of_day => HalfdayOfDay, hour_of_halfday => HourOfHalfday,
        clockhour_of_halfday => ClockhourOfHalfday, clockhour_of_day => ClockhourOfDay,
        hour_of_day => HourOfDay, minute_of_day => MinuteOfDay,
        minute_of_hour => MinuteOfHour, second_of_day => SecondOfDay,
        second_of_minute => SecondOfMinute, millis_of_day => MillisOfDay,
        millis_of_second => MillisOfSecond,
    }
}


/// The ISO chronology in UTC: the default calendar system.
pub fn iso_utc() -> Result<ChronologyRef> {
    IsoChronology::instance(zone::utc())
}
