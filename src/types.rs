//! The kinds of units and calendar fields a chronology can supply.
//!
//! These are plain identifiers. The fields themselves belong to a
//! chronology: asking two chronologies for `DayOfMonth` yields two fields of
//! the same kind that are not interchangeable.

use std::fmt;

use crate::cal::Chronology;
use crate::field::{DateTimeField, DurationField};


/// A unit of elapsed time.
///
/// The declaration order runs from the largest unit to the smallest, which
/// is also the order period types list their fields in.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DurationFieldType {
    Eras,
    Centuries,
    Weekyears,
    Years,
    Months,
    Weeks,
    Days,
    Halfdays,
    Hours,
    Minutes,
    Seconds,
    Millis,
}

impl DurationFieldType {

    /// Every unit, in declaration order.
    pub const ALL: [DurationFieldType; 12] = [
        DurationFieldType::Eras, DurationFieldType::Centuries,
        DurationFieldType::Weekyears, DurationFieldType::Years,
        DurationFieldType::Months, DurationFieldType::Weeks,
        DurationFieldType::Days, DurationFieldType::Halfdays,
        DurationFieldType::Hours, DurationFieldType::Minutes,
        DurationFieldType::Seconds, DurationFieldType::Millis,
    ];

    /// The unit’s position in a chronology’s duration table.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        use self::DurationFieldType::*;
        match self {
            Eras       => "eras",
            Centuries  => "centuries",
            Weekyears  => "weekyears",
            Years      => "years",
            Months     => "months",
            Weeks      => "weeks",
            Days       => "days",
            Halfdays   => "halfdays",
            Hours      => "hours",
            Minutes    => "minutes",
            Seconds    => "seconds",
            Millis     => "millis",
        }
    }

    /// Looks up the chronology’s duration field of this kind.
    pub fn field(self, chronology: &dyn Chronology) -> &dyn DurationField {
        chronology.duration(self)
    }

    pub fn is_supported(self, chronology: &dyn Chronology) -> bool {
        self.field(chronology).is_supported()
    }
}

impl fmt::Display for DurationFieldType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}


/// A named calendar component.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DateTimeFieldType {
    Era,
    YearOfEra,
    CenturyOfEra,
    YearOfCentury,
    Year,
    DayOfYear,
    MonthOfYear,
    DayOfMonth,
    WeekyearOfCentury,
    Weekyear,
    WeekOfWeekyear,
    DayOfWeek,
    HalfdayOfDay,
    HourOfHalfday,
    ClockhourOfHalfday,
    ClockhourOfDay,
    HourOfDay,
    MinuteOfDay,
    MinuteOfHour,
    SecondOfDay,
    SecondOfMinute,
    MillisOfDay,
    MillisOfSecond,
}

impl DateTimeFieldType {

    /// Every field kind, in declaration order.
    pub const ALL: [DateTimeFieldType; 23] = [
        DateTimeFieldType::Era, DateTimeFieldType::YearOfEra,
        DateTimeFieldType::CenturyOfEra, DateTimeFieldType::YearOfCentury,
        DateTimeFieldType::Year, DateTimeFieldType::DayOfYear,
        DateTimeFieldType::MonthOfYear, DateTimeFieldType::DayOfMonth,
        DateTimeFieldType::WeekyearOfCentury, DateTimeFieldType::Weekyear,
        DateTimeFieldType::WeekOfWeekyear, DateTimeFieldType::DayOfWeek,
        DateTimeFieldType::HalfdayOfDay, DateTimeFieldType::HourOfHalfday,
        DateTimeFieldType::ClockhourOfHalfday, DateTimeFieldType::ClockhourOfDay,
        DateTimeFieldType::HourOfDay, DateTimeFieldType::MinuteOfDay,
        DateTimeFieldType::MinuteOfHour, DateTimeFieldType::SecondOfDay,
        DateTimeFieldType::SecondOfMinute, DateTimeFieldType::MillisOfDay,
        DateTimeFieldType::MillisOfSecond,
    ];

    /// The field’s position in a chronology’s field table.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        use self::DateTimeFieldType::*;
        match self {
            Era                 => "era",
            YearOfEra           => "yearOfEra",
            CenturyOfEra        => "centuryOfEra",
            YearOfCentury       => "yearOfCentury",
            Year                => "year",
            DayOfYear           => "dayOfYear",
            MonthOfYear         => "monthOfYear",
            DayOfMonth          => "dayOfMonth",
            WeekyearOfCentury   => "weekyearOfCentury",
            Weekyear            => "weekyear",
            WeekOfWeekyear      => "weekOfWeekyear",
            DayOfWeek           => "dayOfWeek",
            HalfdayOfDay        => "halfdayOfDay",
            HourOfHalfday       => "hourOfHalfday",
            ClockhourOfHalfday  => "clockhourOfHalfday",
            ClockhourOfDay      => "clockhourOfDay",
            HourOfDay           => "hourOfDay",
            MinuteOfDay         => "minuteOfDay",
            MinuteOfHour        => "minuteOfHour",
            SecondOfDay         => "secondOfDay",
            SecondOfMinute      => "secondOfMinute",
            MillisOfDay         => "millisOfDay",
            MillisOfSecond      => "millisOfSecond",
        }
    }

    /// The unit this field counts in.
    pub fn duration_type(self) -> DurationFieldType {
        use self::DateTimeFieldType::*;
        use self::DurationFieldType as D;
        match self {
            Era                                       => D::Eras,
            YearOfEra | YearOfCentury | Year          => D::Years,
            CenturyOfEra                              => D::Centuries,
            DayOfYear | DayOfMonth | DayOfWeek        => D::Days,
            MonthOfYear                               => D::Months,
            WeekyearOfCentury | Weekyear              => D::Weekyears,
            WeekOfWeekyear                            => D::Weeks,
            HalfdayOfDay                              => D::Halfdays,
            HourOfHalfday | ClockhourOfHalfday
                | ClockhourOfDay | HourOfDay          => D::Hours,
            MinuteOfDay | MinuteOfHour                => D::Minutes,
            SecondOfDay | SecondOfMinute              => D::Seconds,
            MillisOfDay | MillisOfSecond              => D::Millis,
        }
    }

    /// The unit this field is bounded by, or `None` for unbounded fields
    /// such as the era or the proleptic year.
    pub fn range_duration_type(self) -> Option<DurationFieldType> {
        use self::DateTimeFieldType::*;
        use self::DurationFieldType as D;
        match self {
            Era | Year | Weekyear                          => None,
            YearOfEra | CenturyOfEra                       => Some(D::Eras),
            YearOfCentury | WeekyearOfCentury              => Some(D::Centuries),
            DayOfYear | MonthOfYear                        => Some(D::Years),
            DayOfMonth                                     => Some(D::Months),
            WeekOfWeekyear                                 => Some(D::Weekyears),
            DayOfWeek                                      => Some(D::Weeks),
            HalfdayOfDay | ClockhourOfDay | HourOfDay
                | MinuteOfDay | SecondOfDay | MillisOfDay  => Some(D::Days),
            HourOfHalfday | ClockhourOfHalfday             => Some(D::Halfdays),
            MinuteOfHour                                   => Some(D::Hours),
            SecondOfMinute                                 => Some(D::Minutes),
            MillisOfSecond                                 => Some(D::Seconds),
        }
    }

    /// Looks up the chronology’s field of this kind.
    pub fn field(self, chronology: &dyn Chronology) -> &dyn DateTimeField {
        chronology.field(self)
    }

    pub fn is_supported(self, chronology: &dyn Chronology) -> bool {
        self.field(chronology).is_supported()
    }
}

impl fmt::Display for DateTimeFieldType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn indexes_match_tables() {
        for (i, kind) in DurationFieldType::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
        for (i, kind) in DateTimeFieldType::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }

    #[test]
    fn day_of_month_is_bounded_by_months() {
        assert_eq!(DateTimeFieldType::DayOfMonth.duration_type(), DurationFieldType::Days);
        assert_eq!(DateTimeFieldType::DayOfMonth.range_duration_type(), Some(DurationFieldType::Months));
    }

    #[test]
    fn year_is_unbounded() {
        assert_eq!(DateTimeFieldType::Year.range_duration_type(), None);
    }
}
