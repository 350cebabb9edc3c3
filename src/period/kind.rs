//! Period types: which units a period holds values for.

use std::fmt;

use log::trace;

use crate::error::{Error, Result};
use crate::types::DurationFieldType;


/// The units a period can have, largest first. A period type is a subset
/// of these, kept in this order.
static UNITS: [DurationFieldType; 8] = [
    DurationFieldType::Years, DurationFieldType::Months,
    DurationFieldType::Weeks, DurationFieldType::Days,
    DurationFieldType::Hours, DurationFieldType::Minutes,
    DurationFieldType::Seconds, DurationFieldType::Millis,
];

const YEARS:    u8 = 1 << 0;
const MONTHS:   u8 = 1 << 1;
const WEEKS:    u8 = 1 << 2;
const DAYS:     u8 = 1 << 3;
const HOURS:    u8 = 1 << 4;
const MINUTES:  u8 = 1 << 5;
const SECONDS:  u8 = 1 << 6;
const MILLIS:   u8 = 1 << 7;

const TIME:     u8 = HOURS | MINUTES | SECONDS | MILLIS;
const ALL:      u8 = 0xFF;

/// The shapes with names of their own. Any other shape is named after
/// what it leaves out of the standard one.
static NAMES: [(u8, &str); 17] = [
    (ALL,                           "Standard"),
    (YEARS | MONTHS | DAYS | TIME,  "YearMonthDayTime"),
    (YEARS | MONTHS | DAYS,         "YearMonthDay"),
    (YEARS | WEEKS | DAYS | TIME,   "YearWeekDayTime"),
    (YEARS | WEEKS | DAYS,          "YearWeekDay"),
    (YEARS | DAYS | TIME,           "YearDayTime"),
    (YEARS | DAYS,                  "YearDay"),
    (DAYS | TIME,                   "DayTime"),
    (TIME,                          "Time"),
    (YEARS,                         "Years"),
    (MONTHS,                        "Months"),
    (WEEKS,                         "Weeks"),
    (DAYS,                          "Days"),
    (HOURS,                         "Hours"),
    (MINUTES,                       "Minutes"),
    (SECONDS,                       "Seconds"),
    (MILLIS,                        "Millis"),
];


/// A **period type**: the ordered set of units a period holds values for,
/// such as years-months-days or hours-minutes.
///
/// Each unit appears at most once, and always in the order years, months,
/// weeks, days, hours, minutes, seconds, millis.
#[derive(PartialEq, Eq, Hash, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(into = "Vec<DurationFieldType>", try_from = "Vec<DurationFieldType>"))]
pub struct PeriodType {
    mask: u8,
}

macro_rules! named_types {
    ($( $(#[$meta:meta])* $name:ident => $mask:expr ),* $(,)?) => {
        $(
            $(#[$meta])*
            pub fn $name() -> PeriodType {
                PeriodType { mask: $mask }
            }
        )*
    };
}

macro_rules! removals {
    ($( $name:ident => $mask:expr ),* $(,)?) => {
        $(
            pub fn $name(self) -> PeriodType {
                PeriodType { mask: self.mask & !$mask }
            }
        )*
    };
}

impl PeriodType {
    named_types! {
        /// Every unit: years, months, weeks, days and the time units.
        standard => ALL,
        year_month_day_time => YEARS | MONTHS | DAYS | TIME,
        year_month_day => YEARS | MONTHS | DAYS,
        year_week_day_time => YEARS | WEEKS | DAYS | TIME,
        year_week_day => YEARS | WEEKS | DAYS,
        year_day_time => YEARS | DAYS | TIME,
        year_day => YEARS | DAYS,
        day_time => DAYS | TIME,
        /// Hours, minutes, seconds and millis.
        time => TIME,
        years => YEARS,
        months => MONTHS,
        weeks => WEEKS,
        days => DAYS,
        hours => HOURS,
        minutes => MINUTES,
        seconds => SECONDS,
        millis => MILLIS,
    }

    removals! {
        with_years_removed => YEARS,
        with_months_removed => MONTHS,
        with_weeks_removed => WEEKS,
        with_days_removed => DAYS,
        with_hours_removed => HOURS,
        with_minutes_removed => MINUTES,
        with_seconds_removed => SECONDS,
        with_millis_removed => MILLIS,
    }

    /// The type holding exactly the given units, in any order. Units a
    /// period cannot hold, such as centuries, are refused, as are repeats
    /// and an empty list.
    pub fn for_fields(units: &[DurationFieldType]) -> Result<PeriodType> {
        if units.is_empty() {
            return Err(Error::invalid("Types array must not be empty"));
        }

        let mut mask = 0;
        let mut refused = Vec::new();
        for unit in units {
            match slot(*unit) {
                Some(slot) if mask & (1 << slot) == 0  => mask |= 1 << slot,
                _                                      => refused.push(unit.name()),
            }
        }

        if !refused.is_empty() {
            return Err(Error::invalid(format!("PeriodType does not support fields: {}", refused.join(", "))));
        }

        let period_type = PeriodType { mask };
        trace!("Period type {} built from {:?}", period_type, units);
        Ok(period_type)
    }

    /// The number of units.
    pub fn size(self) -> usize {
        self.mask.count_ones() as usize
    }

    /// The units, largest first.
    pub fn field_types(self) -> impl Iterator<Item = DurationFieldType> {
        let mask = self.mask;
        UNITS.iter().enumerate()
             .filter(move |(slot, _)| mask & (1 << slot) != 0)
             .map(|(_, unit)| *unit)
    }

    /// The unit at a position.
    ///
    /// ### Panics
    ///
    /// Panics if `index` is not less than [`size`](PeriodType::size), the
    /// same way indexing a slice does.
    pub fn field_type(self, index: usize) -> DurationFieldType {
        match self.field_types().nth(index) {
            Some(unit) => unit,
            None       => panic!("index {} out of bounds for {} with {} fields", index, self, self.size()),
        }
    }

    /// The position of a unit, if the type has it.
    pub fn index_of(self, unit: DurationFieldType) -> Option<usize> {
        let slot = slot(unit)?;
        if self.mask & (1 << slot) == 0 {
            return None;
        }
        Some((self.mask & ((1 << slot) - 1)).count_ones() as usize)
    }

    pub fn is_supported(self, unit: DurationFieldType) -> bool {
        self.index_of(unit).is_some()
    }

    /// A name such as `YearMonthDay`, or `StandardNoWeeksNoMillis` for
    /// shapes without one.
    pub fn name(self) -> String {
        if let Some((_, name)) = NAMES.iter().find(|(mask, _)| *mask == self.mask) {
            return (*name).to_owned();
        }

        let mut name = String::from("Standard");
        for (slot, unit) in UNITS.iter().enumerate() {
            if self.mask & (1 << slot) == 0 {
                name.push_str("No");
                name.push_str(&capitalised(unit.name()));
            }
        }
        name
    }
}

fn slot(unit: DurationFieldType) -> Option<usize> {
    UNITS.iter().position(|u| *u == unit)
}

fn capitalised(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None        => String::new(),
    }
}

impl Default for PeriodType {
    fn default() -> PeriodType {
        PeriodType::standard()
    }
}

impl fmt::Display for PeriodType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "PeriodType[{}]", self.name())
    }
}

impl fmt::Debug for PeriodType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl From<PeriodType> for Vec<DurationFieldType> {
    fn from(period_type: PeriodType) -> Vec<DurationFieldType> {
        period_type.field_types().collect()
    }
}

impl TryFrom<Vec<DurationFieldType>> for PeriodType {
    type Error = Error;

    fn try_from(units: Vec<DurationFieldType>) -> Result<PeriodType> {
        PeriodType::for_fields(&units)
    }
}


#[cfg(test)]
mod test {
    use super::*;
    use crate::types::DurationFieldType::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn standard_order() {
        let units: Vec<_> = PeriodType::standard().field_types().collect();
        assert_eq!(units, vec![ Years, Months, Weeks, Days, Hours, Minutes, Seconds, Millis ]);
    }

    #[test]
    fn indexes() {
        let shape = PeriodType::year_day_time();
        assert_eq!(shape.size(), 6);
        assert_eq!(shape.index_of(Years), Some(0));
        assert_eq!(shape.index_of(Days), Some(1));
        assert_eq!(shape.index_of(Millis), Some(5));
        assert_eq!(shape.index_of(Months), None);
        assert_eq!(shape.field_type(2), Hours);
    }

    #[test]
    fn for_fields_ignores_order() {
        let shape = PeriodType::for_fields(&[ Days, Years, Months ]).unwrap();
        assert_eq!(shape, PeriodType::year_month_day());
        assert_eq!(shape.name(), "YearMonthDay");
    }

    #[test]
    fn for_fields_refuses_other_units() {
        assert!(PeriodType::for_fields(&[ Years, Centuries ]).unwrap_err().is_invalid_argument());
        assert!(PeriodType::for_fields(&[ Days, Days ]).unwrap_err().is_invalid_argument());
        assert!(PeriodType::for_fields(&[]).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn removals() {
        assert_eq!(PeriodType::standard().with_weeks_removed(), PeriodType::year_month_day_time());
        assert_eq!(PeriodType::standard().with_millis_removed().name(), "StandardNoMillis");
        assert_eq!(PeriodType::years().with_years_removed().size(), 0);
    }

    #[test]
    fn display() {
        assert_eq!(PeriodType::time().to_string(), "PeriodType[Time]");
    }
}
