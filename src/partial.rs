//! Partial date-times: a handful of field values with no instant behind
//! them, such as a month and a day, or a time of day.

use std::cmp::Ordering;
use std::fmt;

use crate::cal::{Chronology, ChronologyRef};
use crate::error::{Error, Result};
use crate::field::{DateTimeField, DurationField};
use crate::period::ReadablePeriod;
use crate::types::{DateTimeFieldType, DurationFieldType};
use crate::util::safe_multiply;


/// A set of field values, largest field first, such as `(MonthOfYear,
/// DayOfMonth)` or `(HourOfDay, MinuteOfHour)`.
///
/// A partial always works in the UTC version of its chronology: its fields
/// describe local values, so a zone would only get in the way. Every
/// constructor validates the values against that chronology, so a partial
/// never holds the 30th of February.
#[derive(Clone)]
pub struct Partial {
    chronology: ChronologyRef,
    types: Vec<DateTimeFieldType>,
    values: Vec<i32>,
}

impl Partial {

    /// An empty partial, to be filled in with [`Partial::with`].
    pub fn empty(chronology: &dyn Chronology) -> Result<Partial> {
        Ok(Partial { chronology: chronology.with_utc()?, types: Vec::new(), values: Vec::new() })
    }

    /// A partial holding the given fields and values. The fields must run
    /// from largest to smallest without repeats.
    pub fn of(chronology: &dyn Chronology, types: &[DateTimeFieldType], values: &[i32]) -> Result<Partial> {
        if types.len() != values.len() {
            return Err(Error::invalid("Values array must be the same length as the types array"));
        }

        let chronology = chronology.with_utc()?;
        check_order(&*chronology, types)?;

        let partial = Partial { chronology, types: types.to_vec(), values: values.to_vec() };
        partial.chronology.validate(&partial, &partial.values)?;
        Ok(partial)
    }

    /// A partial holding the given fields, with their values read out of an
    /// instant in the given chronology.
    pub fn from_instant(chronology: &dyn Chronology, types: &[DateTimeFieldType], instant: i64) -> Result<Partial> {
        let values = types.iter()
                          .map(|t| chronology.field(*t).get(instant))
                          .collect::<Result<Vec<_>>>()?;
        Partial::of(chronology, types, &values)
    }

    /// A copy with the same fields and new values.
    fn with_values(&self, values: Vec<i32>) -> Result<Partial> {
        let partial = Partial { chronology: self.chronology.clone(), types: self.types.clone(), values };
        partial.chronology.validate(&partial, &partial.values)?;
        Ok(partial)
    }

    pub fn chronology(&self) -> &ChronologyRef {
        &self.chronology
    }

    pub fn size(&self) -> usize {
        self.types.len()
    }

    pub fn field_types(&self) -> &[DateTimeFieldType] {
        &self.types
    }

    pub fn field_type(&self, index: usize) -> DateTimeFieldType {
        self.types[index]
    }

    pub fn values(&self) -> &[i32] {
        &self.values
    }

    pub fn value(&self, index: usize) -> i32 {
        self.values[index]
    }

    /// The chronology’s field at a position of this partial.
    pub fn field(&self, index: usize) -> &dyn DateTimeField {
        self.chronology.field(self.types[index])
    }

    pub fn index_of(&self, field_type: DateTimeFieldType) -> Option<usize> {
        self.types.iter().position(|t| *t == field_type)
    }

    /// The position of the first field counting in the given unit.
    pub fn index_of_unit(&self, unit: DurationFieldType) -> Option<usize> {
        self.types.iter().position(|t| t.duration_type() == unit)
    }

    pub fn is_supported(&self, field_type: DateTimeFieldType) -> bool {
        self.index_of(field_type).is_some()
    }

    /// The value of one field, which the partial must hold.
    pub fn get(&self, field_type: DateTimeFieldType) -> Result<i32> {
        match self.index_of(field_type) {
            Some(index) => Ok(self.values[index]),
            None        => Err(Error::invalid(format!("Field '{}' is not supported", field_type))),
        }
    }

    /// Whether each field is bounded by the unit of the one before it, so
    /// that together they pin down a single span, as year-month-day does and
    /// year-day does not.
    pub fn is_contiguous(&self) -> bool {
        let mut last = None;
        for index in 0 .. self.size() {
            let field = self.field(index);
            if let Some(last) = last {
                match field.range_duration_field() {
                    Some(range) if range.field_type() == last => {},
                    _ => return false,
                }
            }
            last = Some(field.duration_field().field_type());
        }
        true
    }

    /// Sets one field, adding it in its ordered place if the partial does
    /// not hold it yet. Smaller fields that no longer fit are pulled back
    /// into range.
    pub fn with(&self, field_type: DateTimeFieldType, value: i32) -> Result<Partial> {
        match self.index_of(field_type) {
            Some(index) => {
                if self.values[index] == value {
                    return Ok(self.clone());
                }
                let mut values = self.values.clone();
                self.field(index).set_partial(self, index, &mut values, value)?;
                self.with_values(values)
            }
            None => {
                let chronology = &*self.chronology;
                let position = self.types.iter()
                                   .position(|t| compare_largest_first(chronology, field_type, *t) == Ordering::Greater)
                                   .unwrap_or(self.types.len());

                let mut types = self.types.clone();
                let mut values = self.values.clone();
                types.insert(position, field_type);
                values.insert(position, value);
                Partial::of(chronology, &types, &values)
            }
        }
    }

    /// Removes a field, if the partial holds it.
    pub fn without(&self, field_type: DateTimeFieldType) -> Result<Partial> {
        match self.index_of(field_type) {
            Some(index) => {
                let mut types = self.types.clone();
                let mut values = self.values.clone();
                types.remove(index);
                values.remove(index);
                Partial::of(&*self.chronology, &types, &values)
            }
            None => Ok(self.clone()),
        }
    }

    /// Adds to the field counting in `unit`, carrying into larger fields
    /// and failing once the largest field runs out of room.
    pub fn with_field_added(&self, unit: DurationFieldType, amount: i32) -> Result<Partial> {
        let index = self.index_of_supported_unit(unit)?;
        if amount == 0 {
            return Ok(self.clone());
        }

        let mut values = self.values.clone();
        self.field(index).add_partial(self, index, &mut values, amount)?;
        self.with_values(values)
    }

    /// Adds to the field counting in `unit`, carrying into larger fields
    /// and wrapping around once the largest field runs out of room.
    pub fn with_field_add_wrapped(&self, unit: DurationFieldType, amount: i32) -> Result<Partial> {
        let index = self.index_of_supported_unit(unit)?;
        if amount == 0 {
            return Ok(self.clone());
        }

        let mut values = self.values.clone();
        self.field(index).add_wrap_partial(self, index, &mut values, amount)?;
        self.with_values(values)
    }

    /// Adds a period, multiplied by `scalar`. Period fields the partial has
    /// no field for are ignored.
    pub fn with_period_added(&self, period: &dyn ReadablePeriod, scalar: i32) -> Result<Partial> {
        if scalar == 0 {
            return Ok(self.clone());
        }

        let mut values = self.values.clone();
        for i in 0 .. period.size() {
            if let Some(index) = self.index_of_unit(period.field_type(i)) {
                let amount = safe_multiply(period.value(i), scalar)?;
                self.field(index).add_partial(self, index, &mut values, amount)?;
            }
        }
        self.with_values(values)
    }

    /// Fills this partial’s fields into an instant of another chronology,
    /// keeping whatever the partial does not hold.
    pub fn to_instant(&self, chronology: &dyn Chronology, base: i64) -> Result<i64> {
        chronology.set_partial(self, base)
    }

    /// Whether an instant, read in the given chronology, has every value
    /// this partial holds.
    pub fn is_match(&self, chronology: &dyn Chronology, instant: i64) -> Result<bool> {
        for (field_type, value) in self.types.iter().zip(&self.values) {
            if chronology.field(*field_type).get(instant)? != *value {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn index_of_supported_unit(&self, unit: DurationFieldType) -> Result<usize> {
        self.index_of_unit(unit)
            .ok_or_else(|| Error::invalid(format!("Field '{}' is not supported", unit)))
    }
}

impl PartialEq for Partial {
    fn eq(&self, other: &Partial) -> bool {
        self.types == other.types
            && self.values == other.values
            && self.chronology.key() == other.chronology.key()
    }
}

impl fmt::Debug for Partial {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut map = f.debug_map();
        for (field_type, value) in self.types.iter().zip(&self.values) {
            map.entry(&field_type.name(), value);
        }
        map.finish()
    }
}


/// Orders two kinds of field by size: first by unit, then by the range
/// they are bounded by. Fields without a range count as larger than those
/// with one, and years outrank the other year-length units.
pub(crate) fn compare_largest_first(chronology: &dyn Chronology, a: DateTimeFieldType, b: DateTimeFieldType) -> Ordering {
    let by_unit = compare_units(chronology, a.duration_type(), b.duration_type());
    if by_unit != Ordering::Equal || a.duration_type() != b.duration_type() {
        return by_unit;
    }

    match (a.range_duration_type(), b.range_duration_type()) {
        (None, None)                        => Ordering::Equal,
        (None, Some(_))                     => Ordering::Greater,
        (Some(_), None)                     => Ordering::Less,
        (Some(a_range), Some(b_range))      => compare_units(chronology, a_range, b_range),
    }
}

fn compare_units(chronology: &dyn Chronology, a: DurationFieldType, b: DurationFieldType) -> Ordering {
    let ordering = chronology.duration(a).compare_units(chronology.duration(b));
    if ordering != Ordering::Equal || a == b {
        return ordering;
    }

    match (a, b) {
        (DurationFieldType::Years, _)  => Ordering::Greater,
        (_, DurationFieldType::Years)  => Ordering::Less,
        _                              => Ordering::Equal,
    }
}

fn check_order(chronology: &dyn Chronology, types: &[DateTimeFieldType]) -> Result<()> {
    for pair in types.windows(2) {
        match compare_largest_first(chronology, pair[0], pair[1]) {
            Ordering::Greater  => {},
            Ordering::Equal    => return Err(Error::invalid(format!("Types array must not contain duplicate: {} and {}", pair[0], pair[1]))),
            Ordering::Less     => return Err(Error::invalid(format!("Types array must be in order largest-smallest: {} < {}", pair[0], pair[1]))),
        }
    }
    Ok(())
}


#[cfg(test)]
mod test {
    use super::*;
    use crate::cal::{iso_utc, IsoChronology, ZonedChronology};
    use crate::cal::zone::{FixedZone, ZoneRef};
    use crate::types::DateTimeFieldType::*;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn partial(types: &[DateTimeFieldType], values: &[i32]) -> Result<Partial> {
        Partial::of(&*iso_utc().unwrap(), types, values)
    }

    mod construction {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn ordered() {
            let date = partial(&[Year, MonthOfYear, DayOfMonth], &[2004, 2, 29]).unwrap();
            assert_eq!(date.size(), 3);
            assert_eq!(date.get(MonthOfYear), Ok(2));
            assert!(date.is_contiguous());
        }

        #[test]
        fn out_of_order() {
            let error = partial(&[DayOfMonth, MonthOfYear], &[1, 1]).unwrap_err();
            assert!(error.is_invalid_argument());
        }

        #[test]
        fn duplicate() {
            assert!(partial(&[MonthOfYear, MonthOfYear], &[1, 2]).unwrap_err().is_invalid_argument());
            assert!(partial(&[HourOfDay, ClockhourOfDay], &[1, 2]).unwrap_err().is_invalid_argument());
        }

        #[test]
        fn year_before_weekyear() {
            assert!(partial(&[Year, Weekyear], &[2004, 2004]).is_ok());
            assert!(partial(&[Weekyear, Year], &[2004, 2004]).is_err());
        }

        #[test]
        fn unbounded_before_bounded() {
            assert!(partial(&[Year, YearOfCentury], &[2004, 4]).is_ok());
            assert!(partial(&[Era, Year], &[1, 2004]).is_ok());
        }

        #[test]
        fn thirtieth_of_february() {
            let error = partial(&[MonthOfYear, DayOfMonth], &[2, 30]).unwrap_err();
            assert!(error.is_out_of_range());
        }

        #[test]
        fn leap_day_needs_leap_year() {
            assert!(partial(&[MonthOfYear, DayOfMonth], &[2, 29]).is_ok());
            assert!(partial(&[Year, MonthOfYear, DayOfMonth], &[2003, 2, 29]).unwrap_err().is_out_of_range());
        }

        #[test]
        fn not_contiguous() {
            let date = partial(&[Year, DayOfMonth], &[2004, 12]).unwrap();
            assert!(!date.is_contiguous());
        }

        #[test]
        fn works_in_utc() {
            let zone: ZoneRef = Arc::new(FixedZone::new(3 * 3_600_000).unwrap());
            let zoned = IsoChronology::instance(zone).unwrap();
            let time = Partial::of(&*zoned, &[HourOfDay], &[10]).unwrap();
            assert_eq!(time.chronology().key().zone, "UTC");
        }

        #[test]
        fn from_instant() {
            let chronology = iso_utc().unwrap();
            let instant = chronology.date_time_millis(2010, 6, 30, 0).unwrap();
            let date = Partial::from_instant(&*chronology, &[MonthOfYear, DayOfMonth], instant).unwrap();
            assert_eq!(date.values(), &[6, 30]);
        }
    }

    mod editing {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn insert_in_order() {
            let date = partial(&[Year, DayOfMonth], &[2004, 12]).unwrap();
            let date = date.with(MonthOfYear, 6).unwrap();
            assert_eq!(date.field_types(), &[Year, MonthOfYear, DayOfMonth]);
            assert_eq!(date.values(), &[2004, 6, 12]);
        }

        #[test]
        fn insert_at_end() {
            let time = partial(&[HourOfDay], &[10]).unwrap().with(MinuteOfHour, 20).unwrap();
            assert_eq!(time.field_types(), &[HourOfDay, MinuteOfHour]);
        }

        #[test]
        fn replace_value() {
            let date = partial(&[MonthOfYear, DayOfMonth], &[1, 31]).unwrap();
            assert_eq!(date.with(MonthOfYear, 3).unwrap().values(), &[3, 31]);
            assert_eq!(date.with(MonthOfYear, 4).unwrap().values(), &[4, 30]);
            assert!(date.with(MonthOfYear, 13).unwrap_err().is_out_of_range());
        }

        #[test]
        fn remove() {
            let date = partial(&[Year, MonthOfYear, DayOfMonth], &[2004, 6, 12]).unwrap();
            let date = date.without(MonthOfYear).unwrap();
            assert_eq!(date.field_types(), &[Year, DayOfMonth]);
            assert_eq!(date.without(HourOfDay).unwrap(), date);
        }
    }

    mod arithmetic {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn carry_into_hours() {
            let time = partial(&[HourOfDay, MinuteOfHour], &[10, 50]).unwrap();
            let later = time.with_field_added(DurationFieldType::Minutes, 20).unwrap();
            assert_eq!(later.values(), &[11, 10]);
        }

        #[test]
        fn past_midnight_rejected() {
            let time = partial(&[HourOfDay, MinuteOfHour], &[23, 30]).unwrap();
            let error = time.with_field_added(DurationFieldType::Minutes, 60).unwrap_err();
            assert!(error.is_invalid_argument());
        }

        #[test]
        fn past_midnight_wrapped() {
            let time = partial(&[HourOfDay, MinuteOfHour], &[23, 30]).unwrap();
            let later = time.with_field_add_wrapped(DurationFieldType::Minutes, 60).unwrap();
            assert_eq!(later.values(), &[0, 30]);
        }

        #[test]
        fn month_led_partial_wraps() {
            let date = partial(&[MonthOfYear, DayOfMonth], &[11, 15]).unwrap();
            let later = date.with_field_added(DurationFieldType::Months, 3).unwrap();
            assert_eq!(later.values(), &[2, 15]);
        }

        #[test]
        fn leap_day_plus_four_years_of_months() {
            let date = partial(&[Year, MonthOfYear, DayOfMonth], &[2004, 2, 29]).unwrap();
            let later = date.with_field_added(DurationFieldType::Months, 48).unwrap();
            assert_eq!(later.values(), &[2008, 2, 29]);
        }

        #[test]
        fn days_carry_through_month_end() {
            let date = partial(&[Year, MonthOfYear, DayOfMonth], &[2004, 1, 30]).unwrap();
            let later = date.with_field_added(DurationFieldType::Days, 3).unwrap();
            assert_eq!(later.values(), &[2004, 2, 2]);
        }

        #[test]
        fn unit_not_held() {
            let time = partial(&[HourOfDay], &[10]).unwrap();
            assert!(time.with_field_added(DurationFieldType::Days, 1).unwrap_err().is_invalid_argument());
            assert!(time.with_field_added(DurationFieldType::Days, 0).is_err());
        }
    }

    mod instants {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn fill_into_base() {
            let chronology = iso_utc().unwrap();
            let base = chronology.date_time_millis_hms(2010, 6, 30, 12, 0, 0, 0).unwrap();
            let date = partial(&[MonthOfYear, DayOfMonth], &[1, 15]).unwrap();
            let instant = date.to_instant(&*chronology, base).unwrap();
            assert_eq!(instant, chronology.date_time_millis_hms(2010, 1, 15, 12, 0, 0, 0).unwrap());
            assert_eq!(date.is_match(&*chronology, instant), Ok(true));
            assert_eq!(date.is_match(&*chronology, base), Ok(false));
        }

        #[test]
        fn fill_in_local_time() {
            let zone: ZoneRef = Arc::new(FixedZone::new(2 * 3_600_000).unwrap());
            let zoned = ZonedChronology::new(iso_utc().unwrap(), zone).unwrap();
            let time = partial(&[HourOfDay], &[9]).unwrap();
            let instant = time.to_instant(&zoned, 0).unwrap();
            assert_eq!(instant, 7 * 3_600_000);
        }
    }
}
