//! Presenting a UTC chronology in local time.
//!
//! Every field of the UTC base is wrapped so that it reads and writes the
//! local time of a zone. Units shorter than half a day are treated as
//! elapsed time (adding an hour across a transition adds an hour); longer
//! ones as local calendar time (adding a day keeps the wall clock).

use std::collections::HashMap;
use std::sync::Arc;

use crate::cal::basic::MILLIS_PER_HOUR;
use crate::cal::zone::{is_utc, ZoneRef};
use crate::cal::{Assembly, Chronology, ChronologyKey, ChronologyRef, Fields};
use crate::error::{Error, Result};
use crate::field::{DateTimeField, DateTimeFieldRef, DurationField, DurationFieldRef};
use crate::partial::Partial;
use crate::types::{DateTimeFieldType, DurationFieldType};
use crate::util::{safe_add, safe_subtract};


/// Whether a unit is short enough to be added as elapsed time rather than
/// wall-clock time.
fn use_time_arithmetic(field: &dyn DurationField) -> bool {
    field.unit_millis() < 12 * MILLIS_PER_HOUR
}


/// A **zoned chronology**: a UTC chronology whose fields work in a zone’s
/// local time.
#[derive(Debug)]
pub struct ZonedChronology {
    key: ChronologyKey,
    zone: ZoneRef,
    assembly: Assembly,
}

impl ZonedChronology {

    /// Wraps a UTC chronology. The base must itself be in UTC.
    pub fn new(base: ChronologyRef, zone: ZoneRef) -> Result<ZonedChronology> {
        if !is_utc(&**base.zone()) {
            return Err(Error::invalid("The base chronology must be in UTC"));
        }

        let key = base.key().with_zone(zone.id());
        let assembly = {
            let zone = zone.clone();
            Assembly::new(Some(base), move |set| {
                let converted = Converter::new(set.clone().build(), zone);
                for kind in DurationFieldType::ALL {
                    if let Some(field) = converted.duration(kind) {
                        set.set_duration(kind, field);
                    }
                }
                for kind in DateTimeFieldType::ALL {
                    if let Some(field) = set.field(kind).cloned() {
                        set.set_field(kind, converted.field(field));
                    }
                }
                Ok(())
            })?
        };

        Ok(ZonedChronology { key, zone, assembly })
    }

    /// A UTC chronology in the zone, or the chronology itself if the zone
    /// is UTC.
    pub fn instance(base: ChronologyRef, zone: ZoneRef) -> Result<ChronologyRef> {
        if is_utc(&*zone) {
            return Ok(base);
        }
        Ok(Arc::new(ZonedChronology::new(base, zone)?))
    }

    fn base(&self) -> Result<&ChronologyRef> {
        self.assembly.base().ok_or_else(|| Error::invalid("Zoned chronology has no base"))
    }
}

impl Chronology for ZonedChronology {
    fn key(&self) -> ChronologyKey {
        self.key.clone()
    }

    fn zone(&self) -> &ZoneRef {
        &self.zone
    }

    fn assembly(&self) -> &Assembly {
        &self.assembly
    }

    fn date_time_millis(&self, year: i32, month_of_year: i32, day_of_month: i32, millis_of_day: i32) -> Result<i64> {
        let local = self.base()?.date_time_millis(year, month_of_year, day_of_month, millis_of_day)?;
        self.zone.convert_local_to_utc(local, true)
    }

    fn date_time_millis_hms(&self, year: i32, month_of_year: i32, day_of_month: i32,
                            hour_of_day: i32, minute_of_hour: i32, second_of_minute: i32, millis_of_second: i32) -> Result<i64> {
        let local = self.base()?.date_time_millis_hms(year, month_of_year, day_of_month, hour_of_day, minute_of_hour, second_of_minute, millis_of_second)?;
        self.zone.convert_local_to_utc(local, true)
    }

    fn time_millis_on(&self, instant: i64, hour_of_day: i32, minute_of_hour: i32, second_of_minute: i32, millis_of_second: i32) -> Result<i64> {
        let local = self.zone.convert_utc_to_local(instant)?;
        let local = self.base()?.time_millis_on(local, hour_of_day, minute_of_hour, second_of_minute, millis_of_second)?;
        self.zone.convert_local_to_utc(local, true)
    }
}


/// Wraps each distinct field once, so fields that shared a unit in the
/// base still share the zoned unit.
struct Converter {
    zone: ZoneRef,
    by_kind: Vec<Option<DurationFieldRef>>,
    by_address: HashMap<*const (), DurationFieldRef>,
}

impl Converter {
    fn new(base: Fields, zone: ZoneRef) -> Converter {
        let mut by_kind = vec![None; DurationFieldType::ALL.len()];
        let mut by_address = HashMap::new();

        for kind in DurationFieldType::ALL {
            let field = base.duration_handle(kind);
            if !field.is_supported() {
                continue;
            }

            let address = Arc::as_ptr(&field) as *const ();
            let zoned = by_address.entry(address)
                                  .or_insert_with(|| Arc::new(ZonedDurationField::new(field.clone(), zone.clone())) as DurationFieldRef)
                                  .clone();
            by_kind[kind.index()] = Some(zoned);
        }

        Converter { zone, by_kind, by_address }
    }

    fn lookup(&self, field: Option<&dyn DurationField>) -> Option<DurationFieldRef> {
        let address = field? as *const dyn DurationField as *const ();
        self.by_address.get(&address).cloned()
    }

    fn duration(&self, kind: DurationFieldType) -> Option<DurationFieldRef> {
        self.by_kind[kind.index()].clone()
    }

    fn field(&self, field: DateTimeFieldRef) -> DateTimeFieldRef {
        if !field.is_supported() {
            return field;
        }

        let duration = self.lookup(Some(field.duration_field()));
        let range = self.lookup(field.range_duration_field());
        let leap = self.lookup(field.leap_duration_field());
        Arc::new(ZonedDateTimeField::new(field, self.zone.clone(), duration, range, leap))
    }
}


/// A duration field measured from local time.
#[derive(Debug)]
pub(crate) struct ZonedDurationField {
    wrapped: DurationFieldRef,
    zone: ZoneRef,
    time_field: bool,
}

impl ZonedDurationField {
    pub(crate) fn new(wrapped: DurationFieldRef, zone: ZoneRef) -> ZonedDurationField {
        let time_field = use_time_arithmetic(&*wrapped);
        ZonedDurationField { wrapped, zone, time_field }
    }

    fn offset_to_add(&self, instant: i64) -> Result<i64> {
        let offset = i64::from(self.zone.offset(instant));
        safe_add(instant, offset).map(|_| offset)
    }

    fn offset_from_local_to_subtract(&self, local: i64) -> Result<i64> {
        let offset = i64::from(self.zone.offset_from_local(local));
        safe_subtract(local, offset).map(|_| offset)
    }
}

impl DurationField for ZonedDurationField {
    fn field_type(&self) -> DurationFieldType {
        self.wrapped.field_type()
    }

    fn is_supported(&self) -> bool {
        self.wrapped.is_supported()
    }

    fn is_precise(&self) -> bool {
        if self.time_field { self.wrapped.is_precise() } else { self.wrapped.is_precise() && self.zone.is_fixed() }
    }

    fn unit_millis(&self) -> i64 {
        self.wrapped.unit_millis()
    }

    fn value_as_long(&self, duration: i64) -> Result<i64> {
        self.wrapped.value_as_long(duration)
    }

    fn value_as_long_at(&self, duration: i64, instant: i64) -> Result<i64> {
        self.wrapped.value_as_long_at(duration, self.zone.convert_utc_to_local(instant)?)
    }

    fn millis(&self, value: i64) -> Result<i64> {
        self.wrapped.millis(value)
    }

    fn millis_at(&self, value: i64, instant: i64) -> Result<i64> {
        self.wrapped.millis_at(value, self.zone.convert_utc_to_local(instant)?)
    }

    fn add(&self, instant: i64, value: i64) -> Result<i64> {
        let offset = self.offset_to_add(instant)?;
        let local = self.wrapped.add(instant + offset, value)?;
        let back = if self.time_field { offset } else { self.offset_from_local_to_subtract(local)? };
        safe_subtract(local, back)
    }

    fn difference_as_long(&self, minuend: i64, subtrahend: i64) -> Result<i64> {
        let offset = self.offset_to_add(subtrahend)?;
        let minuend_offset = if self.time_field { offset } else { self.offset_to_add(minuend)? };
        self.wrapped.difference_as_long(minuend + minuend_offset, subtrahend + offset)
    }
}


/// A calendar field read and written in local time.
#[derive(Debug)]
pub(crate) struct ZonedDateTimeField {
    wrapped: DateTimeFieldRef,
    zone: ZoneRef,
    duration: Option<DurationFieldRef>,
    range: Option<DurationFieldRef>,
    leap: Option<DurationFieldRef>,
    time_field: bool,
}

impl ZonedDateTimeField {
    fn new(wrapped: DateTimeFieldRef, zone: ZoneRef, duration: Option<DurationFieldRef>,
           range: Option<DurationFieldRef>, leap: Option<DurationFieldRef>) -> ZonedDateTimeField {
        let time_field = use_time_arithmetic(wrapped.duration_field());
        ZonedDateTimeField { wrapped, zone, duration, range, leap, time_field }
    }

    fn local(&self, instant: i64) -> Result<i64> {
        self.zone.convert_utc_to_local(instant)
    }

    fn offset_to_add(&self, instant: i64) -> Result<i64> {
        let offset = i64::from(self.zone.offset(instant));
        safe_add(instant, offset).map(|_| offset)
    }

    /// Runs a local-time operation, converting back to UTC either by the
    /// original offset (time fields) or by resolving the new local time.
    fn in_local<F>(&self, instant: i64, op: F) -> Result<i64>
    where F: FnOnce(i64) -> Result<i64>
    {
        if self.time_field {
            let offset = self.offset_to_add(instant)?;
            safe_subtract(op(instant + offset)?, offset)
        }
        else {
            let local = op(self.local(instant)?)?;
            self.zone.convert_local_to_utc_near(local, false, instant)
        }
    }
}

impl DateTimeField for ZonedDateTimeField {
    fn field_type(&self) -> DateTimeFieldType {
        self.wrapped.field_type()
    }

    fn is_supported(&self) -> bool {
        self.wrapped.is_supported()
    }

    fn is_lenient(&self) -> bool {
        self.wrapped.is_lenient()
    }

    fn get(&self, instant: i64) -> Result<i32> {
        self.wrapped.get(self.local(instant)?)
    }

    /// Fails if the local time the set produces is skipped by the zone, as
    /// the value would not read back.
    fn set(&self, instant: i64, value: i32) -> Result<i64> {
        let local = self.wrapped.set(self.local(instant)?, value)?;
        let result = self.zone.convert_local_to_utc_near(local, false, instant)?;
        if self.get(result)? != value {
            return Err(Error::IllegalInstant { local, zone: self.zone.id().to_owned() });
        }
        Ok(result)
    }

    fn add(&self, instant: i64, value: i64) -> Result<i64> {
        self.in_local(instant, |local| self.wrapped.add(local, value))
    }

    fn add_wrap_field(&self, instant: i64, value: i32) -> Result<i64> {
        self.in_local(instant, |local| self.wrapped.add_wrap_field(local, value))
    }

    fn difference_as_long(&self, minuend: i64, subtrahend: i64) -> Result<i64> {
        let offset = self.offset_to_add(subtrahend)?;
        let minuend_offset = if self.time_field { offset } else { self.offset_to_add(minuend)? };
        self.wrapped.difference_as_long(minuend + minuend_offset, subtrahend + offset)
    }

    fn difference(&self, minuend: i64, subtrahend: i64) -> Result<i32> {
        crate::util::safe_to_int(self.difference_as_long(minuend, subtrahend)?)
    }

    fn duration_field(&self) -> &dyn DurationField {
        match &self.duration {
            Some(field) => &**field,
            None        => self.wrapped.duration_field(),
        }
    }

    fn range_duration_field(&self) -> Option<&dyn DurationField> {
        match &self.range {
            Some(field) => Some(&**field),
            None        => self.wrapped.range_duration_field(),
        }
    }

    fn leap_duration_field(&self) -> Option<&dyn DurationField> {
        match &self.leap {
            Some(field) => Some(&**field),
            None        => self.wrapped.leap_duration_field(),
        }
    }

    fn is_leap(&self, instant: i64) -> Result<bool> {
        self.wrapped.is_leap(self.local(instant)?)
    }

    fn leap_amount(&self, instant: i64) -> Result<i32> {
        self.wrapped.leap_amount(self.local(instant)?)
    }

    fn minimum_value(&self) -> Result<i32> {
        self.wrapped.minimum_value()
    }

    fn minimum_value_at(&self, instant: i64) -> Result<i32> {
        self.wrapped.minimum_value_at(self.local(instant)?)
    }

    fn minimum_value_for(&self, partial: &Partial, values: &[i32]) -> Result<i32> {
        self.wrapped.minimum_value_for(partial, values)
    }

    fn maximum_value(&self) -> Result<i32> {
        self.wrapped.maximum_value()
    }

    fn maximum_value_at(&self, instant: i64) -> Result<i32> {
        self.wrapped.maximum_value_at(self.local(instant)?)
    }

    fn maximum_value_for(&self, partial: &Partial, values: &[i32]) -> Result<i32> {
        self.wrapped.maximum_value_for(partial, values)
    }

    fn round_floor(&self, instant: i64) -> Result<i64> {
        self.in_local(instant, |local| self.wrapped.round_floor(local))
    }

    fn round_ceiling(&self, instant: i64) -> Result<i64> {
        self.in_local(instant, |local| self.wrapped.round_ceiling(local))
    }

    fn remainder(&self, instant: i64) -> Result<i64> {
        self.wrapped.remainder(self.local(instant)?)
    }
}


#[cfg(test)]
mod test {
    use super::*;
    use crate::cal::zone::{FixedZone, Timespan, TimespanZone};
    use crate::cal::GregorianChronology;
    use pretty_assertions::assert_eq;

    const HOUR: i64 = MILLIS_PER_HOUR;

    fn plus_two() -> ChronologyRef {
        let zone: ZoneRef = Arc::new(FixedZone::new(2 * HOUR as i32).unwrap());
        GregorianChronology::instance(zone).unwrap()
    }

    /// Standard time at +1, summer time at +2 from 1000h to 5000h.
    fn summer() -> ChronologyRef {
        let winter = Timespan { offset: HOUR as i32, is_dst: false, name: "WIN".into() };
        let summer = Timespan { offset: 2 * HOUR as i32, is_dst: true, name: "SUM".into() };
        let zone = TimespanZone::new("Test/Summer", winter.clone(), vec![ (1000 * HOUR, summer), (5000 * HOUR, winter) ]).unwrap();
        let utc: ChronologyRef = GregorianChronology::utc(4).unwrap();
        ZonedChronology::instance(utc, Arc::new(zone)).unwrap()
    }

    #[test]
    fn fields_read_local_time() {
        let chronology = plus_two();
        // 23:00 UTC on the epoch is 01:00 the next day at +2
        assert_eq!(chronology.hour_of_day().get(23 * HOUR), Ok(1));
        assert_eq!(chronology.day_of_month().get(23 * HOUR), Ok(2));
    }

    #[test]
    fn dates_are_local() {
        assert_eq!(plus_two().date_time_millis(1970, 1, 1, 0), Ok(-2 * HOUR));
    }

    #[test]
    fn set_round_trips() {
        let chronology = plus_two();
        let instant = 1_234_567_890_123;
        for kind in [DateTimeFieldType::Year, DateTimeFieldType::DayOfMonth, DateTimeFieldType::HourOfDay] {
            let field = chronology.field(kind);
            assert_eq!(field.set(instant, field.get(instant).unwrap()), Ok(instant));
        }
    }

    #[test]
    fn hour_added_across_transition_is_elapsed() {
        let chronology = summer();
        let before = 999 * HOUR;
        assert_eq!(chronology.hours().add(before, 2), Ok(1001 * HOUR));
    }

    #[test]
    fn day_added_across_transition_keeps_wall_clock() {
        let chronology = summer();
        let before = 990 * HOUR;
        let after = chronology.days().add(before, 1).unwrap();
        assert_eq!(after, before + 23 * HOUR);
        assert_eq!(chronology.hour_of_day().get(after), chronology.hour_of_day().get(before));
    }

    #[test]
    fn date_in_gap_is_rejected() {
        let chronology = summer();
        // local 1001:30 never happens: clocks jump from 1001:00 to 1002:00
        let local = 1001 * HOUR + HOUR / 2;
        let (days, millis) = (local / (24 * HOUR), local % (24 * HOUR));
        let utc: ChronologyRef = GregorianChronology::utc(4).unwrap();
        let date = utc.days().add(0, days).unwrap();
        let (y, m, d) = (utc.year().get(date).unwrap(), utc.month_of_year().get(date).unwrap(), utc.day_of_month().get(date).unwrap());
        let error = chronology.date_time_millis(y, m, d, millis as i32).unwrap_err();
        assert!(error.is_out_of_range());
    }

    #[test]
    fn base_must_be_utc() {
        let error = ZonedChronology::new(plus_two(), plus_two().zone().clone()).unwrap_err();
        assert!(error.is_invalid_argument());
    }
}
