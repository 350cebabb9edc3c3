//! Collecting field values in any order and committing them all at once.
//!
//! Text rarely presents fields largest first: `25/12` gives the day before
//! the month, and a time may come before its date. Setting each value as
//! it arrives would go wrong (the 31st set before the month is March
//! would clamp), so a bucket holds on to them until every value is known,
//! then applies them from the widest range down.

use std::cmp::Ordering;

use crate::cal::zone::ZoneRef;
use crate::cal::{Chronology, ChronologyRef};
use crate::error::Result;
use crate::field::DurationField;
use crate::types::DateTimeFieldType;
use crate::util::safe_subtract;


/// Field values waiting to be applied to an instant.
#[derive(Debug, Clone)]
pub struct FieldBucket {
    chronology: ChronologyRef,
    zone: Option<ZoneRef>,
    offset: Option<i32>,
    base: i64,
    default_year: i32,
    saved: Vec<(DateTimeFieldType, i32)>,
}

/// A snapshot of a bucket’s zone, offset and saved fields, for going back
/// to after a failed attempt.
#[derive(Debug, Clone)]
pub struct SavedState {
    zone: Option<ZoneRef>,
    offset: Option<i32>,
    saved: Vec<(DateTimeFieldType, i32)>,
}

impl FieldBucket {

    /// A bucket whose fields will be applied to the local instant `base`
    /// using the chronology’s fields, and converted to UTC in the
    /// chronology’s zone. A month or day without a year is placed in
    /// `default_year`.
    pub fn new(base: i64, chronology: &dyn Chronology, default_year: i32) -> Result<FieldBucket> {
        Ok(FieldBucket {
            chronology: chronology.with_utc()?,
            zone: Some(chronology.zone().clone()),
            offset: None,
            base,
            default_year,
            saved: Vec::new(),
        })
    }

    /// The UTC chronology whose fields are used.
    pub fn chronology(&self) -> &ChronologyRef {
        &self.chronology
    }

    pub fn zone(&self) -> Option<&ZoneRef> {
        self.zone.as_ref()
    }

    /// Sets the zone to convert with, clearing any fixed offset.
    pub fn set_zone(&mut self, zone: Option<ZoneRef>) {
        self.zone = zone;
        self.offset = None;
    }

    pub fn offset(&self) -> Option<i32> {
        self.offset
    }

    /// Sets a fixed offset to convert with, which takes priority over the
    /// zone.
    pub fn set_offset(&mut self, offset: Option<i32>) {
        self.offset = offset;
    }

    pub fn default_year(&self) -> i32 {
        self.default_year
    }

    /// Queues a value. Nothing is checked until the bucket is computed.
    pub fn save_field(&mut self, field_type: DateTimeFieldType, value: i32) {
        self.saved.push((field_type, value));
    }

    pub fn save_state(&self) -> SavedState {
        SavedState { zone: self.zone.clone(), offset: self.offset, saved: self.saved.clone() }
    }

    pub fn restore_state(&mut self, state: SavedState) {
        self.zone = state.zone;
        self.offset = state.offset;
        self.saved = state.saved;
    }

    /// Forgets every saved value, and any offset.
    pub fn reset(&mut self) {
        self.saved.clear();
        self.offset = None;
    }

    /// Applies every saved value, widest range first, and converts the
    /// result to UTC.
    ///
    /// With `reset_fields`, each set also floors the instant, so fields
    /// that were not saved end up at their minimum rather than at the base
    /// instant’s values. The strict fields are then applied a second time,
    /// in case a smaller field was clamped by a larger one set after it.
    pub fn compute_millis(&mut self, reset_fields: bool) -> Result<i64> {
        let chronology = self.chronology.clone();
        self.saved.sort_by(|a, b| compare_saved(&*chronology, a.0, b.0));

        // a month or a day with no year is placed in the default year
        if let Some((first, _)) = self.saved.first().copied() {
            let unit = Some(chronology.field(first).duration_field());
            if compare_reverse(unit, Some(chronology.months())) != Ordering::Less
                && compare_reverse(unit, Some(chronology.days())) != Ordering::Greater
            {
                self.saved.insert(0, (DateTimeFieldType::Year, self.default_year));
            }
        }

        let mut millis = self.base;
        for (field_type, value) in &self.saved {
            millis = set_saved(&*chronology, *field_type, *value, millis, reset_fields)?;
        }

        if reset_fields {
            let count = self.saved.len();
            for (index, (field_type, value)) in self.saved.iter().enumerate() {
                if !chronology.field(*field_type).is_lenient() {
                    millis = set_saved(&*chronology, *field_type, *value, millis, index == count - 1)?;
                }
            }
        }

        match (self.offset, &self.zone) {
            (Some(offset), _)    => safe_subtract(millis, i64::from(offset)),
            (None, Some(zone))   => zone.convert_local_to_utc(millis, true),
            (None, None)         => Ok(millis),
        }
    }
}

fn set_saved(chronology: &dyn Chronology, field_type: DateTimeFieldType, value: i32, millis: i64, reset: bool) -> Result<i64> {
    let field = chronology.field(field_type);
    let millis = field.set(millis, value)?;
    if reset { field.round_floor(millis) } else { Ok(millis) }
}

/// Orders saved fields by the range they are bounded by, then by their
/// unit, largest first. Unbounded fields such as the year come first.
fn compare_saved(chronology: &dyn Chronology, a: DateTimeFieldType, b: DateTimeFieldType) -> Ordering {
    let (a, b) = (chronology.field(a), chronology.field(b));
    compare_reverse(a.range_duration_field(), b.range_duration_field())
        .then_with(|| compare_reverse(Some(a.duration_field()), Some(b.duration_field())))
}

/// Larger units sort first; missing or unsupported units are the largest
/// of all.
fn compare_reverse(a: Option<&dyn DurationField>, b: Option<&dyn DurationField>) -> Ordering {
    let a = a.filter(|unit| unit.is_supported());
    let b = b.filter(|unit| unit.is_supported());
    match (a, b) {
        (None, None)        => Ordering::Equal,
        (None, Some(_))     => Ordering::Less,
        (Some(_), None)     => Ordering::Greater,
        (Some(a), Some(b))  => b.compare_units(a),
    }
}
