//! Field tables, and assembling one chronology’s table out of another’s.

use std::fmt;
use std::sync::Arc;

use crate::cal::{Chronology, ChronologyRef};
use crate::error::Result;
use crate::field::{same_field, DateTimeField, DateTimeFieldRef, DurationField, DurationFieldRef, UnsupportedDateTimeField, UnsupportedDurationField};
use crate::types::{DateTimeFieldType, DurationFieldType};


/// The complete set of fields a chronology offers: one duration field per
/// unit and one calendar field per field kind. Kinds the chronology has no
/// notion of hold unsupported placeholders, so lookups never fail.
#[derive(Clone)]
pub struct Fields {
    durations: [DurationFieldRef; 12],
    fields: [DateTimeFieldRef; 23],
}

impl Fields {
    pub fn duration(&self, field_type: DurationFieldType) -> &dyn DurationField {
        &*self.durations[field_type.index()]
    }

    pub fn field(&self, field_type: DateTimeFieldType) -> &dyn DateTimeField {
        &*self.fields[field_type.index()]
    }

    /// A shared handle to the duration field, for building other fields.
    pub fn duration_handle(&self, field_type: DurationFieldType) -> DurationFieldRef {
        self.durations[field_type.index()].clone()
    }

    /// A shared handle to the field, for building other fields.
    pub fn field_handle(&self, field_type: DateTimeFieldType) -> DateTimeFieldRef {
        self.fields[field_type.index()].clone()
    }
}

impl fmt::Debug for Fields {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let supported = DateTimeFieldType::ALL.iter().filter(|t| self.field(**t).is_supported());
        f.debug_set().entries(supported.map(|t| t.name())).finish()
    }
}


/// A field table under construction. Slots left empty become unsupported
/// placeholders when the table is built.
#[derive(Clone, Default)]
pub struct FieldSet {
    durations: [Option<DurationFieldRef>; 12],
    fields: [Option<DateTimeFieldRef>; 23],
}

impl FieldSet {
    pub fn new() -> FieldSet {
        FieldSet::default()
    }

    /// Starts from a copy of an existing table.
    pub fn copy_from(fields: &Fields) -> FieldSet {
        FieldSet {
            durations: fields.durations.clone().map(Some),
            fields: fields.fields.clone().map(Some),
        }
    }

    pub fn duration(&self, field_type: DurationFieldType) -> Option<&DurationFieldRef> {
        self.durations[field_type.index()].as_ref()
    }

    pub fn set_duration(&mut self, field_type: DurationFieldType, field: DurationFieldRef) {
        self.durations[field_type.index()] = Some(field);
    }

    pub fn field(&self, field_type: DateTimeFieldType) -> Option<&DateTimeFieldRef> {
        self.fields[field_type.index()].as_ref()
    }

    pub fn set_field(&mut self, field_type: DateTimeFieldType, field: DateTimeFieldRef) {
        self.fields[field_type.index()] = Some(field);
    }

    /// Replaces every field present with the result of `wrap`.
    pub fn map_fields<F>(&mut self, mut wrap: F) where F: FnMut(DateTimeFieldRef) -> DateTimeFieldRef {
        for slot in self.fields.iter_mut() {
            if let Some(field) = slot.take() {
                *slot = Some(wrap(field));
            }
        }
    }

    /// Fills the empty slots with unsupported placeholders.
    pub fn build(self) -> Fields {
        let durations: [DurationFieldRef; 12] = std::array::from_fn(|i| {
            match &self.durations[i] {
                Some(field) => field.clone(),
                None        => Arc::new(UnsupportedDurationField::new(DurationFieldType::ALL[i])) as DurationFieldRef,
            }
        });

        let fields = std::array::from_fn(|i| {
            match &self.fields[i] {
                Some(field) => field.clone(),
                None        => {
                    let field_type = DateTimeFieldType::ALL[i];
                    let unit = durations[field_type.duration_type().index()].clone();
                    Arc::new(UnsupportedDateTimeField::new(field_type, unit)) as DateTimeFieldRef
                }
            }
        });

        Fields { durations, fields }
    }
}


/// The hour, minute, second, and millisecond fields match the base.
pub(crate) const SAME_TIME_FIELDS: u8 = 1;

/// The millisecond-of-day field matches the base.
pub(crate) const SAME_MILLIS_OF_DAY: u8 = 2;

/// The year, month, and day-of-month fields match the base.
pub(crate) const SAME_DATE_FIELDS: u8 = 4;


/// A chronology’s assembled state: its field table, the base it was
/// assembled from (if any), and which groups of fields it left untouched.
///
/// When a group is untouched, composite operations that only need that
/// group can run on the base instead, which is typically faster because
/// the base computes dates directly instead of field by field.
#[derive(Debug, Clone)]
pub struct Assembly {
    base: Option<ChronologyRef>,
    fields: Fields,
    base_flags: u8,
}

impl Assembly {

    /// Assembles a table by copying the base’s fields (if there is a base)
    /// and letting `assemble` override any of them.
    pub fn new<F>(base: Option<ChronologyRef>, assemble: F) -> Result<Assembly>
    where F: FnOnce(&mut FieldSet) -> Result<()>
    {
        let mut set = match &base {
            Some(base)  => FieldSet::copy_from(base.fields()),
            None        => FieldSet::new(),
        };

        assemble(&mut set)?;
        let fields = set.build();
        let base_flags = base.as_ref().map_or(0, |base| same_groups(base.fields(), &fields));

        Ok(Assembly { base, fields, base_flags })
    }

    pub fn base(&self) -> Option<&ChronologyRef> {
        self.base.as_ref()
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    pub fn base_flags(&self) -> u8 {
        self.base_flags
    }

    /// The base, if every group named in `flags` is unchanged from it.
    pub(crate) fn delegate(&self, flags: u8) -> Option<&dyn Chronology> {
        match &self.base {
            Some(base) if self.base_flags & flags == flags => Some(&**base),
            _                                              => None,
        }
    }
}

fn same_groups(base: &Fields, fields: &Fields) -> u8 {
    use crate::types::DateTimeFieldType::*;
    let same = |kinds: &[DateTimeFieldType]| kinds.iter().all(|k| same_field(base.field(*k), fields.field(*k)));

    let mut flags = 0;
    if same(&[HourOfDay, MinuteOfHour, SecondOfMinute, MillisOfSecond]) {
        flags |= SAME_TIME_FIELDS;
    }
    if same(&[MillisOfDay]) {
        flags |= SAME_MILLIS_OF_DAY;
    }
    if same(&[Year, MonthOfYear, DayOfMonth]) {
        flags |= SAME_DATE_FIELDS;
    }
    flags
}


#[cfg(test)]
mod test {
    use super::*;
    use crate::field::MillisDurationField;

    #[test]
    fn empty_slots_are_unsupported() {
        let mut set = FieldSet::new();
        set.set_duration(DurationFieldType::Millis, Arc::new(MillisDurationField));
        let fields = set.build();

        assert!(fields.duration(DurationFieldType::Millis).is_supported());
        assert!(!fields.duration(DurationFieldType::Days).is_supported());
        assert!(!fields.field(DateTimeFieldType::Year).is_supported());
        assert_eq!(fields.field(DateTimeFieldType::Year).duration_field().field_type(), DurationFieldType::Years);
    }
}
