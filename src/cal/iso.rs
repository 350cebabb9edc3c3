//! The ISO-8601 calendar system.

use std::sync::Arc;

use log::trace;

use crate::cal::basic_fields::Centuries;
use crate::cal::zone::{self, is_utc, ZoneRef};
use crate::cal::{cache, Assembly, CalendarKind, Chronology, ChronologyKey, ChronologyRef, GregorianChronology, Mode, ZonedChronology};
use crate::error::Result;
use crate::field::{DateTimeFieldRef, RemainderDateTimeField};
use crate::types::{DateTimeFieldType, DurationFieldType};


/// The **ISO chronology**: the proleptic Gregorian calendar with ISO week
/// rules (week 1 holds the first Thursday) and zero-based centuries, so
/// that 2000 is year 0 of century 20.
///
/// It differs from [`GregorianChronology`] only in the century fields.
#[derive(Debug)]
pub struct IsoChronology {
    key: ChronologyKey,
    zone: ZoneRef,
    assembly: Assembly,
}

impl IsoChronology {

    pub fn instance(zone: ZoneRef) -> Result<ChronologyRef> {
        cache::instance(&IsoChronology::key_for(zone.id()), zone)
    }

    pub fn instance_utc() -> Result<ChronologyRef> {
        IsoChronology::instance(zone::utc())
    }

    fn key_for(zone: &str) -> ChronologyKey {
        ChronologyKey::new(CalendarKind::Iso, zone, 4, Mode::Standard)
    }

    /// Builds the instance for a zone. In UTC this assembles on the
    /// Gregorian fields and replaces the centuries; anywhere else it is a
    /// zoned view of the UTC instance.
    pub(crate) fn build(zone: ZoneRef) -> Result<ChronologyRef> {
        let key = IsoChronology::key_for(zone.id());

        if is_utc(&*zone) {
            let base: ChronologyRef = GregorianChronology::utc(4)?;
            let assembly = Assembly::new(Some(base), assemble_centuries)?;
            return Ok(Arc::new(IsoChronology { key, zone, assembly }));
        }

        let utc = IsoChronology::instance_utc()?;
        trace!("Zoning ISO chronology into {}", zone.id());
        let zoned: ChronologyRef = Arc::new(ZonedChronology::new(utc, zone.clone())?);
        let assembly = Assembly::new(Some(zoned), |_| Ok(()))?;
        Ok(Arc::new(IsoChronology { key, zone, assembly }))
    }
}

/// Replaces the one-based Gregorian centuries with zero-based ones.
fn assemble_centuries(set: &mut crate::cal::FieldSet) -> Result<()> {
    use crate::field::UnsupportedDurationField;

    let eras = set.duration(DurationFieldType::Eras).cloned()
                  .unwrap_or_else(|| Arc::new(UnsupportedDurationField::new(DurationFieldType::Eras)));
    let year_of_era = set.field(DateTimeFieldType::YearOfEra).cloned();
    let weekyear = set.field(DateTimeFieldType::Weekyear).cloned();

    if let (Some(year_of_era), Some(weekyear)) = (year_of_era, weekyear) {
        let centuries = Centuries::zero_based(year_of_era, eras)?;
        let weekyear_of_century: DateTimeFieldRef = Arc::new(RemainderDateTimeField::new(
            weekyear, centuries.centuries.clone(), DateTimeFieldType::WeekyearOfCentury, 100)?);

        set.set_field(DateTimeFieldType::CenturyOfEra, centuries.century_of_era);
        set.set_field(DateTimeFieldType::YearOfCentury, centuries.year_of_century);
        set.set_field(DateTimeFieldType::WeekyearOfCentury, weekyear_of_century);
        set.set_duration(DurationFieldType::Centuries, centuries.centuries);
    }

    Ok(())
}

impl Chronology for IsoChronology {
    fn key(&self) -> ChronologyKey {
        self.key.clone()
    }

    fn zone(&self) -> &ZoneRef {
        &self.zone
    }

    fn assembly(&self) -> &Assembly {
        &self.assembly
    }
}


#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    fn iso() -> ChronologyRef {
        IsoChronology::instance_utc().unwrap()
    }

    #[test]
    fn zero_based_centuries() {
        let chronology = iso();
        let y2000 = chronology.date_time_millis(2000, 6, 1, 0).unwrap();
        assert_eq!(chronology.century_of_era().get(y2000), Ok(20));
        assert_eq!(chronology.year_of_century().get(y2000), Ok(0));

        let y1999 = chronology.date_time_millis(1999, 6, 1, 0).unwrap();
        assert_eq!(chronology.century_of_era().get(y1999), Ok(19));
        assert_eq!(chronology.year_of_century().get(y1999), Ok(99));
    }

    #[test]
    fn century_times_hundred_plus_year_is_year_of_era() {
        let chronology = iso();
        for year in [-2001, -1, 0, 1, 99, 100, 1066, 1999, 2000, 2001, 9999] {
            let instant = chronology.date_time_millis(year, 7, 4, 0).unwrap();
            let century = chronology.century_of_era().get(instant).unwrap();
            let year_of_century = chronology.year_of_century().get(instant).unwrap();
            assert_eq!(century * 100 + year_of_century, chronology.year_of_era().get(instant).unwrap(), "year {}", year);
        }
    }

    #[test]
    fn weekyear_of_century() {
        let chronology = iso();
        let instant = chronology.date_time_millis(2021, 1, 1, 0).unwrap();
        assert_eq!(chronology.weekyear_of_century().get(instant), Ok(20));
    }

    #[test]
    fn shares_gregorian_date_fields() {
        // the date groups are untouched, so dates come straight from the engine
        let chronology = iso();
        assert_eq!(chronology.assembly().base_flags(), 7);
        assert_eq!(chronology.date_time_millis(2000, 2, 29, 0), Ok(951_782_400_000));
    }

    #[test]
    fn setting_century_keeps_year_of_century() {
        let chronology = iso();
        let instant = chronology.date_time_millis(1987, 5, 6, 0).unwrap();
        let moved = chronology.century_of_era().set(instant, 20).unwrap();
        assert_eq!(chronology.year().get(moved), Ok(2087));
        assert_eq!(chronology.month_of_year().get(moved), Ok(5));
    }
}
