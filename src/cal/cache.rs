//! Chronology identity: the key every chronology is described by, and the
//! process-wide cache that hands out one shared instance per key.

use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use lazy_static::lazy_static;
use log::{debug, trace};

use crate::cal::zone::{self, ZoneRef};
use crate::cal::{ChronologyRef, GregorianChronology, IsoChronology, LenientChronology, StrictChronology};
use crate::error::{Error, Result};


/// Which calendar system a chronology implements.
#[derive(PartialEq, Eq, Hash, Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CalendarKind {
    Iso,
    Gregorian,
}

/// How a chronology’s fields treat out-of-range values.
#[derive(PartialEq, Eq, Hash, Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mode {
    #[default]
    Standard,
    Strict,
    Lenient,
}


/// Everything that distinguishes one chronology from another. Two
/// chronologies with equal keys behave identically, and the cache gives
/// them the same instance.
#[derive(PartialEq, Eq, Hash, Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChronologyKey {
    pub calendar: CalendarKind,

    /// The zone’s identifier, resolved through the zone registry.
    pub zone: String,

    /// How many days week 1 of a weekyear needs. Always 4 for ISO.
    pub min_days_in_first_week: u8,

    pub mode: Mode,
}

impl ChronologyKey {
    pub fn new(calendar: CalendarKind, zone: impl Into<String>, min_days_in_first_week: u8, mode: Mode) -> ChronologyKey {
        ChronologyKey { calendar, zone: zone.into(), min_days_in_first_week, mode }
    }

    /// The same chronology in another zone.
    pub fn with_zone(&self, zone: impl Into<String>) -> ChronologyKey {
        ChronologyKey { zone: zone.into(), ..self.clone() }
    }

    /// The same chronology with ordinary fields.
    pub fn standard(&self) -> ChronologyKey {
        ChronologyKey { mode: Mode::Standard, ..self.clone() }
    }

    /// Looks the zone up in the registry and returns the shared instance.
    pub fn resolve(&self) -> Result<ChronologyRef> {
        instance(self, zone::for_id(&self.zone)?)
    }
}

impl fmt::Display for ChronologyKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let calendar = match self.calendar {
            CalendarKind::Iso        => "ISO",
            CalendarKind::Gregorian  => "Gregorian",
        };

        write!(f, "{}Chronology[{}", calendar, self.zone)?;
        if self.calendar == CalendarKind::Gregorian && self.min_days_in_first_week != 4 {
            write!(f, ",mdfw={}", self.min_days_in_first_week)?;
        }
        match self.mode {
            Mode::Standard  => write!(f, "]"),
            Mode::Strict    => write!(f, ",strict]"),
            Mode::Lenient   => write!(f, ",lenient]"),
        }
    }
}


lazy_static! {
    static ref INSTANCES: DashMap<ChronologyKey, ChronologyRef> = DashMap::new();
}

/// The shared chronology for a key, building it on first use.
///
/// Construction happens without holding any lock, as building a zoned
/// chronology fetches its UTC base from this same cache. If two threads
/// race, both build, and whichever inserts first wins.
pub(crate) fn instance(key: &ChronologyKey, zone: ZoneRef) -> Result<ChronologyRef> {
    if zone.id() != key.zone {
        return Err(Error::invalid(format!("Zone {} does not match the key’s zone {}", zone.id(), key.zone)));
    }

    if let Some(chronology) = INSTANCES.get(key) {
        return matching_zone(key, chronology.clone(), &zone);
    }

    let built = build(key, zone.clone())?;
    let entry = INSTANCES.entry(key.clone()).or_insert_with(|| {
        debug!("Created chronology {}", key);
        built.clone()
    }).clone();

    if Arc::ptr_eq(&entry, &built) {
        Ok(entry)
    }
    else {
        trace!("Lost the race to create chronology {}", key);
        matching_zone(key, entry, &zone)
    }
}

/// A cached chronology is only handed out for a zone with the same rules
/// as the one it was built with.
fn matching_zone(key: &ChronologyKey, cached: ChronologyRef, zone: &ZoneRef) -> Result<ChronologyRef> {
    if Arc::ptr_eq(cached.zone(), zone) || zone::same_rules(&**cached.zone(), &**zone) {
        Ok(cached)
    }
    else {
        Err(Error::invalid(format!("Zone {} has different rules from the one {} was created with", zone.id(), key)))
    }
}

/// Forgets every chronology built on the zone with this id, so the next
/// lookup picks up whatever the registry now holds.
pub(crate) fn evict_zone(id: &str) {
    let before = INSTANCES.len();
    INSTANCES.retain(|key, _| key.zone != id);
    let evicted = before.saturating_sub(INSTANCES.len());
    if evicted > 0 {
        debug!("Evicted {} chronologies for time zone {:?}", evicted, id);
    }
}

fn build(key: &ChronologyKey, zone: ZoneRef) -> Result<ChronologyRef> {
    match key.mode {
        Mode::Strict    => Ok(Arc::new(StrictChronology::new(instance(&key.standard(), zone)?)?)),
        Mode::Lenient   => Ok(Arc::new(LenientChronology::new(instance(&key.standard(), zone)?)?)),
        Mode::Standard  => match key.calendar {
            CalendarKind::Gregorian  => GregorianChronology::build(zone, key.min_days_in_first_week),
            CalendarKind::Iso        => {
                if key.min_days_in_first_week != 4 {
                    return Err(Error::invalid("The ISO chronology always has 4 min days in the first week"));
                }
                IsoChronology::build(zone)
            }
        },
    }
}


/// The serialized form of a chronology: its key. Deserializing looks the
/// chronology back up, so it comes back as the very same shared instance.
#[cfg(feature = "serde")]
#[derive(PartialEq, Eq, Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SerializedChronology {
    pub key: ChronologyKey,
}

#[cfg(feature = "serde")]
impl SerializedChronology {
    pub fn of(chronology: &dyn crate::cal::Chronology) -> SerializedChronology {
        SerializedChronology { key: chronology.key() }
    }

    pub fn resolve(&self) -> Result<ChronologyRef> {
        self.key.resolve()
    }
}


#[cfg(test)]
mod test {
    use super::*;
    use crate::cal::zone::{FixedZone, Timespan, TimespanZone};
    use pretty_assertions::assert_eq;

    const HOUR: i64 = 3_600_000;

    /// An hour ahead of UTC until hour 100 of the epoch, then `later`
    /// hours ahead.
    fn shifting_zone(id: &str, later: i32) -> ZoneRef {
        let before = Timespan { offset: HOUR as i32, is_dst: false, name: "BEF".into() };
        let after = Timespan { offset: later * HOUR as i32, is_dst: false, name: "AFT".into() };
        Arc::new(TimespanZone::new(id, before, vec![ (100 * HOUR, after) ]).unwrap())
    }

    #[test]
    fn same_key_same_instance() {
        let a = IsoChronology::instance_utc().unwrap();
        let b = IsoChronology::instance_utc().unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn with_utc_returns_cached_instance() {
        let zone: ZoneRef = Arc::new(FixedZone::new(-5 * 3_600_000).unwrap());
        zone::register(zone.clone());
        let zoned = IsoChronology::instance(zone).unwrap();
        assert!(Arc::ptr_eq(&zoned.with_utc().unwrap(), &IsoChronology::instance_utc().unwrap()));
        assert_eq!(zoned.key().zone, "-05:00");
    }

    #[test]
    fn strict_is_cached_separately() {
        let key = ChronologyKey::new(CalendarKind::Gregorian, "UTC", 4, Mode::Strict);
        let strict = key.resolve().unwrap();
        assert_eq!(strict.key(), key);
        assert!(Arc::ptr_eq(&strict, &key.resolve().unwrap()));
        assert!(!Arc::ptr_eq(&strict, &GregorianChronology::instance_utc().unwrap()));
    }

    #[test]
    fn display() {
        assert_eq!(ChronologyKey::new(CalendarKind::Iso, "UTC", 4, Mode::Standard).to_string(), "ISOChronology[UTC]");
        assert_eq!(ChronologyKey::new(CalendarKind::Gregorian, "+01:00", 1, Mode::Lenient).to_string(), "GregorianChronology[+01:00,mdfw=1,lenient]");
    }

    #[test]
    fn mismatched_zone() {
        let key = ChronologyKey::new(CalendarKind::Iso, "UTC", 4, Mode::Standard);
        let zone: ZoneRef = Arc::new(FixedZone::new(3_600_000).unwrap());
        assert!(instance(&key, zone).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn iso_week_rules_are_fixed() {
        let key = ChronologyKey::new(CalendarKind::Iso, "UTC", 1, Mode::Standard);
        assert!(key.resolve().unwrap_err().is_invalid_argument());
    }

    #[test]
    fn same_id_other_rules() {
        let first = IsoChronology::instance(shifting_zone("Test/Shifting", 2)).unwrap();
        let error = IsoChronology::instance(shifting_zone("Test/Shifting", 3)).unwrap_err();
        assert!(error.is_invalid_argument());

        let again = IsoChronology::instance(shifting_zone("Test/Shifting", 2)).unwrap();
        assert!(Arc::ptr_eq(&first, &again));
        assert_eq!(again.hour_of_day().get(200 * HOUR), Ok(10));
    }

    #[test]
    fn same_id_other_fixed_offset() {
        let fixed = |offset: i32| -> ZoneRef {
            let span = Timespan { offset, is_dst: false, name: "FIX".into() };
            Arc::new(TimespanZone::new("Test/Fixed", span, Vec::new()).unwrap())
        };

        let key = ChronologyKey::new(CalendarKind::Gregorian, "Test/Fixed", 4, Mode::Standard);
        instance(&key, fixed(HOUR as i32)).unwrap();
        assert!(instance(&key, fixed(HOUR as i32)).is_ok());
        assert!(instance(&key, fixed(5 * HOUR as i32)).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn register_drops_stale_chronologies() {
        let key = ChronologyKey::new(CalendarKind::Iso, "Test/Replaced", 4, Mode::Strict);

        zone::register(shifting_zone("Test/Replaced", 2));
        let before = key.resolve().unwrap();
        assert_eq!(before.hour_of_day().get(200 * HOUR), Ok(10));

        zone::register(shifting_zone("Test/Replaced", 4));
        let after = key.resolve().unwrap();
        assert_eq!(after.hour_of_day().get(200 * HOUR), Ok(12));
        assert!(!Arc::ptr_eq(&before, &after));
    }
}
