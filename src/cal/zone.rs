//! Time zones, as seen by the chronology kernel: a function from an instant
//! to an offset, plus the ability to find the transitions between offsets.
//!
//! The kernel never looks inside a zone. Anything that can answer
//! [`DateTimeZone::offset`] and the two transition queries can be plugged
//! into a zoned chronology.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use log::debug;

use crate::error::{Error, Result};
use crate::util::{safe_add, safe_subtract, RangeExt};


/// Shared handle to a time zone.
pub type ZoneRef = Arc<dyn DateTimeZone>;

const MILLIS_PER_DAY: i32 = 86_400_000;


/// A **time zone**: the offset from UTC in effect at each instant.
pub trait DateTimeZone: fmt::Debug + Send + Sync {

    /// This zone’s identifier, such as “UTC” or “+05:30”.
    fn id(&self) -> &str;

    /// The total offset from UTC, in milliseconds, at the given instant.
    fn offset(&self, instant: i64) -> i32;

    /// Whether this zone always has the same offset.
    fn is_fixed(&self) -> bool;

    /// The first transition strictly after the instant, or the instant
    /// itself if there is none.
    fn next_transition(&self, instant: i64) -> i64;

    /// The last millisecond before the latest transition at or before the
    /// instant, or the instant itself if there is none.
    fn previous_transition(&self, instant: i64) -> i64;

    /// The offset to subtract from a local time to get back to UTC.
    ///
    /// In an overlap the earlier offset wins, and a local time inside a gap
    /// is given the offset from after the gap, which moves it forward.
    fn offset_from_local(&self, local: i64) -> i32 {
        let offset_local = self.offset(local);
        let adjusted = local.saturating_sub(i64::from(offset_local));
        let offset_adjusted = self.offset(adjusted);

        if offset_local != offset_adjusted {
            // make sure the time ends up after the gap, which negative
            // offsets don’t do on their own
            if offset_local - offset_adjusted < 0 {
                let next_local = next_transition_or_end(self, adjusted);
                let next_adjusted = next_transition_or_end(self, local.saturating_sub(i64::from(offset_adjusted)));
                if next_local != next_adjusted {
                    return offset_local;
                }
            }
        }
        else if offset_local >= 0 {
            let previous = self.previous_transition(adjusted);
            if previous < adjusted {
                let offset_previous = self.offset(previous);
                let difference = offset_previous - offset_local;
                if adjusted - previous <= i64::from(difference) {
                    return offset_previous;
                }
            }
        }

        offset_adjusted
    }

    /// Converts a UTC instant to the local time it shows in this zone.
    fn convert_utc_to_local(&self, utc: i64) -> Result<i64> {
        safe_add(utc, i64::from(self.offset(utc)))
    }

    /// Converts a local time back to UTC, choosing the offset the same way
    /// `offset_from_local` does. A local time in a gap is an error when
    /// `strict`, and is otherwise moved forward past the gap.
    fn convert_local_to_utc(&self, local: i64, strict: bool) -> Result<i64> {
        let offset = self.offset_from_local(local);
        let utc = safe_subtract(local, i64::from(offset))?;
        if strict && self.offset(utc) != offset {
            return Err(Error::IllegalInstant { local, zone: self.id().to_owned() });
        }
        Ok(utc)
    }

    /// Like `convert_local_to_utc`, but keeps the offset of `original`
    /// whenever that offset is still valid for the result. Field arithmetic
    /// uses this so that adding zero hours inside an overlap stays put.
    fn convert_local_to_utc_near(&self, local: i64, strict: bool, original: i64) -> Result<i64> {
        let offset_original = self.offset(original);
        let utc = safe_subtract(local, i64::from(offset_original))?;
        if self.offset(utc) == offset_original {
            Ok(utc)
        }
        else {
            self.convert_local_to_utc(local, strict)
        }
    }

    /// Whether the local time falls in a gap and so never happens.
    fn is_local_time_gap(&self, local: i64) -> bool {
        !self.is_fixed() && self.convert_local_to_utc(local, true).is_err()
    }
}

/// The next transition, with “none” mapped to the end of time.
fn next_transition_or_end<Z: DateTimeZone + ?Sized>(zone: &Z, instant: i64) -> i64 {
    match zone.next_transition(instant) {
        next if next == instant => i64::MAX,
        next                    => next,
    }
}

/// Whether a zone is UTC itself, rather than merely having a zero offset
/// right now.
pub fn is_utc(zone: &dyn DateTimeZone) -> bool {
    zone.id() == "UTC"
}

/// Whether two zones give the same offset at every instant. Zones are
/// compared transition by transition, up to a limit past which they are
/// taken to agree.
pub fn same_rules(a: &dyn DateTimeZone, b: &dyn DateTimeZone) -> bool {
    const TRANSITION_LIMIT: usize = 10_000;

    let mut instant = i64::MIN;
    for _ in 0 .. TRANSITION_LIMIT {
        if a.offset(instant) != b.offset(instant) {
            return false;
        }

        let next = a.next_transition(instant);
        if next != b.next_transition(instant) {
            return false;
        }
        else if next == instant {
            return true;
        }
        instant = next;
    }

    true
}


/// A zone with the same offset at every instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedZone {
    id: String,
    offset: i32,
}

impl FixedZone {

    /// Creates a zone with the given offset, in milliseconds. The offset
    /// must be less than a day in either direction.
    pub fn new(offset: i32) -> Result<FixedZone> {
        if !offset.is_within(-MILLIS_PER_DAY + 1 ..= MILLIS_PER_DAY - 1) {
            return Err(Error::invalid(format!("Millis out of range: {}", offset)));
        }

        let id = if offset == 0 { "UTC".to_owned() } else { offset_id(offset) };
        Ok(FixedZone { id, offset })
    }

    pub fn offset_millis(&self) -> i32 {
        self.offset
    }
}

impl DateTimeZone for FixedZone {
    fn id(&self) -> &str { &self.id }
    fn offset(&self, _instant: i64) -> i32 { self.offset }
    fn is_fixed(&self) -> bool { true }
    fn next_transition(&self, instant: i64) -> i64 { instant }
    fn previous_transition(&self, instant: i64) -> i64 { instant }
    fn offset_from_local(&self, _local: i64) -> i32 { self.offset }
}

/// Formats an offset as `±HH:MM`, adding seconds and millis when present.
fn offset_id(offset: i32) -> String {
    let sign = if offset < 0 { '-' } else { '+' };
    let offset = offset.unsigned_abs();
    let (hours, minutes) = (offset / 3_600_000, offset / 60_000 % 60);
    let (seconds, millis) = (offset / 1000 % 60, offset % 1000);

    match (seconds, millis) {
        (0, 0) => format!("{}{:02}:{:02}", sign, hours, minutes),
        (_, 0) => format!("{}{:02}:{:02}:{:02}", sign, hours, minutes, seconds),
        _      => format!("{}{:02}:{:02}:{:02}.{:03}", sign, hours, minutes, seconds, millis),
    }
}

/// Parses `±HH:MM` or `±HH:MM:SS` into an offset in milliseconds.
fn parse_offset_id(id: &str) -> Option<i32> {
    let (sign, rest) = match id.as_bytes().first()? {
        b'+' => (1, &id[1..]),
        b'-' => (-1, &id[1..]),
        _    => return None,
    };

    let mut millis = 0_i32;
    let mut parts = 0;
    for (part, unit) in rest.split(':').zip(&[3_600_000, 60_000, 1000]) {
        if part.len() != 2 || !part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        millis += part.parse::<i32>().ok()? * unit;
        parts += 1;
    }

    if parts < 2 || rest.split(':').count() != parts { None } else { Some(sign * millis) }
}


/// One stretch of time with a single offset.
#[derive(PartialEq, Debug, Clone)]
pub struct Timespan {

    /// The *total* offset in effect during this timespan, in milliseconds:
    /// the standard offset plus any daylight-saving offset.
    pub offset: i32,

    /// Whether there was any daylight-saving offset in effect.
    pub is_dst: bool,

    /// The abbreviation in use, such as “GMT” or “PDT”.
    pub name: Cow<'static, str>,
}

/// A zone defined by a list of timespans, separated by the instants at
/// which one gives way to the next. There is always one more timespan than
/// there are transitions.
#[derive(PartialEq, Debug, Clone)]
pub struct TimespanZone {
    id: String,

    /// The timespan in effect up until the first transition.
    first: Timespan,

    /// The transition instants, each paired with the timespan it starts.
    rest: Vec<(i64, Timespan)>,
}

impl TimespanZone {

    /// Creates a zone from its transitions, which must be strictly
    /// increasing and must each actually change the offset.
    pub fn new(id: impl Into<String>, first: Timespan, rest: Vec<(i64, Timespan)>) -> Result<TimespanZone> {
        let mut previous: Option<(i64, i32)> = None;
        for &(at, ref span) in &rest {
            let last_offset = previous.map_or(first.offset, |(_, offset)| offset);
            if previous.map_or(false, |(last_at, _)| last_at >= at) {
                return Err(Error::invalid("Transitions must be in increasing order"));
            }
            if last_offset == span.offset {
                return Err(Error::invalid("Offsets cannot be equal across a transition"));
            }
            previous = Some((at, span.offset));
        }

        Ok(TimespanZone { id: id.into(), first, rest })
    }

    /// The timespan in effect at the instant.
    pub fn timespan(&self, instant: i64) -> &Timespan {
        match self.rest.partition_point(|t| t.0 <= instant) {
            0 => &self.first,
            n => &self.rest[n - 1].1,
        }
    }
}

impl DateTimeZone for TimespanZone {
    fn id(&self) -> &str {
        &self.id
    }

    fn offset(&self, instant: i64) -> i32 {
        self.timespan(instant).offset
    }

    fn is_fixed(&self) -> bool {
        self.rest.is_empty()
    }

    fn next_transition(&self, instant: i64) -> i64 {
        let index = self.rest.partition_point(|t| t.0 <= instant);
        self.rest.get(index).map_or(instant, |t| t.0)
    }

    fn previous_transition(&self, instant: i64) -> i64 {
        match self.rest.partition_point(|t| t.0 <= instant) {
            0 => instant,
            n => self.rest[n - 1].0.saturating_sub(1),
        }
    }
}


lazy_static::lazy_static! {
    static ref UTC: ZoneRef = Arc::new(FixedZone { id: "UTC".to_owned(), offset: 0 });
    static ref REGISTRY: DashMap<String, ZoneRef> = DashMap::new();
}

/// The UTC zone.
pub fn utc() -> ZoneRef {
    UTC.clone()
}

/// Makes a zone available to [`for_id`] (and to chronology keys that name
/// it). Registering a second zone under the same id replaces the first,
/// and drops the cached chronologies built on the old one.
pub fn register(zone: ZoneRef) {
    debug!("Registering time zone {:?}", zone.id());
    let id = zone.id().to_owned();
    REGISTRY.insert(id.clone(), zone);
    super::cache::evict_zone(&id);
}

/// Looks up a zone by id. `UTC` and fixed offsets such as `+05:30` are
/// always available; anything else must have been registered.
pub fn for_id(id: &str) -> Result<ZoneRef> {
    if id == "UTC" || id == "Z" {
        return Ok(utc());
    }

    if let Some(zone) = REGISTRY.get(id) {
        return Ok(zone.clone());
    }

    match parse_offset_id(id) {
        Some(0)       => Ok(utc()),
        Some(offset)  => Ok(Arc::new(FixedZone::new(offset)?)),
        None          => Err(Error::invalid(format!("The datetime zone id '{}' is not recognised", id))),
    }
}


#[cfg(test)]
mod test {
    use super::*;

    const HOUR: i64 = 3_600_000;

    /// Clocks go forward an hour at 10:00 UTC and back at 1000:00 UTC.
    fn summer_time() -> TimespanZone {
        let winter = Timespan { offset: 0, is_dst: false, name: Cow::Borrowed("WIN") };
        let summer = Timespan { offset: HOUR as i32, is_dst: true, name: Cow::Borrowed("SUM") };
        TimespanZone::new("Test/Summer", winter.clone(), vec![ (10 * HOUR, summer), (1000 * HOUR, winter) ]).unwrap()
    }

    mod fixed {
        use super::*;

        #[test]
        fn ids() {
            assert_eq!(FixedZone::new(19_800_000).unwrap().id(), "+05:30");
            assert_eq!(FixedZone::new(-3_600_000).unwrap().id(), "-01:00");
            assert_eq!(FixedZone::new(0).unwrap().id(), "UTC");
        }

        #[test]
        fn out_of_range() {
            assert!(FixedZone::new(86_400_000).is_err());
        }

        #[test]
        fn lookup() {
            assert_eq!(for_id("+05:30").unwrap().offset(0), 19_800_000);
            assert_eq!(for_id("-00:30").unwrap().offset(0), -1_800_000);
            assert!(is_utc(&*for_id("+00:00").unwrap()));
            assert!(for_id("Nowhere/Special").unwrap_err().is_invalid_argument());
        }
    }

    mod transitions {
        use super::*;

        #[test]
        fn offsets() {
            let zone = summer_time();
            assert_eq!(zone.offset(10 * HOUR - 1), 0);
            assert_eq!(zone.offset(10 * HOUR), HOUR as i32);
            assert_eq!(zone.next_transition(0), 10 * HOUR);
            assert_eq!(zone.next_transition(2000 * HOUR), 2000 * HOUR);
            assert_eq!(zone.previous_transition(11 * HOUR), 10 * HOUR - 1);
        }

        #[test]
        fn gap_is_pushed_forward() {
            let zone = summer_time();
            // 10:30 local never happens: the clocks jump from 10:00 to 11:00
            let local = 10 * HOUR + HOUR / 2;
            assert!(zone.is_local_time_gap(local));
            assert_eq!(zone.convert_local_to_utc(local, false), Ok(local));
            assert!(zone.convert_local_to_utc(local, true).unwrap_err().is_out_of_range());
        }

        #[test]
        fn overlap_prefers_earlier_offset() {
            let zone = summer_time();
            // 1000:30 local happens twice, at 999:30 and 1000:30 UTC
            let local = 1000 * HOUR + HOUR / 2;
            assert_eq!(zone.offset_from_local(local), HOUR as i32);
            assert_eq!(zone.convert_local_to_utc(local, true), Ok(999 * HOUR + HOUR / 2));
        }

        #[test]
        fn round_trip_outside_transitions() {
            let zone = summer_time();
            for utc in &[0, 5 * HOUR, 20 * HOUR, 2000 * HOUR] {
                let local = zone.convert_utc_to_local(*utc).unwrap();
                assert_eq!(zone.convert_local_to_utc(local, true), Ok(*utc));
            }
        }

        #[test]
        fn unordered_transitions_rejected() {
            let span = |offset| Timespan { offset, is_dst: false, name: Cow::Borrowed("X") };
            assert!(TimespanZone::new("Bad", span(0), vec![ (5, span(1)), (5, span(0)) ]).is_err());
            assert!(TimespanZone::new("Bad", span(0), vec![ (5, span(0)) ]).is_err());
        }
    }

    #[test]
    fn registry() {
        register(Arc::new(summer_time()));
        assert_eq!(for_id("Test/Summer").unwrap().offset(10 * HOUR), HOUR as i32);
    }
}
