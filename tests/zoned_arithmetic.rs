use std::sync::Arc;

use chronology::{Chronology, ChronologyRef, Duration, IsoChronology, Period, PeriodType, ZoneRef};
use chronology::cal::zone::{FixedZone, Timespan, TimespanZone};
use pretty_assertions::assert_eq;


const HOUR: i64 = 3_600_000;
const DAY: i64 = 24 * HOUR;

/// Winter time at +1, summer time at +2 between hour 1000 and hour 5000
/// of the epoch.
fn summer_time() -> ChronologyRef {
    let winter = Timespan { offset: HOUR as i32, is_dst: false, name: "WIN".into() };
    let summer = Timespan { offset: 2 * HOUR as i32, is_dst: true, name: "SUM".into() };
    let zone = TimespanZone::new("Test/SummerTime", winter.clone(), vec![ (1000 * HOUR, summer), (5000 * HOUR, winter) ]).unwrap();
    IsoChronology::instance(Arc::new(zone)).unwrap()
}


#[test]
fn duration_day_is_always_24_hours() {
    let chronology = summer_time();
    let before = 990 * HOUR;
    let day = Duration::of_standard_days(1).unwrap();
    assert_eq!(chronology.add_duration(before, day.millis(), 1), Ok(before + DAY));
    assert_eq!(day.add_to(before, 1), Ok(before + DAY));
}

#[test]
fn period_day_follows_the_wall_clock() {
    let chronology = summer_time();
    let before = 990 * HOUR;
    let after = Period::days(1).add_to(before, 1, &*chronology).unwrap();

    assert_eq!(after, before + 23 * HOUR);
    assert_eq!(chronology.hour_of_day().get(after), chronology.hour_of_day().get(before));
}

#[test]
fn period_of_hours_is_elapsed() {
    let chronology = summer_time();
    let before = 990 * HOUR;
    assert_eq!(Period::hours(24).add_to(before, 1, &*chronology), Ok(before + DAY));
}

#[test]
fn autumn_day_is_25_hours() {
    let chronology = summer_time();
    let before = 4990 * HOUR;
    assert_eq!(chronology.days().add(before, 1), Ok(before + 25 * HOUR));
}

#[test]
fn short_day_measures_as_one_day() {
    let chronology = summer_time();
    let before = 990 * HOUR;
    let period = Period::between(before, before + 23 * HOUR, PeriodType::day_time(), &*chronology).unwrap();
    assert_eq!(period, Period::days(1).with_period_type(PeriodType::day_time()).unwrap());
}

#[test]
fn local_fields() {
    let zone: ZoneRef = Arc::new(FixedZone::new(-5 * HOUR as i32).unwrap());
    let chronology = IsoChronology::instance(zone).unwrap();

    // 02:00 UTC on the 1st of January is 21:00 on New Year’s Eve at -5
    let instant = 2 * HOUR;
    assert_eq!(chronology.year().get(instant),        Ok(1969));
    assert_eq!(chronology.day_of_month().get(instant), Ok(31));
    assert_eq!(chronology.hour_of_day().get(instant),  Ok(21));
}

#[test]
fn with_zone_keeps_the_instant() {
    let utc = IsoChronology::instance_utc().unwrap();
    let zoned = utc.with_zone(Arc::new(FixedZone::new(9 * HOUR as i32).unwrap())).unwrap();
    assert_eq!(zoned.hour_of_day().get(0), Ok(9));
    assert_eq!(zoned.with_utc().unwrap().hour_of_day().get(0), Ok(0));
}

#[test]
fn gap_rejects_the_date() {
    let chronology = summer_time();

    // clocks go from 1001:00 to 1002:00 local on day 41
    let day = 1001 / 24;
    let millis_in_gap = ((1001 - day * 24) * HOUR + HOUR / 2) as i32;
    let utc = IsoChronology::instance_utc().unwrap();
    let date = utc.days().add(0, day).unwrap();
    let (y, m, d) = (utc.year().get(date).unwrap(), utc.month_of_year().get(date).unwrap(), utc.day_of_month().get(date).unwrap());

    assert!(chronology.date_time_millis(y, m, d, millis_in_gap).unwrap_err().is_out_of_range());
}

#[test]
fn overlap_takes_the_earlier_offset() {
    let chronology = summer_time();

    // 5001:30 local happens twice: first at +2, then at +1
    let day = 5001 / 24;
    let millis = ((5001 - day * 24) * HOUR + HOUR / 2) as i32;
    let utc = IsoChronology::instance_utc().unwrap();
    let date = utc.days().add(0, day).unwrap();
    let (y, m, d) = (utc.year().get(date).unwrap(), utc.month_of_year().get(date).unwrap(), utc.day_of_month().get(date).unwrap());

    assert_eq!(chronology.date_time_millis(y, m, d, millis), Ok(4999 * HOUR + HOUR / 2));
}
