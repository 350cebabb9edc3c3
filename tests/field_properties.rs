use std::sync::Arc;

use chronology::{iso_utc, Chronology, ChronologyRef, GregorianChronology};
use chronology::cal::zone::FixedZone;
use chronology::types::DateTimeFieldType::{self, *};
use pretty_assertions::assert_eq;


const FIELDS: &[DateTimeFieldType] = &[
    Year, MonthOfYear, DayOfMonth, DayOfYear, DayOfWeek,
    Weekyear, WeekOfWeekyear, HalfdayOfDay, HourOfDay,
    MinuteOfHour, SecondOfMinute, MillisOfSecond, MillisOfDay,
];

const INSTANTS: &[i64] = &[
    0,
    -1,
    951_782_400_000,        // 2000-02-29
    1_104_537_600_000,      // 2005-01-01, in week 53 of 2004
    1_234_567_890_123,
    -123_456_789_012,
    4_102_444_799_999,      // the last millisecond of 2099
];

fn chronologies() -> Vec<ChronologyRef> {
    let india = Arc::new(FixedZone::new(19_800_000).unwrap());
    vec![ iso_utc().unwrap(), GregorianChronology::instance(india).unwrap() ]
}


#[test]
fn setting_the_current_value_changes_nothing() {
    for chronology in chronologies() {
        for &kind in FIELDS {
            let field = chronology.field(kind);
            for &instant in INSTANTS {
                let value = field.get(instant).unwrap();
                assert_eq!(field.set(instant, value), Ok(instant), "{} at {}", kind, instant);
            }
        }
    }
}

#[test]
fn floor_keeps_the_value() {
    for chronology in chronologies() {
        for &kind in FIELDS {
            let field = chronology.field(kind);
            for &instant in INSTANTS {
                let floor = field.round_floor(instant).unwrap();
                assert!(floor <= instant, "{} at {}", kind, instant);
                assert_eq!(field.get(floor), field.get(instant), "{} at {}", kind, instant);
                assert_eq!(field.round_floor(floor), Ok(floor));
                assert_eq!(field.remainder(instant), Ok(instant - floor));
            }
        }
    }
}

#[test]
fn rounding_stays_between_floor_and_ceiling() {
    for chronology in chronologies() {
        for &kind in FIELDS {
            let field = chronology.field(kind);
            for &instant in INSTANTS {
                let floor = field.round_floor(instant).unwrap();
                let ceiling = field.round_ceiling(instant).unwrap();
                assert!(ceiling >= instant, "{} at {}", kind, instant);

                for rounded in [field.round_half_floor(instant), field.round_half_ceiling(instant), field.round_half_even(instant)] {
                    let rounded = rounded.unwrap();
                    assert!(rounded == floor || rounded == ceiling, "{} at {}", kind, instant);
                }
            }
        }
    }
}

#[test]
fn adding_then_measuring() {
    for chronology in chronologies() {
        let units = [chronology.years(), chronology.months(), chronology.weeks(), chronology.days(),
                     chronology.hours(), chronology.minutes(), chronology.seconds(), chronology.millis()];

        for unit in units {
            for &instant in INSTANTS {
                for amount in [1, -1, 13, -40] {
                    let added = unit.add(instant, amount).unwrap();
                    assert_eq!(unit.difference_as_long(added, instant), Ok(amount), "{} {:?} at {}", amount, unit, instant);
                }
            }
        }
    }
}

#[test]
fn clamping_to_the_end_of_the_month() {
    let iso = iso_utc().unwrap();
    let january = iso.date_time_millis(2001, 1, 31, 0).unwrap();
    let february = iso.month_of_year().set(january, 2).unwrap();
    assert_eq!(iso.day_of_month().get(february), Ok(28));
    assert_eq!(iso.months().add(january, 1), Ok(february));
}

#[test]
fn out_of_range_set() {
    let iso = iso_utc().unwrap();
    for (kind, value) in [ (MonthOfYear, 13), (DayOfMonth, 0), (HourOfDay, 24), (DayOfWeek, 8) ] {
        let error = iso.field(kind).set(0, value).unwrap_err();
        assert!(error.is_out_of_range(), "{} = {}", kind, value);
    }
}

#[test]
fn wrapping_leaves_larger_fields_alone() {
    let iso = iso_utc().unwrap();
    let instant = iso.date_time_millis_hms(2010, 12, 31, 23, 0, 0, 0).unwrap();

    let wrapped = iso.hour_of_day().add_wrap_field(instant, 2).unwrap();
    assert_eq!(iso.hour_of_day().get(wrapped), Ok(1));
    assert_eq!(iso.day_of_month().get(wrapped), Ok(31));

    let wrapped = iso.month_of_year().add_wrap_field(instant, 1).unwrap();
    assert_eq!(iso.month_of_year().get(wrapped), Ok(1));
    assert_eq!(iso.year().get(wrapped), Ok(2010));
}
