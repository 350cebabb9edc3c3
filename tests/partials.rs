use chronology::{iso_utc, Chronology, Partial, Period, PeriodType};
use chronology::types::DateTimeFieldType::*;
use chronology::types::DurationFieldType;
use pretty_assertions::assert_eq;


#[test]
fn local_time_does_not_roll_into_tomorrow() {
    let iso = iso_utc().unwrap();
    let time = Partial::of(&*iso, &[HourOfDay, MinuteOfHour], &[23, 30]).unwrap();

    let error = time.with_field_added(DurationFieldType::Minutes, 60).unwrap_err();
    assert!(error.is_invalid_argument());

    let wrapped = time.with_field_add_wrapped(DurationFieldType::Minutes, 60).unwrap();
    assert_eq!(wrapped.values(), &[0, 30]);
}

#[test]
fn midnight_at_the_end_of_the_day_is_rejected() {
    let iso = iso_utc().unwrap();
    let error = Partial::of(&*iso, &[HourOfDay, MinuteOfHour], &[24, 0]).unwrap_err();
    assert!(error.is_out_of_range());
}

#[test]
fn fields_must_be_largest_first() {
    let iso = iso_utc().unwrap();
    let error = Partial::of(&*iso, &[DayOfMonth, MonthOfYear], &[1, 1]).unwrap_err();
    assert!(error.is_invalid_argument());
}

#[test]
fn local_date_plus_period() {
    let iso = iso_utc().unwrap();
    let date = Partial::of(&*iso, &[Year, MonthOfYear, DayOfMonth], &[2004, 1, 31]).unwrap();

    let later = date.with_period_added(&Period::new(0, 1, 0, 1, 0, 0, 0, 0), 1).unwrap();
    assert_eq!(later.values(), &[2004, 3, 1]);

    // hours are ignored: a date has nowhere to put them
    let same = date.with_period_added(&Period::hours(48), 1).unwrap();
    assert_eq!(same, date);
}

#[test]
fn fill_into_an_instant() {
    let iso = iso_utc().unwrap();
    let base = iso.date_time_millis_hms(2010, 6, 15, 8, 45, 0, 0).unwrap();
    let date = Partial::of(&*iso, &[MonthOfYear, DayOfMonth], &[12, 25]).unwrap();

    let instant = date.to_instant(&*iso, base).unwrap();
    assert_eq!(instant, iso.date_time_millis_hms(2010, 12, 25, 8, 45, 0, 0).unwrap());
    assert_eq!(date.is_match(&*iso, instant), Ok(true));
    assert_eq!(date.is_match(&*iso, base), Ok(false));
}

#[test]
fn with_inserts_in_order() {
    let iso = iso_utc().unwrap();
    let partial = Partial::empty(&*iso).unwrap()
        .with(DayOfMonth, 5).unwrap()
        .with(Year, 1999).unwrap()
        .with(MonthOfYear, 7).unwrap();

    assert_eq!(partial.field_types(), &[Year, MonthOfYear, DayOfMonth]);
    assert_eq!(partial.values(), &[1999, 7, 5]);
    assert_eq!(partial.get(MonthOfYear), Ok(7));
}

#[test]
fn period_between_partials() {
    let iso = iso_utc().unwrap();
    let start = Partial::of(&*iso, &[Year, MonthOfYear], &[2000, 1]).unwrap();
    let end = Partial::of(&*iso, &[Year, MonthOfYear], &[2001, 3]).unwrap();
    let period_type = PeriodType::for_fields(&[DurationFieldType::Years, DurationFieldType::Months]).unwrap();

    let period = Period::between_partials(&start, &end, period_type).unwrap();
    assert_eq!(period, Period::of(period_type, &[1, 2]).unwrap());
}

#[test]
fn period_between_mismatched_partials() {
    let iso = iso_utc().unwrap();
    let start = Partial::of(&*iso, &[Year, MonthOfYear], &[2000, 1]).unwrap();
    let end = Partial::of(&*iso, &[Year, DayOfYear], &[2001, 3]).unwrap();

    let error = Period::between_partials(&start, &end, PeriodType::standard()).unwrap_err();
    assert!(error.is_invalid_argument());
}
