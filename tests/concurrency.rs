use std::sync::Arc;
use std::thread;

use chronology::{Chronology, ChronologyRef, GregorianChronology, ZoneRef};
use chronology::cal::zone::FixedZone;
use pretty_assertions::assert_eq;


const DAY: i64 = 86_400_000;
const THREADS: usize = 8;

fn plus_three() -> ZoneRef {
    Arc::new(FixedZone::new(3 * 3_600_000).unwrap())
}

/// Year, month and day of every 37th day from 1600 to 2400.
fn dates(chronology: &ChronologyRef) -> Vec<(i32, i32, i32)> {
    let start = chronology.date_time_millis(1600, 1, 1, 0).unwrap();
    let end = chronology.date_time_millis(2400, 1, 1, 0).unwrap();

    let mut dates = Vec::new();
    let mut instant = start;
    while instant < end {
        dates.push((chronology.year().get(instant).unwrap(),
                    chronology.month_of_year().get(instant).unwrap(),
                    chronology.day_of_month().get(instant).unwrap()));
        instant += 37 * DAY;
    }
    dates
}


#[test]
fn shared_instance_across_threads() {
    let workers = (0 .. THREADS).map(|_| thread::spawn(|| {
        let chronology = GregorianChronology::instance_with(plus_three(), 4).unwrap();
        let dates = dates(&chronology);
        (chronology, dates)
    })).collect::<Vec<_>>();

    let results = workers.into_iter().map(|w| w.join().unwrap()).collect::<Vec<_>>();

    let baseline = GregorianChronology::instance_with(plus_three(), 4).unwrap();
    let expected = dates(&baseline);
    assert_eq!(expected.first(), Some(&(1600, 1, 1)));

    for (chronology, dates) in &results {
        assert!(Arc::ptr_eq(chronology, &baseline));
        assert_eq!(dates, &expected);
    }
}

#[test]
fn distinct_week_rules_across_threads() {
    let workers = (1 ..= 7_u8).map(|mdfw| thread::spawn(move || {
        let chronology = GregorianChronology::instance_with(plus_three(), mdfw).unwrap();
        (mdfw, chronology)
    })).collect::<Vec<_>>();

    for worker in workers {
        let (mdfw, chronology) = worker.join().unwrap();
        assert_eq!(chronology.key().min_days_in_first_week, mdfw);
        assert!(Arc::ptr_eq(&chronology, &GregorianChronology::instance_with(plus_three(), mdfw).unwrap()));
    }
}
