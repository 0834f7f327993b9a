use chrono::NaiveDate;
use wageclock::core::aggregate::AggregationEngine;
use wageclock::core::ledger::Ledger;
use wageclock::db::store::MemoryStore;
use wageclock::models::period::{Period, WeekMode};

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[test]
fn empty_day_hides_values() {
    let store = MemoryStore::new();
    let ledger = Ledger::new(&store);

    let s = AggregationEngine::new(&ledger)
        .series(Period::Daily, d("2024-03-01"))
        .unwrap();
    assert_eq!(s.labels(), vec!["2024-03-01"]);
    assert_eq!(s.values(), vec![0.0]);
    assert!(!s.show_values);
}

#[test]
fn daily_series_is_rounded() {
    let store = MemoryStore::new();
    let ledger = Ledger::new(&store);
    ledger.upsert_daily(d("2024-03-01"), 1.0 / 3.0, 10.0 / 3.0).unwrap();

    let s = AggregationEngine::new(&ledger)
        .series(Period::Daily, d("2024-03-01"))
        .unwrap();
    assert_eq!(s.values(), vec![3.33]);
    assert_eq!(s.total_hours, 0.33);
    assert!(s.show_values);
}

#[test]
fn weekly_per_day_has_seven_points() {
    let store = MemoryStore::new();
    let ledger = Ledger::new(&store);
    ledger.upsert_daily(d("2024-03-04"), 1.0, 20.0).unwrap();
    ledger.upsert_daily(d("2024-03-06"), 2.0, 40.0).unwrap();
    // outside the week
    ledger.upsert_daily(d("2024-03-10"), 5.0, 100.0).unwrap();

    let s = AggregationEngine::new(&ledger)
        .series(Period::Weekly(WeekMode::Days), d("2024-03-06"))
        .unwrap();

    assert_eq!(s.points.len(), 7);
    assert_eq!(s.points[0].from, d("2024-03-03"));
    assert_eq!(s.values(), vec![0.0, 20.0, 0.0, 40.0, 0.0, 0.0, 0.0]);
    assert_eq!(s.total_hours, 3.0);
    // zero days in the week hide the value labels
    assert!(!s.show_values);
}

#[test]
fn weekly_total_is_one_point() {
    let store = MemoryStore::new();
    let ledger = Ledger::new(&store);
    ledger.upsert_daily(d("2024-03-04"), 1.0, 20.0).unwrap();
    ledger.upsert_daily(d("2024-03-06"), 2.0, 40.0).unwrap();

    let s = AggregationEngine::new(&ledger)
        .series(Period::Weekly(WeekMode::Total), d("2024-03-06"))
        .unwrap();

    assert_eq!(s.labels(), vec!["Week of 2024-03-03"]);
    assert_eq!(s.values(), vec![60.0]);
    assert!(s.show_values);
}

#[test]
fn monthly_buckets_sum_their_days() {
    let store = MemoryStore::new();
    let ledger = Ledger::new(&store);
    for day in 1..=31 {
        let date = d(&format!("2024-03-{day:02}"));
        ledger.upsert_daily(date, 0.5, 10.0).unwrap();
    }
    // previous month is ignored
    ledger.upsert_daily(d("2024-02-29"), 8.0, 160.0).unwrap();

    let s = AggregationEngine::new(&ledger)
        .series(Period::Monthly, d("2024-03-20"))
        .unwrap();

    assert_eq!(
        s.labels(),
        vec!["Week 1", "Week 2", "Week 3", "Week 4", "Week 5"]
    );
    assert_eq!(s.values(), vec![70.0, 70.0, 70.0, 70.0, 30.0]);
    assert_eq!(s.total_hours, 15.5);
    assert!(s.show_values);
}

#[test]
fn tiny_amount_shows_values_although_it_rounds_to_a_cent() {
    let store = MemoryStore::new();
    let ledger = Ledger::new(&store);
    ledger.upsert_daily(d("2024-03-01"), 0.001, 0.014).unwrap();

    let s = AggregationEngine::new(&ledger)
        .series(Period::Daily, d("2024-03-01"))
        .unwrap();
    assert_eq!(s.values(), vec![0.01]);
    assert!(s.show_values);
}

#[test]
fn exactly_one_cent_hides_values() {
    let store = MemoryStore::new();
    let ledger = Ledger::new(&store);
    ledger.upsert_daily(d("2024-03-01"), 0.001, 0.01).unwrap();

    let s = AggregationEngine::new(&ledger)
        .series(Period::Daily, d("2024-03-01"))
        .unwrap();
    assert!(!s.show_values);
}

#[test]
fn weekly_per_day_full_week_shows_values() {
    let store = MemoryStore::new();
    let ledger = Ledger::new(&store);
    // Sunday 2024-03-03 ..= Saturday 2024-03-09
    for day in 3..=9 {
        ledger
            .upsert_daily(d(&format!("2024-03-{day:02}")), 1.0, 20.0)
            .unwrap();
    }

    let s = AggregationEngine::new(&ledger)
        .series(Period::Weekly(WeekMode::Days), d("2024-03-06"))
        .unwrap();

    assert_eq!(s.values(), vec![20.0; 7]);
    assert_eq!(s.total_hours, 7.0);
    assert!(s.show_values);
}

#[test]
fn weekly_per_day_empty_week_hides_values() {
    let store = MemoryStore::new();
    let ledger = Ledger::new(&store);
    // entries around the week, none inside
    ledger.upsert_daily(d("2024-03-02"), 1.0, 20.0).unwrap();
    ledger.upsert_daily(d("2024-03-10"), 1.0, 20.0).unwrap();

    let s = AggregationEngine::new(&ledger)
        .series(Period::Weekly(WeekMode::Days), d("2024-03-06"))
        .unwrap();

    assert_eq!(s.values(), vec![0.0; 7]);
    assert_eq!(s.total_hours, 0.0);
    assert!(!s.show_values);
}
