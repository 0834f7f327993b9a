use chrono::{Local, NaiveDate, TimeZone};
use rusqlite::Connection;
use wageclock::core::calculator::earnings::EarningsCalculator;
use wageclock::core::ledger::Ledger;
use wageclock::core::wage::WageConfig;
use wageclock::db::initialize::init_db;
use wageclock::db::store::{KeyValueStore, MemoryStore};
use std::cell::Cell;
use wageclock::errors::{AppError, AppResult};

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn legacy_value(y: i32, m: u32, day: u32, h: u32, hours: f64, earnings: f64) -> String {
    let ts = Local.with_ymd_and_hms(y, m, day, h, 0, 0).unwrap();
    format!(
        r#"{{"timestamp":"{}","totalHours":{},"totalEarnings":{}}}"#,
        ts.to_rfc3339(),
        hours,
        earnings
    )
}

#[test]
fn two_sessions_on_one_day_accumulate() {
    let store = MemoryStore::new();
    let ledger = Ledger::new(&store);
    let calc = EarningsCalculator::default();
    let day = d("2024-03-01");

    let (h1, e1) = calc.increment(5_400_000, Some(25.0));
    ledger.upsert_daily(day, h1, e1).unwrap();
    let (h2, e2) = calc.increment(1_800_000, Some(25.0));
    let total = ledger.upsert_daily(day, h2, e2).unwrap();

    assert!(close(total.total_hours, 2.0));
    assert!(close(total.total_earnings, 50.0));
    assert_eq!(ledger.get(day).unwrap(), total);
}

#[test]
fn upsert_order_does_not_matter() {
    let a = MemoryStore::new();
    let b = MemoryStore::new();
    let day = d("2024-05-10");

    let deltas = [(0.25, 5.0), (1.1, 22.0), (0.0, 0.0), (3.3, 66.0)];

    for (h, e) in deltas {
        Ledger::new(&a).upsert_daily(day, h, e).unwrap();
    }
    for (h, e) in deltas.iter().rev() {
        Ledger::new(&b).upsert_daily(day, *h, *e).unwrap();
    }

    let ta = Ledger::new(&a).get(day).unwrap();
    let tb = Ledger::new(&b).get(day).unwrap();
    assert!((ta.total_hours - tb.total_hours).abs() < 1e-6);
    assert!((ta.total_earnings - tb.total_earnings).abs() < 1e-6);
}

#[test]
fn negative_increment_is_rejected_without_write() {
    let store = MemoryStore::new();
    let ledger = Ledger::new(&store);

    let err = ledger.upsert_daily(d("2024-03-01"), -1.0, 10.0).unwrap_err();
    assert!(matches!(err, AppError::InvalidIncrement(_)));
    assert!(store.is_empty());
}

#[test]
fn missing_day_reads_as_zero() {
    let store = MemoryStore::new();
    let t = Ledger::new(&store).get(d("2030-01-01")).unwrap();
    assert_eq!(t.total_hours, 0.0);
    assert_eq!(t.total_earnings, 0.0);
}

#[test]
fn corrupted_entry_is_a_read_error() {
    let store = MemoryStore::new();
    store.set_item("dailyTotals_2024-03-01", "{not json").unwrap();

    let err = Ledger::new(&store).get(d("2024-03-01")).unwrap_err();
    assert!(matches!(err, AppError::StorageRead(_)));
}

#[test]
fn edit_without_hours_resets_hours() {
    let store = MemoryStore::new();
    let ledger = Ledger::new(&store);
    let day = d("2024-03-01");
    ledger.upsert_daily(day, 2.0, 50.0).unwrap();

    let t = ledger.edit_entry(day, 42.0, None).unwrap();
    assert_eq!(t.total_earnings, 42.0);
    assert_eq!(t.total_hours, 0.0);

    let t = ledger.edit_entry(day, 42.0, Some(1.5)).unwrap();
    assert_eq!(t.total_hours, 1.5);
    assert_eq!(ledger.get(day).unwrap(), t);
}

#[test]
fn edit_rejects_negative_earnings() {
    let store = MemoryStore::new();
    let ledger = Ledger::new(&store);
    let err = ledger.edit_entry(d("2024-03-01"), -3.0, None).unwrap_err();
    assert!(matches!(err, AppError::InvalidManualEntry(_)));
    assert!(store.is_empty());
}

#[test]
fn delete_one_day_leaves_others() {
    let store = MemoryStore::new();
    let ledger = Ledger::new(&store);
    ledger.upsert_daily(d("2024-03-01"), 1.0, 20.0).unwrap();
    ledger.upsert_daily(d("2024-03-02"), 1.0, 20.0).unwrap();

    ledger.delete(d("2024-03-01")).unwrap();
    ledger.delete(d("2024-03-01")).unwrap();
    assert_eq!(ledger.get(d("2024-03-01")).unwrap().total_earnings, 0.0);

    let all = ledger.list_all().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].date, d("2024-03-02"));
}

#[test]
fn delete_all_keeps_the_wage() {
    let store = MemoryStore::new();
    let ledger = Ledger::new(&store);
    let mut wage = WageConfig::new(&store, EarningsCalculator::default());
    wage.set(31.0).unwrap();

    ledger.upsert_daily(d("2024-03-01"), 1.0, 31.0).unwrap();
    ledger.upsert_daily(d("2024-03-09"), 2.0, 62.0).unwrap();
    store
        .set_item("clockEntry_1700000000000", &legacy_value(2023, 11, 14, 10, 1.0, 20.0))
        .unwrap();

    assert_eq!(ledger.delete_all().unwrap(), 3);
    assert!(ledger.list_all().unwrap().is_empty());
    assert!(ledger.list_legacy().unwrap().is_empty());
    assert_eq!(wage.refresh().unwrap(), 31.0);
}

#[test]
fn range_is_inclusive_and_sorted() {
    let store = MemoryStore::new();
    let ledger = Ledger::new(&store);
    for day in ["2024-02-28", "2024-03-02", "2024-03-01", "2024-03-31", "2024-04-01"] {
        ledger.upsert_daily(d(day), 1.0, 10.0).unwrap();
    }

    let march: Vec<NaiveDate> = ledger
        .range(d("2024-03-01"), d("2024-03-31"))
        .unwrap()
        .into_iter()
        .map(|t| t.date)
        .collect();
    assert_eq!(march, vec![d("2024-03-01"), d("2024-03-02"), d("2024-03-31")]);
}

fn fold_scenario(store: &dyn KeyValueStore) {
    let ledger = Ledger::new(store);

    ledger.upsert_daily(d("2024-03-01"), 1.0, 20.0).unwrap();
    store
        .set_item("clockEntry_a", &legacy_value(2024, 3, 1, 9, 0.5, 10.0))
        .unwrap();
    store
        .set_item("clockEntry_b", &legacy_value(2024, 3, 1, 15, 0.25, 5.0))
        .unwrap();
    store
        .set_item("clockEntry_c", &legacy_value(2024, 3, 2, 11, 2.0, 40.0))
        .unwrap();
    store.set_item("clockEntry_broken", "???").unwrap();

    assert_eq!(ledger.fold_legacy().unwrap(), 3);

    let first = ledger.get(d("2024-03-01")).unwrap();
    assert!(close(first.total_hours, 1.75));
    assert!(close(first.total_earnings, 35.0));
    let second = ledger.get(d("2024-03-02")).unwrap();
    assert!(close(second.total_earnings, 40.0));

    // unreadable entries stay where they are
    assert_eq!(store.get_item("clockEntry_broken").unwrap().as_deref(), Some("???"));
    assert_eq!(store.get_item("clockEntry_a").unwrap(), None);

    // second pass is a no-op
    assert_eq!(ledger.fold_legacy().unwrap(), 0);
    assert_eq!(ledger.get(d("2024-03-01")).unwrap(), first);
}

#[test]
fn fold_legacy_on_memory_store() {
    fold_scenario(&MemoryStore::new());
}

#[test]
fn fold_legacy_on_sqlite() {
    let conn = Connection::open_in_memory().unwrap();
    init_db(&conn).unwrap();
    fold_scenario(&conn);
}

/// Store whose first `remove_item` fails.
struct FlakyRemoveStore {
    inner: MemoryStore,
    fail_next_remove: Cell<bool>,
}

impl KeyValueStore for FlakyRemoveStore {
    fn get_item(&self, key: &str) -> AppResult<Option<String>> {
        self.inner.get_item(key)
    }
    fn set_item(&self, key: &str, value: &str) -> AppResult<()> {
        self.inner.set_item(key, value)
    }
    fn remove_item(&self, key: &str) -> AppResult<()> {
        if self.fail_next_remove.replace(false) {
            return Err(AppError::StorageWrite("remove failed".into()));
        }
        self.inner.remove_item(key)
    }
    fn keys_with_prefix(&self, prefix: &str) -> AppResult<Vec<String>> {
        self.inner.keys_with_prefix(prefix)
    }
    fn range(&self, start: &str, end: &str) -> AppResult<Vec<(String, String)>> {
        self.inner.range(start, end)
    }
    fn atomically(&self, f: &mut dyn FnMut() -> AppResult<()>) -> AppResult<()> {
        self.inner.atomically(f)
    }
}

#[test]
fn fold_retried_after_failed_remove_counts_once() {
    let store = FlakyRemoveStore {
        inner: MemoryStore::new(),
        fail_next_remove: Cell::new(true),
    };
    store
        .set_item("clockEntry_x", &legacy_value(2024, 3, 1, 10, 2.0, 40.0))
        .unwrap();
    let ledger = Ledger::new(&store);

    let err = ledger.fold_legacy().unwrap_err();
    assert!(err.is_storage());
    // nothing moved: the entry is still pending, the day is still empty
    assert_eq!(ledger.get(d("2024-03-01")).unwrap().total_earnings, 0.0);
    assert_eq!(ledger.list_legacy().unwrap().len(), 1);

    assert_eq!(ledger.fold_legacy().unwrap(), 1);
    let day = ledger.get(d("2024-03-01")).unwrap();
    assert!(close(day.total_hours, 2.0));
    assert!(close(day.total_earnings, 40.0));

    assert_eq!(ledger.fold_legacy().unwrap(), 0);
    assert!(close(ledger.get(d("2024-03-01")).unwrap().total_earnings, 40.0));
}
