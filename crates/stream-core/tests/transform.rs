// File: crates/stream-core/tests/transform.rs
// Purpose: Daily-delta derivation and dense per-date aggregation.

use chrono::NaiveDate;
use stream_core::transform::{aggregate, derive_daily, transform, StackKeys};
use stream_core::DoseRecord;

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn rec(date: &str, location: &str, vaccine: &str, total: u64) -> DoseRecord {
    DoseRecord::new(Some(day(date)), location, vaccine, total)
}

#[test]
fn decrease_clamps_to_zero() {
    let records = vec![
        rec("2021-01-01", "X", "A", 100),
        rec("2021-01-02", "X", "A", 150),
        rec("2021-01-03", "X", "A", 140),
    ];
    let derived = derive_daily(&records);
    let values: Vec<u64> = derived.iter().map(|d| d.current_value).collect();
    assert_eq!(values, vec![100, 50, 0]);
}

#[test]
fn deltas_follow_date_order_not_input_order() {
    let records = vec![
        rec("2021-01-03", "X", "A", 140),
        rec("2021-01-01", "X", "A", 100),
        rec("2021-01-02", "X", "A", 150),
    ];
    let derived = derive_daily(&records);
    let values: Vec<u64> = derived.iter().map(|d| d.current_value).collect();
    // output keeps input order
    assert_eq!(values, vec![0, 100, 50]);
}

#[test]
fn series_are_independent_per_vaccine() {
    let records = vec![
        rec("2021-01-01", "X", "A", 10),
        rec("2021-01-01", "X", "B", 5),
        rec("2021-01-02", "X", "A", 30),
        rec("2021-01-02", "X", "B", 4),
    ];
    let values: Vec<u64> = derive_daily(&records).iter().map(|d| d.current_value).collect();
    assert_eq!(values, vec![10, 5, 20, 0]);
}

#[test]
fn two_vaccines_one_day_make_one_row() {
    let records = vec![rec("2021-01-01", "X", "A", 10), rec("2021-01-01", "X", "B", 20)];
    let table = transform(&records);
    assert_eq!(table.keys.iter().collect::<Vec<_>>(), vec!["A", "B"]);
    assert_eq!(table.rows.len(), 1);
    let row = &table.rows[0];
    assert_eq!(row.date, day("2021-01-01"));
    assert_eq!(row.value(&table.keys, "A"), Some(10.0));
    assert_eq!(row.value(&table.keys, "B"), Some(20.0));
}

#[test]
fn absent_pairs_default_to_zero_and_rows_are_sorted() {
    let records = vec![
        rec("2021-01-03", "X", "B", 7),
        rec("2021-01-01", "X", "A", 10),
        rec("2021-01-02", "X", "A", 12),
    ];
    let table = transform(&records);
    let dates: Vec<NaiveDate> = table.dates();
    assert_eq!(dates, vec![day("2021-01-01"), day("2021-01-02"), day("2021-01-03")]);
    // keys in first-seen order
    assert_eq!(table.keys.iter().collect::<Vec<_>>(), vec!["B", "A"]);
    assert_eq!(table.rows[0].values, vec![0.0, 10.0]);
    assert_eq!(table.rows[1].values, vec![0.0, 2.0]);
    assert_eq!(table.rows[2].values, vec![7.0, 0.0]);
}

#[test]
fn row_totals_match_derived_sums() {
    let records = vec![
        rec("2021-02-01", "X", "A", 100),
        rec("2021-02-01", "X", "B", 40),
        rec("2021-02-02", "X", "A", 180),
        rec("2021-02-02", "X", "B", 35),
        rec("2021-02-03", "X", "C", 9),
        rec("2021-02-03", "X", "A", 260),
    ];
    let table = transform(&records);
    for row in &table.rows {
        let expected: u64 = table
            .derived
            .iter()
            .filter(|d| d.record.date == Some(row.date))
            .map(|d| d.current_value)
            .sum();
        assert_eq!(row.total(), expected as f64, "row {}", row.date);
    }
}

#[test]
fn empty_input_yields_empty_table() {
    let table = transform(&[]);
    assert!(table.keys.is_empty());
    assert!(table.rows.is_empty());
    assert!(table.derived.is_empty());
}

#[test]
fn invalid_dates_are_orphaned() {
    let records = vec![
        rec("2021-01-01", "X", "A", 10),
        DoseRecord::new(None, "X", "A", 99),
        DoseRecord::new(None, "X", "Z", 5),
    ];
    let table = transform(&records);
    assert_eq!(table.derived[1].current_value, 0);
    assert_eq!(table.derived[2].current_value, 0);
    assert_eq!(table.rows.len(), 1);
    assert_eq!(table.rows[0].values, vec![10.0, 0.0]);
    assert_eq!(table.keys.index_of("Z"), Some(1));
}

#[test]
fn duplicate_day_records_are_summed() {
    let records = vec![rec("2021-01-01", "X", "A", 10), rec("2021-01-01", "X", "A", 15)];
    let derived = derive_daily(&records);
    assert_eq!(derived.iter().map(|d| d.current_value).collect::<Vec<_>>(), vec![10, 5]);
    let keys = StackKeys::from_records(&records);
    let rows = aggregate(&derived, &keys);
    assert_eq!(rows[0].values, vec![15.0]);
}

#[test]
fn find_returns_first_match() {
    let records = vec![rec("2021-01-01", "X", "A", 10), rec("2021-01-02", "X", "A", 25)];
    let table = transform(&records);
    let hit = table.find("A", day("2021-01-02")).unwrap();
    assert_eq!(hit.current_value, 15);
    assert_eq!(hit.record.total_vaccinations, 25);
    assert!(table.find("B", day("2021-01-02")).is_none());
}
