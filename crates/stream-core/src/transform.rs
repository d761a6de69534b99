// File: crates/stream-core/src/transform.rs
// Summary: Cumulative-to-daily series transform and dense per-date aggregation.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use indexmap::IndexSet;

use crate::record::DoseRecord;

/// A dose record plus its daily increment within its (location, vaccine) series.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DerivedRecord {
    pub record: DoseRecord,
    pub current_value: u64,
}

/// Distinct vaccine names in first-seen order; one stack layer each.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StackKeys(IndexSet<String>);

impl StackKeys {
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a DoseRecord>,
    {
        Self(records.into_iter().map(|r| r.vaccine.clone()).collect())
    }

    pub fn len(&self) -> usize { self.0.len() }
    pub fn is_empty(&self) -> bool { self.0.is_empty() }
    pub fn index_of(&self, key: &str) -> Option<usize> { self.0.get_index_of(key) }
    pub fn iter(&self) -> impl Iterator<Item = &str> { self.0.iter().map(String::as_str) }
}

impl<S: Into<String>> FromIterator<S> for StackKeys {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// One dense table row: the summed daily value of every stack key on `date`.
#[derive(Clone, Debug, PartialEq)]
pub struct AggregatedRow {
    pub date: NaiveDate,
    /// Aligned with the `StackKeys` the row was built with.
    pub values: Vec<f64>,
}

impl AggregatedRow {
    pub fn value(&self, keys: &StackKeys, key: &str) -> Option<f64> {
        keys.index_of(key).and_then(|i| self.values.get(i).copied())
    }

    pub fn total(&self) -> f64 { self.values.iter().sum() }
}

/// Output of one transform pass for a single location.
#[derive(Clone, Debug, Default)]
pub struct SeriesTable {
    pub keys: StackKeys,
    /// Derived records in input order.
    pub derived: Vec<DerivedRecord>,
    /// One row per distinct valid date, ascending.
    pub rows: Vec<AggregatedRow>,
}

impl SeriesTable {
    /// Distinct dates of the table, ascending.
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.rows.iter().map(|r| r.date).collect()
    }

    /// First derived record matching `(date, vaccine)`.
    pub fn find(&self, vaccine: &str, date: NaiveDate) -> Option<&DerivedRecord> {
        self.derived
            .iter()
            .find(|d| d.record.date == Some(date) && d.record.vaccine == vaccine)
    }
}

/// Assign daily increments per vaccine series.
///
/// Within each vaccine the records are stably sorted by date; the first record's
/// increment is its total, later ones are `max(0, total - previous total)`.
/// Records with an invalid date are left out of the series and keep 0.
pub fn derive_daily(records: &[DoseRecord]) -> Vec<DerivedRecord> {
    let mut current = vec![0u64; records.len()];

    let mut by_vaccine: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for (i, r) in records.iter().enumerate() {
        if r.date.is_some() {
            by_vaccine.entry(r.vaccine.as_str()).or_default().push(i);
        }
    }

    for idx in by_vaccine.values_mut() {
        idx.sort_by_key(|&i| records[i].date);
        let mut prev: Option<u64> = None;
        for &i in idx.iter() {
            let total = records[i].total_vaccinations;
            current[i] = match prev {
                None => total,
                Some(p) => total.saturating_sub(p),
            };
            prev = Some(total);
        }
    }

    records
        .iter()
        .cloned()
        .zip(current)
        .map(|(record, current_value)| DerivedRecord { record, current_value })
        .collect()
}

/// Sum increments into one dense row per date; absent (date, key) pairs are 0.
pub fn aggregate(derived: &[DerivedRecord], keys: &StackKeys) -> Vec<AggregatedRow> {
    let mut by_date: BTreeMap<NaiveDate, Vec<f64>> = BTreeMap::new();
    for d in derived {
        let Some(date) = d.record.date else { continue };
        let Some(k) = keys.index_of(&d.record.vaccine) else { continue };
        let row = by_date.entry(date).or_insert_with(|| vec![0.0; keys.len()]);
        row[k] += d.current_value as f64;
    }
    by_date
        .into_iter()
        .map(|(date, values)| AggregatedRow { date, values })
        .collect()
}

/// Full transform for the records of one location. Recomputed from scratch each call.
pub fn transform(records: &[DoseRecord]) -> SeriesTable {
    let keys = StackKeys::from_records(records);
    let derived = derive_daily(records);
    let rows = aggregate(&derived, &keys);
    tracing::debug!(keys = keys.len(), rows = rows.len(), "transformed series");
    SeriesTable { keys, derived, rows }
}
