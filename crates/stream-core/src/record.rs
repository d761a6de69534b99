// File: crates/stream-core/src/record.rs
// Summary: Dose record model and the CSV boundary adapter that produces it.
// Notes:
// - Parsing is lenient by contract: no row is dropped, unparseable dates become
//   `None` and unparseable totals become 0.

use std::collections::BTreeSet;
use std::io::Read;

use chrono::NaiveDate;

use crate::error::ParseError;

/// Date format used by the feed.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const REQUIRED_COLUMNS: [&str; 4] = ["date", "location", "vaccine", "total_vaccinations"];

/// One raw CSV row, all fields as text. Fields absent from a short row are empty.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawRow {
    pub date: String,
    pub location: String,
    pub vaccine: String,
    pub total_vaccinations: String,
}

/// A typed observation: cumulative doses of one vaccine in one location on one day.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DoseRecord {
    /// `None` when the source date did not parse; such records never match a date.
    pub date: Option<NaiveDate>,
    pub location: String,
    pub vaccine: String,
    pub total_vaccinations: u64,
}

impl DoseRecord {
    pub fn new(date: Option<NaiveDate>, location: impl Into<String>, vaccine: impl Into<String>, total_vaccinations: u64) -> Self {
        Self { date, location: location.into(), vaccine: vaccine.into(), total_vaccinations }
    }
}

/// Convert a raw row into a typed record.
pub fn parse_row(raw: RawRow) -> DoseRecord {
    DoseRecord {
        date: parse_date(&raw.date),
        location: raw.location,
        vaccine: raw.vaccine,
        total_vaccinations: coerce_count(&raw.total_vaccinations),
    }
}

/// Parse a `YYYY-MM-DD` date; anything else is `None`.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok()
}

/// Lenient numeric coercion: empty, non-numeric, non-finite or negative text is 0.
/// Fractional values truncate toward zero.
pub fn coerce_count(s: &str) -> u64 {
    match s.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => v.trunc() as u64,
        _ => 0,
    }
}

/// Read every row of a headered CSV into dose records.
pub fn parse_csv<R: Read>(reader: R) -> Result<Vec<DoseRecord>, ParseError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let mut index = [0usize; REQUIRED_COLUMNS.len()];
    for (slot, col) in index.iter_mut().zip(REQUIRED_COLUMNS) {
        *slot = headers.iter().position(|h| h == col).ok_or(ParseError::MissingColumn(col))?;
    }
    let [date, location, vaccine, total] = index;

    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let field = |i: usize| rec.get(i).unwrap_or_default().to_owned();
        out.push(parse_row(RawRow {
            date: field(date),
            location: field(location),
            vaccine: field(vaccine),
            total_vaccinations: field(total),
        }));
    }
    tracing::debug!(rows = out.len(), "parsed dose records");
    Ok(out)
}

/// Sorted, deduplicated locations present in the dataset.
pub fn distinct_locations(records: &[DoseRecord]) -> Vec<String> {
    records
        .iter()
        .map(|r| r.location.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_owned)
        .collect()
}

/// Records belonging to `location`, in input order.
pub fn filter_location(records: &[DoseRecord], location: &str) -> Vec<DoseRecord> {
    records.iter().filter(|r| r.location == location).cloned().collect()
}

/// Earliest and latest valid date in the dataset.
pub fn date_extent(records: &[DoseRecord]) -> Option<(NaiveDate, NaiveDate)> {
    let mut dates = records.iter().filter_map(|r| r.date);
    let first = dates.next()?;
    Some(dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d))))
}
