// File: crates/stream-core/tests/layout.rs
// Purpose: Inside-out ordering, silhouette offset and the injectable layout seam.

use chrono::NaiveDate;
use stream_core::layout::{band_extent, inside_out_order, BandPoint};
use stream_core::transform::{transform, AggregatedRow, StackKeys};
use stream_core::{DoseRecord, InsideOutSilhouette, StackLayout, StackedBand};

fn row(d: u32, values: Vec<f64>) -> AggregatedRow {
    AggregatedRow { date: NaiveDate::from_ymd_opt(2021, 1, d).unwrap(), values }
}

#[test]
fn two_layers_centre_on_zero() {
    let keys: StackKeys = ["A", "B"].into_iter().collect();
    let rows = vec![row(1, vec![1.0, 2.0]), row(2, vec![3.0, 2.0])];
    let bands = InsideOutSilhouette.stack(&keys, &rows);

    assert_eq!(bands.len(), 2);
    let (a, b) = (&bands[0], &bands[1]);
    assert_eq!(a.key, "A");
    assert_eq!(b.key, "B");
    // B peaks first, so it is dealt to the bottom pile and stacked first
    assert_eq!(b.order, 0);
    assert_eq!(a.order, 1);

    assert_eq!((b.points[0].low, b.points[0].high), (-1.5, 0.5));
    assert_eq!((a.points[0].low, a.points[0].high), (0.5, 1.5));
    assert_eq!((b.points[1].low, b.points[1].high), (-2.5, -0.5));
    assert_eq!((a.points[1].low, a.points[1].high), (-0.5, 2.5));
    assert_eq!(a.points[1].value, 3.0);
}

#[test]
fn layers_are_contiguous_and_symmetric() {
    let keys: StackKeys = ["A", "B", "C", "D"].into_iter().collect();
    let rows = vec![
        row(1, vec![5.0, 0.0, 1.0, 2.0]),
        row(2, vec![4.0, 3.0, 0.0, 8.0]),
        row(3, vec![0.0, 9.0, 2.0, 1.0]),
    ];
    let bands = InsideOutSilhouette.stack(&keys, &rows);
    for (j, r) in rows.iter().enumerate() {
        let mut by_order: Vec<&BandPoint> = vec![&bands[0].points[j]; bands.len()];
        for b in &bands {
            by_order[b.order] = &b.points[j];
        }
        let total = r.total();
        assert!((by_order[0].low + total / 2.0).abs() < 1e-9);
        assert!((by_order[by_order.len() - 1].high - total / 2.0).abs() < 1e-9);
        for w in by_order.windows(2) {
            assert!((w[0].high - w[1].low).abs() < 1e-9, "gap between layers");
        }
    }
}

#[test]
fn inside_out_balances_piles() {
    // peaks at 0, 1, 2; sums 10, 1, 1
    let columns = vec![vec![10.0, 0.0, 0.0], vec![0.0, 1.0, 0.0], vec![0.0, 0.0, 1.0]];
    // 0 -> bottom (10), 1 -> top (1), 2 -> top (2)
    assert_eq!(inside_out_order(&columns), vec![0, 1, 2]);
}

#[test]
fn empty_keys_produce_no_bands() {
    let bands = InsideOutSilhouette.stack(&StackKeys::default(), &[]);
    assert!(bands.is_empty());
    assert_eq!(band_extent(&bands), None);
}

#[test]
fn keys_without_rows_have_empty_bands() {
    let records = vec![DoseRecord::new(None, "X", "A", 3)];
    let table = transform(&records);
    let bands = InsideOutSilhouette.stack(&table.keys, &table.rows);
    assert_eq!(bands.len(), 1);
    assert!(bands[0].points.is_empty());
    assert_eq!(band_extent(&bands), None);
}

#[test]
fn extent_spans_all_bounds() {
    let keys: StackKeys = ["A", "B"].into_iter().collect();
    let rows = vec![row(1, vec![1.0, 2.0]), row(2, vec![3.0, 2.0])];
    let bands = InsideOutSilhouette.stack(&keys, &rows);
    assert_eq!(band_extent(&bands), Some((-2.5, 2.5)));
}

/// Flat layout used to check the seam can be swapped.
struct Flat;

impl StackLayout for Flat {
    fn stack(&self, keys: &StackKeys, rows: &[AggregatedRow]) -> Vec<StackedBand> {
        keys.iter()
            .enumerate()
            .map(|(k, key)| StackedBand {
                key: key.to_owned(),
                key_index: k,
                order: k,
                points: rows
                    .iter()
                    .map(|r| BandPoint { date: r.date, low: k as f64, high: k as f64 + 1.0, value: r.values[k] })
                    .collect(),
            })
            .collect()
    }
}

#[test]
fn layout_is_swappable() {
    let keys: StackKeys = ["A", "B"].into_iter().collect();
    let rows = vec![row(1, vec![1.0, 2.0])];
    let layout: Box<dyn StackLayout> = Box::new(Flat);
    let bands = layout.stack(&keys, &rows);
    assert_eq!(band_extent(&bands), Some((0.0, 2.0)));
}
