// File: crates/stream-core/src/layout.rs
// Summary: Stacking layout seam plus the inside-out / silhouette streamgraph engine.

use chrono::NaiveDate;

use crate::transform::{AggregatedRow, StackKeys};

/// Lower and upper bound of one layer on one date.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BandPoint {
    pub date: NaiveDate,
    pub low: f64,
    pub high: f64,
    /// Raw (unstacked) value of the layer on this date.
    pub value: f64,
}

/// One stacked layer.
#[derive(Clone, Debug, PartialEq)]
pub struct StackedBand {
    pub key: String,
    /// Position of the key in the stack-key set.
    pub key_index: usize,
    /// Position of the layer in the stacking order (0 = lowest).
    pub order: usize,
    pub points: Vec<BandPoint>,
}

/// Stacking capability: dense rows plus key order in, one band per key out.
/// Bands are returned in key order.
pub trait StackLayout {
    fn stack(&self, keys: &StackKeys, rows: &[AggregatedRow]) -> Vec<StackedBand>;
}

/// Streamgraph layout: inside-out order with silhouette offset.
#[derive(Clone, Copy, Debug, Default)]
pub struct InsideOutSilhouette;

impl StackLayout for InsideOutSilhouette {
    fn stack(&self, keys: &StackKeys, rows: &[AggregatedRow]) -> Vec<StackedBand> {
        let n = keys.len();
        if n == 0 {
            return Vec::new();
        }
        let columns: Vec<Vec<f64>> = (0..n)
            .map(|k| rows.iter().map(|r| r.values.get(k).copied().unwrap_or(0.0)).collect())
            .collect();

        let order = inside_out_order(&columns);
        let mut bounds: Vec<Vec<(f64, f64)>> = columns
            .iter()
            .map(|c| c.iter().map(|&v| (0.0, v)).collect())
            .collect();
        silhouette_offset(&mut bounds, &order);

        let mut position = vec![0usize; n];
        for (pos, &k) in order.iter().enumerate() {
            position[k] = pos;
        }

        keys.iter()
            .enumerate()
            .map(|(k, key)| StackedBand {
                key: key.to_owned(),
                key_index: k,
                order: position[k],
                points: rows
                    .iter()
                    .zip(&bounds[k])
                    .zip(&columns[k])
                    .map(|((row, &(low, high)), &value)| BandPoint { date: row.date, low, high, value })
                    .collect(),
            })
            .collect()
    }
}

/// Index of the first maximum of a column.
fn peak(column: &[f64]) -> usize {
    let mut best = f64::NEG_INFINITY;
    let mut at = 0;
    for (i, &v) in column.iter().enumerate() {
        if v > best {
            best = v;
            at = i;
        }
    }
    at
}

/// Columns ordered by when they peak, then dealt alternately onto the lighter
/// of two piles; the bottom pile is reversed and placed under the top pile so
/// that early-peaking layers sit at the centre.
pub fn inside_out_order(columns: &[Vec<f64>]) -> Vec<usize> {
    let peaks: Vec<usize> = columns.iter().map(|c| peak(c)).collect();
    let sums: Vec<f64> = columns.iter().map(|c| c.iter().filter(|v| v.is_finite()).sum()).collect();
    let mut by_appearance: Vec<usize> = (0..columns.len()).collect();
    by_appearance.sort_by_key(|&i| peaks[i]);

    let (mut top, mut bottom) = (0.0, 0.0);
    let (mut tops, mut bottoms) = (Vec::new(), Vec::new());
    for j in by_appearance {
        if top < bottom {
            top += sums[j];
            tops.push(j);
        } else {
            bottom += sums[j];
            bottoms.push(j);
        }
    }
    bottoms.reverse();
    bottoms.extend(tops);
    bottoms
}

/// Centre the stack around zero, then stack each layer on the previous one in `order`.
/// `bounds[k][j]` must hold `(0, value)` on entry.
pub fn silhouette_offset(bounds: &mut [Vec<(f64, f64)>], order: &[usize]) {
    let Some(&first) = order.first() else { return };
    let m = bounds[first].len();
    for j in 0..m {
        let total: f64 = bounds.iter().map(|s| s[j].1).filter(|v| v.is_finite()).sum();
        let low = -total / 2.0;
        bounds[first][j] = (low, bounds[first][j].1 + low);
    }
    for w in order.windows(2) {
        let (below, above) = (w[0], w[1]);
        for j in 0..m {
            let base = bounds[below][j].1;
            let v = bounds[above][j].1;
            bounds[above][j] = (base, base + v);
        }
    }
}

/// Extent of every low/high across all bands; `None` when there is nothing stacked.
pub fn band_extent(bands: &[StackedBand]) -> Option<(f64, f64)> {
    bands
        .iter()
        .flat_map(|b| b.points.iter().flat_map(|p| [p.low, p.high]))
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((f64::min(lo, v), f64::max(hi, v))),
        })
}
