// File: crates/stream-core/src/axis.rs
// Summary: Time axis model: tick interval choice, multi-scale tick labels and scene construction.

use chrono::{Datelike, NaiveDate, Weekday};
use skia_safe as skia;

use crate::curve::PathData;
use crate::scale::{date_to_logical, TimeScale};
use crate::scene::{Group, LineNode, PathNode, TextAnchor, TextNode};

/// Requested tick count for both time axes.
pub const X_TICKS: usize = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orient {
    Top,
    Bottom,
}

/// Calendar interval used to place ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickInterval {
    /// Every n-th day of the month (1st, 1+n, ...).
    Days(u32),
    /// Sundays.
    Week,
    /// First of every n-th month (January-aligned).
    Months(u32),
    /// January 1st of every n-th year.
    Years(i32),
}

const CANDIDATES: [(TickInterval, f64); 6] = [
    (TickInterval::Days(1), 1.0),
    (TickInterval::Days(2), 2.0),
    (TickInterval::Week, 7.0),
    (TickInterval::Months(1), 30.0),
    (TickInterval::Months(3), 90.0),
    (TickInterval::Years(1), 365.0),
];

/// Pick the calendar interval whose duration is closest (by ratio) to span / count.
pub fn tick_interval(start: f64, stop: f64, count: usize) -> TickInterval {
    let target = (stop - start).abs() / count.max(1) as f64;
    let i = CANDIDATES.partition_point(|&(_, d)| d <= target);
    if i == CANDIDATES.len() {
        let step = tick_step(start / 365.0, stop / 365.0, count).max(1.0);
        return TickInterval::Years(step as i32);
    }
    if i == 0 {
        return TickInterval::Days(1);
    }
    let (lo, lo_d) = CANDIDATES[i - 1];
    let (hi, hi_d) = CANDIDATES[i];
    if target / lo_d < hi_d / target { lo } else { hi }
}

/// Nice step (1, 2, 5 × 10^n) covering `[start, stop]` in about `count` steps.
pub fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    let raw = (stop - start).abs() / count.max(1) as f64;
    if raw <= 0.0 || !raw.is_finite() {
        return 1.0;
    }
    let power = 10f64.powf(raw.log10().floor());
    let error = raw / power;
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    factor * power
}

impl TickInterval {
    fn matches(&self, d: NaiveDate) -> bool {
        match *self {
            TickInterval::Days(n) => (d.day() - 1) % n == 0,
            TickInterval::Week => d.weekday() == Weekday::Sun,
            TickInterval::Months(n) => d.day() == 1 && d.month0() % n == 0,
            TickInterval::Years(n) => d.ordinal() == 1 && d.year().rem_euclid(n.max(1)) == 0,
        }
    }
}

/// Tick dates inside the (possibly zoomed) scale domain.
pub fn time_ticks(scale: &TimeScale, count: usize) -> Vec<NaiveDate> {
    let (start, stop) = scale.domain_sorted();
    if !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    let interval = tick_interval(start, stop, count);
    let first = start.ceil() as i32;
    let last = stop.floor() as i32;
    let (Some(mut d), Some(end)) = (
        NaiveDate::from_num_days_from_ce_opt(first),
        NaiveDate::from_num_days_from_ce_opt(last),
    ) else {
        return Vec::new();
    };
    let mut out = Vec::new();
    while d <= end {
        if interval.matches(d) {
            out.push(d);
        }
        match d.succ_opt() {
            Some(next) => d = next,
            None => break,
        }
    }
    out
}

/// Multi-scale label: weekday+day, month+day on Sundays, month name on the 1st, year on Jan 1.
pub fn tick_format(d: NaiveDate) -> String {
    if d.day() != 1 {
        if d.weekday() != Weekday::Sun {
            d.format("%a %d").to_string()
        } else {
            d.format("%b %d").to_string()
        }
    } else if d.ordinal() != 1 {
        d.format("%B").to_string()
    } else {
        d.format("%Y").to_string()
    }
}

/// Axis drawing parameters.
#[derive(Clone, Copy, Debug)]
pub struct AxisStyle {
    pub orient: Orient,
    /// Tick line length; negative values extend across the plot.
    pub tick_size_inner: f64,
    pub tick_size_outer: f64,
    pub tick_padding: f64,
    pub draw_tick_lines: bool,
    pub stroke: skia::Color,
    pub label: skia::Color,
    pub font_size: f64,
}

impl AxisStyle {
    pub fn new(orient: Orient, stroke: skia::Color, label: skia::Color) -> Self {
        Self {
            orient,
            tick_size_inner: 6.0,
            tick_size_outer: 6.0,
            tick_padding: 5.0,
            draw_tick_lines: true,
            stroke,
            label,
            font_size: 10.0,
        }
    }
}

/// Build an axis group translated to `offset_y`.
pub fn axis_group(class: &str, scale: &TimeScale, style: &AxisStyle, offset_y: f64) -> Group {
    let k = match style.orient {
        Orient::Top => -1.0,
        Orient::Bottom => 1.0,
    };
    let mut g = Group::new(class).translated(0.0, offset_y);

    let mut domain = PathData::new();
    domain.move_to(scale.r0, k * style.tick_size_outer);
    domain.line_to(scale.r0, 0.0);
    domain.line_to(scale.r1, 0.0);
    domain.line_to(scale.r1, k * style.tick_size_outer);
    g.push(PathNode::stroked("domain", domain, style.stroke));

    let spacing = style.tick_size_inner.max(0.0) + style.tick_padding;
    let (lo, hi) = (scale.r0.min(scale.r1), scale.r0.max(scale.r1));
    for d in time_ticks(scale, X_TICKS) {
        let x = scale.to_px(date_to_logical(d));
        if x < lo - 0.5 || x > hi + 0.5 {
            continue;
        }
        let mut tick = Group::new("tick").translated(x, 0.0);
        if style.draw_tick_lines {
            tick.push(LineNode {
                class: "tick-line".into(),
                from: (0.0, 0.0),
                to: (0.0, k * style.tick_size_inner),
                stroke: style.stroke,
                stroke_width: 1.0,
            });
        }
        tick.push(TextNode {
            class: "tick-label".into(),
            text: tick_format(d),
            x: 0.0,
            y: k * spacing,
            font_size: style.font_size,
            fill: style.label,
            anchor: TextAnchor::Middle,
            dy_em: match style.orient {
                Orient::Top => 0.0,
                Orient::Bottom => 0.71,
            },
        });
        g.push(tick);
    }
    g
}
