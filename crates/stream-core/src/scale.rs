// File: crates/stream-core/src/scale.rs
// Summary: Time (X) and Value (Y) scale transforms with zoom rescaling.

use chrono::{Datelike, NaiveDate};

use crate::zoom::ZoomTransform;

/// Logical X coordinate: days since 0001-01-01 (CE), fractional inside a day.
pub type Logical = f64;
/// Value Y coordinate (stacked dose count).
pub type Value = f64;

#[inline]
pub fn date_to_logical(d: NaiveDate) -> Logical {
    d.num_days_from_ce() as f64
}

/// Linear map from a date domain onto a horizontal pixel range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeScale {
    pub d0: Logical,
    pub d1: Logical,
    pub r0: f64,
    pub r1: f64,
}

impl TimeScale {
    pub fn new(domain: (NaiveDate, NaiveDate), range: (f64, f64)) -> Self {
        Self::from_logical((date_to_logical(domain.0), date_to_logical(domain.1)), range)
    }

    pub fn from_logical(domain: (Logical, Logical), range: (f64, f64)) -> Self {
        Self { d0: domain.0, d1: domain.1, r0: range.0, r1: range.1 }
    }

    /// Scale over a dataset's date extent; without one the domain is the unit interval.
    pub fn for_extent(extent: Option<(NaiveDate, NaiveDate)>, range: (f64, f64)) -> Self {
        match extent {
            Some(e) => Self::new(e, range),
            None => Self::from_logical((0.0, 1.0), range),
        }
    }

    #[inline]
    pub fn to_px(&self, x: Logical) -> f64 {
        let span = self.d1 - self.d0;
        if span.abs() < 1e-12 {
            return (self.r0 + self.r1) * 0.5;
        }
        self.r0 + (x - self.d0) / span * (self.r1 - self.r0)
    }

    #[inline]
    pub fn date_px(&self, d: NaiveDate) -> f64 {
        self.to_px(date_to_logical(d))
    }

    #[inline]
    pub fn from_px(&self, px: f64) -> Logical {
        let span = self.r1 - self.r0;
        if span.abs() < 1e-12 {
            return self.d0;
        }
        self.d0 + (px - self.r0) / span * (self.d1 - self.d0)
    }

    /// Same range, domain adjusted so the scale reflects `t` applied to the x axis.
    pub fn rescale(&self, t: &ZoomTransform) -> Self {
        let d0 = self.from_px(t.invert_x(self.r0));
        let d1 = self.from_px(t.invert_x(self.r1));
        Self { d0, d1, ..*self }
    }

    /// Domain endpoints in logical units, ordered.
    pub fn domain_sorted(&self) -> (Logical, Logical) {
        (self.d0.min(self.d1), self.d0.max(self.d1))
    }
}

/// Vertical value scale mapping data range to [bottom, top] pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValueScale {
    pub top_px: f64,
    pub bottom_px: f64,
    pub vmin: Value,
    pub vmax: Value,
}

impl ValueScale {
    pub fn new_linear(top_px: f64, bottom_px: f64, vmin: Value, vmax: Value) -> Self {
        Self { top_px, bottom_px, vmin, vmax }
    }

    /// Scale over an optional extent; no extent means nothing is stacked and a unit domain is used.
    pub fn for_extent(extent: Option<(Value, Value)>, top_px: f64, bottom_px: f64) -> Self {
        let (vmin, vmax) = extent.unwrap_or((0.0, 1.0));
        Self::new_linear(top_px, bottom_px, vmin, vmax)
    }

    #[inline]
    pub fn to_px(&self, y: Value) -> f64 {
        let span = self.vmax - self.vmin;
        if span.abs() < 1e-12 {
            return (self.bottom_px + self.top_px) * 0.5;
        }
        self.bottom_px - (y - self.vmin) / span * (self.bottom_px - self.top_px)
    }
}
