// File: crates/stream-core/src/dashboard.rs
// Summary: Loaded dataset + location selector + render context, wired together.

use crate::context::{ChartEvent, RenderContext};
use crate::record::{distinct_locations, filter_location, DoseRecord};
use crate::selector::LocationSelector;
use crate::theme::Theme;
use crate::types::Surface;

/// Owns the immutable dataset; every location change re-renders from a fresh filter.
pub struct Dashboard {
    records: Vec<DoseRecord>,
    selector: LocationSelector,
    ctx: RenderContext,
}

impl Dashboard {
    /// Build the dashboard and render the initial location.
    pub fn load(records: Vec<DoseRecord>, location: &str, surface: Surface, theme: Theme) -> Self {
        let selector = LocationSelector::new(distinct_locations(&records), location);
        let ctx = RenderContext::new(&records, surface, theme);
        let mut dash = Self { records, selector, ctx };
        dash.render_selected();
        dash
    }

    pub fn records(&self) -> &[DoseRecord] { &self.records }
    pub fn selector(&self) -> &LocationSelector { &self.selector }
    pub fn selector_mut(&mut self) -> &mut LocationSelector { &mut self.selector }
    pub fn context(&self) -> &RenderContext { &self.ctx }

    /// Change location; re-renders even when unchanged so callers can force a refresh.
    pub fn select(&mut self, location: &str) {
        self.selector.select(location);
        self.render_selected();
    }

    /// Step through the selector's matches and re-render when the value changed.
    pub fn step(&mut self, forward: bool) -> bool {
        let changed = self.selector.step(forward).is_some();
        if changed {
            self.render_selected();
        }
        changed
    }

    pub fn dispatch(&mut self, event: ChartEvent) {
        self.ctx.dispatch(event);
    }

    fn render_selected(&mut self) {
        let location = self.selector.value().to_owned();
        let records = filter_location(&self.records, &location);
        tracing::info!(location = %location, records = records.len(), "rendering location");
        self.ctx.dispatch(ChartEvent::LocationChanged { location, records });
    }
}
