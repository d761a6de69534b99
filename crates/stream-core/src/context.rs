// File: crates/stream-core/src/context.rs
// Summary: Render context owning all chart state; UI events are reduced into scene updates.

use chrono::NaiveDate;

use crate::axis::{axis_group, AxisStyle, Orient};
use crate::curve::{basis_area, basis_outline};
use crate::label::{place_label, text_width, LabelPlacement};
use crate::layout::{band_extent, InsideOutSilhouette, StackLayout, StackedBand};
use crate::record::{date_extent, DoseRecord};
use crate::scale::{date_to_logical, TimeScale, ValueScale};
use crate::scene::{ClipRect, Group, PathNode, RectNode, Scene, TextAnchor, TextNode};
use crate::theme::{ColorScale, Theme};
use crate::transform::{transform, SeriesTable};
use crate::types::Surface;
use crate::zoom::{ZoomBehavior, ZoomTransform};

/// Opacity of series that are not hovered while another one is.
pub const DIMMED_OPACITY: f64 = 0.4;

const TOOLTIP_FONT: f64 = 12.0;
const TOOLTIP_PAD: f64 = 8.0;
const TOOLTIP_OFFSET: f64 = 12.0;
const LABEL_BASELINE_EM: f64 = 0.35;

/// Input to the render context.
#[derive(Clone, Debug, PartialEq)]
pub enum ChartEvent {
    /// Re-render for `location` with its already filtered records.
    LocationChanged { location: String, records: Vec<DoseRecord> },
    /// Pointer position in surface pixels.
    PointerMoved { x: f64, y: f64 },
    PointerLeft,
    /// Wheel zoom around `x`; positive `delta_y` zooms out.
    Wheel { x: f64, delta_y: f64 },
    DragStarted { x: f64 },
    DragMoved { x: f64 },
    DragEnded,
    Resized { viewport_width: u32, viewport_height: u32 },
}

/// Hover details for one series on one date.
#[derive(Clone, Debug, PartialEq)]
pub struct Tooltip {
    /// Pointer position the tooltip is anchored to.
    pub x: f64,
    pub y: f64,
    pub date: NaiveDate,
    pub vaccine: String,
    pub daily: u64,
    pub total: u64,
}

impl Tooltip {
    pub fn lines(&self) -> [String; 4] {
        [
            format!("Date: {}", self.date.format("%B %d, %Y")),
            format!("Vaccine: {}", self.vaccine),
            format!("Daily Vaccinations: {}", format_thousands(self.daily)),
            format!("Total Vaccination: {}", format_thousands(self.total)),
        ]
    }
}

/// `1234567` -> `"1,234,567"`.
pub fn format_thousands(v: u64) -> String {
    let digits = v.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Derived view of one location: table, stacked bands, vertical scale and label spots.
#[derive(Clone, Debug)]
pub struct ChartModel {
    pub location: String,
    pub table: SeriesTable,
    /// In stack-key order.
    pub bands: Vec<StackedBand>,
    pub y_scale: ValueScale,
    /// Aligned with `bands`; positions use the unzoomed time scale.
    pub labels: Vec<Option<LabelPlacement>>,
}

impl ChartModel {
    pub fn build(
        location: &str,
        records: &[DoseRecord],
        layout: &dyn StackLayout,
        x: &TimeScale,
        surface: &Surface,
    ) -> Self {
        let table = transform(records);
        let bands = layout.stack(&table.keys, &table.rows);
        let y_scale = ValueScale::for_extent(band_extent(&bands), surface.plot_top(), surface.plot_bottom());
        let labels = bands
            .iter()
            .map(|b| {
                let outline: Vec<(f64, f64, f64)> = b
                    .points
                    .iter()
                    .map(|p| (x.date_px(p.date), y_scale.to_px(p.high), y_scale.to_px(p.low)))
                    .collect();
                place_label(&b.key, &basis_outline(&outline))
            })
            .collect();
        tracing::debug!(location, bands = bands.len(), rows = table.rows.len(), "built chart model");
        Self { location: location.to_owned(), table, bands, y_scale, labels }
    }

    /// Date of the data point nearest to logical x (bisection over the sorted distinct dates).
    pub fn nearest_date(&self, x: f64) -> Option<NaiveDate> {
        let dates = &self.table.rows;
        if dates.is_empty() {
            return None;
        }
        let i = dates.partition_point(|r| date_to_logical(r.date) <= x);
        let pick = if i == 0 {
            0
        } else if i == dates.len() {
            dates.len() - 1
        } else {
            let before = x - date_to_logical(dates[i - 1].date);
            let after = date_to_logical(dates[i].date) - x;
            if after < before { i } else { i - 1 }
        };
        Some(dates[pick].date)
    }

    /// Key of the band whose drawn area covers the pointer, if any.
    pub fn hit_test(&self, x: &TimeScale, px: f64, py: f64) -> Option<&str> {
        self.bands
            .iter()
            .rev()
            .find(|b| basis_area(&screen_points(b, x, &self.y_scale)).contains(px, py))
            .map(|b| b.key.as_str())
    }
}

/// `(x, low, high)` of every band point in surface pixels.
fn screen_points(b: &StackedBand, x: &TimeScale, y: &ValueScale) -> Vec<(f64, f64, f64)> {
    b.points.iter().map(|p| (x.date_px(p.date), y.to_px(p.low), y.to_px(p.high))).collect()
}

/// All chart state, owned in one place and mutated only through `dispatch`.
pub struct RenderContext {
    surface: Surface,
    theme: Theme,
    layout: Box<dyn StackLayout>,
    colors: ColorScale,
    extent: Option<(NaiveDate, NaiveDate)>,
    x_base: TimeScale,
    zoom_behavior: ZoomBehavior,
    zoom: ZoomTransform,
    records: Vec<DoseRecord>,
    model: Option<ChartModel>,
    hovered: Option<String>,
    tooltip: Option<Tooltip>,
    drag_last: Option<f64>,
    scene: Scene,
}

impl RenderContext {
    /// Context for a loaded dataset; the time domain and colour domain come from all of it.
    pub fn new(dataset: &[DoseRecord], surface: Surface, theme: Theme) -> Self {
        Self::with_layout(dataset, surface, theme, Box::new(InsideOutSilhouette))
    }

    pub fn with_layout(dataset: &[DoseRecord], surface: Surface, theme: Theme, layout: Box<dyn StackLayout>) -> Self {
        let colors = ColorScale::new(dataset.iter().map(|r| r.vaccine.as_str()));
        let extent = date_extent(dataset);
        let x_base = TimeScale::for_extent(extent, (surface.plot_left(), surface.plot_right()));
        let zoom_behavior = zoom_behavior_for(&surface);
        let scene = empty_scene(&surface, &theme);
        let mut ctx = Self {
            surface,
            theme,
            layout,
            colors,
            extent,
            x_base,
            zoom_behavior,
            zoom: ZoomTransform::IDENTITY,
            records: Vec::new(),
            model: None,
            hovered: None,
            tooltip: None,
            drag_last: None,
            scene,
        };
        ctx.redraw();
        ctx
    }

    pub fn scene(&self) -> &Scene { &self.scene }
    pub fn surface(&self) -> &Surface { &self.surface }
    pub fn model(&self) -> Option<&ChartModel> { self.model.as_ref() }
    pub fn zoom(&self) -> ZoomTransform { self.zoom }
    pub fn hovered(&self) -> Option<&str> { self.hovered.as_deref() }
    pub fn tooltip(&self) -> Option<&Tooltip> { self.tooltip.as_ref() }

    /// Time scale with the current zoom applied.
    pub fn x_scale(&self) -> TimeScale {
        self.x_base.rescale(&self.zoom)
    }

    pub fn dispatch(&mut self, event: ChartEvent) {
        match event {
            ChartEvent::LocationChanged { location, records } => {
                self.records = records;
                self.rebuild(&location);
                self.clear_hover();
            }
            ChartEvent::PointerMoved { x, y } => self.hover(x, y),
            ChartEvent::PointerLeft => self.clear_hover(),
            ChartEvent::Wheel { x, delta_y } => {
                self.zoom = self.zoom_behavior.wheel(self.zoom, delta_y, x);
            }
            ChartEvent::DragStarted { x } => self.drag_last = Some(x),
            ChartEvent::DragMoved { x } => {
                if let Some(last) = self.drag_last.replace(x) {
                    self.zoom = self.zoom_behavior.pan(self.zoom, x - last);
                }
            }
            ChartEvent::DragEnded => self.drag_last = None,
            ChartEvent::Resized { viewport_width, viewport_height } => {
                self.surface = Surface::for_viewport(viewport_width, viewport_height, self.surface.insets);
                self.x_base = TimeScale::for_extent(self.extent, (self.surface.plot_left(), self.surface.plot_right()));
                self.zoom_behavior = zoom_behavior_for(&self.surface);
                self.zoom = self.zoom_behavior.constrain(self.zoom);
                self.scene = empty_scene(&self.surface, &self.theme);
                if let Some(location) = self.model.as_ref().map(|m| m.location.clone()) {
                    self.rebuild(&location);
                }
                self.clear_hover();
            }
        }
        self.redraw();
    }

    fn rebuild(&mut self, location: &str) {
        self.model = Some(ChartModel::build(location, &self.records, self.layout.as_ref(), &self.x_base, &self.surface));
    }

    fn clear_hover(&mut self) {
        self.hovered = None;
        self.tooltip = None;
    }

    fn hover(&mut self, px: f64, py: f64) {
        let x = self.x_scale();
        let Some(model) = self.model.as_ref() else { return self.clear_hover() };
        let Some(key) = model.hit_test(&x, px, py).map(str::to_owned) else { return self.clear_hover() };
        let Some(date) = model.nearest_date(x.from_px(px)) else { return self.clear_hover() };
        let (daily, total) = model
            .table
            .find(&key, date)
            .map(|d| (d.current_value, d.record.total_vaccinations))
            .unwrap_or((0, 0));
        self.tooltip = Some(Tooltip { x: px, y: py, date, vaccine: key.clone(), daily, total });
        self.hovered = Some(key);
    }

    /// Join every chart part into the scene; replaces previous nodes in place.
    fn redraw(&mut self) {
        let x = self.x_scale();
        let s = self.surface;
        let theme = self.theme;

        let mut bottom = AxisStyle::new(Orient::Bottom, theme.axis_line, theme.axis_label);
        bottom.tick_size_inner = 0.0;
        bottom.tick_size_outer = 0.0;
        bottom.draw_tick_lines = false;
        let mut top = AxisStyle::new(Orient::Top, theme.axis_line, theme.axis_label);
        top.tick_size_inner = -s.plot_height();
        top.tick_size_outer = -s.plot_height();
        self.scene.join(axis_group("x-axis-bottom", &x, &bottom, s.plot_bottom()));
        self.scene.join(axis_group("x-axis-top", &x, &top, s.plot_top()));

        let mut areas = Group::new("area-group");
        let mut labels = Group::new("labels");
        if let Some(model) = self.model.as_ref() {
            for (band, label) in model.bands.iter().zip(&model.labels) {
                let pts = screen_points(band, &x, &model.y_scale);
                let mut path = PathNode::filled("area-path", basis_area(&pts), self.colors.color(&band.key));
                path.key = Some(band.key.clone());
                path.fill_opacity = match self.hovered.as_deref() {
                    Some(h) if h != band.key => DIMMED_OPACITY,
                    _ => 1.0,
                };
                areas.push(path);

                if let Some(l) = label {
                    labels.push(TextNode {
                        class: "label-text".into(),
                        text: band.key.clone(),
                        x: self.zoom.apply_x(l.x),
                        y: l.y,
                        font_size: l.font_size,
                        fill: theme.series_label,
                        anchor: TextAnchor::Middle,
                        dy_em: LABEL_BASELINE_EM,
                    });
                }
            }
        }
        let mut chart = Group::new("chart-group").clipped();
        chart.push(areas);
        chart.push(labels);
        self.scene.join(chart);

        match self.tooltip.as_ref() {
            Some(t) => {
                let g = tooltip_group(t, &s, &theme);
                self.scene.join(g);
            }
            None => self.scene.remove("tooltip"),
        }
    }
}

fn zoom_behavior_for(s: &Surface) -> ZoomBehavior {
    ZoomBehavior::new((0.0, s.width), (s.plot_left(), s.plot_right()))
}

fn empty_scene(s: &Surface, theme: &Theme) -> Scene {
    let clip = ClipRect { x: s.plot_left(), y: s.plot_top(), width: s.plot_width(), height: s.plot_height() };
    Scene::new(s.width, s.height, theme.background, clip)
}

fn tooltip_group(t: &Tooltip, s: &Surface, theme: &Theme) -> Group {
    let lines = t.lines();
    let line_h = TOOLTIP_FONT * 1.3;
    let w = lines.iter().map(|l| text_width(l, TOOLTIP_FONT)).fold(0.0, f64::max) + 2.0 * TOOLTIP_PAD;
    let h = line_h * lines.len() as f64 + 2.0 * TOOLTIP_PAD;
    // keep the box on the surface, flipping to the left/top of the pointer if needed
    let mut x = t.x + TOOLTIP_OFFSET;
    if x + w > s.width {
        x = (t.x - TOOLTIP_OFFSET - w).max(0.0);
    }
    let mut y = t.y + TOOLTIP_OFFSET;
    if y + h > s.height {
        y = (t.y - TOOLTIP_OFFSET - h).max(0.0);
    }

    let mut g = Group::new("tooltip").translated(x, y);
    g.push(RectNode { class: "tooltip-box".into(), x: 0.0, y: 0.0, width: w, height: h, fill: theme.tooltip_background });
    for (i, line) in lines.into_iter().enumerate() {
        g.push(TextNode {
            class: "tooltip-line".into(),
            text: line,
            x: TOOLTIP_PAD,
            y: TOOLTIP_PAD + line_h * (i as f64 + 1.0) - (line_h - TOOLTIP_FONT),
            font_size: TOOLTIP_FONT,
            fill: theme.tooltip_text,
            anchor: TextAnchor::Start,
            dy_em: 0.0,
        });
    }
    g
}
