// File: crates/stream-core/src/types.rs
// Summary: Shared types and constants (viewport, margins, surface size).

/// Default viewport width in pixels.
pub const VIEWPORT_WIDTH: u32 = 1280;
/// Default viewport height in pixels.
pub const VIEWPORT_HEIGHT: u32 = 900;
/// Share of the viewport height given to the chart surface.
pub const HEIGHT_RATIO: f64 = 0.7;

/// Screen margins, in pixels.
/// Contract: all fields are non-negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Insets {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Insets {
    /// Create new insets (non-negative by type).
    pub const fn new(left: u32, right: u32, top: u32, bottom: u32) -> Self {
        Self { left, right, top, bottom }
    }
}

impl Default for Insets {
    fn default() -> Self {
        Self::new(10, 10, 30, 30)
    }
}

/// Pixel size of the chart surface plus its margins.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Surface {
    pub width: f64,
    pub height: f64,
    pub insets: Insets,
}

impl Surface {
    /// Surface for a viewport: full width, 70% of the height.
    pub fn for_viewport(viewport_width: u32, viewport_height: u32, insets: Insets) -> Self {
        Self {
            width: viewport_width as f64,
            height: (viewport_height as f64 * HEIGHT_RATIO).floor(),
            insets,
        }
    }

    pub fn plot_left(&self) -> f64 { self.insets.left as f64 }
    pub fn plot_right(&self) -> f64 { self.width - self.insets.right as f64 }
    pub fn plot_top(&self) -> f64 { self.insets.top as f64 }
    pub fn plot_bottom(&self) -> f64 { self.height - self.insets.bottom as f64 }
    pub fn plot_width(&self) -> f64 { (self.plot_right() - self.plot_left()).max(0.0) }
    pub fn plot_height(&self) -> f64 { (self.plot_bottom() - self.plot_top()).max(0.0) }
}

impl Default for Surface {
    fn default() -> Self {
        Self::for_viewport(VIEWPORT_WIDTH, VIEWPORT_HEIGHT, Insets::default())
    }
}
