// File: crates/stream-core/src/zoom.rs
// Summary: Horizontal zoom/pan transform with scale and translate extents.

/// `x' = x * k + x_offset`. Only the horizontal axis is transformed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomTransform {
    pub k: f64,
    pub x: f64,
}

impl ZoomTransform {
    pub const IDENTITY: Self = Self { k: 1.0, x: 0.0 };

    #[inline]
    pub fn apply_x(&self, x: f64) -> f64 { x * self.k + self.x }
    #[inline]
    pub fn invert_x(&self, x: f64) -> f64 { (x - self.x) / self.k }

    /// Translate by `dx` in untransformed units.
    pub fn translate(&self, dx: f64) -> Self {
        Self { k: self.k, x: self.x + self.k * dx }
    }
}

impl Default for ZoomTransform {
    fn default() -> Self { Self::IDENTITY }
}

/// Zoom behaviour limits.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomBehavior {
    /// Allowed `k` range.
    pub scale_extent: (f64, f64),
    /// Horizontal pixel span of the viewport.
    pub extent: (f64, f64),
    /// Horizontal span (untransformed) that must stay covered by the viewport.
    pub translate_extent: (f64, f64),
    /// Wheel delta multiplier (pixel mode).
    pub wheel_delta: f64,
}

impl ZoomBehavior {
    pub const SCALE_MIN: f64 = 0.5;
    pub const SCALE_MAX: f64 = 32.0;

    pub fn new(extent: (f64, f64), translate_extent: (f64, f64)) -> Self {
        Self {
            scale_extent: (Self::SCALE_MIN, Self::SCALE_MAX),
            extent,
            translate_extent,
            wheel_delta: 0.002,
        }
    }

    /// Shift `t` so the translate extent stays inside the viewport. When the
    /// viewport is wider than the extent the content is centred.
    pub fn constrain(&self, t: ZoomTransform) -> ZoomTransform {
        let dx0 = t.invert_x(self.extent.0) - self.translate_extent.0;
        let dx1 = t.invert_x(self.extent.1) - self.translate_extent.1;
        let shift = if dx1 > dx0 {
            (dx0 + dx1) / 2.0
        } else {
            let lo = dx0.min(0.0);
            if lo != 0.0 { lo } else { dx1.max(0.0) }
        };
        t.translate(shift)
    }

    fn clamp_k(&self, k: f64) -> f64 {
        k.clamp(self.scale_extent.0, self.scale_extent.1)
    }

    /// Zoom to `k` keeping the screen point `px` fixed.
    pub fn scale_to(&self, t: ZoomTransform, k: f64, px: f64) -> ZoomTransform {
        let k = self.clamp_k(k);
        let anchor = t.invert_x(px);
        self.constrain(ZoomTransform { k, x: px - anchor * k })
    }

    /// Wheel zoom: positive `delta_y` zooms out, as with a browser wheel event.
    pub fn wheel(&self, t: ZoomTransform, delta_y: f64, px: f64) -> ZoomTransform {
        let k = t.k * 2f64.powf(-delta_y * self.wheel_delta);
        self.scale_to(t, k, px)
    }

    /// Drag pan by `dx` screen pixels.
    pub fn pan(&self, t: ZoomTransform, dx: f64) -> ZoomTransform {
        self.constrain(ZoomTransform { k: t.k, x: t.x + dx })
    }
}
