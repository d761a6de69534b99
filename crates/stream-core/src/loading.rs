// File: crates/stream-core/src/loading.rs
// Summary: Loading spinner drawn while the dataset fetch is outstanding.

use skia_safe as skia;

use crate::scene::{ClipRect, Group, LineNode, Scene};
use crate::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spinner {
    pub lines: usize,
    pub length: f64,
    pub width: f64,
    pub radius: f64,
    pub scale: f64,
    /// Rounds per second.
    pub speed: f64,
    /// Rotation offset in degrees.
    pub rotate: f64,
    /// 1 clockwise, -1 counterclockwise.
    pub direction: f64,
}

impl Default for Spinner {
    fn default() -> Self {
        Self { lines: 13, length: 60.0, width: 17.0, radius: 80.0, scale: 1.0, speed: 1.0, rotate: 0.0, direction: 1.0 }
    }
}

impl Spinner {
    /// Opacity of line `i` after `elapsed` seconds; the brightest line travels around the circle.
    pub fn line_opacity(&self, i: usize, elapsed: f64) -> f64 {
        let n = self.lines.max(1) as f64;
        let phase = (elapsed * self.speed - self.direction * i as f64 / n).rem_euclid(1.0);
        // fade quickly from full to a quarter, then rest
        (1.0 - phase * 3.0).max(0.25)
    }

    /// Spinner centred on a `width` x `height` surface.
    pub fn scene(&self, width: f64, height: f64, elapsed: f64, theme: &Theme) -> Scene {
        let clip = ClipRect { x: 0.0, y: 0.0, width, height };
        let mut scene = Scene::new(width, height, theme.background, clip);
        let mut g = Group::new("spinner").translated(width / 2.0, height / 2.0);
        let n = self.lines.max(1);
        for i in 0..n {
            let deg = self.rotate + 360.0 / n as f64 * i as f64;
            let (sin, cos) = deg.to_radians().sin_cos();
            let r0 = self.radius * self.scale;
            let r1 = (self.radius + self.length) * self.scale;
            let alpha = (self.line_opacity(i, elapsed) * 255.0).round() as u8;
            let c = theme.spinner;
            g.push(LineNode {
                class: "spinner-line".into(),
                from: (r0 * sin, -r0 * cos),
                to: (r1 * sin, -r1 * cos),
                stroke: skia::Color::from_argb(alpha, c.r(), c.g(), c.b()),
                stroke_width: self.width * self.scale,
            });
        }
        scene.join(g);
        scene
    }
}
