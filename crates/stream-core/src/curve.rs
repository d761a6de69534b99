// File: crates/stream-core/src/curve.rs
// Summary: Path commands and the uniform cubic B-spline ("basis") area generator.

use std::fmt::Write as _;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCmd {
    MoveTo(f64, f64),
    LineTo(f64, f64),
    CubicTo(f64, f64, f64, f64, f64, f64),
    Close,
}

/// Renderer-agnostic vector path.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PathData {
    pub cmds: Vec<PathCmd>,
}

impl PathData {
    pub fn new() -> Self { Self::default() }
    pub fn is_empty(&self) -> bool { self.cmds.is_empty() }

    pub fn move_to(&mut self, x: f64, y: f64) { self.cmds.push(PathCmd::MoveTo(x, y)); }
    pub fn line_to(&mut self, x: f64, y: f64) { self.cmds.push(PathCmd::LineTo(x, y)); }
    pub fn cubic_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, x: f64, y: f64) {
        self.cmds.push(PathCmd::CubicTo(x1, y1, x2, y2, x, y));
    }
    pub fn close(&mut self) { self.cmds.push(PathCmd::Close); }

    /// SVG path data (`d` attribute).
    pub fn to_svg_d(&self) -> String {
        let mut d = String::new();
        for c in &self.cmds {
            // writing to a String cannot fail
            let _ = match *c {
                PathCmd::MoveTo(x, y) => write!(d, "M{},{}", fmt_num(x), fmt_num(y)),
                PathCmd::LineTo(x, y) => write!(d, "L{},{}", fmt_num(x), fmt_num(y)),
                PathCmd::CubicTo(x1, y1, x2, y2, x, y) => write!(
                    d,
                    "C{},{},{},{},{},{}",
                    fmt_num(x1), fmt_num(y1), fmt_num(x2), fmt_num(y2), fmt_num(x), fmt_num(y)
                ),
                PathCmd::Close => write!(d, "Z"),
            };
        }
        d
    }
}

/// Numbers rounded to 3 decimals without trailing zeros.
pub fn fmt_num(v: f64) -> String {
    let r = (v * 1000.0).round() / 1000.0;
    let r = if r == 0.0 { 0.0 } else { r };
    format!("{r}")
}

/// Basis curve state machine writing into a `PathData`.
struct Basis<'a> {
    out: &'a mut PathData,
    /// 0 while tracing the first edge of an area, 1 for the second.
    edge: u8,
    point: u8,
    x0: f64,
    x1: f64,
    y0: f64,
    y1: f64,
}

impl<'a> Basis<'a> {
    fn new(out: &'a mut PathData) -> Self {
        Self { out, edge: 0, point: 0, x0: f64::NAN, x1: f64::NAN, y0: f64::NAN, y1: f64::NAN }
    }

    fn line_start(&mut self) {
        self.x0 = f64::NAN;
        self.x1 = f64::NAN;
        self.y0 = f64::NAN;
        self.y1 = f64::NAN;
        self.point = 0;
    }

    fn bezier(&mut self, x: f64, y: f64) {
        let (x0, x1, y0, y1) = (self.x0, self.x1, self.y0, self.y1);
        self.out.cubic_to(
            (2.0 * x0 + x1) / 3.0,
            (2.0 * y0 + y1) / 3.0,
            (x0 + 2.0 * x1) / 3.0,
            (y0 + 2.0 * y1) / 3.0,
            (x0 + 4.0 * x1 + x) / 6.0,
            (y0 + 4.0 * y1 + y) / 6.0,
        );
    }

    fn point(&mut self, x: f64, y: f64) {
        match self.point {
            0 => {
                self.point = 1;
                if self.edge == 1 { self.out.line_to(x, y) } else { self.out.move_to(x, y) }
            }
            1 => self.point = 2,
            2 => {
                self.point = 3;
                self.out.line_to((5.0 * self.x0 + self.x1) / 6.0, (5.0 * self.y0 + self.y1) / 6.0);
                self.bezier(x, y);
            }
            _ => self.bezier(x, y),
        }
        self.x0 = self.x1;
        self.x1 = x;
        self.y0 = self.y1;
        self.y1 = y;
    }

    fn line_end(&mut self) {
        match self.point {
            3 => {
                self.bezier(self.x1, self.y1);
                self.out.line_to(self.x1, self.y1);
            }
            2 => self.out.line_to(self.x1, self.y1),
            _ => {}
        }
        if self.edge == 1 {
            self.out.close();
        }
        self.edge = 1 - self.edge;
    }
}

/// Smoothed area between `(x, y_low)` and `(x, y_high)`: the high edge left to
/// right, then the low edge right to left, closed.
pub fn basis_area(points: &[(f64, f64, f64)]) -> PathData {
    let mut out = PathData::new();
    if points.is_empty() {
        return out;
    }
    let mut c = Basis::new(&mut out);
    c.line_start();
    for &(x, _, high) in points {
        c.point(x, high);
    }
    c.line_end();
    c.line_start();
    for &(x, low, _) in points.iter().rev() {
        c.point(x, low);
    }
    c.line_end();
    out
}

/// Samples of the outline `basis_area` draws for the same input: both end
/// points plus the start and midpoint of every spline segment. Data peaks are
/// pulled toward their neighbours here exactly as in the drawn shape.
pub fn basis_outline(points: &[(f64, f64, f64)]) -> Vec<(f64, f64, f64)> {
    let n = points.len();
    if n < 3 {
        return points.to_vec();
    }
    // the curve treats each end point as doubled
    let mut q = Vec::with_capacity(n + 2);
    q.push(points[0]);
    q.extend_from_slice(points);
    q.push(points[n - 1]);

    let mut out = Vec::with_capacity(2 * n + 1);
    out.push(points[0]);
    for w in q.windows(4) {
        out.push(spline_at(w, 0.0));
        out.push(spline_at(w, 0.5));
    }
    out.push(spline_at(&q[n - 2..], 1.0));
    out.push(points[n - 1]);
    out
}

/// Uniform cubic B-spline segment over four control points, `t` in [0, 1].
fn spline_at(w: &[(f64, f64, f64)], t: f64) -> (f64, f64, f64) {
    let u = 1.0 - t;
    let b = [
        u * u * u / 6.0,
        (3.0 * t * t * t - 6.0 * t * t + 4.0) / 6.0,
        (-3.0 * t * t * t + 3.0 * t * t + 3.0 * t + 1.0) / 6.0,
        t * t * t / 6.0,
    ];
    w.iter().zip(b).fold((0.0, 0.0, 0.0), |(a, l, h), (&(x, y0, y1), k)| (a + k * x, l + k * y0, h + k * y1))
}
