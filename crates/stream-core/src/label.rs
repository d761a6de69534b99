// File: crates/stream-core/src/label.rs
// Summary: Places a series label inside its area by searching for the largest box that fits.

/// Average glyph advance as a fraction of font size.
const GLYPH_ASPECT: f64 = 0.6;
const MIN_FONT: f64 = 4.0;
const ITERATIONS: usize = 30;

/// Label placement in surface pixels; `(x, y)` is the centre of the text box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LabelPlacement {
    pub x: f64,
    pub y: f64,
    pub font_size: f64,
}

/// Approximate rendered width of `text` at `font_size`.
pub fn text_width(text: &str, font_size: f64) -> f64 {
    text.chars().count() as f64 * GLYPH_ASPECT * font_size
}

/// `outline` holds `(x, top_px, bottom_px)` per data point, sorted by x, with top <= bottom.
/// Returns the centre and font size of the largest label box that fits, if any.
pub fn place_label(text: &str, outline: &[(f64, f64, f64)]) -> Option<LabelPlacement> {
    if text.is_empty() || outline.len() < 2 {
        return None;
    }
    let aspect = text_width(text, 1.0);
    let max_h = outline.iter().map(|&(_, t, b)| b - t).fold(0.0, f64::max);
    if max_h < MIN_FONT {
        return None;
    }

    let mut best = fits(outline, MIN_FONT, aspect).map(|(x, y)| LabelPlacement { x, y, font_size: MIN_FONT })?;
    let (mut lo, mut hi) = (MIN_FONT, max_h);
    for _ in 0..ITERATIONS {
        let mid = (lo + hi) / 2.0;
        match fits(outline, mid, aspect) {
            Some((x, y)) => {
                best = LabelPlacement { x, y, font_size: mid };
                lo = mid;
            }
            None => hi = mid,
        }
    }
    Some(best)
}

/// First window of the outline that can hold a `height`-tall box of `height * aspect` width.
fn fits(outline: &[(f64, f64, f64)], height: f64, aspect: f64) -> Option<(f64, f64)> {
    let width = height * aspect;
    for i in 0..outline.len() {
        let x0 = outline[i].0;
        let mut ceiling = f64::NEG_INFINITY;
        let mut floor = f64::INFINITY;
        for &(x, top, bottom) in &outline[i..] {
            ceiling = ceiling.max(top);
            floor = floor.min(bottom);
            if floor - ceiling < height {
                break;
            }
            if x - x0 >= width {
                return Some((x0 + width / 2.0, (ceiling + floor) / 2.0));
            }
        }
    }
    None
}
