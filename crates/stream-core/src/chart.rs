// File: crates/stream-core/src/chart.rs
// Summary: Headless raster pipeline: draws a Scene onto Skia CPU surfaces and encodes PNG/RGBA.

use anyhow::Result;
use skia_safe as skia;

use crate::curve::{PathCmd, PathData};
use crate::scene::{Group, Node, Scene};
use crate::text::TextShaper;

#[derive(Clone, Copy, Debug)]
pub struct RenderOptions {
    /// Skip text nodes (keeps golden images stable across font setups).
    pub draw_labels: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { draw_labels: true }
    }
}

impl Scene {
    /// Render the scene to a PNG at `output_png_path` using a CPU raster surface.
    pub fn render_to_png(
        &self,
        opts: &RenderOptions,
        output_png_path: impl AsRef<std::path::Path>,
    ) -> Result<()> {
        let data = self.render_to_png_bytes(opts)?;
        if let Some(parent) = output_png_path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(output_png_path, data)?;
        Ok(())
    }

    /// Render the scene and return encoded PNG bytes.
    pub fn render_to_png_bytes(&self, opts: &RenderOptions) -> Result<Vec<u8>> {
        let mut surface = self.rasterize(opts)?;
        let image = surface.image_snapshot();
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or_else(|| anyhow::anyhow!("encode PNG failed"))?;
        Ok(data.as_bytes().to_vec())
    }

    /// Render the scene to an unpremultiplied RGBA8 buffer: (pixels, width, height, stride).
    pub fn render_to_rgba8(&self, opts: &RenderOptions) -> Result<(Vec<u8>, u32, u32, usize)> {
        let mut surface = self.rasterize(opts)?;
        let (w, h) = (surface.width(), surface.height());
        let info = skia::ImageInfo::new((w, h), skia::ColorType::RGBA8888, skia::AlphaType::Unpremul, None);
        let stride = w as usize * 4;
        let mut px = vec![0u8; stride * h as usize];
        if !surface.read_pixels(&info, &mut px, stride, (0, 0)) {
            anyhow::bail!("read pixels failed");
        }
        Ok((px, w as u32, h as u32, stride))
    }

    fn rasterize(&self, opts: &RenderOptions) -> Result<skia::Surface> {
        let (w, h) = (self.width.round().max(1.0) as i32, self.height.round().max(1.0) as i32);
        let mut surface = skia::surfaces::raster_n32_premul((w, h))
            .ok_or_else(|| anyhow::anyhow!("failed to create raster surface {w}x{h}"))?;
        let canvas = surface.canvas();
        canvas.clear(self.background);

        let shaper = opts.draw_labels.then(TextShaper::new);
        let clip = skia::Rect::from_xywh(
            self.clip.x as f32,
            self.clip.y as f32,
            self.clip.width as f32,
            self.clip.height as f32,
        );
        for n in &self.nodes {
            draw_node(canvas, n, clip, shaper.as_ref());
        }
        Ok(surface)
    }
}

impl PathData {
    /// Whether the filled path covers `(x, y)`, using the same geometry Skia rasterizes.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        to_skia_path(self).contains((x as f32, y as f32))
    }
}

// ---- helpers ----------------------------------------------------------------

fn to_skia_path(d: &PathData) -> skia::Path {
    let mut path = skia::Path::new();
    for c in &d.cmds {
        match *c {
            PathCmd::MoveTo(x, y) => { path.move_to((x as f32, y as f32)); }
            PathCmd::LineTo(x, y) => { path.line_to((x as f32, y as f32)); }
            PathCmd::CubicTo(x1, y1, x2, y2, x, y) => {
                path.cubic_to((x1 as f32, y1 as f32), (x2 as f32, y2 as f32), (x as f32, y as f32));
            }
            PathCmd::Close => { path.close(); }
        }
    }
    path
}

fn draw_group(canvas: &skia::Canvas, g: &Group, clip: skia::Rect, shaper: Option<&TextShaper>) {
    canvas.save();
    // clip is expressed in surface space, so apply it before translating
    if g.clipped {
        canvas.clip_rect(clip, None, true);
    }
    canvas.translate((g.translate.0 as f32, g.translate.1 as f32));
    for c in &g.children {
        draw_node(canvas, c, clip, shaper);
    }
    canvas.restore();
}

fn draw_node(canvas: &skia::Canvas, node: &Node, clip: skia::Rect, shaper: Option<&TextShaper>) {
    match node {
        Node::Group(g) => draw_group(canvas, g, clip, shaper),
        Node::Path(p) => {
            let path = to_skia_path(&p.d);
            if let Some(fill) = p.fill {
                let mut paint = skia::Paint::default();
                paint.set_anti_alias(true);
                paint.set_style(skia::paint::Style::Fill);
                paint.set_color(fill);
                paint.set_alpha_f(fill.a() as f32 / 255.0 * p.fill_opacity as f32);
                canvas.draw_path(&path, &paint);
            }
            if let Some(stroke) = p.stroke {
                let mut paint = skia::Paint::default();
                paint.set_anti_alias(true);
                paint.set_style(skia::paint::Style::Stroke);
                paint.set_stroke_width(p.stroke_width as f32);
                paint.set_color(stroke);
                canvas.draw_path(&path, &paint);
            }
        }
        Node::Line(l) => {
            let mut paint = skia::Paint::default();
            paint.set_anti_alias(true);
            paint.set_stroke_width(l.stroke_width as f32);
            paint.set_stroke_cap(skia::paint::Cap::Round);
            paint.set_color(l.stroke);
            canvas.draw_line(
                (l.from.0 as f32, l.from.1 as f32),
                (l.to.0 as f32, l.to.1 as f32),
                &paint,
            );
        }
        Node::Rect(r) => {
            let mut paint = skia::Paint::default();
            paint.set_anti_alias(true);
            paint.set_color(r.fill);
            let rect = skia::Rect::from_xywh(r.x as f32, r.y as f32, r.width as f32, r.height as f32);
            canvas.draw_rect(rect, &paint);
        }
        Node::Text(t) => {
            if let Some(shaper) = shaper {
                let size = t.font_size as f32;
                let y = t.y as f32 + (t.dy_em as f32) * size;
                shaper.draw_anchored(canvas, &t.text, t.x as f32, y, size, t.fill, t.anchor);
            }
        }
    }
}
