// File: crates/stream-core/src/svg.rs
// Summary: Serialises a Scene as a standalone SVG document.

use std::fmt::Write as _;

use skia_safe as skia;

use crate::curve::fmt_num;
use crate::scene::{Node, Scene, TextAnchor};

const CLIP_ID: &str = "clip";

fn hex(c: skia::Color) -> String {
    format!("#{:02x}{:02x}{:02x}", c.r(), c.g(), c.b())
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

fn alpha_attr(name: &str, c: skia::Color, extra: f64) -> String {
    let a = c.a() as f64 / 255.0 * extra;
    if (a - 1.0).abs() < 1e-9 {
        String::new()
    } else {
        format!(" {name}=\"{}\"", fmt_num(a))
    }
}

impl Scene {
    /// Standalone SVG document for the scene.
    pub fn to_svg(&self) -> String {
        let mut s = String::new();
        let (w, h) = (fmt_num(self.width), fmt_num(self.height));
        let _ = writeln!(
            s,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\" font-family=\"sans-serif\">"
        );
        let _ = writeln!(
            s,
            "<defs><clipPath id=\"{CLIP_ID}\"><rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"/></clipPath></defs>",
            fmt_num(self.clip.x),
            fmt_num(self.clip.y),
            fmt_num(self.clip.width),
            fmt_num(self.clip.height)
        );
        let _ = writeln!(s, "<rect class=\"background\" width=\"100%\" height=\"100%\" fill=\"{}\"/>", hex(self.background));
        for n in &self.nodes {
            write_node(&mut s, n);
        }
        s.push_str("</svg>\n");
        s
    }
}

fn write_node(s: &mut String, node: &Node) {
    // writing to a String cannot fail
    let _ = match node {
        Node::Group(g) => {
            let mut attrs = format!("class=\"{}\"", escape(&g.class));
            if g.clipped {
                let _ = write!(attrs, " clip-path=\"url(#{CLIP_ID})\"");
            }
            if g.translate != (0.0, 0.0) {
                let _ = write!(attrs, " transform=\"translate({},{})\"", fmt_num(g.translate.0), fmt_num(g.translate.1));
            }
            let _ = writeln!(s, "<g {attrs}>");
            for c in &g.children {
                write_node(s, c);
            }
            writeln!(s, "</g>")
        }
        Node::Path(p) => {
            let fill = match p.fill {
                Some(c) => format!("fill=\"{}\"{}", hex(c), alpha_attr("fill-opacity", c, p.fill_opacity)),
                None => "fill=\"none\"".to_owned(),
            };
            let stroke = match p.stroke {
                Some(c) => format!(" stroke=\"{}\" stroke-width=\"{}\"", hex(c), fmt_num(p.stroke_width)),
                None => String::new(),
            };
            let key = p
                .key
                .as_deref()
                .map(|k| format!(" data-key=\"{}\"", escape(k)))
                .unwrap_or_default();
            writeln!(s, "<path class=\"{}\"{key} {fill}{stroke} d=\"{}\"/>", escape(&p.class), p.d.to_svg_d())
        }
        Node::Line(l) => writeln!(
            s,
            "<line class=\"{}\" x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"{}\" stroke-width=\"{}\"{}/>",
            escape(&l.class),
            fmt_num(l.from.0),
            fmt_num(l.from.1),
            fmt_num(l.to.0),
            fmt_num(l.to.1),
            hex(l.stroke),
            fmt_num(l.stroke_width),
            alpha_attr("stroke-opacity", l.stroke, 1.0)
        ),
        Node::Rect(r) => writeln!(
            s,
            "<rect class=\"{}\" x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\"{}/>",
            escape(&r.class),
            fmt_num(r.x),
            fmt_num(r.y),
            fmt_num(r.width),
            fmt_num(r.height),
            hex(r.fill),
            alpha_attr("fill-opacity", r.fill, 1.0)
        ),
        Node::Text(t) => {
            let anchor = match t.anchor {
                TextAnchor::Start => "start",
                TextAnchor::Middle => "middle",
                TextAnchor::End => "end",
            };
            writeln!(
                s,
                "<text class=\"{}\" x=\"{}\" y=\"{}\" dy=\"{}em\" font-size=\"{}\" text-anchor=\"{anchor}\" fill=\"{}\">{}</text>",
                escape(&t.class),
                fmt_num(t.x),
                fmt_num(t.y),
                fmt_num(t.dy_em),
                fmt_num(t.font_size),
                hex(t.fill),
                escape(&t.text)
            )
        }
    };
}
