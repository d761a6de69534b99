// File: crates/stream-core/src/scene.rs
// Summary: Retained scene graph; top-level nodes are joined by class so re-rendering replaces in place.

use skia_safe as skia;

use crate::curve::PathData;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Group {
    pub class: String,
    pub translate: (f64, f64),
    /// Clip to the scene's clip rectangle.
    pub clipped: bool,
    pub children: Vec<Node>,
}

impl Group {
    pub fn new(class: impl Into<String>) -> Self {
        Self { class: class.into(), translate: (0.0, 0.0), clipped: false, children: Vec::new() }
    }

    pub fn translated(mut self, x: f64, y: f64) -> Self {
        self.translate = (x, y);
        self
    }

    pub fn clipped(mut self) -> Self {
        self.clipped = true;
        self
    }

    pub fn push(&mut self, node: impl Into<Node>) {
        self.children.push(node.into());
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PathNode {
    pub class: String,
    /// Series key carried for hit testing and opacity updates.
    pub key: Option<String>,
    pub d: PathData,
    pub fill: Option<skia::Color>,
    pub fill_opacity: f64,
    pub stroke: Option<skia::Color>,
    pub stroke_width: f64,
}

impl PathNode {
    pub fn filled(class: impl Into<String>, d: PathData, fill: skia::Color) -> Self {
        Self { class: class.into(), key: None, d, fill: Some(fill), fill_opacity: 1.0, stroke: None, stroke_width: 1.0 }
    }

    pub fn stroked(class: impl Into<String>, d: PathData, stroke: skia::Color) -> Self {
        Self { class: class.into(), key: None, d, fill: None, fill_opacity: 1.0, stroke: Some(stroke), stroke_width: 1.0 }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LineNode {
    pub class: String,
    pub from: (f64, f64),
    pub to: (f64, f64),
    pub stroke: skia::Color,
    pub stroke_width: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextNode {
    pub class: String,
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size: f64,
    pub fill: skia::Color,
    pub anchor: TextAnchor,
    /// Baseline shift in em (SVG `dy`).
    pub dy_em: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RectNode {
    pub class: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: skia::Color,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Group(Group),
    Path(PathNode),
    Line(LineNode),
    Text(TextNode),
    Rect(RectNode),
}

impl Node {
    pub fn class(&self) -> &str {
        match self {
            Node::Group(g) => &g.class,
            Node::Path(p) => &p.class,
            Node::Line(l) => &l.class,
            Node::Text(t) => &t.class,
            Node::Rect(r) => &r.class,
        }
    }

    fn count_class(&self, class: &str) -> usize {
        let own = usize::from(self.class() == class);
        match self {
            Node::Group(g) => own + g.children.iter().map(|c| c.count_class(class)).sum::<usize>(),
            _ => own,
        }
    }
}

impl From<Group> for Node { fn from(v: Group) -> Self { Node::Group(v) } }
impl From<PathNode> for Node { fn from(v: PathNode) -> Self { Node::Path(v) } }
impl From<LineNode> for Node { fn from(v: LineNode) -> Self { Node::Line(v) } }
impl From<TextNode> for Node { fn from(v: TextNode) -> Self { Node::Text(v) } }
impl From<RectNode> for Node { fn from(v: RectNode) -> Self { Node::Rect(v) } }

/// Clip rectangle in surface pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClipRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub background: skia::Color,
    pub clip: ClipRect,
    pub nodes: Vec<Node>,
}

impl Scene {
    pub fn new(width: f64, height: f64, background: skia::Color, clip: ClipRect) -> Self {
        Self { width, height, background, clip, nodes: Vec::new() }
    }

    /// Insert `node`, replacing the top-level node of the same class if present.
    pub fn join(&mut self, node: impl Into<Node>) {
        let node = node.into();
        match self.nodes.iter().position(|n| n.class() == node.class()) {
            Some(i) => self.nodes[i] = node,
            None => self.nodes.push(node),
        }
    }

    /// Drop the top-level node of `class`, if any.
    pub fn remove(&mut self, class: &str) {
        self.nodes.retain(|n| n.class() != class);
    }

    pub fn get(&self, class: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.class() == class)
    }

    /// Number of nodes with `class` anywhere in the tree.
    pub fn count_class(&self, class: &str) -> usize {
        self.nodes.iter().map(|n| n.count_class(class)).sum()
    }

    /// Every path carrying a series key, depth first.
    pub fn keyed_paths(&self) -> Vec<&PathNode> {
        fn walk<'a>(n: &'a Node, out: &mut Vec<&'a PathNode>) {
            match n {
                Node::Group(g) => g.children.iter().for_each(|c| walk(c, out)),
                Node::Path(p) if p.key.is_some() => out.push(p),
                _ => {}
            }
        }
        let mut out = Vec::new();
        self.nodes.iter().for_each(|n| walk(n, &mut out));
        out
    }
}
