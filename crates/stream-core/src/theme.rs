// File: crates/stream-core/src/theme.rs
// Summary: Light/Dark theming plus the ordinal Tableau-10 series palette.

use indexmap::IndexSet;
use skia_safe as skia;

/// Tableau 10 categorical scheme.
pub const TABLEAU10: [skia::Color; 10] = [
    skia::Color::new(0xff4e79a7),
    skia::Color::new(0xfff28e2c),
    skia::Color::new(0xffe15759),
    skia::Color::new(0xff76b7b2),
    skia::Color::new(0xff59a14f),
    skia::Color::new(0xffedc949),
    skia::Color::new(0xffaf7aa1),
    skia::Color::new(0xffff9da7),
    skia::Color::new(0xff9c755f),
    skia::Color::new(0xffbab0ab),
];

#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub name: &'static str,
    pub background: skia::Color,
    pub axis_line: skia::Color,
    pub axis_label: skia::Color,
    pub series_label: skia::Color,
    pub tooltip_background: skia::Color,
    pub tooltip_text: skia::Color,
    pub spinner: skia::Color,
}

impl Theme {
    pub fn light() -> Self {
        Self {
            name: "light",
            background: skia::Color::from_argb(255, 255, 255, 255),
            axis_line: skia::Color::from_argb(255, 0xba, 0xb8, 0xb8),
            axis_label: skia::Color::from_argb(255, 0, 0, 0),
            series_label: skia::Color::from_argb(255, 0, 0, 0),
            tooltip_background: skia::Color::from_argb(235, 255, 255, 255),
            tooltip_text: skia::Color::from_argb(255, 20, 20, 30),
            spinner: skia::Color::from_argb(255, 60, 60, 70),
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: skia::Color::from_argb(255, 18, 18, 20),
            axis_line: skia::Color::from_argb(255, 0xba, 0xb8, 0xb8),
            axis_label: skia::Color::from_argb(255, 235, 235, 245),
            series_label: skia::Color::from_argb(255, 0, 0, 0),
            tooltip_background: skia::Color::from_argb(235, 40, 40, 45),
            tooltip_text: skia::Color::from_argb(255, 235, 235, 245),
            spinner: skia::Color::from_argb(255, 255, 255, 255),
        }
    }
}

impl Default for Theme {
    fn default() -> Self { Self::light() }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::light(), Theme::dark()]
}

/// Find a theme by its `name`, falling back to light.
pub fn find(name: &str) -> Theme {
    for t in presets() { if t.name.eq_ignore_ascii_case(name) { return t; } }
    Theme::light()
}

/// Ordinal colour scale: domain values map to the palette by first-seen index, cycling.
#[derive(Clone, Debug, Default)]
pub struct ColorScale {
    domain: IndexSet<String>,
}

impl ColorScale {
    pub fn new<I, S>(domain: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { domain: domain.into_iter().map(Into::into).collect() }
    }

    /// Colour for `key`; unknown keys are appended to the domain, as an ordinal scale does.
    pub fn color(&mut self, key: &str) -> skia::Color {
        let (i, _) = self.domain.insert_full(key.to_owned());
        TABLEAU10[i % TABLEAU10.len()]
    }
}
