// File: crates/stream-core/src/config.rs
// Summary: Runtime configuration (feed URL, default location, viewport, margins) loadable from TOML.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::selector::DEFAULT_LOCATION;
use crate::types::{Insets, Surface, VIEWPORT_HEIGHT, VIEWPORT_WIDTH};

/// Public vaccinations-by-manufacturer feed.
pub const FEED_URL: &str =
    "https://raw.githubusercontent.com/owid/covid-19-data/master/public/data/vaccinations/vaccinations-by-manufacturer.csv";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub feed_url: String,
    pub location: String,
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub margin: Insets,
    pub theme: String,
    pub out_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            feed_url: FEED_URL.to_owned(),
            location: DEFAULT_LOCATION.to_owned(),
            viewport_width: VIEWPORT_WIDTH,
            viewport_height: VIEWPORT_HEIGHT,
            margin: Insets::default(),
            theme: "light".to_owned(),
            out_dir: PathBuf::from("target/out"),
        }
    }
}

impl Config {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("parsing config TOML")
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_toml_str(&text)
    }

    pub fn surface(&self) -> Surface {
        Surface::for_viewport(self.viewport_width, self.viewport_height, self.margin)
    }
}
