// File: crates/cli/src/main.rs
// Summary: Loads the dose feed (HTTPS or local CSV) and writes the streamgraph for one location as SVG/PNG.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use stream_core::feed::{fetch_records, read_records};
use stream_core::record::distinct_locations;
use stream_core::{theme, Config, Dashboard, RenderOptions};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Debug, Parser)]
#[command(name = "dosestream", version, about = "Streamgraph of daily vaccine doses by manufacturer")]
struct Args {
    /// TOML config file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,
    /// CSV feed URL
    #[arg(long)]
    url: Option<String>,
    /// Read a local CSV instead of fetching
    #[arg(long)]
    input: Option<PathBuf>,
    /// Location to render
    #[arg(long)]
    location: Option<String>,
    #[arg(long)]
    viewport_width: Option<u32>,
    #[arg(long)]
    viewport_height: Option<u32>,
    /// light or dark
    #[arg(long)]
    theme: Option<String>,
    #[arg(long)]
    out_dir: Option<PathBuf>,
    /// Also rasterise to PNG
    #[arg(long)]
    png: bool,
    /// Print the available locations and exit
    #[arg(long)]
    list_locations: bool,
}

impl Args {
    fn config(&self) -> Result<Config> {
        let mut cfg = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };
        if let Some(v) = &self.url { cfg.feed_url = v.clone(); }
        if let Some(v) = &self.location { cfg.location = v.clone(); }
        if let Some(v) = self.viewport_width { cfg.viewport_width = v; }
        if let Some(v) = self.viewport_height { cfg.viewport_height = v; }
        if let Some(v) = &self.theme { cfg.theme = v.clone(); }
        if let Some(v) = &self.out_dir { cfg.out_dir = v.clone(); }
        Ok(cfg)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let args = Args::parse();
    let cfg = args.config()?;

    let records = match &args.input {
        Some(path) => read_records(path)?,
        None => fetch_records(&reqwest::Client::new(), &cfg.feed_url).await?,
    };

    if args.list_locations {
        for loc in distinct_locations(&records) {
            println!("{loc}");
        }
        return Ok(());
    }

    let dash = Dashboard::load(records, &cfg.location, cfg.surface(), theme::find(&cfg.theme));
    if dash.context().model().map_or(true, |m| m.bands.is_empty()) {
        info!(location = %cfg.location, "no data for location; rendering axes only");
    }

    std::fs::create_dir_all(&cfg.out_dir)
        .with_context(|| format!("creating {}", cfg.out_dir.display()))?;
    let scene = dash.context().scene();

    let svg_path = out_path(&cfg.out_dir, &cfg.location, "svg");
    std::fs::write(&svg_path, scene.to_svg()).with_context(|| format!("writing {}", svg_path.display()))?;
    println!("Wrote {}", svg_path.display());

    if args.png {
        let png_path = out_path(&cfg.out_dir, &cfg.location, "png");
        scene.render_to_png(&RenderOptions::default(), &png_path)?;
        println!("Wrote {}", png_path.display());
    }
    Ok(())
}

/// `<out_dir>/streamgraph_<location>.<ext>` with the location made filename-safe.
fn out_path(dir: &Path, location: &str, ext: &str) -> PathBuf {
    let safe: String = location
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect();
    dir.join(format!("streamgraph_{safe}.{ext}"))
}
