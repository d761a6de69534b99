// File: crates/stream-core/src/lib.rs
// Summary: Core library entry point; exports feed loading, parsing, transform, layout and rendering APIs.

pub mod axis;
pub mod chart;
pub mod config;
pub mod context;
pub mod curve;
pub mod dashboard;
pub mod error;
pub mod feed;
pub mod label;
pub mod layout;
pub mod loading;
pub mod record;
pub mod scale;
pub mod scene;
pub mod selector;
pub mod svg;
pub mod text;
pub mod theme;
pub mod transform;
pub mod types;
pub mod zoom;

pub use chart::RenderOptions;
pub use config::Config;
pub use context::{ChartEvent, ChartModel, RenderContext, Tooltip};
pub use dashboard::Dashboard;
pub use error::ParseError;
pub use layout::{InsideOutSilhouette, StackLayout, StackedBand};
pub use loading::Spinner;
pub use record::{parse_csv, DoseRecord};
pub use scene::Scene;
pub use selector::LocationSelector;
pub use theme::Theme;
pub use transform::{transform, AggregatedRow, DerivedRecord, SeriesTable, StackKeys};
pub use types::{Insets, Surface};
pub use zoom::{ZoomBehavior, ZoomTransform};
