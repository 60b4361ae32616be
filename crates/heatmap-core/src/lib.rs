//! Core of the NCM trade heat map.
//!
//! Loads trade records, indexes them by map region for a product code,
//! builds the quantized color scale and turns world geometry into
//! colored, projected shapes. Everything past loading is a pure function
//! of the current state so the viewer can recompute it on every change.

pub mod error;
pub mod geometry;
pub mod index;
pub mod loader;
pub mod lookup;
pub mod record;
pub mod render;
pub mod scale;
pub mod source;

pub use error::{HeatmapError, Result};
pub use geometry::{MapShape, Mercator, Region};
pub use index::{CollisionPolicy, GeoId, GeoIndex};
pub use loader::{load_dataset, parse_dataset, Dataset};
pub use lookup::CountryTable;
pub use record::{pad_ncm, sanitize_query, Metric, TradeRecord, NCM_WIDTH};
pub use render::{fill_for, legend, render_svg, Legend};
pub use scale::{LegendEntry, QuantizeScale, FALLBACK_COLOR, PALETTE};
pub use source::DataSource;
