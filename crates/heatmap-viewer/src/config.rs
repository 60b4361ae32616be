//! Viewer configuration, set once from the command line.

use std::sync::OnceLock;

use heatmap_core::geometry::{DEFAULT_GEOMETRY_URL, DEFAULT_OBJECT};
use heatmap_core::{CollisionPolicy, DataSource, Metric};

/// Dataset location used when none is given.
pub const DEFAULT_DATASET_PATH: &str = "csv/exportacao_heatmap_com_iso3.csv";

/// Global storage for the parsed configuration.
static CONFIG: OnceLock<ViewerConfig> = OnceLock::new();

/// Everything the viewer needs to know before it starts.
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    /// Trade dataset (CSV).
    pub data: DataSource,
    /// World geometry (TopoJSON or GeoJSON).
    pub geometry: DataSource,
    /// TopoJSON object holding the countries.
    pub object: String,
    /// Product code searched as soon as the dataset is present.
    pub initial_ncm: Option<String>,
    /// Metric selected at startup.
    pub metric: Metric,
    /// How records sharing a region are combined.
    pub collision: CollisionPolicy,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            data: DataSource::from(DEFAULT_DATASET_PATH),
            geometry: DataSource::from(DEFAULT_GEOMETRY_URL),
            object: DEFAULT_OBJECT.to_string(),
            initial_ncm: None,
            metric: Metric::default(),
            collision: CollisionPolicy::default(),
        }
    }
}

/// Stores the configuration. Later calls are ignored.
pub fn install(config: ViewerConfig) {
    if CONFIG.set(config).is_err() {
        tracing::warn!("Viewer configuration already installed");
    }
}

/// Returns the installed configuration, or the defaults.
pub fn config() -> &'static ViewerConfig {
    CONFIG.get_or_init(ViewerConfig::default)
}
