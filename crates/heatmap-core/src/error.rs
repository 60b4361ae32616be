//! Error types for the heat map core

use thiserror::Error;

/// Top-level error type for loading and decoding heat map inputs
#[derive(Debug, Error)]
pub enum HeatmapError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Geometry error: {0}")]
    Geometry(#[from] GeometryError),

    #[error("Invalid lookup table: {0}")]
    LookupTable(String),

    #[error("Unknown metric: {0} (expected VL_FOB or KG_LIQUIDO)")]
    UnknownMetric(String),
}

/// Errors raised while decoding map geometry
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("TopoJSON object not found: {0}")]
    ObjectNotFound(String),

    #[error("Arc index {index} out of range ({count} arcs)")]
    ArcOutOfRange { index: i64, count: usize },

    #[error("Malformed {kind} geometry: {reason}")]
    Malformed { kind: String, reason: String },

    #[error("Unsupported geometry document: {0}")]
    Unsupported(String),
}

/// Result type alias for heat map operations
pub type Result<T> = std::result::Result<T, HeatmapError>;
