//! World geometry: decoding region polygons and projecting them to SVG paths.

mod feature_collection;
mod projection;
mod topojson;

use serde_json::Value;
use tracing::info;

use crate::error::{GeometryError, Result};
use crate::index::GeoId;
use crate::source::DataSource;

pub use projection::{Mercator, MAP_HEIGHT, MAP_WIDTH};

/// Default world geometry (world-atlas TopoJSON).
pub const DEFAULT_GEOMETRY_URL: &str =
    "https://cdn.jsdelivr.net/npm/world-atlas@2/countries-110m.json";

/// TopoJSON object holding the country geometries.
pub const DEFAULT_OBJECT: &str = "countries";

/// A map region in longitude/latitude.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    /// Numeric region id; `None` for regions that can never be colored.
    pub id: Option<GeoId>,
    /// Stable, unique render key.
    pub key: String,
    pub name: Option<String>,
    /// Outer rings and holes of every polygon, as `(lon, lat)` points.
    pub rings: Vec<Vec<(f64, f64)>>,
}

/// A region projected to screen space, ready to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct MapShape {
    pub key: String,
    pub id: Option<GeoId>,
    pub name: Option<String>,
    /// SVG path data.
    pub path: String,
}

/// Decodes a TopoJSON topology or a GeoJSON document into regions.
///
/// For TopoJSON, `object` names the geometry collection to read.
pub fn decode_regions(bytes: &[u8], object: &str) -> Result<Vec<Region>> {
    let value: Value = serde_json::from_slice(bytes)?;
    let kind = value.get("type").and_then(Value::as_str).unwrap_or_default();

    let mut regions = match kind {
        "Topology" => topojson::decode(value, object)?,
        "FeatureCollection" | "Feature" => feature_collection::decode(value)?,
        other => return Err(GeometryError::Unsupported(other.to_string()).into()),
    };

    for (ordinal, region) in regions.iter_mut().enumerate() {
        region.key = format!("geo-{ordinal}");
    }

    Ok(regions)
}

/// Loads world geometry from a file or URL.
pub async fn load_regions(source: &DataSource, object: &str) -> Result<Vec<Region>> {
    info!("Loading geometry from {}", source);
    let bytes = source.fetch().await?;
    let regions = decode_regions(&bytes, object)?;
    info!("Decoded {} regions", regions.len());
    Ok(regions)
}

/// Projects regions, dropping those with nothing to draw.
pub fn project_regions(regions: &[Region], projection: &Mercator) -> Vec<MapShape> {
    regions
        .iter()
        .filter_map(|region| {
            let path = projection.path(&region.rings);
            (!path.is_empty()).then(|| MapShape {
                key: region.key.clone(),
                id: region.id,
                name: region.name.clone(),
                path,
            })
        })
        .collect()
}

/// Reads a region id from a JSON id value.
fn parse_id(value: &Value) -> Option<GeoId> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()).map(GeoId::new),
        Value::String(s) => GeoId::parse(s),
        _ => None,
    }
}
