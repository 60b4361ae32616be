//! GeoJSON feature decoding.

use geojson::feature::Id;
use geojson::{Feature, GeoJson, Value as GeoValue};
use serde_json::Value;

use super::{parse_id, Region};
use crate::error::{GeometryError, Result};
use crate::index::GeoId;

pub(super) fn decode(value: Value) -> Result<Vec<Region>> {
    let features = match GeoJson::from_json_value(value)? {
        GeoJson::FeatureCollection(collection) => collection.features,
        GeoJson::Feature(feature) => vec![feature],
        GeoJson::Geometry(_) => {
            return Err(GeometryError::Unsupported("bare geometry".to_string()).into())
        }
    };

    Ok(features.iter().filter_map(to_region).collect())
}

fn to_region(feature: &Feature) -> Option<Region> {
    let rings: Vec<Vec<(f64, f64)>> = match &feature.geometry.as_ref()?.value {
        GeoValue::Polygon(polygon) => polygon.iter().map(|r| to_ring(r)).collect(),
        GeoValue::MultiPolygon(polygons) => {
            polygons.iter().flatten().map(|r| to_ring(r)).collect()
        }
        _ => return None,
    };

    let id = match &feature.id {
        Some(Id::String(s)) => GeoId::parse(s),
        Some(Id::Number(n)) => parse_id(&Value::Number(n.clone())),
        None => feature.property("id").and_then(parse_id),
    };

    Some(Region {
        id,
        key: String::new(),
        name: feature
            .property("name")
            .and_then(Value::as_str)
            .map(str::to_string),
        rings,
    })
}

fn to_ring(positions: &[Vec<f64>]) -> Vec<(f64, f64)> {
    positions
        .iter()
        .filter_map(|p| match p.as_slice() {
            [lon, lat, ..] => Some((*lon, *lat)),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_feature_collection() {
        let value = serde_json::json!({
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "id": "076",
                    "properties": {"name": "Brazil"},
                    "geometry": {"type": "Polygon", "coordinates": [[[-50, -10], [-40, -10], [-40, 0], [-50, -10]]]}
                },
                {
                    "type": "Feature",
                    "properties": {"id": 840},
                    "geometry": {"type": "MultiPolygon", "coordinates": [
                        [[[-100, 40], [-90, 40], [-90, 45], [-100, 40]]],
                        [[[-150, 60], [-140, 60], [-140, 65], [-150, 60]]]
                    ]}
                },
                {
                    "type": "Feature",
                    "properties": {},
                    "geometry": {"type": "Point", "coordinates": [0, 0]}
                }
            ]
        });

        let regions = decode(value).unwrap();
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].id, Some(GeoId::new(76)));
        assert_eq!(regions[0].name.as_deref(), Some("Brazil"));
        assert_eq!(regions[0].rings[0][1], (-40.0, -10.0));
        assert_eq!(regions[1].id, Some(GeoId::new(840)));
        assert_eq!(regions[1].rings.len(), 2);
    }

    #[test]
    fn test_bare_geometry_rejected() {
        let value = serde_json::json!({"type": "Polygon", "coordinates": [[[0, 0], [1, 0], [1, 1], [0, 0]]]});
        assert!(decode(value).is_err());
    }
}
