//! TopoJSON topology decoding.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::{parse_id, Region};
use crate::error::{GeometryError, Result};

#[derive(Debug, Deserialize)]
struct Topology {
    #[serde(default)]
    transform: Option<Transform>,
    objects: HashMap<String, TopoGeometry>,
    #[serde(default)]
    arcs: Vec<Vec<Vec<f64>>>,
}

/// Quantization transform; when present, arc positions are delta-encoded.
#[derive(Debug, Deserialize)]
struct Transform {
    scale: [f64; 2],
    translate: [f64; 2],
}

#[derive(Debug, Deserialize)]
struct TopoGeometry {
    #[serde(rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    properties: Option<Value>,
    #[serde(default)]
    arcs: Option<Value>,
    #[serde(default)]
    geometries: Vec<TopoGeometry>,
}

type Arc = Vec<(f64, f64)>;

pub(super) fn decode(value: Value, object: &str) -> Result<Vec<Region>> {
    let topology: Topology = serde_json::from_value(value)?;
    let arcs = decode_arcs(&topology)?;
    let root = topology
        .objects
        .get(object)
        .ok_or_else(|| GeometryError::ObjectNotFound(object.to_string()))?;

    let mut regions = Vec::new();
    collect(root, &arcs, &mut regions)?;
    Ok(regions)
}

fn collect(geometry: &TopoGeometry, arcs: &[Arc], out: &mut Vec<Region>) -> Result<()> {
    let rings = match geometry.kind.as_deref() {
        Some("GeometryCollection") => {
            for child in &geometry.geometries {
                collect(child, arcs, out)?;
            }
            return Ok(());
        }
        Some("Polygon") => {
            let polygon: Vec<Vec<i64>> = arc_refs(geometry, "Polygon")?;
            polygon
                .iter()
                .map(|ring| stitch(ring, arcs))
                .collect::<Result<Vec<_>>>()?
        }
        Some("MultiPolygon") => {
            let polygons: Vec<Vec<Vec<i64>>> = arc_refs(geometry, "MultiPolygon")?;
            polygons
                .iter()
                .flatten()
                .map(|ring| stitch(ring, arcs))
                .collect::<Result<Vec<_>>>()?
        }
        other => {
            debug!("Skipping {:?} geometry", other);
            return Ok(());
        }
    };

    out.push(Region {
        id: geometry.id.as_ref().and_then(parse_id),
        key: String::new(),
        name: geometry
            .properties
            .as_ref()
            .and_then(|p| p.get("name"))
            .and_then(Value::as_str)
            .map(str::to_string),
        rings,
    });
    Ok(())
}

fn arc_refs<T: serde::de::DeserializeOwned>(geometry: &TopoGeometry, kind: &str) -> Result<T> {
    let arcs = geometry.arcs.clone().ok_or_else(|| GeometryError::Malformed {
        kind: kind.to_string(),
        reason: "missing arcs".to_string(),
    })?;
    serde_json::from_value(arcs).map_err(|e| {
        GeometryError::Malformed {
            kind: kind.to_string(),
            reason: e.to_string(),
        }
        .into()
    })
}

/// Resolves arc positions to absolute coordinates.
fn decode_arcs(topology: &Topology) -> Result<Vec<Arc>> {
    topology
        .arcs
        .iter()
        .map(|arc| {
            let (mut x, mut y) = (0.0, 0.0);
            arc.iter()
                .map(|position| -> Result<(f64, f64)> {
                    let (px, py) = match position.as_slice() {
                        [px, py, ..] => (*px, *py),
                        _ => {
                            return Err(GeometryError::Malformed {
                                kind: "arc".to_string(),
                                reason: format!("position {position:?}"),
                            }
                            .into())
                        }
                    };
                    Ok(match &topology.transform {
                        Some(t) => {
                            x += px;
                            y += py;
                            (x * t.scale[0] + t.translate[0], y * t.scale[1] + t.translate[1])
                        }
                        None => (px, py),
                    })
                })
                .collect::<Result<Arc>>()
        })
        .collect()
}

/// Joins the referenced arcs into one ring. A negative index `i` means arc `!i` reversed.
fn stitch(refs: &[i64], arcs: &[Arc]) -> Result<Vec<(f64, f64)>> {
    let mut ring: Vec<(f64, f64)> = Vec::new();
    for &index in refs {
        let (arc_index, reversed) = if index >= 0 {
            (index, false)
        } else {
            (!index, true)
        };
        let arc = usize::try_from(arc_index)
            .ok()
            .and_then(|i| arcs.get(i))
            .ok_or(GeometryError::ArcOutOfRange {
                index,
                count: arcs.len(),
            })?;

        // consecutive arcs share an endpoint
        ring.pop();
        if reversed {
            ring.extend(arc.iter().rev().copied());
        } else {
            ring.extend(arc.iter().copied());
        }
    }
    Ok(ring)
}
