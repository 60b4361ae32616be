//! Headless SVG export.

use std::path::Path;

use anyhow::Context;
use heatmap_core::geometry::{load_regions, project_regions};
use heatmap_core::{
    load_dataset, render_svg, CountryTable, GeoIndex, Mercator, QuantizeScale,
};
use tracing::info;

use crate::config::ViewerConfig;

/// What an export wrote.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSummary {
    pub regions: usize,
    pub colored: usize,
    pub max: f64,
}

/// Loads data and geometry, searches the configured NCM and writes the map as SVG.
pub async fn export_svg(config: &ViewerConfig, out: &Path) -> anyhow::Result<ExportSummary> {
    let dataset = load_dataset(&config.data)
        .await
        .with_context(|| format!("loading dataset from {}", config.data))?;
    let regions = load_regions(&config.geometry, &config.object)
        .await
        .with_context(|| format!("loading geometry from {}", config.geometry))?;
    let shapes = project_regions(&regions, &Mercator::default());

    let query = config.initial_ncm.as_deref().unwrap_or_default();
    let index = GeoIndex::build(
        dataset.records(),
        query,
        CountryTable::embedded(),
        config.collision,
    );
    let scale = QuantizeScale::for_index(&index, config.metric);
    let svg = render_svg(&shapes, &index, config.metric, &scale);

    tokio::fs::write(out, svg)
        .await
        .with_context(|| format!("writing {}", out.display()))?;

    let colored = shapes
        .iter()
        .filter_map(|s| s.id)
        .filter(|id| index.value(*id, config.metric).is_some_and(|v| v > 0.0))
        .count();

    info!(
        "Exported {} regions ({} colored, {} max {}) to {}",
        shapes.len(),
        colored,
        config.metric,
        scale.max(),
        out.display()
    );

    Ok(ExportSummary {
        regions: shapes.len(),
        colored,
        max: scale.max(),
    })
}
