//! Region fills, legend and standalone SVG output.

use crate::geometry::{MapShape, MAP_HEIGHT, MAP_WIDTH};
use crate::index::{GeoId, GeoIndex};
use crate::record::Metric;
use crate::scale::{LegendEntry, QuantizeScale, FALLBACK_COLOR};

/// Stroke drawn between regions.
pub const BORDER_COLOR: &str = "#ffffff";

const SWATCH_WIDTH: f64 = 60.0;
const SWATCH_HEIGHT: f64 = 20.0;
const LEGEND_HEIGHT: f64 = 48.0;

/// Legend contents for the current search.
#[derive(Debug, Clone, PartialEq)]
pub struct Legend {
    /// Unit of the selected metric (`R$` or `KG`).
    pub unit: &'static str,
    pub entries: Vec<LegendEntry>,
}

/// Returns the fill for a region.
///
/// Regions that are indexed with a positive value get their scale color;
/// everything else gets `FALLBACK_COLOR`.
pub fn fill_for(
    id: Option<GeoId>,
    index: &GeoIndex,
    metric: Metric,
    scale: &QuantizeScale,
) -> &'static str {
    match id.and_then(|id| index.value(id, metric)) {
        Some(value) if value > 0.0 => scale.color(value),
        _ => FALLBACK_COLOR,
    }
}

/// Returns the legend, or `None` when nothing is indexed.
pub fn legend(index: &GeoIndex, metric: Metric, scale: &QuantizeScale) -> Option<Legend> {
    if index.is_empty() {
        return None;
    }
    Some(Legend {
        unit: metric.unit(),
        entries: scale.entries(),
    })
}

/// Renders shapes and legend into a standalone SVG document.
pub fn render_svg(
    shapes: &[MapShape],
    index: &GeoIndex,
    metric: Metric,
    scale: &QuantizeScale,
) -> String {
    let legend = legend(index, metric, scale);
    let height = MAP_HEIGHT + if legend.is_some() { LEGEND_HEIGHT } else { 0.0 };

    let mut svg = String::new();
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{MAP_WIDTH}" height="{height}" viewBox="0 0 {MAP_WIDTH} {height}">"#
    ));
    svg.push('\n');
    svg.push_str(&format!(
        r#"<g class="regions" stroke="{BORDER_COLOR}" stroke-width="0.5" fill-rule="evenodd">"#
    ));
    svg.push('\n');

    for shape in shapes {
        let fill = fill_for(shape.id, index, metric, scale);
        let id_attr = shape
            .id
            .map(|id| format!(r#" data-id="{id}""#))
            .unwrap_or_default();
        match &shape.name {
            Some(name) => svg.push_str(&format!(
                r#"<path id="{}"{} fill="{}" d="{}"><title>{}</title></path>"#,
                shape.key,
                id_attr,
                fill,
                shape.path,
                escape(name)
            )),
            None => svg.push_str(&format!(
                r#"<path id="{}"{} fill="{}" d="{}"/>"#,
                shape.key, id_attr, fill, shape.path
            )),
        }
        svg.push('\n');
    }
    svg.push_str("</g>\n");

    if let Some(legend) = legend {
        let top = MAP_HEIGHT + 8.0;
        svg.push_str(&format!(
            r#"<g class="legend" font-family="sans-serif" font-size="10"><text x="8" y="{:.0}" font-size="12" font-weight="600">Legend ({}):</text>"#,
            top + 14.0,
            escape(legend.unit)
        ));
        for (i, entry) in legend.entries.iter().enumerate() {
            let x = 110.0 + i as f64 * (SWATCH_WIDTH + 4.0);
            svg.push_str(&format!(
                r##"<rect x="{x:.0}" y="{top:.0}" width="{SWATCH_WIDTH}" height="{SWATCH_HEIGHT}" fill="{}" stroke="#cccccc"/><text x="{:.0}" y="{:.0}" text-anchor="middle">{}</text>"##,
                entry.color,
                x + SWATCH_WIDTH / 2.0,
                top + 14.0,
                entry.label()
            ));
        }
        svg.push_str("</g>\n");
    }

    svg.push_str("</svg>\n");
    svg
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
