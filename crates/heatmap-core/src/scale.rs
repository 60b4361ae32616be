//! Quantized color scale over `[0, max]`.

use crate::index::GeoIndex;
use crate::record::Metric;

/// Seven bucket colors, light to dark red.
pub const PALETTE: [&str; 7] = [
    "#ffe6e6", "#ffb3b3", "#ff8080", "#e64d4d", "#cc0000", "#990000", "#800000",
];

/// Fill for regions with no data or a non-positive value.
pub const FALLBACK_COLOR: &str = "#f0f0f0";

/// Domain maximum used when there is nothing to scale.
pub const DEFAULT_MAX: f64 = 1.0;

const BUCKETS: usize = PALETTE.len();

/// One legend swatch: a palette color and the lower bound of its bucket.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegendEntry {
    pub color: &'static str,
    pub lower_bound: f64,
}

impl LegendEntry {
    /// Lower bound rounded for display.
    pub fn label(&self) -> String {
        format!("{}", self.lower_bound.round() as i64)
    }
}

/// Maps values in `[0, max]` onto `PALETTE` with equal-width buckets.
///
/// Bucket `i` covers `[i * max / 7, (i + 1) * max / 7)`. A value sitting
/// exactly on a threshold falls in the upper bucket; values outside the
/// domain clamp to the first or last bucket.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuantizeScale {
    max: f64,
    thresholds: [f64; BUCKETS - 1],
}

impl QuantizeScale {
    /// Builds a scale over `[0, max]`. A non-finite or non-positive max becomes `DEFAULT_MAX`.
    pub fn new(max: f64) -> Self {
        let max = if max.is_finite() && max > 0.0 {
            max
        } else {
            DEFAULT_MAX
        };

        let mut thresholds = [0.0; BUCKETS - 1];
        for (i, t) in thresholds.iter_mut().enumerate() {
            *t = (i + 1) as f64 * max / BUCKETS as f64;
        }

        Self { max, thresholds }
    }

    /// Builds the scale for the selected metric over the indexed records.
    pub fn for_index(index: &GeoIndex, metric: Metric) -> Self {
        Self::new(index.max_value(metric).unwrap_or(DEFAULT_MAX))
    }

    /// Returns the domain `(0, max)`.
    pub fn domain(&self) -> (f64, f64) {
        (0.0, self.max)
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Returns the bucket a value falls into.
    pub fn bucket(&self, value: f64) -> usize {
        self.thresholds.partition_point(|t| *t <= value)
    }

    /// Returns the palette color for a value.
    pub fn color(&self, value: f64) -> &'static str {
        PALETTE[self.bucket(value)]
    }

    /// Returns the `[min, max)` extent a palette color covers.
    pub fn invert_extent(&self, color: &str) -> Option<(f64, f64)> {
        let i = PALETTE.iter().position(|c| *c == color)?;
        let lower = if i == 0 { 0.0 } else { self.thresholds[i - 1] };
        let upper = if i == BUCKETS - 1 {
            self.max
        } else {
            self.thresholds[i]
        };
        Some((lower, upper))
    }

    /// Returns every palette color with its bucket's lower bound.
    pub fn entries(&self) -> Vec<LegendEntry> {
        PALETTE
            .iter()
            .enumerate()
            .map(|(i, &color)| LegendEntry {
                color,
                lower_bound: if i == 0 { 0.0 } else { self.thresholds[i - 1] },
            })
            .collect()
    }
}

impl Default for QuantizeScale {
    fn default() -> Self {
        Self::new(DEFAULT_MAX)
    }
}
