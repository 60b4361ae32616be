//! Web Mercator projection to screen coordinates.

use std::f64::consts::{FRAC_PI_4, TAU};

/// Map canvas width in screen units.
pub const MAP_WIDTH: f64 = 1000.0;

/// Map canvas height in screen units.
pub const MAP_HEIGHT: f64 = 600.0;

/// Latitude where the Mercator square ends.
const MAX_LATITUDE: f64 = 85.051_128_779_806_6;

/// Spherical Mercator centered on the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mercator {
    scale: f64,
    translate: (f64, f64),
}

impl Mercator {
    /// Creates a projection for a canvas, using the conventional world scale `961 / 2π`.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            scale: 961.0 / TAU,
            translate: (width / 2.0, height / 2.0),
        }
    }

    /// Projects `(lon, lat)` in degrees to `(x, y)`.
    pub fn project(&self, lon: f64, lat: f64) -> (f64, f64) {
        let lambda = lon.to_radians();
        let phi = lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
        let x = self.translate.0 + self.scale * lambda;
        let y = self.translate.1 - self.scale * (FRAC_PI_4 + phi / 2.0).tan().ln();
        (x, y)
    }

    /// Builds SVG path data for a set of rings. Rings with fewer than three points are skipped.
    pub fn path(&self, rings: &[Vec<(f64, f64)>]) -> String {
        let mut d = String::new();
        for ring in rings.iter().filter(|r| r.len() >= 3) {
            for (i, (lon, lat)) in ring.iter().enumerate() {
                let (x, y) = self.project(*lon, *lat);
                let cmd = if i == 0 { 'M' } else { 'L' };
                d.push_str(&format!("{cmd}{x:.2},{y:.2}"));
            }
            d.push('Z');
        }
        d
    }
}

impl Default for Mercator {
    fn default() -> Self {
        Self::new(MAP_WIDTH, MAP_HEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_origin_projects_to_center() {
        let (x, y) = Mercator::default().project(0.0, 0.0);
        assert!(close(x, 500.0));
        assert!(close(y, 300.0));
    }

    #[test]
    fn test_antimeridian_spans_scale_pi() {
        let m = Mercator::default();
        let (west, _) = m.project(-180.0, 0.0);
        let (east, _) = m.project(180.0, 0.0);
        assert!(close(east - west, 961.0));
    }

    #[test]
    fn test_north_is_up_and_poles_clamp() {
        let m = Mercator::default();
        let (_, north) = m.project(0.0, 45.0);
        let (_, south) = m.project(0.0, -45.0);
        assert!(north < 300.0 && south > 300.0);
        assert!(m.project(0.0, 90.0).1.is_finite());
        assert!(close(m.project(0.0, 90.0).1, m.project(0.0, 89.0).1));
    }

    #[test]
    fn test_path_skips_degenerate_rings() {
        let m = Mercator::default();
        assert_eq!(m.path(&[vec![(0.0, 0.0), (1.0, 1.0)]]), "");
        let d = m.path(&[vec![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]]);
        assert_eq!(d.matches('M').count(), 1);
        assert_eq!(d.matches('L').count(), 2);
        assert!(d.ends_with('Z'));
    }
}
