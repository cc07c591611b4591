//! Parallelversatz von Linien in Metern, projektionsbewusst.

use super::Projection;
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Seite, auf die eine Linie versetzt wird (in Laufrichtung gesehen).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OffsetSide {
    /// Links der Laufrichtung (positiver Abstand)
    Left,
    /// Rechts der Laufrichtung (negativer Abstand)
    Right,
    /// Beide Seiten → zwei neue Linien
    Both,
}

impl OffsetSide {
    /// Vorzeichenbehaftete Abstände, die für diese Seite erzeugt werden.
    pub fn signed_distances(&self, distance: f64) -> Vec<f64> {
        let d = distance.abs();
        match self {
            OffsetSide::Left => vec![d],
            OffsetSide::Right => vec![-d],
            OffsetSide::Both => vec![d, -d],
        }
    }
}

/// Linke Einheitsnormale eines Segments; Nullvektor bei Nulllänge.
fn segment_normal(a: DVec2, b: DVec2) -> DVec2 {
    let dir = (b - a).normalize_or_zero();
    DVec2::new(-dir.y, dir.x)
}

/// Versatzrichtung je Stützpunkt.
///
/// Innere Punkte mitteln die Normalen beider Nachbarsegmente, Endpunkte
/// nutzen nur ihr eines Segment.
pub fn vertex_normals(line: &[DVec2]) -> Vec<DVec2> {
    let n = line.len();
    if n < 2 {
        return vec![DVec2::ZERO; n];
    }

    (0..n)
        .map(|i| {
            let before = (i > 0).then(|| segment_normal(line[i - 1], line[i]));
            let after = (i + 1 < n).then(|| segment_normal(line[i], line[i + 1]));
            match (before, after) {
                (Some(a), Some(b)) => (a + b).normalize_or_zero(),
                (Some(a), None) => a,
                (None, Some(b)) => b,
                (None, None) => DVec2::ZERO,
            }
        })
        .collect()
}

/// Versetzt eine Linie um `distance_meters` senkrecht zur Laufrichtung.
///
/// Positiver Abstand = links, negativer = rechts. Der Meter-Abstand wird je
/// Stützpunkt in Karteneinheiten umgerechnet, da der Mercator-Maßstab mit
/// der Breite variiert.
pub fn offset_line(line: &[DVec2], distance_meters: f64, projection: Projection) -> Vec<DVec2> {
    vertex_normals(line)
        .into_iter()
        .zip(line)
        .map(|(normal, &p)| p + normal * projection.meters_to_units(distance_meters, p))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn planar_offset_moves_left_and_right() {
        let line = [DVec2::new(0.0, 0.0), DVec2::new(10.0, 0.0)];
        let left = offset_line(&line, 2.0, Projection::Planar);
        assert_eq!(left, vec![DVec2::new(0.0, 2.0), DVec2::new(10.0, 2.0)]);
        let right = offset_line(&line, -2.0, Projection::Planar);
        assert_eq!(right, vec![DVec2::new(0.0, -2.0), DVec2::new(10.0, -2.0)]);
    }

    #[test]
    fn interior_vertex_uses_averaged_normal() {
        let line = [
            DVec2::new(0.0, 0.0),
            DVec2::new(10.0, 0.0),
            DVec2::new(10.0, 10.0),
        ];
        let normals = vertex_normals(&line);
        let diag = DVec2::new(-1.0, 1.0).normalize();
        assert_abs_diff_eq!(normals[1].x, diag.x, epsilon = 1e-12);
        assert_abs_diff_eq!(normals[1].y, diag.y, epsilon = 1e-12);
        assert_eq!(normals[0], DVec2::new(0.0, 1.0));
        assert_eq!(normals[2], DVec2::new(-1.0, 0.0));
    }

    #[test]
    fn zero_length_segment_contributes_nothing() {
        let p = DVec2::new(5.0, 5.0);
        let out = offset_line(&[p, p], 3.0, Projection::Planar);
        assert_eq!(out, vec![p, p]);
    }

    #[test]
    fn mercator_offset_scales_with_latitude() {
        // ~60° Nord: 1 m entspricht 2 Karteneinheiten
        let y = super::super::projection::EARTH_RADIUS
            * (std::f64::consts::FRAC_PI_4 + 60f64.to_radians() / 2.0).tan().ln();
        let line = [DVec2::new(0.0, y), DVec2::new(0.0, y + 100.0)];
        let out = offset_line(&line, 5.0, Projection::WebMercator);
        assert_abs_diff_eq!(out[0].x, -10.0, epsilon = 1e-6);
    }

    #[test]
    fn offset_round_trip_restores_line() {
        let y = 6_000_000.0;
        let line: Vec<DVec2> = (0..5).map(|i| DVec2::new(i as f64 * 25.0, y)).collect();
        let out = offset_line(&line, 12.0, Projection::WebMercator);
        let back = offset_line(&out, -12.0, Projection::WebMercator);
        for (a, b) in line.iter().zip(&back) {
            assert_abs_diff_eq!(a.x, b.x, epsilon = 1e-3);
            assert_abs_diff_eq!(a.y, b.y, epsilon = 1e-3);
        }
    }

    #[test]
    fn both_sides_yields_two_distances() {
        assert_eq!(OffsetSide::Both.signed_distances(-4.0), vec![4.0, -4.0]);
        assert_eq!(OffsetSide::Right.signed_distances(4.0), vec![-4.0]);
    }
}
