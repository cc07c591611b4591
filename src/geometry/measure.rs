//! Längen- und Flächenmaße für Linien und Ringe.

use super::Projection;
use glam::DVec2;

/// Planare Länge einer Polylinie in Karteneinheiten.
pub fn polyline_length(coords: &[DVec2]) -> f64 {
    coords.windows(2).map(|w| w[0].distance(w[1])).sum()
}

/// Länge einer Polylinie in Metern.
///
/// Jedes Segment wird mit dem Maßstab an seinem Mittelpunkt umgerechnet.
pub fn polyline_length_meters(coords: &[DVec2], projection: Projection) -> f64 {
    coords
        .windows(2)
        .map(|w| {
            let mid = (w[0] + w[1]) * 0.5;
            projection.units_to_meters(w[0].distance(w[1]), mid)
        })
        .sum()
}

/// Vorzeichenbehaftete Ringfläche (Shoelace). Positiv = gegen den Uhrzeigersinn.
///
/// Funktioniert für offene und geschlossene Ringe.
pub fn signed_ring_area(ring: &[DVec2]) -> f64 {
    if ring.len() < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..ring.len() {
        let a = ring[i];
        let b = ring[(i + 1) % ring.len()];
        sum += a.perp_dot(b);
    }
    sum * 0.5
}
