//! Projektionsmodell für Meter ↔ Karteneinheiten (nur soweit Offset und Messung es brauchen).

use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;

/// Erdradius der spharischen Mercator-Projektion (EPSG:3857).
pub const EARTH_RADIUS: f64 = 6_378_137.0;

/// Projektion der Kartenkoordinaten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Projection {
    /// Sphärisches Mercator: Maßstab wächst mit `1 / cos(Breite)`
    #[default]
    WebMercator,
    /// Karteneinheiten sind bereits Meter
    Planar,
}

impl Projection {
    /// Geografische Breite (Radiant) zur projizierten Y-Koordinate.
    pub fn latitude_at(&self, y: f64) -> f64 {
        match self {
            Projection::WebMercator => 2.0 * (y / EARTH_RADIUS).exp().atan() - FRAC_PI_2,
            Projection::Planar => 0.0,
        }
    }

    /// Karteneinheiten pro Meter an der gegebenen Position.
    pub fn scale_factor(&self, at: DVec2) -> f64 {
        match self {
            Projection::WebMercator => 1.0 / self.latitude_at(at.y).cos().max(1e-12),
            Projection::Planar => 1.0,
        }
    }

    /// Rechnet eine Meterstrecke an `at` in Karteneinheiten um.
    pub fn meters_to_units(&self, meters: f64, at: DVec2) -> f64 {
        meters * self.scale_factor(at)
    }

    /// Rechnet Karteneinheiten an `at` in Meter um.
    pub fn units_to_meters(&self, units: f64, at: DVec2) -> f64 {
        units / self.scale_factor(at)
    }
}
