//! Affine Transformationen für den Transform-Modus.

use super::hit_test::rotate_point;
use glam::DVec2;

/// Minimaler Skalierungsfaktor, damit eine Geometrie nicht auf Null kollabiert.
pub const MIN_SCALE: f64 = 1e-3;

/// Eine auf einzelne Koordinaten anwendbare Transformation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AffineTransform {
    /// Verschieben um einen Vektor
    Translate(DVec2),
    /// Drehen um einen Ursprung (Radiant, gegen den Uhrzeigersinn)
    Rotate { origin: DVec2, angle: f64 },
    /// Achsweise skalieren relativ zu einem Ursprung
    Scale { origin: DVec2, factors: DVec2 },
}

impl AffineTransform {
    /// Identität.
    pub const IDENTITY: Self = AffineTransform::Translate(DVec2::ZERO);

    /// Wendet die Transformation auf einen Punkt an.
    pub fn apply(&self, p: DVec2) -> DVec2 {
        match *self {
            AffineTransform::Translate(delta) => p + delta,
            AffineTransform::Rotate { origin, angle } => rotate_point(p, origin, angle),
            AffineTransform::Scale { origin, factors } => origin + (p - origin) * factors,
        }
    }

    /// Gleichmäßige Skalierung aus der Abstandsänderung eines Griffs zum Ursprung.
    pub fn uniform_scale(origin: DVec2, grabbed: DVec2, current: DVec2) -> Self {
        let before = grabbed.distance(origin);
        let factor = if before <= f64::EPSILON {
            1.0
        } else {
            (current.distance(origin) / before).max(MIN_SCALE)
        };
        AffineTransform::Scale {
            origin,
            factors: DVec2::splat(factor),
        }
    }

    /// Einachsige Streckung entlang `axis` (Einheitsvektor X oder Y).
    pub fn stretch(origin: DVec2, axis: DVec2, grabbed: DVec2, current: DVec2) -> Self {
        let before = (grabbed - origin).dot(axis);
        let factor = if before.abs() <= f64::EPSILON {
            1.0
        } else {
            let f = (current - origin).dot(axis) / before;
            if f.abs() < MIN_SCALE {
                MIN_SCALE.copysign(f)
            } else {
                f
            }
        };
        let factors = DVec2::ONE + axis.abs() * (factor - 1.0);
        AffineTransform::Scale { origin, factors }
    }

    /// Drehung um `origin` von der Griffrichtung zur aktuellen Zeigerrichtung.
    pub fn rotation(origin: DVec2, grabbed: DVec2, current: DVec2) -> Self {
        let a = grabbed - origin;
        let b = current - origin;
        let angle = if a.length_squared() <= f64::EPSILON || b.length_squared() <= f64::EPSILON {
            0.0
        } else {
            a.perp_dot(b).atan2(a.dot(b))
        };
        AffineTransform::Rotate { origin, angle }
    }
}
