//! Orthogonal-Fang: Segmente auf die nächste 90°-Richtung einrasten.

use glam::DVec2;

/// Rastet `target` auf die nächste Achsrichtung ab `reference` ein.
///
/// Quadrantengrenzen liegen bei 45°/135°/225°/315°; der Abstand zum
/// Referenzpunkt bleibt erhalten. Bei Nullabstand kommt `target` unverändert zurück.
pub fn constrain_to_orthogonal(reference: DVec2, target: DVec2) -> DVec2 {
    let delta = target - reference;
    let distance = delta.length();
    if distance <= f64::EPSILON {
        return target;
    }

    let degrees = delta.y.atan2(delta.x).to_degrees().rem_euclid(360.0);
    let axis = if !(45.0..315.0).contains(&degrees) {
        DVec2::X
    } else if degrees < 135.0 {
        DVec2::Y
    } else if degrees < 225.0 {
        DVec2::NEG_X
    } else {
        DVec2::NEG_Y
    };

    reference + axis * distance
}

/// Wendet die pro Segment eingefrorenen Ortho-Flags auf einen Pfad an.
///
/// `flags[i]` gilt für das Segment `points[i] → points[i + 1]`. Jedes
/// Segment rastet relativ zu seinem (bereits eingerasteten) Startpunkt ein.
/// Fehlende Flags zählen als frei.
pub fn apply_ortho_segments(points: &[DVec2], flags: &[bool]) -> Vec<DVec2> {
    let mut out: Vec<DVec2> = Vec::with_capacity(points.len());
    for (i, &p) in points.iter().enumerate() {
        let next = match out.last() {
            Some(&anchor) if flags.get(i - 1).copied().unwrap_or(false) => {
                constrain_to_orthogonal(anchor, p)
            }
            _ => p,
        };
        out.push(next);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn snaps_to_nearest_axis_keeping_distance() {
        let r = DVec2::new(1.0, 1.0);
        let snapped = constrain_to_orthogonal(r, DVec2::new(4.0, 2.0));
        assert_abs_diff_eq!(snapped.y, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(snapped.x, 1.0 + 10f64.sqrt(), epsilon = 1e-12);

        let up = constrain_to_orthogonal(DVec2::ZERO, DVec2::new(-1.0, 5.0));
        assert_eq!(up.x, 0.0);
        assert!(up.y > 0.0);

        let left = constrain_to_orthogonal(DVec2::ZERO, DVec2::new(-5.0, -1.0));
        assert_eq!(left.y, 0.0);
        assert!(left.x < 0.0);

        let down = constrain_to_orthogonal(DVec2::ZERO, DVec2::new(1.0, -5.0));
        assert_eq!(down.x, 0.0);
        assert!(down.y < 0.0);
    }

    #[test]
    fn zero_distance_returns_target() {
        let p = DVec2::new(3.0, 3.0);
        assert_eq!(constrain_to_orthogonal(p, p), p);
    }

    #[test]
    fn mixed_flags_constrain_only_flagged_segments() {
        let points = [
            DVec2::new(0.0, 0.0),
            DVec2::new(10.0, 1.0),
            DVec2::new(14.0, 7.0),
            DVec2::new(15.0, 17.0),
        ];
        let out = apply_ortho_segments(&points, &[true, false, true]);

        // Segment 1: horizontal ab (0,0)
        assert_abs_diff_eq!(out[1].y, 0.0, epsilon = 1e-12);
        // Segment 2: frei
        assert_eq!(out[2], points[2]);
        // Segment 3: vertikal ab dem Anker out[2]
        assert_abs_diff_eq!(out[3].x, out[2].x, epsilon = 1e-12);
        assert!(out[3].y > out[2].y);
    }
}
