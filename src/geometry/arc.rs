//! Kreisbogen durch drei Punkte: Kreis-Fit, Bogen-Sampling und Live-Vorschau.

use glam::DVec2;
use std::f64::consts::TAU;

/// Schwellwert für `|sin(Winkel)|` zwischen den Sehnen p1→p2 und p1→p3,
/// unterhalb dessen die drei Punkte als kollinear gelten.
pub const COLLINEAR_EPSILON: f64 = 1e-9;

/// Ergebnis eines Kreis-Fits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    /// Kreismittelpunkt
    pub center: DVec2,
    /// Radius in Karteneinheiten
    pub radius: f64,
}

/// Bestimmt den Kreis durch drei Punkte.
///
/// Rechnet relativ zu `p1`, damit große projizierte Koordinaten die
/// Determinante nicht auslöschen. Gibt `None` zurück, wenn die Punkte
/// (nahezu) kollinear sind oder zusammenfallen. Der Aufrufer fällt dann
/// auf die Strecke `p1 → p3` zurück.
pub fn fit_circle_through_three_points(p1: DVec2, p2: DVec2, p3: DVec2) -> Option<Circle> {
    let a = p2 - p1;
    let b = p3 - p1;
    let det = 2.0 * a.perp_dot(b);

    let scale = a.length() * b.length();
    if scale <= f64::EPSILON || det.abs() < 2.0 * COLLINEAR_EPSILON * scale {
        return None;
    }

    let a_sq = a.length_squared();
    let b_sq = b.length_squared();
    let offset = DVec2::new(
        (b.y * a_sq - a.y * b_sq) / det,
        (a.x * b_sq - b.x * a_sq) / det,
    );

    Some(Circle {
        center: p1 + offset,
        radius: offset.length(),
    })
}

/// Normalisiert einen Winkel in das Intervall `[0, 2π)`.
pub(crate) fn normalize_angle(angle: f64) -> f64 {
    let a = angle.rem_euclid(TAU);
    // rem_euclid kann bei -0.0 / Rundung exakt TAU liefern
    if a >= TAU {
        0.0
    } else {
        a
    }
}

/// Vorzeichenbehafteter Überstreichwinkel von `p1` nach `p3`, der `p2` enthält.
///
/// Positiv = gegen den Uhrzeigersinn, negativ = im Uhrzeigersinn.
pub fn sweep_angle(circle: &Circle, p1: DVec2, p2: DVec2, p3: DVec2) -> f64 {
    let angle_of = |p: DVec2| normalize_angle((p.y - circle.center.y).atan2(p.x - circle.center.x));
    let a1 = angle_of(p1);
    let a2 = angle_of(p2);
    let a3 = angle_of(p3);

    let ccw_to_end = normalize_angle(a3 - a1);
    let ccw_to_through = normalize_angle(a2 - a1);

    if ccw_to_through < ccw_to_end {
        ccw_to_end
    } else {
        -(TAU - ccw_to_end)
    }
}

/// Sampelt den Kreisbogen `p1 → p2 → p3` in `segments` Teilstücke (`segments + 1` Punkte).
///
/// Erster und letzter Punkt sind exakt `p1` bzw. `p3`. Bei kollinearen
/// Punkten wird die Strecke `[p1, p3]` zurückgegeben.
pub fn generate_arc(p1: DVec2, p2: DVec2, p3: DVec2, segments: usize) -> Vec<DVec2> {
    let Some(circle) = fit_circle_through_three_points(p1, p2, p3) else {
        return vec![p1, p3];
    };

    let segments = segments.max(1);
    let start = (p1.y - circle.center.y).atan2(p1.x - circle.center.x);
    let sweep = sweep_angle(&circle, p1, p2, p3);

    let mut points = Vec::with_capacity(segments + 1);
    points.push(p1);
    for i in 1..segments {
        let angle = start + sweep * (i as f64 / segments as f64);
        points.push(circle.center + circle.radius * DVec2::new(angle.cos(), angle.sin()));
    }
    points.push(p3);
    points
}

/// Live-Vorschau während der Bogen-Eingabe.
///
/// - 0 Klicks: leer
/// - 1 Klick: einzelner Punkt
/// - 2 Klicks: gerade Linie
/// - 3+ Klicks: vollständiger Bogen aus den ersten drei Punkten
pub fn generate_arc_preview(clicked: &[DVec2], segments: usize) -> Vec<DVec2> {
    match clicked {
        [] => Vec::new(),
        [p] => vec![*p],
        [p1, p2] => vec![*p1, *p2],
        [p1, p2, p3, ..] => generate_arc(*p1, *p2, *p3, segments),
    }
}

/// Leitet Kontrollpunkte aus bereits gesampelten Bogenkoordinaten ab (Altdaten-Reparatur).
///
/// Start = erster Punkt, Durchgang = mittleres Sample, Ende = letzter Punkt.
pub fn derive_control_points(coords: &[DVec2]) -> Option<[DVec2; 3]> {
    let (first, last) = (coords.first()?, coords.last()?);
    if coords.len() < 2 {
        return None;
    }
    let through = coords[coords.len() / 2];
    Some([*first, through, *last])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn assert_point_eq(a: DVec2, b: DVec2, eps: f64) {
        assert_abs_diff_eq!(a.x, b.x, epsilon = eps);
        assert_abs_diff_eq!(a.y, b.y, epsilon = eps);
    }

    #[test]
    fn fit_circle_finds_center_and_radius() {
        let circle = fit_circle_through_three_points(
            DVec2::new(0.0, 0.0),
            DVec2::new(10.0, 10.0),
            DVec2::new(20.0, 0.0),
        )
        .expect("nicht kollinear");
        assert_point_eq(circle.center, DVec2::new(10.0, 0.0), 1e-9);
        assert_abs_diff_eq!(circle.radius, 10.0, epsilon = 1e-9);
    }

    #[test]
    fn fit_circle_rejects_collinear_points() {
        assert!(fit_circle_through_three_points(
            DVec2::new(0.0, 0.0),
            DVec2::new(5.0, 5.0),
            DVec2::new(10.0, 10.0),
        )
        .is_none());
    }

    #[test]
    fn fit_circle_handles_large_projected_coordinates() {
        let base = DVec2::new(1_113_194.9, 6_800_125.4);
        let circle = fit_circle_through_three_points(
            base,
            base + DVec2::new(10.0, 10.0),
            base + DVec2::new(20.0, 0.0),
        )
        .expect("nicht kollinear");
        assert_point_eq(circle.center, base + DVec2::new(10.0, 0.0), 1e-6);
    }

    #[test]
    fn generate_arc_passes_through_all_three_points() {
        let p1 = DVec2::new(0.0, 0.0);
        let p2 = DVec2::new(10.0, 10.0);
        let p3 = DVec2::new(20.0, 0.0);
        let arc = generate_arc(p1, p2, p3, 32);

        assert_eq!(arc.len(), 33);
        assert_eq!(arc[0], p1);
        assert_eq!(arc[32], p3);
        // Segmentmitte liegt exakt auf dem Durchgangspunkt
        assert_point_eq(arc[16], p2, 1e-9);
        assert!(arc.iter().all(|p| p.y >= -1e-9), "Bogen wölbt sich nach +Y");
    }

    #[test]
    fn generate_arc_sweeps_clockwise_when_through_point_demands_it() {
        let p1 = DVec2::new(20.0, 0.0);
        let p2 = DVec2::new(10.0, -10.0);
        let p3 = DVec2::new(0.0, 0.0);
        let arc = generate_arc(p1, p2, p3, 16);
        assert!(arc[8].y < -9.9);
    }

    #[test]
    fn generate_arc_major_arc_stays_on_through_side() {
        // Durchgangspunkt auf der "langen" Seite des Kreises
        let p1 = DVec2::new(10.0, 0.0);
        let p2 = DVec2::new(-10.0, 0.0);
        let p3 = DVec2::new(0.0, 10.0);
        let arc = generate_arc(p1, p2, p3, 90);
        assert!(arc.iter().any(|p| p.y < -9.0), "Bogen läuft über die Unterseite");
    }

    #[test]
    fn generate_arc_falls_back_to_segment_for_collinear_input() {
        let p1 = DVec2::new(0.0, 0.0);
        let p3 = DVec2::new(10.0, 0.0);
        let arc = generate_arc(p1, DVec2::new(5.0, 0.0), p3, 32);
        assert_eq!(arc, vec![p1, p3]);
    }

    #[test]
    fn preview_grows_with_click_count() {
        let a = DVec2::new(0.0, 0.0);
        let b = DVec2::new(10.0, 10.0);
        let c = DVec2::new(20.0, 0.0);
        assert!(generate_arc_preview(&[], 8).is_empty());
        assert_eq!(generate_arc_preview(&[a], 8), vec![a]);
        assert_eq!(generate_arc_preview(&[a, b], 8), vec![a, b]);
        assert_eq!(generate_arc_preview(&[a, b, c], 8).len(), 9);
    }

    #[test]
    fn derive_control_points_uses_middle_sample() {
        let arc = generate_arc(
            DVec2::new(0.0, 0.0),
            DVec2::new(10.0, 10.0),
            DVec2::new(20.0, 0.0),
            32,
        );
        let cps = derive_control_points(&arc).expect("genug Punkte");
        assert_eq!(cps[0], DVec2::new(0.0, 0.0));
        assert_point_eq(cps[1], DVec2::new(10.0, 10.0), 1e-9);
        assert_eq!(cps[2], DVec2::new(20.0, 0.0));
        assert!(derive_control_points(&[DVec2::ZERO]).is_none());
    }
}
