//! Revisionswolke: geschlossener Pfad mit gleichmäßig gewölbten Bögen als Kanten.

use super::measure::{polyline_length, signed_ring_area};
use glam::DVec2;

/// Abstand, unter dem erster und letzter Punkt als identisch gelten.
pub const CLOSE_EPSILON: f64 = 1e-6;
/// Minimale Punktanzahl des Eingabepfads.
pub const MIN_PATH_POINTS: usize = 3;
/// Standard-Wölbung relativ zur Sehnenlänge.
pub const DEFAULT_BULGE_RATIO: f64 = 0.3;
/// Standard-Anzahl Teilstücke pro Bogen.
pub const DEFAULT_ARC_SAMPLES: usize = 8;

/// Parameter für die Wolkenerzeugung.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CloudParams {
    /// Ziel-Sehnenlänge eines einzelnen Bogens
    pub arc_length: f64,
    /// Abstand des Bezier-Kontrollpunkts von der Sehne, relativ zur Sehnenlänge
    pub bulge_ratio: f64,
    /// Teilstücke pro Bogen
    pub arc_samples: usize,
}

impl CloudParams {
    /// Parameter mit Standard-Wölbung und -Sampling.
    pub fn with_arc_length(arc_length: f64) -> Self {
        Self {
            arc_length,
            bulge_ratio: DEFAULT_BULGE_RATIO,
            arc_samples: DEFAULT_ARC_SAMPLES,
        }
    }
}

/// Erzeugt eine Revisionswolke mit Standard-Wölbung.
pub fn generate_revision_cloud(path: &[DVec2], target_arc_length: f64) -> Vec<DVec2> {
    generate_revision_cloud_with(path, &CloudParams::with_arc_length(target_arc_length))
}

/// Erzeugt eine Revisionswolke aus einem (Freihand-)Pfad.
///
/// Pfade mit weniger als [`MIN_PATH_POINTS`] Punkten werden unverändert
/// zurückgegeben. Das Ergebnis ist immer ein geschlossener Ring.
pub fn generate_revision_cloud_with(path: &[DVec2], params: &CloudParams) -> Vec<DVec2> {
    if path.len() < MIN_PATH_POINTS {
        return path.to_vec();
    }

    let ring = close_path(path);
    if params.arc_length <= 0.0 || polyline_length(&ring) <= CLOSE_EPSILON {
        return ring;
    }

    let mut chords = resample_closed(&ring, params.arc_length);
    if chords.len() < 4 {
        // Umfang kürzer als drei Bögen: Originalecken als Sehnen verwenden
        chords = ring.clone();
    }

    // Gegen den Uhrzeigersinn liegt "außen" rechts der Laufrichtung
    let ccw = signed_ring_area(&chords) > 0.0;
    let samples = params.arc_samples.max(2);

    let mut cloud = Vec::with_capacity((chords.len() - 1) * samples + 1);
    for (i, pair) in chords.windows(2).enumerate() {
        let (a, b) = (pair[0], pair[1]);
        let chord = b - a;
        let len = chord.length();
        if len <= f64::EPSILON {
            continue;
        }
        let dir = chord / len;
        let outward = if ccw {
            DVec2::new(dir.y, -dir.x)
        } else {
            DVec2::new(-dir.y, dir.x)
        };
        let control = (a + b) * 0.5 + outward * (params.bulge_ratio * len);

        let first = if i == 0 || cloud.is_empty() { 0 } else { 1 };
        for s in first..=samples {
            let t = s as f64 / samples as f64;
            cloud.push(quadratic_bezier(a, control, b, t));
        }
    }

    if cloud.is_empty() {
        return ring;
    }
    if let (Some(first), Some(last)) = (cloud.first().copied(), cloud.last_mut()) {
        *last = first;
    }
    cloud
}

/// Anzahl paarweise verschiedener Punkte, gezählt bis `limit`.
pub fn distinct_points(path: &[DVec2], limit: usize) -> usize {
    let mut seen: Vec<DVec2> = Vec::with_capacity(limit);
    for &p in path {
        if seen.len() >= limit {
            break;
        }
        if seen.iter().all(|q| q.distance(p) >= CLOSE_EPSILON) {
            seen.push(p);
        }
    }
    seen.len()
}

/// Schließt den Pfad: Endpunkt auf Startpunkt ziehen oder Startpunkt anhängen.
fn close_path(path: &[DVec2]) -> Vec<DVec2> {
    let mut ring = path.to_vec();
    let first = path[0];
    match ring.last_mut() {
        Some(last) if last.distance(first) < CLOSE_EPSILON => *last = first,
        _ => ring.push(first),
    }
    ring
}

/// Verteilt Punkte im Abstand `step` entlang des geschlossenen Rings (Bogenlängen-Lauf).
///
/// Der Rest jeder Kante wird in die nächste übertragen. Der letzte Punkt
/// ist wieder der Startpunkt.
fn resample_closed(ring: &[DVec2], step: f64) -> Vec<DVec2> {
    let mut out = vec![ring[0]];
    let mut carried = 0.0;

    for pair in ring.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let seg_len = a.distance(b);
        if seg_len <= f64::EPSILON {
            continue;
        }
        let mut along = step - carried;
        while along <= seg_len {
            out.push(a + (b - a) * (along / seg_len));
            along += step;
        }
        carried = seg_len - (along - step);
    }

    let start = ring[0];
    let n = out.len();
    match out.last_mut() {
        // Letzter Teilpunkt fällt (fast) auf den Start: nur schließen
        Some(last) if n > 1 && last.distance(start) < step * 0.5 => *last = start,
        _ => out.push(start),
    }
    out
}

fn quadratic_bezier(p0: DVec2, p1: DVec2, p2: DVec2, t: f64) -> DVec2 {
    let inv = 1.0 - t;
    inv * inv * p0 + 2.0 * inv * t * p1 + t * t * p2
}
