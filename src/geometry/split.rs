//! Teilen einer Linie am nächstgelegenen Punkt.

use super::hit_test::closest_point_on_polyline;
use glam::DVec2;

/// Punkte näher als dieser Abstand gelten als identisch.
const SPLIT_EPSILON: f64 = 1e-9;

/// Teilt `coords` am Punkt der Linie, der `at` am nächsten liegt.
///
/// Gibt `None` zurück, wenn der Teilungspunkt auf einem Linienende liegt
/// oder die Linie zu kurz ist. Beide Teile haben sonst mindestens zwei Punkte
/// und teilen sich den Teilungspunkt.
pub fn split_line_at(coords: &[DVec2], at: DVec2) -> Option<(Vec<DVec2>, Vec<DVec2>)> {
    if coords.len() < 2 {
        return None;
    }
    let hit = closest_point_on_polyline(at, coords)?;
    let split = hit.point;

    let (first, last) = (coords[0], coords[coords.len() - 1]);
    if split.distance(first) < SPLIT_EPSILON || split.distance(last) < SPLIT_EPSILON {
        return None;
    }

    let mut head: Vec<DVec2> = coords[..=hit.segment].to_vec();
    if split.distance(coords[hit.segment]) >= SPLIT_EPSILON {
        head.push(split);
    }

    let next = coords[hit.segment + 1];
    let mut tail = Vec::with_capacity(coords.len() - hit.segment);
    if split.distance(next) >= SPLIT_EPSILON {
        tail.push(split);
    }
    tail.extend_from_slice(&coords[hit.segment + 1..]);

    if head.len() < 2 || tail.len() < 2 {
        return None;
    }
    Some((head, tail))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line() -> Vec<DVec2> {
        vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(10.0, 0.0),
            DVec2::new(20.0, 0.0),
        ]
    }

    #[test]
    fn split_inside_segment_inserts_shared_point() {
        let (head, tail) = split_line_at(&line(), DVec2::new(5.0, 1.0)).expect("teilbar");
        assert_eq!(head, vec![DVec2::new(0.0, 0.0), DVec2::new(5.0, 0.0)]);
        assert_eq!(
            tail,
            vec![
                DVec2::new(5.0, 0.0),
                DVec2::new(10.0, 0.0),
                DVec2::new(20.0, 0.0)
            ]
        );
    }

    #[test]
    fn split_on_interior_vertex_shares_vertex() {
        let (head, tail) = split_line_at(&line(), DVec2::new(10.0, 0.0)).expect("teilbar");
        assert_eq!(head.last(), Some(&DVec2::new(10.0, 0.0)));
        assert_eq!(tail.first(), Some(&DVec2::new(10.0, 0.0)));
        assert_eq!(head.len() + tail.len(), 4);
    }

    #[test]
    fn split_on_endpoint_is_rejected() {
        assert!(split_line_at(&line(), DVec2::new(-3.0, 0.0)).is_none());
        assert!(split_line_at(&line(), DVec2::new(20.0, 0.0)).is_none());
    }
}
