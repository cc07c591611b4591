//! Use-Case: Rechteck-Selektion per Drag-Box.

use super::helpers::set_selection;
use crate::core::{FeatureId, FeatureStore};
use crate::geometry::{rotate_point, Extent};
use crate::AppState;
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Welche Features eine Drag-Box erfasst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoxSelectMode {
    /// Alle Features, die die Box berühren oder schneiden
    Intersecting,
    /// Nur Features, die vollständig in der Box liegen
    Contained,
}

impl BoxSelectMode {
    /// Richtung auf dem Bildschirm: nach oben gezogen (Y nimmt ab) = schneidend,
    /// nach unten = enthalten.
    pub fn from_screen_drag(start_y: f64, end_y: f64) -> Self {
        if end_y < start_y {
            BoxSelectMode::Intersecting
        } else {
            BoxSelectMode::Contained
        }
    }
}

/// Features, die die Box zwischen den gegenüberliegenden Ecken `a` und `b` erfasst.
///
/// Die Box ist im Bildschirm achsparallel; bei gedrehter Karte (`rotation` in
/// Radiant) liegt sie in Kartenkoordinaten schräg. Mit `compensate` werden Box
/// und Geometrien für die Enthalten-Prüfung in den ungedrehten Rahmen gebracht,
/// sonst gilt das umschließende Karten-Rechteck.
pub fn features_in_box(
    store: &FeatureStore,
    a: DVec2,
    b: DVec2,
    mode: BoxSelectMode,
    rotation: f64,
    compensate: bool,
) -> Vec<FeatureId> {
    let center = (a + b) * 0.5;
    let unrotated = Extent::from_corners(
        rotate_point(a, center, -rotation),
        rotate_point(b, center, -rotation),
    );
    let world_corners = unrotated.corners().map(|c| rotate_point(c, center, rotation));
    let Some(bounding) = Extent::from_points(world_corners.iter()) else {
        return Vec::new();
    };

    store
        .iter()
        .filter(|feature| {
            let geometry = feature.geometry();
            match mode {
                BoxSelectMode::Intersecting => geometry.intersects_extent(&bounding),
                BoxSelectMode::Contained if compensate => {
                    let vertices = geometry.vertices();
                    !vertices.is_empty()
                        && vertices
                            .into_iter()
                            .all(|v| unrotated.contains_point(rotate_point(v, center, -rotation)))
                }
                BoxSelectMode::Contained => {
                    let vertices = geometry.vertices();
                    !vertices.is_empty() && vertices.into_iter().all(|v| bounding.contains_point(v))
                }
            }
        })
        .map(|feature| feature.id)
        .collect()
}

/// Ergänzt die Select-Selektion um die Features der Drag-Box.
pub fn select_in_box(state: &mut AppState, a: DVec2, b: DVec2, mode: BoxSelectMode) -> bool {
    if !state.modes.select.is_enabled() {
        return false;
    }
    let found = features_in_box(
        &state.store,
        a,
        b,
        mode,
        state.view.rotation,
        state.options.drag_box_rotation_compensation,
    );
    log::debug!("Drag-Box ({:?}): {} Feature(s)", mode, found.len());
    let next: Vec<FeatureId> = state
        .modes
        .select
        .selection()
        .iter()
        .copied()
        .chain(found)
        .collect();
    set_selection(state, next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Geometry, Properties};
    use std::f64::consts::FRAC_PI_4;

    fn store() -> (FeatureStore, FeatureId, FeatureId) {
        let mut store = FeatureStore::new();
        let inside = store.add(
            Geometry::LineString(vec![DVec2::new(1.0, 1.0), DVec2::new(4.0, 4.0)]),
            Properties::new(),
        );
        let crossing = store.add(
            Geometry::LineString(vec![DVec2::new(5.0, 5.0), DVec2::new(20.0, 5.0)]),
            Properties::new(),
        );
        (store, inside, crossing)
    }

    #[test]
    fn screen_direction_selects_mode() {
        assert_eq!(BoxSelectMode::from_screen_drag(100.0, 20.0), BoxSelectMode::Intersecting);
        assert_eq!(BoxSelectMode::from_screen_drag(20.0, 100.0), BoxSelectMode::Contained);
    }

    #[test]
    fn intersecting_includes_crossing_features() {
        let (store, inside, crossing) = store();
        let hits = features_in_box(
            &store,
            DVec2::ZERO,
            DVec2::new(10.0, 10.0),
            BoxSelectMode::Intersecting,
            0.0,
            true,
        );
        assert_eq!(hits, vec![inside, crossing]);
    }

    #[test]
    fn contained_excludes_crossing_features() {
        let (store, inside, _) = store();
        let hits = features_in_box(
            &store,
            DVec2::ZERO,
            DVec2::new(10.0, 10.0),
            BoxSelectMode::Contained,
            0.0,
            true,
        );
        assert_eq!(hits, vec![inside]);
    }

    #[test]
    fn rotation_compensation_uses_screen_aligned_box() {
        let mut store = FeatureStore::new();
        // Liegt im umschließenden Rechteck, aber außerhalb der gedrehten Box
        let corner = store.add(Geometry::Point(DVec2::new(1.0, 4.0)), Properties::new());
        let center = store.add(Geometry::Point(DVec2::new(5.0, 0.0)), Properties::new());

        // Bei 45 Grad wird die Bildschirm-Box zur Raute (0,0) (5,-5) (10,0) (5,5)
        let a = DVec2::new(0.0, 0.0);
        let b = DVec2::new(10.0, 0.0);
        let compensated =
            features_in_box(&store, a, b, BoxSelectMode::Contained, FRAC_PI_4, true);
        assert_eq!(compensated, vec![center]);

        let plain = features_in_box(&store, a, b, BoxSelectMode::Contained, FRAC_PI_4, false);
        assert_eq!(plain, vec![corner, center]);
    }
}
