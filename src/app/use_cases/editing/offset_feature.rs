//! Use-Case: Parallelversatz anfragen und anwenden.

use super::measure::update_measure_length;
use crate::app::events::EditorEvent;
use crate::app::AppState;
use crate::core::{FeatureId, Geometry};
use crate::geometry::{offset_line, OffsetSide};
use glam::DVec2;

/// Klick im Offset-Modus: meldet das getroffene Feature an den Host-Dialog.
pub fn request_offset(state: &mut AppState, world_pos: DVec2, tolerance: f64) -> bool {
    let Some(feature) = state.modes.offset.request_at(&state.store, world_pos, tolerance) else {
        log::debug!("Offset: keine Linie getroffen");
        return false;
    };
    state.emit(EditorEvent::OffsetRequested { feature });
    true
}

/// Erzeugt die versetzte(n) Linie(n). Bei `Both` entstehen zwei Features.
///
/// Bogen-Tags werden nicht übernommen, da das Ergebnis kein Kreisbogen mehr ist.
pub fn apply_offset(
    state: &mut AppState,
    feature: FeatureId,
    side: OffsetSide,
    distance: f64,
) -> Vec<FeatureId> {
    state.modes.offset.take_pending();
    let Some(source) = state.store.get(feature).filter(|f| f.is_offsettable()) else {
        log::warn!("Offset: Feature {} fehlt oder ist keine Linie", feature);
        return Vec::new();
    };
    let Some(coords) = source.line_coords() else {
        return Vec::new();
    };
    let projection = state.options.projection;
    let created: Vec<(Geometry, _)> = side
        .signed_distances(distance)
        .into_iter()
        .map(|d| {
            (
                Geometry::LineString(offset_line(coords, d, projection)),
                source.properties_without_arc(),
            )
        })
        .collect();

    // Snapshot VOR Mutation
    state.record_undo_snapshot();

    let mut ids = Vec::with_capacity(created.len());
    for (geometry, properties) in created {
        let id = state.store_mut().add(geometry, properties);
        update_measure_length(state.store_mut(), id, projection);
        state.emit(EditorEvent::FeatureCreated { feature: id });
        ids.push(id);
    }
    log::info!("Offset von Feature {} ({:?}, {} m): {:?}", feature, side, distance, ids);
    ids
}
