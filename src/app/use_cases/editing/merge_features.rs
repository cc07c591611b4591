//! Use-Case: Stützpunkt-Drag im Merge-Modus und Zusammenführen zweier Linien.

use super::measure::update_measure_length;
use crate::app::events::EditorEvent;
use crate::app::modes::MergeCandidate;
use crate::app::use_cases::selection::emit_selection_changed;
use crate::app::AppState;
use crate::core::{Feature, Geometry};
use crate::geometry::merge_lines;
use glam::DVec2;
use std::sync::Arc;

pub fn begin_merge_drag(state: &mut AppState, world_pos: DVec2, tolerance: f64) -> bool {
    let Some(pick) = state.modes.merge.pick_vertex(&state.store, world_pos, tolerance) else {
        return false;
    };
    state.record_undo_snapshot();
    state
        .modes
        .merge
        .begin_drag(Arc::make_mut(&mut state.store), pick)
}

pub fn update_merge_drag(state: &mut AppState, world_pos: DVec2) -> bool {
    if !state.modes.merge.is_dragging() {
        return false;
    }
    state
        .modes
        .merge
        .drag(Arc::make_mut(&mut state.store), world_pos)
}

/// Modify-Ende im Merge-Modus: meldet einen Merge-Kandidaten an den Host.
pub fn end_merge_drag(state: &mut AppState) {
    let tolerance = state.options.merge_tolerance;
    let (moved, candidate) = state.modes.merge.end_drag(&state.store, tolerance);
    let Some(moved) = moved else {
        return;
    };
    let projection = state.options.projection;
    update_measure_length(state.store_mut(), moved, projection);
    state.emit(EditorEvent::FeaturesModified {
        features: vec![moved],
    });
    if let Some(candidate) = candidate {
        log::info!(
            "Merge-Kandidat: {} ({:?}) + {} ({:?}), Abstand {:.2}",
            candidate.feature_a,
            candidate.end_a,
            candidate.feature_b,
            candidate.end_b,
            candidate.distance
        );
        state.emit(EditorEvent::MergeRequested { candidate });
    }
}

/// Führt zwei Linien zusammen (nach Bestätigung durch den Host).
///
/// Das Ergebnis übernimmt die Properties von `feature_a` und ersetzt beide
/// Originale atomar.
pub fn apply_merge(state: &mut AppState, candidate: MergeCandidate) -> bool {
    if state.store.len() < 2 || candidate.feature_a == candidate.feature_b {
        log::debug!("Merge: weniger als zwei Features");
        return false;
    }
    let (Some(a), Some(b)) = (
        state.store.get(candidate.feature_a).filter(|f| f.is_mergeable()),
        state.store.get(candidate.feature_b).filter(|f| f.is_mergeable()),
    ) else {
        log::warn!(
            "Merge abgebrochen: {} oder {} fehlt oder ist nicht zusammenführbar",
            candidate.feature_a,
            candidate.feature_b
        );
        return false;
    };
    let (Some(coords_a), Some(coords_b)) = (a.line_coords(), b.line_coords()) else {
        return false;
    };
    // Enden können sich seit der Anfrage bewegt haben
    let gap = match (candidate.end_a.of(coords_a), candidate.end_b.of(coords_b)) {
        (Some(pa), Some(pb)) => pa.distance(pb),
        _ => f64::INFINITY,
    };
    if gap > state.options.merge_tolerance {
        log::warn!(
            "Merge abgebrochen: Enden von {} und {} liegen {} auseinander",
            candidate.feature_a,
            candidate.feature_b,
            gap
        );
        return false;
    }
    let merged = Feature::new(
        0,
        Geometry::LineString(merge_lines(coords_a, candidate.end_a, coords_b, candidate.end_b)),
        a.properties.clone(),
    );

    // Snapshot VOR Mutation
    state.record_undo_snapshot();

    let removed = vec![candidate.feature_a, candidate.feature_b];
    let Some(added) = state.store_mut().replace(&removed, vec![merged]) else {
        return false;
    };
    let projection = state.options.projection;
    for &id in &added {
        update_measure_length(state.store_mut(), id, projection);
    }
    if state.modes.merge.retain_existing(&state.store) {
        emit_selection_changed(state);
    }
    log::info!("Features {:?} zusammengeführt zu {:?}", removed, added);
    state.emit(EditorEvent::FeaturesReplaced { removed, added });
    true
}
