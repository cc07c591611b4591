//! Use-Case: Transform-Drag (Verschieben, Drehen, Skalieren, Strecken).

use super::measure::update_measure_length;
use crate::app::events::EditorEvent;
use crate::app::AppState;
use glam::DVec2;
use std::sync::Arc;

/// Startet einen Transform-Drag am Griff unter dem Zeiger.
pub fn begin_transform(state: &mut AppState, world_pos: DVec2, tolerance: f64) -> bool {
    let offset = state.rotate_handle_offset();
    let Some(handle) = state
        .modes
        .transform
        .pick_handle(&state.store, world_pos, tolerance, offset)
    else {
        return false;
    };
    state.record_undo_snapshot();
    state.modes.transform.begin(&state.store, handle, world_pos)
}

pub fn update_transform(state: &mut AppState, world_pos: DVec2) -> bool {
    if !state.modes.transform.is_transforming() {
        return false;
    }
    state
        .modes
        .transform
        .update(Arc::make_mut(&mut state.store), world_pos)
}

pub fn end_transform(state: &mut AppState) {
    let Some(id) = state.modes.transform.end() else {
        return;
    };
    let projection = state.options.projection;
    update_measure_length(state.store_mut(), id, projection);
    state.emit(EditorEvent::FeaturesModified { features: vec![id] });
}

/// Bricht den Drag ab (Escape) und stellt die Ausgangsgeometrie wieder her.
pub fn cancel_transform(state: &mut AppState) -> bool {
    if !state.modes.transform.is_transforming() {
        return false;
    }
    let restored = state
        .modes
        .transform
        .cancel(Arc::make_mut(&mut state.store));
    if restored {
        log::debug!("Transform abgebrochen");
    }
    restored
}
