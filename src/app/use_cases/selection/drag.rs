//! Use-Case: Drag im Select-Modus (Stützpunkt, Verschieben, Bogen-Griff).

use crate::app::events::EditorEvent;
use crate::app::modes::DragOutcome;
use crate::app::use_cases::editing::update_measure_length;
use crate::AppState;
use glam::DVec2;
use std::sync::Arc;

/// Startet einen Drag, falls unter `world_pos` ein Ziel liegt.
///
/// Der Undo-Snapshot wird einmal zu Drag-Beginn aufgenommen.
pub fn begin_select_drag(state: &mut AppState, world_pos: DVec2, tolerance: f64) -> bool {
    if !state.view.feature_drag_enabled {
        log::debug!("Select-Drag ignoriert: keine Selektion");
        return false;
    }
    let Some(target) = state
        .modes
        .select
        .pick_drag_target(&state.store, world_pos, tolerance)
    else {
        log::debug!("Select-Drag: kein Ziel unter dem Zeiger");
        return false;
    };

    state.record_undo_snapshot();
    state
        .modes
        .select
        .begin_drag(Arc::make_mut(&mut state.store), target, world_pos)
}

pub fn update_select_drag(state: &mut AppState, world_pos: DVec2) -> bool {
    if !state.modes.select.is_dragging() {
        return false;
    }
    state
        .modes
        .select
        .drag(Arc::make_mut(&mut state.store), world_pos)
}

/// Beendet den Drag. Messlinien bekommen ihre Länge neu berechnet.
pub fn end_select_drag(state: &mut AppState) {
    let features = match state.modes.select.end_drag() {
        DragOutcome::None => return,
        DragOutcome::Modified(id) | DragOutcome::ControlPointMoved(id) => vec![id],
        DragOutcome::Translated(ids) => ids,
    };
    let projection = state.options.projection;
    for &id in &features {
        update_measure_length(state.store_mut(), id, projection);
    }
    state.emit(EditorEvent::FeaturesModified { features });
}
