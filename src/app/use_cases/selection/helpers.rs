//! Gemeinsame Hilfsfunktionen für Selektionslogik.

use crate::app::events::EditorEvent;
use crate::app::modes::SelectionUpdate;
use crate::core::FeatureId;
use crate::AppState;

/// Setzt die Select-Selektion und wendet alle Folgen an.
///
/// Fehlende Bogen-Kontrollpunkte werden dabei einmalig abgeleitet und
/// gespeichert. Gibt `true` zurück, wenn sich die Selektion geändert hat.
pub fn set_selection(state: &mut AppState, ids: impl IntoIterator<Item = FeatureId>) -> bool {
    let update = state.modes.select.set_selection(&state.store, ids);
    apply_selection_update(state, update)
}

pub(crate) fn apply_selection_update(state: &mut AppState, update: SelectionUpdate) -> bool {
    if let Some((id, cps)) = update.repair {
        state
            .store_mut()
            .update(id, |f| f.set_arc_control_points(cps));
        log::info!("Bogen {}: Kontrollpunkte aus Geometrie abgeleitet", id);
    }
    if update.changed {
        emit_selection_changed(state);
    }
    state.sync_interaction_flags();
    update.changed
}

/// Meldet die Selektion des aktiven Modus an den Host und führt
/// Panning/Feature-Drag nach.
pub fn emit_selection_changed(state: &mut AppState) {
    let event = EditorEvent::SelectionChanged {
        mode: state.modes.active(),
        selected: state.active_selection(),
    };
    state.emit(event);
    state.sync_interaction_flags();
}

/// Löscht die aktuelle Selektion explizit.
pub fn clear_selection(state: &mut AppState) -> bool {
    set_selection(state, [])
}

/// Selektiert alle Features.
pub fn select_all(state: &mut AppState) -> bool {
    if !state.modes.select.is_enabled() {
        return false;
    }
    let ids: Vec<FeatureId> = state.store.ids().collect();
    set_selection(state, ids)
}
