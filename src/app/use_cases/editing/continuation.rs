//! Use-Case: Endpunkt-Fortsetzung starten, abschließen oder verwerfen.

use super::measure::update_measure_length;
use crate::app::events::EditorEvent;
use crate::app::AppState;
use crate::core::FeatureId;
use crate::geometry::LineEnd;
use glam::DVec2;

/// Startet eine Fortsetzungs-Sitzung am gegebenen Linienende.
pub fn start_continuation(state: &mut AppState, feature: FeatureId, endpoint: LineEnd, anchor: DVec2) {
    if !state.modes.select.is_enabled() {
        return;
    }
    state
        .modes
        .select
        .start_continuation(feature, endpoint, anchor);
    state.editor.preview = None;
}

/// Verlängert das Original-Feature um die neuen Punkte (ein Undo-Schritt).
pub fn complete_continuation(state: &mut AppState) -> bool {
    let Some(session) = state.modes.select.take_continuation() else {
        return false;
    };
    state.editor.preview = None;
    if !session.has_new_points() {
        log::debug!("Fortsetzung ohne neue Punkte beendet");
        return false;
    }

    let feature = session.feature;
    let added = session.new_points().len();
    state.record_undo_snapshot();
    if !session.commit(state.store_mut()) {
        return false;
    }
    let projection = state.options.projection;
    update_measure_length(state.store_mut(), feature, projection);
    state.emit(EditorEvent::ContinuationComplete { feature });
    log::info!("Feature {} um {} Punkt(e) verlängert", feature, added);
    true
}

/// Verwirft die Sitzung ohne das Original zu verändern.
pub fn cancel_continuation(state: &mut AppState) -> bool {
    let cancelled = state.modes.select.take_continuation().is_some();
    if cancelled {
        state.editor.preview = None;
        log::debug!("Fortsetzung abgebrochen");
    }
    cancelled
}
