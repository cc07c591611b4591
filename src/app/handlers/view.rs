//! Handler für Ansicht, Ortho-Modus und das Laden eines Feature-Bestands.

use crate::app::use_cases::selection;
use crate::app::AppState;
use crate::core::{FeatureCollection, FeatureStore};
use std::sync::Arc;

/// Übernimmt Auflösung und Drehung der Karte vom Host.
pub fn set_view(state: &mut AppState, resolution: f64, rotation: f64) {
    if resolution.is_finite() && resolution > 0.0 {
        state.view.resolution = resolution;
    } else {
        log::warn!("Ungültige Auflösung {} ignoriert", resolution);
    }
    if rotation.is_finite() {
        state.view.rotation = rotation;
    }
    let resolution = state.view.resolution;
    if let Some(tool) = state.editor.tool_manager.active_tool_mut() {
        tool.configure(&state.options, resolution);
    }
}

/// Ortho-Modus umschalten. Wirkt nur auf das gerade offene Segment.
pub fn set_ortho_mode(state: &mut AppState, enabled: bool) {
    state.editor.ortho_enabled = enabled;
    log::debug!("Ortho-Modus: {}", enabled);
}

/// Ersetzt den gesamten Bestand. History und Selektion werden verworfen.
pub fn load_features(state: &mut AppState, collection: FeatureCollection) {
    if let Some(tool) = state.editor.tool_manager.active_tool_mut() {
        tool.reset();
    }
    state.modes.select.take_continuation();
    state.editor.preview = None;

    state.store = Arc::new(FeatureStore::from_collection(collection));
    state.history.clear();

    if state.modes.select.is_enabled() {
        selection::set_selection(state, []);
    }
    if state.modes.retain_existing(&state.store) {
        selection::emit_selection_changed(state);
    }
    state.sync_interaction_flags();
    log::info!("{} Features geladen", state.store.len());
}
