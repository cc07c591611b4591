//! Use-Case: Selektierte Features löschen.

use crate::app::events::EditorEvent;
use crate::app::use_cases::selection::set_selection;
use crate::app::AppState;
use crate::core::FeatureId;

/// Löscht alle selektierten Features (ein Undo-Schritt).
pub fn delete_selected_features(state: &mut AppState) {
    let ids: Vec<FeatureId> = state.modes.select.selection().iter().copied().collect();
    if ids.is_empty() {
        log::debug!("Nichts zum Löschen selektiert");
        return;
    }

    // Snapshot VOR Mutation
    state.record_undo_snapshot();

    let store = state.store_mut();
    let deleted: Vec<FeatureId> = ids
        .into_iter()
        .filter(|id| store.remove(*id).is_some())
        .collect();

    set_selection(state, []);
    log::info!("{} Feature(s) gelöscht", deleted.len());
    state.emit(EditorEvent::FeaturesDeleted { features: deleted });
}
