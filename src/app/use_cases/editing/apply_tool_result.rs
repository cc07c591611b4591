//! Use-Case: Ergebnis eines Zeichenwerkzeugs als neues Feature anlegen.

use crate::app::events::EditorEvent;
use crate::app::tools::ToolResult;
use crate::app::AppState;
use crate::core::FeatureId;

/// Wendet ein `ToolResult` auf den AppState an (ein Undo-Schritt).
pub fn apply_tool_result(state: &mut AppState, result: ToolResult) -> FeatureId {
    // Snapshot VOR Mutation
    state.record_undo_snapshot();

    let kind = result.geometry.kind();
    let id = state.store_mut().add(result.geometry, result.properties);
    state.emit(EditorEvent::FeatureCreated { feature: id });
    log::info!("Feature {} ({:?}) erstellt", id, kind);
    id
}
