//! Handler für Werkzeug- und Moduswechsel.

use crate::app::events::EditorEvent;
use crate::app::state::EditorTool;
use crate::app::use_cases;
use crate::app::AppState;

/// Wechselt das aktive Werkzeug und damit ggf. den exklusiven Modus.
///
/// Laufende Sitzungen des alten Modus werden verworfen, ein laufender
/// Transform-Drag wird auf die Ausgangsgeometrie zurückgesetzt.
pub fn set_editor_tool(state: &mut AppState, tool: EditorTool) {
    let previous = state.editor.active_tool;
    if previous == tool {
        log::debug!("Werkzeug {:?} bereits aktiv", tool);
        return;
    }

    use_cases::editing::cancel_transform(state);
    use_cases::editing::cancel_continuation(state);
    if matches!(previous, EditorTool::Draw(_)) {
        state.editor.tool_manager.reset();
    }
    state.editor.preview = None;

    let mode_changed = state.modes.activate(tool.mode());

    if let EditorTool::Draw(kind) = tool {
        if state.editor.tool_manager.set_active(kind) {
            let resolution = state.view.resolution;
            if let Some(draw_tool) = state.editor.tool_manager.active_tool_mut() {
                draw_tool.configure(&state.options, resolution);
            }
        }
    }
    state.editor.active_tool = tool;

    if mode_changed {
        let mode = state.modes.active();
        state.emit(EditorEvent::ModeChanged { mode });
        use_cases::selection::emit_selection_changed(state);
    }
    state.sync_interaction_flags();
    log::info!("Werkzeug gewechselt: {:?} -> {:?}", previous, tool);
}
