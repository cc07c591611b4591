//! Handler für Zeichenwerkzeug-Operationen (Linie, Messlinie, Polygon, Bogen, Wolke).

use crate::app::tools::ToolAction;
use crate::app::use_cases;
use crate::app::AppState;
use glam::DVec2;

/// Verarbeitet einen Viewport-Klick im aktiven Zeichenwerkzeug.
pub fn click(state: &mut AppState, world_pos: DVec2) {
    let ortho = state.editor.ortho_enabled;
    let action = {
        let Some(tool) = state.editor.tool_manager.active_tool_mut() else {
            return;
        };
        tool.on_click(world_pos, ortho)
    };

    if action == ToolAction::ReadyToExecute {
        execute_and_apply(state);
    } else {
        preview(state, world_pos);
    }
}

/// Aktualisiert die Vorschau für die aktuelle Zeigerposition.
pub fn preview(state: &mut AppState, world_pos: DVec2) {
    let ortho = state.editor.ortho_enabled;
    state.editor.preview = state
        .editor
        .tool_manager
        .active_tool()
        .filter(|tool| tool.has_pending_input())
        .map(|tool| tool.preview(world_pos, ortho));
}

pub fn drag_start(state: &mut AppState, world_pos: DVec2) {
    let accepted = state
        .editor
        .tool_manager
        .active_tool_mut()
        .is_some_and(|tool| tool.on_drag_start(world_pos));
    if accepted {
        preview(state, world_pos);
    }
}

pub fn drag_update(state: &mut AppState, world_pos: DVec2) {
    if let Some(tool) = state.editor.tool_manager.active_tool_mut() {
        tool.on_drag_update(world_pos);
    }
    preview(state, world_pos);
}

/// Beendet einen Freihand-Drag; ein fertiges Werkzeug wird sofort ausgeführt.
pub fn drag_end(state: &mut AppState) {
    let action = match state.editor.tool_manager.active_tool_mut() {
        Some(tool) => tool.on_drag_end(),
        None => return,
    };
    if action == ToolAction::ReadyToExecute {
        execute_and_apply(state);
    }
}

/// Entfernt den zuletzt gesetzten Punkt (Ctrl+Z während des Zeichnens).
pub fn undo_vertex(state: &mut AppState) {
    let removed = state
        .editor
        .tool_manager
        .active_tool_mut()
        .is_some_and(|tool| tool.undo_last_vertex());
    if removed {
        log::debug!("Letzten Zeichenpunkt entfernt");
    }
    let has_input = state
        .editor
        .tool_manager
        .active_tool()
        .is_some_and(|tool| tool.has_pending_input());
    if !has_input {
        state.editor.preview = None;
    }
}

/// Schließt die Zeichnung ab (Enter / Doppelklick).
pub fn finish(state: &mut AppState) {
    execute_and_apply(state);
}

/// Verwirft die laufende Zeichnung (Escape).
pub fn cancel(state: &mut AppState) {
    if let Some(tool) = state.editor.tool_manager.active_tool_mut() {
        tool.reset();
    }
    state.editor.preview = None;
}

/// Gemeinsame Logik: Tool ausführen, Ergebnis anwenden, Tool zurücksetzen.
///
/// Zu wenige Punkte ergeben kein Ergebnis; die Zeichnung wird dann verworfen.
fn execute_and_apply(state: &mut AppState) {
    let result = state
        .editor
        .tool_manager
        .active_tool()
        .and_then(|tool| tool.execute(&state.options));

    match result {
        Some(result) => {
            use_cases::editing::apply_tool_result(state, result);
        }
        None => log::debug!("Zeichnung ohne gültiges Ergebnis verworfen"),
    }
    cancel(state);
}
