//! Handler für die Endpunkt-Fortsetzung im Select-Modus.

use crate::app::use_cases;
use crate::app::AppState;
use crate::core::FeatureId;
use crate::geometry::LineEnd;
use glam::DVec2;

pub fn start(state: &mut AppState, feature: FeatureId, endpoint: LineEnd, anchor: DVec2) {
    use_cases::editing::start_continuation(state, feature, endpoint, anchor);
}

/// Setzt einen weiteren Punkt der Fortsetzung.
pub fn click(state: &mut AppState, world_pos: DVec2) {
    let ortho = state.editor.ortho_enabled;
    let Some(session) = state.modes.select.continuation_mut() else {
        return;
    };
    session.click(world_pos, ortho);
    state.editor.preview = Some(session.preview(world_pos, ortho));
}

pub fn preview(state: &mut AppState, world_pos: DVec2) {
    let ortho = state.editor.ortho_enabled;
    if let Some(session) = state.modes.select.continuation() {
        state.editor.preview = Some(session.preview(world_pos, ortho));
    }
}

pub fn undo_vertex(state: &mut AppState) {
    let Some(session) = state.modes.select.continuation_mut() else {
        return;
    };
    if session.undo_last_vertex() {
        log::debug!("Letzten Fortsetzungspunkt entfernt");
    }
    if !session.has_new_points() {
        state.editor.preview = None;
    }
}

pub fn complete(state: &mut AppState) {
    use_cases::editing::complete_continuation(state);
}

pub fn cancel(state: &mut AppState) {
    use_cases::editing::cancel_continuation(state);
}
