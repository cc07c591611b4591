//! Handler für Selektions-Operationen.

use crate::app::use_cases;
use crate::app::use_cases::selection::BoxSelectMode;
use crate::app::AppState;
use glam::DVec2;

/// Klick-Selektion im Select-Modus.
pub fn select_at(state: &mut AppState, world_pos: DVec2, tolerance: f64, additive: bool) {
    if !state.modes.select.is_enabled() {
        return;
    }
    use_cases::selection::select_at(state, world_pos, tolerance, additive);
}

/// Rechteckselektion (Ergebnis wird zur bestehenden Selektion addiert).
pub fn select_in_box(state: &mut AppState, corner_a: DVec2, corner_b: DVec2, mode: BoxSelectMode) {
    if !state.modes.select.is_enabled() {
        return;
    }
    use_cases::selection::select_in_box(state, corner_a, corner_b, mode);
}

pub fn select_all(state: &mut AppState) {
    use_cases::selection::select_all(state);
}

pub fn clear(state: &mut AppState) {
    if state.modes.select.is_enabled() {
        use_cases::selection::clear_selection(state);
    }
}

pub fn begin_drag(state: &mut AppState, world_pos: DVec2, tolerance: f64) {
    use_cases::selection::begin_select_drag(state, world_pos, tolerance);
}

pub fn update_drag(state: &mut AppState, world_pos: DVec2) {
    use_cases::selection::update_select_drag(state, world_pos);
}

pub fn end_drag(state: &mut AppState) {
    use_cases::selection::end_select_drag(state);
}
