//! Handler für Editing-Operationen (Löschen, Split, Merge, Offset, Transform).

use crate::app::modes::{MergeCandidate, ModeController};
use crate::app::use_cases;
use crate::app::use_cases::selection::emit_selection_changed;
use crate::app::AppState;
use crate::core::FeatureId;
use crate::geometry::OffsetSide;
use glam::DVec2;

/// Löscht alle selektierten Features.
pub fn delete_selected(state: &mut AppState) {
    if !state.modes.select.is_enabled() || state.modes.select.selection().is_empty() {
        return;
    }
    use_cases::editing::delete_selected_features(state);
}

pub fn split_at(state: &mut AppState, world_pos: DVec2, tolerance: f64) {
    if !state.modes.split.is_active() {
        return;
    }
    use_cases::editing::split_at(state, world_pos, tolerance);
}

// ── Transform ────────────────────────────────────────────────────

pub fn transform_select(state: &mut AppState, world_pos: DVec2, tolerance: f64) {
    if !state.modes.transform.is_active() || state.modes.transform.is_transforming() {
        return;
    }
    if state
        .modes
        .transform
        .select_at(&state.store, world_pos, tolerance)
    {
        emit_selection_changed(state);
    }
}

pub fn begin_transform(state: &mut AppState, world_pos: DVec2, tolerance: f64) {
    if !state.modes.transform.is_active() {
        return;
    }
    if state.modes.transform.selected().is_none()
        && state
            .modes
            .transform
            .select_at(&state.store, world_pos, tolerance)
    {
        emit_selection_changed(state);
    }
    use_cases::editing::begin_transform(state, world_pos, tolerance);
}

pub fn update_transform(state: &mut AppState, world_pos: DVec2) {
    use_cases::editing::update_transform(state, world_pos);
}

pub fn end_transform(state: &mut AppState) {
    use_cases::editing::end_transform(state);
}

pub fn cancel_transform(state: &mut AppState) {
    use_cases::editing::cancel_transform(state);
}

// ── Merge ────────────────────────────────────────────────────────

pub fn merge_select(state: &mut AppState, world_pos: DVec2, tolerance: f64, additive: bool) {
    if !state.modes.merge.is_active() {
        return;
    }
    if state
        .modes
        .merge
        .click(&state.store, world_pos, tolerance, additive)
    {
        emit_selection_changed(state);
    }
}

pub fn begin_merge_drag(state: &mut AppState, world_pos: DVec2, tolerance: f64) {
    if !state.modes.merge.is_active() {
        return;
    }
    use_cases::editing::begin_merge_drag(state, world_pos, tolerance);
}

pub fn update_merge_drag(state: &mut AppState, world_pos: DVec2) {
    use_cases::editing::update_merge_drag(state, world_pos);
}

pub fn end_merge_drag(state: &mut AppState) {
    use_cases::editing::end_merge_drag(state);
}

/// Vom Host bestätigter Merge. Nur im Merge-Modus gültig.
pub fn apply_merge(state: &mut AppState, candidate: MergeCandidate) {
    if !state.modes.merge.is_active() {
        log::warn!(
            "Merge-Bestätigung verworfen: Merge-Modus nicht aktiv ({:?})",
            state.modes.active()
        );
        return;
    }
    use_cases::editing::apply_merge(state, candidate);
}

// ── Offset ───────────────────────────────────────────────────────

pub fn request_offset(state: &mut AppState, world_pos: DVec2, tolerance: f64) {
    if !state.modes.offset.is_active() {
        return;
    }
    use_cases::editing::request_offset(state, world_pos, tolerance);
    state.sync_interaction_flags();
}

/// Vom Host bestätigter Offset.
///
/// Gilt nur für die offene Anfrage im Offset-Modus; ungültige Abstände
/// werden verworfen.
pub fn apply_offset(state: &mut AppState, feature: FeatureId, side: OffsetSide, distance: f64) {
    if !state.modes.offset.is_active() || state.modes.offset.pending() != Some(feature) {
        log::warn!(
            "Offset-Bestätigung für Feature {} verworfen: offene Anfrage ist {:?}",
            feature,
            state.modes.offset.pending()
        );
        return;
    }
    if !distance.is_finite() || distance <= 0.0 {
        log::warn!("Offset verworfen: ungültiger Abstand {}", distance);
        state.modes.offset.take_pending();
    } else {
        use_cases::editing::apply_offset(state, feature, side, distance);
    }
    state.sync_interaction_flags();
}

pub fn cancel_offset(state: &mut AppState) {
    if state.modes.offset.take_pending().is_some() {
        log::debug!("Offset-Dialog abgebrochen");
    }
    state.sync_interaction_flags();
}
