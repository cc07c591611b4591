//! Use-Case: Linie am Klickpunkt teilen.

use super::measure::update_measure_length;
use crate::app::events::EditorEvent;
use crate::app::AppState;
use glam::DVec2;

/// Teilt die getroffene Linie und ersetzt sie atomar durch beide Teile.
pub fn split_at(state: &mut AppState, world_pos: DVec2, tolerance: f64) -> bool {
    let Some(plan) = state.modes.split.plan(&state.store, world_pos, tolerance) else {
        log::debug!("Split: keine teilbare Linie getroffen");
        return false;
    };

    // Snapshot VOR Mutation
    state.record_undo_snapshot();

    let original = plan.original;
    let Some(added) = state.store_mut().replace(&[original], plan.parts.into()) else {
        return false;
    };
    let projection = state.options.projection;
    for &id in &added {
        update_measure_length(state.store_mut(), id, projection);
    }
    log::info!("Feature {} geteilt in {:?}", original, added);
    state.emit(EditorEvent::FeaturesReplaced {
        removed: vec![original],
        added,
    });
    true
}
