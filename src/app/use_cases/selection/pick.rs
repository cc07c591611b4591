//! Use-Case: Feature-Selektion per Klick.

use super::helpers::set_selection;
use crate::core::{Feature, FeatureId, FeatureStore};
use crate::AppState;
use glam::DVec2;

/// Nächstes Feature innerhalb der Toleranz, das `filter` erfüllt.
///
/// Bei gleichem Abstand gewinnt das später gezeichnete (oben liegende) Feature.
pub fn pick_feature(
    store: &FeatureStore,
    pos: DVec2,
    tolerance: f64,
    filter: impl Fn(&Feature) -> bool,
) -> Option<FeatureId> {
    let mut best: Option<(FeatureId, f64)> = None;
    for feature in store.iter() {
        let distance = feature.geometry().distance_to(pos);
        if distance > tolerance || !filter(feature) {
            continue;
        }
        if best.is_none_or(|(_, d)| distance <= d) {
            best = Some((feature.id, distance));
        }
    }
    best.map(|(id, _)| id)
}

/// Selektiert per Klick gemäß Mehrfachauswahl-Richtlinie.
pub fn select_at(state: &mut AppState, world_pos: DVec2, tolerance: f64, additive: bool) -> bool {
    if !state.modes.select.is_enabled() {
        return false;
    }
    let hit = pick_feature(&state.store, world_pos, tolerance, |_| true);
    let next = state
        .modes
        .select
        .next_selection(hit, additive, state.options.multi_select_policy);
    set_selection(state, next)
}
