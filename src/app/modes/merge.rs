//! Merge-Modus: eigene editierbare Sammlung, Endpunkt-Prüfung nach jedem
//! Stützpunkt-Drag und Merge-Anfrage an den Host.

use super::vertex_edit::{VertexEditor, VertexPick};
use super::{ModeController, ModeKind};
use crate::app::use_cases::selection::pick_feature;
use crate::core::{Feature, FeatureId, FeatureStore};
use crate::geometry::{find_nearby_endpoint, LineEnd};
use glam::DVec2;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Zwei Linienenden, die zusammengeführt werden können.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MergeCandidate {
    pub feature_a: FeatureId,
    pub end_a: LineEnd,
    pub feature_b: FeatureId,
    pub end_b: LineEnd,
    pub distance: f64,
}

/// Sucht für die Enden von `moved` (Start vor Ende) ein anderes
/// zusammenführbares Linienende innerhalb der Toleranz.
pub fn find_merge_candidate(
    store: &FeatureStore,
    moved: FeatureId,
    tolerance: f64,
) -> Option<MergeCandidate> {
    let feature = store.get(moved).filter(|f| f.is_mergeable())?;
    let coords = feature.line_coords()?;
    let others: Vec<(FeatureId, &[DVec2])> = store
        .iter()
        .filter(|f| f.is_mergeable())
        .filter_map(|f| f.line_coords().map(|c| (f.id, c)))
        .collect();

    [LineEnd::Start, LineEnd::End].into_iter().find_map(|end_a| {
        let point = end_a.of(coords)?;
        let hit = find_nearby_endpoint(point, others.iter().copied(), Some(moved), tolerance)?;
        Some(MergeCandidate {
            feature_a: moved,
            end_a,
            feature_b: hit.key,
            end_b: hit.end,
            distance: hit.distance,
        })
    })
}

#[derive(Default)]
pub struct MergeController {
    active: bool,
    selection: IndexSet<FeatureId>,
    vertex_editor: VertexEditor,
}

impl MergeController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Eigene Selektion des Merge-Modus.
    pub fn selected(&self) -> &IndexSet<FeatureId> {
        &self.selection
    }

    pub fn is_dragging(&self) -> bool {
        self.vertex_editor.is_dragging()
    }

    /// Klick: ersetzt die Selektion oder schaltet (additiv) ein Feature um.
    pub fn click(&mut self, store: &FeatureStore, pos: DVec2, tolerance: f64, additive: bool) -> bool {
        if !self.active {
            return false;
        }
        let hit = pick_feature(store, pos, tolerance, Feature::is_mergeable);
        let mut next = if additive {
            self.selection.clone()
        } else {
            IndexSet::new()
        };
        if let Some(id) = hit {
            if !(additive && next.shift_remove(&id)) {
                next.insert(id);
            }
        }
        if next == self.selection {
            return false;
        }
        self.selection = next;
        self.vertex_editor
            .set_editable(self.selection.iter().copied());
        true
    }

    pub fn retain_existing(&mut self, store: &FeatureStore) -> bool {
        let before = self.selection.len();
        self.selection.retain(|id| store.contains(*id));
        self.vertex_editor
            .set_editable(self.selection.iter().copied());
        before != self.selection.len()
    }

    pub fn pick_vertex(&self, store: &FeatureStore, pos: DVec2, tolerance: f64) -> Option<VertexPick> {
        if !self.active {
            return None;
        }
        self.vertex_editor.pick(store, pos, tolerance)
    }

    pub fn begin_drag(&mut self, store: &mut FeatureStore, pick: VertexPick) -> bool {
        self.vertex_editor.begin(store, pick)
    }

    pub fn drag(&mut self, store: &mut FeatureStore, pos: DVec2) -> bool {
        self.vertex_editor.update(store, pos)
    }

    /// Modify-Ende: prüft die Enden des gezogenen Features auf Merge-Kandidaten.
    pub fn end_drag(
        &mut self,
        store: &FeatureStore,
        tolerance: f64,
    ) -> (Option<FeatureId>, Option<MergeCandidate>) {
        let Some(moved) = self.vertex_editor.end() else {
            return (None, None);
        };
        (Some(moved), find_merge_candidate(store, moved, tolerance))
    }
}

impl ModeController for MergeController {
    fn kind(&self) -> ModeKind {
        ModeKind::Merge
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn activate(&mut self) {
        self.active = true;
    }

    fn deactivate(&mut self) {
        self.active = false;
        self.selection.clear();
        self.vertex_editor.clear();
    }

    fn selection(&self) -> Vec<FeatureId> {
        self.selection.iter().copied().collect()
    }
}
