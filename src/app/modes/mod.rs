//! Exklusive Interaktionsmodi und deren Supervisor.
//!
//! Genau ein Modus ist aktiv. Select/Modify ist der Standard und wird von
//! jedem anderen Modus suspendiert; beim Verlassen des Modus wird er wieder
//! aufgenommen. Nur der [`ModeSupervisor`] schaltet Modi um.

pub mod arc_overlay;
pub mod continuation;
pub mod merge;
pub mod offset;
pub mod select;
pub mod split;
pub mod transform;
pub mod vertex_edit;

pub use arc_overlay::{ArcControlOverlay, ControlHandle, HandleRole, OverlaySync};
pub use continuation::ContinuationSession;
pub use merge::{MergeCandidate, MergeController};
pub use offset::OffsetController;
pub use select::{DragOutcome, DragTarget, SelectController, SelectPhase, SelectionUpdate};
pub use split::{SplitController, SplitPlan};
pub use transform::{EdgeSide, TransformController, TransformHandle};
pub use vertex_edit::{VertexEditor, VertexPick, VertexPickKind};

use crate::core::{FeatureId, FeatureStore};
use crate::shared::EditorOptions;
use serde::{Deserialize, Serialize};

/// Art des aktiven Modus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeKind {
    #[default]
    Select,
    /// Zeichnen mit einem Werkzeug aus dem `ToolManager`
    Draw,
    Transform,
    Split,
    Merge,
    Offset,
}

/// Gemeinsamer Aktivierungsvertrag der exklusiven Modi.
pub trait ModeController {
    fn kind(&self) -> ModeKind;

    fn is_active(&self) -> bool;

    /// Baut modusspezifische Interaktion auf.
    fn activate(&mut self);

    /// Baut alles wieder ab: Selektion, Sitzungen, offene Anfragen.
    fn deactivate(&mut self);

    /// Modus-eigene Selektion (leer, falls der Modus keine führt).
    fn selection(&self) -> Vec<FeatureId> {
        Vec::new()
    }
}

/// Besitzt alle Modus-Controller und erzwingt Exklusivität.
pub struct ModeSupervisor {
    active: ModeKind,
    pub select: SelectController,
    pub transform: TransformController,
    pub split: SplitController,
    pub merge: MergeController,
    pub offset: OffsetController,
}

impl ModeSupervisor {
    pub fn new(options: &EditorOptions) -> Self {
        Self {
            active: ModeKind::Select,
            select: SelectController::new(options.arc_segments),
            transform: TransformController::new(),
            split: SplitController::new(),
            merge: MergeController::new(),
            offset: OffsetController::new(),
        }
    }

    pub fn active(&self) -> ModeKind {
        self.active
    }

    fn controller_mut(&mut self, kind: ModeKind) -> Option<&mut dyn ModeController> {
        match kind {
            ModeKind::Select | ModeKind::Draw => None,
            ModeKind::Transform => Some(&mut self.transform),
            ModeKind::Split => Some(&mut self.split),
            ModeKind::Merge => Some(&mut self.merge),
            ModeKind::Offset => Some(&mut self.offset),
        }
    }

    /// Wechselt in `kind`. Gibt `false` zurück, wenn der Modus schon aktiv ist.
    pub fn activate(&mut self, kind: ModeKind) -> bool {
        if kind == self.active {
            return false;
        }
        let previous = self.active;
        if let Some(controller) = self.controller_mut(previous) {
            controller.deactivate();
        }

        if kind == ModeKind::Select {
            self.select.resume();
        } else {
            if previous == ModeKind::Select {
                self.select.suspend();
            }
            if let Some(controller) = self.controller_mut(kind) {
                controller.activate();
            }
        }
        self.active = kind;
        log::info!("Modus gewechselt: {:?} -> {:?}", previous, kind);
        true
    }

    /// Selektion des aktiven Modus.
    pub fn active_selection(&self) -> Vec<FeatureId> {
        match self.active {
            ModeKind::Select => self.select.selection().iter().copied().collect(),
            ModeKind::Draw => Vec::new(),
            ModeKind::Transform => self.transform.selection(),
            ModeKind::Split => self.split.selection(),
            ModeKind::Merge => ModeController::selection(&self.merge),
            ModeKind::Offset => self.offset.selection(),
        }
    }

    /// Verwirft Sitzungen und verschwundene IDs der Nicht-Select-Modi (nach Undo/Redo).
    ///
    /// Gibt `true` zurück, wenn sich die Selektion des aktiven Modus geändert hat.
    pub fn retain_existing(&mut self, store: &FeatureStore) -> bool {
        let transform_changed = self.transform.retain_existing(store);
        let merge_changed = self.merge.retain_existing(store);
        if self
            .offset
            .pending()
            .is_some_and(|id| !store.contains(id))
        {
            self.offset.take_pending();
        }
        match self.active {
            ModeKind::Transform => transform_changed,
            ModeKind::Merge => merge_changed,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Geometry, Properties};
    use glam::DVec2;

    #[test]
    fn exactly_one_mode_is_active() {
        let mut modes = ModeSupervisor::new(&EditorOptions::default());
        assert_eq!(modes.active(), ModeKind::Select);
        assert!(modes.select.is_enabled());

        assert!(modes.activate(ModeKind::Merge));
        assert!(!modes.select.is_enabled());
        assert!(modes.merge.is_active());

        assert!(modes.activate(ModeKind::Split));
        assert!(!modes.merge.is_active());
        assert!(modes.split.is_active());
        assert!(!modes.select.is_enabled());

        assert!(modes.activate(ModeKind::Select));
        assert!(!modes.split.is_active());
        assert!(modes.select.is_enabled());
        assert!(!modes.activate(ModeKind::Select));
    }

    #[test]
    fn merge_selection_is_reported_as_active_selection() {
        let mut store = FeatureStore::new();
        let id = store.add(
            Geometry::LineString(vec![DVec2::ZERO, DVec2::new(10.0, 0.0)]),
            Properties::new(),
        );
        let mut modes = ModeSupervisor::new(&EditorOptions::default());
        modes.activate(ModeKind::Merge);
        modes.merge.click(&store, DVec2::new(5.0, 0.0), 1.0, false);
        assert_eq!(modes.active_selection(), vec![id]);
    }

    #[test]
    fn suspending_select_drops_its_selection() {
        let mut store = FeatureStore::new();
        let id = store.add(
            Geometry::LineString(vec![DVec2::ZERO, DVec2::X]),
            Properties::new(),
        );
        let mut modes = ModeSupervisor::new(&EditorOptions::default());
        modes.select.set_selection(&store, [id]);
        assert_eq!(modes.active_selection(), vec![id]);

        modes.activate(ModeKind::Draw);
        assert!(modes.active_selection().is_empty());
        modes.activate(ModeKind::Select);
        assert!(modes.select.selection().is_empty());
    }
}
