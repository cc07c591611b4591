//! Select/Modify-Modus: Selektion, Stützpunkt-Bearbeitung, Verschieben,
//! Bogen-Griffe und Endpunkt-Fortsetzung.

use super::arc_overlay::{ArcControlOverlay, AttachOutcome, HandleRole};
use super::continuation::ContinuationSession;
use super::vertex_edit::{VertexEditor, VertexPick};
use crate::app::use_cases::selection::pick_feature;
use crate::core::{FeatureId, FeatureStore};
use crate::geometry::{find_nearby_endpoint, AffineTransform, LineEnd};
use crate::shared::MultiSelectPolicy;
use glam::DVec2;
use indexmap::IndexSet;

/// Interaktionsphase des Select-Modus.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SelectPhase {
    #[default]
    Idle,
    /// Stützpunkt-Drag läuft
    Modifying,
    /// Selektierte Features werden verschoben
    Translating { last: DVec2 },
    /// Bogen-Griff wird gezogen
    DraggingControlPoint,
    /// Fortsetzungs-Sitzung aktiv
    Continuing,
}

/// Ziel eines Drag-Starts im Select-Modus (Priorität: Griff, Stützpunkt, Körper).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragTarget {
    ControlPoint(HandleRole),
    Vertex(VertexPick),
    Body,
}

/// Ergebnis eines Drag-Endes.
#[derive(Debug, Clone, PartialEq)]
pub enum DragOutcome {
    None,
    /// Stützpunkt-Bearbeitung beendet (Modify-Ende)
    Modified(FeatureId),
    Translated(Vec<FeatureId>),
    ControlPointMoved(FeatureId),
}

/// Ergebnis einer Selektionsänderung.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SelectionUpdate {
    pub changed: bool,
    /// Abgeleitete Bogen-Kontrollpunkte, die in den Store geschrieben werden müssen
    pub repair: Option<(FeatureId, [DVec2; 3])>,
}

/// Controller des Standard-Modus.
#[derive(Default)]
pub struct SelectController {
    suspended: bool,
    selection: IndexSet<FeatureId>,
    vertex_editor: VertexEditor,
    overlay: ArcControlOverlay,
    phase: SelectPhase,
    continuation: Option<ContinuationSession>,
}

impl SelectController {
    pub fn new(arc_segments: usize) -> Self {
        Self {
            overlay: ArcControlOverlay::new(arc_segments),
            ..Self::default()
        }
    }

    // ── Aktivierung ─────────────────────────────────────────────────

    pub fn is_enabled(&self) -> bool {
        !self.suspended
    }

    /// Deaktiviert den Modus (anderer Modus wird aktiv). Selektion und Sitzungen verfallen.
    pub fn suspend(&mut self) {
        self.suspended = true;
        self.selection.clear();
        self.vertex_editor.clear();
        self.overlay.detach();
        self.continuation = None;
        self.phase = SelectPhase::Idle;
    }

    pub fn resume(&mut self) {
        self.suspended = false;
    }

    // ── Lesen ───────────────────────────────────────────────────────

    pub fn selection(&self) -> &IndexSet<FeatureId> {
        &self.selection
    }

    /// Einziges selektiertes Feature, falls genau eines selektiert ist.
    fn sole_selected(&self) -> Option<FeatureId> {
        match self.selection.len() {
            1 => self.selection.first().copied(),
            _ => None,
        }
    }

    /// Editierbare Teilmenge der Selektion.
    pub fn editable(&self) -> &IndexSet<FeatureId> {
        self.vertex_editor.editable()
    }

    pub fn overlay(&self) -> &ArcControlOverlay {
        &self.overlay
    }

    pub fn overlay_mut(&mut self) -> &mut ArcControlOverlay {
        &mut self.overlay
    }

    pub fn phase(&self) -> SelectPhase {
        self.phase
    }

    pub fn continuation(&self) -> Option<&ContinuationSession> {
        self.continuation.as_ref()
    }

    pub fn continuation_mut(&mut self) -> Option<&mut ContinuationSession> {
        self.continuation.as_mut()
    }

    pub fn is_dragging(&self) -> bool {
        matches!(
            self.phase,
            SelectPhase::Modifying | SelectPhase::Translating { .. } | SelectPhase::DraggingControlPoint
        )
    }

    // ── Selektion ───────────────────────────────────────────────────

    /// Berechnet die neue Selektion nach einem Klick gemäß Richtlinie.
    pub fn next_selection(
        &self,
        hit: Option<FeatureId>,
        additive: bool,
        policy: MultiSelectPolicy,
    ) -> IndexSet<FeatureId> {
        let toggle = match policy {
            MultiSelectPolicy::SingleReplace => false,
            MultiSelectPolicy::ModifierAdditive => additive,
            MultiSelectPolicy::AlwaysAdditive => true,
        };
        match hit {
            Some(id) if toggle => {
                let mut next = self.selection.clone();
                if !next.shift_remove(&id) {
                    next.insert(id);
                }
                next
            }
            Some(id) => IndexSet::from([id]),
            // Modifier-Klick ins Leere behält die Selektion
            None if toggle && policy == MultiSelectPolicy::ModifierAdditive => {
                self.selection.clone()
            }
            None => IndexSet::new(),
        }
    }

    /// Setzt die Selektion. Nicht (mehr) existierende IDs werden verworfen.
    ///
    /// Bei Änderung wird die editierbare Menge neu berechnet und das
    /// Bogen-Overlay an- oder abgehängt.
    pub fn set_selection(
        &mut self,
        store: &FeatureStore,
        ids: impl IntoIterator<Item = FeatureId>,
    ) -> SelectionUpdate {
        let next: IndexSet<FeatureId> = ids.into_iter().filter(|id| store.contains(*id)).collect();
        if next == self.selection {
            return SelectionUpdate::default();
        }
        self.selection = next;
        self.continuation = None;
        if self.phase == SelectPhase::Continuing {
            self.phase = SelectPhase::Idle;
        }
        SelectionUpdate {
            changed: true,
            repair: self.refresh_derived(store),
        }
    }

    /// Editierbare Menge und Overlay aus der aktuellen Selektion ableiten.
    fn refresh_derived(&mut self, store: &FeatureStore) -> Option<(FeatureId, [DVec2; 3])> {
        self.vertex_editor.set_editable(
            self.selection
                .iter()
                .copied()
                .filter(|id| store.get(*id).is_some_and(|f| f.is_vertex_editable())),
        );

        let sole_arc = self
            .sole_selected()
            .filter(|id| store.get(*id).is_some_and(|f| f.is_arc()));
        match sole_arc {
            Some(id) if self.overlay.arc() == Some(id) => None,
            Some(id) => match self.overlay.attach(store, id) {
                AttachOutcome::Repaired(cps) => Some((id, cps)),
                _ => None,
            },
            None => {
                self.overlay.detach();
                None
            }
        }
    }

    // ── Drag ────────────────────────────────────────────────────────

    /// Bestimmt das Drag-Ziel an `pos` (ohne Mutation).
    pub fn pick_drag_target(
        &self,
        store: &FeatureStore,
        pos: DVec2,
        tolerance: f64,
    ) -> Option<DragTarget> {
        if self.suspended || self.selection.is_empty() || self.continuation.is_some() {
            return None;
        }
        if let Some(role) = self.overlay.hit_handle(pos, tolerance) {
            return Some(DragTarget::ControlPoint(role));
        }
        if let Some(pick) = self.vertex_editor.pick(store, pos, tolerance) {
            return Some(DragTarget::Vertex(pick));
        }
        pick_feature(store, pos, tolerance, |f| self.selection.contains(&f.id))
            .map(|_| DragTarget::Body)
    }

    pub fn begin_drag(&mut self, store: &mut FeatureStore, target: DragTarget, pos: DVec2) -> bool {
        match target {
            DragTarget::ControlPoint(role) => {
                self.overlay.begin_drag(role);
                self.phase = SelectPhase::DraggingControlPoint;
            }
            DragTarget::Vertex(pick) => {
                if !self.vertex_editor.begin(store, pick) {
                    return false;
                }
                self.phase = SelectPhase::Modifying;
            }
            DragTarget::Body => {
                self.phase = SelectPhase::Translating { last: pos };
            }
        }
        true
    }

    pub fn drag(&mut self, store: &mut FeatureStore, pos: DVec2) -> bool {
        match self.phase {
            SelectPhase::Modifying => self.vertex_editor.update(store, pos),
            SelectPhase::DraggingControlPoint => self.overlay.drag_handle(store, pos),
            SelectPhase::Translating { last } => {
                let delta = pos - last;
                if delta == DVec2::ZERO {
                    return false;
                }
                let transform = AffineTransform::Translate(delta);
                for &id in &self.selection {
                    store.map_feature_coordinates(id, &transform);
                }
                self.phase = SelectPhase::Translating { last: pos };
                true
            }
            SelectPhase::Idle | SelectPhase::Continuing => false,
        }
    }

    pub fn end_drag(&mut self) -> DragOutcome {
        let outcome = match self.phase {
            SelectPhase::Modifying => self
                .vertex_editor
                .end()
                .map_or(DragOutcome::None, DragOutcome::Modified),
            SelectPhase::DraggingControlPoint => self
                .overlay
                .end_drag()
                .map_or(DragOutcome::None, DragOutcome::ControlPointMoved),
            SelectPhase::Translating { .. } => {
                DragOutcome::Translated(self.selection.iter().copied().collect())
            }
            SelectPhase::Idle | SelectPhase::Continuing => return DragOutcome::None,
        };
        self.phase = SelectPhase::Idle;
        outcome
    }

    // ── Fortsetzung ─────────────────────────────────────────────────

    /// Endpunkt der einzigen selektierten, fortsetzbaren Linie nahe `pos`.
    pub fn continuation_target(
        &self,
        store: &FeatureStore,
        pos: DVec2,
        tolerance: f64,
    ) -> Option<(FeatureId, LineEnd, DVec2)> {
        if self.suspended || self.is_dragging() {
            return None;
        }
        let id = self.sole_selected()?;
        let feature = store.get(id).filter(|f| f.is_continuable())?;
        let coords = feature.line_coords()?;
        let hit = find_nearby_endpoint(pos, [(id, coords)], None, tolerance)?;
        Some((hit.key, hit.end, hit.coordinate))
    }

    pub fn start_continuation(&mut self, feature: FeatureId, endpoint: LineEnd, anchor: DVec2) {
        log::info!("Fortsetzung von Feature {} am {:?}-Ende", feature, endpoint);
        self.continuation = Some(ContinuationSession::new(feature, endpoint, anchor));
        self.phase = SelectPhase::Continuing;
    }

    /// Entnimmt die Sitzung (Abschluss oder Abbruch).
    pub fn take_continuation(&mut self) -> Option<ContinuationSession> {
        if self.phase == SelectPhase::Continuing {
            self.phase = SelectPhase::Idle;
        }
        self.continuation.take()
    }

    // ── Nach Store-Änderungen ──────────────────────────────────────

    /// Verwirft verschwundene Features aus der Selektion (z.B. nach Undo).
    pub fn retain_existing(&mut self, store: &FeatureStore) -> SelectionUpdate {
        let current: Vec<FeatureId> = self.selection.iter().copied().collect();
        let mut update = self.set_selection(store, current);
        if !update.changed {
            // Gleiche Selektion, aber Feature-Arten können sich geändert haben
            update.repair = self.refresh_derived(store);
        }
        update
    }
}
