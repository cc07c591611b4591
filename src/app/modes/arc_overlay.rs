//! Kontrollpunkt-Overlay für einen einzeln selektierten Bogen.
//!
//! Drei synthetische Griffe (Start, Durchgang, Ende) liegen außerhalb des
//! FeatureStores. Ein Griff-Drag berechnet den Bogen neu und schreibt
//! Geometrie und Kontrollpunkte zurück. Ändert sich der Bogen von außen
//! (Verschieben, Transformieren, Undo/Redo), zieht `reconcile` die Griffe nach.
//! Währenddessen steht das Overlay in `SyncingFromSource` und der Griff-Listener
//! schreibt nichts zurück, bis `settle` am Ende des Update-Bursts auf `Idle` setzt.

use crate::core::{FeatureId, FeatureStore, Geometry};
use crate::geometry::{derive_control_points, generate_arc};
use glam::DVec2;

/// Abweichung, ab der Griffe und gespeicherte Kontrollpunkte als verschieden gelten.
pub const SYNC_EPSILON: f64 = 1e-9;

/// Farbe des Start-Griffs (RGBA: Grün).
pub const HANDLE_COLOR_START: [f32; 4] = [0.2, 0.8, 0.2, 1.0];
/// Farbe des Durchgangs-Griffs (RGBA: Orange).
pub const HANDLE_COLOR_THROUGH: [f32; 4] = [1.0, 0.6, 0.0, 1.0];
/// Farbe des End-Griffs (RGBA: Rot).
pub const HANDLE_COLOR_END: [f32; 4] = [0.9, 0.1, 0.1, 1.0];

/// Rolle eines Kontrollpunkt-Griffs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleRole {
    Start,
    Through,
    End,
}

impl HandleRole {
    pub const ALL: [HandleRole; 3] = [HandleRole::Start, HandleRole::Through, HandleRole::End];

    fn index(self) -> usize {
        match self {
            HandleRole::Start => 0,
            HandleRole::Through => 1,
            HandleRole::End => 2,
        }
    }

    fn color(self) -> [f32; 4] {
        match self {
            HandleRole::Start => HANDLE_COLOR_START,
            HandleRole::Through => HANDLE_COLOR_THROUGH,
            HandleRole::End => HANDLE_COLOR_END,
        }
    }
}

/// Ein Griff im Overlay-Layer (nie persistiert).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlHandle {
    pub role: HandleRole,
    pub position: DVec2,
    pub color: [f32; 4],
}

/// Synchronisationszustand zwischen Griffen und Bogen-Feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlaySync {
    /// Griff-Bewegungen werden in den Bogen geschrieben
    #[default]
    Idle,
    /// Griffe folgen dem Bogen; Griff-Listener schreibt nicht zurück
    SyncingFromSource,
}

/// Neu berechneter Bogen, bereit zum Schreiben in den Store.
#[derive(Debug, Clone, PartialEq)]
pub struct ArcUpdate {
    pub feature: FeatureId,
    pub coords: Vec<DVec2>,
    pub control_points: [DVec2; 3],
}

impl ArcUpdate {
    /// Schreibt Geometrie und Kontrollpunkte ins Feature.
    pub fn write(self, store: &mut FeatureStore) -> bool {
        let Self {
            feature,
            coords,
            control_points,
        } = self;
        store
            .update(feature, |f| {
                if f.set_geometry(Geometry::LineString(coords)) {
                    f.set_arc_control_points(control_points);
                    true
                } else {
                    false
                }
            })
            .unwrap_or(false)
    }
}

/// Ergebnis von [`ArcControlOverlay::attach`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttachOutcome {
    /// Kontrollpunkte vorhanden, Griffe erzeugt
    Attached,
    /// Kontrollpunkte fehlten und wurden abgeleitet; Aufrufer muss sie persistieren
    Repaired([DVec2; 3]),
    /// Feature ist kein Bogen
    NotAnArc,
}

/// Overlay mit genau drei Griffen für den aktuell selektierten Bogen.
#[derive(Debug, Clone)]
pub struct ArcControlOverlay {
    arc: Option<FeatureId>,
    handles: Vec<ControlHandle>,
    sync: OverlaySync,
    dragging: Option<HandleRole>,
    segments: usize,
}

impl Default for ArcControlOverlay {
    fn default() -> Self {
        Self::new(crate::shared::options::ARC_SEGMENTS)
    }
}

impl ArcControlOverlay {
    pub fn new(segments: usize) -> Self {
        Self {
            arc: None,
            handles: Vec::new(),
            sync: OverlaySync::Idle,
            dragging: None,
            segments,
        }
    }

    pub fn set_segments(&mut self, segments: usize) {
        self.segments = segments;
    }

    /// Bogen, an dem das Overlay hängt.
    pub fn arc(&self) -> Option<FeatureId> {
        self.arc
    }

    /// Aktuelle Griffe (leer, wenn nicht angehängt).
    pub fn handles(&self) -> &[ControlHandle] {
        &self.handles
    }

    pub fn sync_state(&self) -> OverlaySync {
        self.sync
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging.is_some()
    }

    /// Hängt das Overlay an einen Bogen und erzeugt die drei Griffe.
    ///
    /// Fehlende Kontrollpunkte (Altdaten) werden aus der Geometrie abgeleitet.
    pub fn attach(&mut self, store: &FeatureStore, id: FeatureId) -> AttachOutcome {
        self.detach();
        let Some(feature) = store.get(id) else {
            return AttachOutcome::NotAnArc;
        };
        if !feature.is_arc() {
            return AttachOutcome::NotAnArc;
        }

        let (cps, outcome) = match feature.arc_control_points() {
            Some(cps) => (cps, AttachOutcome::Attached),
            None => {
                let Some(cps) = feature.line_coords().and_then(derive_control_points) else {
                    log::warn!("Bogen {} ohne verwertbare Geometrie", id);
                    return AttachOutcome::NotAnArc;
                };
                log::info!("Bogen {}: Kontrollpunkte aus Geometrie abgeleitet", id);
                (cps, AttachOutcome::Repaired(cps))
            }
        };

        self.arc = Some(id);
        self.handles = HandleRole::ALL
            .iter()
            .map(|&role| ControlHandle {
                role,
                position: cps[role.index()],
                color: role.color(),
            })
            .collect();
        outcome
    }

    /// Entfernt alle Griffe.
    pub fn detach(&mut self) {
        self.arc = None;
        self.handles.clear();
        self.dragging = None;
        self.sync = OverlaySync::Idle;
    }

    fn control_points(&self) -> Option<[DVec2; 3]> {
        match self.handles.as_slice() {
            [a, b, c] => Some([a.position, b.position, c.position]),
            _ => None,
        }
    }

    /// Nächster Griff innerhalb der Toleranz.
    pub fn hit_handle(&self, pos: DVec2, tolerance: f64) -> Option<HandleRole> {
        self.handles
            .iter()
            .map(|h| (h.role, h.position.distance(pos)))
            .filter(|(_, d)| *d <= tolerance)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(role, _)| role)
    }

    /// Griff-Listener: setzt die Position und berechnet den Bogen neu,
    /// solange nicht von der Quelle synchronisiert wird.
    fn move_handle(&mut self, role: HandleRole, pos: DVec2) -> Option<ArcUpdate> {
        let handle = self.handles.get_mut(role.index())?;
        handle.position = pos;

        if self.sync == OverlaySync::SyncingFromSource {
            return None;
        }
        let feature = self.arc?;
        let [p1, p2, p3] = self.control_points()?;
        Some(ArcUpdate {
            feature,
            coords: generate_arc(p1, p2, p3, self.segments),
            control_points: [p1, p2, p3],
        })
    }

    pub fn begin_drag(&mut self, role: HandleRole) {
        if self.arc.is_some() {
            self.dragging = Some(role);
        }
    }

    /// Bewegt den gegriffenen Griff und schreibt den neu berechneten Bogen.
    pub fn drag_handle(&mut self, store: &mut FeatureStore, pos: DVec2) -> bool {
        let Some(role) = self.dragging else {
            return false;
        };
        match self.move_handle(role, pos) {
            Some(update) => update.write(store),
            None => false,
        }
    }

    pub fn end_drag(&mut self) -> Option<FeatureId> {
        self.dragging.take().and(self.arc)
    }

    /// Gleicht die Griffe mit dem Bogen im Store ab.
    ///
    /// Verschwindet der Bogen oder verliert er das Bogen-Tag, wird das Overlay
    /// entfernt. Weichen die gespeicherten Kontrollpunkte von den Griffen ab,
    /// folgen die Griffe im Zustand `SyncingFromSource`.
    pub fn reconcile(&mut self, store: &FeatureStore) {
        let Some(id) = self.arc else {
            return;
        };
        let Some(feature) = store.get(id).filter(|f| f.is_arc()) else {
            log::debug!("Bogen {} nicht mehr vorhanden, Overlay entfernt", id);
            self.detach();
            return;
        };
        let Some(stored) = feature
            .arc_control_points()
            .or_else(|| feature.line_coords().and_then(derive_control_points))
        else {
            self.detach();
            return;
        };
        let Some(current) = self.control_points() else {
            return;
        };

        let drifted = stored
            .iter()
            .zip(current.iter())
            .any(|(s, c)| s.distance(*c) > SYNC_EPSILON);
        if !drifted {
            return;
        }

        self.sync = OverlaySync::SyncingFromSource;
        for role in HandleRole::ALL {
            let suppressed = self.move_handle(role, stored[role.index()]);
            debug_assert!(suppressed.is_none());
        }
    }

    /// Beendet eine Synchronisation am Ende des Update-Bursts.
    pub fn settle(&mut self) {
        self.sync = OverlaySync::Idle;
    }
}
