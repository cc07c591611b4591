//! Transform-Modus: Einzelselektion mit Verschiebe-, Dreh-, Skalier- und Streckgriffen.

use super::{ModeController, ModeKind};
use crate::app::use_cases::selection::pick_feature;
use crate::core::{Feature, FeatureId, FeatureStore};
use crate::geometry::{AffineTransform, Extent};
use glam::DVec2;

/// Kante des Begrenzungsrechtecks (Streckgriff in der Kantenmitte).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeSide {
    Bottom,
    Right,
    Top,
    Left,
}

impl EdgeSide {
    const ALL: [EdgeSide; 4] = [EdgeSide::Bottom, EdgeSide::Right, EdgeSide::Top, EdgeSide::Left];

    fn axis(self) -> DVec2 {
        match self {
            EdgeSide::Bottom | EdgeSide::Top => DVec2::Y,
            EdgeSide::Right | EdgeSide::Left => DVec2::X,
        }
    }

    fn opposite(self) -> Self {
        match self {
            EdgeSide::Bottom => EdgeSide::Top,
            EdgeSide::Right => EdgeSide::Left,
            EdgeSide::Top => EdgeSide::Bottom,
            EdgeSide::Left => EdgeSide::Right,
        }
    }

    fn midpoint(self, extent: &Extent) -> DVec2 {
        let c = extent.center();
        match self {
            EdgeSide::Bottom => DVec2::new(c.x, extent.min.y),
            EdgeSide::Right => DVec2::new(extent.max.x, c.y),
            EdgeSide::Top => DVec2::new(c.x, extent.max.y),
            EdgeSide::Left => DVec2::new(extent.min.x, c.y),
        }
    }
}

/// Griff des Transform-Modus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformHandle {
    /// Ecke (Index in `Extent::corners`), skaliert gleichmäßig
    Corner(usize),
    /// Kantenmitte, streckt einachsig
    Edge(EdgeSide),
    Rotate,
    /// Feature selbst, verschiebt
    Body,
}

/// Laufender Transform-Drag.
struct TransformSession {
    handle: TransformHandle,
    /// Zustand vor dem Drag (für Abbruch und als Basis jeder Aktualisierung)
    original: Feature,
    origin: DVec2,
    grabbed: DVec2,
}

/// Controller des Transform-Modus.
#[derive(Default)]
pub struct TransformController {
    active: bool,
    feature: Option<FeatureId>,
    session: Option<TransformSession>,
}

impl TransformController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<FeatureId> {
        self.feature
    }

    pub fn is_transforming(&self) -> bool {
        self.session.is_some()
    }

    /// Selektiert das Feature unter `pos` (oder hebt die Selektion auf).
    ///
    /// Gibt `true` zurück, wenn sich die Selektion geändert hat.
    pub fn select_at(&mut self, store: &FeatureStore, pos: DVec2, tolerance: f64) -> bool {
        if !self.active || self.session.is_some() {
            return false;
        }
        let hit = pick_feature(store, pos, tolerance, |_| true);
        let changed = hit != self.feature;
        self.feature = hit;
        changed
    }

    /// Verwirft die Selektion, falls das Feature nicht mehr existiert.
    pub fn retain_existing(&mut self, store: &FeatureStore) -> bool {
        self.session = None;
        if self.feature.is_some_and(|id| !store.contains(id)) {
            self.feature = None;
            return true;
        }
        false
    }

    /// Alle Griffe des selektierten Features mit Position.
    ///
    /// Messlinien bekommen nur den Verschiebegriff.
    pub fn handles(&self, store: &FeatureStore, rotate_offset: f64) -> Vec<(TransformHandle, DVec2)> {
        let Some(feature) = self.feature.and_then(|id| store.get(id)) else {
            return Vec::new();
        };
        let Some(extent) = feature.geometry().extent() else {
            return Vec::new();
        };
        let mut handles = Vec::with_capacity(10);
        if !feature.is_measure() {
            for (i, corner) in extent.corners().into_iter().enumerate() {
                handles.push((TransformHandle::Corner(i), corner));
            }
            for side in EdgeSide::ALL {
                handles.push((TransformHandle::Edge(side), side.midpoint(&extent)));
            }
            handles.push((
                TransformHandle::Rotate,
                EdgeSide::Top.midpoint(&extent) + DVec2::new(0.0, rotate_offset),
            ));
        }
        handles.push((TransformHandle::Body, extent.center()));
        handles
    }

    /// Griff unter `pos`. Griffe haben Vorrang vor dem Feature-Körper.
    pub fn pick_handle(
        &self,
        store: &FeatureStore,
        pos: DVec2,
        tolerance: f64,
        rotate_offset: f64,
    ) -> Option<TransformHandle> {
        let id = self.feature?;
        let grip = self
            .handles(store, rotate_offset)
            .into_iter()
            .filter(|(h, _)| *h != TransformHandle::Body)
            .map(|(h, p)| (h, p.distance(pos)))
            .filter(|(_, d)| *d <= tolerance)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(h, _)| h);
        if grip.is_some() {
            return grip;
        }
        let on_body = store
            .get(id)
            .is_some_and(|f| f.geometry().distance_to(pos) <= tolerance);
        on_body.then_some(TransformHandle::Body)
    }

    /// Startet einen Drag am gegebenen Griff.
    pub fn begin(&mut self, store: &FeatureStore, handle: TransformHandle, pos: DVec2) -> bool {
        let Some(original) = self.feature.and_then(|id| store.get(id)).cloned() else {
            return false;
        };
        let Some(extent) = original.geometry().extent() else {
            return false;
        };
        let origin = match handle {
            TransformHandle::Corner(i) => extent.corners()[(i + 2) % 4],
            TransformHandle::Edge(side) => side.opposite().midpoint(&extent),
            TransformHandle::Rotate | TransformHandle::Body => extent.center(),
        };
        log::debug!("Transform-Drag mit {:?} auf Feature {}", handle, original.id);
        self.session = Some(TransformSession {
            handle,
            original,
            origin,
            grabbed: pos,
        });
        true
    }

    /// Aktualisiert den Drag. Die Transformation wird immer auf den
    /// Ausgangszustand angewandt, damit sich keine Rundungsfehler aufsummieren.
    pub fn update(&mut self, store: &mut FeatureStore, pos: DVec2) -> bool {
        let Some(session) = &self.session else {
            return false;
        };
        let transform = match session.handle {
            TransformHandle::Body => AffineTransform::Translate(pos - session.grabbed),
            TransformHandle::Corner(_) => {
                AffineTransform::uniform_scale(session.origin, session.grabbed, pos)
            }
            TransformHandle::Edge(side) => {
                AffineTransform::stretch(session.origin, side.axis(), session.grabbed, pos)
            }
            TransformHandle::Rotate => {
                AffineTransform::rotation(session.origin, session.grabbed, pos)
            }
        };
        let mut moved = session.original.clone();
        moved.apply_transform(&transform);
        let id = moved.id;
        store
            .update(id, |f| {
                f.set_geometry(moved.geometry().clone());
                f.properties = moved.properties;
            })
            .is_some()
    }

    /// Beendet den Drag und gibt das transformierte Feature zurück.
    pub fn end(&mut self) -> Option<FeatureId> {
        self.session.take().map(|s| s.original.id)
    }

    /// Bricht den Drag ab und stellt den Ausgangszustand wieder her.
    pub fn cancel(&mut self, store: &mut FeatureStore) -> bool {
        let Some(session) = self.session.take() else {
            return false;
        };
        let original = session.original;
        store
            .update(original.id, |f| {
                f.set_geometry(original.geometry().clone());
                f.properties = original.properties;
            })
            .is_some()
    }
}

impl ModeController for TransformController {
    fn kind(&self) -> ModeKind {
        ModeKind::Transform
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn activate(&mut self) {
        self.active = true;
    }

    fn deactivate(&mut self) {
        self.active = false;
        self.feature = None;
        self.session = None;
    }

    fn selection(&self) -> Vec<FeatureId> {
        self.feature.into_iter().collect()
    }
}
