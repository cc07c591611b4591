//! Offset-Modus: Klick auf eine Linie erzeugt eine Offset-Anfrage für den Host-Dialog.

use super::{ModeController, ModeKind};
use crate::app::use_cases::selection::pick_feature;
use crate::core::{Feature, FeatureId, FeatureStore};
use glam::DVec2;

#[derive(Debug, Default)]
pub struct OffsetController {
    active: bool,
    /// Zuletzt angefragtes Feature (bis zur Bestätigung)
    pending: Option<FeatureId>,
}

impl OffsetController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sucht ein versetzbares Feature unter `pos` und merkt es als offene Anfrage.
    pub fn request_at(&mut self, store: &FeatureStore, pos: DVec2, tolerance: f64) -> Option<FeatureId> {
        if !self.active {
            return None;
        }
        let hit = pick_feature(store, pos, tolerance, Feature::is_offsettable)?;
        self.pending = Some(hit);
        Some(hit)
    }

    pub fn pending(&self) -> Option<FeatureId> {
        self.pending
    }

    /// Schließt die offene Anfrage ab.
    pub fn take_pending(&mut self) -> Option<FeatureId> {
        self.pending.take()
    }
}

impl ModeController for OffsetController {
    fn kind(&self) -> ModeKind {
        ModeKind::Offset
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn activate(&mut self) {
        self.active = true;
    }

    fn deactivate(&mut self) {
        self.active = false;
        self.pending = None;
    }

    fn selection(&self) -> Vec<FeatureId> {
        self.pending.into_iter().collect()
    }
}
