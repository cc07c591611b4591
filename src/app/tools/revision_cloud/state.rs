//! State-Definitionen und Konstruktor für das Revisionswolken-Werkzeug.

use crate::shared::options::FREEHAND_MIN_SPACING_PX;
use glam::DVec2;

/// Revisionswolken-Werkzeug
pub struct RevisionCloudTool {
    /// Aufgezeichneter Pfad (Klicks oder Freihand)
    pub(crate) path: Vec<DVec2>,
    /// Läuft gerade ein Freihand-Drag?
    pub(crate) drawing: bool,
    /// Mindestabstand zwischen Freihand-Punkten in Welteinheiten
    pub(crate) min_spacing: f64,
}

impl RevisionCloudTool {
    pub fn new() -> Self {
        Self {
            path: Vec::new(),
            drawing: false,
            min_spacing: FREEHAND_MIN_SPACING_PX,
        }
    }

    /// Bisher aufgezeichneter Pfad.
    pub fn path(&self) -> &[DVec2] {
        &self.path
    }

    /// Hängt einen Freihand-Punkt an, wenn er weit genug vom letzten entfernt ist.
    pub(crate) fn push_sample(&mut self, pos: DVec2) -> bool {
        match self.path.last() {
            Some(last) if last.distance(pos) < self.min_spacing => false,
            _ => {
                self.path.push(pos);
                true
            }
        }
    }
}

impl Default for RevisionCloudTool {
    fn default() -> Self {
        Self::new()
    }
}
