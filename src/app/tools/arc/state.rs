//! State-Definitionen und Konstruktor für das Bogen-Werkzeug.

use crate::shared::options::ARC_SEGMENTS;
use glam::DVec2;

/// Anzahl Klicks für einen vollständigen Bogen.
pub(crate) const ARC_CLICKS: usize = 3;

/// Dreipunkt-Bogen-Werkzeug
pub struct ArcTool {
    /// Geklickte Punkte (Start, Durchgang, Ende)
    pub(crate) points: Vec<DVec2>,
    /// Segmente für Vorschau (aus `EditorOptions::arc_segments`)
    pub(crate) segments: usize,
}

impl Default for ArcTool {
    fn default() -> Self {
        Self::new()
    }
}

impl ArcTool {
    pub fn new() -> Self {
        Self {
            points: Vec::with_capacity(ARC_CLICKS),
            segments: ARC_SEGMENTS,
        }
    }

    /// Bisher gesetzte Kontrollpunkte.
    pub fn points(&self) -> &[DVec2] {
        &self.points
    }

    /// Die drei Kontrollpunkte, sobald vollständig.
    pub(crate) fn control_points(&self) -> Option<[DVec2; 3]> {
        match self.points.as_slice() {
            [p1, p2, p3] => Some([*p1, *p2, *p3]),
            _ => None,
        }
    }
}
