//! State-Definitionen und Konstruktor für das Polylinien-Werkzeug.

use super::super::DrawKind;
use crate::geometry::apply_ortho_segments;
use glam::DVec2;

/// Mindestabstand, unter dem zwei aufeinanderfolgende Punkte als Doppelklick-Duplikat gelten.
const DUPLICATE_EPSILON: f64 = 1e-9;

/// Polylinien-Werkzeug
pub struct PolylineTool {
    pub(crate) kind: DrawKind,
    /// Geklickte Rohpunkte (ohne Ortho-Korrektur)
    pub(crate) points: Vec<DVec2>,
    /// Ortho-Flag je bestätigtem Segment: `ortho_flags[i]` gilt für Segment i → i+1
    pub(crate) ortho_flags: Vec<bool>,
    /// Anzahl fester Anfangspunkte (Fortsetzungs-Anker), die nicht entfernt werden
    pub(crate) fixed_points: usize,
}

impl PolylineTool {
    /// Erstellt ein leeres Werkzeug der gegebenen Art.
    pub fn new(kind: DrawKind) -> Self {
        Self {
            kind,
            points: Vec::new(),
            ortho_flags: Vec::new(),
            fixed_points: 0,
        }
    }

    /// Werkzeug, das bereits an einem festen Anker beginnt (Endpunkt-Fortsetzung).
    pub fn anchored(kind: DrawKind, anchor: DVec2) -> Self {
        Self {
            kind,
            points: vec![anchor],
            ortho_flags: Vec::new(),
            fixed_points: 1,
        }
    }

    /// Geklickte Rohpunkte.
    pub fn points(&self) -> &[DVec2] {
        &self.points
    }

    /// Eingefrorene Ortho-Flags je Segment.
    pub fn ortho_flags(&self) -> &[bool] {
        &self.ortho_flags
    }

    /// Punkte nach segmentweiser Ortho-Korrektur, ohne Doppelklick-Duplikate.
    pub fn constrained_points(&self) -> Vec<DVec2> {
        let mut out = apply_ortho_segments(&self.points, &self.ortho_flags);
        out.dedup_by(|b, a| a.distance(*b) < DUPLICATE_EPSILON);
        out
    }

    /// Neu gesetzte Punkte nach dem festen Anker (ortho-korrigiert).
    pub fn new_points(&self) -> Vec<DVec2> {
        let constrained = apply_ortho_segments(&self.points, &self.ortho_flags);
        let mut out: Vec<DVec2> = constrained.into_iter().skip(self.fixed_points).collect();
        out.dedup_by(|b, a| a.distance(*b) < DUPLICATE_EPSILON);
        if let (Some(&anchor), Some(&first)) = (self.points.first(), out.first()) {
            if self.fixed_points > 0 && anchor.distance(first) < DUPLICATE_EPSILON {
                out.remove(0);
            }
        }
        out
    }

    pub(crate) fn min_points(&self) -> usize {
        match self.kind {
            DrawKind::Polygon => 3,
            _ => 2,
        }
    }
}
