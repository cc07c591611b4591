//! Endpunkt-Fortsetzung: verschachtelte Zeichensitzung an einem Linienende.

use crate::app::tools::polyline::PolylineTool;
use crate::app::tools::{DrawKind, DrawTool, ToolPreview};
use crate::core::{FeatureId, FeatureStore, Geometry};
use crate::geometry::LineEnd;
use glam::DVec2;

/// Laufende Fortsetzung einer Linie.
pub struct ContinuationSession {
    pub feature: FeatureId,
    pub endpoint: LineEnd,
    pub anchor: DVec2,
    tool: PolylineTool,
}

impl ContinuationSession {
    /// Startet eine Sitzung am gegebenen Ende.
    pub fn new(feature: FeatureId, endpoint: LineEnd, anchor: DVec2) -> Self {
        Self {
            feature,
            endpoint,
            anchor,
            tool: PolylineTool::anchored(DrawKind::Line, anchor),
        }
    }

    /// Weiteren Punkt setzen.
    pub fn click(&mut self, pos: DVec2, ortho: bool) {
        self.tool.on_click(pos, ortho);
    }

    pub fn preview(&self, cursor: DVec2, ortho: bool) -> ToolPreview {
        self.tool.preview(cursor, ortho)
    }

    /// Entfernt den letzten neuen Punkt (der Anker bleibt).
    pub fn undo_last_vertex(&mut self) -> bool {
        self.tool.undo_last_vertex()
    }

    pub fn has_new_points(&self) -> bool {
        self.tool.has_pending_input()
    }

    /// Neue Punkte in Zeichenreihenfolge (ohne Anker).
    pub fn new_points(&self) -> Vec<DVec2> {
        self.tool.new_points()
    }

    /// Verlängert das Original-Feature um die neuen Punkte.
    ///
    /// Am Ende werden die Punkte angehängt, am Anfang umgekehrt vorangestellt.
    /// Ohne neue Punkte bleibt das Feature unverändert (`false`).
    pub fn commit(self, store: &mut FeatureStore) -> bool {
        let added = self.new_points();
        if added.is_empty() {
            return false;
        }
        let Some(coords) = store.get(self.feature).and_then(|f| f.line_coords()) else {
            log::warn!("Fortsetzung: Feature {} ist keine Linie mehr", self.feature);
            return false;
        };

        let extended: Vec<DVec2> = match self.endpoint {
            LineEnd::End => coords.iter().copied().chain(added).collect(),
            LineEnd::Start => added.into_iter().rev().chain(coords.iter().copied()).collect(),
        };
        store.set_geometry(self.feature, Geometry::LineString(extended))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Properties;

    fn line_store() -> (FeatureStore, FeatureId) {
        let mut store = FeatureStore::new();
        let id = store.add(
            Geometry::LineString(vec![DVec2::new(0.0, 0.0), DVec2::new(10.0, 0.0)]),
            Properties::new(),
        );
        (store, id)
    }

    fn coords(store: &FeatureStore, id: FeatureId) -> Vec<DVec2> {
        store.geometry(id).map(Geometry::vertices).unwrap_or_default()
    }

    #[test]
    fn end_continuation_appends_points() {
        let (mut store, id) = line_store();
        let mut session = ContinuationSession::new(id, LineEnd::End, DVec2::new(10.0, 0.0));
        session.click(DVec2::new(20.0, 0.0), false);
        session.click(DVec2::new(20.0, 10.0), false);
        assert!(session.commit(&mut store));
        assert_eq!(
            coords(&store, id),
            vec![
                DVec2::new(0.0, 0.0),
                DVec2::new(10.0, 0.0),
                DVec2::new(20.0, 0.0),
                DVec2::new(20.0, 10.0)
            ]
        );
    }

    #[test]
    fn start_continuation_prepends_reversed() {
        let (mut store, id) = line_store();
        let mut session = ContinuationSession::new(id, LineEnd::Start, DVec2::new(0.0, 0.0));
        session.click(DVec2::new(-10.0, 0.0), false);
        session.click(DVec2::new(-10.0, 5.0), false);
        assert!(session.commit(&mut store));
        assert_eq!(
            coords(&store, id),
            vec![
                DVec2::new(-10.0, 5.0),
                DVec2::new(-10.0, 0.0),
                DVec2::new(0.0, 0.0),
                DVec2::new(10.0, 0.0)
            ]
        );
    }

    #[test]
    fn ortho_applies_from_anchor() {
        let (mut store, id) = line_store();
        let mut session = ContinuationSession::new(id, LineEnd::End, DVec2::new(10.0, 0.0));
        session.click(DVec2::new(12.0, 8.0), true);
        session.commit(&mut store);
        let c = coords(&store, id);
        assert_eq!(c.len(), 3);
        assert!((c[2].x - 10.0).abs() < 1e-12);
    }

    #[test]
    fn commit_without_points_is_noop() {
        let (mut store, id) = line_store();
        let mut session = ContinuationSession::new(id, LineEnd::End, DVec2::new(10.0, 0.0));
        session.click(DVec2::new(20.0, 0.0), false);
        assert!(session.undo_last_vertex());
        assert!(!session.undo_last_vertex());
        store.drain_changes();
        assert!(!session.commit(&mut store));
        assert!(store.drain_changes().is_empty());
        assert_eq!(coords(&store, id).len(), 2);
    }
}
