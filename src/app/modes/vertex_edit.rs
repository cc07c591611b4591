//! Stützpunkt-Bearbeitung für eine editierbare Feature-Menge.
//!
//! Wird von Select und Merge gemeinsam genutzt. Ein Drag auf einen
//! Stützpunkt verschiebt ihn, ein Drag auf ein Segment fügt dort einen
//! neuen Stützpunkt ein. Polygon-Ringe bleiben dabei geschlossen.

use crate::core::{FeatureId, FeatureStore, Geometry};
use crate::geometry::{closest_point_on_polyline, nearest_vertex};
use glam::DVec2;
use indexmap::IndexSet;

/// Was bei einem Drag-Start getroffen wurde.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VertexPickKind {
    /// Vorhandener Stützpunkt (Index)
    Vertex(usize),
    /// Punkt auf einem Segment (Einfügen nach `segment`)
    Segment { segment: usize, point: DVec2 },
}

/// Treffer eines Stützpunkt-Picks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexPick {
    pub feature: FeatureId,
    pub kind: VertexPickKind,
}

#[derive(Debug, Clone, Copy)]
struct VertexDrag {
    feature: FeatureId,
    vertex: usize,
}

/// Editierbare Menge plus laufender Stützpunkt-Drag.
#[derive(Debug, Clone, Default)]
pub struct VertexEditor {
    editable: IndexSet<FeatureId>,
    drag: Option<VertexDrag>,
}

/// Koordinaten einer stützpunkt-editierbaren Geometrie und ob sie ein Ring ist.
fn editable_coords(geometry: &Geometry) -> Option<(&[DVec2], bool)> {
    match geometry {
        Geometry::LineString(c) => Some((c, false)),
        Geometry::Polygon(c) => Some((c, true)),
        _ => None,
    }
}

fn rebuild(is_ring: bool, coords: Vec<DVec2>) -> Geometry {
    if is_ring {
        Geometry::Polygon(coords)
    } else {
        Geometry::LineString(coords)
    }
}

impl VertexEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Setzt die editierbare Menge neu (nach jeder Selektionsänderung).
    pub fn set_editable(&mut self, ids: impl IntoIterator<Item = FeatureId>) {
        self.editable = ids.into_iter().collect();
    }

    pub fn editable(&self) -> &IndexSet<FeatureId> {
        &self.editable
    }

    /// Leert Menge und Drag.
    pub fn clear(&mut self) {
        self.editable.clear();
        self.drag = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn dragged_feature(&self) -> Option<FeatureId> {
        self.drag.map(|d| d.feature)
    }

    /// Sucht Stützpunkt (bevorzugt) oder Segment innerhalb der Toleranz.
    pub fn pick(&self, store: &FeatureStore, pos: DVec2, tolerance: f64) -> Option<VertexPick> {
        let mut best_vertex: Option<(FeatureId, usize, f64)> = None;
        let mut best_segment: Option<(FeatureId, usize, DVec2, f64)> = None;

        for &id in &self.editable {
            let Some((coords, is_ring)) = store.geometry(id).and_then(editable_coords) else {
                continue;
            };
            if let Some((index, distance)) = nearest_vertex(pos, coords) {
                if distance <= tolerance && best_vertex.is_none_or(|b| distance < b.2) {
                    // Schlusspunkt eines Rings ist der Startpunkt
                    let index = if is_ring && index + 1 == coords.len() {
                        0
                    } else {
                        index
                    };
                    best_vertex = Some((id, index, distance));
                }
            }
            if let Some(hit) = closest_point_on_polyline(pos, coords) {
                if hit.distance <= tolerance && best_segment.is_none_or(|b| hit.distance < b.3) {
                    best_segment = Some((id, hit.segment, hit.point, hit.distance));
                }
            }
        }

        if let Some((feature, index, _)) = best_vertex {
            return Some(VertexPick {
                feature,
                kind: VertexPickKind::Vertex(index),
            });
        }
        best_segment.map(|(feature, segment, point, _)| VertexPick {
            feature,
            kind: VertexPickKind::Segment { segment, point },
        })
    }

    /// Startet den Drag. Bei Segment-Treffern wird zuerst ein Stützpunkt eingefügt.
    pub fn begin(&mut self, store: &mut FeatureStore, pick: VertexPick) -> bool {
        let vertex = match pick.kind {
            VertexPickKind::Vertex(index) => index,
            VertexPickKind::Segment { segment, point } => {
                let Some((coords, is_ring)) = store.geometry(pick.feature).and_then(editable_coords)
                else {
                    return false;
                };
                let mut coords = coords.to_vec();
                let index = (segment + 1).min(coords.len());
                coords.insert(index, point);
                if !store.set_geometry(pick.feature, rebuild(is_ring, coords)) {
                    return false;
                }
                index
            }
        };
        self.drag = Some(VertexDrag {
            feature: pick.feature,
            vertex,
        });
        true
    }

    /// Verschiebt den gegriffenen Stützpunkt.
    pub fn update(&mut self, store: &mut FeatureStore, pos: DVec2) -> bool {
        let Some(drag) = self.drag else {
            return false;
        };
        let Some((coords, is_ring)) = store.geometry(drag.feature).and_then(editable_coords) else {
            return false;
        };
        if drag.vertex >= coords.len() {
            return false;
        }
        let mut coords = coords.to_vec();
        coords[drag.vertex] = pos;
        if is_ring && drag.vertex == 0 {
            if let Some(last) = coords.last_mut() {
                *last = pos;
            }
        }
        store.set_geometry(drag.feature, rebuild(is_ring, coords))
    }

    /// Beendet den Drag und gibt das bearbeitete Feature zurück (Modify-Ende).
    pub fn end(&mut self) -> Option<FeatureId> {
        self.drag.take().map(|d| d.feature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Properties;

    fn store_with(geometry: Geometry) -> (FeatureStore, FeatureId) {
        let mut store = FeatureStore::new();
        let id = store.add(geometry, Properties::new());
        (store, id)
    }

    #[test]
    fn vertex_drag_moves_single_point() {
        let (mut store, id) = store_with(Geometry::LineString(vec![
            DVec2::ZERO,
            DVec2::new(10.0, 0.0),
            DVec2::new(20.0, 0.0),
        ]));
        let mut editor = VertexEditor::new();
        editor.set_editable([id]);

        let pick = editor
            .pick(&store, DVec2::new(10.5, 0.5), 2.0)
            .expect("Treffer");
        assert_eq!(pick.kind, VertexPickKind::Vertex(1));
        assert!(editor.begin(&mut store, pick));
        assert!(editor.update(&mut store, DVec2::new(10.0, 5.0)));
        assert_eq!(editor.end(), Some(id));

        let coords = store.geometry(id).map(Geometry::vertices).unwrap_or_default();
        assert_eq!(coords[1], DVec2::new(10.0, 5.0));
        assert!(!editor.is_dragging());
    }

    #[test]
    fn segment_drag_inserts_vertex() {
        let (mut store, id) =
            store_with(Geometry::LineString(vec![DVec2::ZERO, DVec2::new(10.0, 0.0)]));
        let mut editor = VertexEditor::new();
        editor.set_editable([id]);

        let pick = editor
            .pick(&store, DVec2::new(5.0, 1.0), 2.0)
            .expect("Segment-Treffer");
        assert!(matches!(pick.kind, VertexPickKind::Segment { segment: 0, .. }));
        editor.begin(&mut store, pick);
        editor.update(&mut store, DVec2::new(5.0, 4.0));

        let coords = store.geometry(id).map(Geometry::vertices).unwrap_or_default();
        assert_eq!(coords, vec![DVec2::ZERO, DVec2::new(5.0, 4.0), DVec2::new(10.0, 0.0)]);
    }

    #[test]
    fn polygon_ring_stays_closed() {
        let (mut store, id) = store_with(Geometry::polygon(vec![
            DVec2::ZERO,
            DVec2::new(10.0, 0.0),
            DVec2::new(10.0, 10.0),
        ]));
        let mut editor = VertexEditor::new();
        editor.set_editable([id]);

        let pick = editor.pick(&store, DVec2::new(0.2, 0.1), 1.0).expect("Treffer");
        assert_eq!(pick.kind, VertexPickKind::Vertex(0));
        editor.begin(&mut store, pick);
        editor.update(&mut store, DVec2::new(-3.0, -3.0));

        let ring = store.geometry(id).map(Geometry::vertices).unwrap_or_default();
        assert_eq!(ring.first(), Some(&DVec2::new(-3.0, -3.0)));
        assert_eq!(ring.first(), ring.last());
    }

    #[test]
    fn features_outside_editable_set_are_ignored() {
        let (store, _id) =
            store_with(Geometry::LineString(vec![DVec2::ZERO, DVec2::new(10.0, 0.0)]));
        let editor = VertexEditor::new();
        assert!(editor.pick(&store, DVec2::ZERO, 5.0).is_none());
    }
}
