//! Lifecycle-Methoden des PolylineTool (DrawTool-Implementierung).

use super::super::{DrawKind, DrawTool, ToolAction, ToolPreview, ToolResult};
use super::state::PolylineTool;
use crate::core::{keys, Geometry, Properties};
use crate::geometry::{apply_ortho_segments, polyline_length_meters};
use crate::shared::EditorOptions;
use glam::DVec2;
use serde_json::Value;

impl DrawTool for PolylineTool {
    fn name(&self) -> &str {
        match self.kind {
            DrawKind::Measure => "Messlinie",
            DrawKind::Polygon => "Polygon",
            _ => "Linie",
        }
    }

    fn kind(&self) -> DrawKind {
        self.kind
    }

    fn status_text(&self) -> &str {
        if self.points.len() <= self.fixed_points {
            "Startpunkt klicken"
        } else if self.is_ready() {
            "Weitere Punkte klicken (Enter/Doppelklick beendet, Escape bricht ab)"
        } else {
            "Nächsten Punkt klicken"
        }
    }

    fn on_click(&mut self, pos: DVec2, ortho: bool) -> ToolAction {
        if !self.points.is_empty() {
            // Ortho-Zustand dieses Segments einfrieren
            self.ortho_flags.push(ortho);
        }
        self.points.push(pos);
        ToolAction::Continue
    }

    fn preview(&self, cursor_pos: DVec2, ortho: bool) -> ToolPreview {
        if self.points.is_empty() {
            return ToolPreview::default();
        }
        let mut points = self.points.clone();
        points.push(cursor_pos);
        let mut flags = self.ortho_flags.clone();
        // Nur das offene Segment folgt dem Live-Zustand
        flags.push(ortho);

        ToolPreview {
            coords: apply_ortho_segments(&points, &flags),
            closed: self.kind == DrawKind::Polygon,
        }
    }

    fn execute(&self, options: &EditorOptions) -> Option<ToolResult> {
        let coords = self.constrained_points();
        if coords.len() < self.min_points() {
            return None;
        }

        let mut properties = Properties::new();
        let geometry = match self.kind {
            DrawKind::Polygon => Geometry::polygon(coords),
            DrawKind::Measure => {
                let length = polyline_length_meters(&coords, options.projection);
                properties.insert(keys::IS_LINE_TYPE.into(), Value::Bool(true));
                properties.insert(keys::IS_MEASURE.into(), Value::Bool(true));
                properties.insert(keys::MEASURE_LENGTH.into(), Value::from(length));
                Geometry::LineString(coords)
            }
            _ => {
                properties.insert(keys::IS_LINE_TYPE.into(), Value::Bool(true));
                Geometry::LineString(coords)
            }
        };

        Some(ToolResult {
            geometry,
            properties,
        })
    }

    fn reset(&mut self) {
        self.points.truncate(self.fixed_points);
        self.ortho_flags.truncate(self.fixed_points.saturating_sub(1));
    }

    fn is_ready(&self) -> bool {
        self.constrained_points().len() >= self.min_points()
    }

    fn has_pending_input(&self) -> bool {
        self.points.len() > self.fixed_points
    }

    fn undo_last_vertex(&mut self) -> bool {
        if self.points.len() <= self.fixed_points {
            return false;
        }
        self.points.pop();
        self.ortho_flags
            .truncate(self.points.len().saturating_sub(1));
        true
    }
}
