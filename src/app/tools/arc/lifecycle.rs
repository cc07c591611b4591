//! Lifecycle-Methoden des ArcTool (DrawTool-Implementierung).

use super::super::{DrawKind, DrawTool, ToolAction, ToolPreview, ToolResult};
use super::state::{ArcTool, ARC_CLICKS};
use crate::core::{keys, Feature, Geometry, Properties};
use crate::geometry::{generate_arc, generate_arc_preview};
use crate::shared::EditorOptions;
use glam::DVec2;
use serde_json::Value;

impl DrawTool for ArcTool {
    fn name(&self) -> &str {
        "Bogen"
    }

    fn kind(&self) -> DrawKind {
        DrawKind::Arc
    }

    fn status_text(&self) -> &str {
        match self.points.len() {
            0 => "Startpunkt klicken",
            1 => "Durchgangspunkt klicken",
            2 => "Endpunkt klicken",
            _ => "Bereit",
        }
    }

    fn on_click(&mut self, pos: DVec2, _ortho: bool) -> ToolAction {
        if self.points.len() >= ARC_CLICKS {
            return ToolAction::UpdatePreview;
        }
        self.points.push(pos);
        if self.points.len() == ARC_CLICKS {
            ToolAction::ReadyToExecute
        } else {
            ToolAction::Continue
        }
    }

    fn preview(&self, cursor_pos: DVec2, _ortho: bool) -> ToolPreview {
        if self.points.is_empty() {
            return ToolPreview::default();
        }
        let mut clicked = self.points.clone();
        if clicked.len() < ARC_CLICKS {
            clicked.push(cursor_pos);
        }
        ToolPreview {
            coords: generate_arc_preview(&clicked, self.segments),
            closed: false,
        }
    }

    fn execute(&self, options: &EditorOptions) -> Option<ToolResult> {
        let [p1, p2, p3] = self.control_points()?;
        let coords = generate_arc(p1, p2, p3, options.arc_segments);

        let mut feature = Feature::new(0, Geometry::LineString(coords), Properties::new());
        feature.set_flag(keys::IS_ARC, true);
        feature.set_arc_control_points([p1, p2, p3]);
        feature
            .properties
            .insert(keys::IS_LINE_TYPE.into(), Value::Bool(true));

        Some(ToolResult {
            geometry: feature.geometry().clone(),
            properties: feature.properties,
        })
    }

    fn reset(&mut self) {
        self.points.clear();
    }

    fn is_ready(&self) -> bool {
        self.points.len() == ARC_CLICKS
    }

    fn has_pending_input(&self) -> bool {
        !self.points.is_empty()
    }

    fn undo_last_vertex(&mut self) -> bool {
        self.points.pop().is_some()
    }

    fn configure(&mut self, options: &EditorOptions, _resolution: f64) {
        self.segments = options.arc_segments.max(1);
    }
}
