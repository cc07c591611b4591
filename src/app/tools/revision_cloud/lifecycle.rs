//! Lifecycle-Methoden des RevisionCloudTool (DrawTool-Implementierung).

use super::super::{DrawKind, DrawTool, ToolAction, ToolPreview, ToolResult};
use super::state::RevisionCloudTool;
use crate::core::{keys, Geometry, Properties};
use crate::geometry::revision_cloud::{distinct_points, MIN_PATH_POINTS};
use crate::geometry::generate_revision_cloud_with;
use crate::shared::EditorOptions;
use glam::DVec2;
use serde_json::Value;

impl DrawTool for RevisionCloudTool {
    fn name(&self) -> &str {
        "Revisionswolke"
    }

    fn kind(&self) -> DrawKind {
        DrawKind::RevisionCloud
    }

    fn status_text(&self) -> &str {
        if self.drawing {
            "Umriss ziehen, Loslassen beendet"
        } else if self.path.is_empty() {
            "Umriss mit gedrückter Maustaste zeichnen"
        } else {
            "Weitere Punkte klicken, Enter beendet"
        }
    }

    fn on_click(&mut self, pos: DVec2, _ortho: bool) -> ToolAction {
        self.path.push(pos);
        ToolAction::Continue
    }

    fn preview(&self, cursor_pos: DVec2, _ortho: bool) -> ToolPreview {
        if self.path.is_empty() {
            return ToolPreview::default();
        }
        let mut coords = self.path.clone();
        if !self.drawing {
            coords.push(cursor_pos);
        }
        ToolPreview {
            coords,
            closed: true,
        }
    }

    fn execute(&self, options: &EditorOptions) -> Option<ToolResult> {
        if distinct_points(&self.path, MIN_PATH_POINTS) < MIN_PATH_POINTS {
            log::debug!("Revisionswolke: weniger als {} verschiedene Punkte", MIN_PATH_POINTS);
            return None;
        }
        let ring = generate_revision_cloud_with(&self.path, &options.cloud_params());

        let mut properties = Properties::new();
        properties.insert(keys::IS_REVISION_CLOUD.into(), Value::Bool(true));
        Some(ToolResult {
            geometry: Geometry::polygon(ring),
            properties,
        })
    }

    fn reset(&mut self) {
        self.path.clear();
        self.drawing = false;
    }

    fn is_ready(&self) -> bool {
        !self.drawing && self.path.len() >= MIN_PATH_POINTS
    }

    fn has_pending_input(&self) -> bool {
        !self.path.is_empty()
    }

    fn undo_last_vertex(&mut self) -> bool {
        if self.drawing {
            return false;
        }
        self.path.pop().is_some()
    }

    fn configure(&mut self, options: &EditorOptions, resolution: f64) {
        self.min_spacing = options.freehand_min_spacing_px * resolution;
    }

    fn on_drag_start(&mut self, pos: DVec2) -> bool {
        self.path.clear();
        self.path.push(pos);
        self.drawing = true;
        true
    }

    fn on_drag_update(&mut self, pos: DVec2) {
        if self.drawing {
            self.push_sample(pos);
        }
    }

    fn on_drag_end(&mut self) -> ToolAction {
        self.drawing = false;
        if self.path.len() >= MIN_PATH_POINTS {
            ToolAction::ReadyToExecute
        } else {
            log::debug!("Revisionswolke: Pfad zu kurz ({} Punkte)", self.path.len());
            self.path.clear();
            ToolAction::Continue
        }
    }
}
