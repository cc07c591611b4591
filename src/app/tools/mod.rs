//! Trait-basiertes Zeichenwerkzeug-System.
//!
//! Jedes Werkzeug implementiert den `DrawTool`-Trait und wird beim
//! `ToolManager` registriert. Werkzeuge erzeugen reine Daten (`ToolResult`),
//! die Mutation erfolgt zentral in `apply_tool_result`.

/// Dreipunkt-Kreisbogen-Werkzeug.
pub mod arc;
/// DrawTool-Trait: Schnittstelle für alle Zeichenwerkzeuge.
mod draw_tool;
/// Polylinien-Werkzeug (Linie, Messlinie, Polygon) mit Ortho-Tracking pro Segment.
pub mod polyline;
/// Freihand-Revisionswolke.
pub mod revision_cloud;

pub use draw_tool::DrawTool;

use crate::core::{Geometry, Properties};
use glam::DVec2;
use serde::{Deserialize, Serialize};

// ── Typen ────────────────────────────────────────────────────────

/// Art des Zeichenwerkzeugs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawKind {
    Line,
    Measure,
    Polygon,
    Arc,
    RevisionCloud,
}

/// Rückgabe von `on_click`, steuert den Tool-Flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolAction {
    /// Punkt registriert, weitere Eingabe nötig
    Continue,
    /// Alle nötigen Punkte gesetzt, bereit zur Ausführung
    ReadyToExecute,
    /// Vorschau aktualisiert, keine neue Eingabe übernommen
    UpdatePreview,
}

/// Vorschau-Geometrie für den Host (halbtransparent im Viewport).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolPreview {
    /// Vorschau-Koordinaten
    pub coords: Vec<DVec2>,
    /// Als geschlossener Ring darstellen
    pub closed: bool,
}

/// Ergebnis eines Zeichenwerkzeugs (reine Daten, keine Mutation).
#[derive(Debug, Clone, PartialEq)]
pub struct ToolResult {
    pub geometry: Geometry,
    pub properties: Properties,
}

// ── ToolManager ──────────────────────────────────────────────────

/// Verwaltet registrierte Zeichenwerkzeuge und das aktive Werkzeug.
pub struct ToolManager {
    tools: Vec<Box<dyn DrawTool>>,
    active_index: Option<usize>,
}

impl Default for ToolManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolManager {
    /// Erstellt einen ToolManager mit allen Standard-Werkzeugen.
    pub fn new() -> Self {
        let mut manager = Self {
            tools: Vec::new(),
            active_index: None,
        };
        manager.register(Box::new(polyline::PolylineTool::new(DrawKind::Line)));
        manager.register(Box::new(polyline::PolylineTool::new(DrawKind::Measure)));
        manager.register(Box::new(polyline::PolylineTool::new(DrawKind::Polygon)));
        manager.register(Box::new(arc::ArcTool::new()));
        manager.register(Box::new(revision_cloud::RevisionCloudTool::new()));
        manager
    }

    /// Registriert ein weiteres Werkzeug.
    pub fn register(&mut self, tool: Box<dyn DrawTool>) {
        self.tools.push(tool);
    }

    /// Gibt Art und Name aller registrierten Werkzeuge zurück.
    pub fn tool_entries(&self) -> Vec<(DrawKind, &str)> {
        self.tools.iter().map(|t| (t.kind(), t.name())).collect()
    }

    /// Aktiviert das Werkzeug der gegebenen Art. Das vorherige wird zurückgesetzt.
    pub fn set_active(&mut self, kind: DrawKind) -> bool {
        let Some(index) = self.tools.iter().position(|t| t.kind() == kind) else {
            log::warn!("Kein Werkzeug für {:?} registriert", kind);
            return false;
        };
        if let Some(old) = self.active_index {
            if old != index {
                self.tools[old].reset();
            }
        }
        self.active_index = Some(index);
        true
    }

    pub fn active_kind(&self) -> Option<DrawKind> {
        self.active_tool().map(|t| t.kind())
    }

    pub fn active_tool(&self) -> Option<&dyn DrawTool> {
        self.active_index.map(|i| self.tools[i].as_ref())
    }

    pub fn active_tool_mut(&mut self) -> Option<&mut dyn DrawTool> {
        let i = self.active_index?;
        Some(self.tools[i].as_mut())
    }

    /// Setzt das aktive Werkzeug zurück und deaktiviert es.
    pub fn reset(&mut self) {
        if let Some(i) = self.active_index {
            self.tools[i].reset();
        }
        self.active_index = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manager_registers_every_draw_kind() {
        let manager = ToolManager::new();
        let kinds: Vec<_> = manager.tool_entries().into_iter().map(|(k, _)| k).collect();
        assert_eq!(
            kinds,
            vec![
                DrawKind::Line,
                DrawKind::Measure,
                DrawKind::Polygon,
                DrawKind::Arc,
                DrawKind::RevisionCloud
            ]
        );
    }

    #[test]
    fn switching_tools_resets_previous_one() {
        let mut manager = ToolManager::new();
        manager.set_active(DrawKind::Line);
        if let Some(tool) = manager.active_tool_mut() {
            tool.on_click(DVec2::ZERO, false);
        }
        assert!(manager.active_tool().is_some_and(|t| t.has_pending_input()));

        manager.set_active(DrawKind::Arc);
        manager.set_active(DrawKind::Line);
        assert!(manager.active_tool().is_some_and(|t| !t.has_pending_input()));
    }
}
