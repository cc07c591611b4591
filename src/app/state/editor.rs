use crate::app::modes::ModeKind;
use crate::app::tools::{DrawKind, ToolManager, ToolPreview};
use serde::{Deserialize, Serialize};

/// Vom Host gewähltes Werkzeug.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditorTool {
    /// Standard: Features selektieren und bearbeiten
    #[default]
    Select,
    Transform,
    Split,
    Merge,
    Offset,
    /// Zeichnen mit dem Werkzeug der gegebenen Art
    Draw(DrawKind),
}

impl EditorTool {
    /// Modus, den dieses Werkzeug aktiviert.
    pub fn mode(&self) -> ModeKind {
        match self {
            EditorTool::Select => ModeKind::Select,
            EditorTool::Transform => ModeKind::Transform,
            EditorTool::Split => ModeKind::Split,
            EditorTool::Merge => ModeKind::Merge,
            EditorTool::Offset => ModeKind::Offset,
            EditorTool::Draw(_) => ModeKind::Draw,
        }
    }
}

/// Zustand des aktuellen Editor-Werkzeugs
pub struct EditorToolState {
    /// Aktives Werkzeug
    pub active_tool: EditorTool,
    /// Ortho-Modus (gilt für das gerade offene Segment)
    pub ortho_enabled: bool,
    /// Zeichenwerkzeuge
    pub tool_manager: ToolManager,
    /// Aktuelle Vorschau für den Host
    pub preview: Option<ToolPreview>,
}

impl Default for EditorToolState {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorToolState {
    /// Erstellt den Standard-Werkzeugzustand (Select aktiv).
    pub fn new() -> Self {
        Self {
            active_tool: EditorTool::Select,
            ortho_enabled: false,
            tool_manager: ToolManager::new(),
            preview: None,
        }
    }
}
