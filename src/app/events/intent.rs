use crate::app::modes::MergeCandidate;
use crate::app::state::EditorTool;
use crate::core::{FeatureCollection, FeatureId};
use crate::geometry::OffsetSide;
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Zustand der Modifier-Tasten bei einer Eingabe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    /// Additive Selektion
    pub shift: bool,
    /// Ctrl bzw. Cmd (Tastenkürzel)
    pub ctrl: bool,
    /// Startet die Endpunkt-Fortsetzung
    pub alt: bool,
}

/// Tasten, auf die der Editor reagiert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    Escape,
    Enter,
    Delete,
    Backspace,
    Z,
    Y,
    A,
}

/// Eingaben des Hosts ohne eigene Mutationslogik.
///
/// Positionen sind bereits in Kartenkoordinaten umgerechnet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum AppIntent {
    /// Host hat genau ein Werkzeug aktiviert
    ActiveToolChanged { tool: EditorTool },
    /// Ortho-Modus umgeschaltet (wirkt auf das offene Segment)
    OrthoModeSet { enabled: bool },
    /// Kartenauflösung (Einheiten pro Pixel) oder Drehung geändert
    ViewChanged {
        resolution: f64,
        #[serde(default)]
        rotation: f64,
    },
    PointerClicked {
        world_pos: DVec2,
        #[serde(default)]
        modifiers: Modifiers,
    },
    PointerDoubleClicked { world_pos: DVec2 },
    PointerMoved { world_pos: DVec2 },
    PointerDragStarted {
        world_pos: DVec2,
        #[serde(default)]
        modifiers: Modifiers,
    },
    PointerDragged { world_pos: DVec2 },
    PointerDragEnded { world_pos: DVec2 },
    /// Aufgezogenes Auswahlrechteck (Modifier-Drag), mit Bildschirm-Y für die Richtung
    DragBoxCompleted {
        world_start: DVec2,
        world_end: DVec2,
        screen_start_y: f64,
        screen_end_y: f64,
    },
    KeyPressed {
        key: Key,
        #[serde(default)]
        modifiers: Modifiers,
    },
    /// Offset-Dialog bestätigt
    OffsetConfirmed {
        feature: FeatureId,
        side: OffsetSide,
        distance: f64,
    },
    OffsetCancelled,
    /// Merge-Anfrage bestätigt
    MergeConfirmed { candidate: MergeCandidate },
    UndoRequested,
    RedoRequested,
    SelectAllRequested,
    ClearSelectionRequested,
    DeleteSelectedRequested,
    /// Neuer Feature-Bestand (ersetzt den aktuellen)
    FeaturesLoaded { collection: FeatureCollection },
}
