//! DrawTool-Trait: Schnittstelle für alle Zeichenwerkzeuge.

use super::{DrawKind, ToolAction, ToolPreview, ToolResult};
use crate::shared::EditorOptions;
use glam::DVec2;

/// Schnittstelle für alle Zeichenwerkzeuge (Linie, Messlinie, Polygon, Bogen, Wolke).
///
/// Werkzeuge sind zustandsbehaftet (Klick-Phasen) und erzeugen Preview-Geometrie
/// sowie ein `ToolResult` mit der fertigen Geometrie.
pub trait DrawTool {
    /// Anzeigename für die Toolbar
    fn name(&self) -> &str;

    /// Art des Werkzeugs
    fn kind(&self) -> DrawKind;

    /// Statustext (z.B. "Startpunkt klicken")
    fn status_text(&self) -> &str;

    /// Viewport-Klick verarbeiten. `ortho` ist der Ortho-Modus zum Klickzeitpunkt.
    fn on_click(&mut self, pos: DVec2, ortho: bool) -> ToolAction;

    /// Preview-Geometrie für die aktuelle Mausposition berechnen.
    fn preview(&self, cursor_pos: DVec2, ortho: bool) -> ToolPreview;

    /// Ergebnis erzeugen (Geometrie + Properties als reine Daten).
    fn execute(&self, options: &EditorOptions) -> Option<ToolResult>;

    /// Werkzeug-Zustand zurücksetzen (Escape / Werkzeugwechsel).
    fn reset(&mut self);

    /// Ist das Werkzeug bereit zur Ausführung?
    fn is_ready(&self) -> bool;

    /// Hat das Werkzeug angefangene Eingaben?
    ///
    /// Wird für die stufenweise Escape-Logik und Ctrl+Z benötigt:
    /// Werkzeug zeichnet → Abbruch bzw. letzten Punkt entfernen.
    fn has_pending_input(&self) -> bool {
        false
    }

    /// Entfernt den zuletzt gesetzten Punkt. `true`, wenn etwas entfernt wurde.
    fn undo_last_vertex(&mut self) -> bool {
        false
    }

    /// Laufzeit-Optionen und aktuelle Auflösung (Welteinheiten pro Pixel) übernehmen.
    fn configure(&mut self, _options: &EditorOptions, _resolution: f64) {}

    /// Startet einen Freihand-Drag. `true`, wenn das Werkzeug den Drag übernimmt.
    fn on_drag_start(&mut self, _pos: DVec2) -> bool {
        false
    }

    /// Aktualisiert den Freihand-Drag.
    fn on_drag_update(&mut self, _pos: DVec2) {}

    /// Beendet den Freihand-Drag.
    fn on_drag_end(&mut self) -> ToolAction {
        ToolAction::Continue
    }
}
