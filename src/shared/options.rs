//! Zentrale Konfiguration für die Feature-Editier-Engine.
//!
//! `EditorOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use crate::geometry::Projection;
use serde::{Deserialize, Serialize};

// ── Treffertest ─────────────────────────────────────────────────────

/// Klick-Toleranz in Screen-Pixeln (Welt = px × Auflösung).
pub const HIT_TOLERANCE_PX: f64 = 8.0;
/// Endpunkt-Toleranz für den Start einer Fortsetzung in Screen-Pixeln.
pub const CONTINUATION_TOLERANCE_PX: f64 = 10.0;

// ── Merge ───────────────────────────────────────────────────────────

/// Maximaler Endpunktabstand für einen Merge-Vorschlag (Karteneinheiten).
pub const MERGE_TOLERANCE: f64 = 50.0;

// ── Zeichnen ────────────────────────────────────────────────────────

/// Teilstücke eines Kreisbogens.
pub const ARC_SEGMENTS: usize = 32;
/// Ziel-Sehnenlänge eines Revisionswolken-Bogens (Karteneinheiten).
pub const REVISION_CLOUD_ARC_LENGTH: f64 = 20.0;
/// Wölbung der Revisionswolke relativ zur Sehne.
pub const REVISION_CLOUD_BULGE_RATIO: f64 = 0.3;
/// Teilstücke pro Revisionswolken-Bogen.
pub const REVISION_CLOUD_ARC_SAMPLES: usize = 8;
/// Mindestabstand aufeinanderfolgender Freihand-Punkte in Screen-Pixeln.
pub const FREEHAND_MIN_SPACING_PX: f64 = 4.0;

// ── Transformation ──────────────────────────────────────────────────

/// Abstand des Dreh-Griffs oberhalb der Box in Screen-Pixeln.
pub const TRANSFORM_ROTATE_HANDLE_OFFSET_PX: f64 = 30.0;

// ── History ─────────────────────────────────────────────────────────

/// Maximale Undo-Tiefe.
pub const HISTORY_DEPTH: usize = 200;

/// Wie Klicks die Selektion verändern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MultiSelectPolicy {
    /// Jeder Klick ersetzt die Selektion
    SingleReplace,
    /// Mit Modifier additiv (Toggle), sonst ersetzen
    #[default]
    ModifierAdditive,
    /// Jeder Klick toggelt die Zugehörigkeit
    AlwaysAdditive,
}

/// Laufzeit-Optionen der Editier-Engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorOptions {
    pub hit_tolerance_px: f64,
    pub continuation_tolerance_px: f64,
    pub merge_tolerance: f64,
    pub arc_segments: usize,
    pub revision_cloud_arc_length: f64,
    pub revision_cloud_bulge_ratio: f64,
    pub revision_cloud_arc_samples: usize,
    pub freehand_min_spacing_px: f64,
    pub multi_select_policy: MultiSelectPolicy,
    /// Drag-Box "enthalten"-Prüfung im ungedrehten Kartenrahmen
    pub drag_box_rotation_compensation: bool,
    /// Projektion für Meter-Umrechnung (Offset, Messlinien)
    pub projection: Projection,
    pub history_depth: usize,
    pub transform_rotate_handle_offset_px: f64,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            hit_tolerance_px: HIT_TOLERANCE_PX,
            continuation_tolerance_px: CONTINUATION_TOLERANCE_PX,
            merge_tolerance: MERGE_TOLERANCE,
            arc_segments: ARC_SEGMENTS,
            revision_cloud_arc_length: REVISION_CLOUD_ARC_LENGTH,
            revision_cloud_bulge_ratio: REVISION_CLOUD_BULGE_RATIO,
            revision_cloud_arc_samples: REVISION_CLOUD_ARC_SAMPLES,
            freehand_min_spacing_px: FREEHAND_MIN_SPACING_PX,
            multi_select_policy: MultiSelectPolicy::default(),
            drag_box_rotation_compensation: true,
            projection: Projection::default(),
            history_depth: HISTORY_DEPTH,
            transform_rotate_handle_offset_px: TRANSFORM_ROTATE_HANDLE_OFFSET_PX,
        }
    }
}

impl EditorOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_toml_str(&content),
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Parst Optionen aus TOML-Text. Fehlende Schlüssel → Standardwert.
    pub fn from_toml_str(content: &str) -> Self {
        match toml::from_str(content) {
            Ok(opts) => {
                log::info!("Optionen geladen");
                opts
            }
            Err(e) => {
                log::warn!("Optionen fehlerhaft, verwende Standardwerte: {}", e);
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Klick-Toleranz in Welteinheiten bei gegebener Auflösung (Einheiten pro Pixel).
    pub fn hit_tolerance(&self, resolution: f64) -> f64 {
        self.hit_tolerance_px * resolution
    }

    /// Fortsetzungs-Toleranz in Welteinheiten.
    pub fn continuation_tolerance(&self, resolution: f64) -> f64 {
        self.continuation_tolerance_px * resolution
    }

    /// Parameter für die Revisionswolke.
    pub fn cloud_params(&self) -> crate::geometry::CloudParams {
        crate::geometry::CloudParams {
            arc_length: self.revision_cloud_arc_length,
            bulge_ratio: self.revision_cloud_bulge_ratio,
            arc_samples: self.revision_cloud_arc_samples,
        }
    }
}
