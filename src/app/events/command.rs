use crate::app::modes::MergeCandidate;
use crate::app::state::EditorTool;
use crate::app::use_cases::selection::BoxSelectMode;
use crate::core::{FeatureCollection, FeatureId};
use crate::geometry::{LineEnd, OffsetSide};
use glam::DVec2;

/// Commands sind mutierende Schritte, die zentral ausgeführt werden.
///
/// Toleranzen sind bereits in Karteneinheiten umgerechnet.
#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    // ── Modus & Ansicht ─────────────────────────────────────────────
    SetEditorTool { tool: EditorTool },
    SetOrthoMode { enabled: bool },
    SetView { resolution: f64, rotation: f64 },

    // ── Selektion ───────────────────────────────────────────────────
    SelectAtPosition {
        world_pos: DVec2,
        tolerance: f64,
        additive: bool,
    },
    SelectInBox {
        corner_a: DVec2,
        corner_b: DVec2,
        mode: BoxSelectMode,
    },
    SelectAll,
    ClearSelection,
    DeleteSelected,

    // ── Select-Drag (Stützpunkt, Verschieben, Bogen-Griff) ─────────
    BeginSelectDrag { world_pos: DVec2, tolerance: f64 },
    UpdateSelectDrag { world_pos: DVec2 },
    EndSelectDrag,

    // ── Endpunkt-Fortsetzung ────────────────────────────────────────
    StartContinuation {
        feature: FeatureId,
        endpoint: LineEnd,
        anchor: DVec2,
    },
    ContinuationClick { world_pos: DVec2 },
    ContinuationPreview { world_pos: DVec2 },
    ContinuationUndoVertex,
    CompleteContinuation,
    CancelContinuation,

    // ── Zeichnen ────────────────────────────────────────────────────
    DrawClick { world_pos: DVec2 },
    DrawPreview { world_pos: DVec2 },
    DrawDragStart { world_pos: DVec2 },
    DrawDragUpdate { world_pos: DVec2 },
    DrawDragEnd,
    DrawUndoVertex,
    FinishDraw,
    CancelDraw,

    // ── Transform ───────────────────────────────────────────────────
    TransformSelect { world_pos: DVec2, tolerance: f64 },
    BeginTransform { world_pos: DVec2, tolerance: f64 },
    UpdateTransform { world_pos: DVec2 },
    EndTransform,
    CancelTransform,

    // ── Split / Merge / Offset ──────────────────────────────────────
    SplitAt { world_pos: DVec2, tolerance: f64 },
    MergeSelect {
        world_pos: DVec2,
        tolerance: f64,
        additive: bool,
    },
    BeginMergeDrag { world_pos: DVec2, tolerance: f64 },
    UpdateMergeDrag { world_pos: DVec2 },
    EndMergeDrag,
    ApplyMerge { candidate: MergeCandidate },
    RequestOffset { world_pos: DVec2, tolerance: f64 },
    ApplyOffset {
        feature: FeatureId,
        side: OffsetSide,
        distance: f64,
    },
    CancelOffset,

    // ── History & Daten ─────────────────────────────────────────────
    Undo,
    Redo,
    LoadFeatures { collection: FeatureCollection },
}
