//! Mapping von Host-Intents auf mutierende App-Commands.
//!
//! Die Zuordnung hängt vom aktiven Modus und laufenden Sitzungen ab
//! (Zeichnung, Fortsetzung, Transform-Drag). Toleranzen werden hier aus
//! Pixelwerten und der aktuellen Auflösung in Karteneinheiten umgerechnet.

use super::events::{Key, Modifiers};
use super::modes::ModeKind;
use super::state::EditorTool;
use super::use_cases::selection::BoxSelectMode;
use super::{AppCommand, AppIntent, AppState};
use glam::DVec2;

/// Übersetzt einen `AppIntent` in eine Sequenz ausführbarer `AppCommand`s.
pub fn map_intent_to_commands(state: &AppState, intent: AppIntent) -> Vec<AppCommand> {
    let mode = state.modes.active();
    match intent {
        AppIntent::ActiveToolChanged { tool } => vec![AppCommand::SetEditorTool { tool }],
        AppIntent::OrthoModeSet { enabled } => vec![AppCommand::SetOrthoMode { enabled }],
        AppIntent::ViewChanged {
            resolution,
            rotation,
        } => vec![AppCommand::SetView {
            resolution,
            rotation,
        }],

        // === Zeiger ===
        AppIntent::PointerClicked {
            world_pos,
            modifiers,
        } => map_click(state, world_pos, modifiers),
        AppIntent::PointerDoubleClicked { .. } => {
            if mode == ModeKind::Draw {
                vec![AppCommand::FinishDraw]
            } else if has_continuation(state) {
                vec![AppCommand::CompleteContinuation]
            } else {
                vec![]
            }
        }
        AppIntent::PointerMoved { world_pos } => {
            if mode == ModeKind::Draw {
                vec![AppCommand::DrawPreview { world_pos }]
            } else if has_continuation(state) {
                vec![AppCommand::ContinuationPreview { world_pos }]
            } else {
                vec![]
            }
        }
        AppIntent::PointerDragStarted { world_pos, .. } => {
            let tolerance = state.hit_tolerance();
            match mode {
                ModeKind::Select if !has_continuation(state) => {
                    vec![AppCommand::BeginSelectDrag {
                        world_pos,
                        tolerance,
                    }]
                }
                ModeKind::Draw => vec![AppCommand::DrawDragStart { world_pos }],
                ModeKind::Transform => vec![AppCommand::BeginTransform {
                    world_pos,
                    tolerance,
                }],
                ModeKind::Merge => vec![AppCommand::BeginMergeDrag {
                    world_pos,
                    tolerance,
                }],
                _ => vec![],
            }
        }
        AppIntent::PointerDragged { world_pos } => drag_update(mode, world_pos).into_iter().collect(),
        AppIntent::PointerDragEnded { world_pos } => {
            let end = match mode {
                ModeKind::Select => AppCommand::EndSelectDrag,
                ModeKind::Draw => AppCommand::DrawDragEnd,
                ModeKind::Transform => AppCommand::EndTransform,
                ModeKind::Merge => AppCommand::EndMergeDrag,
                _ => return vec![],
            };
            drag_update(mode, world_pos).into_iter().chain([end]).collect()
        }
        AppIntent::DragBoxCompleted {
            world_start,
            world_end,
            screen_start_y,
            screen_end_y,
        } => {
            if mode != ModeKind::Select || has_continuation(state) {
                return vec![];
            }
            vec![AppCommand::SelectInBox {
                corner_a: world_start,
                corner_b: world_end,
                mode: BoxSelectMode::from_screen_drag(screen_start_y, screen_end_y),
            }]
        }

        // === Tastatur ===
        AppIntent::KeyPressed { key, modifiers } => map_key(state, key, modifiers),

        // === Host-Dialoge ===
        AppIntent::OffsetConfirmed {
            feature,
            side,
            distance,
        } => vec![AppCommand::ApplyOffset {
            feature,
            side,
            distance,
        }],
        AppIntent::OffsetCancelled => vec![AppCommand::CancelOffset],
        AppIntent::MergeConfirmed { candidate } => vec![AppCommand::ApplyMerge { candidate }],

        // === Direkte Befehle ===
        AppIntent::UndoRequested => vec![AppCommand::Undo],
        AppIntent::RedoRequested => vec![AppCommand::Redo],
        AppIntent::SelectAllRequested => vec![AppCommand::SelectAll],
        AppIntent::ClearSelectionRequested => vec![AppCommand::ClearSelection],
        AppIntent::DeleteSelectedRequested => vec![AppCommand::DeleteSelected],
        AppIntent::FeaturesLoaded { collection } => vec![AppCommand::LoadFeatures { collection }],
    }
}

fn has_continuation(state: &AppState) -> bool {
    state.modes.select.continuation().is_some()
}

fn draw_has_pending_input(state: &AppState) -> bool {
    state.modes.active() == ModeKind::Draw
        && state
            .editor
            .tool_manager
            .active_tool()
            .is_some_and(|tool| tool.has_pending_input())
}

fn drag_update(mode: ModeKind, world_pos: DVec2) -> Option<AppCommand> {
    match mode {
        ModeKind::Select => Some(AppCommand::UpdateSelectDrag { world_pos }),
        ModeKind::Draw => Some(AppCommand::DrawDragUpdate { world_pos }),
        ModeKind::Transform => Some(AppCommand::UpdateTransform { world_pos }),
        ModeKind::Merge => Some(AppCommand::UpdateMergeDrag { world_pos }),
        ModeKind::Split | ModeKind::Offset => None,
    }
}

fn map_click(state: &AppState, world_pos: DVec2, modifiers: Modifiers) -> Vec<AppCommand> {
    let tolerance = state.hit_tolerance();
    match state.modes.active() {
        ModeKind::Select => {
            if has_continuation(state) {
                return vec![AppCommand::ContinuationClick { world_pos }];
            }
            if modifiers.alt {
                // Alt+Klick auf ein Linienende startet die Fortsetzung
                let tolerance = state.continuation_tolerance();
                return state
                    .modes
                    .select
                    .continuation_target(&state.store, world_pos, tolerance)
                    .map(|(feature, endpoint, anchor)| AppCommand::StartContinuation {
                        feature,
                        endpoint,
                        anchor,
                    })
                    .into_iter()
                    .collect();
            }
            vec![AppCommand::SelectAtPosition {
                world_pos,
                tolerance,
                additive: modifiers.shift,
            }]
        }
        ModeKind::Draw => vec![AppCommand::DrawClick { world_pos }],
        ModeKind::Transform => vec![AppCommand::TransformSelect {
            world_pos,
            tolerance,
        }],
        ModeKind::Split => vec![AppCommand::SplitAt {
            world_pos,
            tolerance,
        }],
        ModeKind::Merge => vec![AppCommand::MergeSelect {
            world_pos,
            tolerance,
            additive: modifiers.shift,
        }],
        ModeKind::Offset => vec![AppCommand::RequestOffset {
            world_pos,
            tolerance,
        }],
    }
}

fn map_key(state: &AppState, key: Key, modifiers: Modifiers) -> Vec<AppCommand> {
    let mode = state.modes.active();
    match key {
        // Stufenweise: erst Sitzung abbrechen, dann Selektion bzw. Modus verlassen
        Key::Escape => {
            if draw_has_pending_input(state) {
                vec![AppCommand::CancelDraw]
            } else if has_continuation(state) {
                vec![AppCommand::CancelContinuation]
            } else if state.modes.transform.is_transforming() {
                vec![AppCommand::CancelTransform]
            } else if mode == ModeKind::Select {
                if state.modes.select.selection().is_empty() {
                    vec![]
                } else {
                    vec![AppCommand::ClearSelection]
                }
            } else {
                vec![AppCommand::SetEditorTool {
                    tool: EditorTool::Select,
                }]
            }
        }
        Key::Enter => {
            if mode == ModeKind::Draw {
                vec![AppCommand::FinishDraw]
            } else if has_continuation(state) {
                vec![AppCommand::CompleteContinuation]
            } else {
                vec![]
            }
        }
        Key::Delete | Key::Backspace => {
            if mode == ModeKind::Select && !has_continuation(state) {
                vec![AppCommand::DeleteSelected]
            } else {
                vec![]
            }
        }
        Key::Z if modifiers.ctrl => {
            if modifiers.shift {
                vec![AppCommand::Redo]
            } else if draw_has_pending_input(state) {
                vec![AppCommand::DrawUndoVertex]
            } else if state
                .modes
                .select
                .continuation()
                .is_some_and(|session| session.has_new_points())
            {
                vec![AppCommand::ContinuationUndoVertex]
            } else {
                vec![AppCommand::Undo]
            }
        }
        Key::Y if modifiers.ctrl => vec![AppCommand::Redo],
        Key::A if modifiers.ctrl && mode == ModeKind::Select => vec![AppCommand::SelectAll],
        Key::Z | Key::Y | Key::A => vec![],
    }
}

#[cfg(test)]
mod tests;
