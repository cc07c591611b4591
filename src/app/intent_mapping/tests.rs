use crate::app::events::{Key, Modifiers};
use crate::app::modes::ModeKind;
use crate::app::state::EditorTool;
use crate::app::tools::DrawKind;
use crate::app::use_cases::selection::BoxSelectMode;
use crate::app::{AppCommand, AppIntent, AppState};
use crate::core::{Geometry, Properties};
use crate::geometry::LineEnd;
use glam::DVec2;

use super::map_intent_to_commands;

fn key(key: Key, ctrl: bool, shift: bool) -> AppIntent {
    AppIntent::KeyPressed {
        key,
        modifiers: Modifiers {
            ctrl,
            shift,
            alt: false,
        },
    }
}

fn state_with_line() -> (AppState, u64) {
    let mut state = AppState::new();
    let id = state.store_mut().add(
        Geometry::LineString(vec![DVec2::ZERO, DVec2::new(100.0, 0.0)]),
        Properties::new(),
    );
    (state, id)
}

fn drawing_state() -> AppState {
    let mut state = AppState::new();
    state.modes.activate(ModeKind::Draw);
    state.editor.tool_manager.set_active(DrawKind::Line);
    state.editor.active_tool = EditorTool::Draw(DrawKind::Line);
    state
}

#[test]
fn select_click_uses_resolution_scaled_tolerance() {
    let mut state = AppState::new();
    state.view.resolution = 2.0;

    let commands = map_intent_to_commands(
        &state,
        AppIntent::PointerClicked {
            world_pos: DVec2::new(3.0, 4.0),
            modifiers: Modifiers {
                shift: true,
                ..Modifiers::default()
            },
        },
    );

    assert_eq!(
        commands,
        vec![AppCommand::SelectAtPosition {
            world_pos: DVec2::new(3.0, 4.0),
            tolerance: state.options.hit_tolerance_px * 2.0,
            additive: true,
        }]
    );
}

#[test]
fn alt_click_near_endpoint_of_selected_line_starts_continuation() {
    let (mut state, id) = state_with_line();
    state.modes.select.set_selection(&state.store, [id]);

    let commands = map_intent_to_commands(
        &state,
        AppIntent::PointerClicked {
            world_pos: DVec2::new(98.0, 1.0),
            modifiers: Modifiers {
                alt: true,
                ..Modifiers::default()
            },
        },
    );

    assert_eq!(
        commands,
        vec![AppCommand::StartContinuation {
            feature: id,
            endpoint: LineEnd::End,
            anchor: DVec2::new(100.0, 0.0),
        }]
    );
}

#[test]
fn alt_click_without_selection_maps_to_nothing() {
    let (state, _) = state_with_line();

    let commands = map_intent_to_commands(
        &state,
        AppIntent::PointerClicked {
            world_pos: DVec2::new(100.0, 0.0),
            modifiers: Modifiers {
                alt: true,
                ..Modifiers::default()
            },
        },
    );

    assert!(commands.is_empty());
}

#[test]
fn ctrl_z_removes_vertex_while_drawing_and_undoes_otherwise() {
    let state = AppState::new();
    assert_eq!(
        map_intent_to_commands(&state, key(Key::Z, true, false)),
        vec![AppCommand::Undo]
    );

    let mut state = drawing_state();
    if let Some(tool) = state.editor.tool_manager.active_tool_mut() {
        tool.on_click(DVec2::ZERO, false);
    }
    assert_eq!(
        map_intent_to_commands(&state, key(Key::Z, true, false)),
        vec![AppCommand::DrawUndoVertex]
    );
    assert_eq!(
        map_intent_to_commands(&state, key(Key::Z, true, true)),
        vec![AppCommand::Redo]
    );
}

#[test]
fn escape_is_staged() {
    let mut state = drawing_state();
    if let Some(tool) = state.editor.tool_manager.active_tool_mut() {
        tool.on_click(DVec2::ZERO, false);
    }
    assert_eq!(
        map_intent_to_commands(&state, key(Key::Escape, false, false)),
        vec![AppCommand::CancelDraw]
    );

    let state = drawing_state();
    assert_eq!(
        map_intent_to_commands(&state, key(Key::Escape, false, false)),
        vec![AppCommand::SetEditorTool {
            tool: EditorTool::Select
        }]
    );

    let (mut state, id) = state_with_line();
    assert!(map_intent_to_commands(&state, key(Key::Escape, false, false)).is_empty());
    state.modes.select.set_selection(&state.store, [id]);
    assert_eq!(
        map_intent_to_commands(&state, key(Key::Escape, false, false)),
        vec![AppCommand::ClearSelection]
    );
}

#[test]
fn drag_end_updates_before_ending() {
    let mut state = AppState::new();
    state.modes.activate(ModeKind::Transform);

    let commands = map_intent_to_commands(
        &state,
        AppIntent::PointerDragEnded {
            world_pos: DVec2::new(5.0, 5.0),
        },
    );

    assert_eq!(
        commands,
        vec![
            AppCommand::UpdateTransform {
                world_pos: DVec2::new(5.0, 5.0)
            },
            AppCommand::EndTransform,
        ]
    );
}

#[test]
fn drag_box_direction_selects_box_mode() {
    let state = AppState::new();

    let upward = map_intent_to_commands(
        &state,
        AppIntent::DragBoxCompleted {
            world_start: DVec2::ZERO,
            world_end: DVec2::new(10.0, 10.0),
            screen_start_y: 200.0,
            screen_end_y: 100.0,
        },
    );

    assert!(matches!(
        upward.as_slice(),
        [AppCommand::SelectInBox {
            mode: BoxSelectMode::Intersecting,
            ..
        }]
    ));
}

#[test]
fn split_mode_click_maps_to_split() {
    let mut state = AppState::new();
    state.modes.activate(ModeKind::Split);

    let commands = map_intent_to_commands(
        &state,
        AppIntent::PointerClicked {
            world_pos: DVec2::new(1.0, 2.0),
            modifiers: Modifiers::default(),
        },
    );

    assert!(matches!(commands.as_slice(), [AppCommand::SplitAt { .. }]));
}

#[test]
fn delete_key_only_in_select_mode() {
    let mut state = AppState::new();
    assert_eq!(
        map_intent_to_commands(&state, key(Key::Delete, false, false)),
        vec![AppCommand::DeleteSelected]
    );

    state.modes.activate(ModeKind::Merge);
    assert!(map_intent_to_commands(&state, key(Key::Backspace, false, false)).is_empty());
}
