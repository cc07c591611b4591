//! Application Controller für zentrale Event-Verarbeitung.

use super::{AppCommand, AppIntent, AppState, EditorEvent};

/// Orchestriert Host-Intents und Use-Cases auf den AppState.
#[derive(Default)]
pub struct AppController;

impl AppController {
    /// Erstellt einen neuen Controller.
    pub fn new() -> Self {
        Self
    }

    /// Verarbeitet einen Intent über Intent->Command Mapping.
    ///
    /// Nach dem Update-Burst kehrt das Bogen-Overlay in den Ruhezustand zurück.
    pub fn handle_intent(&mut self, state: &mut AppState, intent: AppIntent) -> anyhow::Result<()> {
        let commands = self.map_intent_to_commands(state, intent);
        for command in commands {
            self.handle_command(state, command)?;
        }
        state.modes.select.overlay_mut().settle();

        Ok(())
    }

    fn map_intent_to_commands(&self, state: &AppState, intent: AppIntent) -> Vec<AppCommand> {
        super::intent_mapping::map_intent_to_commands(state, intent)
    }

    /// Führt mutierende Commands auf dem AppState aus.
    /// Dispatcht an Feature-Handler in `handlers/`.
    pub fn handle_command(
        &mut self,
        state: &mut AppState,
        command: AppCommand,
    ) -> anyhow::Result<()> {
        state.command_log.record(state.modes.active(), &command);
        use super::handlers;

        match command {
            // === Modus & Ansicht ===
            AppCommand::SetEditorTool { tool } => handlers::modes::set_editor_tool(state, tool),
            AppCommand::SetOrthoMode { enabled } => handlers::view::set_ortho_mode(state, enabled),
            AppCommand::SetView {
                resolution,
                rotation,
            } => handlers::view::set_view(state, resolution, rotation),

            // === Selektion ===
            AppCommand::SelectAtPosition {
                world_pos,
                tolerance,
                additive,
            } => handlers::selection::select_at(state, world_pos, tolerance, additive),
            AppCommand::SelectInBox {
                corner_a,
                corner_b,
                mode,
            } => handlers::selection::select_in_box(state, corner_a, corner_b, mode),
            AppCommand::SelectAll => handlers::selection::select_all(state),
            AppCommand::ClearSelection => handlers::selection::clear(state),
            AppCommand::DeleteSelected => handlers::editing::delete_selected(state),

            // === Select-Drag ===
            AppCommand::BeginSelectDrag {
                world_pos,
                tolerance,
            } => handlers::selection::begin_drag(state, world_pos, tolerance),
            AppCommand::UpdateSelectDrag { world_pos } => {
                handlers::selection::update_drag(state, world_pos)
            }
            AppCommand::EndSelectDrag => handlers::selection::end_drag(state),

            // === Endpunkt-Fortsetzung ===
            AppCommand::StartContinuation {
                feature,
                endpoint,
                anchor,
            } => handlers::continuation::start(state, feature, endpoint, anchor),
            AppCommand::ContinuationClick { world_pos } => {
                handlers::continuation::click(state, world_pos)
            }
            AppCommand::ContinuationPreview { world_pos } => {
                handlers::continuation::preview(state, world_pos)
            }
            AppCommand::ContinuationUndoVertex => handlers::continuation::undo_vertex(state),
            AppCommand::CompleteContinuation => handlers::continuation::complete(state),
            AppCommand::CancelContinuation => handlers::continuation::cancel(state),

            // === Zeichnen ===
            AppCommand::DrawClick { world_pos } => handlers::draw::click(state, world_pos),
            AppCommand::DrawPreview { world_pos } => handlers::draw::preview(state, world_pos),
            AppCommand::DrawDragStart { world_pos } => handlers::draw::drag_start(state, world_pos),
            AppCommand::DrawDragUpdate { world_pos } => {
                handlers::draw::drag_update(state, world_pos)
            }
            AppCommand::DrawDragEnd => handlers::draw::drag_end(state),
            AppCommand::DrawUndoVertex => handlers::draw::undo_vertex(state),
            AppCommand::FinishDraw => handlers::draw::finish(state),
            AppCommand::CancelDraw => handlers::draw::cancel(state),

            // === Transform ===
            AppCommand::TransformSelect {
                world_pos,
                tolerance,
            } => handlers::editing::transform_select(state, world_pos, tolerance),
            AppCommand::BeginTransform {
                world_pos,
                tolerance,
            } => handlers::editing::begin_transform(state, world_pos, tolerance),
            AppCommand::UpdateTransform { world_pos } => {
                handlers::editing::update_transform(state, world_pos)
            }
            AppCommand::EndTransform => handlers::editing::end_transform(state),
            AppCommand::CancelTransform => handlers::editing::cancel_transform(state),

            // === Split / Merge / Offset ===
            AppCommand::SplitAt {
                world_pos,
                tolerance,
            } => handlers::editing::split_at(state, world_pos, tolerance),
            AppCommand::MergeSelect {
                world_pos,
                tolerance,
                additive,
            } => handlers::editing::merge_select(state, world_pos, tolerance, additive),
            AppCommand::BeginMergeDrag {
                world_pos,
                tolerance,
            } => handlers::editing::begin_merge_drag(state, world_pos, tolerance),
            AppCommand::UpdateMergeDrag { world_pos } => {
                handlers::editing::update_merge_drag(state, world_pos)
            }
            AppCommand::EndMergeDrag => handlers::editing::end_merge_drag(state),
            AppCommand::ApplyMerge { candidate } => handlers::editing::apply_merge(state, candidate),
            AppCommand::RequestOffset {
                world_pos,
                tolerance,
            } => handlers::editing::request_offset(state, world_pos, tolerance),
            AppCommand::ApplyOffset {
                feature,
                side,
                distance,
            } => handlers::editing::apply_offset(state, feature, side, distance),
            AppCommand::CancelOffset => handlers::editing::cancel_offset(state),

            // === History & Daten ===
            AppCommand::Undo => handlers::history::undo(state),
            AppCommand::Redo => handlers::history::redo(state),
            AppCommand::LoadFeatures { collection } => {
                handlers::view::load_features(state, collection)
            }
        }

        // Griffe folgen Änderungen am Bogen, die nicht vom Griff-Drag kommen
        state.modes.select.overlay_mut().reconcile(&state.store);

        Ok(())
    }

    /// Holt die seit dem letzten Aufruf gemeldeten Ereignisse ab.
    pub fn drain_events(&self, state: &mut AppState) -> Vec<EditorEvent> {
        state.drain_events()
    }
}
