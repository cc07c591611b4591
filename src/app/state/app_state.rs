use crate::app::events::EditorEvent;
use crate::app::history::{EditHistory, Snapshot};
use crate::app::modes::ModeSupervisor;
use crate::app::CommandLog;
use crate::core::{FeatureId, FeatureStore, StoreChange};
use crate::shared::EditorOptions;
use std::sync::Arc;

use super::{EditorToolState, ViewState};

/// Hauptzustand der Anwendung
pub struct AppState {
    /// Feature-Bestand (Arc für O(1)-Snapshots, Mutation per `Arc::make_mut`)
    pub store: Arc<FeatureStore>,
    /// View-State
    pub view: ViewState,
    /// Editor-Werkzeug-State
    pub editor: EditorToolState,
    /// Exklusive Modi inkl. Select/Modify
    pub modes: ModeSupervisor,
    /// Verlauf ausgeführter Commands
    pub command_log: CommandLog,
    /// Undo/Redo-History (Snapshot-basiert)
    pub history: EditHistory,
    /// Laufzeit-Optionen
    pub options: EditorOptions,
    /// Noch nicht abgeholte Ereignisse für den Host
    events: Vec<EditorEvent>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Erstellt einen neuen, leeren App-State mit Standard-Optionen.
    pub fn new() -> Self {
        Self::with_options(EditorOptions::default())
    }

    pub fn with_options(options: EditorOptions) -> Self {
        Self {
            store: Arc::new(FeatureStore::new()),
            view: ViewState::new(),
            editor: EditorToolState::new(),
            modes: ModeSupervisor::new(&options),
            command_log: CommandLog::new(),
            history: EditHistory::new_with_capacity(options.history_depth),
            options,
            events: Vec::new(),
        }
    }

    /// Anzahl der Features (für Host-Anzeige)
    pub fn feature_count(&self) -> usize {
        self.store.len()
    }

    /// Schreibzugriff auf den Store (klont nur, wenn ein Snapshot ihn teilt).
    #[inline]
    pub fn store_mut(&mut self) -> &mut FeatureStore {
        Arc::make_mut(&mut self.store)
    }

    /// Gibt zurück, ob Undo möglich ist
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Gibt zurück, ob Redo möglich ist
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Erstellt einen Undo-Snapshot des aktuellen Zustands.
    pub fn record_undo_snapshot(&mut self) {
        let snap = Snapshot::from_state(self);
        self.history.record_snapshot(snap);
    }

    /// Klick-Toleranz in Karteneinheiten bei aktueller Auflösung.
    pub fn hit_tolerance(&self) -> f64 {
        self.options.hit_tolerance(self.view.resolution)
    }

    pub fn continuation_tolerance(&self) -> f64 {
        self.options.continuation_tolerance(self.view.resolution)
    }

    /// Abstand des Dreh-Griffs in Karteneinheiten.
    pub fn rotate_handle_offset(&self) -> f64 {
        self.options.transform_rotate_handle_offset_px * self.view.resolution
    }

    /// Selektion des aktiven Modus.
    pub fn active_selection(&self) -> Vec<FeatureId> {
        self.modes.active_selection()
    }

    /// Panning nur ohne Selektion, Feature-Drag nur mit Selektion.
    pub fn sync_interaction_flags(&mut self) {
        let has_selection = !self.modes.active_selection().is_empty();
        self.view.panning_enabled = !has_selection;
        self.view.feature_drag_enabled = has_selection;
    }

    pub fn emit(&mut self, event: EditorEvent) {
        log::debug!("Ereignis: {:?}", event);
        self.events.push(event);
    }

    /// Noch nicht abgeholte Ereignisse (read-only).
    pub fn pending_events(&self) -> &[EditorEvent] {
        &self.events
    }

    /// Holt alle aufgelaufenen Ereignisse ab.
    pub fn drain_events(&mut self) -> Vec<EditorEvent> {
        std::mem::take(&mut self.events)
    }

    /// Holt die Store-Änderungen ab. Klont den Store nicht, wenn nichts anliegt.
    pub fn drain_store_changes(&mut self) -> Vec<StoreChange> {
        if self.store.pending_changes().is_empty() {
            return Vec::new();
        }
        self.store_mut().drain_changes()
    }
}
