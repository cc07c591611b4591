use crate::core::{FeatureId, FeatureStore};
use indexmap::IndexSet;
use std::sync::Arc;

/// Snapshot reduziert auf die für Undo/Redo relevanten Teile.
///
/// Nutzt Arc-Clone (Copy-on-Write): Das Erstellen eines Snapshots ist O(1),
/// der eigentliche Store-Klon passiert erst beim nächsten `Arc::make_mut()`.
#[derive(Clone)]
pub struct Snapshot {
    /// Feature-Bestand (Arc-Klon)
    pub store: Arc<FeatureStore>,
    /// Select-Selektion zum Zeitpunkt des Snapshots
    pub selection: IndexSet<FeatureId>,
}

impl Snapshot {
    /// Erstellt einen O(1)-Snapshot durch Arc-Clone statt Deep-Clone.
    pub fn from_state(state: &crate::app::AppState) -> Self {
        Self {
            store: Arc::clone(&state.store),
            selection: state.modes.select.selection().clone(),
        }
    }

    /// Stellt den Snapshot wieder her.
    ///
    /// Die Selektion wird auf noch vorhandene Features gefiltert; nicht-Select-Modi
    /// verwerfen ihre laufenden Sitzungen.
    pub fn apply_to(self, state: &mut crate::app::AppState) {
        // IDs bleiben sitzungsweit eindeutig, auch über Undo hinweg
        let next_id = state.store.next_id();
        state.store = self.store;
        // Reloaded ersetzt alle Einzelmeldungen
        let store = state.store_mut();
        store.reserve_ids_below(next_id);
        store.drain_changes();
        store.mark_reloaded();

        use crate::app::use_cases::selection;
        if state.modes.select.is_enabled() {
            selection::set_selection(state, self.selection);
        }
        if state.modes.retain_existing(&state.store) {
            selection::emit_selection_changed(state);
        }
        state.sync_interaction_flags();
    }
}

/// Einfacher Undo/Redo-Manager mit Snapshotting.
#[derive(Default)]
pub struct EditHistory {
    undo_stack: Vec<Snapshot>,
    redo_stack: Vec<Snapshot>,
    max_depth: usize,
}

impl EditHistory {
    /// Erstellt einen neuen History-Manager mit maximaler Tiefe.
    pub fn new_with_capacity(max_depth: usize) -> Self {
        Self {
            undo_stack: Vec::with_capacity(max_depth),
            redo_stack: Vec::with_capacity(max_depth),
            max_depth,
        }
    }

    /// Nimmt einen vorbereiteten Snapshot auf und leert den Redo-Stack.
    pub fn record_snapshot(&mut self, snap: Snapshot) {
        if self.max_depth == 0 {
            return;
        }
        if self.undo_stack.len() >= self.max_depth {
            self.undo_stack.remove(0);
        }
        self.undo_stack.push(snap);
        self.redo_stack.clear();
    }

    /// Prüft ob Undo möglich ist.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Prüft ob Redo möglich ist.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Leert beide Stacks (nach dem Laden eines neuen Bestands).
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    /// Holt den letzten Undo-Snapshot und legt `current` auf den Redo-Stack.
    pub fn pop_undo_with_current(&mut self, current: Snapshot) -> Option<Snapshot> {
        let prev = self.undo_stack.pop()?;
        if self.redo_stack.len() >= self.max_depth {
            self.redo_stack.remove(0);
        }
        self.redo_stack.push(current);
        Some(prev)
    }

    /// Holt den letzten Redo-Snapshot und legt `current` auf den Undo-Stack.
    pub fn pop_redo_with_current(&mut self, current: Snapshot) -> Option<Snapshot> {
        let next = self.redo_stack.pop()?;
        if self.undo_stack.len() >= self.max_depth {
            self.undo_stack.remove(0);
        }
        self.undo_stack.push(current);
        Some(next)
    }
}
