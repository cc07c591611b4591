//! Protokoll der ausgeführten Commands mit Modus-Kontext (Diagnose, Session-Replay).

use super::modes::ModeKind;
use super::AppCommand;
use std::collections::VecDeque;

/// Ein protokollierter Command.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    /// Fortlaufende Nummer, auch über verworfene Einträge hinweg
    pub seq: u64,
    /// Aktiver Modus beim Ausführen
    pub mode: ModeKind,
    pub command: AppCommand,
}

/// Ringpuffer der zuletzt ausgeführten Commands.
///
/// Reine Vorschau-Commands (Zeigerbewegung) ändern nichts und werden übersprungen.
#[derive(Debug)]
pub struct CommandLog {
    entries: VecDeque<LogEntry>,
    next_seq: u64,
}

impl Default for CommandLog {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandLog {
    const MAX_ENTRIES: usize = 1000;

    pub fn new() -> Self {
        Self {
            entries: VecDeque::new(),
            next_seq: 0,
        }
    }

    /// Protokolliert `command` unter dem Modus `mode`. Gibt `false` für Vorschau-Commands zurück.
    pub fn record(&mut self, mode: ModeKind, command: &AppCommand) -> bool {
        if matches!(
            command,
            AppCommand::DrawPreview { .. } | AppCommand::ContinuationPreview { .. }
        ) {
            return false;
        }
        if self.entries.len() >= Self::MAX_ENTRIES {
            self.entries.pop_front();
        }
        self.entries.push_back(LogEntry {
            seq: self.next_seq,
            mode,
            command: command.clone(),
        });
        self.next_seq += 1;
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    /// Nur die Commands, älteste zuerst.
    pub fn commands(&self) -> impl Iterator<Item = &AppCommand> {
        self.entries.iter().map(|e| &e.command)
    }

    pub fn last_command(&self) -> Option<&AppCommand> {
        self.entries.back().map(|e| &e.command)
    }

    /// Commands, die im Modus `mode` ausgeführt wurden.
    pub fn in_mode(&self, mode: ModeKind) -> impl Iterator<Item = &AppCommand> {
        self.entries
            .iter()
            .filter(move |e| e.mode == mode)
            .map(|e| &e.command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;

    #[test]
    fn full_log_drops_oldest_and_keeps_numbering() {
        let mut log = CommandLog::new();
        for _ in 0..CommandLog::MAX_ENTRIES {
            log.record(ModeKind::Select, &AppCommand::SelectAll);
        }
        log.record(ModeKind::Select, &AppCommand::Undo);

        assert_eq!(log.len(), CommandLog::MAX_ENTRIES);
        assert_eq!(log.entries().next().map(|e| e.seq), Some(1));
        assert_eq!(log.last_command(), Some(&AppCommand::Undo));
    }

    #[test]
    fn previews_are_skipped() {
        let mut log = CommandLog::new();
        let pos = DVec2::new(1.0, 2.0);
        assert!(!log.record(ModeKind::Draw, &AppCommand::DrawPreview { world_pos: pos }));
        assert!(log.record(ModeKind::Draw, &AppCommand::DrawClick { world_pos: pos }));
        assert!(log.record(ModeKind::Select, &AppCommand::ClearSelection));

        assert_eq!(log.len(), 2);
        assert_eq!(
            log.in_mode(ModeKind::Draw).collect::<Vec<_>>(),
            vec![&AppCommand::DrawClick { world_pos: pos }]
        );
    }
}
