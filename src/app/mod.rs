//! Application-Layer: Controller, State, Events, Modi und Use-Cases.

pub mod command_log;
pub mod controller;
pub mod events;
pub mod handlers;
pub mod history;
mod intent_mapping;
pub mod modes;
/// Application State
///
/// Dieses Modul verwaltet den Zustand der Anwendung (Store, View, Werkzeuge, Modi).
pub mod state;
pub mod tools;
pub mod use_cases;

pub use command_log::{CommandLog, LogEntry};
pub use controller::AppController;
pub use events::{AppCommand, AppIntent, EditorEvent, Key, Modifiers};
pub use history::{EditHistory, Snapshot};
pub use modes::{MergeCandidate, ModeKind};
pub use state::{AppState, EditorTool, EditorToolState, ViewState};
pub use tools::{DrawKind, ToolPreview};
