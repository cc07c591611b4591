//! Use-Case-Funktionen für die Feature-Selektion.
//!
//! Aufgeteilt nach Selektionsart:
//! - `pick`: Treffertest und Klick-Selektion
//! - `drag_box`: Rechteck-Selektion (schneidend oder enthalten)
//! - `drag`: Stützpunkt-, Verschiebe- und Griff-Drag im Select-Modus
//! - `helpers`: Setzen, Leeren, Alles-Selektieren

mod drag;
mod drag_box;
mod helpers;
mod pick;

pub use drag::{begin_select_drag, end_select_drag, update_select_drag};
pub use drag_box::{features_in_box, select_in_box, BoxSelectMode};
pub use helpers::{clear_selection, emit_selection_changed, select_all, set_selection};
pub use pick::{pick_feature, select_at};
