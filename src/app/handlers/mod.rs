//! Feature-Handler für AppCommand-Verarbeitung.
//!
//! Jeder Handler gruppiert die Command-Ausführung eines Feature-Bereichs.
//! Der Controller dispatcht an die passende Handler-Funktion.

pub mod continuation;
pub mod draw;
pub mod editing;
pub mod history;
pub mod modes;
pub mod selection;
pub mod view;
