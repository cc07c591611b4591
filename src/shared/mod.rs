//! Geteilte Typen für layer-übergreifende Verträge.
//!
//! Enthält die Laufzeit-Konfiguration, die `app` und der Host gemeinsam nutzen.

pub mod options;

pub use options::{EditorOptions, MultiSelectPolicy};
