//! Polylinien-Werkzeug: Linie, Messlinie und Polygon per Klickfolge.
//!
//! Jedes bestätigte Segment friert den Ortho-Modus ein, der beim Klick aktiv war.
//! Erst beim Abschluss werden die Segmente einzeln orthogonal ausgerichtet.

mod lifecycle;
mod state;

pub use state::PolylineTool;
