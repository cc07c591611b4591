//! Revisionswolken-Werkzeug: Freihand-Pfad per Drag, Abschluss als Wolken-Polygon.

mod lifecycle;
mod state;

pub use state::RevisionCloudTool;
