//! Kreisbogen-Werkzeug: Start, Durchgangspunkt und Ende per Klick.
//!
//! Nach dem dritten Klick entsteht eine gesampelte Linie mit `is-arc` und
//! den drei Kontrollpunkten, aus denen der Bogen später neu berechnet wird.

mod lifecycle;
mod state;

pub use state::ArcTool;
