//! Map Feature Editor Library.
//! Interaktive Editier-Engine für Vektor-Features, als Library exportiert für Hosts und Tests.

pub mod app;
pub mod core;
pub mod geometry;
pub mod shared;

pub use app::{
    AppCommand, AppController, AppIntent, AppState, DrawKind, EditorEvent, EditorTool,
    EditorToolState, Key, ModeKind, Modifiers, ViewState,
};
pub use core::{Feature, FeatureCollection, FeatureId, FeatureStore, Geometry, Properties};
pub use geometry::{LineEnd, OffsetSide, Projection};
pub use shared::{EditorOptions, MultiSelectPolicy};
