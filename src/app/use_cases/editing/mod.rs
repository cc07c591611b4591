//! Use-Case-Funktionen für Feature-Editing.
//!
//! Aufgeteilt nach Operation:
//! - `apply_tool_result`: Zeichenergebnis als Feature anlegen
//! - `continuation`: Endpunkt-Fortsetzung abschließen
//! - `delete_features`: Selektierte Features löschen
//! - `measure`: Länge von Messlinien nachführen
//! - `merge_features`: Zwei Linien zusammenführen
//! - `offset_feature`: Parallelversatz anfragen und anwenden
//! - `split_feature`: Linie teilen
//! - `transform_feature`: Transform-Drag

mod apply_tool_result;
mod continuation;
mod delete_features;
mod measure;
mod merge_features;
mod offset_feature;
mod split_feature;
mod transform_feature;

pub use apply_tool_result::apply_tool_result;
pub use continuation::{cancel_continuation, complete_continuation, start_continuation};
pub use delete_features::delete_selected_features;
pub use measure::update_measure_length;
pub use merge_features::{apply_merge, begin_merge_drag, end_merge_drag, update_merge_drag};
pub use offset_feature::{apply_offset, request_offset};
pub use split_feature::split_at;
pub use transform_feature::{begin_transform, cancel_transform, end_transform, update_transform};
