use crate::app::modes::{MergeCandidate, ModeKind};
use crate::core::FeatureId;
use serde::Serialize;

/// Ausgehende Ereignisse für Host-Dialoge und Persistenz.
///
/// Anfragen (`*Requested`) werden nicht intern aufgelöst, sondern vom Host
/// mit einem passenden Intent bestätigt.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EditorEvent {
    OffsetRequested { feature: FeatureId },
    MergeRequested { candidate: MergeCandidate },
    ContinuationComplete { feature: FeatureId },
    FeatureCreated { feature: FeatureId },
    /// Stützpunkt-, Verschiebe-, Transform- oder Griff-Drag abgeschlossen
    FeaturesModified { features: Vec<FeatureId> },
    /// Atomarer Austausch (Split, Merge)
    FeaturesReplaced {
        removed: Vec<FeatureId>,
        added: Vec<FeatureId>,
    },
    FeaturesDeleted { features: Vec<FeatureId> },
    SelectionChanged {
        mode: ModeKind,
        selected: Vec<FeatureId>,
    },
    ModeChanged { mode: ModeKind },
}
