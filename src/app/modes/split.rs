//! Split-Modus: teilt eine Linie am angeklickten Punkt in zwei Features.

use super::{ModeController, ModeKind};
use crate::app::use_cases::selection::pick_feature;
use crate::core::{keys, Feature, FeatureId, FeatureStore, Geometry};
use crate::geometry::split_line_at;
use glam::DVec2;

/// Ergebnis eines Split-Klicks (noch nicht im Store).
#[derive(Debug, Clone, PartialEq)]
pub struct SplitPlan {
    pub original: FeatureId,
    /// Beide Teilstücke mit kopierten Properties
    pub parts: [Feature; 2],
}

#[derive(Debug, Default)]
pub struct SplitController {
    active: bool,
}

impl SplitController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Berechnet den Split für einen Klick. Nur teilbare Linien (keine Pfeile oder Bögen).
    pub fn plan(&self, store: &FeatureStore, pos: DVec2, tolerance: f64) -> Option<SplitPlan> {
        if !self.active {
            return None;
        }
        let id = pick_feature(store, pos, tolerance, Feature::is_splittable)?;
        let feature = store.get(id)?;
        let (first, second) = split_line_at(feature.line_coords()?, pos)?;

        let base_name = feature.name().map(str::to_owned);
        let part = |index: usize, coords: Vec<DVec2>| {
            let mut properties = feature.properties.clone();
            if let Some(name) = &base_name {
                properties.insert(keys::NAME.into(), format!("{name} {index}").into());
            }
            Feature::new(0, Geometry::LineString(coords), properties)
        };
        Some(SplitPlan {
            original: id,
            parts: [part(1, first), part(2, second)],
        })
    }
}

impl ModeController for SplitController {
    fn kind(&self) -> ModeKind {
        ModeKind::Split
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn activate(&mut self) {
        self.active = true;
    }

    fn deactivate(&mut self) {
        self.active = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Properties;

    fn named_line(store: &mut FeatureStore, props: &[(&str, serde_json::Value)]) -> FeatureId {
        let properties: Properties = props
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect();
        store.add(
            Geometry::LineString(vec![DVec2::ZERO, DVec2::new(10.0, 0.0), DVec2::new(20.0, 0.0)]),
            properties,
        )
    }

    #[test]
    fn split_copies_properties_and_suffixes_names() {
        let mut store = FeatureStore::new();
        let id = named_line(
            &mut store,
            &[("name", "Zaun".into()), ("folder", "f-1".into()), ("stroke", "#f00".into())],
        );
        let mut split = SplitController::new();
        split.activate();

        let plan = split
            .plan(&store, DVec2::new(15.0, 0.2), 1.0)
            .expect("Split möglich");
        assert_eq!(plan.original, id);
        assert_eq!(plan.parts[0].name(), Some("Zaun 1"));
        assert_eq!(plan.parts[1].name(), Some("Zaun 2"));
        assert_eq!(plan.parts[1].properties["folder"], "f-1");
        assert_eq!(plan.parts[0].line_coords().map(<[DVec2]>::len), Some(3));
        assert_eq!(plan.parts[1].line_coords().map(<[DVec2]>::len), Some(2));
    }

    #[test]
    fn arrows_are_not_split() {
        let mut store = FeatureStore::new();
        named_line(&mut store, &[(keys::IS_ARROW, true.into())]);
        let mut split = SplitController::new();
        split.activate();
        assert!(split.plan(&store, DVec2::new(5.0, 0.0), 1.0).is_none());
    }

    #[test]
    fn inactive_controller_ignores_clicks() {
        let mut store = FeatureStore::new();
        named_line(&mut store, &[]);
        let split = SplitController::new();
        assert!(split.plan(&store, DVec2::new(5.0, 0.0), 1.0).is_none());
    }
}
