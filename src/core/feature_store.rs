//! FeatureStore: geordnete Feature-Arena mit Änderungskanal.

use super::feature::{Feature, FeatureId, Geometry, Properties};
use crate::geometry::AffineTransform;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Änderungsmeldung des Stores (wird vom Rendering/Host abgeholt).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreChange {
    /// Feature neu eingefügt
    Added(FeatureId),
    /// Feature entfernt
    Removed(FeatureId),
    /// Geometrie geändert
    GeometryChanged(FeatureId),
    /// Properties geändert
    PropertiesChanged(FeatureId),
    /// Gesamter Inhalt ausgetauscht (Undo/Redo, Laden)
    Reloaded,
}

/// Serialisierbarer Container für Ein-/Ausgabe.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

/// Arena aller Features, adressiert über stabile IDs.
///
/// Die Einfügereihenfolge bleibt erhalten (Zeichen- und Trefferreihenfolge).
/// Jede Mutation legt eine [`StoreChange`] ab, die über [`FeatureStore::drain_changes`]
/// abgeholt wird.
#[derive(Debug, Clone, Default)]
pub struct FeatureStore {
    features: IndexMap<FeatureId, Feature>,
    next_id: FeatureId,
    changes: Vec<StoreChange>,
}

impl FeatureStore {
    /// Erstellt einen leeren Store.
    pub fn new() -> Self {
        Self {
            features: IndexMap::new(),
            next_id: 1,
            changes: Vec::new(),
        }
    }

    /// Baut einen Store aus einer Collection. Vorhandene IDs bleiben erhalten,
    /// doppelte oder fehlende (0) IDs werden neu vergeben.
    pub fn from_collection(collection: FeatureCollection) -> Self {
        let mut store = Self::new();
        store.next_id = collection
            .features
            .iter()
            .map(|f| f.id)
            .max()
            .unwrap_or(0)
            + 1;
        for mut feature in collection.features {
            if feature.id == 0 || store.features.contains_key(&feature.id) {
                feature.id = store.allocate_id();
            }
            store.features.insert(feature.id, feature);
        }
        store.changes.clear();
        store.changes.push(StoreChange::Reloaded);
        store
    }

    /// Exportiert alle Features in Store-Reihenfolge.
    pub fn to_collection(&self) -> FeatureCollection {
        FeatureCollection {
            features: self.features.values().cloned().collect(),
        }
    }

    /// Nächste zu vergebende ID.
    pub fn next_id(&self) -> FeatureId {
        self.next_id
    }

    /// Hebt den ID-Zähler mindestens auf `next` an (nie zurück).
    pub fn reserve_ids_below(&mut self, next: FeatureId) {
        self.next_id = self.next_id.max(next);
    }

    fn allocate_id(&mut self) -> FeatureId {
        let id = self.next_id.max(1);
        self.next_id = id + 1;
        id
    }

    // ── Lesen ───────────────────────────────────────────────────────

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn contains(&self, id: FeatureId) -> bool {
        self.features.contains_key(&id)
    }

    pub fn get(&self, id: FeatureId) -> Option<&Feature> {
        self.features.get(&id)
    }

    /// Iteriert in Einfügereihenfolge.
    pub fn iter(&self) -> impl Iterator<Item = &Feature> {
        self.features.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = FeatureId> + '_ {
        self.features.keys().copied()
    }

    pub fn geometry(&self, id: FeatureId) -> Option<&Geometry> {
        self.features.get(&id).map(Feature::geometry)
    }

    pub fn property(&self, id: FeatureId, key: &str) -> Option<&Value> {
        self.features.get(&id)?.properties.get(key)
    }

    // ── Schreiben ───────────────────────────────────────────────────

    /// Fügt ein neues Feature an und gibt dessen ID zurück.
    pub fn add(&mut self, geometry: Geometry, properties: Properties) -> FeatureId {
        let id = self.allocate_id();
        self.features
            .insert(id, Feature::new(id, geometry, properties));
        self.changes.push(StoreChange::Added(id));
        id
    }

    /// Fügt ein vorbereitetes Feature ein (ID wird neu vergeben).
    pub fn insert(&mut self, mut feature: Feature) -> FeatureId {
        let id = self.allocate_id();
        feature.id = id;
        self.features.insert(id, feature);
        self.changes.push(StoreChange::Added(id));
        id
    }

    /// Entfernt ein Feature. Gibt es zurück, falls vorhanden.
    pub fn remove(&mut self, id: FeatureId) -> Option<Feature> {
        let removed = self.features.shift_remove(&id);
        if removed.is_some() {
            self.changes.push(StoreChange::Removed(id));
        } else {
            log::warn!("Feature {} nicht vorhanden, nichts entfernt", id);
        }
        removed
    }

    /// Ersetzt `removed` atomar durch `replacements`.
    ///
    /// Die neuen Features nehmen die Position des ersten entfernten Features ein.
    /// Sind keine der IDs vorhanden, wird nichts verändert und `None` geliefert.
    pub fn replace(
        &mut self,
        removed: &[FeatureId],
        replacements: Vec<Feature>,
    ) -> Option<Vec<FeatureId>> {
        let position = removed
            .iter()
            .filter_map(|id| self.features.get_index_of(id))
            .min()?;

        for id in removed {
            if self.features.shift_remove(id).is_some() {
                self.changes.push(StoreChange::Removed(*id));
            }
        }

        let mut new_ids = Vec::with_capacity(replacements.len());
        for (offset, mut feature) in replacements.into_iter().enumerate() {
            let id = self.allocate_id();
            feature.id = id;
            let index = (position + offset).min(self.features.len());
            self.features.shift_insert(index, id, feature);
            self.changes.push(StoreChange::Added(id));
            new_ids.push(id);
        }
        Some(new_ids)
    }

    /// Ersetzt die Geometrie (typerhaltend).
    pub fn set_geometry(&mut self, id: FeatureId, geometry: Geometry) -> bool {
        let Some(feature) = self.features.get_mut(&id) else {
            log::warn!("set_geometry: Feature {} nicht vorhanden", id);
            return false;
        };
        if !feature.set_geometry(geometry) {
            return false;
        }
        self.changes.push(StoreChange::GeometryChanged(id));
        true
    }

    pub fn set_property(&mut self, id: FeatureId, key: &str, value: Value) -> bool {
        let Some(feature) = self.features.get_mut(&id) else {
            return false;
        };
        feature.properties.insert(key.to_string(), value);
        self.changes.push(StoreChange::PropertiesChanged(id));
        true
    }

    pub fn remove_property(&mut self, id: FeatureId, key: &str) -> Option<Value> {
        let value = self.features.get_mut(&id)?.properties.remove(key)?;
        self.changes.push(StoreChange::PropertiesChanged(id));
        Some(value)
    }

    /// Direkter Schreibzugriff für zusammengesetzte Änderungen (Geometrie + Properties).
    ///
    /// Meldet Geometrie- und Property-Änderung, da der Aufrufer beides anfassen kann.
    pub fn update<R>(&mut self, id: FeatureId, f: impl FnOnce(&mut Feature) -> R) -> Option<R> {
        let feature = self.features.get_mut(&id)?;
        let result = f(feature);
        self.changes.push(StoreChange::GeometryChanged(id));
        self.changes.push(StoreChange::PropertiesChanged(id));
        Some(result)
    }

    /// Transformiert Geometrie und gespeicherte Bogen-Kontrollpunkte eines Features.
    pub fn map_feature_coordinates(&mut self, id: FeatureId, transform: &AffineTransform) -> bool {
        let Some(feature) = self.features.get_mut(&id) else {
            return false;
        };
        let had_cps = feature.arc_control_points().is_some();
        feature.apply_transform(transform);
        self.changes.push(StoreChange::GeometryChanged(id));
        if had_cps {
            self.changes.push(StoreChange::PropertiesChanged(id));
        }
        true
    }

    /// Markiert den gesamten Inhalt als neu geladen (nach Snapshot-Wiederherstellung).
    pub fn mark_reloaded(&mut self) {
        self.changes.push(StoreChange::Reloaded);
    }

    /// Holt alle seit dem letzten Aufruf aufgelaufenen Änderungen ab.
    pub fn drain_changes(&mut self) -> Vec<StoreChange> {
        std::mem::take(&mut self.changes)
    }

    /// Aufgelaufene, noch nicht abgeholte Änderungen (read-only).
    pub fn pending_changes(&self) -> &[StoreChange] {
        &self.changes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::keys;
    use glam::DVec2;

    fn line(x: f64) -> Geometry {
        Geometry::LineString(vec![DVec2::new(x, 0.0), DVec2::new(x + 1.0, 0.0)])
    }

    #[test]
    fn ids_are_monotonic_and_never_reused() {
        let mut store = FeatureStore::new();
        let a = store.add(line(0.0), Properties::new());
        let b = store.add(line(1.0), Properties::new());
        store.remove(b);
        let c = store.add(line(2.0), Properties::new());
        assert!(a < b && b < c);
        assert_eq!(store.ids().collect::<Vec<_>>(), vec![a, c]);
    }

    #[test]
    fn replace_keeps_position_of_first_removed() {
        let mut store = FeatureStore::new();
        let a = store.add(line(0.0), Properties::new());
        let b = store.add(line(1.0), Properties::new());
        let c = store.add(line(2.0), Properties::new());
        store.drain_changes();

        let new_ids = store
            .replace(
                &[b],
                vec![
                    Feature::new(0, line(10.0), Properties::new()),
                    Feature::new(0, line(11.0), Properties::new()),
                ],
            )
            .expect("b vorhanden");

        let order: Vec<_> = store.ids().collect();
        assert_eq!(order, vec![a, new_ids[0], new_ids[1], c]);
        let changes = store.drain_changes();
        assert_eq!(changes[0], StoreChange::Removed(b));
        assert_eq!(changes.len(), 3);
    }

    #[test]
    fn replace_with_unknown_ids_is_noop() {
        let mut store = FeatureStore::new();
        store.add(line(0.0), Properties::new());
        assert!(store.replace(&[99], Vec::new()).is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn set_geometry_rejects_type_change() {
        let mut store = FeatureStore::new();
        let id = store.add(line(0.0), Properties::new());
        store.drain_changes();
        assert!(!store.set_geometry(id, Geometry::Point(DVec2::ZERO)));
        assert!(store.drain_changes().is_empty());
        assert!(store.set_geometry(id, line(5.0)));
        assert_eq!(store.drain_changes(), vec![StoreChange::GeometryChanged(id)]);
    }

    #[test]
    fn property_mutations_are_reported() {
        let mut store = FeatureStore::new();
        let id = store.add(line(0.0), Properties::new());
        store.drain_changes();
        assert!(store.set_property(id, keys::NAME, Value::from("Zaun")));
        assert_eq!(store.property(id, keys::NAME), Some(&Value::from("Zaun")));
        assert_eq!(store.remove_property(id, keys::NAME), Some(Value::from("Zaun")));
        assert_eq!(
            store.drain_changes(),
            vec![
                StoreChange::PropertiesChanged(id),
                StoreChange::PropertiesChanged(id)
            ]
        );
    }

    #[test]
    fn collection_round_trip_preserves_ids() {
        let mut store = FeatureStore::new();
        store.add(line(0.0), Properties::new());
        let b = store.add(line(1.0), Properties::new());
        let restored = FeatureStore::from_collection(store.to_collection());
        assert!(restored.contains(b));
        let mut restored = restored;
        let next = restored.add(line(3.0), Properties::new());
        assert!(next > b);
    }
}
