//! Core-Domänentypen: Features, Geometrien, FeatureStore.

/// Feature-Datenmodell
///
/// - Feature: Geometrie + Properties mit stabiler ID
/// - Geometry: Point / LineString / Polygon / GeometryCollection
/// - keys: bekannte Property-Schlüssel (Typ-Tags, Bogen-Kontrollpunkte)
pub mod feature;
pub mod feature_store;

pub use feature::{keys, Feature, FeatureId, Geometry, GeometryKind, Properties};
pub use feature_store::{FeatureCollection, FeatureStore, StoreChange};
