//! Use-Case: Länge einer Messlinie nachführen.

use crate::core::{keys, FeatureId, FeatureStore};
use crate::geometry::{polyline_length_meters, Projection};

/// Berechnet `measure-length` (Meter) neu, falls das Feature eine Messlinie ist.
pub fn update_measure_length(store: &mut FeatureStore, id: FeatureId, projection: Projection) -> bool {
    let Some(length) = store
        .get(id)
        .filter(|f| f.is_measure())
        .and_then(|f| f.line_coords())
        .map(|coords| polyline_length_meters(coords, projection))
    else {
        return false;
    };
    store.set_property(id, keys::MEASURE_LENGTH, length.into())
}
