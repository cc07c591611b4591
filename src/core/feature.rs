//! Feature-Datenmodell: Geometrie plus frei erweiterbare Properties.

use crate::geometry::{
    closest_point_on_polyline, point_in_ring, AffineTransform, Extent, LineEnd,
};
use glam::DVec2;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Stabile Feature-ID innerhalb einer Sitzung.
pub type FeatureId = u64;

/// Properties eines Features (String-Schlüssel → JSON-Wert).
pub type Properties = serde_json::Map<String, Value>;

/// Bekannte Property-Schlüssel.
pub mod keys {
    /// Linien-Feature aus dem Linienwerkzeug
    pub const IS_LINE_TYPE: &str = "is-line-type";
    /// Messlinie (Länge wird mitgeführt)
    pub const IS_MEASURE: &str = "is-measure";
    /// Kreisbogen mit gespeicherten Kontrollpunkten
    pub const IS_ARC: &str = "is-arc";
    /// Pfeil (nicht teil- oder zusammenführbar)
    pub const IS_ARROW: &str = "is-arrow";
    /// Revisionswolke
    pub const IS_REVISION_CLOUD: &str = "is-revision-cloud";
    /// Drei Bogen-Kontrollpunkte `[[x,y],[x,y],[x,y]]`
    pub const ARC_CONTROL_POINTS: &str = "arcControlPoints";
    /// Anzeigename
    pub const NAME: &str = "name";
    /// Ordner-Referenz
    pub const FOLDER: &str = "folder";
    /// Berechnete Länge in Metern (nur Messlinien)
    pub const MEASURE_LENGTH: &str = "measure-length";
}

/// Geometrietyp ohne Koordinaten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeometryKind {
    Point,
    LineString,
    Polygon,
    GeometryCollection,
}

/// Geometrie eines Features.
///
/// Polygon-Ringe werden geschlossen gespeichert (erster == letzter Punkt).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum Geometry {
    Point(DVec2),
    LineString(Vec<DVec2>),
    Polygon(Vec<DVec2>),
    GeometryCollection(Vec<Geometry>),
}

impl Geometry {
    /// Polygon aus einem (ggf. offenen) Ring; schließt ihn bei Bedarf.
    pub fn polygon(mut ring: Vec<DVec2>) -> Self {
        if let (Some(&first), Some(&last)) = (ring.first(), ring.last()) {
            if ring.len() > 1 && first != last {
                ring.push(first);
            }
        }
        Geometry::Polygon(ring)
    }

    /// Typ der Geometrie.
    pub fn kind(&self) -> GeometryKind {
        match self {
            Geometry::Point(_) => GeometryKind::Point,
            Geometry::LineString(_) => GeometryKind::LineString,
            Geometry::Polygon(_) => GeometryKind::Polygon,
            Geometry::GeometryCollection(_) => GeometryKind::GeometryCollection,
        }
    }

    /// Koordinaten einer LineString-Geometrie.
    pub fn line_coords(&self) -> Option<&[DVec2]> {
        match self {
            Geometry::LineString(coords) => Some(coords),
            _ => None,
        }
    }

    /// Alle Stützpunkte flach (Collections rekursiv).
    pub fn vertices(&self) -> Vec<DVec2> {
        let mut out = Vec::new();
        self.collect_vertices(&mut out);
        out
    }

    fn collect_vertices(&self, out: &mut Vec<DVec2>) {
        match self {
            Geometry::Point(p) => out.push(*p),
            Geometry::LineString(c) | Geometry::Polygon(c) => out.extend_from_slice(c),
            Geometry::GeometryCollection(parts) => {
                for part in parts {
                    part.collect_vertices(out);
                }
            }
        }
    }

    /// Wendet `f` auf jede Koordinate an.
    pub fn map_coords(&mut self, f: &impl Fn(DVec2) -> DVec2) {
        match self {
            Geometry::Point(p) => *p = f(*p),
            Geometry::LineString(c) | Geometry::Polygon(c) => {
                for p in c.iter_mut() {
                    *p = f(*p);
                }
            }
            Geometry::GeometryCollection(parts) => {
                for part in parts.iter_mut() {
                    part.map_coords(f);
                }
            }
        }
    }

    /// Umschließendes Rechteck.
    pub fn extent(&self) -> Option<Extent> {
        Extent::from_points(self.vertices().iter())
    }

    /// Kleinster Abstand von `p` zur Geometrie (0 innerhalb eines Polygons).
    pub fn distance_to(&self, p: DVec2) -> f64 {
        match self {
            Geometry::Point(q) => q.distance(p),
            Geometry::LineString(c) => {
                closest_point_on_polyline(p, c).map_or(f64::INFINITY, |hit| hit.distance)
            }
            Geometry::Polygon(ring) => {
                if point_in_ring(p, ring) {
                    0.0
                } else {
                    closest_point_on_polyline(p, ring).map_or(f64::INFINITY, |hit| hit.distance)
                }
            }
            Geometry::GeometryCollection(parts) => parts
                .iter()
                .map(|g| g.distance_to(p))
                .fold(f64::INFINITY, f64::min),
        }
    }

    /// Geometrie berührt oder schneidet das Rechteck.
    pub fn intersects_extent(&self, extent: &Extent) -> bool {
        match self {
            Geometry::Point(p) => extent.contains_point(*p),
            Geometry::LineString(c) => match c.as_slice() {
                [single] => extent.contains_point(*single),
                _ => c.windows(2).any(|w| extent.intersects_segment(w[0], w[1])),
            },
            Geometry::Polygon(ring) => {
                ring.windows(2).any(|w| extent.intersects_segment(w[0], w[1]))
                    || point_in_ring(extent.center(), ring)
            }
            Geometry::GeometryCollection(parts) => {
                parts.iter().any(|g| g.intersects_extent(extent))
            }
        }
    }
}

/// Ein zeichenbares Karten-Objekt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    /// Stabile ID (vom FeatureStore vergeben)
    pub id: FeatureId,
    geometry: Geometry,
    /// Typ-Tags, Stil und Metadaten
    #[serde(default)]
    pub properties: Properties,
}

impl Feature {
    /// Erstellt ein Feature. Die ID wird beim Einfügen in den Store ggf. ersetzt.
    pub fn new(id: FeatureId, geometry: Geometry, properties: Properties) -> Self {
        Self {
            id,
            geometry,
            properties,
        }
    }

    /// Geometrie (read-only).
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Ersetzt die Geometrie. Ein Wechsel des Geometrietyps wird abgelehnt.
    pub fn set_geometry(&mut self, geometry: Geometry) -> bool {
        if geometry.kind() != self.geometry.kind() {
            log::warn!(
                "Feature {}: Geometrietyp {:?} → {:?} nicht erlaubt",
                self.id,
                self.geometry.kind(),
                geometry.kind()
            );
            return false;
        }
        self.geometry = geometry;
        true
    }

    /// Koordinaten, falls das Feature eine Linie ist.
    pub fn line_coords(&self) -> Option<&[DVec2]> {
        self.geometry.line_coords()
    }

    /// Boolesches Property (fehlend oder nicht-bool = false).
    pub fn flag(&self, key: &str) -> bool {
        self.properties
            .get(key)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// Setzt ein boolesches Property.
    pub fn set_flag(&mut self, key: &str, value: bool) {
        self.properties.insert(key.to_string(), Value::Bool(value));
    }

    /// Anzeigename, falls gesetzt.
    pub fn name(&self) -> Option<&str> {
        self.properties.get(keys::NAME).and_then(Value::as_str)
    }

    pub fn is_line(&self) -> bool {
        self.geometry.kind() == GeometryKind::LineString
    }

    pub fn is_arc(&self) -> bool {
        self.flag(keys::IS_ARC)
    }

    pub fn is_measure(&self) -> bool {
        self.flag(keys::IS_MEASURE)
    }

    pub fn is_arrow(&self) -> bool {
        self.flag(keys::IS_ARROW)
    }

    pub fn is_revision_cloud(&self) -> bool {
        self.flag(keys::IS_REVISION_CLOUD)
    }

    /// Linie, die per Endpunkt-Fortsetzung verlängert werden darf.
    pub fn is_continuable(&self) -> bool {
        self.is_line()
            && !self.is_arc()
            && !self.is_arrow()
            && self.line_coords().is_some_and(|c| c.len() >= 2)
    }

    /// Stützpunkte dürfen direkt gezogen werden (Bögen laufen über das Overlay).
    pub fn is_vertex_editable(&self) -> bool {
        matches!(
            self.geometry.kind(),
            GeometryKind::LineString | GeometryKind::Polygon
        ) && !self.is_arc()
            && !self.is_revision_cloud()
    }

    /// Kandidat für Merge.
    pub fn is_mergeable(&self) -> bool {
        self.is_line() && !self.is_arc() && !self.is_arrow()
    }

    /// Kandidat für Split.
    pub fn is_splittable(&self) -> bool {
        self.is_line() && !self.is_arc() && !self.is_arrow()
    }

    /// Kandidat für Offset.
    pub fn is_offsettable(&self) -> bool {
        self.is_line()
    }

    /// Gespeicherte Bogen-Kontrollpunkte (None, wenn fehlend oder fehlerhaft).
    pub fn arc_control_points(&self) -> Option<[DVec2; 3]> {
        let value = self.properties.get(keys::ARC_CONTROL_POINTS)?;
        serde_json::from_value::<[DVec2; 3]>(value.clone()).ok()
    }

    /// Speichert die drei Bogen-Kontrollpunkte.
    pub fn set_arc_control_points(&mut self, cps: [DVec2; 3]) {
        let value = json!([
            [cps[0].x, cps[0].y],
            [cps[1].x, cps[1].y],
            [cps[2].x, cps[2].y]
        ]);
        self.properties
            .insert(keys::ARC_CONTROL_POINTS.to_string(), value);
    }

    /// Koordinate eines Linienendes.
    pub fn endpoint(&self, end: LineEnd) -> Option<DVec2> {
        end.of(self.line_coords()?)
    }

    /// Transformiert Geometrie und gespeicherte Bogen-Kontrollpunkte gemeinsam.
    pub fn apply_transform(&mut self, transform: &AffineTransform) {
        self.geometry.map_coords(&|p| transform.apply(p));
        if let Some(cps) = self.arc_control_points() {
            self.set_arc_control_points(cps.map(|p| transform.apply(p)));
        }
    }

    /// Properties ohne Bogen-Tags (für abgeleitete Features, die keine Bögen mehr sind).
    pub fn properties_without_arc(&self) -> Properties {
        let mut props = self.properties.clone();
        props.remove(keys::IS_ARC);
        props.remove(keys::ARC_CONTROL_POINTS);
        props
    }
}
