//! Endpunkt-Nähe und Zusammenführen zweier Linien an ihren Enden.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Eines der beiden Enden einer Linie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineEnd {
    /// Erster Stützpunkt
    Start,
    /// Letzter Stützpunkt
    End,
}

impl LineEnd {
    /// Koordinate dieses Endes (None bei leerer Linie).
    pub fn of(&self, coords: &[DVec2]) -> Option<DVec2> {
        match self {
            LineEnd::Start => coords.first().copied(),
            LineEnd::End => coords.last().copied(),
        }
    }
}

/// Treffer einer Endpunkt-Suche.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EndpointMatch<K> {
    /// Schlüssel des Kandidaten (z.B. Feature-ID)
    pub key: K,
    /// Welches Ende getroffen wurde
    pub end: LineEnd,
    /// Koordinate des Endpunkts
    pub coordinate: DVec2,
    /// Abstand zum Suchpunkt
    pub distance: f64,
}

/// Sucht den nächsten Linien-Endpunkt innerhalb von `tolerance`.
///
/// Lineare Suche über Start und Ende aller Kandidaten; `exclude` wird
/// übersprungen. Bei gleichem Abstand gewinnt der zuerst gefundene Kandidat.
pub fn find_nearby_endpoint<'a, K, I>(
    point: DVec2,
    candidates: I,
    exclude: Option<K>,
    tolerance: f64,
) -> Option<EndpointMatch<K>>
where
    K: Copy + PartialEq,
    I: IntoIterator<Item = (K, &'a [DVec2])>,
{
    let mut best: Option<EndpointMatch<K>> = None;

    for (key, coords) in candidates {
        if exclude == Some(key) || coords.len() < 2 {
            continue;
        }
        for end in [LineEnd::Start, LineEnd::End] {
            let Some(coordinate) = end.of(coords) else {
                continue;
            };
            let distance = coordinate.distance(point);
            if distance > tolerance {
                continue;
            }
            if best.is_none_or(|b| distance < b.distance) {
                best = Some(EndpointMatch {
                    key,
                    end,
                    coordinate,
                    distance,
                });
            }
        }
    }

    best
}

/// Führt zwei Linien an den angegebenen Enden zusammen.
///
/// A wird so gedreht, dass `end_a` hinten liegt, B so, dass `end_b` vorne
/// liegt. Der doppelte Verbindungspunkt (erster Punkt von B) entfällt,
/// das Ergebnis hat also `len_a + len_b - 1` Punkte.
pub fn merge_lines(a: &[DVec2], end_a: LineEnd, b: &[DVec2], end_b: LineEnd) -> Vec<DVec2> {
    let mut merged: Vec<DVec2> = match end_a {
        LineEnd::End => a.to_vec(),
        LineEnd::Start => a.iter().rev().copied().collect(),
    };
    let tail: Vec<DVec2> = match end_b {
        LineEnd::Start => b.to_vec(),
        LineEnd::End => b.iter().rev().copied().collect(),
    };
    merged.extend(tail.into_iter().skip(1));
    merged
}
