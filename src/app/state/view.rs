/// View-bezogener Anwendungszustand (vom Host gemeldet bzw. für ihn abgeleitet).
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    /// Karteneinheiten pro Bildschirmpixel
    pub resolution: f64,
    /// Kartendrehung in Radiant
    pub rotation: f64,
    /// Hintergrund-Panning erlaubt (nur ohne Selektion)
    pub panning_enabled: bool,
    /// Features dürfen gezogen werden (nur mit Selektion)
    pub feature_drag_enabled: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewState {
    pub fn new() -> Self {
        Self {
            resolution: 1.0,
            rotation: 0.0,
            panning_enabled: true,
            feature_drag_enabled: false,
        }
    }
}
