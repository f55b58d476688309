//! Real-world measurements: areas, dimensions and the scale bar.

use crate::scene::{Floor, FloorParams, Room};

/// On-screen length the scale bar aims for, in pixels.
pub const SCALE_BAR_TARGET_PX: f64 = 100.0;

/// Room area in square meters.
pub fn room_area_m2(room: &Room, params: &FloorParams) -> f64 {
    let ppm = params.effective_ppm();
    (room.w / ppm) * (room.h / ppm)
}

/// Sum of room areas on a floor, in square meters.
pub fn total_area_m2(floor: &Floor) -> f64 {
    floor
        .rooms
        .iter()
        .map(|room| room_area_m2(room, &floor.params))
        .sum()
}

/// Room width and height in meters.
pub fn dimensions_m(room: &Room, params: &FloorParams) -> (f64, f64) {
    let ppm = params.effective_ppm();
    (room.w / ppm, room.h / ppm)
}

/// Format an area for display, e.g. `12.5 m²`.
pub fn format_area(m2: f64) -> String {
    format!("{m2:.1} m²")
}

/// Round a length up or down to 1, 2, 5 or 10 times a power of ten.
pub fn nice_meters(m: f64) -> f64 {
    if m <= 0.0 || !m.is_finite() {
        return 0.1;
    }
    let base = 10f64.powi(m.log10().floor() as i32);
    let n = m / base;
    let step = if n < 1.5 {
        1.0
    } else if n < 3.5 {
        2.0
    } else if n < 7.5 {
        5.0
    } else {
        10.0
    };
    step * base
}

/// A scale bar sized for the current zoom.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleBar {
    /// Length the bar represents.
    pub meters: f64,
    /// On-screen length of the bar.
    pub screen_px: f64,
    pub label: String,
}

impl ScaleBar {
    /// Pick a round length close to [`SCALE_BAR_TARGET_PX`] on screen.
    pub fn for_view(params: &FloorParams, scale: f64) -> Self {
        let ppm = params.effective_ppm();
        let meters = nice_meters(SCALE_BAR_TARGET_PX / scale / ppm);
        let label = if meters >= 1.0 {
            format!("{meters:.1} m")
        } else {
            format!("{:.0} cm", meters * 100.0)
        };
        Self {
            meters,
            screen_px: meters * ppm * scale,
            label,
        }
    }
}
