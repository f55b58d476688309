//! Engine tuning constants.
//!
//! Every distance suffixed `_px` is in screen pixels and is divided by the
//! current view scale before it is compared against world geometry.

use serde::{Deserialize, Serialize};

use crate::error::{PlanError, PlanResult};

/// Grid spacing in world units.
pub const GRID_SIZE: f64 = 20.0;
/// Smallest allowed room side in world units.
pub const MIN_SIDE: f64 = 24.0;
/// Lower bound of the view scale.
pub const MIN_SCALE: f64 = 0.45;
/// Upper bound of the view scale.
pub const MAX_SCALE: f64 = 3.0;
/// Angle snap increment in degrees.
pub const ANGLE_SNAP_INCREMENT: f64 = 15.0;

/// Tunable parameters for snapping, hit-testing and viewport control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    pub grid_size: f64,
    pub min_side: f64,
    pub min_scale: f64,
    pub max_scale: f64,
    /// Radius for snapping to neighbouring room edges.
    pub snap_radius_px: f64,
    /// Movement below this distance from the press point is ignored.
    pub touch_slop_px: f64,
    /// Distance of the rotate handle above the room's top edge.
    pub rotate_gap_px: f64,
    pub rotate_hit_radius_px: f64,
    pub corner_hit_radius_px: f64,
    /// Half-thickness of the band around each edge that starts an edge resize.
    pub edge_band_px: f64,
    pub auto_scroll_margin_px: f64,
    pub auto_scroll_speed_px: f64,
    pub zoom_step: f64,
    pub double_tap_zoom: f64,
    pub fit_padding_px: f64,
    pub angle_snap_increment: f64,
    pub minimap_width: f64,
    pub minimap_height: f64,
    pub minimap_padding: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            min_side: MIN_SIDE,
            min_scale: MIN_SCALE,
            max_scale: MAX_SCALE,
            snap_radius_px: 16.0,
            touch_slop_px: 6.0,
            rotate_gap_px: 28.0,
            rotate_hit_radius_px: 48.0,
            corner_hit_radius_px: 16.0,
            edge_band_px: 14.0,
            auto_scroll_margin_px: 24.0,
            auto_scroll_speed_px: 10.0,
            zoom_step: 1.2,
            double_tap_zoom: 1.35,
            fit_padding_px: 48.0,
            angle_snap_increment: ANGLE_SNAP_INCREMENT,
            minimap_width: 160.0,
            minimap_height: 120.0,
            minimap_padding: 8.0,
        }
    }
}

impl EngineConfig {
    /// Create a config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from JSON. Missing keys take their default values.
    pub fn from_json(json: &str) -> PlanResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the engine cannot work with.
    pub fn validate(&self) -> PlanResult<()> {
        let positive = [
            ("gridSize", self.grid_size),
            ("minSide", self.min_side),
            ("minScale", self.min_scale),
            ("zoomStep", self.zoom_step),
            ("doubleTapZoom", self.double_tap_zoom),
            ("angleSnapIncrement", self.angle_snap_increment),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(PlanError::InvalidConfig(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        if !self.max_scale.is_finite() || self.min_scale >= self.max_scale {
            return Err(PlanError::InvalidConfig(format!(
                "minScale ({}) must be below maxScale ({})",
                self.min_scale, self.max_scale
            )));
        }
        let non_negative = [
            ("snapRadiusPx", self.snap_radius_px),
            ("touchSlopPx", self.touch_slop_px),
            ("rotateGapPx", self.rotate_gap_px),
            ("rotateHitRadiusPx", self.rotate_hit_radius_px),
            ("cornerHitRadiusPx", self.corner_hit_radius_px),
            ("edgeBandPx", self.edge_band_px),
            ("autoScrollMarginPx", self.auto_scroll_margin_px),
            ("autoScrollSpeedPx", self.auto_scroll_speed_px),
            ("fitPaddingPx", self.fit_padding_px),
            ("minimapPadding", self.minimap_padding),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(PlanError::InvalidConfig(format!(
                    "{name} must not be negative, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Clamp a scale into the allowed range.
    pub fn clamp_scale(&self, scale: f64) -> f64 {
        scale.clamp(self.min_scale, self.max_scale)
    }
}
