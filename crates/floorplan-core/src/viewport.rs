//! Viewport module for pan/zoom transforms.

use kurbo::{Affine, Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

use crate::config::{EngineConfig, MAX_SCALE, MIN_SCALE};
use crate::geometry;

/// Scale and pan computed by [`Viewport::compute_fit`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewFit {
    pub scale: f64,
    pub pan: Vec2,
}

/// Viewport manages the view transform for the canvas.
///
/// `screen = world * scale + pan`. The scale always stays within
/// `[min_scale, max_scale]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Current translation (screen pixels).
    pub pan: Vec2,
    /// Current zoom level.
    scale: f64,
    pub min_scale: f64,
    pub max_scale: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            pan: Vec2::ZERO,
            scale: 1.0,
            min_scale: MIN_SCALE,
            max_scale: MAX_SCALE,
        }
    }
}

impl Viewport {
    /// Create a viewport with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a viewport using the scale range from `config`.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            min_scale: config.min_scale,
            max_scale: config.max_scale,
            scale: config.clamp_scale(1.0),
            ..Self::default()
        }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Set the scale, clamped to the allowed range.
    pub fn set_scale(&mut self, scale: f64) {
        self.scale = scale.clamp(self.min_scale, self.max_scale);
    }

    /// Get the affine transform for rendering (world to screen).
    pub fn transform(&self) -> Affine {
        Affine::translate(self.pan) * Affine::scale(self.scale)
    }

    /// Get the inverse transform for input handling (screen to world).
    pub fn inverse_transform(&self) -> Affine {
        Affine::scale(1.0 / self.scale) * Affine::translate(-self.pan)
    }

    /// Convert a screen point to world coordinates.
    pub fn screen_to_world(&self, screen: Point) -> Point {
        geometry::world_from_screen(screen, self.pan, self.scale)
    }

    /// Convert a world point to screen coordinates.
    pub fn world_to_screen(&self, world: Point) -> Point {
        geometry::screen_from_world(world, self.pan, self.scale)
    }

    /// Zoom to `new_scale` keeping the world point under `screen` fixed.
    pub fn zoom_at(&mut self, screen: Point, new_scale: f64) {
        let world = self.screen_to_world(screen);
        self.set_scale(new_scale);
        self.pan = screen.to_vec2() - world.to_vec2() * self.scale;
    }

    /// Multiply the scale by `factor` around `screen`.
    pub fn zoom_by(&mut self, screen: Point, factor: f64) {
        self.zoom_at(screen, self.scale * factor);
    }

    /// Zoom in by `step` around the viewport center.
    pub fn zoom_in(&mut self, viewport: Size, step: f64) {
        self.zoom_by(center_of(viewport), step);
    }

    /// Zoom out by `step` around the viewport center.
    pub fn zoom_out(&mut self, viewport: Size, step: f64) {
        self.zoom_by(center_of(viewport), 1.0 / step);
    }

    /// Back to scale 1 with no pan.
    pub fn reset(&mut self) {
        self.pan = Vec2::ZERO;
        self.set_scale(1.0);
    }

    /// Apply a multi-touch transform step.
    ///
    /// The world point under `centroid` stays under it after zooming by
    /// `zoom`, then the view is shifted by `pan_delta`.
    pub fn apply_transform_gesture(&mut self, centroid: Point, pan_delta: Vec2, zoom: f64) {
        let world = self.screen_to_world(centroid);
        self.set_scale(self.scale * zoom);
        self.pan = centroid.to_vec2() - world.to_vec2() * self.scale + pan_delta;
    }

    /// Scale and pan that center `bounds` in `viewport` with `padding`
    /// pixels on every side. `None` when there is nothing to fit or the
    /// bounds have zero extent.
    pub fn compute_fit(&self, bounds: Option<Rect>, viewport: Size, padding: f64) -> Option<ViewFit> {
        let bounds = bounds?;
        if bounds.width() <= 0.0 || bounds.height() <= 0.0 {
            return None;
        }
        if viewport.width <= 0.0 || viewport.height <= 0.0 {
            return None;
        }
        let avail = Size::new(
            (viewport.width - padding * 2.0).max(1.0),
            (viewport.height - padding * 2.0).max(1.0),
        );
        let scale_x = avail.width / bounds.width();
        let scale_y = avail.height / bounds.height();
        let scale = scale_x.min(scale_y).clamp(self.min_scale, self.max_scale);

        let pan = center_of(viewport).to_vec2() - bounds.center().to_vec2() * scale;
        Some(ViewFit { scale, pan })
    }

    /// Fit `bounds` into the viewport. Returns whether the view changed.
    pub fn zoom_to_fit(&mut self, bounds: Option<Rect>, viewport: Size, padding: f64) -> bool {
        match self.compute_fit(bounds, viewport, padding) {
            Some(fit) => {
                self.scale = fit.scale;
                self.pan = fit.pan;
                true
            }
            None => false,
        }
    }

    /// Nudge the view when `pointer` is within `margin` of a viewport edge,
    /// so content under the pointer scrolls into view. Returns whether the
    /// pan changed.
    pub fn auto_scroll(&mut self, pointer: Point, viewport: Size, margin: f64, speed: f64) -> bool {
        if viewport.width <= 0.0 || viewport.height <= 0.0 {
            return false;
        }
        let mut nudge = Vec2::ZERO;
        if pointer.x < margin {
            nudge.x = speed;
        } else if pointer.x > viewport.width - margin {
            nudge.x = -speed;
        }
        if pointer.y < margin {
            nudge.y = speed;
        } else if pointer.y > viewport.height - margin {
            nudge.y = -speed;
        }
        if nudge == Vec2::ZERO {
            return false;
        }
        self.pan += nudge;
        true
    }

    /// Keep the pan within one viewport size of the origin on each axis.
    pub fn clamp_pan(&mut self, viewport: Size) {
        self.pan = Vec2::new(
            self.pan.x.clamp(-viewport.width, viewport.width),
            self.pan.y.clamp(-viewport.height, viewport.height),
        );
    }

    /// The world-space rectangle currently visible.
    pub fn visible_world_rect(&self, viewport: Size) -> Rect {
        Rect::from_points(
            self.screen_to_world(Point::ZERO),
            self.screen_to_world(Point::new(viewport.width, viewport.height)),
        )
    }
}

fn center_of(viewport: Size) -> Point {
    Point::new(viewport.width / 2.0, viewport.height / 2.0)
}
