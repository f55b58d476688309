//! Overview map: the floor's rooms scaled into a small fixed panel.

use kurbo::{Point, Rect, Size, Vec2};

use crate::config::EngineConfig;
use crate::scene::Floor;
use crate::viewport::Viewport;

/// Uniform fit of a content rectangle inside a container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitRect {
    /// Where the content lands inside the container.
    pub dest: Rect,
    pub scale: f64,
}

/// Scale `content` uniformly to fit `container`, centered on both axes.
///
/// `None` when the content has no area.
pub fn fit_rect(content: Rect, container: Rect) -> Option<FitRect> {
    if content.width() <= 0.0 || content.height() <= 0.0 {
        return None;
    }
    let scale = (container.width() / content.width()).min(container.height() / content.height());
    let size = Size::new(content.width() * scale, content.height() * scale);
    let origin = Point::new(
        container.x0 + (container.width() - size.width) / 2.0,
        container.y0 + (container.height() - size.height) / 2.0,
    );
    Some(FitRect {
        dest: Rect::from_origin_size(origin, size),
        scale,
    })
}

/// Map a world rectangle into minimap space.
pub fn map_rect(world: Rect, content: Rect, fit: &FitRect) -> Rect {
    let origin = Point::new(
        fit.dest.x0 + (world.x0 - content.x0) * fit.scale,
        fit.dest.y0 + (world.y0 - content.y0) * fit.scale,
    );
    Rect::from_origin_size(origin, Size::new(world.width() * fit.scale, world.height() * fit.scale))
}

/// Map a minimap point back to world space.
pub fn unmap_point(p: Point, content: Rect, fit: &FitRect) -> Point {
    Point::new(
        content.x0 + (p.x - fit.dest.x0) / fit.scale,
        content.y0 + (p.y - fit.dest.y0) / fit.scale,
    )
}

/// A minimap laid out for one floor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MiniMap {
    /// World bounds of the floor's rooms.
    pub content: Rect,
    /// Panel area in minimap-local pixels, inside the padding.
    pub container: Rect,
    pub fit: FitRect,
}

impl MiniMap {
    /// Lay out a minimap for `floor`. `None` when the floor has no rooms.
    pub fn for_floor(floor: &Floor, config: &EngineConfig) -> Option<Self> {
        let content = floor.rooms_bounds()?;
        let pad = config.minimap_padding;
        let container = Rect::new(
            pad,
            pad,
            pad + config.minimap_width,
            pad + config.minimap_height,
        );
        Self::new(content, container)
    }

    pub fn new(content: Rect, container: Rect) -> Option<Self> {
        let fit = fit_rect(content, container)?;
        Some(Self {
            content,
            container,
            fit,
        })
    }

    /// Total panel size including padding on both sides.
    pub fn panel_size(&self) -> Size {
        Size::new(
            self.container.x1 + self.container.x0,
            self.container.y1 + self.container.y0,
        )
    }

    pub fn world_to_mini(&self, world: Rect) -> Rect {
        map_rect(world, self.content, &self.fit)
    }

    pub fn mini_to_world(&self, p: Point) -> Point {
        unmap_point(p, self.content, &self.fit)
    }

    /// Minimap rectangles for each room's axis-aligned bounds.
    pub fn room_rects(&self, floor: &Floor) -> Vec<Rect> {
        floor
            .rooms
            .iter()
            .map(|room| self.world_to_mini(room.bounds()))
            .collect()
    }

    /// Outline of the main view's visible area.
    pub fn viewport_box(&self, viewport: &Viewport, size: Size) -> Rect {
        self.world_to_mini(viewport.visible_world_rect(size))
    }

    /// Pan that puts the world point under `tap` at the center of the
    /// main view, keeping the current scale.
    pub fn jump_pan(&self, tap: Point, viewport: &Viewport, size: Size) -> Vec2 {
        let world = self.mini_to_world(tap);
        Vec2::new(size.width / 2.0, size.height / 2.0) - world.to_vec2() * viewport.scale()
    }
}
