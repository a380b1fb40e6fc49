//! Camera mapping screen space into world space

use glam::Vec2;

use super::CoordinateConverter;
use super::picking::Rect;

/// Camera defines a view into world space
///
/// `bounds` is the world region visible through `viewport`, the screen
/// rectangle the camera renders into. Screen Y grows downward, world Y
/// grows upward.
#[derive(Debug, Clone)]
pub struct Camera {
    /// World space bounds this camera views. Changing bounds = zooming in/out
    pub bounds: Rect,
    /// Screen space rectangle in logical pixels
    pub viewport: Rect,
}

impl Camera {
    /// Create camera with explicit world bounds and screen viewport
    pub fn new(bounds: Rect, viewport: Rect) -> Self {
        Self { bounds, viewport }
    }

    /// Create camera centered at the world origin filling a screen of the given size
    pub fn centered(world_size: Vec2, screen_size: Vec2) -> Self {
        let half = world_size / 2.0;
        Self::new(
            Rect::new(-half, half),
            Rect::from_origin_size(Vec2::ZERO, screen_size),
        )
    }

    /// Pan the camera by delta in world units
    pub fn pan(&mut self, delta: Vec2) {
        self.bounds.min += delta;
        self.bounds.max += delta;
    }

    /// Zoom in/out by changing bounds size around center
    /// scale > 1.0 = zoom out, scale < 1.0 = zoom in
    pub fn zoom(&mut self, scale: f32) {
        let center = self.bounds.center();
        let half = self.bounds.size() * scale / 2.0;
        self.bounds = Rect::new(center - half, center + half);
    }
}

impl CoordinateConverter for Camera {
    fn screen_to_world(&self, point: Vec2) -> Vec2 {
        let size = self.viewport.size();
        if size.x == 0.0 || size.y == 0.0 {
            return self.bounds.center();
        }

        let t = (point - self.viewport.min) / size;
        Vec2::new(
            self.bounds.min.x + t.x * self.bounds.size().x,
            self.bounds.max.y - t.y * self.bounds.size().y,
        )
    }
}
