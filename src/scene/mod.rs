//! Scene collaborators: picking and coordinate conversion
//!
//! The tracker only needs two questions answered about the scene: where a
//! screen point lands in the world, and which object sits there. Both are
//! traits so hosts can plug in their own camera and physics.

mod camera;
mod picking;

pub use camera::Camera;
pub use picking::{Rect, Scene};

use glam::Vec2;

use crate::events::ObjectId;

/// Topmost-object query along a cast from a world point
pub trait HitTest {
    fn hit_test(&self, world_point: Vec2, direction: Vec2) -> Option<ObjectId>;
}

/// Maps raw device points into world space
pub trait CoordinateConverter {
    fn screen_to_world(&self, point: Vec2) -> Vec2;
}

impl<F> CoordinateConverter for F
where
    F: Fn(Vec2) -> Vec2,
{
    fn screen_to_world(&self, point: Vec2) -> Vec2 {
        self(point)
    }
}

/// Converter for hosts whose screen and world spaces coincide
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl CoordinateConverter for Identity {
    fn screen_to_world(&self, point: Vec2) -> Vec2 {
        point
    }
}

/// Resolves a raw pointer position to the object under it
pub struct HitResolver<'a> {
    pub scene: &'a dyn HitTest,
    pub converter: &'a dyn CoordinateConverter,
    pub direction: Vec2,
}

impl HitResolver<'_> {
    pub fn resolve(&self, raw_point: Vec2) -> Option<ObjectId> {
        let world = self.converter.screen_to_world(raw_point);
        self.scene.hit_test(world, self.direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolver_converts_before_picking() {
        let scene = Scene::new().with_object(
            ObjectId(4),
            Rect::new(Vec2::new(100.0, 100.0), Vec2::new(110.0, 110.0)),
            0,
        );
        let offset = |p: Vec2| p + Vec2::splat(100.0);
        let resolver = HitResolver {
            scene: &scene,
            converter: &offset,
            direction: Vec2::ZERO,
        };

        assert_eq!(resolver.resolve(Vec2::new(5.0, 5.0)), Some(ObjectId(4)));
        assert_eq!(resolver.resolve(Vec2::new(105.0, 105.0)), None);
    }
}
