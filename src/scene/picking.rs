//! Rectangle-based scene picking

use glam::Vec2;

use super::HitTest;
use crate::events::ObjectId;

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    /// Create a rectangle from two corners
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    /// Create a rectangle from its minimum corner and size
    pub fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self::new(origin, origin + size)
    }

    /// Check if a point is inside this rectangle (edges inclusive)
    pub fn contains(&self, point: Vec2) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) / 2.0
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }
}

#[derive(Debug, Clone)]
struct SceneObject {
    id: ObjectId,
    bounds: Rect,
    depth: i32,
}

/// A flat list of pickable rectangles in world space
///
/// Higher depth is closer to the viewer; among equal depths the object
/// inserted last is on top.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    objects: Vec<SceneObject>,
}

impl Scene {
    /// Creates an empty scene
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an object
    pub fn insert(&mut self, id: ObjectId, bounds: Rect, depth: i32) {
        self.remove(id);
        self.objects.push(SceneObject { id, bounds, depth });
    }

    /// Builder form of [`Scene::insert`]
    pub fn with_object(mut self, id: ObjectId, bounds: Rect, depth: i32) -> Self {
        self.insert(id, bounds, depth);
        self
    }

    /// Removes an object, returning whether it was present
    pub fn remove(&mut self, id: ObjectId) -> bool {
        let before = self.objects.len();
        self.objects.retain(|o| o.id != id);
        self.objects.len() != before
    }

    /// Moves an existing object
    pub fn set_bounds(&mut self, id: ObjectId, bounds: Rect) {
        if let Some(object) = self.objects.iter_mut().find(|o| o.id == id) {
            object.bounds = bounds;
        }
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl HitTest for Scene {
    /// Point query; the cast direction is irrelevant for flat rectangles
    fn hit_test(&self, world_point: Vec2, _direction: Vec2) -> Option<ObjectId> {
        self.objects
            .iter()
            .enumerate()
            .filter(|(_, o)| o.bounds.contains(world_point))
            .max_by_key(|(order, o)| (o.depth, *order))
            .map(|(_, o)| o.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x: f32, y: f32, size: f32) -> Rect {
        Rect::from_origin_size(Vec2::new(x, y), Vec2::splat(size))
    }

    #[test]
    fn test_rect_contains_edges() {
        let rect = square(0.0, 0.0, 10.0);
        assert!(rect.contains(Vec2::new(0.0, 0.0)));
        assert!(rect.contains(Vec2::new(10.0, 10.0)));
        assert!(!rect.contains(Vec2::new(10.1, 5.0)));
        assert_eq!(rect.center(), Vec2::new(5.0, 5.0));
    }

    #[test]
    fn test_rect_normalizes_corners() {
        let rect = Rect::new(Vec2::new(5.0, 5.0), Vec2::new(-5.0, -5.0));
        assert_eq!(rect.min, Vec2::new(-5.0, -5.0));
        assert_eq!(rect.size(), Vec2::new(10.0, 10.0));
    }

    #[test]
    fn test_topmost_object_wins() {
        let scene = Scene::new()
            .with_object(ObjectId(1), square(0.0, 0.0, 10.0), 0)
            .with_object(ObjectId(2), square(5.0, 5.0, 10.0), 1)
            .with_object(ObjectId(3), square(5.0, 5.0, 10.0), 0);

        assert_eq!(scene.hit_test(Vec2::new(1.0, 1.0), Vec2::ZERO), Some(ObjectId(1)));
        assert_eq!(scene.hit_test(Vec2::new(7.0, 7.0), Vec2::ZERO), Some(ObjectId(2)));
        assert_eq!(scene.hit_test(Vec2::new(50.0, 50.0), Vec2::ZERO), None);
    }

    #[test]
    fn test_later_insertion_wins_ties() {
        let mut scene = Scene::new()
            .with_object(ObjectId(1), square(0.0, 0.0, 10.0), 0)
            .with_object(ObjectId(2), square(0.0, 0.0, 10.0), 0);
        assert_eq!(scene.hit_test(Vec2::ONE, Vec2::ZERO), Some(ObjectId(2)));

        // Re-inserting moves an object to the top of its depth
        scene.insert(ObjectId(1), square(0.0, 0.0, 10.0), 0);
        assert_eq!(scene.hit_test(Vec2::ONE, Vec2::ZERO), Some(ObjectId(1)));
        assert_eq!(scene.len(), 2);
    }

    #[test]
    fn test_remove_and_move() {
        let mut scene = Scene::new().with_object(ObjectId(1), square(0.0, 0.0, 1.0), 0);
        scene.set_bounds(ObjectId(1), square(10.0, 10.0, 1.0));
        assert_eq!(scene.hit_test(Vec2::new(0.5, 0.5), Vec2::ZERO), None);
        assert_eq!(
            scene.hit_test(Vec2::new(10.5, 10.5), Vec2::ZERO),
            Some(ObjectId(1))
        );
        assert!(scene.remove(ObjectId(1)));
        assert!(scene.is_empty());
    }
}
