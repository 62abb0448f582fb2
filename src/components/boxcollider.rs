use bevy_ecs::prelude::Component;
use glam::Vec2;

/// Axis-aligned rectangular collider, positioned relative to the entity's
/// [`MapPosition`](super::mapposition::MapPosition).
#[derive(Debug, Clone, Copy, PartialEq, Component)]
pub struct BoxCollider {
    pub size: Vec2,
    pub offset: Vec2,
}

impl BoxCollider {
    /// Create a BoxCollider with given size, centered on the entity position.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            offset: Vec2::new(-width * 0.5, -height * 0.5),
        }
    }

    /// Returns (min, max) of the collider AABB for a given entity position.
    /// Handles negative size by normalizing to proper min/max.
    pub fn aabb(&self, position: Vec2) -> (Vec2, Vec2) {
        let p0 = position + self.offset;
        let p1 = p0 + self.size;
        (p0.min(p1), p0.max(p1))
    }

    /// AABB vs AABB overlap test against another BoxCollider at a different
    /// entity position.
    pub fn overlaps(&self, position: Vec2, other: &Self, other_position: Vec2) -> bool {
        let (min_a, max_a) = self.aabb(position);
        let (min_b, max_b) = other.aabb(other_position);
        min_a.x < max_b.x && max_a.x > min_b.x && min_a.y < max_b.y && max_a.y > min_b.y
    }

    /// Point containment in world space.
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn contains_point(&self, position: Vec2, point: Vec2) -> bool {
        let (min, max) = self.aabb(position);
        point.x >= min.x && point.x <= max.x && point.y >= min.y && point.y <= max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_detected() {
        let a = BoxCollider::new(10.0, 10.0);
        let b = BoxCollider::new(10.0, 10.0);
        assert!(a.overlaps(Vec2::ZERO, &b, Vec2::new(5.0, 0.0)));
    }

    #[test]
    fn test_no_overlap_when_apart() {
        let a = BoxCollider::new(10.0, 10.0);
        let b = BoxCollider::new(10.0, 10.0);
        assert!(!a.overlaps(Vec2::ZERO, &b, Vec2::new(20.0, 0.0)));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = BoxCollider::new(10.0, 10.0);
        let b = BoxCollider::new(10.0, 10.0);
        assert!(!a.overlaps(Vec2::ZERO, &b, Vec2::new(10.0, 0.0)));
    }

    #[test]
    fn test_contains_point() {
        let a = BoxCollider::new(4.0, 4.0);
        assert!(a.contains_point(Vec2::ZERO, Vec2::new(1.0, 1.0)));
        assert!(!a.contains_point(Vec2::ZERO, Vec2::new(3.0, 0.0)));
    }
}
