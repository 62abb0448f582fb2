//! Kinematic body component with multiple named acceleration forces.
//!
//! The [`RigidBody`] component stores velocity and named acceleration forces
//! for an entity. Each force can be individually enabled/disabled, allowing
//! game logic to toggle forces like gravity or wind independently.
//!
//! The `frozen` flag allows temporarily disabling all movement calculations,
//! useful when an entity's position is controlled externally.

use bevy_ecs::prelude::Component;
use glam::Vec2;
use rustc_hash::FxHashMap;

/// A named acceleration force that can be toggled on/off.
#[derive(Clone, Copy, Debug)]
pub struct AccelerationForce {
    /// The acceleration vector in world units per second squared.
    pub value: Vec2,
    /// Whether this force is currently active.
    pub enabled: bool,
}

impl AccelerationForce {
    /// Create a new enabled acceleration force.
    pub fn new(value: Vec2) -> Self {
        Self {
            value,
            enabled: true,
        }
    }
}

/// Kinematic body storing velocity and named acceleration forces.
///
/// Updated by input/game systems and consumed by
/// [`movement`](crate::systems::movement::movement) to update
/// [`MapPosition`](super::mapposition::MapPosition).
#[derive(Component, Clone, Debug)]
pub struct RigidBody {
    /// Current velocity in world units per second.
    pub velocity: Vec2,
    /// Named acceleration forces. Total acceleration is the sum of all enabled forces.
    pub forces: FxHashMap<String, AccelerationForce>,
    /// Velocity damping factor. Applied as: velocity *= (1 - friction * delta).
    pub friction: f32,
    /// Optional maximum speed. If set, velocity magnitude is clamped to this value.
    pub max_speed: Option<f32>,
    /// When true, the movement system skips this entity entirely.
    pub frozen: bool,
}

impl Default for RigidBody {
    fn default() -> Self {
        Self::new()
    }
}

impl RigidBody {
    /// Create a RigidBody with zero velocity and no forces.
    pub fn new() -> Self {
        Self {
            velocity: Vec2::ZERO,
            forces: FxHashMap::default(),
            friction: 0.0,
            max_speed: None,
            frozen: false,
        }
    }

    /// Create a RigidBody with physics parameters configured.
    pub fn with_physics(friction: f32, max_speed: Option<f32>) -> Self {
        Self {
            friction,
            max_speed,
            ..Self::new()
        }
    }

    /// Create a RigidBody with an initial velocity.
    pub fn with_velocity(velocity: Vec2) -> Self {
        Self {
            velocity,
            ..Self::new()
        }
    }

    /// Add or update a named acceleration force (enabled by default).
    pub fn add_force(&mut self, name: &str, value: Vec2) {
        self.forces
            .insert(name.to_string(), AccelerationForce::new(value));
    }

    /// Remove a named force entirely.
    pub fn remove_force(&mut self, name: &str) {
        self.forces.remove(name);
    }

    /// Enable or disable a specific force by name.
    /// Returns false if the force doesn't exist.
    pub fn set_force_enabled(&mut self, name: &str, enabled: bool) -> bool {
        if let Some(force) = self.forces.get_mut(name) {
            force.enabled = enabled;
            true
        } else {
            false
        }
    }

    /// Calculate the total acceleration from all enabled forces.
    pub fn total_acceleration(&self) -> Vec2 {
        let mut total = Vec2::ZERO;
        for force in self.forces.values() {
            if force.enabled {
                total += force.value;
            }
        }
        total
    }

    /// Freeze the rigid body, preventing the movement system from updating it.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    /// Unfreeze the rigid body, allowing the movement system to update it.
    pub fn unfreeze(&mut self) {
        self.frozen = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_rigidbody_new() {
        let rb = RigidBody::new();
        assert_eq!(rb.velocity, Vec2::ZERO);
        assert!(rb.forces.is_empty());
        assert!(approx_eq(rb.friction, 0.0));
        assert!(rb.max_speed.is_none());
        assert!(!rb.frozen);
    }

    #[test]
    fn test_total_acceleration_sums_enabled_forces() {
        let mut rb = RigidBody::new();
        rb.add_force("gravity", Vec2::new(0.0, 100.0));
        rb.add_force("wind", Vec2::new(50.0, 0.0));
        let total = rb.total_acceleration();
        assert!(approx_eq(total.x, 50.0));
        assert!(approx_eq(total.y, 100.0));
    }

    #[test]
    fn test_disabled_forces_excluded() {
        let mut rb = RigidBody::new();
        rb.add_force("gravity", Vec2::new(0.0, 100.0));
        rb.add_force("wind", Vec2::new(50.0, 0.0));
        assert!(rb.set_force_enabled("wind", false));
        let total = rb.total_acceleration();
        assert!(approx_eq(total.x, 0.0));
        assert!(approx_eq(total.y, 100.0));
    }

    #[test]
    fn test_set_force_enabled_nonexistent() {
        let mut rb = RigidBody::new();
        assert!(!rb.set_force_enabled("nonexistent", true));
    }

    #[test]
    fn test_remove_force() {
        let mut rb = RigidBody::new();
        rb.add_force("gravity", Vec2::new(0.0, 100.0));
        rb.remove_force("gravity");
        assert!(rb.forces.is_empty());
    }

    #[test]
    fn test_freeze_unfreeze() {
        let mut rb = RigidBody::new();
        rb.freeze();
        assert!(rb.frozen);
        rb.unfreeze();
        assert!(!rb.frozen);
    }
}
