//! ECS components shared by every game module.
//!
//! Submodules overview:
//! - [`boxcollider`] – axis-aligned rectangular collider for collision detection
//! - [`gridposition`] – integer tile coordinates and cardinal directions
//! - [`group`] – tag component for grouping entities by name
//! - [`health`] – hit points with a maximum
//! - [`mapposition`] – world-space position (pivot) for an entity
//! - [`persistent`] – marker for entities that persist across screen changes
//! - [`rigidbody`] – kinematic body storing velocity and named forces
//! - [`timer`] – repeating countdown that emits an event when finished
//! - [`ttl`] – time-to-live for automatic despawning

pub mod boxcollider;
pub mod gridposition;
pub mod group;
pub mod health;
pub mod mapposition;
pub mod persistent;
pub mod rigidbody;
pub mod timer;
pub mod ttl;
