//! Collision event type.
//!
//! The collision system emits [`CollisionEvent`] whenever two entities with
//! colliders overlap. Game modules subscribe observers to this event to
//! react in a decoupled manner (damage, scoring, despawn).

use bevy_ecs::prelude::*;

/// Event fired when two entities with [`BoxCollider`] overlap.
///
/// The two fields, [`CollisionEvent::a`] and [`CollisionEvent::b`], are the
/// entity IDs of the participants. No ordering guarantees are provided;
/// observers that care about roles should look up each entity's
/// [`Group`](crate::components::group::Group).
///
/// [`BoxCollider`]: crate::components::boxcollider::BoxCollider
#[derive(Event, Debug, Clone, Copy)]
pub struct CollisionEvent {
    pub a: Entity,
    pub b: Entity,
}
