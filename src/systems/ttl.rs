//! TTL (Time-to-live) system.
//!
//! Decrements TTL timers by the scaled frame delta and despawns entities
//! when their time runs out.

use bevy_ecs::prelude::*;

use crate::components::ttl::Ttl;
use crate::resources::worldtime::WorldTime;

/// Decrements TTL and despawns entities when it reaches zero.
pub fn ttl_system(
    world_time: Res<WorldTime>,
    mut query: Query<(Entity, &mut Ttl)>,
    mut commands: Commands,
) {
    let dt = world_time.delta; // delta is already scaled by time_scale
    for (entity, mut ttl) in query.iter_mut() {
        ttl.remaining -= dt;
        if ttl.remaining <= 0.0 {
            commands.entity(entity).try_despawn();
        }
    }
}
