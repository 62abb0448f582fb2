//! Per-frame ECS systems shared by every game module.
//!
//! - [`collision`] – AABB pair scan emitting [`CollisionEvent`](crate::events::collision::CollisionEvent)
//! - [`group`] – publishes tracked group counts into `WorldSignals`
//! - [`movement`] – integrates forces and velocity into positions
//! - [`screen`] – pending screen transitions and run conditions
//! - [`time`] – updates the world clock
//! - [`timer`] – repeating timers firing `TimerFinishedEvent`
//! - [`ttl`] – despawns entities whose time-to-live ran out

pub mod collision;
pub mod group;
pub mod movement;
pub mod screen;
pub mod time;
pub mod timer;
pub mod ttl;

use crate::components::persistent::Persistent;
use bevy_ecs::prelude::*;

/// Despawn every entity that is not marked [`Persistent`]. Used when leaving
/// a screen so observers and registered systems survive the reset.
pub fn clean_all_entities(
    mut commands: Commands,
    query: Query<Entity, Without<Persistent>>,
) {
    for entity in query.iter() {
        commands.entity(entity).try_despawn();
    }
}
