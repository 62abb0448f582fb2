//! Movement integration system.
//!
//! Applies enabled acceleration forces to velocity, then friction and the
//! optional speed clamp, then integrates velocity into positions. Frozen
//! bodies are skipped entirely; their position can still be written by game
//! systems.

use bevy_ecs::prelude::*;

use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::RigidBody;
use crate::resources::worldtime::WorldTime;

pub fn movement(mut query: Query<(&mut MapPosition, &mut RigidBody)>, time: Res<WorldTime>) {
    let dt = time.delta;
    for (mut position, mut rigidbody) in query.iter_mut() {
        if rigidbody.frozen {
            continue;
        }

        let acceleration = rigidbody.total_acceleration();
        rigidbody.velocity += acceleration * dt;

        if rigidbody.friction > 0.0 {
            let damp = (1.0 - rigidbody.friction * dt).max(0.0);
            rigidbody.velocity *= damp;
        }

        if let Some(max_speed) = rigidbody.max_speed {
            let speed = rigidbody.velocity.length();
            if speed > max_speed && speed > 0.0 {
                rigidbody.velocity = rigidbody.velocity / speed * max_speed;
            }
        }

        let delta = rigidbody.velocity * dt;
        position.pos += delta;
    }
}
