//! AABB collision detection.
//!
//! Scans all pairs of entities carrying both a position and a collider and
//! triggers a [`CollisionEvent`] for each overlapping pair. Reactions live
//! in game-specific observers. The entity counts here are small (tens), so
//! the quadratic pair scan matches the original games.

use bevy_ecs::prelude::*;

use crate::components::boxcollider::BoxCollider;
use crate::components::mapposition::MapPosition;
use crate::events::collision::CollisionEvent;

pub fn collision_detector(
    mut query: Query<(Entity, &mut MapPosition, &BoxCollider)>,
    mut commands: Commands,
) {
    let mut pairs: Vec<(Entity, Entity)> = Vec::new();

    let mut combos = query.iter_combinations_mut();
    while let Some(
        [
            (entity_a, position_a, collider_a),
            (entity_b, position_b, collider_b),
        ],
    ) = combos.fetch_next()
    {
        if collider_a.overlaps(position_a.pos, collider_b, position_b.pos) {
            pairs.push((entity_a, entity_b));
        }
    }

    for (a, b) in pairs {
        commands.trigger(CollisionEvent { a, b });
    }
}
