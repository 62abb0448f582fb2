//! Repeating timer system.
//!
//! Accumulates scaled frame time on every [`Timer`] component and triggers a
//! [`TimerFinishedEvent`] when the duration elapses. The timer keeps the
//! overshoot so a cadence of e.g. 0.5s stays accurate across frames.

use bevy_ecs::prelude::*;

use crate::components::timer::Timer;
use crate::events::timer::TimerFinishedEvent;
use crate::resources::worldtime::WorldTime;

pub fn update_timers(
    world_time: Res<WorldTime>,
    mut query: Query<(Entity, &mut Timer)>,
    mut commands: Commands,
) {
    let dt = world_time.delta;
    for (entity, mut timer) in query.iter_mut() {
        timer.elapsed += dt;
        if timer.elapsed >= timer.duration {
            timer.elapsed -= timer.duration;
            commands.trigger(TimerFinishedEvent {
                entity,
                signal: timer.signal.clone(),
            });
        }
    }
}
