use bevy_ecs::prelude::*;

/// Event triggered when a [`Timer`](crate::components::timer::Timer)
/// completes a cycle. Carries the owning entity and the timer's signal name
/// so observers can dispatch on it.
#[derive(Event, Debug, Clone)]
pub struct TimerFinishedEvent {
    pub entity: Entity,
    pub signal: String,
}
