use bevy_ecs::prelude::Component;

/// Marker for entities that must survive screen changes (observers,
/// registered systems). `clean_all_entities` skips entities with this
/// component.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Persistent;
