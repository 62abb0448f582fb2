use bevy_ecs::prelude::Component;

/// Tag component naming the logical group an entity belongs to
/// ("bullet", "enemy", "item", ...). Collision observers and the group
/// counting system dispatch on these names.
#[derive(Component, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Group(String);

impl Group {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}
