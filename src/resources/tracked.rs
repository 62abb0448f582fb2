//! Tracked groups resource for entity counting.
//!
//! The [`TrackedGroups`] resource defines which group names are monitored by
//! [`update_group_counts_system`](crate::systems::group::update_group_counts_system).
//! Games register the groups they care about at setup ("enemy", "bullet",
//! "agent") and read the counts back from
//! [`WorldSignals`](crate::resources::worldsignals::WorldSignals) as
//! `"group_count:{name}"`. This keeps the engine decoupled from
//! game-specific group names.

use bevy_ecs::prelude::*;
use rustc_hash::FxHashSet;

/// Resource that holds the set of group names to track for entity counting.
///
/// Should be cleared when switching screens to avoid stale counts.
#[derive(Debug, Clone, Resource, Default)]
pub struct TrackedGroups {
    /// The set of group names currently being tracked.
    pub groups: FxHashSet<String>,
}

impl TrackedGroups {
    /// Adds a group name to the set of tracked groups.
    pub fn add_group(&mut self, group_name: impl Into<String>) {
        self.groups.insert(group_name.into());
    }

    /// Returns `true` if the given group name is being tracked.
    pub fn has_group(&self, group_name: impl AsRef<str>) -> bool {
        self.groups.contains(group_name.as_ref())
    }

    /// Clears all tracked group names.
    pub fn clear(&mut self) {
        self.groups.clear();
    }

    /// Returns an iterator over all tracked group names.
    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.groups.iter()
    }
}
