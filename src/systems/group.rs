//! Group entity counting system.
//!
//! Counts entities belonging to tracked groups and publishes the counts as
//! integer signals in [`WorldSignals`], under `"group_count:{name}"`. Game
//! logic reacts to population changes (no enemies left → wave cleared, no
//! agents left → last one standing) without coupling the engine to specific
//! group names.

use crate::components::group::Group;
use crate::resources::tracked::TrackedGroups;
use crate::resources::worldsignals::WorldSignals;
use bevy_ecs::prelude::*;

use rustc_hash::FxHashMap;

/// Counts entities for each tracked group and updates [`WorldSignals`].
///
/// Groups with zero entities are correctly reported as `0`, which is
/// essential for detecting when all entities of a group have been despawned.
pub fn update_group_counts_system(
    query_group: Query<&Group>,
    mut world_signals: ResMut<WorldSignals>,
    tracked_groups: Res<TrackedGroups>,
) {
    let mut counts: FxHashMap<&str, i32> = FxHashMap::default();
    for group in query_group.iter() {
        if tracked_groups.has_group(group.name()) {
            *counts.entry(group.name()).or_insert(0) += 1;
        }
    }

    for group_name in tracked_groups.iter() {
        let count = counts.get(group_name.as_str()).copied().unwrap_or(0);
        world_signals.set_group_count(group_name, count);
    }
}
