use bevy_ecs::prelude::Resource;

/// Seedable random number generator shared by the simulation.
///
/// All randomness (food placement, item drops, enemy rows) flows through
/// this resource so a run is fully reproducible from its seed.
#[derive(Resource, Debug, Clone)]
pub struct GameRng(pub fastrand::Rng);

impl GameRng {
    pub fn seeded(seed: u64) -> Self {
        Self(fastrand::Rng::with_seed(seed))
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self(fastrand::Rng::new())
    }
}
