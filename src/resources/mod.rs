//! ECS resources shared by every game module.
//!
//! Submodules overview:
//! - [`assetstore`] – asset manifest with placeholder fallback for missing files
//! - [`gameconfig`] – engine settings loaded from an INI file
//! - [`input`] – virtual input state fed by the driver loop
//! - [`rng`] – seedable random number generator for reproducible runs
//! - [`screen`] – screen-state machine resources (Title/Playing/GameOver)
//! - [`systemsstore`] – registered one-shot systems addressed by name
//! - [`tracked`] – group names whose entity counts are published
//! - [`worldsignals`] – global signal map for cross-system communication
//! - [`worldtime`] – frame clock with time scaling

pub mod assetstore;
pub mod gameconfig;
pub mod input;
pub mod rng;
pub mod screen;
pub mod systemsstore;
pub mod tracked;
pub mod worldsignals;
pub mod worldtime;
