//! Tinycade library.
//!
//! A headless remake of a set of small browser arcade games on a shared
//! ECS core: components, resources, systems, and events reused by every
//! game module under [`games`]. Rendering, audio, and the DOM front end
//! are out of scope; the crate simulates the games frame by frame and is
//! exercised from the driver binary and the integration tests.

pub mod components;
pub mod events;
pub mod game;
pub mod games;
pub mod resources;
pub mod systems;
