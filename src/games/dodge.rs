//! Apple dodge: run left and right under a tree that drops apples.
//!
//! Apples accelerate under a gravity force and are culled at the floor;
//! every apple that lands without hitting the runner scores. Contact costs
//! a life, and the round ends when the lives run out.

use bevy_ecs::prelude::*;
use bevy_ecs::schedule::Schedule;
use glam::Vec2;
use log::info;
use serde::Deserialize;

use crate::components::boxcollider::BoxCollider;
use crate::components::group::Group;
use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::RigidBody;
use crate::events::collision::CollisionEvent;
use crate::resources::input::{Button, InputState};
use crate::resources::rng::GameRng;
use crate::resources::screen::{NextScreen, Screens};
use crate::resources::worldsignals::WorldSignals;
use crate::resources::worldtime::WorldTime;

#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DodgeConfig {
    pub width: f32,
    pub height: f32,
    pub runner_speed: f32,
    pub lives: i32,
    pub gravity: f32,
    /// Seconds between apple drops; shrinks as the round goes on.
    pub drop_interval: f32,
    pub min_drop_interval: f32,
    /// Interval multiplier applied after every drop.
    pub drop_acceleration: f32,
}

impl Default for DodgeConfig {
    fn default() -> Self {
        Self {
            width: 640.0,
            height: 480.0,
            runner_speed: 300.0,
            lives: 3,
            gravity: 600.0,
            drop_interval: 0.8,
            min_drop_interval: 0.25,
            drop_acceleration: 0.98,
        }
    }
}

#[derive(Component, Debug, Default)]
pub struct Runner;

#[derive(Component, Debug, Default)]
pub struct Apple;

/// Countdown to the next apple drop.
#[derive(Resource, Debug)]
pub struct DropClock {
    pub countdown: f32,
    pub interval: f32,
}

pub fn spawn(world: &mut World, config: &DodgeConfig) {
    world.spawn((
        Runner,
        MapPosition::new(config.width * 0.5, config.height - 30.0),
        RigidBody::new(),
        BoxCollider::new(30.0, 40.0),
        Group::new("runner"),
    ));
    world.insert_resource(DropClock {
        countdown: config.drop_interval,
        interval: config.drop_interval,
    });
    world.add_observer(observe_dodge_collision);

    let mut signals = world.resource_mut::<WorldSignals>();
    signals.set_integer("score", 0);
    signals.set_integer("lives", config.lives);
    signals.set_string("scene", "dodge");
    info!("dodge spawned with {} lives", config.lives);
}

pub fn schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems(
        (
            runner_control_system,
            apple_drop_system,
            floor_cull_system,
            bounds_system,
        )
            .chain(),
    );
    schedule
}

/// Left/right steering; the clamp happens in [`bounds_system`].
pub fn runner_control_system(
    input: Res<InputState>,
    config: Res<DodgeConfig>,
    mut runners: Query<&mut RigidBody, With<Runner>>,
) {
    for mut body in runners.iter_mut() {
        let mut vx = 0.0;
        if input.button(Button::Left).active {
            vx -= config.runner_speed;
        }
        if input.button(Button::Right).active {
            vx += config.runner_speed;
        }
        body.velocity = Vec2::new(vx, 0.0);
    }
}

/// Keeps the runner inside the playfield once movement has applied its
/// velocity for the frame.
pub fn bounds_system(
    config: Res<DodgeConfig>,
    mut runners: Query<&mut MapPosition, With<Runner>>,
) {
    for mut position in runners.iter_mut() {
        position.pos.x = position.pos.x.clamp(15.0, config.width - 15.0);
    }
}

/// Drops an apple from a random x when the clock runs out, then speeds up.
pub fn apple_drop_system(
    time: Res<WorldTime>,
    config: Res<DodgeConfig>,
    mut clock: ResMut<DropClock>,
    mut rng: ResMut<GameRng>,
    mut commands: Commands,
) {
    clock.countdown -= time.delta;
    if clock.countdown > 0.0 {
        return;
    }
    clock.interval = (clock.interval * config.drop_acceleration).max(config.min_drop_interval);
    clock.countdown = clock.interval;

    let x = 20.0 + rng.0.f32() * (config.width - 40.0);
    let mut body = RigidBody::new();
    body.add_force("gravity", Vec2::new(0.0, config.gravity));
    commands.spawn((
        Apple,
        MapPosition::new(x, -20.0),
        body,
        BoxCollider::new(20.0, 20.0),
        Group::new("apple"),
    ));
}

/// Apples that reach the floor were dodged: score and despawn.
pub fn floor_cull_system(
    config: Res<DodgeConfig>,
    apples: Query<(Entity, &MapPosition), With<Apple>>,
    mut signals: ResMut<WorldSignals>,
    mut commands: Commands,
) {
    for (entity, position) in apples.iter() {
        if position.pos.y > config.height + 20.0 {
            signals.add_integer("score", 5);
            commands.entity(entity).try_despawn();
        }
    }
}

/// An apple on the runner costs a life; at zero the round is over.
pub fn observe_dodge_collision(
    trigger: On<CollisionEvent>,
    groups: Query<&Group>,
    mut signals: ResMut<WorldSignals>,
    mut next_screen: ResMut<NextScreen>,
    mut commands: Commands,
) {
    let event = trigger.event();
    let (Ok(group_a), Ok(group_b)) = (groups.get(event.a), groups.get(event.b)) else {
        return;
    };
    let apple = match (group_a.name(), group_b.name()) {
        ("runner", "apple") => event.b,
        ("apple", "runner") => event.a,
        _ => return,
    };
    commands.entity(apple).try_despawn();
    let lives = signals.get_integer("lives").unwrap_or(0) - 1;
    signals.set_integer("lives", lives);
    info!("runner hit, {lives} lives left");
    if lives <= 0 && !signals.has_flag("round_over") {
        signals.set_flag("round_over");
        signals.set_string("outcome", "defeat");
        next_screen.set(Screens::GameOver);
    }
}
