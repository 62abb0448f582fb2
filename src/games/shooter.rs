//! Side-scrolling shooter.
//!
//! The ship flies inside a fixed window while the world scrolls past.
//! Enemies spawn off the right edge on a repeating timer and drift left;
//! bullets are short-lived projectiles. All contact resolution goes
//! through the shared collision detector and a collision observer.

use bevy_ecs::prelude::*;
use bevy_ecs::schedule::Schedule;
use glam::Vec2;
use log::{debug, info};
use serde::Deserialize;

use crate::components::boxcollider::BoxCollider;
use crate::components::group::Group;
use crate::components::health::Health;
use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::RigidBody;
use crate::components::timer::Timer;
use crate::components::ttl::Ttl;
use crate::events::collision::CollisionEvent;
use crate::events::timer::TimerFinishedEvent;
use crate::resources::input::{Button, InputState};
use crate::resources::rng::GameRng;
use crate::resources::screen::{NextScreen, Screens};
use crate::resources::worldsignals::WorldSignals;
use crate::resources::worldtime::WorldTime;

#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ShooterConfig {
    pub width: f32,
    pub height: f32,
    /// World scroll speed, feeds the distance counter.
    pub scroll_speed: f32,
    pub ship_speed: f32,
    pub ship_hp: i32,
    pub fire_cooldown: f32,
    pub bullet_speed: f32,
    pub bullet_ttl: f32,
    pub enemy_interval: f32,
    pub enemy_speed: f32,
}

impl Default for ShooterConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 450.0,
            scroll_speed: 60.0,
            ship_speed: 260.0,
            ship_hp: 3,
            fire_cooldown: 0.25,
            bullet_speed: 500.0,
            bullet_ttl: 2.0,
            enemy_interval: 1.2,
            enemy_speed: 120.0,
        }
    }
}

/// The player ship; tracks its weapon cooldown.
#[derive(Component, Debug, Default)]
pub struct Ship {
    pub cooldown: f32,
}

#[derive(Component, Debug, Default)]
pub struct Enemy;

#[derive(Component, Debug, Default)]
pub struct Bullet;

pub fn spawn(world: &mut World, config: &ShooterConfig) {
    world.spawn((
        Ship::default(),
        MapPosition::new(80.0, config.height * 0.5),
        RigidBody::new(),
        BoxCollider::new(28.0, 18.0),
        Health::new(config.ship_hp),
        Group::new("ship"),
    ));
    // Repeating spawn clock; the timer observer does the actual spawning.
    world.spawn(Timer::new(config.enemy_interval, "spawn_enemy"));

    world.add_observer(observe_spawn_timer);
    world.add_observer(observe_shooter_collision);

    let mut signals = world.resource_mut::<WorldSignals>();
    signals.set_integer("score", 0);
    signals.set_scalar("distance", 0.0);
    signals.set_string("scene", "shooter");
    info!("shooter spawned, window {}x{}", config.width, config.height);
}

pub fn schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems((ship_control_system, scroll_system, bounds_system).chain());
    schedule
}

/// Steers the ship and fires bullets while the action button is held.
pub fn ship_control_system(
    time: Res<WorldTime>,
    input: Res<InputState>,
    config: Res<ShooterConfig>,
    mut ships: Query<(&mut Ship, &mut RigidBody, &MapPosition)>,
    mut commands: Commands,
) {
    for (mut ship, mut body, position) in ships.iter_mut() {
        let mut dir = Vec2::ZERO;
        if input.button(Button::Up).active {
            dir.y -= 1.0;
        }
        if input.button(Button::Down).active {
            dir.y += 1.0;
        }
        if input.button(Button::Left).active {
            dir.x -= 1.0;
        }
        if input.button(Button::Right).active {
            dir.x += 1.0;
        }
        body.velocity = dir.normalize_or_zero() * config.ship_speed;

        ship.cooldown = (ship.cooldown - time.delta).max(0.0);
        if input.button(Button::Action).active && ship.cooldown <= 0.0 {
            ship.cooldown = config.fire_cooldown;
            commands.spawn((
                Bullet,
                MapPosition::new(position.pos.x + 20.0, position.pos.y),
                RigidBody::with_velocity(Vec2::new(config.bullet_speed, 0.0)),
                BoxCollider::new(10.0, 4.0),
                Ttl::new(config.bullet_ttl),
                Group::new("bullet"),
            ));
        }
    }
}

/// Advances the distance counter as the world scrolls by.
pub fn scroll_system(
    time: Res<WorldTime>,
    config: Res<ShooterConfig>,
    mut signals: ResMut<WorldSignals>,
) {
    let distance = signals.get_scalar("distance").unwrap_or(0.0);
    signals.set_scalar("distance", distance + config.scroll_speed * time.delta);
}

/// Clamps the ship to the window and culls enemies past the left edge.
pub fn bounds_system(
    config: Res<ShooterConfig>,
    mut ships: Query<&mut MapPosition, With<Ship>>,
    enemies: Query<(Entity, &MapPosition), (With<Enemy>, Without<Ship>)>,
    mut commands: Commands,
) {
    for mut position in ships.iter_mut() {
        position.pos.x = position.pos.x.clamp(20.0, config.width - 20.0);
        position.pos.y = position.pos.y.clamp(20.0, config.height - 20.0);
    }
    for (entity, position) in enemies.iter() {
        if position.pos.x < -40.0 {
            commands.entity(entity).try_despawn();
        }
    }
}

/// Spawns an enemy off the right edge whenever the spawn clock fires.
pub fn observe_spawn_timer(
    trigger: On<TimerFinishedEvent>,
    config: Res<ShooterConfig>,
    mut rng: ResMut<GameRng>,
    mut commands: Commands,
) {
    if trigger.event().signal != "spawn_enemy" {
        return;
    }
    let y = 30.0 + rng.0.f32() * (config.height - 60.0);
    commands.spawn((
        Enemy,
        MapPosition::new(config.width + 30.0, y),
        RigidBody::with_velocity(Vec2::new(-config.enemy_speed, 0.0)),
        BoxCollider::new(24.0, 24.0),
        Group::new("enemy"),
    ));
    debug!("enemy spawned at y={y:.1}");
}

/// Resolves bullet and ship contacts reported by the collision detector.
pub fn observe_shooter_collision(
    trigger: On<CollisionEvent>,
    groups: Query<&Group>,
    mut healths: Query<&mut Health>,
    mut signals: ResMut<WorldSignals>,
    mut next_screen: ResMut<NextScreen>,
    mut commands: Commands,
) {
    let event = trigger.event();
    let (Ok(group_a), Ok(group_b)) = (groups.get(event.a), groups.get(event.b)) else {
        return;
    };
    let pair = |x: &str, y: &str| {
        if group_a.name() == x && group_b.name() == y {
            Some((event.a, event.b))
        } else if group_a.name() == y && group_b.name() == x {
            Some((event.b, event.a))
        } else {
            None
        }
    };

    if let Some((bullet, enemy)) = pair("bullet", "enemy") {
        commands.entity(bullet).try_despawn();
        commands.entity(enemy).try_despawn();
        signals.add_integer("score", 50);
        return;
    }
    if let Some((ship, enemy)) = pair("ship", "enemy") {
        commands.entity(enemy).try_despawn();
        if let Ok(mut health) = healths.get_mut(ship) {
            health.damage(1);
            info!("ship hit, {} hp left", health.current);
            if health.is_dead() {
                commands.entity(ship).try_despawn();
                signals.set_flag("round_over");
                signals.set_string("outcome", "defeat");
                next_screen.set(Screens::GameOver);
            }
        }
    }
}
