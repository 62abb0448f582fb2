//! End-to-end checks for the smaller games, run through their real
//! schedules and the shared engine systems.

use bevy_ecs::prelude::*;
use glam::Vec2;

use tinycade::components::boxcollider::BoxCollider;
use tinycade::components::gridposition::GridPosition;
use tinycade::components::mapposition::MapPosition;
use tinycade::games::dodge::{self, Apple, DodgeConfig, DropClock};
use tinycade::games::rpg::{self, Hero, RpgConfig};
use tinycade::games::shooter::{self, Enemy, ShooterConfig};
use tinycade::games::snake::{self, SnakeConfig, SnakeFood, SnakeState};
use tinycade::games::walker::{self, WalkerConfig, WalkerPose};
use tinycade::games::wordchain::{self, Dictionary, WordChainConfig, WordChainState};
use tinycade::resources::input::{Button, InputState};
use tinycade::resources::rng::GameRng;
use tinycade::resources::screen::NextScreen;
use tinycade::resources::tracked::TrackedGroups;
use tinycade::resources::worldsignals::WorldSignals;
use tinycade::resources::worldtime::WorldTime;
use tinycade::systems::collision::collision_detector;
use tinycade::systems::movement::movement;
use tinycade::systems::time::update_world_time;
use tinycade::systems::timer::update_timers;

fn make_world() -> World {
    let mut world = World::new();
    world.insert_resource(WorldTime::default());
    world.insert_resource(WorldSignals::default());
    world.insert_resource(TrackedGroups::default());
    world.insert_resource(InputState::default());
    world.insert_resource(GameRng::seeded(11));
    world.insert_resource(NextScreen::new());
    world
}

fn frame(world: &mut World, schedule: &mut Schedule, dt: f32) {
    update_world_time(world, dt);
    schedule.run(world);
    world.resource_mut::<InputState>().begin_frame();
}

#[test]
fn snake_turns_and_eats() {
    let mut world = make_world();
    let config = SnakeConfig::default();
    world.insert_resource(config.clone());
    snake::spawn(&mut world, &config);
    let mut schedule = snake::schedule();

    // Put the food straight above the head and turn up.
    let head = world.resource::<SnakeState>().head();
    world.resource_mut::<SnakeFood>().0 = GridPosition::new(head.x, head.y - 1);
    world.resource_mut::<InputState>().press(Button::Up);

    frame(&mut world, &mut schedule, config.step_interval);

    let state = world.resource::<SnakeState>();
    assert_eq!(state.head(), GridPosition::new(head.x, head.y - 1));
    assert_eq!(state.body.len(), config.initial_length + 1);
    assert_eq!(
        world.resource::<WorldSignals>().get_integer("score"),
        Some(10)
    );
}

#[test]
fn snake_dies_on_the_wall() {
    let mut world = make_world();
    let config = SnakeConfig {
        grid_width: 8,
        grid_height: 8,
        ..SnakeConfig::default()
    };
    world.insert_resource(config.clone());
    snake::spawn(&mut world, &config);
    let mut schedule = snake::schedule();

    for _ in 0..10 {
        frame(&mut world, &mut schedule, config.step_interval);
    }
    assert!(world.resource::<WorldSignals>().has_flag("round_over"));
    assert!(!world.resource::<SnakeState>().alive);
}

#[test]
fn wordchain_scores_and_chains() {
    let mut world = make_world();
    let config = WordChainConfig::default();
    world.insert_resource(config.clone());
    wordchain::spawn(
        &mut world,
        &config,
        Dictionary::from_words(["apple", "echo"]),
    );
    let mut schedule = wordchain::schedule();

    {
        let mut input = world.resource_mut::<InputState>();
        for c in "apple".chars() {
            input.type_char(c);
        }
        input.press(Button::Submit);
    }
    frame(&mut world, &mut schedule, 0.016);

    let state = world.resource::<WordChainState>();
    assert_eq!(state.chain_length, 1);
    assert_eq!(state.tail, Some('e'));
    assert_eq!(
        world.resource::<WorldSignals>().get_integer("score"),
        Some(5)
    );

    // Repeating a used word is a strike, not a score. The submit button
    // must come back up first so the second press has an edge.
    {
        let mut input = world.resource_mut::<InputState>();
        input.release(Button::Submit);
        for c in "apple".chars() {
            input.type_char(c);
        }
        input.press(Button::Submit);
    }
    frame(&mut world, &mut schedule, 0.016);
    let state = world.resource::<WordChainState>();
    assert_eq!(state.chain_length, 1);
    assert_eq!(state.strikes, 1);
}

#[test]
fn wordchain_times_out() {
    let mut world = make_world();
    let config = WordChainConfig {
        turn_time: 0.1,
        ..WordChainConfig::default()
    };
    world.insert_resource(config.clone());
    wordchain::spawn(&mut world, &config, Dictionary::from_words(["apple"]));
    let mut schedule = wordchain::schedule();

    frame(&mut world, &mut schedule, 0.2);
    assert!(world.resource::<WorldSignals>().has_flag("round_over"));
}

#[test]
fn shooter_spawn_clock_emits_enemies() {
    let mut world = make_world();
    let config = ShooterConfig {
        enemy_interval: 0.5,
        ..ShooterConfig::default()
    };
    world.insert_resource(config.clone());
    shooter::spawn(&mut world, &config);

    let mut timers = Schedule::default();
    timers.add_systems(update_timers);
    for _ in 0..4 {
        update_world_time(&mut world, 0.2);
        timers.run(&mut world);
    }
    let enemies = world.query_filtered::<(), With<Enemy>>().iter(&world).count();
    assert!(enemies >= 1, "spawn clock never fired");
}

#[test]
fn shooter_bullet_downs_enemy() {
    let mut world = make_world();
    let config = ShooterConfig::default();
    world.insert_resource(config.clone());
    shooter::spawn(&mut world, &config);

    use tinycade::components::group::Group;
    use tinycade::components::rigidbody::RigidBody;
    use tinycade::components::ttl::Ttl;
    let bullet = world
        .spawn((
            MapPosition::new(200.0, 100.0),
            RigidBody::new(),
            BoxCollider::new(10.0, 4.0),
            Ttl::new(2.0),
            Group::new("bullet"),
        ))
        .id();
    let enemy = world
        .spawn((
            MapPosition::new(204.0, 100.0),
            RigidBody::new(),
            BoxCollider::new(24.0, 24.0),
            Group::new("enemy"),
        ))
        .id();

    let mut schedule = Schedule::default();
    schedule.add_systems(collision_detector);
    schedule.run(&mut world);

    assert!(world.get_entity(bullet).is_err());
    assert!(world.get_entity(enemy).is_err());
    assert_eq!(
        world.resource::<WorldSignals>().get_integer("score"),
        Some(50)
    );
}

#[test]
fn dodge_apples_fall_and_hits_cost_lives() {
    let mut world = make_world();
    let config = DodgeConfig::default();
    world.insert_resource(config.clone());
    dodge::spawn(&mut world, &config);

    // Force an immediate drop, then let gravity act.
    world.resource_mut::<DropClock>().countdown = 0.0;
    let mut game = dodge::schedule();
    let mut physics = Schedule::default();
    physics.add_systems(movement);
    frame(&mut world, &mut game, 0.016);
    for _ in 0..30 {
        update_world_time(&mut world, 0.016);
        physics.run(&mut world);
    }
    let apple_y = world
        .query_filtered::<&MapPosition, With<Apple>>()
        .iter(&world)
        .next()
        .expect("an apple must have dropped")
        .pos
        .y;
    assert!(apple_y > -20.0, "gravity must pull the apple down");

    // Park an apple on the runner and let the collision observer react.
    use tinycade::components::group::Group;
    use tinycade::components::rigidbody::RigidBody;
    let runner_pos = world
        .query_filtered::<&MapPosition, With<dodge::Runner>>()
        .iter(&world)
        .next()
        .unwrap()
        .pos;
    world.spawn((
        Apple,
        MapPosition::new(runner_pos.x, runner_pos.y),
        RigidBody::new(),
        BoxCollider::new(20.0, 20.0),
        Group::new("apple"),
    ));
    let mut collisions = Schedule::default();
    collisions.add_systems(collision_detector);
    collisions.run(&mut world);

    assert_eq!(
        world.resource::<WorldSignals>().get_integer("lives"),
        Some(config.lives - 1)
    );
}

#[test]
fn dodge_runner_stays_inside_the_playfield() {
    let mut world = make_world();
    let config = DodgeConfig::default();
    world.insert_resource(config.clone());
    dodge::spawn(&mut world, &config);
    let mut game = dodge::schedule();
    let mut physics = Schedule::default();
    physics.add_systems(movement);

    // Hold right long enough to overrun the edge; integration runs before
    // the game systems each frame, as in the driver loop.
    world.resource_mut::<InputState>().press(Button::Right);
    for _ in 0..120 {
        update_world_time(&mut world, 0.032);
        physics.run(&mut world);
        game.run(&mut world);
    }
    let x = world
        .query_filtered::<&MapPosition, With<dodge::Runner>>()
        .iter(&world)
        .next()
        .unwrap()
        .pos
        .x;
    assert_eq!(x, config.width - 15.0);
}

#[test]
fn walker_moves_forward_and_finishes() {
    let mut world = make_world();
    let config = WalkerConfig::default();
    world.insert_resource(config.clone());
    walker::spawn(&mut world, &config);
    let mut schedule = walker::schedule();

    let start = world.resource::<WalkerPose>().position;
    world.resource_mut::<InputState>().press(Button::Up);
    frame(&mut world, &mut schedule, 0.1);
    world.resource_mut::<InputState>().press(Button::Up);
    frame(&mut world, &mut schedule, 0.1);
    let pose = world.resource::<WalkerPose>();
    assert!(pose.position.x > start.x, "yaw 0 walks toward +x");
    assert_eq!(pose.position.y, start.y);

    // Drop the camera on the exit tile; the next frame ends the round.
    let exit = world.resource::<tinycade::games::walker::WalkerMap>().exit;
    world.resource_mut::<WalkerPose>().position =
        Vec2::new(exit.x as f32 + 0.5, exit.y as f32 + 0.5);
    frame(&mut world, &mut schedule, 0.1);
    let signals = world.resource::<WorldSignals>();
    assert!(signals.has_flag("round_over"));
    assert_eq!(signals.get_string("outcome").unwrap(), "victory");
}

#[test]
fn rpg_walks_through_a_portal_to_the_goal() {
    let mut world = make_world();
    let config = RpgConfig::default();
    world.insert_resource(config.clone());
    rpg::spawn(&mut world, &config);
    let mut schedule = rpg::schedule();

    // One step right on the village map.
    world.resource_mut::<InputState>().press(Button::Right);
    frame(&mut world, &mut schedule, 0.016);
    assert_eq!(world.resource::<Hero>().cell, GridPosition::new(2, 1));

    // Teleport onto the portal tile; the transition system swaps maps.
    {
        let mut hero = world.resource_mut::<Hero>();
        hero.cell = GridPosition::new(6, 3);
    }
    frame(&mut world, &mut schedule, 0.016);
    let hero = world.resource::<Hero>();
    assert_eq!(hero.map, "cave");
    assert_eq!(hero.cell, GridPosition::new(1, 1));
    assert_eq!(
        world.resource::<WorldSignals>().get_string("map").unwrap(),
        "cave"
    );

    // Stand on the goal: round won.
    {
        let mut hero = world.resource_mut::<Hero>();
        hero.cell = GridPosition::new(4, 3);
    }
    frame(&mut world, &mut schedule, 0.016);
    let signals = world.resource::<WorldSignals>();
    assert!(signals.has_flag("round_over"));
    assert_eq!(signals.get_string("outcome").unwrap(), "victory");
}
