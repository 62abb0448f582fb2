//! Engine tick integration tests for movement, TTL, timers, collision, and
//! the screen-state machine.

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use glam::Vec2;

use tinycade::components::boxcollider::BoxCollider;
use tinycade::components::group::Group;
use tinycade::components::mapposition::MapPosition;
use tinycade::components::persistent::Persistent;
use tinycade::components::rigidbody::RigidBody;
use tinycade::components::timer::Timer;
use tinycade::components::ttl::Ttl;
use tinycade::events::collision::CollisionEvent;
use tinycade::events::screen::{observe_screen_change_event, ScreenChangedEvent};
use tinycade::events::timer::TimerFinishedEvent;
use tinycade::resources::screen::{NextScreen, ScreenState, Screens};
use tinycade::resources::systemsstore::SystemsStore;
use tinycade::resources::tracked::TrackedGroups;
use tinycade::resources::worldsignals::WorldSignals;
use tinycade::resources::worldtime::WorldTime;
use tinycade::systems::collision::collision_detector;
use tinycade::systems::group::update_group_counts_system;
use tinycade::systems::movement::movement;
use tinycade::systems::screen::check_pending_screen;
use tinycade::systems::time::update_world_time;
use tinycade::systems::timer::update_timers;
use tinycade::systems::ttl::ttl_system;

const EPSILON: f32 = 1e-5;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn make_world() -> World {
    let mut world = World::new();
    world.insert_resource(WorldTime::default());
    world.insert_resource(WorldSignals::default());
    world.insert_resource(TrackedGroups::default());
    world
}

fn tick_movement(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(movement);
    schedule.run(world);
}

fn tick_ttl(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(ttl_system);
    schedule.run(world);
}

fn tick_timers(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(update_timers);
    schedule.run(world);
}

fn tick_collision_detector(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(collision_detector);
    schedule.run(world);
}

fn tick_group_counts(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(update_group_counts_system);
    schedule.run(world);
}

fn tick_pending_screen(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(check_pending_screen);
    schedule.run(world);
}

#[test]
fn movement_integrates_velocity_into_position() {
    let mut world = make_world();
    let entity = world
        .spawn((
            MapPosition::new(0.0, 0.0),
            RigidBody::with_velocity(Vec2::new(10.0, 0.0)),
        ))
        .id();

    update_world_time(&mut world, 0.5);
    tick_movement(&mut world);

    let pos = world.get::<MapPosition>(entity).unwrap();
    assert!(approx_eq(pos.pos.x, 5.0));
    assert!(approx_eq(pos.pos.y, 0.0));
}

#[test]
fn movement_applies_forces_and_speed_clamp() {
    let mut world = make_world();
    let mut body = RigidBody::with_physics(0.0, Some(3.0));
    body.add_force("thrust", Vec2::new(10.0, 0.0));
    let entity = world.spawn((MapPosition::new(0.0, 0.0), body)).id();

    update_world_time(&mut world, 1.0);
    tick_movement(&mut world);

    // Acceleration would reach 10 u/s, but max_speed caps it at 3.
    let body = world.get::<RigidBody>(entity).unwrap();
    assert!(approx_eq(body.velocity.x, 3.0));
    let pos = world.get::<MapPosition>(entity).unwrap();
    assert!(approx_eq(pos.pos.x, 3.0));
}

#[test]
fn movement_skips_frozen_bodies() {
    let mut world = make_world();
    let mut body = RigidBody::with_velocity(Vec2::new(10.0, 10.0));
    body.freeze();
    let entity = world.spawn((MapPosition::new(1.0, 2.0), body)).id();

    update_world_time(&mut world, 1.0);
    tick_movement(&mut world);

    let pos = world.get::<MapPosition>(entity).unwrap();
    assert!(approx_eq(pos.pos.x, 1.0));
    assert!(approx_eq(pos.pos.y, 2.0));
}

#[test]
fn time_scale_stretches_delta() {
    let mut world = make_world();
    world.insert_resource(WorldTime::default().with_time_scale(0.5));
    update_world_time(&mut world, 1.0);
    let time = world.resource::<WorldTime>();
    assert!(approx_eq(time.delta, 0.5));
    assert!(approx_eq(time.elapsed, 0.5));
    assert_eq!(time.frame_count, 1);
}

#[test]
fn ttl_despawns_after_expiry() {
    let mut world = make_world();
    let entity = world.spawn(Ttl::new(1.0)).id();

    update_world_time(&mut world, 0.6);
    tick_ttl(&mut world);
    assert!(world.get_entity(entity).is_ok());

    update_world_time(&mut world, 0.6);
    tick_ttl(&mut world);
    assert!(world.get_entity(entity).is_err());
}

#[derive(Resource, Default)]
struct Fired(Vec<String>);

fn record_timer(trigger: On<TimerFinishedEvent>, mut fired: ResMut<Fired>) {
    fired.0.push(trigger.event().signal.clone());
}

#[test]
fn timer_fires_and_keeps_overshoot() {
    let mut world = make_world();
    world.insert_resource(Fired::default());
    world.add_observer(record_timer);
    let entity = world.spawn(Timer::new(1.0, "pulse")).id();

    update_world_time(&mut world, 0.7);
    tick_timers(&mut world);
    assert!(world.resource::<Fired>().0.is_empty());

    update_world_time(&mut world, 0.7);
    tick_timers(&mut world);
    assert_eq!(world.resource::<Fired>().0, vec!["pulse".to_string()]);

    // Overshoot carried: 0.4s already accumulated toward the next cycle.
    let timer = world.get::<Timer>(entity).unwrap();
    assert!(approx_eq(timer.elapsed, 0.4));
}

#[derive(Resource, Default)]
struct Contacts(u32);

fn record_collision(_trigger: On<CollisionEvent>, mut contacts: ResMut<Contacts>) {
    contacts.0 += 1;
}

#[test]
fn collision_detector_triggers_on_overlap() {
    let mut world = make_world();
    world.insert_resource(Contacts::default());
    world.add_observer(record_collision);

    world.spawn((MapPosition::new(0.0, 0.0), BoxCollider::new(10.0, 10.0)));
    world.spawn((MapPosition::new(4.0, 0.0), BoxCollider::new(10.0, 10.0)));
    world.spawn((MapPosition::new(100.0, 0.0), BoxCollider::new(10.0, 10.0)));

    tick_collision_detector(&mut world);
    assert_eq!(world.resource::<Contacts>().0, 1);
}

#[test]
fn group_counts_reach_zero_after_despawn() {
    let mut world = make_world();
    world
        .resource_mut::<TrackedGroups>()
        .add_group("enemy");
    let a = world.spawn(Group::new("enemy")).id();
    world.spawn(Group::new("enemy"));

    tick_group_counts(&mut world);
    assert_eq!(
        world.resource::<WorldSignals>().get_group_count("enemy"),
        Some(2)
    );

    world.despawn(a);
    tick_group_counts(&mut world);
    assert_eq!(
        world.resource::<WorldSignals>().get_group_count("enemy"),
        Some(1)
    );
}

fn mark_entered(mut signals: ResMut<WorldSignals>) {
    signals.set_flag("entered_play");
}

#[test]
fn screen_transition_runs_enter_hook() {
    let mut world = make_world();
    world.insert_resource(ScreenState::new());
    world.insert_resource(NextScreen::new());

    let mut store = SystemsStore::new();
    let id = world.register_system(mark_entered);
    world.entity_mut(id.entity()).insert(Persistent);
    store.insert("enter_play", id);
    world.insert_resource(store);

    world.spawn((Observer::new(observe_screen_change_event), Persistent));
    world.flush();

    world.resource_mut::<NextScreen>().set(Screens::Playing);
    tick_pending_screen(&mut world);

    assert!(matches!(
        world.resource::<ScreenState>().get(),
        Screens::Playing
    ));
    assert!(world.resource::<WorldSignals>().has_flag("entered_play"));
    // Pending request consumed.
    assert!(matches!(
        world.resource::<NextScreen>().get(),
        tinycade::resources::screen::NextScreens::Unchanged
    ));
}

#[test]
fn manual_screen_trigger_applies_immediately() {
    let mut world = make_world();
    world.insert_resource(ScreenState::new());
    world.insert_resource(NextScreen::new());
    world.insert_resource(SystemsStore::new());
    world.spawn((Observer::new(observe_screen_change_event), Persistent));
    world.flush();

    world.resource_mut::<NextScreen>().set(Screens::Title);
    world.trigger(ScreenChangedEvent {});
    world.flush();

    assert!(matches!(
        world.resource::<ScreenState>().get(),
        Screens::Title
    ));
}
