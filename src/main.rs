//! Tinycade driver.
//!
//! Headless remake of a set of small browser arcade games:
//! - **bevy_ecs** for the entity-component-system architecture
//! - **fastrand** seeded RNG so runs are reproducible
//! - **serde_json** per-game tuning files under the data directory
//!
//! The driver builds the ECS world, registers the screen-flow hooks, and
//! steps the simulation on a fixed tick until the run ends or the frame
//! budget is spent. There is no window; progress is reported through the
//! log and the final signal summary.
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --game bomber --seed 7
//! ```

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use clap::Parser;
use rustc_hash::FxHashMap;
use std::path::PathBuf;

use tinycade::components::persistent::Persistent;
use tinycade::events::screen::{observe_screen_change_event, ScreenChangedEvent};
use tinycade::game;
use tinycade::games::{GameKind, SelectedGame};
use tinycade::resources::assetstore::AssetStore;
use tinycade::resources::gameconfig::GameConfig;
use tinycade::resources::input::InputState;
use tinycade::resources::rng::GameRng;
use tinycade::resources::screen::{NextScreen, ScreenState, Screens};
use tinycade::resources::systemsstore::SystemsStore;
use tinycade::resources::tracked::TrackedGroups;
use tinycade::resources::worldsignals::WorldSignals;
use tinycade::resources::worldtime::WorldTime;
use tinycade::systems::collision::collision_detector;
use tinycade::systems::group::update_group_counts_system;
use tinycade::systems::movement::movement;
use tinycade::systems::screen::{check_pending_screen, screen_is_title};
use tinycade::systems::time::update_world_time;
use tinycade::systems::timer::update_timers;
use tinycade::systems::ttl::ttl_system;

/// Tinycade: small arcade games, simulated headless.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Game to run; the config file's default when omitted.
    #[arg(long, value_enum)]
    game: Option<GameKind>,

    /// Frame budget before the run is cut off.
    #[arg(long, default_value_t = 36_000)]
    ticks: u64,

    /// RNG seed for a reproducible run.
    #[arg(long)]
    seed: Option<u64>,

    /// Engine configuration file.
    #[arg(long, default_value = "./config.ini")]
    config: PathBuf,

    /// Override the data directory from the config file.
    #[arg(long)]
    data: Option<PathBuf>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = GameConfig::with_path(&cli.config);
    config.load_from_file().ok(); // ignore errors, use defaults
    if let Some(data) = cli.data {
        config.data_dir = data;
    }
    let kind = cli
        .game
        .or_else(|| GameKind::parse(&config.default_game))
        .unwrap_or(GameKind::Bomber);
    let dt = config.tick_seconds();

    // --------------- ECS world + resources ---------------
    let mut world = World::new();
    world.insert_resource(WorldTime::default().with_time_scale(1.0));
    world.insert_resource(WorldSignals::default());
    world.insert_resource(TrackedGroups::default());
    world.insert_resource(InputState::default());
    world.insert_resource(match cli.seed {
        Some(seed) => GameRng::seeded(seed),
        None => GameRng::default(),
    });
    world.insert_resource(ScreenState::new());
    world.insert_resource(NextScreen::new());
    world.insert_resource(SelectedGame(kind));

    // Optional asset manifest next to the game data.
    let mut assets = AssetStore::new();
    if let Ok(text) = std::fs::read_to_string(config.data_dir.join("assets.json")) {
        match serde_json::from_str::<FxHashMap<String, String>>(&text) {
            Ok(manifest) => assets.load_manifest(&config.data_dir, &manifest),
            Err(e) => log::warn!("bad assets.json: {e}"),
        }
    }
    world.insert_resource(assets);
    world.insert_resource(config);

    world.spawn((Observer::new(observe_screen_change_event), Persistent));

    // Screen hook systems store.
    // NOTE: In bevy_ecs 0.18, registered systems are stored as entities.
    // They must be Persistent so they survive screen teardown.
    let mut systems_store = SystemsStore::new();
    macro_rules! register {
        ($key:literal, $system:expr) => {
            let id = world.register_system($system);
            world.entity_mut(id.entity()).insert(Persistent);
            systems_store.insert($key, id);
        };
    }
    register!("setup", game::setup);
    register!("enter_title", game::enter_title);
    register!("enter_play", game::enter_play);
    register!("exit_play", tinycade::systems::clean_all_entities);
    register!("enter_game_over", game::enter_game_over);
    register!("quit_game", game::quit_game);
    world.insert_resource(systems_store);
    world.flush();

    // Kick the screen machine into Setup immediately.
    world.resource_mut::<NextScreen>().set(Screens::Setup);
    world.trigger(ScreenChangedEvent {});
    world.flush();

    // --------------- Schedules ---------------
    let mut update = Schedule::default();
    update.add_systems(check_pending_screen);
    update.add_systems(game::title_update.run_if(screen_is_title));
    update.add_systems(update_timers);
    update.add_systems(movement);
    update.add_systems(ttl_system.after(movement));
    update.add_systems(collision_detector.after(movement));
    update.add_systems(update_group_counts_system);

    let mut game_schedule = match kind {
        GameKind::Bomber => tinycade::games::bomber::schedule(),
        GameKind::Snake => tinycade::games::snake::schedule(),
        GameKind::Wordchain => tinycade::games::wordchain::schedule(),
        GameKind::Shooter => tinycade::games::shooter::schedule(),
        GameKind::Dodge => tinycade::games::dodge::schedule(),
        GameKind::Walker => tinycade::games::walker::schedule(),
        GameKind::Rpg => tinycade::games::rpg::schedule(),
    };

    // --------------- Main loop ---------------
    let mut frames: u64 = 0;
    while !world.resource::<WorldSignals>().has_flag("quit_game") && frames < cli.ticks {
        update_world_time(&mut world, dt);
        update.run(&mut world);
        if matches!(world.resource::<ScreenState>().get(), Screens::Playing) {
            game_schedule.run(&mut world);
        }
        {
            let mut input = world.resource_mut::<InputState>();
            input.begin_frame();
        }
        world.clear_trackers();
        frames += 1;
    }

    let signals = world.resource::<WorldSignals>();
    log::info!(
        "run finished after {frames} frames: outcome={}, score={}",
        signals
            .get_string("outcome")
            .map(String::as_str)
            .unwrap_or("none"),
        signals.get_integer("score").unwrap_or(0)
    );
}
