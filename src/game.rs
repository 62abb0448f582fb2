//! High-level screen flow shared by every game.
//!
//! All games run the same loop the originals had: setup, a title screen,
//! gameplay, and game over. The hook systems here are registered in the
//! `SystemsStore` under well-known keys and invoked by the screen-change
//! observer; `enter_play` is the one that reads the selected game and
//! builds its world.

use bevy_ecs::prelude::*;
use log::info;

use crate::games::wordchain::Dictionary;
use crate::games::{self, load_game_config, GameKind, SelectedGame};
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::{Button, InputState};
use crate::resources::screen::{NextScreen, Screens};
use crate::resources::tracked::TrackedGroups;
use crate::resources::worldsignals::WorldSignals;
use crate::resources::worldtime::WorldTime;

/// Enter hook for [`Screens::Setup`]: straight on to the title screen.
pub fn setup(mut next_screen: ResMut<NextScreen>) {
    info!("setup complete");
    next_screen.set(Screens::Title);
}

/// Enter hook for [`Screens::Title`].
pub fn enter_title(time: Res<WorldTime>, mut signals: ResMut<WorldSignals>) {
    signals.set_string("scene", "title");
    signals.set_scalar("title_since", time.elapsed);
}

/// Title screen: start on action/submit, or automatically after a second
/// so unattended runs proceed.
pub fn title_update(
    time: Res<WorldTime>,
    input: Res<InputState>,
    signals: Res<WorldSignals>,
    mut next_screen: ResMut<NextScreen>,
) {
    let since = signals.get_scalar("title_since").unwrap_or(0.0);
    let start = input.button(Button::Action).just_pressed
        || input.button(Button::Submit).just_pressed
        || time.elapsed - since >= 1.0;
    if start {
        next_screen.set(Screens::Playing);
    }
}

/// Enter hook for [`Screens::Playing`]: load the selected game's tuning
/// file and populate the world. Exclusive, so it can insert resources and
/// spawn freely.
pub fn enter_play(world: &mut World) {
    let kind = world.resource::<SelectedGame>().0;
    let data_dir = world.resource::<GameConfig>().data_dir.clone();
    // A fresh round starts with no stale group counts.
    world.resource_mut::<TrackedGroups>().clear();
    info!("starting game: {}", kind.name());

    match kind {
        GameKind::Bomber => {
            let config: games::bomber::BomberConfig = load_game_config(&data_dir, "bomber");
            world.insert_resource(config.clone());
            games::bomber::spawn(world, &config);
        }
        GameKind::Snake => {
            let config: games::snake::SnakeConfig = load_game_config(&data_dir, "snake");
            world.insert_resource(config.clone());
            games::snake::spawn(world, &config);
        }
        GameKind::Wordchain => {
            let config: games::wordchain::WordChainConfig =
                load_game_config(&data_dir, "wordchain");
            let dictionary = Dictionary::load(&data_dir.join(&config.dictionary))
                .unwrap_or_else(|err| {
                    log::warn!("{err}, using built-in word list");
                    Dictionary::from_words(["apple", "echo", "orange", "ember", "rust"])
                });
            info!("dictionary ready with {} words", dictionary.len());
            world.insert_resource(config.clone());
            games::wordchain::spawn(world, &config, dictionary);
        }
        GameKind::Shooter => {
            let config: games::shooter::ShooterConfig = load_game_config(&data_dir, "shooter");
            world.insert_resource(config.clone());
            games::shooter::spawn(world, &config);
        }
        GameKind::Dodge => {
            let config: games::dodge::DodgeConfig = load_game_config(&data_dir, "dodge");
            world.insert_resource(config.clone());
            games::dodge::spawn(world, &config);
        }
        GameKind::Walker => {
            let config: games::walker::WalkerConfig = load_game_config(&data_dir, "walker");
            world.insert_resource(config.clone());
            games::walker::spawn(world, &config);
        }
        GameKind::Rpg => {
            let config: games::rpg::RpgConfig = load_game_config(&data_dir, "rpg");
            world.insert_resource(config.clone());
            games::rpg::spawn(world, &config);
        }
    }
}

/// Enter hook for [`Screens::GameOver`]: report the round, then quit so
/// unattended runs terminate.
pub fn enter_game_over(signals: Res<WorldSignals>, mut next_screen: ResMut<NextScreen>) {
    let outcome = signals
        .get_string("outcome")
        .map(String::as_str)
        .unwrap_or("unknown");
    let score = signals.get_integer("score").unwrap_or(0);
    info!("game over: {outcome}, score {score}");
    next_screen.set(Screens::Quitting);
}

/// Enter hook for [`Screens::Quitting`]: the driver loop watches this flag.
pub fn quit_game(mut signals: ResMut<WorldSignals>) {
    signals.set_flag("quit_game");
}
