//! Screen transition event and observer.
//!
//! Systems can request a change to the high-level [`Screens`] by updating
//! [`NextScreen`]. Emitting a [`ScreenChangedEvent`] then triggers the
//! observer in this module, which applies the transition to [`ScreenState`]
//! and invokes the appropriate enter/exit systems stored in
//! [`crate::resources::systemsstore::SystemsStore`].
//!
//! This decouples the intent to change screens from the mechanics of running
//! setup/teardown systems and avoids borrowing conflicts.

use crate::resources::screen::NextScreens::{Pending, Unchanged};
use crate::resources::screen::{NextScreen, ScreenState, Screens};
use crate::resources::systemsstore::SystemsStore;
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{debug, info, warn};

/// Event used to indicate that a pending screen transition should be applied.
///
/// Emitting this event causes [`observe_screen_change_event`] to read
/// [`NextScreen`]. If it contains [`Pending`], the observer updates the
/// authoritative [`ScreenState`], runs exit/enter hooks, and clears the
/// pending value; if it is [`Unchanged`], nothing happens.
#[derive(Event, Debug, Clone, Copy)]
pub struct ScreenChangedEvent {}

/// Observer that applies a pending screen transition.
///
/// Contract
/// - Reads the intention from [`NextScreen`].
/// - If pending, copies the new value into [`ScreenState`], then:
///   - calls screen-specific exit hooks for the previous screen
///   - calls screen-specific enter hooks for the new screen
///   - resets [`NextScreen`] to [`Unchanged`]
/// - If any required resource is missing, logs a diagnostic and returns.
///
/// The enter hooks are executed by looking up system IDs in
/// [`SystemsStore`] under well-known keys (e.g. `"setup"`, `"enter_play"`,
/// `"enter_game_over"`).
pub fn observe_screen_change_event(
    _trigger: On<ScreenChangedEvent>,
    mut commands: Commands,
    mut next_screen: Option<ResMut<NextScreen>>,
    mut screen_state: Option<ResMut<ScreenState>>,
    systems_store: Res<SystemsStore>,
) {
    debug!("ScreenChangedEvent triggered");

    if let (Some(next_screen), Some(screen_state)) =
        (next_screen.as_deref_mut(), screen_state.as_deref_mut())
    {
        let next_value = next_screen.get().clone();
        match next_value {
            Pending(new_screen) => {
                let old_screen = screen_state.get().clone();
                info!("Transitioning from {:?} to {:?}", old_screen, new_screen);
                screen_state.set(new_screen.clone());
                next_screen.reset();
                on_screen_exit(&old_screen, &mut commands, &systems_store);
                on_screen_enter(&new_screen, &mut commands, &systems_store);
            }
            Unchanged => {
                debug!("No screen change pending.");
            }
        }
    } else {
        warn!(
            "One or more resources missing in observe_screen_change_event. next_screen: {:?}, screen_state: {:?}",
            next_screen.is_some(),
            screen_state.is_some()
        );
    }
}

/// Internal: run screen-specific "enter" systems for the given screen.
fn on_screen_enter(screen: &Screens, commands: &mut Commands, systems_store: &SystemsStore) {
    let key = match screen {
        Screens::None => {
            debug!("Entered None screen");
            return;
        }
        Screens::Setup => "setup",
        Screens::Title => "enter_title",
        Screens::Playing => "enter_play",
        Screens::GameOver => "enter_game_over",
        Screens::Quitting => "quit_game",
    };
    if let Some(system_id) = systems_store.get(key) {
        commands.run_system(*system_id);
    } else {
        warn!("No {key:?} system registered in SystemsStore");
    }
}

/// Internal: run screen-specific "exit" systems for the given screen.
fn on_screen_exit(screen: &Screens, commands: &mut Commands, systems_store: &SystemsStore) {
    // Only leaving Playing has a teardown hook for now.
    if matches!(screen, Screens::Playing) {
        if let Some(system_id) = systems_store.get("exit_play") {
            commands.run_system(*system_id);
        }
    }
    debug!("Exited {screen:?} screen");
}
