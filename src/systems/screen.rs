use crate::events::screen::ScreenChangedEvent;
use crate::resources::screen::{NextScreen, NextScreens, ScreenState, Screens};
use bevy_ecs::prelude::*;

/// Emit a [`ScreenChangedEvent`] whenever a transition is pending. The
/// observer in [`crate::events::screen`] applies it.
pub fn check_pending_screen(mut commands: Commands, next_screen: Res<NextScreen>) {
    if let NextScreens::Pending(_new_screen) = next_screen.get() {
        commands.trigger(ScreenChangedEvent {});
    }
}

/// Run condition for title-screen systems.
pub fn screen_is_title(screen: Res<ScreenState>) -> bool {
    matches!(screen.get(), Screens::Title)
}
