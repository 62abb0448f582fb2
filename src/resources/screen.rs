//! Screen-state resources.
//!
//! Every game in the collection runs the same high-level screen flow the
//! original browser games had: a setup phase, a title screen, gameplay, and a
//! game-over screen. These resources track the authoritative current screen
//! and any pending transition requested by systems. See
//! `crate::events::screen::observe_screen_change_event` for how a transition
//! is applied and hooks are invoked.

use bevy_ecs::prelude::Resource;

/// Discrete high-level screens a game can be on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Screens {
    #[default]
    None,
    Setup,
    Title,
    Playing,
    GameOver,
    Quitting,
}

/// Representation of a requested next screen.
///
/// Use [`NextScreen::set`] to mark a transition as pending; an observer will
/// later apply it and reset the value to [`NextScreens::Unchanged`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum NextScreens {
    #[default]
    Unchanged,
    Pending(Screens),
}

/// Authoritative current screen.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ScreenState {
    current: Screens,
}

impl ScreenState {
    /// Create a new state initialized to [`Screens::None`].
    pub fn new() -> Self {
        Self::default()
    }
    /// Read-only access to the current screen.
    pub fn get(&self) -> &Screens {
        &self.current
    }
    /// Update the current screen immediately.
    ///
    /// Prefer requesting transitions via [`NextScreen`] and the event
    /// observer when enter/exit hooks must be triggered.
    pub fn set(&mut self, screen: Screens) {
        self.current = screen;
    }
}

/// Intent to change to a new screen.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct NextScreen {
    next: NextScreens,
}

impl NextScreen {
    /// Create a new value initialized to [`NextScreens::Unchanged`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current transition request.
    pub fn get(&self) -> &NextScreens {
        &self.next
    }

    /// Request a transition to `next` by marking it as pending.
    ///
    /// The `check_pending_screen` system will emit the change event.
    pub fn set(&mut self, next: Screens) {
        self.next = NextScreens::Pending(next);
    }

    /// Reset to [`NextScreens::Unchanged`].
    pub fn reset(&mut self) {
        self.next = NextScreens::Unchanged;
    }
}
