//! Word-chain typing game.
//!
//! Each submitted word must be in the dictionary, unused this round, and
//! start with the last letter of the previous word. A per-word timer runs
//! down between submissions and shrinks as the chain grows; three strikes
//! or an empty timer ends the round.

use bevy_ecs::prelude::*;
use bevy_ecs::schedule::Schedule;
use log::{debug, info};
use rustc_hash::FxHashSet;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use crate::resources::input::{Button, InputState};
use crate::resources::screen::{NextScreen, Screens};
use crate::resources::worldsignals::WorldSignals;
use crate::resources::worldtime::WorldTime;

#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WordChainConfig {
    /// Seconds allowed for the first word.
    pub turn_time: f32,
    /// Turn-time multiplier applied after every accepted word.
    pub turn_decay: f32,
    pub min_turn_time: f32,
    pub max_strikes: u32,
    /// Dictionary file name inside the data directory, one word per line.
    pub dictionary: String,
}

impl Default for WordChainConfig {
    fn default() -> Self {
        Self {
            turn_time: 10.0,
            turn_decay: 0.95,
            min_turn_time: 3.0,
            max_strikes: 3,
            dictionary: "words.txt".into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("cannot read dictionary {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("dictionary {path} has no usable words")]
    Empty { path: String },
}

/// The legal word list, lowercased on load.
#[derive(Resource, Debug, Default)]
pub struct Dictionary {
    words: FxHashSet<String>,
}

impl Dictionary {
    pub fn load(path: &Path) -> Result<Self, DictionaryError> {
        let text = std::fs::read_to_string(path).map_err(|source| DictionaryError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let words: FxHashSet<String> = text
            .lines()
            .map(str::trim)
            .filter(|w| w.len() >= 2 && w.chars().all(|c| c.is_ascii_alphabetic()))
            .map(str::to_ascii_lowercase)
            .collect();
        if words.is_empty() {
            return Err(DictionaryError::Empty {
                path: path.display().to_string(),
            });
        }
        Ok(Self { words })
    }

    pub fn from_words(words: impl IntoIterator<Item = &'static str>) -> Self {
        Self {
            words: words
                .into_iter()
                .map(str::to_ascii_lowercase)
                .collect(),
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Why a submission was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    NotInDictionary,
    AlreadyUsed,
    WrongInitial,
}

#[derive(Resource, Debug, Default)]
pub struct WordChainState {
    /// Last letter of the previous accepted word; `None` before the first.
    pub tail: Option<char>,
    pub used: FxHashSet<String>,
    pub buffer: String,
    /// Seconds the current turn allows; shrinks as the chain grows.
    pub turn_time: f32,
    pub time_left: f32,
    pub strikes: u32,
    pub chain_length: u32,
    pub over: bool,
}

impl WordChainState {
    pub fn new(config: &WordChainConfig) -> Self {
        Self {
            turn_time: config.turn_time,
            time_left: config.turn_time,
            ..Self::default()
        }
    }

    /// Judge a candidate word against the chain rules.
    pub fn judge(&self, dictionary: &Dictionary, word: &str) -> Result<(), Rejection> {
        if !dictionary.contains(word) {
            return Err(Rejection::NotInDictionary);
        }
        if self.used.contains(word) {
            return Err(Rejection::AlreadyUsed);
        }
        if let Some(tail) = self.tail {
            if !word.starts_with(tail) {
                return Err(Rejection::WrongInitial);
            }
        }
        Ok(())
    }

    /// Accept a judged word: record it, move the tail letter forward, and
    /// restart the (shrinking) turn clock.
    pub fn accept(&mut self, word: &str, turn_decay: f32, min_turn_time: f32) {
        self.tail = word.chars().last();
        self.used.insert(word.to_string());
        self.chain_length += 1;
        self.turn_time = (self.turn_time * turn_decay).max(min_turn_time);
        self.time_left = self.turn_time;
    }
}

pub fn spawn(world: &mut World, config: &WordChainConfig, dictionary: Dictionary) {
    world.insert_resource(WordChainState::new(config));
    world.insert_resource(dictionary);
    let mut signals = world.resource_mut::<WorldSignals>();
    signals.set_integer("score", 0);
    signals.set_string("scene", "wordchain");
}

pub fn schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems((typing_system, turn_timer_system).chain());
    schedule
}

/// Feeds typed characters into the buffer and judges it on submit.
pub fn typing_system(
    input: Res<InputState>,
    config: Res<WordChainConfig>,
    dictionary: Res<Dictionary>,
    mut state: ResMut<WordChainState>,
    mut signals: ResMut<WorldSignals>,
) {
    if state.over {
        return;
    }
    for &c in &input.typed {
        if c.is_ascii_alphabetic() {
            state.buffer.push(c.to_ascii_lowercase());
        }
    }
    if input.button(Button::Back).just_pressed {
        state.buffer.pop();
    }
    if !input.button(Button::Submit).just_pressed || state.buffer.is_empty() {
        return;
    }

    let word = std::mem::take(&mut state.buffer);
    match state.judge(&dictionary, &word) {
        Ok(()) => {
            signals.add_integer("score", word.len() as i32);
            state.accept(&word, config.turn_decay, config.min_turn_time);
            info!("word accepted: {word} (chain {})", state.chain_length);
        }
        Err(reason) => {
            state.strikes += 1;
            debug!("word rejected: {word} ({reason:?})");
        }
    }
}

/// Runs the per-word clock and ends the round on timeout or strikes.
pub fn turn_timer_system(
    time: Res<WorldTime>,
    config: Res<WordChainConfig>,
    mut state: ResMut<WordChainState>,
    mut signals: ResMut<WorldSignals>,
    mut next_screen: ResMut<NextScreen>,
) {
    if state.over {
        return;
    }
    state.time_left -= time.delta;
    if state.time_left <= 0.0 || state.strikes >= config.max_strikes {
        state.over = true;
        signals.set_flag("round_over");
        signals.set_string("outcome", "defeat");
        signals.set_integer("chain_length", state.chain_length as i32);
        next_screen.set(Screens::GameOver);
        info!("word chain ended at length {}", state.chain_length);
    }
}
