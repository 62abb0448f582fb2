//! Event types shared by the engine core.
//!
//! - [`collision`] – AABB overlap events between entity pairs
//! - [`screen`] – screen-state transition event and its observer
//! - [`timer`] – repeating timer completion events

pub mod collision;
pub mod screen;
pub mod timer;
