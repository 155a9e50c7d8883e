//! Animation systems.
//!
//! Submodules overview
//! - [`animation`] – tick every animated texture once per host tick
//! - [`changedregion`] – find the pixels that differ across an animation's frames
//! - [`time`] – count host ticks and move the day clock

pub mod animation;
pub mod changedregion;
pub mod time;
