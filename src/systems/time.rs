//! Time update system.
//!
//! Advances the shared [`WorldTime`](crate::resources::worldtime::WorldTime)
//! resource once per host tick.
use bevy_ecs::prelude::*;

use crate::resources::worldtime::WorldTime;

/// Count one host tick and move the time of day by `day_time_step`.
///
/// The time of day is left alone while no world is loaded.
pub fn update_world_time(world: &mut World, day_time_step: i64) {
    let mut wt = world.resource_mut::<WorldTime>();
    wt.ticks = wt.ticks.saturating_add(1);
    if let Some(day_time) = wt.day_time.as_mut() {
        *day_time = day_time.saturating_add(day_time_step);
    }
}
