//! Game clock shared by every animated texture.
//!
//! [`WorldTime`] carries the monotonic game-time counter and, while a world
//! is loaded, the time of day. Animations that sync to the day cycle read it
//! through the [`DayClock`] trait.

use bevy_ecs::prelude::Resource;

/// One reading of the day clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayTime {
    /// Raw time of day. May be negative or beyond one cycle.
    pub day_time: i64,
    /// Monotonic game-time counter, used to spot repeated queries.
    pub game_time: i64,
    /// Whether the current world follows the natural day cycle.
    pub natural_cycle: bool,
}

/// Source of the current time of day.
///
/// Returns `None` when no time is available, for example before a world is
/// loaded.
pub trait DayClock {
    fn day_time(&self) -> Option<DayTime>;
}

impl DayClock for Option<DayTime> {
    fn day_time(&self) -> Option<DayTime> {
        *self
    }
}

#[derive(Resource, Debug, Clone, Copy)]
pub struct WorldTime {
    /// Host ticks since start.
    pub ticks: i64,
    /// Time of day, when a world is loaded.
    pub day_time: Option<i64>,
    pub natural_cycle: bool,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            ticks: 0,
            day_time: None,
            natural_cycle: true,
        }
    }
}

impl WorldTime {
    pub fn with_day_time(mut self, day_time: i64) -> Self {
        self.day_time = Some(day_time);
        self
    }
}

impl DayClock for WorldTime {
    fn day_time(&self) -> Option<DayTime> {
        self.day_time.map(|day_time| DayTime {
            day_time,
            game_time: self.ticks,
            natural_cycle: self.natural_cycle,
        })
    }
}
