//! Day-cycle synchronization.
//!
//! The day clock is periodic but jumps when the world skips the night or is
//! reloaded, and can move backwards. [`TimeSmoother`] turns it into a stable
//! tick value: small, smooth changes are followed exactly, and large jumps
//! are approached a fraction of the remaining distance per game tick along
//! the shorter way around the cycle.

use crate::error::{AnimError, Result};

/// Fraction of the remaining distance covered per tick on natural cycles.
pub const NATURAL_SMOOTHING_RATE: f64 = 0.1;
/// Default fraction used when the clock reports a non-natural cycle.
pub const DEFAULT_UNNATURAL_SMOOTHING_RATE: f64 = 0.25;
/// Length of one in-game day in ticks.
pub const DEFAULT_CYCLE_LENGTH: i64 = 24_000;

/// Floored modulo: the result always has the sign of `modulus`.
pub fn floor_mod(value: i64, modulus: i64) -> i64 {
    value.rem_euclid(modulus)
}

/// Per-animation smoother for a jumpy, periodic day clock.
///
/// A clock that keeps moving by about the same amount every tick is
/// continuous, and the output moves along with it. A step that breaks that
/// pattern is a jump: the output stays put and closes a fraction of the
/// remaining distance per tick instead.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSmoother {
    cycle_length: i64,
    unnatural_rate: f64,
    snap_ticks: f64,
    last_counter: Option<i64>,
    last_output: f64,
    last_target: Option<f64>,
    last_step: f64,
}

impl TimeSmoother {
    pub fn new(cycle_length: i64, unnatural_rate: f64) -> Result<Self> {
        if cycle_length <= 0 {
            return Err(AnimError::InvalidArgument(format!(
                "cycle length must be positive, got {cycle_length}"
            )));
        }
        if !(unnatural_rate > 0.0 && unnatural_rate <= 1.0) {
            return Err(AnimError::InvalidArgument(format!(
                "smoothing rate must be in (0, 1], got {unnatural_rate}"
            )));
        }

        Ok(Self {
            cycle_length,
            unnatural_rate,
            snap_ticks: (cycle_length as f64 / 100.0).max(1.0),
            last_counter: None,
            last_output: 0.0,
            last_target: None,
            last_step: 0.0,
        })
    }

    pub fn cycle_length(&self) -> i64 {
        self.cycle_length
    }

    /// Smoothed position within the cycle for the raw `day_time`.
    ///
    /// `game_time` only detects repeated queries: calling again with the
    /// counter of the previous call returns the previous result untouched.
    pub fn smooth(&mut self, day_time: i64, game_time: i64, natural_cycle: bool) -> i64 {
        if self.last_counter == Some(game_time) {
            return self.output_ticks();
        }
        self.last_counter = Some(game_time);

        let target = floor_mod(day_time, self.cycle_length) as f64;

        // The first reading has no previous step to compare with.
        let (step, continuous) = match self.last_target {
            Some(previous) => {
                let step = self.shortest_arc(previous, target);
                let steady = step.abs() <= self.snap_ticks
                    || (step - self.last_step).abs() <= self.snap_ticks;
                (step, steady)
            }
            None => (0.0, false),
        };
        self.last_target = Some(target);
        self.last_step = step;

        let carried = if continuous {
            self.last_output + step
        } else {
            self.last_output
        };
        let distance = self.shortest_arc(carried, target);

        self.last_output = if distance.abs() <= self.snap_ticks {
            target
        } else {
            let rate = if natural_cycle {
                NATURAL_SMOOTHING_RATE
            } else {
                self.unnatural_rate
            };
            (carried + distance * rate).rem_euclid(self.cycle_length as f64)
        };

        self.output_ticks()
    }

    /// Signed distance from `from` to `to` the short way around the cycle.
    /// Half a cycle counts as forward.
    fn shortest_arc(&self, from: f64, to: f64) -> f64 {
        let cycle = self.cycle_length as f64;
        let distance = (to - from).rem_euclid(cycle);
        if distance > cycle / 2.0 {
            distance - cycle
        } else {
            distance
        }
    }

    fn output_ticks(&self) -> i64 {
        floor_mod(self.last_output.round() as i64, self.cycle_length)
    }
}
