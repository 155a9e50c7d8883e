//! Per-tick animation driver.
//!
//! An [`AnimationDriver`] owns the timing state of one animated region. Each
//! tick it advances its [`FrameState`], either by one tick or by however far
//! the smoothed day clock moved, and then writes the visible pixels: a plain
//! copy of the current frame when interpolation is off or there is nothing
//! to blend, or blended colors over the changed region otherwise.
//!
//! # Related
//!
//! - [`crate::components::compositor::PartCompositor`] – runs several drivers over one texture
//! - [`crate::systems::animation::animate_textures`] – the ECS system ticking every texture

use log::trace;

use crate::components::color::{AlphaMode, interpolate};
use crate::components::framestate::{FrameState, FrameTiming};
use crate::components::texturebuffer::OutputSink;
use crate::components::timesync::{TimeSmoother, floor_mod};
use crate::error::{AnimError, Result};
use crate::resources::animconfig::AnimationConfig;
use crate::resources::frames::{Frame, FrameSource};
use crate::resources::worldtime::DayClock;
use crate::systems::changedregion::{InterpolateRegion, Point, find_changed_region};

#[derive(Debug, Clone)]
pub struct AnimationDriver {
    state: FrameState,
    timing: FrameTiming,
    interpolate: bool,
    alpha_mode: AlphaMode,
    /// Computed on the first tick, then reused.
    region: Option<InterpolateRegion>,
    /// Present when the animation follows the day clock.
    sync: Option<TimeSmoother>,
    origin: Point,
}

impl AnimationDriver {
    /// Build a driver for a source of `source_frames` frames drawn at `origin`.
    ///
    /// The configured `skip_ticks` are applied immediately.
    pub fn new(config: &AnimationConfig, source_frames: usize, origin: Point) -> Result<Self> {
        let timing = config.validate(source_frames)?;
        let mut state = FrameState::from_timing(&timing)?;
        state.advance(config.skip_ticks)?;

        let sync = if config.daytime_sync {
            Some(TimeSmoother::new(
                config.cycle_length,
                config.unnatural_smoothing_rate,
            )?)
        } else {
            None
        };

        Ok(Self {
            state,
            timing,
            interpolate: config.interpolate,
            alpha_mode: AlphaMode::from_smooth_flag(config.smooth_alpha),
            region: None,
            sync,
            origin,
        })
    }

    pub fn state(&self) -> &FrameState {
        &self.state
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn region(&self) -> Option<&InterpolateRegion> {
        self.region.as_ref()
    }

    /// Source frame indices currently blended from and to.
    pub fn current_frames(&self) -> (usize, usize) {
        (
            self.timing.source_index(self.state.start_frame_index()),
            self.timing.source_index(self.state.end_frame_index()),
        )
    }

    /// Advance one host tick and draw the result into `sink`.
    pub fn tick(
        &mut self,
        frames: &dyn FrameSource,
        clock: &dyn DayClock,
        sink: &mut dyn OutputSink,
    ) -> Result<()> {
        self.advance(clock)?;

        // The first tick draws the whole start frame, so pixels outside the
        // blended region are never left unset.
        let first_tick = self.region.is_none();
        if first_tick {
            self.region = Some(self.compute_region(frames)?);
        }

        let (start_index, end_index) = self.current_frames();
        let start = fetch(frames, start_index)?;
        let blend =
            self.interpolate && self.state.start_frame_index() != self.state.end_frame_index();
        if first_tick || !blend {
            sink.replace_with(self.origin, start);
        }
        if !blend {
            return Ok(());
        }

        let end = fetch(frames, end_index)?;
        let steps = self.state.frame_duration_ticks();
        let step = self.state.frame_progress_ticks();
        let mode = self.alpha_mode;
        let points = self.region.as_ref().map(|r| r.points()).unwrap_or_default();
        trace!(
            "blending frame {start_index} -> {end_index} at {step}/{steps} over {} pixels",
            points.len()
        );

        sink.transform(self.origin, points, &mut |point, _| {
            interpolate(
                mode,
                steps,
                step,
                start.color(point.x, point.y),
                end.color(point.x, point.y),
            )
        })
    }

    fn advance(&mut self, clock: &dyn DayClock) -> Result<()> {
        // Without a clock reading, count the tick like an unsynced animation.
        let delta = match (self.sync.as_mut(), clock.day_time()) {
            (Some(smoother), Some(now)) => {
                let signal = smoother.smooth(now.day_time, now.game_time, now.natural_cycle);
                floor_mod(signal - self.state.total_ticks(), smoother.cycle_length())
            }
            _ => 1,
        };
        self.state.advance(delta)
    }

    fn compute_region(&self, frames: &dyn FrameSource) -> Result<InterpolateRegion> {
        if !self.interpolate {
            return Ok(InterpolateRegion::empty());
        }
        let sequence = self
            .timing
            .source_indices()
            .map(|index| fetch(frames, index))
            .collect::<Result<Vec<_>>>()?;
        find_changed_region(&sequence)
    }
}

fn fetch(frames: &dyn FrameSource, index: usize) -> Result<&dyn Frame> {
    frames.frame(index).ok_or_else(|| {
        AnimError::UnsupportedState(format!(
            "frame {} requested but the source has {} frame(s)",
            index,
            frames.frame_count()
        ))
    })
}
