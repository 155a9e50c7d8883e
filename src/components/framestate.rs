//! Frame timing table and the frame state machine.
//!
//! [`FrameState`] maps an ever-growing tick count onto a `(frame, progress)`
//! pair. Frames may last different numbers of ticks, and the machine loops
//! forever. [`FrameTiming`] describes the sequence of source frames and how
//! long each is shown.

use serde::{Deserialize, Serialize};

use crate::error::{AnimError, Result};

/// One position in a predefined frame sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameTimingEntry {
    /// Index of the source frame shown at this position.
    pub index: usize,
    /// Ticks this position lasts. Falls back to the default frame time.
    #[serde(default)]
    pub time: Option<i64>,
}

impl FrameTimingEntry {
    pub fn new(index: usize, time: Option<i64>) -> Self {
        Self { index, time }
    }
}

/// Sequence of frames and their durations.
///
/// An empty entry list means every source frame is shown once, in order, for
/// the default frame time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameTiming {
    entries: Vec<FrameTimingEntry>,
    default_time: i64,
    source_frames: usize,
}

impl FrameTiming {
    pub fn new(entries: Vec<FrameTimingEntry>, default_time: i64, source_frames: usize) -> Self {
        Self {
            entries,
            default_time,
            source_frames,
        }
    }

    /// Identity table over `source_frames` frames.
    pub fn uniform(default_time: i64, source_frames: usize) -> Self {
        Self::new(Vec::new(), default_time, source_frames)
    }

    /// Number of positions in the animation sequence.
    pub fn frame_count(&self) -> usize {
        if self.entries.is_empty() {
            self.source_frames
        } else {
            self.entries.len()
        }
    }

    /// Duration of the frame at sequence position `position`.
    pub fn duration(&self, position: usize) -> i64 {
        self.entries
            .get(position)
            .and_then(|entry| entry.time)
            .unwrap_or(self.default_time)
    }

    /// Source frame index shown at sequence position `position`.
    pub fn source_index(&self, position: usize) -> usize {
        self.entries
            .get(position)
            .map(|entry| entry.index)
            .unwrap_or(position)
    }

    /// Every source index the sequence visits, in sequence order.
    pub fn source_indices(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.frame_count()).map(|position| self.source_index(position))
    }
}

/// Frame state machine.
///
/// Durations are looked up once at construction, so a bad duration is
/// reported before any tick is counted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameState {
    durations: Vec<i64>,
    loop_ticks: i128,
    current_frame: usize,
    ticks_into_frame: i64,
    total_ticks: i64,
}

impl FrameState {
    /// Create a machine over `frame_count` frames sitting at frame 0.
    pub fn new(frame_count: usize, duration: impl Fn(usize) -> i64) -> Result<Self> {
        if frame_count == 0 {
            return Err(AnimError::UnsupportedState(
                "frame count must be positive".to_string(),
            ));
        }

        let mut durations = Vec::with_capacity(frame_count);
        for index in 0..frame_count {
            let ticks = duration(index);
            if ticks <= 0 {
                return Err(AnimError::UnsupportedState(format!(
                    "frame {index} has non-positive duration {ticks}"
                )));
            }
            durations.push(ticks);
        }
        let loop_ticks = durations.iter().map(|&d| d as i128).sum();

        Ok(Self {
            current_frame: 0,
            ticks_into_frame: 0,
            total_ticks: 0,
            loop_ticks,
            durations,
        })
    }

    /// Create a machine following a frame timing table.
    pub fn from_timing(timing: &FrameTiming) -> Result<Self> {
        Self::new(timing.frame_count(), |position| timing.duration(position))
    }

    /// Move the animation forward by `delta` ticks.
    ///
    /// Fails without touching the state when `delta` is negative. Deltas
    /// spanning many loops are reduced modulo the loop length first, so the
    /// cost never depends on the size of `delta`.
    pub fn advance(&mut self, delta: i64) -> Result<()> {
        if delta < 0 {
            return Err(AnimError::InvalidArgument(format!(
                "cannot advance by negative tick count {delta}"
            )));
        }

        self.total_ticks = self.total_ticks.saturating_add(delta);

        let mut remaining = self.ticks_into_frame as i128 + delta as i128;
        if remaining >= self.loop_ticks {
            remaining %= self.loop_ticks;
        }

        let mut max_ticks = self.durations[self.current_frame] as i128;
        while remaining >= max_ticks {
            remaining -= max_ticks;
            self.current_frame = (self.current_frame + 1) % self.durations.len();
            max_ticks = self.durations[self.current_frame] as i128;
        }

        // Below one frame duration, so it fits back into an i64.
        self.ticks_into_frame = remaining as i64;
        Ok(())
    }

    pub fn start_frame_index(&self) -> usize {
        self.current_frame
    }

    /// Frame to blend towards. Equal to the start frame while no progress
    /// has been made into the current frame.
    pub fn end_frame_index(&self) -> usize {
        if self.ticks_into_frame == 0 {
            self.current_frame
        } else {
            (self.current_frame + 1) % self.durations.len()
        }
    }

    pub fn frame_progress_ticks(&self) -> i64 {
        self.ticks_into_frame
    }

    pub fn frame_duration_ticks(&self) -> i64 {
        self.durations[self.current_frame]
    }

    /// Ticks counted since creation. Never decreases.
    pub fn total_ticks(&self) -> i64 {
        self.total_ticks
    }

    pub fn frame_count(&self) -> usize {
        self.durations.len()
    }

    /// Sum of every frame duration.
    pub fn loop_ticks(&self) -> i128 {
        self.loop_ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn growing() -> FrameState {
        FrameState::new(10, |i| (i as i64 + 1) * 10).unwrap()
    }

    #[test]
    fn test_initial_state() {
        let state = growing();
        assert_eq!(state.start_frame_index(), 0);
        assert_eq!(state.end_frame_index(), 0);
        assert_eq!(state.frame_progress_ticks(), 0);
        assert_eq!(state.frame_duration_ticks(), 10);
        assert_eq!(state.total_ticks(), 0);
        assert_eq!(state.loop_ticks(), 550);
    }

    #[test]
    fn test_advance_variable_durations() {
        let mut state = growing();
        state.advance(330).unwrap();
        assert_eq!(state.start_frame_index(), 7);
        assert_eq!(state.end_frame_index(), 8);
        assert_eq!(state.frame_progress_ticks(), 50);
        assert_eq!(state.frame_duration_ticks(), 80);
        assert_eq!(state.total_ticks(), 330);
    }

    #[test]
    fn test_full_loop_returns_to_start() {
        let mut state = growing();
        state.advance(550).unwrap();
        assert_eq!(state.start_frame_index(), 0);
        assert_eq!(state.frame_progress_ticks(), 0);
        assert_eq!(state.total_ticks(), 550);
    }

    #[test]
    fn test_last_frame_blends_into_first() {
        let mut state = growing();
        state.advance(549).unwrap();
        assert_eq!(state.start_frame_index(), 9);
        assert_eq!(state.end_frame_index(), 0);
        assert_eq!(state.frame_progress_ticks(), 99);
    }

    #[test]
    fn test_huge_delta_is_reduced() {
        let mut state = growing();
        state.advance(3).unwrap();
        state.advance(550 * 1_000_000_000_000 + 327).unwrap();
        assert_eq!(state.start_frame_index(), 7);
        assert_eq!(state.frame_progress_ticks(), 50);
    }

    #[test]
    fn test_total_ticks_saturate() {
        let mut state = FrameState::new(3, |_| 7).unwrap();
        state.advance(i64::MAX).unwrap();
        state.advance(i64::MAX).unwrap();
        assert_eq!(state.total_ticks(), i64::MAX);
        assert!(state.frame_progress_ticks() < 7);
    }

    #[test]
    fn test_negative_delta_leaves_state() {
        let mut state = growing();
        state.advance(42).unwrap();
        let before = state.clone();
        assert!(matches!(state.advance(-1), Err(AnimError::InvalidArgument(_))));
        assert_eq!(state, before);
    }

    #[test]
    fn test_zero_frames_rejected() {
        assert!(matches!(
            FrameState::new(0, |_| 1),
            Err(AnimError::UnsupportedState(_))
        ));
    }

    #[test]
    fn test_non_positive_duration_rejected() {
        assert!(matches!(
            FrameState::new(4, |i| if i == 2 { 0 } else { 5 }),
            Err(AnimError::UnsupportedState(_))
        ));
        assert!(FrameState::new(1, |_| -3).is_err());
    }

    #[test]
    fn test_single_frame_never_blends() {
        let mut state = FrameState::new(1, |_| 4).unwrap();
        for _ in 0..9 {
            state.advance(1).unwrap();
            assert_eq!(state.start_frame_index(), 0);
        }
        assert_eq!(state.frame_progress_ticks(), 1);
        assert_eq!(state.end_frame_index(), 0);
    }

    #[test]
    fn test_timing_identity() {
        let timing = FrameTiming::uniform(3, 4);
        assert_eq!(timing.frame_count(), 4);
        assert_eq!(timing.duration(2), 3);
        assert_eq!(timing.source_index(2), 2);
    }

    #[test]
    fn test_timing_sparse_table() {
        let timing = FrameTiming::new(
            vec![
                FrameTimingEntry::new(3, Some(20)),
                FrameTimingEntry::new(0, None),
                FrameTimingEntry::new(3, Some(5)),
            ],
            8,
            4,
        );
        assert_eq!(timing.frame_count(), 3);
        assert_eq!(timing.source_indices().collect::<Vec<_>>(), vec![3, 0, 3]);
        assert_eq!(timing.duration(1), 8);

        let mut state = FrameState::from_timing(&timing).unwrap();
        assert_eq!(state.loop_ticks(), 33);
        state.advance(29).unwrap();
        assert_eq!(state.start_frame_index(), 2);
        assert_eq!(timing.source_index(state.end_frame_index()), 3);
    }
}
