//! Changed-region detection.
//!
//! Interpolation only needs to touch pixels that actually differ between an
//! animation's frames. [`find_changed_region`] computes that set once so the
//! per-tick work stays proportional to the animated area.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{AnimError, Result};
use crate::resources::frames::Frame;

/// A pixel coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: u32,
    pub y: u32,
}

impl Point {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Pixels that differ between at least two frames, in row-major order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterpolateRegion {
    points: Vec<Point>,
}

impl InterpolateRegion {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn contains(&self, point: Point) -> bool {
        self.points
            .binary_search_by(|p| (p.y, p.x).cmp(&(point.y, point.x)))
            .is_ok()
    }
}

/// Find every coordinate where two of `frames` disagree.
///
/// Fully transparent colors compare equal whatever their color channels
/// hold. Each coordinate stops being checked at its first difference.
pub fn find_changed_region(frames: &[&dyn Frame]) -> Result<InterpolateRegion> {
    let Some((first, rest)) = frames.split_first() else {
        return Err(AnimError::InvalidArgument(
            "cannot find changed pixels without frames".to_string(),
        ));
    };

    let (width, height) = (first.width(), first.height());
    if let Some(index) = rest
        .iter()
        .position(|f| f.width() != width || f.height() != height)
    {
        return Err(AnimError::InvalidArgument(format!(
            "frame {} does not match the {}x{} size of the first frame",
            index + 1,
            width,
            height
        )));
    }

    let mut points = Vec::new();
    for y in 0..height {
        for x in 0..width {
            let base = first.color(x, y);
            if rest.iter().any(|frame| !base.looks_like(frame.color(x, y))) {
                points.push(Point::new(x, y));
            }
        }
    }

    debug!(
        "changed region: {} of {} pixels across {} frames",
        points.len(),
        width as usize * height as usize,
        frames.len()
    );
    Ok(InterpolateRegion { points })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::color::Color;
    use crate::resources::frames::RgbaFrame;

    fn region_of(frames: &[RgbaFrame]) -> Result<InterpolateRegion> {
        let refs: Vec<&dyn Frame> = frames.iter().map(|f| f as &dyn Frame).collect();
        find_changed_region(&refs)
    }

    #[test]
    fn test_identical_frames_have_no_region() {
        let frame = RgbaFrame::filled(4, 4, Color::rgba(10, 20, 30, 255));
        let region = region_of(&[frame.clone(), frame.clone(), frame]).unwrap();
        assert!(region.is_empty());
    }

    #[test]
    fn test_single_frame_has_no_region() {
        let region = region_of(&[RgbaFrame::filled(3, 3, Color(0xFF00FF00))]).unwrap();
        assert!(region.is_empty());
    }

    #[test]
    fn test_detects_changes_in_any_later_frame() {
        let base = RgbaFrame::filled(3, 2, Color::rgba(0, 0, 0, 255));
        let mut second = base.clone();
        second.set_color(2, 0, Color::rgba(1, 0, 0, 255));
        let mut third = base.clone();
        third.set_color(0, 1, Color::rgba(0, 0, 9, 255));

        let region = region_of(&[base, second, third]).unwrap();
        assert_eq!(region.points(), &[Point::new(2, 0), Point::new(0, 1)]);
        assert!(region.contains(Point::new(0, 1)));
        assert!(!region.contains(Point::new(1, 1)));
    }

    #[test]
    fn test_invisible_differences_ignored() {
        let mut a = RgbaFrame::filled(2, 1, Color::rgba(255, 0, 0, 0));
        let mut b = RgbaFrame::filled(2, 1, Color::rgba(0, 255, 0, 0));
        a.set_color(1, 0, Color::rgba(255, 0, 0, 10));
        b.set_color(1, 0, Color::rgba(0, 255, 0, 10));

        let region = region_of(&[a, b]).unwrap();
        assert_eq!(region.points(), &[Point::new(1, 0)]);
    }

    #[test]
    fn test_empty_frames_rejected() {
        assert!(matches!(
            find_changed_region(&[]),
            Err(AnimError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_size_mismatch_rejected() {
        let result = region_of(&[RgbaFrame::filled(2, 2, Color(0)), RgbaFrame::filled(2, 3, Color(0))]);
        assert!(result.is_err());
    }
}
