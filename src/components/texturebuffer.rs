//! Output pixels of an animated texture.
//!
//! [`OutputSink`] is the write side of an animation: drivers either copy a
//! whole frame into it or rewrite a set of points. [`TextureBuffer`] is the
//! in-memory implementation attached to animated entities; uploading it to a
//! GPU is left to the host.

use std::hash::{Hash, Hasher};

use bevy_ecs::prelude::Component;
use rustc_hash::FxHasher;

use crate::components::color::Color;
use crate::error::Result;
use crate::resources::frames::Frame;
use crate::systems::changedregion::Point;

/// Mutable pixel target written by animation drivers.
///
/// `origin` offsets frame coordinates into the target so several parts can
/// share one texture. Pixels falling outside the target are ignored.
pub trait OutputSink {
    /// Copy `frame` over the target, starting at `origin`.
    fn replace_with(&mut self, origin: Point, frame: &dyn Frame);

    /// Rewrite every point in `points` with `f(point, current_color)`.
    ///
    /// Nothing is written unless `f` succeeds for every point.
    fn transform(
        &mut self,
        origin: Point,
        points: &[Point],
        f: &mut dyn FnMut(Point, Color) -> Result<Color>,
    ) -> Result<()>;
}

/// Row-major ARGB pixels of one texture.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct TextureBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl TextureBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::TRANSPARENT; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    pub fn color(&self, x: u32, y: u32) -> Option<Color> {
        self.index_of(x, y).map(|i| self.pixels[i])
    }

    /// Hash of the current pixels, for cheap change checks.
    pub fn checksum(&self) -> u64 {
        let mut hasher = FxHasher::default();
        self.pixels.hash(&mut hasher);
        hasher.finish()
    }

    fn index_of(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }
}

impl OutputSink for TextureBuffer {
    fn replace_with(&mut self, origin: Point, frame: &dyn Frame) {
        for y in 0..frame.height() {
            for x in 0..frame.width() {
                if let Some(i) = self.index_of(origin.x.saturating_add(x), origin.y.saturating_add(y)) {
                    self.pixels[i] = frame.color(x, y);
                }
            }
        }
    }

    fn transform(
        &mut self,
        origin: Point,
        points: &[Point],
        f: &mut dyn FnMut(Point, Color) -> Result<Color>,
    ) -> Result<()> {
        let mut writes = Vec::with_capacity(points.len());
        for &point in points {
            if let Some(i) = self.index_of(origin.x.saturating_add(point.x), origin.y.saturating_add(point.y)) {
                writes.push((i, f(point, self.pixels[i])?));
            }
        }
        for (i, color) in writes {
            self.pixels[i] = color;
        }
        Ok(())
    }
}
