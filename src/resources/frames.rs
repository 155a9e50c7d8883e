//! Read-only frame sources.
//!
//! A [`Frame`] is anything that can report a color at `(x, y)`. A
//! [`FrameSource`] is an indexable, fixed-size list of frames. The animation
//! core only ever reads from them; decoding and ownership stay with whoever
//! supplies the frames.

use crate::components::color::Color;
use crate::error::{AnimError, Result};

/// A read-only image.
pub trait Frame {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    /// Color at `(x, y)`. Both coordinates must be inside the frame.
    fn color(&self, x: u32, y: u32) -> Color;
}

/// Indexable, fixed-size collection of frames.
pub trait FrameSource {
    fn frame_count(&self) -> usize;
    fn frame(&self, index: usize) -> Option<&dyn Frame>;
}

/// A decoded frame stored row by row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaFrame {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl RgbaFrame {
    pub fn new(width: u32, height: u32, pixels: Vec<Color>) -> Result<Self> {
        if pixels.len() != width as usize * height as usize {
            return Err(AnimError::InvalidArgument(format!(
                "{}x{} frame needs {} pixels, got {}",
                width,
                height,
                width as usize * height as usize,
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// A frame filled with a single color.
    pub fn filled(width: u32, height: u32, color: Color) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width as usize * height as usize],
        }
    }

    pub fn set_color(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index_of(x, y);
        self.pixels[index] = color;
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    fn index_of(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

impl Frame for RgbaFrame {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn color(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index_of(x, y)]
    }
}

/// The decoded frames of one texture or part, all the same size.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameGroup {
    frames: Vec<RgbaFrame>,
}

impl FrameGroup {
    pub fn new(frames: Vec<RgbaFrame>) -> Result<Self> {
        if let Some(first) = frames.first() {
            let mismatched = frames
                .iter()
                .position(|f| f.width != first.width || f.height != first.height);
            if let Some(index) = mismatched {
                return Err(AnimError::InvalidArgument(format!(
                    "frame {} is {}x{}, expected {}x{}",
                    index, frames[index].width, frames[index].height, first.width, first.height
                )));
            }
        }
        Ok(Self { frames })
    }

    /// Cut a vertical sprite sheet into `frame_height` tall frames.
    pub fn from_sheet(sheet: &RgbaFrame, frame_height: u32) -> Result<Self> {
        if frame_height == 0 || sheet.height % frame_height != 0 {
            return Err(AnimError::InvalidArgument(format!(
                "sheet height {} is not a multiple of frame height {}",
                sheet.height, frame_height
            )));
        }
        let frame_len = sheet.width as usize * frame_height as usize;
        let frames = sheet
            .pixels
            .chunks(frame_len)
            .map(|chunk| RgbaFrame {
                width: sheet.width,
                height: frame_height,
                pixels: chunk.to_vec(),
            })
            .collect();
        Ok(Self { frames })
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Width and height shared by every frame, if there is any frame.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.frames.first().map(|f| (f.width, f.height))
    }
}

impl FrameSource for FrameGroup {
    fn frame_count(&self) -> usize {
        self.frames.len()
    }

    fn frame(&self, index: usize) -> Option<&dyn Frame> {
        self.frames.get(index).map(|f| f as &dyn Frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_checks_pixel_count() {
        assert!(RgbaFrame::new(2, 2, vec![Color(0); 3]).is_err());
        assert!(RgbaFrame::new(2, 2, vec![Color(0); 4]).is_ok());
    }

    #[test]
    fn test_color_row_major() {
        let frame = RgbaFrame::new(2, 2, vec![Color(1), Color(2), Color(3), Color(4)]).unwrap();
        assert_eq!(frame.color(1, 0), Color(2));
        assert_eq!(frame.color(0, 1), Color(3));
    }

    #[test]
    fn test_group_rejects_mixed_sizes() {
        let result = FrameGroup::new(vec![
            RgbaFrame::filled(2, 2, Color(0)),
            RgbaFrame::filled(3, 2, Color(0)),
        ]);
        assert!(matches!(result, Err(AnimError::InvalidArgument(_))));
    }

    #[test]
    fn test_from_sheet_splits_vertically() {
        let pixels = (0..12).map(Color).collect();
        let sheet = RgbaFrame::new(2, 6, pixels).unwrap();
        let group = FrameGroup::from_sheet(&sheet, 2).unwrap();
        assert_eq!(group.frame_count(), 3);
        assert_eq!(group.dimensions(), Some((2, 2)));
        let last = group.frame(2).unwrap();
        assert_eq!(last.color(0, 0), Color(8));
        assert_eq!(last.color(1, 1), Color(11));
        assert!(group.frame(3).is_none());
    }

    #[test]
    fn test_from_sheet_rejects_partial_frames() {
        let sheet = RgbaFrame::filled(2, 5, Color(0));
        assert!(FrameGroup::from_sheet(&sheet, 2).is_err());
        assert!(FrameGroup::from_sheet(&sheet, 0).is_err());
    }
}
