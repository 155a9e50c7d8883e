//! Animation configuration handed over by the metadata layer.
//!
//! Everything an animation needs is gathered into one [`AnimationConfig`] and
//! validated in one go before a driver is built. Texture-level layout (the
//! output size, the parts and their frame sheets) lives in
//! [`TextureDescriptor`], which can be loaded from JSON.
//!
//! # Descriptor Format
//!
//! ```json
//! {
//!   "width": 16,
//!   "height": 16,
//!   "frames_key": "lava",
//!   "animation": { "frame_time": 4, "interpolate": true },
//!   "parts": [
//!     { "x": 4, "y": 4, "width": 8, "height": 8, "frames_key": "bubble", "frame_time": 2 }
//!   ],
//!   "sheets": [
//!     { "key": "lava", "width": 16, "frame_height": 16, "pixels": [4294901760, ...] }
//!   ]
//! }
//! ```

use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::components::color::Color;
use crate::components::framestate::{FrameTiming, FrameTimingEntry};
use crate::components::timesync::{DEFAULT_CYCLE_LENGTH, DEFAULT_UNNATURAL_SMOOTHING_RATE};
use crate::error::{AnimError, Result};
use crate::resources::frames::{FrameGroup, RgbaFrame};

const DEFAULT_FRAME_TIME: i64 = 1;

/// Settings for one animated region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Ticks per frame for frames without their own time.
    pub frame_time: i64,
    /// Predefined frame sequence. Empty shows every source frame in order.
    pub frames: Vec<FrameTimingEntry>,
    /// Blend between frames instead of switching abruptly.
    pub interpolate: bool,
    /// Blend alpha too, instead of keeping the start frame's alpha.
    pub smooth_alpha: bool,
    /// Ticks to fast-forward before the first tick.
    pub skip_ticks: i64,
    /// Follow the day clock instead of counting ticks.
    pub daytime_sync: bool,
    /// Length of the day cycle in ticks.
    pub cycle_length: i64,
    /// Smoothing rate used when the world has no natural day cycle.
    pub unnatural_smoothing_rate: f64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            frame_time: DEFAULT_FRAME_TIME,
            frames: Vec::new(),
            interpolate: false,
            smooth_alpha: false,
            skip_ticks: 0,
            daytime_sync: false,
            cycle_length: DEFAULT_CYCLE_LENGTH,
            unnatural_smoothing_rate: DEFAULT_UNNATURAL_SMOOTHING_RATE,
        }
    }
}

impl AnimationConfig {
    /// Check every field against a source with `source_frames` frames.
    ///
    /// Returns the frame timing table the driver should follow.
    pub fn validate(&self, source_frames: usize) -> Result<FrameTiming> {
        if self.frame_time < 1 {
            return Err(AnimError::InvalidConfig(format!(
                "frame_time must be at least 1, got {}",
                self.frame_time
            )));
        }
        if self.skip_ticks < 0 {
            return Err(AnimError::InvalidConfig(format!(
                "skip_ticks must not be negative, got {}",
                self.skip_ticks
            )));
        }
        for (position, entry) in self.frames.iter().enumerate() {
            if entry.index >= source_frames {
                return Err(AnimError::InvalidConfig(format!(
                    "frame entry {} references frame {} but only {} exist",
                    position, entry.index, source_frames
                )));
            }
            if let Some(time) = entry.time.filter(|&time| time < 1) {
                return Err(AnimError::InvalidConfig(format!(
                    "frame entry {position} has time {time}, must be at least 1"
                )));
            }
        }
        if self.daytime_sync {
            if self.cycle_length < 1 {
                return Err(AnimError::InvalidConfig(format!(
                    "cycle_length must be positive, got {}",
                    self.cycle_length
                )));
            }
            let rate = self.unnatural_smoothing_rate;
            if !(rate > 0.0 && rate <= 1.0) {
                return Err(AnimError::InvalidConfig(format!(
                    "unnatural_smoothing_rate must be in (0, 1], got {rate}"
                )));
            }
        }

        let timing = FrameTiming::new(self.frames.clone(), self.frame_time, source_frames);
        if timing.frame_count() == 0 {
            return Err(AnimError::InvalidConfig(
                "animation has no frames".to_string(),
            ));
        }
        Ok(timing)
    }
}

/// One independently timed region of a texture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartConfig {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    /// Private frames for this part. Uses the texture's frames when absent.
    #[serde(default)]
    pub frames_key: Option<String>,
    #[serde(flatten)]
    pub animation: AnimationConfig,
}

impl PartConfig {
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

/// Inline vertical sprite sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetConfig {
    pub key: String,
    pub width: u32,
    pub frame_height: u32,
    pub pixels: Vec<Color>,
}

impl SheetConfig {
    pub fn to_frames(&self) -> Result<FrameGroup> {
        if self.width == 0 {
            return Err(AnimError::InvalidConfig(format!(
                "sheet '{}' has zero width",
                self.key
            )));
        }
        let height = (self.pixels.len() / self.width as usize) as u32;
        let sheet = RgbaFrame::new(self.width, height, self.pixels.clone())?;
        FrameGroup::from_sheet(&sheet, self.frame_height)
    }
}

/// Layout of one animated texture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextureDescriptor {
    pub width: u32,
    pub height: u32,
    /// Key of the base frames in the frame store.
    pub frames_key: String,
    /// Animation covering the whole texture, if any.
    #[serde(default)]
    pub animation: Option<AnimationConfig>,
    #[serde(default)]
    pub parts: Vec<PartConfig>,
    #[serde(default)]
    pub sheets: Vec<SheetConfig>,
}

impl TextureDescriptor {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let descriptor: Self = serde_json::from_str(json)?;
        descriptor.check_parts()?;
        Ok(descriptor)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let descriptor = Self::from_json_str(&json)?;
        info!(
            "Loaded texture descriptor {:?}: {}x{}, {} part(s), {} sheet(s)",
            path,
            descriptor.width,
            descriptor.height,
            descriptor.parts.len(),
            descriptor.sheets.len()
        );
        Ok(descriptor)
    }

    fn check_parts(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(AnimError::InvalidConfig(
                "texture must not be empty".to_string(),
            ));
        }
        if let Some(index) = self.parts.iter().position(|p| p.area() == 0) {
            return Err(AnimError::InvalidConfig(format!("part {index} is empty")));
        }
        Ok(())
    }

    /// Parts in drawing order.
    ///
    /// The whole-texture animation, when present, becomes a part at the
    /// origin. Larger parts come first so smaller ones are drawn over them;
    /// equal areas keep their declared order.
    pub fn ordered_parts(&self) -> Vec<PartConfig> {
        let mut parts = Vec::with_capacity(self.parts.len() + 1);
        if let Some(animation) = &self.animation {
            parts.push(PartConfig {
                x: 0,
                y: 0,
                width: self.width,
                height: self.height,
                frames_key: None,
                animation: animation.clone(),
            });
        }
        parts.extend(self.parts.iter().cloned());
        parts.sort_by_key(|part| std::cmp::Reverse(part.area()));
        parts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let timing = AnimationConfig::default().validate(3).unwrap();
        assert_eq!(timing.frame_count(), 3);
        assert_eq!(timing.duration(0), 1);
    }

    #[test]
    fn test_rejects_bad_fields() {
        let bad_time = AnimationConfig {
            frame_time: 0,
            ..Default::default()
        };
        assert!(matches!(bad_time.validate(2), Err(AnimError::InvalidConfig(_))));

        let bad_skip = AnimationConfig {
            skip_ticks: -1,
            ..Default::default()
        };
        assert!(bad_skip.validate(2).is_err());

        let bad_entry = AnimationConfig {
            frames: vec![FrameTimingEntry::new(0, Some(0))],
            ..Default::default()
        };
        assert!(bad_entry.validate(2).is_err());

        let bad_index = AnimationConfig {
            frames: vec![FrameTimingEntry::new(2, None)],
            ..Default::default()
        };
        assert!(bad_index.validate(2).is_err());
    }

    #[test]
    fn test_rejects_empty_source() {
        assert!(AnimationConfig::default().validate(0).is_err());
    }

    #[test]
    fn test_sync_fields_only_checked_when_synced() {
        let config = AnimationConfig {
            cycle_length: 0,
            ..Default::default()
        };
        assert!(config.validate(1).is_ok());
        let synced = AnimationConfig {
            daytime_sync: true,
            ..config
        };
        assert!(synced.validate(1).is_err());
    }

    #[test]
    fn test_parse_descriptor() {
        let json = r#"{
            "width": 4, "height": 4, "frames_key": "base",
            "animation": { "frame_time": 3, "interpolate": true },
            "parts": [
                { "x": 1, "y": 1, "width": 2, "height": 2, "frames_key": "eye",
                  "frames": [ { "index": 1, "time": 5 }, { "index": 0 } ] }
            ]
        }"#;
        let descriptor = TextureDescriptor::from_json_str(json).unwrap();
        let animation = descriptor.animation.as_ref().unwrap();
        assert_eq!(animation.frame_time, 3);
        assert!(animation.interpolate);
        assert!(!animation.smooth_alpha);

        let part = &descriptor.parts[0];
        assert_eq!(part.frames_key.as_deref(), Some("eye"));
        assert_eq!(part.animation.frames[0], FrameTimingEntry::new(1, Some(5)));
        assert_eq!(part.animation.frames[1].time, None);
        assert_eq!(part.animation.frame_time, 1);
    }

    #[test]
    fn test_ordered_parts_largest_first() {
        let part = |x, width, height| PartConfig {
            x,
            y: 0,
            width,
            height,
            frames_key: None,
            animation: AnimationConfig::default(),
        };
        let descriptor = TextureDescriptor {
            width: 8,
            height: 8,
            frames_key: "base".to_string(),
            animation: Some(AnimationConfig::default()),
            parts: vec![part(1, 2, 2), part(2, 4, 4), part(3, 1, 4)],
            sheets: Vec::new(),
        };
        let order: Vec<u32> = descriptor.ordered_parts().iter().map(|p| p.width).collect();
        assert_eq!(order, vec![8, 4, 2, 1]);
    }

    #[test]
    fn test_empty_part_rejected() {
        let json = r#"{ "width": 4, "height": 4, "frames_key": "base",
            "parts": [ { "x": 0, "y": 0, "width": 0, "height": 2 } ] }"#;
        assert!(matches!(
            TextureDescriptor::from_json_str(json),
            Err(AnimError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_sheet_to_frames() {
        let sheet = SheetConfig {
            key: "s".to_string(),
            width: 1,
            frame_height: 2,
            pixels: vec![Color(1), Color(2), Color(3), Color(4)],
        };
        assert_eq!(sheet.to_frames().unwrap().len(), 2);
    }
}
