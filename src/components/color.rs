//! Packed colors and frame-to-frame color interpolation.
//!
//! A [`Color`] is stored as a single `u32` laid out as `0xAARRGGBB`. It is
//! only split into channels while mixing two colors in [`interpolate`].

use serde::{Deserialize, Serialize};

use crate::error::{AnimError, Result};

/// A packed ARGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub u32);

impl Color {
    pub const TRANSPARENT: Color = Color(0);

    /// Pack the four channels into a color.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color((a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32)
    }

    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn blue(self) -> u8 {
        self.0 as u8
    }

    /// Compare two colors the way a viewer sees them.
    ///
    /// Every fully transparent color is considered equal to every other,
    /// whatever its color channels hold.
    pub fn looks_like(self, other: Color) -> bool {
        (self.alpha() == 0 && other.alpha() == 0) || self == other
    }
}

/// How the alpha channel is treated while mixing two colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlphaMode {
    /// Keep the start color's alpha and ignore the end color's.
    #[default]
    Preserve,
    /// Mix alpha linearly like the color channels.
    Smooth,
}

impl AlphaMode {
    pub fn from_smooth_flag(smooth_alpha: bool) -> Self {
        if smooth_alpha {
            AlphaMode::Smooth
        } else {
            AlphaMode::Preserve
        }
    }
}

/// Mix one channel. The start weight is `(steps - step) / steps`.
///
/// Integer division truncates, so the result is the floor of the exact
/// weighted sum, and mixing a value with itself yields that value.
// Widened so frame durations up to i64::MAX cannot overflow the products.
fn mix_channel(steps: i64, step: i64, start: u8, end: u8) -> u8 {
    let (steps, step) = (steps as i128, step as i128);
    let mixed = ((steps - step) * start as i128 + step * end as i128) / steps;
    mixed as u8
}

/// Interpolate between two colors `step` ticks into a `steps` tick frame.
///
/// `step` must satisfy `1 <= step < steps`. Step zero means the start frame is
/// shown as is and must be handled by the caller without interpolating.
pub fn interpolate(mode: AlphaMode, steps: i64, step: i64, start: Color, end: Color) -> Result<Color> {
    if steps < 2 {
        return Err(AnimError::InvalidArgument(format!(
            "interpolation needs at least 2 steps, got {steps}"
        )));
    }
    if step < 1 || step >= steps {
        return Err(AnimError::InvalidArgument(format!(
            "interpolation step {step} outside [1, {steps})"
        )));
    }

    let alpha = match mode {
        AlphaMode::Preserve => start.alpha(),
        AlphaMode::Smooth => mix_channel(steps, step, start.alpha(), end.alpha()),
    };

    Ok(Color::rgba(
        mix_channel(steps, step, start.red(), end.red()),
        mix_channel(steps, step, start.green(), end.green()),
        mix_channel(steps, step, start.blue(), end.blue()),
        alpha,
    ))
}
