//! ECS components and the per-animation logic they carry.
//!
//! Submodules overview:
//! - [`animatedtexture`] – entity component binding base frames to a compositor
//! - [`color`] – packed ARGB colors and frame-to-frame color interpolation
//! - [`compositor`] – ordered, independently timed parts drawn into one texture
//! - [`driver`] – per-tick orchestration of one animated region
//! - [`framestate`] – frame timing table and the looping frame state machine
//! - [`texturebuffer`] – output pixels and the sink trait drivers write to
//! - [`timesync`] – smoothing of a jumpy day clock into animation ticks

pub mod animatedtexture;
pub mod color;
pub mod compositor;
pub mod driver;
pub mod framestate;
pub mod texturebuffer;
pub mod timesync;
