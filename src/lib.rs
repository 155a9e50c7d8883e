//! Animated texture library.
//!
//! This module exposes the frame timing, day-cycle smoothing, color
//! interpolation and multi-part composition used to animate sprite-sheet
//! textures tick by tick, plus the ECS components, resources, systems and
//! events that drive them from a host loop.

pub mod components;
pub mod error;
pub mod events;
pub mod resources;
pub mod systems;
