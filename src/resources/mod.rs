//! ECS resources and shared data made available to systems.
//!
//! Overview
//! - `animconfig` – validated animation settings and JSON texture descriptors
//! - `frames` – read-only frames and frame sources
//! - `framestore` – decoded frame groups keyed by string IDs
//! - `previewconfig` – INI settings of the command-line preview
//! - `worldtime` – host tick counter and day clock
pub mod animconfig;
pub mod frames;
pub mod framestore;
pub mod previewconfig;
pub mod worldtime;
