//! Event types and observers.
//!
//! Submodules:
//! - [`textureunload`] – tear down an animated texture when the host unloads it
pub mod textureunload;
