//! Error types shared by every animation module.
//!
//! Configuration and argument errors fail fast and abort the current tick for
//! the affected animation only. An absent day clock is not an error; drivers
//! fall back to plain tick counting instead.

use std::io;
use thiserror::Error;

/// Errors raised while building or ticking animations.
#[derive(Debug, Error)]
pub enum AnimError {
    /// A caller passed a value outside the accepted range.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The animation reached a state its configuration cannot support.
    #[error("Unsupported state: {0}")]
    UnsupportedState(String),

    /// The animation configuration failed validation.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Reading a descriptor or config file failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A texture descriptor could not be decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, AnimError>;
