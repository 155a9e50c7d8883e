//! Preview configuration resource.
//!
//! Settings for the command-line preview, loaded from an INI file. Missing
//! keys keep their defaults.
//!
//! # Configuration File Format
//!
//! ```ini
//! [preview]
//! ticks = 200
//! sample_every = 20
//!
//! [time]
//! start_day_time = 6000
//! day_time_step = 1
//! natural_cycle = true
//! ```

use std::path::PathBuf;

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;

use crate::error::{AnimError, Result};

const DEFAULT_TICKS: u64 = 200;
const DEFAULT_SAMPLE_EVERY: u64 = 20;
const DEFAULT_DAY_TIME_STEP: i64 = 1;
const DEFAULT_CONFIG_PATH: &str = "./preview.ini";

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct PreviewConfig {
    /// Host ticks to simulate.
    pub ticks: u64,
    /// Log a checksum every this many ticks.
    pub sample_every: u64,
    /// Initial time of day. No day clock when absent.
    pub start_day_time: Option<i64>,
    /// Day time added per tick.
    pub day_time_step: i64,
    pub natural_cycle: bool,
    pub config_path: PathBuf,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl PreviewConfig {
    pub fn new() -> Self {
        Self {
            ticks: DEFAULT_TICKS,
            sample_every: DEFAULT_SAMPLE_EVERY,
            start_day_time: None,
            day_time_step: DEFAULT_DAY_TIME_STEP,
            natural_cycle: true,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load settings from the INI file at `config_path`.
    pub fn load_from_file(&mut self) -> Result<()> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| AnimError::InvalidConfig(format!("Failed to load config file: {}", e)))?;
        self.apply(&config)
    }

    /// Load settings from INI text.
    pub fn load_from_str(&mut self, text: &str) -> Result<()> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| AnimError::InvalidConfig(format!("Failed to parse config: {}", e)))?;
        self.apply(&config)
    }

    fn apply(&mut self, config: &Ini) -> Result<()> {
        // [preview] section
        if let Some(ticks) = config.getuint("preview", "ticks").map_err(AnimError::InvalidConfig)? {
            self.ticks = ticks;
        }
        if let Some(every) = config
            .getuint("preview", "sample_every")
            .map_err(AnimError::InvalidConfig)?
        {
            self.sample_every = every.max(1);
        }

        // [time] section
        if let Some(start) = config
            .getint("time", "start_day_time")
            .map_err(AnimError::InvalidConfig)?
        {
            self.start_day_time = Some(start);
        }
        if let Some(step) = config
            .getint("time", "day_time_step")
            .map_err(AnimError::InvalidConfig)?
        {
            self.day_time_step = step;
        }
        if let Some(natural) = config
            .getbool("time", "natural_cycle")
            .map_err(AnimError::InvalidConfig)?
        {
            self.natural_cycle = natural;
        }

        info!(
            "Loaded preview config: ticks={}, sample_every={}, start_day_time={:?}, step={}, natural={}",
            self.ticks, self.sample_every, self.start_day_time, self.day_time_step, self.natural_cycle
        );
        Ok(())
    }
}
