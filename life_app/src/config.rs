// config.rs - Front-end settings loaded from TOML

use std::fs;
use std::path::Path;
use std::time::Duration;

use life_engine::CellPitch;
use serde::Deserialize;

use crate::error::{AppError, Result};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Drawn cell size in pixels
    pub cell_size: f32,
    /// Gap between cells in pixels
    pub cell_margin: f32,
    pub step_interval_ms: u64,
    pub min_interval_ms: u64,
    pub max_interval_ms: u64,
    pub live_color: [u8; 3],
    pub dead_color: [u8; 3],
    /// Stop a run once the pattern starts repeating
    pub stop_on_cycle: bool,
    /// Used when RUST_LOG is not set
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cell_size: 30.0,
            cell_margin: 2.0,
            step_interval_ms: 200,
            min_interval_ms: 10,
            max_interval_ms: 1000,
            live_color: [255, 215, 0],  // gold
            dead_color: [128, 128, 128], // gray
            stop_on_cycle: false,
            log_filter: "life_app=info,life_engine=info".to_string(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }

    pub fn parse_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.cell_size > 0.0) {
            return Err(AppError::InvalidConfig(format!(
                "cell_size must be positive, got {}",
                self.cell_size
            )));
        }
        if !(self.cell_margin >= 0.0) {
            return Err(AppError::InvalidConfig(format!(
                "cell_margin must not be negative, got {}",
                self.cell_margin
            )));
        }
        if self.min_interval_ms == 0
            || self.min_interval_ms > self.step_interval_ms
            || self.step_interval_ms > self.max_interval_ms
        {
            return Err(AppError::InvalidConfig(format!(
                "intervals must satisfy 0 < min ({}) <= step ({}) <= max ({})",
                self.min_interval_ms, self.step_interval_ms, self.max_interval_ms
            )));
        }
        Ok(())
    }

    pub fn pitch(&self) -> CellPitch {
        CellPitch::new(self.cell_size, self.cell_margin)
    }

    pub fn step_interval(&self) -> Duration {
        Duration::from_millis(self.step_interval_ms)
    }
}
