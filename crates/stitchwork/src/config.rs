//! Host configuration with layered loading
//!
//! Configuration is loaded from multiple sources (lowest to highest priority):
//! 1. Compiled defaults
//! 2. `stitchwork.ron` file (if exists)
//! 3. Environment variables prefixed with `STITCHWORK_`
//!
//! Example environment variable: `STITCHWORK_SIM__CREATURE__BASE_SPEED=3.0`

use std::path::Path;

use anyhow::{Context, Result};
use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use stitchwork_core::SimConfig;

/// Default config file name, without extension
pub const CONFIG_FILE: &str = "stitchwork";

/// Main host configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GameConfig {
    /// Simulation tuning, handed to the core unchanged
    #[serde(default)]
    pub sim: SimConfig,

    #[serde(default)]
    pub viewport: ViewportConfig,

    #[serde(default)]
    pub debug: DebugConfig,
}

/// Viewport used by headless runs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewportConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DebugConfig {
    /// Enable verbose logging
    pub verbose_logging: bool,
}

impl GameConfig {
    /// Load `stitchwork.ron` from the working directory, if present
    pub fn load() -> Result<Self> {
        let builder = Self::defaults()?.add_source(
            File::with_name(CONFIG_FILE)
                .format(FileFormat::Ron)
                .required(false),
        );
        Self::finish(builder)
    }

    /// Load an explicit config file; it must exist
    pub fn load_from(path: &Path) -> Result<Self> {
        let builder = Self::defaults()?.add_source(File::from(path).format(FileFormat::Ron));
        Self::finish(builder)
            .with_context(|| format!("Failed to load config from {}", path.display()))
    }

    fn defaults() -> Result<ConfigBuilder<config::builder::DefaultState>> {
        Ok(Config::builder()
            .set_default("viewport.width", 800_i64)?
            .set_default("viewport.height", 600_i64)?
            .set_default("debug.verbose_logging", false)?)
    }

    fn finish(builder: ConfigBuilder<config::builder::DefaultState>) -> Result<Self> {
        let config = builder
            // STITCHWORK_SIM__ROOM__SIDES, etc.
            .add_source(
                Environment::with_prefix("STITCHWORK")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to build configuration")?;

        let config: GameConfig = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;
        config.sim.validate()?;
        Ok(config)
    }
}
