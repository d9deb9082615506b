//! Table configuration persisted as TOML.

use std::path::Path;
use std::{fs, time::Duration};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::table::Pacing;

/// Everything the demo table runner needs: stakes, seats, and pacing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub small_blind: u32,
    pub big_blind: u32,
    /// Chips each seat starts with.
    pub buy_in: u32,
    /// Number of bot seats at the demo table.
    pub bots: usize,
    /// Pause between auto-dealt streets when everyone is all-in.
    pub stage_delay_ms: u64,
    /// Pause between a showdown and the next hand.
    pub hand_delay_ms: u64,
    /// Pause before a finished table is destroyed.
    pub cleanup_delay_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            small_blind: 10,
            big_blind: 20,
            buy_in: 1000,
            bots: 3,
            stage_delay_ms: 2000,
            hand_delay_ms: 5000,
            cleanup_delay_ms: 5000,
        }
    }
}

impl Config {
    /// Load configuration from `path`. If the file does not exist, create
    /// it with defaults and return those.
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            let s = fs::read_to_string(path)
                .with_context(|| format!("reading config file '{}'", path.display()))?;
            let cfg: Config = toml::from_str(&s)
                .with_context(|| format!("parsing TOML config '{}'", path.display()))?;
            Ok(cfg)
        } else {
            if let Some(parent) = path.parent() {
                if !parent.exists() {
                    fs::create_dir_all(parent).with_context(|| {
                        format!("creating config directory '{}'", parent.display())
                    })?;
                }
            }
            let cfg = Config::default();
            let toml_text = toml::to_string_pretty(&cfg)
                .with_context(|| "serializing default config to TOML")?;
            fs::write(path, toml_text)
                .with_context(|| format!("writing default config to '{}'", path.display()))?;
            Ok(cfg)
        }
    }

    /// Save the current config back to `path` (overwrites).
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating config directory '{}'", parent.display()))?;
            }
        }
        let toml_text =
            toml::to_string_pretty(&self).with_context(|| "serializing config to TOML")?;
        fs::write(path, toml_text)
            .with_context(|| format!("writing config to '{}'", path.display()))?;
        Ok(())
    }

    pub fn pacing(&self) -> Pacing {
        Pacing {
            stage_delay: Duration::from_millis(self.stage_delay_ms),
            hand_delay: Duration::from_millis(self.hand_delay_ms),
            cleanup_delay: Duration::from_millis(self.cleanup_delay_ms),
        }
    }
}
