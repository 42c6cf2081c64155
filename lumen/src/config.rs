use std::fs;
use std::path::Path;

use anyhow::{Context, anyhow};
use serde::Deserialize;

const DEFAULT_CONFIG: &str = include_str!("../../package-content/lumen_config.json5");
const CONFIG_PATH: &str = "lumen_config.json5";

/// Settings of the demo world.
#[derive(Debug, Clone, Deserialize)]
pub struct LumenConfig {
    pub seed: u64,
    pub ground_level: i32,
    pub radius: i32,
    pub torch_chance: f64,
    pub edit_batches: u32,
    pub edits_per_batch: u32,
    pub edit_palette: Vec<String>,
    pub threads: usize,
    pub log_filter: String,
}

impl LumenConfig {
    /// Reads the config file, writing the default one first if it does not exist.
    pub fn load_or_create() -> anyhow::Result<Self> {
        let path = Path::new(CONFIG_PATH);

        let config_str = if path.exists() {
            fs::read_to_string(path).with_context(|| format!("reading {CONFIG_PATH}"))?
        } else {
            fs::write(path, DEFAULT_CONFIG).with_context(|| format!("writing {CONFIG_PATH}"))?;
            DEFAULT_CONFIG.to_string()
        };

        let config: LumenConfig =
            serde_json5::from_str(&config_str).with_context(|| format!("parsing {CONFIG_PATH}"))?;
        config.validate().map_err(|err| anyhow!("invalid {CONFIG_PATH}: {err}"))?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), &'static str> {
        if !(2..=16).contains(&self.radius) {
            return Err("Radius must be in range 2..16");
        }
        if !(0.0..=1.0).contains(&self.torch_chance) {
            return Err("Torch chance must be between 0 and 1");
        }
        if self.edit_palette.is_empty() {
            return Err("Edit palette must name at least one block");
        }
        if self.log_filter.is_empty() {
            return Err("Log filter must not be empty");
        }
        Ok(())
    }
}
