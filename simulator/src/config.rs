use std::path::Path;

use anyhow::{Context, Result};
use bevy::prelude::Resource;
use protocol::ControlEvent;
use serde::{Deserialize, Serialize};
use vehicle::{ControlLimits, Envelope, SimSettings, VehicleParams};

#[derive(Debug, Clone, Serialize, Deserialize, Resource)]
#[serde(default)]
pub struct Config {
    /// Wall-clock tick rate of the runner loop.
    pub tick_rate_hz: f32,
    /// Exit after this many ticks; runs until interrupted when unset.
    pub max_ticks: Option<u64>,
    /// Emit a telemetry line every N ticks (0 disables).
    pub log_every: u64,
    pub settings: SimSettings,
    pub vehicle: VehicleParams,
    pub limits: ControlLimits,
    pub envelope: Envelope,
    pub script: Vec<ScriptEntry>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_rate_hz: 10.0,
            max_ticks: None,
            log_every: 10,
            settings: SimSettings::default(),
            vehicle: VehicleParams::default(),
            limits: ControlLimits::default(),
            envelope: Envelope::default(),
            script: Vec::new(),
        }
    }
}

/// Control command applied once the simulation reaches `tick`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptEntry {
    pub tick: u64,
    pub command: String,
}

impl Config {
    /// Parses every script command up front, sorted by tick (stable for equal ticks).
    pub fn compiled_script(&self) -> Result<Vec<(u64, ControlEvent)>> {
        let mut out = self
            .script
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let event = entry
                    .command
                    .parse::<ControlEvent>()
                    .with_context(|| format!("script entry {i} (`{}`)", entry.command))?;
                Ok((entry.tick, event))
            })
            .collect::<Result<Vec<_>>>()?;
        out.sort_by_key(|(tick, _)| *tick);
        Ok(out)
    }
}

pub fn parse_config(text: &str) -> Result<Config> {
    let cfg: Config = toml::from_str(text).context("parsing simulator config")?;
    if !(cfg.tick_rate_hz.is_finite() && cfg.tick_rate_hz > 0.0) {
        anyhow::bail!("tick_rate_hz must be positive, got {}", cfg.tick_rate_hz);
    }
    Ok(cfg)
}

pub fn load_config(path: &Path) -> Result<Config> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    parse_config(&text).with_context(|| format!("in {}", path.display()))
}
