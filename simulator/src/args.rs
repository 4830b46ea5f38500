use std::path::PathBuf;

use bevy::prelude::Resource;
use clap::Parser;

#[derive(Parser, Debug, Resource, Clone)]
#[command(name = "rouv-simulator")]
#[command(about = "Headless ROUV dynamics simulator", long_about = None)]
pub struct Args {
    /// TOML config file; built-in defaults are used when omitted
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Stop after this many ticks (overrides `max_ticks` in the config)
    #[arg(long)]
    pub ticks: Option<u64>,
    /// Read control commands from standard input, one per line
    #[arg(long, default_value_t = false)]
    pub stdin: bool,
}
