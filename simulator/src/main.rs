use anyhow::Result;
use bevy::app::AppExit;
use clap::Parser;
use tracing::info;

use simulator::{build_sim_app, load_config, spawn_stdin_reader, Args, Config, ControlInbox};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let mut cfg = match &args.config {
        Some(path) => load_config(path)?,
        None => Config::default(),
    };
    if let Some(ticks) = args.ticks {
        cfg.max_ticks = Some(ticks);
    }
    info!(?cfg, "Simulator config loaded");

    let mut app = build_sim_app(cfg)?;
    if args.stdin {
        let inbox = app.world().resource::<ControlInbox>().clone();
        spawn_stdin_reader(inbox)?;
        info!("reading control commands from stdin");
    }
    app.insert_resource(args);

    match app.run() {
        AppExit::Success => Ok(()),
        AppExit::Error(code) => anyhow::bail!("simulation stopped with exit code {code}"),
    }
}
