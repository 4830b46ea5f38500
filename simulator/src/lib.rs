//! Headless host for the vehicle simulation.
//!
//! A bevy `App` provides the fixed-rate tick: each update drains queued
//! control events, steps the simulation once and hands the snapshot to the
//! telemetry renderer, strictly in that order.

use std::time::Duration;

use anyhow::{Context, Result};
use bevy::app::ScheduleRunnerPlugin;
use bevy::prelude::*;
use tracing::{error, info};
use vehicle::Simulation;

pub mod args;
pub mod config;
pub mod input;
pub mod telemetry;

pub use args::Args;
pub use config::{load_config, parse_config, Config, ScriptEntry};
pub use input::{spawn_stdin_reader, ControlInbox, ControlScript};
pub use telemetry::{format_snapshot, LatestSnapshot, TelemetrySettings};

/// The single owner of simulation state inside the app.
#[derive(Resource, Debug)]
pub struct SimCore(pub Simulation);

/// Optional tick budget; the app exits once it is spent.
#[derive(Resource, Debug, Default)]
pub struct TickBudget {
    pub max_ticks: Option<u64>,
    pub elapsed: u64,
}

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct SimSet;

#[derive(Clone, Copy)]
struct SimAppConfig {
    paced: bool,
    include_telemetry: bool,
}

impl SimAppConfig {
    const FULL: Self = Self { paced: true, include_telemetry: true };
    const MINIMAL: Self = Self { paced: false, include_telemetry: false };
}

/// Full app: paced runner loop plus telemetry output.
pub fn build_sim_app(cfg: Config) -> Result<App> {
    build_sim_app_with_config(cfg, SimAppConfig::FULL)
}

/// Unpaced and silent; advance manually with `App::update`.
pub fn build_headless_sim_app(cfg: Config) -> Result<App> {
    build_sim_app_with_config(cfg, SimAppConfig::MINIMAL)
}

fn build_sim_app_with_config(cfg: Config, config: SimAppConfig) -> Result<App> {
    let sim = Simulation::new(
        cfg.vehicle.clone(),
        cfg.settings.clone(),
        cfg.limits,
        cfg.envelope,
    )
    .context("creating simulation")?;
    let script = ControlScript::new(cfg.compiled_script()?);
    let period = tick_period(cfg.tick_rate_hz)?;

    let mut app = App::new();
    if config.paced {
        app.add_plugins(MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(period)));
    } else {
        app.add_plugins(MinimalPlugins);
    }

    app.insert_resource(SimCore(sim))
        .insert_resource(script)
        .insert_resource(TickBudget { max_ticks: cfg.max_ticks, elapsed: 0 })
        .insert_resource(TelemetrySettings::new(cfg.log_every))
        .init_resource::<ControlInbox>()
        .init_resource::<LatestSnapshot>()
        .add_systems(
            Update,
            (apply_due_script, drain_controls, tick_simulation)
                .chain()
                .in_set(SimSet),
        );

    if config.include_telemetry {
        app.add_systems(Update, telemetry::render_telemetry.after(SimSet));
    }

    app.insert_resource(cfg);
    Ok(app)
}

fn tick_period(rate_hz: f32) -> Result<Duration> {
    if !(rate_hz.is_finite() && rate_hz > 0.0) {
        anyhow::bail!("tick_rate_hz must be positive, got {rate_hz}");
    }
    Duration::try_from_secs_f64(1.0 / f64::from(rate_hz))
        .with_context(|| format!("tick_rate_hz {rate_hz} gives no usable tick period"))
}

/// Moves script entries whose tick has arrived into the inbox.
fn apply_due_script(
    mut script: ResMut<ControlScript>,
    budget: Res<TickBudget>,
    inbox: Res<ControlInbox>,
) {
    for (_, event) in script.due(budget.elapsed) {
        inbox.push(*event);
    }
}

fn drain_controls(inbox: Res<ControlInbox>, mut sim: ResMut<SimCore>, mut latest: ResMut<LatestSnapshot>) {
    for event in inbox.drain() {
        sim.0.apply_control_event(event);
        if event == protocol::ControlEvent::Reset {
            info!("operator reset");
            latest.0 = Some(sim.0.snapshot());
        }
    }
}

fn tick_simulation(
    mut sim: ResMut<SimCore>,
    mut budget: ResMut<TickBudget>,
    mut latest: ResMut<LatestSnapshot>,
    mut exit: EventWriter<AppExit>,
) {
    if budget.max_ticks.is_some_and(|max| budget.elapsed >= max) {
        exit.write(AppExit::Success);
        return;
    }
    match sim.0.step() {
        Ok(snapshot) => latest.0 = Some(snapshot),
        Err(e) => {
            error!(error = %e, "simulation diverged; stopping");
            exit.write(AppExit::error());
            return;
        }
    }
    budget.elapsed += 1;
    if budget.max_ticks.is_some_and(|max| budget.elapsed >= max) {
        info!(ticks = budget.elapsed, "tick budget spent");
        exit.write(AppExit::Success);
    }
}
