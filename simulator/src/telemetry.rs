use bevy::prelude::*;
use tracing::{info, warn};
use vehicle::Snapshot;

/// Latest completed tick, for whatever draws it.
#[derive(Resource, Debug, Default)]
pub struct LatestSnapshot(pub Option<Snapshot>);

#[derive(Resource, Debug)]
pub struct TelemetrySettings {
    pub log_every: u64,
    was_out_of_bounds: bool,
}

impl TelemetrySettings {
    pub fn new(log_every: u64) -> Self {
        Self { log_every, was_out_of_bounds: false }
    }
}

/// One-line operator readout of a snapshot.
pub fn format_snapshot(s: &Snapshot) -> String {
    format!(
        "t={:.1}s pos=({:.2}, {:.2}, {:.2}) v_local=({:.2}, {:.2}, {:.2}) m/s \
         pitch={:.1}° yaw={:.1}° yaw_rate={:.1}°/s M_yaw={:.2} N·m \
         F1={:.1}N F2={:.1}N ΔF={:.1}N B={:.1}N controls=[{}]",
        s.time,
        s.position.x,
        s.position.y,
        s.position.z,
        s.velocity_local.x,
        s.velocity_local.y,
        s.velocity_local.z,
        s.pitch_deg,
        s.yaw_deg,
        s.yaw_rate_deg,
        s.yaw_moment,
        s.f_horiz1,
        s.f_horiz2,
        s.f_diff,
        s.buoyancy,
        s.active_label(),
    )
}

/// Render adapter: reads the snapshot and logs it; never touches the simulation.
pub fn render_telemetry(latest: Res<LatestSnapshot>, mut telemetry: ResMut<TelemetrySettings>) {
    let Some(snap) = latest.0.as_ref() else { return };

    if snap.out_of_bounds != telemetry.was_out_of_bounds {
        if snap.out_of_bounds {
            warn!(
                range_m = snap.horizontal_range,
                depth_m = snap.depth,
                "vehicle left the operating envelope"
            );
        } else {
            info!("vehicle back inside the operating envelope");
        }
        telemetry.was_out_of_bounds = snap.out_of_bounds;
    }

    if telemetry.log_every > 0 && snap.tick % telemetry.log_every == 0 {
        info!(tick = snap.tick, "{}", format_snapshot(snap));
    }
}
