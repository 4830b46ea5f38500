use bevy_math::Vec3;
use tracing::trace;

use super::terms::{local_forces, pitch_damping, quadratic_drag, yaw_damping};
use super::types::{StepDebug, VehicleState};
use crate::{PitchMode, ThrusterCommand, VehicleParams};

/// Advances the vehicle by one explicit (forward-Euler) step of `dt` seconds.
/// See `step_vehicle_dbg` for the full sequence and telemetry.
pub fn step_vehicle(
    params: &VehicleParams,
    mode: PitchMode,
    cmd: &ThrusterCommand,
    state: &mut VehicleState,
    dt: f32,
) {
    step_vehicle_dbg(params, mode, cmd, state, dt, None);
}

/// Variant of `step_vehicle` that fills out an optional debug telemetry struct.
///
/// Order within a step: angular state first (yaw rate, yaw, then pitch),
/// then local linear velocity under actuator force and quadratic drag, then
/// world position through a freshly built orientation frame.
///
/// Forward Euler is only conditionally stable; the default coefficients are
/// tuned for `dt = 0.03`. Nothing here sub-steps or guards against blow-up.
pub fn step_vehicle_dbg(
    params: &VehicleParams,
    mode: PitchMode,
    cmd: &ThrusterCommand,
    state: &mut VehicleState,
    dt: f32,
    mut dbg: Option<&mut StepDebug>,
) {
    if dt <= 0.0 {
        return;
    }

    state.thrusters = cmd.thrusters();
    state.buoyancy_offset = cmd.buoyancy_offset;

    // Yaw
    let forces_now = local_forces(params, cmd, state.pitch);
    let m_yaw = forces_now.yaw_moment;
    let tau_yaw_damp = yaw_damping(params, state.yaw_rate);
    let yaw_acc = if params.iz > 0.0 { (m_yaw + tau_yaw_damp) / params.iz } else { 0.0 };
    state.yaw_rate += yaw_acc * dt;
    state.yaw += state.yaw_rate * dt;

    // Pitch
    let mut pitch_acc = 0.0_f32;
    match mode {
        PitchMode::Direct => {
            state.pitch = cmd.pitch;
            state.pitch_rate = 0.0;
        }
        PitchMode::Dynamic => {
            let tau = forces_now.pitch_moment + pitch_damping(params, state.pitch_rate);
            pitch_acc = if params.iy > 0.0 { tau / params.iy } else { 0.0 };
            state.pitch_rate += pitch_acc * dt;
            state.pitch += state.pitch_rate * dt;
        }
    }

    // Linear, local frame. Forces use the pitch just settled above.
    let f = local_forces(params, cmd, state.pitch);
    let v = state.velocity;
    let drag = Vec3::new(
        quadratic_drag(params.dx, v.x),
        quadratic_drag(params.dy, v.y),
        quadratic_drag(params.dz, v.z),
    );
    let actuator = Vec3::new(f.surge, f.sway, f.heave);
    let inv_m = if params.m > 0.0 { 1.0 / params.m } else { 0.0 };
    let acc_local = (actuator + drag) * inv_m;
    state.velocity += acc_local * dt;

    // Frame is rebuilt, never incrementally rotated
    let frame = state.frame();
    let velocity_world = frame.local_to_world(state.velocity);
    state.position += velocity_world * dt;
    state.time += dt;

    trace!(
        time = state.time,
        m_yaw,
        yaw_rate = state.yaw_rate,
        surge = f.surge,
        heave = f.heave,
        "vehicle step"
    );

    if let Some(d) = dbg.as_mut() {
        d.dt = dt;
        d.time = state.time;
        d.command = *cmd;
        d.yaw_moment = m_yaw;
        d.yaw_damping = tau_yaw_damp;
        d.yaw_acc = yaw_acc;
        d.pitch_moment = f.pitch_moment;
        d.pitch_acc = pitch_acc;
        d.f_surge = f.surge;
        d.f_sway = f.sway;
        d.f_heave = f.heave;
        d.drag = drag;
        d.acc_local = acc_local;
        d.velocity_world = velocity_world;
    }
}
