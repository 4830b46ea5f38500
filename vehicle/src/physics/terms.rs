use crate::{ThrusterCommand, VehicleParams};

/// Net actuator forces and moments in the body frame. Pure function of the command and pitch.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LocalForces {
    pub surge: f32,
    /// No actuator acts laterally; kept for symmetry with the drag terms.
    pub sway: f32,
    pub heave: f32,
    pub yaw_moment: f32,
    pub pitch_moment: f32,
}

// ----- Moments -----

/// Differential horizontal thrust is the only yaw actuator. Equal thrust yields exactly zero.
pub fn yaw_moment(params: &VehicleParams, f_h1: f32, f_h2: f32) -> f32 {
    params.lever_h * (f_h1 - f_h2) * 0.5
}

/// Moment from an uneven vertical pair. The pair is always split evenly, so
/// this is zero unless a caller drives F3 and F4 separately.
pub fn pitch_moment(params: &VehicleParams, f3: f32, f4: f32) -> f32 {
    params.lever_v * (f3 - f4) * 0.5
}

pub(super) fn yaw_damping(params: &VehicleParams, yaw_rate: f32) -> f32 {
    -params.k_yaw * yaw_rate
}

pub(super) fn pitch_damping(params: &VehicleParams, pitch_rate: f32) -> f32 {
    -params.k_pitch * pitch_rate
}

// ----- Forces -----

/// Quadratic drag, always opposing `v`.
#[inline]
pub fn quadratic_drag(coeff: f32, v: f32) -> f32 {
    -coeff * v.abs() * v
}

pub fn local_forces(params: &VehicleParams, cmd: &ThrusterCommand, pitch: f32) -> LocalForces {
    let [f1, f2, f3, f4] = cmd.thrusters();
    let horizontal = f1 + f2;
    let (sin_p, cos_p) = pitch.sin_cos();
    LocalForces {
        // Pitch attitude tilts horizontal thrust into heave
        surge: horizontal * cos_p,
        sway: 0.0,
        heave: (f3 + f4) + horizontal * sin_p + cmd.buoyancy_offset,
        yaw_moment: yaw_moment(params, f1, f2),
        pitch_moment: pitch_moment(params, f3, f4),
    }
}
