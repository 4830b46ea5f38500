use bevy_math::Vec3;

use crate::{OrientationFrame, ThrusterCommand};

#[derive(Debug, Clone, Copy, Default)]
pub struct StepDebug {
    pub dt: f32,
    pub time: f32,
    pub command: ThrusterCommand,
    // Moments
    pub yaw_moment: f32,
    pub yaw_damping: f32,
    pub yaw_acc: f32,
    pub pitch_moment: f32,
    pub pitch_acc: f32,
    // Local-frame forces (actuator) and drag
    pub f_surge: f32,
    pub f_sway: f32,
    pub f_heave: f32,
    pub drag: Vec3,
    pub acc_local: Vec3,
    pub velocity_world: Vec3,
}

/// Mutable vehicle state, owned by the simulation loop.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleState {
    /// World position (m); z negative below the surface.
    pub position: Vec3,
    /// Local-frame velocity (surge, sway, heave) in m/s.
    pub velocity: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    /// rad/s
    pub yaw_rate: f32,
    /// rad/s. Stays zero unless pitch is integrated.
    pub pitch_rate: f32,
    pub time: f32,
    /// F1, F2 (horizontal) and F3, F4 (vertical split pair), N.
    pub thrusters: [f32; 4],
    pub buoyancy_offset: f32,
}

impl VehicleState {
    /// Neutral state at `position`: everything at rest, zero angles, zero thrust.
    pub fn at_rest(position: Vec3) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            yaw_rate: 0.0,
            pitch_rate: 0.0,
            time: 0.0,
            thrusters: [0.0; 4],
            buoyancy_offset: 0.0,
        }
    }

    /// Fresh body→world frame for the current angles.
    pub fn frame(&self) -> OrientationFrame {
        OrientationFrame::from_angles(self.yaw, self.pitch)
    }

    /// Name of the first state quantity that is NaN or infinite, if any.
    pub fn first_non_finite(&self) -> Option<&'static str> {
        let checks: [(&'static str, bool); 7] = [
            ("position", self.position.is_finite()),
            ("velocity", self.velocity.is_finite()),
            ("yaw", self.yaw.is_finite()),
            ("pitch", self.pitch.is_finite()),
            ("yaw_rate", self.yaw_rate.is_finite()),
            ("pitch_rate", self.pitch_rate.is_finite()),
            ("time", self.time.is_finite()),
        ];
        checks.into_iter().find(|(_, ok)| !ok).map(|(name, _)| name)
    }
}
