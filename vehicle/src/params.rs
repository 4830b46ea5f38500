use bevy_math::Vec3;
use serde::{Deserialize, Serialize};

/// Physical parameters for a vehicle hull (SI units).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleParams {
    /// Mass (kg).
    pub m: f32,
    /// Pitch inertia (kg·m²). Only used with [`PitchMode::Dynamic`].
    pub iy: f32,
    /// Yaw inertia (kg·m²).
    pub iz: f32,
    /// Gravitational acceleration (m/s²); sets neutral buoyancy.
    pub g: f32,
    // Quadratic drag coefficients per local axis (N·s²/m²)
    pub dx: f32,
    pub dy: f32,
    pub dz: f32,
    /// Lever arm from the center of mass to each horizontal thruster (m).
    pub lever_h: f32,
    /// Lever arm from the center of mass to each vertical thruster (m).
    pub lever_v: f32,
    /// Thruster mounting angle (degrees). Hull geometry only; the force model ignores it.
    pub phi_deg: f32,
    /// Linear pitch-rate damping (N·m·s/rad).
    pub k_pitch: f32,
    /// Linear yaw-rate damping (N·m·s/rad).
    pub k_yaw: f32,
}

impl VehicleParams {
    /// Buoyant force that exactly balances weight.
    pub fn neutral_buoyancy(&self) -> f32 {
        self.m * self.g
    }
}

impl Default for VehicleParams {
    fn default() -> Self {
        presets::bench_rouv()
    }
}

pub mod presets {
    use super::*;

    /// Small bench-test ROUV: 10 kg hull, two horizontal and two vertical thrusters.
    pub fn bench_rouv() -> VehicleParams {
        let dx = 1.0;
        VehicleParams {
            m: 10.0,
            iy: 2.0,
            iz: 1.5,
            g: 9.81,
            dx,
            // Sway shares the surge coefficient
            dy: dx,
            dz: 1.2,
            lever_h: 0.3,
            lever_v: 0.5,
            phi_deg: 39.4,
            // Reduced damping for a snappier response
            k_pitch: 0.3,
            k_yaw: 0.3,
        }
    }
}

/// Where pitch comes from each tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PitchMode {
    /// Pitch follows the operator's pitch input directly.
    #[default]
    Direct,
    /// Pitch is integrated from a pitch-moment balance; the pitch input is ignored.
    Dynamic,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimSettings {
    /// Fixed integration step (s).
    pub dt: f32,
    /// Trail length kept for rendering.
    pub max_history: usize,
    pub pitch_mode: PitchMode,
    /// Initial and reset position (world, z negative below the surface).
    pub start_position: Vec3,
}

impl Default for SimSettings {
    fn default() -> Self {
        Self {
            dt: 0.03,
            max_history: 300,
            pitch_mode: PitchMode::Direct,
            start_position: Vec3::new(0.0, 0.0, -2.0),
        }
    }
}
