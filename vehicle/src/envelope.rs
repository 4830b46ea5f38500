use bevy_math::Vec3;
use serde::{Deserialize, Serialize};

/// Advisory operating area: a disc of `radius_m` around the launch point,
/// down to `max_depth_m` below the surface. Never affects the dynamics.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct Envelope {
    pub radius_m: f32,
    pub max_depth_m: f32,
}

impl Default for Envelope {
    fn default() -> Self {
        Self { radius_m: 300.0, max_depth_m: 10.0 }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EnvelopeStatus {
    /// Distance from the origin in the horizontal plane (m).
    pub horizontal_range: f32,
    /// Positive below the surface (m).
    pub depth: f32,
    pub out_of_bounds: bool,
}

impl Envelope {
    pub fn check(&self, position: Vec3) -> EnvelopeStatus {
        let horizontal_range = position.truncate().length();
        let depth = -position.z;
        EnvelopeStatus {
            horizontal_range,
            depth,
            out_of_bounds: horizontal_range > self.radius_m || depth > self.max_depth_m,
        }
    }
}
