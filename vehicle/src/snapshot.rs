use bevy_math::Vec3;
use protocol::Direction;
use serde::{Deserialize, Serialize};

use crate::OrientationFrame;

/// Read-only view of one completed tick, handed to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub tick: u64,
    /// Simulated time (s).
    pub time: f32,
    pub position: Vec3,
    /// Surge, sway, heave (m/s).
    pub velocity_local: Vec3,
    pub velocity_world: Vec3,
    pub yaw_deg: f32,
    pub pitch_deg: f32,
    pub yaw_rate_deg: f32,
    /// N·m
    pub yaw_moment: f32,
    pub f_horiz1: f32,
    pub f_horiz2: f32,
    /// `f_horiz1 - f_horiz2`
    pub f_diff: f32,
    pub f_vertical: f32,
    pub buoyancy_offset: f32,
    /// Absolute buoyant force: neutral buoyancy plus the operator offset (N).
    pub buoyancy: f32,
    /// Recent positions, oldest first.
    pub trail: Vec<Vec3>,
    pub active: Vec<Direction>,
    pub horizontal_range: f32,
    pub depth: f32,
    pub out_of_bounds: bool,
}

impl Snapshot {
    pub fn frame(&self) -> OrientationFrame {
        OrientationFrame::from_angles(self.yaw_deg.to_radians(), self.pitch_deg.to_radians())
    }

    /// Body axes (surge, sway, heave) in world coordinates, for axis arrows.
    pub fn axes(&self) -> [Vec3; 3] {
        self.frame().axes()
    }

    /// Comma-separated active toggles, or `none`.
    pub fn active_label(&self) -> String {
        if self.active.is_empty() {
            return "none".to_string();
        }
        self.active.iter().map(|d| d.as_str()).collect::<Vec<_>>().join(", ")
    }
}
