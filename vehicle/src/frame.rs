use bevy_math::{Mat3, Vec3};

/// Body→world rotation for the vehicle.
///
/// Axes: local +X surge (forward), +Y sway (lateral), +Z heave (up). The
/// world frame has +Z pointing up out of the water.
///
/// The frame is always rebuilt from the current yaw/pitch pair instead of
/// being integrated, so repeated small-angle updates cannot drift it away
/// from orthonormal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientationFrame {
    body_to_world: Mat3,
}

impl Default for OrientationFrame {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl OrientationFrame {
    pub const IDENTITY: Self = Self { body_to_world: Mat3::IDENTITY };

    /// Yaw about world Z is applied first, pitch about the lateral axis second.
    pub fn from_angles(yaw: f32, pitch: f32) -> Self {
        let combined = Mat3::from_rotation_y(pitch) * Mat3::from_rotation_z(yaw);
        Self { body_to_world: combined.transpose() }
    }

    #[inline]
    pub fn local_to_world(&self, v: Vec3) -> Vec3 {
        self.body_to_world * v
    }

    /// Inverse of [`local_to_world`](Self::local_to_world); the inverse of a rotation is its transpose.
    #[inline]
    pub fn world_to_local(&self, v: Vec3) -> Vec3 {
        self.body_to_world.transpose() * v
    }

    /// Body axes expressed in world coordinates: (surge, sway, heave).
    pub fn axes(&self) -> [Vec3; 3] {
        [
            self.body_to_world.x_axis,
            self.body_to_world.y_axis,
            self.body_to_world.z_axis,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn sample_angles() -> Vec<(f32, f32)> {
        let mut out = Vec::new();
        for i in -6..=6 {
            for j in -3..=3 {
                out.push((i as f32 * 0.55, j as f32 * 0.26));
            }
        }
        out
    }

    #[test]
    fn round_trip_recovers_vector() {
        let vectors = [
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, -2.5, 0.0),
            Vec3::new(0.3, 4.0, -7.5),
            Vec3::new(-12.0, 0.01, 3.3),
        ];
        for (yaw, pitch) in sample_angles() {
            let frame = OrientationFrame::from_angles(yaw, pitch);
            for v in vectors {
                let back = frame.world_to_local(frame.local_to_world(v));
                assert!(
                    (back - v).length() < EPS * v.length().max(1.0),
                    "round trip failed for yaw={yaw}, pitch={pitch}: {v:?} -> {back:?}"
                );
            }
        }
    }

    #[test]
    fn frame_stays_orthonormal() {
        for (yaw, pitch) in sample_angles() {
            let m = OrientationFrame::from_angles(yaw, pitch).body_to_world;
            let should_be_identity = m * m.transpose();
            assert!(
                should_be_identity.abs_diff_eq(Mat3::IDENTITY, EPS),
                "not orthonormal for yaw={yaw}, pitch={pitch}"
            );
            assert!((m.determinant() - 1.0).abs() < EPS, "det != 1");
        }
    }

    #[test]
    fn zero_angles_is_identity() {
        let frame = OrientationFrame::from_angles(0.0, 0.0);
        let v = Vec3::new(1.5, -2.0, 0.25);
        assert!((frame.local_to_world(v) - v).length() < EPS);
    }

    #[test]
    fn pure_yaw_keeps_heave_vertical() {
        let frame = OrientationFrame::from_angles(1.1, 0.0);
        let up = frame.local_to_world(Vec3::Z);
        assert!((up - Vec3::Z).length() < EPS, "heave axis tilted: {up:?}");
        let fwd = frame.local_to_world(Vec3::X);
        assert!(fwd.z.abs() < EPS);
        assert!((fwd.length() - 1.0).abs() < EPS);
    }

    #[test]
    fn pure_pitch_tilts_surge_into_vertical() {
        let pitch = 0.4_f32;
        let frame = OrientationFrame::from_angles(0.0, pitch);
        let fwd = frame.local_to_world(Vec3::X);
        assert!((fwd.z.abs() - pitch.sin()).abs() < EPS, "forward={fwd:?}");
        assert!(fwd.y.abs() < EPS);
    }
}
