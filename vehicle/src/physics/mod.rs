mod types;
mod terms;
mod dynamics;

pub use types::{VehicleState, StepDebug};
pub use terms::{local_forces, quadratic_drag, yaw_moment, pitch_moment, LocalForces};
pub use dynamics::{step_vehicle, step_vehicle_dbg};
