//! Planar-plus-yaw dynamics core for a remotely operated underwater vehicle.
//!
//! This crate has no rendering or windowing types. Hosts feed it
//! [`protocol::ControlEvent`]s, call [`Simulation::step`] once per tick and
//! draw the returned [`Snapshot`].

mod frame;
pub use frame::OrientationFrame;

mod params;
pub use params::{presets, PitchMode, SimSettings, VehicleParams};

mod control;
pub use control::{map_controls, ControlInputs, ControlLimits, ControlMapper, ThrusterCommand, Toggles};

pub mod physics;
pub use physics::{step_vehicle, step_vehicle_dbg, StepDebug, VehicleState};

mod history;
pub use history::{History, PoseSample};

mod envelope;
pub use envelope::{Envelope, EnvelopeStatus};

mod error;
pub use error::SimError;

mod snapshot;
pub use snapshot::Snapshot;

mod sim;
pub use sim::Simulation;
