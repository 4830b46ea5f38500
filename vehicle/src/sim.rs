use protocol::ControlEvent;
use tracing::debug;

use crate::physics::{step_vehicle_dbg, StepDebug, VehicleState};
use crate::{
    ControlLimits, ControlMapper, Envelope, History, PoseSample, SimError, SimSettings, Snapshot,
    VehicleParams,
};

/// Single owner of the vehicle state, the controls and the trail.
///
/// Hosts mutate it only through [`apply_control_event`](Self::apply_control_event)
/// between ticks and [`step`](Self::step) once per tick.
#[derive(Debug, Clone)]
pub struct Simulation {
    params: VehicleParams,
    settings: SimSettings,
    envelope: Envelope,
    controls: ControlMapper,
    state: VehicleState,
    history: History,
    tick: u64,
    last_step: StepDebug,
}

impl Default for Simulation {
    fn default() -> Self {
        Self::build(
            VehicleParams::default(),
            SimSettings::default(),
            ControlLimits::default(),
            Envelope::default(),
        )
    }
}

impl Simulation {
    pub fn new(
        params: VehicleParams,
        settings: SimSettings,
        limits: ControlLimits,
        envelope: Envelope,
    ) -> Result<Self, SimError> {
        if !settings.dt.is_finite() || settings.dt <= 0.0 {
            return Err(SimError::InvalidSettings(format!(
                "dt must be positive and finite, got {}",
                settings.dt
            )));
        }
        if settings.max_history == 0 {
            return Err(SimError::InvalidSettings("max_history must be at least 1".into()));
        }
        if !settings.start_position.is_finite() {
            return Err(SimError::InvalidSettings("start_position must be finite".into()));
        }
        check_params(&params)?;
        debug!(pitch_mode = ?settings.pitch_mode, dt = settings.dt, "simulation created");
        Ok(Self::build(params, settings, limits, envelope))
    }

    fn build(
        params: VehicleParams,
        settings: SimSettings,
        limits: ControlLimits,
        envelope: Envelope,
    ) -> Self {
        Self {
            state: VehicleState::at_rest(settings.start_position),
            history: History::new(settings.max_history),
            controls: ControlMapper::new(limits),
            params,
            settings,
            envelope,
            tick: 0,
            last_step: StepDebug::default(),
        }
    }

    pub fn params(&self) -> &VehicleParams {
        &self.params
    }

    pub fn settings(&self) -> &SimSettings {
        &self.settings
    }

    pub fn state(&self) -> &VehicleState {
        &self.state
    }

    pub fn controls(&self) -> &ControlMapper {
        &self.controls
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Completed ticks since start or the last reset.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn last_step(&self) -> &StepDebug {
        &self.last_step
    }

    /// Queued operator input. `Reset` replaces the whole simulation state.
    pub fn apply_control_event(&mut self, event: ControlEvent) {
        match event {
            ControlEvent::Reset => self.reset(),
            other => self.controls.apply(other),
        }
    }

    /// Back to the initial snapshot: state at rest, empty trail, all controls cleared.
    pub fn reset(&mut self) {
        debug!(tick = self.tick, "simulation reset");
        self.state = VehicleState::at_rest(self.settings.start_position);
        self.history.clear();
        self.controls.clear();
        self.tick = 0;
        self.last_step = StepDebug::default();
    }

    /// Runs one full tick and returns the resulting snapshot.
    ///
    /// Fails fast if integration produced a NaN or infinity anywhere in the
    /// state. The offending state is kept so it can be inspected.
    pub fn step(&mut self) -> Result<Snapshot, SimError> {
        let cmd = self.controls.command();
        let mut dbg = StepDebug::default();
        step_vehicle_dbg(
            &self.params,
            self.settings.pitch_mode,
            &cmd,
            &mut self.state,
            self.settings.dt,
            Some(&mut dbg),
        );
        self.tick += 1;
        self.last_step = dbg;

        if let Some(quantity) = self.state.first_non_finite() {
            return Err(SimError::NonFinite { quantity, tick: self.tick });
        }

        self.history.push(PoseSample {
            position: self.state.position,
            yaw: self.state.yaw,
            pitch: self.state.pitch,
        });
        Ok(self.snapshot())
    }

    /// Snapshot of the current state without advancing it.
    pub fn snapshot(&self) -> Snapshot {
        let s = &self.state;
        let [f1, f2, f3, f4] = s.thrusters;
        let env = self.envelope.check(s.position);
        Snapshot {
            tick: self.tick,
            time: s.time,
            position: s.position,
            velocity_local: s.velocity,
            velocity_world: s.frame().local_to_world(s.velocity),
            yaw_deg: s.yaw.to_degrees(),
            pitch_deg: s.pitch.to_degrees(),
            yaw_rate_deg: s.yaw_rate.to_degrees(),
            yaw_moment: self.last_step.yaw_moment,
            f_horiz1: f1,
            f_horiz2: f2,
            f_diff: f1 - f2,
            f_vertical: f3 + f4,
            buoyancy_offset: s.buoyancy_offset,
            buoyancy: self.params.neutral_buoyancy() + s.buoyancy_offset,
            trail: self.history.positions(),
            active: self.controls.inputs().toggles.active(),
            horizontal_range: env.horizontal_range,
            depth: env.depth,
            out_of_bounds: env.out_of_bounds,
        }
    }
}

/// Inertias must be positive; drag and damping may be zero but never negative,
/// otherwise they would feed energy into the motion.
fn check_params(p: &VehicleParams) -> Result<(), SimError> {
    let positive = [("m", p.m), ("iy", p.iy), ("iz", p.iz)];
    for (name, value) in positive {
        if !value.is_finite() || value <= 0.0 {
            return Err(SimError::InvalidSettings(format!(
                "{name} must be positive and finite, got {value}"
            )));
        }
    }
    let non_negative = [
        ("g", p.g),
        ("dx", p.dx),
        ("dy", p.dy),
        ("dz", p.dz),
        ("k_pitch", p.k_pitch),
        ("k_yaw", p.k_yaw),
    ];
    for (name, value) in non_negative {
        if !value.is_finite() || value < 0.0 {
            return Err(SimError::InvalidSettings(format!(
                "{name} must be non-negative and finite, got {value}"
            )));
        }
    }
    if !(p.lever_h.is_finite() && p.lever_v.is_finite()) {
        return Err(SimError::InvalidSettings("lever arms must be finite".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PitchMode;
    use protocol::{Direction, Slider};

    #[test]
    fn rejects_bad_settings() {
        let bad_dt = SimSettings { dt: 0.0, ..Default::default() };
        assert!(matches!(
            Simulation::new(VehicleParams::default(), bad_dt, ControlLimits::default(), Envelope::default()),
            Err(SimError::InvalidSettings(_))
        ));
        let nan_dt = SimSettings { dt: f32::NAN, ..Default::default() };
        assert!(Simulation::new(VehicleParams::default(), nan_dt, ControlLimits::default(), Envelope::default()).is_err());
        let no_trail = SimSettings { max_history: 0, ..Default::default() };
        assert!(Simulation::new(VehicleParams::default(), no_trail, ControlLimits::default(), Envelope::default()).is_err());
    }

    fn with_params(params: VehicleParams) -> Result<Simulation, SimError> {
        Simulation::new(params, SimSettings::default(), ControlLimits::default(), Envelope::default())
    }

    #[test]
    fn rejects_bad_params() {
        let cases = [
            ("m", VehicleParams { m: 0.0, ..Default::default() }),
            ("m", VehicleParams { m: -10.0, ..Default::default() }),
            ("iz", VehicleParams { iz: 0.0, ..Default::default() }),
            ("iy", VehicleParams { iy: f32::NAN, ..Default::default() }),
            ("dx", VehicleParams { dx: -1.0, ..Default::default() }),
            ("dy", VehicleParams { dy: -0.5, ..Default::default() }),
            ("dz", VehicleParams { dz: f32::INFINITY, ..Default::default() }),
            ("k_yaw", VehicleParams { k_yaw: -0.3, ..Default::default() }),
            ("k_pitch", VehicleParams { k_pitch: -0.3, ..Default::default() }),
        ];
        for (name, params) in cases {
            match with_params(params) {
                Err(SimError::InvalidSettings(msg)) => assert!(msg.starts_with(name), "{name}: {msg}"),
                other => panic!("{name} accepted: {other:?}"),
            }
        }
    }

    #[test]
    fn zero_drag_and_damping_are_allowed() {
        let params = VehicleParams { dx: 0.0, dy: 0.0, dz: 0.0, k_yaw: 0.0, k_pitch: 0.0, ..Default::default() };
        let mut sim = with_params(params).expect("frictionless hull is valid");
        sim.apply_control_event(ControlEvent::Press(Direction::Forward));
        let snap = sim.step().expect("finite step");
        assert!(snap.velocity_local.x > 0.0);
    }

    #[test]
    fn drag_opposes_forward_motion_with_default_hull() {
        let mut sim = Simulation::default();
        sim.apply_control_event(ControlEvent::Press(Direction::Forward));
        // Drag acts on the velocity entering the step, so skip the start from rest
        sim.step().expect("finite step");
        for _ in 0..5 {
            sim.step().expect("finite step");
            let v = sim.state().velocity.x;
            let drag = sim.last_step().drag.x;
            assert!(v > 0.0);
            assert!(drag < 0.0, "drag={drag} v={v}");
        }
    }

    #[test]
    fn snapshot_reports_forces_and_toggles() {
        let mut sim = Simulation::default();
        sim.apply_control_event(ControlEvent::Press(Direction::Right));
        sim.apply_control_event(ControlEvent::SetSlider(Slider::Vertical, 6.0));
        let snap = sim.step().expect("finite step");
        assert_eq!(snap.tick, 1);
        assert_eq!(snap.active, vec![Direction::Right]);
        assert!((snap.f_diff - 21.0).abs() < 1e-4, "f_diff={}", snap.f_diff);
        assert!((snap.yaw_moment - 0.3 * 21.0 / 2.0).abs() < 1e-4);
        assert_eq!(snap.f_vertical, 6.0);
        assert!((snap.buoyancy - 98.1).abs() < 1e-3, "buoyancy={}", snap.buoyancy);
        assert_eq!(snap.trail.len(), 1);
        assert_eq!(snap.active_label(), "right");
    }

    #[test]
    fn non_finite_state_fails_fast() {
        let params = VehicleParams { m: 1e-30, ..Default::default() };
        let settings = SimSettings { dt: 10.0, ..Default::default() };
        let mut sim =
            Simulation::new(params, settings, ControlLimits::default(), Envelope::default()).expect("valid settings");
        sim.apply_control_event(ControlEvent::Press(Direction::Forward));
        let mut failure = None;
        for _ in 0..20 {
            if let Err(e) = sim.step() {
                failure = Some(e);
                break;
            }
        }
        match failure {
            Some(SimError::NonFinite { quantity, .. }) => {
                assert!(quantity == "velocity" || quantity == "position", "quantity={quantity}")
            }
            other => panic!("expected a non-finite failure, got {other:?}"),
        }
        // Failed tick is not recorded in the trail
        assert!(sim.history().len() < sim.tick() as usize);
    }

    #[test]
    fn dynamic_mode_holds_pitch_despite_input() {
        let settings = SimSettings { pitch_mode: PitchMode::Dynamic, ..Default::default() };
        let mut sim =
            Simulation::new(VehicleParams::default(), settings, ControlLimits::default(), Envelope::default())
                .expect("valid settings");
        sim.apply_control_event(ControlEvent::SetPitchDeg(30.0));
        let snap = sim.step().expect("finite step");
        assert_eq!(snap.pitch_deg, 0.0);
    }
}
