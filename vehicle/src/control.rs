use protocol::{ControlEvent, Direction, Slider};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Bounds and magnitudes for operator inputs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlLimits {
    /// Thrust contributed by one active toggle (N).
    pub toggle_thrust: f32,
    /// Fraction of `toggle_thrust` applied differentially by left/right.
    pub turn_fraction: f32,
    pub horizontal_bias_max: f32,
    pub vertical_bias_max: f32,
    pub buoyancy_bias_max: f32,
    pub pitch_max_deg: f32,
}

impl Default for ControlLimits {
    fn default() -> Self {
        Self {
            toggle_thrust: 15.0,
            turn_fraction: 0.7,
            horizontal_bias_max: 20.0,
            vertical_bias_max: 20.0,
            buoyancy_bias_max: 10.0,
            pitch_max_deg: 45.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Toggles {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl Toggles {
    fn flag_mut(&mut self, dir: Direction) -> &mut bool {
        match dir {
            Direction::Forward => &mut self.forward,
            Direction::Backward => &mut self.backward,
            Direction::Left => &mut self.left,
            Direction::Right => &mut self.right,
            Direction::Up => &mut self.up,
            Direction::Down => &mut self.down,
        }
    }

    pub fn is_active(&self, dir: Direction) -> bool {
        match dir {
            Direction::Forward => self.forward,
            Direction::Backward => self.backward,
            Direction::Left => self.left,
            Direction::Right => self.right,
            Direction::Up => self.up,
            Direction::Down => self.down,
        }
    }

    pub fn set(&mut self, dir: Direction, on: bool) {
        *self.flag_mut(dir) = on;
    }

    pub fn flip(&mut self, dir: Direction) {
        let flag = self.flag_mut(dir);
        *flag = !*flag;
    }

    /// Active toggles in a stable order, for display.
    pub fn active(&self) -> Vec<Direction> {
        Direction::ALL.into_iter().filter(|d| self.is_active(*d)).collect()
    }

    pub fn any(&self) -> bool {
        *self != Self::default()
    }
}

/// Everything the operator can set. Slider values are stored already clamped.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ControlInputs {
    pub toggles: Toggles,
    pub bias_h1: f32,
    pub bias_h2: f32,
    pub bias_vertical: f32,
    pub bias_buoyancy: f32,
    pub pitch_deg: f32,
}

/// Actuator command for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ThrusterCommand {
    pub f_h1: f32,
    pub f_h2: f32,
    /// Combined vertical thrust, split evenly between thrusters 3 and 4.
    pub f_vertical: f32,
    /// Signed deviation from neutral buoyancy (N).
    pub buoyancy_offset: f32,
    /// Requested pitch (rad).
    pub pitch: f32,
}

impl ThrusterCommand {
    /// Individual forces (F1, F2, F3, F4).
    pub fn thrusters(&self) -> [f32; 4] {
        let half = self.f_vertical * 0.5;
        [self.f_h1, self.f_h2, half, half]
    }
}

/// Maps inputs to thruster forces. Toggle contributions superpose, and the
/// sliders are added on top.
pub fn map_controls(inputs: &ControlInputs, limits: &ControlLimits) -> ThrusterCommand {
    let full = limits.toggle_thrust;
    let turn = full * limits.turn_fraction;
    let t = &inputs.toggles;

    let mut f_h1 = 0.0_f32;
    let mut f_h2 = 0.0_f32;
    let mut f_vertical = 0.0_f32;

    if t.forward {
        f_h1 += full;
        f_h2 += full;
    }
    if t.backward {
        f_h1 -= full;
        f_h2 -= full;
    }
    // Differential skew; thruster 2 pushes harder to swing the nose left
    if t.left {
        f_h1 -= turn;
        f_h2 += turn;
    }
    if t.right {
        f_h1 += turn;
        f_h2 -= turn;
    }
    if t.up {
        f_vertical += full;
    }
    if t.down {
        f_vertical -= full;
    }

    ThrusterCommand {
        f_h1: f_h1 + inputs.bias_h1,
        f_h2: f_h2 + inputs.bias_h2,
        f_vertical: f_vertical + inputs.bias_vertical,
        buoyancy_offset: inputs.bias_buoyancy,
        pitch: inputs.pitch_deg.to_radians(),
    }
}

/// Owns the operator's control inputs between ticks.
#[derive(Debug, Clone, Default)]
pub struct ControlMapper {
    inputs: ControlInputs,
    limits: ControlLimits,
}

impl ControlMapper {
    pub fn new(limits: ControlLimits) -> Self {
        Self { inputs: ControlInputs::default(), limits }
    }

    pub fn inputs(&self) -> &ControlInputs {
        &self.inputs
    }

    pub fn command(&self) -> ThrusterCommand {
        map_controls(&self.inputs, &self.limits)
    }

    /// Clears every toggle and returns sliders and pitch to zero.
    pub fn clear(&mut self) {
        self.inputs = ControlInputs::default();
    }

    pub fn apply(&mut self, event: ControlEvent) {
        match event {
            ControlEvent::Press(dir) => self.inputs.toggles.set(dir, true),
            ControlEvent::Release(dir) => self.inputs.toggles.set(dir, false),
            ControlEvent::Toggle(dir) => self.inputs.toggles.flip(dir),
            ControlEvent::SetSlider(slider, value) => {
                let Some(value) = self.clamp_slider(slider, value) else { return };
                match slider {
                    Slider::Horizontal1 => self.inputs.bias_h1 = value,
                    Slider::Horizontal2 => self.inputs.bias_h2 = value,
                    Slider::Vertical => self.inputs.bias_vertical = value,
                    Slider::Buoyancy => self.inputs.bias_buoyancy = value,
                }
            }
            ControlEvent::SetPitchDeg(deg) => {
                if !deg.is_finite() {
                    warn!(deg, "ignoring non-finite pitch input");
                    return;
                }
                let max = self.limits.pitch_max_deg;
                self.inputs.pitch_deg = deg.clamp(-max, max);
            }
            ControlEvent::Reset => self.clear(),
        }
    }

    fn clamp_slider(&self, slider: Slider, value: f32) -> Option<f32> {
        if !value.is_finite() {
            warn!(%slider, value, "ignoring non-finite slider value");
            return None;
        }
        let max = match slider {
            Slider::Horizontal1 | Slider::Horizontal2 => self.limits.horizontal_bias_max,
            Slider::Vertical => self.limits.vertical_bias_max,
            Slider::Buoyancy => self.limits.buoyancy_bias_max,
        };
        Some(value.clamp(-max, max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapper() -> ControlMapper {
        ControlMapper::new(ControlLimits::default())
    }

    #[test]
    fn forward_drives_both_horizontals_equally() {
        let mut m = mapper();
        m.apply(ControlEvent::Press(Direction::Forward));
        let cmd = m.command();
        assert_eq!(cmd.f_h1, 15.0);
        assert_eq!(cmd.f_h2, 15.0);
        assert_eq!(cmd.f_vertical, 0.0);
    }

    #[test]
    fn left_is_differential_at_seventy_percent() {
        let mut m = mapper();
        m.apply(ControlEvent::Press(Direction::Left));
        let cmd = m.command();
        assert!((cmd.f_h1 + 10.5).abs() < 1e-6, "f_h1={}", cmd.f_h1);
        assert!((cmd.f_h2 - 10.5).abs() < 1e-6, "f_h2={}", cmd.f_h2);
        assert_eq!(cmd.f_h1 + cmd.f_h2, 0.0);
    }

    #[test]
    fn forward_and_left_superpose() {
        let mut m = mapper();
        m.apply(ControlEvent::Press(Direction::Forward));
        m.apply(ControlEvent::Press(Direction::Left));
        let cmd = m.command();
        assert!((cmd.f_h1 - 4.5).abs() < 1e-5);
        assert!((cmd.f_h2 - 25.5).abs() < 1e-5);
    }

    #[test]
    fn opposing_toggles_cancel() {
        let mut m = mapper();
        for dir in Direction::ALL {
            m.apply(ControlEvent::Press(dir));
        }
        let cmd = m.command();
        assert_eq!(cmd.f_h1, 0.0);
        assert_eq!(cmd.f_h2, 0.0);
        assert_eq!(cmd.f_vertical, 0.0);
    }

    #[test]
    fn sliders_add_on_top_of_toggles() {
        let mut m = mapper();
        m.apply(ControlEvent::Press(Direction::Up));
        m.apply(ControlEvent::SetSlider(Slider::Vertical, 4.0));
        m.apply(ControlEvent::SetSlider(Slider::Horizontal2, -3.0));
        m.apply(ControlEvent::SetSlider(Slider::Buoyancy, 2.5));
        let cmd = m.command();
        assert_eq!(cmd.f_vertical, 19.0);
        assert_eq!(cmd.f_h2, -3.0);
        assert_eq!(cmd.buoyancy_offset, 2.5);
        assert_eq!(cmd.thrusters(), [0.0, -3.0, 9.5, 9.5]);
    }

    #[test]
    fn slider_and_pitch_values_are_clamped() {
        let mut m = mapper();
        m.apply(ControlEvent::SetSlider(Slider::Horizontal1, 250.0));
        m.apply(ControlEvent::SetSlider(Slider::Buoyancy, -99.0));
        m.apply(ControlEvent::SetPitchDeg(80.0));
        assert_eq!(m.inputs().bias_h1, 20.0);
        assert_eq!(m.inputs().bias_buoyancy, -10.0);
        assert_eq!(m.inputs().pitch_deg, 45.0);
        assert!((m.command().pitch - 45f32.to_radians()).abs() < 1e-6);
    }

    #[test]
    fn non_finite_values_are_ignored() {
        let mut m = mapper();
        m.apply(ControlEvent::SetSlider(Slider::Horizontal1, 5.0));
        m.apply(ControlEvent::SetSlider(Slider::Horizontal1, f32::NAN));
        m.apply(ControlEvent::SetPitchDeg(f32::INFINITY));
        assert_eq!(m.inputs().bias_h1, 5.0);
        assert_eq!(m.inputs().pitch_deg, 0.0);
    }

    #[test]
    fn toggle_flips_and_release_clears() {
        let mut m = mapper();
        m.apply(ControlEvent::Toggle(Direction::Down));
        assert!(m.inputs().toggles.down);
        m.apply(ControlEvent::Toggle(Direction::Down));
        assert!(!m.inputs().toggles.down);
        m.apply(ControlEvent::Press(Direction::Right));
        m.apply(ControlEvent::Release(Direction::Right));
        assert!(!m.inputs().toggles.any());
    }

    #[test]
    fn reset_clears_everything() {
        let mut m = mapper();
        m.apply(ControlEvent::Press(Direction::Forward));
        m.apply(ControlEvent::SetSlider(Slider::Vertical, 7.0));
        m.apply(ControlEvent::SetPitchDeg(-10.0));
        m.apply(ControlEvent::Reset);
        assert_eq!(*m.inputs(), ControlInputs::default());
        assert_eq!(m.command(), ThrusterCommand::default());
    }
}
