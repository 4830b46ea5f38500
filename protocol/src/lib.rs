//! Control messages passed from a host UI into the vehicle simulation.
//!
//! The host never touches simulation state directly: keyboard keys, buttons
//! and sliders are turned into [`ControlEvent`]s and queued for the next tick.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Directional toggle driven by keys or buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::Forward,
        Direction::Backward,
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Forward => "forward",
            Direction::Backward => "backward",
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }

    /// Operator key bound to this direction (W/X forward/back, A/D turn, R/T up/down).
    pub fn key(self) -> char {
        match self {
            Direction::Forward => 'w',
            Direction::Backward => 'x',
            Direction::Left => 'a',
            Direction::Right => 'd',
            Direction::Up => 'r',
            Direction::Down => 't',
        }
    }

    /// Case-insensitive inverse of [`Direction::key`].
    pub fn from_key(key: char) -> Option<Self> {
        let key = key.to_ascii_lowercase();
        Direction::ALL.into_iter().find(|d| d.key() == key)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = ParseCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        Direction::ALL
            .into_iter()
            .find(|d| d.as_str() == lower)
            .ok_or_else(|| ParseCommandError::UnknownDirection(s.to_string()))
    }
}

/// Manual force-bias sliders layered on top of the toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slider {
    /// Horizontal thruster 1 bias (N).
    Horizontal1,
    /// Horizontal thruster 2 bias (N).
    Horizontal2,
    /// Combined vertical pair bias (N), split evenly between both thrusters.
    Vertical,
    /// Deviation from neutral buoyancy (N).
    Buoyancy,
}

impl Slider {
    pub fn as_str(self) -> &'static str {
        match self {
            Slider::Horizontal1 => "h1",
            Slider::Horizontal2 => "h2",
            Slider::Vertical => "vert",
            Slider::Buoyancy => "buoy",
        }
    }
}

impl fmt::Display for Slider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Slider {
    type Err = ParseCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "h1" | "f1" => Ok(Slider::Horizontal1),
            "h2" | "f2" => Ok(Slider::Horizontal2),
            "vert" | "f34" => Ok(Slider::Vertical),
            "buoy" | "b" => Ok(Slider::Buoyancy),
            _ => Err(ParseCommandError::UnknownSlider(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ControlEvent {
    /// Key down: toggle on.
    Press(Direction),
    /// Key up: toggle off.
    Release(Direction),
    /// Button click: flip the toggle.
    Toggle(Direction),
    SetSlider(Slider, f32),
    /// Direct pitch input in degrees.
    SetPitchDeg(f32),
    /// Restore the initial state and clear every control.
    Reset,
}

impl ControlEvent {
    /// Keyboard mapping: bound key down presses, key up releases. Unbound keys yield `None`.
    pub fn from_key(key: char, pressed: bool) -> Option<Self> {
        let dir = Direction::from_key(key)?;
        Some(if pressed { ControlEvent::Press(dir) } else { ControlEvent::Release(dir) })
    }
}

impl fmt::Display for ControlEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlEvent::Press(d) => write!(f, "press {d}"),
            ControlEvent::Release(d) => write!(f, "release {d}"),
            ControlEvent::Toggle(d) => write!(f, "toggle {d}"),
            ControlEvent::SetSlider(s, v) => write!(f, "slider {s} {v}"),
            ControlEvent::SetPitchDeg(v) => write!(f, "pitch {v}"),
            ControlEvent::Reset => f.write_str("reset"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseCommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command `{0}`")]
    UnknownCommand(String),
    #[error("unknown direction `{0}`")]
    UnknownDirection(String),
    #[error("unknown slider `{0}`")]
    UnknownSlider(String),
    #[error("no control bound to key `{0}`")]
    UnknownKey(char),
    #[error("missing {0}")]
    MissingArgument(&'static str),
    #[error("invalid number `{0}`")]
    InvalidNumber(String),
    #[error("unexpected trailing input `{0}`")]
    TrailingInput(String),
}

fn parse_number(token: &str) -> Result<f32, ParseCommandError> {
    token
        .parse::<f32>()
        .map_err(|_| ParseCommandError::InvalidNumber(token.to_string()))
}

/// Parses one line of the text command grammar:
///
/// ```text
/// press <dir> | release <dir> | toggle <dir>
/// slider <h1|h2|vert|buoy> <newtons>
/// pitch <degrees>
/// reset
/// +<key> | -<key>
/// ```
impl FromStr for ControlEvent {
    type Err = ParseCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens = s.split_whitespace();
        let head = tokens.next().ok_or(ParseCommandError::Empty)?;

        let event = if let Some(rest) = head.strip_prefix(['+', '-']) {
            let pressed = head.starts_with('+');
            let mut chars = rest.chars();
            let key = chars.next().ok_or(ParseCommandError::MissingArgument("key"))?;
            if chars.next().is_some() {
                return Err(ParseCommandError::UnknownCommand(head.to_string()));
            }
            ControlEvent::from_key(key, pressed).ok_or(ParseCommandError::UnknownKey(key))?
        } else {
            match head.to_ascii_lowercase().as_str() {
                "press" | "release" | "toggle" => {
                    let dir: Direction = tokens
                        .next()
                        .ok_or(ParseCommandError::MissingArgument("direction"))?
                        .parse()?;
                    match head.to_ascii_lowercase().as_str() {
                        "press" => ControlEvent::Press(dir),
                        "release" => ControlEvent::Release(dir),
                        _ => ControlEvent::Toggle(dir),
                    }
                }
                "slider" => {
                    let slider: Slider = tokens
                        .next()
                        .ok_or(ParseCommandError::MissingArgument("slider"))?
                        .parse()?;
                    let value =
                        parse_number(tokens.next().ok_or(ParseCommandError::MissingArgument("value"))?)?;
                    ControlEvent::SetSlider(slider, value)
                }
                "pitch" => {
                    let value =
                        parse_number(tokens.next().ok_or(ParseCommandError::MissingArgument("angle"))?)?;
                    ControlEvent::SetPitchDeg(value)
                }
                "reset" => ControlEvent::Reset,
                _ => return Err(ParseCommandError::UnknownCommand(head.to_string())),
            }
        };

        if let Some(extra) = tokens.next() {
            return Err(ParseCommandError::TrailingInput(extra.to_string()));
        }
        Ok(event)
    }
}
