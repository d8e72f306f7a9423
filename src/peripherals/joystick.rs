//! joystick.rs — two-axis analog stick calibration and direction classification
//!
//! All queries take the raw X (P0) and Y (P1) samples as arguments, so the
//! classifier itself never touches hardware. Raw samples are 10-bit ADC
//! readings: X grows to the right, Y grows upward, so the bottom-left corner
//! reads (0, 0).

use serde::{Deserialize, Serialize};

use crate::{JoystickConfig, JoystickError};

/// Largest value a 10-bit ADC reading can take.
pub const ADC_MAX: u16 = 1023;

/// Rest reading of an uncalibrated stick on both axes.
pub const DEFAULT_CENTER: u16 = 522;

/// Default analog dead-zone radius.
pub const DEFAULT_TOLERANCE: u16 = 5;

/// Dead-zone radius for the 8-way digital classification. Independent of the
/// configurable analog tolerance.
pub const DIGITAL_THRESHOLD: u16 = 150;

/// Returned by [`JoystickClassifier::center_by_code`] for an unknown axis.
pub const INVALID_AXIS: i32 = -1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Axis {
    /// Left/right, read on P0.
    X = 0,
    /// Bottom/top, read on P1.
    Y = 1,
}

impl TryFrom<u8> for Axis {
    type Error = JoystickError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Axis::X),
            1 => Ok(Axis::Y),
            _ => Err(JoystickError::InvalidAxis(code)),
        }
    }
}

/// Directions tested by [`JoystickClassifier::is_pointing`]. These are not
/// exclusive: a stick in the bottom-left corner points both Left and Bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum AnalogDirection {
    Top = 0,
    Right = 1,
    Bottom = 2,
    Left = 3,
    Centre = 4,
}

impl TryFrom<u8> for AnalogDirection {
    type Error = JoystickError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(AnalogDirection::Top),
            1 => Ok(AnalogDirection::Right),
            2 => Ok(AnalogDirection::Bottom),
            3 => Ok(AnalogDirection::Left),
            4 => Ok(AnalogDirection::Centre),
            _ => Err(JoystickError::InvalidAnalogDirection(code)),
        }
    }
}

/// 8-way D-pad state, numbered clockwise from Top with Centre last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum DigitalDirection {
    Top = 0,
    TopRight = 1,
    Right = 2,
    BottomRight = 3,
    Bottom = 4,
    BottomLeft = 5,
    Left = 6,
    TopLeft = 7,
    Centre = 8,
}

impl DigitalDirection {
    /// Compass arrow for this state; `None` when centred.
    pub fn to_compass(self) -> Option<CompassDirection> {
        match self {
            DigitalDirection::Top => Some(CompassDirection::North),
            DigitalDirection::TopRight => Some(CompassDirection::NorthEast),
            DigitalDirection::Right => Some(CompassDirection::East),
            DigitalDirection::BottomRight => Some(CompassDirection::SouthEast),
            DigitalDirection::Bottom => Some(CompassDirection::South),
            DigitalDirection::BottomLeft => Some(CompassDirection::SouthWest),
            DigitalDirection::Left => Some(CompassDirection::West),
            DigitalDirection::TopLeft => Some(CompassDirection::NorthWest),
            DigitalDirection::Centre => None,
        }
    }

    /// Same as [`to_compass`](Self::to_compass) for a raw state code. Unknown
    /// codes have no direction.
    pub fn compass_from_code(code: u8) -> Option<CompassDirection> {
        Self::try_from(code).ok().and_then(Self::to_compass)
    }
}

impl TryFrom<u8> for DigitalDirection {
    type Error = JoystickError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(DigitalDirection::Top),
            1 => Ok(DigitalDirection::TopRight),
            2 => Ok(DigitalDirection::Right),
            3 => Ok(DigitalDirection::BottomRight),
            4 => Ok(DigitalDirection::Bottom),
            5 => Ok(DigitalDirection::BottomLeft),
            6 => Ok(DigitalDirection::Left),
            7 => Ok(DigitalDirection::TopLeft),
            8 => Ok(DigitalDirection::Centre),
            _ => Err(JoystickError::InvalidDigitalDirection(code)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CompassDirection {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

/// Calibrated center plus analog tolerance for one stick.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct JoystickClassifier {
    center_x: u16,
    center_y: u16,
    tolerance: u16,
}

impl Default for JoystickClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl JoystickClassifier {
    /// Center (522, 522), tolerance 5.
    pub const fn new() -> Self {
        Self {
            center_x: DEFAULT_CENTER,
            center_y: DEFAULT_CENTER,
            tolerance: DEFAULT_TOLERANCE,
        }
    }

    /// Build from a config. An out-of-range tolerance leaves the default in
    /// place, the same as [`set_tolerance`](Self::set_tolerance).
    pub fn from_config(config: &JoystickConfig) -> Self {
        let mut classifier = Self::new();
        classifier.calibrate(config.center_x, config.center_y);
        classifier.set_tolerance(i32::from(config.tolerance));
        classifier
    }

    pub fn center(&self, axis: Axis) -> u16 {
        match axis {
            Axis::X => self.center_x,
            Axis::Y => self.center_y,
        }
    }

    /// Center for a raw axis code, or [`INVALID_AXIS`] if the code is unknown.
    pub fn center_by_code(&self, axis: u8) -> i32 {
        Axis::try_from(axis)
            .map(|axis| i32::from(self.center(axis)))
            .unwrap_or(INVALID_AXIS)
    }

    pub fn tolerance(&self) -> u16 {
        self.tolerance
    }

    /// Values outside 0..=1023 are silently ignored.
    pub fn set_tolerance(&mut self, value: i32) {
        if self.try_set_tolerance(value).is_err() {
            debug!("ignoring out-of-range joystick tolerance {}", value);
        }
    }

    pub fn try_set_tolerance(&mut self, value: i32) -> Result<(), JoystickError> {
        match u16::try_from(value) {
            Ok(tolerance) if tolerance <= ADC_MAX => {
                self.tolerance = tolerance;
                Ok(())
            }
            _ => Err(JoystickError::ToleranceOutOfRange(value)),
        }
    }

    /// Record the given samples as the rest position. The stick must be
    /// untouched when they were taken; nothing here checks that.
    pub fn calibrate(&mut self, raw_x: u16, raw_y: u16) {
        self.center_x = raw_x;
        self.center_y = raw_y;
        debug!("joystick calibrated: center=({}, {})", raw_x, raw_y);
    }

    pub fn config(&self, button_match: crate::ButtonMatch) -> JoystickConfig {
        JoystickConfig {
            center_x: self.center_x,
            center_y: self.center_y,
            tolerance: self.tolerance,
            button_match,
        }
    }

    pub fn raw_value(&self, axis: Axis, raw_x: u16, raw_y: u16) -> u16 {
        match axis {
            Axis::X => raw_x,
            Axis::Y => raw_y,
        }
    }

    /// Unknown axis codes read as 0.
    pub fn raw_value_by_code(&self, axis: u8, raw_x: u16, raw_y: u16) -> u16 {
        Axis::try_from(axis)
            .map(|axis| self.raw_value(axis, raw_x, raw_y))
            .unwrap_or(0)
    }

    /// Distance from center: negative is left/bottom, positive is right/top.
    pub fn offset_value(&self, axis: Axis, raw_x: u16, raw_y: u16) -> i32 {
        i32::from(self.raw_value(axis, raw_x, raw_y)) - i32::from(self.center(axis))
    }

    /// Unknown axis codes read as 0.
    pub fn offset_value_by_code(&self, axis: u8, raw_x: u16, raw_y: u16) -> i32 {
        Axis::try_from(axis)
            .map(|axis| self.offset_value(axis, raw_x, raw_y))
            .unwrap_or(0)
    }

    /// Directions use strict comparisons against `center ± tolerance`; Centre
    /// is inclusive on both bounds. A sample exactly `tolerance` away from
    /// center is therefore Centre and not pointing anywhere.
    pub fn is_pointing(&self, direction: AnalogDirection, raw_x: u16, raw_y: u16) -> bool {
        let x = i32::from(raw_x);
        let y = i32::from(raw_y);
        let cx = i32::from(self.center_x);
        let cy = i32::from(self.center_y);
        let tol = i32::from(self.tolerance);

        match direction {
            AnalogDirection::Left => x < cx - tol,
            AnalogDirection::Right => x > cx + tol,
            AnalogDirection::Top => y > cy + tol,
            AnalogDirection::Bottom => y < cy - tol,
            AnalogDirection::Centre => {
                (cy - tol..=cy + tol).contains(&y) && (cx - tol..=cx + tol).contains(&x)
            }
        }
    }

    /// Unknown direction codes are never pointed at.
    pub fn is_pointing_by_code(&self, direction: u8, raw_x: u16, raw_y: u16) -> bool {
        AnalogDirection::try_from(direction)
            .map(|direction| self.is_pointing(direction, raw_x, raw_y))
            .unwrap_or(false)
    }

    /// 8-way D-pad reading using [`DIGITAL_THRESHOLD`]. The X axis decides
    /// first; Y then refines it into a diagonal or picks Top/Bottom.
    pub fn classify_digital(&self, raw_x: u16, raw_y: u16) -> DigitalDirection {
        let x = i32::from(raw_x);
        let y = i32::from(raw_y);
        let cx = i32::from(self.center_x);
        let cy = i32::from(self.center_y);
        let threshold = i32::from(DIGITAL_THRESHOLD);

        let left = x < cx - threshold;
        let right = x > cx + threshold;
        let up = y > cy + threshold;
        let down = y < cy - threshold;

        let direction = if left {
            if up {
                DigitalDirection::TopLeft
            } else if down {
                DigitalDirection::BottomLeft
            } else {
                DigitalDirection::Left
            }
        } else if right {
            if up {
                DigitalDirection::TopRight
            } else if down {
                DigitalDirection::BottomRight
            } else {
                DigitalDirection::Right
            }
        } else if up {
            DigitalDirection::Top
        } else if down {
            DigitalDirection::Bottom
        } else {
            DigitalDirection::Centre
        };

        trace!("digital direction ({}, {}) -> {}", raw_x, raw_y, direction);
        direction
    }

    pub fn compass_direction(&self, raw_x: u16, raw_y: u16) -> Option<CompassDirection> {
        self.classify_digital(raw_x, raw_y).to_compass()
    }
}
