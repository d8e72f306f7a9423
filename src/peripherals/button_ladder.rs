//! button_ladder.rs — six buttons multiplexed onto one analog pin
//!
//! The Joystick:Bit V2 wires buttons A-F through a resistor ladder onto P2, so
//! each button pulls the pin to its own voltage level. Only one level can be
//! present at a time.

use serde::{Deserialize, Serialize};

use crate::{JoystickConfig, JoystickError};

pub const LADDER_BUTTON_COUNT: usize = 6;

/// Ladder buttons. The discriminant is the nominal 10-bit reading on P2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum LadderButton {
    A = 1,
    /// Reads 516 or 517 in practice.
    B = 516,
    C = 686,
    D = 771,
    E = 855,
    /// Reads 821 or 822 in practice.
    F = 821,
}

impl LadderButton {
    pub const ALL: [LadderButton; LADDER_BUTTON_COUNT] = [
        LadderButton::A,
        LadderButton::B,
        LadderButton::C,
        LadderButton::D,
        LadderButton::E,
        LadderButton::F,
    ];

    pub const fn nominal(self) -> u16 {
        self as u16
    }
}

impl TryFrom<u16> for LadderButton {
    type Error = JoystickError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|button| button.nominal() == value)
            .ok_or(JoystickError::InvalidButton(value))
    }
}

/// How a P2 reading is compared against a button's nominal level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonMatch {
    /// Match within `nominal ± give`, bounds inclusive.
    Tolerant { give: u16 },
    /// Match only the nominal value itself.
    Exact,
}

impl ButtonMatch {
    pub const DEFAULT: ButtonMatch = ButtonMatch::Tolerant { give: 2 };

    pub fn matches(self, nominal: u16, raw: u16) -> bool {
        match self {
            ButtonMatch::Tolerant { give } => {
                let (nominal, raw, give) = (i32::from(nominal), i32::from(raw), i32::from(give));
                (nominal - give..=nominal + give).contains(&raw)
            }
            ButtonMatch::Exact => raw == nominal,
        }
    }
}

impl Default for ButtonMatch {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Decodes P2 readings into ladder buttons.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonLadder {
    policy: ButtonMatch,
}

impl ButtonLadder {
    /// Tolerant matching with a give of 2.
    pub const fn new() -> Self {
        Self::with_policy(ButtonMatch::DEFAULT)
    }

    pub const fn with_policy(policy: ButtonMatch) -> Self {
        Self { policy }
    }

    pub fn from_config(config: &JoystickConfig) -> Self {
        Self::with_policy(config.button_match)
    }

    pub fn policy(&self) -> ButtonMatch {
        self.policy
    }

    pub fn set_policy(&mut self, policy: ButtonMatch) {
        self.policy = policy;
    }

    pub fn is_active(&self, button: LadderButton, raw_p2: u16) -> bool {
        self.policy.matches(button.nominal(), raw_p2)
    }

    /// Takes the button by its nominal value. Unknown values are never active.
    pub fn is_active_by_code(&self, button: u16, raw_p2: u16) -> bool {
        LadderButton::try_from(button)
            .map(|button| self.is_active(button, raw_p2))
            .unwrap_or(false)
    }

    /// First button, in A..F order, matching the reading.
    pub fn identify(&self, raw_p2: u16) -> Option<LadderButton> {
        LadderButton::ALL
            .into_iter()
            .find(|&button| self.is_active(button, raw_p2))
    }

    /// Every button matching the reading. More than one only when the give is
    /// wide enough for neighbouring levels to overlap.
    pub fn active_buttons(&self, raw_p2: u16) -> heapless::Vec<LadderButton, LADDER_BUTTON_COUNT> {
        LadderButton::ALL
            .into_iter()
            .filter(|&button| self.is_active(button, raw_p2))
            .collect()
    }
}
