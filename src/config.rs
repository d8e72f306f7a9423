use serde::{Deserialize, Serialize};

use crate::{ButtonMatch, DEFAULT_CENTER, DEFAULT_TOLERANCE};

/// Tunables for a joystick panel: rest point, analog dead zone and the
/// button ladder match policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct JoystickConfig {
    /// Raw X reading at rest.
    pub center_x: u16,
    /// Raw Y reading at rest.
    pub center_y: u16,
    /// Analog "centered" radius, 0..=1023. Anything larger is ignored.
    pub tolerance: u16,
    /// How P2 readings are matched against ladder values.
    pub button_match: ButtonMatch,
}

impl JoystickConfig {
    /// ElecFreaks Joystick:Bit V2 (white board, six buttons on P2)
    pub fn elecfreaks_joystick_bit_v2() -> &'static Self {
        const JOYSTICK_BIT_V2: JoystickConfig = JoystickConfig {
            center_x: DEFAULT_CENTER,
            center_y: DEFAULT_CENTER,
            tolerance: DEFAULT_TOLERANCE,
            button_match: ButtonMatch::DEFAULT,
        };

        &JOYSTICK_BIT_V2
    }
}

impl Default for JoystickConfig {
    fn default() -> Self {
        *Self::elecfreaks_joystick_bit_v2()
    }
}
